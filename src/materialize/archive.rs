// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip archive target.
//!
//! ```text
//! open()      tempfile next to the destination, ZipWriter on top
//! write_*()   one entry each, a failed copy drops the half-written entry
//! finalize()  finish() the central directory, rename over the destination
//! abort()     drop writer and tempfile: nothing appears at the destination
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::sink::{EntrySink, WriteReport};
use crate::error::ExportError;
use crate::export::{WriteStrategy, ZipCompression};
use crate::logging::LogReason;
use crate::overlay::RelativePath;

/// Entries at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

const fn compression_method(compression: ZipCompression) -> CompressionMethod {
    match compression {
        ZipCompression::Stored => CompressionMethod::Stored,
        ZipCompression::Deflated => CompressionMethod::Deflated,
        ZipCompression::Bzip2 => CompressionMethod::Bzip2,
        ZipCompression::Zstd => CompressionMethod::Zstd,
    }
}

/// Writes one entry, dropping it again when the copy fails halfway.
pub(crate) fn stream_entry<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    path: &RelativePath,
    options: SimpleFileOptions,
    input: &mut impl Read,
) -> io::Result<u64> {
    writer
        .start_file(path.as_str(), options)
        .map_err(io::Error::other)?;
    match io::copy(input, writer) {
        Ok(written) => Ok(written),
        Err(e) => {
            writer.abort_file().map_err(io::Error::other)?;
            Err(e)
        }
    }
}

/// Streams entries into a zip file that only appears once complete.
pub struct ZipSink {
    destination: PathBuf,
    overwrite_existing: bool,
    options: SimpleFileOptions,
    writer: Option<ZipWriter<File>>,
    temp: Option<NamedTempFile>,
}

impl std::fmt::Debug for ZipSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipSink")
            .field("destination", &self.destination)
            .field("open", &self.writer.is_some())
            .finish_non_exhaustive()
    }
}

impl ZipSink {
    pub fn new(
        destination: impl Into<PathBuf>,
        compression: ZipCompression,
        level: Option<i64>,
        overwrite_existing: bool,
    ) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(compression_method(compression))
            .compression_level(level);
        Self {
            destination: destination.into(),
            overwrite_existing,
            options,
            writer: None,
            temp: None,
        }
    }

    fn writer(&mut self) -> io::Result<&mut ZipWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("archive is not open"))
    }

    fn fatal(&self, source: io::Error) -> ExportError {
        ExportError::destination(&self.destination, source)
    }
}

impl EntrySink for ZipSink {
    fn destination(&self) -> &Path {
        &self.destination
    }

    fn open(&mut self) -> Result<(), ExportError> {
        if self.destination.is_dir() {
            return Err(self.fatal(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a directory is in the way",
            )));
        }
        if self.destination.exists() && !self.overwrite_existing {
            return Err(self.fatal(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "archive exists and overwriting is disabled",
            )));
        }

        let parent = match self.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| self.fatal(e))?;

        let temp = tempfile::Builder::new()
            .prefix(".mox-")
            .suffix(".zip.part")
            .tempfile_in(&parent)
            .map_err(|e| self.fatal(e))?;
        let file = temp.as_file().try_clone().map_err(|e| self.fatal(e))?;

        debug!(
            reason = LogReason::Archive.as_str(),
            temp = %temp.path().display(),
            "archive stream opened"
        );
        self.writer = Some(ZipWriter::new(file));
        self.temp = Some(temp);
        Ok(())
    }

    fn create_dir(&mut self, path: &RelativePath) -> io::Result<bool> {
        let options = self.options;
        self.writer()?
            .add_directory(path.as_str(), options)
            .map_err(io::Error::other)?;
        Ok(true)
    }

    fn write_file(
        &mut self,
        path: &RelativePath,
        source: &Path,
        strategy: WriteStrategy,
    ) -> io::Result<WriteReport> {
        // Open first so an unreadable source never leaves an empty entry
        let mut input = File::open(source)?;
        let size = input.metadata()?.len();
        let options = self.options.large_file(size >= ZIP64_THRESHOLD);

        stream_entry(self.writer()?, path, options, &mut input)?;

        let fallback = (strategy == WriteStrategy::Hardlink)
            .then(|| "archive entries cannot be hardlinked, copied instead".to_string());
        Ok(WriteReport {
            fallback,
            ..WriteReport::created()
        })
    }

    fn write_bytes(&mut self, path: &RelativePath, bytes: &[u8]) -> io::Result<WriteReport> {
        let options = self.options;
        stream_entry(self.writer()?, path, options, &mut &*bytes)?;
        Ok(WriteReport::created())
    }

    fn finalize(&mut self) -> Result<(), ExportError> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| self.fatal(io::Error::other("archive is not open")))?;
        let file = writer
            .finish()
            .map_err(|e| self.fatal(io::Error::other(e)))?;
        file.sync_all().map_err(|e| self.fatal(e))?;
        drop(file);

        let temp = self
            .temp
            .take()
            .ok_or_else(|| self.fatal(io::Error::other("archive is not open")))?;
        temp.persist(&self.destination)
            .map_err(|e| self.fatal(e.error))?;
        debug!(
            reason = LogReason::Archive.as_str(),
            archive = %self.destination.display(),
            "archive finalized"
        );
        Ok(())
    }

    fn abort(&mut self, _cleanup: bool) {
        // Writer first: the tempfile cannot be removed while a handle is open on Windows
        self.writer = None;
        if let Some(temp) = self.temp.take() {
            let _ = temp.close();
        }
    }
}
