// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of host text files (`modlist.txt`, `meta.ini`).
//!
//! ```text
//! bytes --(BOM?)--> UTF-8 / UTF-16 LE / UTF-16 BE
//!       --(valid UTF-8?)--> UTF-8
//!       --(otherwise)--> Windows-1252
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD.

use encoding_rs::{Encoding as TextEncoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// Encoding detected for a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, with or without BOM
    Utf8,
    /// UTF-16, endianness taken from the BOM
    Utf16,
    /// Active Code Page, Windows-1252
    Acp,
}

/// Detects the encoding of `bytes` and decodes them to UTF-8.
///
/// A BOM wins. Without one, valid UTF-8 is taken as is and anything else
/// is read as Windows-1252, which is what older host versions wrote.
///
/// # Example
/// ```
/// use mox::utility::encoding::{decode_text, Encoding};
///
/// let (text, encoding) = decode_text(b"caf\xe9");
/// assert_eq!(text, "café");
/// assert_eq!(encoding, Encoding::Acp);
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, Encoding) {
    if let Some((encoding, bom_len)) = TextEncoding::for_bom(bytes) {
        let (text, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        let detected = if encoding == UTF_8 {
            Encoding::Utf8
        } else {
            Encoding::Utf16
        };
        return (text, detected);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), Encoding::Utf8),
        Err(_) => {
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text, Encoding::Acp)
        }
    }
}

/// Reads a file and decodes it with [`decode_text`].
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub fn read_text(path: &std::path::Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes).0.into_owned())
}

#[cfg(test)]
mod tests;
