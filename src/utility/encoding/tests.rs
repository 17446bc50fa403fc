// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, decode_text, read_text};

#[test]
fn test_utf8_passthrough() {
    let input = "Hello, 世界!";
    let (text, encoding) = decode_text(input.as_bytes());
    assert_eq!(encoding, Encoding::Utf8);
    insta::assert_snapshot!(text, @"Hello, 世界!");
}

#[test]
fn test_utf8_bom_is_stripped() {
    let (text, encoding) = decode_text(b"\xef\xbb\xbf+Mod");
    assert_eq!(encoding, Encoding::Utf8);
    assert_eq!(text, "+Mod");
}

#[test]
fn test_windows_1252_fallback() {
    // "café" in Windows-1252: 0x63 0x61 0x66 0xe9
    let (text, encoding) = decode_text(b"caf\xe9");
    assert_eq!(encoding, Encoding::Acp);
    insta::assert_snapshot!(text, @"café");
}

#[test]
fn test_utf16_le_bom() {
    // BOM + "Hi" in UTF-16 LE
    let (text, encoding) = decode_text(b"\xff\xfeH\x00i\x00");
    assert_eq!(encoding, Encoding::Utf16);
    assert_eq!(text, "Hi");
}

#[test]
fn test_read_text() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("modlist.txt");
    std::fs::write(&path, b"+Caf\xe9 Mod\r\n").unwrap();
    assert_eq!(read_text(&path).unwrap(), "+Café Mod\r\n");
}
