// xdna: Reading and writing DNA Strider / SerialCloner .xdna sequence files.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Pascal strings.
//!
//! A Pascal string is a single byte giving the length of the string followed
//! by that many ASCII bytes, so the payload is at most 255 bytes long.
//!
use std::io::Read;

use crate::encoder::EncodeWarnings;
use crate::error::DecodeError;
use crate::error::truncated;

pub const MAX_PSTRING_LEN: usize = u8::MAX as usize;

/// Reads exactly `len` bytes.
///
/// Does not preallocate `len` bytes so that a corrupt length field cannot
/// trigger a huge allocation.
pub fn read_bytes<R: Read>(
    conn: &mut R,
    len: usize,
    field: &'static str,
) -> Result<Vec<u8>, DecodeError> {
    let mut bytes: Vec<u8> = Vec::new();
    conn.take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < len {
        return Err(DecodeError::TruncatedInput { field, expected: len })
    }
    Ok(bytes)
}

/// Converts bytes that must be plain ASCII to a String.
pub fn ascii_to_string(
    bytes: Vec<u8>,
    field: &'static str,
) -> Result<String, DecodeError> {
    if !bytes.is_ascii() {
        return Err(DecodeError::NonAscii { field })
    }
    String::from_utf8(bytes).map_err(|_| DecodeError::NonAscii { field })
}

pub fn read_u8<R: Read>(
    conn: &mut R,
    field: &'static str,
) -> Result<u8, DecodeError> {
    let mut byte: [u8; 1] = [0];
    conn.read_exact(&mut byte).map_err(|e| truncated(e, field, 1))?;
    Ok(byte[0])
}

pub fn read_pstring<R: Read>(
    conn: &mut R,
) -> Result<String, DecodeError> {
    let len = read_u8(conn, "string length")? as usize;
    let bytes = read_bytes(conn, len, "string")?;
    ascii_to_string(bytes, "string")
}

/// Parses a decimal integer with an optional sign, ignoring surrounding whitespace.
pub fn parse_integer(
    text: &str,
) -> Result<i64, DecodeError> {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
        .parse::<i64>()
        .map_err(|_| DecodeError::MalformedInteger { text: text.to_string() })
}

pub fn read_pstring_as_integer<R: Read>(
    conn: &mut R,
) -> Result<i64, DecodeError> {
    parse_integer(&read_pstring(conn)?)
}

/// Appends `s` as a Pascal string to `out`.
///
/// Payloads longer than [MAX_PSTRING_LEN] bytes are cut and the truncation
/// is recorded in `warnings`. `s` must be ASCII so that the cut never lands
/// inside a character.
pub fn write_pstring(
    out: &mut Vec<u8>,
    s: &str,
    warnings: &mut EncodeWarnings,
) {
    let bytes = s.as_bytes();
    let bytes = if bytes.len() > MAX_PSTRING_LEN {
        warnings.strings_truncated = true;
        &bytes[0..MAX_PSTRING_LEN]
    } else {
        bytes
    };
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
}
