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
use std::io::Read;

use crate::error::DecodeError;
use crate::pstring::read_bytes;
use crate::pstring::read_pstring_as_integer;

/// Single-stranded end of a double-stranded sequence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Overhang {
    /// Negative for a 3' overhang, positive for a 5' overhang.
    pub length: i64,
    pub seq: Vec<u8>,
}

impl Overhang {
    pub fn is_five_prime(&self) -> bool {
        self.length > 0
    }
}

/// Read an overhang specification.
///
/// An overhang is stored as a Pascal string with the signed overhang length
/// in decimal, followed by the overhang sequence if the length is not zero.
///
/// Returns None if the length is zero.
///
/// ## Usage
///
/// ```rust
/// use xdna::decoder::overhang::read_overhang;
/// use std::io::Cursor;
///
/// // 3' C overhang
/// let mut input = Cursor::new(b"\x02-1C".to_vec());
/// let got = read_overhang(&mut input).unwrap().unwrap();
///
/// assert_eq!(got.length, -1);
/// assert_eq!(got.seq, b"C".to_vec());
/// ```
///
pub fn read_overhang<R: Read>(
    conn: &mut R,
) -> Result<Option<Overhang>, DecodeError> {
    let length = read_pstring_as_integer(conn)?;
    if length == 0 {
        return Ok(None)
    }
    let seq = read_bytes(conn, length.unsigned_abs() as usize, "overhang")?;
    Ok(Some(Overhang { length, seq }))
}
