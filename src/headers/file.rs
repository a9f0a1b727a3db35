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

use bincode::{Encode, Decode};
use bincode::encode_into_std_write;
use bincode::decode_from_slice;

use crate::error::DecodeError;
use crate::error::EncodeError;
use crate::error::truncated;
use crate::headers::config;

/// Encoded size of [FileHeader] in bytes.
pub const FILE_HEADER_LEN: usize = 112;

/// Value of the last reserved header byte when writing.
pub const END_OF_HEADER: u8 = 255;

#[derive(Encode, Debug, Decode, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u8,
    pub seq_type: u8,
    pub topology: u8,
    pub reserved1: [u8; 25],
    pub seq_len: u32,
    /// Length of the sequence before the origin, ignored.
    pub neg_len: u32,
    pub reserved2: [u8; 60],
    pub comment_len: u32,
    pub reserved3: [u8; 12],
}

impl FileHeader {
    /// Header for writing, with the reserved bytes filled in.
    pub fn new(
        seq_type: u8,
        topology: u8,
        seq_len: u32,
        comment_len: u32,
    ) -> Self {
        let mut reserved3 = [0_u8; 12];
        reserved3[11] = END_OF_HEADER;
        FileHeader {
            version: 0, seq_type, topology,
            reserved1: [0; 25],
            seq_len, neg_len: 0,
            reserved2: [0; 60],
            comment_len,
            reserved3,
        }
    }
}

pub fn encode_file_header(
    header: &FileHeader,
) -> Result<Vec<u8>, EncodeError> {
    let mut bytes: Vec<u8> = Vec::with_capacity(FILE_HEADER_LEN);
    let nbytes = encode_into_std_write(
        header,
        &mut bytes,
        config(),
    )?;
    assert_eq!(nbytes, FILE_HEADER_LEN);
    Ok(bytes)
}

pub fn decode_file_header(
    header_bytes: &[u8],
) -> Result<FileHeader, DecodeError> {
    Ok(decode_from_slice(header_bytes, config())?.0)
}

pub fn read_file_header<R: Read>(
    conn: &mut R,
) -> Result<FileHeader, DecodeError> {
    let mut header_bytes: [u8; FILE_HEADER_LEN] = [0_u8; FILE_HEADER_LEN];
    conn.read_exact(&mut header_bytes).map_err(|e| truncated(e, "file header", FILE_HEADER_LEN))?;
    let res = decode_file_header(&header_bytes)?;
    Ok(res)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn encode_file_header_layout() {
        use super::FileHeader;
        use super::encode_file_header;

        let header = FileHeader::new(1, 1, 0x0102_0304, 7);
        let got = encode_file_header(&header).unwrap();

        let mut expected: Vec<u8> = vec![0, 1, 1];
        expected.append(&mut vec![0; 25]);
        expected.append(&mut vec![0x01, 0x02, 0x03, 0x04]);
        expected.append(&mut vec![0; 4]);
        expected.append(&mut vec![0; 60]);
        expected.append(&mut vec![0, 0, 0, 7]);
        expected.append(&mut vec![0; 11]);
        expected.push(255);

        assert_eq!(got, expected);
    }

    #[test]
    fn read_file_header_fields() {
        use std::io::Cursor;
        use super::read_file_header;

        let mut data: Vec<u8> = vec![0; 112];
        data[1] = 4;
        data[2] = 0;
        data[28..32].copy_from_slice(&42_u32.to_be_bytes());
        data[32..36].copy_from_slice(&3_u32.to_be_bytes());
        data[96..100].copy_from_slice(&11_u32.to_be_bytes());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_file_header(&mut input).unwrap();

        assert_eq!(got.version, 0);
        assert_eq!(got.seq_type, 4);
        assert_eq!(got.topology, 0);
        assert_eq!(got.seq_len, 42);
        assert_eq!(got.neg_len, 3);
        assert_eq!(got.comment_len, 11);
    }

    #[test]
    fn read_file_header_truncated() {
        use std::io::Cursor;
        use crate::error::DecodeError;
        use super::read_file_header;

        let mut input: Cursor<Vec<u8>> = Cursor::new(vec![0; 50]);
        let got = read_file_header(&mut input);

        assert!(matches!(got, Err(DecodeError::TruncatedInput{ expected: 112, .. })));
    }
}
