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

//! Errors returned by the [decoder](crate::decoder) and the
//! [encoder](crate::encoder).
//!
//! Both error types are fatal: no partial record is returned from a failed
//! decode and no bytes are produced by a failed encode. Conditions that only
//! lose information on write are reported through
//! [EncodeWarnings](crate::encoder::EncodeWarnings) instead.

use thiserror::Error;

/// Failure to read a .xdna record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The version byte in the file header was not 0.
    #[error("Unsupported XDNA version {0}")]
    UnsupportedVersion(u8),

    /// The sequence type code is not in the type table.
    #[error("Unknown sequence type code {0}")]
    UnknownSequenceType(u8),

    /// The input ended before `expected` bytes of `field` could be read.
    #[error("Cannot read {expected} bytes of {field}: input is truncated")]
    TruncatedInput {
        field: &'static str,
        expected: usize,
    },

    /// A Pascal string that should hold a decimal integer does not.
    #[error("Malformed integer '{text}'")]
    MalformedInteger {
        text: String,
    },

    /// A text field contains bytes outside of the ASCII range.
    #[error("Non-ASCII content in {field}")]
    NonAscii {
        field: &'static str,
    },

    /// Feature coordinates that do not form a valid range.
    #[error("Invalid feature location {start}..{end}")]
    InvalidLocation {
        start: i64,
        end: i64,
    },

    #[error("Malformed header: {0}")]
    Header(#[from] bincode::error::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to write a .xdna record.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No record was supplied.
    #[error("Must have one sequence")]
    EmptyInput,

    /// More than one record was supplied; .xdna holds exactly one.
    #[error("More than one sequence found ({0} records)")]
    TooManyRecords(usize),

    /// A residue, comment or annotation contains non-ASCII characters.
    #[error("Non-ASCII content in {field}")]
    NonAsciiContent {
        field: &'static str,
    },

    /// The sequence or the comment does not fit in a 32-bit length field.
    #[error("{field} is too long for the format ({len} bytes)")]
    TooLong {
        field: &'static str,
        len: usize,
    },

    #[error("Cannot encode header: {0}")]
    Header(#[from] bincode::error::EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wraps [std::io::Read::read_exact] failures, turning an early end of input
/// into [DecodeError::TruncatedInput].
pub(crate) fn truncated(
    err: std::io::Error,
    field: &'static str,
    expected: usize,
) -> DecodeError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        DecodeError::TruncatedInput { field, expected }
    } else {
        DecodeError::Io(err)
    }
}
