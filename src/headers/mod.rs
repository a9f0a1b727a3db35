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

//! Fixed-size blocks used in the .xdna format.
//!
//! Consists of the [FileHeader](file::FileHeader) at the start of every
//! .xdna record and the [FeatureFlags](feature::FeatureFlags) stored with
//! each feature in the optional annotation section.
//!
//! Both are serialized with [bincode] using big-endian fixed-width integers,
//! see [config].
//!
//! ## File header
//!
//! A FileHeader is always 112 bytes long and contains:
//!
//! - Format version (1 byte), always 0.
//! - Sequence type code (1 byte), see [MoleculeKind](crate::MoleculeKind).
//! - Topology code (1 byte), see [Topology](crate::Topology).
//! - 25 reserved bytes.
//! - Length of the sequence (4 bytes).
//! - Length of the part of the sequence before the origin (4 bytes). This is
//!   not used and always written as 0.
//! - 60 reserved bytes.
//! - Length of the comment (4 bytes).
//! - 12 reserved bytes. When writing, the last of these is set to 255.
//!
//! The header is followed by the sequence and the comment as plain ASCII.
//!
//! ## Feature flags
//!
//! Four single-byte flags follow the coordinates of each feature:
//!
//! - Strand (0: reverse, otherwise forward).
//! - Whether to display the feature.
//! - Unknown meaning, always written as 0.
//! - Whether to draw an arrow when displaying the feature.
//!

pub mod feature;
pub mod file;

/// Big-endian fixed-width integer configuration shared by all headers.
pub fn config() -> bincode::config::Configuration<bincode::config::BigEndian, bincode::config::Fixint> {
    bincode::config::standard()
        .with_big_endian()
        .with_fixed_int_encoding()
}
