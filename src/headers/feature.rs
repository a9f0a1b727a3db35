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

use crate::Strand;
use crate::error::DecodeError;
use crate::error::EncodeError;
use crate::error::truncated;
use crate::headers::config;

pub const FEATURE_FLAGS_LEN: usize = 4;

/// Display flags stored after the coordinates of a feature.
///
/// Only `forward` is used by [Feature](crate::Feature). The meaning of
/// `unknown` has not been determined and it is written as 0.
#[derive(Encode, Debug, Decode, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub forward: u8,
    pub display: u8,
    pub unknown: u8,
    pub arrow: u8,
}

impl FeatureFlags {
    /// Flags written for a feature on `strand`.
    pub fn for_strand(strand: Strand) -> Self {
        let forward = match strand {
            Strand::Forward => 1,
            Strand::Reverse => 0,
        };
        FeatureFlags { forward, display: 1, unknown: 0, arrow: 1 }
    }

    pub fn strand(&self) -> Strand {
        if self.forward != 0 { Strand::Forward } else { Strand::Reverse }
    }
}

pub fn encode_feature_flags(
    flags: &FeatureFlags,
) -> Result<Vec<u8>, EncodeError> {
    let mut bytes: Vec<u8> = Vec::with_capacity(FEATURE_FLAGS_LEN);
    let nbytes = encode_into_std_write(
        flags,
        &mut bytes,
        config(),
    )?;
    assert_eq!(nbytes, FEATURE_FLAGS_LEN);
    Ok(bytes)
}

pub fn read_feature_flags<R: Read>(
    conn: &mut R,
) -> Result<FeatureFlags, DecodeError> {
    let mut bytes: [u8; FEATURE_FLAGS_LEN] = [0_u8; FEATURE_FLAGS_LEN];
    conn.read_exact(&mut bytes).map_err(|e| truncated(e, "feature flags", FEATURE_FLAGS_LEN))?;
    Ok(decode_from_slice(&bytes, config())?.0)
}
