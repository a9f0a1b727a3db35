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

//! Writing .xdna records.
//!
//! The [Encoder] writes one [SeqRecord] into memory in the same order the
//! [decoder](crate::decoder) reads it. Information that the format cannot
//! hold (fuzzy feature locations, more than 255 features, strings longer
//! than 255 bytes) is dropped and counted in [EncodeWarnings], which is
//! returned alongside the encoded bytes.
//!
use crate::Feature;
use crate::Position;
use crate::SeqRecord;
use crate::Strand;
use crate::Topology;
use crate::error::EncodeError;
use crate::headers::feature::FeatureFlags;
use crate::headers::feature::encode_feature_flags;
use crate::headers::file::FileHeader;
use crate::headers::file::encode_file_header;
use crate::pstring::write_pstring;

use indexmap::IndexMap;
use log::warn;

/// Maximum number of features, the count is stored in a single byte.
pub const MAX_FEATURES: usize = u8::MAX as usize;

/// Color written for every feature.
pub const DEFAULT_COLOR: &str = "127,127,127";

/// Qualifiers that are not written to the description field.
pub const SKIPPED_QUALIFIERS: [&str; 2] = ["label", "translation"];

/// Information lost while encoding a record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EncodeWarnings {
    /// Features dropped because their start or end is not exact.
    pub fuzzy_features_dropped: usize,
    /// Features dropped after the first [MAX_FEATURES].
    pub excess_features_dropped: usize,
    /// At least one string was cut to 255 bytes.
    pub strings_truncated: bool,
}

impl EncodeWarnings {
    pub fn is_empty(&self) -> bool {
        self.fuzzy_features_dropped == 0 && self.excess_features_dropped == 0 && !self.strings_truncated
    }

    /// Logs one warning per category that occurred.
    pub fn log(&self) {
        if self.fuzzy_features_dropped > 0 {
            warn!("Dropping {} features with fuzzy locations", self.fuzzy_features_dropped);
        }
        if self.excess_features_dropped > 0 {
            warn!("Too many features, dropping the last {}", self.excess_features_dropped);
        }
        if self.strings_truncated {
            warn!("Some annotations were truncated to 255 characters");
        }
    }
}

/// Text stored in the comment field.
///
/// Contains the id of the record followed by its description, unless the
/// description already starts with the id.
pub fn record_comment(
    record: &SeqRecord,
) -> String {
    if record.description.starts_with(&record.id) {
        record.description.clone()
    } else {
        format!("{} {}", record.id, record.description)
    }
}

/// Joins qualifiers as CR-separated `key="value"` lines.
///
/// Skips the [SKIPPED_QUALIFIERS]; the label is stored in its own field.
pub fn feature_description(
    qualifiers: &IndexMap<String, Vec<String>>,
) -> String {
    qualifiers.iter()
        .filter(|(key, _)| !SKIPPED_QUALIFIERS.contains(&key.as_str()))
        .flat_map(|(key, values)| values.iter().map(move |value| format!("{}=\"{}\"", key, value)))
        .collect::<Vec<String>>()
        .join("\r")
}

/// Converts a 0-based half-open range to 1-based inclusive coordinates in
/// the order they are stored, ie. swapped for reverse strand features.
pub fn location_to_wire(
    start: usize,
    end: usize,
    strand: Strand,
) -> (usize, usize) {
    match strand {
        Strand::Forward => (start + 1, end),
        Strand::Reverse => (end, start + 1),
    }
}

fn check_ascii(
    s: &str,
    field: &'static str,
) -> Result<(), EncodeError> {
    if s.is_ascii() { Ok(()) } else { Err(EncodeError::NonAsciiContent { field }) }
}

fn len_u32(
    len: usize,
    field: &'static str,
) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLong { field, len })
}

/// Writes a single record into memory.
#[derive(Debug, Default)]
pub struct Encoder {
    out: Vec<u8>,
    warnings: EncodeWarnings,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::default()
    }

    /// Encodes `record` and returns the bytes together with the warnings.
    pub fn encode(
        mut self,
        record: &SeqRecord,
    ) -> Result<(Vec<u8>, EncodeWarnings), EncodeError> {
        if !record.seq.is_ascii() {
            return Err(EncodeError::NonAsciiContent { field: "sequence" })
        }
        let comment = record_comment(record);
        check_ascii(&comment, "comment")?;

        let header = FileHeader::new(
            record.molecule.to_u8(),
            record.topology.unwrap_or(Topology::Linear).to_u8(),
            len_u32(record.seq.len(), "sequence")?,
            len_u32(comment.len(), "comment")?,
        );
        self.out.append(&mut encode_file_header(&header)?);

        self.out.extend_from_slice(&record.seq);
        self.out.extend_from_slice(comment.as_bytes());

        // Annotation section
        self.out.push(0);
        write_pstring(&mut self.out, "0", &mut self.warnings); // right-side overhang
        write_pstring(&mut self.out, "0", &mut self.warnings); // left-side overhang

        let mut features: Vec<(&Feature, usize, usize)> = record.features.iter().filter_map(|feature| {
            match (feature.location.start, feature.location.end) {
                (Position::Exact(start), Position::Exact(end)) => Some((feature, start, end)),
                _ => None,
            }
        }).collect();
        self.warnings.fuzzy_features_dropped = record.features.len() - features.len();

        if features.len() > MAX_FEATURES {
            self.warnings.excess_features_dropped = features.len() - MAX_FEATURES;
            features.truncate(MAX_FEATURES);
        }

        self.out.push(features.len() as u8);
        for (feature, start, end) in features {
            self.write_feature(feature, start, end)?;
        }

        Ok((self.out, self.warnings))
    }

    fn write_feature(
        &mut self,
        feature: &Feature,
        start: usize,
        end: usize,
    ) -> Result<(), EncodeError> {
        let label = feature.label().unwrap_or("");
        let description = feature_description(&feature.qualifiers);
        check_ascii(label, "feature label")?;
        check_ascii(&description, "feature qualifiers")?;
        check_ascii(&feature.kind, "feature type")?;

        write_pstring(&mut self.out, label, &mut self.warnings);
        write_pstring(&mut self.out, &description, &mut self.warnings);
        write_pstring(&mut self.out, &feature.kind, &mut self.warnings);

        let (wire_start, wire_end) = location_to_wire(start, end, feature.location.strand);
        write_pstring(&mut self.out, &wire_start.to_string(), &mut self.warnings);
        write_pstring(&mut self.out, &wire_end.to_string(), &mut self.warnings);

        let flags = FeatureFlags::for_strand(feature.location.strand);
        self.out.append(&mut encode_feature_flags(&flags)?);
        write_pstring(&mut self.out, DEFAULT_COLOR, &mut self.warnings);

        Ok(())
    }
}

/// Encodes the only record in `records`.
///
/// ## Errors
///
/// Fails with [EncodeError::EmptyInput] or [EncodeError::TooManyRecords]
/// before anything is encoded if `records` does not contain exactly one
/// record.
///
pub fn encode_records(
    records: &[SeqRecord],
) -> Result<(Vec<u8>, EncodeWarnings), EncodeError> {
    let record = match records {
        [] => return Err(EncodeError::EmptyInput),
        [record] => record,
        _ => return Err(EncodeError::TooManyRecords(records.len())),
    };
    let (bytes, warnings) = Encoder::new().encode(record)?;
    warnings.log();
    Ok((bytes, warnings))
}
