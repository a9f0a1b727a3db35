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

//! xdna is a library and a command-line client for reading and writing the
//! binary .xdna sequence format used by DNA Strider and SerialCloner.
//!
//! A .xdna file holds exactly one nucleotide or protein sequence together
//! with a comment and an optional list of annotated features.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The xdna CLI supports the following subcommands:
//!   - `xdna view` print the sequence summary and the features.
//!   - `xdna fasta` convert to FASTA.
//!   - `xdna reencode` read and write a file back, normalizing its contents.
//!
//! ### Rust API
//!
//! [decode_from_read] and [encode_to_write] operate on structs that
//! implement [Read] and [Write]. [decode] and [encode] work on bytes in
//! memory.
//!
//! For finer control, the following structs are provided:
//!
//!   - [Decoder](decoder::Decoder): takes a [Read] containing a .xdna file and yields the [SeqRecord] stored in it.
//!   - [Encoder](encoder::Encoder): takes a [SeqRecord] and encodes it into a Vec<u8>.
//!
//! ## File format specification
//!
//! All integers are big-endian. Strings are ASCII.
//!
//! | Field             | Size           | Contents                                  |
//! |-------------------|----------------|-------------------------------------------|
//! | header            | 112            | see [headers]                             |
//! | sequence          | sequence length|                                           |
//! | comment           | comment length |                                           |
//! | marker            | 0 or 1         | present if the annotation section follows |
//! | right overhang    | variable       | see [read_overhang](decoder::overhang::read_overhang) |
//! | left overhang     | variable       |                                           |
//! | feature count     | 1              | 0-255                                     |
//! | features          | variable       |                                           |
//!
//! Each feature consists of the following fields:
//!
//!   - name, description, type, start and end as [Pascal strings](pstring).
//!     The coordinates are 1-based, inclusive, and swapped for features on
//!     the reverse strand.
//!   - four [flag bytes](headers::feature::FeatureFlags).
//!   - the display color as a Pascal string `"R,G,B"`.
//!

use std::io::Read;
use std::io::Write;

use indexmap::IndexMap;

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod headers;
pub mod pstring;

use encoder::EncodeWarnings;
use error::DecodeError;
use error::EncodeError;

/// Type of features stored without one.
pub const DEFAULT_FEATURE_TYPE: &str = "misc_feature";

/// Kind of molecule stored in a record.
///
/// ## Usage
///
/// ```rust
/// use xdna::MoleculeKind;
///
/// let kind = MoleculeKind::from_u8(2).unwrap();
/// let is_nucleotide = match kind {
///     MoleculeKind::Dna | MoleculeKind::Rna => true,
///     MoleculeKind::Unknown | MoleculeKind::Protein => false,
/// };
///
/// assert!(is_nucleotide);
/// assert_eq!(kind.to_u8(), 1);
/// ```
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoleculeKind {
    #[default]
    Unknown,
    Dna,
    Rna,
    Protein,
}

impl MoleculeKind {
    /// Codes 1 and 2 are both DNA.
    pub fn from_u8(val: u8) -> Result<Self, DecodeError> {
        match val {
            0 => Ok(MoleculeKind::Unknown),
            1 | 2 => Ok(MoleculeKind::Dna),
            3 => Ok(MoleculeKind::Rna),
            4 => Ok(MoleculeKind::Protein),
            _ => Err(DecodeError::UnknownSequenceType(val)),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match &self {
            MoleculeKind::Unknown => 0,
            MoleculeKind::Dna => 1,
            MoleculeKind::Rna => 3,
            MoleculeKind::Protein => 4,
        }
    }
}

impl std::fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MoleculeKind::Unknown => write!(f, "unknown"),
            MoleculeKind::Dna => write!(f, "DNA"),
            MoleculeKind::Rna => write!(f, "RNA"),
            MoleculeKind::Protein => write!(f, "protein"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}

impl Topology {
    /// Returns None for codes other than 0 and 1.
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Topology::Linear),
            1 => Some(Topology::Circular),
            _ => None,
        }
    }

    pub fn to_u8(&self) -> u8 {
        match &self {
            Topology::Linear => 0,
            Topology::Circular => 1,
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Topology::Linear => write!(f, "linear"),
            Topology::Circular => write!(f, "circular"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

/// A 0-based sequence position.
///
/// Only [Position::Exact] can be stored in a .xdna file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Exact(usize),
    /// Somewhere before the position.
    Before(usize),
    /// Somewhere after the position.
    After(usize),
}

impl Position {
    pub fn exact(&self) -> Option<usize> {
        match self {
            Position::Exact(pos) => Some(*pos),
            _ => None,
        }
    }
}

/// Half-open range `[start, end)` on a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: Position,
    pub end: Position,
    pub strand: Strand,
}

impl Location {
    pub fn new(start: usize, end: usize, strand: Strand) -> Self {
        Location{ start: Position::Exact(start), end: Position::Exact(end), strand }
    }
}

/// An annotated region of a sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    /// Feature type, eg. "CDS" or "promoter".
    pub kind: String,
    pub location: Location,
    /// Qualifier names and their values in insertion order.
    pub qualifiers: IndexMap<String, Vec<String>>,
}

impl Feature {
    /// First value of the "label" qualifier.
    pub fn label(&self) -> Option<&str> {
        self.qualifiers.get("label")?.first().map(|label| label.as_str())
    }
}

/// A sequence and its annotations.
///
/// When decoding, `id` and `name` are both the first word of the comment and
/// `description` is the whole comment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeqRecord {
    /// Residues as ASCII.
    pub seq: Vec<u8>,
    pub molecule: MoleculeKind,
    /// Written as linear if None.
    pub topology: Option<Topology>,
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<Feature>,
}

/// Decode a .xdna record from something that implements [Read](std::io::Read).
///
/// Reading stops after the last feature, any trailing bytes are left in
/// `conn_in`.
///
/// ## Usage
///
/// ```rust
/// use xdna::{decode_from_read, encode_to_write};
/// use xdna::{MoleculeKind, SeqRecord, Topology};
/// use std::io::{Cursor, Seek};
///
/// let record = SeqRecord{
///     seq: b"ATGAAAGTTTGA".to_vec(),
///     molecule: MoleculeKind::Dna,
///     topology: Some(Topology::Circular),
///     id: "pTest".to_string(),
///     name: "pTest".to_string(),
///     description: "pTest test plasmid".to_string(),
///     features: Vec::new(),
/// };
///
/// let mut bytes: Cursor<Vec<u8>> = Cursor::new(Vec::new());
/// encode_to_write(&[record.clone()], &mut bytes).unwrap();
///
/// bytes.rewind().unwrap();
/// let got = decode_from_read(&mut bytes).unwrap();
///
/// assert_eq!(got, record);
/// ```
///
pub fn decode_from_read<R: Read>(
    conn_in: &mut R,
) -> Result<SeqRecord, DecodeError> {
    decoder::read_record(conn_in)
}

/// Decode a .xdna record from memory.
pub fn decode(
    bytes: &[u8],
) -> Result<SeqRecord, DecodeError> {
    let mut conn_in = bytes;
    decoder::read_record(&mut conn_in)
}

/// Encode a record into memory.
///
/// `records` must contain exactly one record. Information that could not be
/// stored is reported in the returned [EncodeWarnings] and logged.
///
/// ## Usage
///
/// ```rust
/// use xdna::{decode, encode};
/// use xdna::{Feature, Location, SeqRecord, Strand};
/// use indexmap::IndexMap;
///
/// let mut qualifiers: IndexMap<String, Vec<String>> = IndexMap::new();
/// qualifiers.insert("label".to_string(), vec!["ori".to_string()]);
///
/// let record = SeqRecord{
///     seq: b"ACGTACGTACGT".to_vec(),
///     id: "seq1".to_string(),
///     features: vec![Feature{ kind: "rep_origin".to_string(), location: Location::new(2, 8, Strand::Reverse), qualifiers }],
///     ..Default::default()
/// };
///
/// let (bytes, warnings) = encode(&[record]).unwrap();
/// assert!(warnings.is_empty());
///
/// let got = decode(&bytes).unwrap();
/// assert_eq!(got.features[0].location, Location::new(2, 8, Strand::Reverse));
/// assert_eq!(got.features[0].label(), Some("ori"));
/// ```
///
pub fn encode(
    records: &[SeqRecord],
) -> Result<(Vec<u8>, EncodeWarnings), EncodeError> {
    encoder::encode_records(records)
}

/// Encode a record to something that implements [Write](std::io::Write).
///
/// The record is encoded in full before writing, so nothing is written to
/// `conn_out` if encoding fails.
///
pub fn encode_to_write<W: Write>(
    records: &[SeqRecord],
    conn_out: &mut W,
) -> Result<EncodeWarnings, EncodeError> {
    let (bytes, warnings) = encoder::encode_records(records)?;
    conn_out.write_all(&bytes)?;
    conn_out.flush()?;
    Ok(warnings)
}

// Tests
#[cfg(test)]
mod tests {
    use crate::Feature;
    use crate::Location;
    use crate::Strand;

    use indexmap::IndexMap;

    fn labeled_feature(label: &str, kind: &str, location: Location) -> Feature {
        let mut qualifiers: IndexMap<String, Vec<String>> = IndexMap::new();
        qualifiers.insert("label".to_string(), vec![label.to_string()]);
        Feature{ kind: kind.to_string(), location, qualifiers }
    }

    #[test]
    fn encode_decode_record_with_features() {
        use crate::{decode, encode};
        use crate::{MoleculeKind, SeqRecord, Topology};

        let mut cds = labeled_feature("lacZ", "CDS", Location::new(4, 10, Strand::Forward));
        cds.qualifiers.insert("gene".to_string(), vec!["lacZ".to_string()]);
        cds.qualifiers.insert("translation".to_string(), vec!["MK".to_string()]);

        let record = SeqRecord{
            seq: b"MKVLAAGIVGLLLAQ".to_vec(),
            molecule: MoleculeKind::Protein,
            topology: Some(Topology::Linear),
            id: "P1".to_string(),
            name: "P1".to_string(),
            description: "P1 a protein".to_string(),
            features: vec![
                cds,
                labeled_feature("rev", "misc_feature", Location::new(4, 10, Strand::Reverse)),
                labeled_feature("whole", "region", Location::new(0, 15, Strand::Forward)),
            ],
        };

        let (bytes, warnings) = encode(&[record.clone()]).unwrap();
        assert!(warnings.is_empty());
        let got = decode(&bytes).unwrap();

        assert_eq!(got.seq, record.seq);
        assert_eq!(got.molecule, record.molecule);
        assert_eq!(got.topology, record.topology);
        assert_eq!(got.id, "P1");
        assert_eq!(got.description, "P1 a protein");
        assert_eq!(got.features.len(), 3);
        for (got_feature, expected) in got.features.iter().zip(record.features.iter()) {
            assert_eq!(got_feature.location, expected.location);
            assert_eq!(got_feature.kind, expected.kind);
            assert_eq!(got_feature.label(), expected.label());
        }
        assert_eq!(got.features[0].qualifiers["gene"], vec!["lacZ".to_string()]);
        assert!(!got.features[0].qualifiers.contains_key("translation"));
    }

    #[test]
    fn encode_decode_unset_topology_is_linear() {
        use crate::{decode, encode};
        use crate::{SeqRecord, Topology};

        let record = SeqRecord{ seq: b"ACGT".to_vec(), ..Default::default() };
        let (bytes, _) = encode(&[record]).unwrap();

        assert_eq!(decode(&bytes).unwrap().topology, Some(Topology::Linear));
    }

    #[test]
    fn encode_decode_caps_feature_count() {
        use crate::{decode, encode};
        use crate::SeqRecord;

        let features: Vec<Feature> = (0..300).map(|idx| {
            labeled_feature(&format!("f{}", idx), "misc_feature", Location::new(idx, idx + 1, Strand::Forward))
        }).collect();
        let record = SeqRecord{ seq: vec![b'A'; 400], id: "many".to_string(), features, ..Default::default() };

        let (bytes, warnings) = encode(&[record]).unwrap();
        assert_eq!(warnings.excess_features_dropped, 45);
        assert_eq!(warnings.fuzzy_features_dropped, 0);

        let got = decode(&bytes).unwrap();
        assert_eq!(got.features.len(), 255);
        got.features.iter().enumerate().for_each(|(idx, feature)| {
            assert_eq!(feature.label(), Some(format!("f{}", idx).as_str()));
            assert_eq!(feature.location, Location::new(idx, idx + 1, Strand::Forward));
        });
    }

    #[test]
    fn encode_to_write_nothing_on_error() {
        use crate::encode_to_write;
        use crate::SeqRecord;
        use crate::error::EncodeError;

        let record = SeqRecord{ seq: b"ACGT".to_vec(), ..Default::default() };
        let mut output: Vec<u8> = Vec::new();
        let got = encode_to_write(&[record.clone(), record], &mut output);

        assert!(matches!(got, Err(EncodeError::TooManyRecords(2))));
        assert!(output.is_empty());
    }

    #[test]
    fn decode_ignores_trailing_marker_value() {
        use crate::{decode, encode};
        use crate::SeqRecord;

        let record = SeqRecord{ seq: b"ACGT".to_vec(), id: "x".to_string(), ..Default::default() };
        let (mut bytes, _) = encode(&[record]).unwrap();
        bytes[112 + 4 + 2] = 0xAB;

        let got = decode(&bytes).unwrap();
        assert!(got.features.is_empty());
        assert_eq!(got.id, "x");
    }
}
