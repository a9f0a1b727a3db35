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

//! Reading .xdna records.
//!
//! A .xdna file is read in a fixed order: the [file header](crate::headers::file),
//! the sequence and the comment, and, if any bytes remain, the annotation
//! section holding the two [overhangs](overhang) and the features.
//!
pub mod overhang;
pub mod qualifiers;

use crate::DEFAULT_FEATURE_TYPE;
use crate::Feature;
use crate::Location;
use crate::MoleculeKind;
use crate::SeqRecord;
use crate::Strand;
use crate::Topology;
use crate::error::DecodeError;
use crate::headers::feature::read_feature_flags;
use crate::headers::file::read_file_header;
use crate::pstring::ascii_to_string;
use crate::pstring::read_bytes;
use crate::pstring::read_pstring;
use crate::pstring::read_pstring_as_integer;
use crate::pstring::read_u8;

use overhang::read_overhang;
use qualifiers::parse_feature_description;

use std::io::ErrorKind;
use std::io::Read;

use indexmap::IndexMap;
use log::info;

/// Reads the single record in a .xdna file.
///
/// The format holds exactly one sequence, so the iterator yields one item
/// and then stops, regardless of whether decoding succeeded.
pub struct Decoder<'a, R: Read> {
    conn: &'a mut R,
    done: bool,
}

impl<'a, R: Read> Decoder<'a, R> {
    pub fn new(
        conn: &'a mut R,
    ) -> Self {
        Decoder{ conn, done: false }
    }
}

impl<R: Read> Iterator for Decoder<'_, R> {
    type Item = Result<SeqRecord, DecodeError>;

    fn next(
        &mut self,
    ) -> Option<Result<SeqRecord, DecodeError>> {
        if self.done {
            return None
        }
        self.done = true;
        Some(read_record(self.conn))
    }
}

/// Returns true if another byte could be read from `conn`.
///
/// The value of the byte is ignored, only its presence marks the start of
/// the annotation section.
fn read_annotation_marker<R: Read>(
    conn: &mut R,
) -> Result<bool, DecodeError> {
    let mut marker: [u8; 1] = [0];
    loop {
        match conn.read(&mut marker) {
            Ok(nbytes) => return Ok(nbytes == 1),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::Io(e)),
        }
    }
}

/// Converts 1-based inclusive coordinates to a 0-based half-open [Location].
///
/// `start` and `end` must already be in ascending order, ie. swapped back
/// for reverse strand features.
pub fn wire_to_location(
    start: i64,
    end: i64,
    strand: Strand,
) -> Result<Location, DecodeError> {
    if start < 1 || start - 1 > end {
        return Err(DecodeError::InvalidLocation { start, end })
    }
    let start_0 = usize::try_from(start - 1).map_err(|_| DecodeError::InvalidLocation { start, end })?;
    let end_0 = usize::try_from(end).map_err(|_| DecodeError::InvalidLocation { start, end })?;
    Ok(Location::new(start_0, end_0, strand))
}

/// Read a single feature record.
pub fn read_feature<R: Read>(
    conn: &mut R,
) -> Result<Feature, DecodeError> {
    let name = read_pstring(conn)?;
    let desc = read_pstring(conn)?;
    let mut kind = read_pstring(conn)?;
    if kind.is_empty() {
        kind = DEFAULT_FEATURE_TYPE.to_string();
    }
    let start = read_pstring_as_integer(conn)?;
    let end = read_pstring_as_integer(conn)?;

    let flags = read_feature_flags(conn)?;
    let strand = flags.strand();
    let (start, end) = match strand {
        Strand::Forward => (start, end),
        Strand::Reverse => (end, start),
    };

    // Display color as "R,G,B", not used.
    read_pstring(conn)?;

    let location = wire_to_location(start, end, strand)?;

    let mut qualifiers: IndexMap<String, Vec<String>> = IndexMap::new();
    if !name.is_empty() {
        qualifiers.insert("label".to_string(), vec![name]);
    }
    parse_feature_description(&desc, &mut qualifiers);

    Ok(Feature{ kind, location, qualifiers })
}

/// Read a complete .xdna record from `conn`.
///
/// The id and name of the record are the first space-delimited word of the
/// comment, the description is the whole comment.
///
/// ## Errors
///
/// Any failure aborts the whole record, see [DecodeError].
///
pub fn read_record<R: Read>(
    conn: &mut R,
) -> Result<SeqRecord, DecodeError> {
    let header = read_file_header(conn)?;
    if header.version != 0 {
        return Err(DecodeError::UnsupportedVersion(header.version))
    }
    let molecule = MoleculeKind::from_u8(header.seq_type)?;
    let topology = Topology::from_u8(header.topology);
    info!("Read header: type {:?}, topology {:?}, sequence length {}, comment length {}",
           molecule, topology, header.seq_len, header.comment_len);

    let seq = read_bytes(conn, header.seq_len as usize, "sequence")?;
    if !seq.is_ascii() {
        return Err(DecodeError::NonAscii { field: "sequence" })
    }
    let comment = ascii_to_string(read_bytes(conn, header.comment_len as usize, "comment")?, "comment")?;

    let id = comment.split_once(' ').map_or(comment.as_str(), |(first, _)| first).to_string();

    let mut record = SeqRecord{
        seq, molecule, topology,
        name: id.clone(), id,
        description: comment,
        features: Vec::new(),
    };

    if read_annotation_marker(conn)? {
        let right = read_overhang(conn)?;
        let left = read_overhang(conn)?;
        info!("Skipping overhangs: right {:?}, left {:?}", right, left);

        let n_features = read_u8(conn, "feature count")?;
        info!("Reading {} features", n_features);
        record.features.reserve(n_features as usize);
        for _ in 0..n_features {
            record.features.push(read_feature(conn)?);
        }
    }

    Ok(record)
}
