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

//! Qualifiers stored in the description field of a feature.
//!
//! The description field may contain several GenBank-like qualifiers
//! separated by carriage returns (`\r`), for example
//! `gene="lacZ"\rproduct="beta-galactosidase"`. Free text lines without
//! quotes are kept as notes.
//!
use indexmap::IndexMap;

/// Separator between the lines of a description field.
pub const LINE_SEPARATOR: char = '\r';

/// Qualifier holding lines that are not `key="value"` pairs.
pub const NOTE_QUALIFIER: &str = "note";

/// Classification of a single description line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescLine<'a> {
    /// `key="value"`, the closing quote may be missing.
    Qualifier(&'a str, &'a str),
    /// Free text without any quotes.
    Note(&'a str),
    /// Contains quotes but is not a well-formed qualifier.
    Skip,
}

pub fn classify_line(
    line: &str,
) -> DescLine<'_> {
    if let Some((key, rest)) = line.split_once('=') {
        if let (false, Some(value)) = (key.is_empty(), rest.strip_prefix('"')) {
            let value = value.strip_suffix('"').unwrap_or(value);
            if !value.is_empty() && !value.contains('"') {
                return DescLine::Qualifier(key, value)
            }
        }
    }

    if line.contains('"') {
        DescLine::Skip
    } else {
        DescLine::Note(line)
    }
}

/// Parse the description field of a feature into `qualifiers`.
///
/// Values are appended to any values already stored under the same key, in
/// the order the lines appear. Empty lines are ignored.
///
/// ## Usage
///
/// ```rust
/// use xdna::decoder::qualifiers::parse_feature_description;
/// use indexmap::IndexMap;
///
/// let mut qualifiers: IndexMap<String, Vec<String>> = IndexMap::new();
/// parse_feature_description("label=\"foo\"\rnote text", &mut qualifiers);
///
/// assert_eq!(qualifiers["label"], vec!["foo".to_string()]);
/// assert_eq!(qualifiers["note"], vec!["note text".to_string()]);
/// ```
///
pub fn parse_feature_description(
    desc: &str,
    qualifiers: &mut IndexMap<String, Vec<String>>,
) {
    desc.split(LINE_SEPARATOR).filter(|line| !line.is_empty()).for_each(|line| {
        match classify_line(line) {
            DescLine::Qualifier(key, value) => {
                qualifiers.entry(key.to_string()).or_default().push(value.to_string());
            },
            DescLine::Note(text) => {
                qualifiers.entry(NOTE_QUALIFIER.to_string()).or_default().push(text.to_string());
            },
            DescLine::Skip => (),
        }
    });
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn classify_line_qualifier() {
        use super::DescLine;
        use super::classify_line;

        assert_eq!(classify_line("gene=\"lacZ\""), DescLine::Qualifier("gene", "lacZ"));
        assert_eq!(classify_line("gene=\"lacZ"), DescLine::Qualifier("gene", "lacZ"));
        assert_eq!(classify_line("db xref=\"a=b\""), DescLine::Qualifier("db xref", "a=b"));
    }

    #[test]
    fn classify_line_note() {
        use super::DescLine;
        use super::classify_line;

        assert_eq!(classify_line("some free text"), DescLine::Note("some free text"));
        assert_eq!(classify_line("gene=lacZ"), DescLine::Note("gene=lacZ"));
    }

    #[test]
    fn classify_line_skip() {
        use super::DescLine;
        use super::classify_line;

        assert_eq!(classify_line("gene=\"\""), DescLine::Skip);
        assert_eq!(classify_line("=\"lacZ\""), DescLine::Skip);
        assert_eq!(classify_line("gene=\"la\"cZ\""), DescLine::Skip);
        assert_eq!(classify_line("a \"quoted\" note"), DescLine::Skip);
    }

    #[test]
    fn parse_feature_description_mixed() {
        use indexmap::IndexMap;
        use super::parse_feature_description;

        let mut got: IndexMap<String, Vec<String>> = IndexMap::new();
        parse_feature_description("label=\"foo\"\rnote text", &mut got);

        let mut expected: IndexMap<String, Vec<String>> = IndexMap::new();
        expected.insert("label".to_string(), vec!["foo".to_string()]);
        expected.insert("note".to_string(), vec!["note text".to_string()]);

        assert_eq!(got, expected);
    }

    #[test]
    fn parse_feature_description_appends_repeated_keys() {
        use indexmap::IndexMap;
        use super::parse_feature_description;

        let mut got: IndexMap<String, Vec<String>> = IndexMap::new();
        got.insert("label".to_string(), vec!["lacZ".to_string()]);
        parse_feature_description("\r\rnote=\"first\"\rbad \"line\rsecond\rlabel=\"alt\"", &mut got);

        let mut expected: IndexMap<String, Vec<String>> = IndexMap::new();
        expected.insert("label".to_string(), vec!["lacZ".to_string(), "alt".to_string()]);
        expected.insert("note".to_string(), vec!["first".to_string(), "second".to_string()]);

        assert_eq!(got, expected);
    }
}
