use crate::core::io::traits::GeometryFile;
use crate::core::io::xyz::{XyzError, XyzParseErrorKind, read_frames};
use crate::core::models::molecule::MoleculeRecord;
use std::io::BufRead;

/// The extended XYZ format.
///
/// Frames look like plain XYZ, but the comment line carries `key=value`
/// metadata. The molecule's property vector is the whitespace-separated float
/// list inside `props="..."`; per-atom extra columns are ignored.
pub struct ExtXyzFile;

/// Scans the comment line as whitespace-separated `key=value` entries, where a
/// value may be double-quoted to contain spaces, and returns the value bound to
/// `key` exactly. A prefixed or suffixed key (`atomprops=...`) never matches.
fn lookup_entry<'c>(comment: &'c str, key: &str) -> Option<&'c str> {
    let mut rest = comment.trim_start();
    while !rest.is_empty() {
        match rest.find(|c: char| c == '=' || c.is_whitespace()) {
            Some(pos) if rest[pos..].starts_with('=') => {
                let entry_key = &rest[..pos];
                let after = &rest[pos + 1..];
                let (value, tail) = if let Some(quoted) = after.strip_prefix('"') {
                    let end = quoted.find('"')?;
                    (&quoted[..end], quoted[end + 1..].trim_start())
                } else {
                    match after.find(char::is_whitespace) {
                        Some(end) => (&after[..end], after[end..].trim_start()),
                        None => (after, ""),
                    }
                };
                if entry_key == key {
                    return Some(value);
                }
                rest = tail;
            }
            // Bare token without a value.
            Some(pos) => rest = rest[pos..].trim_start(),
            None => return None,
        }
    }
    None
}

fn parse_props_entry(
    comment: &str,
    line_num: usize,
    property_count: usize,
) -> Result<Vec<f64>, XyzError> {
    let Some(raw) = lookup_entry(comment, "props") else {
        if property_count == 0 {
            return Ok(Vec::new());
        }
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::MissingKey { key: "props" },
        });
    };

    let values: Vec<f64> = raw
        .split_whitespace()
        .map(|value| {
            value.parse().map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::InvalidFloat {
                    field: "props",
                    value: value.to_string(),
                },
            })
        })
        .collect::<Result<_, _>>()?;

    if values.len() != property_count {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::PropertyCount {
                expected: property_count,
                found: values.len(),
            },
        });
    }
    Ok(values)
}

impl GeometryFile for ExtXyzFile {
    type Error = XyzError;

    fn read_from(
        reader: &mut impl BufRead,
        property_count: usize,
    ) -> Result<Vec<MoleculeRecord>, Self::Error> {
        read_frames(reader, property_count, parse_props_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn read(content: &str, property_count: usize) -> Result<Vec<MoleculeRecord>, XyzError> {
        let mut reader = BufReader::new(content.as_bytes());
        ExtXyzFile::read_from(&mut reader, property_count)
    }

    #[test]
    fn props_entry_becomes_the_label_vector() {
        let content = "\
2
Lattice=\"10 0 0\" props=\"-1.5 0.25 3.0\" pbc=\"F F F\"
C 0.0 0.0 0.0 0.1 0.2
H 1.09 0.0 0.0 0.0 0.0
";
        let records = read(content, 3).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].labels, vec![-1.5, 0.25, 3.0]);
        assert_eq!(records[0].atomic_numbers, vec![6, 1]);
    }

    #[test]
    fn missing_props_key_is_an_error() {
        let content = "1\nLattice=\"10 0 0\"\nH 0.0 0.0 0.0\n";
        let result = read(content, 2);
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::MissingKey { key: "props" },
            })
        ));
    }

    #[test]
    fn props_count_must_match_configuration() {
        let content = "1\nprops=\"1.0 2.0\"\nH 0.0 0.0 0.0\n";
        let result = read(content, 3);
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                kind: XyzParseErrorKind::PropertyCount {
                    expected: 3,
                    found: 2
                },
                ..
            })
        ));
    }

    #[test]
    fn similarly_named_keys_are_not_the_property_vector() {
        let content = "1\natomprops=\"9 9\" props=\"4.5\"\nH 0.0 0.0 0.0\n";
        let records = read(content, 1).unwrap();
        assert_eq!(records[0].labels, vec![4.5]);
    }

    #[test]
    fn prefixed_key_alone_does_not_satisfy_the_lookup() {
        let content = "1\natomprops=\"9 9\"\nH 0.0 0.0 0.0\n";
        let result = read(content, 1);
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::MissingKey { key: "props" },
            })
        ));
    }

    #[test]
    fn zero_property_count_tolerates_absent_key() {
        let content = "1\nLattice=\"10 0 0\"\nH 0.0 0.0 0.0\n";
        let records = read(content, 0).unwrap();
        assert!(records[0].labels.is_empty());
    }
}
