use crate::core::io::elements;
use crate::core::io::traits::GeometryFile;
use crate::core::models::molecule::MoleculeRecord;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: XyzParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Atom line must contain an element symbol and three coordinates")]
    MalformedAtomLine,
    #[error("Expected {expected} property values, found {found}")]
    PropertyCount { expected: usize, found: usize },
    #[error("Missing required comment-line key '{key}'")]
    MissingKey { key: &'static str },
    #[error("File ended in the middle of a frame")]
    TruncatedFrame,
}

fn parse_err(line: usize, kind: XyzParseErrorKind) -> XyzError {
    XyzError::Parse { line, kind }
}

struct LineCursor<'a, R: BufRead> {
    lines: std::io::Lines<&'a mut R>,
    line_num: usize,
}

impl<'a, R: BufRead> LineCursor<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }

    fn next(&mut self) -> Result<Option<String>, XyzError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
        }
    }

    fn expect_next(&mut self) -> Result<String, XyzError> {
        self.next()?
            .ok_or_else(|| parse_err(self.line_num + 1, XyzParseErrorKind::TruncatedFrame))
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<(u32, Point3<f64>), XyzError> {
    let mut tokens = line.split_whitespace();
    let symbol = tokens
        .next()
        .ok_or_else(|| parse_err(line_num, XyzParseErrorKind::MalformedAtomLine))?;
    let atomic_number = elements::atomic_number(symbol).ok_or_else(|| {
        parse_err(
            line_num,
            XyzParseErrorKind::UnknownElement {
                symbol: symbol.to_string(),
            },
        )
    })?;

    let mut coords = [0.0f64; 3];
    for (coord, field) in coords.iter_mut().zip(["x", "y", "z"]) {
        let value = tokens
            .next()
            .ok_or_else(|| parse_err(line_num, XyzParseErrorKind::MalformedAtomLine))?;
        *coord = value.parse().map_err(|_| {
            parse_err(
                line_num,
                XyzParseErrorKind::InvalidFloat {
                    field,
                    value: value.to_string(),
                },
            )
        })?;
    }
    // Extra per-atom columns (forces, charges) are permitted and ignored.

    Ok((atomic_number, Point3::new(coords[0], coords[1], coords[2])))
}

/// Reads consecutive XYZ frames, delegating comment-line interpretation to
/// the format-specific `parse_comment`. Blank lines between frames are
/// tolerated; a frame cut short by end-of-file is an error.
pub(crate) fn read_frames<R, F>(
    reader: &mut R,
    property_count: usize,
    parse_comment: F,
) -> Result<Vec<MoleculeRecord>, XyzError>
where
    R: BufRead,
    F: Fn(&str, usize, usize) -> Result<Vec<f64>, XyzError>,
{
    let mut cursor = LineCursor::new(reader);
    let mut records = Vec::new();

    loop {
        let count_line = loop {
            match cursor.next()? {
                None => return Ok(records),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        let count_line_num = cursor.line_num;
        let atom_count: usize = count_line.trim().parse().map_err(|_| {
            parse_err(
                count_line_num,
                XyzParseErrorKind::InvalidAtomCount {
                    value: count_line.trim().to_string(),
                },
            )
        })?;

        let comment = cursor.expect_next()?;
        let labels = parse_comment(&comment, cursor.line_num, property_count)?;

        let mut atomic_numbers = Vec::with_capacity(atom_count);
        let mut positions = Vec::with_capacity(atom_count);
        for _ in 0..atom_count {
            let line = cursor.expect_next()?;
            let (atomic_number, position) = parse_atom_line(&line, cursor.line_num)?;
            atomic_numbers.push(atomic_number);
            positions.push(position);
        }

        let index = records.len();
        records.push(MoleculeRecord::new(atomic_numbers, positions, labels, index));
    }
}

/// The plain multi-frame XYZ format.
///
/// Each frame is an atom-count line, a comment line whose trailing
/// whitespace-separated floats are the molecule's property vector, and one
/// `symbol x y z` line per atom.
pub struct XyzFile;

fn parse_trailing_properties(
    comment: &str,
    line_num: usize,
    property_count: usize,
) -> Result<Vec<f64>, XyzError> {
    let tokens: Vec<&str> = comment.split_whitespace().collect();
    if tokens.len() < property_count {
        return Err(parse_err(
            line_num,
            XyzParseErrorKind::PropertyCount {
                expected: property_count,
                found: tokens.len(),
            },
        ));
    }

    tokens[tokens.len() - property_count..]
        .iter()
        .map(|value| {
            value.parse().map_err(|_| {
                parse_err(
                    line_num,
                    XyzParseErrorKind::InvalidFloat {
                        field: "property",
                        value: value.to_string(),
                    },
                )
            })
        })
        .collect()
}

impl GeometryFile for XyzFile {
    type Error = XyzError;

    fn read_from(
        reader: &mut impl BufRead,
        property_count: usize,
    ) -> Result<Vec<MoleculeRecord>, Self::Error> {
        read_frames(reader, property_count, parse_trailing_properties)
    }
}
