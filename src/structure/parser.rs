//! Whitespace-tokenized `ATOM` record parser.
//!
//! Lines end at `\r\n`, `\n` or a lone `\r`. Only lines whose first four
//! characters are `ATOM` are records; every other line is skipped without
//! inspection. A record is split on runs of
//! whitespace and read through a [`RecordSchema`], which names the token
//! index of each field. The default schema mirrors the common layout where
//! x/y/z are tokens 6/7/8 and the element symbol is the last token.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::Atom;

const RECORD_TAG: &str = "ATOM";

/// Where the element symbol lives in a record's token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementColumn {
    /// The final token on the line.
    Last,
    /// A fixed zero-based token index.
    Index(usize),
}

/// Named field → token index mapping for one record line.
///
/// This is a positional format, not a real column schema. With
/// [`ElementColumn::Last`], any trailing column after the element (a formal
/// charge, for instance) is read as the element, and coordinates are only
/// correct when every column before them is a single whitespace-free token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Token index of the x coordinate.
    pub x: usize,
    /// Token index of the y coordinate.
    pub y: usize,
    /// Token index of the z coordinate.
    pub z: usize,
    /// Location of the element symbol.
    pub element: ElementColumn,
    /// Minimum number of tokens a record must have.
    pub min_tokens: usize,
}

impl RecordSchema {
    /// `ATOM serial name resName chain resSeq x y z ... element`.
    pub const WHITESPACE_PDB: Self = Self {
        x: 6,
        y: 7,
        z: 8,
        element: ElementColumn::Last,
        min_tokens: 9,
    };

    /// Token count below which a record is rejected. Never less than what
    /// the indexed fields themselves need.
    #[must_use]
    pub fn required_tokens(&self) -> usize {
        let element = match self.element {
            ElementColumn::Last => 0,
            ElementColumn::Index(i) => i + 1,
        };
        self.min_tokens
            .max(self.x + 1)
            .max(self.y + 1)
            .max(self.z + 1)
            .max(element)
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::WHITESPACE_PDB
    }
}

/// What to do with a coordinate token that is not a finite number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Read the coordinate as `0.0` and keep going.
    #[default]
    Lenient,
    /// Fail the parse with [`RecordError::InvalidCoordinate`].
    Strict,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Record field layout.
    pub schema: RecordSchema,
    /// Non-numeric coordinate handling.
    pub policy: ParsePolicy,
}

/// Why a record line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line has fewer tokens than the schema requires.
    TooFewTokens {
        /// Tokens present on the line.
        found: usize,
        /// Tokens the schema requires.
        required: usize,
    },
    /// A coordinate token is not a finite number (strict policy only).
    InvalidCoordinate {
        /// `'x'`, `'y'` or `'z'`.
        axis: char,
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTokens { found, required } => {
                write!(f, "{found} tokens, at least {required} required")
            }
            Self::InvalidCoordinate { axis, token } => {
                write!(f, "{axis} coordinate {token:?} is not a finite number")
            }
        }
    }
}

/// Errors produced while reading coordinate records.
#[derive(Debug)]
pub enum ParseError {
    /// The input could not be read (missing file, bad UTF-8, ...).
    Io(io::Error),
    /// A record line did not fit the schema.
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: RecordError,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read structure: {e}"),
            Self::MalformedRecord { line, reason } => {
                write!(f, "malformed ATOM record on line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MalformedRecord { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parse every `ATOM` record in `text`, in file order.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRecord`] for the first record that does
/// not fit the schema (or, under [`ParsePolicy::Strict`], has a
/// non-numeric coordinate).
pub fn parse(
    text: &str,
    options: &ParseOptions,
) -> Result<Vec<Atom>, ParseError> {
    split_lines(text)
        .enumerate()
        .filter_map(|(i, line)| parse_line(line, i + 1, options))
        .collect()
}

/// Parse a raw byte buffer handed over by a document shell.
///
/// # Errors
///
/// Returns [`ParseError::Io`] with [`io::ErrorKind::InvalidData`] if the
/// buffer is not UTF-8, otherwise as [`parse`].
pub fn parse_bytes(
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Vec<Atom>, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    parse(text, options)
}

/// Read and parse a coordinate file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read (logged
/// once, not retried), otherwise as [`parse`].
pub fn parse_path(
    path: &Path,
    options: &ParseOptions,
) -> Result<Vec<Atom>, ParseError> {
    let result: Result<Vec<Atom>, ParseError> =
        AtomReader::open(path, *options).and_then(|reader| reader.collect());
    if let Err(ParseError::Io(ref e)) = result {
        log::error!("reading {} failed: {e}", path.display());
    }
    result
}

/// Streaming record parser over any buffered reader.
///
/// Yields one item per `ATOM` record. The iterator is fused after the first
/// error.
pub struct AtomReader<R> {
    reader: R,
    pending: VecDeque<String>,
    chunk: Vec<u8>,
    line_number: usize,
    options: ParseOptions,
    done: bool,
}

impl AtomReader<BufReader<File>> {
    /// Open `path` for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if the file cannot be opened.
    pub fn open(
        path: &Path,
        options: ParseOptions,
    ) -> Result<Self, ParseError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), options))
    }
}

impl<R: BufRead> AtomReader<R> {
    /// Wrap a reader.
    pub fn new(reader: R, options: ParseOptions) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            chunk: Vec::new(),
            line_number: 0,
            options,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for AtomReader<R> {
    type Item = Result<Atom, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.pending.pop_front() {
                Some(line) => line,
                None => match self.fill() {
                    Ok(true) => continue,
                    Ok(false) => return None,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(ParseError::Io(e)));
                    }
                },
            };
            self.line_number += 1;
            let item = parse_line(&line, self.line_number, &self.options);
            if let Some(item) = item {
                self.done = item.is_err();
                return Some(item);
            }
        }
        None
    }
}

impl<R: BufRead> AtomReader<R> {
    /// Read up to the next `\n` and queue the lines it holds. A chunk may
    /// hold several lines when they end in a lone `\r`. `Ok(false)` at end
    /// of input.
    fn fill(&mut self) -> io::Result<bool> {
        self.chunk.clear();
        if self.reader.read_until(b'\n', &mut self.chunk)? == 0 {
            return Ok(false);
        }
        let text = std::str::from_utf8(&self.chunk)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pending.extend(split_lines(text).map(str::to_owned));
        Ok(true)
    }
}

/// Split on `\r\n`, `\n` and a lone `\r`. A trailing terminator does not
/// start an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.get(1..))
            .unwrap_or("");
        Some(line)
    })
}

/// `None` for non-record lines.
fn parse_line(
    line: &str,
    line_number: usize,
    options: &ParseOptions,
) -> Option<Result<Atom, ParseError>> {
    if !line.starts_with(RECORD_TAG) {
        return None;
    }
    Some(parse_record(line, options).map_err(|reason| {
        ParseError::MalformedRecord {
            line: line_number,
            reason,
        }
    }))
}

fn parse_record(
    line: &str,
    options: &ParseOptions,
) -> Result<Atom, RecordError> {
    let schema = &options.schema;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let required = schema.required_tokens();
    if tokens.len() < required {
        return Err(RecordError::TooFewTokens {
            found: tokens.len(),
            required,
        });
    }

    let element = match schema.element {
        ElementColumn::Last => tokens[tokens.len() - 1],
        ElementColumn::Index(i) => tokens[i],
    };
    let position = Vec3::new(
        coordinate(tokens[schema.x], 'x', options.policy)?,
        coordinate(tokens[schema.y], 'y', options.policy)?,
        coordinate(tokens[schema.z], 'z', options.policy)?,
    );
    Ok(Atom::new(element, position))
}

fn coordinate(
    token: &str,
    axis: char,
    policy: ParsePolicy,
) -> Result<f32, RecordError> {
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => match policy {
            ParsePolicy::Lenient => {
                log::debug!("{axis} coordinate {token:?} read as 0.0");
                Ok(0.0)
            }
            ParsePolicy::Strict => Err(RecordError::InvalidCoordinate {
                axis,
                token: token.to_owned(),
            }),
        },
    }
}
