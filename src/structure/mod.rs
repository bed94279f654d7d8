//! Atomic-coordinate input: the [`Atom`] record and the line-oriented
//! `ATOM` record parser.

mod atom;
pub mod parser;

pub use atom::Atom;
pub use parser::{
    parse, parse_bytes, parse_path, AtomReader, ElementColumn, ParseError,
    ParseOptions, ParsePolicy, RecordError, RecordSchema,
};
