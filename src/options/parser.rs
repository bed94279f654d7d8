use serde::{Deserialize, Serialize};

use crate::structure::{ParseOptions, ParsePolicy, RecordSchema};

/// Structure-file parsing options. The record layout itself is fixed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserOptions {
    /// How malformed coordinate tokens are treated.
    pub policy: ParsePolicy,
}

impl ParserOptions {
    /// Options handed to the parser.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            schema: RecordSchema::WHITESPACE_PDB,
            policy: self.policy,
        }
    }
}
