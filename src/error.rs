//! Error types for imc-testgen.

use std::io;

use thiserror::Error;

/// Errors that can occur while generating a test program.
///
/// Every variant is fatal: generation stops and nothing is written.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while writing the output file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Missing OUT_DIR environment variable.
    #[error("OUT_DIR not set. Run from build.rs or set out_dir().")]
    MissingOutDir,
    /// Unknown field type tag.
    #[error("Invalid field type: {tag}")]
    InvalidFieldType { tag: String },
    /// Numeric type tag without a usable bit width.
    #[error("Invalid numeric width in type tag `{tag}` (expected 8, 16, 32 or 64)")]
    InvalidWidth { tag: String },
    /// A field references a message type that is not in the schema.
    #[error("Unknown message type `{abbrev}`")]
    UnknownMessage { abbrev: String },
    /// A message group without members was selected.
    #[error("Message group `{abbrev}` has no members")]
    EmptyGroup { abbrev: String },
    /// An untyped message field was resolved against an empty schema.
    #[error("Schema declares no message types")]
    EmptySchema,
    /// The schema header lacks one of the standard fields.
    #[error("Header field `{abbrev}` not found in schema")]
    MissingHeaderField { abbrev: String },
    /// Nested message construction went deeper than the configured limit.
    #[error("Recursion limit reached while building `{abbrev}` at depth {depth}")]
    RecursionLimit { abbrev: String, depth: usize },
    /// A closing brace without a matching opening brace.
    #[error("Unbalanced closing brace at line {line}")]
    UnbalancedBraces { line: usize },
}
