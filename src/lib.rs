//! `imc-testgen` generates the IMC serialization test program from a
//! message schema.
//!
//! For every message type the generated C++ program builds a few instances
//! filled with random values, serializes and deserializes each of them, and
//! checks that the result compares equal to the original. Instances too
//! large to serialize must instead report a size above the IMC maximum.
//!
//! # Example
//!
//! ```rust,no_run
//! // In build.rs
//! use imc_testgen::schema::{Field, MessageType, Schema};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut schema = Schema::new();
//!     schema.add_message(
//!         MessageType::new("EntityState")
//!             .field(Field::parse("state", "uint8_t", None)?)
//!             .field(Field::parse("description", "plaintext", None)?),
//!     );
//!     imc_testgen::generate_tests(&schema, "src/generated")?;
//!     Ok(())
//! }
//! ```
//!
//! # Message Fields and Groups
//!
//! `message` and `message-list` fields name either a message type or a
//! message group. Groups resolve to one of their members at random each
//! time a value is built, and untyped message fields accept any message
//! type of the schema. Message lists hold zero or one element.
//!
//! Nothing checks that message references are acyclic. Nesting deeper than
//! [`Config::max_depth`] aborts generation with [`Error::RecursionLimit`].
//!
//! # Reproducible Output
//!
//! ```rust,no_run
//! # use imc_testgen::schema::Schema;
//! fn main() -> Result<(), imc_testgen::Error> {
//!     let schema = Schema::new();
//!     imc_testgen::Config::new()
//!         .out_dir("target/imc")
//!         .seed(0x1DC)
//!         .repeat(5)
//!         .compile(&schema)?;
//!     Ok(())
//! }
//! ```

mod beautify;
mod codegen;
mod config;
mod error;
pub mod schema;

pub use beautify::beautify;
pub use codegen::{
    int_bounds, synthesize, uint_bounds, Emitter, MessageBuilder, Session, Value, HEADER_SETTERS,
};
pub use config::Config;
pub use error::Error;

use std::path::{Path, PathBuf};

use schema::SchemaIndex;

/// Generate the test program with default settings into `out_dir`.
///
/// Returns the path of the written file.
pub fn generate_tests(
    schema: &dyn SchemaIndex,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf, Error> {
    Config::new().out_dir(out_dir).compile(schema)
}
