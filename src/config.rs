//! Configuration for test program generation.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::schema::SchemaIndex;

/// Configuration for test program generation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Output directory for the generated program.
    pub(crate) out_dir: Option<PathBuf>,

    /// File name of the generated program.
    pub(crate) file_name: String,

    /// Test cases generated per message type.
    pub(crate) repeat: usize,

    /// Seed for reproducible output. Unseeded runs use the thread RNG.
    pub(crate) seed: Option<u64>,

    /// Deepest nesting of message-valued fields before generation fails.
    pub(crate) max_depth: usize,

    /// Title of the emitted test suite.
    pub(crate) title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: None,
            file_name: "test_IMC.cpp".to_string(),
            repeat: 3,
            seed: None,
            max_depth: 32,
            title: "IMC Serialization/Deserialization".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory. Defaults to `OUT_DIR`.
    pub fn out_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the name of the generated file.
    pub fn file_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.file_name = name.into();
        self
    }

    /// Number of test cases per message type.
    pub fn repeat(&mut self, count: usize) -> &mut Self {
        self.repeat = count;
        self
    }

    /// Seed the random source so that output is reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Maximum nesting depth of message-valued fields.
    ///
    /// Schemas whose message references form a cycle would otherwise recurse
    /// without bound.
    pub fn max_depth(&mut self, depth: usize) -> &mut Self {
        self.max_depth = depth;
        self
    }

    /// Title passed to the emitted `Test` object.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Generate the test program source without writing it.
    pub fn generate(&self, schema: &dyn SchemaIndex) -> Result<String, crate::Error> {
        match self.seed {
            Some(seed) => self.generate_with_rng(schema, &mut StdRng::seed_from_u64(seed)),
            None => self.generate_with_rng(schema, &mut rand::rng()),
        }
    }

    /// Generate the test program source drawing from `rng`.
    pub fn generate_with_rng(
        &self,
        schema: &dyn SchemaIndex,
        rng: &mut dyn RngCore,
    ) -> Result<String, crate::Error> {
        crate::codegen::generate_program(self, schema, rng)
    }

    /// Generate the test program and write it to the output directory.
    ///
    /// Returns the path of the written file. Nothing is written if
    /// generation fails.
    pub fn compile(&self, schema: &dyn SchemaIndex) -> Result<PathBuf, crate::Error> {
        match self.seed {
            Some(seed) => crate::codegen::compile(self, schema, &mut StdRng::seed_from_u64(seed)),
            None => crate::codegen::compile(self, schema, &mut rand::rng()),
        }
    }
}
