//! Writing the generated program to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Error;

/// Banner placed above the generated program.
const BANNER: &str = "\
//***************************************************************************
// Automatically generated by imc-testgen. Do not edit.                     *
//***************************************************************************
";

/// Write `program` to `out_dir/file_name`, creating the directory if needed.
pub fn write_program(out_dir: &Path, file_name: &str, program: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name);

    let mut content = String::with_capacity(BANNER.len() + 1 + program.len());
    content.push_str(BANNER);
    content.push('\n');
    content.push_str(program);

    fs::write(&path, &content)?;
    info!(path = %path.display(), bytes = content.len(), "wrote test program");
    Ok(path)
}
