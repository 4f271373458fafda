pub mod output;

pub use output::{create_writer, write_json, JsonWriter, OutputFormat, OutputWriter, TextWriter};

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read source from a file, or from stdin when no path is given
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read source from stdin")?;
            Ok(buffer)
        }
    }
}
