//! Export module for Tango
//!
//! Encodes captured images as PNG and writes them to disk.

mod png;

pub use png::PngExporter;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image has no pixels")]
    EmptyImage,
}

pub type ExportResult<T> = Result<T, ExportError>;
