//! Document loading and answer output.
//!
//! The corpus is a UTF-8 text file with one document per line. Blank lines
//! are skipped; surviving lines are trimmed and numbered in file order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RagError, Result};

/// A single corpus document: one non-empty line of the source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Ordinal position among the non-empty lines of the source file (0-based).
    pub id: u64,
    /// The trimmed text content of the line.
    pub text: String,
}

/// Load documents from a line-delimited UTF-8 file.
///
/// Lines are trimmed and empty lines dropped; ids are assigned by position
/// among the lines that survive. An empty file yields an empty vec.
///
/// # Errors
///
/// Returns [`RagError::Document`] if the file does not exist or cannot be read.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| RagError::Document {
        path: path.display().to_string(),
        source,
    })?;

    let documents: Vec<Document> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(id, line)| Document { id: id as u64, text: line.to_string() })
        .collect();

    debug!(path = %path.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Write the question and generated answer to a UTF-8 text file.
///
/// The file is overwritten on every run.
///
/// # Errors
///
/// Returns [`RagError::Document`] if the file cannot be written.
pub fn write_answer(path: impl AsRef<Path>, question: &str, answer: &str) -> Result<()> {
    let path = path.as_ref();
    let contents = format!("Question: {question}\n\nAnswer:\n{answer}\n");
    fs::write(path, contents).map_err(|source| RagError::Document {
        path: path.display().to_string(),
        source,
    })?;

    debug!(path = %path.display(), "wrote answer file");
    Ok(())
}
