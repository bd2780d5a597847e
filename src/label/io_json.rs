//! JSON reading and writing for label documents.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::LabelDocument;
use crate::error::AnnokitError;

/// Reads a label document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_label_json(path: &Path) -> Result<LabelDocument, AnnokitError> {
    read_json(path)
}

/// Writes a label document to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_label_json(path: &Path, doc: &LabelDocument) -> Result<(), AnnokitError> {
    let file = File::create(path).map_err(AnnokitError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, doc).map_err(|source| AnnokitError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads any JSON input file (label documents, masks, run lists, polylines).
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AnnokitError> {
    let file = File::open(path).map_err(AnnokitError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| AnnokitError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a label document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<LabelDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a label document from raw bytes.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation.
pub fn from_json_slice(bytes: &[u8]) -> Result<LabelDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a label document to a JSON string.
pub fn to_json_string(doc: &LabelDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Fuzz-only entrypoint: parse, validate and build a document from raw bytes.
#[cfg(feature = "fuzzing")]
pub fn fuzz_load_document(bytes: &[u8]) -> Result<(), AnnokitError> {
    use crate::geometry::VisibilityScheme;
    use crate::label::{LabelContext, LabelSet};
    use crate::validation::{validate_document, ValidateOptions};

    let doc = from_json_slice(bytes).map_err(|source| AnnokitError::JsonParse {
        path: Path::new("<fuzz>").to_path_buf(),
        source,
    })?;
    let ctx = LabelContext {
        visibility: Some(VisibilityScheme::Ternary),
        bezier_curve: false,
    };
    let _ = validate_document(
        &doc,
        &ValidateOptions {
            strict: false,
            context: ctx,
        },
    );
    LabelSet::from_document(&doc, &ctx)?;
    Ok(())
}
