//! Whole-collection JSON export.
//!
//! # Invariants
//! - The document shape is `{"designers": [...]}` with camelCase fields.
//! - Export output is pretty-printed with 2-space indentation.
//! - `import_json(export_json(x)) == x`.

use crate::model::designer::Designer;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default file name offered for downloads/exports.
pub const EXPORT_FILE_NAME: &str = "designers.json";

#[derive(Debug)]
pub struct ExportError(serde_json::Error);

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid designers document: {}", self.0)
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self(value)
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    designers: &'a [Designer],
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    designers: Vec<Designer>,
}

pub fn export_json(designers: &[Designer]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&DocumentRef { designers })?)
}

pub fn import_json(text: &str) -> Result<Vec<Designer>, ExportError> {
    let mut document: Document = serde_json::from_str(text)?;
    for designer in &mut document.designers {
        designer.fill_missing_action_keys();
    }
    Ok(document.designers)
}
