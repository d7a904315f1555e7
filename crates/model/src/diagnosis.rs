//! Diagnosis reference data.

use serde::{Deserialize, Serialize};

/// A diagnosis from the reference list (for example an ICD-10 code).
///
/// Diagnoses are read-only for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diagnosis {
    /// Unique code, for example "M24.2".
    pub code: String,

    /// Human-readable name.
    pub name: String,

    /// Optional Latin name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

impl Diagnosis {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latin: None,
        }
    }

    pub fn with_latin(mut self, latin: impl Into<String>) -> Self {
        self.latin = Some(latin.into());
        self
    }
}
