use serde::{Deserialize, Serialize};

/// Structured postal address embedded in user and doctor documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
}
