//! Document-level metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive fields persisted with every label document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl DocumentMetadata {
    pub fn new(template_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            template_name: template_name.into(),
            author: String::new(),
            description: String::new(),
            created: now,
            last_modified: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self::new("")
    }
}
