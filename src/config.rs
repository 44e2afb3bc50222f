//! Defaults and run configuration for an attribution run.
//!
//! The constants are compile-time defaults; the CLI overrides them through
//! flags or a JSON file deserialized into [`AnalysisConfig`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AuthorshipError, Result};

/// Number of template terms used when none is requested.
///
/// Large enough to cover the discriminative vocabulary of a few hundred
/// speech-length documents.
pub const DEFAULT_TEMPLATE_SIZE: usize = 2000;

/// Number of ranked matches reported per unknown document.
pub const DEFAULT_TOP_MATCHES: usize = 4;

/// Added to the cosine denominator so zero vectors never divide by zero.
pub const SIMILARITY_EPSILON: f64 = 1e-6;

/// File extension of corpus documents.
pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Requested template length (k)
    pub template_size: usize,
    /// Matches returned per query (j)
    pub top_matches: usize,
    /// Extension of the corpus files, without the dot
    pub extension: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            template_size: DEFAULT_TEMPLATE_SIZE,
            top_matches: DEFAULT_TOP_MATCHES,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AuthorshipError::io(path, e))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// A template size of 0 is allowed (it yields an empty template);
    /// asking for zero matches or an empty extension is not.
    pub fn validate(&self) -> Result<()> {
        if self.top_matches == 0 {
            return Err(AuthorshipError::InvalidConfig(
                "top_matches must be at least 1".to_string(),
            ));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(AuthorshipError::InvalidConfig(
                "extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
