use std::path::PathBuf;

/// Errors raised by the attribution pipeline.
///
/// Degenerate inputs (an empty template, a term missing from a document,
/// an all-zero vector) are not errors; they produce zero weights or
/// zero scores instead.
#[derive(Debug, thiserror::Error)]
pub enum AuthorshipError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus has no documents to compare against")]
    EmptyCorpus,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthorshipError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthorshipError>;
