use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A required argument was empty.
    #[error("{0}")]
    Validation(String),

    /// No row for the id in the requested language or the fallback.
    #[error("message '{id}' not found for language '{lang}'")]
    NotFound { id: String, lang: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),
}

impl DbError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
