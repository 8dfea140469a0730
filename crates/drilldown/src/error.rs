//! Error types for column navigation.

use crate::column::ColumnId;

/// Result type alias for column stack operations.
pub type Result<T> = std::result::Result<T, ColumnStackError>;

/// Errors that can occur while navigating the column stack.
#[derive(Debug, thiserror::Error)]
pub enum ColumnStackError {
    /// The referenced column is not part of the stack.
    ///
    /// The stack is left unchanged when this is returned.
    #[error("{id} is not part of the column stack")]
    ColumnNotFound { id: ColumnId },

    /// The configuration could not be parsed.
    #[error("invalid column stack configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ColumnStackError {
    /// Returns true if this is a [`ColumnNotFound`](Self::ColumnNotFound) error.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. })
    }
}
