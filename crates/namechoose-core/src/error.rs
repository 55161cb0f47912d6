use thiserror::Error;

use crate::table::Category;

/// Error type shared across namechoose crates.
#[derive(Debug, Error)]
pub enum NameError {
    /// The identifier matches no registered nationality.
    #[error("unknown nationality: {0}")]
    UnknownNationality(String),
    /// Backing data is missing or malformed.
    #[error("data error in {origin}: {message}")]
    Data { origin: String, message: String },
    /// A rule references a category the nationality does not declare.
    #[error("category '{category}' is not declared for {nationality}")]
    CategoryNotFound {
        nationality: String,
        category: Category,
    },
    /// The rule and table disagree so a required slot has nothing to pick.
    #[error("composition failed: {0}")]
    Composition(String),
    /// Caller input rejected before any generation happens.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl NameError {
    pub fn data(origin: impl Into<String>, message: impl Into<String>) -> Self {
        NameError::Data {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for results returned by namechoose crates.
pub type Result<T> = std::result::Result<T, NameError>;
