//! Error types for `vpmeta-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A mandatory field is missing or a field has a malformed value.
  #[error("invalid field {field:?}: {reason}")]
  Validation { field: &'static str, reason: String },

  #[error("unknown record type: {0:?}")]
  UnknownRecordType(String),
}

impl Error {
  pub(crate) fn missing(field: &'static str) -> Self {
    Self::Validation {
      field,
      reason: "mandatory field is missing".to_string(),
    }
  }

  pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation {
      field,
      reason: reason.into(),
    }
  }

  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
