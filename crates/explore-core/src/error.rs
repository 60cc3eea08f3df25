//! Error types for `explore-core`.

use thiserror::Error;

/// An error returned by an [`ExploreService`](crate::ExploreService)
/// operation.
///
/// There are exactly two classes: a request that failed validation (never
/// worth resending unmodified) and an opaque failure somewhere below the
/// validator, which carries its cause for diagnostics.
#[derive(Debug, Error)]
pub enum Error {
  #[error("request validation errors: [{}]", .0.join(", "))]
  InvalidRequest(Vec<String>),

  #[error("{operation} error: {source}")]
  Unknown {
    operation: &'static str,
    #[source]
    source:    Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  pub fn unknown(
    operation: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Unknown { operation, source: Box::new(source) }
  }

  pub fn is_invalid_request(&self) -> bool {
    matches!(self, Self::InvalidRequest(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
