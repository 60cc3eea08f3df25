//! Error type for `explore-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("stored user id is invalid: {0}")]
  UserId(#[from] explore_core::user::InvalidUserId),

  #[error("stored timestamp is out of range: {0}")]
  Timestamp(i64),

  #[error("caller went away before the statement ran")]
  Cancelled,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
