//! Opaque pagination cursors.
//!
//! A cursor is the decimal form of an integer timestamp wrapped in standard
//! base64. It is a convenience for resuming a listing, not a security
//! boundary: nothing stops a client from forging one.
//!
//! The empty token decodes to [`NO_CURSOR`], meaning "start from the most
//! recent row".

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use thiserror::Error;

/// Decoded value of an absent cursor.
pub const NO_CURSOR: i64 = 0;

#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("cursor is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("cursor is not valid utf-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),

  #[error("cursor is not an integer: {0}")]
  Integer(#[from] std::num::ParseIntError),
}

/// Encode `timestamp` as an opaque, printable-ASCII token.
pub fn encode(timestamp: i64) -> String { B64.encode(timestamp.to_string()) }

/// Inverse of [`encode`]. An empty token yields [`NO_CURSOR`].
pub fn decode(token: &str) -> Result<i64, DecodeError> {
  if token.is_empty() {
    return Ok(NO_CURSOR);
  }
  let bytes = B64.decode(token)?;
  let text = String::from_utf8(bytes)?;
  Ok(text.parse()?)
}
