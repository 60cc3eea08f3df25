//! [`UserId`]: the validated identifier of a user taking part in a decision.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the hyphenated textual form, e.g.
/// `2b13bf3c-b7e3-11f0-add8-627f4e32ceb4`.
pub const USER_ID_LEN: usize = 36;

/// A user identifier, parsed once at the request boundary.
///
/// Only the 36-character hyphenated form is accepted. It is rendered (and
/// stored) as lowercase hyphenated text.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

/// The input was not a hyphenated UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid user id: {0:?}")]
pub struct InvalidUserId(pub String);

impl UserId {
  pub fn parse(s: &str) -> Result<Self, InvalidUserId> {
    let shaped = s.len() == USER_ID_LEN
      && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    if !shaped {
      return Err(InvalidUserId(s.to_owned()));
    }
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| InvalidUserId(s.to_owned()))
  }

  pub fn new_v4() -> Self { Self(Uuid::new_v4()) }
}

impl From<Uuid> for UserId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for UserId {
  type Err = InvalidUserId;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for UserId {
  type Error = InvalidUserId;

  fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse(&s) }
}

impl From<UserId> for String {
  fn from(id: UserId) -> Self { id.to_string() }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_hyphenated_form() {
    let id = UserId::parse("2b13bf3c-b7e3-11f0-add8-627f4e32ceb4").unwrap();
    assert_eq!(id.to_string(), "2b13bf3c-b7e3-11f0-add8-627f4e32ceb4");
  }

  #[test]
  fn uppercase_is_normalised() {
    let id = UserId::parse("2B13BF3C-B7E3-11F0-ADD8-627F4E32CEB4").unwrap();
    assert_eq!(id.to_string(), "2b13bf3c-b7e3-11f0-add8-627f4e32ceb4");
  }

  #[test]
  fn rejects_other_shapes() {
    for bad in [
      "",
      "not-a-uuid",
      "2b13bf3cb7e311f0add8627f4e32ceb4",
      "{2b13bf3c-b7e3-11f0-add8-627f4e32ceb4}",
      "2b13bf3c-b7e3-11f0-add8-627f4e32ceb",
      "zb13bf3c-b7e3-11f0-add8-627f4e32ceb4",
      "------------------------------------",
    ] {
      assert!(UserId::parse(bad).is_err(), "{bad:?} should be rejected");
    }
  }
}
