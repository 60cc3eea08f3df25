//! Decision types: the one persisted entity and the rows read back from it.
//!
//! A decision is a one-directional like or pass from an actor toward a
//! recipient. There is at most one decision per ordered pair; a repeated
//! decision overwrites `liked` and refreshes `updated_at`. Nothing is ever
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A recorded like/pass from `actor_id` toward `recipient_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
  pub actor_id:     UserId,
  pub recipient_id: UserId,
  /// `true` = like, `false` = pass.
  pub liked:        bool,
  /// Server-assigned on every write to this pair.
  pub updated_at:   DateTime<Utc>,
}

/// One row of a "liked you" listing: who liked the recipient, and when that
/// like was last written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liker {
  pub actor_id:   UserId,
  pub updated_at: DateTime<Utc>,
}

impl Liker {
  /// The value carried by a pagination cursor pointing at this row.
  pub fn cursor_value(&self) -> i64 { self.updated_at.timestamp_micros() }
}
