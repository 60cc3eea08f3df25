//! Conversions between domain types and the column representations stored
//! in SQLite.
//!
//! User ids are stored as lowercase hyphenated strings and timestamps as
//! integer Unix microseconds.

use chrono::{DateTime, Utc};
use explore_core::{
  UserId,
  decision::{Decision, Liker},
};

use crate::{Error, Result};

pub fn encode_user(id: UserId) -> String { id.to_string() }

pub fn decode_user(s: &str) -> Result<UserId> { Ok(UserId::parse(s)?) }

pub fn encode_ts(dt: DateTime<Utc>) -> i64 { dt.timestamp_micros() }

pub fn decode_ts(micros: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(micros).ok_or(Error::Timestamp(micros))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a listing query: `(actor_id, updated_at)`.
pub struct RawLiker {
  pub actor_id:   String,
  pub updated_at: i64,
}

impl RawLiker {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { actor_id: row.get(0)?, updated_at: row.get(1)? })
  }

  pub fn into_liker(self) -> Result<Liker> {
    Ok(Liker {
      actor_id:   decode_user(&self.actor_id)?,
      updated_at: decode_ts(self.updated_at)?,
    })
  }
}

/// Raw values read from a full `decisions` row.
pub struct RawDecision {
  pub actor_id:     String,
  pub recipient_id: String,
  pub liked:        bool,
  pub updated_at:   i64,
}

impl RawDecision {
  pub fn into_decision(self) -> Result<Decision> {
    Ok(Decision {
      actor_id:     decode_user(&self.actor_id)?,
      recipient_id: decode_user(&self.recipient_id)?,
      liked:        self.liked,
      updated_at:   decode_ts(self.updated_at)?,
    })
  }
}
