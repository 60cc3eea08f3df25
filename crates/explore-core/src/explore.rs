//! Request and response shapes of the four explore operations.
//!
//! Requests carry raw, unvalidated input exactly as a client sent it; see
//! [`crate::validate`] for the typed forms they are turned into.

use serde::{Deserialize, Serialize};

use crate::{decision::Liker, user::UserId};

// ─── Listings ─────────────────────────────────────────────────────────────────

/// Input to `ListLikedYou` and `ListNewLikedYou`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLikedYouRequest {
  #[serde(default)]
  pub recipient_id:     String,
  /// `None` or `0` selects the default page size.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub page_size:        Option<PageSize>,
  /// Token from a previous response; absent or empty starts from the newest.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pagination_token: Option<String>,
}

/// A requested page size as the client sent it.
///
/// Query strings carry every value as text, so a non-numeric size arrives as
/// [`PageSize::Text`] and is reported by validation along with any other
/// violation in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSize {
  Value(u32),
  Text(String),
}

impl From<u32> for PageSize {
  fn from(n: u32) -> Self { PageSize::Value(n) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikerEntry {
  pub actor_id:       UserId,
  /// Seconds since the Unix epoch.
  pub unix_timestamp: u64,
}

impl From<Liker> for LikerEntry {
  fn from(l: Liker) -> Self {
    Self {
      actor_id:       l.actor_id,
      unix_timestamp: u64::try_from(l.updated_at.timestamp()).unwrap_or(0),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLikedYouResponse {
  pub likers:                Vec<LikerEntry>,
  /// Empty when there are no more pages.
  pub next_pagination_token: String,
}

// ─── Count ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountLikedYouRequest {
  #[serde(default)]
  pub recipient_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountLikedYouResponse {
  pub count: u64,
}

// ─── Decisions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutDecisionRequest {
  #[serde(default)]
  pub actor_user_id:     String,
  #[serde(default)]
  pub recipient_user_id: String,
  #[serde(default)]
  pub liked_recipient:   bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutDecisionResponse {
  pub mutual_likes: bool,
}
