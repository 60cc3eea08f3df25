//! Request validation.
//!
//! Every rule is checked and all violations are reported together in one
//! [`Error::InvalidRequest`]. A request that passes is returned in typed form,
//! so nothing below this module re-checks identifiers or cursors.

use crate::{
  Error, Result,
  explore::{
    CountLikedYouRequest, ListLikedYouRequest, PageSize, PutDecisionRequest,
  },
  pagination,
  user::UserId,
};

/// Page size used when a request leaves it unset or zero.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
  pub recipient: UserId,
  pub page_size: usize,
  /// Decoded cursor; [`pagination::NO_CURSOR`] when absent.
  pub cursor:    i64,
}

/// A validated decision write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionInput {
  pub actor:     UserId,
  pub recipient: UserId,
  pub liked:     bool,
}

pub fn list_liked_you(req: &ListLikedYouRequest) -> Result<ListQuery> {
  let mut v = Violations::default();
  let recipient = v.user_id("recipient_id", &req.recipient_id);
  let page_size = v.page_size(req.page_size.as_ref());
  let cursor = v.cursor(req.pagination_token.as_deref());

  match (recipient, cursor) {
    (Some(recipient), Some(cursor)) if v.is_empty() => {
      Ok(ListQuery { recipient, page_size, cursor })
    }
    _ => Err(v.into_error()),
  }
}

pub fn count_liked_you(req: &CountLikedYouRequest) -> Result<UserId> {
  let mut v = Violations::default();
  match v.user_id("recipient_id", &req.recipient_id) {
    Some(recipient) if v.is_empty() => Ok(recipient),
    _ => Err(v.into_error()),
  }
}

pub fn put_decision(req: &PutDecisionRequest) -> Result<DecisionInput> {
  let mut v = Violations::default();
  let actor = v.user_id("actor_user_id", &req.actor_user_id);
  let recipient = v.user_id("recipient_user_id", &req.recipient_user_id);

  if req.actor_user_id.eq_ignore_ascii_case(&req.recipient_user_id) {
    v.push("recipient_user_id must not equal actor_user_id".to_owned());
  }

  match (actor, recipient) {
    (Some(actor), Some(recipient)) if v.is_empty() => Ok(DecisionInput {
      actor,
      recipient,
      liked: req.liked_recipient,
    }),
    _ => Err(v.into_error()),
  }
}

// ─── Collector ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
  fn push(&mut self, message: String) { self.0.push(message); }

  fn is_empty(&self) -> bool { self.0.is_empty() }

  fn into_error(self) -> Error { Error::InvalidRequest(self.0) }

  fn user_id(&mut self, field: &str, value: &str) -> Option<UserId> {
    if value.is_empty() {
      self.push(format!("{field} is required"));
      return None;
    }
    match UserId::parse(value) {
      Ok(id) => Some(id),
      Err(_) => {
        self.push(format!("{field} must be a valid UUID"));
        None
      }
    }
  }

  fn page_size(&mut self, requested: Option<&PageSize>) -> usize {
    let requested = match requested {
      None => None,
      Some(PageSize::Value(n)) => Some(*n),
      Some(PageSize::Text(text)) if text.is_empty() => None,
      Some(PageSize::Text(text)) => match text.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
          self.push("page_size must be a non-negative integer".to_owned());
          return DEFAULT_PAGE_SIZE;
        }
      },
    };
    match requested {
      None | Some(0) => DEFAULT_PAGE_SIZE,
      Some(n) if n > MAX_PAGE_SIZE => {
        self.push(format!("page_size cannot exceed {MAX_PAGE_SIZE}"));
        DEFAULT_PAGE_SIZE
      }
      Some(n) => n as usize,
    }
  }

  fn cursor(&mut self, token: Option<&str>) -> Option<i64> {
    match pagination::decode(token.unwrap_or_default()) {
      Ok(cursor) => Some(cursor),
      Err(_) => {
        self.push("pagination_token is malformed".to_owned());
        None
      }
    }
  }
}
