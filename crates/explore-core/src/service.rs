//! [`ExploreService`]: validation, store calls and response shaping for the
//! four explore operations.
//!
//! Every call is independent: validate, make one store call (two for
//! `put_decision`), shape the response. The service holds no per-request
//! state and can be shared freely between tasks.

use std::sync::Arc;

use crate::{
  Error, Result,
  decision::Liker,
  explore::{
    CountLikedYouRequest, CountLikedYouResponse, LikerEntry,
    ListLikedYouRequest, ListLikedYouResponse, PutDecisionRequest,
    PutDecisionResponse,
  },
  pagination,
  store::DecisionStore,
  validate,
};

/// Orchestrates the explore operations over an injected [`DecisionStore`].
pub struct ExploreService<S> {
  store: Arc<S>,
}

impl<S> Clone for ExploreService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DecisionStore> ExploreService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// One page of everyone who liked the recipient, newest first.
  pub async fn list_liked_you(
    &self,
    req: &ListLikedYouRequest,
  ) -> Result<ListLikedYouResponse> {
    let query = validate::list_liked_you(req)?;
    let rows = self
      .store
      .list_liked_you(query.recipient, query.cursor, query.page_size)
      .await
      .map_err(|e| store_failure("ListLikedYou", e))?;

    let page = into_page(rows, query.page_size);
    tracing::debug!(
      recipient = %query.recipient,
      likers = page.likers.len(),
      more = !page.next_pagination_token.is_empty(),
      "listed likers"
    );
    Ok(page)
  }

  /// One page of the likers the recipient has not liked back.
  pub async fn list_new_liked_you(
    &self,
    req: &ListLikedYouRequest,
  ) -> Result<ListLikedYouResponse> {
    let query = validate::list_liked_you(req)?;
    let rows = self
      .store
      .list_new_liked_you(query.recipient, query.cursor, query.page_size)
      .await
      .map_err(|e| store_failure("ListNewLikedYou", e))?;

    let page = into_page(rows, query.page_size);
    tracing::debug!(
      recipient = %query.recipient,
      likers = page.likers.len(),
      more = !page.next_pagination_token.is_empty(),
      "listed new likers"
    );
    Ok(page)
  }

  pub async fn count_liked_you(
    &self,
    req: &CountLikedYouRequest,
  ) -> Result<CountLikedYouResponse> {
    let recipient = validate::count_liked_you(req)?;
    let count = self
      .store
      .count_liked_you(recipient)
      .await
      .map_err(|e| store_failure("CountLikedYou", e))?;
    Ok(CountLikedYouResponse { count })
  }

  /// Record a like or pass and report whether it completed a match.
  ///
  /// The upsert and the reciprocity check are separate store calls. When two
  /// users like each other at nearly the same moment, the match is reported
  /// to whichever write lands second, and possibly to neither.
  pub async fn put_decision(
    &self,
    req: &PutDecisionRequest,
  ) -> Result<PutDecisionResponse> {
    let input = validate::put_decision(req)?;

    self
      .store
      .upsert_decision(input.actor, input.recipient, input.liked)
      .await
      .map_err(|e| store_failure("UpsertDecision", e))?;

    // A pass can never complete a match.
    let mutual_likes = if input.liked {
      self
        .store
        .check_mutual_like(input.actor, input.recipient)
        .await
        .map_err(|e| store_failure("CheckMutualLike", e))?
    } else {
      false
    };

    tracing::debug!(
      actor = %input.actor,
      recipient = %input.recipient,
      liked = input.liked,
      mutual_likes,
      "recorded decision"
    );
    Ok(PutDecisionResponse { mutual_likes })
  }
}

/// Strip the lookahead row and derive the next-page token from the last row
/// that is kept.
fn into_page(mut rows: Vec<Liker>, page_size: usize) -> ListLikedYouResponse {
  let next_pagination_token = if rows.len() > page_size {
    rows.truncate(page_size);
    rows
      .last()
      .map(|l| pagination::encode(l.cursor_value()))
      .unwrap_or_default()
  } else {
    String::new()
  };

  ListLikedYouResponse {
    likers: rows.into_iter().map(LikerEntry::from).collect(),
    next_pagination_token,
  }
}

fn store_failure<E>(operation: &'static str, e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::warn!(operation, error = %e, "store call failed");
  Error::unknown(operation, e)
}
