//! JSON HTTP API for the explore service.
//!
//! Exposes an axum [`Router`] over an [`ExploreService`] backed by any
//! [`DecisionStore`]. TLS, timeouts and tracing layers are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = explore_api::api_router(ExploreService::new(store));
//! ```

pub mod decisions;
pub mod error;
pub mod liked_you;

use axum::{
  Json, Router,
  routing::{get, put},
};
use explore_core::{ExploreService, store::DecisionStore};
use serde_json::{Value, json};

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: ExploreService<S>) -> Router<()>
where
  S: DecisionStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Likes received
    .route("/liked-you", get(liked_you::list::<S>))
    .route("/liked-you/new", get(liked_you::list_new::<S>))
    .route("/liked-you/count", get(liked_you::count::<S>))
    // Decisions
    .route("/decisions", put(decisions::put::<S>))
    .with_state(service)
}

/// `GET /health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use explore_core::{UserId, explore::ListLikedYouResponse};
  use explore_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(ExploreService::new(Arc::new(store)))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn decide(app: &Router, actor: UserId, recipient: UserId, liked: bool) -> Value {
    let resp = send(
      app,
      "PUT",
      "/decisions",
      Some(json!({
        "actor_user_id": actor.to_string(),
        "recipient_user_id": recipient.to_string(),
        "liked_recipient": liked,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await
  }

  #[tokio::test]
  async fn health_is_ok() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "status": "ok" }));
  }

  #[tokio::test]
  async fn put_decision_reports_mutual_likes() {
    let app = app().await;
    let (a, b) = (UserId::new_v4(), UserId::new_v4());

    assert_eq!(decide(&app, a, b, true).await, json!({ "mutual_likes": false }));
    assert_eq!(decide(&app, b, a, true).await, json!({ "mutual_likes": true }));
    assert_eq!(decide(&app, b, a, false).await, json!({ "mutual_likes": false }));
  }

  #[tokio::test]
  async fn invalid_decision_is_400_with_every_violation() {
    let app = app().await;
    let resp = send(
      &app,
      "PUT",
      "/decisions",
      Some(json!({ "recipient_user_id": "nope", "liked_recipient": true })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("actor_user_id is required"), "{msg}");
    assert!(msg.contains("recipient_user_id must be a valid UUID"), "{msg}");
  }

  #[tokio::test]
  async fn listing_pages_through_likers() {
    let app = app().await;
    let recipient = UserId::new_v4();
    for _ in 0..3 {
      decide(&app, UserId::new_v4(), recipient, true).await;
    }

    let resp = send(
      &app,
      "GET",
      &format!("/liked-you?recipient_id={recipient}&page_size=2"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: ListLikedYouResponse = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(first.likers.len(), 2);
    assert!(!first.next_pagination_token.is_empty());

    let resp = send(
      &app,
      "GET",
      &format!(
        "/liked-you?recipient_id={recipient}&page_size=2&pagination_token={}",
        first.next_pagination_token.replace('=', "%3D").replace('+', "%2B"),
      ),
      None,
    )
    .await;
    let second: ListLikedYouResponse = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(second.likers.len(), 1);
    assert!(second.next_pagination_token.is_empty());
    assert!(first.likers.iter().all(|l| l.actor_id != second.likers[0].actor_id));
  }

  #[tokio::test]
  async fn new_listing_and_count() {
    let app = app().await;
    let (a, b, c) = (UserId::new_v4(), UserId::new_v4(), UserId::new_v4());
    decide(&app, a, c, true).await;
    decide(&app, b, c, true).await;
    decide(&app, c, a, true).await;

    let resp = send(&app, "GET", &format!("/liked-you/new?recipient_id={c}"), None).await;
    let new: ListLikedYouResponse = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(new.likers.len(), 1);
    assert_eq!(new.likers[0].actor_id, b);

    let resp = send(&app, "GET", &format!("/liked-you/count?recipient_id={c}"), None).await;
    assert_eq!(json_body(resp).await, json!({ "count": 2 }));
  }

  #[tokio::test]
  async fn oversized_page_is_400() {
    let app = app().await;
    let uri = format!("/liked-you?recipient_id={}&page_size=101", UserId::new_v4());
    let resp = send(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("page_size cannot exceed 100"));
  }

  #[tokio::test]
  async fn bad_page_size_is_reported_with_other_violations() {
    let app = app().await;
    for size in ["abc", "-1"] {
      let uri = format!("/liked-you/new?recipient_id=bad&page_size={size}");
      let resp = send(&app, "GET", &uri, None).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
      let body = json_body(resp).await;
      let msg = body["error"].as_str().unwrap();
      assert!(msg.contains("recipient_id must be a valid UUID"), "{msg}");
      assert!(msg.contains("page_size must be a non-negative integer"), "{msg}");
    }
  }

  #[tokio::test]
  async fn mistyped_decision_body_is_json_400() {
    let app = app().await;
    let resp = send(
      &app,
      "PUT",
      "/decisions",
      Some(json!({
        "actor_user_id": UserId::new_v4().to_string(),
        "recipient_user_id": UserId::new_v4().to_string(),
        "liked_recipient": "yes",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("request validation errors: ["));
  }

  #[tokio::test]
  async fn missing_recipient_is_400() {
    let app = app().await;
    let resp = send(&app, "GET", "/liked-you/count", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }
}
