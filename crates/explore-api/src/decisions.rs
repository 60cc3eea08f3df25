//! Handler for `PUT /decisions`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use explore_core::{
  ExploreService,
  explore::{PutDecisionRequest, PutDecisionResponse},
  store::DecisionStore,
};

use crate::error::ApiError;

/// `PUT /decisions` with body
/// `{"actor_user_id":"...","recipient_user_id":"...","liked_recipient":true}`
pub async fn put<S>(
  State(service): State<ExploreService<S>>,
  req: Result<Json<PutDecisionRequest>, JsonRejection>,
) -> Result<Json<PutDecisionResponse>, ApiError>
where
  S: DecisionStore + 'static,
{
  let Json(req) = req?;
  Ok(Json(service.put_decision(&req).await?))
}
