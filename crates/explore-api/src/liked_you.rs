//! Handlers for `/liked-you` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/liked-you` | `?recipient_id` required; optional `page_size`, `pagination_token` |
//! | `GET`  | `/liked-you/new` | Same parameters; only likers not yet liked back |
//! | `GET`  | `/liked-you/count` | `?recipient_id` required |

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use explore_core::{
  ExploreService,
  explore::{
    CountLikedYouRequest, CountLikedYouResponse, ListLikedYouRequest,
    ListLikedYouResponse,
  },
  store::DecisionStore,
};

use crate::error::ApiError;

/// `GET /liked-you?recipient_id=<id>[&page_size=<n>][&pagination_token=<t>]`
pub async fn list<S>(
  State(service): State<ExploreService<S>>,
  req: Result<Query<ListLikedYouRequest>, QueryRejection>,
) -> Result<Json<ListLikedYouResponse>, ApiError>
where
  S: DecisionStore + 'static,
{
  let Query(req) = req?;
  Ok(Json(service.list_liked_you(&req).await?))
}

/// `GET /liked-you/new?recipient_id=<id>[&page_size=<n>][&pagination_token=<t>]`
pub async fn list_new<S>(
  State(service): State<ExploreService<S>>,
  req: Result<Query<ListLikedYouRequest>, QueryRejection>,
) -> Result<Json<ListLikedYouResponse>, ApiError>
where
  S: DecisionStore + 'static,
{
  let Query(req) = req?;
  Ok(Json(service.list_new_liked_you(&req).await?))
}

/// `GET /liked-you/count?recipient_id=<id>`
pub async fn count<S>(
  State(service): State<ExploreService<S>>,
  req: Result<Query<CountLikedYouRequest>, QueryRejection>,
) -> Result<Json<CountLikedYouResponse>, ApiError>
where
  S: DecisionStore + 'static,
{
  let Query(req) = req?;
  Ok(Json(service.count_liked_you(&req).await?))
}
