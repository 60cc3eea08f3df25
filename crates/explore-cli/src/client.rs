//! Async HTTP client wrapping the explore JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use explore_core::explore::{
  CountLikedYouRequest, CountLikedYouResponse, ListLikedYouRequest,
  ListLikedYouResponse, PutDecisionRequest, PutDecisionResponse,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Async HTTP client for the explore API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
  }

  fn url(&self, path: &str) -> String { format!("{}{path}", self.base_url) }

  /// Send `req` and decode a JSON body, turning error responses into their
  /// `{"error": ...}` message.
  async fn send<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> Result<T> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;

    let status = resp.status();
    if !status.is_success() {
      let body: serde_json::Value = resp.json().await.unwrap_or_default();
      let message = body["error"].as_str().unwrap_or("no error message");
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp.json().await.with_context(|| format!("deserialising {what} response"))
  }

  /// `GET /liked-you`
  pub async fn list_liked_you(&self, req: &ListLikedYouRequest) -> Result<ListLikedYouResponse> {
    self
      .send("GET /liked-you", self.client.get(self.url("/liked-you")).query(req))
      .await
  }

  /// `GET /liked-you/new`
  pub async fn list_new_liked_you(
    &self,
    req: &ListLikedYouRequest,
  ) -> Result<ListLikedYouResponse> {
    self
      .send("GET /liked-you/new", self.client.get(self.url("/liked-you/new")).query(req))
      .await
  }

  /// `GET /liked-you/count`
  pub async fn count_liked_you(
    &self,
    req: &CountLikedYouRequest,
  ) -> Result<CountLikedYouResponse> {
    self
      .send("GET /liked-you/count", self.client.get(self.url("/liked-you/count")).query(req))
      .await
  }

  /// `PUT /decisions`
  pub async fn put_decision(&self, req: &PutDecisionRequest) -> Result<PutDecisionResponse> {
    self
      .send("PUT /decisions", self.client.put(self.url("/decisions")).json(req))
      .await
  }
}
