//! Process wiring for the explore server: configuration and the top-level
//! router with its middleware.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use explore_core::{ExploreService, store::DecisionStore};
use serde::Deserialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Environment variables with this prefix override the config file, e.g.
/// `EXPLORE_PORT=8080`.
pub const ENV_PREFIX: &str = "EXPLORE";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `explore.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Requests still running after this long are aborted, including any
  /// in-flight store call.
  pub request_timeout_secs: u64,
}

impl ServerConfig {
  /// Load defaults, then `path` (if it exists), then `EXPLORE_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 50051)?
      .set_default("store_path", "explore.db")?
      .set_default("request_timeout_secs", 5)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing and the configured deadline.
pub fn app<S>(service: ExploreService<S>, config: &ServerConfig) -> Router
where
  S: DecisionStore + 'static,
{
  explore_api::api_router(service)
    .layer(TimeoutLayer::new(config.request_timeout()))
    .layer(TraceLayer::new_for_http())
}
