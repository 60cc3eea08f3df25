//! Core types and trait definitions for the explore service.
//!
//! This crate is free of HTTP and database dependencies. The storage backend
//! (`explore-store-sqlite`) implements [`store::DecisionStore`]; the transport
//! layer (`explore-api`) drives [`service::ExploreService`].

pub mod decision;
pub mod error;
pub mod explore;
pub mod pagination;
pub mod service;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
pub use service::ExploreService;
pub use user::UserId;
