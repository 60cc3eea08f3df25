//! The `DecisionStore` trait.
//!
//! Implemented by storage backends (e.g. `explore-store-sqlite`) and injected
//! into [`ExploreService`](crate::ExploreService) at construction time. Tests
//! supply their own in-memory implementation.

use std::future::Future;

use crate::{decision::Liker, user::UserId};

/// Abstraction over the persisted decision table.
///
/// The store performs no in-process locking. Concurrent writes to the same
/// pair are serialised by the storage engine; the last write to commit wins.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded runtime.
pub trait DecisionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or overwrite the `(actor, recipient)` decision and refresh its
  /// `updated_at` to the write time. A single atomic statement.
  fn upsert_decision(
    &self,
    actor: UserId,
    recipient: UserId,
    liked: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Number of likes received by `recipient`.
  fn count_liked_you(
    &self,
    recipient: UserId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Everyone who liked `recipient`, newest first.
  ///
  /// When `cursor > 0` only rows with `updated_at` strictly before the cursor
  /// are returned. At most `page_size + 1` rows come back; the extra row
  /// tells the caller another page exists.
  fn list_liked_you(
    &self,
    recipient: UserId,
    cursor: i64,
    page_size: usize,
  ) -> impl Future<Output = Result<Vec<Liker>, Self::Error>> + Send + '_;

  /// Same contract as [`list_liked_you`](Self::list_liked_you), restricted to
  /// likers that `recipient` has not liked back (no reverse decision, or a
  /// reverse pass).
  fn list_new_liked_you(
    &self,
    recipient: UserId,
    cursor: i64,
    page_size: usize,
  ) -> impl Future<Output = Result<Vec<Liker>, Self::Error>> + Send + '_;

  /// Whether `recipient` has liked `actor`. A missing reverse decision is
  /// simply `false`.
  fn check_mutual_like(
    &self,
    actor: UserId,
    recipient: UserId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
