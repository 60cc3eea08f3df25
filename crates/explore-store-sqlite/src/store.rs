//! [`SqliteStore`]: the SQLite implementation of [`DecisionStore`].

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use explore_core::{
  UserId,
  decision::{Decision, Liker},
  store::DecisionStore,
};

use crate::{
  Error, Result,
  cancel::CallGuard,
  encode::{RawDecision, RawLiker, encode_ts, encode_user},
  schema::SCHEMA,
};

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Overwrites `liked` on conflict. `updated_at` never moves backwards, even if
/// the wall clock does.
const UPSERT_DECISION: &str = "
INSERT INTO decisions (actor_id, recipient_id, liked, updated_at)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (actor_id, recipient_id) DO UPDATE SET
    liked      = excluded.liked,
    updated_at = MAX(decisions.updated_at, excluded.updated_at)";

const COUNT_LIKED_YOU: &str = "
SELECT COUNT(*)
FROM decisions
WHERE recipient_id = ?1 AND liked = 1";

// `?2 <= 0` means no cursor.
const LIST_LIKED_YOU: &str = "
SELECT actor_id, updated_at
FROM decisions
WHERE recipient_id = ?1
  AND liked = 1
  AND (?2 <= 0 OR updated_at < ?2)
ORDER BY updated_at DESC
LIMIT ?3";

const LIST_NEW_LIKED_YOU: &str = "
SELECT d1.actor_id, d1.updated_at
FROM decisions AS d1
LEFT JOIN decisions AS d2
  ON  d2.actor_id     = d1.recipient_id
  AND d2.recipient_id = d1.actor_id
WHERE d1.recipient_id = ?1
  AND d1.liked = 1
  AND (d2.liked IS NULL OR d2.liked = 0)
  AND (?2 <= 0 OR d1.updated_at < ?2)
ORDER BY d1.updated_at DESC
LIMIT ?3";

const CHECK_LIKED: &str = "
SELECT 1
FROM decisions
WHERE actor_id = ?1 AND recipient_id = ?2 AND liked = 1";

const GET_DECISION: &str = "
SELECT actor_id, recipient_id, liked, updated_at
FROM decisions
WHERE actor_id = ?1 AND recipient_id = ?2";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An explore decision store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// are serialised onto the connection's background thread.
///
/// Every store future owns its call: dropping it before the statement runs
/// skips the statement, and dropping it mid-statement interrupts it.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  interrupt: Arc<rusqlite::InterruptHandle>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let interrupt = conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(conn.get_interrupt_handle())
      })
      .await?;
    Ok(Self { conn, interrupt: Arc::new(interrupt) })
  }

  /// Run `f` on the connection thread, tied to the lifetime of the returned
  /// future.
  async fn call<R, F>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    let (_guard, ticket) = CallGuard::new(Arc::clone(&self.interrupt));
    let out = self
      .conn
      .call(move |conn| {
        if !ticket.start() {
          return Ok(None);
        }
        let out = f(conn);
        ticket.finish();
        Ok(Some(out?))
      })
      .await?;
    out.ok_or(Error::Cancelled)
  }

  /// Insert or overwrite the `(actor, recipient)` decision, stamping it with
  /// `at` instead of the current time.
  ///
  /// The write is one statement. A caller dropped before it starts never
  /// writes, and one dropped mid-statement rolls it back.
  pub async fn upsert_decision_at(
    &self,
    actor: UserId,
    recipient: UserId,
    liked: bool,
    at: DateTime<Utc>,
  ) -> Result<()> {
    let actor_str     = encode_user(actor);
    let recipient_str = encode_user(recipient);
    let at_micros     = encode_ts(at);

    self
      .call(move |conn| {
        conn.execute(
          UPSERT_DECISION,
          rusqlite::params![actor_str, recipient_str, liked, at_micros],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the decision `actor` made about `recipient`, if any.
  pub async fn get_decision(
    &self,
    actor: UserId,
    recipient: UserId,
  ) -> Result<Option<Decision>> {
    let actor_str     = encode_user(actor);
    let recipient_str = encode_user(recipient);

    let raw: Option<RawDecision> = self
      .call(move |conn| {
        Ok(conn
          .query_row(
            GET_DECISION,
            rusqlite::params![actor_str, recipient_str],
            |row| {
              Ok(RawDecision {
                actor_id:     row.get(0)?,
                recipient_id: row.get(1)?,
                liked:        row.get(2)?,
                updated_at:   row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDecision::into_decision).transpose()
  }

  /// Run one of the listing queries; both share the same parameters.
  async fn list_likers(
    &self,
    sql: &'static str,
    recipient: UserId,
    cursor: i64,
    page_size: usize,
  ) -> Result<Vec<Liker>> {
    let recipient_str = encode_user(recipient);
    // One extra row tells the caller whether another page exists.
    let limit = i64::try_from(page_size).unwrap_or(i64::MAX).saturating_add(1);

    let raws: Vec<RawLiker> = self
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![recipient_str, cursor, limit],
            RawLiker::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLiker::into_liker).collect()
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Keep the connection thread busy for `d` outside any guarded call.
  pub(crate) async fn hold_connection(&self, d: std::time::Duration) -> Result<()> {
    self
      .conn
      .call(move |_| {
        std::thread::sleep(d);
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// A guarded statement that takes far longer than any test waits.
  pub(crate) async fn run_slow_query(&self) -> Result<i64> {
    self
      .call(|conn| {
        conn.query_row(
          "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n)
           SELECT COUNT(*) FROM (SELECT x FROM n LIMIT 10000000000)",
          [],
          |row| row.get(0),
        )
      })
      .await
  }

  pub(crate) async fn row_count(&self) -> Result<i64> {
    self
      .call(|conn| conn.query_row("SELECT COUNT(*) FROM decisions", [], |row| row.get(0)))
      .await
  }
}

// ─── DecisionStore impl ──────────────────────────────────────────────────────

impl DecisionStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert_decision(
    &self,
    actor: UserId,
    recipient: UserId,
    liked: bool,
  ) -> Result<()> {
    self.upsert_decision_at(actor, recipient, liked, Utc::now()).await
  }

  async fn count_liked_you(&self, recipient: UserId) -> Result<u64> {
    let recipient_str = encode_user(recipient);

    let count: i64 = self
      .call(move |conn| {
        Ok(conn.query_row(
          COUNT_LIKED_YOU,
          rusqlite::params![recipient_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(u64::try_from(count).unwrap_or_default())
  }

  async fn list_liked_you(
    &self,
    recipient: UserId,
    cursor: i64,
    page_size: usize,
  ) -> Result<Vec<Liker>> {
    self.list_likers(LIST_LIKED_YOU, recipient, cursor, page_size).await
  }

  async fn list_new_liked_you(
    &self,
    recipient: UserId,
    cursor: i64,
    page_size: usize,
  ) -> Result<Vec<Liker>> {
    self.list_likers(LIST_NEW_LIKED_YOU, recipient, cursor, page_size).await
  }

  async fn check_mutual_like(
    &self,
    actor: UserId,
    recipient: UserId,
  ) -> Result<bool> {
    // Mutual iff the reverse pair is a like.
    let reverse_actor     = encode_user(recipient);
    let reverse_recipient = encode_user(actor);

    let liked_back: Option<i64> = self
      .call(move |conn| {
        Ok(conn
          .query_row(
            CHECK_LIKED,
            rusqlite::params![reverse_actor, reverse_recipient],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(liked_back.is_some())
  }
}
