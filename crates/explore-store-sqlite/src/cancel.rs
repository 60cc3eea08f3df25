//! Ties a queued connection call to the caller that is awaiting it.
//!
//! `tokio_rusqlite` hands a closure to the connection thread on first poll,
//! and the closure runs even if the awaiting future is dropped. A
//! [`CallGuard`] lives in that future. When it is dropped before the closure
//! finishes, a closure still in the queue is skipped and a statement already
//! running is interrupted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::InterruptHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Queued,
  Running,
  Done,
  Abandoned,
}

/// The connection-thread half: checked by the closure around its statement.
pub(crate) struct CallTicket {
  phase: Arc<Mutex<Phase>>,
}

impl CallTicket {
  /// Marks the call as running. Returns `false` if the caller has gone, in
  /// which case the statement must not run.
  pub(crate) fn start(&self) -> bool {
    let mut phase = lock(&self.phase);
    if *phase != Phase::Queued {
      return false;
    }
    *phase = Phase::Running;
    true
  }

  pub(crate) fn finish(&self) {
    let mut phase = lock(&self.phase);
    if *phase == Phase::Running {
      *phase = Phase::Done;
    }
  }
}

/// The caller half: held across the `.await` on the connection call.
pub(crate) struct CallGuard {
  phase:     Arc<Mutex<Phase>>,
  interrupt: Arc<InterruptHandle>,
}

impl CallGuard {
  pub(crate) fn new(interrupt: Arc<InterruptHandle>) -> (Self, CallTicket) {
    let phase = Arc::new(Mutex::new(Phase::Queued));
    let ticket = CallTicket { phase: Arc::clone(&phase) };
    (Self { phase, interrupt }, ticket)
  }
}

impl Drop for CallGuard {
  fn drop(&mut self) {
    // The lock is held while interrupting, so the closure cannot return and
    // let the next queued call start until the interrupt has landed.
    let mut phase = lock(&self.phase);
    match *phase {
      Phase::Queued => *phase = Phase::Abandoned,
      Phase::Running => {
        self.interrupt.interrupt();
        *phase = Phase::Abandoned;
      }
      Phase::Done | Phase::Abandoned => {}
    }
  }
}

fn lock(phase: &Mutex<Phase>) -> MutexGuard<'_, Phase> {
  phase.lock().unwrap_or_else(PoisonError::into_inner)
}
