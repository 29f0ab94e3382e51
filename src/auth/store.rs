//! Shared session storage for one client instance.
//!
//! Concurrent calls read the session through [`SessionStore::snapshot`] and
//! authentication replaces it in one write, so no caller ever sees a cookie
//! from one login paired with a token from another. Every replacement bumps a
//! generation counter; a call that hit an expired session compares the
//! generation it was sent with against the current one to tell whether
//! somebody else already logged in again.

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::auth::Session;

/// A session together with the generation it was stored at.
#[derive(Clone, Debug, Default)]
pub(crate) struct Snapshot {
    pub(crate) session: Session,
    pub(crate) generation: u64,
}

#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    state: RwLock<Snapshot>,
    /// Held for the whole cookie + login sequence.
    gate: Mutex<()>,
}

impl SessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    /// Stores a freshly authenticated session and bumps the generation.
    pub(crate) async fn replace(&self, session: Session) {
        let mut state = self.state.write().await;
        state.session = session;
        state.generation += 1;
    }

    /// Serializes authentication attempts.
    pub(crate) async fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
