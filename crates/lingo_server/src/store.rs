//! In-memory session store with per-session locking.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use lingo_core::{Session, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
struct Entry {
    session: Session,
    last_active: DateTime<Utc>,
}

type Slot = Arc<Mutex<Entry>>;

/// Holds every live session.
///
/// The map lock is only held long enough to find a session's slot; the
/// operation itself runs under that session's own lock, so requests for
/// different sessions never wait on each other.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Slot>>>,
}

/// Recovers the guard from a poisoned lock. Sessions stay consistent because
/// the engine only mutates after all checks pass.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Stores a new session, replacing any session with the same id.
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    pub fn create(&self, session: Session, now: DateTime<Utc>) {
        let id = *session.id();
        let slot = Arc::new(Mutex::new(Entry {
            session,
            last_active: now,
        }));
        let mut sessions = lock(&self.sessions);
        if sessions.insert(id, slot).is_some() {
            warn!("Replaced existing session");
        }
        debug!(count = sessions.len(), "Session stored");
    }

    fn slot(&self, id: &SessionId) -> Result<Slot, StoreError> {
        lock(&self.sessions).get(id).cloned().ok_or_else(|| {
            debug!(session_id = %id, "Session not found");
            StoreError::SessionNotFound(id.to_string())
        })
    }

    /// Locks a slot and confirms it is still the one stored under `id`.
    ///
    /// A slot the reaper removed before the lock was taken is reported as not
    /// found. Lock order is entry then map; the reaper only `try_lock`s entries.
    fn lock_live<'a>(
        &self,
        id: &SessionId,
        slot: &'a Slot,
    ) -> Result<MutexGuard<'a, Entry>, StoreError> {
        let entry = lock(slot);
        let live = lock(&self.sessions)
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, slot));
        if !live {
            debug!(session_id = %id, "Session removed while waiting for its lock");
            return Err(StoreError::SessionNotFound(id.to_string()));
        }
        Ok(entry)
    }

    /// Returns a copy of a session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SessionNotFound`] for an unknown or reaped id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &SessionId, now: DateTime<Utc>) -> Result<Session, StoreError> {
        let slot = self.slot(id)?;
        let mut entry = self.lock_live(id, &slot)?;
        entry.last_active = now;
        Ok(entry.session.clone())
    }

    /// Runs `f` with exclusive access to a session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SessionNotFound`] for an unknown or reaped id.
    #[instrument(skip(self, f))]
    pub fn with_lock<R, F>(&self, id: &SessionId, now: DateTime<Utc>, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let slot = self.slot(id)?;
        let mut entry = self.lock_live(id, &slot)?;
        entry.last_active = now;
        Ok(f(&mut entry.session))
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Returns true if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes sessions idle for longer than `ttl` and returns how many went.
    ///
    /// Sessions currently locked by a request are in use and are kept.
    #[instrument(skip(self))]
    pub fn reap_idle(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();

        sessions.retain(|id, slot| match slot.try_lock() {
            Ok(entry) => {
                let keep = now.signed_duration_since(entry.last_active) <= ttl;
                if !keep {
                    debug!(session_id = %id, last_active = %entry.last_active, "Reaping idle session");
                }
                keep
            }
            Err(_) => true,
        });

        let reaped = before - sessions.len();
        if reaped > 0 {
            info!(reaped, remaining = sessions.len(), "Reaped idle sessions");
        }
        reaped
    }

    /// Spawns a background task that reaps idle sessions every `interval`.
    pub fn spawn_reaper(&self, interval: Duration, ttl: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        info!(?interval, ?ttl, "Starting session reaper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.reap_idle(Utc::now(), ttl);
            }
        })
    }
}
