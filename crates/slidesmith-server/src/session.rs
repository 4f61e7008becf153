//! Session-keyed presentation storage.
//!
//! Every open document lives in one process-wide map behind a mutex,
//! keyed by an opaque handle `pres_{n}`. The counter only moves forward,
//! so a closed handle is never handed out again. Sessions live until
//! explicitly closed; there is no eviction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use slidesmith_pptx::Presentation;

use crate::error::{DispatchError, Result};

pub struct SessionManager {
    presentations: Mutex<HashMap<String, Presentation>>,
    next_id: AtomicU64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            presentations: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a fresh empty presentation.
    pub fn create(&self) -> String {
        self.insert(Presentation::new())
    }

    /// Register an existing presentation and hand back its handle.
    pub fn insert(&self, pres: Presentation) -> String {
        let id = format!("pres_{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().insert(id.clone(), pres);
        id
    }

    /// Run an operation against one session's presentation.
    pub fn with_session<T>(
        &self,
        id: &str,
        op: impl FnOnce(&mut Presentation) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.lock();
        let pres = guard
            .get_mut(id)
            .ok_or_else(|| DispatchError::session_not_found(id))?;
        op(pres)
    }

    /// Drop a session. The handle stays burned.
    pub fn close(&self, id: &str) -> Result<()> {
        self.lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DispatchError::session_not_found(id))
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Presentation>> {
        // A poisoned lock still holds a structurally sound map.
        self.presentations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_monotonic() {
        let sessions = SessionManager::new();
        assert_eq!(sessions.create(), "pres_1");
        assert_eq!(sessions.create(), "pres_2");
        assert_eq!(sessions.session_count(), 2);
    }

    #[test]
    fn test_closed_handles_are_never_reused() {
        let sessions = SessionManager::new();
        let first = sessions.create();
        sessions.close(&first).unwrap();
        assert_eq!(sessions.create(), "pres_2");
        assert_eq!(sessions.session_count(), 1);
    }

    #[test]
    fn test_unknown_session_is_reported() {
        let sessions = SessionManager::new();
        let err = sessions
            .with_session("pres_404", |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, DispatchError::SessionNotFound { .. }));

        let err = sessions.close("pres_404").unwrap_err();
        assert!(matches!(err, DispatchError::SessionNotFound { .. }));
    }

    #[test]
    fn test_with_session_mutates_in_place() {
        let sessions = SessionManager::new();
        let id = sessions.create();
        sessions
            .with_session(&id, |pres| {
                pres.add_slide(0)?;
                Ok(())
            })
            .unwrap();
        let count = sessions
            .with_session(&id, |pres| Ok(pres.slide_count()))
            .unwrap();
        assert_eq!(count, 1);
    }
}
