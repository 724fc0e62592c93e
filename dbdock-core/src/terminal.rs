//! Terminal session lifecycle
//!
//! Terminal tabs own an external shell session. The layout store asks a
//! [`TerminalLifecycle`] for a session when such a tab is created and tells
//! it to close the session when the tab goes away. Neither call blocks the
//! tree mutation: failures are logged and the layout change stands.

use std::collections::HashSet;
use std::sync::Mutex;

use thiserror::Error;

use crate::layout::{TabId, TerminalSessionId};

/// Errors reported by a terminal lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerminalError {
    /// The service could not start a session.
    #[error("failed to create terminal session: {0}")]
    CreateFailed(String),

    /// The session is not known to the service.
    #[error("terminal session not found: {0}")]
    SessionNotFound(TerminalSessionId),

    /// The session could not be terminated.
    #[error("failed to close terminal session {session}: {reason}")]
    CloseFailed {
        /// Session being closed.
        session: TerminalSessionId,
        /// Failure description.
        reason: String,
    },
}

/// Result type for terminal lifecycle calls.
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Create/close contract of the terminal process service.
///
/// Implementations must return promptly; real process teardown is expected
/// to continue in the background.
pub trait TerminalLifecycle: Send + Sync {
    /// Starts a session for a terminal tab.
    ///
    /// # Errors
    ///
    /// Returns an error if no session could be started.
    fn create_session(&self, tab_id: TabId) -> TerminalResult<TerminalSessionId>;

    /// Requests termination of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or cannot be closed.
    fn close_session(&self, session: TerminalSessionId) -> TerminalResult<()>;
}

/// Terminal service that only tracks session ids.
///
/// Used by the CLI and by tests.
#[derive(Debug, Default)]
pub struct InMemoryTerminalSessions {
    live: Mutex<HashSet<TerminalSessionId>>,
}

impl InMemoryTerminalSessions {
    /// Creates a service with no sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open sessions.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().map_or(0, |live| live.len())
    }

    /// Returns true if the session is open.
    #[must_use]
    pub fn is_live(&self, session: TerminalSessionId) -> bool {
        self.live
            .lock()
            .is_ok_and(|live| live.contains(&session))
    }
}

impl TerminalLifecycle for InMemoryTerminalSessions {
    fn create_session(&self, tab_id: TabId) -> TerminalResult<TerminalSessionId> {
        let session = TerminalSessionId::new();
        self.live
            .lock()
            .map_err(|e| TerminalError::CreateFailed(e.to_string()))?
            .insert(session);
        tracing::debug!(tab_id = %tab_id, session = %session, "Terminal session created");
        Ok(session)
    }

    fn close_session(&self, session: TerminalSessionId) -> TerminalResult<()> {
        let removed = self
            .live
            .lock()
            .map_err(|e| TerminalError::CloseFailed {
                session,
                reason: e.to_string(),
            })?
            .remove(&session);
        if removed {
            tracing::debug!(session = %session, "Terminal session closed");
            Ok(())
        } else {
            Err(TerminalError::SessionNotFound(session))
        }
    }
}
