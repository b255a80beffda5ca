//! Login-scoped configuration for one board session.
//!
//! A [`Session`] is constructed once at login and passed by reference into
//! the hydration call and the transport adapter. Its lifecycle is
//! init-on-login, drop-on-logout; nothing in the crate reads ambient global
//! state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Identity and addressing for one participant on one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Display name stamped onto outbound envelopes.
    pub user: String,
    /// The board this session is joined to.
    pub board_id: String,
    /// HTTP base URL of the backing service, e.g. `http://localhost:8000`.
    pub base_url: String,
}

impl Session {
    /// Create a session value at login time.
    #[must_use]
    pub fn new(user: impl Into<String>, board_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            board_id: board_id.into(),
            base_url: base_url.into(),
        }
    }

    /// The hydration endpoint for this board.
    #[must_use]
    pub fn board_url(&self) -> String {
        format!(
            "{}/whiteboards/{}/",
            self.base_url.trim_end_matches('/'),
            self.board_id
        )
    }
}
