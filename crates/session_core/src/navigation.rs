//! Page state machine gated by authentication.

use shared::domain::PageId;
use tracing::{debug, info};

use crate::{Session, SessionError};

const GUEST_PAGES: [PageId; 4] = [
    PageId::Welcome,
    PageId::Login,
    PageId::Tips,
    PageId::Settings,
];

const MEMBER_PAGES: [PageId; 5] = [
    PageId::Dashboard,
    PageId::Predict,
    PageId::Reports,
    PageId::Tips,
    PageId::Settings,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved,
    /// Target not reachable in the current auth state; nothing changed.
    Ignored,
}

pub fn reachable_pages(authenticated: bool) -> &'static [PageId] {
    if authenticated {
        &MEMBER_PAGES
    } else {
        &GUEST_PAGES
    }
}

pub fn is_reachable(authenticated: bool, page: PageId) -> bool {
    reachable_pages(authenticated).contains(&page)
}

pub fn default_page(authenticated: bool) -> PageId {
    if authenticated {
        PageId::Dashboard
    } else {
        PageId::Welcome
    }
}

impl Session {
    pub fn go_to(&mut self, target: PageId) -> NavigationOutcome {
        if !is_reachable(self.authenticated, target) {
            debug!(?target, authenticated = self.authenticated, "navigation ignored");
            return NavigationOutcome::Ignored;
        }
        self.current_page = target;
        NavigationOutcome::Moved
    }

    /// Presence-only credential check; nothing is verified.
    pub fn log_in(&mut self, identity: &str, email: &str, password: &str) -> Result<(), SessionError> {
        for (field, value) in [("name", identity), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(SessionError::validation(field, "is required"));
            }
        }
        self.authenticated = true;
        self.identity = identity.to_string();
        self.current_page = default_page(true);
        info!(identity, "logged in");
        Ok(())
    }

    pub fn log_out(&mut self) {
        if self.clear_history_on_logout {
            self.history.clear();
        }
        self.authenticated = false;
        self.identity.clear();
        self.current_page = default_page(false);
        info!(
            history_cleared = self.clear_history_on_logout,
            "logged out"
        );
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
