use shared::{
    domain::{
        LocaleId, PageId, Preferences, PredictionRecord, RecordId, SessionId, ThemeId,
        FONT_SIZE_MAX, FONT_SIZE_MIN,
    },
    protocol::{OracleStatus, SessionView},
};
use tracing::info;

use crate::{navigation, SessionError};

/// All state belonging to one client. Fields only change through the
/// navigation, preference and workflow operations, so `current_page` is
/// always reachable for the current auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) authenticated: bool,
    pub(crate) identity: String,
    pub(crate) current_page: PageId,
    pub(crate) preferences: Preferences,
    pub(crate) clear_history_on_logout: bool,
    pub(crate) pending_reset: bool,
    pub(crate) last_result: Option<PredictionRecord>,
    pub(crate) history: Vec<PredictionRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            authenticated: false,
            identity: String::new(),
            current_page: PageId::Welcome,
            preferences: Preferences::default(),
            clear_history_on_logout: false,
            pending_reset: false,
            last_result: None,
            history: Vec::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn clear_history_on_logout(&self) -> bool {
        self.clear_history_on_logout
    }

    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn last_result(&self) -> Option<&PredictionRecord> {
        self.last_result.as_ref()
    }

    /// Chronological; oldest first.
    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }

    /// Looks a record up in the history first, then in `last_result`, which
    /// survives a history clear on logout.
    pub fn find_record(&self, id: RecordId) -> Result<&PredictionRecord, SessionError> {
        self.history
            .iter()
            .find(|record| record.id == id)
            .or_else(|| self.last_result.as_ref().filter(|record| record.id == id))
            .ok_or(SessionError::UnknownRecord(id))
    }

    pub fn is_consistent(&self) -> bool {
        navigation::is_reachable(self.authenticated, self.current_page)
            && (self.authenticated || self.identity.is_empty())
            && (FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&self.preferences.font_size)
    }

    pub fn set_theme(&mut self, theme: ThemeId) {
        self.preferences.theme = theme;
    }

    pub fn set_locale(&mut self, locale: LocaleId) {
        self.preferences.locale = locale;
    }

    pub fn set_font_size(&mut self, font_size: u8) -> Result<(), SessionError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&font_size) {
            return Err(SessionError::validation(
                "font_size",
                format!("must be between {FONT_SIZE_MIN} and {FONT_SIZE_MAX}, got {font_size}"),
            ));
        }
        self.preferences.font_size = font_size;
        Ok(())
    }

    pub fn set_clear_history_on_logout(&mut self, enabled: bool) {
        self.clear_history_on_logout = enabled;
    }

    /// Restores every field to its construction value.
    pub fn reset(&mut self) {
        *self = Session::default();
        info!("session reset");
    }

    /// First step of the two-step reset: arm the confirmation.
    pub fn request_reset(&mut self) {
        self.pending_reset = true;
    }

    /// Second step: resets only when a reset was requested. Returns whether
    /// the session was reset.
    pub fn confirm_reset(&mut self) -> bool {
        if !self.pending_reset {
            return false;
        }
        self.reset();
        true
    }

    pub fn cancel_reset(&mut self) {
        self.pending_reset = false;
    }

    pub(crate) fn commit_prediction(&mut self, record: PredictionRecord) {
        self.last_result = Some(record.clone());
        self.history.push(record);
    }

    pub fn view(&self, session_id: SessionId, oracle_status: OracleStatus) -> SessionView {
        SessionView {
            session_id,
            authenticated: self.authenticated,
            identity: self.identity.clone(),
            current_page: self.current_page,
            reachable_pages: navigation::reachable_pages(self.authenticated).to_vec(),
            preferences: self.preferences,
            clear_history_on_logout: self.clear_history_on_logout,
            pending_reset: self.pending_reset,
            last_result: self.last_result.clone(),
            history_len: self.history.len(),
            oracle_status,
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
