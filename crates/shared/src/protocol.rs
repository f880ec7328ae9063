use serde::{Deserialize, Serialize};

use crate::domain::{LocaleId, PageId, Preferences, PredictionRecord, SessionId, ThemeId};

/// An enumerated form field, either as its numeric code or as the label a
/// user picked from a (possibly localized) option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Code(u8),
    Label(String),
}

impl From<u8> for Choice {
    fn from(value: u8) -> Self {
        Choice::Code(value)
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::Label(value.to_string())
    }
}

/// Raw prediction form as submitted by the render layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub age: i32,
    pub sex: Choice,
    pub cp: Choice,
    pub trestbps: i32,
    pub chol: i32,
    pub fbs: Choice,
    pub restecg: Choice,
    pub thalach: i32,
    pub exang: Choice,
    pub oldpeak: f64,
    pub slope: Choice,
    pub ca: Choice,
    pub thal: Choice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub page: PageId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<LocaleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_history_on_logout: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleStatus {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Snapshot of a session handed to the render layer after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub authenticated: bool,
    pub identity: String,
    pub current_page: PageId,
    pub reachable_pages: Vec<PageId>,
    pub preferences: Preferences,
    pub clear_history_on_logout: bool,
    pub pending_reset: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<PredictionRecord>,
    pub history_len: usize,
    pub oracle_status: OracleStatus,
}
