use chrono::Utc;
use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct StandardError {
    pub status: u16,
    pub error: String,
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl StandardError {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
