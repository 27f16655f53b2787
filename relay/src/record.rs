//! The row appended for each submission.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Utc;

use crate::client_info::ClientInfo;

/// Longest user agent stored, in characters.
pub const MAX_USER_AGENT_CHARS: usize = 200;

const TIMESTAMP_FORMAT: &str = "%H:%M:%S %-d/%-m/%Y";

/// Columns A..E of the responses sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub timestamp: String,
    pub choice: String,
    pub feedback: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl SheetRow {
    pub fn new(
        now: DateTime<Utc>,
        offset: FixedOffset,
        choice: &str,
        feedback: Option<&str>,
        client: &ClientInfo,
    ) -> Self {
        Self {
            timestamp: format_timestamp(now, offset),
            choice: choice.to_string(),
            feedback: feedback.unwrap_or_default().to_string(),
            client_ip: client.ip.clone(),
            user_agent: client.user_agent.chars().take(MAX_USER_AGENT_CHARS).collect(),
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.choice.clone(),
            self.feedback.clone(),
            self.client_ip.clone(),
            self.user_agent.clone(),
        ]
    }
}

/// `HH:MM:SS D/M/YYYY` in the given offset, no zero padding on day/month.
pub fn format_timestamp(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string()
}
