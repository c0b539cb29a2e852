// crates/lumacut-core/src/notify.rs
//
// User-visible notifications. Every completed user action and every failure
// produces exactly one of these; the front end decides how to show it
// (toast, status line, stderr).

use serde::{Deserialize, Serialize};

use crate::media::MediaError;
use crate::suggestion::SuggestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level:   Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: Level::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl From<&SuggestError> for Notification {
    fn from(e: &SuggestError) -> Self {
        Notification::error(e.to_string())
    }
}

impl From<&MediaError> for Notification {
    fn from(e: &MediaError) -> Self {
        Notification::error(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_become_plain_language_messages() {
        let n = Notification::from(&SuggestError::RateLimited);
        assert!(n.is_error());
        assert_eq!(n.message, "rate limit exceeded, please try again later");

        let n = Notification::from(&MediaError::Empty { name: "a.png".into() });
        assert_eq!(n.message, "a.png is empty");
    }
}
