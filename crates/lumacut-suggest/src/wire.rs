// crates/lumacut-suggest/src/wire.rs
//
// Response envelope of the suggestion endpoint:
//   success → { "success": true, "result": {...}, "action": "enhance" }
//   failure → { "error": "..." }   with status 429 / 402 / 400 / 500

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result:  Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action:  Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

impl ResponseEnvelope {
    pub fn ok(result: Value, action: &str) -> Self {
        Self {
            success: Some(true),
            result:  Some(result),
            action:  Some(action.to_string()),
            error:   None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Default::default() }
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    pub fn to_json(&self) -> String {
        // A struct of Options over Value always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
