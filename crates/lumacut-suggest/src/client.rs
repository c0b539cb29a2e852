// crates/lumacut-suggest/src/client.rs
//
// SuggestClient: one request → one response. No retry, no cache, no
// coalescing. Preconditions are checked before the transport is touched, so
// an invalid request never reaches the network.

use std::time::Duration;

use lumacut_core::suggestion::{self, ActionKind, RemoteSuggestion, SuggestError, SuggestPayload, SuggestRequest};

use crate::transport::{HttpReply, Transport, UreqTransport};
use crate::wire::ResponseEnvelope;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8888/api/ai-suggest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestConfig {
    pub endpoint: String,
    pub timeout:  Duration,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

pub struct SuggestClient<T: Transport = UreqTransport> {
    config:    SuggestConfig,
    transport: T,
}

impl SuggestClient<UreqTransport> {
    pub fn new(config: SuggestConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl<T: Transport> SuggestClient<T> {
    pub fn with_transport(config: SuggestConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SuggestConfig { &self.config }

    pub fn request_suggestion(
        &self,
        action:  ActionKind,
        payload: &SuggestPayload,
    ) -> Result<RemoteSuggestion, SuggestError> {
        suggestion::validate(action, payload)?;

        let body = serde_json::to_string(&SuggestRequest::new(action, payload))
            .map_err(|e| SuggestError::Malformed(format!("encoding request: {e}")))?;

        log::info!("[suggest] POST {} action={action}", self.config.endpoint);
        let reply = self
            .transport
            .post_json(&self.config.endpoint, &[], &body)
            .map_err(|e| {
                log::warn!("[suggest] transport failure: {e}");
                SuggestError::Unreachable(e.0)
            })?;

        parse_reply(reply)
    }
}

#[cfg(test)]
impl SuggestClient<crate::transport::scripted::ScriptedTransport> {
    pub(crate) fn transport_calls(&self) -> usize {
        self.transport.call_count()
    }
}

/// Map an HTTP reply from the suggestion endpoint to a suggestion or error.
pub fn parse_reply(reply: HttpReply) -> Result<RemoteSuggestion, SuggestError> {
    match reply.status {
        429 => Err(SuggestError::RateLimited),
        402 => Err(SuggestError::QuotaExhausted),
        200..=299 => {
            let env: ResponseEnvelope = serde_json::from_str(&reply.body)
                .map_err(|e| SuggestError::Malformed(format!("response is not JSON: {e}")))?;
            if !env.is_success() {
                return Err(SuggestError::Unknown {
                    status:  reply.status,
                    message: env.error.unwrap_or_else(|| "request was not successful".into()),
                });
            }
            let result = env
                .result
                .ok_or_else(|| SuggestError::Malformed("response has no result".into()))?;
            let sug = RemoteSuggestion::from_json_value(&result)?;
            if sug.raw {
                log::warn!("[suggest] upstream text was not JSON; description only");
            }
            Ok(sug)
        }
        status => {
            let message = serde_json::from_str::<ResponseEnvelope>(&reply.body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| reply.body.chars().take(200).collect());
            Err(SuggestError::Unknown { status, message })
        }
    }
}
