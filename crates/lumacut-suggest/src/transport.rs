// crates/lumacut-suggest/src/transport.rs
//
// A single JSON POST. The client and the gateway both go through `Transport`
// so tests can script replies instead of opening sockets.
//
// Non-2xx statuses are returned as values (`HttpReply.status`); only
// connection-level failures become `TransportError`.

use std::time::Duration;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body:   String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

pub trait Transport: Send + Sync {
    /// POST `body` as `application/json` with extra `headers`.
    fn post_json(
        &self,
        url:     &str,
        headers: &[(&str, &str)],
        body:    &str,
    ) -> Result<HttpReply, TransportError>;
}

/// Blocking HTTP via `ureq`. Cheap to clone (the agent is reference-counted).
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn post_json(
        &self,
        url:     &str,
        headers: &[(&str, &str)],
        body:    &str,
    ) -> Result<HttpReply, TransportError> {
        let mut req = self.agent.post(url).header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let mut resp = req
            .send(body.as_bytes())
            .map_err(|e| TransportError(format!("POST {url}: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(format!("reading response from {url}: {e}")))?;

        Ok(HttpReply { status, body })
    }
}

// ── Test double ───────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays queued replies in order and records every call.
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies:   Mutex<VecDeque<Result<HttpReply, TransportError>>>,
        pub calls: Mutex<Vec<(String, Vec<(String, String)>, String)>>,
    }

    impl ScriptedTransport {
        pub fn replying(replies: Vec<Result<HttpReply, TransportError>>) -> Self {
            Self { replies: Mutex::new(replies.into()), calls: Mutex::new(Vec::new()) }
        }

        pub fn ok(status: u16, body: &str) -> Result<HttpReply, TransportError> {
            Ok(HttpReply { status, body: body.to_string() })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl Transport for ScriptedTransport {
        fn post_json(
            &self,
            url:     &str,
            headers: &[(&str, &str)],
            body:    &str,
        ) -> Result<HttpReply, TransportError> {
            self.calls.lock().push((
                url.to_string(),
                headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                body.to_string(),
            ));
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("no scripted reply left".into())))
        }
    }
}
