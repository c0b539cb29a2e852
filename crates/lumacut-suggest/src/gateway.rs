// crates/lumacut-suggest/src/gateway.rs
//
// Server side of the suggestion endpoint. Turns `{ action, prompt?,
// frameBase64? }` into a multimodal chat-completions call, pulls the JSON
// object out of the model's reply and answers with the response envelope.
//
// `handle` is transport-agnostic: it takes a method + body and returns a
// status, headers and body, so any HTTP front end (or the CLI's stdin/stdout
// mode) can host it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use lumacut_core::suggestion::{ActionKind, SuggestPayload, SuggestRequest};

use crate::transport::Transport;
use crate::wire::ResponseEnvelope;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL:        &str = "gpt-4o-mini";

/// Sent on every response, including errors and preflight.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin",  "*"),
    ("Access-Control-Allow-Headers", "authorization, x-client-info, apikey, content-type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

const RATE_LIMIT_MSG: &str = "Rate limit exceeded. Please try again in a moment.";
const QUOTA_MSG:      &str = "AI usage limit reached. Please add credits to continue.";

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    #[default]
    Image,
    Video,
}

impl GatewayKind {
    fn subject(self) -> &'static str {
        match self {
            GatewayKind::Image => "image",
            GatewayKind::Video => "video frame",
        }
    }
}

impl std::str::FromStr for GatewayKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(GatewayKind::Image),
            "video" => Ok(GatewayKind::Video),
            other   => Err(format!("unknown gateway kind \"{other}\" (expected image or video)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub upstream_url: String,
    pub model:        String,
    pub api_key:      Option<String>,
    pub kind:         GatewayKind,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            model:        DEFAULT_MODEL.to_string(),
            api_key:      None,
            kind:         GatewayKind::default(),
        }
    }
}

// ── Request / response ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: String,
    pub body:   String,
}

impl GatewayRequest {
    pub fn post(body: impl Into<String>) -> Self {
        Self { method: "POST".into(), body: body.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status:  u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body:    String,
}

impl GatewayResponse {
    fn new(status: u16, body: String) -> Self {
        let mut headers = CORS_HEADERS.to_vec();
        if !body.is_empty() {
            headers.push(("Content-Type", "application/json"));
        }
        Self { status, headers, body }
    }

    fn json(status: u16, env: &ResponseEnvelope) -> Self {
        Self::new(status, env.to_json())
    }

    fn error(status: u16, message: &str) -> Self {
        log::warn!("[gateway] {status}: {message}");
        Self::json(status, &ResponseEnvelope::error(message))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

// ── Prompts ───────────────────────────────────────────────────────────────────

const SYSTEM_PROMPT: &str = "You are a professional photo and video colorist. \
Answer with a single JSON object inside a ```json code block and nothing else.";

const FIELDS_HINT: &str = "Use these keys when suggesting adjustments: \
brightness (0-200, 100 = unchanged), contrast (0-200, 100 = unchanged), \
saturation (0-200, 100 = unchanged), hue (0-360 degrees), blur (0-20 pixels), \
sepia (0-100), grayscale (0-100). Always include a short \"description\".";

/// Prompt text sent upstream for `action`. `user_prompt` is only used by the
/// prompt-driven actions.
pub fn prompt_for(kind: GatewayKind, action: ActionKind, user_prompt: Option<&str>) -> String {
    let subject = kind.subject();
    let wish = user_prompt.map(str::trim).filter(|p| !p.is_empty()).unwrap_or("a balanced, natural look");
    match action {
        ActionKind::Enhance => format!(
            "Analyze this {subject} and suggest filter adjustments that enhance it. {FIELDS_HINT}"
        ),
        ActionKind::ColorGrade => format!(
            "Suggest a color grade for this {subject} matching: \"{wish}\". {FIELDS_HINT}"
        ),
        ActionKind::StyleTransfer => format!(
            "Suggest filter values that give this {subject} the following style: \"{wish}\". {FIELDS_HINT}"
        ),
        ActionKind::SceneAnalysis => format!(
            "Describe this {subject}. Return JSON with \"sceneType\", \"lighting\", \"mood\" \
             and \"description\", plus any filter adjustments you recommend. {FIELDS_HINT}"
        ),
        ActionKind::AutoCorrect => format!(
            "Detect exposure, white balance and saturation problems in this {subject} and \
             suggest corrective filter values. {FIELDS_HINT}"
        ),
    }
}

fn upstream_body(config: &GatewayConfig, action: ActionKind, payload: &SuggestPayload) -> Value {
    let text = prompt_for(config.kind, action, payload.prompt.as_deref());
    let mut content = vec![json!({ "type": "text", "text": text })];
    if let Some(frame) = payload.frame.as_ref().filter(|f| !f.is_empty()) {
        content.push(json!({ "type": "image_url", "image_url": { "url": frame.to_data_url() } }));
    }
    json!({
        "model": config.model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user",   "content": content },
        ],
    })
}

// ── JSON extraction ───────────────────────────────────────────────────────────

/// Pull a JSON object out of free model text: the first ```json fenced
/// block if it parses, else the first balanced `{...}`.
///
/// ```
/// use lumacut_suggest::gateway::extract_json;
/// let v = extract_json("Sure!\n```json\n{\"contrast\": 120}\n```").unwrap();
/// assert_eq!(v["contrast"], 120);
/// assert!(extract_json("no json here").is_none());
/// ```
pub fn extract_json(text: &str) -> Option<Value> {
    fenced_block(text)
        .and_then(parse_object)
        .or_else(|| balanced_object(text).and_then(parse_object))
}

fn fenced_block(text: &str) -> Option<&str> {
    const FENCE: &str = "```json";
    let start = text.find(FENCE)? + FENCE.len();
    let rest  = &text[start..];
    let end   = rest.find("```")?;
    Some(rest[..end].trim())
}

fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth   = 0usize;
    let mut in_str  = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if in_str {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_str = false;
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_object(s: &str) -> Option<Value> {
    serde_json::from_str::<Value>(s).ok().filter(Value::is_object)
}

// ── Handler ───────────────────────────────────────────────────────────────────

pub fn handle(config: &GatewayConfig, transport: &dyn Transport, req: &GatewayRequest) -> GatewayResponse {
    if req.method.eq_ignore_ascii_case("OPTIONS") {
        return GatewayResponse::new(200, String::new());
    }
    if !req.method.eq_ignore_ascii_case("POST") {
        return GatewayResponse::error(405, "Method not allowed");
    }

    let parsed: SuggestRequest = match serde_json::from_str(&req.body) {
        Ok(r)  => r,
        Err(e) => return GatewayResponse::error(400, &format!("Invalid request body: {e}")),
    };
    let (action, payload) = match parsed.into_parts() {
        Ok(parts) => parts,
        Err(e)    => return GatewayResponse::error(400, &e.to_string()),
    };

    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return GatewayResponse::error(500, "AI gateway API key is not configured");
    };

    let body = upstream_body(config, action, &payload).to_string();
    let auth = format!("Bearer {api_key}");
    log::info!("[gateway] {} action={action} model={}", config.upstream_url, config.model);

    let reply = match transport.post_json(&config.upstream_url, &[("Authorization", auth.as_str())], &body) {
        Ok(r)  => r,
        Err(e) => return GatewayResponse::error(500, &format!("AI gateway unreachable: {e}")),
    };

    match reply.status {
        429 => return GatewayResponse::error(429, RATE_LIMIT_MSG),
        402 => return GatewayResponse::error(402, QUOTA_MSG),
        200..=299 => {}
        status => {
            log::warn!("[gateway] upstream {status}: {}", reply.body.chars().take(200).collect::<String>());
            return GatewayResponse::error(500, "AI gateway error");
        }
    }

    let Some(text) = serde_json::from_str::<Value>(&reply.body)
        .ok()
        .and_then(|v| v["choices"][0]["message"]["content"].as_str().map(str::to_string))
    else {
        return GatewayResponse::error(500, "AI gateway returned no content");
    };

    let result = extract_json(&text).unwrap_or_else(|| {
        log::warn!("[gateway] model reply had no JSON object; returning raw text");
        json!({ "description": text, "raw": true })
    });

    GatewayResponse::json(200, &ResponseEnvelope::ok(result, action.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::scripted::ScriptedTransport;

    fn config() -> GatewayConfig {
        GatewayConfig { api_key: Some("sk-test".into()), ..Default::default() }
    }

    fn completion(content: &str) -> String {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }).to_string()
    }

    fn body_of(resp: &GatewayResponse) -> Value {
        serde_json::from_str(&resp.body).unwrap()
    }

    #[test]
    fn preflight_is_empty_with_cors() {
        let t = ScriptedTransport::default();
        let resp = handle(&config(), &t, &GatewayRequest { method: "OPTIONS".into(), body: String::new() });
        assert_eq!(resp.status, 200);
        assert!(resp.body.is_empty());
        assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn fenced_json_becomes_success_envelope() {
        let reply = completion("Here you go:\n```json\n{\"brightness\": 110, \"description\": \"Warmer\"}\n```");
        let t = ScriptedTransport::replying(vec![ScriptedTransport::ok(200, &reply)]);
        let req = GatewayRequest::post(r#"{"action":"enhance","frameBase64":"QUJD"}"#);
        let resp = handle(&config(), &t, &req);

        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            body_of(&resp),
            json!({ "success": true, "action": "enhance", "result": { "brightness": 110, "description": "Warmer" } }),
        );

        let calls = t.calls.lock();
        assert_eq!(calls[0].1, vec![("Authorization".to_string(), "Bearer sk-test".to_string())]);
        let sent: Value = serde_json::from_str(&calls[0].2).unwrap();
        assert_eq!(sent["model"], DEFAULT_MODEL);
        assert_eq!(sent["messages"][1]["content"][1]["image_url"]["url"], "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn unparsable_text_falls_back_to_raw() {
        let reply = completion("The scene is a sunny beach.");
        let t = ScriptedTransport::replying(vec![ScriptedTransport::ok(200, &reply)]);
        let req = GatewayRequest::post(r#"{"action":"scene_analysis","frameBase64":"QUJD"}"#);
        let resp = handle(&config(), &t, &req);

        assert_eq!(resp.status, 200);
        assert_eq!(body_of(&resp)["result"], json!({ "description": "The scene is a sunny beach.", "raw": true }));
    }

    #[test]
    fn upstream_limits_are_forwarded() {
        let t = ScriptedTransport::replying(vec![
            ScriptedTransport::ok(429, "{}"),
            ScriptedTransport::ok(402, "{}"),
            ScriptedTransport::ok(503, "{}"),
        ]);
        let req = GatewayRequest::post(r#"{"action":"color_grade","prompt":"teal and orange"}"#);
        assert_eq!(handle(&config(), &t, &req).status, 429);
        assert_eq!(handle(&config(), &t, &req).status, 402);
        let resp = handle(&config(), &t, &req);
        assert_eq!(resp.status, 500);
        assert_eq!(body_of(&resp), json!({ "error": "AI gateway error" }));
    }

    #[test]
    fn invalid_requests_never_reach_upstream() {
        let t = ScriptedTransport::default();
        for body in [
            "not json",
            r#"{"action":"teleport"}"#,
            r#"{"action":"scene_analysis"}"#,
            r#"{"action":"style_transfer","prompt":"   "}"#,
        ] {
            let resp = handle(&config(), &t, &GatewayRequest::post(body));
            assert_eq!(resp.status, 400, "{body}");
            assert!(body_of(&resp)["error"].is_string());
        }
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn non_post_method_is_rejected() {
        let t = ScriptedTransport::default();
        let req = GatewayRequest { method: "GET".into(), body: r#"{"action":"enhance","frameBase64":"QUJD"}"#.into() };
        let resp = handle(&config(), &t, &req);
        assert_eq!(resp.status, 405);
        assert_eq!(body_of(&resp), json!({ "error": "Method not allowed" }));
        assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn missing_key_is_server_error() {
        let t = ScriptedTransport::default();
        let cfg = GatewayConfig::default();
        let resp = handle(&cfg, &t, &GatewayRequest::post(r#"{"action":"enhance","frameBase64":"QUJD"}"#));
        assert_eq!(resp.status, 500);
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn extract_prefers_fence_then_braces() {
        let text = "note {\"a\": 1}\n```json\n{\"b\": 2}\n```";
        assert_eq!(extract_json(text), Some(json!({ "b": 2 })));

        let text = "The values are {\"hue\": 30, \"description\": \"a } brace\"} ok";
        assert_eq!(extract_json(text), Some(json!({ "hue": 30, "description": "a } brace" })));

        assert_eq!(extract_json("```json\nnot json\n``` and {\"c\": 3}"), Some(json!({ "c": 3 })));
        assert_eq!(extract_json("{ unterminated"), None);
    }

    #[test]
    fn prompts_mention_subject_and_wish() {
        let p = prompt_for(GatewayKind::Video, ActionKind::ColorGrade, Some("bleach bypass"));
        assert!(p.contains("video frame"));
        assert!(p.contains("bleach bypass"));
        let p = prompt_for(GatewayKind::Image, ActionKind::Enhance, None);
        assert!(p.contains("image"));
        assert!(p.contains("brightness"));
    }
}
