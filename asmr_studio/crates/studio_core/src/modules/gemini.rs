use crate::modules::cleaner::extract_json_like;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gemini request failed: status={status} body={body}")]
    BadStatus { status: StatusCode, body: String },
    #[error("gemini auth error: {0}")]
    Auth(String),
    #[error("gemini response parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL` and
    /// `GEMINI_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let api_key = non_empty_env("GEMINI_API_KEY");
        let model = non_empty_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            non_empty_env("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = http_timeout_for_model(&model);
        Self {
            api_key,
            model,
            base_url,
            timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.timeout = http_timeout_for_model(&self.model);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn http_timeout_for_model(model: &str) -> Duration {
    let env = std::env::var("GEMINI_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok());

    let default_secs = if model.to_ascii_lowercase().contains("pro") {
        120
    } else {
        60
    };

    let secs = env.unwrap_or(default_secs).clamp(15, 300);
    Duration::from_secs(secs)
}

/// Image bytes sent inline with a request.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Guesses the mime type from the file extension; defaults to JPEG.
    pub fn from_path_bytes(path: &std::path::Path, data: Vec<u8>) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            _ => "image/jpeg",
        };
        Self {
            mime_type: mime_type.to_string(),
            data,
        }
    }
}

pub fn build_payload(prompt: &str, image: Option<&InlineImage>, generation_config: Option<Value>) -> Value {
    let mut parts = Vec::new();
    if let Some(img) = image {
        parts.push(json!({
            "inlineData": {
                "mimeType": img.mime_type,
                "data": STANDARD.encode(&img.data),
            }
        }));
    }
    parts.push(json!({ "text": prompt }));

    let mut payload = json!({
        "contents": [
            { "role": "user", "parts": parts }
        ]
    });
    if let Some(cfg) = generation_config {
        payload["generationConfig"] = cfg;
    }
    payload
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.is_none() {
            return Err(GeminiError::Auth("missing GEMINI_API_KEY".to_string()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Structured call. `schema` goes out as `responseSchema`; endpoints that
    /// reject it get one retry with only the JSON mime type.
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: Option<Value>,
        image: Option<&InlineImage>,
    ) -> Result<Value, GeminiError> {
        let plain = build_payload(
            prompt,
            image,
            Some(json!({ "responseMimeType": "application/json" })),
        );
        let with_schema = schema.map(|s| {
            build_payload(
                prompt,
                image,
                Some(json!({
                    "responseMimeType": "application/json",
                    "responseSchema": s,
                })),
            )
        });

        let body = match &with_schema {
            Some(first) => self.post(first, Some(&plain)).await?,
            None => self.post(&plain, None).await?,
        };
        let text = extract_candidate_text(&body).map_err(GeminiError::Parse)?;
        parse_json_text(&text).map_err(GeminiError::Parse)
    }

    pub async fn generate_text(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GeminiError> {
        let payload = build_payload(prompt, image, None);
        let body = self.post(&payload, None).await?;
        extract_candidate_text(&body).map_err(GeminiError::Parse)
    }

    async fn post(&self, payload: &Value, fallback: Option<&Value>) -> Result<String, GeminiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GeminiError::Auth("missing GEMINI_API_KEY".to_string()))?;
        // Key goes in a header, never the URL: transport errors echo the URL.
        let url = self.config.endpoint();

        let mut current = payload;
        let mut fallback = fallback;
        let mut attempt = 1;
        let mut backoff = Duration::from_millis(500);
        loop {
            tracing::debug!(model = %self.config.model, attempt, "gemini generateContent");
            let resp = self
                .http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(current)
                .send()
                .await?;
            if resp.status().is_success() {
                return Ok(resp.text().await?);
            }

            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(GeminiError::Auth(format!("status={status} body={body}")));
            }

            // Some endpoints reject schema fields; resend once without the schema.
            // The resend does not use up an attempt.
            if status == StatusCode::BAD_REQUEST && body.to_ascii_lowercase().contains("unknown") {
                if let Some(next) = fallback.take() {
                    tracing::warn!("gemini rejected responseSchema, retrying without it");
                    current = next;
                    continue;
                }
            }

            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if !retryable || attempt >= MAX_ATTEMPTS {
                return Err(GeminiError::BadStatus { status, body });
            }
            tracing::warn!(%status, attempt, "gemini request failed, backing off");
            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(Duration::from_secs(5));
            attempt += 1;
        }
    }
}

pub fn extract_candidate_text(body: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct Envelope {
        candidates: Option<Vec<Candidate>>,
    }
    #[derive(Deserialize)]
    struct Candidate {
        content: Option<Content>,
    }
    #[derive(Deserialize)]
    struct Content {
        parts: Option<Vec<Part>>,
    }
    #[derive(Deserialize)]
    struct Part {
        text: Option<String>,
    }

    let env: Envelope = serde_json::from_str(body).map_err(|e| format!("{e}: {body}"))?;
    let texts: Vec<String> = env
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .map(|parts| parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        return Err(format!("missing candidates.content.parts.text: {body}"));
    }
    Ok(texts.concat())
}

fn parse_json_text(text: &str) -> Result<Value, String> {
    let extracted = extract_json_like(text).unwrap_or(text);
    serde_json::from_str(extracted).map_err(|e| format!("{e}: {extracted}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(extract_candidate_text(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn candidate_text_missing_is_error() {
        assert!(extract_candidate_text(r#"{"candidates":[]}"#).is_err());
        assert!(extract_candidate_text(r#"{"promptFeedback":{}}"#).is_err());
        assert!(extract_candidate_text("not json").is_err());
    }

    #[test]
    fn json_text_tolerates_fences() {
        let v = parse_json_text("```json\n{\"title\":\"t\"}\n```").unwrap();
        assert_eq!(v["title"], "t");
        assert!(parse_json_text("nothing").is_err());
    }

    #[test]
    fn payload_puts_image_before_text() {
        let img = InlineImage {
            mime_type: "image/png".into(),
            data: b"abc".to_vec(),
        };
        let p = build_payload("describe", Some(&img), Some(json!({"responseMimeType": "application/json"})));
        let parts = p["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], "describe");
        assert_eq!(p["generationConfig"]["responseMimeType"], "application/json");

        let p = build_payload("hi", None, None);
        assert!(p.get("generationConfig").is_none());
    }

    #[test]
    fn mime_from_extension() {
        let img = InlineImage::from_path_bytes(std::path::Path::new("a/b/SCENE.PNG"), vec![]);
        assert_eq!(img.mime_type, "image/png");
        let img = InlineImage::from_path_bytes(std::path::Path::new("noext"), vec![]);
        assert_eq!(img.mime_type, "image/jpeg");
    }

    #[test]
    fn client_requires_api_key() {
        let cfg = GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(15),
        };
        assert!(matches!(GeminiClient::new(cfg), Err(GeminiError::Auth(_))));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let cfg = GeminiConfig {
            api_key: Some("k".into()),
            model: "gemini-2.5-flash".into(),
            base_url: "http://localhost:8080/v1beta/".into(),
            timeout: Duration::from_secs(15),
        };
        assert_eq!(
            cfg.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    /// Serves one canned `(status, body)` reply per connection and returns the
    /// raw requests it received.
    async fn serve(
        replies: Vec<(u16, String)>,
    ) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let (mut sock, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = sock.read(&mut chunk).await.unwrap();
                    buf.extend_from_slice(&chunk[..n]);
                    let text = String::from_utf8_lossy(&buf);
                    let complete = text.find("\r\n\r\n").is_some_and(|head_end| {
                        let len = text[..head_end]
                            .lines()
                            .find_map(|l| {
                                l.to_ascii_lowercase()
                                    .strip_prefix("content-length:")
                                    .and_then(|v| v.trim().parse::<usize>().ok())
                            })
                            .unwrap_or(0);
                        buf.len() >= head_end + 4 + len
                    });
                    if complete || n == 0 {
                        break;
                    }
                }
                seen.push(String::from_utf8_lossy(&buf).into_owned());
                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                sock.write_all(reply.as_bytes()).await.unwrap();
                sock.shutdown().await.ok();
            }
            seen
        });
        (base_url, handle)
    }

    fn local_client(base_url: String) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: Some("local-test-key".into()),
            model: "gemini-2.5-flash".into(),
            base_url,
            timeout: Duration::from_secs(15),
        })
        .unwrap()
    }

    const OK_BODY: &str = r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":\"Rain\"}"}]}}]}"#;

    #[tokio::test]
    async fn schema_fallback_after_backoff_still_gets_sent() {
        let (base_url, server) = serve(vec![
            (429, "{}".into()),
            (429, "{}".into()),
            (400, r#"{"error":{"message":"Unknown name \"responseSchema\""}}"#.into()),
            (200, OK_BODY.into()),
        ])
        .await;

        let v = local_client(base_url)
            .generate_json("describe rain", Some(json!({"type": "OBJECT"})), None)
            .await
            .unwrap();
        assert_eq!(v["title"], "Rain");

        let seen = server.await.unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen[0].contains("responseSchema"));
        assert!(!seen[3].contains("responseSchema"));
        for request in &seen {
            assert!(request.contains("x-goog-api-key: local-test-key"));
            let request_line = request.lines().next().unwrap();
            assert!(!request_line.contains("local-test-key"), "{request_line}");
        }
    }

    #[tokio::test]
    async fn persistent_rate_limit_is_a_status_error() {
        let (base_url, server) = serve(vec![
            (429, "slow down".into()),
            (429, "slow down".into()),
            (429, "slow down".into()),
        ])
        .await;

        let err = local_client(base_url)
            .generate_text("hi", None)
            .await
            .unwrap_err();
        match err {
            GeminiError::BadStatus { status, body } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(server.await.unwrap().len(), 3);
    }
}
