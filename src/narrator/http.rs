//! OpenAI-compatible chat-completions narrator over sync HTTP (ureq).
//!
//! Works against hosted endpoints and local servers such as Ollama or
//! llama.cpp. The agent is built once and reused for every call; dropping
//! the narrator releases its connection pool.

use super::{Narrator, NarratorError, SYSTEM_PROMPT};
use crate::types::config::NarratorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct HttpNarrator {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: f32,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpNarrator {
    pub fn from_config(config: &NarratorConfig) -> Result<Self, NarratorError> {
        let api_key = match &config.api_key_env {
            Some(env_var) => Some(
                std::env::var(env_var)
                    .map_err(|_| NarratorError::MissingApiKey(env_var.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            agent: make_agent(Duration::from_secs(config.timeout_secs)),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Narrator for HttpNarrator {
    fn narrate(&self, prompt: &str) -> Result<String, NarratorError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting narration");
        let mut req = self
            .agent
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            req = req.header("Authorization", &format!("Bearer {api_key}"));
        }

        let response = req.send_json(&body).map_err(|e| match e {
            ureq::Error::Timeout(_) => NarratorError::Timeout,
            other => NarratorError::Request(other.to_string()),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(NarratorError::Api { status, message });
        }

        let resp: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|e| NarratorError::Parse(e.to_string()))?;

        resp.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| NarratorError::Parse("no response choices".to_string()))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Accepts one connection, replies with `reply` as a JSON body and returns
    /// the raw request head (lowercased) plus its body.
    fn serve_once(reply: &'static str) -> (String, thread::JoinHandle<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("client should connect");
            let mut reader = BufReader::new(stream.try_clone().expect("stream should clone"));

            let mut head = String::new();
            let mut content_length = None;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line should read");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse::<usize>().ok();
                }
                if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
                    chunked = true;
                }
                head.push_str(&lower);
            }

            let mut body = Vec::new();
            if chunked {
                loop {
                    let mut size_line = String::new();
                    reader.read_line(&mut size_line).expect("chunk size should read");
                    let size = usize::from_str_radix(size_line.trim(), 16)
                        .expect("chunk size should be hex");
                    let mut chunk = vec![0; size + 2];
                    reader.read_exact(&mut chunk).expect("chunk should read");
                    if size == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..size]);
                }
            } else {
                body.resize(content_length.unwrap_or(0), 0);
                reader.read_exact(&mut body).expect("body should read");
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            stream
                .write_all(response.as_bytes())
                .expect("response should write");
            (head, String::from_utf8(body).expect("body should be utf-8"))
        });
        (format!("http://{addr}/v1/chat/completions"), handle)
    }

    #[test]
    fn narrate_posts_chat_request_and_returns_first_choice() {
        let (endpoint, server) = serve_once(
            r#"{"choices":[{"message":{"role":"assistant","content":"Reentrancy vulnerability in withdraw"}}]}"#,
        );
        let config = NarratorConfig {
            endpoint,
            model: "auditor".to_string(),
            max_tokens: 64,
            timeout_secs: 5,
            ..NarratorConfig::default()
        };
        let mut narrator = HttpNarrator::from_config(&config).expect("narrator should build");
        narrator.api_key = Some("test-key".to_string());

        let narration = narrator
            .narrate("Contract to analyze:\ncontract A {}")
            .expect("narration should succeed");
        assert_eq!(narration, "Reentrancy vulnerability in withdraw");

        let (head, body) = server.join().expect("server thread should finish");
        assert!(head.starts_with("post /v1/chat/completions"));
        assert!(head.contains("authorization: bearer test-key"));

        let request: serde_json::Value =
            serde_json::from_str(&body).expect("request body should be JSON");
        assert_eq!(request["model"], "auditor");
        assert_eq!(request["max_tokens"], 64);
        assert_eq!(request["messages"][0]["role"], "system");
        assert_eq!(request["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(request["messages"][1]["role"], "user");
        assert_eq!(
            request["messages"][1]["content"],
            "Contract to analyze:\ncontract A {}"
        );
    }

    #[test]
    fn from_config_requires_configured_api_key_env() {
        let config = NarratorConfig {
            api_key_env: Some("GUARDFI_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..NarratorConfig::default()
        };
        let err = HttpNarrator::from_config(&config)
            .err()
            .expect("missing key should fail");
        assert!(matches!(err, NarratorError::MissingApiKey(_)));
    }

    #[test]
    fn from_config_without_key_uses_configured_model() {
        let config = NarratorConfig {
            model: "auditor".to_string(),
            ..NarratorConfig::default()
        };
        let narrator = HttpNarrator::from_config(&config).expect("narrator should build");
        assert_eq!(narrator.model(), "auditor");
    }

    #[test]
    fn unreachable_endpoint_is_an_error_not_a_panic() {
        let config = NarratorConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            timeout_secs: 2,
            ..NarratorConfig::default()
        };
        let narrator = HttpNarrator::from_config(&config).expect("narrator should build");
        assert!(narrator.narrate("Contract to analyze:\n").is_err());
    }

    #[test]
    fn chat_response_parses_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Risk: low"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).expect("response should parse");
        assert_eq!(resp.choices[0].message.content, "Risk: low");
    }
}
