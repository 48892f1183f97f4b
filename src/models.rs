use rustyline::error::ReadlineError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SYSTEM_PROMPT: &str = "You are an SAP technical expert providing error resolution guidance.";

pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 1024;
pub const TOP_P: f32 = 0.9;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl CompletionRequest {
    /// Builds the two-message conversation asking for a structured analysis
    /// of `description`.
    pub fn for_error(description: &str, model_id: &str) -> Self {
        Self {
            model: model_id.to_string(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(description)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        }
    }
}

fn user_prompt(description: &str) -> String {
    format!(
        "Analyze this SAP error and provide solutions: {description}\n\
         Structure response with:\n\
         1. Error Analysis\n2. Immediate Steps\n\
         3. Transaction Codes\n4. SAP Notes Reference\n\
         5. Preventive Measures\nUse technical markdown formatting."
    )
}

// Providers may omit the role or send `"content": null`.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// What a remote error body told us beyond the status code.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteDetail {
    /// Body was JSON; carries the nested message or "Unknown error".
    Message(String),
    /// Body could not be decoded as JSON.
    Unavailable,
}

impl RemoteDetail {
    pub fn from_body(body: &str) -> Self {
        // Any decodable JSON counts; only {"error": {"message": "<text>"}} yields a message.
        match serde_json::from_str::<Value>(body) {
            Ok(parsed) => RemoteDetail::Message(
                parsed
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
            Err(_) => RemoteDetail::Unavailable,
        }
    }
}

impl std::fmt::Display for RemoteDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteDetail::Message(message) => write!(f, "Details: {}", message),
            RemoteDetail::Unavailable => write!(f, "Additional error details unavailable"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP Error: {status}\n{detail}")]
    Remote { status: u16, detail: RemoteDetail },
    #[error("Request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Terminal error: {0}")]
    Terminal(#[from] clearscreen::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Readline error: {0}")]
    Readline(String),
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Error::Readline(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_has_fixed_generation_parameters() {
        let request = CompletionRequest::for_error("DBIF_RSQL_INVALID_RSQL", "llama3-8b-8192");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["max_tokens"], 1024);
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!((body["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(body["messages"][0], json!({"role": "system", "content": SYSTEM_PROMPT}));
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn user_prompt_embeds_description_and_five_sections() {
        let request = CompletionRequest::for_error("Update termination error", "m");
        let prompt = &request.messages[1].content;

        assert!(prompt.starts_with(
            "Analyze this SAP error and provide solutions: Update termination error\n"
        ));
        for section in [
            "1. Error Analysis",
            "2. Immediate Steps",
            "3. Transaction Codes",
            "4. SAP Notes Reference",
            "5. Preventive Measures",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
        assert!(prompt.ends_with("Use technical markdown formatting."));
    }

    #[test]
    fn remote_detail_reads_nested_message() {
        let detail = RemoteDetail::from_body(r#"{"error": {"message": "bad request"}}"#);
        assert_eq!(detail, RemoteDetail::Message("bad request".into()));
    }

    #[test]
    fn remote_detail_without_message_is_unknown() {
        let detail = RemoteDetail::from_body(r#"{"status": "nope"}"#);
        assert_eq!(detail, RemoteDetail::Message("Unknown error".into()));
    }

    #[test]
    fn remote_detail_for_unexpected_json_shapes_is_unknown() {
        for body in [
            r#"{"error": "bad request"}"#,
            r#"{"error": {"message": 42}}"#,
            r#"{"error": null}"#,
            r#"["bad request"]"#,
            "null",
        ] {
            assert_eq!(
                RemoteDetail::from_body(body),
                RemoteDetail::Message("Unknown error".into()),
                "body {body}"
            );
        }
        let err = CompletionError::Remote {
            status: 400,
            detail: RemoteDetail::from_body(r#"{"error": "bad request"}"#),
        };
        assert_eq!(err.to_string(), "HTTP Error: 400\nDetails: Unknown error");
    }

    #[test]
    fn response_message_tolerates_null_content_and_missing_role() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(parsed.choices[0].message.role, None);
        assert_eq!(parsed.choices[0].message.content, None);
    }

    #[test]
    fn remote_detail_for_non_json_body() {
        assert_eq!(RemoteDetail::from_body("<html>oops</html>"), RemoteDetail::Unavailable);
        let err = CompletionError::Remote {
            status: 502,
            detail: RemoteDetail::Unavailable,
        };
        assert_eq!(err.to_string(), "HTTP Error: 502\nAdditional error details unavailable");
    }
}
