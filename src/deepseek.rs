//! DeepSeek API related types.
//!
//! This module contains the subset of the (OpenAI-compatible) chat completions API that the
//! client uses.

use serde::{Deserialize, Serialize};

/// Default API endpoint host to use.
pub const DEFAULT_ENDPOINT_HOST: &str = "api.deepseek.com";

/// Path of the chat completions endpoint.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Default model to use for requests.
pub const DEFAULT_MODEL: &str = "deepseek-reasoner";

/// The body of a request to the chat completions endpoint.
///
/// Usually it is better to use [`crate::ChatRequestBuilder`] instead.
#[derive(Debug, Serialize)]
pub struct ChatBody<'a> {
    /// The model to use for the request.
    pub model: &'a str,
    /// The full conversation, in order.
    pub messages: &'a im::Vector<Message>,
}

/// A role in a conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Message from the user.
    User,
    /// Message from the model.
    Assistant,
}

/// A single turn in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Convenience function to construct a message.
    pub fn from_text<S: Into<String>>(role: Role, text: S) -> Self {
        Self {
            role,
            content: text.into(),
        }
    }
}

/// A successful response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message contained in a [`Choice`].
///
/// Unlike [`Message`], content may be absent and reasoning models attach their chain of thought
/// separately.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// DeepSeek API error, as returned in the body of non-success responses.
#[derive(Clone, Debug, thiserror::Error, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ApiError,
}

/// Deserializes a successful chat completions response from JSON.
pub fn deserialize_response(json: &str) -> Result<ChatResponse, serde_json::Error> {
    serde_json::from_str(json)
}

/// Extracts the API error from the body of a failed request, if it contains one.
pub fn deserialize_error(json: &str) -> Option<ApiError> {
    serde_json::from_str::<ErrorBody>(json)
        .ok()
        .map(|body| body.error)
}

#[cfg(test)]
mod tests {
    use super::{Role, deserialize_error, deserialize_response};

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
  "id": "930c60df-bf64-41c9-a88e-3ec75f81e00e",
  "object": "chat.completion",
  "created": 1705651092,
  "model": "deepseek-reasoner",
  "choices": [
    {
      "index": 0,
      "message": {
        "role": "assistant",
        "content": "Hello! How can I help you today?",
        "reasoning_content": "The user greeted me."
      },
      "logprobs": null,
      "finish_reason": "stop"
    }
  ],
  "usage": {
    "prompt_tokens": 16,
    "completion_tokens": 10,
    "total_tokens": 26
  }
}"#;

        let response = deserialize_response(json).expect("should deserialize response");

        assert_eq!(response.model.as_deref(), Some("deepseek-reasoner"));
        assert_eq!(response.choices.len(), 1);
        let choice = &response.choices[0];
        assert_eq!(
            choice.message.content.as_deref(),
            Some("Hello! How can I help you today?")
        );
        assert_eq!(
            choice.message.reasoning_content.as_deref(),
            Some("The user greeted me.")
        );
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
        let usage = response.usage.expect("should have usage");
        assert_eq!(usage.prompt_tokens, 16);
        assert_eq!(usage.total_tokens, 26);
    }

    #[test]
    fn test_error_deserialization() {
        let json = r#"{
  "error": {
    "message": "Authentication Fails (no such user)",
    "type": "authentication_error",
    "param": null,
    "code": "invalid_request_error"
  }
}"#;

        let error = deserialize_error(json).expect("should contain an api error");
        assert_eq!(error.message, "Authentication Fails (no such user)");
        assert_eq!(error.kind.as_deref(), Some("authentication_error"));

        assert!(deserialize_error("<html>Bad Gateway</html>").is_none());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
