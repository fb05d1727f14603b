#![doc = include_str!("../README.md")]

pub mod chat;
pub mod client;
pub mod config;
pub mod deepseek;
pub mod http_request;
pub mod keys;
pub mod render;
pub mod terminal;
pub mod transcript;

use std::{io, sync::Arc};

use deepseek::{ChatBody, Message};
use http_request::HttpRequest;

pub use client::{Client, Completer, RequestError};
pub use deepseek::Role;
pub use transcript::Transcript;

/// A DeepSeek API configuration.
#[derive(Clone, Debug)]
pub struct Api {
    /// The DeepSeek API key.
    api_key: Arc<str>,
    /// The model to use for requests.
    model: Arc<str>,
    /// The API endpoint host (without protocol or path).
    endpoint_host: Arc<str>,
    /// Whether requests go over HTTPS.
    tls: bool,
}

impl Api {
    /// Creates a new DeepSeek API instance.
    ///
    /// Requires a valid DeepSeek API key.
    pub fn new<S: Into<Arc<str>>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: Arc::from(deepseek::DEFAULT_MODEL),
            endpoint_host: Arc::from(deepseek::DEFAULT_ENDPOINT_HOST),
            tls: true,
        }
    }

    /// Sets the model for requests.
    ///
    /// If not set, [`deepseek::DEFAULT_MODEL`] will be used.
    pub fn model<S: Into<Arc<str>>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API endpoint host.
    ///
    /// If not set, [`deepseek::DEFAULT_ENDPOINT_HOST`] will be used.
    pub fn endpoint_host<S: Into<Arc<str>>>(mut self, endpoint_host: S) -> Self {
        self.endpoint_host = endpoint_host.into();
        self
    }

    /// Enables or disables TLS.
    ///
    /// Enabled by default. Only plain-HTTP endpoints such as a local proxy need it off.
    pub fn use_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Returns the configured model.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Creates the required headers for any API request.
    fn create_default_headers(&self) -> Vec<(&'static str, Arc<str>)> {
        vec![
            ("content-type", Arc::from("application/json")),
            (
                "authorization",
                Arc::from(format!("Bearer {}", self.api_key)),
            ),
        ]
    }
}

/// Builder for a single chat completion request.
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    /// The model to use for the request.
    ///
    /// If none is provided, the model configured on the [`Api`] will be used.
    model: Option<String>,
    /// The messages to send.
    messages: im::Vector<Message>,
}

impl ChatRequestBuilder {
    /// Creates a new chat request builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model for the request.
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Appends a message to the request.
    pub fn push(mut self, message: Message) -> Self {
        self.messages.push_back(message);
        self
    }

    /// Constructs and appends a message to the request.
    pub fn push_message<S: Into<String>>(self, role: Role, text: S) -> Self {
        self.push(Message::from_text(role, text))
    }

    /// Replace all messages in the request with given messages.
    pub fn set_messages(mut self, messages: im::Vector<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Builds the HTTP request.
    pub fn build(&self, api: &Api) -> Result<HttpRequest, serde_json::Error> {
        let model = self.model.as_deref().unwrap_or(&*api.model);

        let body = serde_json::to_string(&ChatBody {
            model,
            messages: &self.messages,
        })?;

        Ok(HttpRequest {
            scheme: if api.tls { "https" } else { "http" },
            host: api.endpoint_host.to_string(),
            path: deepseek::CHAT_COMPLETIONS_PATH.to_string(),
            method: reqwest::Method::POST,
            headers: api.create_default_headers(),
            body,
        })
    }
}

/// A fatal error, ending the chat session.
///
/// Failures of individual completions are reported as [`RequestError`] and are recovered from
/// by the conversation loop; they only show up here when surfaced outside of it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not found in environment or .env file")]
    MissingCredential(&'static str),
    #[error("failed to initialize HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Request(#[from] RequestError),
}
