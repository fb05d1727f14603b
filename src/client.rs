//! Blocking completion client.
//!
//! [`Completer`] is the seam between the conversation loop and the network; [`Client`] is the
//! implementation talking to the DeepSeek API through [`reqwest::blocking`].
//!
//! Each call sends exactly one request. Nothing is retried and requests have no timeout: the
//! reasoning model may take minutes to answer, so the call blocks until the server replies or
//! the connection fails.

use std::{error::Error as _, fmt::Write as _};

use reqwest::StatusCode;

use crate::{Api, Error, Transcript, deepseek};

/// A failed completion request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{}", error_chain(.0))]
    Transport(#[from] reqwest::Error),
    #[error("{status} for url ({url}): {message}")]
    Status {
        status: StatusCode,
        url: String,
        message: String,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no choices")]
    NoChoices,
}

/// Formats an error followed by each of its causes, separated by `: `.
///
/// reqwest's own message only names the failed URL; the reason sits further down the chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }
    message
}

/// Something that can answer a transcript.
pub trait Completer {
    /// Requests the assistant's reply to the full `transcript`.
    fn complete(&self, transcript: &Transcript) -> Result<String, RequestError>;
}

impl<C: Completer + ?Sized> Completer for &C {
    fn complete(&self, transcript: &Transcript) -> Result<String, RequestError> {
        (**self).complete(transcript)
    }
}

/// Completion client for the DeepSeek chat completions endpoint.
#[derive(Debug)]
pub struct Client {
    api: Api,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Creates a new client whose requests never time out.
    ///
    /// reqwest's blocking client gives up after 30 seconds unless told otherwise.
    pub fn new(api: Api) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self::with_http_client(api, http))
    }

    /// Creates a new client using the given HTTP client.
    pub fn with_http_client(api: Api, http: reqwest::blocking::Client) -> Self {
        Self { api, http }
    }
}

impl Completer for Client {
    fn complete(&self, transcript: &Transcript) -> Result<String, RequestError> {
        let http_req = transcript.request(&self.api)?;
        let url = http_req.url();

        tracing::debug!(
            model = self.api.model_name(),
            turns = transcript.len(),
            %url,
            "requesting completion"
        );
        tracing::trace!(request = %http_req, "outgoing request");

        let response = http_req.into_reqwest_blocking(&self.http).send()?;
        let status = response.status();
        tracing::debug!(%status, "received response");

        let body = response.text()?;
        reply_from_response(status, &url, &body)
    }
}

/// Extracts the reply text from a raw response.
///
/// Non-success statuses become [`RequestError::Status`], preferring the API's own error message
/// over the raw body.
pub fn reply_from_response(
    status: StatusCode,
    url: &str,
    body: &str,
) -> Result<String, RequestError> {
    if !status.is_success() {
        let message = match deepseek::deserialize_error(body) {
            Some(api_error) => api_error.message,
            None => body.trim().to_owned(),
        };
        return Err(RequestError::Status {
            status,
            url: url.to_owned(),
            message,
        });
    }

    let response = deepseek::deserialize_response(body)?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "token usage"
        );
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(RequestError::NoChoices)?;

    if let Some(reasoning) = &choice.message.reasoning_content {
        tracing::debug!(%reasoning, "model reasoning");
    }

    Ok(choice.message.content.unwrap_or_default())
}
