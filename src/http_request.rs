//! Abstract HTTP request.
//!
//! The [`HttpRequest`] type represents an HTTP request that should be sent to the DeepSeek API,
//! built without performing any I/O. [`HttpRequest::into_reqwest_blocking`] hands it to a
//! [`reqwest::blocking::Client`].

use std::{fmt, sync::Arc};

/// Headers whose values are never printed.
const REDACTED_HEADERS: &[&str] = &["authorization"];

/// HTTP request encapsulation.
///
/// Supports pretty-printing the request as a string (through the [`std::fmt::Display`] trait),
/// with credentials redacted.
#[derive(Debug)]
pub struct HttpRequest {
    /// URL scheme, `https` unless TLS was turned off on the [`crate::Api`].
    pub scheme: &'static str,
    /// Request host.
    pub host: String,
    /// Request path.
    pub path: String,
    /// HTTP method.
    pub method: reqwest::Method,
    /// Request headers.
    pub headers: Vec<(&'static str, Arc<str>)>,
    /// Request body.
    pub body: String,
}

impl HttpRequest {
    /// Returns the full URL of the request.
    pub fn url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.path)
    }

    /// Converts this [`HttpRequest`] into a [`reqwest::blocking::RequestBuilder`] using the
    /// provided client.
    ///
    /// Invalid header values are reported by reqwest once the request is sent.
    pub fn into_reqwest_blocking(
        self,
        client: &reqwest::blocking::Client,
    ) -> reqwest::blocking::RequestBuilder {
        let url = self.url();
        let mut request_builder = client.request(self.method, url).body(self.body);

        for (key, value) in self.headers {
            request_builder = request_builder.header(key, value.as_ref());
        }

        request_builder
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} HTTP/1.1", self.method, self.path)?;

        writeln!(f, "Host: {}", self.host)?;
        for (key, value) in &self.headers {
            if REDACTED_HEADERS.contains(key) {
                writeln!(f, "{}: <redacted>", key)?;
            } else {
                writeln!(f, "{}: {}", key, value.as_ref())?;
            }
        }

        // Empty line between headers and body
        writeln!(f)?;

        write!(f, "{}", self.body)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    fn sample_request() -> super::HttpRequest {
        super::HttpRequest {
            scheme: "https",
            host: "api.deepseek.com".to_string(),
            path: "/chat/completions".to_string(),
            method: reqwest::Method::POST,
            headers: vec![
                ("content-type", Arc::from("application/json")),
                ("authorization", Arc::from("Bearer sk-secret")),
            ],
            body: r#"{"model":"deepseek-reasoner","messages":[{"role":"user","content":"Hello, world!"}]}"#
                .to_string(),
        }
    }

    #[test]
    fn test_http_request_to_reqwest_blocking_builder() {
        let client = reqwest::blocking::Client::new();

        let request = sample_request()
            .into_reqwest_blocking(&client)
            .build()
            .expect("should build successfully");

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://api.deepseek.com/chat/completions"
        );

        let headers = request.headers();
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer sk-secret");

        let body = request.body().unwrap();
        let body_str = std::str::from_utf8(body.as_bytes().unwrap()).unwrap();
        assert!(body_str.contains("Hello, world!"));
    }

    #[test]
    fn test_url_follows_scheme() {
        let request = super::HttpRequest {
            scheme: "http",
            host: "127.0.0.1:8080".to_string(),
            ..sample_request()
        };
        assert_eq!(request.url(), "http://127.0.0.1:8080/chat/completions");
    }

    #[test]
    fn test_display_redacts_credentials() {
        let rendered = sample_request().to_string();

        assert!(rendered.starts_with("POST /chat/completions HTTP/1.1\nHost: api.deepseek.com\n"));
        assert!(rendered.contains("content-type: application/json"));
        assert!(rendered.contains("authorization: <redacted>"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.ends_with("\"content\":\"Hello, world!\"}]}"));
    }
}
