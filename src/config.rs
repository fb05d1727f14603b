//! Startup configuration.
//!
//! All settings come from the process environment. A `.env` file in the working directory (or
//! any parent) is loaded first; variables already set in the environment take precedence.

use std::env;

use crate::{Api, Error};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";

/// Environment variable overriding the endpoint host.
pub const ENDPOINT_HOST_VAR: &str = "DEEPSEEK_ENDPOINT_HOST";

#[derive(Debug)]
pub struct Config {
    api_key: String,
    model: Option<String>,
    endpoint_host: Option<String>,
}

impl Config {
    /// Loads `.env`, then reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(%err, "ignoring unreadable .env file"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = read(API_KEY_VAR).ok_or(Error::MissingCredential(API_KEY_VAR))?;

        let model = read(MODEL_VAR);
        if let Some(ref model) = model {
            tracing::debug!(%model, "model overridden");
        }

        let endpoint_host = read(ENDPOINT_HOST_VAR);
        if let Some(ref host) = endpoint_host {
            tracing::debug!(%host, "endpoint host overridden");
        }

        Ok(Self {
            api_key,
            model,
            endpoint_host,
        })
    }

    /// Creates the [`Api`] described by this configuration.
    pub fn api(&self) -> Api {
        let mut api = Api::new(self.api_key.as_str());

        if let Some(ref model) = self.model {
            api = api.model(model.as_str());
        }

        if let Some(ref host) = self.endpoint_host {
            api = api.endpoint_host(host.as_str());
        }

        api
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Config;
    use crate::{Error, deepseek};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential("DEEPSEEK_API_KEY")));
        assert_eq!(
            err.to_string(),
            "DEEPSEEK_API_KEY not found in environment or .env file"
        );
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[("DEEPSEEK_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup(&[("DEEPSEEK_API_KEY", "sk-test")])).expect("should load");
        let api = config.api();

        assert_eq!(api.model_name(), deepseek::DEFAULT_MODEL);

        let http_request = crate::ChatRequestBuilder::new()
            .build(&api)
            .expect("should build request");
        assert_eq!(http_request.host, deepseek::DEFAULT_ENDPOINT_HOST);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("DEEPSEEK_MODEL", "deepseek-chat"),
            ("DEEPSEEK_ENDPOINT_HOST", "proxy.internal"),
        ]))
        .expect("should load");
        let api = config.api();

        assert_eq!(api.model_name(), "deepseek-chat");
        let http_request = crate::ChatRequestBuilder::new()
            .build(&api)
            .expect("should build request");
        assert_eq!(http_request.host, "proxy.internal");
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("DEEPSEEK_MODEL", ""),
        ]))
        .expect("should load");
        assert_eq!(config.api().model_name(), deepseek::DEFAULT_MODEL);
    }
}
