//! Shared HTTP plumbing for the API and SPARQL clients.
//!
//! Both clients expose synchronous traits from `wikihum-core` and bridge to
//! async `reqwest` calls by blocking on a Tokio runtime they own.

use std::{future::Future, io};

use reqwest::{Client, RequestBuilder, Response};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::WikibaseConfig;

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// A configured URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// Offending text.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("malformed response from {url}: {message}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder message.
        message: String,
    },
}

/// HTTP client plus the runtime that drives it.
pub(crate) struct HttpSession {
    client: Client,
    runtime: Runtime,
    timeout_secs: u64,
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HttpSession {
    /// Session for `config`; `cookies` keeps the login session between
    /// requests.
    pub(crate) fn new(config: &WikibaseConfig, cookies: bool) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .cookie_store(cookies)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// Run `future` to completion.
    ///
    /// Inside a multi-threaded runtime the caller's handle is used through
    /// `block_in_place`; otherwise the session's own runtime drives it.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Send `request` and fail on non-success statuses.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Response, TransportError> {
        request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    /// Send `request` and decode a JSON body.
    pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, TransportError> {
        let response = self.send(request, url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        serde_json::from_slice(&body).map_err(|err| TransportError::Decode {
            url: url.to_owned(),
            message: err.to_string(),
        })
    }

    pub(crate) fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout_secs,
            };
        }

        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        if error.is_decode() {
            return TransportError::Decode {
                url: url.to_owned(),
                message: error.to_string(),
            };
        }

        TransportError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}
