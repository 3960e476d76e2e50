//! HTTP seam between the client and the registry.

use std::future::Future;

use thiserror::Error;

use crate::core::LookupError;

/// Failure reported by a [`Transport`].
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, timeout or body read failure.
    #[error("{0}")]
    Network(String),
    /// The request could not be built (e.g. malformed base URL).
    #[error("{0}")]
    Request(String),
}

impl From<TransportError> for LookupError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Network(msg) => LookupError::Transport(msg),
            TransportError::Request(msg) => LookupError::Internal(msg),
        }
    }
}

/// Performs a GET request and returns the response body.
///
/// The body is returned regardless of the HTTP status: the registry reports
/// its own errors inside the JSON payload.
pub trait Transport {
    /// Fetch `url`.
    fn get(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[cfg(feature = "http")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "http")]
mod reqwest_transport {
    use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

    use super::{Transport, TransportError};
    use crate::core::LookupError;
    use crate::registry::Config;

    /// [`Transport`] backed by a shared [`reqwest::Client`].
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Build a client with the headers and timeout from `config`.
        ///
        /// # Errors
        ///
        /// Returns [`LookupError::Internal`] if a header value is not valid
        /// or the TLS backend cannot be initialised.
        pub fn new(config: &Config) -> Result<Self, LookupError> {
            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            headers.insert(
                ACCEPT_LANGUAGE,
                HeaderValue::from_str(&config.accept_language)
                    .map_err(|e| LookupError::Internal(e.to_string()))?,
            );

            let client = reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .default_headers(headers)
                .timeout(config.timeout)
                .build()
                .map_err(|e| LookupError::Internal(e.to_string()))?;

            Ok(Self { client })
        }
    }

    impl Transport for ReqwestTransport {
        async fn get(&self, url: &str) -> Result<String, TransportError> {
            let resp = self.client.get(url).send().await.map_err(|e| {
                if e.is_builder() {
                    TransportError::Request(e.to_string())
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

            tracing::debug!(status = %resp.status(), "registry responded");

            resp.text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))
        }
    }
}
