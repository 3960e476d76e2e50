//! Client for the Polish VAT white list API (`wl-api.mf.gov.pl`).
//!
//! Looks up taxpayers by NIP, one at a time or in batches of up to 30,
//! for today or any past date. Transient failures (network problems,
//! malformed responses, registry call limits) are retried with
//! exponential backoff by the `verify*` methods; permanent ones are
//! returned immediately.
//!
//! # Example
//!
//! ```ignore
//! use vatpl::registry::{Config, WhiteListClient};
//!
//! let client = WhiteListClient::with_config(Config::from_env()?)?;
//! let statuses = client
//!     .verify_many(&["692-00-00-013", "1122334455"], Some("2020-10-07".parse()?))
//!     .await?;
//! for (nip, status) in &statuses {
//!     println!("{nip}: {status}");
//! }
//! ```

mod client;
mod config;
mod response;
mod retry;
mod transport;

pub use client::{BulkStatuses, WhiteListClient};
pub use config::{
    Config, ConfigError, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_API_URL, DEFAULT_USER_AGENT,
    ENV_API_URL, ENV_RETRY_COUNT, ENV_TIMEOUT_SECS,
};
pub use response::{
    EntityPerson, Subject, SubjectResult, SubjectsResult, decode_subject, decode_subjects,
};
pub use retry::{RetryPolicy, with_retry};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{Transport, TransportError};
