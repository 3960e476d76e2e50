//! White list client: single and bulk NIP lookups.

use std::collections::BTreeMap;

use crate::core::{
    LookupDate, LookupError, NIP_BATCH_SIZE, VatStatus, is_valid_nip, nip_batches, normalize_nip,
    partition_nips,
};

use super::config::Config;
use super::response::{Subject, SubjectResult, SubjectsResult, decode};
use super::retry::with_retry;
use super::transport::Transport;

/// Statuses of a bulk lookup, keyed by the NIPs exactly as supplied.
pub type BulkStatuses = BTreeMap<String, VatStatus>;

/// Client for the Polish VAT white list ("Wykaz podatników VAT").
///
/// The `lookup*` and [`subject`](Self::subject) methods make a single
/// attempt; the `verify*` methods wrap them in the configured
/// [`RetryPolicy`](super::RetryPolicy).
///
/// # Example
///
/// ```ignore
/// use vatpl::registry::WhiteListClient;
///
/// let client = WhiteListClient::new()?;
/// let status = client.verify("692-00-00-013", None).await?;
/// println!("{status}");
/// ```
#[derive(Debug, Clone)]
pub struct WhiteListClient<T> {
    config: Config,
    transport: T,
}

#[cfg(feature = "http")]
impl WhiteListClient<super::ReqwestTransport> {
    /// Client for the production registry with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Internal`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_config(Config::default())
    }

    /// Client using `config` and a [`ReqwestTransport`](super::ReqwestTransport).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Internal`] if the HTTP client cannot be built.
    pub fn with_config(config: Config) -> Result<Self, LookupError> {
        let transport = super::ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> WhiteListClient<T> {
    /// Client using a custom transport.
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transport carrying requests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the full white list entry for one NIP.
    ///
    /// Returns `Ok(None)` when the registry has no entry for the NIP.
    ///
    /// # Errors
    ///
    /// [`LookupError::InvalidNip`] before any request if the NIP fails
    /// validation, otherwise transport, decode and registry errors.
    pub async fn subject(
        &self,
        nip: &str,
        date: Option<LookupDate>,
    ) -> Result<Option<Subject>, LookupError> {
        let nip = normalize_nip(nip);
        if !is_valid_nip(&nip) {
            return Err(LookupError::InvalidNip(nip));
        }

        let url = self.url("nip", &nip, LookupDate::or_today(date));
        let body = self.fetch(&url).await?;
        let result: SubjectResult = decode(&body)?;
        tracing::debug!(%nip, request_id = ?result.request_id, "subject found: {}", result.subject.is_some());
        Ok(result.subject)
    }

    /// Look up the VAT status of one NIP.
    ///
    /// A NIP without a registry entry, or an entry with an empty status,
    /// yields [`VatStatus::Error`]. [`VatStatus::Unknown`] is never returned.
    pub async fn lookup_one(
        &self,
        nip: &str,
        date: Option<LookupDate>,
    ) -> Result<VatStatus, LookupError> {
        let status = match self.subject(nip, date).await?.map(|s| s.status()) {
            Some(VatStatus::Unknown) | None => VatStatus::Error,
            Some(status) => status,
        };
        Ok(status)
    }

    /// Look up the VAT statuses of many NIPs.
    ///
    /// Every distinct input appears in the result. NIPs that fail
    /// validation map to [`VatStatus::Error`] without being sent; valid
    /// NIPs missing from the registry response map to
    /// [`VatStatus::Unknown`]. Requests go out sequentially in batches of
    /// [`NIP_BATCH_SIZE`], and the first failing batch aborts the whole
    /// call without partial results.
    pub async fn lookup_many<S: AsRef<str>>(
        &self,
        nips: &[S],
        date: Option<LookupDate>,
    ) -> Result<BulkStatuses, LookupError> {
        let partition = partition_nips(nips);
        let date = LookupDate::or_today(date);
        tracing::debug!(
            valid = partition.valid.len(),
            invalid = partition.invalid.len(),
            %date,
            "bulk lookup"
        );

        let mut statuses: BulkStatuses = partition
            .invalid
            .keys()
            .map(|raw| (raw.clone(), VatStatus::Error))
            .collect();
        statuses.extend(
            partition
                .valid
                .keys()
                .map(|raw| (raw.clone(), VatStatus::Unknown)),
        );

        let index = partition.raw_keys_by_nip();
        for batch in nip_batches(index.keys().copied(), NIP_BATCH_SIZE) {
            let url = self.url("nips", &batch.join(","), date);
            let body = self.fetch(&url).await?;
            let result: SubjectsResult = decode(&body)?;

            for subject in &result.subjects {
                let Some(raw_keys) = subject.nip.as_deref().and_then(|nip| index.get(nip)) else {
                    tracing::debug!(nip = ?subject.nip, "subject not requested, ignoring");
                    continue;
                };
                let status = subject.status();
                for raw in raw_keys {
                    statuses.insert((*raw).to_string(), status);
                }
            }
        }

        Ok(statuses)
    }

    /// [`subject`](Self::subject) with retries on transient failures.
    pub async fn verify_subject(
        &self,
        nip: &str,
        date: Option<LookupDate>,
    ) -> Result<Option<Subject>, LookupError> {
        with_retry(&self.config.retry, move || self.subject(nip, date)).await
    }

    /// [`lookup_one`](Self::lookup_one) with retries on transient failures.
    pub async fn verify(&self, nip: &str, date: Option<LookupDate>) -> Result<VatStatus, LookupError> {
        with_retry(&self.config.retry, move || self.lookup_one(nip, date)).await
    }

    /// [`lookup_many`](Self::lookup_many) with retries on transient failures.
    ///
    /// A retry repeats every batch.
    pub async fn verify_many<S: AsRef<str>>(
        &self,
        nips: &[S],
        date: Option<LookupDate>,
    ) -> Result<BulkStatuses, LookupError> {
        with_retry(&self.config.retry, move || self.lookup_many(nips, date)).await
    }

    fn url(&self, resource: &str, nips: &str, date: LookupDate) -> String {
        format!(
            "{}/api/search/{resource}/{nips}?date={date}",
            self.config.base_url
        )
    }

    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        tracing::debug!(%url, "registry request");
        Ok(self.transport.get(url).await?)
    }
}
