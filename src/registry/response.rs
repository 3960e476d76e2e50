//! JSON model of the white list API responses.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{DATE_FORMAT, LookupError, VatStatus};

/// Envelope shared by every endpoint: either an error `code`/`message`
/// pair or a `result`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<R> {
    code: Option<String>,
    message: Option<String>,
    result: Option<R>,
}

impl<R> ApiResponse<R> {
    /// Turn the envelope into its result, classifying registry error codes.
    pub(crate) fn into_result(self) -> Result<R, LookupError> {
        match self.code.filter(|c| !c.is_empty()) {
            Some(code) => Err(LookupError::registry(code, self.message.unwrap_or_default())),
            None => self
                .result
                .ok_or_else(|| LookupError::Decode("response has neither result nor code".into())),
        }
    }
}

/// Decode a response body into its result.
pub(crate) fn decode<R: DeserializeOwned>(body: &str) -> Result<R, LookupError> {
    serde_json::from_str::<ApiResponse<R>>(body)
        .map_err(|e| LookupError::Decode(e.to_string()))?
        .into_result()
}

/// Decode the body of a single NIP search (`/api/search/nip/...`).
///
/// # Errors
///
/// [`LookupError::Registry`] when the body carries an error code,
/// [`LookupError::Decode`] when it is not a valid response.
pub fn decode_subject(body: &str) -> Result<SubjectResult, LookupError> {
    decode(body)
}

/// Decode the body of a bulk NIP search (`/api/search/nips/...`).
///
/// # Errors
///
/// Same as [`decode_subject`].
pub fn decode_subjects(body: &str) -> Result<SubjectsResult, LookupError> {
    decode(body)
}

/// `null` and a missing field both give the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Dates the registry sends in an unexpected shape are dropped.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok()))
}

/// Result of a single NIP search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    /// The subject, or `None` when the registry has no entry for the NIP.
    #[serde(default)]
    pub subject: Option<Subject>,
    /// Registry request identifier.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Registry timestamp of the request.
    #[serde(default)]
    pub request_date_time: Option<String>,
}

/// Result of a bulk NIP search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectsResult {
    /// Subjects found; NIPs without an entry are simply absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<Subject>,
    /// Registry request identifier.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Registry timestamp of the request.
    #[serde(default)]
    pub request_date_time: Option<String>,
}

/// A taxpayer entry in the white list.
///
/// Only `nip` and `statusVat` drive lookups. The other fields are passed
/// through, and `null` or malformed values in them never fail a decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Company or person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Normalized NIP.
    #[serde(default)]
    pub nip: Option<String>,
    /// Raw registry VAT status ("Czynny", "Zwolniony", ...).
    #[serde(default)]
    pub status_vat: Option<String>,
    /// REGON statistical number.
    #[serde(default)]
    pub regon: Option<String>,
    /// PESEL, for natural persons.
    #[serde(default)]
    pub pesel: Option<String>,
    /// KRS court register number.
    #[serde(default)]
    pub krs: Option<String>,
    /// Residence address, for natural persons.
    #[serde(default)]
    pub residence_address: Option<String>,
    /// Registered business address.
    #[serde(default)]
    pub working_address: Option<String>,
    /// Date of VAT registration.
    #[serde(default, deserialize_with = "lenient_date")]
    pub registration_legal_date: Option<NaiveDate>,
    /// Date registration was refused.
    #[serde(default, deserialize_with = "lenient_date")]
    pub registration_denial_date: Option<NaiveDate>,
    /// Legal basis of the refusal.
    #[serde(default)]
    pub registration_denial_basis: Option<String>,
    /// Date the registration was restored.
    #[serde(default, deserialize_with = "lenient_date")]
    pub restoration_date: Option<NaiveDate>,
    /// Legal basis of the restoration.
    #[serde(default)]
    pub restoration_basis: Option<String>,
    /// Date the subject was removed from the register.
    #[serde(default, deserialize_with = "lenient_date")]
    pub removal_date: Option<NaiveDate>,
    /// Legal basis of the removal.
    #[serde(default)]
    pub removal_basis: Option<String>,
    /// Bank accounts registered for the subject.
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_numbers: Vec<String>,
    /// Whether the subject uses virtual (collective) accounts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_virtual_accounts: bool,
    /// Members of the management board.
    #[serde(default, deserialize_with = "null_as_default")]
    pub representatives: Vec<EntityPerson>,
    /// Commercial proxies.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorized_clerks: Vec<EntityPerson>,
    /// Partners of a partnership.
    #[serde(default, deserialize_with = "null_as_default")]
    pub partners: Vec<EntityPerson>,
}

impl Subject {
    /// The subject's VAT status; a missing `statusVat` counts as empty.
    pub fn status(&self) -> VatStatus {
        VatStatus::from_registry(self.status_vat.as_deref().unwrap_or_default())
    }
}

/// Representative, clerk or partner attached to a subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPerson {
    /// Company name, when the person is a legal entity.
    #[serde(default)]
    pub company_name: Option<String>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// NIP of the person or entity.
    #[serde(default)]
    pub nip: Option<String>,
    /// PESEL of the person.
    #[serde(default)]
    pub pesel: Option<String>,
}
