//! VAT status as reported by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// VAT registration status of a taxpayer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum VatStatus {
    /// The lookup failed or the registry answered with an unexpected value.
    #[default]
    Error,
    /// Active VAT payer ("Czynny").
    Active,
    /// Exempt from VAT ("Zwolniony").
    Exempt,
    /// Not registered for VAT ("Niezarejestrowany").
    NotRegistered,
    /// Valid NIP missing from a successful bulk response.
    Unknown,
}

impl VatStatus {
    /// Map a registry `statusVat` value.
    ///
    /// An empty string is [`VatStatus::Unknown`]; anything unrecognized
    /// is [`VatStatus::Error`].
    pub fn from_registry(value: &str) -> Self {
        match value {
            "Czynny" => Self::Active,
            "Zwolniony" => Self::Exempt,
            "Niezarejestrowany" => Self::NotRegistered,
            "" => Self::Unknown,
            _ => Self::Error,
        }
    }

    /// Registry name of the status, in Polish.
    pub fn registry_name(&self) -> &'static str {
        match self {
            Self::Error => "Błąd",
            Self::Active => "Czynny",
            Self::Exempt => "Zwolniony",
            Self::NotRegistered => "Niezarejestrowany",
            Self::Unknown => "Nieznany",
        }
    }
}

impl fmt::Display for VatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry_name())
    }
}
