//! # vatpl
//!
//! Client for the Polish VAT white list ("Wykaz podatników VAT",
//! `wl-api.mf.gov.pl`): validates NIP tax identifiers and checks their
//! VAT registration status, singly or in bulk, for any past date.
//!
//! ## Quick Start
//!
//! ```rust
//! use vatpl::core::*;
//!
//! let nip = normalize_nip(" 692-00-00-013 ");
//! assert_eq!(nip, "6920000013");
//! assert!(is_valid_nip(&nip));
//!
//! let date: LookupDate = "2020-10-07".parse().unwrap();
//! assert_eq!(date.to_string(), "2020-10-07");
//!
//! assert_eq!(VatStatus::from_registry("Czynny"), VatStatus::Active);
//! ```
//!
//! Registry lookups (feature `http`):
//!
//! ```ignore
//! use vatpl::registry::WhiteListClient;
//!
//! let client = WhiteListClient::new()?;
//! let status = client.verify("692-00-00-013", None).await?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | NIP validation, batching, dates, statuses, errors |
//! | `registry` | White list client, retry policy, response model |
//! | `http` | `reqwest` transport for the client |
//! | `cli` | `check-vat` command line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "registry")]
pub mod registry;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
