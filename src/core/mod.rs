//! Offline building blocks: NIP validation, batching, dates, statuses and errors.
//!
//! Nothing in this module touches the network.

mod date;
mod error;
mod nip;
mod status;

pub use date::*;
pub use error::*;
pub use nip::*;
pub use status::*;
