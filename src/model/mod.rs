//! Data models: fingerprints, their error taxonomy, and fingerprint lists.

pub mod error;
pub mod fingerprint;
pub mod list;

pub use error::{CapacityError, ParseError};
pub use fingerprint::{fingerprint_compare, Fingerprint};
pub use list::{CompareResult, FingerprintList};
