//! Error taxonomy for fingerprint construction, parsing, and the wire codec.

use thiserror::Error;

/// A label failed validation before a [`crate::model::Fingerprint`] could be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("label is {actual} bytes, exceeding the maximum of {max}")]
    LabelTooLong { actual: usize, max: usize },

    #[error("label must not contain ':' (the wire format has no escaping)")]
    LabelContainsSeparator,
}

/// The text wire format failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid non-negative integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("hex data length {actual} does not match expected {expected} (filter_count * FILTERSIZE * 2)")]
    HexLengthMismatch { expected: usize, actual: usize },

    #[error("hex data contains non-hex-digit characters")]
    InvalidHex,

    #[error("filter_count {filter_count} is inconsistent with tail_block_count {tail_block_count}")]
    InconsistentTail {
        filter_count: u64,
        tail_block_count: u64,
    },

    #[error("filter_count must be at least 1, got {0}")]
    ZeroFilterCount(u64),

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
