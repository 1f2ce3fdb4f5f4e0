use thiserror::Error;

pub mod fields;
pub mod mapping;
pub mod normalizer;


pub use mapping::{ConfigError, FieldMapping};
pub use normalizer::{normalize, normalize_row, CanonicalTransaction, RawRow, TransactionBatch};

#[derive(Debug, PartialEq, Error)]
pub enum FieldError {
    #[error("unable to parse date: {0:?}")]
    Date(String),
    #[error("unable to parse amount: {0:?}")]
    Amount(String),
}

/// Failure of a single record. `record` is the 1-based position of the row
/// in the input, not counting the header.
#[derive(Debug, PartialEq, Error)]
#[error("record {record}: {kind}")]
pub struct NormalizeError {
    pub record: usize,
    pub kind: FieldError,
}
