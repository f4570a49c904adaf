// Signature store error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Signature store error code constants
///
/// Error code range: 3001-3002
pub struct SignatureStoreErrorCodes {}

impl SignatureStoreErrorCodes {
    /// Store file exists but could not be read
    pub const IO: i32 = 3001;

    /// Store file is not valid signature JSON
    pub const PARSE: i32 = 3002;
}

/// Log a signature store error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_store_error(err: &SignatureStoreError, context: &str) {
    error!(
        "Signature store error in {}: code={}, component=SignatureStore, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while loading the reference signature store
///
/// A missing store is not represented here: it loads as an empty
/// database.
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureStoreError {
    /// Store file could not be read
    Io { path: String, details: String },

    /// Store content is malformed (bad JSON, wrong value types, unknown shape label)
    Parse { path: String, details: String },
}

impl ErrorCode for SignatureStoreError {
    fn code(&self) -> i32 {
        match self {
            SignatureStoreError::Io { .. } => SignatureStoreErrorCodes::IO,
            SignatureStoreError::Parse { .. } => SignatureStoreErrorCodes::PARSE,
        }
    }

    fn message(&self) -> String {
        match self {
            SignatureStoreError::Io { path, details } => {
                format!("Failed to read signature store {}: {}", path, details)
            }
            SignatureStoreError::Parse { path, details } => {
                format!("Failed to parse signature store {}: {}", path, details)
            }
        }
    }
}

impl fmt::Display for SignatureStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignatureStoreError (code {}): {}",
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SignatureStoreError {}
