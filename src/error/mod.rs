// Error types for the gloss recognizer
//
// This module defines custom error types for signature store loading and
// recognizer configuration, providing structured error handling with error
// codes suitable for CLI exit reporting and HTTP responses.
//
// Degenerate recognition input (missing hands, short sequences, empty
// database) is never an error; see analysis::recognizer.

mod config;
mod store;

pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use store::{log_store_error, SignatureStoreError, SignatureStoreErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent reporting across the
/// CLI, HTTP, and telemetry surfaces.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
