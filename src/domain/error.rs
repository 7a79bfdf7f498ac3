//! Error types for the select controller.
//!
//! Only construction and configuration loading can fail. Every operation on a
//! live controller absorbs bad input as a no-op instead of returning an error,
//! so [`SelectreeError`] is what host code sees during setup and nowhere else.

use thiserror::Error;

/// The error type for controller construction and configuration loading.
///
/// # Examples
///
/// ```
/// use selectree::SelectreeError;
///
/// let err = SelectreeError::TargetNotFound { selector: "#country".to_string() };
/// assert_eq!(err.to_string(), "No element matches selector: #country");
/// ```
#[derive(Debug, Error)]
pub enum SelectreeError {
    /// The backing element is not a selection control.
    #[error("Wrong element kind: expected a select control, found {found}")]
    WrongElementKind {
        /// Kind of element that was supplied instead.
        found: String,
    },

    /// The backing control's multiplicity does not match the chosen variant.
    ///
    /// A single-select controller needs a single-value control, a multi-select
    /// controller needs a control that accepts multiple values.
    #[error("Wrong selection multiplicity: variant expects multiple = {expected_multiple}")]
    WrongMultiplicity {
        /// Whether the configured variant expects a multi-value control.
        expected_multiple: bool,
    },

    /// A selector matched no backing control.
    #[error("No element matches selector: {selector}")]
    TargetNotFound {
        /// The selector that was queried.
        selector: String,
    },

    /// A selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration or scenario file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for construction and configuration.
pub type Result<T> = std::result::Result<T, SelectreeError>;
