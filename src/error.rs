//! Error types for the time card rule engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report, together with the numeric
//! [`ErrorCode`] handed back to callers of `apply_rules`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The main error type for the rule engine.
///
/// All fallible operations return this error type. Every variant belongs to
/// exactly one [`ErrorCode`] category.
///
/// # Example
///
/// ```
/// use timecard_rules::error::{EngineError, ErrorCode};
///
/// let error = EngineError::ContractNotFound {
///     contract_id: "CTR_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Contract not found: CTR_404");
/// assert_eq!(error.error_code(), ErrorCode::ConfigurationMissing);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No contract exists for the requested id.
    #[error("Contract not found: {contract_id}")]
    ContractNotFound {
        /// The contract id that was requested.
        contract_id: String,
    },

    /// A contract carried thresholds the engine cannot apply.
    #[error("Invalid contract '{contract_id}': {message}")]
    InvalidContract {
        /// The offending contract.
        contract_id: String,
        /// What was wrong with it.
        message: String,
    },

    /// No time card exists for the requested id.
    #[error("Time card not found: {time_card_id}")]
    TimeCardNotFound {
        /// The time card id that was requested.
        time_card_id: String,
    },

    /// A clock interval was malformed on its own (inverted, empty id, duplicated).
    #[error("Invalid clock interval '{line_id}': {message}")]
    InvalidInterval {
        /// The source line id of the interval.
        line_id: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A clock interval does not lie within the time card's day.
    #[error("Clock interval '{line_id}' lies outside {date}")]
    IntervalOutsideDay {
        /// The source line id of the interval.
        line_id: String,
        /// The date of the time card.
        date: NaiveDate,
    },

    /// Two clock intervals overlap.
    #[error("Clock intervals '{first}' and '{second}' overlap at {at}")]
    OverlappingIntervals {
        /// The earlier interval.
        first: String,
        /// The later interval, which starts before `first` ends.
        second: String,
        /// Where the second interval starts.
        at: NaiveDateTime,
    },

    /// The backing store failed to load or persist data.
    #[error("Data access error: {message}")]
    DataAccess {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the numeric error category reported to `apply_rules` callers.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EngineError::InvalidInterval { .. }
            | EngineError::IntervalOutsideDay { .. }
            | EngineError::OverlappingIntervals { .. } => ErrorCode::InputValidation,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ContractNotFound { .. }
            | EngineError::InvalidContract { .. } => ErrorCode::ConfigurationMissing,
            EngineError::TimeCardNotFound { .. } | EngineError::DataAccess { .. } => {
                ErrorCode::DataAccess
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Numeric outcome of a rule application. `0` is success.
///
/// Serializes as its number so callers can compare against `0` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum ErrorCode {
    /// Rules applied and entries replaced.
    #[default]
    Success = 0,
    /// Overlapping, inverted or out-of-day clock intervals.
    InputValidation = 1,
    /// Contract record or engine configuration missing or unusable.
    ConfigurationMissing = 2,
    /// Upstream load or replace failure.
    DataAccess = 3,
}

impl ErrorCode {
    /// Returns the wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns true for [`ErrorCode::Success`].
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::InputValidation),
            2 => Ok(ErrorCode::ConfigurationMissing),
            3 => Ok(ErrorCode::DataAccess),
            other => Err(other),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u16::deserialize(deserializer)?;
        ErrorCode::try_from(value)
            .map_err(|v| serde::de::Error::custom(format!("unknown error code {}", v)))
    }
}
