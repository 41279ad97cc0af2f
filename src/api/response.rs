//! Response types for the rule engine API.
//!
//! This module defines the success bodies, the error response structure, and
//! the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ErrorCode};
use crate::models::{
    AuditTrace, CallSummary, RuleApplication, RuleTotals, SynthesizedEntry, TimeCardLine,
};

/// Body of a successful `POST /timecards/:id/apply-rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRulesResponse {
    /// Always `0` here.
    pub error: ErrorCode,
    /// Identifier of this run.
    pub application_id: Uuid,
    /// The time card the rules were applied to.
    pub time_card_id: String,
    /// The synthesized entries now stored on the card.
    pub entries: Vec<SynthesizedEntry>,
    /// Worked and synthesized lines in time order.
    pub lines: Vec<TimeCardLine>,
    /// The calls the day was segmented into.
    pub calls: Vec<CallSummary>,
    /// Aggregated hours.
    pub totals: RuleTotals,
    /// Rule decisions and warnings.
    pub audit_trace: AuditTrace,
}

impl From<RuleApplication> for ApplyRulesResponse {
    fn from(application: RuleApplication) -> Self {
        Self {
            error: ErrorCode::Success,
            application_id: application.application_id,
            time_card_id: application.time_card_id,
            entries: application.entries,
            lines: application.lines,
            calls: application.calls,
            totals: application.totals,
            audit_trace: application.audit_trace,
        }
    }
}

/// Body of `GET /timecards/:id/entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntriesResponse {
    /// The time card the entries belong to.
    pub time_card_id: String,
    /// The stored synthesized entries.
    pub entries: Vec<SynthesizedEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error category, as returned by `apply_rules`.
    pub error: ErrorCode,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(error: ErrorCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        error: ErrorCode,
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error,
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputValidation, "VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputValidation, "MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let category = error.error_code();
        let message = error.to_string();
        let (status, code, details) = match &error {
            EngineError::InvalidInterval { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_INTERVAL",
                "Every clock line needs a unique id and must end after it starts",
            ),
            EngineError::IntervalOutsideDay { .. } => (
                StatusCode::BAD_REQUEST,
                "INTERVAL_OUTSIDE_DAY",
                "Clock lines must start and end within the time card's date",
            ),
            EngineError::OverlappingIntervals { .. } => (
                StatusCode::BAD_REQUEST,
                "OVERLAPPING_INTERVALS",
                "Worked clock lines on one time card may touch but not overlap",
            ),
            EngineError::TimeCardNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "TIME_CARD_NOT_FOUND",
                "No time card is stored under this id",
            ),
            EngineError::ContractNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "CONTRACT_NOT_FOUND",
                "The time card refers to a contract that is not configured",
            ),
            EngineError::InvalidContract { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_CONTRACT",
                "The contract's thresholds cannot be applied",
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Configuration error",
            ),
            EngineError::DataAccess { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_ACCESS_ERROR",
                "The time card store failed",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(category, code, message, details),
        }
    }
}
