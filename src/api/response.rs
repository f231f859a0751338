//! Response types for the mileage API.
//!
//! This module defines the success bodies, the error response structures and
//! the mapping from [`MileageError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::MileageError;
use crate::models::{MileageEntry, MileagePeriod, ResourceKind};

/// A period together with its entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodResponse {
    /// The period header.
    #[serde(flatten)]
    pub period: MileagePeriod,
    /// The entries of the period, in insertion order.
    pub entries: Vec<MileageEntry>,
}

/// One option of the resource selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChoice {
    /// The resource kind, `None` for the empty choice.
    pub kind: Option<ResourceKind>,
    /// Label shown to users.
    pub label: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
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
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<MileageError> for ApiErrorResponse {
    fn from(error: MileageError) -> Self {
        let message = error.to_string();
        let (status, code, details) = match &error {
            MileageError::ConfigNotFound { .. } | MileageError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The mileage configuration could not be loaded",
            ),
            MileageError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "The referenced record does not exist",
            ),
            MileageError::MissingDistanceAndAmount { .. } => (
                StatusCode::BAD_REQUEST,
                "MISSING_DISTANCE_AND_AMOUNT",
                "Every mileage entry needs a distance or an amount",
            ),
            MileageError::InvalidAmountPrecision { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_AMOUNT_PRECISION",
                "The amount has too many decimal places",
            ),
            MileageError::InvalidPeriod { .. } | MileageError::InvalidEntry { .. } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "The request contains invalid information",
            ),
            MileageError::ResourceNotSelectable { .. } => (
                StatusCode::BAD_REQUEST,
                "RESOURCE_NOT_SELECTABLE",
                "The resource kind is not enabled",
            ),
            MileageError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                "INVALID_TRANSITION",
                "The period is not in a state that allows this action",
            ),
            MileageError::PeriodNotEditable { .. } => (
                StatusCode::CONFLICT,
                "PERIOD_NOT_EDITABLE",
                "Only draft periods can be modified",
            ),
            MileageError::PeriodNotDeletable { .. } => (
                StatusCode::CONFLICT,
                "PERIOD_NOT_DELETABLE",
                "Only draft or cancelled periods can be deleted",
            ),
            MileageError::MissingRatePerDistance { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_RATE_PER_DISTANCE",
                "Set a price per km on the employee",
            ),
            MileageError::MissingDebitAccount { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_DEBIT_ACCOUNT",
                "Set a debit account on the employee",
            ),
            MileageError::MissingCreditAccount { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_CREDIT_ACCOUNT",
                "Set a payable account on the employee's party or company",
            ),
            MileageError::MissingMileageJournal { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_MILEAGE_JOURNAL",
                "Configure an employee mileage journal for the company",
            ),
            MileageError::FiscalPeriodNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "FISCAL_PERIOD_NOT_FOUND",
                "Open a fiscal period covering the posting date",
            ),
            MileageError::AmountOverflow { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "AMOUNT_OVERFLOW",
                "Lower the employee's price per km or the entry amounts",
            ),
            MileageError::UnbalancedMove { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "POSTING_ERROR",
                "The generated move does not balance",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, details),
        }
    }
}
