//! Error types for the employee mileage module.
//!
//! Every failure a caller can observe is a variant of [`MileageError`]. All of them
//! are user-facing and non-retryable: the caller fixes the data and re-invokes.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PeriodState;

/// The main error type for the mileage module.
///
/// # Example
///
/// ```
/// use employee_mileage::error::MileageError;
///
/// let error = MileageError::MissingRatePerDistance {
///     name: "Employee".to_string(),
/// };
/// assert_eq!(error.to_string(), "No price per km defined for employee 'Employee'");
/// ```
#[derive(Debug, Error)]
pub enum MileageError {
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

    /// A mileage entry has neither a distance nor an amount.
    #[error("Mileage '{record}' has no distance and no amount")]
    MissingDistanceAndAmount {
        /// Display name of the offending entry.
        record: String,
    },

    /// The employee has no rate per distance unit.
    #[error("No price per km defined for employee '{name}'")]
    MissingRatePerDistance {
        /// Name of the employee's party.
        name: String,
    },

    /// The employee has no debit account.
    #[error("Debit account missing for employee '{name}'")]
    MissingDebitAccount {
        /// Name of the employee's party.
        name: String,
    },

    /// The employee's party has no resolvable payable account.
    #[error("Credit account missing for employee '{name}'")]
    MissingCreditAccount {
        /// Name of the employee's party.
        name: String,
    },

    /// The company has no default mileage journal configured.
    #[error("No mileage journal configured for company '{company}'")]
    MissingMileageJournal {
        /// The company identifier.
        company: String,
    },

    /// No open fiscal period contains the posting date.
    #[error("No fiscal period found for company '{company}' on {date}")]
    FiscalPeriodNotFound {
        /// The company identifier.
        company: String,
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// The requested workflow transition is not part of the transition graph.
    #[error("Period {period} cannot go from {from} to {to}")]
    InvalidTransition {
        /// The period being transitioned.
        period: Uuid,
        /// The current state.
        from: PeriodState,
        /// The requested state.
        to: PeriodState,
    },

    /// The period is not in draft and its data is frozen.
    #[error("Period {period} is {state} and can no longer be modified")]
    PeriodNotEditable {
        /// The frozen period.
        period: Uuid,
        /// Its current state.
        state: PeriodState,
    },

    /// Only draft and cancelled periods may be deleted.
    #[error("Period {period} is {state} and cannot be deleted")]
    PeriodNotDeletable {
        /// The period.
        period: Uuid,
        /// Its current state.
        state: PeriodState,
    },

    /// A period field was invalid.
    #[error("Invalid period field '{field}': {message}")]
    InvalidPeriod {
        /// The field that was invalid.
        field: String,
        /// What made it invalid.
        message: String,
    },

    /// A mileage entry field was invalid.
    #[error("Invalid mileage field '{field}': {message}")]
    InvalidEntry {
        /// The field that was invalid.
        field: String,
        /// What made it invalid.
        message: String,
    },

    /// The entry references a resource kind that is not selectable.
    #[error("Resource kind '{kind}' is not selectable")]
    ResourceNotSelectable {
        /// The resource kind.
        kind: String,
    },

    /// A monetary value carries more fractional digits than allowed.
    #[error("Amount {amount} exceeds {digits} decimal places")]
    InvalidAmountPrecision {
        /// The amount as given.
        amount: String,
        /// The allowed number of fractional digits.
        digits: u32,
    },

    /// The amount of a period does not fit in a decimal.
    #[error("Mileage amount of employee '{name}' is too large to post")]
    AmountOverflow {
        /// Name of the employee's party.
        name: String,
    },

    /// A move's debits and credits do not balance.
    #[error("Move is unbalanced: debit {debit} != credit {credit}")]
    UnbalancedMove {
        /// Total debit.
        debit: String,
        /// Total credit.
        credit: String,
    },

    /// A referenced record does not exist.
    #[error("{model} not found: {id}")]
    RecordNotFound {
        /// The kind of record (e.g. "period", "employee").
        model: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
}

impl MileageError {
    /// Shorthand for [`MileageError::RecordNotFound`].
    pub fn not_found(model: &'static str, id: impl ToString) -> Self {
        MileageError::RecordNotFound {
            model,
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return MileageError.
pub type MileageResult<T> = Result<T, MileageError>;
