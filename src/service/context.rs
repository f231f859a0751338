//! Request context.

use chrono::{Local, NaiveDate};

/// Who is calling and when.
///
/// Carries the active company (used for fiscal period, journal and currency
/// resolution), the default employee for new periods and the current date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The active company.
    pub company: String,
    /// Default employee for new periods.
    pub employee: Option<String>,
    /// The current date.
    pub today: NaiveDate,
}

impl Context {
    /// Creates a context for `company` dated with the local current date.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            employee: None,
            today: Local::now().date_naive(),
        }
    }

    /// Sets the default employee.
    pub fn with_employee(mut self, employee: impl Into<String>) -> Self {
        self.employee = Some(employee.into());
        self
    }

    /// Overrides the current date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}
