//! Application state for the mileage API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use axum::http::HeaderMap;
use tokio::sync::Mutex;

use crate::service::{Context, MileageService};

/// Header naming the active company.
pub const COMPANY_HEADER: &str = "x-company";

/// Header naming the default employee for new periods.
pub const EMPLOYEE_HEADER: &str = "x-employee";

/// Shared application state.
///
/// Holds the mileage service behind a lock, so every request sees the
/// effects of the previous ones, and the company used when a request
/// names none.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<MileageService>>,
    company: Arc<str>,
}

impl AppState {
    /// Creates a new application state around `service`.
    pub fn new(service: MileageService, company: impl Into<String>) -> Self {
        let company: String = company.into();
        Self {
            service: Arc::new(Mutex::new(service)),
            company: company.into(),
        }
    }

    /// Returns the shared service.
    pub fn service(&self) -> &Mutex<MileageService> {
        &self.service
    }

    /// Returns the default company.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Builds the request context from the request headers.
    pub fn context(&self, headers: &HeaderMap) -> Context {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let ctx = Context::new(header(COMPANY_HEADER).unwrap_or(self.company()));
        match header(EMPLOYEE_HEADER) {
            Some(employee) => ctx.with_employee(employee),
            None => ctx,
        }
    }
}
