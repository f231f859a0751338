//! HTTP API module for employee mileage.
//!
//! This module provides the REST API endpoints for recording mileage periods
//! and entries and driving them through the posting workflow.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::BatchRequest;
pub use response::{ApiError, PeriodResponse, ResourceChoice};
pub use state::{AppState, COMPANY_HEADER, EMPLOYEE_HEADER};
