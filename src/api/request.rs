//! Request types for the mileage API.
//!
//! Period and entry bodies deserialize straight into [`NewPeriod`],
//! [`PeriodUpdate`] and [`NewMileageEntry`]; this module only adds the batch
//! body shared by the copy and workflow endpoints.
//!
//! [`NewPeriod`]: crate::models::NewPeriod
//! [`PeriodUpdate`]: crate::models::PeriodUpdate
//! [`NewMileageEntry`]: crate::models::NewMileageEntry

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for the batch endpoints (`/periods/copy`, `/periods/post`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Identifiers of the periods to act on.
    pub ids: Vec<Uuid>,
}
