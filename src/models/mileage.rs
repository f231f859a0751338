//! Mileage entry model and related types.
//!
//! This module defines the [`MileageEntry`] struct, the [`Resource`] reference an
//! entry may carry, and the [`NewMileageEntry`] input used to create or replace one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MileageError, MileageResult};

/// Number of fractional digits allowed on monetary inputs (rates and flat amounts).
pub const PRICE_DIGITS: u32 = 4;

/// Flat amounts must stay strictly below this many currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// The kinds of business object a mileage entry may originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A task or project in the project module.
    ProjectWork,
    /// A sales opportunity.
    SaleOpportunity,
}

impl ResourceKind {
    /// Returns the identifier used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ProjectWork => "project_work",
            ResourceKind::SaleOpportunity => "sale_opportunity",
        }
    }
}

/// A typed reference to the business object that caused a trip.
///
/// Serialized as `{"kind": "project_work", "id": "..."}`.
///
/// # Example
///
/// ```
/// use employee_mileage::models::{Resource, ResourceKind};
///
/// let resource = Resource::ProjectWork("work_42".to_string());
/// assert_eq!(resource.kind(), ResourceKind::ProjectWork);
/// assert_eq!(resource.id(), "work_42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Resource {
    /// Reference to a project work record.
    ProjectWork(String),
    /// Reference to a sale opportunity record.
    SaleOpportunity(String),
}

impl Resource {
    /// Returns the kind of the referenced record.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::ProjectWork(_) => ResourceKind::ProjectWork,
            Resource::SaleOpportunity(_) => ResourceKind::SaleOpportunity,
        }
    }

    /// Returns the identifier of the referenced record.
    pub fn id(&self) -> &str {
        match self {
            Resource::ProjectWork(id) | Resource::SaleOpportunity(id) => id,
        }
    }
}

/// The user-supplied fields of a mileage entry.
///
/// Used both to create an entry and to replace the fields of an existing one.
/// A missing `date` defaults to the current date of the calling context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMileageEntry {
    /// Optional originating business object.
    #[serde(default)]
    pub resource: Option<Resource>,
    /// The address identifier (trip destination).
    pub address: String,
    /// Distance travelled, in whole units.
    #[serde(default)]
    pub distance: Option<u32>,
    /// Trip date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Flat amount to reimburse.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// A single trip or expense logged against a mileage period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// Optional originating business object.
    pub resource: Option<Resource>,
    /// The address identifier.
    pub address: String,
    /// Distance travelled, in whole units.
    pub distance: Option<u32>,
    /// Trip date.
    pub date: NaiveDate,
    /// Free text description.
    pub description: Option<String>,
    /// Flat amount to reimburse.
    pub amount: Option<Decimal>,
    /// The owning period.
    pub period: Uuid,
}

impl MileageEntry {
    /// Builds an entry for `period` from user input, defaulting the date to `today`.
    pub fn from_input(period: Uuid, input: NewMileageEntry, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            resource: input.resource,
            address: input.address,
            distance: input.distance,
            date: input.date.unwrap_or(today),
            description: input.description,
            amount: input.amount,
            period,
        }
    }

    /// Replaces the user-supplied fields, keeping identity and owner.
    pub fn apply(&mut self, input: NewMileageEntry, today: NaiveDate) {
        let id = self.id;
        let period = self.period;
        *self = Self::from_input(period, input, today);
        self.id = id;
    }

    /// Returns the display name of the entry.
    ///
    /// # Example
    ///
    /// ```
    /// use employee_mileage::models::MileageEntry;
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let entry = MileageEntry {
    ///     id: Uuid::new_v4(),
    ///     resource: None,
    ///     address: "addr_1".to_string(),
    ///     distance: Some(12),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     description: Some("client visit".to_string()),
    ///     amount: None,
    ///     period: Uuid::new_v4(),
    /// };
    /// assert_eq!(entry.rec_name("Main Street 1"), "Main Street 1 - client visit");
    /// ```
    pub fn rec_name(&self, address_label: &str) -> String {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => {
                format!("{} - {}", address_label, description)
            }
            _ => address_label.to_string(),
        }
    }

    /// Returns true if the entry carries a non-zero distance or amount.
    pub fn has_distance_or_amount(&self) -> bool {
        let has_distance = self.distance.is_some_and(|d| d != 0);
        let has_amount = self.amount.is_some_and(|a| !a.is_zero());
        has_distance || has_amount
    }

    /// Validates the entry before it is stored.
    ///
    /// `address_label` is only used to name the entry in the error.
    pub fn validate(&self, address_label: &str) -> MileageResult<()> {
        if !self.has_distance_or_amount() {
            return Err(MileageError::MissingDistanceAndAmount {
                record: self.rec_name(address_label),
            });
        }

        if let Some(amount) = self.amount {
            if amount.normalize().scale() > PRICE_DIGITS {
                return Err(MileageError::InvalidAmountPrecision {
                    amount: amount.to_string(),
                    digits: PRICE_DIGITS,
                });
            }
            if amount.abs() >= Decimal::from(MAX_AMOUNT_UNITS) {
                return Err(MileageError::InvalidEntry {
                    field: "amount".to_string(),
                    message: format!("must be below {}", MAX_AMOUNT_UNITS),
                });
            }
        }

        if self.address.trim().is_empty() {
            return Err(MileageError::InvalidEntry {
                field: "address".to_string(),
                message: "is required".to_string(),
            });
        }

        Ok(())
    }

    /// The distance as a decimal, zero when missing.
    pub fn distance_units(&self) -> Decimal {
        Decimal::from(self.distance.unwrap_or(0))
    }

    /// The flat amount, zero when missing.
    pub fn flat_amount(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}
