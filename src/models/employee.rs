//! Employee, party and company models.
//!
//! These records are owned by the company registry; the mileage module only reads
//! them. The employee carries the two mileage-specific fields: the rate per
//! distance unit and the account debited on posting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency with its display precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO code (e.g., "EUR").
    pub code: String,
    /// Number of fractional digits.
    pub digits: u32,
}

/// A company owning employees, journals and fiscal periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company.
    pub id: String,
    /// Company name.
    pub name: String,
    /// Company currency.
    pub currency: Currency,
}

/// A postal address belonging to a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Unique identifier for the address.
    pub id: String,
    /// Street line.
    pub street: String,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
}

impl Address {
    /// Returns the display label of the address.
    ///
    /// # Example
    ///
    /// ```
    /// use employee_mileage::models::Address;
    ///
    /// let address = Address {
    ///     id: "addr_1".to_string(),
    ///     street: "Main Street 1".to_string(),
    ///     city: Some("Springfield".to_string()),
    /// };
    /// assert_eq!(address.rec_name(), "Main Street 1, Springfield");
    /// ```
    pub fn rec_name(&self) -> String {
        match self.city.as_deref() {
            Some(city) if !city.is_empty() => format!("{}, {}", self.street, city),
            _ => self.street.clone(),
        }
    }
}

/// A person or organisation known to the accounting system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier for the party.
    pub id: String,
    /// Party name, used in user-facing errors.
    pub name: String,
    /// Payable account set on the party itself.
    #[serde(default)]
    pub account_payable: Option<String>,
    /// Addresses of the party.
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Party {
    /// Returns the payable account to use for this party.
    ///
    /// The party's own account wins over the company default.
    pub fn account_payable_used<'a>(&'a self, company_default: Option<&'a str>) -> Option<&'a str> {
        self.account_payable.as_deref().or(company_default)
    }
}

/// An employee able to claim mileage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The company employing this person.
    pub company: String,
    /// The party representing the employee.
    pub party: String,
    /// Reimbursement rate per distance unit.
    #[serde(default)]
    pub price_per_km: Option<Decimal>,
    /// Account debited when a mileage period is posted.
    #[serde(default)]
    pub debit_account: Option<String>,
}
