//! Core data models for the employee mileage module.
//!
//! This module contains the mileage records themselves and the registry and
//! accounting records they refer to.

mod employee;
mod ledger;
mod mileage;
mod period;

pub use employee::{Address, Company, Currency, Employee, Party};
pub use ledger::{Account, FiscalPeriod, Journal, Move, MoveLine, MoveOrigin, NewMove};
pub use mileage::{
    MAX_AMOUNT_UNITS, MileageEntry, NewMileageEntry, PRICE_DIGITS, Resource, ResourceKind,
};
pub use period::{MileagePeriod, NewPeriod, PeriodState, PeriodUpdate};
