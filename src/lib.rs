//! Employee mileage recording and posting
//!
//! This crate records the distances employees travel and the flat expenses
//! they incur, groups them into mileage periods, and posts each confirmed
//! period to the general ledger as a balanced accounting move that can later
//! be cancelled.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod posting;
pub mod registry;
pub mod service;
