//! The accounting ledger seen from the mileage module.
//!
//! [`Ledger`] is everything posting needs from the general ledger: account and
//! journal lookup, fiscal period resolution, move creation and cancellation.
//! [`InMemoryLedger`] is the implementation used by the service and the tests.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::MileageResult;
use crate::models::{Account, FiscalPeriod, Journal, Move, NewMove};

pub use memory::InMemoryLedger;

/// Accounting operations used by mileage posting.
pub trait Ledger {
    /// Looks up an account by code.
    fn account(&self, code: &str) -> MileageResult<&Account>;

    /// Looks up a journal by code.
    fn journal(&self, code: &str) -> MileageResult<&Journal>;

    /// Finds the open fiscal period of `company` containing `date`.
    fn find_fiscal_period(&self, company: &str, date: NaiveDate) -> MileageResult<&FiscalPeriod>;

    /// Records a balanced move.
    fn create_move(&mut self, new: NewMove) -> MileageResult<&Move>;

    /// Cancels a move on `date` and returns the move that replaces it.
    ///
    /// Cancelling an already cancelled move returns its existing cancellation.
    /// A move that is itself a cancellation is returned unchanged.
    fn cancel_move(&mut self, id: Uuid, date: NaiveDate) -> MileageResult<&Move>;

    /// Looks up a recorded move.
    fn get_move(&self, id: Uuid) -> MileageResult<&Move>;
}
