//! In-memory ledger.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::{MileageError, MileageResult};
use crate::models::{Account, FiscalPeriod, Journal, Move, MoveOrigin, NewMove};

use super::Ledger;

/// A ledger kept entirely in memory.
///
/// Cloning it takes a full snapshot, which is how the service rolls back a
/// failed batch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    accounts: HashMap<String, Account>,
    journals: HashMap<String, Journal>,
    fiscal_periods: Vec<FiscalPeriod>,
    moves: HashMap<Uuid, Move>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    pub fn add_account(&mut self, account: Account) {
        self.accounts.insert(account.code.clone(), account);
    }

    /// Adds or replaces a journal.
    pub fn add_journal(&mut self, journal: Journal) {
        self.journals.insert(journal.code.clone(), journal);
    }

    /// Adds a fiscal period.
    pub fn add_fiscal_period(&mut self, period: FiscalPeriod) {
        self.fiscal_periods.push(period);
    }

    /// Returns all recorded moves, in no particular order.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.values()
    }

    /// Number of recorded moves.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

impl Ledger for InMemoryLedger {
    fn account(&self, code: &str) -> MileageResult<&Account> {
        self.accounts
            .get(code)
            .ok_or_else(|| MileageError::not_found("account", code))
    }

    fn journal(&self, code: &str) -> MileageResult<&Journal> {
        self.journals
            .get(code)
            .ok_or_else(|| MileageError::not_found("journal", code))
    }

    fn find_fiscal_period(&self, company: &str, date: NaiveDate) -> MileageResult<&FiscalPeriod> {
        self.fiscal_periods
            .iter()
            .find(|p| p.company == company && p.open && p.contains_date(date))
            .ok_or_else(|| MileageError::FiscalPeriodNotFound {
                company: company.to_string(),
                date,
            })
    }

    fn create_move(&mut self, new: NewMove) -> MileageResult<&Move> {
        self.journal(&new.journal)?;
        for line in &new.lines {
            self.account(&line.account)?;
        }

        if !new.is_balanced() {
            return Err(MileageError::UnbalancedMove {
                debit: new.total_debit().to_string(),
                credit: new.total_credit().to_string(),
            });
        }

        let recorded = Move::from_new(new);
        debug!(move_id = %recorded.id, journal = %recorded.journal, "Move recorded");
        let recorded: &Move = self.moves.entry(recorded.id).or_insert(recorded);
        Ok(recorded)
    }

    fn cancel_move(&mut self, id: Uuid, date: NaiveDate) -> MileageResult<&Move> {
        let original = self.get_move(id)?.clone();

        if let Some(existing) = original.cancelled_by {
            return self.get_move(existing);
        }
        // A cancellation stays as is.
        if let Some(MoveOrigin::Move(_)) = original.origin {
            return self.get_move(id);
        }

        let period = self.find_fiscal_period(&original.company, date)?.id.clone();
        let cancellation = NewMove {
            company: original.company.clone(),
            period,
            journal: original.journal.clone(),
            date,
            origin: Some(MoveOrigin::Move(original.id)),
            lines: original.lines.iter().map(|l| l.reversed()).collect(),
        };

        let cancellation_id = self.create_move(cancellation)?.id;
        if let Some(original) = self.moves.get_mut(&id) {
            original.cancelled_by = Some(cancellation_id);
        }
        self.get_move(cancellation_id)
    }

    fn get_move(&self, id: Uuid) -> MileageResult<&Move> {
        self.moves
            .get(&id)
            .ok_or_else(|| MileageError::not_found("move", id))
    }
}
