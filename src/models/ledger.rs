//! Accounting records: accounts, journals, fiscal periods and moves.
//!
//! A [`Move`] is a balanced set of [`MoveLine`]s recorded in a journal. The
//! [`FiscalPeriod`] date range check mirrors how pay periods are matched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account code (e.g. "4000").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Lines on this account must name a party.
    #[serde(default)]
    pub party_required: bool,
}

/// A journal moves are recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal code (e.g. "MISC").
    pub code: String,
    /// Journal name.
    pub name: String,
}

/// A fiscal period of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier for the period (e.g. "2026-03").
    pub id: String,
    /// Owning company.
    pub company: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Closed periods accept no new moves.
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

impl FiscalPeriod {
    /// Checks if a given date falls within this period, bounds included.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// One side of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLine {
    /// Account code.
    pub account: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Party, set only when the account requires it.
    pub party: Option<String>,
}

impl MoveLine {
    /// Creates a debit line.
    pub fn debit(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Decimal::ZERO,
            party: None,
        }
    }

    /// Creates a credit line.
    pub fn credit(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: Decimal::ZERO,
            credit: amount,
            party: None,
        }
    }

    /// Returns the same line with debit and credit swapped.
    pub fn reversed(&self) -> Self {
        Self {
            account: self.account.clone(),
            debit: self.credit,
            credit: self.debit,
            party: self.party.clone(),
        }
    }
}

/// The document a move originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", content = "id", rename_all = "snake_case")]
pub enum MoveOrigin {
    /// Posted from a mileage period.
    MileagePeriod(Uuid),
    /// Cancellation of another move.
    Move(Uuid),
}

/// A move waiting to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMove {
    /// Owning company.
    pub company: String,
    /// Fiscal period identifier.
    pub period: String,
    /// Journal code.
    pub journal: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Originating document.
    pub origin: Option<MoveOrigin>,
    /// Lines of the move.
    pub lines: Vec<MoveLine>,
}

impl NewMove {
    /// Sum of all debits.
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of all credits.
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// Returns true if debits equal credits.
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}

/// A recorded accounting move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Unique identifier for the move.
    pub id: Uuid,
    /// Owning company.
    pub company: String,
    /// Fiscal period identifier.
    pub period: String,
    /// Journal code.
    pub journal: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Originating document.
    pub origin: Option<MoveOrigin>,
    /// Lines of the move.
    pub lines: Vec<MoveLine>,
    /// The move that cancelled this one, if any.
    pub cancelled_by: Option<Uuid>,
}

impl Move {
    /// Records a new move under a fresh identifier.
    pub fn from_new(new: NewMove) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: new.company,
            period: new.period,
            journal: new.journal,
            date: new.date,
            origin: new.origin,
            lines: new.lines,
            cancelled_by: None,
        }
    }
}
