//! Mileage period model and its workflow states.
//!
//! A [`MileagePeriod`] groups the mileage entries of one employee and moves through
//! the [`PeriodState`] graph:
//!
//! ```text
//! draft -> confirmed -> posted
//!   |          |          |
//!   +----------+----------+--> cancelled -> draft
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MileageError, MileageResult};

use super::NewMileageEntry;

/// The workflow state of a mileage period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodState {
    /// Entries are still being recorded.
    #[default]
    Draft,
    /// Entries are frozen, waiting to be posted.
    Confirmed,
    /// An accounting move has been created.
    Posted,
    /// The period was abandoned or its move cancelled.
    Cancelled,
}

impl PeriodState {
    /// Every allowed `(from, to)` transition.
    pub const TRANSITIONS: [(PeriodState, PeriodState); 6] = [
        (PeriodState::Draft, PeriodState::Confirmed),
        (PeriodState::Draft, PeriodState::Cancelled),
        (PeriodState::Confirmed, PeriodState::Posted),
        (PeriodState::Confirmed, PeriodState::Cancelled),
        (PeriodState::Posted, PeriodState::Cancelled),
        (PeriodState::Cancelled, PeriodState::Draft),
    ];

    /// Returns true if the period may go from `self` to `to` in one step.
    ///
    /// # Example
    ///
    /// ```
    /// use employee_mileage::models::PeriodState;
    ///
    /// assert!(PeriodState::Confirmed.can_transition_to(PeriodState::Posted));
    /// assert!(!PeriodState::Draft.can_transition_to(PeriodState::Posted));
    /// ```
    pub fn can_transition_to(self, to: PeriodState) -> bool {
        Self::TRANSITIONS.contains(&(self, to))
    }

    /// Returns the lowercase name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodState::Draft => "draft",
            PeriodState::Confirmed => "confirmed",
            PeriodState::Posted => "posted",
            PeriodState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PeriodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-supplied fields of a new period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPeriod {
    /// Label of the period.
    pub name: String,
    /// Employee identifier; defaults to the employee of the calling context.
    #[serde(default)]
    pub employee: Option<String>,
    /// Entries created together with the period.
    #[serde(default)]
    pub mileage: Vec<NewMileageEntry>,
}

/// Changes to the header of a draft period. Missing fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodUpdate {
    /// New label.
    #[serde(default)]
    pub name: Option<String>,
    /// New employee identifier.
    #[serde(default)]
    pub employee: Option<String>,
}

/// A batch of mileage entries for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileagePeriod {
    /// Unique identifier for the period.
    pub id: Uuid,
    /// Label of the period (e.g. "March 2026").
    pub name: String,
    /// The employee identifier.
    pub employee: String,
    /// Entry identifiers, in insertion order.
    pub mileage: Vec<Uuid>,
    /// Current workflow state.
    pub state: PeriodState,
    /// The accounting move produced by posting (or its cancellation).
    #[serde(rename = "move")]
    pub account_move: Option<Uuid>,
}

impl MileagePeriod {
    /// Creates an empty draft period.
    pub fn new(name: impl Into<String>, employee: impl Into<String>) -> MileageResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MileageError::InvalidPeriod {
                field: "name".to_string(),
                message: "is required".to_string(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            employee: employee.into(),
            mileage: Vec::new(),
            state: PeriodState::Draft,
            account_move: None,
        })
    }

    /// Moves the period to `to`, returning the previous state.
    pub fn transition(&mut self, to: PeriodState) -> MileageResult<PeriodState> {
        self.check_transition(to)?;
        let from = self.state;
        self.state = to;
        Ok(from)
    }

    /// Fails with [`MileageError::InvalidTransition`] if `to` is not reachable.
    pub fn check_transition(&self, to: PeriodState) -> MileageResult<()> {
        if self.state.can_transition_to(to) {
            Ok(())
        } else {
            Err(MileageError::InvalidTransition {
                period: self.id,
                from: self.state,
                to,
            })
        }
    }

    /// Fails unless the period is still a draft.
    pub fn ensure_editable(&self) -> MileageResult<()> {
        if self.state == PeriodState::Draft {
            Ok(())
        } else {
            Err(MileageError::PeriodNotEditable {
                period: self.id,
                state: self.state,
            })
        }
    }

    /// Fails unless the period is a draft or cancelled.
    pub fn ensure_deletable(&self) -> MileageResult<()> {
        match self.state {
            PeriodState::Draft | PeriodState::Cancelled => Ok(()),
            state => Err(MileageError::PeriodNotDeletable {
                period: self.id,
                state,
            }),
        }
    }

    /// Returns a fresh draft copy without entries or move.
    ///
    /// The caller is responsible for copying the entries.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            employee: self.employee.clone(),
            mileage: Vec::new(),
            state: PeriodState::Draft,
            account_move: None,
        }
    }
}
