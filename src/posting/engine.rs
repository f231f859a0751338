//! Posting of a single mileage period.
//!
//! Every prerequisite is checked before the ledger is touched, so a failing
//! period never leaves a move behind.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{MileageError, MileageResult};
use crate::ledger::Ledger;
use crate::models::{MileageEntry, MileagePeriod, MoveOrigin, NewMove};
use crate::registry::Registry;

use super::amount::{MileageAmount, calculate_mileage_amount};
use super::lines::build_move_lines;

/// The move created for a period.
#[derive(Debug, Clone)]
pub struct PostedMove {
    /// Identifier of the recorded move.
    pub move_id: Uuid,
    /// The amount breakdown the move was built from.
    pub amount: MileageAmount,
}

/// Creates the accounting move of `period`.
///
/// `company` is the active company used for the fiscal period and journal
/// lookups; `today` is the accounting date.
///
/// # Errors
///
/// In order of checking: `MissingRatePerDistance`, `AmountOverflow`, `MissingDebitAccount`,
/// `MissingCreditAccount`, `FiscalPeriodNotFound`, `MissingMileageJournal`, plus
/// `RecordNotFound` for dangling references.
pub fn post_period<L: Ledger>(
    period: &MileagePeriod,
    entries: &[&MileageEntry],
    company: &str,
    today: NaiveDate,
    registry: &Registry,
    config: &ConfigLoader,
    ledger: &mut L,
) -> MileageResult<PostedMove> {
    let employee = registry.employee(&period.employee)?;
    let party = registry.employee_party(employee)?;

    let price_per_km = employee
        .price_per_km
        .ok_or_else(|| MileageError::MissingRatePerDistance {
            name: party.name.clone(),
        })?;

    let amount = calculate_mileage_amount(entries.iter().copied(), price_per_km)
        .ok_or_else(|| MileageError::AmountOverflow {
            name: party.name.clone(),
        })?;

    let debit_code =
        employee
            .debit_account
            .as_deref()
            .ok_or_else(|| MileageError::MissingDebitAccount {
                name: party.name.clone(),
            })?;
    let debit_account = ledger.account(debit_code)?.clone();

    let credit_code = party
        .account_payable_used(config.default_account_payable(&employee.company))
        .ok_or_else(|| MileageError::MissingCreditAccount {
            name: party.name.clone(),
        })?;
    let credit_account = ledger.account(credit_code)?.clone();

    let lines = build_move_lines(amount.amount, &debit_account, &credit_account, &party.id);

    let fiscal_period = ledger.find_fiscal_period(company, today)?.id.clone();
    let journal = config.employee_mileage_journal(company)?.to_string();

    let new_move = NewMove {
        company: employee.company.clone(),
        period: fiscal_period,
        journal,
        date: today,
        origin: Some(MoveOrigin::MileagePeriod(period.id)),
        lines: lines.to_vec(),
    };
    let move_id = ledger.create_move(new_move)?.id;

    info!(
        period_id = %period.id,
        employee = %employee.id,
        move_id = %move_id,
        amount = %amount.amount,
        "Mileage period posted"
    );

    Ok(PostedMove { move_id, amount })
}
