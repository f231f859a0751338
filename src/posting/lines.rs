//! Move line generation for a posted period.

use rust_decimal::Decimal;

use crate::models::{Account, MoveLine};

/// Builds the debit and credit lines of a mileage move.
///
/// Both lines carry `amount`; `party` is attached to a line only when its account
/// requires a party.
///
/// # Examples
///
/// ```
/// use employee_mileage::models::Account;
/// use employee_mileage::posting::build_move_lines;
/// use rust_decimal::Decimal;
///
/// let expense = Account { code: "6250".into(), name: "Travel".into(), party_required: false };
/// let payable = Account { code: "4000".into(), name: "Payable".into(), party_required: true };
///
/// let [debit, credit] = build_move_lines(Decimal::new(2751, 2), &expense, &payable, "party_emp");
/// assert_eq!(debit.debit, credit.credit);
/// assert!(debit.party.is_none());
/// assert_eq!(credit.party.as_deref(), Some("party_emp"));
/// ```
pub fn build_move_lines(
    amount: Decimal,
    debit_account: &Account,
    credit_account: &Account,
    party: &str,
) -> [MoveLine; 2] {
    let mut debit = MoveLine::debit(&debit_account.code, amount);
    if debit_account.party_required {
        debit.party = Some(party.to_string());
    }

    let mut credit = MoveLine::credit(&credit_account.code, amount);
    if credit_account.party_required {
        credit.party = Some(party.to_string());
    }

    [debit, credit]
}
