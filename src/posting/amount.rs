//! Mileage amount calculation.
//!
//! The amount of a period is computed in one pass over all its entries and
//! rounded once at the end, never per entry.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::MileageEntry;

/// Decimal places of posted amounts.
pub const POSTING_DECIMAL_PLACES: u32 = 2;

/// Breakdown of a period's reimbursable amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MileageAmount {
    /// Sum of all distances (missing counts as zero).
    pub total_distance: Decimal,
    /// `total_distance × rate`, unrounded.
    pub distance_amount: Decimal,
    /// Sum of all flat amounts (missing counts as zero).
    pub flat_amount: Decimal,
    /// Final amount, rounded to [`POSTING_DECIMAL_PLACES`].
    pub amount: Decimal,
}

/// Calculates the amount to reimburse for a set of entries.
///
/// `amount = Σdistance × price_per_km + Σamount`, rounded half-to-even to two
/// decimal places. Returns `None` when any step overflows a [`Decimal`].
///
/// # Examples
///
/// ```
/// use employee_mileage::models::{MileageEntry, NewMileageEntry};
/// use employee_mileage::posting::calculate_mileage_amount;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let entry = MileageEntry::from_input(
///     Uuid::new_v4(),
///     NewMileageEntry {
///         address: "addr_1".to_string(),
///         distance: Some(4),
///         ..Default::default()
///     },
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// );
///
/// let result = calculate_mileage_amount([&entry], Decimal::from_str("6.8785").unwrap()).unwrap();
/// assert_eq!(result.amount, Decimal::from_str("27.51").unwrap());
///
/// assert!(calculate_mileage_amount([&entry], Decimal::MAX).is_none());
/// ```
pub fn calculate_mileage_amount<'a, I>(entries: I, price_per_km: Decimal) -> Option<MileageAmount>
where
    I: IntoIterator<Item = &'a MileageEntry>,
{
    let (total_distance, flat_amount) = entries.into_iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(distance, flat), entry| {
            Some((
                distance.checked_add(entry.distance_units())?,
                flat.checked_add(entry.flat_amount())?,
            ))
        },
    )?;

    let distance_amount = total_distance.checked_mul(price_per_km)?;
    let amount = distance_amount
        .checked_add(flat_amount)?
        .round_dp_with_strategy(POSTING_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);

    Some(MileageAmount {
        total_distance,
        distance_amount,
        flat_amount,
        amount,
    })
}
