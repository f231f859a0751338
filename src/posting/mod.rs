//! Posting logic for mileage periods.
//!
//! This module turns a confirmed period into an accounting move: the amount
//! calculation, the generation of the two balancing lines, and the posting of
//! the move itself.

mod amount;
mod engine;
mod lines;

pub use amount::{MileageAmount, POSTING_DECIMAL_PLACES, calculate_mileage_amount};
pub use engine::{PostedMove, post_period};
pub use lines::build_move_lines;
