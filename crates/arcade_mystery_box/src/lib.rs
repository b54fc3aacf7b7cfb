//! Pure mystery-box rules.
//!
//! Twenty-five closed boxes hide one bomb. Opening every safe box wins;
//! opening the bomb loses.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod grid;

pub use grid::{BoxError, BoxGrid, BoxStatus, GRID_COLS, OpenOutcome, SAFE_BOXES, TOTAL_BOXES};
