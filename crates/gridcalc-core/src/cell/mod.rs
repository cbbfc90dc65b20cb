//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular range of cells (e.g., "A1:B10")
//! - [`CellError`] - Error codes shown in a cell instead of a value

mod address;
mod error;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use error::CellError;
