//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides the fundamental types shared by the other gridcalc crates:
//! - [`CellAddress`] and [`CellRange`] - A1-style cell addressing and rectangular ranges
//! - [`CellError`] - The value-level error codes a formula can produce (`#DIV/0!`, ...)
//! - [`Grid`] - The raw cell-text store a formula is evaluated against
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, Grid};
//!
//! let mut grid = Grid::new(10, 4).unwrap();
//! grid.set_cell("A1", "10").unwrap();
//! grid.set_cell("A2", "=A1*2").unwrap();
//!
//! let addr = CellAddress::parse("A2").unwrap();
//! assert_eq!(grid.text_at(addr.row, addr.col), "=A1*2");
//! ```

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{CellAddress, CellError, CellRange};
pub use error::{Error, Result};
pub use grid::{is_formula_text, Grid};

/// Maximum number of rows addressable by an A1 label (seven row digits)
pub const MAX_ROWS: u32 = 9_999_999;

/// Maximum number of columns addressable by an A1 label (`ZZZ`)
pub const MAX_COLS: u16 = 18_278;

/// Row count of a freshly created sheet
pub const DEFAULT_ROWS: u32 = 12;

/// Column count of a freshly created sheet
pub const DEFAULT_COLS: u16 = 8;
