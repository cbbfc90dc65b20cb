//! Whole-grid calculation
//!
//! Evaluates every cell of a grid into a [`CalculatedGrid`] of values. Each
//! formula cell is evaluated from scratch with its own [`GridEvaluator`], so
//! the result of a cell never depends on which cells were calculated before it.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new(3, 2).unwrap();
//! grid.set_cell("A1", "10").unwrap();
//! grid.set_cell("A2", "=A1/0").unwrap();
//!
//! let calculated = grid.calculate();
//! assert_eq!(calculated.display_at(1, 0), "#DIV/0!");
//! assert_eq!(calculated.stats().errors, 1);
//! ```

use crate::{CellAddress, CellError, Grid, GridEvaluator, Value};
use ahash::AHashMap;
use gridcalc_core::is_formula_text;
use gridcalc_formula::parse_stored_text;

/// Options for grid calculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// Copy literal cells through as their raw text instead of reading them
    /// back as numbers and booleans (default: false)
    pub formulas_only: bool,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of formula cells
    pub formula_count: usize,
    /// Number of non-blank cells calculated
    pub cells_calculated: usize,
    /// Number of formula cells whose result is an error value
    pub errors: usize,
    /// Number of formula cells caught in a circular reference
    pub circular_references: usize,
}

/// The values of every cell of a grid
#[derive(Debug, Clone)]
pub struct CalculatedGrid {
    row_count: u32,
    col_count: u16,
    /// Non-blank cells only
    values: AHashMap<CellAddress, Value>,
    stats: CalculationStats,
}

impl CalculatedGrid {
    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns
    pub fn col_count(&self) -> u16 {
        self.col_count
    }

    pub fn stats(&self) -> &CalculationStats {
        &self.stats
    }

    /// The value of a cell. Blank cells and cells outside the grid are blank.
    pub fn value_at(&self, row: u32, col: u16) -> Value {
        self.values
            .get(&CellAddress::new(row, col))
            .cloned()
            .unwrap_or(Value::Blank)
    }

    /// The value of a cell rendered for display
    pub fn display_at(&self, row: u32, col: u16) -> String {
        self.values
            .get(&CellAddress::new(row, col))
            .map(Value::to_display_string)
            .unwrap_or_default()
    }

    /// Every cell rendered for display, row by row
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let mut rows =
            vec![vec![String::new(); self.col_count as usize]; self.row_count as usize];
        for (addr, value) in &self.values {
            rows[addr.row as usize][addr.col as usize] = value.to_display_string();
        }
        rows
    }
}

/// Extension trait for Grid to add calculation methods
pub trait GridCalculationExt {
    /// Calculate every cell with default options
    fn calculate(&self) -> CalculatedGrid;

    /// Calculate every cell with custom options
    fn calculate_with_options(&self, options: &CalculationOptions) -> CalculatedGrid;
}

impl GridCalculationExt for Grid {
    fn calculate(&self) -> CalculatedGrid {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(&self, options: &CalculationOptions) -> CalculatedGrid {
        let mut stats = CalculationStats::default();
        let mut values = AHashMap::new();

        for (addr, text) in self.cells() {
            let value = if is_formula_text(text) {
                stats.formula_count += 1;
                let value = GridEvaluator::new(self).evaluate_cell(addr.row, addr.col);
                match value.error() {
                    Some(CellError::Cycle) => {
                        stats.circular_references += 1;
                        stats.errors += 1;
                    }
                    Some(_) => stats.errors += 1,
                    None => {}
                }
                value
            } else if options.formulas_only {
                Value::Text(text.to_string())
            } else {
                parse_stored_text(text)
            };

            stats.cells_calculated += 1;
            values.insert(addr, value);
        }

        log::debug!(
            "calculated {} cells ({} formulas, {} errors)",
            stats.cells_calculated,
            stats.formula_count,
            stats.errors
        );

        CalculatedGrid {
            row_count: self.row_count(),
            col_count: self.col_count(),
            values,
            stats,
        }
    }
}
