//! # gridcalc
//!
//! A small spreadsheet formula engine.
//!
//! A [`Grid`] stores the raw text typed into each cell. Text starting with `=`
//! is a formula; anything else is a literal that reads back as a number, a
//! boolean or text. Formulas can reference other cells (`A1`) and ranges
//! (`A1:B3`) and call 28 built-in functions. Errors are values (`#DIV/0!`,
//! `#VALUE!`, `#NAME?`, `#NUM!`, `#CYCLE!`, `#ERROR`) and flow through
//! formulas instead of aborting them.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new(12, 8).unwrap();
//! grid.set_cell("A1", "10").unwrap();
//! grid.set_cell("A2", "5").unwrap();
//! grid.set_cell("A3", "=A1+A2").unwrap();
//! grid.set_cell("B1", "=B1").unwrap();
//!
//! let calculated = grid.calculate();
//! assert_eq!(calculated.display_at(2, 0), "15");
//! assert_eq!(calculated.display_at(0, 1), "#CYCLE!");
//! assert_eq!(calculated.stats().circular_references, 1);
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{CalculatedGrid, CalculationOptions, CalculationStats, GridCalculationExt};

// Re-export core types
pub use gridcalc_core::{
    is_formula_text, CellAddress, CellError, CellRange, Error, Grid, Result, DEFAULT_COLS,
    DEFAULT_ROWS, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    classify, evaluate, parse_formula, parse_stored_text, Builtin, CellContent, EmptyContext,
    EvaluationContext, Expr, FormulaError, FormulaResult, GridEvaluator, Value,
};

// Re-export I/O types
pub use gridcalc_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, ImportSummary,
};

use std::path::Path;

/// Extension trait for Grid to add file I/O
pub trait GridExt: Sized {
    /// Open a grid from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the grid's raw cell text to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

impl GridExt for Grid {
    fn open<P: AsRef<Path>>(path: P) -> Result<Grid> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("csv") => CsvReader::read_file(path, &CsvReadOptions::default())
                .map_err(|e| Error::other(e.to_string())),
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("csv") => {
                CsvWriter::write_file(self, path, &CsvWriteOptions::default())
                    .map_err(|e| Error::other(e.to_string()))
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }
}
