//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculatedGrid,
    CalculationOptions,
    CalculationStats,
    // Cell types
    CellAddress,
    CellError,
    CellRange,
    // I/O types
    CsvReader,
    CsvWriter,
    // Error types
    Error,
    // Main types
    Grid,
    // Extension traits
    GridCalculationExt,
    GridEvaluator,
    GridExt,
    Result,
    Value,
};
