//! # gridcalc-csv
//!
//! CSV reader and writer for gridcalc grids. Fields are raw cell text, so
//! formulas survive a round trip unevaluated.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::{CsvReader, ImportSummary};
pub use writer::CsvWriter;
