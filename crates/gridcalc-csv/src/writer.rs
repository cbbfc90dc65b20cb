//! CSV writer

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use csv::{Terminator, WriterBuilder};
use gridcalc_core::{CellAddress, Grid};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid's raw cell text to a file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_grid(grid, file, options)
    }

    /// Write a grid's raw cell text, one record per grid row
    ///
    /// Formulas are written as entered, not as their results.
    pub fn write_grid<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        Self::write_rows(&grid.to_rows(), writer, options)
    }

    /// Write a matrix of already rendered text, such as calculated display values
    pub fn write_rows<W: Write, S: AsRef<str>>(
        rows: &[Vec<S>],
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => Terminator::Any(b'\n'),
            LineTerminator::CRLF => Terminator::CRLF,
        };

        let mut csv_writer = WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if options.write_header {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            let header = (0..width).map(|col| CellAddress::column_to_letters(col as u16));
            csv_writer.write_record(header)?;
        }

        for row in rows {
            csv_writer.write_record(row.iter().map(|s| AsRef::<str>::as_ref(s)))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
