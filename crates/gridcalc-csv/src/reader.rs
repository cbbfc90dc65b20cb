//! CSV reader

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use csv::{ReaderBuilder, StringRecord};
use gridcalc_core::Grid;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// What an import into an existing grid changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records read, header excluded
    pub rows: usize,
    /// Cells written (blank fields clear their cell and are counted too)
    pub updated_cells: usize,
    /// Fields that fell outside the grid
    pub dropped_fields: usize,
}

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a new grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV data into a new grid sized to the data
    ///
    /// The grid has one row per record and as many columns as the widest
    /// record. Fields are stored as raw cell text.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let records = Self::records(reader, options)?;
        log::debug!("read {} CSV records", records.len());
        Ok(Grid::from_rows(records.iter().map(|r| r.iter()))?)
    }

    /// Read CSV data into an existing grid, starting at A1
    ///
    /// The grid keeps its size; fields that do not fit are dropped.
    pub fn read_into<R: Read>(
        grid: &mut Grid,
        reader: R,
        options: &CsvReadOptions,
    ) -> CsvResult<ImportSummary> {
        let records = Self::records(reader, options)?;
        let mut summary = ImportSummary {
            rows: records.len(),
            ..ImportSummary::default()
        };

        for (row, record) in records.iter().enumerate() {
            for (col, field) in record.iter().enumerate() {
                let (Ok(row), Ok(col)) = (u32::try_from(row), u16::try_from(col)) else {
                    summary.dropped_fields += 1;
                    continue;
                };
                if row >= grid.row_count() || col >= grid.col_count() {
                    summary.dropped_fields += 1;
                    continue;
                }
                grid.set_cell_text(row, col, field)?;
                summary.updated_cells += 1;
            }
        }

        if summary.dropped_fields > 0 {
            log::warn!(
                "dropped {} CSV fields outside the {}x{} grid",
                summary.dropped_fields,
                grid.row_count(),
                grid.col_count()
            );
        }
        Ok(summary)
    }

    fn records<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<StringRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            records.push(result?);
        }
        Ok(records)
    }
}
