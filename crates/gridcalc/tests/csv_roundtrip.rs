//! CSV import/export through the umbrella crate

use gridcalc::prelude::*;
use gridcalc::{CsvReadOptions, CsvWriteOptions};
use pretty_assertions::assert_eq;

#[test]
fn test_open_calculate_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    std::fs::write(&input, "Alpha,123\nBeta,456\nTotal,=SUM(B1:B2)\n").unwrap();

    let grid = Grid::open(&input).unwrap();
    assert_eq!((grid.row_count(), grid.col_count()), (3, 2));
    assert_eq!(grid.calculate().display_at(2, 1), "579");

    let output = dir.path().join("out.csv");
    grid.save(&output).unwrap();
    let saved = std::fs::read_to_string(&output).unwrap();
    assert_eq!(saved, "Alpha,123\nBeta,456\nTotal,=SUM(B1:B2)\n");
}

#[test]
fn test_export_calculated_values_with_header() {
    let mut grid = Grid::new(2, 2).unwrap();
    grid.set_cell("A1", "2").unwrap();
    grid.set_cell("B1", "=A1*A1").unwrap();
    grid.set_cell("A2", "=B1/0").unwrap();

    let options = CsvWriteOptions {
        write_header: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    CsvWriter::write_rows(&grid.calculate().display_rows(), &mut out, &options).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "A,B\n2,4\n#DIV/0!,\n");
}

#[test]
fn test_import_into_default_sheet() {
    let mut grid = Grid::default();
    let summary = CsvReader::read_into(
        &mut grid,
        "Alpha,123\nBeta,456\n".as_bytes(),
        &CsvReadOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.updated_cells, 4);
    assert_eq!(grid.row_count(), 12);
    assert_eq!(grid.text_at(1, 0), "Beta");
}

#[test]
fn test_unsupported_extension() {
    assert!(Grid::open("sheet.xlsx").is_err());
    assert!(Grid::open("sheet.txt").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.txt");
    assert!(Grid::default().save(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SHEET.CSV");
    let mut grid = Grid::new(1, 2).unwrap();
    grid.set_cell("B1", "=1+1").unwrap();

    grid.save(&path).unwrap();
    assert_eq!(Grid::open(&path).unwrap().text_at(0, 1), "=1+1");
}
