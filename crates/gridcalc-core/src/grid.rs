//! Grid type - the raw cell-text store formulas are evaluated against

use ahash::AHashMap;

use crate::cell::{CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};

/// A bounded, sparse grid of raw cell text.
///
/// Cells hold the text a user typed: literals (`"42"`, `"hello"`, `"TRUE"`) or
/// formulas (`"=A1+1"`). Blank cells are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    row_count: u32,
    col_count: u16,
    cells: AHashMap<CellAddress, String>,
}

impl Grid {
    /// Create an empty grid with the given dimensions
    pub fn new(row_count: u32, col_count: u16) -> Result<Self> {
        Self::check_dimensions(row_count, col_count)?;
        Ok(Self {
            row_count,
            col_count,
            cells: AHashMap::new(),
        })
    }

    /// Build a grid from rows of raw text, sized to fit the widest row
    pub fn from_rows<R, S>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = AHashMap::new();
        let mut row_count: u32 = 0;
        let mut col_count: u16 = 0;

        for (row, values) in rows.into_iter().enumerate() {
            let row = u32::try_from(row).map_err(|_| Error::RowOutOfBounds(u32::MAX, MAX_ROWS))?;
            for (col, text) in values.into_iter().enumerate() {
                let col = u16::try_from(col)
                    .map_err(|_| Error::ColumnOutOfBounds(u16::MAX, MAX_COLS))?;
                col_count = col_count.max(col.saturating_add(1));
                let text = text.as_ref();
                if !text.trim().is_empty() {
                    cells.insert(CellAddress::new(row, col), text.to_string());
                }
            }
            row_count = row + 1;
        }

        let grid = Self {
            row_count: row_count.max(1),
            col_count: col_count.max(1),
            cells,
        };
        Self::check_dimensions(grid.row_count, grid.col_count)?;
        Ok(grid)
    }

    fn check_dimensions(rows: u32, cols: u16) -> Result<()> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(())
    }

    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns
    pub fn col_count(&self) -> u16 {
        self.col_count
    }

    /// The full area of the grid as a range
    pub fn bounds(&self) -> CellRange {
        CellRange::from_indices(0, 0, self.row_count - 1, self.col_count - 1)
    }

    /// Check if an address lies inside the grid
    pub fn contains(&self, addr: CellAddress) -> bool {
        addr.row < self.row_count && addr.col < self.col_count
    }

    /// Clip a range to the grid; `None` if it lies entirely outside
    pub fn clamp(&self, range: CellRange) -> Option<CellRange> {
        range.intersect(&self.bounds())
    }

    /// Change the dimensions.
    ///
    /// Text outside the new bounds is retained but hidden, so growing the grid
    /// again brings it back.
    pub fn resize(&mut self, row_count: u32, col_count: u16) -> Result<()> {
        Self::check_dimensions(row_count, col_count)?;
        self.row_count = row_count;
        self.col_count = col_count;
        Ok(())
    }

    // === Cell Access ===

    /// Set a cell by address string (e.g., "A1")
    pub fn set_cell(&mut self, address: &str, text: impl Into<String>) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_text(addr.row, addr.col, text)
    }

    /// Set a cell's raw text. Empty or whitespace-only text clears the cell.
    pub fn set_cell_text(&mut self, row: u32, col: u16, text: impl Into<String>) -> Result<()> {
        if row >= self.row_count {
            return Err(Error::RowOutOfBounds(row, self.row_count - 1));
        }
        if col >= self.col_count {
            return Err(Error::ColumnOutOfBounds(col, self.col_count - 1));
        }

        let text = text.into();
        let addr = CellAddress::new(row, col);
        if text.trim().is_empty() {
            self.cells.remove(&addr);
        } else {
            self.cells.insert(addr, text);
        }
        Ok(())
    }

    /// Get a cell's raw text, `None` if blank or outside the grid
    pub fn cell_text(&self, row: u32, col: u16) -> Option<&str> {
        let addr = CellAddress::new(row, col);
        if !self.contains(addr) {
            return None;
        }
        self.cells.get(&addr).map(String::as_str)
    }

    /// Get a cell's raw text, `""` if blank
    pub fn text_at(&self, row: u32, col: u16) -> &str {
        self.cell_text(row, col).unwrap_or("")
    }

    /// Iterate over non-blank cells inside the grid (unordered)
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &str)> + '_ {
        self.cells
            .iter()
            .filter(|(addr, _)| self.contains(**addr))
            .map(|(addr, text)| (*addr, text.as_str()))
    }

    /// Iterate over cells holding a formula, in row-major order
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellAddress, &str)> + '_ {
        let mut formulas: Vec<_> = self
            .cells()
            .filter(|(_, text)| is_formula_text(text))
            .collect();
        formulas.sort_by_key(|(addr, _)| *addr);
        formulas.into_iter()
    }

    /// Number of non-blank cells inside the grid
    pub fn non_blank_count(&self) -> usize {
        self.cells().count()
    }

    /// Materialize the grid as `row_count x col_count` rows of raw text
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows =
            vec![vec![String::new(); self.col_count as usize]; self.row_count as usize];
        for (addr, text) in self.cells() {
            rows[addr.row as usize][addr.col as usize] = text.to_string();
        }
        rows
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROWS,
            col_count: DEFAULT_COLS,
            cells: AHashMap::new(),
        }
    }
}

/// Whether raw cell text is a formula (leading `=` after trimming)
pub fn is_formula_text(text: &str) -> bool {
    text.trim_start().starts_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_dimensions() {
        let grid = Grid::default();
        assert_eq!(grid.row_count(), 12);
        assert_eq!(grid.col_count(), 8);
        assert_eq!(grid.bounds().to_string(), "A1:H12");
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(Error::InvalidDimensions { rows: 0, cols: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(MAX_ROWS + 1, 1).is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell("A1", "10").unwrap();
        grid.set_cell_text(1, 2, "=A1*2").unwrap();

        assert_eq!(grid.cell_text(0, 0), Some("10"));
        assert_eq!(grid.text_at(1, 2), "=A1*2");
        assert_eq!(grid.cell_text(2, 2), None);
        assert_eq!(grid.text_at(2, 2), "");
    }

    #[test]
    fn test_blank_text_clears_cell() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_cell("A1", "x").unwrap();
        grid.set_cell("A1", "   ").unwrap();
        assert_eq!(grid.cell_text(0, 0), None);
        assert_eq!(grid.non_blank_count(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(matches!(
            grid.set_cell_text(2, 0, "x"),
            Err(Error::RowOutOfBounds(2, 1))
        ));
        assert!(matches!(
            grid.set_cell("C1", "x"),
            Err(Error::ColumnOutOfBounds(2, 1))
        ));
    }

    #[test]
    fn test_resize_hides_and_restores() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell("C3", "keep").unwrap();

        grid.resize(2, 2).unwrap();
        assert_eq!(grid.cell_text(2, 2), None);
        assert_eq!(grid.non_blank_count(), 0);

        grid.resize(3, 3).unwrap();
        assert_eq!(grid.cell_text(2, 2), Some("keep"));
    }

    #[test]
    fn test_formula_cells_row_major() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell("B2", "=1").unwrap();
        grid.set_cell("A1", "5").unwrap();
        grid.set_cell("C1", " =2").unwrap();
        grid.set_cell("A3", "=3").unwrap();

        let labels: Vec<String> = grid
            .formula_cells()
            .map(|(addr, _)| addr.to_a1_string())
            .collect();
        assert_eq!(labels, vec!["C1", "B2", "A3"]);
    }

    #[test]
    fn test_to_rows_and_from_rows() {
        let grid = Grid::from_rows(vec![vec!["a", "1"], vec!["", "=B1"], vec!["c"]]).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(
            grid.to_rows(),
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["".to_string(), "=B1".to_string()],
                vec!["c".to_string(), "".to_string()],
            ]
        );
    }

    #[test]
    fn test_clamp() {
        let grid = Grid::new(5, 2).unwrap();
        let clamped = grid.clamp(CellRange::parse("A1:Z100").unwrap()).unwrap();
        assert_eq!(clamped.to_string(), "A1:B5");
        assert_eq!(grid.clamp(CellRange::parse("D1:D2").unwrap()), None);
    }
}
