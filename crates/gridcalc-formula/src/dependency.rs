//! Cell-to-cell evaluation over a grid
//!
//! [`GridEvaluator`] answers a formula's cell lookups by evaluating the
//! referenced cells in turn. References are followed recursively; a cell that is
//! reached again while it is still being evaluated is a circular reference and
//! evaluates to `#CYCLE!`.

use crate::evaluator::{classify, evaluate, CellContent, EvaluationContext};
use crate::value::{parse_stored_text, Value};
use ahash::{AHashMap, AHashSet};
use gridcalc_core::{CellAddress, CellError, CellRange, Grid};

/// Evaluates cells of a [`Grid`], following references between them.
///
/// The visiting set and the result cache belong to one top-level
/// [`evaluate_cell`](Self::evaluate_cell) call: both are reset when the next
/// top-level call starts, so results never depend on evaluation order.
#[derive(Debug)]
pub struct GridEvaluator<'g> {
    grid: &'g Grid,
    /// Cells whose formulas are currently being evaluated
    visiting: AHashSet<CellAddress>,
    /// Finished cells of the current top-level call
    cache: AHashMap<CellAddress, Value>,
}

impl<'g> GridEvaluator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            visiting: AHashSet::new(),
            cache: AHashMap::new(),
        }
    }

    /// Evaluate a cell. Cells outside the grid are blank.
    pub fn evaluate_cell(&mut self, row: u32, col: u16) -> Value {
        let addr = CellAddress::new(row, col);
        if !self.grid.contains(addr) {
            return Value::Blank;
        }

        if self.visiting.is_empty() {
            self.cache.clear();
        }

        if let Some(value) = self.cache.get(&addr) {
            return value.clone();
        }

        if self.visiting.contains(&addr) {
            log::debug!("circular reference through {}", addr);
            return Value::Error(CellError::Cycle);
        }

        let grid = self.grid;
        let value = match classify(grid.text_at(row, col)) {
            CellContent::Literal(text) => parse_stored_text(text),
            CellContent::Formula(body) => {
                self.visiting.insert(addr);
                let value = evaluate(body, self).into_scalar();
                self.visiting.remove(&addr);
                value
            }
        };

        log::trace!("{} = {:?}", addr, value);
        self.cache.insert(addr, value.clone());
        value
    }

    /// Evaluate a cell and render it for display
    pub fn display_cell(&mut self, row: u32, col: u16) -> String {
        self.evaluate_cell(row, col).to_display_string()
    }
}

impl EvaluationContext for GridEvaluator<'_> {
    fn get_cell_value(&mut self, row: u32, col: u16) -> Value {
        self.evaluate_cell(row, col)
    }

    /// Only the part of the range inside the grid is read
    fn get_range(&mut self, start: CellAddress, end: CellAddress) -> Value {
        let Some(range) = self.grid.clamp(CellRange::new(start, end)) else {
            return Value::Range(Vec::new());
        };
        let values = range
            .cells()
            .map(|addr| self.evaluate_cell(addr.row, addr.col))
            .collect();
        Value::Range(values)
    }
}
