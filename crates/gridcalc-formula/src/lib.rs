//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - The [`Value`] model and its coercion rules
//! - Formula tokenizing and parsing (text → AST)
//! - Formula evaluation (AST → value) against an [`EvaluationContext`]
//! - The built-in function library
//! - [`GridEvaluator`], which follows references between cells of a
//!   [`Grid`](gridcalc_core::Grid) and reports circular references as `#CYCLE!`
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::Grid;
//! use gridcalc_formula::{evaluate, EmptyContext, GridEvaluator, Value};
//!
//! assert_eq!(evaluate("1+2", &mut EmptyContext), Value::Number(3.0));
//!
//! let mut grid = Grid::new(3, 1).unwrap();
//! grid.set_cell("A1", "10").unwrap();
//! grid.set_cell("A2", "5").unwrap();
//! grid.set_cell("A3", "=A1+A2").unwrap();
//!
//! let mut evaluator = GridEvaluator::new(&grid);
//! assert_eq!(evaluator.display_cell(2, 0), "15");
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use dependency::GridEvaluator;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{classify, evaluate, evaluate_expr, CellContent, EmptyContext, EvaluationContext};
pub use functions::Builtin;
pub use parser::parse_formula;
pub use value::{parse_stored_text, Value};
