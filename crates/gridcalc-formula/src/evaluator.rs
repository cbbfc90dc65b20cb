//! Formula evaluator
//!
//! Evaluates formula ASTs against an [`EvaluationContext`] to produce values.
//! Structural failures are turned into `#ERROR` at the [`evaluate`] boundary;
//! everything past parsing is expressed as a [`Value`].

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::functions::Builtin;
use crate::parser::parse_formula;
use crate::value::Value;
use gridcalc_core::{CellAddress, CellError, CellRange};
use std::cmp::Ordering;

/// Cell lookups a formula needs while it is evaluated.
///
/// Lookups take `&mut self` so an implementation can follow formulas in other
/// cells (and track which ones it is visiting) while answering.
pub trait EvaluationContext {
    /// Value of a single cell
    fn get_cell_value(&mut self, row: u32, col: u16) -> Value;

    /// Values of every cell between two corners, row by row, as a [`Value::Range`]
    fn get_range(&mut self, start: CellAddress, end: CellAddress) -> Value {
        let values = CellRange::new(start, end)
            .cells()
            .map(|addr| self.get_cell_value(addr.row, addr.col).into_scalar())
            .collect();
        Value::Range(values)
    }
}

/// A context in which every cell is blank.
///
/// Ranges are expanded cell by cell with no bounds; a [`GridEvaluator`](crate::GridEvaluator)
/// over an empty grid clamps them instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl EvaluationContext for EmptyContext {
    fn get_cell_value(&mut self, _row: u32, _col: u16) -> Value {
        Value::Blank
    }
}

/// What a cell's raw text holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent<'a> {
    /// Plain text, a number or a boolean
    Literal(&'a str),
    /// A formula; holds the body after the leading `=`
    Formula(&'a str),
}

/// Classify raw cell text by a leading `=` (after trimming)
pub fn classify(raw: &str) -> CellContent<'_> {
    match raw.trim_start().strip_prefix('=') {
        Some(body) => CellContent::Formula(body),
        None => CellContent::Literal(raw),
    }
}

/// Parse and evaluate a formula body (the text after `=`).
///
/// A body that fails to parse evaluates to `#ERROR`; a bare range evaluates to
/// `#VALUE!`.
///
/// # Example
/// ```rust
/// use gridcalc_core::CellError;
/// use gridcalc_formula::{evaluate, EmptyContext, Value};
///
/// assert_eq!(evaluate("2*(3+4)", &mut EmptyContext), Value::Number(14.0));
/// assert_eq!(evaluate("1/0", &mut EmptyContext), Value::Error(CellError::Div0));
/// assert_eq!(evaluate("(1+", &mut EmptyContext), Value::Error(CellError::Error));
/// ```
pub fn evaluate(body: &str, ctx: &mut dyn EvaluationContext) -> Value {
    match parse_formula(body) {
        Ok(expr) => evaluate_expr(&expr, ctx),
        Err(e) => {
            log::debug!("formula {:?} failed to parse: {}", body, e);
            Value::Error(CellError::Error)
        }
    }
}

/// Evaluate an already parsed expression to a displayable (non-range) value
pub fn evaluate_expr(expr: &Expr, ctx: &mut dyn EvaluationContext) -> Value {
    eval(expr, ctx).into_scalar()
}

/// Evaluate an expression; ranges stay as [`Value::Range`] so functions can
/// consume them
fn eval(expr: &Expr, ctx: &mut dyn EvaluationContext) -> Value {
    match expr {
        // === Literals ===
        Expr::Number(n) => Value::number(*n),
        Expr::Text(s) => Value::Text(s.clone()),
        Expr::Boolean(b) => Value::Boolean(*b),

        // === References ===
        Expr::CellRef(addr) => ctx.get_cell_value(addr.row, addr.col).into_scalar(),
        Expr::RangeRef(range) => ctx.get_range(range.start, range.end),
        Expr::Name(_) => Value::Error(CellError::Name),

        // === Operators ===
        Expr::BinaryOp { op, left, right } => {
            let left = eval(left, ctx);
            let right = eval(right, ctx);
            evaluate_binary_op(*op, &left, &right)
        }

        // -x is 0-x and +x is 0+x, so errors and coercion match the binary case
        Expr::UnaryOp { op, operand } => {
            let operand = eval(operand, ctx);
            let op = match op {
                UnaryOperator::Negate => BinaryOperator::Subtract,
                UnaryOperator::Plus => BinaryOperator::Add,
            };
            evaluate_binary_op(op, &Value::Number(0.0), &operand)
        }

        // === Functions ===
        Expr::Function { name, args } => evaluate_function(name, args, ctx),
    }
}

/// Apply a binary operator to evaluated operands
fn evaluate_binary_op(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    // Propagate errors, left first
    if let Some(e) = left.error() {
        return Value::Error(e);
    }
    if let Some(e) = right.error() {
        return Value::Error(e);
    }

    let result = match op {
        BinaryOperator::Concat => concat(left, right),
        op if op.is_comparison() => compare(left, right).map(|ord| {
            Value::Boolean(match op {
                BinaryOperator::Equal => ord == Ordering::Equal,
                BinaryOperator::NotEqual => ord != Ordering::Equal,
                BinaryOperator::LessThan => ord == Ordering::Less,
                BinaryOperator::LessEqual => ord != Ordering::Greater,
                BinaryOperator::GreaterThan => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            })
        }),
        op => arithmetic(op, left, right),
    };

    result.unwrap_or_else(Value::Error)
}

fn arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> Result<Value, CellError> {
    let l = left.as_number()?;
    let r = right.as_number()?;

    let n = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 {
                return Err(CellError::Div0);
            }
            l / r
        }
        BinaryOperator::Power => l.powf(r),
        _ => return Err(CellError::Value),
    };

    Ok(Value::number(n))
}

fn concat(left: &Value, right: &Value) -> Result<Value, CellError> {
    let mut s = left.coerce_to_text()?;
    s.push_str(&right.coerce_to_text()?);
    Ok(Value::Text(s))
}

/// Numeric comparison when both sides are numeric (blanks as zero), otherwise
/// lexicographic comparison of their text.
///
/// Error operands never get here, so a failed number coercion only means the
/// side is not numeric (e.g. `"1e999"`); ranges still fail in `coerce_to_text`.
fn compare(left: &Value, right: &Value) -> Result<Ordering, CellError> {
    let l = left.coerce_to_number(true).ok().flatten();
    let r = right.coerce_to_number(true).ok().flatten();
    if let (Some(l), Some(r)) = (l, r) {
        return Ok(l.partial_cmp(&r).unwrap_or(Ordering::Equal));
    }

    let l = left.coerce_to_text()?;
    let r = right.coerce_to_text()?;
    Ok(l.cmp(&r))
}

/// Evaluate a function call
fn evaluate_function(name: &str, args: &[Expr], ctx: &mut dyn EvaluationContext) -> Value {
    let Some(builtin) = Builtin::from_name(name) else {
        return Value::Error(CellError::Name);
    };

    // Arguments are evaluated eagerly, in order
    let evaluated: Vec<Value> = args.iter().map(|arg| eval(arg, ctx)).collect();

    builtin.call(&evaluated)
}
