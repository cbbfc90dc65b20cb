//! Text functions
//!
//! Lengths and positions count characters, not bytes.

use super::{number_arg, optional_number_arg, text_arg};
use crate::value::{flatten, Value};
use gridcalc_core::CellError;

/// Character count argument: truncated, negative is `#VALUE!`
fn count_arg(args: &[Value], index: usize, default: f64) -> Result<usize, CellError> {
    let n = optional_number_arg(args, index, default)?.trunc();
    if n < 0.0 {
        return Err(CellError::Value);
    }
    Ok(n as usize)
}

/// CONCAT / CONCATENATE
pub fn fn_concat(args: &[Value]) -> Result<Value, CellError> {
    let mut out = String::new();
    for value in flatten(args) {
        out.push_str(&value.coerce_to_text()?);
    }
    Ok(Value::Text(out))
}

/// LEFT(text, [num_chars])
pub fn fn_left(args: &[Value]) -> Result<Value, CellError> {
    let text = text_arg(args, 0)?;
    let count = count_arg(args, 1, 1.0)?;
    Ok(Value::Text(text.chars().take(count).collect()))
}

/// RIGHT(text, [num_chars])
pub fn fn_right(args: &[Value]) -> Result<Value, CellError> {
    let text = text_arg(args, 0)?;
    let count = count_arg(args, 1, 1.0)?;
    let len = text.chars().count();
    Ok(Value::Text(text.chars().skip(len.saturating_sub(count)).collect()))
}

/// MID(text, start, [num_chars]) - `start` is 1-based
pub fn fn_mid(args: &[Value]) -> Result<Value, CellError> {
    let text = text_arg(args, 0)?;
    let start = number_arg(args, 1)?.trunc();
    if start < 1.0 {
        return Err(CellError::Value);
    }
    let count = count_arg(args, 2, f64::MAX)?;
    Ok(Value::Text(
        text.chars().skip(start as usize - 1).take(count).collect(),
    ))
}

/// LEN(text)
pub fn fn_len(args: &[Value]) -> Result<Value, CellError> {
    let text = text_arg(args, 0)?;
    Ok(Value::Number(text.chars().count() as f64))
}

/// LOWER(text)
pub fn fn_lower(args: &[Value]) -> Result<Value, CellError> {
    Ok(Value::Text(text_arg(args, 0)?.to_lowercase()))
}

/// UPPER(text)
pub fn fn_upper(args: &[Value]) -> Result<Value, CellError> {
    Ok(Value::Text(text_arg(args, 0)?.to_uppercase()))
}

/// TRIM(text) - also collapses inner whitespace runs to one space
pub fn fn_trim(args: &[Value]) -> Result<Value, CellError> {
    let text = text_arg(args, 0)?;
    Ok(Value::Text(
        text.split_whitespace().collect::<Vec<_>>().join(" "),
    ))
}
