//! Math and aggregate functions

use super::{number_arg, optional_number_arg};
use crate::value::{flatten_all, flatten_args, Value};
use gridcalc_core::CellError;

/// Numbers among the flattened arguments. Text that is not numeric is skipped;
/// error values are not.
fn collect_numbers(args: &[Value], blank_as_zero: bool) -> Result<Vec<f64>, CellError> {
    let mut numbers = Vec::new();
    for value in flatten_args(args)? {
        if let Some(n) = value.coerce_to_number(blank_as_zero)? {
            numbers.push(n);
        }
    }
    Ok(numbers)
}

/// SUM function
pub fn fn_sum(args: &[Value]) -> Result<Value, CellError> {
    let numbers = collect_numbers(args, true)?;
    Ok(Value::number(numbers.iter().sum()))
}

/// AVERAGE function; blanks are skipped rather than counted as zero
pub fn fn_average(args: &[Value]) -> Result<Value, CellError> {
    let numbers = collect_numbers(args, false)?;
    if numbers.is_empty() {
        return Err(CellError::Div0);
    }
    Ok(Value::number(
        numbers.iter().sum::<f64>() / numbers.len() as f64,
    ))
}

/// MIN function
pub fn fn_min(args: &[Value]) -> Result<Value, CellError> {
    collect_numbers(args, false)?
        .into_iter()
        .reduce(f64::min)
        .map(Value::number)
        .ok_or(CellError::Div0)
}

/// MAX function
pub fn fn_max(args: &[Value]) -> Result<Value, CellError> {
    collect_numbers(args, false)?
        .into_iter()
        .reduce(f64::max)
        .map(Value::number)
        .ok_or(CellError::Div0)
}

/// COUNT function
pub fn fn_count(args: &[Value]) -> Result<Value, CellError> {
    let numbers = collect_numbers(args, false)?;
    Ok(Value::Number(numbers.len() as f64))
}

/// COUNTA function - counts non-blank values, errors included
pub fn fn_counta(args: &[Value]) -> Result<Value, CellError> {
    let count = flatten_all(args).iter().filter(|v| !v.is_blank()).count();
    Ok(Value::Number(count as f64))
}

/// ABS function
pub fn fn_abs(args: &[Value]) -> Result<Value, CellError> {
    Ok(Value::number(number_arg(args, 0)?.abs()))
}

/// SQRT function
pub fn fn_sqrt(args: &[Value]) -> Result<Value, CellError> {
    let n = number_arg(args, 0)?;
    if n < 0.0 {
        return Err(CellError::Num);
    }
    Ok(Value::number(n.sqrt()))
}

/// INT function - rounds down to the nearest integer
pub fn fn_int(args: &[Value]) -> Result<Value, CellError> {
    Ok(Value::number(number_arg(args, 0)?.floor()))
}

/// Scale by 10^digits, apply `f`, scale back. Negative digits round to the
/// left of the decimal point.
fn round_with(number: f64, digits: f64, f: fn(f64) -> f64) -> Value {
    let digits = digits.trunc().clamp(-308.0, 308.0) as i32;
    let factor = 10_f64.powi(digits.abs());
    let scaled = if digits >= 0 {
        number * factor
    } else {
        number / factor
    };

    // Already more precise than the requested digits
    if !scaled.is_finite() {
        return Value::number(number);
    }

    let rounded = f(scaled);
    Value::number(if digits >= 0 {
        rounded / factor
    } else {
        rounded * factor
    })
}

/// Round half away from zero
fn round_half_away(x: f64) -> f64 {
    x.round()
}

/// Round away from zero
fn round_away(x: f64) -> f64 {
    if x >= 0.0 {
        x.ceil()
    } else {
        x.floor()
    }
}

/// ROUND(number, [num_digits])
pub fn fn_round(args: &[Value]) -> Result<Value, CellError> {
    let number = number_arg(args, 0)?;
    let digits = optional_number_arg(args, 1, 0.0)?;
    Ok(round_with(number, digits, round_half_away))
}

/// ROUNDDOWN(number, [num_digits]) - rounds toward zero
pub fn fn_rounddown(args: &[Value]) -> Result<Value, CellError> {
    let number = number_arg(args, 0)?;
    let digits = optional_number_arg(args, 1, 0.0)?;
    Ok(round_with(number, digits, f64::trunc))
}

/// ROUNDUP(number, [num_digits]) - rounds away from zero
pub fn fn_roundup(args: &[Value]) -> Result<Value, CellError> {
    let number = number_arg(args, 0)?;
    let digits = optional_number_arg(args, 1, 0.0)?;
    Ok(round_with(number, digits, round_away))
}

fn to_multiple(args: &[Value], f: fn(f64) -> f64) -> Result<Value, CellError> {
    let number = number_arg(args, 0)?;
    let significance = optional_number_arg(args, 1, 1.0)?;
    if significance == 0.0 {
        return Err(CellError::Div0);
    }
    Ok(Value::number(f(number / significance) * significance))
}

/// CEILING(number, [significance])
pub fn fn_ceiling(args: &[Value]) -> Result<Value, CellError> {
    to_multiple(args, f64::ceil)
}

/// FLOOR(number, [significance])
pub fn fn_floor(args: &[Value]) -> Result<Value, CellError> {
    to_multiple(args, f64::floor)
}

/// MOD(number, divisor) - the result takes the sign of the divisor
pub fn fn_mod(args: &[Value]) -> Result<Value, CellError> {
    let number = number_arg(args, 0)?;
    let divisor = number_arg(args, 1)?;
    if divisor == 0.0 {
        return Err(CellError::Div0);
    }
    Ok(Value::number(number - divisor * (number / divisor).floor()))
}

/// POWER(base, exponent)
pub fn fn_power(args: &[Value]) -> Result<Value, CellError> {
    let base = number_arg(args, 0)?;
    let exponent = number_arg(args, 1)?;
    Ok(Value::number(base.powf(exponent)))
}
