//! Logical functions

use crate::value::{flatten, Value};
use gridcalc_core::CellError;

/// IF(condition, [value_if_true], [value_if_false])
///
/// An error in any argument wins, taken or not. A missing branch is blank.
pub fn fn_if(args: &[Value]) -> Result<Value, CellError> {
    if let Some(e) = args.iter().find_map(Value::error) {
        return Err(e);
    }
    let condition = args.first().ok_or(CellError::Value)?.coerce_to_boolean()?;
    let branch = if condition { args.get(1) } else { args.get(2) };
    Ok(branch.cloned().unwrap_or(Value::Blank))
}

/// AND function - stops at the first FALSE or error
pub fn fn_and(args: &[Value]) -> Result<Value, CellError> {
    for value in flatten(args) {
        if !value.coerce_to_boolean()? {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

/// OR function - stops at the first TRUE or error
pub fn fn_or(args: &[Value]) -> Result<Value, CellError> {
    for value in flatten(args) {
        if value.coerce_to_boolean()? {
            return Ok(Value::Boolean(true));
        }
    }
    Ok(Value::Boolean(false))
}

/// NOT function
pub fn fn_not(args: &[Value]) -> Result<Value, CellError> {
    let b = args.first().ok_or(CellError::Value)?.coerce_to_boolean()?;
    Ok(Value::Boolean(!b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if() {
        let yes = Value::text("yes");
        let no = Value::text("no");
        assert_eq!(
            fn_if(&[Value::Boolean(true), yes.clone(), no.clone()]),
            Ok(yes.clone())
        );
        assert_eq!(fn_if(&[Value::Number(0.0), yes.clone(), no.clone()]), Ok(no));
        assert_eq!(fn_if(&[Value::Boolean(false), yes]), Ok(Value::Blank));
        assert_eq!(fn_if(&[Value::text("maybe")]), Err(CellError::Value));
    }

    #[test]
    fn test_if_propagates_error_in_either_branch() {
        assert_eq!(
            fn_if(&[
                Value::Boolean(true),
                Value::Number(1.0),
                Value::Error(CellError::Div0),
            ]),
            Err(CellError::Div0)
        );
        assert_eq!(
            fn_if(&[
                Value::Boolean(false),
                Value::Error(CellError::Num),
                Value::Number(2.0),
            ]),
            Err(CellError::Num)
        );
        // argument order decides which error wins
        assert_eq!(
            fn_if(&[
                Value::text("maybe"),
                Value::Error(CellError::Name),
                Value::Error(CellError::Div0),
            ]),
            Err(CellError::Name)
        );
    }

    #[test]
    fn test_and_or_short_circuit() {
        let err = Value::Error(CellError::Num);
        assert_eq!(
            fn_and(&[Value::Boolean(false), err.clone()]),
            Ok(Value::Boolean(false))
        );
        assert_eq!(fn_and(&[Value::Boolean(true), err.clone()]), Err(CellError::Num));
        assert_eq!(
            fn_or(&[Value::Number(2.0), err.clone()]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(fn_or(&[Value::Blank, err]), Err(CellError::Num));
    }

    #[test]
    fn test_and_or_over_ranges() {
        let range = Value::Range(vec![Value::Boolean(true), Value::text("TRUE"), Value::Number(1.0)]);
        assert_eq!(fn_and(&[range]), Ok(Value::Boolean(true)));
        assert_eq!(
            fn_or(&[Value::Range(vec![Value::Blank, Value::text("")])]),
            Ok(Value::Boolean(false))
        );
        assert_eq!(fn_and(&[Value::text("x")]), Err(CellError::Value));
    }

    #[test]
    fn test_not() {
        assert_eq!(fn_not(&[Value::Boolean(true)]), Ok(Value::Boolean(false)));
        assert_eq!(fn_not(&[Value::Blank]), Ok(Value::Boolean(true)));
        assert_eq!(
            fn_not(&[Value::Error(CellError::Name)]),
            Err(CellError::Name)
        );
    }
}
