//! Computed values and the coercion rules shared by operators and functions

use gridcalc_core::CellError;
use lazy_regex::regex_is_match;
use std::fmt;

/// A value produced by evaluating a cell or expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A finite number
    Number(f64),
    Text(String),
    Boolean(bool),
    /// A value-level error; absorbs any operation it flows into
    Error(CellError),
    /// An empty cell
    Blank,
    /// An expanded cell range, row-major. Never contains another range.
    Range(Vec<Value>),
}

impl Value {
    /// Build a number, turning NaN and infinities into `#NUM!`
    pub fn number(n: f64) -> Self {
        if n.is_finite() {
            Value::Number(n)
        } else {
            Value::Error(CellError::Num)
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Get the error if this is one
    pub fn error(&self) -> Option<CellError> {
        match self {
            Value::Error(e) => Some(*e),
            _ => None,
        }
    }

    /// Blank, or text that is empty
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Blank => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Collapse a range into `#VALUE!`; every other value is returned as is
    pub fn into_scalar(self) -> Self {
        match self {
            Value::Range(_) => Value::Error(CellError::Value),
            v => v,
        }
    }

    /// The text shown in a cell holding this value
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Number(n) if n.is_finite() => format_number(*n),
            Value::Number(_) => CellError::Num.to_string(),
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => format_bool(*b).to_string(),
            Value::Error(e) => e.to_string(),
            Value::Blank => String::new(),
            Value::Range(_) => CellError::Value.to_string(),
        }
    }

    /// Coerce to text for concatenation and text functions
    pub fn coerce_to_text(&self) -> Result<String, CellError> {
        match self {
            Value::Text(s) => Ok(s.clone()),
            Value::Blank => Ok(String::new()),
            Value::Number(n) => Ok(format_number(*n)),
            Value::Boolean(b) => Ok(format_bool(*b).to_string()),
            Value::Error(e) => Err(*e),
            Value::Range(_) => Err(CellError::Value),
        }
    }

    /// Coerce to a boolean for IF, AND, OR and NOT
    pub fn coerce_to_boolean(&self) -> Result<bool, CellError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::Blank => Ok(false),
            Value::Text(s) => {
                if s.is_empty() {
                    Ok(false)
                } else if s.eq_ignore_ascii_case("TRUE") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("FALSE") {
                    Ok(false)
                } else {
                    Err(CellError::Value)
                }
            }
            Value::Error(e) => Err(*e),
            Value::Range(_) => Err(CellError::Value),
        }
    }

    /// Coerce to a number.
    ///
    /// `Ok(None)` is a soft failure (unparseable text, or a blank when
    /// `blank_as_zero` is off) and leaves the outcome to the caller. `Err` is a
    /// hard failure: an error value, or a range used where a scalar is needed.
    pub fn coerce_to_number(&self, blank_as_zero: bool) -> Result<Option<f64>, CellError> {
        match self {
            Value::Number(n) => Ok(Some(*n)),
            Value::Boolean(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Value::Text(s) => match parse_number(s) {
                Some(n) if n.is_finite() => Ok(Some(n)),
                Some(_) => Err(CellError::Num),
                None => Ok(None),
            },
            Value::Blank => Ok(blank_as_zero.then_some(0.0)),
            Value::Error(e) => Err(*e),
            Value::Range(_) => Err(CellError::Value),
        }
    }

    /// Number for an operator or single-number function argument: blanks are
    /// zero and anything non-numeric is `#VALUE!`
    pub fn as_number(&self) -> Result<f64, CellError> {
        self.coerce_to_number(true)?.ok_or(CellError::Value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// Interpret the raw text of a non-formula cell.
///
/// Blank text is [`Value::Blank`], `TRUE`/`FALSE` in any case are booleans,
/// numeric text becomes a number (`#NUM!` if it overflows), and anything else is
/// kept verbatim as text.
pub fn parse_stored_text(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Blank;
    }
    if trimmed.eq_ignore_ascii_case("TRUE") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("FALSE") {
        return Value::Boolean(false);
    }
    match parse_number(trimmed) {
        Some(n) => Value::number(n),
        None => Value::Text(text.to_string()),
    }
}

/// Parse signed decimal or exponential notation, ignoring surrounding whitespace
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if !regex_is_match!(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$", s) {
        return None;
    }
    s.parse().ok()
}

fn format_number(n: f64) -> String {
    // Shortest representation that parses back to the same f64
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn format_bool(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Expand range arguments in order, stopping at the first error value
pub fn flatten_args(args: &[Value]) -> Result<Vec<Value>, CellError> {
    let mut out = Vec::with_capacity(args.len());
    for value in flatten(args) {
        if let Value::Error(e) = value {
            return Err(*e);
        }
        out.push(value.clone());
    }
    Ok(out)
}

/// Expand range arguments in order, keeping error values as they are
pub fn flatten_all(args: &[Value]) -> Vec<Value> {
    flatten(args).cloned().collect()
}

/// Iterate over arguments with ranges expanded in place
pub(crate) fn flatten(args: &[Value]) -> impl Iterator<Item = &Value> + '_ {
    args.iter().flat_map(|arg| match arg {
        Value::Range(items) => items.iter(),
        scalar => std::slice::from_ref(scalar).iter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_must_be_finite() {
        assert_eq!(Value::number(1.5), Value::Number(1.5));
        assert_eq!(Value::number(f64::INFINITY), Value::Error(CellError::Num));
        assert_eq!(Value::number(f64::NAN), Value::Error(CellError::Num));
    }

    #[test]
    fn test_parse_stored_text() {
        assert_eq!(parse_stored_text(""), Value::Blank);
        assert_eq!(parse_stored_text("   "), Value::Blank);
        assert_eq!(parse_stored_text("true"), Value::Boolean(true));
        assert_eq!(parse_stored_text("False"), Value::Boolean(false));
        assert_eq!(parse_stored_text("42"), Value::Number(42.0));
        assert_eq!(parse_stored_text("-1.5e3"), Value::Number(-1500.0));
        assert_eq!(parse_stored_text(".5"), Value::Number(0.5));
        assert_eq!(parse_stored_text(" 7 "), Value::Number(7.0));
        assert_eq!(parse_stored_text("1e999"), Value::Error(CellError::Num));
        assert_eq!(parse_stored_text("Hello"), Value::text("Hello"));
        assert_eq!(parse_stored_text("inf"), Value::text("inf"));
        assert_eq!(parse_stored_text("1,000"), Value::text("1,000"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(3.0).to_display_string(), "3");
        assert_eq!(Value::Number(-0.25).to_display_string(), "-0.25");
        assert_eq!(Value::Number(-0.0).to_display_string(), "0");
        assert_eq!(Value::Boolean(true).to_display_string(), "TRUE");
        assert_eq!(Value::Blank.to_display_string(), "");
        assert_eq!(Value::Error(CellError::Div0).to_display_string(), "#DIV/0!");
        assert_eq!(Value::Range(vec![]).to_display_string(), "#VALUE!");
        assert_eq!(Value::Number(f64::NAN).to_display_string(), "#NUM!");
    }

    #[test]
    fn test_coerce_to_number() {
        assert_eq!(Value::Number(2.0).coerce_to_number(false), Ok(Some(2.0)));
        assert_eq!(Value::Boolean(true).coerce_to_number(false), Ok(Some(1.0)));
        assert_eq!(Value::text("12.5").coerce_to_number(false), Ok(Some(12.5)));
        assert_eq!(Value::text("abc").coerce_to_number(true), Ok(None));
        assert_eq!(Value::Blank.coerce_to_number(true), Ok(Some(0.0)));
        assert_eq!(Value::Blank.coerce_to_number(false), Ok(None));
        assert_eq!(
            Value::Range(vec![Value::Number(1.0)]).coerce_to_number(true),
            Err(CellError::Value)
        );
        assert_eq!(
            Value::Error(CellError::Name).coerce_to_number(true),
            Err(CellError::Name)
        );
    }

    #[test]
    fn test_coerce_to_boolean() {
        assert_eq!(Value::Number(0.0).coerce_to_boolean(), Ok(false));
        assert_eq!(Value::Number(-3.0).coerce_to_boolean(), Ok(true));
        assert_eq!(Value::text("tRuE").coerce_to_boolean(), Ok(true));
        assert_eq!(Value::text("").coerce_to_boolean(), Ok(false));
        assert_eq!(Value::Blank.coerce_to_boolean(), Ok(false));
        assert_eq!(Value::text("yes").coerce_to_boolean(), Err(CellError::Value));
        assert_eq!(Value::Range(vec![]).coerce_to_boolean(), Err(CellError::Value));
    }

    #[test]
    fn test_coerce_to_text() {
        assert_eq!(Value::Blank.coerce_to_text(), Ok(String::new()));
        assert_eq!(Value::Number(1.25).coerce_to_text(), Ok("1.25".to_string()));
        assert_eq!(Value::Boolean(false).coerce_to_text(), Ok("FALSE".to_string()));
        assert_eq!(Value::Range(vec![]).coerce_to_text(), Err(CellError::Value));
    }

    #[test]
    fn test_flatten() {
        let args = vec![
            Value::Number(1.0),
            Value::Range(vec![Value::Blank, Value::text("x")]),
            Value::Boolean(true),
        ];
        assert_eq!(
            flatten_args(&args),
            Ok(vec![
                Value::Number(1.0),
                Value::Blank,
                Value::text("x"),
                Value::Boolean(true),
            ])
        );

        let with_errors = vec![
            Value::Range(vec![Value::Number(1.0), Value::Error(CellError::Num)]),
            Value::Error(CellError::Div0),
        ];
        assert_eq!(flatten_args(&with_errors), Err(CellError::Num));
        assert_eq!(flatten_all(&with_errors).len(), 3);
    }

    #[test]
    fn test_into_scalar() {
        assert_eq!(
            Value::Range(vec![Value::Number(1.0)]).into_scalar(),
            Value::Error(CellError::Value)
        );
        assert_eq!(Value::Number(1.0).into_scalar(), Value::Number(1.0));
    }
}
