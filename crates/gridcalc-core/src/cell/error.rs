//! Value-level error codes

use std::fmt;

/// An error a formula evaluates to.
///
/// These are ordinary results, not failures: they are displayed in the cell and
/// absorb any operation they flow into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #DIV/0! - Division by zero (or a zero count/significance)
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #NAME? - Unrecognized function or identifier
    Name,
    /// #NUM! - Non-finite or out-of-domain numeric result
    Num,
    /// #CYCLE! - The cell depends on itself
    Cycle,
    /// #ERROR - The formula could not be parsed
    Error,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Cycle => "#CYCLE!",
            CellError::Error => "#ERROR",
        }
    }

    /// Parse an error display code (case-insensitive)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "#DIV/0!" => Some(CellError::Div0),
            "#VALUE!" => Some(CellError::Value),
            "#NAME?" => Some(CellError::Name),
            "#NUM!" => Some(CellError::Num),
            "#CYCLE!" => Some(CellError::Cycle),
            "#ERROR" => Some(CellError::Error),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CellError::Div0.to_string(), "#DIV/0!");
        assert_eq!(CellError::Cycle.as_str(), "#CYCLE!");
        assert_eq!(CellError::Error.as_str(), "#ERROR");
    }

    #[test]
    fn test_from_code() {
        for err in [
            CellError::Div0,
            CellError::Value,
            CellError::Name,
            CellError::Num,
            CellError::Cycle,
            CellError::Error,
        ] {
            assert_eq!(CellError::from_code(err.as_str()), Some(err));
        }
        assert_eq!(CellError::from_code("#name?"), Some(CellError::Name));
        assert_eq!(CellError::from_code("#REF!"), None);
    }
}
