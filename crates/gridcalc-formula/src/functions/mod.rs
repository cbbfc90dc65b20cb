//! Built-in functions
//!
//! Every function is a variant of [`Builtin`]. Names resolve through
//! [`Builtin::from_name`]; a name with no variant evaluates to `#NAME?`.

pub mod logical;
pub mod math;
pub mod text;

use crate::value::Value;
use gridcalc_core::CellError;

/// Function implementation signature
///
/// Handlers receive already-evaluated arguments (ranges arrive as
/// [`Value::Range`]) and return `Err` to produce an error value.
pub type FunctionImpl = fn(&[Value]) -> Result<Value, CellError>;

/// Function definition
#[derive(Clone, Copy)]
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl std::fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish()
    }
}

/// The built-in function set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    // Aggregates
    Sum,
    Average,
    Min,
    Max,
    Count,
    CountA,

    // Math
    Abs,
    Sqrt,
    Int,
    Round,
    RoundDown,
    RoundUp,
    Ceiling,
    Floor,
    Mod,
    Power,

    // Logical
    If,
    And,
    Or,
    Not,

    // Text
    Concat,
    Concatenate,
    Left,
    Right,
    Mid,
    Len,
    Lower,
    Upper,
    Trim,
}

impl Builtin {
    /// Every built-in, in declaration order
    pub const ALL: [Builtin; 29] = [
        Builtin::Sum,
        Builtin::Average,
        Builtin::Min,
        Builtin::Max,
        Builtin::Count,
        Builtin::CountA,
        Builtin::Abs,
        Builtin::Sqrt,
        Builtin::Int,
        Builtin::Round,
        Builtin::RoundDown,
        Builtin::RoundUp,
        Builtin::Ceiling,
        Builtin::Floor,
        Builtin::Mod,
        Builtin::Power,
        Builtin::If,
        Builtin::And,
        Builtin::Or,
        Builtin::Not,
        Builtin::Concat,
        Builtin::Concatenate,
        Builtin::Left,
        Builtin::Right,
        Builtin::Mid,
        Builtin::Len,
        Builtin::Lower,
        Builtin::Upper,
        Builtin::Trim,
    ];

    /// Look up a function by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name.to_ascii_uppercase().as_str() {
            "SUM" => Builtin::Sum,
            "AVERAGE" => Builtin::Average,
            "MIN" => Builtin::Min,
            "MAX" => Builtin::Max,
            "COUNT" => Builtin::Count,
            "COUNTA" => Builtin::CountA,
            "ABS" => Builtin::Abs,
            "SQRT" => Builtin::Sqrt,
            "INT" => Builtin::Int,
            "ROUND" => Builtin::Round,
            "ROUNDDOWN" => Builtin::RoundDown,
            "ROUNDUP" => Builtin::RoundUp,
            "CEILING" => Builtin::Ceiling,
            "FLOOR" => Builtin::Floor,
            "MOD" => Builtin::Mod,
            "POWER" => Builtin::Power,
            "IF" => Builtin::If,
            "AND" => Builtin::And,
            "OR" => Builtin::Or,
            "NOT" => Builtin::Not,
            "CONCAT" => Builtin::Concat,
            "CONCATENATE" => Builtin::Concatenate,
            "LEFT" => Builtin::Left,
            "RIGHT" => Builtin::Right,
            "MID" => Builtin::Mid,
            "LEN" => Builtin::Len,
            "LOWER" => Builtin::Lower,
            "UPPER" => Builtin::Upper,
            "TRIM" => Builtin::Trim,
            _ => return None,
        };
        Some(builtin)
    }

    /// Name, arity and handler
    pub fn def(self) -> FunctionDef {
        match self {
            Builtin::Sum => define("SUM", 0, None, math::fn_sum),
            Builtin::Average => define("AVERAGE", 1, None, math::fn_average),
            Builtin::Min => define("MIN", 1, None, math::fn_min),
            Builtin::Max => define("MAX", 1, None, math::fn_max),
            Builtin::Count => define("COUNT", 0, None, math::fn_count),
            Builtin::CountA => define("COUNTA", 0, None, math::fn_counta),
            Builtin::Abs => define("ABS", 1, Some(1), math::fn_abs),
            Builtin::Sqrt => define("SQRT", 1, Some(1), math::fn_sqrt),
            Builtin::Int => define("INT", 1, Some(1), math::fn_int),
            Builtin::Round => define("ROUND", 1, Some(2), math::fn_round),
            Builtin::RoundDown => define("ROUNDDOWN", 1, Some(2), math::fn_rounddown),
            Builtin::RoundUp => define("ROUNDUP", 1, Some(2), math::fn_roundup),
            Builtin::Ceiling => define("CEILING", 1, Some(2), math::fn_ceiling),
            Builtin::Floor => define("FLOOR", 1, Some(2), math::fn_floor),
            Builtin::Mod => define("MOD", 2, Some(2), math::fn_mod),
            Builtin::Power => define("POWER", 2, Some(2), math::fn_power),
            Builtin::If => define("IF", 1, Some(3), logical::fn_if),
            Builtin::And => define("AND", 0, None, logical::fn_and),
            Builtin::Or => define("OR", 0, None, logical::fn_or),
            Builtin::Not => define("NOT", 1, Some(1), logical::fn_not),
            Builtin::Concat => define("CONCAT", 0, None, text::fn_concat),
            Builtin::Concatenate => define("CONCATENATE", 0, None, text::fn_concat),
            Builtin::Left => define("LEFT", 1, Some(2), text::fn_left),
            Builtin::Right => define("RIGHT", 1, Some(2), text::fn_right),
            Builtin::Mid => define("MID", 2, Some(3), text::fn_mid),
            Builtin::Len => define("LEN", 1, Some(1), text::fn_len),
            Builtin::Lower => define("LOWER", 1, Some(1), text::fn_lower),
            Builtin::Upper => define("UPPER", 1, Some(1), text::fn_upper),
            Builtin::Trim => define("TRIM", 1, Some(1), text::fn_trim),
        }
    }

    /// Canonical (uppercase) name
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Call with evaluated arguments. A wrong argument count is `#VALUE!`.
    pub fn call(self, args: &[Value]) -> Value {
        let def = self.def();
        if args.len() < def.min_args || def.max_args.map_or(false, |max| args.len() > max) {
            return Value::Error(CellError::Value);
        }
        (def.implementation)(args).unwrap_or_else(Value::Error)
    }
}

fn define(
    name: &'static str,
    min_args: usize,
    max_args: Option<usize>,
    implementation: FunctionImpl,
) -> FunctionDef {
    FunctionDef {
        name,
        min_args,
        max_args,
        implementation,
    }
}

// === Argument helpers ===

/// Required numeric argument; blank is zero, non-numeric is `#VALUE!`
pub(crate) fn number_arg(args: &[Value], index: usize) -> Result<f64, CellError> {
    args.get(index).ok_or(CellError::Value)?.as_number()
}

/// Optional numeric argument with a default when omitted
pub(crate) fn optional_number_arg(
    args: &[Value],
    index: usize,
    default: f64,
) -> Result<f64, CellError> {
    match args.get(index) {
        Some(v) => v.as_number(),
        None => Ok(default),
    }
}

/// Required text argument
pub(crate) fn text_arg(args: &[Value], index: usize) -> Result<String, CellError> {
    args.get(index).ok_or(CellError::Value)?.coerce_to_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("sum"), Some(Builtin::Sum));
        assert_eq!(Builtin::from_name("Concatenate"), Some(Builtin::Concatenate));
        assert_eq!(Builtin::from_name("FOO"), None);
    }

    #[test]
    fn test_arity_violation_is_value_error() {
        assert_eq!(Builtin::Abs.call(&[]), Value::Error(CellError::Value));
        assert_eq!(
            Builtin::Not.call(&[Value::Boolean(true), Value::Boolean(true)]),
            Value::Error(CellError::Value)
        );
        assert_eq!(Builtin::Mod.call(&[Value::Number(1.0)]), Value::Error(CellError::Value));
    }

    #[test]
    fn test_zero_argument_variadics() {
        assert_eq!(Builtin::Sum.call(&[]), Value::Number(0.0));
        assert_eq!(Builtin::Count.call(&[]), Value::Number(0.0));
        assert_eq!(Builtin::Concat.call(&[]), Value::text(""));
        assert_eq!(Builtin::And.call(&[]), Value::Boolean(true));
        assert_eq!(Builtin::Or.call(&[]), Value::Boolean(false));
        assert_eq!(Builtin::Average.call(&[]), Value::Error(CellError::Value));
    }
}
