//! Runtime values.

use std::fmt;
use std::rc::Rc;

use crate::frontend::ast::BlockStmt;

use super::environment::Environment;

/// The tagged variant every evaluation result boils down to.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Array(Rc<Vec<Value>>),
    Function(Rc<FunctionValue>),
    Builtin(&'static str),
    Null,
}

/// A closure: its parameter names, its body, and the environment captured
/// at the point the `fn` literal was evaluated.
pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: BlockStmt,
    pub env: Environment,
}

impl Value {
    #[must_use]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    #[must_use]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(elements))
    }

    /// `false` and `Null` are falsy; everything else (including `0`, `""`,
    /// and `[]`) is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    /// The tag name used in "unknown operator"/"not supported" diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::Builtin(_) => "Builtin",
            Value::Null => "Null",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // Functions are compared by identity of their captured environment
            // plus structural shape; two distinct closures are never equal,
            // even if textually identical, matching the "different variants
            // are never equal" rule extended to this un-comparable variant.
            (Value::Function(_), Value::Function(_)) => false,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Value::Function(func) => {
                write!(f, "fn({})", func.params.join(", "))?;
                write!(f, "\n{}", func.body)
            }
            Value::Builtin(name) => write!(f, "builtin function {name}"),
            Value::Null => write!(f, "nil"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values_are_exactly_false_and_null() {
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::array(vec![]).is_truthy());
    }

    #[test]
    fn prints_array_with_element_forms() {
        let value = Value::array(vec![
            Value::Integer(1),
            Value::string("foo"),
            Value::Boolean(true),
        ]);
        assert_eq!(value.to_string(), "[1, foo, true]");
    }
}
