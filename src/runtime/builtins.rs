//! Host-provided functions, invoked like any other callable but implemented
//! in Rust rather than the language itself.

use super::value::Value;

/// Every built-in name the evaluator recognizes when an identifier misses
/// the environment chain.
pub const NAMES: &[&str] = &["len", "first", "last", "rest", "push", "puts"];

#[must_use]
pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

/// Invokes builtin `name` with already-evaluated `args`. Builtins never see
/// or mutate the environment.
pub fn call(name: &str, args: &[Value]) -> Result<Value, String> {
    match name {
        "len" => len(args),
        "first" => first(args),
        "last" => last(args),
        "rest" => rest(args),
        "push" => push(args),
        "puts" => puts(args),
        other => Err(format!("unknown builtin: {other}")),
    }
}

fn len(args: &[Value]) -> Result<Value, String> {
    let [arg] = args else {
        return Err("unexpected number of args for len".to_string());
    };
    match arg {
        Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        _ => Err("argument for len not supported".to_string()),
    }
}

fn first(args: &[Value]) -> Result<Value, String> {
    let [arg] = args else {
        return Err("unexpected number of args for first".to_string());
    };
    match arg {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        _ => Err("argument for first not supported".to_string()),
    }
}

fn last(args: &[Value]) -> Result<Value, String> {
    let [arg] = args else {
        return Err("unexpected number of args for last".to_string());
    };
    match arg {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        _ => Err("argument for last not supported".to_string()),
    }
}

fn rest(args: &[Value]) -> Result<Value, String> {
    let [arg] = args else {
        return Err("unexpected number of args for rest".to_string());
    };
    match arg {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::array(elements[1..].to_vec()))
            }
        }
        _ => Err("argument for rest not supported".to_string()),
    }
}

fn push(args: &[Value]) -> Result<Value, String> {
    let [arg, value] = args else {
        return Err("unexpected number of args for push".to_string());
    };
    match arg {
        Value::Array(elements) => {
            let mut new_elements = elements.as_ref().clone();
            new_elements.push(value.clone());
            Ok(Value::array(new_elements))
        }
        _ => Err("argument for push not supported".to_string()),
    }
}

fn puts(args: &[Value]) -> Result<Value, String> {
    for arg in args {
        println!("{arg}");
    }
    Ok(Value::Null)
}
