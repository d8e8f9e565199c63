//! The built-in operator set.
//!
//! Arithmetic works on the numeric view of both operands and always yields a
//! float. Comparison dispatches to lexicographic order when both sides are
//! strings and to numeric order otherwise. Boolean operators never coerce.

use super::Registry;
use crate::error::{EvalError, RegistryError};
use crate::value::Value;
use log::error;
use regex::Regex;

pub(super) fn install(registry: &Registry) -> Result<(), RegistryError> {
    numeric(registry, "+", |a, b| a + b)?;
    numeric(registry, "-", |a, b| a - b)?;
    numeric(registry, "*", |a, b| a * b)?;
    // division by zero is deliberately lenient: it yields 0, not an error
    numeric(registry, "/", |a, b| if b == 0.0 { 0.0 } else { a / b })?;

    comparison(registry, "==", |a, b| a == b, |a, b| a == b)?;
    comparison(registry, "<", |a, b| a < b, |a, b| a < b)?;
    comparison(registry, "<=", |a, b| a <= b, |a, b| a <= b)?;
    comparison(registry, ">", |a, b| a > b, |a, b| a > b)?;
    comparison(registry, ">=", |a, b| a >= b, |a, b| a >= b)?;

    boolean(registry, "&&", |a, b| a && b)?;
    boolean(registry, "||", |a, b| a || b)?;

    registry.register("~=", pattern_match)?;
    Ok(())
}

fn numeric(
    registry: &Registry,
    symbol: &str,
    func: fn(f64, f64) -> f64,
) -> Result<(), RegistryError> {
    let name = symbol.to_string();
    registry.register(symbol, move |left, right| {
        match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Ok(Value::Float(func(a, b))),
            _ => Err(mismatch(left, &name, right)),
        }
    })
}

fn comparison(
    registry: &Registry,
    symbol: &str,
    str_func: fn(&str, &str) -> bool,
    num_func: fn(f64, f64) -> bool,
) -> Result<(), RegistryError> {
    let name = symbol.to_string();
    registry.register(symbol, move |left, right| {
        if let (Value::Str(a), Value::Str(b)) = (left, right) {
            return Ok(Value::Bool(str_func(a, b)));
        }
        match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Ok(Value::Bool(num_func(a, b))),
            _ => Err(mismatch(left, &name, right)),
        }
    })
}

fn boolean(
    registry: &Registry,
    symbol: &str,
    func: fn(bool, bool) -> bool,
) -> Result<(), RegistryError> {
    let name = symbol.to_string();
    registry.register(symbol, move |left, right| {
        match (left.as_bool(), right.as_bool()) {
            (Some(a), Some(b)) => Ok(Value::Bool(func(a, b))),
            _ => Err(mismatch(left, &name, right)),
        }
    })
}

/// `subject ~= pattern`. An invalid pattern is a misconfigured rule, not a
/// broken evaluation: it is logged and the match evaluates to false.
fn pattern_match(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Str(subject), Value::Str(pattern)) => match Regex::new(pattern) {
            Ok(re) => Ok(Value::Bool(re.is_match(subject))),
            Err(err) => {
                error!("cannot compile pattern ({}): {}", pattern, err);
                Ok(Value::Bool(false))
            }
        },
        _ => Err(mismatch(left, "~=", right)),
    }
}

fn mismatch(left: &Value, symbol: &str, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        left: left.type_name(),
        symbol: symbol.to_string(),
        right: right.type_name(),
    }
}
