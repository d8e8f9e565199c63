//! The single-operator `<term><oper><term>` expression form.
//!
//! A lighter alternative to [`Compound`](crate::ast::Compound) for hosts
//! that only ever need one operator per rule: the source is split at the
//! leftmost occurrence of a known operator symbol and both sides must be
//! literals or identifiers (no grouping, no chaining).

use crate::ast::{parse_literal_or_identifier, Argument};
use crate::context::Context;
use crate::error::{EvalError, ParseError};
use crate::operator::{Operator, Registry};
use crate::value::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    left: Argument,
    oper: Operator,
    right: Argument,
}

impl Expression {
    /// Parse with the built-in operator set.
    pub fn parse(s: &str) -> Result<Expression, ParseError> {
        Self::parse_with(s, &Registry::default())
    }

    /// Parse against a caller-supplied operator registry.
    pub fn parse_with(s: &str, registry: &Registry) -> Result<Expression, ParseError> {
        let (left, right, oper) = registry.split_on_first(s)?;
        let left = parse_literal_or_identifier(&left).map_err(|err| ParseError::Invalid {
            expr: s.to_string(),
            source: Box::new(err),
        })?;
        let right = parse_literal_or_identifier(&right).map_err(|err| ParseError::Invalid {
            expr: s.to_string(),
            source: Box::new(err),
        })?;
        Ok(Expression { left, oper, right })
    }

    pub fn eval(&self, ctx: &Context) -> Result<Value, EvalError> {
        let left = self.left.eval(ctx)?;
        let right = self.right.eval(ctx)?;
        self.oper.apply(&left, &right)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.oper, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_eval() {
        let mut ctx = Context::new();
        ctx.set("age", 42_i64);
        let expr = Expression::parse("age >= 18").unwrap();
        assert_eq!(expr.eval(&ctx).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_leading_minus_is_a_sign() {
        let ctx = Context::new();
        let expr = Expression::parse("-5<10").unwrap();
        assert_eq!(expr.eval(&ctx).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_rejects_multi_operator_sides() {
        // the compound parser handles chained terms; this form does not
        assert!(Expression::parse("a+b>10").is_err());
    }

    #[test]
    fn test_no_operator() {
        assert!(matches!(
            Expression::parse("abc"),
            Err(ParseError::NoOperatorFound { .. })
        ));
    }

    #[test]
    fn test_display() {
        let expr = Expression::parse("a >= 18").unwrap();
        assert_eq!(expr.to_string(), "a>=18");
    }
}
