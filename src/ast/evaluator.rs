//! Left-to-right evaluation of a parsed compound.
//!
//! The fold carries no precedence: the accumulator starts from the first
//! term's argument and becomes the left operand of every later operator, so
//! `1+2*3` is `(1+2)*3`. The context is only borrowed for the duration of
//! the call.

use super::{Argument, Compound};
use crate::context::Context;
use crate::error::EvalError;
use crate::value::Value;

impl Argument {
    /// Resolve this argument to a value: literals yield their value,
    /// identifiers are looked up in the context, nested compounds evaluate
    /// recursively.
    pub fn eval(&self, ctx: &Context) -> Result<Value, EvalError> {
        match self {
            Argument::Literal(value) => Ok(value.clone()),
            Argument::Identifier(name) => {
                ctx.get(name).cloned().ok_or_else(|| EvalError::UnknownIdentifier {
                    name: name.clone(),
                })
            }
            Argument::Compound(compound) => {
                compound.eval(ctx).map_err(|err| EvalError::Group {
                    expr: compound.to_string(),
                    source: Box::new(err),
                })
            }
        }
    }
}

impl Compound {
    /// Fold the term sequence into a single value against `ctx`.
    pub fn eval(&self, ctx: &Context) -> Result<Value, EvalError> {
        let mut terms = self.terms.iter();
        let first = terms.next().ok_or(EvalError::Empty)?;
        let mut value = first.arg.eval(ctx)?;
        for term in terms {
            let right = term.arg.eval(ctx)?;
            value = match &term.oper {
                Some(oper) => oper.apply(&value, &right)?,
                // the parser never produces this shape
                None => right,
            };
        }
        Ok(value)
    }
}
