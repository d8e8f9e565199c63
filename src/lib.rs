//! condex: a small embeddable expression language.
//!
//! Short, human-authored strings such as `a+b>10` or `(x=='1')&&(y<5)` parse
//! into an immutable term tree and evaluate against a caller-supplied
//! [`Context`], so host applications can encode conditional logic (rule
//! engines, routing predicates, feature-flag guards) without recompiling.
//!
//! Evaluation is a strict left-to-right fold with no operator precedence:
//! `1+2*3` is `(1+2)*3`; write `1+(2*3)` for conventional grouping. Operator
//! symbols are matched longest-first from a [`Registry`] that hosts can
//! extend with their own binary operators.
//!
//! ```
//! use condex::{evaluate_expression, Context, Value};
//!
//! let mut ctx = Context::new();
//! ctx.set("a", 1_i64);
//! ctx.set("b", 2_i64);
//! let result = evaluate_expression("a+b", &ctx).unwrap();
//! assert_eq!(result, Value::Float(3.0));
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod expression;
pub mod operator;
pub mod value;

pub use ast::{Argument, Compound, Term};
pub use context::Context;
pub use error::{Error, EvalError, ParseError, RegistryError};
pub use expression::Expression;
pub use operator::{Operator, OperatorFn, Registry};
pub use value::Value;

/// Parse `expression` with the built-in operator set and evaluate it against
/// `context` in one step. Hosts that evaluate the same expression repeatedly
/// should parse once via [`Compound::parse`] and keep the tree.
pub fn evaluate_expression(expression: &str, context: &Context) -> Result<Value, Error> {
    let compound = Compound::parse(expression)?;
    Ok(compound.eval(context)?)
}
