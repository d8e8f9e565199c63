//! Parsed representation of an expression.
//!
//! A [`Compound`] is an ordered sequence of [`Term`]s evaluated strictly left
//! to right; there is no operator precedence, grouping comes only from
//! explicit parentheses. Parsed trees are immutable and safe to share across
//! threads; the same tree can be evaluated repeatedly against different
//! contexts.

mod evaluator;
mod parser;

pub(crate) use parser::parse_literal_or_identifier;

use crate::operator::Operator;
use crate::value::Value;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One operand of a term: a constant, a name resolved at evaluation time, or
/// a parenthesized sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Literal(Value),
    Identifier(String),
    Compound(Compound),
}

/// One step of a compound: an optional operator and its operand. The first
/// term of a compound carries no operator (its argument is the initial
/// value); every later term carries one. The parser enforces this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub(crate) oper: Option<Operator>,
    pub(crate) arg: Argument,
}

impl Term {
    pub fn operator(&self) -> Option<&Operator> {
        self.oper.as_ref()
    }

    pub fn argument(&self) -> &Argument {
        &self.arg
    }
}

/// An ordered, non-empty sequence of terms; the parsed form of one
/// expression string.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub(crate) terms: Vec<Term>,
}

impl Compound {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Literal(Value::Str(s)) => {
                // no escape processing: fall back to single quotes when the
                // content itself contains a double quote
                let quote = if s.contains('"') { '\'' } else { '"' };
                write!(f, "{}{}{}", quote, s, quote)
            }
            Argument::Literal(value) => write!(f, "{}", value),
            Argument::Identifier(name) => write!(f, "{}", name),
            // re-emit the grouping: under left-to-right evaluation a
            // flattened sub-expression would change meaning on re-parse
            Argument::Compound(compound) => write!(f, "({})", compound),
        }
    }
}

impl fmt::Display for Compound {
    /// Canonical text form: each operator symbol immediately followed by its
    /// argument, string literals re-quoted (double quotes unless the content
    /// contains one). The printed form parses back to an equivalent tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            if let Some(oper) = &term.oper {
                write!(f, "{}", oper)?;
            }
            write!(f, "{}", term.arg)?;
        }
        Ok(())
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Compound {
    /// Decode from a string-typed field, parsing with the built-in operator
    /// set. A malformed expression fails the whole document decode.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Compound::parse(&s).map_err(D::Error::custom)
    }
}
