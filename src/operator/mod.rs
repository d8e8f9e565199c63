//! Binary operators and the registry that the parser matches them from.
//!
//! A registry is an explicit, caller-constructed catalog: the parser borrows
//! it to recognize operator symbols, and parsed terms carry clones of the
//! matched operators so evaluation never needs the registry again.

mod builtin;

use crate::error::{EvalError, ParseError, RegistryError};
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Evaluation function applied to the (left, right) operand values.
/// Type coercion happens inside the function, not in the evaluator.
pub type OperatorFn = Arc<dyn Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync>;

/// A registered binary operator: a symbol plus its evaluation rule.
/// Immutable once registered; two operators are equal when their symbols are.
#[derive(Clone)]
pub struct Operator {
    symbol: String,
    func: OperatorFn,
}

impl Operator {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn apply(&self, left: &Value, right: &Value) -> Result<Value, EvalError> {
        (self.func)(left, right)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator").field("symbol", &self.symbol).finish()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

/// Catalog of known operators, kept sorted from longest to shortest symbol so
/// longest-match lookup is a single linear scan (`>=` wins over `>`).
///
/// Lookup and registration are safe from multiple threads; traffic is
/// expected to be read-mostly once the process has started up.
pub struct Registry {
    operators: RwLock<Vec<Operator>>,
}

impl Registry {
    /// A registry populated with the built-in operator set: arithmetic
    /// `+ - * /`, comparison `== < <= > >=`, boolean `&& ||` and the
    /// pattern match `~=`.
    pub fn new() -> Self {
        let registry = Self::empty();
        builtin::install(&registry).expect("built-in operator set is consistent");
        registry
    }

    /// An empty registry with no operators at all.
    pub fn empty() -> Self {
        Self {
            operators: RwLock::new(Vec::new()),
        }
    }

    /// Register an operator under `symbol`.
    ///
    /// Fails when the symbol is empty or carries surrounding whitespace, or
    /// when an operator with the same symbol already exists. On success the
    /// registry stays sorted by descending symbol length; operators of equal
    /// length keep their relative registration order.
    pub fn register<F>(&self, symbol: &str, func: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        if symbol.is_empty() || symbol != symbol.trim() {
            return Err(RegistryError::Invalid {
                symbol: symbol.to_string(),
            });
        }

        let mut operators = self.operators.write().expect("operator registry poisoned");
        if operators.iter().any(|o| o.symbol == symbol) {
            return Err(RegistryError::Duplicate {
                symbol: symbol.to_string(),
            });
        }

        let at = operators
            .iter()
            .position(|o| o.symbol.len() < symbol.len())
            .unwrap_or(operators.len());
        operators.insert(
            at,
            Operator {
                symbol: symbol.to_string(),
                func: Arc::new(func),
            },
        );
        log::debug!("registered operator [{}] ({})", at, symbol);
        Ok(())
    }

    /// The first operator whose symbol is a prefix of `s`, trying longer
    /// symbols before shorter ones.
    pub fn match_prefix(&self, s: &str) -> Option<Operator> {
        let operators = self.operators.read().expect("operator registry poisoned");
        operators.iter().find(|o| s.starts_with(&o.symbol)).cloned()
    }

    /// Split `s` at the leftmost occurrence of a known operator symbol,
    /// trying longer symbols first, returning the trimmed left and right
    /// sides and the operator.
    ///
    /// A `-` at index 0 is skipped: it is the sign of a numeric literal, not
    /// an operator. Used by the single-operator `Expression` form only; the
    /// compound parser matches prefixes as it walks instead.
    pub fn split_on_first(&self, s: &str) -> Result<(String, String, Operator), ParseError> {
        let operators = self.operators.read().expect("operator registry poisoned");
        for oper in operators.iter() {
            let Some(at) = s.find(&oper.symbol) else {
                continue;
            };
            if at == 0 && oper.symbol == "-" {
                continue;
            }
            if at == 0 || at + oper.symbol.len() >= s.len() {
                return Err(ParseError::MissingOperand {
                    symbol: oper.symbol.clone(),
                    expr: s.to_string(),
                });
            }
            let left = s[..at].trim().to_string();
            let right = s[at + oper.symbol.len()..].trim().to_string();
            return Ok((left, right, oper.clone()));
        }

        let expected: Vec<&str> = operators.iter().map(|o| o.symbol.as_str()).collect();
        Err(ParseError::NoOperatorFound {
            expr: s.to_string(),
            expected: expected.join("|"),
        })
    }

    /// Registered symbols, longest first.
    pub fn symbols(&self) -> Vec<String> {
        let operators = self.operators.read().expect("operator registry poisoned");
        operators.iter().map(|o| o.symbol.clone()).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
