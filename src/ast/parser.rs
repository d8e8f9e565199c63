//! Recursive-descent parser for compound expressions.
//!
//! The parser walks a remaining-text cursor, matching an operator symbol
//! (via the registry, longest first) before every term except the first at a
//! level, then an argument: a parenthesized group recurses one level deeper,
//! anything else is scanned into a token and classified as a literal or an
//! identifier. There is no separate lexer pass; `scan_token` stops at
//! whatever the registry recognizes as an operator.

use super::{Argument, Compound, Term};
use crate::error::ParseError;
use crate::operator::Registry;
use crate::value::Value;
use log::debug;

impl Compound {
    /// Parse with the built-in operator set.
    pub fn parse(s: &str) -> Result<Compound, ParseError> {
        Self::parse_with(s, &Registry::default())
    }

    /// Parse against a caller-supplied operator registry.
    pub fn parse_with(s: &str, registry: &Registry) -> Result<Compound, ParseError> {
        debug!("parsing compound [[ {} ]]", s);
        let mut parser = Parser { registry, rest: s };
        let compound = parser.parse_level(0).map_err(|err| ParseError::Invalid {
            expr: s.to_string(),
            source: Box::new(err),
        })?;
        let rest = parser.rest.trim_start();
        if !rest.is_empty() {
            return Err(ParseError::TrailingText {
                rest: rest.to_string(),
            });
        }
        debug!("[[ {} ]] -> {} terms", s, compound.terms.len());
        Ok(compound)
    }
}

struct Parser<'a> {
    registry: &'a Registry,
    rest: &'a str,
}

impl Parser<'_> {
    /// Parse one nesting level. A nested call stops at its closing `)` and
    /// leaves it on the cursor for the caller to consume.
    fn parse_level(&mut self, level: usize) -> Result<Compound, ParseError> {
        let mut terms: Vec<Term> = Vec::new();
        loop {
            self.rest = self.rest.trim_start();
            debug!("rem: \"{}\"", self.rest);
            if self.rest.is_empty() {
                break;
            }
            if self.rest.starts_with(')') && level > 0 {
                debug!("end of nested expression");
                break;
            }

            // the first term of a level is a bare argument; a leading `-`
            // there belongs to the numeric literal, not an operator
            let oper = if terms.is_empty() {
                None
            } else {
                match self.registry.match_prefix(self.rest) {
                    Some(oper) => {
                        debug!("oper: {}", oper);
                        self.rest = self.rest[oper.symbol().len()..].trim_start();
                        Some(oper)
                    }
                    None => {
                        return Err(ParseError::ExpectedOperator {
                            rest: self.rest.to_string(),
                        })
                    }
                }
            };
            if let (Some(oper), true) = (&oper, self.rest.is_empty()) {
                return Err(ParseError::MissingOperand {
                    symbol: oper.symbol().to_string(),
                    expr: self.rest.to_string(),
                });
            }

            let arg = if let Some(inner) = self.rest.strip_prefix('(') {
                self.rest = inner;
                let nested = self.parse_level(level + 1)?;
                match self.rest.strip_prefix(')') {
                    Some(after) => self.rest = after,
                    None => {
                        return Err(ParseError::UnclosedGroup {
                            rest: self.rest.to_string(),
                        })
                    }
                }
                debug!("parsed (group): {}, rem: {}", nested, self.rest);
                Argument::Compound(nested)
            } else {
                let token = scan_token(self.registry, self.rest);
                self.rest = &self.rest[token.len()..];
                let arg = parse_literal_or_identifier(token)?;
                debug!("parsed arg: {}, rem: {}", arg, self.rest);
                arg
            };

            terms.push(Term { oper, arg });
        }

        if terms.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Compound { terms })
    }
}

/// Isolate the next token at the head of `s` without classifying it.
///
/// A token starting with a quote runs to the matching closing quote, or
/// permissively to end of input when unterminated (classification rejects it
/// later). Any other token runs from its second character to the first
/// whitespace, `(`, `)` or registered operator symbol; starting at the second
/// character is what lets `-5` scan as a single token.
fn scan_token<'a>(registry: &Registry, s: &'a str) -> &'a str {
    let mut chars = s.char_indices();
    let Some((_, first)) = chars.next() else {
        return s;
    };
    if first == '\'' || first == '"' {
        for (i, c) in chars {
            if c == first {
                return &s[..i + c.len_utf8()];
            }
        }
        return s;
    }
    for (i, c) in chars {
        if c.is_whitespace() || c == '(' || c == ')' {
            return &s[..i];
        }
        if registry.match_prefix(&s[i..]).is_some() {
            return &s[..i];
        }
    }
    s
}

/// Classify a complete token. Order matters: integers and boolean keywords
/// are tried before floats so `2` stays an integer and `true` stays a
/// boolean.
pub(crate) fn parse_literal_or_identifier(token: &str) -> Result<Argument, ParseError> {
    let token = token.trim();
    if is_quoted(token, '\'') || is_quoted(token, '"') {
        let inner = &token[1..token.len() - 1];
        return Ok(Argument::Literal(Value::Str(inner.to_string())));
    }
    if let Ok(i) = token.parse::<i64>() {
        return Ok(Argument::Literal(Value::Int(i)));
    }
    if let Ok(b) = token.parse::<bool>() {
        return Ok(Argument::Literal(Value::Bool(b)));
    }
    if let Ok(f) = token.parse::<f64>() {
        return Ok(Argument::Literal(Value::Float(f)));
    }
    if is_valid_identifier(token) {
        return Ok(Argument::Identifier(token.to_string()));
    }
    Err(ParseError::UnrecognizedArgument {
        token: token.to_string(),
    })
}

fn is_quoted(s: &str, quote: char) -> bool {
    s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote)
}

/// `[A-Za-z][A-Za-z0-9_]*`, not ending with `_`.
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !s.ends_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_invalid(err: ParseError) -> ParseError {
        match err {
            ParseError::Invalid { source, .. } => *source,
            other => other,
        }
    }

    #[test]
    fn test_classification_priority() {
        assert_eq!(
            parse_literal_or_identifier("'jan'").unwrap(),
            Argument::Literal(Value::Str("jan".to_string()))
        );
        assert_eq!(
            parse_literal_or_identifier("\"27821234567\"").unwrap(),
            Argument::Literal(Value::Str("27821234567".to_string()))
        );
        assert_eq!(parse_literal_or_identifier("2").unwrap(), Argument::Literal(Value::Int(2)));
        assert_eq!(parse_literal_or_identifier("-5").unwrap(), Argument::Literal(Value::Int(-5)));
        assert_eq!(
            parse_literal_or_identifier("true").unwrap(),
            Argument::Literal(Value::Bool(true))
        );
        assert_eq!(
            parse_literal_or_identifier("12.3").unwrap(),
            Argument::Literal(Value::Float(12.3))
        );
        assert_eq!(
            parse_literal_or_identifier("rate").unwrap(),
            Argument::Identifier("rate".to_string())
        );
    }

    #[test]
    fn test_identifier_syntax() {
        assert!(is_valid_identifier("a"));
        assert!(is_valid_identifier("aBc_9x"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("9a"));
        assert!(!is_valid_identifier("_a"));
        assert!(!is_valid_identifier("a_"));
        assert!(!is_valid_identifier("a-b"));
    }

    #[test]
    fn test_unrecognized_argument() {
        assert!(matches!(
            parse_literal_or_identifier("'abc"),
            Err(ParseError::UnrecognizedArgument { .. })
        ));
        assert!(matches!(
            parse_literal_or_identifier("@x"),
            Err(ParseError::UnrecognizedArgument { .. })
        ));
    }

    #[test]
    fn test_scan_token_stops_at_operator() {
        let registry = Registry::default();
        assert_eq!(scan_token(&registry, "a+b"), "a");
        assert_eq!(scan_token(&registry, "-5<10"), "-5");
        assert_eq!(scan_token(&registry, "12.3 == 2"), "12.3");
        assert_eq!(scan_token(&registry, "abc)"), "abc");
    }

    #[test]
    fn test_scan_token_quoted() {
        let registry = Registry::default();
        assert_eq!(scan_token(&registry, "'a b' == x"), "'a b'");
        assert_eq!(scan_token(&registry, "'ja\"n' == y"), "'ja\"n'");
        // unterminated quote scans permissively to end of input
        assert_eq!(scan_token(&registry, "'abc"), "'abc");
    }

    #[test]
    fn test_parse_flat_terms() {
        let compound = Compound::parse("1+2*3").unwrap();
        assert_eq!(compound.terms().len(), 3);
        assert!(compound.terms()[0].operator().is_none());
        assert_eq!(compound.terms()[1].operator().unwrap().symbol(), "+");
        assert_eq!(compound.terms()[2].operator().unwrap().symbol(), "*");
    }

    #[test]
    fn test_parse_nested_group() {
        let compound = Compound::parse("1+(2*3)").unwrap();
        assert_eq!(compound.terms().len(), 2);
        assert!(matches!(compound.terms()[1].argument(), Argument::Compound(_)));
    }

    #[test]
    fn test_parse_leading_minus_in_group() {
        let compound = Compound::parse("(-7+4)").unwrap();
        assert_eq!(compound.terms().len(), 1);
        let Argument::Compound(inner) = compound.terms()[0].argument() else {
            panic!("expected nested compound");
        };
        assert_eq!(inner.terms()[0].argument(), &Argument::Literal(Value::Int(-7)));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(unwrap_invalid(Compound::parse("").unwrap_err()), ParseError::Empty));
        assert!(matches!(
            unwrap_invalid(Compound::parse("   ").unwrap_err()),
            ParseError::Empty
        ));
        assert!(matches!(
            unwrap_invalid(Compound::parse("()").unwrap_err()),
            ParseError::Empty
        ));
    }

    #[test]
    fn test_parse_adjacent_terms() {
        assert!(matches!(
            unwrap_invalid(Compound::parse("1 2").unwrap_err()),
            ParseError::ExpectedOperator { .. }
        ));
    }

    #[test]
    fn test_parse_unclosed_group() {
        assert!(matches!(
            unwrap_invalid(Compound::parse("(1+2").unwrap_err()),
            ParseError::UnclosedGroup { .. }
        ));
        assert!(matches!(
            unwrap_invalid(Compound::parse("((1+2)").unwrap_err()),
            ParseError::UnclosedGroup { .. }
        ));
    }

    #[test]
    fn test_parse_excess_close() {
        assert!(Compound::parse("1+2)").is_err());
        assert!(Compound::parse(")").is_err());
    }

    #[test]
    fn test_parse_dangling_operator() {
        assert!(matches!(
            unwrap_invalid(Compound::parse("1+").unwrap_err()),
            ParseError::MissingOperand { .. }
        ));
    }

    #[test]
    fn test_parse_with_custom_registry() {
        let registry = Registry::default();
        registry
            .register("contains", |left, right| {
                use crate::error::EvalError;
                match (left.as_str(), right.as_str()) {
                    (Some(a), Some(b)) => Ok(Value::Bool(a.contains(b))),
                    _ => Err(EvalError::TypeMismatch {
                        left: left.type_name(),
                        symbol: "contains".to_string(),
                        right: right.type_name(),
                    }),
                }
            })
            .unwrap();
        let compound = Compound::parse_with("'abc' contains 'b'", &registry).unwrap();
        assert_eq!(compound.terms().len(), 2);
        assert_eq!(compound.terms()[1].operator().unwrap().symbol(), "contains");
    }
}
