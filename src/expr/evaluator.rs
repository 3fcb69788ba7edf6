//! Reference evaluator for SystemVerilog-flavoured constant expressions.
//!
//! Supports integer literals (`42`, `0x2A`, `'h2A`, `8'b0010_1010`),
//! parameter references, `$clog2`/`$pow`, and the usual unary, binary and
//! ternary operators with SystemVerilog precedence. Arithmetic is done in
//! `i128` and overflow is an error, not a wrap.
//!
//! Nesting is bounded by [`MAX_NESTING`], counted across parentheses, unary
//! operators, ternaries and parameter references together.

use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use super::ExpressionEvaluator;
use super::lexer::{Token, tokenize};
use super::scope::ParameterScope;

/// Deepest nesting an expression may reach before evaluation gives up.
pub const MAX_NESTING: usize = 256;

/// Why an expression could not be reduced to a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("cyclic reference through parameter '{0}'")]
    CyclicReference(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("wrong number of arguments to '{name}': expected {expected}, found {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

impl EvalError {
    fn unexpected(text: &str) -> Self {
        Self::UnexpectedToken(text.to_string())
    }
}

/// Evaluates expressions against a [`ParameterScope`].
///
/// Unresolvable input is returned unchanged, so callers see non-numeric text
/// and fall back to their defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvEvaluator;

impl SvEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate to an integer, reporting why evaluation failed.
    pub fn try_evaluate(
        &self,
        expression: &str,
        scope: &ParameterScope,
    ) -> Result<i128, EvalError> {
        let mut visiting = Vec::new();
        evaluate_in(expression, scope, &mut visiting, 0)
    }
}

impl ExpressionEvaluator for SvEvaluator {
    fn evaluate(&self, expression: &str, scope: &ParameterScope) -> String {
        match self.try_evaluate(expression, scope) {
            Ok(value) => value.to_string(),
            Err(err) => {
                debug!("[EXPR] '{}' left unresolved: {}", expression, err);
                expression.to_string()
            }
        }
    }
}

fn evaluate_in(
    expression: &str,
    scope: &ParameterScope,
    visiting: &mut Vec<SmolStr>,
    depth: usize,
) -> Result<i128, EvalError> {
    let tokens = tokenize(expression).map_err(EvalError::unexpected)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        scope,
        visiting,
        depth,
    };
    let value = parser.expression()?;
    match parser.peek() {
        Some((_, text)) => Err(EvalError::unexpected(text)),
        None => Ok(value),
    }
}

// ============================================================================
// PARSER
// ============================================================================

struct Parser<'a, 'v> {
    tokens: Vec<(Token, &'a str)>,
    pos: usize,
    scope: &'a ParameterScope,
    visiting: &'v mut Vec<SmolStr>,
    depth: usize,
}

/// Binding power of a binary operator. Higher binds tighter.
fn precedence(token: Token) -> Option<u8> {
    let prec = match token {
        Token::OrOr => 1,
        Token::AndAnd => 2,
        Token::Pipe => 3,
        Token::Caret => 4,
        Token::Amp => 5,
        Token::EqEq | Token::NotEq => 6,
        Token::Lt | Token::Le | Token::Gt | Token::Ge => 7,
        Token::Shl | Token::Shr => 8,
        Token::Plus | Token::Minus => 9,
        Token::Star | Token::Slash | Token::Percent => 10,
        Token::StarStar => 11,
        _ => return None,
    };
    Some(prec)
}

impl<'a> Parser<'a, '_> {
    fn peek(&self) -> Option<(Token, &'a str)> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(Token, &'a str)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        match self.bump() {
            Some((token, _)) if token == expected => Ok(()),
            Some((_, text)) => Err(EvalError::unexpected(text)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::TooDeep(MAX_NESTING));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> Result<i128, EvalError> {
        self.nested(Self::ternary)
    }

    fn ternary(&mut self) -> Result<i128, EvalError> {
        let condition = self.binary(0)?;
        if !matches!(self.peek(), Some((Token::Question, _))) {
            return Ok(condition);
        }
        self.bump();
        let when_true = self.expression()?;
        self.expect(Token::Colon)?;
        let when_false = self.expression()?;
        Ok(if condition != 0 { when_true } else { when_false })
    }

    fn binary(&mut self, min_prec: u8) -> Result<i128, EvalError> {
        let mut lhs = self.unary()?;
        while let Some((op, _)) = self.peek() {
            let Some(prec) = precedence(op) else { break };
            if prec < min_prec {
                break;
            }
            self.bump();
            // `**` is right-associative.
            let next = if op == Token::StarStar { prec } else { prec + 1 };
            let rhs = self.binary(next)?;
            lhs = apply_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<i128, EvalError> {
        self.nested(Self::prefixed)
    }

    fn prefixed(&mut self) -> Result<i128, EvalError> {
        match self.peek() {
            Some((Token::Minus, _)) => {
                self.bump();
                self.unary()?.checked_neg().ok_or(EvalError::Overflow)
            }
            Some((Token::Plus, _)) => {
                self.bump();
                self.unary()
            }
            Some((Token::Bang, _)) => {
                self.bump();
                Ok(i128::from(self.unary()? == 0))
            }
            Some((Token::Tilde, _)) => {
                self.bump();
                Ok(!self.unary()?)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<i128, EvalError> {
        let Some((token, text)) = self.bump() else {
            return Err(EvalError::UnexpectedEnd);
        };
        match token {
            Token::Decimal => parse_radix(text, 10),
            Token::HexLiteral => parse_radix(&text[2..], 16),
            Token::BasedLiteral => parse_based(text),
            Token::Ident => self.reference(text),
            Token::SystemFunction => self.call(text),
            Token::LParen => {
                let value = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            _ => Err(EvalError::unexpected(text)),
        }
    }

    fn reference(&mut self, name: &str) -> Result<i128, EvalError> {
        match name {
            "true" => return Ok(1),
            "false" => return Ok(0),
            _ => {}
        }
        let Some(value) = self.scope.lookup(name) else {
            return Err(EvalError::UnknownParameter(name.to_string()));
        };
        if self.visiting.iter().any(|seen| seen == name) {
            return Err(EvalError::CyclicReference(name.to_string()));
        }
        self.visiting.push(SmolStr::new(name));
        let result = evaluate_in(value, self.scope, self.visiting, self.depth);
        self.visiting.pop();
        result
    }

    fn call(&mut self, name: &str) -> Result<i128, EvalError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if !matches!(self.peek(), Some((Token::RParen, _))) {
            loop {
                args.push(self.expression()?);
                if matches!(self.peek(), Some((Token::Comma, _))) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;

        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(EvalError::Arity {
                    name: name.to_string(),
                    expected,
                    found: args.len(),
                })
            }
        };
        match name {
            "$clog2" => {
                arity(1)?;
                Ok(clog2(args[0]))
            }
            "$pow" => {
                arity(2)?;
                power(args[0], args[1])
            }
            _ => Err(EvalError::UnknownFunction(name.to_string())),
        }
    }
}

// ============================================================================
// LITERALS AND OPERATORS
// ============================================================================

fn parse_radix(digits: &str, radix: u32) -> Result<i128, EvalError> {
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    i128::from_str_radix(&cleaned, radix).map_err(|_| EvalError::InvalidLiteral(digits.to_string()))
}

/// Parse `[size]'[s]<base><digits>`. A size truncates the value to that
/// many bits.
fn parse_based(text: &str) -> Result<i128, EvalError> {
    let invalid = || EvalError::InvalidLiteral(text.to_string());
    let (size, rest) = text.split_once('\'').ok_or_else(invalid)?;
    let rest = rest.strip_prefix(['s', 'S']).unwrap_or(rest);
    let mut chars = rest.chars();
    let radix = match chars.next().map(|c| c.to_ascii_lowercase()) {
        Some('b') => 2,
        Some('o') => 8,
        Some('d') => 10,
        Some('h') => 16,
        _ => return Err(invalid()),
    };
    let value = parse_radix(chars.as_str(), radix).map_err(|_| invalid())?;

    if size.is_empty() {
        return Ok(value);
    }
    let bits = parse_radix(size, 10).map_err(|_| invalid())?;
    if bits <= 0 {
        return Err(invalid());
    }
    if bits >= 127 {
        return Ok(value);
    }
    Ok(value & ((1i128 << bits) - 1))
}

fn clog2(value: i128) -> i128 {
    if value <= 1 {
        0
    } else {
        i128::from(128 - (value - 1).leading_zeros())
    }
}

fn power(base: i128, exponent: i128) -> Result<i128, EvalError> {
    let exponent = u32::try_from(exponent).map_err(|_| EvalError::Overflow)?;
    base.checked_pow(exponent).ok_or(EvalError::Overflow)
}

fn shift_amount(amount: i128) -> Result<u32, EvalError> {
    u32::try_from(amount)
        .ok()
        .filter(|amount| *amount < 128)
        .ok_or(EvalError::Overflow)
}

fn apply_binary(op: Token, lhs: i128, rhs: i128) -> Result<i128, EvalError> {
    let overflow = || EvalError::Overflow;
    let value = match op {
        Token::Plus => lhs.checked_add(rhs).ok_or_else(overflow)?,
        Token::Minus => lhs.checked_sub(rhs).ok_or_else(overflow)?,
        Token::Star => lhs.checked_mul(rhs).ok_or_else(overflow)?,
        Token::Slash => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_div(rhs).ok_or_else(overflow)?
        }
        Token::Percent => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_rem(rhs).ok_or_else(overflow)?
        }
        Token::StarStar => power(lhs, rhs)?,
        Token::Shl => lhs.checked_shl(shift_amount(rhs)?).ok_or_else(overflow)?,
        Token::Shr => lhs >> shift_amount(rhs)?,
        Token::EqEq => i128::from(lhs == rhs),
        Token::NotEq => i128::from(lhs != rhs),
        Token::Lt => i128::from(lhs < rhs),
        Token::Le => i128::from(lhs <= rhs),
        Token::Gt => i128::from(lhs > rhs),
        Token::Ge => i128::from(lhs >= rhs),
        Token::AndAnd => i128::from(lhs != 0 && rhs != 0),
        Token::OrOr => i128::from(lhs != 0 || rhs != 0),
        Token::Amp => lhs & rhs,
        Token::Pipe => lhs | rhs,
        Token::Caret => lhs ^ rhs,
        _ => return Err(EvalError::UnexpectedToken(format!("{op:?}"))),
    };
    Ok(value)
}
