//! Compilation and evaluation of normalized expressions.
//!
//! [`build`] parses an expression once into a [`CompiledExpression`], which
//! can then be evaluated any number of times against different
//! [`VariableBindings`]. The equation solver relies on this to re-evaluate
//! the same function at every Newton step without parsing it again.

use std::collections::{BTreeSet, HashMap};
use std::f64::consts::E;

use super::error::{EvalError, ParseError};
use super::functions::{FUNCTIONS, Function, constant};

/// Deepest nesting of parentheses, calls, signs and exponents accepted by
/// [`build`]. Parsing and evaluation recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Values for the free variables of an expression.
#[derive(Clone, Debug, Default)]
pub struct VariableBindings {
    values: HashMap<String, f64>,
}

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings with `e` set to Euler's number.
    pub fn with_euler() -> Self {
        let mut bindings = Self::new();
        bindings.set("e", E);
        bindings
    }

    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

/// A parsed expression, ready to be evaluated.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    root: Node,
    variables: BTreeSet<String>,
}

impl CompiledExpression {
    /// Evaluate against `bindings`.
    ///
    /// Only a declared variable missing from `bindings` is an error; numeric
    /// problems come back as NaN or infinity.
    pub fn evaluate(&self, bindings: &VariableBindings) -> Result<f64, EvalError> {
        self.root.eval(bindings)
    }

    /// The declared variables this expression was built with.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }
}

/// Parse `expr`, resolving identifiers against `declared` variables, the
/// function table and the named constants.
pub fn build(expr: &str, declared: &[&str]) -> Result<CompiledExpression, ParseError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let variables: BTreeSet<String> = declared.iter().map(|v| v.to_string()).collect();
    let mut parser = Parser {
        tokens: &tokens,
        index: 0,
        depth: 0,
        variables: &variables,
    };

    let root = parser.parse_sum()?;
    if let Some(token) = parser.peek() {
        return Err(match token.kind {
            TokenKind::CloseParen => ParseError::UnmatchedParen { index: token.index },
            _ => ParseError::UnexpectedToken { index: token.index },
        });
    }

    Ok(CompiledExpression { root, variables })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Rem => lhs % rhs,
        }
    }
}

#[derive(Clone, Debug)]
enum Node {
    Number(f64),
    Variable(String),
    Negate(Box<Node>),
    /// Left-associative run of operators of the same precedence, kept flat
    /// so long sums and products do not nest.
    Chain(Box<Node>, Vec<(BinaryOp, Node)>),
    Power(Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

impl Node {
    fn eval(&self, bindings: &VariableBindings) -> Result<f64, EvalError> {
        Ok(match self {
            Self::Number(value) => *value,
            Self::Variable(name) => bindings
                .get(name)
                .ok_or_else(|| EvalError::UnboundVariable(name.clone()))?,
            Self::Negate(inner) => -inner.eval(bindings)?,
            Self::Chain(first, rest) => {
                let mut acc = first.eval(bindings)?;
                for (op, operand) in rest {
                    acc = op.apply(acc, operand.eval(bindings)?);
                }
                acc
            }
            Self::Power(base, exponent) => base.eval(bindings)?.powf(exponent.eval(bindings)?),
            Self::Call(function, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                function.apply(&values)
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    OpenParen,
    CloseParen,
    Comma,
}

impl TokenKind {
    fn from_single_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Star,
            '/' => Self::Slash,
            '%' => Self::Percent,
            '^' => Self::Caret,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            ',' => Self::Comma,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Token {
    kind: TokenKind,
    /// Character offset of the first character of the token.
    index: usize,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(kind) = TokenKind::from_single_char(c) {
            tokens.push(Token { kind, index: start });
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber { text, index: start })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                index: start,
            });
        } else if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(chars[start..i].iter().collect()),
                index: start,
            });
        } else {
            return Err(ParseError::UnknownToken {
                ch: c,
                index: start,
            });
        }
    }

    Ok(tokens)
}

/// Recursive descent parser, lowest precedence first:
/// sum (`+ -`), product (`* / %`), unary (`-` `+`), power (`^`, right
/// associative), primary.
struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    /// Current nesting, bounded by [`MAX_DEPTH`].
    depth: usize,
    variables: &'a BTreeSet<String>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn next(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.tokens.get(self.index).ok_or(ParseError::UnexpectedEnd)?;
        self.index += 1;
        Ok(token)
    }

    fn parse_sum(&mut self) -> Result<Node, ParseError> {
        let first = self.parse_product()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.index += 1;
            rest.push((op, self.parse_product()?));
        }

        Ok(chain(first, rest))
    }

    fn parse_product(&mut self) -> Result<Node, ParseError> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.index += 1;
            rest.push((op, self.parse_unary()?));
        }

        Ok(chain(first, rest))
    }

    /// Every recursive path of the grammar passes through here, so this is
    /// where nesting is counted.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.depth >= MAX_DEPTH {
            let index = self.peek().map_or(0, |token| token.index);
            return Err(ParseError::TooDeep { index });
        }

        self.depth += 1;
        let node = self.parse_signed();
        self.depth -= 1;
        node
    }

    fn parse_signed(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.index += 1;
                Ok(Node::Negate(Box::new(self.parse_unary()?)))
            }
            Some(TokenKind::Plus) => {
                self.index += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_primary()?;

        if let Some(TokenKind::Caret) = self.peek_kind() {
            self.index += 1;
            // The exponent may carry its own sign: 2^-1
            let exponent = self.parse_unary()?;
            return Ok(Node::Power(Box::new(base), Box::new(exponent)));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.next()?;

        match &token.kind {
            TokenKind::Number(value) => Ok(Node::Number(*value)),
            TokenKind::Ident(name) => {
                if let Some(TokenKind::OpenParen) = self.peek_kind() {
                    self.parse_call(name)
                } else {
                    self.resolve_identifier(name)
                }
            }
            TokenKind::OpenParen => {
                let inner = self.parse_sum()?;
                self.expect_close(token.index)?;
                Ok(inner)
            }
            _ => Err(ParseError::UnexpectedToken { index: token.index }),
        }
    }

    fn resolve_identifier(&self, name: &str) -> Result<Node, ParseError> {
        if self.variables.contains(name) {
            Ok(Node::Variable(name.to_string()))
        } else if let Some(value) = constant(name) {
            Ok(Node::Number(value))
        } else {
            Err(ParseError::UnknownVariable(name.to_string()))
        }
    }

    fn parse_call(&mut self, name: &str) -> Result<Node, ParseError> {
        let open = self.next()?;
        let function = *FUNCTIONS
            .get(name)
            .ok_or_else(|| ParseError::UnknownFunction(name.to_string()))?;

        let mut args = Vec::with_capacity(function.arity);
        if let Some(TokenKind::CloseParen) = self.peek_kind() {
            self.index += 1;
        } else {
            loop {
                args.push(self.parse_sum()?);
                match self.peek_kind() {
                    Some(TokenKind::Comma) => self.index += 1,
                    _ => break,
                }
            }
            self.expect_close(open.index)?;
        }

        if args.len() != function.arity {
            return Err(ParseError::ArityMismatch {
                name: name.to_string(),
                expected: function.arity,
                found: args.len(),
            });
        }

        Ok(Node::Call(function, args))
    }

    fn expect_close(&mut self, open_index: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::CloseParen => {
                self.index += 1;
                Ok(())
            }
            Some(token) => Err(ParseError::UnexpectedToken { index: token.index }),
            None => Err(ParseError::UnmatchedParen { index: open_index }),
        }
    }
}

fn chain(first: Node, rest: Vec<(BinaryOp, Node)>) -> Node {
    if rest.is_empty() {
        first
    } else {
        Node::Chain(Box::new(first), rest)
    }
}
