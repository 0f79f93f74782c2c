//! Call-expression parsing
//!
//! Grammar accepted on a console line:
//!
//! ```text
//! call     := path '.' name [ '(' [ args ] ')' | args ]
//! path     := name ( '::' name )*
//! args     := arg ( ',' arg )*
//! arg      := integer | float | string | 'nil' | 'true' | 'false'
//! integer  := [+-] digits          (underscores allowed, 0x prefix for hex)
//! float    := [+-] digits '.' digits [ exponent ]
//! string   := '"' any-but-quote* '"'
//! ```
//!
//! Arguments borrow from the input line; nothing is copied.

use ferrule_core::Argument;
use heapless::{String, Vec};

/// Maximum number of `::`-separated path segments
pub const MAX_PATH_DEPTH: usize = 4;

/// Maximum number of arguments in one call
pub const MAX_ARGS: usize = 4;

/// Maximum length of a numeric literal
const MAX_NUMBER_LEN: usize = 32;

/// Errors from parsing a call expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line contains only whitespace
    Empty,
    /// A module name was expected
    ExpectedName,
    /// No `.function` after the module path
    ExpectedFunction,
    /// An argument was expected (e.g. after a comma)
    ExpectedArgument,
    /// More than [`MAX_PATH_DEPTH`] path segments
    PathTooDeep,
    /// More than [`MAX_ARGS`] arguments
    TooManyArguments,
    /// Numeric literal could not be parsed
    InvalidNumber,
    /// String literal has no closing quote
    UnterminatedString,
    /// Argument list has no closing parenthesis
    UnclosedParen,
    /// Character not valid at this position
    UnexpectedCharacter(char),
}

/// A parsed call
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr<'a> {
    /// Module path, outermost first
    pub path: Vec<&'a str, MAX_PATH_DEPTH>,
    /// Function name
    pub function: &'a str,
    /// Arguments in call order
    pub args: Vec<Argument<'a>, MAX_ARGS>,
}

/// Byte cursor over the input line
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, mut accept: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        &rest[..len]
    }

    fn name(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                Some(self.take_while(|c| c.is_ascii_alphanumeric() || c == '_'))
            }
            _ => None,
        }
    }
}

/// Parse one console line into a call expression
pub fn parse_call(input: &str) -> Result<CallExpr<'_>, ParseError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    if cursor.is_at_end() {
        return Err(ParseError::Empty);
    }

    let mut path = Vec::new();
    loop {
        let segment = cursor.name().ok_or(ParseError::ExpectedName)?;
        path.push(segment).map_err(|_| ParseError::PathTooDeep)?;
        if !cursor.eat("::") {
            break;
        }
    }

    if !cursor.eat(".") {
        return Err(ParseError::ExpectedFunction);
    }
    let function = cursor.name().ok_or(ParseError::ExpectedFunction)?;

    let mut args = Vec::new();
    cursor.skip_whitespace();
    if cursor.eat("(") {
        cursor.skip_whitespace();
        if !cursor.eat(")") {
            parse_args(&mut cursor, &mut args)?;
            cursor.skip_whitespace();
            if !cursor.eat(")") {
                return Err(ParseError::UnclosedParen);
            }
        }
    } else if !cursor.is_at_end() {
        parse_args(&mut cursor, &mut args)?;
    }

    cursor.skip_whitespace();
    match cursor.peek() {
        None => Ok(CallExpr {
            path,
            function,
            args,
        }),
        Some(c) => Err(ParseError::UnexpectedCharacter(c)),
    }
}

fn parse_args<'a>(
    cursor: &mut Cursor<'a>,
    args: &mut Vec<Argument<'a>, MAX_ARGS>,
) -> Result<(), ParseError> {
    loop {
        cursor.skip_whitespace();
        let arg = parse_arg(cursor)?;
        args.push(arg).map_err(|_| ParseError::TooManyArguments)?;
        cursor.skip_whitespace();
        if !cursor.eat(",") {
            return Ok(());
        }
    }
}

fn parse_arg<'a>(cursor: &mut Cursor<'a>) -> Result<Argument<'a>, ParseError> {
    match cursor.peek() {
        Some('"') => {
            cursor.pos += 1;
            let rest = cursor.rest();
            let end = rest.find('"').ok_or(ParseError::UnterminatedString)?;
            cursor.pos += end + 1;
            Ok(Argument::Text(&rest[..end]))
        }
        Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => parse_number(cursor),
        Some(c) if c.is_ascii_alphabetic() => match cursor.name() {
            Some("nil") => Ok(Argument::Nil),
            Some("true") => Ok(Argument::Boolean(true)),
            Some("false") => Ok(Argument::Boolean(false)),
            _ => Err(ParseError::UnexpectedCharacter(c)),
        },
        Some(c) => Err(ParseError::UnexpectedCharacter(c)),
        None => Err(ParseError::ExpectedArgument),
    }
}

fn parse_number<'a>(cursor: &mut Cursor<'a>) -> Result<Argument<'a>, ParseError> {
    let token =
        cursor.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | '_'));

    let mut literal: String<MAX_NUMBER_LEN> = String::new();
    for c in token.chars().filter(|&c| c != '_') {
        literal.push(c).map_err(|_| ParseError::InvalidNumber)?;
    }

    if let Some(hex) = literal.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16)
            .map(Argument::Integer)
            .map_err(|_| ParseError::InvalidNumber);
    }

    if literal.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        literal
            .parse::<f64>()
            .map(Argument::Float)
            .map_err(|_| ParseError::InvalidNumber)
    } else {
        literal
            .parse::<i64>()
            .map(Argument::Integer)
            .map_err(|_| ParseError::InvalidNumber)
    }
}
