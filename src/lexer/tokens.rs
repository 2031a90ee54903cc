use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashSet, fmt::Display, ops::Index, rc::Rc};

/// Characters that split runs: every single-character operator, punctuation,
/// the three bracket pairs and both quote characters.
pub const NOTATION: &str = "=><+-/*~!@#$%^&|()[]{},.:;?\"'";
pub const QUOTES: &str = "\"'";

lazy_static! {
    pub static ref OPERATORS: HashSet<&'static str> = {
        ", . ; : + - * / % ^ ~ ! ? $ & | > && || < = => == >= <= != += -= *= /= %= ^= ~= &= |= ?? ++ -- >> << >>= <<="
            .split(' ')
            .collect()
    };
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"(?i)^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)[fmu]?$").unwrap();
    static ref HEX_LITERAL: Regex = Regex::new(r"^0[xX][0-9a-fA-F]+$").unwrap();
}

pub fn is_notation(symbol: char) -> bool {
    NOTATION.contains(symbol)
}

pub fn is_quote(symbol: char) -> bool {
    QUOTES.contains(symbol)
}

pub fn is_operator(token: &str) -> bool {
    OPERATORS.contains(token)
}

pub fn is_literal(token: &str) -> bool {
    is_char_literal(token)
        || is_string_literal(token)
        || is_object_literal(token)
        || is_boolean_literal(token)
        || is_decimal_literal(token)
        || is_hex_literal(token)
}

pub fn is_char_literal(token: &str) -> bool {
    token.starts_with('\'')
}

pub fn is_string_literal(token: &str) -> bool {
    token.starts_with('"')
}

pub fn is_object_literal(token: &str) -> bool {
    token == "null" || token == "default"
}

pub fn is_boolean_literal(token: &str) -> bool {
    token == "true" || token == "false"
}

/// Digits with an optional fraction and an optional `f`, `m` or `u` suffix.
pub fn is_decimal_literal(token: &str) -> bool {
    DECIMAL_LITERAL.is_match(token)
}

pub fn is_hex_literal(token: &str) -> bool {
    HEX_LITERAL.is_match(token)
}

/// Which of the three bracket pairs a bracket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketFamily {
    Block,
    Argument,
    Array,
}

impl BracketFamily {
    pub fn code(self) -> u8 {
        match self {
            BracketFamily::Block => 0,
            BracketFamily::Argument => 1,
            BracketFamily::Array => 2,
        }
    }

    pub fn opening(self) -> &'static str {
        match self {
            BracketFamily::Block => "{",
            BracketFamily::Argument => "(",
            BracketFamily::Array => "[",
        }
    }

    pub fn closing(self) -> &'static str {
        match self {
            BracketFamily::Block => "}",
            BracketFamily::Argument => ")",
            BracketFamily::Array => "]",
        }
    }
}

impl Display for BracketFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketFamily::Block => write!(f, "block"),
            BracketFamily::Argument => write!(f, "argument"),
            BracketFamily::Array => write!(f, "array"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Opening(BracketFamily),
    Closing(BracketFamily),
}

impl Bracket {
    pub fn family(self) -> BracketFamily {
        match self {
            Bracket::Opening(family) | Bracket::Closing(family) => family,
        }
    }

    pub fn is_opening(self) -> bool {
        matches!(self, Bracket::Opening(_))
    }

    pub fn is_closing(self) -> bool {
        matches!(self, Bracket::Closing(_))
    }
}

pub fn bracket(token: &str) -> Option<Bracket> {
    match token {
        "{" => Some(Bracket::Opening(BracketFamily::Block)),
        "(" => Some(Bracket::Opening(BracketFamily::Argument)),
        "[" => Some(Bracket::Opening(BracketFamily::Array)),
        "}" => Some(Bracket::Closing(BracketFamily::Block)),
        ")" => Some(Bracket::Closing(BracketFamily::Argument)),
        "]" => Some(Bracket::Closing(BracketFamily::Array)),
        _ => None,
    }
}

/// Position of a token inside its `Tokens` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub usize);

/// A positioned slice of the source. The text is only materialised on
/// request through `value()`.
#[derive(Debug, Clone)]
pub struct Token {
    source: Rc<str>,
    offset: usize,
    line: usize,
    column: usize,
    length: usize,
}

impl Token {
    pub fn new(source: Rc<str>, offset: usize, line: usize, column: usize, length: usize) -> Self {
        Token {
            source,
            offset,
            line,
            column,
            length,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn value(&self) -> &str {
        &self.source[self.offset..self.end()]
    }

    /// Grows the token so it ends where `last` ends.
    pub(crate) fn absorb(&mut self, last: &Token) {
        self.length = last.end() - self.offset;
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && self.line == other.line
            && self.column == other.column
            && self.value() == other.value()
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The ordered, non-overlapping token sequence of one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    tokens: Vec<Token>,
}

impl Tokens {
    pub(crate) fn from_vec(tokens: Vec<Token>) -> Self {
        Tokens { tokens }
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    /// Text of the token at `id`, or `""` past either end.
    pub fn text(&self, id: TokenId) -> &str {
        self.get(id).map(Token::value).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::value).collect()
    }
}

impl Index<TokenId> for Tokens {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Self::Output {
        &self.tokens[id.0]
    }
}
