use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::declarations::AccessFlags,
    lexer::tokens::{bracket, is_literal, is_operator, Bracket, BracketFamily},
};

use super::parser::Parser;

pub const RESERVED_TYPES: [&str; 16] = [
    "void", "char", "bool", "string", "dynamic", "decimal", "single", "double", "byte", "sbyte",
    "ushort", "short", "uint", "int", "ulong", "long",
];

pub const DECLARATIONS: [&str; 7] = [
    "enum", "class", "struct", "interface", "namespace", "operator", "prop",
];

pub const KEYWORDS: [&str; 17] = [
    "if", "else", "for", "while", "do", "break", "continue", "new", "goto", "return", "switch",
    "case", "yield", "await", "async", "using", "fixed",
];

pub const ACCESSORS: [&str; 4] = ["get", "set", "add", "remove"];

lazy_static! {
    pub static ref ACCESS_LOOKUP: HashMap<&'static str, AccessFlags> = {
        let mut map = HashMap::new();
        map.insert("const", AccessFlags::CONST);
        map.insert("static", AccessFlags::STATIC);
        map.insert("public", AccessFlags::PUBLIC);
        map.insert("virtual", AccessFlags::VIRTUAL);
        map.insert("abstract", AccessFlags::ABSTRACT);
        map.insert("override", AccessFlags::OVERRIDE);
        map.insert("internal", AccessFlags::INTERNAL);
        map.insert("readonly", AccessFlags::READONLY);
        map.insert("protected", AccessFlags::PROTECTED);
        map.insert("anonymous", AccessFlags::ANONYMOUS);
        map.insert("arguments", AccessFlags::ARGUMENTS);
        map.insert("unmanaged", AccessFlags::UNMANAGED);
        map
    };
    static ref NAME: Regex = Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").unwrap();
}

/// What the token under the cursor starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Access(AccessFlags),
    Enum,
    Class,
    Struct,
    Interface,
    Namespace,
    Method,
    Variable,
    Property,
    Operator,
    Attribute,
    Label,
    Literal,
    Command,
    Keyword,
    Reference,
    TypePath,
    Unknown,
}

pub fn access_flag(token: &str) -> Option<AccessFlags> {
    ACCESS_LOOKUP.get(token).copied()
}

pub fn is_reserved_type(token: &str) -> bool {
    RESERVED_TYPES.contains(&token)
}

pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

pub fn is_reserved(token: &str) -> bool {
    access_flag(token).is_some()
        || is_reserved_type(token)
        || DECLARATIONS.contains(&token)
        || is_keyword(token)
}

pub fn is_valid_name(token: &str) -> bool {
    NAME.is_match(token) && !is_reserved(token) && !is_literal(token)
}

pub fn is_valid_type(token: &str) -> bool {
    is_valid_name(token) || is_reserved_type(token)
}

fn opens(token: &str, family: BracketFamily) -> bool {
    bracket(token) == Some(Bracket::Opening(family))
}

fn closes(token: &str, family: BracketFamily) -> bool {
    bracket(token) == Some(Bracket::Closing(family))
}

fn is_opening(token: &str) -> bool {
    matches!(bracket(token), Some(Bracket::Opening(_)))
}

/// A type name, or the `]` ending an array rank suffix.
fn declares_type(previous: &str) -> bool {
    is_valid_type(previous) || closes(previous, BracketFamily::Array)
}

pub fn is_method(parser: &Parser) -> bool {
    let next = parser.next();
    declares_type(parser.previous())
        && is_valid_name(parser.current())
        && (next == "=>" || opens(next, BracketFamily::Argument))
}

pub fn is_variable(parser: &Parser) -> bool {
    let next = parser.next();
    declares_type(parser.previous())
        && is_valid_name(parser.current())
        && (is_operator(next) || closes(next, BracketFamily::Argument))
}

pub fn is_property(parser: &Parser) -> bool {
    declares_type(parser.previous())
        && is_valid_name(parser.current())
        && opens(parser.next(), BracketFamily::Block)
}

pub fn is_accessor(parser: &Parser) -> bool {
    let next = parser.next();
    ACCESSORS.contains(&parser.current())
        && (next == "=>" || next == ";" || opens(next, BracketFamily::Block))
}

/// `[Name` at the start of a declaration or statement.
pub fn is_attribute(parser: &Parser) -> bool {
    let previous = parser.previous();
    opens(parser.current(), BracketFamily::Array)
        && is_valid_name(parser.next())
        && (parser.is_first()
            || previous == ";"
            || opens(previous, BracketFamily::Block)
            || closes(previous, BracketFamily::Block)
            || closes(previous, BracketFamily::Array))
}

pub fn is_command(parser: &Parser) -> bool {
    let previous = parser.previous();
    (is_operator(previous) || is_keyword(previous) || opens(previous, BracketFamily::Block))
        && is_valid_name(parser.current())
        && opens(parser.next(), BracketFamily::Argument)
}

pub fn is_reference(parser: &Parser) -> bool {
    let previous = parser.previous();
    let next = parser.next();
    (is_operator(next) || !opens(next, BracketFamily::Block))
        && is_valid_name(parser.current())
        && next != "."
        && (is_operator(previous)
            || is_keyword(previous)
            || is_opening(previous)
            || closes(previous, BracketFamily::Argument))
}

pub fn is_label(parser: &Parser) -> bool {
    let previous = parser.previous();
    (previous == ";" || opens(previous, BracketFamily::Block))
        && is_valid_name(parser.current())
        && parser.next() == ":"
}

/// `<` opening a generic argument list rather than a comparison.
pub fn is_template_start(parser: &Parser) -> bool {
    if parser.current() != "<" {
        return false;
    }

    let first = parser.peek(1);
    if is_reserved_type(first) {
        return true;
    }

    is_valid_name(first) && matches!(parser.peek(2), ">" | ">>" | "," | "<")
}

/// Picks the construct starting at the cursor. The checks run in a fixed
/// order; the catch-all type path only applies once every more specific
/// shape has been ruled out.
pub fn classify(parser: &Parser) -> Construct {
    let current = parser.current();

    if let Some(flags) = access_flag(current) {
        return Construct::Access(flags);
    }

    match current {
        "enum" => return Construct::Enum,
        "class" => return Construct::Class,
        "struct" => return Construct::Struct,
        "interface" => return Construct::Interface,
        "namespace" => return Construct::Namespace,
        _ => {}
    }

    if is_method(parser) {
        Construct::Method
    } else if is_variable(parser) {
        Construct::Variable
    } else if is_property(parser) {
        Construct::Property
    } else if is_operator(current) {
        Construct::Operator
    } else if is_attribute(parser) {
        Construct::Attribute
    } else if is_label(parser) {
        Construct::Label
    } else if is_literal(current) {
        Construct::Literal
    } else if is_command(parser) {
        Construct::Command
    } else if is_keyword(current) {
        Construct::Keyword
    } else if is_reference(parser) {
        Construct::Reference
    } else if is_valid_type(current) {
        Construct::TypePath
    } else {
        Construct::Unknown
    }
}
