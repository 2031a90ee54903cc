use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::Error,
    lexer::tokens::{BracketFamily, TokenId},
    MK_NODE,
};

use super::{
    lookups::is_template_start,
    parser::{Parser, ScopeType},
};

/// Generic argument lists are not parsed. Returns `None` when the cursor is
/// not on one.
pub fn consume_template(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    if is_template_start(parser) {
        return Err(parser.unsupported("generic template argument list"));
    }
    Ok(None)
}

pub fn consume_attribute(parser: &mut Parser) -> Result<NodeId, Error> {
    Err(parser.unsupported("attribute"))
}

/// A dotted chain of names. Each segment may carry an array suffix and,
/// outside references, a template suffix.
pub fn consume_name_path(parser: &mut Parser, is_reference: bool) -> Result<NodeId, Error> {
    let token = parser.expect_any("a name")?;
    let name = parser.previous().to_string();

    let template = if is_reference {
        None
    } else {
        consume_template(parser)?
    };

    let array = if parser.current() == BracketFamily::Array.opening() {
        Some(parser.collection(BracketFamily::Array)?)
    } else {
        None
    };

    let id = MK_NODE!(
        parser,
        Some(token),
        NodeKind::NamePath {
            name,
            array,
            template,
            parent: None,
            child: None,
        }
    );

    if parser.current() == "." {
        parser.advance()?;
        let next = consume_name_path(parser, false)?;

        if let NodeKind::NamePath { parent, .. } = parser.kind_mut(next) {
            *parent = Some(id);
        }
        if let NodeKind::NamePath { child, .. } = parser.kind_mut(id) {
            *child = Some(next);
        }
    }

    Ok(id)
}

pub fn consume_reference(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.current_id();
    let path = consume_name_path(parser, true)?;
    Ok(MK_NODE!(parser, token, NodeKind::Reference { path }))
}

pub fn consume_arguments(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.collection(BracketFamily::Argument)
}

pub fn consume_command(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::Command);
    let token = parser.current_id();
    let path = consume_name_path(parser, false)?;
    let arguments = consume_arguments(parser)?;
    parser.pop_scope_type();

    Ok(MK_NODE!(parser, token, NodeKind::Command { path, arguments }))
}

pub fn consume_literal(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.previous() == "$" {
        return Err(parser.unsupported("interpolated string"));
    }

    let token = parser.advance()?;
    let value = parser.previous().to_string();
    Ok(MK_NODE!(parser, Some(token), NodeKind::Literal { value }))
}

pub fn consume_operator(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let name = parser.previous().to_string();
    Ok(MK_NODE!(parser, Some(token), NodeKind::Operator { name }))
}

pub fn consume_label(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let name = parser.previous().to_string();
    parser.expect(":")?;
    Ok(MK_NODE!(parser, Some(token), NodeKind::Label { name }))
}

/// A type-shaped name path that no more specific construct claimed. What
/// follows it decides what it was: a call, a cast target, a bare reference,
/// or the type of a declaration still to come.
pub fn consume_type_path(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    let start = parser.current_id();
    let path = consume_name_path(parser, false)?;
    parser.push_pending_type(path);

    match parser.current() {
        "(" => {
            parser.push_scope_type(ScopeType::Command);
            let token = parser.current_id().map(|id| TokenId(id.0 - 1));
            let path = parser.pop_pending_type();
            let arguments = consume_arguments(parser)?;
            parser.pop_scope_type();

            Ok(path.map(|path| MK_NODE!(parser, token, NodeKind::Command { path, arguments })))
        }
        ")" => {
            let token = parser.current_id().map(|id| TokenId(id.0 - 1));
            let ty = parser.pop_pending_type();
            Ok(ty.map(|ty| MK_NODE!(parser, token, NodeKind::Cast { ty })))
        }
        ";" => {
            let path = parser.pop_pending_type();
            Ok(path.map(|path| MK_NODE!(parser, start, NodeKind::Reference { path })))
        }
        _ => Ok(None),
    }
}
