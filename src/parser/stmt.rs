use crate::{
    ast::{
        ast::{NodeId, NodeKind},
        declarations::{AccessFlags, Keyword, Method, Property, TypeDecl, Variable},
    },
    errors::errors::Error,
    lexer::tokens::{BracketFamily, TokenId},
    MK_NODE,
};

use super::{
    expr::{
        consume_arguments, consume_attribute, consume_command, consume_label, consume_literal,
        consume_name_path, consume_operator, consume_reference, consume_template,
        consume_type_path,
    },
    lookups::{access_flag, classify, is_accessor, is_valid_name, is_valid_type, Construct},
    parser::{Parser, ScopeType},
};

/// Consumes one construct at the cursor. Returns `None` for input that
/// produces no node of its own: modifier words, type paths waiting for their
/// declaration, `using` directives and skipped tokens.
pub fn consume(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    match classify(parser) {
        Construct::Access(flags) => {
            parser.push_access(flags);
            parser.advance()?;
            Ok(None)
        }
        Construct::Enum | Construct::Class | Construct::Struct | Construct::Interface => {
            consume_type_decl(parser).map(Some)
        }
        Construct::Namespace => consume_namespace(parser).map(Some),
        Construct::Method => consume_method(parser).map(Some),
        Construct::Variable => consume_variable(parser).map(Some),
        Construct::Property => consume_property(parser).map(Some),
        Construct::Operator => consume_operator(parser).map(Some),
        Construct::Attribute => consume_attribute(parser).map(Some),
        Construct::Label => consume_label(parser).map(Some),
        Construct::Literal => consume_literal(parser).map(Some),
        Construct::Command => consume_command(parser).map(Some),
        Construct::Keyword => consume_keyword(parser),
        Construct::Reference => consume_reference(parser).map(Some),
        Construct::TypePath => consume_type_path(parser),
        Construct::Unknown => {
            parser.skip()?;
            Ok(None)
        }
    }
}

fn consume_type_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::TypeBody);

    parser.advance()?;
    let keyword = parser.previous().to_string();
    let token = parser.expect_any("a type name")?;
    let name = parser.previous().to_string();
    let access = parser.take_access();

    let template = if keyword == "enum" {
        None
    } else {
        consume_template(parser)?
    };
    let inherits = consume_inherits(parser)?;
    let body = parser.collection(BracketFamily::Block)?;

    parser.pop_scope_type();

    let decl = TypeDecl {
        name,
        access,
        template,
        inherits,
        body,
    };
    let kind = match keyword.as_str() {
        "enum" => NodeKind::Enum(decl),
        "class" => NodeKind::Class(decl),
        "struct" => NodeKind::Struct(decl),
        _ => NodeKind::Interface(decl),
    };

    Ok(MK_NODE!(parser, Some(token), kind))
}

fn consume_namespace(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::Default);

    parser.advance()?;
    let token = parser.expect_any("a namespace name")?;
    let mut name = parser.previous().to_string();

    while parser.current() == "." {
        parser.advance()?;
        parser.expect_any("a namespace name")?;
        name.push('.');
        name.push_str(parser.previous());
    }

    let body = parser.collection(BracketFamily::Block)?;
    parser.pop_scope_type();

    Ok(MK_NODE!(parser, Some(token), NodeKind::Namespace { name, body }))
}

/// Base types listed after `:`, up to the opening brace of the body.
fn consume_inherits(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    if parser.current() != ":" {
        return Ok(None);
    }

    let token = parser.advance()?;
    let mut bases = vec![];

    loop {
        if parser.at_eof() {
            return Err(parser.unexpected("`{`"));
        }

        if parser.current() == "{" {
            break;
        } else if parser.current() == "," {
            parser.advance()?;
        } else if is_valid_type(parser.current()) {
            bases.push(consume_name_path(parser, false)?);
        } else {
            parser.skip()?;
        }
    }

    Ok(Some(MK_NODE!(parser, Some(token), NodeKind::Inherits(bases))))
}

fn consume_method(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::MethodParameterList);

    let token = parser.advance()?;
    let name = parser.previous().to_string();
    let ty = parser.pop_pending_type();
    let access = parser.take_access();
    let template = consume_template(parser)?;

    if parser.current() == "=>" {
        parser.pop_scope_type();
        return consume_expression_property(parser, token, name, ty, access);
    }

    let arguments = consume_arguments(parser)?;
    parser.pop_scope_type();

    parser.push_scope_type(ScopeType::MethodBody);
    let body = match parser.current() {
        "{" => Some(parser.collection(BracketFamily::Block)?),
        ";" => {
            parser.advance()?;
            None
        }
        "=>" => {
            parser.advance()?;
            Some(parser.statement()?)
        }
        _ => None,
    };
    parser.pop_scope_type();

    Ok(MK_NODE!(
        parser,
        Some(token),
        NodeKind::Method(Method {
            name,
            ty,
            access,
            template,
            arguments: Some(arguments),
            body,
        })
    ))
}

/// `Type Name => expression;` with no parameter list: a read-only
/// property whose getter is the expression.
fn consume_expression_property(
    parser: &mut Parser,
    token: TokenId,
    name: String,
    ty: Option<NodeId>,
    access: AccessFlags,
) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::Property);

    let arrow = parser.expect("=>")?;
    let body = parser.statement()?;
    let getter = MK_NODE!(
        parser,
        Some(arrow),
        NodeKind::Method(Method {
            name: String::from("get"),
            ty: None,
            access: AccessFlags::empty(),
            template: None,
            arguments: None,
            body: Some(body),
        })
    );

    parser.pop_scope_type();

    Ok(MK_NODE!(
        parser,
        Some(token),
        NodeKind::Property(Property {
            name,
            ty,
            access,
            getter: Some(getter),
            setter: None,
        })
    ))
}

fn consume_variable(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let name = parser.previous().to_string();
    let ty = parser.pop_pending_type();
    let access = parser.take_access();

    consume_declarator(parser, token, name, ty, access)
}

/// Everything after a variable's name: the initializer, further names
/// sharing the same type, and the closing `;`.
fn consume_declarator(
    parser: &mut Parser,
    token: TokenId,
    name: String,
    ty: Option<NodeId>,
    access: AccessFlags,
) -> Result<NodeId, Error> {
    let initializer = if parser.current() == "=" {
        parser.advance()?;
        Some(parser.statement()?)
    } else {
        None
    };

    let chains = parser.current() == ","
        && parser.scope_type() != ScopeType::MethodParameterList
        && is_valid_name(parser.next());

    let next = if chains {
        parser.advance()?;
        let token = parser.advance()?;
        let name = parser.previous().to_string();
        Some(consume_declarator(parser, token, name, ty, access)?)
    } else {
        if parser.current() == ";" {
            parser.advance()?;
        }
        None
    };

    Ok(MK_NODE!(
        parser,
        Some(token),
        NodeKind::Variable(Variable {
            name,
            ty,
            access,
            initializer,
            next,
        })
    ))
}

fn consume_property(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.push_scope_type(ScopeType::Property);

    let token = parser.advance()?;
    let name = parser.previous().to_string();
    let ty = parser.pop_pending_type();
    let access = parser.take_access();
    parser.expect("{")?;

    let mut getter = None;
    let mut setter = None;

    loop {
        if parser.current() == "}" {
            parser.advance()?;
            break;
        }

        if access_flag(parser.current()).is_some() || parser.current() == "private" {
            parser.advance()?;
            continue;
        }

        if !is_accessor(parser) {
            return Err(parser.unexpected("a property accessor"));
        }

        let is_setter = parser.current() == "set";
        let accessor = consume_accessor(parser)?;

        if is_setter {
            setter = Some(accessor);
        } else if getter.is_none() {
            getter = Some(accessor);
        } else {
            setter = Some(accessor);
        }
    }

    parser.pop_scope_type();

    Ok(MK_NODE!(
        parser,
        Some(token),
        NodeKind::Property(Property {
            name,
            ty,
            access,
            getter,
            setter,
        })
    ))
}

fn consume_accessor(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let name = parser.previous().to_string();

    let body = match parser.current() {
        "{" => Some(parser.collection(BracketFamily::Block)?),
        "=>" => {
            parser.advance()?;
            let body = parser.statement()?;
            if parser.current() == ";" {
                parser.advance()?;
            }
            Some(body)
        }
        _ => {
            parser.expect(";")?;
            None
        }
    };

    Ok(MK_NODE!(
        parser,
        Some(token),
        NodeKind::Method(Method {
            name,
            ty: None,
            access: AccessFlags::empty(),
            template: None,
            arguments: None,
            body,
        })
    ))
}

fn consume_keyword(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    let token = parser.current_id();
    let keyword = match parser.current() {
        "if" => consume_if(parser)?,
        "for" | "while" => consume_loop(parser)?,
        "do" => consume_do(parser)?,
        "return" | "new" => consume_valued(parser)?,
        "break" => {
            parser.advance()?;
            Keyword::Break
        }
        "continue" => {
            parser.advance()?;
            Keyword::Continue
        }
        "using" => {
            consume_using(parser)?;
            return Ok(None);
        }
        "switch" => return Err(parser.unsupported("switch statement")),
        "case" => return Err(parser.unsupported("case label")),
        "else" => return Err(parser.unsupported("`else` without a preceding `if`")),
        other => {
            let construct = format!("`{}` statement", other);
            return Err(parser.unsupported(&construct));
        }
    };

    Ok(Some(MK_NODE!(parser, token, NodeKind::Keyword(keyword))))
}

/// A block, one nested control-flow construct, or a single statement.
fn consume_body(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current() {
        "{" => parser.collection(BracketFamily::Block),
        "if" | "for" | "while" | "do" => {
            let anchor = parser.current_id();
            let nested = consume_keyword(parser)?;
            Ok(MK_NODE!(
                parser,
                anchor,
                NodeKind::Statement(nested.into_iter().collect())
            ))
        }
        _ => parser.statement(),
    }
}

fn consume_if(parser: &mut Parser) -> Result<Keyword, Error> {
    parser.advance()?;
    let logic = consume_arguments(parser)?;
    let on_true = consume_body(parser)?;

    if parser.current() == ";" {
        parser.advance()?;
    }

    let on_false = if parser.current() == "else" {
        parser.advance()?;
        Some(consume_body(parser)?)
    } else {
        None
    };

    Ok(Keyword::If {
        logic,
        on_true,
        on_false,
    })
}

fn consume_loop(parser: &mut Parser) -> Result<Keyword, Error> {
    let is_for = parser.current() == "for";
    parser.advance()?;
    let logic = consume_arguments(parser)?;
    let body = consume_body(parser)?;

    Ok(if is_for {
        Keyword::For { logic, body }
    } else {
        Keyword::While { logic, body }
    })
}

fn consume_do(parser: &mut Parser) -> Result<Keyword, Error> {
    parser.advance()?;
    let body = consume_body(parser)?;

    if parser.current() == ";" && parser.next() == "while" {
        parser.advance()?;
    }

    let condition = if parser.current() == "while" {
        parser.advance()?;
        Some(consume_arguments(parser)?)
    } else {
        None
    };

    Ok(Keyword::Do { body, condition })
}

fn consume_valued(parser: &mut Parser) -> Result<Keyword, Error> {
    let is_return = parser.current() == "return";
    parser.advance()?;
    let value = parser.statement()?;

    Ok(if is_return {
        Keyword::Return { value }
    } else {
        Keyword::New { value }
    })
}

/// `using A.B;` directives carry nothing the analysis needs.
fn consume_using(parser: &mut Parser) -> Result<(), Error> {
    if parser.next() == "(" {
        return Err(parser.unsupported("using statement"));
    }

    parser.advance()?;
    while !parser.at_eof() && parser.current() != ";" {
        parser.advance()?;
    }
    if parser.current() == ";" {
        parser.advance()?;
    }

    Ok(())
}
