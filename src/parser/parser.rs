//! Parser state and the bracket-tracking collection loops.
//!
//! The parser walks the token sequence once, left to right. Besides the
//! cursor it keeps four stacks: open bracket families, pending access
//! flags, pending type paths and the kind of construct being parsed.
//! Nodes are allocated into an arena as soon as they are complete.

use id_arena::Arena;
use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::{Ast, Diagnostic, Node, NodeId, NodeKind},
        declarations::AccessFlags,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{bracket, Bracket, BracketFamily, TokenId, Tokens},
    Position, MK_NODE,
};

use super::{lookups::is_attribute, stmt::consume};

/// Local rule set in force while a construct is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    Default,
    TypeBody,
    MethodParameterList,
    MethodBody,
    Command,
    Property,
}

pub struct Parser {
    tokens: Tokens,
    pos: usize,
    nodes: Arena<Node>,
    /// Families of the brackets currently open.
    balance: Vec<BracketFamily>,
    /// Modifier words waiting for the next declaration.
    access: Vec<AccessFlags>,
    /// Name paths consumed ahead of the construct that will claim them.
    pending_types: Vec<NodeId>,
    scope_types: Vec<ScopeType>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(tokens: Tokens) -> Self {
        Parser {
            tokens,
            pos: 0,
            nodes: Arena::new(),
            balance: vec![],
            access: vec![],
            pending_types: vec![],
            scope_types: vec![ScopeType::Default],
            diagnostics: vec![],
        }
    }

    /// Text of the token `offset` places away from the cursor, `""` when
    /// that falls outside the sequence.
    pub fn peek(&self, offset: isize) -> &str {
        match self.pos.checked_add_signed(offset) {
            Some(index) => self.tokens.text(TokenId(index)),
            None => "",
        }
    }

    pub fn current(&self) -> &str {
        self.peek(0)
    }

    pub fn previous(&self) -> &str {
        self.peek(-1)
    }

    pub fn next(&self) -> &str {
        self.peek(1)
    }

    pub fn is_first(&self) -> bool {
        self.pos == 0
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current_id(&self) -> Option<TokenId> {
        (!self.at_eof()).then_some(TokenId(self.pos))
    }

    /// Moves past the current token and returns it.
    pub fn advance(&mut self) -> Result<TokenId, Error> {
        self.expect_any("another token")
    }

    /// Consumes whatever token is current, failing only at end of input.
    pub fn expect_any(&mut self, expected: &str) -> Result<TokenId, Error> {
        if self.at_eof() {
            return Err(self.unexpected(expected));
        }

        let id = TokenId(self.pos);
        self.pos += 1;
        Ok(id)
    }

    /// Consumes the current token if its text is `text`.
    pub fn expect(&mut self, text: &str) -> Result<TokenId, Error> {
        if self.current() == text {
            return self.advance();
        }

        Err(self.unexpected(&format!("`{}`", text)))
    }

    /// The error for finding the current token, or nothing, where
    /// `expected` should be.
    pub fn unexpected(&self, expected: &str) -> Error {
        let error = if self.at_eof() {
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.to_string(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                token: self.current().to_string(),
                message: format!("expected {}", expected),
            }
        };

        Error::new(error, self.get_position())
    }

    pub fn unsupported(&self, construct: &str) -> Error {
        Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: construct.to_string(),
            },
            self.get_position(),
        )
    }

    /// Position of the current token, or just past the last one at end of
    /// input.
    pub fn get_position(&self) -> Position {
        if let Some(token) = self.tokens.get(TokenId(self.pos)) {
            return Position {
                offset: token.offset(),
                line: token.line(),
                column: token.column(),
            };
        }

        match self.tokens.iter().last() {
            Some(last) => Position {
                offset: last.end(),
                line: last.line(),
                column: last.column() + last.value().chars().count(),
            },
            None => Position::null(),
        }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.alloc(node)
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id].kind
    }

    pub fn push_access(&mut self, flags: AccessFlags) {
        self.access.push(flags);
    }

    /// Drains every pending modifier into one mask.
    pub fn take_access(&mut self) -> AccessFlags {
        let mut flags = AccessFlags::empty();
        while let Some(top) = self.access.pop() {
            flags |= top;
        }
        flags
    }

    pub fn push_pending_type(&mut self, path: NodeId) {
        self.pending_types.push(path);
    }

    pub fn pop_pending_type(&mut self) -> Option<NodeId> {
        self.pending_types.pop()
    }

    pub fn has_pending_type(&self) -> bool {
        !self.pending_types.is_empty()
    }

    pub fn push_scope_type(&mut self, scope_type: ScopeType) {
        self.scope_types.push(scope_type);
    }

    pub fn pop_scope_type(&mut self) {
        self.scope_types.pop();
    }

    pub fn scope_type(&self) -> ScopeType {
        self.scope_types
            .last()
            .copied()
            .unwrap_or(ScopeType::Default)
    }

    pub fn depth(&self) -> usize {
        self.balance.len()
    }

    /// Steps over a token no construct claims.
    pub fn skip(&mut self) -> Result<(), Error> {
        let token = self.advance()?;
        let message = format!("no construct starts at `{}`", self.tokens.text(token));
        debug!(line = self.tokens[token].line(), column = self.tokens[token].column(), "{}", message);
        self.diagnostics.push(Diagnostic { token, message });
        Ok(())
    }

    fn open(&mut self, family: BracketFamily) -> Result<TokenId, Error> {
        let token = self.advance()?;
        self.balance.push(family);
        Ok(token)
    }

    fn close(&mut self, family: BracketFamily) -> Result<(), Error> {
        match self.balance.last().copied() {
            None => Err(Error::new(
                ErrorImpl::UnbalancedBracket {
                    token: self.current().to_string(),
                },
                self.get_position(),
            )),
            Some(open) if open != family => Err(Error::new(
                ErrorImpl::MismatchedBracket {
                    expected: open.to_string(),
                    found: self.current().to_string(),
                },
                self.get_position(),
            )),
            Some(_) => {
                self.balance.pop();
                self.advance()?;
                Ok(())
            }
        }
    }

    fn unclosed(&self) -> Error {
        let expected = self
            .balance
            .last()
            .map(|family| format!("`{}`", family.closing()))
            .unwrap_or_else(|| String::from("a closing bracket"));

        Error::new(
            ErrorImpl::UnexpectedEndOfInput { expected },
            self.get_position(),
        )
    }

    /// One turn of a collection loop: track a bracket or consume a
    /// construct. Bare brackets are not nodes of their own, their contents
    /// land in the enclosing collection.
    fn step(&mut self, items: &mut Vec<NodeId>) -> Result<(), Error> {
        match bracket(self.current()) {
            Some(Bracket::Closing(family)) => self.close(family),
            Some(Bracket::Opening(family)) if !is_attribute(self) => self.open(family).map(|_| ()),
            _ => {
                if let Some(node) = consume(self)? {
                    items.push(node);
                }
                Ok(())
            }
        }
    }

    /// Collects a bracketed `{}`, `()` or `[]` group starting at the cursor.
    pub fn collection(&mut self, family: BracketFamily) -> Result<NodeId, Error> {
        if self.current() != family.opening() {
            return Err(self.unexpected(&format!("`{}`", family.opening())));
        }

        let depth = self.depth();
        let anchor = self.open(family)?;
        let mut items = vec![];

        while self.depth() > depth {
            if self.at_eof() {
                return Err(self.unclosed());
            }
            self.step(&mut items)?;
        }

        let kind = match family {
            BracketFamily::Block => NodeKind::Block(items),
            BracketFamily::Argument => NodeKind::Arguments(items),
            BracketFamily::Array => NodeKind::Array(items),
        };
        Ok(MK_NODE!(self, Some(anchor), kind))
    }

    /// Collects up to a `;` or `,` at the entry depth, a closing bracket
    /// that would close below it, or the end of input. The terminator is
    /// left for the caller.
    pub fn statement(&mut self) -> Result<NodeId, Error> {
        let depth = self.depth();
        let anchor = self.current_id();
        let mut items = vec![];

        loop {
            if self.at_eof() {
                if self.depth() > depth {
                    return Err(self.unclosed());
                }
                break;
            }

            if self.depth() == depth {
                let current = self.current();
                if current == ";" || current == "," {
                    break;
                }
                if matches!(bracket(current), Some(Bracket::Closing(_))) {
                    break;
                }
            }

            self.step(&mut items)?;
        }

        Ok(MK_NODE!(self, anchor, NodeKind::Statement(items)))
    }

    fn root(&mut self) -> Result<NodeId, Error> {
        let mut items = vec![];

        while !self.at_eof() {
            self.step(&mut items)?;
        }

        if self.depth() > 0 {
            return Err(self.unclosed());
        }

        Ok(MK_NODE!(self, None, NodeKind::Block(items)))
    }

    fn finish(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }
}

#[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Tokens) -> Result<Ast, Error> {
    let mut parser = Parser::new(tokens);
    let root = parser.root()?;

    if parser.has_pending_type() {
        debug!(count = parser.pending_types.len(), "unclaimed type paths");
    }

    let ast = parser.finish(root);
    debug!(nodes = ast.nodes.len(), diagnostics = ast.diagnostics.len(), "parsed");
    Ok(ast)
}
