use std::ops::Index;

use id_arena::{Arena, Id};

use crate::lexer::tokens::{Token, TokenId, Tokens};

use super::declarations::{Keyword, Method, Property, TypeDecl, Variable};

pub type NodeId = Id<Node>;

/// Every node kind the parser can produce.
///
/// Edges to other nodes are arena ids. `NamePath::parent` and
/// `Variable::next` are navigation links only: the node they point at is
/// owned by some other container.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Block(Vec<NodeId>),
    Array(Vec<NodeId>),
    Arguments(Vec<NodeId>),
    /// Flat run ended by `;` or `,`. Does not open a scope.
    Statement(Vec<NodeId>),
    Template(Vec<NodeId>),
    Operator {
        name: String,
    },
    Keyword(Keyword),
    Command {
        path: NodeId,
        arguments: NodeId,
    },
    Cast {
        ty: NodeId,
    },
    Attribute,
    Reference {
        path: NodeId,
    },
    Literal {
        value: String,
    },
    Label {
        name: String,
    },
    NamePath {
        name: String,
        array: Option<NodeId>,
        template: Option<NodeId>,
        parent: Option<NodeId>,
        child: Option<NodeId>,
    },
    Inherits(Vec<NodeId>),
    Variable(Variable),
    Property(Property),
    Method(Method),
    Enum(TypeDecl),
    Class(TypeDecl),
    Struct(TypeDecl),
    Interface(TypeDecl),
    Namespace {
        name: String,
        body: NodeId,
    },
}

impl NodeKind {
    pub fn get_kind_name(&self) -> &'static str {
        match self {
            NodeKind::Block(_) => "Block",
            NodeKind::Array(_) => "Array",
            NodeKind::Arguments(_) => "Arguments",
            NodeKind::Statement(_) => "Statement",
            NodeKind::Template(_) => "Template",
            NodeKind::Operator { .. } => "Operator",
            NodeKind::Keyword(_) => "Keyword",
            NodeKind::Command { .. } => "Command",
            NodeKind::Cast { .. } => "Cast",
            NodeKind::Attribute => "Attribute",
            NodeKind::Reference { .. } => "Reference",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::Label { .. } => "Label",
            NodeKind::NamePath { .. } => "NamePath",
            NodeKind::Inherits(_) => "Inherits",
            NodeKind::Variable(_) => "Variable",
            NodeKind::Property(_) => "Property",
            NodeKind::Method(_) => "Method",
            NodeKind::Enum(_) => "Enum",
            NodeKind::Class(_) => "Class",
            NodeKind::Struct(_) => "Struct",
            NodeKind::Interface(_) => "Interface",
            NodeKind::Namespace { .. } => "Namespace",
        }
    }

    /// Items of the list-shaped kinds.
    pub fn items(&self) -> Option<&[NodeId]> {
        match self {
            NodeKind::Block(items)
            | NodeKind::Array(items)
            | NodeKind::Arguments(items)
            | NodeKind::Statement(items)
            | NodeKind::Template(items)
            | NodeKind::Inherits(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Token anchoring the node in the source. Only the root block has none.
    pub token: Option<TokenId>,
    pub kind: NodeKind,
}

/// A token the parser could not classify and stepped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub token: TokenId,
    pub message: String,
}

#[derive(Debug)]
pub struct Ast {
    pub nodes: Arena<Node>,
    pub root: NodeId,
    pub tokens: Tokens,
    pub diagnostics: Vec<Diagnostic>,
}

impl Ast {
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        self.nodes[id].token.and_then(|token| self.tokens.get(token))
    }

    /// Source text of the anchoring token, or `""` for the root.
    pub fn text(&self, id: NodeId) -> &str {
        self.nodes[id]
            .token
            .map(|token| self.tokens.text(token))
            .unwrap_or("")
    }

    /// Items of the root block.
    pub fn items(&self) -> &[NodeId] {
        self.kind(self.root).items().unwrap_or(&[])
    }

    /// Dotted text of a name path starting at `id`, with `[]` after
    /// segments that carry an array suffix.
    pub fn path_text(&self, id: NodeId) -> String {
        let mut segments = vec![];
        let mut cursor = Some(id);

        while let Some(segment) = cursor {
            match self.kind(segment) {
                NodeKind::NamePath {
                    name, array, child, ..
                } => {
                    if array.is_some() {
                        segments.push(format!("{}[]", name));
                    } else {
                        segments.push(name.clone());
                    }
                    cursor = *child;
                }
                _ => break,
            }
        }

        segments.join(".")
    }

    /// All nodes of the given kind name, in allocation order.
    pub fn find_all(&self, kind: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.kind.get_kind_name() == kind)
            .map(|(id, _)| id)
            .collect()
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}
