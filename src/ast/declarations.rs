use bitflags::bitflags;

use super::ast::NodeId;

bitflags! {
    /// Modifier words collected in front of a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u16 {
        const CONST = 1;
        const STATIC = 1 << 1;
        const PUBLIC = 1 << 2;
        const VIRTUAL = 1 << 3;
        const ABSTRACT = 1 << 4;
        const OVERRIDE = 1 << 5;
        const INTERNAL = 1 << 6;
        const READONLY = 1 << 7;
        const PROTECTED = 1 << 8;
        const ANONYMOUS = 1 << 9;
        const ARGUMENTS = 1 << 10;
        const UNMANAGED = 1 << 11;
    }
}

/// A field, local or parameter. Declarations written as `int a, b;` share
/// one `ty` node and are chained through `next`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Option<NodeId>,
    pub access: AccessFlags,
    pub initializer: Option<NodeId>,
    pub next: Option<NodeId>,
}

/// `setter` always holds the `set` accessor, whichever order the source
/// wrote them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: Option<NodeId>,
    pub access: AccessFlags,
    pub getter: Option<NodeId>,
    pub setter: Option<NodeId>,
}

/// Methods and property accessors. Accessors carry no type and no
/// parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub ty: Option<NodeId>,
    pub access: AccessFlags,
    pub template: Option<NodeId>,
    pub arguments: Option<NodeId>,
    pub body: Option<NodeId>,
}

/// Shared shape of `enum`, `class`, `struct` and `interface`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub access: AccessFlags,
    pub template: Option<NodeId>,
    pub inherits: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    If {
        logic: NodeId,
        on_true: NodeId,
        on_false: Option<NodeId>,
    },
    For {
        logic: NodeId,
        body: NodeId,
    },
    While {
        logic: NodeId,
        body: NodeId,
    },
    Do {
        body: NodeId,
        condition: Option<NodeId>,
    },
    Switch,
    Case,
    Return {
        value: NodeId,
    },
    New {
        value: NodeId,
    },
    Break,
    Continue,
}

impl Keyword {
    /// The source word, also used to name the scope the keyword opens.
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::If { .. } => "if",
            Keyword::For { .. } => "for",
            Keyword::While { .. } => "while",
            Keyword::Do { .. } => "do",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Return { .. } => "return",
            Keyword::New { .. } => "new",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
        }
    }
}
