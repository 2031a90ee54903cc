use tracing::{debug, instrument, trace};

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        declarations::Keyword,
        visitor::{walk, Visitor},
    },
    lexer::tokens::{TokenId, Tokens},
};

use super::scope::{ScopeId, ScopeTree, Separator};

/// Operators that, written right after a name, write to it.
pub const ASSIGNMENT_OPERATORS: [&str; 12] = [
    "=", "++", "--", "+=", "-=", "*=", "/=", "%=", "^=", "~=", "&=", "|=",
];

/// Where a usage was seen. `node` is `None` for the implicit write at a
/// declaration with an initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    pub node: Option<NodeId>,
    pub token: TokenId,
    pub name: String,
}

/// One member declaration linked to one same-named usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePair {
    pub def: NodeId,
    pub reference: RefSite,
    pub def_scope: ScopeId,
    pub ref_scope: ScopeId,
    pub is_assignment: bool,
}

#[derive(Debug)]
pub struct Trace {
    pub scopes: ScopeTree,
    pub pairs: Vec<UsagePair>,
}

/// Builds the scope tree, registering members and references as it goes.
pub struct ScopeTracer {
    tree: ScopeTree,
    stack: Vec<ScopeId>,
}

impl Default for ScopeTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTracer {
    pub fn new() -> Self {
        let tree = ScopeTree::new();
        let root = tree.root();
        ScopeTracer {
            tree,
            stack: vec![root],
        }
    }

    pub fn into_tree(self) -> ScopeTree {
        self.tree
    }

    fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(self.tree.root())
    }

    fn enter(&mut self, ast: &Ast, id: NodeId, name: &str, separator: Separator) {
        let scope = self.tree.open(self.current(), name, separator);
        trace!(path = %self.tree.get(scope).path, "scope");

        self.stack.push(scope);
        walk(self, ast, id);
        self.stack.pop();
    }
}

impl Visitor for ScopeTracer {
    fn visit(&mut self, ast: &Ast, id: NodeId) {
        match ast.kind(id) {
            NodeKind::Class(decl) | NodeKind::Struct(decl) | NodeKind::Interface(decl) => {
                self.enter(ast, id, &decl.name, Separator::Type)
            }
            NodeKind::Namespace { name, .. } => self.enter(ast, id, name, Separator::Type),
            NodeKind::Method(method) => self.enter(ast, id, &method.name, Separator::Member),
            NodeKind::Property(property) => {
                let scope = self.current();
                self.tree.get_mut(scope).members.push(id);
                self.enter(ast, id, &property.name, Separator::Member);
            }
            NodeKind::Variable(_) => {
                let scope = self.current();
                self.tree.get_mut(scope).members.push(id);
                walk(self, ast, id);
            }
            NodeKind::Reference { .. } => {
                let scope = self.current();
                self.tree.get_mut(scope).references.push(id);
                walk(self, ast, id);
            }
            NodeKind::Keyword(keyword) if !matches!(keyword, Keyword::Break | Keyword::Continue) => {
                self.enter(ast, id, keyword.name(), Separator::Member)
            }
            _ => walk(self, ast, id),
        }
    }
}

/// Name a member is matched by.
pub fn member_name(ast: &Ast, member: NodeId) -> &str {
    match ast.kind(member) {
        NodeKind::Variable(variable) => &variable.name,
        NodeKind::Property(property) => &property.name,
        _ => "",
    }
}

/// First segment of a reference's name path.
pub fn reference_name(ast: &Ast, reference: NodeId) -> &str {
    match ast.kind(reference) {
        NodeKind::Reference { path } => match ast.kind(*path) {
            NodeKind::NamePath { name, .. } => name,
            _ => "",
        },
        _ => "",
    }
}

/// A usage writes when `++`/`--` comes right before it or an assignment
/// operator right after it, in the raw token sequence.
pub fn is_assignment(tokens: &Tokens, token: TokenId) -> bool {
    let previous = token
        .0
        .checked_sub(1)
        .map(|index| tokens.text(TokenId(index)))
        .unwrap_or("");
    let next = tokens.text(TokenId(token.0 + 1));

    matches!(previous, "++" | "--") || ASSIGNMENT_OPERATORS.contains(&next)
}

/// Pairs every member with every same-named reference in its scope or any
/// descendant scope. Scopes are handled in preorder; within a scope the
/// implicit writes of initialized variables come first.
pub fn pair_usages(ast: &Ast, tree: &ScopeTree) -> Vec<UsagePair> {
    let mut pairs = vec![];

    for scope in tree.ids() {
        let members = &tree.get(scope).members;

        for &member in members {
            let NodeKind::Variable(variable) = ast.kind(member) else {
                continue;
            };
            if variable.initializer.is_none() {
                continue;
            }
            let Some(token) = ast[member].token else {
                continue;
            };

            pairs.push(UsagePair {
                def: member,
                reference: RefSite {
                    node: None,
                    token,
                    name: variable.name.clone(),
                },
                def_scope: scope,
                ref_scope: scope,
                is_assignment: true,
            });
        }

        for &member in members {
            let name = member_name(ast, member);

            for owner in tree.descendants(scope) {
                for &reference in &tree.get(owner).references {
                    if reference_name(ast, reference) != name {
                        continue;
                    }
                    let Some(token) = ast[reference].token else {
                        continue;
                    };

                    pairs.push(UsagePair {
                        def: member,
                        reference: RefSite {
                            node: Some(reference),
                            token,
                            name: name.to_string(),
                        },
                        def_scope: scope,
                        ref_scope: owner,
                        is_assignment: is_assignment(&ast.tokens, token),
                    });
                }
            }
        }
    }

    pairs
}

#[instrument(level = "debug", skip_all)]
pub fn trace(ast: &Ast) -> Trace {
    let mut tracer = ScopeTracer::new();
    tracer.traverse(ast);
    let scopes = tracer.into_tree();

    let pairs = pair_usages(ast, &scopes);
    debug!(scopes = scopes.len(), pairs = pairs.len(), "traced");

    Trace { scopes, pairs }
}
