use std::fmt::Display;

use crate::ast::ast::NodeId;

/// Index of a scope in its `ScopeTree`. Ids are handed out in the order
/// scopes are opened, which is a preorder walk of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

/// Character placed between a parent's path and a child's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `:` in front of types and namespaces.
    Type,
    /// `.` in front of members and control-flow keywords.
    Member,
}

impl Separator {
    pub fn symbol(self) -> char {
        match self {
            Separator::Type => ':',
            Separator::Member => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub name: String,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub separator: Separator,
    pub path: String,
    /// Variables and properties declared directly in this scope.
    pub members: Vec<NodeId>,
    /// References that occur directly in this scope.
    pub references: Vec<NodeId>,
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// A tree holding only the unnamed root.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                name: String::new(),
                parent: None,
                children: vec![],
                separator: Separator::Member,
                path: String::new(),
                members: vec![],
                references: vec![],
            }],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Opens a child of `parent`. Under an unnamed ancestor the path is just
    /// the name, and an unnamed child shares its parent's path.
    pub fn open(&mut self, parent: ScopeId, name: &str, separator: Separator) -> ScopeId {
        let parent_path = &self.scopes[parent.0].path;
        let path = if parent_path.is_empty() {
            name.to_string()
        } else if name.is_empty() {
            parent_path.clone()
        } else {
            format!("{}{}{}", parent_path, separator.symbol(), name)
        };

        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            name: name.to_string(),
            parent: Some(parent),
            children: vec![],
            separator,
            path,
            members: vec![],
            references: vec![],
        });
        self.scopes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Every scope id in preorder.
    pub fn ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len()).map(ScopeId)
    }

    /// `id` followed by all of its descendants, in preorder.
    pub fn descendants(&self, id: ScopeId) -> Vec<ScopeId> {
        let mut result = vec![];
        let mut stack = vec![id];

        while let Some(scope) = stack.pop() {
            result.push(scope);
            stack.extend(self.get(scope).children.iter().rev());
        }

        result
    }

    /// First scope, in preorder, whose path is `path`.
    pub fn find(&self, path: &str) -> Option<ScopeId> {
        self.ids().find(|id| self.get(*id).path == path)
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ScopeId, id: ScopeId) -> bool {
        let mut cursor = self.get(id).parent;
        while let Some(scope) = cursor {
            if scope == ancestor {
                return true;
            }
            cursor = self.get(scope).parent;
        }
        false
    }
}
