use super::{
    ast::{Ast, NodeId, NodeKind},
    declarations::Keyword,
};

/// Depth-first traversal over an `Ast`.
///
/// Implementors override `visit` for the kinds they care about and hand
/// everything else to `walk`, which descends into the node's children.
pub trait Visitor {
    fn visit(&mut self, ast: &Ast, id: NodeId) {
        walk(self, ast, id);
    }

    fn traverse(&mut self, ast: &Ast) {
        self.visit(ast, ast.root);
    }
}

pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast, id: NodeId) {
    let mut visit = |child: Option<NodeId>| {
        if let Some(child) = child {
            visitor.visit(ast, child);
        }
    };

    match ast.kind(id) {
        NodeKind::Block(items)
        | NodeKind::Array(items)
        | NodeKind::Arguments(items)
        | NodeKind::Statement(items)
        | NodeKind::Template(items)
        | NodeKind::Inherits(items) => {
            for item in items {
                visit(Some(*item));
            }
        }
        NodeKind::Keyword(keyword) => match keyword {
            Keyword::If {
                logic,
                on_true,
                on_false,
            } => {
                visit(Some(*logic));
                visit(Some(*on_true));
                visit(*on_false);
            }
            Keyword::For { logic, body } | Keyword::While { logic, body } => {
                visit(Some(*logic));
                visit(Some(*body));
            }
            Keyword::Do { body, condition } => {
                visit(Some(*body));
                visit(*condition);
            }
            Keyword::Return { value } | Keyword::New { value } => visit(Some(*value)),
            Keyword::Switch | Keyword::Case | Keyword::Break | Keyword::Continue => {}
        },
        NodeKind::Command { path, arguments } => {
            visit(Some(*path));
            visit(Some(*arguments));
        }
        NodeKind::Reference { path } => visit(Some(*path)),
        NodeKind::NamePath {
            array,
            template,
            child,
            ..
        } => {
            visit(*array);
            visit(*template);
            visit(*child);
        }
        NodeKind::Variable(variable) => {
            visit(variable.initializer);
            visit(variable.next);
        }
        NodeKind::Property(property) => {
            visit(property.getter);
            visit(property.setter);
        }
        NodeKind::Method(method) => {
            visit(method.arguments);
            visit(method.body);
        }
        NodeKind::Enum(decl)
        | NodeKind::Class(decl)
        | NodeKind::Struct(decl)
        | NodeKind::Interface(decl) => {
            visit(Some(decl.body));
            visit(decl.inherits);
        }
        NodeKind::Namespace { body, .. } => visit(Some(*body)),
        NodeKind::Operator { .. }
        | NodeKind::Cast { .. }
        | NodeKind::Attribute
        | NodeKind::Literal { .. }
        | NodeKind::Label { .. } => {}
    }
}
