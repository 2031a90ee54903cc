//! Unit tests for the AST model and the visitor.

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        declarations::{AccessFlags, Keyword},
        visitor::{walk, Visitor},
    },
    lexer::{lexer::tokenize, source::Source},
    parser::parser::parse,
};

fn parsed(code: &str) -> Ast {
    parse(tokenize(&Source::new(code))).unwrap()
}

struct ReferenceCollector {
    names: Vec<String>,
    skip_methods: bool,
}

impl Visitor for ReferenceCollector {
    fn visit(&mut self, ast: &Ast, id: NodeId) {
        match ast.kind(id) {
            NodeKind::Method(_) if self.skip_methods => {}
            NodeKind::Reference { path } => {
                self.names.push(ast.path_text(*path));
                walk(self, ast, id);
            }
            _ => walk(self, ast, id),
        }
    }
}

#[test]
fn test_visitor_order() {
    let ast = parsed("class A { int x = 1; void M(int a) { if (a > x) { Print(a); } } }");
    let mut collector = ReferenceCollector {
        names: vec![],
        skip_methods: false,
    };
    collector.traverse(&ast);

    assert_eq!(collector.names, vec!["a", "x", "a"]);
}

#[test]
fn test_visitor_override_stops_descent() {
    let ast = parsed("class A { int x = 1; void M(int a) { if (a > x) { Print(a); } } }");
    let mut collector = ReferenceCollector {
        names: vec![],
        skip_methods: true,
    };
    collector.traverse(&ast);

    assert!(collector.names.is_empty());
}

#[test]
fn test_visitor_reaches_every_chained_variable() {
    struct Names(Vec<String>);

    impl Visitor for Names {
        fn visit(&mut self, ast: &Ast, id: NodeId) {
            if let NodeKind::Variable(variable) = ast.kind(id) {
                self.0.push(variable.name.clone());
            }
            walk(self, ast, id);
        }
    }

    let ast = parsed("int a = 1, b, c = a;");
    let mut names = Names(vec![]);
    names.traverse(&ast);

    assert_eq!(names.0, vec!["a", "b", "c"]);
    assert_eq!(ast.items().len(), 1);
}

#[test]
fn test_path_text() {
    let ast = parsed("System.Collections.List[] items;");
    let variable = ast.find_all("Variable")[0];

    let NodeKind::Variable(variable) = ast.kind(variable) else {
        panic!("expected a variable");
    };
    assert_eq!(variable.name, "items");

    let ty = variable.ty.expect("typed variable");
    assert_eq!(ast.path_text(ty), "System.Collections.List[]");
    assert_eq!(ast.text(ty), "System");
}

#[test]
fn test_name_path_links() {
    let ast = parsed("A.B c;");
    let paths = ast.find_all("NamePath");
    assert_eq!(paths.len(), 2);

    let (first, second) = match (ast.kind(paths[0]), ast.kind(paths[1])) {
        (NodeKind::NamePath { name, .. }, _) if name == "B" => (paths[1], paths[0]),
        _ => (paths[0], paths[1]),
    };

    match ast.kind(first) {
        NodeKind::NamePath {
            name,
            parent,
            child,
            ..
        } => {
            assert_eq!(name, "A");
            assert_eq!(*parent, None);
            assert_eq!(*child, Some(second));
        }
        other => panic!("unexpected {:?}", other),
    }
    match ast.kind(second) {
        NodeKind::NamePath { name, parent, .. } => {
            assert_eq!(name, "B");
            assert_eq!(*parent, Some(first));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_kind_names() {
    let ast = parsed("namespace N { public static class A { int P { get; set; } } }");

    assert_eq!(ast.find_all("Namespace").len(), 1);
    assert_eq!(ast.find_all("Class").len(), 1);
    assert_eq!(ast.find_all("Property").len(), 1);
    assert_eq!(ast.find_all("Method").len(), 2);
    assert_eq!(ast.kind(ast.root).get_kind_name(), "Block");
    assert_eq!(ast.text(ast.root), "");

    let class = ast.find_all("Class")[0];
    match ast.kind(class) {
        NodeKind::Class(decl) => {
            assert_eq!(decl.name, "A");
            assert_eq!(decl.access, AccessFlags::PUBLIC | AccessFlags::STATIC);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(ast.text(class), "A");
}

#[test]
fn test_keyword_names() {
    let ast = parsed("while (a) { break; } do { continue; } while (b); return c; if (d) e = 1;");

    let names: Vec<&str> = ast
        .find_all("Keyword")
        .into_iter()
        .map(|id| match ast.kind(id) {
            NodeKind::Keyword(keyword) => keyword.name(),
            _ => "",
        })
        .collect();

    assert_eq!(names, vec!["break", "while", "continue", "do", "return", "if"]);
    assert!(matches!(
        ast.kind(ast.find_all("Keyword")[0]),
        NodeKind::Keyword(Keyword::Break)
    ));
}

#[test]
fn test_items_of_list_kinds() {
    let ast = parsed("F(1, 2);");
    let arguments = ast.find_all("Arguments")[0];

    assert_eq!(ast.kind(arguments).items().map(|items| items.len()), Some(3));
    assert_eq!(ast.kind(ast.find_all("Command")[0]).items(), None);
}
