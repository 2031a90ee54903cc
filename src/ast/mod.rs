/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, node kinds and the `Ast` container
/// - declarations: Access flags and the declaration and keyword payloads
/// - visitor: The generic depth-first traversal
pub mod ast;
pub mod declarations;
pub mod visitor;

#[cfg(test)]
mod tests;
