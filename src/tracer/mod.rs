//! Scope tracing and reaching-definition reduction.
//!
//! The tracer walks the AST once to build a tree of lexical scopes, each
//! holding the members declared in it and the references found in it.
//! Members are then paired with same-named references by name alone and
//! each pair is classified as a write or a read. The reduction turns those
//! pairs into reports linking a read to the latest preceding write, in
//! document order rather than control-flow order.

pub mod reaching;
pub mod scope;
pub mod tracer;
