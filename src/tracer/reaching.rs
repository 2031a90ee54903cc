use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use tracing::debug;

use crate::{ast::ast::Ast, lexer::tokens::TokenId};

use super::{
    scope::ScopeId,
    tracer::{Trace, UsagePair},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    fn of(ast: &Ast, token: TokenId) -> Self {
        ast.tokens
            .get(token)
            .map(|token| Location {
                line: token.line(),
                column: token.column(),
            })
            .unwrap_or(Location { line: 0, column: 0 })
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line: {}, column: {}]", self.line, self.column)
    }
}

/// A read together with the write that reaches it in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachingDefinition {
    /// Path of the declaring scope joined to the member name with `.`.
    pub variable: String,
    pub declared_at: Location,
    pub defined_at: Location,
    pub read_scope: String,
    pub read_at: Location,
}

impl Display for ReachingDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "<")?;
        writeln!(f, "Variable {} {},", self.variable, self.declared_at)?;
        writeln!(f, "Defined [Modified] at {},", self.defined_at)?;
        writeln!(f, "{} {}", self.read_scope, self.read_at)?;
        write!(f, ">")
    }
}

/// Walks the pairs of each declaring scope in discovery order, keeping the
/// latest write per qualified name. A read emits a report only once some
/// write is held; a write nothing reads is never reported.
pub fn reaching_definitions(ast: &Ast, trace: &Trace) -> Vec<ReachingDefinition> {
    let mut groups: BTreeMap<ScopeId, Vec<&UsagePair>> = BTreeMap::new();
    for pair in &trace.pairs {
        groups.entry(pair.def_scope).or_default().push(pair);
    }

    let mut held: HashMap<String, &UsagePair> = HashMap::new();
    let mut reports = vec![];

    for (scope, pairs) in groups {
        let path = &trace.scopes.get(scope).path;

        for pair in pairs {
            let key = format!("{}.{}", path, pair.reference.name);

            if pair.is_assignment {
                held.insert(key, pair);
                continue;
            }

            let Some(reaching) = held.get(&key) else {
                continue;
            };

            let declared = ast[reaching.def].token;
            reports.push(ReachingDefinition {
                variable: format!(
                    "{}.{}",
                    trace.scopes.get(reaching.def_scope).path,
                    reaching.reference.name
                ),
                declared_at: declared
                    .map(|token| Location::of(ast, token))
                    .unwrap_or(Location { line: 0, column: 0 }),
                defined_at: Location::of(ast, reaching.reference.token),
                read_scope: trace.scopes.get(pair.ref_scope).path.clone(),
                read_at: Location::of(ast, pair.reference.token),
            });
        }
    }

    debug!(reports = reports.len(), "reduced");
    reports
}
