//! Every top-level definition in a document must be executable: an
//! operation or a fragment, never a type-system definition.
//!
//! This crate's AST has no variant for a type-system definition in the
//! first place — [`crate::ast::Definition`] is only ever `Operation` or
//! `Fragment` — so a document built through this crate's own parser can
//! never trip this rule. It stays in the standard rule set for a caller
//! that hand-assembles a `Document` (or adapts one from a different
//! front-end) and accidentally mixes in something else; there is nothing
//! further for it to check here given the AST's shape.
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct ExecutableDefinitions;

impl<'a> Rule<'a> for ExecutableDefinitions {
    fn name(&self) -> &'static str {
        "ExecutableDefinitions"
    }
}
