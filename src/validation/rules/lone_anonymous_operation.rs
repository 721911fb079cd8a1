//! A document with an anonymous (unnamed) operation must contain no other
//! operations — an anonymous operation can't be disambiguated from a
//! sibling at execution time.

use crate::ast::{Definition, OperationDefinition};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct LoneAnonymousOperation;

impl<'a> Rule<'a> for LoneAnonymousOperation {
    fn name(&self) -> &'static str {
        "LoneAnonymousOperation"
    }

    fn enter_operation(
        &mut self,
        op: &'a Spanning<OperationDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if op.item.name.is_none() {
            let operation_count = ctx
                .document()
                .iter()
                .filter(|def| matches!(def, Definition::Operation(_)))
                .count();
            if operation_count > 1 {
                ctx.report(
                    "This anonymous operation must be the only defined operation",
                    vec![op.start()],
                );
            }
        }
        NextCheckAction::Continue
    }
}
