//! A subscription operation's root selection set must contain exactly one
//! field, so a single event maps to a single response shape.

use crate::ast::{OperationDefinition, OperationType};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct SingleFieldSubscriptions;

impl<'a> Rule<'a> for SingleFieldSubscriptions {
    fn name(&self) -> &'static str {
        "SingleFieldSubscriptions"
    }

    fn enter_operation(
        &mut self,
        op: &'a Spanning<OperationDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if op.item.operation_type == OperationType::Subscription && op.item.selection_set.selections.len() > 1 {
            let name = op
                .item
                .name
                .as_ref()
                .map(|n| format!("Subscription \"{}\"", n.item))
                .unwrap_or_else(|| "Anonymous Subscription".to_owned());
            ctx.report(
                format!("{name} must select only one top level field"),
                vec![op.start()],
            );
        }
        NextCheckAction::Continue
    }
}
