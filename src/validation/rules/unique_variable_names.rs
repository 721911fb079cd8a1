//! No two variable definitions on the same operation may share a name.

use std::collections::HashSet;

use crate::ast::{OperationDefinition, VariableDefinition};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct UniqueVariableNames {
    seen: HashSet<String>,
}

impl<'a> Rule<'a> for UniqueVariableNames {
    fn name(&self) -> &'static str {
        "UniqueVariableNames"
    }

    fn enter_operation(&mut self, _op: &'a Spanning<OperationDefinition>, _ctx: &mut ValidationContext<'a>) -> NextCheckAction {
        self.seen.clear();
        NextCheckAction::Continue
    }

    fn enter_variable_definition(&mut self, var_def: &'a Spanning<VariableDefinition>, ctx: &mut ValidationContext<'a>) {
        let name = &var_def.item.name.item;
        if !self.seen.insert(name.clone()) {
            ctx.report(
                format!("There can be only one variable named \"${name}\""),
                vec![var_def.item.name.start()],
            );
        }
    }
}
