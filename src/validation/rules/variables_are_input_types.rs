//! A variable may only be declared with an input type — a leaf (scalar or
//! enum) or an input object, optionally wrapped in list/non-null.

use crate::ast::VariableDefinition;
use crate::span::Spanning;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct VariablesAreInputTypes;

impl<'a> Rule<'a> for VariablesAreInputTypes {
    fn name(&self) -> &'static str {
        "VariablesAreInputTypes"
    }

    fn enter_variable_definition(&mut self, var_def: &'a Spanning<VariableDefinition>, ctx: &mut ValidationContext<'a>) {
        let name = var_def.item.var_type.item.innermost_name();
        let Some(t) = ctx.schema().type_by_name(name) else {
            return;
        };
        if !(t.is_leaf() || t.is_input_object()) {
            ctx.report(
                format!(
                    "Variable \"${}\" cannot be non-input type \"{}\"",
                    var_def.item.name.item, var_def.item.var_type.item
                ),
                vec![var_def.item.var_type.start()],
            );
        }
    }
}
