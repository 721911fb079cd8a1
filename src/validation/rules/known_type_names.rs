//! Every named type referenced from a document — a variable's declared
//! type, a fragment's type condition — must exist in the schema.

use crate::ast::{FragmentDefinition, InlineFragment, VariableDefinition};
use crate::span::Spanning;
use crate::suggestion::{did_you_mean, suggestion_list};
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct KnownTypeNames;

impl KnownTypeNames {
    fn check(&self, name: &str, location: crate::span::SourcePosition, ctx: &mut ValidationContext<'_>) {
        if ctx.schema().type_by_name(name).is_some() {
            return;
        }
        let suggestions = suggestion_list(name, ctx.schema().existing_type_names());
        ctx.report(
            format!("Unknown type \"{name}\".{}", did_you_mean(&suggestions)),
            vec![location],
        );
    }
}

impl<'a> Rule<'a> for KnownTypeNames {
    fn name(&self) -> &'static str {
        "KnownTypeNames"
    }

    fn enter_variable_definition(&mut self, var_def: &'a Spanning<VariableDefinition>, ctx: &mut ValidationContext<'a>) {
        let name = var_def.item.var_type.item.innermost_name().to_owned();
        self.check(&name, var_def.item.var_type.start(), ctx);
    }

    fn enter_fragment_definition(
        &mut self,
        frag: &'a Spanning<FragmentDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let name = frag.item.type_condition.item.clone();
        self.check(&name, frag.item.type_condition.start(), ctx);
        NextCheckAction::Continue
    }

    fn enter_inline_fragment(
        &mut self,
        frag: &'a Spanning<InlineFragment>,
        _parent_type: Option<&'a crate::schema::MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(tc) = &frag.item.type_condition {
            let name = tc.item.clone();
            self.check(&name, tc.start(), ctx);
        }
        NextCheckAction::Continue
    }
}
