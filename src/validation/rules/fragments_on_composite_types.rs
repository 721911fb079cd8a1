//! A fragment's type condition — named or inline — must resolve to a
//! composite type (object, interface, or union); a fragment spread against
//! a scalar or enum can never select anything.

use crate::ast::{FragmentDefinition, InlineFragment};
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct FragmentsOnCompositeTypes;

impl<'a> Rule<'a> for FragmentsOnCompositeTypes {
    fn name(&self) -> &'static str {
        "FragmentsOnCompositeTypes"
    }

    fn enter_fragment_definition(
        &mut self,
        frag: &'a Spanning<FragmentDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let type_name = &frag.item.type_condition.item;
        if let Some(t) = ctx.schema().type_by_name(type_name) {
            if !t.is_composite() {
                ctx.report(
                    format!(
                        "Fragment \"{}\" cannot condition on non composite type \"{type_name}\"",
                        frag.item.name.item
                    ),
                    vec![frag.item.type_condition.start()],
                );
            }
        }
        NextCheckAction::Continue
    }

    fn enter_inline_fragment(
        &mut self,
        frag: &'a Spanning<InlineFragment>,
        _parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(tc) = &frag.item.type_condition {
            if let Some(t) = ctx.schema().type_by_name(&tc.item) {
                if !t.is_composite() {
                    ctx.report(
                        format!("Fragment cannot condition on non composite type \"{}\"", tc.item),
                        vec![tc.start()],
                    );
                }
            }
        }
        NextCheckAction::Continue
    }
}
