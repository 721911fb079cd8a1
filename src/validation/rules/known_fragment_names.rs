//! Every fragment spread must name a fragment defined somewhere in the
//! document.

use crate::ast::FragmentSpread;
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::suggestion::{did_you_mean, suggestion_list};
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct KnownFragmentNames;

impl<'a> Rule<'a> for KnownFragmentNames {
    fn name(&self) -> &'static str {
        "KnownFragmentNames"
    }

    fn enter_fragment_spread(
        &mut self,
        spread: &'a Spanning<FragmentSpread>,
        _parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let name = &spread.item.name.item;
        if ctx.fragment_definition(name).is_none() {
            let suggestions = suggestion_list(name, ctx.fragment_names());
            ctx.report(
                format!("Unknown fragment \"{name}\".{}", did_you_mean(&suggestions)),
                vec![spread.item.name.start()],
            );
        }
        NextCheckAction::Continue
    }
}
