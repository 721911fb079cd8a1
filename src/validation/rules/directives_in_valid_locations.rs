//! A directive may only be applied where its definition's `locations`
//! allow; `@skip`/`@include` on a fragment definition, say, is rejected
//! even though the directive itself is known.

use crate::ast::Directive;
use crate::schema::{DirectiveLocation, DirectiveType};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct DirectivesInValidLocations;

impl<'a> Rule<'a> for DirectivesInValidLocations {
    fn name(&self) -> &'static str {
        "DirectivesInValidLocations"
    }

    fn enter_directive(
        &mut self,
        directive: &'a Spanning<Directive>,
        directive_def: Option<&'a DirectiveType>,
        location: DirectiveLocation,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(def) = directive_def {
            if !def.locations.contains(&location) {
                ctx.report(
                    format!(
                        "Directive \"@{}\" may not be used on {}",
                        directive.item.name.item,
                        location.as_str()
                    ),
                    vec![directive.item.name.start()],
                );
            }
        }
        NextCheckAction::Continue
    }
}
