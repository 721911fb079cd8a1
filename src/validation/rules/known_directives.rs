//! Every applied directive must be defined in the schema.

use crate::ast::Directive;
use crate::schema::{DirectiveLocation, DirectiveType};
use crate::span::Spanning;
use crate::suggestion::{did_you_mean, suggestion_list};
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct KnownDirectives;

impl<'a> Rule<'a> for KnownDirectives {
    fn name(&self) -> &'static str {
        "KnownDirectives"
    }

    fn enter_directive(
        &mut self,
        directive: &'a Spanning<Directive>,
        directive_def: Option<&'a DirectiveType>,
        _location: DirectiveLocation,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if directive_def.is_none() {
            let name = &directive.item.name.item;
            let suggestions = suggestion_list(name, ctx.schema().directive_names());
            ctx.report(
                format!("Unknown directive \"{name}\".{}", did_you_mean(&suggestions)),
                vec![directive.item.name.start()],
            );
        }
        NextCheckAction::Continue
    }
}
