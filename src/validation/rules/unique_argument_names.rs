//! No two arguments on the same field, directive, or directive application
//! may share a name.

use crate::ast::{Argument, Directive, Field};
use crate::schema::{self, DirectiveLocation, DirectiveType, MetaType};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct UniqueArgumentNames;

impl UniqueArgumentNames {
    fn check(&self, arguments: &[Spanning<Argument>], ctx: &mut ValidationContext<'_>) {
        for (i, arg) in arguments.iter().enumerate() {
            let name = &arg.item.name.item;
            if arguments[..i].iter().any(|earlier| &earlier.item.name.item == name) {
                ctx.report(
                    format!("There can be only one argument named \"{name}\""),
                    vec![arg.item.name.start()],
                );
            }
        }
    }
}

impl<'a> Rule<'a> for UniqueArgumentNames {
    fn name(&self) -> &'static str {
        "UniqueArgumentNames"
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<Field>,
        _parent_type: Option<&'a MetaType>,
        _field_def: Option<&'a schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        self.check(&field.item.arguments, ctx);
        NextCheckAction::Continue
    }

    fn enter_directive(
        &mut self,
        directive: &'a Spanning<Directive>,
        _directive_def: Option<&'a DirectiveType>,
        _location: DirectiveLocation,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        self.check(&directive.item.arguments, ctx);
        NextCheckAction::Continue
    }
}
