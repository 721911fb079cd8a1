//! Every argument applied to a field or directive must be declared by that
//! field's or directive's schema definition.
//!
//! Checked from `enter_field`/`enter_directive` rather than `enter_argument`:
//! only those hooks see the owner's complete argument list up front, which
//! is what a useful "did you mean" suggestion needs.

use crate::ast::{Argument, Directive, Field};
use crate::schema::{self, DirectiveLocation, DirectiveType, MetaType};
use crate::span::Spanning;
use crate::suggestion::{did_you_mean, suggestion_list};
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct KnownArgumentNames;

impl KnownArgumentNames {
    fn check_arguments(
        &self,
        arguments: &[Spanning<Argument>],
        known: Option<&indexmap::IndexMap<String, schema::Argument>>,
        owner_kind: &str,
        owner_name: &str,
        ctx: &mut ValidationContext<'_>,
    ) {
        let Some(known) = known else {
            return;
        };
        for arg in arguments {
            let name = &arg.item.name.item;
            if known.contains_key(name) {
                continue;
            }
            let suggestions = suggestion_list(name, known.keys().map(String::as_str));
            ctx.report(
                format!(
                    "Unknown argument \"{name}\" on {owner_kind} \"{owner_name}\".{}",
                    did_you_mean(&suggestions)
                ),
                vec![arg.item.name.start()],
            );
        }
    }
}

impl<'a> Rule<'a> for KnownArgumentNames {
    fn name(&self) -> &'static str {
        "KnownArgumentNames"
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<Field>,
        _parent_type: Option<&'a MetaType>,
        field_def: Option<&'a schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(field_def) = field_def {
            self.check_arguments(
                &field.item.arguments,
                Some(&field_def.arguments),
                "field",
                &field.item.name.item,
                ctx,
            );
        }
        NextCheckAction::Continue
    }

    fn enter_directive(
        &mut self,
        directive: &'a Spanning<Directive>,
        directive_def: Option<&'a DirectiveType>,
        _location: DirectiveLocation,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(def) = directive_def {
            self.check_arguments(
                &directive.item.arguments,
                Some(&def.arguments),
                "directive",
                &directive.item.name.item,
                ctx,
            );
        }
        NextCheckAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::KnownArgumentNames;

    #[test]
    fn declared_field_argument_is_known() {
        expect_passes_rule(
            Box::new(|| Box::new(KnownArgumentNames)),
            "{ dog { doesKnowCommand(dogCommand: SIT) } }",
        );
    }

    #[test]
    fn unknown_argument_suggests_the_closest_known_name() {
        expect_fails_rule(
            Box::new(|| Box::new(KnownArgumentNames)),
            "{ dog { doesKnowCommand(dogComand: SIT) } }",
            &["Unknown argument \"dogComand\" on field \"doesKnowCommand\". Did you mean \"dogCommand\"?"],
        );
    }

    #[test]
    fn unknown_directive_argument_is_reported() {
        expect_fails_rule(
            Box::new(|| Box::new(KnownArgumentNames)),
            "{ dog @skip(iff: true) { name } }",
            &["Unknown argument \"iff\" on directive \"skip\". Did you mean \"if\"?"],
        );
    }
}
