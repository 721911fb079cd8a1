//! Every argument a field or directive declares as non-null with no default
//! value must actually be supplied (or supplied as an explicit, non-null
//! literal — `null` against a required argument is `ValuesOfCorrectType`'s
//! diagnostic to raise, not this rule's).

use crate::ast::{Argument, Directive, Field};
use crate::schema::{self, DirectiveLocation, DirectiveType, MetaType};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct ProvidedRequiredArguments;

impl ProvidedRequiredArguments {
    fn check(
        &self,
        provided: &[Spanning<Argument>],
        known: &indexmap::IndexMap<String, schema::Argument>,
        location: crate::span::SourcePosition,
        owner_kind: &str,
        owner_name: &str,
        ctx: &mut ValidationContext<'_>,
    ) {
        for def in known.values() {
            let is_required = def.arg_type.is_non_null() && def.default_value.is_none();
            if !is_required {
                continue;
            }
            if provided.iter().any(|a| a.item.name.item == def.name) {
                continue;
            }
            ctx.report(
                format!(
                    "{owner_kind} \"{owner_name}\" argument \"{}\" of type \"{}\" is required, but it was not provided",
                    def.name, def.arg_type
                ),
                vec![location],
            );
        }
    }
}

impl<'a> Rule<'a> for ProvidedRequiredArguments {
    fn name(&self) -> &'static str {
        "ProvidedRequiredArguments"
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<Field>,
        _parent_type: Option<&'a MetaType>,
        field_def: Option<&'a schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        if let Some(field_def) = field_def {
            self.check(
                &field.item.arguments,
                &field_def.arguments,
                field.start(),
                "Field",
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
            self.check(
                &directive.item.arguments,
                &def.arguments,
                directive.start(),
                "Directive",
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
    use super::ProvidedRequiredArguments;

    #[test]
    fn required_argument_provided() {
        expect_passes_rule(
            Box::new(|| Box::new(ProvidedRequiredArguments)),
            "{ complicatedArgs { nonNullIntArgField(nonNullIntArg: 1) } }",
        );
    }

    #[test]
    fn missing_required_argument_is_reported() {
        expect_fails_rule(
            Box::new(|| Box::new(ProvidedRequiredArguments)),
            "{ complicatedArgs { nonNullIntArgField } }",
            &["Field \"nonNullIntArgField\" argument \"nonNullIntArg\" of type \"Int!\" is required, but it was not provided"],
        );
    }

    #[test]
    fn optional_argument_with_default_can_be_omitted() {
        expect_passes_rule(
            Box::new(|| Box::new(ProvidedRequiredArguments)),
            "{ complicatedArgs { multipleOpts } }",
        );
    }
}
