//! Every selected field must exist on the type it's selected against.
//! `__typename` is always selectable regardless of what the type declares.

use crate::ast::Field;
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::suggestion::{did_you_mean, quoted_or_list, suggestion_list};
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct FieldsOnCorrectType;

impl<'a> Rule<'a> for FieldsOnCorrectType {
    fn name(&self) -> &'static str {
        "FieldsOnCorrectType"
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<Field>,
        parent_type: Option<&'a MetaType>,
        field_def: Option<&'a crate::schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let field_name = &field.item.name.item;
        if field_name == "__typename" || field_def.is_some() {
            return NextCheckAction::Continue;
        }
        let Some(parent_type) = parent_type else {
            return NextCheckAction::Continue;
        };

        if parent_type.is_abstract() {
            let possible_types = ctx.schema().possible_types(parent_type.name());
            let defining_types: Vec<&str> = possible_types
                .iter()
                .filter(|name| {
                    ctx.schema()
                        .type_by_name(name)
                        .and_then(MetaType::fields)
                        .is_some_and(|fields| fields.contains_key(field_name))
                })
                .collect();

            if !defining_types.is_empty() {
                ctx.report(
                    format!(
                        "Cannot query field \"{field_name}\" on type \"{}\". Did you mean to use an inline fragment on {}?",
                        parent_type.name(),
                        quoted_or_list(&defining_types)
                    ),
                    vec![field.start()],
                );
                return NextCheckAction::Continue;
            }
        }

        let Some(fields) = parent_type.fields() else {
            return NextCheckAction::Continue;
        };

        let suggestions = suggestion_list(field_name, fields.keys().map(String::as_str));
        ctx.report(
            format!(
                "Cannot query field \"{field_name}\" on type \"{}\".{}",
                parent_type.name(),
                did_you_mean(&suggestions)
            ),
            vec![field.start()],
        );
        NextCheckAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::FieldsOnCorrectType;

    #[test]
    fn declared_field_passes() {
        expect_passes_rule(Box::new(|| Box::new(FieldsOnCorrectType)), "{ dog { name } }");
    }

    #[test]
    fn typename_is_always_selectable() {
        expect_passes_rule(Box::new(|| Box::new(FieldsOnCorrectType)), "{ dog { __typename } }");
    }

    #[test]
    fn unknown_field_suggests_the_closest_name() {
        expect_fails_rule(
            Box::new(|| Box::new(FieldsOnCorrectType)),
            "{ dog { nam } }",
            &["Cannot query field \"nam\" on type \"Dog\". Did you mean \"name\"?"],
        );
    }

    #[test]
    fn field_missing_on_interface_but_present_on_a_member_suggests_inline_fragment() {
        expect_fails_rule(
            Box::new(|| Box::new(FieldsOnCorrectType)),
            "{ pet { meows } }",
            &["Cannot query field \"meows\" on type \"Pet\". Did you mean to use an inline fragment on \"Cat\"?"],
        );
    }
}
