//! A variable used at a position must be allowed there: its declared type
//! (boosted to effectively non-null when it carries a default value) must
//! be a subtype of the type the position expects.

use crate::ast::Type;
use crate::schema::SchemaType;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct VariablesInAllowedPosition;

/// A variable with a default value satisfies a non-null position even if
/// its own declared type is nullable — the default stands in whenever the
/// variable itself is omitted, so the effective type at the usage site is
/// one non-null wrapper tighter than what was written.
fn effective_type(var_type: &Type, has_default_value: bool) -> Type {
    if has_default_value && !var_type.is_non_null() {
        Type::NonNull(Box::new(var_type.clone()))
    } else {
        var_type.clone()
    }
}

impl<'a> Rule<'a> for VariablesInAllowedPosition {
    fn name(&self) -> &'static str {
        "VariablesInAllowedPosition"
    }

    fn enter_variable_usage(
        &mut self,
        var_name: &'a str,
        usage_site: &'a crate::span::Spanning<crate::ast::Value>,
        expected_type: Option<&'a Type>,
        location_has_default: bool,
        ctx: &mut ValidationContext<'a>,
    ) {
        let (Some(info), Some(expected_type)) = (ctx.variable_info(var_name), expected_type) else {
            return;
        };
        let effective = effective_type(&info.var_type, info.has_default_value || location_has_default);
        let schema: &SchemaType = ctx.schema();
        if !schema.is_subtype_of(&effective, expected_type) {
            ctx.report(
                format!(
                    "Variable \"${var_name}\" of type \"{}\" used in position expecting type \"{expected_type}\"",
                    info.var_type
                ),
                vec![usage_site.start()],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::VariablesInAllowedPosition;

    #[test]
    fn non_null_variable_used_at_non_null_position() {
        expect_passes_rule(
            Box::new(|| Box::new(VariablesInAllowedPosition)),
            "query ($intArg: Int!) { complicatedArgs { intArgField(intArg: $intArg) } }",
        );
    }

    #[test]
    fn nullable_variable_at_non_null_position_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(VariablesInAllowedPosition)),
            "query ($intArg: Int) { complicatedArgs { nonNullIntArgField(nonNullIntArg: $intArg) } }",
            &["Variable \"$intArg\" of type \"Int\" used in position expecting type \"Int!\""],
        );
    }

    #[test]
    fn nullable_variable_with_default_satisfies_non_null_position() {
        expect_passes_rule(
            Box::new(|| Box::new(VariablesInAllowedPosition)),
            "query ($intArg: Int = 1) { complicatedArgs { nonNullIntArgField(nonNullIntArg: $intArg) } }",
        );
    }

    #[test]
    fn nullable_variable_satisfies_non_null_position_via_the_argument_s_own_default() {
        expect_passes_rule(
            Box::new(|| Box::new(VariablesInAllowedPosition)),
            "query ($x: Int) { complicatedArgs { nonNullFieldWithDefault(arg: $x) } }",
        );
    }
}
