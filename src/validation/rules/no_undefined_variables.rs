//! Every `$variable` used inside an operation (directly, or through a
//! spread fragment) must be declared on that operation.

use crate::ast::{OperationDefinition, Type, Value};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct NoUndefinedVariables {
    operation_name: Option<String>,
}

impl<'a> Rule<'a> for NoUndefinedVariables {
    fn name(&self) -> &'static str {
        "NoUndefinedVariables"
    }

    fn enter_operation(&mut self, op: &'a Spanning<OperationDefinition>, _ctx: &mut ValidationContext<'a>) -> NextCheckAction {
        self.operation_name = op.item.name.as_ref().map(|n| n.item.clone());
        NextCheckAction::Continue
    }

    fn enter_variable_usage(
        &mut self,
        var_name: &'a str,
        usage_site: &'a Spanning<Value>,
        _expected_type: Option<&'a Type>,
        _location_has_default: bool,
        ctx: &mut ValidationContext<'a>,
    ) {
        if ctx.variable_info(var_name).is_some() {
            return;
        }
        let message = match &self.operation_name {
            Some(name) => format!("Variable \"${var_name}\" is not defined by operation \"{name}\""),
            None => format!("Variable \"${var_name}\" is not defined"),
        };
        ctx.report(message, vec![usage_site.start()]);
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::NoUndefinedVariables;

    #[test]
    fn declared_variable_is_fine() {
        expect_passes_rule(
            Box::new(|| Box::new(NoUndefinedVariables::default())),
            "query ($id: ID) { human(id: $id) { name } }",
        );
    }

    #[test]
    fn undefined_variable_in_named_operation_is_reported() {
        expect_fails_rule(
            Box::new(|| Box::new(NoUndefinedVariables::default())),
            "query HumanQuery { human(id: $id) { name } }",
            &["Variable \"$id\" is not defined by operation \"HumanQuery\""],
        );
    }

    #[test]
    fn undefined_variable_in_anonymous_operation_is_reported() {
        expect_fails_rule(
            Box::new(|| Box::new(NoUndefinedVariables::default())),
            "{ human(id: $id) { name } }",
            &["Variable \"$id\" is not defined"],
        );
    }
}
