//! No two named operations in a document may share a name; anonymous
//! operations are exempt (`LoneAnonymousOperation` covers those).

use crate::ast::OperationDefinition;
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct UniqueOperationNames;

impl<'a> Rule<'a> for UniqueOperationNames {
    fn name(&self) -> &'static str {
        "UniqueOperationNames"
    }

    fn enter_operation(&mut self, op: &'a Spanning<OperationDefinition>, ctx: &mut ValidationContext<'a>) -> NextCheckAction {
        if let Some(name) = &op.item.name {
            if ctx.declare_operation_name(name).is_some() {
                ctx.report(
                    format!("There can be only one operation named \"{}\".", name.item),
                    vec![name.start()],
                );
            }
        }
        NextCheckAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::UniqueOperationNames;

    #[test]
    fn distinct_operation_names_are_fine() {
        expect_passes_rule(
            Box::new(|| Box::new(UniqueOperationNames)),
            "query A { dog { name } } query B { cat { name } }",
        );
    }

    #[test]
    fn anonymous_operations_are_exempt() {
        expect_passes_rule(
            Box::new(|| Box::new(UniqueOperationNames)),
            "{ dog { name } }",
        );
    }

    #[test]
    fn duplicate_operation_name_is_reported() {
        expect_fails_rule(
            Box::new(|| Box::new(UniqueOperationNames)),
            "query A { dog { name } } query A { cat { name } }",
            &["There can be only one operation named \"A\"."],
        );
    }
}
