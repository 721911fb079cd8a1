//! Every variable an operation declares must be used somewhere within it
//! (directly, or through a spread fragment) — an unused declaration can
//! never affect the response and is almost always a typo.

use crate::ast::OperationDefinition;
use crate::span::Spanning;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct NoUnusedVariables;

impl<'a> Rule<'a> for NoUnusedVariables {
    fn name(&self) -> &'static str {
        "NoUnusedVariables"
    }

    fn exit_operation(&mut self, op: &'a Spanning<OperationDefinition>, ctx: &mut ValidationContext<'a>) {
        let name = op.item.name.as_ref().map(|n| n.item.clone());
        let unused: Vec<String> = ctx
            .variable_infos()
            .filter(|(_, info)| !info.used)
            .map(|(name, _)| name.to_owned())
            .collect();

        for var_name in unused {
            let message = match &name {
                Some(op_name) => format!("Variable \"${var_name}\" is never used in operation \"{op_name}\""),
                None => format!("Variable \"${var_name}\" is never used"),
            };
            ctx.report(message, vec![op.start()]);
        }
    }
}
