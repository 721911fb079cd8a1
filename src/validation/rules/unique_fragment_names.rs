//! No two fragment definitions in a document may share a name; spreads
//! resolve fragments by name, so a duplicate would be ambiguous.

use std::collections::HashSet;

use crate::ast::Definition;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct UniqueFragmentNames;

impl<'a> Rule<'a> for UniqueFragmentNames {
    fn name(&self) -> &'static str {
        "UniqueFragmentNames"
    }

    fn exit_document(&mut self, ctx: &mut ValidationContext<'a>) {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for def in ctx.document() {
            if let Definition::Fragment(frag) = def {
                let name = &frag.item.name.item;
                if !seen.insert(name.clone()) {
                    duplicates.push((name.clone(), frag.item.name.start()));
                }
            }
        }
        for (name, location) in duplicates {
            ctx.report(
                format!("There can be only one fragment named \"{name}\""),
                vec![location],
            );
        }
    }
}
