//! Every fragment definition in a document must be reachable from at least
//! one operation; the link pass marks reachability as it walks each
//! operation, so this only has to read the result once the whole document
//! has been walked.

use crate::ast::Definition;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct NoUnusedFragments;

impl<'a> Rule<'a> for NoUnusedFragments {
    fn name(&self) -> &'static str {
        "NoUnusedFragments"
    }

    fn exit_document(&mut self, ctx: &mut ValidationContext<'a>) {
        let unused: Vec<(String, crate::span::SourcePosition)> = ctx
            .document()
            .iter()
            .filter_map(|def| match def {
                Definition::Fragment(frag) if !ctx.fragment_used(&frag.item.name.item) => {
                    Some((frag.item.name.item.clone(), frag.start()))
                }
                _ => None,
            })
            .collect();

        for (name, location) in unused {
            ctx.report(format!("Fragment \"{name}\" is never used"), vec![location]);
        }
    }
}
