//! No fragment may (transitively) spread itself — a cycle would make the
//! document's selection set infinite.
//!
//! Spreads are recorded while walking fragment definitions (phase two of
//! the document walk), then checked once in `exit_document` with an
//! iterative, explicit-stack cycle search: recursing per fragment here
//! would tie the check's own stack depth to the document's fragment-spread
//! depth, which is exactly the kind of input this rule exists to reject.

use std::collections::HashMap;

use crate::ast::FragmentDefinition;
use crate::span::{SourcePosition, Spanning};
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct NoFragmentCycles {
    current_fragment: Option<String>,
    spreads: HashMap<String, Vec<(String, SourcePosition)>>,
    fragment_order: Vec<String>,
}

impl<'a> Rule<'a> for NoFragmentCycles {
    fn name(&self) -> &'static str {
        "NoFragmentCycles"
    }

    fn enter_fragment_definition(
        &mut self,
        frag: &'a Spanning<FragmentDefinition>,
        _ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        let name = frag.item.name.item.clone();
        self.fragment_order.push(name.clone());
        self.spreads.entry(name.clone()).or_default();
        self.current_fragment = Some(name);
        crate::validation::action::NextCheckAction::Continue
    }

    fn exit_fragment_definition(&mut self, _frag: &'a Spanning<FragmentDefinition>, _ctx: &mut ValidationContext<'a>) {
        self.current_fragment = None;
    }

    fn enter_fragment_spread(
        &mut self,
        spread: &'a Spanning<crate::ast::FragmentSpread>,
        _parent_type: Option<&'a crate::schema::MetaType>,
        _ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        if let Some(current) = &self.current_fragment {
            self.spreads
                .entry(current.clone())
                .or_default()
                .push((spread.item.name.item.clone(), spread.start()));
        }
        crate::validation::action::NextCheckAction::Continue
    }

    fn exit_document(&mut self, ctx: &mut ValidationContext<'a>) {
        let mut visited: std::collections::HashSet<String> = std::collections::HashSet::new();

        for start in self.fragment_order.clone() {
            if visited.contains(&start) {
                continue;
            }
            self.detect_from(&start, &mut visited, ctx);
        }
    }
}

impl NoFragmentCycles {
    /// Walks the spread graph from `start` with an explicit stack, reporting
    /// a cycle the moment a spread closes back on a fragment already on the
    /// current path, then continuing past it (so a fragment with two
    /// separate cyclic spreads gets both reported).
    fn detect_from(&self, start: &str, visited: &mut std::collections::HashSet<String>, ctx: &mut ValidationContext<'_>) {
        // (fragment name, index into its spread list to resume at)
        let mut stack: Vec<(String, usize)> = vec![(start.to_owned(), 0)];
        let mut path_indices: HashMap<String, usize> = HashMap::new();
        path_indices.insert(start.to_owned(), 0);
        visited.insert(start.to_owned());

        while let Some((name, next_idx)) = stack.pop() {
            let empty = Vec::new();
            let spread_list = self.spreads.get(&name).unwrap_or(&empty);

            if next_idx >= spread_list.len() {
                path_indices.remove(&name);
                continue;
            }

            // Re-push the current frame at the next index before descending,
            // so returning here resumes where we left off.
            stack.push((name.clone(), next_idx + 1));

            let (target, position) = &spread_list[next_idx];
            if let Some(&cycle_start) = path_indices.get(target) {
                let via: Vec<&str> = stack[cycle_start + 1..]
                    .iter()
                    .map(|(n, _)| n.as_str())
                    .collect();
                let message = if via.is_empty() {
                    format!("Cannot spread fragment \"{target}\"")
                } else {
                    format!(
                        "Cannot spread fragment \"{target}\" within itself via {}",
                        via.join(", ")
                    )
                };
                ctx.report(message, vec![*position]);
                continue;
            }

            if visited.insert(target.clone()) {
                path_indices.insert(target.clone(), stack.len());
                stack.push((target.clone(), 0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use crate::validation::rules::NoFragmentCycles;

    #[test]
    fn no_spreads_is_fine() {
        expect_passes_rule(
            Box::new(|| Box::new(NoFragmentCycles::default())),
            "fragment dogFragment on Dog { name } { dog { ...dogFragment } }",
        );
    }

    #[test]
    fn direct_self_spread_is_a_cycle() {
        expect_fails_rule(
            Box::new(|| Box::new(NoFragmentCycles::default())),
            "fragment loopy on Dog { ...loopy } { dog { ...loopy } }",
            &["Cannot spread fragment \"loopy\""],
        );
    }

    #[test]
    fn indirect_spread_cycle_reports_the_via_chain() {
        expect_fails_rule(
            Box::new(|| Box::new(NoFragmentCycles::default())),
            "fragment a on Dog { ...b } fragment b on Dog { ...a } { dog { ...a } }",
            &["Cannot spread fragment \"a\" within itself via b"],
        );
    }
}
