//! A fragment (named or inline) can only be spread where its type condition
//! could actually apply: the spread's type and the type it's spread into
//! must share at least one possible concrete type.

use crate::ast::{FragmentSpread, InlineFragment};
use crate::schema::{MetaType, SchemaType};
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct PossibleFragmentSpreads;

/// Whether `a` and `b` could both be satisfied by the same concrete object:
/// identical types always overlap, otherwise each side's possible-types set
/// (a singleton for a concrete type, `schema.possible_types` for an
/// abstract one) must intersect.
fn do_types_overlap(schema: &SchemaType, a: &MetaType, b: &MetaType) -> bool {
    if a.name() == b.name() {
        return true;
    }
    let possible_a = possible_types_of(schema, a);
    let possible_b = possible_types_of(schema, b);
    possible_a.iter().any(|name| possible_b.contains(name.as_str()))
}

fn possible_types_of(schema: &SchemaType, t: &MetaType) -> Vec<String> {
    if t.is_abstract() {
        schema.possible_types(t.name()).iter().map(str::to_owned).collect()
    } else {
        vec![t.name().to_owned()]
    }
}

impl<'a> Rule<'a> for PossibleFragmentSpreads {
    fn name(&self) -> &'static str {
        "PossibleFragmentSpreads"
    }

    fn enter_fragment_spread(
        &mut self,
        spread: &'a Spanning<FragmentSpread>,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let Some(parent_type) = parent_type else {
            return NextCheckAction::Continue;
        };
        let Some(frag_def) = ctx.fragment_definition(&spread.item.name.item) else {
            return NextCheckAction::Continue;
        };
        let Some(frag_type) = ctx.schema().type_by_name(&frag_def.item.type_condition.item) else {
            return NextCheckAction::Continue;
        };
        if !do_types_overlap(ctx.schema(), frag_type, parent_type) {
            ctx.report(
                format!(
                    "Fragment \"{}\" cannot be spread here as objects of type \"{}\" can never be of type \"{}\"",
                    spread.item.name.item,
                    parent_type.name(),
                    frag_type.name()
                ),
                vec![spread.start()],
            );
        }
        NextCheckAction::Continue
    }

    fn enter_inline_fragment(
        &mut self,
        frag: &'a Spanning<InlineFragment>,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let (Some(parent_type), Some(tc)) = (parent_type, &frag.item.type_condition) else {
            return NextCheckAction::Continue;
        };
        let Some(frag_type) = ctx.schema().type_by_name(&tc.item) else {
            return NextCheckAction::Continue;
        };
        if !do_types_overlap(ctx.schema(), frag_type, parent_type) {
            ctx.report(
                format!(
                    "Fragment cannot be spread here as objects of type \"{}\" can never be of type \"{}\"",
                    parent_type.name(),
                    frag_type.name()
                ),
                vec![tc.start()],
            );
        }
        NextCheckAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::PossibleFragmentSpreads;

    #[test]
    fn object_fragment_spread_into_matching_object() {
        expect_passes_rule(
            Box::new(|| Box::new(PossibleFragmentSpreads)),
            "fragment dogFragment on Dog { barkVolume } { dog { ...dogFragment } }",
        );
    }

    #[test]
    fn different_object_fragment_spread_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(PossibleFragmentSpreads)),
            "fragment catFragment on Cat { meowVolume } { dog { ...catFragment } }",
            &["Fragment \"catFragment\" cannot be spread here as objects of type \"Dog\" can never be of type \"Cat\""],
        );
    }

    #[test]
    fn union_member_inline_fragment_on_unrelated_object_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(PossibleFragmentSpreads)),
            "{ catOrDog { ... on Human { name } } }",
            &["Fragment cannot be spread here as objects of type \"CatOrDog\" can never be of type \"Human\""],
        );
    }
}
