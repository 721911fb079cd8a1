//! A non-repeatable directive may appear at most once on a given node; this
//! crate's directive model has no repeatable directives, so every
//! duplicate name at one location is an error.

use crate::ast::Directive;
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct UniqueDirectivesPerLocation;

impl UniqueDirectivesPerLocation {
    fn check(&self, directives: &[Spanning<Directive>], ctx: &mut ValidationContext<'_>) {
        for (i, d) in directives.iter().enumerate() {
            let name = &d.item.name.item;
            if directives[..i].iter().any(|earlier| &earlier.item.name.item == name) {
                ctx.report(
                    format!("The directive \"@{name}\" can only be used once at this location"),
                    vec![d.item.name.start()],
                );
            }
        }
    }
}

impl<'a> Rule<'a> for UniqueDirectivesPerLocation {
    fn name(&self) -> &'static str {
        "UniqueDirectivesPerLocation"
    }

    fn enter_operation(
        &mut self,
        op: &'a Spanning<crate::ast::OperationDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        self.check(&op.item.directives, ctx);
        crate::validation::action::NextCheckAction::Continue
    }

    fn enter_fragment_definition(
        &mut self,
        frag: &'a Spanning<crate::ast::FragmentDefinition>,
        ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        self.check(&frag.item.directives, ctx);
        crate::validation::action::NextCheckAction::Continue
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<crate::ast::Field>,
        _parent_type: Option<&'a MetaType>,
        _field_def: Option<&'a crate::schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        self.check(&field.item.directives, ctx);
        crate::validation::action::NextCheckAction::Continue
    }

    fn enter_inline_fragment(
        &mut self,
        frag: &'a Spanning<crate::ast::InlineFragment>,
        _parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        self.check(&frag.item.directives, ctx);
        crate::validation::action::NextCheckAction::Continue
    }

    fn enter_fragment_spread(
        &mut self,
        spread: &'a Spanning<crate::ast::FragmentSpread>,
        _parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> crate::validation::action::NextCheckAction {
        self.check(&spread.item.directives, ctx);
        crate::validation::action::NextCheckAction::Continue
    }
}
