//! A field whose type is a leaf (scalar or enum) must not carry a
//! selection set; a field whose type is composite must carry a non-empty
//! one. Both directions leave a response shape that doesn't match what the
//! field can actually produce.

use crate::ast::Field;
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::validation::action::NextCheckAction;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct ScalarLeafs;

impl<'a> Rule<'a> for ScalarLeafs {
    fn name(&self) -> &'static str {
        "ScalarLeafs"
    }

    fn enter_field(
        &mut self,
        field: &'a Spanning<Field>,
        _parent_type: Option<&'a MetaType>,
        field_def: Option<&'a crate::schema::Field>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        let Some(field_def) = field_def else {
            return NextCheckAction::Continue;
        };
        let field_type_name = field_def.field_type.innermost_name();
        let is_leaf = ctx
            .schema()
            .type_by_name(field_type_name)
            .map(MetaType::is_leaf)
            .unwrap_or(false);
        let field_name = &field.item.name.item;

        match (&field.item.selection_set, is_leaf) {
            (Some(set), true) if !set.selections.is_empty() => {
                ctx.report(
                    format!(
                        "Field \"{field_name}\" must not have a selection since type \"{}\" has no subfields",
                        field_def.field_type
                    ),
                    vec![field.start()],
                );
            }
            (None, false) => {
                ctx.report(
                    format!(
                        "Field \"{field_name}\" of type \"{}\" must have a selection of subfields",
                        field_def.field_type
                    ),
                    vec![field.start()],
                );
            }
            _ => {}
        }

        NextCheckAction::Continue
    }
}
