//! Every literal value in the document must be a legal literal for the
//! type it's being used at: a scalar's `coerce_literal` accepts it, an enum
//! literal names one of the type's values, an input object supplies only
//! known fields and every required field, and a `null` literal is rejected
//! against a non-null type.
//!
//! A `Value::Variable` is never checked here — whether a variable's
//! *declared* type is allowed at a position is `VariablesInAllowedPosition`'s
//! concern, not this rule's; a variable reference is always a legal literal
//! shape.

use crate::ast::{Type, Value};
use crate::schema::MetaType;
use crate::span::Spanning;
use crate::validation::context::ValidationContext;
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct ValuesOfCorrectType;

impl<'a> Rule<'a> for ValuesOfCorrectType {
    fn name(&self) -> &'static str {
        "ValuesOfCorrectType"
    }

    fn enter_value(&mut self, value: &'a Spanning<Value>, expected_type: Option<&'a Type>, ctx: &mut ValidationContext<'a>) {
        if matches!(value.item, Value::Variable(_)) {
            return;
        }
        let Some(expected_type) = expected_type else {
            return;
        };

        if matches!(value.item, Value::Null) {
            if expected_type.is_non_null() {
                ctx.report(
                    format!("Expected value of type \"{expected_type}\", found null"),
                    vec![value.start()],
                );
            }
            return;
        }

        let inner = expected_type.nullable_inner();
        let Some(meta) = ctx.schema().type_by_name(inner.innermost_name()) else {
            return;
        };

        // A list-typed position accepts a bare (non-list) literal by
        // implicit single-value coercion, same as a variable would.
        if inner.list_element().is_some() && !matches!(value.item, Value::List(_)) {
            return;
        }

        match meta {
            MetaType::Scalar(scalar) => {
                if let Err(err) = scalar.coerce_literal(&value.item) {
                    ctx.report_with_cause(
                        format!("Expected value of type \"{expected_type}\""),
                        vec![value.start()],
                        err,
                    );
                }
            }
            MetaType::Enum(enum_meta) => match &value.item {
                Value::Enum(name) if enum_meta.values.iter().any(|v| v == name) => {}
                _ => {
                    ctx.report(
                        format!("Expected value of type \"{expected_type}\", found {}", describe(&value.item)),
                        vec![value.start()],
                    );
                }
            },
            MetaType::InputObject(input) => {
                let Value::Object(fields) = &value.item else {
                    ctx.report(
                        format!("Expected value of type \"{expected_type}\", found {}", describe(&value.item)),
                        vec![value.start()],
                    );
                    return;
                };
                for (name, _) in fields {
                    if !input.fields.contains_key(&name.item) {
                        ctx.report(
                            format!(
                                "Field \"{}\" is not defined by type \"{}\"",
                                name.item, input.name
                            ),
                            vec![name.start()],
                        );
                    }
                }
                for field_def in input.fields.values() {
                    let is_required = field_def.field_type.is_non_null() && field_def.default_value.is_none();
                    if is_required && !fields.iter().any(|(n, _)| n.item == field_def.name) {
                        ctx.report(
                            format!(
                                "Field \"{}\" of required type \"{}\" was not provided",
                                field_def.name, field_def.field_type
                            ),
                            vec![value.start()],
                        );
                    }
                }
            }
            MetaType::Object(_) | MetaType::Interface(_) | MetaType::Union(_) => {
                // A composite type can never appear as an input position;
                // `VariablesAreInputTypes` and schema construction already
                // rule this out upstream of any literal ever reaching here.
            }
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Int(_) => "an integer",
        Value::Float(_) => "a float",
        Value::String(_) => "a string",
        Value::Boolean(_) => "a boolean",
        Value::Enum(_) => "an enum value",
        Value::Variable(_) => "a variable",
        Value::List(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::test_schema::{expect_fails_rule, expect_passes_rule};
    use super::ValuesOfCorrectType;

    #[test]
    fn good_int_literal_on_int_argument() {
        expect_passes_rule(
            Box::new(|| Box::new(ValuesOfCorrectType)),
            "{ complicatedArgs { intArgField(intArg: 2) } }",
        );
    }

    #[test]
    fn string_literal_on_int_argument_fails_coercion() {
        expect_fails_rule(
            Box::new(|| Box::new(ValuesOfCorrectType)),
            r#"{ complicatedArgs { intArgField(intArg: "2") } }"#,
            &["Expected value of type \"Int\""],
        );
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(ValuesOfCorrectType)),
            "{ complicatedArgs { enumArgField(enumArg: PURPLE) } }",
            &["Expected value of type \"FurColor\", found an enum value"],
        );
    }

    #[test]
    fn null_against_non_null_argument_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(ValuesOfCorrectType)),
            "{ complicatedArgs { nonNullIntArgField(nonNullIntArg: null) } }",
            &["Expected value of type \"Int!\", found null"],
        );
    }

    #[test]
    fn input_object_with_unknown_field_is_rejected() {
        expect_fails_rule(
            Box::new(|| Box::new(ValuesOfCorrectType)),
            "{ complicatedArgs { complexArgField(complexArg: { requiredField: true, unknownField: 1 }) } }",
            &["Field \"unknownField\" is not defined by type \"ComplexInput\""],
        );
    }
}
