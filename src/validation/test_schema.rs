//! A schema fixture shared by this module's rule tests, mirroring the
//! `Dog`/`Cat`/`Human`/`Alien`/`ComplicatedArgs` shape the GraphQL reference
//! validation suite uses, built directly through this crate's own
//! `SchemaType`/`MetaType` construction API rather than through a resolver
//! layer (this crate has none).

#![cfg(test)]

use indexmap::IndexMap;

use crate::ast::Type;
use crate::schema::{
    self, Argument, DirectiveLocation, DirectiveType, EnumMeta, Field, InputField,
    InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta, SchemaType, UnionMeta,
};

fn named(name: &str) -> Type {
    Type::Named(name.to_owned())
}

fn non_null(t: Type) -> Type {
    Type::NonNull(Box::new(t))
}

fn list(t: Type) -> Type {
    Type::List(Box::new(t))
}

fn fields(defs: Vec<Field>) -> IndexMap<String, Field> {
    defs.into_iter().map(|f| (f.name.clone(), f)).collect()
}

/// Builds the standard fixture schema used across this module's rule
/// tests: `Being`/`Pet`/`Canine`/`Intelligent` interfaces, `Dog`/`Cat`
/// implementing the pet interfaces, `Human`/`Alien` implementing
/// `Intelligent`, the `CatOrDog`/`DogOrHuman`/`HumanOrAlien` unions, the
/// `DogCommand`/`FurColor` enums, the `ComplexInput` input object, and a
/// `ComplicatedArgs` object covering every scalar argument shape, rooted at
/// `QueryRoot`.
pub fn query_root_schema() -> SchemaType {
    let being = MetaType::Interface(InterfaceMeta {
        name: "Being".to_owned(),
        fields: fields(vec![Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean")))]),
    });
    let pet = MetaType::Interface(InterfaceMeta {
        name: "Pet".to_owned(),
        fields: fields(vec![Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean")))]),
    });
    let canine = MetaType::Interface(InterfaceMeta {
        name: "Canine".to_owned(),
        fields: fields(vec![Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean")))]),
    });
    let intelligent = MetaType::Interface(InterfaceMeta {
        name: "Intelligent".to_owned(),
        fields: fields(vec![Field::new("iq", named("Int"))]),
    });

    let dog_command = MetaType::Enum(EnumMeta {
        name: "DogCommand".to_owned(),
        values: vec!["SIT".to_owned(), "HEEL".to_owned(), "DOWN".to_owned()],
    });
    let fur_color = MetaType::Enum(EnumMeta {
        name: "FurColor".to_owned(),
        values: vec!["BROWN".to_owned(), "BLACK".to_owned(), "TAN".to_owned(), "SPOTTED".to_owned()],
    });

    let dog = MetaType::Object(ObjectMeta {
        name: "Dog".to_owned(),
        fields: fields(vec![
            Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean"))),
            Field::new("nickname", named("String")),
            Field::new("barkVolume", named("Int")),
            Field::new("barks", named("Boolean")),
            Field::new("doesKnowCommand", named("Boolean")).argument(Argument::new("dogCommand", named("DogCommand"))),
            Field::new("isHousetrained", named("Boolean"))
                .argument(Argument::new("atOtherHomes", named("Boolean")).with_default(crate::ast::Value::Boolean(true))),
            Field::new("isAtLocation", named("Boolean"))
                .argument(Argument::new("x", named("Int")))
                .argument(Argument::new("y", named("Int"))),
        ]),
        interfaces: vec!["Being".to_owned(), "Pet".to_owned(), "Canine".to_owned()],
    });

    let cat = MetaType::Object(ObjectMeta {
        name: "Cat".to_owned(),
        fields: fields(vec![
            Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean"))),
            Field::new("nickname", named("String")),
            Field::new("meows", named("Boolean")),
            Field::new("meowVolume", named("Int")),
            Field::new("furColor", named("FurColor")),
        ]),
        interfaces: vec!["Being".to_owned(), "Pet".to_owned()],
    });

    let human = MetaType::Object(ObjectMeta {
        name: "Human".to_owned(),
        fields: fields(vec![
            Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean"))),
            Field::new("pets", list(named("Pet"))),
            Field::new("relatives", list(named("Human"))),
            Field::new("iq", named("Int")),
        ]),
        interfaces: vec!["Being".to_owned(), "Intelligent".to_owned()],
    });

    let alien = MetaType::Object(ObjectMeta {
        name: "Alien".to_owned(),
        fields: fields(vec![
            Field::new("name", named("String")).argument(Argument::new("surname", named("Boolean"))),
            Field::new("iq", named("Int")),
            Field::new("numEyes", named("Int")),
        ]),
        interfaces: vec!["Being".to_owned(), "Intelligent".to_owned()],
    });

    let cat_or_dog = MetaType::Union(UnionMeta {
        name: "CatOrDog".to_owned(),
        of_types: vec!["Cat".to_owned(), "Dog".to_owned()],
    });
    let dog_or_human = MetaType::Union(UnionMeta {
        name: "DogOrHuman".to_owned(),
        of_types: vec!["Dog".to_owned(), "Human".to_owned()],
    });
    let human_or_alien = MetaType::Union(UnionMeta {
        name: "HumanOrAlien".to_owned(),
        of_types: vec!["Human".to_owned(), "Alien".to_owned()],
    });

    let complex_input = MetaType::InputObject(InputObjectMeta {
        name: "ComplexInput".to_owned(),
        fields: vec![
            InputField::new("requiredField", non_null(named("Boolean"))),
            InputField::new("intField", named("Int")),
            InputField::new("stringField", named("String")),
            InputField::new("booleanField", named("Boolean")),
            InputField::new("stringListField", list(named("String"))),
        ]
        .into_iter()
        .map(|f| (f.name.clone(), f))
        .collect(),
    });

    let complicated_args = MetaType::Object(ObjectMeta {
        name: "ComplicatedArgs".to_owned(),
        fields: fields(vec![
            Field::new("intArgField", named("String")).argument(Argument::new("intArg", named("Int"))),
            Field::new("nonNullIntArgField", named("String")).argument(Argument::new("nonNullIntArg", non_null(named("Int")))),
            Field::new("stringArgField", named("String")).argument(Argument::new("stringArg", named("String"))),
            Field::new("booleanArgField", named("String")).argument(Argument::new("booleanArg", named("Boolean"))),
            Field::new("enumArgField", named("String")).argument(Argument::new("enumArg", named("FurColor"))),
            Field::new("floatArgField", named("String")).argument(Argument::new("floatArg", named("Float"))),
            Field::new("idArgField", named("String")).argument(Argument::new("idArg", named("ID"))),
            Field::new("stringListArgField", named("String")).argument(Argument::new("stringListArg", list(named("String")))),
            Field::new("complexArgField", named("String")).argument(Argument::new("complexArg", named("ComplexInput"))),
            Field::new("multipleReqs", named("String"))
                .argument(Argument::new("req1", non_null(named("Int"))))
                .argument(Argument::new("req2", non_null(named("Int")))),
            Field::new("multipleOpts", named("String"))
                .argument(Argument::new("opt1", named("Int")).with_default(crate::ast::Value::Int(0)))
                .argument(Argument::new("opt2", named("Int")).with_default(crate::ast::Value::Int(0))),
            Field::new("multipleOptAndReq", named("String"))
                .argument(Argument::new("req1", non_null(named("Int"))))
                .argument(Argument::new("req2", non_null(named("Int"))))
                .argument(Argument::new("opt1", named("Int")).with_default(crate::ast::Value::Int(0)))
                .argument(Argument::new("opt2", named("Int")).with_default(crate::ast::Value::Int(0))),
            Field::new("nonNullFieldWithDefault", named("String"))
                .argument(Argument::new("arg", non_null(named("Int"))).with_default(crate::ast::Value::Int(5))),
        ]),
        interfaces: vec![],
    });

    let query_root = MetaType::Object(ObjectMeta {
        name: "QueryRoot".to_owned(),
        fields: fields(vec![
            Field::new("human", named("Human")).argument(Argument::new("id", named("ID"))),
            Field::new("alien", named("Alien")),
            Field::new("dog", named("Dog")),
            Field::new("cat", named("Cat")),
            Field::new("pet", named("Pet")),
            Field::new("catOrDog", named("CatOrDog")),
            Field::new("dogOrHuman", named("DogOrHuman")),
            Field::new("humanOrAlien", named("HumanOrAlien")),
            Field::new("complicatedArgs", named("ComplicatedArgs")),
        ]),
        interfaces: vec![],
    });

    let mut types = schema::builtin_scalars();
    types.extend([
        being, pet, canine, intelligent, dog_command, fur_color, dog, cat, human, alien, cat_or_dog, dog_or_human, human_or_alien, complex_input,
        complicated_args, query_root,
    ]);

    let mut directives = schema::builtin_directives();
    directives.extend([
        DirectiveType::new("onQuery", vec![DirectiveLocation::Query]),
        DirectiveType::new("onMutation", vec![DirectiveLocation::Mutation]),
        DirectiveType::new("onField", vec![DirectiveLocation::Field]),
        DirectiveType::new("onFragmentDefinition", vec![DirectiveLocation::FragmentDefinition]),
        DirectiveType::new("onFragmentSpread", vec![DirectiveLocation::FragmentSpread]),
        DirectiveType::new("onInlineFragment", vec![DirectiveLocation::InlineFragment]),
    ]);

    SchemaType::new(types, "QueryRoot", None, None, directives)
}

/// Parses `query`, runs only `rule` (plus the rules that establish state it
/// depends on are left out deliberately — each rule test targets one rule
/// in isolation) against the fixture schema, and asserts no diagnostics.
pub fn expect_passes_rule(rule: Box<dyn for<'a> Fn() -> Box<dyn crate::validation::Rule<'a> + 'a>>, query: &str) {
    let diagnostics = run_rule(rule, query);
    assert!(diagnostics.is_empty(), "expected no diagnostics, got: {diagnostics:#?}");
}

/// Same as [`expect_passes_rule`], but asserts the rule raises diagnostics
/// whose messages exactly match `expected_messages`, in order.
pub fn expect_fails_rule(rule: Box<dyn for<'a> Fn() -> Box<dyn crate::validation::Rule<'a> + 'a>>, query: &str, expected_messages: &[&str]) {
    let diagnostics = run_rule(rule, query);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message()).collect();
    assert_eq!(messages, expected_messages);
}

fn run_rule(rule: Box<dyn for<'a> Fn() -> Box<dyn crate::validation::Rule<'a> + 'a>>, query: &str) -> Vec<crate::diagnostics::Diagnostic> {
    let schema = query_root_schema();
    let document = crate::parser::parse_document(query).unwrap_or_else(|e| panic!("parse error on {query:?}: {e}"));
    crate::validation::validate_with_rules(&schema, &document, vec![rule()]).expect("non-empty rule set")
}
