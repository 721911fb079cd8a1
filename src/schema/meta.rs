//! Metadata describing the types, fields, arguments and directives a schema
//! exposes. This is the read-only shape the validator queries; nothing here
//! is ever mutated once a [`super::model::SchemaType`] is built.

use indexmap::IndexMap;

use crate::ast::{Type, Value};

/// A single named type definition in a schema.
#[derive(Debug, Clone)]
pub enum MetaType {
    Scalar(ScalarMeta),
    Object(ObjectMeta),
    Interface(InterfaceMeta),
    Union(UnionMeta),
    Enum(EnumMeta),
    InputObject(InputObjectMeta),
}

impl MetaType {
    pub fn name(&self) -> &str {
        match self {
            MetaType::Scalar(t) => &t.name,
            MetaType::Object(t) => &t.name,
            MetaType::Interface(t) => &t.name,
            MetaType::Union(t) => &t.name,
            MetaType::Enum(t) => &t.name,
            MetaType::InputObject(t) => &t.name,
        }
    }

    /// Output-side field lookup; only object and interface types carry
    /// selectable fields.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        match self {
            MetaType::Object(t) => t.fields.get(name),
            MetaType::Interface(t) => t.fields.get(name),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            MetaType::Object(t) => Some(&t.fields),
            MetaType::Interface(t) => Some(&t.fields),
            _ => None,
        }
    }

    pub fn input_field_by_name(&self, name: &str) -> Option<&InputField> {
        match self {
            MetaType::InputObject(t) => t.fields.get(name),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            MetaType::Object(_) | MetaType::Interface(_) | MetaType::Union(_)
        )
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, MetaType::Interface(_) | MetaType::Union(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MetaType::Scalar(_) | MetaType::Enum(_))
    }

    pub fn is_input_object(&self) -> bool {
        matches!(self, MetaType::InputObject(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, MetaType::Enum(_))
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        match self {
            MetaType::Enum(t) => Some(&t.values),
            _ => None,
        }
    }
}

/// Error returned by a scalar's literal coercion function.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct CoercionError {
    pub message: String,
}

impl CoercionError {
    pub fn new(message: impl Into<String>) -> Self {
        CoercionError {
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct ScalarMeta {
    pub name: String,
    coerce: fn(&Value) -> Result<(), CoercionError>,
}

impl std::fmt::Debug for ScalarMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarMeta").field("name", &self.name).finish()
    }
}

impl ScalarMeta {
    pub fn new(name: impl Into<String>, coerce: fn(&Value) -> Result<(), CoercionError>) -> Self {
        ScalarMeta {
            name: name.into(),
            coerce,
        }
    }

    /// Invoked by `ValuesOfCorrectType` through the narrow `coerce_literal`
    /// contract the core consumes; variables are never passed here (their
    /// shape is checked structurally, not coerced).
    pub fn coerce_literal(&self, value: &Value) -> Result<(), CoercionError> {
        (self.coerce)(value)
    }

    pub fn int() -> Self {
        ScalarMeta::new("Int", |v| match v {
            Value::Int(i) if *i >= i32::MIN as i64 && *i <= i32::MAX as i64 => Ok(()),
            Value::Int(_) => Err(CoercionError::new("Int cannot represent non 32-bit signed integer value")),
            other => Err(CoercionError::new(format!(
                "Int cannot represent non-integer value: {other:?}"
            ))),
        })
    }

    pub fn float() -> Self {
        ScalarMeta::new("Float", |v| match v {
            Value::Float(_) | Value::Int(_) => Ok(()),
            other => Err(CoercionError::new(format!(
                "Float cannot represent non numeric value: {other:?}"
            ))),
        })
    }

    pub fn string() -> Self {
        ScalarMeta::new("String", |v| match v {
            Value::String(_) => Ok(()),
            other => Err(CoercionError::new(format!(
                "String cannot represent a non string value: {other:?}"
            ))),
        })
    }

    pub fn boolean() -> Self {
        ScalarMeta::new("Boolean", |v| match v {
            Value::Boolean(_) => Ok(()),
            other => Err(CoercionError::new(format!(
                "Boolean cannot represent a non boolean value: {other:?}"
            ))),
        })
    }

    pub fn id() -> Self {
        ScalarMeta::new("ID", |v| match v {
            Value::String(_) | Value::Int(_) => Ok(()),
            other => Err(CoercionError::new(format!(
                "ID cannot represent value: {other:?}"
            ))),
        })
    }

    /// A custom scalar with no coercion logic of its own; literals of any
    /// shape are accepted. A real schema would supply its own coercer here.
    pub fn custom(name: impl Into<String>) -> Self {
        ScalarMeta::new(name, |_| Ok(()))
    }
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub name: String,
    pub arg_type: Type,
    pub default_value: Option<Value>,
}

impl Argument {
    pub fn new(name: impl Into<String>, arg_type: Type) -> Self {
        Argument {
            name: name.into(),
            arg_type,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub field_type: Type,
    pub arguments: IndexMap<String, Argument>,
    pub deprecated: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        Field {
            name: name.into(),
            field_type,
            arguments: IndexMap::new(),
            deprecated: false,
        }
    }

    pub fn argument(mut self, arg: Argument) -> Self {
        self.arguments.insert(arg.name.clone(), arg);
        self
    }
}

#[derive(Debug, Clone)]
pub struct InputField {
    pub name: String,
    pub field_type: Type,
    pub default_value: Option<Value>,
}

impl InputField {
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        InputField {
            name: name.into(),
            field_type,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub name: String,
    pub fields: IndexMap<String, Field>,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InterfaceMeta {
    pub name: String,
    pub fields: IndexMap<String, Field>,
}

#[derive(Debug, Clone)]
pub struct UnionMeta {
    pub name: String,
    pub of_types: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EnumMeta {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InputObjectMeta {
    pub name: String,
    pub fields: IndexMap<String, InputField>,
}

/// A directive's type-system definition: where it may appear and what
/// arguments it accepts.
#[derive(Debug, Clone)]
pub struct DirectiveType {
    pub name: String,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<String, Argument>,
}

impl DirectiveType {
    pub fn new(name: impl Into<String>, locations: Vec<DirectiveLocation>) -> Self {
        DirectiveType {
            name: name.into(),
            locations,
            arguments: IndexMap::new(),
        }
    }

    pub fn argument(mut self, arg: Argument) -> Self {
        self.arguments.insert(arg.name.clone(), arg);
        self
    }
}

/// Locations a directive can be applied at, restricted to the executable
/// subset this validator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
}

impl DirectiveLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }
}
