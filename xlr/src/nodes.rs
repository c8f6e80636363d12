//! XLR node model
//!
//! Every XLR node is a JSON object whose `type` field selects the variant. The
//! structs here mirror that layout one-to-one so documents can be read straight
//! out of the JSON the XLR converter emits:
//!
//! ```json
//! { "name": "ActionAsset", "source": "types.ts", "type": "object",
//!   "properties": { "label": { "required": false, "node": { "type": "ref", "ref": "AssetWrapper" } } } }
//! ```
//!
//! Object properties are stored in an `IndexMap` so declaration order survives
//! deserialization; everything downstream (defaults, setters, asset-wrapper paths)
//! relies on that order being stable.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Documentation annotations that may appear on any node
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Annotations {
    /// Name of the type when the node is a named declaration
    pub name:        Option<String>,
    /// Short title
    pub title:       Option<String>,
    /// Long-form description taken from the declaration's doc comment
    pub description: Option<String>,
    /// Example values
    pub examples:    Option<Value>,
    /// Declared default value
    pub default:     Option<Value>,
    /// `@see` references
    pub see:         Option<Value>,
    /// Free-form comment
    pub comment:     Option<String>,
    /// Arbitrary metadata attached by the converter
    pub meta:        Option<Map<String, Value>>,
}

/// Payload shared by the simple (keyword) node kinds
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrimitiveNode {
    /// Literal value the type is fixed to, e.g. `"action"` for `type: "action"`
    #[serde(rename = "const")]
    pub const_value: Option<Value>,
    /// Set of literal values the type is restricted to
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Reference to a named type, possibly with generic arguments
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefNode {
    /// Referenced type as written, e.g. `AssetWrapper<ImageAsset>`
    #[serde(rename = "ref")]
    pub reference:         String,
    /// Parsed generic arguments, when the converter resolved them
    pub generic_arguments: Option<Vec<NodeType>>,
    /// Indexed property access (`Foo["bar"]`)
    pub property:          Option<String>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations:       Annotations,
}

/// A single property of an object node
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectProperty {
    /// Whether the property must be present
    pub required: bool,
    /// Type of the property
    pub node:     NodeType,
}

/// `additionalProperties` / `additionalItems`: either a flag or a node
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalItems {
    /// `false` when extra entries are disallowed
    Allowed(bool),
    /// Type every extra entry must satisfy
    Node(Box<NodeType>),
}

/// Object shape, named when `annotations.name` is set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    /// Properties in declaration order
    #[serde(default)]
    pub properties:            IndexMap<String, ObjectProperty>,
    /// Base type this object extends
    pub extends:               Option<Box<RefNode>>,
    /// Constraint on properties not listed in `properties`
    pub additional_properties: Option<AdditionalItems>,
    /// Literal value the object is fixed to
    #[serde(rename = "const")]
    pub const_value:           Option<Value>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations:           Annotations,
}

/// Homogeneous array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayNode {
    /// Element type
    pub element_type: Box<NodeType>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations:  Annotations,
}

/// One positional member of a tuple
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TupleMember {
    /// Label of a named tuple member
    pub name:     Option<String>,
    /// Type of the member
    #[serde(rename = "type")]
    pub node:     NodeType,
    /// Whether the member may be omitted
    #[serde(default)]
    pub optional: bool,
}

/// Fixed-length tuple
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleNode {
    /// Members in position order
    pub element_types:    Vec<TupleMember>,
    /// Minimum number of members that must be present
    #[serde(default)]
    pub min_items:        usize,
    /// Rest element type, if any
    pub additional_items: Option<AdditionalItems>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations:      Annotations,
}

/// Intersection (`A & B`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AndNode {
    /// Intersected participants
    #[serde(rename = "and")]
    pub members:     Vec<NodeType>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Union (`A | B`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrNode {
    /// Union variants
    #[serde(rename = "or")]
    pub members:     Vec<NodeType>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Template literal type, stored as its match format
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateNode {
    /// Pattern the string must match
    pub format:      String,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// `Record<K, V>`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordNode {
    /// Key type
    pub key_type:    Box<NodeType>,
    /// Value type
    pub value_type:  Box<NodeType>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Parameter of a function type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name
    pub name:     String,
    /// Parameter type
    #[serde(rename = "type")]
    pub node:     NodeType,
    /// Whether the parameter is optional
    #[serde(default)]
    pub optional: bool,
    /// Default value
    pub default:  Option<Value>,
}

/// Function signature
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    /// Parameters in order
    #[serde(default)]
    pub parameters:  Vec<FunctionParameter>,
    /// Return type, `void` when absent
    pub return_type: Option<Box<NodeType>>,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// `left extends right` check of a conditional type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalCheck {
    /// Checked type
    pub left:  Box<NodeType>,
    /// Type it is checked against
    pub right: Box<NodeType>,
}

/// Branches of a conditional type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalBranches {
    /// Result when the check holds
    #[serde(rename = "true")]
    pub when_true:  Box<NodeType>,
    /// Result when the check fails
    #[serde(rename = "false")]
    pub when_false: Box<NodeType>,
}

/// `A extends B ? C : D`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalNode {
    /// The `extends` check
    pub check:       ConditionalCheck,
    /// The two branches
    pub value:       ConditionalBranches,
    /// Documentation annotations
    #[serde(flatten)]
    pub annotations: Annotations,
}

/// Discriminant of a [`NodeType`], as written in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// `any`
    Any,
    /// `unknown`
    Unknown,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `void`
    Void,
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `never`
    Never,
    /// `ref`
    Ref,
    /// `object`
    Object,
    /// `array`
    Array,
    /// `tuple`
    Tuple,
    /// `and`
    And,
    /// `or`
    Or,
    /// `template`
    Template,
    /// `record`
    Record,
    /// `function`
    Function,
    /// `conditional`
    Conditional,
}

/// An XLR type node
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeType {
    /// `any`
    Any(PrimitiveNode),
    /// `unknown`
    Unknown(PrimitiveNode),
    /// `undefined`
    Undefined(PrimitiveNode),
    /// `null`
    Null(PrimitiveNode),
    /// `void`
    Void(PrimitiveNode),
    /// `string`, optionally a literal
    String(PrimitiveNode),
    /// `number`, optionally a literal
    Number(PrimitiveNode),
    /// `boolean`, optionally a literal
    Boolean(PrimitiveNode),
    /// `never`
    Never(PrimitiveNode),
    /// Reference to a named type
    Ref(RefNode),
    /// Object shape
    Object(ObjectNode),
    /// Array
    Array(ArrayNode),
    /// Tuple
    Tuple(TupleNode),
    /// Intersection
    And(AndNode),
    /// Union
    Or(OrNode),
    /// Template literal
    Template(TemplateNode),
    /// Record
    Record(RecordNode),
    /// Function signature
    Function(FunctionNode),
    /// Conditional type
    Conditional(ConditionalNode),
}

impl NodeType {
    /// Parse a node from XLR JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer).map_err(|e| Error::from_path_error(&e))
    }

    /// Convert an already parsed JSON value into a node
    pub fn from_value(value: Value) -> Result<Self> {
        serde_path_to_error::deserialize(value).map_err(|e| Error::from_path_error(&e))
    }

    /// The `type` discriminant of this node
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Any(_) => NodeKind::Any,
            Self::Unknown(_) => NodeKind::Unknown,
            Self::Undefined(_) => NodeKind::Undefined,
            Self::Null(_) => NodeKind::Null,
            Self::Void(_) => NodeKind::Void,
            Self::String(_) => NodeKind::String,
            Self::Number(_) => NodeKind::Number,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Never(_) => NodeKind::Never,
            Self::Ref(_) => NodeKind::Ref,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::Tuple(_) => NodeKind::Tuple,
            Self::And(_) => NodeKind::And,
            Self::Or(_) => NodeKind::Or,
            Self::Template(_) => NodeKind::Template,
            Self::Record(_) => NodeKind::Record,
            Self::Function(_) => NodeKind::Function,
            Self::Conditional(_) => NodeKind::Conditional,
        }
    }

    /// Documentation annotations of this node
    pub const fn annotations(&self) -> &Annotations {
        match self {
            Self::Any(node)
            | Self::Unknown(node)
            | Self::Undefined(node)
            | Self::Null(node)
            | Self::Void(node)
            | Self::String(node)
            | Self::Number(node)
            | Self::Boolean(node)
            | Self::Never(node) => &node.annotations,
            Self::Ref(node) => &node.annotations,
            Self::Object(node) => &node.annotations,
            Self::Array(node) => &node.annotations,
            Self::Tuple(node) => &node.annotations,
            Self::And(node) => &node.annotations,
            Self::Or(node) => &node.annotations,
            Self::Template(node) => &node.annotations,
            Self::Record(node) => &node.annotations,
            Self::Function(node) => &node.annotations,
            Self::Conditional(node) => &node.annotations,
        }
    }

    /// Literal value the node is fixed to, if any
    pub const fn const_value(&self) -> Option<&Value> {
        match self {
            Self::Any(node)
            | Self::Unknown(node)
            | Self::Undefined(node)
            | Self::Null(node)
            | Self::Void(node)
            | Self::String(node)
            | Self::Number(node)
            | Self::Boolean(node)
            | Self::Never(node) => node.const_value.as_ref(),
            Self::Object(node) => node.const_value.as_ref(),
            _ => None,
        }
    }

    /// Declared name of a named node
    pub fn name(&self) -> Option<&str> { self.annotations().name.as_deref() }
}

/// Generic parameter declared by a named type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenericToken {
    /// Parameter symbol, e.g. `AnyAsset`
    pub symbol:      String,
    /// `extends` constraint
    pub constraints: Option<NodeType>,
    /// Default argument
    pub default:     Option<NodeType>,
}

/// A top-level declaration: a node plus its name and declaring file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    /// Declared name
    #[serde(alias = "typeName")]
    pub name:           String,
    /// File the type was declared in
    pub source:         String,
    /// Generic parameters, in declaration order
    pub generic_tokens: Option<Vec<GenericToken>>,
    /// The declared type itself
    #[serde(flatten)]
    pub node:           NodeType,
}

impl NamedType {
    /// Parse a named type from XLR JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer).map_err(|e| Error::from_path_error(&e))
    }

    /// Convert an already parsed JSON value into a named type
    pub fn from_value(value: Value) -> Result<Self> {
        serde_path_to_error::deserialize(value).map_err(|e| Error::from_path_error(&e))
    }

    /// The object payload, when the declaration is an object type
    pub const fn as_object(&self) -> Option<&ObjectNode> {
        match &self.node {
            NodeType::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Symbols of the declared generic parameters
    pub fn generic_symbols(&self) -> impl Iterator<Item = &str> {
        self.generic_tokens
            .iter()
            .flatten()
            .map(|token| token.symbol.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "tests fail loudly")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_named_object_type_keeps_property_order() {
        let named = NamedType::from_value(json!({
            "name": "ActionAsset",
            "source": "src/assets/action/types.ts",
            "type": "object",
            "description": "User actions",
            "extends": {
                "type": "ref",
                "ref": "Asset<\"action\">",
                "genericArguments": [{ "type": "string", "const": "action" }]
            },
            "properties": {
                "value": { "required": false, "node": { "type": "string" } },
                "label": { "required": false, "node": { "type": "ref", "ref": "AssetWrapper" } },
                "exp": { "required": false, "node": { "type": "ref", "ref": "Expression" } }
            }
        }))
        .unwrap();

        assert_eq!(named.name, "ActionAsset");
        let object = named.as_object().unwrap();
        let names: Vec<&str> = object.properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["value", "label", "exp"]);
        assert_eq!(object.annotations.description.as_deref(), Some("User actions"));

        let extends = object.extends.as_deref().unwrap();
        assert_eq!(extends.reference, "Asset<\"action\">");
        let argument = &extends.generic_arguments.as_ref().unwrap()[0];
        assert_eq!(argument.const_value(), Some(&json!("action")));
    }

    #[test]
    fn test_type_name_alias_and_generic_tokens() {
        let named = NamedType::from_value(json!({
            "typeName": "ListAsset",
            "source": "list.ts",
            "type": "object",
            "genericTokens": [{
                "symbol": "AnyAsset",
                "constraints": { "type": "ref", "ref": "Asset" },
                "default": { "type": "ref", "ref": "Asset" }
            }],
            "properties": {}
        }))
        .unwrap();

        assert_eq!(named.name, "ListAsset");
        assert_eq!(named.generic_symbols().collect::<Vec<_>>(), ["AnyAsset"]);
    }

    #[test]
    fn test_composite_nodes() {
        let node = NodeType::from_json(
            r#"{
                "type": "or",
                "or": [
                    { "type": "tuple", "elementTypes": [{ "type": { "type": "number" } }], "minItems": 1 },
                    { "type": "record", "keyType": { "type": "string" }, "valueType": { "type": "boolean" } },
                    { "type": "conditional",
                      "check": { "left": { "type": "ref", "ref": "T" }, "right": { "type": "string" } },
                      "value": { "true": { "type": "string" }, "false": { "type": "never" } } },
                    { "type": "object", "properties": {}, "additionalProperties": false }
                ]
            }"#,
        )
        .unwrap();

        let NodeType::Or(union) = node else {
            panic!("expected a union");
        };
        let kinds: Vec<NodeKind> = union.members.iter().map(NodeType::kind).collect();
        assert_eq!(
            kinds,
            [NodeKind::Tuple, NodeKind::Record, NodeKind::Conditional, NodeKind::Object]
        );
        let NodeType::Object(object) = &union.members[3] else {
            panic!("expected an object");
        };
        assert_eq!(
            object.additional_properties,
            Some(AdditionalItems::Allowed(false))
        );
    }

    #[test]
    fn test_unknown_discriminant_is_rejected() {
        let error = NodeType::from_json(
            r#"{ "type": "array", "elementType": { "type": "bigint" } }"#,
        )
        .unwrap_err();

        let Error::Deserialize { message, .. } = error;
        assert!(message.contains("bigint"), "unexpected message: {message}");
    }

    #[test]
    fn test_node_kind_round_trips_through_strings() {
        assert_eq!(NodeKind::Conditional.to_string(), "conditional");
        assert_eq!("ref".parse::<NodeKind>().unwrap(), NodeKind::Ref);
    }
}
