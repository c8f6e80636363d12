//! Type guards over [`NodeType`]
//!
//! Total predicates used by the generator to classify nodes without matching on
//! the enum at every call site.

use crate::constants::{ASSET, ASSET_WRAPPER, BINDING, EXPRESSION, RESERVED_PRIMITIVES, TYPESCRIPT_BUILTINS};
use crate::names::extract_base_name;
use crate::nodes::NodeType;

/// `string` node
pub const fn is_string_type(node: &NodeType) -> bool { matches!(node, NodeType::String(_)) }

/// `number` node
pub const fn is_number_type(node: &NodeType) -> bool { matches!(node, NodeType::Number(_)) }

/// `boolean` node
pub const fn is_boolean_type(node: &NodeType) -> bool { matches!(node, NodeType::Boolean(_)) }

/// `null` node
pub const fn is_null_type(node: &NodeType) -> bool { matches!(node, NodeType::Null(_)) }

/// `undefined` node
pub const fn is_undefined_type(node: &NodeType) -> bool {
    matches!(node, NodeType::Undefined(_))
}

/// `any` node
pub const fn is_any_type(node: &NodeType) -> bool { matches!(node, NodeType::Any(_)) }

/// `unknown` node
pub const fn is_unknown_type(node: &NodeType) -> bool { matches!(node, NodeType::Unknown(_)) }

/// `object` node
pub const fn is_object_type(node: &NodeType) -> bool { matches!(node, NodeType::Object(_)) }

/// `array` node
pub const fn is_array_type(node: &NodeType) -> bool { matches!(node, NodeType::Array(_)) }

/// `ref` node
pub const fn is_ref_type(node: &NodeType) -> bool { matches!(node, NodeType::Ref(_)) }

/// Union node
pub const fn is_or_type(node: &NodeType) -> bool { matches!(node, NodeType::Or(_)) }

/// Intersection node
pub const fn is_and_type(node: &NodeType) -> bool { matches!(node, NodeType::And(_)) }

/// `record` node
pub const fn is_record_type(node: &NodeType) -> bool { matches!(node, NodeType::Record(_)) }

/// `tuple` node
pub const fn is_tuple_type(node: &NodeType) -> bool { matches!(node, NodeType::Tuple(_)) }

/// Template literal node
pub const fn is_template_literal_type(node: &NodeType) -> bool {
    matches!(node, NodeType::Template(_))
}

/// Function signature node
pub const fn is_function_type(node: &NodeType) -> bool { matches!(node, NodeType::Function(_)) }

/// Object node carrying a declared name
pub fn is_named_type(node: &NodeType) -> bool {
    matches!(node, NodeType::Object(object) if object.annotations.name.is_some())
}

/// Keyword node: `string`, `number`, `boolean`, `null`, `undefined`, `any`,
/// `unknown`, `never` or `void`
pub const fn is_primitive_type(node: &NodeType) -> bool {
    matches!(
        node,
        NodeType::String(_)
            | NodeType::Number(_)
            | NodeType::Boolean(_)
            | NodeType::Null(_)
            | NodeType::Undefined(_)
            | NodeType::Any(_)
            | NodeType::Unknown(_)
            | NodeType::Never(_)
            | NodeType::Void(_)
    )
}

/// String, number or boolean node fixed to a literal value
pub fn is_primitive_const(node: &NodeType) -> bool {
    match node {
        NodeType::String(primitive) | NodeType::Number(primitive) | NodeType::Boolean(primitive) => {
            primitive.const_value.is_some()
        },
        _ => false,
    }
}

fn is_ref_named(node: &NodeType, name: &str) -> bool {
    matches!(node, NodeType::Ref(reference) if extract_base_name(&reference.reference) == name)
}

/// Reference to `AssetWrapper`, with or without a generic argument
pub fn is_asset_wrapper_ref(node: &NodeType) -> bool { is_ref_named(node, ASSET_WRAPPER) }

/// Reference to the `Asset` base type
pub fn is_asset_ref(node: &NodeType) -> bool { is_ref_named(node, ASSET) }

/// Reference to `Expression`
pub fn is_expression_ref(node: &NodeType) -> bool { is_ref_named(node, EXPRESSION) }

/// Reference to `Binding`
pub fn is_binding_ref(node: &NodeType) -> bool { is_ref_named(node, BINDING) }

/// Whether a type name needs no import: TypeScript keywords and global/utility
/// types, plus the framework's reserved primitives
pub fn is_builtin_type(name: &str) -> bool {
    let base = extract_base_name(name);
    TYPESCRIPT_BUILTINS.contains(&base) || RESERVED_PRIMITIVES.contains(&base)
}
