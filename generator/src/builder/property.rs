//! Per-property generation decisions

use heck::ToUpperCamelCase;
use player_xlr::constants::{ASSET, ASSET_WRAPPER};
use player_xlr::guards::is_primitive_const;
use player_xlr::{NodeType, ObjectProperty, extract_base_name};

use super::render::SetterKind;
use crate::analysis::PropertyInfo;
use crate::registry::TypeRegistry;

const ARRAY_TYPES: &[&str] = &["Array", "ReadonlyArray"];

/// One property of the type being generated, classified once up front
#[derive(Debug, Clone)]
pub struct BuilderProperty<'a> {
    /// Property name as declared
    pub name:          &'a str,
    /// Declared type
    pub node:          &'a NodeType,
    /// Whether the property must be present
    pub required:      bool,
    /// Holds a single asset slot
    pub is_slot:       bool,
    /// Holds an array of asset slots
    pub is_array_slot: bool,
    /// Analyzed as an array, directly or through an alias
    pub is_array:      bool,
    /// Raw assets stored in the slot are wrapped in an `AssetWrapper`
    pub wraps_asset:   bool,
}

/// `Some(wraps)` when `node` references an asset slot
fn slot(node: &NodeType, registry: &TypeRegistry) -> Option<bool> {
    let NodeType::Ref(reference) = node else {
        return None;
    };
    let base = extract_base_name(&reference.reference);
    if base == ASSET {
        Some(false)
    } else if base == ASSET_WRAPPER || registry.extends_asset_wrapper(base) {
        Some(true)
    } else {
        None
    }
}

/// Element type of `T[]` or `Array<T>`
pub fn array_element(node: &NodeType) -> Option<&NodeType> {
    match node {
        NodeType::Array(array) => Some(&array.element_type),
        NodeType::Ref(reference) if ARRAY_TYPES.contains(&extract_base_name(&reference.reference)) => {
            match reference.generic_arguments.as_deref() {
                Some([element]) => Some(element),
                _ => None,
            }
        },
        _ => None,
    }
}

impl<'a> BuilderProperty<'a> {
    /// Classify `property` from its declared node and its analysis
    pub fn new(
        name: &'a str,
        property: &'a ObjectProperty,
        analysis: &PropertyInfo,
        registry: &TypeRegistry,
    ) -> Self {
        let element_slot = if analysis.is_array {
            array_element(&property.node).and_then(|element| slot(element, registry))
        } else {
            None
        };
        let single_slot = slot(&property.node, registry);
        Self {
            name,
            node: &property.node,
            required: property.required,
            is_slot: single_slot.is_some(),
            is_array_slot: element_slot.is_some(),
            is_array: analysis.is_array,
            wraps_asset: single_slot.or(element_slot).unwrap_or(false),
        }
    }

    /// `withX` method name
    pub fn setter_name(&self) -> String { format!("with{}", self.name.to_upper_camel_case()) }

    /// `addX` method name
    pub fn adder_name(&self) -> String { format!("add{}", self.name.to_upper_camel_case()) }

    /// Primitive constants are fixed, either by the defaults or by omission
    pub fn has_setter(&self) -> bool { !is_primitive_const(self.node) }

    /// Whether an `addX` method appends single elements
    pub const fn has_adder(&self) -> bool { self.is_array }

    /// Body of `withX`
    pub const fn setter_kind(&self) -> SetterKind {
        if self.is_slot || self.is_array_slot {
            SetterKind::Slot {
                wrap_in_asset_wrapper: self.wraps_asset,
                is_array:              self.is_array_slot,
            }
        } else {
            SetterKind::Set
        }
    }

    /// Body of `addX`
    pub const fn adder_kind(&self) -> SetterKind {
        if self.is_array_slot {
            SetterKind::AppendSlot {
                wrap_in_asset_wrapper: self.wraps_asset,
            }
        } else {
            SetterKind::Append
        }
    }

    /// Doc comment text
    pub fn description(&self) -> Option<&str> {
        self.node.annotations().description.as_deref()
    }
}
