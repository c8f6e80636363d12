//! Asset-wrapper path discovery
//!
//! Finds every property path in an object type that ends at an `AssetWrapper`
//! slot. The generated builder embeds the result so the runtime knows where to
//! wrap nested assets:
//!
//! ```text
//! { header?: { left?: AssetWrapper; right?: AssetWrapper } }
//!     -> [["header", "left"], ["header", "right"]]
//! ```
//!
//! Arrays, unions and intersections are transparent. Named references are
//! expanded through the [`TypeRegistry`]; a type already being expanded on the
//! current branch is not expanded again, which is what makes cyclic registries
//! terminate.

use std::collections::HashSet;

use indexmap::IndexSet;
use player_xlr::constants::ASSET_WRAPPER;
use player_xlr::{NodeType, ObjectNode, extract_base_name};

use crate::registry::TypeRegistry;

/// Path of property names from the builder's root to a slot
pub type AssetWrapperPath = Vec<String>;

/// Walks object types looking for asset-wrapper slots
#[derive(Debug, Clone, Copy)]
pub struct AssetWrapperPathFinder<'a> {
    registry: &'a TypeRegistry,
}

/// Mutable state of one traversal
struct Walk {
    prefix:  Vec<String>,
    visited: HashSet<String>,
    paths:   IndexSet<AssetWrapperPath>,
}

impl<'a> AssetWrapperPathFinder<'a> {
    /// Finder resolving named references through `registry`
    pub const fn new(registry: &'a TypeRegistry) -> Self { Self { registry } }

    /// Every slot path in `object`, in property declaration order
    pub fn find_asset_wrapper_paths(&self, object: &ObjectNode) -> Vec<AssetWrapperPath> {
        self.find_paths(object.annotations.name.as_deref(), object)
    }

    /// Same as [`Self::find_asset_wrapper_paths`] for an object declared as `type_name`
    ///
    /// Top-level declarations carry their name outside the node, so the caller
    /// supplies it to keep self-references from being expanded.
    pub fn find_asset_wrapper_paths_for(
        &self,
        type_name: &str,
        object: &ObjectNode,
    ) -> Vec<AssetWrapperPath> {
        self.find_paths(Some(type_name), object)
    }

    fn find_paths(&self, root: Option<&str>, object: &ObjectNode) -> Vec<AssetWrapperPath> {
        let mut walk = Walk {
            prefix:  Vec::new(),
            visited: HashSet::new(),
            paths:   IndexSet::new(),
        };
        if let Some(name) = root {
            walk.visited.insert(name.to_string());
        }
        self.walk_object(object, &mut walk);
        walk.paths.into_iter().collect()
    }

    fn walk_object(&self, object: &ObjectNode, walk: &mut Walk) {
        if let Some(base) = &object.extends {
            self.walk_named(extract_base_name(&base.reference), walk);
        }
        for (name, property) in &object.properties {
            walk.prefix.push(name.clone());
            self.walk_node(&property.node, walk);
            walk.prefix.pop();
        }
    }

    fn walk_node(&self, node: &NodeType, walk: &mut Walk) {
        match node {
            NodeType::Ref(reference) => {
                let base = extract_base_name(&reference.reference);
                if base == ASSET_WRAPPER || self.registry.extends_asset_wrapper(base) {
                    walk.paths.insert(walk.prefix.clone());
                } else {
                    self.walk_named(base, walk);
                }
            },
            NodeType::Array(array) => self.walk_node(&array.element_type, walk),
            NodeType::Or(union) => {
                for member in &union.members {
                    self.walk_node(member, walk);
                }
            },
            NodeType::And(intersection) => {
                for member in &intersection.members {
                    self.walk_node(member, walk);
                }
            },
            NodeType::Object(object) => match &object.annotations.name {
                Some(name) if walk.visited.contains(name) => {},
                Some(name) => {
                    walk.visited.insert(name.clone());
                    self.walk_object(object, walk);
                    walk.visited.remove(name);
                },
                None => self.walk_object(object, walk),
            },
            _ => {},
        }
    }

    /// Expand a registered type unless it is already open on this branch
    fn walk_named(&self, name: &str, walk: &mut Walk) {
        let Some(target) = self.registry.get(name) else {
            return;
        };
        if !walk.visited.insert(name.to_string()) {
            return;
        }
        self.walk_object(target, walk);
        walk.visited.remove(name);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: serde_json::Value) -> ObjectNode {
        match NodeType::from_value(value).unwrap() {
            NodeType::Object(object) => object,
            _ => ObjectNode::default(),
        }
    }

    fn wrapper() -> serde_json::Value { json!({ "type": "ref", "ref": "AssetWrapper" }) }

    #[test]
    fn test_inline_nested_slots() {
        let registry = TypeRegistry::new();
        let target = object(json!({
            "type": "object",
            "properties": {
                "header": { "required": false, "node": {
                    "type": "object",
                    "properties": {
                        "left": { "required": false, "node": wrapper() },
                        "right": { "required": false, "node": wrapper() }
                    }
                } }
            }
        }));
        let paths = AssetWrapperPathFinder::new(&registry).find_asset_wrapper_paths(&target);
        assert_eq!(paths, [["header", "left"], ["header", "right"]]);
    }

    #[test]
    fn test_registry_expansion_survives_cycles() {
        let mut registry = TypeRegistry::new();
        registry.insert(
            "A",
            object(json!({
                "type": "object",
                "name": "A",
                "properties": {
                    "slot": { "required": true, "node": wrapper() },
                    "back": { "required": false, "node": { "type": "ref", "ref": "B" } }
                }
            })),
        );
        let b = object(json!({
            "type": "object",
            "name": "B",
            "properties": { "child": { "required": true, "node": { "type": "ref", "ref": "A" } } }
        }));
        registry.insert("B", b.clone());

        let paths = AssetWrapperPathFinder::new(&registry).find_asset_wrapper_paths(&b);
        assert_eq!(paths, [["child", "slot"]]);
    }

    #[test]
    fn test_arrays_unions_and_transitive_wrappers_are_transparent() {
        let mut registry = TypeRegistry::new();
        registry.insert(
            "Header",
            object(json!({ "type": "object", "extends": wrapper(), "properties": {} })),
        );
        registry.insert(
            "Item",
            object(json!({ "type": "object", "properties": { "label": { "required": true, "node": wrapper() } } })),
        );
        let target = object(json!({
            "type": "object",
            "properties": {
                "values": { "required": true, "node": { "type": "array", "elementType": { "type": "ref", "ref": "Item" } } },
                "title": { "required": false, "node": { "type": "or", "or": [{ "type": "string" }, { "type": "ref", "ref": "Header" }] } },
                "plain": { "required": false, "node": { "type": "string" } }
            }
        }));
        let paths = AssetWrapperPathFinder::new(&registry).find_asset_wrapper_paths(&target);
        assert_eq!(paths, [vec!["values", "label"], vec!["title"]]);
    }

    #[test]
    fn test_sibling_branches_each_expand_shared_type() {
        let mut registry = TypeRegistry::new();
        registry.insert(
            "Slot",
            object(json!({ "type": "object", "properties": { "asset": { "required": true, "node": wrapper() } } })),
        );
        let target = object(json!({
            "type": "object",
            "properties": {
                "first": { "required": true, "node": { "type": "ref", "ref": "Slot" } },
                "second": { "required": true, "node": { "type": "ref", "ref": "Slot" } }
            }
        }));
        let paths = AssetWrapperPathFinder::new(&registry).find_asset_wrapper_paths_for("Target", &target);
        assert_eq!(paths, [["first", "asset"], ["second", "asset"]]);
    }
}
