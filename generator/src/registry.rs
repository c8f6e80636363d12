//! Named object types
//!
//! The registry is how the generator sees past a single declaration: the default
//! generator recurses into referenced objects, the path finder expands named
//! properties, and the transformer asks whether a type extends `AssetWrapper`
//! through an intermediate base.

use std::collections::HashSet;

use indexmap::IndexMap;
use player_xlr::constants::ASSET_WRAPPER;
use player_xlr::{NamedType, NodeType, ObjectNode, RefNode, extract_base_name};

/// Type name to object definition
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, ObjectNode>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self { Self::default() }

    /// Registry of every object-typed declaration given; other declarations are skipped
    pub fn from_named_types<'a>(types: impl IntoIterator<Item = &'a NamedType>) -> Self {
        let mut registry = Self::new();
        for named in types {
            if let NodeType::Object(object) = &named.node {
                registry.insert(named.name.clone(), object.clone());
            }
        }
        registry
    }

    /// Add or replace a definition
    pub fn insert(&mut self, name: impl Into<String>, object: ObjectNode) {
        self.types.insert(name.into(), object);
    }

    /// Definition of `name`; generic arguments in `name` are ignored
    pub fn get(&self, name: &str) -> Option<&ObjectNode> {
        self.types.get(extract_base_name(name))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(extract_base_name(name))
    }

    /// Registered names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> { self.types.keys().map(String::as_str) }

    /// Number of registered types
    pub fn len(&self) -> usize { self.types.len() }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// The `AssetWrapper<...>` reference `name` extends, directly or through
    /// registered base types
    pub fn asset_wrapper_base(&self, name: &str) -> Option<&RefNode> {
        self.object_asset_wrapper_base(self.get(name)?)
    }

    /// The `AssetWrapper<...>` reference `object` extends, directly or through
    /// registered base types
    pub fn object_asset_wrapper_base<'a>(&'a self, object: &'a ObjectNode) -> Option<&'a RefNode> {
        let mut visited = HashSet::new();
        let mut current = object;
        loop {
            let base = current.extends.as_deref()?;
            let base_name = extract_base_name(&base.reference);
            if base_name == ASSET_WRAPPER {
                return Some(base);
            }
            if !visited.insert(base_name) {
                return None;
            }
            current = self.types.get(base_name)?;
        }
    }

    /// Whether `name` transitively extends `AssetWrapper`
    pub fn extends_asset_wrapper(&self, name: &str) -> bool {
        self.asset_wrapper_base(name).is_some()
    }
}
