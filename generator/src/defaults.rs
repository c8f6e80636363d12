//! Default value synthesis
//!
//! Builds the `defaults` record of a generated builder: the smallest value that
//! satisfies each required property, so `build()` produces a valid object even
//! when the caller sets nothing.
//!
//! | property type                       | default                               |
//! |-------------------------------------|---------------------------------------|
//! | `string`, template, `Expression`, `Binding` | `""`                          |
//! | `number`                            | `0`                                   |
//! | `boolean`                           | `false`                               |
//! | array, tuple                        | `[]`                                  |
//! | `null`                              | `null`                                |
//! | object, registered reference        | nested required defaults, `{}` at the depth limit |
//! | unregistered reference, record      | `{}`                                  |
//! | union                               | first non-null member with a default  |
//! | intersection                        | merged object defaults of the members |
//! | `undefined`, `any`, functions, ...  | omitted                               |
//!
//! Optional properties are never defaulted, and neither are slots: anything whose
//! type is listed in `skip_types` or is an `AssetWrapper`.

use player_xlr::constants::{ASSET, BINDING, EXPRESSION};
use player_xlr::guards::{is_asset_wrapper_ref, is_null_type, is_undefined_type};
use player_xlr::{NodeType, ObjectNode, RefNode, extract_base_name};
use serde_json::{Map, Value};
use tracing::trace;

use crate::config::DefaultValueConfig;
use crate::constants::{ID_PROPERTY, TYPE_PROPERTY};
use crate::registry::TypeRegistry;

/// Synthesizes default values for object types
#[derive(Debug, Clone)]
pub struct DefaultValueGenerator<'a> {
    config:   DefaultValueConfig,
    registry: Option<&'a TypeRegistry>,
}

impl Default for DefaultValueGenerator<'_> {
    fn default() -> Self { Self::new(DefaultValueConfig::default()) }
}

impl<'a> DefaultValueGenerator<'a> {
    /// Generator with no registry; every reference defaults to `{}`
    pub const fn new(config: DefaultValueConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    /// Resolve references through `registry`
    #[must_use]
    pub fn with_registry(self, registry: &'a TypeRegistry) -> Self {
        Self {
            registry: Some(registry),
            ..self
        }
    }

    /// Defaults for every required property of `object`
    ///
    /// `asset_type` seeds the `type` discriminator. Assets (objects extending
    /// `Asset...`) and objects with an `id` property get an empty `id`.
    pub fn generate_defaults(&self, object: &ObjectNode, asset_type: Option<&str>) -> Map<String, Value> {
        let mut defaults = Map::new();
        if let Some(asset_type) = asset_type {
            defaults.insert(TYPE_PROPERTY.to_string(), Value::String(asset_type.to_string()));
        }

        let extends_asset = object
            .extends
            .as_ref()
            .is_some_and(|base| base.reference.starts_with(ASSET));
        if extends_asset || object.properties.contains_key(ID_PROPERTY) {
            defaults
                .entry(ID_PROPERTY)
                .or_insert_with(|| Value::String(String::new()));
        }

        self.fill_required(object, &mut defaults, 0);
        defaults
    }

    /// Whether a property of this type is left for the caller to supply
    pub fn is_skipped(&self, node: &NodeType) -> bool {
        if is_asset_wrapper_ref(node) {
            return true;
        }
        match node {
            NodeType::Ref(reference) => {
                let base = extract_base_name(&reference.reference);
                self.config.skip_types.contains(base)
                    || self
                        .registry
                        .is_some_and(|registry| registry.extends_asset_wrapper(base))
            },
            NodeType::Object(object) => object
                .annotations
                .name
                .as_ref()
                .is_some_and(|name| self.config.skip_types.contains(name)),
            _ => false,
        }
    }

    fn fill_required(&self, object: &ObjectNode, defaults: &mut Map<String, Value>, depth: usize) {
        for (name, property) in &object.properties {
            if !property.required {
                continue;
            }
            if self.is_skipped(&property.node) {
                trace!(property = %name, "Skipping slot property");
                continue;
            }
            if let Some(value) = property.node.const_value() {
                defaults.insert(name.clone(), value.clone());
                continue;
            }
            if defaults.contains_key(name) {
                continue;
            }
            if let Some(value) = self.default_for(&property.node, depth) {
                defaults.insert(name.clone(), value);
            }
        }
    }

    /// Default for one type, `None` when the property should be omitted
    pub fn default_for(&self, node: &NodeType, depth: usize) -> Option<Value> {
        if let Some(value) = node.const_value() {
            return Some(value.clone());
        }
        match node {
            NodeType::String(_) | NodeType::Template(_) => Some(Value::String(String::new())),
            NodeType::Number(_) => Some(Value::from(0)),
            NodeType::Boolean(_) => Some(Value::Bool(false)),
            NodeType::Array(_) | NodeType::Tuple(_) => Some(Value::Array(Vec::new())),
            NodeType::Null(_) => Some(Value::Null),
            NodeType::Record(_) => Some(Value::Object(Map::new())),
            NodeType::Object(object) => Some(self.object_default(object, depth)),
            NodeType::Ref(reference) => Some(self.reference_default(reference, depth)),
            NodeType::Or(union) => union
                .members
                .iter()
                .filter(|member| !is_null_type(member) && !is_undefined_type(member))
                .find_map(|member| self.default_for(member, depth)),
            NodeType::And(intersection) => {
                let mut merged = Map::new();
                for member in &intersection.members {
                    if let Some(Value::Object(fields)) = self.default_for(member, depth) {
                        merged.extend(fields);
                    }
                }
                Some(Value::Object(merged))
            },
            NodeType::Undefined(_)
            | NodeType::Void(_)
            | NodeType::Any(_)
            | NodeType::Unknown(_)
            | NodeType::Never(_)
            | NodeType::Function(_)
            | NodeType::Conditional(_) => None,
        }
    }

    fn object_default(&self, object: &ObjectNode, depth: usize) -> Value {
        let mut fields = Map::new();
        if depth < self.config.max_depth {
            self.fill_required(object, &mut fields, depth + 1);
        }
        Value::Object(fields)
    }

    fn reference_default(&self, reference: &RefNode, depth: usize) -> Value {
        let base = extract_base_name(&reference.reference);
        if base == EXPRESSION || base == BINDING {
            return Value::String(String::new());
        }
        self.registry
            .and_then(|registry| registry.get(base))
            .map_or_else(|| Value::Object(Map::new()), |object| self.object_default(object, depth))
    }
}
