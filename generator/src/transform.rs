//! XLR node to setter parameter type
//!
//! Setters accept more than the raw value. For a named object `Foo` the
//! parameter type is
//!
//! ```text
//! Foo | FluentBuilder<Foo, BaseBuildContext> | FluentPartial<Foo, BaseBuildContext>
//! ```
//!
//! so callers may pass a built value, a builder, or a partial tree of builders.
//! Anonymous object shapes get the same three forms around their plain text.
//! Asset-wrapper slots accept the wrapped asset or a builder for it; the wrapper
//! itself is added at build time. Primitives in parameter position also accept a
//! `TaggedTemplateValue`.
//!
//! [`TypeTransformer::transform_type_for_constraint`] renders the plain type for
//! generic constraints and defaults.

use itertools::Itertools;
use player_xlr::constants::{ASSET, ASSET_WRAPPER, BINDING, EXPRESSION};
use player_xlr::guards::is_builtin_type;
use player_xlr::{NodeType, ObjectNode, RefNode, extract_base_name};

use crate::constants::{BASE_BUILD_CONTEXT, FLUENT_BUILDER, FLUENT_PARTIAL, TAGGED_TEMPLATE_VALUE};
use crate::imports::ImportGenerator;
use crate::registry::TypeRegistry;
use crate::syntax::TypeExpr;

const ARRAY_TYPES: &[&str] = &["Array", "ReadonlyArray"];

/// Renders parameter types, recording every referenced name for import
pub struct TypeTransformer<'a> {
    registry: &'a TypeRegistry,
    imports:  &'a mut ImportGenerator,
}

fn builder_of(raw: &str) -> String { format!("{FLUENT_BUILDER}<{raw}, {BASE_BUILD_CONTEXT}>") }

fn partial_of(raw: &str) -> String { format!("{FLUENT_PARTIAL}<{raw}, {BASE_BUILD_CONTEXT}>") }

/// Primitives in parameter position also accept a template placeholder
fn widen(raw: &str, for_parameter: bool) -> String {
    if for_parameter {
        format!("{raw} | {TAGGED_TEMPLATE_VALUE}")
    } else {
        raw.to_string()
    }
}

/// Parenthesize a rendered union so it can sit inside an intersection or array
fn grouped(rendered: String) -> String {
    if rendered.contains(" | ") {
        format!("({rendered})")
    } else {
        rendered
    }
}

impl<'a> TypeTransformer<'a> {
    /// Transformer over `registry` tracking into `imports`
    pub const fn new(registry: &'a TypeRegistry, imports: &'a mut ImportGenerator) -> Self {
        Self { registry, imports }
    }

    /// Parameter type for `node`
    ///
    /// `for_parameter` is false in positions that cannot hold a template
    /// placeholder, such as record keys.
    pub fn transform_type(&mut self, node: &NodeType, for_parameter: bool) -> String {
        match node {
            NodeType::String(_)
            | NodeType::Number(_)
            | NodeType::Boolean(_)
            | NodeType::Template(_) => widen(&TypeExpr::from(node).to_string(), for_parameter),
            NodeType::Null(_)
            | NodeType::Undefined(_)
            | NodeType::Any(_)
            | NodeType::Unknown(_)
            | NodeType::Never(_)
            | NodeType::Void(_) => node.kind().to_string(),
            NodeType::Ref(reference) => self.reference(reference, for_parameter),
            NodeType::Object(object) => self.object(object, for_parameter),
            NodeType::Array(array) => {
                format!("Array<{}>", self.transform_type(&array.element_type, for_parameter))
            },
            NodeType::Tuple(tuple) => {
                let members = tuple
                    .element_types
                    .iter()
                    .map(|member| {
                        let marker = if member.optional { "?" } else { "" };
                        format!("{}{marker}", grouped(self.transform_type(&member.node, for_parameter)))
                    })
                    .join(", ");
                format!("[{members}]")
            },
            NodeType::Or(union) => union
                .members
                .iter()
                .map(|member| self.transform_type(member, for_parameter))
                .unique()
                .join(" | "),
            NodeType::And(intersection) => intersection
                .members
                .iter()
                .map(|member| grouped(self.transform_type(member, for_parameter)))
                .join(" & "),
            NodeType::Record(record) => {
                let key = self.transform_type(&record.key_type, false);
                let value = self.transform_type(&record.value_type, for_parameter);
                format!("Record<{key}, {value}>")
            },
            NodeType::Function(_) | NodeType::Conditional(_) => self.transform_type_for_constraint(node),
        }
    }

    /// Plain type text for generic constraints and defaults, no builder forms
    pub fn transform_type_for_constraint(&mut self, node: &NodeType) -> String {
        self.plain(TypeExpr::from(node))
    }

    fn plain(&mut self, expr: TypeExpr) -> String {
        for name in expr.referenced_names() {
            self.imports.track_referenced_type(name);
        }
        expr.to_string()
    }

    fn reference(&mut self, reference: &RefNode, for_parameter: bool) -> String {
        let base = extract_base_name(&reference.reference);

        if base == EXPRESSION || base == BINDING {
            return widen("string", for_parameter);
        }
        if base == ASSET_WRAPPER {
            let inner = self.wrapped_asset(reference);
            return [inner.clone(), builder_of(&inner)].join(" | ");
        }

        let raw = self.transform_type_for_constraint(&NodeType::Ref(reference.clone()));
        if self.imports.is_generic_param(base) || base == ASSET {
            return raw;
        }
        if is_builtin_type(base) {
            return match reference.generic_arguments.as_deref() {
                Some([element]) if ARRAY_TYPES.contains(&base) => {
                    format!("{base}<{}>", self.transform_type(element, for_parameter))
                },
                _ => raw,
            };
        }

        let registry = self.registry;
        if let Some(wrapper) = registry.asset_wrapper_base(base) {
            let inner = self.wrapped_asset(wrapper);
            return [
                inner.clone(),
                builder_of(&inner),
                raw.clone(),
                builder_of(&raw),
                partial_of(&raw),
            ]
            .into_iter()
            .unique()
            .join(" | ");
        }

        [raw.clone(), builder_of(&raw), partial_of(&raw)].join(" | ")
    }

    fn object(&mut self, object: &ObjectNode, for_parameter: bool) -> String {
        if let Some(name) = &object.annotations.name {
            let reference = RefNode {
                reference:         name.clone(),
                generic_arguments: None,
                property:          None,
                annotations:       object.annotations.clone(),
            };
            return self.reference(&reference, for_parameter);
        }

        let raw = self.plain(TypeExpr::object_literal(object));
        [raw.clone(), builder_of(&raw), partial_of(&raw)].join(" | ")
    }

    /// Inner asset type of an `AssetWrapper<...>` reference, `Asset` when bare
    fn wrapped_asset(&mut self, wrapper: &RefNode) -> String {
        match TypeExpr::from(wrapper) {
            TypeExpr::Reference(reference) if !reference.args.is_empty() => {
                let inner = reference.args.iter().join(", ");
                for arg in &reference.args {
                    for name in arg.referenced_names() {
                        self.imports.track_referenced_type(name);
                    }
                }
                inner
            },
            _ => {
                self.imports.track_referenced_type(ASSET);
                ASSET.to_string()
            },
        }
    }
}
