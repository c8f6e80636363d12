//! TypeScript emission for one builder
//!
//! Layout of the emitted file:
//!
//! ```text
//! header comment
//! imports
//! interface <Name>BuilderMethods
//! class <Name>Builder extends FluentBuilderBase<Name>
//!   defaults, asset-wrapper paths, withX/addX methods, build, inspect
//! factory function
//! ```

use std::fmt::Write;

use crate::constants::{BASE_BUILD_CONTEXT, CREATE_INSPECT_METHOD, FLUENT_BUILDER, FLUENT_BUILDER_BASE, FLUENT_PARTIAL};

/// How a generated method stores its argument on the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterKind {
    /// Replace the value
    Set,
    /// Replace an asset slot, wrapping raw assets when asked
    Slot {
        /// Wrap raw assets in an `AssetWrapper`
        wrap_in_asset_wrapper: bool,
        /// The slot holds an array of assets
        is_array:              bool,
    },
    /// Push one element onto an array
    Append,
    /// Push one asset onto an array of slots
    AppendSlot {
        /// Wrap a raw asset in an `AssetWrapper`
        wrap_in_asset_wrapper: bool,
    },
}

impl SetterKind {
    /// Runtime call storing `value` under `property`
    pub fn call(self, property: &str) -> String {
        match self {
            Self::Set => format!("this.set(\"{property}\", value)"),
            Self::Slot {
                wrap_in_asset_wrapper,
                is_array,
            } => format!("this.setSlot(\"{property}\", value, {wrap_in_asset_wrapper}, {is_array})"),
            Self::Append => format!("this.append(\"{property}\", value)"),
            Self::AppendSlot {
                wrap_in_asset_wrapper,
            } => format!("this.appendSlot(\"{property}\", value, {wrap_in_asset_wrapper})"),
        }
    }
}

/// A rendered `withX` or `addX` method
#[derive(Debug, Clone)]
pub struct Setter {
    /// Method name
    pub method:      String,
    /// Property the setter writes
    pub property:    String,
    /// Parameter type
    pub param_type:  String,
    /// How the argument is stored
    pub kind:        SetterKind,
    /// Doc comment text
    pub description: Option<String>,
}

/// Everything the emitted file is assembled from
#[derive(Debug, Clone)]
pub struct BuilderTemplate {
    /// Name of the built type
    pub type_name:    String,
    /// Name of the builder class
    pub builder_name: String,
    /// Factory function name
    pub factory_name: String,
    /// `<T extends C = D, ...>`, empty when not generic
    pub generic_decl: String,
    /// `<T, ...>`, empty when not generic
    pub generic_args: String,
    /// Import statements
    pub imports:      String,
    /// JSON text of the defaults record
    pub defaults:     String,
    /// JSON text of the asset-wrapper paths, `None` when there are none
    pub asset_paths:  Option<String>,
    /// Setters in property order
    pub setters:      Vec<Setter>,
}

fn doc_comment(output: &mut String, indent: &str, description: Option<&str>) {
    let Some(description) = description else {
        return;
    };
    let _ = writeln!(output, "{indent}/**");
    for line in description.lines() {
        let _ = writeln!(output, "{indent} * {line}");
    }
    let _ = writeln!(output, "{indent} */");
}

impl BuilderTemplate {
    /// Assemble the file
    pub fn render(&self) -> String {
        let Self {
            type_name,
            builder_name,
            factory_name,
            generic_decl,
            generic_args,
            ..
        } = self;
        let built = format!("{type_name}{generic_args}");
        let builder = format!("{builder_name}{generic_args}");
        let mut output = String::new();

        output.push_str("/**\n");
        let _ = writeln!(output, " * Builder for {type_name}");
        output.push_str(" * Auto-generated by player-fluent-generator. Do not edit manually.\n");
        output.push_str(" */\n\n");

        output.push_str(&self.imports);
        output.push_str("\n\n");

        let _ = writeln!(output, "export interface {builder_name}Methods{generic_decl} {{");
        for setter in &self.setters {
            doc_comment(&mut output, "  ", setter.description.as_deref());
            let _ = writeln!(output, "  {}(value: {}): {builder};", setter.method, setter.param_type);
        }
        output.push_str("}\n\n");

        let _ = writeln!(
            output,
            "export class {builder_name}{generic_decl}\n  extends {FLUENT_BUILDER_BASE}<{built}>\n  \
             implements {builder_name}Methods{generic_args}, {FLUENT_BUILDER}<{built}, {BASE_BUILD_CONTEXT}>\n{{"
        );
        let _ = writeln!(
            output,
            "  private static readonly defaults: Record<string, unknown> = {};",
            self.defaults
        );
        if let Some(paths) = &self.asset_paths {
            let _ = writeln!(
                output,
                "  private static readonly __assetWrapperPaths__: ReadonlyArray<ReadonlyArray<string>> = {paths};"
            );
        }

        for setter in &self.setters {
            output.push('\n');
            doc_comment(&mut output, "  ", setter.description.as_deref());
            let _ = writeln!(output, "  {}(value: {}): {builder} {{", setter.method, setter.param_type);
            let _ = writeln!(output, "    return {};", setter.kind.call(&setter.property));
            output.push_str("  }\n");
        }

        let _ = writeln!(output, "\n  build(context?: {BASE_BUILD_CONTEXT}): {built} {{");
        let _ = writeln!(
            output,
            "    return this.buildWithDefaults({builder_name}.defaults, context);"
        );
        output.push_str("  }\n");

        let _ = writeln!(
            output,
            "\n  [Symbol.for(\"nodejs.util.inspect.custom\")] = {CREATE_INSPECT_METHOD}(\"{builder_name}\", \"{type_name}\");"
        );
        output.push_str("}\n\n");

        let _ = writeln!(
            output,
            "export function {factory_name}{generic_decl}(initial?: {FLUENT_PARTIAL}<{built}, {BASE_BUILD_CONTEXT}>): {builder} {{"
        );
        let _ = writeln!(output, "  return new {builder}(initial);");
        output.push_str("}\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> BuilderTemplate {
        BuilderTemplate {
            type_name:    "ActionAsset".to_string(),
            builder_name: "ActionAssetBuilder".to_string(),
            factory_name: "action".to_string(),
            generic_decl: "<AnyAsset extends Asset = Asset>".to_string(),
            generic_args: "<AnyAsset>".to_string(),
            imports:      "import type { ActionAsset } from \"../types\";".to_string(),
            defaults:     r#"{"type":"action","id":""}"#.to_string(),
            asset_paths:  Some(r#"[["label"]]"#.to_string()),
            setters:      vec![Setter {
                method:      "withLabel".to_string(),
                property:    "label".to_string(),
                param_type:  "AnyAsset | FluentBuilder<AnyAsset, BaseBuildContext>".to_string(),
                kind:        SetterKind::Slot {
                    wrap_in_asset_wrapper: true,
                    is_array:              false,
                },
                description: Some("Text shown\non the button".to_string()),
            }],
        }
    }

    #[test]
    fn test_render_contains_every_section_in_order() {
        let code = template().render();
        let markers = [
            "import type { ActionAsset }",
            "export interface ActionAssetBuilderMethods<AnyAsset extends Asset = Asset> {",
            "export class ActionAssetBuilder<AnyAsset extends Asset = Asset>",
            "extends FluentBuilderBase<ActionAsset<AnyAsset>>",
            r#"private static readonly defaults: Record<string, unknown> = {"type":"action","id":""};"#,
            r#"__assetWrapperPaths__: ReadonlyArray<ReadonlyArray<string>> = [["label"]];"#,
            "withLabel(value: AnyAsset | FluentBuilder<AnyAsset, BaseBuildContext>): ActionAssetBuilder<AnyAsset> {",
            "return this.setSlot(\"label\", value, true, false);",
            "build(context?: BaseBuildContext): ActionAsset<AnyAsset> {",
            "createInspectMethod(\"ActionAssetBuilder\", \"ActionAsset\")",
            "export function action<AnyAsset extends Asset = Asset>(",
        ];
        let mut from = 0;
        for marker in markers {
            let position = code[from..].find(marker).map(|offset| from + offset);
            assert!(position.is_some(), "missing or out of order: {marker}\n{code}");
            from = position.unwrap_or(from);
        }
        assert!(code.contains("   * on the button"));
    }

    #[test]
    fn test_setter_kinds_render_runtime_calls() {
        assert_eq!(SetterKind::Set.call("value"), "this.set(\"value\", value)");
        assert_eq!(SetterKind::Append.call("tags"), "this.append(\"tags\", value)");
        assert_eq!(
            SetterKind::Slot {
                wrap_in_asset_wrapper: true,
                is_array:              true,
            }
            .call("values"),
            "this.setSlot(\"values\", value, true, true)"
        );
        assert_eq!(
            SetterKind::AppendSlot {
                wrap_in_asset_wrapper: false,
            }
            .call("values"),
            "this.appendSlot(\"values\", value, false)"
        );
    }

    #[test]
    fn test_paths_constant_is_omitted_when_empty() {
        let code = BuilderTemplate {
            asset_paths: None,
            ..template()
        }
        .render();
        assert!(!code.contains("__assetWrapperPaths__"));
    }
}
