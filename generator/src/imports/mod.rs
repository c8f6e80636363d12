//! Import tracking
//!
//! Every type name the transformer emits passes through
//! [`ImportGenerator::track_referenced_type`], which files it into exactly one
//! bucket:
//!
//! - generic parameters of the type being generated: never imported
//! - `Asset`: its own conditional statement
//! - built-ins (`string`, `Array`, `Record`, `AssetWrapper`, ...): never imported
//! - `Ns.Member`: the namespace, from its configured or the fallback package
//! - configured external types: their package
//! - everything else: the resolver's verdict, or the manual configuration
//!
//! Relative modules from the resolver are anchored at the main type's module,
//! so they are re-joined onto the directory of `typeImportPath`.
//!
//! Buckets keep insertion order so the emitted statements are stable.

mod resolver;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use player_xlr::constants::ASSET;
use player_xlr::guards::is_builtin_type;
use player_xlr::{extract_base_name, parse_namespaced_type};
use resolver::rebase_module;
pub use resolver::{SourceResolver, TypeOrigin, TypeResolver};
use tracing::{trace, warn};

use crate::config::ImportConfig;
use crate::constants::{
    BASE_BUILD_CONTEXT, CREATE_INSPECT_METHOD, FLUENT_BUILDER, FLUENT_BUILDER_BASE,
    FLUENT_PARTIAL, TAGGED_TEMPLATE_VALUE,
};

/// Caller-supplied module path for a type name, used when no resolver is set
pub type ModulePathFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Collects referenced types for one generated builder and renders its imports
pub struct ImportGenerator {
    config:         ImportConfig,
    resolver:       Option<Arc<dyn TypeResolver>>,
    module_path:    Option<ModulePathFn>,
    current_type:   String,
    generic_params: IndexSet<String>,
    same_file:      IndexSet<String>,
    external:       IndexMap<String, IndexSet<String>>,
    unresolved:     IndexSet<String>,
    uses_asset:     bool,
}

impl ImportGenerator {
    /// Tracker for the builder of `current_type`
    pub fn new(config: ImportConfig, current_type: impl Into<String>) -> Self {
        Self {
            config,
            resolver: None,
            module_path: None,
            current_type: current_type.into(),
            generic_params: IndexSet::new(),
            same_file: IndexSet::new(),
            external: IndexMap::new(),
            unresolved: IndexSet::new(),
            uses_asset: false,
        }
    }

    /// Resolve plain names through `resolver`
    #[must_use]
    pub fn with_resolver(self, resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            resolver: Some(resolver),
            ..self
        }
    }

    /// Route names not listed in `sameFileTypes` through `module_path`
    #[must_use]
    pub fn with_module_path(self, module_path: ModulePathFn) -> Self {
        Self {
            module_path: Some(module_path),
            ..self
        }
    }

    /// Generic parameter symbols of the type being generated
    #[must_use]
    pub fn with_generic_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Name of the type being generated
    pub fn current_type(&self) -> &str { &self.current_type }

    /// Whether `name` is a generic parameter of the type being generated
    pub fn is_generic_param(&self, name: &str) -> bool {
        self.generic_params.contains(extract_base_name(name))
    }

    /// File a referenced type into its import bucket
    pub fn track_referenced_type(&mut self, name: &str) {
        let base = extract_base_name(name);
        if base.is_empty() || base == self.current_type || self.generic_params.contains(base) {
            return;
        }
        if base == ASSET {
            self.uses_asset = true;
            return;
        }
        if is_builtin_type(base) {
            return;
        }
        if let Some(namespaced) = parse_namespaced_type(base) {
            self.track_namespace_import(namespaced.namespace);
            return;
        }
        if let Some(package) = self.config.external_types.get(base).cloned() {
            self.add_external(package, base);
            return;
        }

        if let Some(resolver) = &self.resolver {
            match resolver.resolve(base, &self.current_type) {
                TypeOrigin::SameFile => {
                    self.same_file.insert(base.to_string());
                },
                TypeOrigin::Exported { module } => {
                    let module = rebase_module(&self.config.type_import_path, &module);
                    self.add_external(module, base);
                },
                TypeOrigin::NotFound => {
                    if self.unresolved.insert(base.to_string()) {
                        warn!(
                            type_name = %base,
                            current_type = %self.current_type,
                            "Could not resolve import for referenced type"
                        );
                    }
                },
            }
            return;
        }

        if self.config.same_file_types.contains(base) {
            self.same_file.insert(base.to_string());
        } else if let Some(module) = self.module_path.as_ref().and_then(|module_path| module_path(base)) {
            self.add_external(module, base);
        } else {
            self.same_file.insert(base.to_string());
        }
    }

    /// Import a namespace from its configured package, or the fallback package
    pub fn track_namespace_import(&mut self, namespace: &str) {
        let package = self
            .config
            .external_types
            .get(namespace)
            .unwrap_or(&self.config.namespace_fallback_package)
            .clone();
        self.add_external(package, namespace);
    }

    fn add_external(&mut self, package: String, name: &str) {
        trace!(type_name = %name, package = %package, "Tracking external import");
        self.external
            .entry(package)
            .or_default()
            .insert(name.to_string());
    }

    /// Types imported alongside the main type
    pub const fn same_file_types(&self) -> &IndexSet<String> { &self.same_file }

    /// Package to imported names
    pub const fn external_imports(&self) -> &IndexMap<String, IndexSet<String>> { &self.external }

    /// Whether `Asset` was referenced
    pub const fn uses_asset(&self) -> bool { self.uses_asset }

    /// Names the resolver could not find
    pub fn unresolved_types(&self) -> Vec<String> { self.unresolved.iter().cloned().collect() }

    /// Import statements, one per line
    pub fn generate_imports(&self, main_type: &str) -> String {
        let mut lines = Vec::new();

        let local = std::iter::once(main_type)
            .chain(self.same_file.iter().map(String::as_str))
            .unique()
            .join(", ");
        lines.push(format!(
            "import type {{ {local} }} from \"{}\";",
            self.config.type_import_path
        ));

        for (package, names) in &self.external {
            lines.push(format!(
                "import type {{ {} }} from \"{package}\";",
                names.iter().join(", ")
            ));
        }

        if self.uses_asset {
            lines.push(format!(
                "import type {{ {ASSET} }} from \"{}\";",
                self.config.types_package
            ));
        }

        lines.push(format!(
            "import {{ type {FLUENT_BUILDER}, type {BASE_BUILD_CONTEXT}, type {FLUENT_PARTIAL}, \
             {FLUENT_BUILDER_BASE}, {CREATE_INSPECT_METHOD}, type {TAGGED_TEMPLATE_VALUE} }} from \"{}\";",
            self.config.runtime_package
        ));

        lines.join("\n")
    }
}
