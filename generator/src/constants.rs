//! Generator-wide constants

// ============================================================================
// RECURSION LIMITS
// ============================================================================

/// Depth at which the type analyzer stops descending and returns a fallback
pub const DEFAULT_MAX_ANALYSIS_DEPTH: usize = 10;

/// Depth at which default synthesis returns `{}` for nested objects
pub const DEFAULT_MAX_DEFAULTS_DEPTH: usize = 3;

/// Nesting allowed while resolving utility-type arguments to object shapes
pub const MAX_UTILITY_EXPANSION_DEPTH: usize = 10;

// ============================================================================
// PACKAGES
// ============================================================================

/// Package exporting the framework's shared types
pub const DEFAULT_TYPES_PACKAGE: &str = "@player-ui/types";

/// Package exporting the fluent builder runtime
pub const DEFAULT_RUNTIME_PACKAGE: &str = "@player-tools/fluent";

/// Module the type under generation is imported from
pub const DEFAULT_TYPE_IMPORT_PATH: &str = "../types";

// ============================================================================
// RUNTIME SUPPORT NAMES
// ============================================================================

/// Builder interface every generated builder satisfies
pub const FLUENT_BUILDER: &str = "FluentBuilder";
/// Context passed to `build`
pub const BASE_BUILD_CONTEXT: &str = "BaseBuildContext";
/// Partial-value form accepting nested builders
pub const FLUENT_PARTIAL: &str = "FluentPartial";
/// Base class generated builders extend
pub const FLUENT_BUILDER_BASE: &str = "FluentBuilderBase";
/// Factory for the inspect hook
pub const CREATE_INSPECT_METHOD: &str = "createInspectMethod";
/// Placeholder for templated/deferred primitive values
pub const TAGGED_TEMPLATE_VALUE: &str = "TaggedTemplateValue";

// ============================================================================
// DEFAULTS
// ============================================================================

/// Property holding an asset's id
pub const ID_PROPERTY: &str = "id";
/// Property holding an asset's type discriminator
pub const TYPE_PROPERTY: &str = "type";
