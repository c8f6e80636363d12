//! Reserved type names

// ============================================================================
// RESERVED PLAYER PRIMITIVES
// ============================================================================

/// Base type of every renderable asset
pub const ASSET: &str = "Asset";
/// Slot marker wrapping a nested asset
pub const ASSET_WRAPPER: &str = "AssetWrapper";
/// Data-binding string
pub const BINDING: &str = "Binding";
/// Expression string
pub const EXPRESSION: &str = "Expression";

/// Framework primitives that are never imported from user code
pub const RESERVED_PRIMITIVES: &[&str] = &[ASSET, ASSET_WRAPPER, BINDING, EXPRESSION];

// ============================================================================
// TYPESCRIPT BUILT-INS
// ============================================================================

/// Language keywords and global/utility types that need no import
pub const TYPESCRIPT_BUILTINS: &[&str] = &[
    // keywords
    "any",
    "bigint",
    "boolean",
    "never",
    "null",
    "number",
    "object",
    "string",
    "symbol",
    "undefined",
    "unknown",
    "void",
    // global types
    "Array",
    "Date",
    "Error",
    "Function",
    "Map",
    "Object",
    "Promise",
    "ReadonlyArray",
    "RegExp",
    "Set",
    "WeakMap",
    "WeakSet",
    // utility types
    "Exclude",
    "Extract",
    "NonNullable",
    "Omit",
    "Parameters",
    "Partial",
    "Pick",
    "Readonly",
    "Record",
    "Required",
    "ReturnType",
];
