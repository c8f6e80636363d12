//! Fluent builder generation for Player XLR types
//!
//! Turns XLR object types into TypeScript builder classes with chainable `withX`
//! setters, default values and the asset-wrapper metadata the fluent runtime
//! needs to wrap nested assets.
//!
//! # Usage
//!
//! ```
//! use player_fluent_generator::BuilderGenerator;
//! use player_xlr::NamedType;
//!
//! let text = NamedType::from_json(
//!     r#"{ "name": "TextAsset", "source": "text.ts", "type": "object",
//!          "extends": { "type": "ref", "ref": "Asset<\"text\">" },
//!          "properties": { "value": { "required": true, "node": { "type": "string" } } } }"#,
//! )
//! .unwrap();
//!
//! let generated = BuilderGenerator::default()
//!     .with_types(std::slice::from_ref(&text))
//!     .generate(&text)
//!     .unwrap();
//! assert!(generated.code.contains("export class TextAssetBuilder"));
//! ```
//!
//! # Pipeline
//!
//! - [`analysis`]: structural classification of property types
//! - [`defaults`]: default values for required properties
//! - [`asset_paths`]: property paths that end at `AssetWrapper` slots
//! - [`transform`]: setter parameter types
//! - [`imports`]: import tracking and emission
//! - [`builder`]: orchestration and TypeScript output
//!
//! Supporting modules: [`syntax`] (type expressions), [`registry`] (named object
//! types), [`config`] and [`constants`].

pub mod analysis;
pub mod asset_paths;
pub mod builder;
pub mod config;
pub mod constants;
pub mod defaults;
mod error;
pub mod imports;
pub mod registry;
pub mod syntax;
pub mod transform;

pub use analysis::{AnalysisOptions, PropertyInfo, TypeAnalyzer};
pub use asset_paths::{AssetWrapperPath, AssetWrapperPathFinder};
pub use builder::{BuilderGenerator, GeneratedBuilder};
pub use config::{DefaultValueConfig, GeneratorConfig, ImportConfig};
pub use defaults::DefaultValueGenerator;
pub use error::{Error, Result};
pub use imports::{ImportGenerator, SourceResolver, TypeOrigin, TypeResolver};
pub use registry::TypeRegistry;
pub use syntax::TypeExpr;
pub use transform::TypeTransformer;
