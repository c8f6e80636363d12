//! XLR type representation for Player
//!
//! XLR is the language-agnostic form type declarations are converted into before
//! any code generation happens. This crate reads XLR JSON and offers the
//! predicates the generator classifies nodes with.
//!
//! # Usage
//!
//! ```
//! use player_xlr::{NamedType, guards};
//!
//! let named = NamedType::from_json(
//!     r#"{ "name": "TextAsset", "source": "text.ts", "type": "object",
//!          "properties": { "value": { "required": true, "node": { "type": "string" } } } }"#,
//! )
//! .unwrap();
//!
//! let object = named.as_object().unwrap();
//! assert!(guards::is_string_type(&object.properties["value"].node));
//! ```
//!
//! # Modules
//!
//! - [`nodes`]: the node model and JSON entry points
//! - [`guards`]: `is_*` classification predicates
//! - [`names`]: base-name and namespace helpers for `ref` strings
//! - [`constants`]: reserved and built-in type names

pub mod constants;
mod error;
pub mod guards;
pub mod names;
pub mod nodes;

pub use error::{Error, Result};
pub use names::{NamespacedType, extract_base_name, parse_namespaced_type};
pub use nodes::{
    AdditionalItems, AndNode, Annotations, ArrayNode, ConditionalBranches, ConditionalCheck,
    ConditionalNode, FunctionNode, FunctionParameter, GenericToken, NamedType, NodeKind,
    NodeType, ObjectNode, ObjectProperty, OrNode, PrimitiveNode, RecordNode, RefNode,
    TemplateNode, TupleMember, TupleNode,
};
