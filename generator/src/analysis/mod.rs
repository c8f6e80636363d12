//! Type analysis
//!
//! Classifies a [`TypeExpr`] into a [`PropertyInfo`] tree. The [`TypeAnalyzer`]
//! holds an ordered list of strategies and hands each expression to the first
//! one whose `can_handle` accepts it:
//!
//! | order | strategy     | handles                                  |
//! |-------|--------------|------------------------------------------|
//! | 1     | Array        | `T[]`, `Array<T>`, `ReadonlyArray<T>`    |
//! | 2     | Tuple        | `[A, B]`                                 |
//! | 3     | Union        | `A \| B`                                 |
//! | 4     | Intersection | `A & B`                                  |
//! | 5     | Primitive    | keywords and literals                    |
//! | 6     | Object       | object literal types                     |
//! | 7     | Reference    | named types, generics, utility types     |
//!
//! Recursion state lives in [`AnalysisOptions`] and is passed by value through
//! every call, so independent analyses never share counters.

mod analyzer;
mod property_info;
mod strategies;
mod utility_types;

use std::sync::Arc;

pub use analyzer::TypeAnalyzer;
pub use property_info::{PropertyInfo, PropertyKind, PropertyShape, PropertyType};
pub use strategies::{AnalysisStrategy, StrategyKind};
pub use utility_types::{UtilityType, UtilityTypeRegistry};

use crate::constants::DEFAULT_MAX_ANALYSIS_DEPTH;
use crate::syntax::{GenericContext, TypeExpr};

/// Number of recursive descents taken so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisDepth(usize);

impl AnalysisDepth {
    /// Depth of a top-level request
    pub const ZERO: Self = Self(0);

    /// Depth at an explicit level
    pub const fn new(depth: usize) -> Self { Self(depth) }

    /// One level deeper
    #[must_use]
    pub const fn increment(self) -> Self { Self(self.0 + 1) }

    /// Whether analysis at this depth must stop descending
    pub const fn exceeds_limit(self, max_depth: usize) -> bool { self.0 >= max_depth }

    /// Raw depth value
    pub const fn get(self) -> usize { self.0 }
}

/// Options threaded through every recursive analysis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Current recursion depth
    pub current_depth:   AnalysisDepth,
    /// Depth at which a terminal fallback is returned
    pub max_depth:       usize,
    /// Whether the property being analyzed is optional
    pub is_optional:     bool,
    /// Whether the type being analyzed is an array element
    pub is_array:        bool,
    /// Bindings for generic symbols in scope
    pub generic_context: Option<Arc<GenericContext>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self { Self::with_max_depth(DEFAULT_MAX_ANALYSIS_DEPTH) }
}

impl AnalysisOptions {
    /// Top-level options with a custom depth limit
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self {
            current_depth: AnalysisDepth::ZERO,
            max_depth,
            is_optional: false,
            is_array: false,
            generic_context: None,
        }
    }

    /// Same options one level deeper
    #[must_use]
    pub fn descend(&self) -> Self {
        Self {
            current_depth: self.current_depth.increment(),
            ..self.clone()
        }
    }

    /// Options for a named child (object property, tuple slot, union member)
    #[must_use]
    pub fn for_child(&self, is_optional: bool) -> Self {
        Self {
            is_optional,
            is_array: false,
            ..self.clone()
        }
    }

    /// Options for the element type of an array
    #[must_use]
    pub fn for_array_element(&self) -> Self {
        Self {
            is_array: true,
            ..self.clone()
        }
    }

    /// Options with a fresh generic scope
    #[must_use]
    pub fn with_generic_context(&self, context: GenericContext) -> Self {
        Self {
            generic_context: Some(Arc::new(context)),
            ..self.clone()
        }
    }
}

/// A single analysis call: which type, under which property name, with which options
#[derive(Debug, Clone)]
pub struct AnalysisRequest<'a> {
    /// Property name the result is reported under
    pub name:    String,
    /// Expression to classify
    pub expr:    &'a TypeExpr,
    /// Recursion state
    pub options: AnalysisOptions,
}

impl<'a> AnalysisRequest<'a> {
    /// Top-level request with default options
    pub fn new(name: impl Into<String>, expr: &'a TypeExpr) -> Self {
        Self {
            name: name.into(),
            expr,
            options: AnalysisOptions::default(),
        }
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(self, options: AnalysisOptions) -> Self { Self { options, ..self } }

    /// Request for another expression reported under the same name
    pub fn redirect<'b>(&self, expr: &'b TypeExpr, options: AnalysisOptions) -> AnalysisRequest<'b> {
        AnalysisRequest {
            name: self.name.clone(),
            expr,
            options,
        }
    }

    /// Terminal result used when analysis stops: the type's text as an opaque string
    pub fn fallback(&self) -> PropertyInfo {
        PropertyInfo::terminal(self.name.clone(), PropertyType::String, self.expr.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_limit() {
        let depth = AnalysisDepth::new(9);
        assert!(!depth.exceeds_limit(10));
        assert!(depth.increment().exceeds_limit(10));
        assert_eq!(AnalysisDepth::ZERO.increment().get(), 1);
    }

    #[test]
    fn test_options_derivation_keeps_depth_and_context() {
        let options = AnalysisOptions::default()
            .with_generic_context(GenericContext::new())
            .descend();

        let child = options.for_array_element().for_child(true);
        assert_eq!(child.current_depth, AnalysisDepth::new(1));
        assert!(child.is_optional);
        assert!(!child.is_array);
        assert!(child.generic_context.is_some());
        assert_eq!(child.max_depth, DEFAULT_MAX_ANALYSIS_DEPTH);
    }
}
