//! Analysis strategies
//!
//! Each strategy classifies one family of type expressions. Order matters: the
//! analyzer asks strategies in [`StrategyKind`] declaration order and the first
//! one whose `can_handle` accepts the expression wins. `Array<T>` is a reference
//! syntactically, so the array strategy must come before the reference strategy.

mod array;
mod intersection;
mod object;
mod primitive;
mod reference;
mod tuple;
mod union;

use array::ArrayStrategy;
use intersection::IntersectionStrategy;
use object::ObjectStrategy;
use primitive::PrimitiveStrategy;
use reference::ReferenceStrategy;
use strum::{AsRefStr, Display, EnumIter};
use tuple::TupleStrategy;
use union::UnionStrategy;

use super::{AnalysisRequest, PropertyInfo, TypeAnalyzer};
use crate::error::Result;
use crate::syntax::TypeExpr;

/// One family of type expressions the analyzer knows how to classify
pub trait AnalysisStrategy: Send + Sync {
    /// Whether this strategy claims the expression
    fn can_handle(&self, expr: &TypeExpr) -> bool;

    /// Classify the request's expression
    ///
    /// `Ok(None)` means the strategy declined after all; the analyzer then
    /// returns its terminal fallback. Child expressions are analyzed through
    /// `analyzer` so depth limits apply uniformly.
    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>>;
}

/// Registered strategies, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum StrategyKind {
    /// `T[]`, `Array<T>`
    Array,
    /// `[A, B]`
    Tuple,
    /// `A | B`
    Union,
    /// `A & B`
    Intersection,
    /// Keywords and literals
    Primitive,
    /// Object literal types
    Object,
    /// Named references
    Reference,
}

impl StrategyKind {
    /// Instance of the strategy
    pub fn strategy(self) -> Box<dyn AnalysisStrategy> {
        match self {
            Self::Array => Box::new(ArrayStrategy),
            Self::Tuple => Box::new(TupleStrategy),
            Self::Union => Box::new(UnionStrategy),
            Self::Intersection => Box::new(IntersectionStrategy),
            Self::Primitive => Box::new(PrimitiveStrategy),
            Self::Object => Box::new(ObjectStrategy),
            Self::Reference => Box::new(ReferenceStrategy),
        }
    }
}
