//! Tuples become objects keyed by position: `[string, number]` has properties
//! `"0"` and `"1"`

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, TypeAnalyzer};
use crate::error::Result;
use crate::syntax::TypeExpr;

pub struct TupleStrategy;

impl AnalysisStrategy for TupleStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool { matches!(expr, TypeExpr::Tuple(_)) }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let TypeExpr::Tuple(elements) = request.expr else {
            return Ok(None);
        };

        let properties = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                analyzer.analyze(AnalysisRequest {
                    name:    index.to_string(),
                    expr:    &element.ty,
                    options: request.options.for_child(element.optional),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(PropertyInfo::with_properties(
            request.name.clone(),
            request.expr.to_string(),
            properties,
        )))
    }
}
