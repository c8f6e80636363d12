//! Object literal types

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, TypeAnalyzer};
use crate::error::Result;
use crate::syntax::TypeExpr;

pub struct ObjectStrategy;

impl AnalysisStrategy for ObjectStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool { matches!(expr, TypeExpr::Object(_)) }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let TypeExpr::Object(signatures) = request.expr else {
            return Ok(None);
        };

        let properties = signatures
            .iter()
            .map(|signature| {
                analyzer.analyze(AnalysisRequest {
                    name:    signature.name.clone(),
                    expr:    &signature.ty,
                    options: request.options.for_child(signature.optional),
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
