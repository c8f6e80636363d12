//! Unions: every member is analyzed, unnamed, into `elements`

use error_stack::Report;

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, TypeAnalyzer};
use crate::error::{Error, Result};
use crate::syntax::TypeExpr;

pub struct UnionStrategy;

impl AnalysisStrategy for UnionStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool { matches!(expr, TypeExpr::Union(_)) }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let TypeExpr::Union(members) = request.expr else {
            return Ok(None);
        };
        if members.is_empty() {
            return Err(Report::new(Error::failed_to(
                "analyze union",
                format!("'{}' has no members", request.name),
            )));
        }

        let elements = members
            .iter()
            .map(|member| {
                analyzer.analyze(AnalysisRequest {
                    name:    String::new(),
                    expr:    member,
                    options: request.options.for_child(false),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(PropertyInfo::with_elements(
            request.name.clone(),
            request.expr.to_string(),
            elements,
        )))
    }
}
