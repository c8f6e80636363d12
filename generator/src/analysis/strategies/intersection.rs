//! Intersections: object-shaped parts are merged into one property list
//!
//! A later part's property replaces an earlier one of the same name but keeps
//! the earlier position. Parts that do not analyze to an object contribute
//! nothing; if no part does, the strategy declines.

use error_stack::Report;
use indexmap::IndexMap;

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, PropertyShape, TypeAnalyzer};
use crate::error::{Error, Result};
use crate::syntax::TypeExpr;

pub struct IntersectionStrategy;

impl AnalysisStrategy for IntersectionStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool { matches!(expr, TypeExpr::Intersection(_)) }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let TypeExpr::Intersection(parts) = request.expr else {
            return Ok(None);
        };
        if parts.is_empty() {
            return Err(Report::new(Error::failed_to(
                "analyze intersection",
                format!("'{}' has no members", request.name),
            )));
        }

        let mut merged: IndexMap<String, PropertyInfo> = IndexMap::new();
        let mut found_object = false;
        for part in parts {
            let info = analyzer.analyze(request.redirect(part, request.options.for_child(false)))?;
            if let PropertyShape::Properties(properties) = info.shape {
                found_object = true;
                for property in properties {
                    merged.insert(property.name.clone(), property);
                }
            }
        }

        if !found_object {
            return Ok(None);
        }
        Ok(Some(PropertyInfo::with_properties(
            request.name.clone(),
            request.expr.to_string(),
            merged.into_values().collect(),
        )))
    }
}
