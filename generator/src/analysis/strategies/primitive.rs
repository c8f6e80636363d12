//! Keywords and literal types
//!
//! A literal reports its keyword's type with the literal attached as
//! `const_value`: `"action"` analyzes to `string` with const `"action"`.

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, PropertyType, TypeAnalyzer};
use crate::error::Result;
use crate::syntax::TypeExpr;

pub struct PrimitiveStrategy;

impl AnalysisStrategy for PrimitiveStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool {
        matches!(expr, TypeExpr::Keyword(_) | TypeExpr::Literal(_))
    }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        _analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let info = match request.expr {
            TypeExpr::Keyword(keyword) => PropertyInfo::terminal(
                request.name.clone(),
                PropertyType::from(*keyword),
                keyword.to_string(),
            ),
            TypeExpr::Literal(literal) => {
                let keyword = literal.keyword();
                PropertyInfo::terminal(
                    request.name.clone(),
                    PropertyType::from(keyword),
                    keyword.to_string(),
                )
                .with_const(literal.to_value())
            },
            _ => return Ok(None),
        };
        Ok(Some(info))
    }
}
