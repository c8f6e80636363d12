//! `T[]`, `Array<T>` and `ReadonlyArray<T>`
//!
//! The element is analyzed under the property's own name and the result is
//! flagged as an array, so `tags: string[]` reports as a `string` terminal with
//! `is_array` set rather than as a wrapper node.

use error_stack::Report;

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, TypeAnalyzer};
use crate::error::{Error, Result};
use crate::syntax::TypeExpr;

const ARRAY_REFERENCES: &[&str] = &["Array", "ReadonlyArray"];

pub struct ArrayStrategy;

impl AnalysisStrategy for ArrayStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool {
        match expr {
            TypeExpr::Array(_) => true,
            TypeExpr::Reference(reference) => {
                reference.property.is_none() && ARRAY_REFERENCES.contains(&reference.name.as_str())
            },
            _ => false,
        }
    }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let element = match request.expr {
            TypeExpr::Array(element) => element.as_ref(),
            TypeExpr::Reference(reference) => match reference.args.as_slice() {
                [element] => element,
                args => {
                    return Err(Report::new(Error::failed_to(
                        "analyze array type",
                        format!("'{}' takes 1 type argument, found {}", reference.name, args.len()),
                    )));
                },
            },
            _ => return Ok(None),
        };

        let element_request = request.redirect(element, request.options.for_array_element());
        Ok(Some(analyzer.analyze(element_request)?.into_array()))
    }
}
