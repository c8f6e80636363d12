//! Named references
//!
//! Resolution order:
//! 1. a bare generic symbol bound in the current scope analyzes as its binding
//! 2. a utility type (`Partial`, `Pick`, ...) is expanded and the expansion analyzed
//! 3. a known declaration has its generics bound and its body analyzed in a new scope
//! 4. anything else is an opaque `object` terminal
//!
//! Results of 2 and 3 report the reference text as `type_as_string`, so
//! `ListItem<TextAsset>` keeps its name instead of the expanded body.

use tracing::debug;

use super::AnalysisStrategy;
use crate::analysis::{AnalysisRequest, PropertyInfo, PropertyType, TypeAnalyzer};
use crate::error::Result;
use crate::syntax::{TypeExpr, bind_generics};

pub struct ReferenceStrategy;

impl AnalysisStrategy for ReferenceStrategy {
    fn can_handle(&self, expr: &TypeExpr) -> bool { matches!(expr, TypeExpr::Reference(_)) }

    fn analyze(
        &self,
        request: &AnalysisRequest<'_>,
        analyzer: &TypeAnalyzer,
    ) -> Result<Option<PropertyInfo>> {
        let TypeExpr::Reference(reference) = request.expr else {
            return Ok(None);
        };
        let context = request.options.generic_context.as_deref();
        let text = request.expr.to_string();

        if reference.property.is_some() {
            return Ok(Some(opaque(request, text)));
        }

        if reference.args.is_empty()
            && let Some(bound) = context.and_then(|bindings| bindings.get(&reference.name))
        {
            return analyzer
                .analyze(request.redirect(bound, request.options.clone()))
                .map(Some);
        }

        let args: Vec<TypeExpr> = match context {
            Some(bindings) => reference.args.iter().map(|arg| arg.substitute(bindings)).collect(),
            None => reference.args.clone(),
        };

        let utility_types = analyzer.utility_types();
        if utility_types.is_utility_type(&reference.name) {
            let Some(expanded) =
                utility_types.expand(&reference.name, &args, analyzer.declarations())
            else {
                debug!(reference = %text, "Utility type could not be expanded, treating as opaque");
                return Ok(Some(opaque(request, text)));
            };
            return analyzer
                .analyze(request.redirect(&expanded, request.options.clone()))
                .map(|info| Some(info.with_type_as_string(text)));
        }

        if let Some(declaration) = analyzer.declarations().get(&reference.name) {
            let bindings = bind_generics(&declaration.params, &args);
            let options = request.options.with_generic_context(bindings);
            return analyzer
                .analyze(request.redirect(&declaration.body, options))
                .map(|info| Some(info.with_type_as_string(text)));
        }

        debug!(reference = %text, "Unresolved type reference, treating as opaque");
        Ok(Some(opaque(request, text)))
    }
}

fn opaque(request: &AnalysisRequest<'_>, text: String) -> PropertyInfo {
    PropertyInfo::terminal(request.name.clone(), PropertyType::Object, text)
}
