//! Strategy dispatch

use strum::IntoEnumIterator;
use tracing::trace;

use super::{
    AnalysisOptions, AnalysisRequest, AnalysisStrategy, PropertyInfo, StrategyKind,
    UtilityTypeRegistry,
};
use crate::constants::DEFAULT_MAX_ANALYSIS_DEPTH;
use crate::error::Result;
use crate::syntax::{Declarations, TypeExpr};

/// Classifies type expressions by delegating to the first matching strategy
pub struct TypeAnalyzer {
    strategies:    Vec<(StrategyKind, Box<dyn AnalysisStrategy>)>,
    declarations:  Declarations,
    utility_types: UtilityTypeRegistry,
    max_depth:     usize,
}

impl Default for TypeAnalyzer {
    fn default() -> Self { Self::new(Declarations::new()) }
}

impl TypeAnalyzer {
    /// Analyzer resolving references against `declarations`
    pub fn new(declarations: Declarations) -> Self {
        Self {
            strategies: StrategyKind::iter()
                .map(|kind| (kind, kind.strategy()))
                .collect(),
            declarations,
            utility_types: UtilityTypeRegistry,
            max_depth: DEFAULT_MAX_ANALYSIS_DEPTH,
        }
    }

    /// Override the recursion limit
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self { Self { max_depth, ..self } }

    /// Declarations references resolve against
    pub const fn declarations(&self) -> &Declarations { &self.declarations }

    /// Utility type expansion
    pub const fn utility_types(&self) -> UtilityTypeRegistry { self.utility_types }

    /// Strategy kinds in dispatch order
    pub fn strategy_order(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|(kind, _)| *kind).collect()
    }

    /// Strategy that would handle `expr`
    pub fn strategy_for(&self, expr: &TypeExpr) -> Option<StrategyKind> {
        self.strategies
            .iter()
            .find(|(_, strategy)| strategy.can_handle(expr))
            .map(|(kind, _)| *kind)
    }

    /// Analyze a top-level type reported under `name`
    pub fn analyze_type(&self, name: &str, expr: &TypeExpr) -> Result<PropertyInfo> {
        self.analyze(
            AnalysisRequest::new(name, expr).with_options(AnalysisOptions::with_max_depth(self.max_depth)),
        )
    }

    /// Analyze one request
    ///
    /// At the depth limit, or when no strategy applies or the chosen one
    /// declines, the result is the request's terminal fallback. Strategy errors
    /// propagate unchanged.
    pub fn analyze(&self, request: AnalysisRequest<'_>) -> Result<PropertyInfo> {
        let options = &request.options;
        if options.current_depth.exceeds_limit(options.max_depth) {
            trace!(
                name = %request.name,
                depth = options.current_depth.get(),
                "Analysis depth limit reached, using fallback"
            );
            return Ok(request.fallback().optional(options.is_optional));
        }

        let Some((kind, strategy)) = self
            .strategies
            .iter()
            .find(|(_, strategy)| strategy.can_handle(request.expr))
        else {
            trace!(name = %request.name, expr = %request.expr, "No strategy applies, using fallback");
            return Ok(request.fallback().optional(options.is_optional));
        };

        trace!(name = %request.name, strategy = %kind, "Dispatching analysis");
        let dispatched = request.redirect(request.expr, options.descend());
        let info = match strategy.analyze(&dispatched, self)? {
            Some(info) => info,
            None => {
                trace!(name = %request.name, strategy = %kind, "Strategy declined, using fallback");
                request.fallback()
            },
        };
        Ok(info.optional(options.is_optional))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::analysis::{PropertyKind, PropertyType};

    fn analyze(text: &str) -> PropertyInfo {
        TypeAnalyzer::default()
            .analyze_type("value", &TypeExpr::parse(text).unwrap())
            .unwrap()
    }

    #[test]
    fn test_string_array_is_flagged_terminal() {
        let info = analyze("string[]");
        assert_eq!(info.kind(), PropertyKind::Terminal);
        assert_eq!(info.property_type, PropertyType::String);
        assert_eq!(info.type_as_string, "string");
        assert!(info.is_array);

        let generic = analyze("Array<number>");
        assert_eq!(generic.property_type, PropertyType::Number);
        assert!(generic.is_array);
    }

    #[test]
    fn test_tuple_becomes_indexed_object() {
        let info = analyze("[string, number]");
        assert_eq!(info.kind(), PropertyKind::NonTerminal);
        assert_eq!(info.property_type, PropertyType::Object);

        let names: Vec<&str> = info.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["0", "1"]);
        assert_eq!(info.properties()[0].property_type, PropertyType::String);
        assert_eq!(info.properties()[1].property_type, PropertyType::Number);
    }

    #[test]
    fn test_union_elements_are_unnamed() {
        let info = analyze(r#""a" | number | null"#);
        assert_eq!(info.property_type, PropertyType::Union);
        assert_eq!(info.elements().len(), 3);
        assert!(info.elements().iter().all(|element| element.name.is_empty()));
        assert_eq!(info.elements()[0].const_value, Some(json!("a")));
        assert_eq!(info.elements()[2].property_type, PropertyType::Null);
    }

    #[test]
    fn test_intersection_merges_and_later_wins() {
        let info = analyze("{ a: string; b: number } & { b: boolean; c?: null }");
        let summary: Vec<(&str, PropertyType)> = info
            .properties()
            .iter()
            .map(|p| (p.name.as_str(), p.property_type))
            .collect();
        assert_eq!(
            summary,
            [
                ("a", PropertyType::String),
                ("b", PropertyType::Boolean),
                ("c", PropertyType::Null),
            ]
        );
        assert!(info.property("c").unwrap().is_optional);
    }

    #[test]
    fn test_intersection_without_objects_falls_back() {
        let info = analyze("string & number");
        assert_eq!(info.kind(), PropertyKind::Terminal);
        assert_eq!(info.property_type, PropertyType::String);
        assert_eq!(info.type_as_string, "string & number");
    }

    #[test]
    fn test_negative_literal_keeps_const() {
        let info = analyze("-5");
        assert_eq!(info.property_type, PropertyType::Number);
        assert_eq!(info.const_value, Some(json!(-5)));
    }

    #[test]
    fn test_generic_binding_and_declarations() {
        let mut declarations = Declarations::new();
        declarations
            .declare("Boxed", Some("T = boolean"), "{ value: T; items?: T[] }")
            .unwrap();
        let analyzer = TypeAnalyzer::new(declarations);

        let info = analyzer
            .analyze_type("box", &TypeExpr::parse("Boxed<string>").unwrap())
            .unwrap();
        assert_eq!(info.type_as_string, "Boxed<string>");
        assert_eq!(info.property("value").unwrap().property_type, PropertyType::String);
        let items = info.property("items").unwrap();
        assert!(items.is_array);
        assert!(items.is_optional);

        let defaulted = analyzer
            .analyze_type("box", &TypeExpr::parse("Boxed").unwrap())
            .unwrap();
        assert_eq!(defaulted.property("value").unwrap().property_type, PropertyType::Boolean);
    }

    #[test]
    fn test_utility_types_expand_before_analysis() {
        let mut declarations = Declarations::new();
        declarations
            .declare("Base", None, "{ id: string; count: number }")
            .unwrap();
        let analyzer = TypeAnalyzer::new(declarations);

        let info = analyzer
            .analyze_type("patch", &TypeExpr::parse("Partial<Base>").unwrap())
            .unwrap();
        assert_eq!(info.type_as_string, "Partial<Base>");
        assert!(info.properties().iter().all(|p| p.is_optional));
    }

    #[test]
    fn test_unknown_reference_is_opaque_object() {
        let info = analyze("Validation.Reference");
        assert_eq!(info.kind(), PropertyKind::Terminal);
        assert_eq!(info.property_type, PropertyType::Object);
        assert_eq!(info.type_as_string, "Validation.Reference");
    }

    #[test]
    fn test_self_reference_terminates_at_depth_limit() {
        let mut declarations = Declarations::new();
        declarations
            .declare("Node", None, "{ label: string; next?: Node }")
            .unwrap();
        let analyzer = TypeAnalyzer::new(declarations).with_max_depth(6);

        let mut info = analyzer
            .analyze_type("node", &TypeExpr::reference("Node"))
            .unwrap();
        let mut levels = 0;
        while let Some(next) = info.property("next").cloned() {
            info = next;
            levels += 1;
        }
        assert!(levels > 0);
        assert_eq!(info.kind(), PropertyKind::Terminal);
        assert_eq!(info.property_type, PropertyType::String);
        assert_eq!(info.type_as_string, "Node");
    }

    #[test]
    fn test_request_at_limit_skips_strategies() {
        let expr = TypeExpr::parse("{ a: string; b: number[] }").unwrap();
        let options = AnalysisOptions {
            current_depth: crate::analysis::AnalysisDepth::new(10),
            ..AnalysisOptions::with_max_depth(10)
        };
        let info = TypeAnalyzer::default()
            .analyze(AnalysisRequest::new("deep", &expr).with_options(options))
            .unwrap();

        assert_eq!(info.kind(), PropertyKind::Terminal);
        assert_eq!(info.name, "deep");
        assert_eq!(info.type_as_string, "{ a: string; b: number[] }");
        assert!(info.properties().is_empty());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = TypeAnalyzer::default();
        let expr = TypeExpr::parse("{ a: [string, number?]; b: (\"x\" | null)[] }").unwrap();
        let first = analyzer.analyze_type("root", &expr).unwrap();
        let second = analyzer.analyze_type("root", &expr).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strategy_precedence() {
        let analyzer = TypeAnalyzer::default();
        assert_eq!(
            analyzer.strategy_order(),
            [
                StrategyKind::Array,
                StrategyKind::Tuple,
                StrategyKind::Union,
                StrategyKind::Intersection,
                StrategyKind::Primitive,
                StrategyKind::Object,
                StrategyKind::Reference,
            ]
        );
        let array_ref = TypeExpr::parse("Array<string>").unwrap();
        assert_eq!(analyzer.strategy_for(&array_ref), Some(StrategyKind::Array));
        assert_eq!(
            analyzer.strategy_for(&TypeExpr::reference("Foo")),
            Some(StrategyKind::Reference)
        );
        let function = TypeExpr::Function(crate::syntax::FunctionSignature {
            params:  Vec::new(),
            returns: Box::new(TypeExpr::reference("Foo")),
        });
        assert_eq!(analyzer.strategy_for(&function), None);
    }

    #[test]
    fn test_array_reference_with_wrong_arity_is_an_error() {
        let expr = TypeExpr::Reference(crate::syntax::TypeReference::new(
            "Array",
            vec![TypeExpr::reference("A"), TypeExpr::reference("B")],
        ));
        assert!(TypeAnalyzer::default().analyze_type("bad", &expr).is_err());
    }
}
