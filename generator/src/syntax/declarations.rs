//! Type declarations the reference strategy resolves names against

use error_stack::ResultExt;
use indexmap::IndexMap;
use player_xlr::{NamedType, NodeType};

use super::{GenericParam, TypeExpr, parse_generic_params};
use crate::error::{Error, Result};

/// A declared type: generic parameters plus body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Generic parameters in declaration order
    pub params: Vec<GenericParam>,
    /// Declared body
    pub body:   TypeExpr,
}

impl From<&NamedType> for Declaration {
    fn from(named: &NamedType) -> Self {
        let body = match &named.node {
            NodeType::Object(object) => TypeExpr::object_literal(object),
            other => TypeExpr::from(other),
        };
        Self {
            params: named
                .generic_tokens
                .iter()
                .flatten()
                .map(GenericParam::from)
                .collect(),
            body,
        }
    }
}

/// Name to declaration lookup
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    entries: IndexMap<String, Declaration>,
}

impl Declarations {
    /// Empty declaration set
    pub fn new() -> Self { Self::default() }

    /// Declarations for every named type given
    pub fn from_named_types<'a>(types: impl IntoIterator<Item = &'a NamedType>) -> Self {
        let mut declarations = Self::new();
        for named in types {
            declarations.insert(named.name.clone(), Declaration::from(named));
        }
        declarations
    }

    /// Parse and add a declaration from source text
    ///
    /// `params` is the text between the angle brackets of the declaration, if any.
    pub fn declare(&mut self, name: &str, params: Option<&str>, body: &str) -> Result<()> {
        let params = params
            .map(parse_generic_params)
            .transpose()
            .attach(format!("Declaration: {name}"))?
            .unwrap_or_default();
        let body = TypeExpr::parse(body)
            .change_context(Error::syntax(body, format!("body of '{name}' is not a type")))?;
        self.insert(name.to_string(), Declaration { params, body });
        Ok(())
    }

    /// Add or replace a declaration
    pub fn insert(&mut self, name: String, declaration: Declaration) {
        self.entries.insert(name, declaration);
    }

    /// Look up a declaration by name
    pub fn get(&self, name: &str) -> Option<&Declaration> { self.entries.get(name) }

    /// Whether `name` is declared
    pub fn contains(&self, name: &str) -> bool { self.entries.contains_key(name) }

    /// Number of declarations
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether no declarations are present
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_declare_parses_params_and_body() {
        let mut declarations = Declarations::new();
        declarations
            .declare("Wrapper", Some("T extends object = {}"), "{ value: T; list?: T[] }")
            .unwrap();

        let declaration = declarations.get("Wrapper").unwrap();
        assert_eq!(declaration.params[0].symbol, "T");
        assert_eq!(declaration.body.to_string(), "{ value: T; list?: T[] }");
        assert!(declarations.contains("Wrapper"));
        assert_eq!(declarations.len(), 1);
    }

    #[test]
    fn test_declare_rejects_bad_body() {
        let mut declarations = Declarations::new();
        let report = declarations.declare("Broken", None, "{ value: }").unwrap_err();
        assert!(matches!(report.current_context(), Error::Syntax { .. }));
        assert!(declarations.is_empty());
    }

    #[test]
    fn test_from_named_types_uses_object_bodies() {
        let named = NamedType::from_value(json!({
            "name": "ListItem",
            "source": "list.ts",
            "type": "object",
            "genericTokens": [{ "symbol": "AnyAsset", "default": { "type": "ref", "ref": "Asset" } }],
            "properties": { "asset": { "required": true, "node": { "type": "ref", "ref": "AnyAsset" } } }
        }))
        .unwrap();

        let declarations = Declarations::from_named_types([&named]);
        let declaration = declarations.get("ListItem").unwrap();
        assert_eq!(declaration.body.to_string(), "{ asset: AnyAsset }");
        assert_eq!(declaration.params[0].default, Some(TypeExpr::reference("Asset")));
    }
}
