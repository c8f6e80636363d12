//! TypeScript utility types
//!
//! Expansion rewrites a utility reference into a plain type expression the
//! other strategies understand:
//!
//! | utility              | expansion                                     |
//! |----------------------|-----------------------------------------------|
//! | `Partial<T>`         | `T`'s properties, all optional                |
//! | `Required<T>`        | `T`'s properties, all required                |
//! | `Readonly<T>`        | `T`'s properties unchanged                    |
//! | `Pick<T, K>`         | properties of `T` named in `K`                |
//! | `Omit<T, K>`         | properties of `T` not named in `K`            |
//! | `NonNullable<T>`     | `T` without `null` and `undefined` members    |
//! | `Record<K, V>`       | one `V` property per string literal in `K`    |
//!
//! Anything that cannot be expanded (a `T` that is not object-shaped, a `K` that
//! is not a string literal union) yields `None` and is treated as opaque.

use indexmap::IndexMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::constants::MAX_UTILITY_EXPANSION_DEPTH;
use crate::syntax::{
    Declarations, Keyword, Literal, PropertySignature, TypeExpr, bind_generics,
};

/// Utility types the analyzer expands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
pub enum UtilityType {
    /// `Partial<T>`
    Partial,
    /// `Required<T>`
    Required,
    /// `Readonly<T>`
    Readonly,
    /// `Pick<T, K>`
    Pick,
    /// `Omit<T, K>`
    Omit,
    /// `NonNullable<T>`
    NonNullable,
    /// `Record<K, V>`
    Record,
}

/// Lookup and expansion of [`UtilityType`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityTypeRegistry;

impl UtilityTypeRegistry {
    /// Whether `name` is an expandable utility type
    pub fn is_utility_type(self, name: &str) -> bool { name.parse::<UtilityType>().is_ok() }

    /// Expand `name<args>`, resolving object arguments against `declarations`
    pub fn expand(
        self,
        name: &str,
        args: &[TypeExpr],
        declarations: &Declarations,
    ) -> Option<TypeExpr> {
        let utility = name.parse::<UtilityType>().ok()?;
        expand_at(utility, args, declarations, 0)
    }
}

fn expand_at(
    utility: UtilityType,
    args: &[TypeExpr],
    declarations: &Declarations,
    depth: usize,
) -> Option<TypeExpr> {
    match utility {
        UtilityType::Partial | UtilityType::Required | UtilityType::Readonly => {
            let properties = resolve_object(args.first()?, declarations, depth)?;
            let properties = properties
                .into_iter()
                .map(|property| PropertySignature {
                    optional: match utility {
                        UtilityType::Partial => true,
                        UtilityType::Required => false,
                        _ => property.optional,
                    },
                    ..property
                })
                .collect();
            Some(TypeExpr::Object(properties))
        },
        UtilityType::Pick | UtilityType::Omit => {
            let properties = resolve_object(args.first()?, declarations, depth)?;
            let keys = literal_keys(args.get(1)?)?;
            let keep = utility == UtilityType::Pick;
            Some(TypeExpr::Object(
                properties
                    .into_iter()
                    .filter(|property| keys.contains(&property.name) == keep)
                    .collect(),
            ))
        },
        UtilityType::NonNullable => {
            let argument = args.first()?;
            Some(match resolve_alias(argument, declarations, depth) {
                TypeExpr::Union(members) => TypeExpr::union_of(
                    members
                        .into_iter()
                        .filter(|member| !is_nullish(&resolve_alias(member, declarations, depth + 1)))
                        .collect(),
                ),
                resolved if is_nullish(&resolved) => TypeExpr::Keyword(Keyword::Never),
                _ => argument.clone(),
            })
        },
        UtilityType::Record => {
            let keys = literal_keys(args.first()?)?;
            let value = args.get(1)?;
            Some(TypeExpr::Object(
                keys.into_iter()
                    .map(|name| PropertySignature {
                        name,
                        ty: value.clone(),
                        optional: false,
                    })
                    .collect(),
            ))
        },
    }
}

const fn is_nullish(expr: &TypeExpr) -> bool {
    matches!(expr, TypeExpr::Keyword(Keyword::Null | Keyword::Undefined))
}

/// String literal keys of `"a"` or `"a" | "b"`
fn literal_keys(expr: &TypeExpr) -> Option<Vec<String>> {
    match expr {
        TypeExpr::Literal(Literal::String(key)) => Some(vec![key.clone()]),
        TypeExpr::Union(members) => members
            .iter()
            .map(|member| match member {
                TypeExpr::Literal(Literal::String(key)) => Some(key.clone()),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Follow declared aliases and utility references to the shape they name
///
/// Undeclared references, and anything past the expansion limit, resolve to
/// themselves.
fn resolve_alias(expr: &TypeExpr, declarations: &Declarations, depth: usize) -> TypeExpr {
    let TypeExpr::Reference(reference) = expr else {
        return expr.clone();
    };
    if depth >= MAX_UTILITY_EXPANSION_DEPTH || reference.property.is_some() {
        return expr.clone();
    }
    let resolved = if let Ok(utility) = reference.name.parse::<UtilityType>() {
        expand_at(utility, &reference.args, declarations, depth + 1)
    } else {
        declarations.get(&reference.name).map(|declaration| {
            let bindings = bind_generics(&declaration.params, &reference.args);
            declaration.body.substitute(&bindings)
        })
    };
    match resolved {
        Some(resolved) => resolve_alias(&resolved, declarations, depth + 1),
        None => expr.clone(),
    }
}

/// Property list of an object-shaped expression
fn resolve_object(
    expr: &TypeExpr,
    declarations: &Declarations,
    depth: usize,
) -> Option<Vec<PropertySignature>> {
    if depth >= MAX_UTILITY_EXPANSION_DEPTH {
        return None;
    }
    match expr {
        TypeExpr::Object(properties) => Some(properties.clone()),
        TypeExpr::Intersection(parts) => {
            let mut merged: IndexMap<String, PropertySignature> = IndexMap::new();
            let mut found_object = false;
            for part in parts {
                if let Some(properties) = resolve_object(part, declarations, depth + 1) {
                    found_object = true;
                    for property in properties {
                        merged.insert(property.name.clone(), property);
                    }
                }
            }
            found_object.then(|| merged.into_values().collect())
        },
        TypeExpr::Reference(reference) if reference.property.is_none() => {
            if let Ok(utility) = reference.name.parse::<UtilityType>() {
                let expanded = expand_at(utility, &reference.args, declarations, depth + 1)?;
                return resolve_object(&expanded, declarations, depth + 1);
            }
            let declaration = declarations.get(&reference.name)?;
            let bindings = bind_generics(&declaration.params, &reference.args);
            resolve_object(&declaration.body.substitute(&bindings), declarations, depth + 1)
        },
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use super::*;

    fn declarations() -> Declarations {
        let mut declarations = Declarations::new();
        declarations
            .declare("Base", None, "{ id: string; label?: string; count: number }")
            .unwrap();
        declarations
            .declare("Boxed", Some("T"), "{ value: T; note?: string }")
            .unwrap();
        declarations
            .declare("Loop", None, "Partial<Loop>")
            .unwrap();
        declarations
            .declare("MaybeText", None, "string | Nothing | null")
            .unwrap();
        declarations
            .declare("Nothing", None, "undefined")
            .unwrap();
        declarations
    }

    fn expand(text: &str) -> Option<String> {
        let TypeExpr::Reference(reference) = TypeExpr::parse(text).unwrap() else {
            return None;
        };
        UtilityTypeRegistry
            .expand(&reference.name, &reference.args, &declarations())
            .map(|expr| expr.to_string())
    }

    #[test]
    fn test_recognizes_utility_names() {
        assert!(UtilityTypeRegistry.is_utility_type("Partial"));
        assert!(UtilityTypeRegistry.is_utility_type("NonNullable"));
        assert!(!UtilityTypeRegistry.is_utility_type("Exclude"));
        assert!(!UtilityTypeRegistry.is_utility_type("partial"));
    }

    #[test]
    fn test_optionality_utilities() {
        assert_eq!(
            expand("Partial<Base>").unwrap(),
            "{ id?: string; label?: string; count?: number }"
        );
        assert_eq!(
            expand("Required<Base>").unwrap(),
            "{ id: string; label: string; count: number }"
        );
        assert_eq!(
            expand("Readonly<Boxed<boolean>>").unwrap(),
            "{ value: boolean; note?: string }"
        );
    }

    #[test]
    fn test_key_filtering_utilities() {
        assert_eq!(expand(r#"Pick<Base, "id" | "count">"#).unwrap(), "{ id: string; count: number }");
        assert_eq!(expand(r#"Omit<Base, "id">"#).unwrap(), "{ label?: string; count: number }");
        assert_eq!(expand("Pick<Base, string>"), None);
    }

    #[test]
    fn test_non_nullable_and_record() {
        assert_eq!(expand("NonNullable<string | null | undefined>").unwrap(), "string");
        assert_eq!(expand("NonNullable<null>").unwrap(), "never");
        assert_eq!(expand("NonNullable<MaybeText>").unwrap(), "string");
        assert_eq!(expand("NonNullable<Nothing>").unwrap(), "never");
        assert_eq!(expand("NonNullable<Base>").unwrap(), "Base");
        assert_eq!(expand("NonNullable<Loop>").unwrap(), "Loop");
        assert_eq!(
            expand(r#"Record<"a" | "b", number>"#).unwrap(),
            "{ a: number; b: number }"
        );
        assert_eq!(expand("Record<string, number>"), None);
    }

    #[test]
    fn test_unresolvable_and_self_referential_arguments() {
        assert_eq!(expand("Partial<Missing>"), None);
        assert_eq!(expand("Partial<string>"), None);
        assert_eq!(expand("Partial<Loop>"), None);
    }
}
