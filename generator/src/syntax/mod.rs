//! TypeScript type expressions
//!
//! [`TypeExpr`] is the tree the analyzer walks. Expressions come from two places:
//! text parsed with [`TypeExpr::parse`] (declaration bodies, generic constraints)
//! and XLR nodes converted with `TypeExpr::from(&NodeType)`.
//!
//! `Display` renders the canonical TypeScript text of an expression. That text is
//! what the analyzer reports as `typeAsString` and what the transformer emits for
//! raw (constraint) positions.

mod declarations;
mod from_xlr;
mod generics;
mod parser;

use std::fmt;
use std::str::FromStr;

pub use declarations::{Declaration, Declarations};
pub use generics::{
    GenericContext, GenericParam, bind_generics, parse_generic_params, split_once_top_level,
    split_top_level,
};
use itertools::Itertools;
use serde_json::{Number, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `any`
    Any,
    /// `unknown`
    Unknown,
    /// `never`
    Never,
    /// `void`
    Void,
    /// `object`
    Object,
}

/// Literal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `"text"`
    String(String),
    /// `42`, `-1`, `1.5`
    Number(Number),
    /// `true` / `false`
    Boolean(bool),
}

impl Literal {
    /// Keyword type the literal belongs to
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::String(_) => Keyword::String,
            Self::Number(_) => Keyword::Number,
            Self::Boolean(_) => Keyword::Boolean,
        }
    }

    /// The literal as a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(text) => Value::String(text.clone()),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Boolean(flag) => Value::Bool(*flag),
        }
    }

    /// Literal for a JSON scalar, `None` for arrays, objects and null
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::String(text.clone())),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::Bool(flag) => Some(Self::Boolean(*flag)),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => {
                let quoted = serde_json::to_string(text).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            },
            Self::Number(number) => write!(f, "{number}"),
            Self::Boolean(flag) => write!(f, "{flag}"),
        }
    }
}

/// Positional member of a tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleElement {
    /// Label of a named member
    pub name:     Option<String>,
    /// Member type
    pub ty:       TypeExpr,
    /// `?` member
    pub optional: bool,
}

/// Member of an object literal type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    /// Property name
    pub name:     String,
    /// Property type
    pub ty:       TypeExpr,
    /// `?` property
    pub optional: bool,
}

/// Reference to a named type: `Ns.Name<Args>["property"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Possibly dotted type name
    pub name:     String,
    /// Generic arguments
    pub args:     Vec<TypeExpr>,
    /// Indexed access
    pub property: Option<String>,
}

impl TypeReference {
    /// Reference with generic arguments
    pub fn new(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            args,
            property: None,
        }
    }
}

/// Parameter of a function type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParam {
    /// Parameter name
    pub name:     String,
    /// Parameter type
    pub ty:       TypeExpr,
    /// `?` parameter
    pub optional: bool,
}

/// `(params) => returns`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Parameters
    pub params:  Vec<FunctionParam>,
    /// Return type
    pub returns: Box<TypeExpr>,
}

/// `check extends extends ? then : otherwise`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalExpr {
    /// Checked type
    pub check:     Box<TypeExpr>,
    /// Type it is checked against
    pub extends:   Box<TypeExpr>,
    /// Result when the check holds
    pub then:      Box<TypeExpr>,
    /// Result otherwise
    pub otherwise: Box<TypeExpr>,
}

/// A TypeScript type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Keyword type
    Keyword(Keyword),
    /// Literal type
    Literal(Literal),
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `[A, B?]`
    Tuple(Vec<TupleElement>),
    /// `A | B`
    Union(Vec<TypeExpr>),
    /// `A & B`
    Intersection(Vec<TypeExpr>),
    /// `{ a: A; b?: B }`
    Object(Vec<PropertySignature>),
    /// Named type reference
    Reference(TypeReference),
    /// Function type
    Function(FunctionSignature),
    /// Conditional type
    Conditional(ConditionalExpr),
}

impl TypeExpr {
    /// Parse TypeScript type-expression text
    pub fn parse(text: &str) -> Result<Self> { parser::parse(text) }

    /// Reference to a type without generic arguments
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(TypeReference::new(name, Vec::new()))
    }

    /// Union of `members`, collapsing the single-member case
    pub fn union_of(mut members: Vec<Self>) -> Self {
        match members.len() {
            0 => Self::Keyword(Keyword::Never),
            1 => members.remove(0),
            _ => Self::Union(members),
        }
    }

    /// Intersection of `members`, collapsing the single-member case
    pub fn intersection_of(mut members: Vec<Self>) -> Self {
        match members.len() {
            0 => Self::Keyword(Keyword::Unknown),
            1 => members.remove(0),
            _ => Self::Intersection(members),
        }
    }

    /// Replace references to bound generic symbols with their arguments
    #[must_use]
    pub fn substitute(&self, bindings: &GenericContext) -> Self {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Keyword(_) | Self::Literal(_) => self.clone(),
            Self::Reference(reference)
                if reference.args.is_empty() && reference.property.is_none() =>
            {
                bindings
                    .get(&reference.name)
                    .cloned()
                    .unwrap_or_else(|| self.clone())
            },
            Self::Reference(reference) => Self::Reference(TypeReference {
                name:     reference.name.clone(),
                args:     reference
                    .args
                    .iter()
                    .map(|arg| arg.substitute(bindings))
                    .collect(),
                property: reference.property.clone(),
            }),
            Self::Array(inner) => Self::Array(Box::new(inner.substitute(bindings))),
            Self::Tuple(elements) => Self::Tuple(
                elements
                    .iter()
                    .map(|element| TupleElement {
                        name:     element.name.clone(),
                        ty:       element.ty.substitute(bindings),
                        optional: element.optional,
                    })
                    .collect(),
            ),
            Self::Union(members) => {
                Self::Union(members.iter().map(|m| m.substitute(bindings)).collect())
            },
            Self::Intersection(members) => {
                Self::Intersection(members.iter().map(|m| m.substitute(bindings)).collect())
            },
            Self::Object(properties) => Self::Object(
                properties
                    .iter()
                    .map(|property| PropertySignature {
                        name:     property.name.clone(),
                        ty:       property.ty.substitute(bindings),
                        optional: property.optional,
                    })
                    .collect(),
            ),
            Self::Function(signature) => Self::Function(FunctionSignature {
                params:  signature
                    .params
                    .iter()
                    .map(|param| FunctionParam {
                        name:     param.name.clone(),
                        ty:       param.ty.substitute(bindings),
                        optional: param.optional,
                    })
                    .collect(),
                returns: Box::new(signature.returns.substitute(bindings)),
            }),
            Self::Conditional(conditional) => Self::Conditional(ConditionalExpr {
                check:     Box::new(conditional.check.substitute(bindings)),
                extends:   Box::new(conditional.extends.substitute(bindings)),
                then:      Box::new(conditional.then.substitute(bindings)),
                otherwise: Box::new(conditional.otherwise.substitute(bindings)),
            }),
        }
    }

    /// Names of every type referenced anywhere in the expression, in visit order
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Keyword(_) | Self::Literal(_) => {},
            Self::Reference(reference) => {
                names.push(&reference.name);
                for arg in &reference.args {
                    arg.collect_references(names);
                }
            },
            Self::Array(inner) => inner.collect_references(names),
            Self::Tuple(elements) => {
                for element in elements {
                    element.ty.collect_references(names);
                }
            },
            Self::Union(members) | Self::Intersection(members) => {
                for member in members {
                    member.collect_references(names);
                }
            },
            Self::Object(properties) => {
                for property in properties {
                    property.ty.collect_references(names);
                }
            },
            Self::Function(signature) => {
                for param in &signature.params {
                    param.ty.collect_references(names);
                }
                signature.returns.collect_references(names);
            },
            Self::Conditional(conditional) => {
                conditional.check.collect_references(names);
                conditional.extends.collect_references(names);
                conditional.then.collect_references(names);
                conditional.otherwise.collect_references(names);
            },
        }
    }

    /// Binding strength when rendered, higher binds tighter
    const fn precedence(&self) -> u8 {
        match self {
            Self::Function(_) | Self::Conditional(_) => 0,
            Self::Union(_) => 1,
            Self::Intersection(_) => 2,
            _ => 3,
        }
    }
}

impl FromStr for TypeExpr {
    type Err = error_stack::Report<Error>;

    fn from_str(text: &str) -> Result<Self> { Self::parse(text) }
}

/// Renders an expression, parenthesized when it binds looser than `min`
struct Grouped<'a>(&'a TypeExpr, u8);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.precedence() < self.1 {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Property key as it must be written in TypeScript source
pub(crate) fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Literal::String(name.to_string()).to_string()
    }
}

impl fmt::Display for TupleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.optional) {
            (Some(name), true) => write!(f, "{name}?: {}", self.ty),
            (Some(name), false) => write!(f, "{name}: {}", self.ty),
            (None, true) => write!(f, "{}?", Grouped(&self.ty, 3)),
            (None, false) => write!(f, "{}", self.ty),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "{keyword}"),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Array(inner) => write!(f, "{}[]", Grouped(inner, 3)),
            Self::Tuple(elements) => write!(f, "[{}]", elements.iter().join(", ")),
            Self::Union(members) => {
                write!(f, "{}", members.iter().map(|m| Grouped(m, 1)).join(" | "))
            },
            Self::Intersection(members) => {
                write!(f, "{}", members.iter().map(|m| Grouped(m, 2)).join(" & "))
            },
            Self::Object(properties) if properties.is_empty() => f.write_str("{}"),
            Self::Object(properties) => {
                let members = properties
                    .iter()
                    .map(|property| {
                        let marker = if property.optional { "?" } else { "" };
                        format!("{}{marker}: {}", property_key(&property.name), property.ty)
                    })
                    .join("; ");
                write!(f, "{{ {members} }}")
            },
            Self::Reference(reference) => {
                f.write_str(&reference.name)?;
                if !reference.args.is_empty() {
                    write!(f, "<{}>", reference.args.iter().join(", "))?;
                }
                if let Some(property) = &reference.property {
                    write!(f, "[{}]", Literal::String(property.clone()))?;
                }
                Ok(())
            },
            Self::Function(signature) => {
                let params = signature
                    .params
                    .iter()
                    .map(|param| {
                        let marker = if param.optional { "?" } else { "" };
                        format!("{}{marker}: {}", param.name, param.ty)
                    })
                    .join(", ");
                write!(f, "({params}) => {}", signature.returns)
            },
            Self::Conditional(conditional) => write!(
                f,
                "{} extends {} ? {} : {}",
                Grouped(&conditional.check, 1),
                Grouped(&conditional.extends, 1),
                conditional.then,
                conditional.otherwise
            ),
        }
    }
}
