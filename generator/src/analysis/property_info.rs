//! Analysis results

use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::syntax::Keyword;

/// Whether a result has children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PropertyKind {
    /// Leaf: primitives, opaque references, fallbacks
    Terminal,
    /// Has `properties` or `elements`
    NonTerminal,
}

/// Classification reported for an analyzed type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PropertyType {
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
    /// Object shapes, tuples and opaque references
    Object,
    /// Unions
    Union,
}

impl From<Keyword> for PropertyType {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::String => Self::String,
            Keyword::Number => Self::Number,
            Keyword::Boolean => Self::Boolean,
            Keyword::Null => Self::Null,
            Keyword::Undefined => Self::Undefined,
            Keyword::Any => Self::Any,
            Keyword::Unknown => Self::Unknown,
            Keyword::Never => Self::Never,
            Keyword::Void => Self::Void,
            Keyword::Object => Self::Object,
        }
    }
}

/// Children of an analyzed type
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyShape {
    /// No children
    Terminal,
    /// Named members of an object or tuple
    Properties(Vec<PropertyInfo>),
    /// Members of a union
    Elements(Vec<PropertyInfo>),
}

/// Structural description of a property's type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// Property name; empty for union members
    pub name:           String,
    /// Classification
    pub property_type:  PropertyType,
    /// TypeScript text of the analyzed type
    pub type_as_string: String,
    /// Whether the property holds an array of this type
    pub is_array:       bool,
    /// Whether the property may be omitted
    pub is_optional:    bool,
    /// Literal value the type is fixed to
    pub const_value:    Option<Value>,
    /// Children
    pub shape:          PropertyShape,
}

impl PropertyInfo {
    /// Leaf result
    pub fn terminal(
        name: impl Into<String>,
        property_type: PropertyType,
        type_as_string: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            property_type,
            type_as_string: type_as_string.into(),
            is_array: false,
            is_optional: false,
            const_value: None,
            shape: PropertyShape::Terminal,
        }
    }

    /// Object-shaped result with named members
    pub fn with_properties(
        name: impl Into<String>,
        type_as_string: impl Into<String>,
        properties: Vec<Self>,
    ) -> Self {
        Self {
            shape: PropertyShape::Properties(properties),
            ..Self::terminal(name, PropertyType::Object, type_as_string)
        }
    }

    /// Union result with one entry per member
    pub fn with_elements(
        name: impl Into<String>,
        type_as_string: impl Into<String>,
        elements: Vec<Self>,
    ) -> Self {
        Self {
            shape: PropertyShape::Elements(elements),
            ..Self::terminal(name, PropertyType::Union, type_as_string)
        }
    }

    /// Terminal or non-terminal
    pub const fn kind(&self) -> PropertyKind {
        match self.shape {
            PropertyShape::Terminal => PropertyKind::Terminal,
            PropertyShape::Properties(_) | PropertyShape::Elements(_) => PropertyKind::NonTerminal,
        }
    }

    /// Named members, empty unless object-shaped
    pub fn properties(&self) -> &[Self] {
        match &self.shape {
            PropertyShape::Properties(properties) => properties,
            _ => &[],
        }
    }

    /// Union members, empty unless a union
    pub fn elements(&self) -> &[Self] {
        match &self.shape {
            PropertyShape::Elements(elements) => elements,
            _ => &[],
        }
    }

    /// Look up a named member
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties().iter().find(|property| property.name == name)
    }

    /// Mark as an array of this type
    #[must_use]
    pub fn into_array(self) -> Self { Self { is_array: true, ..self } }

    /// Set the optional flag
    #[must_use]
    pub fn optional(self, is_optional: bool) -> Self { Self { is_optional, ..self } }

    /// Attach a literal value
    #[must_use]
    pub fn with_const(self, value: Value) -> Self {
        Self {
            const_value: Some(value),
            ..self
        }
    }

    /// Replace the reported type text
    #[must_use]
    pub fn with_type_as_string(self, type_as_string: impl Into<String>) -> Self {
        Self {
            type_as_string: type_as_string.into(),
            ..self
        }
    }

    /// Report under another name
    #[must_use]
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_follows_shape() {
        let leaf = PropertyInfo::terminal("id", PropertyType::String, "string");
        assert_eq!(leaf.kind(), PropertyKind::Terminal);
        assert!(leaf.properties().is_empty());

        let object = PropertyInfo::with_properties("meta", "{ id: string }", vec![leaf.clone()]);
        assert_eq!(object.kind(), PropertyKind::NonTerminal);
        assert_eq!(object.property_type, PropertyType::Object);
        assert_eq!(object.property("id"), Some(&leaf));

        let union = PropertyInfo::with_elements("value", "string | number", vec![]);
        assert_eq!(union.kind(), PropertyKind::NonTerminal);
        assert_eq!(union.property_type.to_string(), "union");
        assert_eq!(PropertyKind::NonTerminal.to_string(), "non-terminal");
    }

    #[test]
    fn test_builders_only_touch_their_field() {
        let info = PropertyInfo::terminal("type", PropertyType::String, "string")
            .with_const(json!("action"))
            .optional(true)
            .into_array()
            .renamed("kind");

        assert_eq!(info.name, "kind");
        assert_eq!(info.const_value, Some(json!("action")));
        assert!(info.is_optional);
        assert!(info.is_array);
        assert_eq!(info.type_as_string, "string");
    }
}
