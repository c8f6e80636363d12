//! XLR node to type expression conversion

use player_xlr::constants::{BINDING, EXPRESSION};
use player_xlr::{NodeType, ObjectNode, PrimitiveNode, RefNode, extract_base_name};

use super::{
    ConditionalExpr, FunctionParam, FunctionSignature, Keyword, Literal, PropertySignature,
    TupleElement, TypeExpr, TypeReference,
};

fn primitive(keyword: Keyword, node: &PrimitiveNode) -> TypeExpr {
    if let Some(literal) = node.const_value.as_ref().and_then(Literal::from_value) {
        return TypeExpr::Literal(literal);
    }
    let literals: Vec<TypeExpr> = node
        .enum_values
        .iter()
        .flatten()
        .filter_map(Literal::from_value)
        .map(TypeExpr::Literal)
        .collect();
    if literals.is_empty() {
        TypeExpr::Keyword(keyword)
    } else {
        TypeExpr::union_of(literals)
    }
}

impl TypeExpr {
    /// The body of an object node as a literal type, ignoring its name
    ///
    /// An `extends` clause becomes an intersection with the base reference.
    pub fn object_literal(object: &ObjectNode) -> Self {
        let literal = Self::Object(
            object
                .properties
                .iter()
                .map(|(name, property)| PropertySignature {
                    name:     name.clone(),
                    ty:       Self::from(&property.node),
                    optional: !property.required,
                })
                .collect(),
        );
        match &object.extends {
            Some(base) => Self::Intersection(vec![Self::from(base.as_ref()), literal]),
            None => literal,
        }
    }
}

impl From<&RefNode> for TypeExpr {
    fn from(reference: &RefNode) -> Self {
        let base = extract_base_name(&reference.reference);
        if base == EXPRESSION || base == BINDING {
            return Self::Keyword(Keyword::String);
        }

        let args = match &reference.generic_arguments {
            Some(args) => args.iter().map(Self::from).collect(),
            None if reference.reference.contains('<') => match Self::parse(&reference.reference) {
                Ok(Self::Reference(parsed)) => parsed.args,
                _ => Vec::new(),
            },
            None => Vec::new(),
        };

        Self::Reference(TypeReference {
            name: base.to_string(),
            args,
            property: reference.property.clone(),
        })
    }
}

impl From<&NodeType> for TypeExpr {
    fn from(node: &NodeType) -> Self {
        match node {
            NodeType::String(primitive_node) => primitive(Keyword::String, primitive_node),
            NodeType::Number(primitive_node) => primitive(Keyword::Number, primitive_node),
            NodeType::Boolean(primitive_node) => primitive(Keyword::Boolean, primitive_node),
            NodeType::Null(_) => Self::Keyword(Keyword::Null),
            NodeType::Undefined(_) => Self::Keyword(Keyword::Undefined),
            NodeType::Any(_) => Self::Keyword(Keyword::Any),
            NodeType::Unknown(_) => Self::Keyword(Keyword::Unknown),
            NodeType::Never(_) => Self::Keyword(Keyword::Never),
            NodeType::Void(_) => Self::Keyword(Keyword::Void),
            NodeType::Template(_) => Self::Keyword(Keyword::String),
            NodeType::Ref(reference) => Self::from(reference),
            NodeType::Object(object) => match &object.annotations.name {
                Some(name) => Self::reference(name.clone()),
                None => Self::object_literal(object),
            },
            NodeType::Array(array) => Self::Array(Box::new(Self::from(array.element_type.as_ref()))),
            NodeType::Tuple(tuple) => Self::Tuple(
                tuple
                    .element_types
                    .iter()
                    .map(|member| TupleElement {
                        name:     member.name.clone(),
                        ty:       Self::from(&member.node),
                        optional: member.optional,
                    })
                    .collect(),
            ),
            NodeType::And(intersection) => {
                Self::intersection_of(intersection.members.iter().map(Self::from).collect())
            },
            NodeType::Or(union) => Self::union_of(union.members.iter().map(Self::from).collect()),
            NodeType::Record(record) => Self::Reference(TypeReference::new(
                "Record",
                vec![
                    Self::from(record.key_type.as_ref()),
                    Self::from(record.value_type.as_ref()),
                ],
            )),
            NodeType::Function(function) => Self::Function(FunctionSignature {
                params:  function
                    .parameters
                    .iter()
                    .map(|param| FunctionParam {
                        name:     param.name.clone(),
                        ty:       Self::from(&param.node),
                        optional: param.optional || param.default.is_some(),
                    })
                    .collect(),
                returns: Box::new(
                    function
                        .return_type
                        .as_deref()
                        .map_or(Self::Keyword(Keyword::Void), Self::from),
                ),
            }),
            NodeType::Conditional(conditional) => Self::Conditional(ConditionalExpr {
                check:     Box::new(Self::from(conditional.check.left.as_ref())),
                extends:   Box::new(Self::from(conditional.check.right.as_ref())),
                then:      Box::new(Self::from(conditional.value.when_true.as_ref())),
                otherwise: Box::new(Self::from(conditional.value.when_false.as_ref())),
            }),
        }
    }
}
