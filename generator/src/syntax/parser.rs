//! nom parser for TypeScript type expressions
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! type         := '|'? intersection ('|' intersection)*
//! intersection := postfix ('&' postfix)*
//! postfix      := primary ('[' ']')*
//! primary      := '(' type ')' | tuple | object | string | number | named
//! tuple        := '[' (label '?'? ':')? type '?'? (',' ...)* ','? ']'
//! object       := '{' (key '?'? ':' type (';' | ',')?)* '}'
//! number       := '-'? digits ('.' digits)?
//! named        := ident ('.' ident)* ('<' type (',' type)* '>')?
//! ```
//!
//! Function and conditional types are not parsed; they only enter the tree
//! through XLR conversion.

use error_stack::Report;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{map, opt, recognize};
use nom::error::ErrorKind;
use nom::multi::{many0, separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};

use super::{Keyword, Literal, PropertySignature, TupleElement, TypeExpr, TypeReference};
use crate::error::{Error, Result};

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Parse a complete type expression, rejecting trailing input
pub(super) fn parse(text: &str) -> Result<TypeExpr> {
    match terminated(type_expr, multispace0).parse(text) {
        Ok(("", expr)) => Ok(expr),
        Ok((rest, _)) => Err(Report::new(Error::syntax(
            text,
            format!("unexpected input at '{rest}'"),
        ))),
        Err(e) => Err(Report::new(Error::syntax(text, e))),
    }
}

/// A fixed token, skipping leading whitespace
fn token<'a>(expected: &'static str) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    move |input: &'a str| preceded(multispace0, tag(expected)).parse(input)
}

/// Parse an identifier (letters, digits, `_`, `$`, not starting with a digit)
fn identifier(input: &str) -> ParseResult<'_, &str> {
    preceded(
        multispace0,
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
            take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
        )),
    )
    .parse(input)
}

/// Parse a single- or double-quoted string, returning its contents
fn quoted(input: &str) -> ParseResult<'_, &str> {
    preceded(
        multispace0,
        alt((
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        )),
    )
    .parse(input)
}

fn decimal(input: &str) -> ParseResult<'_, &str> {
    preceded(
        multispace0,
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
    )
    .parse(input)
}

/// Numeric literal; a unary minus makes it a negative constant
fn number_literal(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, sign) = opt(token("-")).parse(input)?;
    let (rest, digits) = decimal(rest)?;
    let text = if sign.is_some() {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    text.parse::<serde_json::Number>()
        .map(|number| (rest, TypeExpr::Literal(Literal::Number(number))))
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, ErrorKind::Digit)))
}

fn string_literal(input: &str) -> ParseResult<'_, TypeExpr> {
    map(quoted, |text| TypeExpr::Literal(Literal::String(text.to_string()))).parse(input)
}

/// Keyword, boolean literal or (possibly dotted, possibly generic) reference
fn named_type(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, segments) = separated_list1(token("."), identifier).parse(input)?;
    let (rest, args) = opt(delimited(
        token("<"),
        separated_list1(token(","), type_expr),
        token(">"),
    ))
    .parse(rest)?;

    let name = segments.join(".");
    let expr = if let Some(args) = args {
        TypeExpr::Reference(TypeReference::new(name, args))
    } else {
        match name.as_str() {
            "true" => TypeExpr::Literal(Literal::Boolean(true)),
            "false" => TypeExpr::Literal(Literal::Boolean(false)),
            other => other
                .parse::<Keyword>()
                .map_or_else(|_| TypeExpr::reference(other), TypeExpr::Keyword),
        }
    };
    Ok((rest, expr))
}

fn tuple_element(input: &str) -> ParseResult<'_, TupleElement> {
    let (rest, label) =
        opt(terminated(pair(identifier, opt(token("?"))), token(":"))).parse(input)?;
    let (rest, ty) = type_expr(rest)?;
    let (rest, trailing) = opt(token("?")).parse(rest)?;

    let optional = matches!(label, Some((_, Some(_)))) || trailing.is_some();
    Ok((
        rest,
        TupleElement {
            name: label.map(|(name, _)| name.to_string()),
            ty,
            optional,
        },
    ))
}

fn tuple_type(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, _) = token("[").parse(input)?;
    let (rest, elements) = separated_list0(token(","), tuple_element).parse(rest)?;
    let (rest, _) = opt(token(",")).parse(rest)?;
    let (rest, _) = token("]").parse(rest)?;
    Ok((rest, TypeExpr::Tuple(elements)))
}

fn property_signature(input: &str) -> ParseResult<'_, PropertySignature> {
    let (rest, name) = alt((identifier, quoted)).parse(input)?;
    let (rest, optional) = opt(token("?")).parse(rest)?;
    let (rest, _) = token(":").parse(rest)?;
    let (rest, ty) = type_expr(rest)?;
    Ok((
        rest,
        PropertySignature {
            name: name.to_string(),
            ty,
            optional: optional.is_some(),
        },
    ))
}

fn object_type(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, _) = token("{").parse(input)?;
    let (rest, properties) = many0(terminated(
        property_signature,
        opt(alt((token(";"), token(",")))),
    ))
    .parse(rest)?;
    let (rest, _) = token("}").parse(rest)?;
    Ok((rest, TypeExpr::Object(properties)))
}

fn primary(input: &str) -> ParseResult<'_, TypeExpr> {
    alt((
        delimited(token("("), type_expr, token(")")),
        tuple_type,
        object_type,
        string_literal,
        number_literal,
        named_type,
    ))
    .parse(input)
}

fn postfix(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, base) = primary(input)?;
    let (rest, dimensions) = many0(pair(token("["), token("]"))).parse(rest)?;
    let expr = dimensions
        .into_iter()
        .fold(base, |inner, _| TypeExpr::Array(Box::new(inner)));
    Ok((rest, expr))
}

fn intersection(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, parts) = separated_list1(token("&"), postfix).parse(input)?;
    Ok((rest, TypeExpr::intersection_of(parts)))
}

fn type_expr(input: &str) -> ParseResult<'_, TypeExpr> {
    let (rest, _) = opt(token("|")).parse(input)?;
    let (rest, members) = separated_list1(token("|"), intersection).parse(rest)?;
    Ok((rest, TypeExpr::union_of(members)))
}
