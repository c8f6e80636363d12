//! Generic parameter lists
//!
//! Parameter lists arrive as text such as `T extends Foo<A, B> = Bar, U`. Commas
//! inside angle brackets, parens, brackets, braces or quotes belong to the
//! nested type, so splitting is done by a bracket-depth scanner rather than
//! `str::split`.

use error_stack::Report;
use indexmap::IndexMap;
use player_xlr::GenericToken;

use super::{Keyword, TypeExpr, is_identifier};
use crate::error::{Error, Result};

/// Generic symbol to the type bound to it
pub type GenericContext = IndexMap<String, TypeExpr>;

/// One declared generic parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    /// Parameter symbol
    pub symbol:     String,
    /// `extends` constraint
    pub constraint: Option<TypeExpr>,
    /// Default argument
    pub default:    Option<TypeExpr>,
}

impl From<&GenericToken> for GenericParam {
    fn from(token: &GenericToken) -> Self {
        Self {
            symbol:     token.symbol.clone(),
            constraint: token.constraints.as_ref().map(TypeExpr::from),
            default:    token.default.as_ref().map(TypeExpr::from),
        }
    }
}

/// Byte offsets of every `separator` outside brackets and quotes
fn top_level_positions(text: &str, separator: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' | '\'' if quote == Some(ch) => quote = None,
            '"' | '\'' if quote.is_none() => quote = Some(ch),
            _ if quote.is_some() => {},
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => positions.push(index),
            _ => {},
        }
    }
    positions
}

/// Split `text` at top-level occurrences of `separator`, trimming each piece and
/// dropping empty ones
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for position in top_level_positions(text, separator) {
        pieces.push(text[start..position].trim());
        start = position + separator.len_utf8();
    }
    pieces.push(text[start..].trim());
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

/// Split `text` at the first top-level `separator`
pub fn split_once_top_level(text: &str, separator: char) -> Option<(&str, &str)> {
    top_level_positions(text, separator)
        .first()
        .map(|&position| {
            (
                text[..position].trim(),
                text[position + separator.len_utf8()..].trim(),
            )
        })
}

fn parse_generic_param(text: &str) -> Result<GenericParam> {
    let (head, default) = match split_once_top_level(text, '=') {
        Some((head, default)) => (head, Some(default)),
        None => (text.trim(), None),
    };
    let (symbol, constraint) = match head.split_once(" extends ") {
        Some((symbol, constraint)) => (symbol.trim(), Some(constraint.trim())),
        None => (head, None),
    };

    if !is_identifier(symbol) {
        return Err(Report::new(Error::syntax(
            text,
            format!("'{symbol}' is not a generic parameter name"),
        )));
    }

    Ok(GenericParam {
        symbol:     symbol.to_string(),
        constraint: constraint.map(TypeExpr::parse).transpose()?,
        default:    default.map(TypeExpr::parse).transpose()?,
    })
}

/// Parse a generic parameter list such as `T extends Foo<A, B> = Bar, U`
pub fn parse_generic_params(text: &str) -> Result<Vec<GenericParam>> {
    split_top_level(text, ',')
        .into_iter()
        .map(parse_generic_param)
        .collect()
}

/// Bind declared parameters to supplied arguments
///
/// A missing argument falls back to the parameter's default, then its
/// constraint, then `unknown`.
pub fn bind_generics(params: &[GenericParam], args: &[TypeExpr]) -> GenericContext {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let bound = args
                .get(index)
                .or(param.default.as_ref())
                .or(param.constraint.as_ref())
                .cloned()
                .unwrap_or(TypeExpr::Keyword(Keyword::Unknown));
            (param.symbol.clone(), bound)
        })
        .collect()
}
