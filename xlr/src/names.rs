//! Helpers for picking apart type names as they appear in `ref` strings

/// A `Namespace.Member` reference split at its first dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespacedType<'a> {
    /// Leading namespace token
    pub namespace: &'a str,
    /// Everything after the first dot, further dots included
    pub member:    &'a str,
}

/// Strip the generic argument suffix from a type reference
///
/// Only the first `<` is significant, so nested arguments such as
/// `Map<string, Array<Foo>>` reduce to `Map`.
pub fn extract_base_name(reference: &str) -> &str {
    reference
        .find('<')
        .map_or(reference, |start| &reference[..start])
        .trim()
}

/// Split `Ns.Member` into namespace and member, `None` when there is no dot
pub fn parse_namespaced_type(name: &str) -> Option<NamespacedType<'_>> {
    name.split_once('.')
        .map(|(namespace, member)| NamespacedType { namespace, member })
}
