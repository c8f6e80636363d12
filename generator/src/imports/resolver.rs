//! Where a referenced type is declared

use indexmap::IndexMap;
use player_xlr::NamedType;

/// Declaration site of a type, relative to the type being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    /// Declared in the same source as the type being generated
    SameFile,
    /// Exported from another module
    Exported {
        /// Module specifier to import from
        module: String,
    },
    /// Not declared anywhere the resolver knows about
    NotFound,
}

/// Decides where a referenced type comes from
pub trait TypeResolver: Send + Sync {
    /// Origin of `type_name` as seen from `current_type`
    fn resolve(&self, type_name: &str, current_type: &str) -> TypeOrigin;
}

/// Resolves types by comparing the `source` files of known declarations
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    sources: IndexMap<String, String>,
}

impl SourceResolver {
    /// Resolver over the declaring files of `types`
    pub fn from_named_types<'a>(types: impl IntoIterator<Item = &'a NamedType>) -> Self {
        Self {
            sources: types
                .into_iter()
                .map(|named| (named.name.clone(), named.source.clone()))
                .collect(),
        }
    }

    /// Record that `type_name` is declared in `source`
    pub fn insert(&mut self, type_name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(type_name.into(), source.into());
    }
}

/// Import specifier for a source file: the path without its TypeScript extension
fn module_specifier(source: &str) -> &str {
    [".d.ts", ".tsx", ".ts"]
        .iter()
        .find_map(|extension| source.strip_suffix(extension))
        .unwrap_or(source)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Specifier that imports `to_file` from a module declared in `from_file`
fn relative_specifier(from_file: &str, to_file: &str) -> String {
    let mut from_dir = segments(from_file);
    from_dir.pop();
    let to = segments(module_specifier(to_file));
    let common = from_dir
        .iter()
        .zip(&to)
        .take_while(|(left, right)| left == right)
        .count();

    let mut parts = vec![".."; from_dir.len() - common];
    if parts.is_empty() {
        parts.push(".");
    }
    parts.extend(&to[common..]);
    parts.join("/")
}

/// Re-anchor a specifier relative to the main type's module onto the
/// generated file
///
/// `type_import_path` is how the generated file imports the main type, so a
/// relative `module` is joined onto its directory. Package specifiers, and any
/// module when `type_import_path` is itself a package, pass through unchanged.
pub fn rebase_module(type_import_path: &str, module: &str) -> String {
    let is_relative = |path: &str| path.starts_with("./") || path.starts_with("../");
    if !is_relative(module) || !is_relative(type_import_path) {
        return module.to_string();
    }

    let base_dir = type_import_path.rsplit_once('/').map_or(".", |(dir, _)| dir);
    let mut joined: Vec<&str> = Vec::new();
    for segment in segments(base_dir).into_iter().chain(segments(module)) {
        match (segment, joined.last()) {
            ("..", Some(&last)) if last != ".." => {
                joined.pop();
            },
            _ => joined.push(segment),
        }
    }
    match joined.first() {
        Some(&"..") => joined.join("/"),
        _ => format!("./{}", joined.join("/")),
    }
}

impl TypeResolver for SourceResolver {
    /// A type in another file is `Exported` from that file's path relative to
    /// `current_type`'s file; when `current_type`'s file is unknown the path is
    /// used as given and must already be a valid specifier.
    fn resolve(&self, type_name: &str, current_type: &str) -> TypeOrigin {
        let Some(source) = self.sources.get(type_name) else {
            return TypeOrigin::NotFound;
        };
        match self.sources.get(current_type) {
            Some(current) if current == source => TypeOrigin::SameFile,
            Some(current) => TypeOrigin::Exported {
                module: relative_specifier(current, source),
            },
            None => TypeOrigin::Exported {
                module: module_specifier(source).to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_by_source_file() {
        let mut resolver = SourceResolver::default();
        resolver.insert("ListAsset", "src/assets/list/types.ts");
        resolver.insert("ListItem", "src/assets/list/types.ts");
        resolver.insert("TextAsset", "src/assets/text/types.d.ts");

        assert_eq!(resolver.resolve("ListItem", "ListAsset"), TypeOrigin::SameFile);
        assert_eq!(
            resolver.resolve("TextAsset", "ListAsset"),
            TypeOrigin::Exported {
                module: "../text/types".to_string(),
            }
        );
        assert_eq!(resolver.resolve("Missing", "ListAsset"), TypeOrigin::NotFound);
        assert_eq!(
            resolver.resolve("TextAsset", "Unknown"),
            TypeOrigin::Exported {
                module: "src/assets/text/types".to_string(),
            }
        );
    }

    #[test]
    fn test_relative_specifiers() {
        assert_eq!(relative_specifier("src/list/types.ts", "src/list/item.ts"), "./item");
        assert_eq!(relative_specifier("src/list/types.ts", "src/text/types.ts"), "../text/types");
        assert_eq!(relative_specifier("./types.ts", "shared/common.d.ts"), "./shared/common");
        assert_eq!(relative_specifier("a/b/c/types.ts", "a/x.ts"), "../../x");
    }

    #[test]
    fn test_rebase_onto_generated_file() {
        assert_eq!(rebase_module("../types", "../text/types"), "../../text/types");
        assert_eq!(rebase_module("../types", "./item"), "../item");
        assert_eq!(rebase_module("./types", "./item"), "./item");
        assert_eq!(rebase_module("../../types", "../shared"), "../../../shared");
        assert_eq!(rebase_module("../types", "@player-ui/types"), "@player-ui/types");
        assert_eq!(rebase_module("@player-ui/assets", "../text/types"), "../text/types");
    }

    #[test]
    fn test_module_specifier_strips_extensions() {
        assert_eq!(module_specifier("a/b.tsx"), "a/b");
        assert_eq!(module_specifier("a/b.d.ts"), "a/b");
        assert_eq!(module_specifier("a/b"), "a/b");
    }
}
