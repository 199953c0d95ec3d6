use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

use crate::rules::ModuleRule;

/// Maps a root-relative file path to its module name.
///
/// Rules are tried in order and the first capture wins. Without a match the first path segment
/// is used, so `App/Camera/View.swift` belongs to `App` and a top-level `main.swift` to
/// `main.swift`.
#[derive(Debug, Clone, Copy)]
pub struct ModuleResolver<'a> {
    rules: &'a [ModuleRule],
}

impl<'a> ModuleResolver<'a> {
    #[must_use]
    pub fn new(rules: &'a [ModuleRule]) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn resolve(&self, rel_path: &str) -> String {
        if let Some(name) = self.rules.iter().find_map(|r| r.capture(rel_path)) {
            return name.to_string();
        }
        rel_path.split('/').find(|s| !s.is_empty()).unwrap_or(rel_path).to_string()
    }
}

/// Render `path` relative to `root` with `/` separators. Paths outside `root` are rendered whole.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Every module name derivable from files under the scan root, with its file count.
///
/// Used for reporting only; resolution does not consult it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, usize>,
}

impl ModuleRegistry {
    pub fn collect<I>(rel_paths: I, resolver: &ModuleResolver<'_>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut modules = BTreeMap::new();
        for rel in rel_paths {
            *modules.entry(resolver.resolve(&rel)).or_insert(0) += 1;
        }
        Self { modules }
    }

    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// `(module, file_count)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
