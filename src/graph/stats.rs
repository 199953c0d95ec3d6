use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::Mergeable;

/// Diagnostic counters for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunStats {
    pub files_discovered: usize,
    /// Files read and scanned, including those without imports.
    pub files_processed: usize,
    /// Files dropped by a path exclude pattern.
    pub files_excluded: usize,
    /// Raw import tokens extracted from processed files.
    pub imports_found: usize,
    /// Occurrences that survived filtering and were counted.
    pub qualifying_imports: usize,
    pub system_modules: usize,
    pub custom_modules: usize,
    /// Size of the project module registry.
    pub project_modules: usize,
    /// Excluded import token -> occurrences.
    pub excluded_modules: BTreeMap<String, usize>,
    /// Root-relative paths of files that could not be read.
    pub unreadable: Vec<String>,
}

impl RunStats {
    #[must_use]
    pub fn unique_modules(&self) -> usize {
        self.system_modules + self.custom_modules
    }

    /// Distinct module names discarded by exclusion.
    #[must_use]
    pub fn excluded_module_count(&self) -> usize {
        self.excluded_modules.len()
    }
}

// Derived totals (discovered, module counts, registry size) are filled in after the final merge.
impl Mergeable for RunStats {
    fn merge(&mut self, other: Self) {
        self.files_processed += other.files_processed;
        self.files_excluded += other.files_excluded;
        self.imports_found += other.imports_found;
        self.qualifying_imports += other.qualifying_imports;
        for (name, n) in other.excluded_modules {
            *self.excluded_modules.entry(name).or_insert(0) += n;
        }
        self.unreadable.extend(other.unreadable);
    }
}
