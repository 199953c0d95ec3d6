//! Module graph model and builder.
//!
//! This module defines the data structures of a scan (`SourceFile`, `Edge`, `ModuleInfo`,
//! `ModuleGraph`), the accumulating `GraphBuilder`, and the pipeline that walks a tree and
//! folds every file into a graph (`ModuleGraph::build`).
//!
//! Per-file work (read, resolve, extract, filter) runs in parallel. Each worker folds into its
//! own [`ScanState`]; states are combined through [`Mergeable`], so the result does not depend on
//! processing order.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{ConfigError, GraphError};
use crate::parser::SwiftImportParser;
use crate::rules::RuleSet;

pub mod filter;
pub mod resolver;
pub mod stats;

pub use filter::{Decision, FilterEngine};
pub use resolver::{relative_path, ModuleRegistry, ModuleResolver};
pub use stats::RunStats;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    System,
    Custom,
}

impl ModuleKind {
    #[must_use]
    pub fn classify(module: &str) -> Self {
        if crate::parser::is_system_module(module) {
            Self::System
        } else {
            Self::Custom
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// Directed dependency `from -> to`. Ordered lexicographically by `(from, to)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleInfo {
    pub kind: ModuleKind,
    /// Qualifying import occurrences naming this module, across all files.
    pub count: usize,
}

/// One discovered source file after resolution and extraction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rel_path: String,
    pub module: String,
    pub imports: Vec<String>,
}

/// A value whose contents can absorb another value of the same type.
///
/// Implementations must be commutative and associative over the occurrences they hold, so that
/// any merge order of partial results yields the same final state.
pub trait Mergeable {
    fn merge(&mut self, other: Self);
}

/// Grow-only accumulator for edges and per-target reference counts.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    edges: BTreeSet<Edge>,
    targets: BTreeMap<String, ModuleInfo>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `from -> to` unless present. Self-edges are never stored.
    ///
    /// Returns true if the edge was newly inserted.
    pub fn record_edge(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        self.edges.insert(Edge { from: from.to_string(), to: to.to_string() })
    }

    /// Count one more occurrence of `module`, regardless of edge deduplication.
    pub fn increment_count(&mut self, module: &str, kind: ModuleKind) {
        self.targets.entry(module.to_string()).or_insert(ModuleInfo { kind, count: 0 }).count += 1;
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn count_of(&self, module: &str) -> usize {
        self.targets.get(module).map_or(0, |m| m.count)
    }

    #[must_use]
    pub fn finish(self) -> ModuleGraph {
        let sources = self.edges.iter().map(|e| e.from.clone()).collect();
        ModuleGraph { sources, targets: self.targets, edges: self.edges }
    }
}

impl Mergeable for GraphBuilder {
    fn merge(&mut self, other: Self) {
        self.edges.extend(other.edges);
        for (name, info) in other.targets {
            self.targets.entry(name).or_insert(ModuleInfo { kind: info.kind, count: 0 }).count +=
                info.count;
        }
    }
}

/// Per-worker scan state: graph contributions plus diagnostic counters.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub builder: GraphBuilder,
    pub stats: RunStats,
}

impl ScanState {
    /// Fold every import occurrence of `file` through `filter` into the builder.
    pub fn fold_file(&mut self, file: &SourceFile, filter: &FilterEngine<'_>) {
        self.stats.files_processed += 1;
        self.stats.imports_found += file.imports.len();
        for token in &file.imports {
            match filter.decide(&file.module, token) {
                Decision::Keep(kind) => {
                    self.builder.record_edge(&file.module, token);
                    self.builder.increment_count(token, kind);
                    self.stats.qualifying_imports += 1;
                }
                Decision::Excluded => {
                    tracing::debug!(module = %token, file = %file.rel_path, "import excluded");
                    *self.stats.excluded_modules.entry(token.clone()).or_insert(0) += 1;
                }
                Decision::SystemSuppressed | Decision::SelfImport => {}
            }
        }
    }
}

impl Mergeable for ScanState {
    fn merge(&mut self, other: Self) {
        self.builder.merge(other.builder);
        self.stats.merge(other.stats);
    }
}

/// Immutable result of a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleGraph {
    /// Modules appearing as the source of at least one edge.
    pub sources: BTreeSet<String>,
    /// Imported modules with kind and reference count.
    pub targets: BTreeMap<String, ModuleInfo>,
    pub edges: BTreeSet<Edge>,
}

/// Inputs of a scan, already validated and compiled.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub rules: RuleSet,
    pub include_system: bool,
    pub no_ignore: bool,
    /// Worker threads; 0 uses rayon's default pool.
    pub jobs: usize,
}

impl ScanOptions {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, rules: RuleSet) -> Self {
        Self { root: root.into(), rules, include_system: false, no_ignore: false, jobs: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub graph: ModuleGraph,
    pub stats: RunStats,
    pub registry: ModuleRegistry,
}

impl ModuleGraph {
    /// Walk `opts.root`, extract imports from every Swift file and assemble the module graph.
    ///
    /// Unreadable files are skipped and listed in `RunStats::unreadable`.
    ///
    /// # Errors
    /// Returns `GraphError::Config` if the root is missing or not a directory, and
    /// `GraphError::Io` if the worker pool cannot be created.
    pub fn build(opts: &ScanOptions) -> Result<ScanOutcome, GraphError> {
        validate_root(&opts.root)?;
        tracing::info!(
            root = %opts.root.display(),
            module_rules = opts.rules.module_rules.len(),
            excludes = opts.rules.excludes.len(),
            include_system = opts.include_system,
            "scanning"
        );

        let files = crate::utils::file_walker::swift_files(&opts.root, opts.no_ignore);
        let resolver = ModuleResolver::new(&opts.rules.module_rules);
        let registry = ModuleRegistry::collect(
            files.iter().map(|p| relative_path(&opts.root, p)),
            &resolver,
        );
        tracing::debug!(modules = registry.len(), "project module registry built");

        let parser = SwiftImportParser::new();
        let filter = FilterEngine::new(&opts.rules, opts.include_system);
        let scan = || {
            files
                .par_iter()
                .fold(ScanState::default, |mut state, path| {
                    process_file(&opts.root, path, &resolver, &parser, &filter, &mut state);
                    state
                })
                .reduce(ScanState::default, |mut a, b| {
                    a.merge(b);
                    a
                })
        };
        let state = if opts.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(opts.jobs)
                .build()
                .map_err(|e| GraphError::Io(std::io::Error::other(e.to_string())))?;
            pool.install(scan)
        } else {
            scan()
        };

        let ScanState { builder, mut stats } = state;
        let graph = builder.finish();
        stats.files_discovered = files.len();
        stats.project_modules = registry.len();
        stats.unreadable.sort();
        for info in graph.targets.values() {
            match info.kind {
                ModuleKind::System => stats.system_modules += 1,
                ModuleKind::Custom => stats.custom_modules += 1,
            }
        }
        tracing::info!(
            files = stats.files_processed,
            imports = stats.qualifying_imports,
            modules = graph.targets.len(),
            edges = graph.edges.len(),
            "scan complete"
        );
        Ok(ScanOutcome { graph, stats, registry })
    }

    /// Modules ranked by descending reference count; ties keep lexicographic order.
    #[must_use]
    pub fn top_modules(&self, n: usize) -> Vec<(&str, ModuleInfo)> {
        let mut rows: Vec<(&str, ModuleInfo)> =
            self.targets.iter().map(|(name, info)| (name.as_str(), *info)).collect();
        // stable: BTreeMap order survives among equal counts
        rows.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        rows.truncate(n);
        rows
    }

    /// Modules appearing anywhere in the graph, as source or target.
    #[must_use]
    pub fn all_modules(&self) -> BTreeSet<&str> {
        self.sources.iter().chain(self.targets.keys()).map(String::as_str).collect()
    }

    /// Save as JSON.
    ///
    /// # Errors
    /// Returns `GraphError::Serialize` on encoding failure or `GraphError::Io` on write failure.
    pub fn save_json(&self, path: &Path) -> Result<(), GraphError> {
        let data =
            serde_json::to_string_pretty(self).map_err(|e| GraphError::Serialize(e.to_string()))?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load from JSON written by `save_json`.
    ///
    /// # Errors
    /// Returns `GraphError::Io` on read failure or `GraphError::Serialize` on decoding failure.
    pub fn load_json(path: &Path) -> Result<Self, GraphError> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| GraphError::Serialize(e.to_string()))
    }
}

fn validate_root(root: &Path) -> Result<(), ConfigError> {
    if !root.exists() {
        return Err(ConfigError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ConfigError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

fn process_file(
    root: &Path,
    path: &Path,
    resolver: &ModuleResolver<'_>,
    parser: &SwiftImportParser,
    filter: &FilterEngine<'_>,
    state: &mut ScanState,
) {
    let rel_path = relative_path(root, path);
    if filter.skip_file(&rel_path) {
        tracing::debug!(file = %rel_path, "file excluded");
        state.stats.files_excluded += 1;
        return;
    }
    // headers are ASCII; stray non-UTF-8 bytes in comments must not drop the file
    let content = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(file = %rel_path, error = %e, "skipping unreadable file");
            state.stats.unreadable.push(rel_path);
            return;
        }
    };
    let file = SourceFile {
        path: path.to_path_buf(),
        module: resolver.resolve(&rel_path),
        imports: parser.extract_imports(&content),
        rel_path,
    };
    state.fold_file(&file, filter);
}
