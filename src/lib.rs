//! swift-module-graph: module dependency maps for Swift trees
//!
//! Infer a module-level dependency graph from the import declarations at the top of each Swift
//! file. No compilation and no symbol resolution: a file's module comes from its path, its
//! dependencies from its leading `import` lines.
//!
//! # Pipeline
//! - Discovery of `.swift` files with `.gitignore`/`.ignore` support
//! - Module resolution via ordered capturing regexes, falling back to the first path segment
//! - Import extraction from the leading import block
//! - Wildcard exclusion by path and by module name, plus system-framework suppression
//! - Deduplicated edges and per-module reference counts, emitted as sorted Graphviz DOT
//!
//! # Quickstart (Library)
//! ```no_run
//! use swift_module_graph::graph::{ModuleGraph, ScanOptions};
//! use swift_module_graph::rules::RuleSet;
//! use swift_module_graph::visualization::DotGenerator;
//!
//! let rules = RuleSet::new(&["/Sources/([^/]+)/"], &["*Tests"]).expect("valid rules");
//! let outcome = ModuleGraph::build(&ScanOptions::new(".", rules)).expect("scan");
//! println!("{}", DotGenerator::new().generate_dot(&outcome.graph));
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! swift-module-graph build --path . -p '/Sources/([^/]+)/' -e '*Tests' --render svg
//! swift-module-graph query dependents --path . --module Core
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod logger;
pub mod parser;
pub mod query;
pub mod rules;
pub mod utils;
pub mod visualization;
