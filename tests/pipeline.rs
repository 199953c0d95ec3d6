mod common;

use std::fs;

use swift_module_graph::errors::{ConfigError, GraphError};
use swift_module_graph::graph::{Edge, ModuleGraph, ModuleKind, ScanOptions};
use swift_module_graph::rules::RuleSet;
use swift_module_graph::visualization::{DotGenerator, DotOptions};
use tempfile::tempdir;

fn sources_rule() -> RuleSet {
    RuleSet::new(&["/Sources/([^/]+)/"], &[]).unwrap()
}

fn edge(from: &str, to: &str) -> Edge {
    Edge { from: from.to_string(), to: to.to_string() }
}

#[test]
fn builds_expected_graph_for_sample_project() {
    let dir = tempdir().unwrap();
    common::sample_project(dir.path());

    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), sources_rule())).unwrap();
    let g = &outcome.graph;

    let edges: Vec<Edge> = g.edges.iter().cloned().collect();
    assert_eq!(
        edges,
        vec![
            edge("App", "Core"),
            edge("App", "Feature"),
            edge("Feature", "Core"),
            edge("Feature", "FeatureTests"),
        ]
    );
    assert_eq!(g.targets["Feature"].count, 2);
    assert_eq!(g.targets["Core"].count, 2);
    assert_eq!(g.targets["FeatureTests"].count, 1);
    assert!(g.targets.values().all(|i| i.kind == ModuleKind::Custom));
    // imports after the first declaration are not seen
    assert!(!g.targets.contains_key("Late"));

    let s = &outcome.stats;
    assert_eq!(s.files_discovered, 6);
    assert_eq!(s.files_processed, 6);
    assert_eq!(s.imports_found, 12);
    assert_eq!(s.qualifying_imports, 5);
    assert_eq!(s.custom_modules, 3);
    assert_eq!(s.system_modules, 0);
    assert_eq!(s.project_modules, 3);
    assert!(outcome.registry.contains("App"));
}

#[test]
fn two_files_in_same_module_give_one_edge_and_count_two() {
    let dir = tempdir().unwrap();
    common::write_tree(dir.path(), &[("A/one.swift", "import B\n"), ("A/two.swift", "import B\n")]);

    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), RuleSet::default())).unwrap();
    assert_eq!(outcome.graph.edges.len(), 1);
    assert!(outcome.graph.edges.contains(&edge("A", "B")));
    assert_eq!(outcome.graph.targets["B"].count, 2);
}

#[test]
fn system_framework_toggle() {
    let dir = tempdir().unwrap();
    common::write_tree(dir.path(), &[("App/View.swift", "import UIKit\n")]);

    let off = ModuleGraph::build(&ScanOptions::new(dir.path(), RuleSet::default())).unwrap();
    assert!(off.graph.edges.is_empty());
    assert!(off.graph.targets.is_empty());

    let mut opts = ScanOptions::new(dir.path(), RuleSet::default());
    opts.include_system = true;
    let on = ModuleGraph::build(&opts).unwrap();
    assert_eq!(on.graph.targets["UIKit"].count, 1);
    assert_eq!(on.graph.targets["UIKit"].kind, ModuleKind::System);
    assert_eq!(on.graph.edges.len(), 1);
    assert_eq!(on.stats.system_modules, 1);
}

#[test]
fn empty_and_comment_only_files_still_count_as_processed() {
    let dir = tempdir().unwrap();
    common::write_tree(
        dir.path(),
        &[("M/Empty.swift", ""), ("M/Comments.swift", "// header\n/*\n * block\n */\n\n")],
    );
    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), RuleSet::default())).unwrap();
    assert_eq!(outcome.stats.files_processed, 2);
    assert_eq!(outcome.stats.imports_found, 0);
    assert!(outcome.graph.edges.is_empty());
}

#[test]
fn path_and_module_exclusion() {
    let dir = tempdir().unwrap();
    common::sample_project(dir.path());
    let rules = RuleSet::new(&["/Sources/([^/]+)/"], &["*/Tests/*", "Core"]).unwrap();

    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), rules)).unwrap();
    assert_eq!(outcome.stats.files_excluded, 1);
    assert_eq!(outcome.stats.files_processed, 5);
    assert!(!outcome.graph.targets.contains_key("FeatureTests"));
    assert!(!outcome.graph.targets.contains_key("Core"));
    // Core imports: AppDelegate, View, and Model's self-import
    assert_eq!(outcome.stats.excluded_modules.get("Core"), Some(&3));
    assert_eq!(outcome.stats.excluded_module_count(), 1);
    assert_eq!(outcome.graph.edges.len(), 1);
}

#[test]
fn wildcard_module_exclusion_is_literal() {
    let dir = tempdir().unwrap();
    common::write_tree(dir.path(), &[("App/A.swift", "import FeatureTests\nimport FeatureTest\n")]);
    let rules = RuleSet::new::<&str>(&[], &["*Tests"]).unwrap();
    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), rules)).unwrap();
    assert!(outcome.graph.targets.contains_key("FeatureTest"));
    assert!(!outcome.graph.targets.contains_key("FeatureTests"));
}

#[test]
fn no_self_edges_ever() {
    let dir = tempdir().unwrap();
    common::write_tree(
        dir.path(),
        &[("Core/A.swift", "import Core\nimport Core\n"), ("Core/B.swift", "import Util\n")],
    );
    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), RuleSet::default())).unwrap();
    assert!(outcome.graph.edges.iter().all(|e| e.from != e.to));
    assert!(!outcome.graph.targets.contains_key("Core"));
    let dot = DotGenerator::new().generate_dot(&outcome.graph);
    assert!(!dot.contains("\"Core\" -> \"Core\""));
}

#[test]
fn non_utf8_bytes_do_not_drop_a_file() {
    let dir = tempdir().unwrap();
    common::write_tree(dir.path(), &[("App/Good.swift", "import Core\n")]);
    // Latin-1 copyright sign in the header comment
    fs::write(dir.path().join("App/Legacy.swift"), b"// (c) \xa9 Corp\nimport Net\n").unwrap();

    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), RuleSet::default())).unwrap();
    assert!(outcome.stats.unreadable.is_empty());
    assert_eq!(outcome.stats.files_processed, 2);
    assert_eq!(outcome.graph.targets["Core"].count, 1);
    assert_eq!(outcome.graph.targets["Net"].count, 1);
}

#[test]
fn missing_root_is_a_config_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = ModuleGraph::build(&ScanOptions::new(&missing, RuleSet::default())).unwrap_err();
    assert!(matches!(err, GraphError::Config(ConfigError::RootNotFound(_))));

    let file = dir.path().join("file.swift");
    fs::write(&file, "import A\n").unwrap();
    let err = ModuleGraph::build(&ScanOptions::new(&file, RuleSet::default())).unwrap_err();
    assert!(matches!(err, GraphError::Config(ConfigError::RootNotDirectory(_))));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let dir = tempdir().unwrap();
    common::sample_project(dir.path());
    let mut opts = ScanOptions::new(dir.path(), sources_rule());
    opts.include_system = true;
    let dot_opts = DotOptions { include_system: true, ..DotOptions::default() };

    let first = ModuleGraph::build(&opts).unwrap();
    opts.jobs = 1;
    let second = ModuleGraph::build(&opts).unwrap();
    assert_eq!(first.graph, second.graph);
    assert_eq!(first.stats, second.stats);
    let gen = DotGenerator::new();
    assert_eq!(
        gen.generate_dot_with_options(&first.graph, dot_opts),
        gen.generate_dot_with_options(&second.graph, dot_opts)
    );
}

#[test]
fn graph_json_round_trip() {
    let dir = tempdir().unwrap();
    common::sample_project(dir.path());
    let outcome = ModuleGraph::build(&ScanOptions::new(dir.path(), sources_rule())).unwrap();
    let path = dir.path().join("graph.json");
    outcome.graph.save_json(&path).unwrap();
    assert_eq!(ModuleGraph::load_json(&path).unwrap(), outcome.graph);
}
