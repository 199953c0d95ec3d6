use crate::cli::{
    Cli, Commands, DotRankDirArg, DotSplinesArg, DotThemeArg, OnOffArg, OutputFormat, QueryCommands,
    RenderArg, ScanArgs,
};
use crate::errors::{ConfigError, GraphError};
use crate::graph::{ModuleGraph, ModuleInfo, RunStats, ScanOptions, ScanOutcome};
use crate::query::{DependenciesQuery, DependentsQuery, Query, TopModulesQuery};
use crate::rules::RuleSet;
use crate::utils::config::{self, Config, DotConfig};
use crate::visualization::{
    open_in_viewer, DotGenerator, DotOptions, DotTheme, EdgeStyle, RankDir, RenderFormat, Renderer,
    DEFAULT_OUTPUT,
};
use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_TOP: usize = 10;

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = configuration or output failure).
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Build {
            scan,
            output,
            json,
            render,
            open,
            top,
            dot_theme,
            dot_rankdir,
            dot_splines,
            dot_legend,
        } => {
            let (opts, cfg) = match scan_options(&scan) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    return 1;
                }
            };
            let outcome = match ModuleGraph::build(&opts) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Build failed: {e}");
                    return 1;
                }
            };
            let scan_cfg = cfg.scan();
            let top = top.or(scan_cfg.top).unwrap_or(DEFAULT_TOP);
            let output = output
                .or_else(|| scan_cfg.output.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

            let mut dot_opts = dot_options(&cfg.dot(), opts.include_system);
            if let Some(v) = dot_theme {
                dot_opts.theme = match v {
                    DotThemeArg::Light => DotTheme::Light,
                    DotThemeArg::Dark => DotTheme::Dark,
                };
            }
            if let Some(v) = dot_rankdir {
                dot_opts.rankdir = match v {
                    DotRankDirArg::LR => RankDir::LR,
                    DotRankDirArg::TB => RankDir::TB,
                };
            }
            if let Some(v) = dot_splines {
                dot_opts.splines = match v {
                    DotSplinesArg::Curved => EdgeStyle::Curved,
                    DotSplinesArg::Ortho => EdgeStyle::Ortho,
                    DotSplinesArg::Polyline => EdgeStyle::Polyline,
                };
            }
            if let Some(v) = dot_legend {
                dot_opts.legend = v == OnOffArg::On;
            }

            if let Err(e) = DotGenerator::new().write_dot(&outcome.graph, dot_opts, &output) {
                eprintln!("Failed to write DOT output {}: {e}", output.display());
                return 1;
            }

            if let Some(json_path) = json {
                if let Err(e) = write_report(&outcome, top, &json_path) {
                    eprintln!("Failed to write JSON output {}: {e}", json_path.display());
                    return 1;
                }
            }

            let mut viewable = output.clone();
            if let Some(fmt) = render {
                let fmt = match fmt {
                    RenderArg::Svg => RenderFormat::Svg,
                    RenderArg::Png => RenderFormat::Png,
                    RenderArg::Pdf => RenderFormat::Pdf,
                };
                match Renderer::new().render(&output, fmt) {
                    Ok(image) => viewable = image,
                    Err(e) => tracing::warn!("{e}; the DOT file is still available"),
                }
            }
            if open {
                if let Err(e) = open_in_viewer(&viewable) {
                    tracing::warn!("{e}");
                }
            }

            if !cli.quiet {
                print_summary(&opts.root, &outcome, &output, top);
            }
            0
        }
        Commands::Modules { scan, format } => {
            let (opts, _) = match scan_options(&scan) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    return 1;
                }
            };
            let outcome = match ModuleGraph::build(&opts) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Build failed: {e}");
                    return 1;
                }
            };
            if format == OutputFormat::Json {
                #[derive(Serialize)]
                struct Row<'a> {
                    module: &'a str,
                    files: usize,
                }
                let out: Vec<Row> =
                    outcome.registry.iter().map(|(module, files)| Row { module, files }).collect();
                return print_json(&out);
            }
            let rows: Vec<Vec<String>> = outcome
                .registry
                .iter()
                .map(|(m, n)| vec![m.to_string(), n.to_string()])
                .collect();
            println!("{}", crate::utils::table::render(&["Module", "Files"], &rows));
            0
        }
        Commands::Query { query } => match query {
            QueryCommands::Dependencies { scan, module, format } => {
                let graph = match build_graph(&scan) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let results = DependenciesQuery::new(&module).run(&graph);
                print_module_list(&results, "Dependency", format)
            }
            QueryCommands::Dependents { scan, module, format } => {
                let graph = match build_graph(&scan) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let results = DependentsQuery::new(&module).run(&graph);
                print_module_list(&results, "Dependent", format)
            }
            QueryCommands::Top { scan, top, format } => {
                let graph = match build_graph(&scan) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let rows = TopModulesQuery::new(top).run(&graph);
                if format == OutputFormat::Json {
                    let out: Vec<TopRow> = rows.iter().map(|(m, i)| TopRow::new(m, *i)).collect();
                    return print_json(&out);
                }
                println!("{}", top_table(rows.iter().map(|(m, i)| (m.as_str(), *i))));
                0
            }
        },
    }
}

/// Merge CLI flags over the config file and compile the rule set.
///
/// # Errors
/// Returns a `ConfigError` for an unreadable or malformed config file or an invalid pattern.
pub fn scan_options(scan: &ScanArgs) -> Result<(ScanOptions, Config), ConfigError> {
    let cfg = match &scan.config {
        Some(path) => config::load_config_at(path)?,
        None => config::load_config_near(&scan.path)?.unwrap_or_default(),
    };
    let scan_cfg = cfg.scan();
    let module_patterns: Vec<String> =
        scan_cfg.module_patterns.iter().chain(&scan.module_patterns).cloned().collect();
    let excludes: Vec<String> = scan_cfg.exclude.iter().chain(&scan.excludes).cloned().collect();
    let rules = RuleSet::new(&module_patterns, &excludes)?;

    let mut opts = ScanOptions::new(scan.path.clone(), rules);
    opts.include_system = scan.include_system || scan_cfg.include_system.unwrap_or(false);
    opts.no_ignore = scan.no_ignore || scan_cfg.no_ignore.unwrap_or(false);
    opts.jobs = scan.jobs.or(scan_cfg.jobs).unwrap_or(0);
    Ok((opts, cfg))
}

fn build_graph(scan: &ScanArgs) -> Result<ModuleGraph, i32> {
    let (opts, _) = scan_options(scan).map_err(|e| {
        eprintln!("Configuration error: {e}");
        1
    })?;
    ModuleGraph::build(&opts).map(|o| o.graph).map_err(|e| {
        eprintln!("Build failed: {e}");
        1
    })
}

fn dot_options(cfg: &DotConfig, include_system: bool) -> DotOptions {
    let mut opts = DotOptions { include_system, ..DotOptions::default() };
    if let Some(v) = cfg.theme.as_deref() {
        opts.theme = if v == "dark" { DotTheme::Dark } else { DotTheme::Light };
    }
    if let Some(v) = cfg.rankdir.as_deref() {
        opts.rankdir = if v == "TB" { RankDir::TB } else { RankDir::LR };
    }
    if let Some(v) = cfg.splines.as_deref() {
        opts.splines = match v {
            "ortho" => EdgeStyle::Ortho,
            "polyline" => EdgeStyle::Polyline,
            _ => EdgeStyle::Curved,
        };
    }
    if let Some(v) = cfg.legend {
        opts.legend = v;
    }
    opts
}

#[derive(Debug, Serialize)]
struct TopRow {
    module: String,
    kind: String,
    count: usize,
}

impl TopRow {
    fn new(module: &str, info: ModuleInfo) -> Self {
        Self { module: module.to_string(), kind: info.kind.to_string(), count: info.count }
    }
}

#[derive(Serialize)]
struct BuildReport<'a> {
    graph: &'a ModuleGraph,
    stats: &'a RunStats,
    top: Vec<TopRow>,
}

fn write_report(outcome: &ScanOutcome, top: usize, path: &Path) -> Result<(), GraphError> {
    let report = BuildReport {
        graph: &outcome.graph,
        stats: &outcome.stats,
        top: outcome.graph.top_modules(top).into_iter().map(|(m, i)| TopRow::new(m, i)).collect(),
    };
    let data =
        serde_json::to_string_pretty(&report).map_err(|e| GraphError::Serialize(e.to_string()))?;
    std::fs::write(path, data)?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            eprintln!("JSON encode error: {e}");
            1
        }
    }
}

fn print_module_list(modules: &[String], header: &str, format: OutputFormat) -> i32 {
    if format == OutputFormat::Json {
        return print_json(&modules);
    }
    if modules.is_empty() {
        println!("<none>");
        return 0;
    }
    let rows: Vec<Vec<String>> =
        modules.iter().enumerate().map(|(i, m)| vec![(i + 1).to_string(), m.clone()]).collect();
    println!("{}", crate::utils::table::render(&["#", header], &rows));
    0
}

fn top_table<'a>(rows: impl Iterator<Item = (&'a str, ModuleInfo)>) -> String {
    let body: Vec<Vec<String>> = rows
        .enumerate()
        .map(|(i, (m, info))| {
            vec![(i + 1).to_string(), m.to_string(), info.kind.to_string(), info.count.to_string()]
        })
        .collect();
    crate::utils::table::render(&["#", "Module", "Kind", "Refs"], &body)
}

fn print_summary(root: &Path, outcome: &ScanOutcome, output: &Path, top: usize) {
    let s = &outcome.stats;
    println!("Scanned {}", root.display());
    println!(
        "  Files processed:  {} (excluded: {}, unreadable: {})",
        s.files_processed,
        s.files_excluded,
        s.unreadable.len()
    );
    println!("  Imports:          {} counted of {} found", s.qualifying_imports, s.imports_found);
    println!(
        "  Modules:          {} (custom: {}, system: {})",
        s.unique_modules(),
        s.custom_modules,
        s.system_modules
    );
    println!("  Dependencies:     {}", outcome.graph.edges.len());
    println!("  Excluded modules: {}", s.excluded_module_count());
    println!("  Project modules:  {}", s.project_modules);
    for path in &s.unreadable {
        println!("  ! unreadable: {path}");
    }
    println!("Graph written to {}", output.display());
    if top > 0 && !outcome.graph.targets.is_empty() {
        println!("\nTop {top} modules:");
        println!("{}", top_table(outcome.graph.top_modules(top).into_iter()));
    }
}
