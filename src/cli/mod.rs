use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "swift-module-graph",
    version,
    about = "Module dependency graph for multi-module Swift trees",
    long_about = "Scan a Swift source tree, read the import declarations at the top of every file, and emit a Graphviz DOT graph of module-level dependencies. File discovery respects .gitignore and .ignore; use --no-ignore to bypass them."
)]
pub struct Cli {
    /// Suppress the run summary (errors are still reported)
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Disable colored log output
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnOffArg {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotRankDirArg {
    #[value(name = "LR")]
    LR,
    #[value(name = "TB")]
    TB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotSplinesArg {
    Curved,
    Ortho,
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderArg {
    Svg,
    Png,
    Pdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by every command that scans a tree.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Root of the source tree to scan
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
    /// Path to a TOML configuration file (default: swift-module-graph.toml in the scan root)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Regex with one capture group deriving a module name from a relative path; first match wins
    #[arg(short = 'p', long = "module-pattern", value_name = "REGEX")]
    pub module_patterns: Vec<String>,
    /// Wildcard (`*`, `?`) excluding files by relative path and imports by module name
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,
    /// Keep imports of system frameworks (UIKit, Foundation, ...)
    #[arg(long, default_value_t = false)]
    pub include_system: bool,
    /// Include files even if matched by .gitignore/.ignore or hidden
    #[arg(long, default_value_t = false)]
    pub no_ignore: bool,
    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    pub jobs: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan the tree and write the dependency graph
    Build {
        #[command(flatten)]
        scan: ScanArgs,
        /// Output DOT file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write graph and statistics as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Render the DOT file with Graphviz
        #[arg(long, value_enum)]
        render: Option<RenderArg>,
        /// Open the rendered image (or the DOT file) in the default viewer
        #[arg(long, default_value_t = false)]
        open: bool,
        /// Number of modules in the most-referenced list
        #[arg(long)]
        top: Option<usize>,
        /// DOT: theme
        #[arg(long, value_enum)]
        dot_theme: Option<DotThemeArg>,
        /// DOT: rank direction
        #[arg(long, value_enum)]
        dot_rankdir: Option<DotRankDirArg>,
        /// DOT: edge splines style
        #[arg(long, value_enum)]
        dot_splines: Option<DotSplinesArg>,
        /// DOT: include legend
        #[arg(long, value_enum)]
        dot_legend: Option<OnOffArg>,
    },
    /// List the project modules derived from file paths
    Modules {
        #[command(flatten)]
        scan: ScanArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run queries over the module graph
    Query {
        #[command(subcommand)]
        query: QueryCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// Modules imported by the given module
    Dependencies {
        #[command(flatten)]
        scan: ScanArgs,
        /// Module name
        #[arg(long)]
        module: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Modules importing the given module
    Dependents {
        #[command(flatten)]
        scan: ScanArgs,
        /// Module name
        #[arg(long)]
        module: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Most referenced modules
    Top {
        #[command(flatten)]
        scan: ScanArgs,
        /// Number of modules
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
