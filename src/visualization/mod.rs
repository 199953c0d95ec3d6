use crate::errors::GraphError;
use crate::graph::{ModuleGraph, ModuleKind};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Default name of the emitted graph description.
pub const DEFAULT_OUTPUT: &str = "module_dependencies.dot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    LR,
    TB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Curved,
    Ortho,
    Polyline,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub theme: DotTheme,
    pub rankdir: RankDir,
    pub splines: EdgeStyle,
    pub legend: bool,
    /// Emit the system-module group.
    pub include_system: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            theme: DotTheme::Light,
            rankdir: RankDir::LR,
            splines: EdgeStyle::Curved,
            legend: true,
            include_system: false,
        }
    }
}

/// Node role in the emitted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    System,
    Custom,
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    #[must_use]
    pub fn generate_dot(&self, graph: &ModuleGraph) -> String {
        self.generate_dot_with_options(graph, DotOptions::default())
    }

    /// Render `graph` as a Graphviz digraph. Output is sorted, so equal graphs give equal text.
    #[must_use]
    pub fn generate_dot_with_options(&self, graph: &ModuleGraph, opts: DotOptions) -> String {
        let mut s = String::new();
        s.push_str("digraph ModuleDependencies {\n");
        let rank = match opts.rankdir {
            RankDir::LR => "LR",
            RankDir::TB => "TB",
        };
        let splines = match opts.splines {
            EdgeStyle::Curved => "curved",
            EdgeStyle::Ortho => "ortho",
            EdgeStyle::Polyline => "polyline",
        };
        let (bg, edge_color, font_color) = match opts.theme {
            DotTheme::Light => ("white", "#7f7f7f", "black"),
            DotTheme::Dark => ("#1e1e1e", "#a0a0a0", "white"),
        };
        let _ = write!(
            s,
            "  rankdir={rank};\n  graph [fontname=Helvetica, splines={splines}, bgcolor=\"{bg}\", nodesep=0.4, ranksep=0.9];\n  node [shape=box, fontname=Helvetica, fontsize=10, style=\"filled,rounded\", fontcolor=\"{font_color}\"];\n  edge [color=\"{edge_color}\", arrowsize=0.7];\n"
        );

        s.push_str("\n  // source modules\n");
        for name in &graph.sources {
            write_node(&mut s, name, &escape_label(name), NodeRole::Source, opts.theme);
        }

        if opts.include_system {
            s.push_str("\n  // system modules\n");
            for (name, info) in graph.targets.iter().filter(|(_, i)| i.kind == ModuleKind::System) {
                write_node(&mut s, name, &count_label(name, info.count), NodeRole::System, opts.theme);
            }
        }

        s.push_str("\n  // custom modules\n");
        for (name, info) in graph.targets.iter().filter(|(_, i)| i.kind == ModuleKind::Custom) {
            write_node(&mut s, name, &count_label(name, info.count), NodeRole::Custom, opts.theme);
        }

        s.push_str("\n  // dependencies\n");
        for edge in graph.edges.iter().filter(|e| e.from != e.to) {
            if !opts.include_system
                && graph.targets.get(&edge.to).is_some_and(|i| i.kind == ModuleKind::System)
            {
                continue;
            }
            let _ = writeln!(s, "  \"{}\" -> \"{}\";", sanitize_id(&edge.from), sanitize_id(&edge.to));
        }

        if opts.legend {
            s.push_str("\n  subgraph cluster_legend {\n    label=\"Legend\";\n    color=grey;\n");
            let mut roles = vec![("Source module", NodeRole::Source)];
            if opts.include_system {
                roles.push(("System framework", NodeRole::System));
            }
            roles.push(("Project module", NodeRole::Custom));
            for (label, role) in roles {
                let (fill, shape) = style_for_role(role, opts.theme);
                let id = sanitize_id(&format!("legend_{label}"));
                let _ = writeln!(s, "    \"{id}\" [label=\"{label}\", fillcolor=\"{fill}\", shape=\"{shape}\"];");
            }
            s.push_str("  }\n");
        }

        s.push_str("}\n");
        s
    }

    /// Write the DOT description of `graph` to `path`.
    ///
    /// # Errors
    /// Returns `GraphError::Io` if the file cannot be written.
    pub fn write_dot(&self, graph: &ModuleGraph, opts: DotOptions, path: &Path) -> Result<(), GraphError> {
        std::fs::write(path, self.generate_dot_with_options(graph, opts))?;
        Ok(())
    }
}

fn write_node(out: &mut String, name: &str, label: &str, role: NodeRole, theme: DotTheme) {
    let (fill, shape) = style_for_role(role, theme);
    let extra = if role == NodeRole::Source { ", penwidth=2" } else { "" };
    let _ = writeln!(
        out,
        "  \"{}\" [label=\"{label}\", fillcolor=\"{fill}\", shape=\"{shape}\"{extra}];",
        sanitize_id(name)
    );
}

fn count_label(name: &str, count: usize) -> String {
    let unit = if count == 1 { "ref" } else { "refs" };
    format!("{}\\n({count} {unit})", escape_label(name))
}

fn sanitize_id(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn style_for_role(role: NodeRole, theme: DotTheme) -> (&'static str, &'static str) {
    match (theme, role) {
        (DotTheme::Light, NodeRole::Source) => ("#e0f3ff", "component"),
        (DotTheme::Light, NodeRole::System) => ("#eeeeee", "ellipse"),
        (DotTheme::Light, NodeRole::Custom) => ("#fff4e0", "box"),
        (DotTheme::Dark, NodeRole::Source) => ("#124559", "component"),
        (DotTheme::Dark, NodeRole::System) => ("#3a3a3a", "ellipse"),
        (DotTheme::Dark, NodeRole::Custom) => ("#7a4c00", "box"),
    }
}

/// Image formats Graphviz can produce from the emitted description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Svg,
    Png,
    Pdf,
}

impl RenderFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

/// Runs Graphviz on an emitted DOT file.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { program: "dot".to_string() }
    }
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another Graphviz layout binary (e.g. `neato`).
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// Render `dot_path` next to itself with the extension swapped. Returns the image path.
    ///
    /// # Errors
    /// Returns `GraphError::Visualization` if the image path would overwrite `dot_path`, or if
    /// Graphviz cannot be started or exits unsuccessfully.
    pub fn render(&self, dot_path: &Path, format: RenderFormat) -> Result<PathBuf, GraphError> {
        let out = dot_path.with_extension(format.extension());
        if out == dot_path {
            return Err(GraphError::Visualization(format!(
                "Refusing to render {} onto itself; write the DOT file with a .dot extension",
                dot_path.display()
            )));
        }
        let output = std::process::Command::new(&self.program)
            .arg(format!("-T{}", format.extension()))
            .arg(dot_path)
            .arg("-o")
            .arg(&out)
            .output()
            .map_err(|e| {
                GraphError::Visualization(format!("Failed to run graphviz '{}': {e}", self.program))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GraphError::Visualization(format!(
                "Graphviz '{}' failed with code {:?}: {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }
        Ok(out)
    }
}

/// Open `path` with the platform's default viewer.
///
/// # Errors
/// Returns `GraphError::Visualization` if the opener cannot be spawned.
pub fn open_in_viewer(path: &Path) -> Result<(), GraphError> {
    let mut cmd = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(windows) {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        std::process::Command::new("xdg-open")
    };
    cmd.arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| GraphError::Visualization(format!("Failed to open {}: {e}", path.display())))
}
