pub mod table {
    // Helper to render a separator line
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Helper to render a row line
    fn line(cells: &[String], widths: &[usize], right_align: &[bool]) -> String {
        let mut s = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            let pad = " ".repeat(widths[i].saturating_sub(cell.chars().count()));
            s.push(' ');
            if right_align.get(i).copied().unwrap_or(false) {
                s.push_str(&pad);
                s.push_str(cell);
            } else {
                s.push_str(cell);
                s.push_str(&pad);
            }
            s.push_str(" |");
        }
        s
    }

    /// Render an ASCII table. Columns whose body cells are all integers are right-aligned.
    #[must_use]
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate().take(cols) {
                *w = (*w).max(row.get(c).map_or(0, |s| s.chars().count()));
            }
        }
        let numeric: Vec<bool> = (0..cols)
            .map(|c| {
                !rows.is_empty()
                    && rows.iter().all(|r| r.get(c).is_some_and(|s| s.parse::<u64>().is_ok()))
            })
            .collect();

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        out.push_str(&line(&header_cells, &widths, &[]));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = (0..cols).map(|i| row.get(i).cloned().unwrap_or_default()).collect();
            out.push_str(&line(&cells, &widths, &numeric));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }
}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::ConfigError;

    /// File looked up in the scan root when no `--config` is given.
    pub const DEFAULT_CONFIG_FILE: &str = "swift-module-graph.toml";

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct ScanConfig {
        #[serde(default)]
        pub module_patterns: Vec<String>,
        #[serde(default)]
        pub exclude: Vec<String>,
        pub include_system: Option<bool>,
        pub no_ignore: Option<bool>,
        pub output: Option<String>,
        pub top: Option<usize>,
        pub jobs: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct DotConfig {
        pub theme: Option<String>,   // "light" | "dark"
        pub rankdir: Option<String>, // "LR" | "TB"
        pub splines: Option<String>, // "curved" | "ortho" | "polyline"
        pub legend: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct Config {
        pub scan: Option<ScanConfig>,
        pub dot: Option<DotConfig>,
    }

    impl Config {
        #[must_use]
        pub fn scan(&self) -> ScanConfig {
            self.scan.clone().unwrap_or_default()
        }

        #[must_use]
        pub fn dot(&self) -> DotConfig {
            self.dot.clone().unwrap_or_default()
        }
    }

    fn config_error(path: &Path, message: impl Into<String>) -> ConfigError {
        ConfigError::ConfigFile { path: path.to_path_buf(), message: message.into() }
    }

    /// Load and parse a config file.
    ///
    /// # Errors
    /// Returns `ConfigError::ConfigFile` if the file cannot be read or is not valid config TOML.
    pub fn load_config_at(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| config_error(path, e.to_string()))?;
        toml::from_str::<Config>(&data).map_err(|e| config_error(path, e.to_string()))
    }

    #[must_use]
    pub fn default_config_path(root: &Path) -> PathBuf {
        root.join(DEFAULT_CONFIG_FILE)
    }

    /// Load `swift-module-graph.toml` from `root` if it exists.
    ///
    /// # Errors
    /// Returns `ConfigError::ConfigFile` if the file exists but cannot be parsed.
    pub fn load_config_near(root: &Path) -> Result<Option<Config>, ConfigError> {
        let p = default_config_path(root);
        if p.is_file() {
            load_config_at(&p).map(Some)
        } else {
            Ok(None)
        }
    }
}

pub mod file_walker {
    use std::path::{Path, PathBuf};

    /// Source extension scanned by the tool.
    pub const SWIFT_EXTENSION: &str = "swift";

    /// Discover Swift source files under `root`, sorted.
    ///
    /// `.gitignore`/`.ignore` files and hidden entries are honored unless `no_ignore` is set.
    /// Global git excludes are always off so results do not depend on the user's machine.
    #[must_use]
    pub fn swift_files(root: &Path, no_ignore: bool) -> Vec<PathBuf> {
        let mut walker = ignore::WalkBuilder::new(root);
        walker
            .follow_links(false)
            .hidden(!no_ignore)
            .git_ignore(!no_ignore)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .ignore(!no_ignore)
            .parents(!no_ignore);
        let mut out = Vec::new();
        for entry in walker.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "walk error");
                    continue;
                }
            };
            if entry.file_type().is_some_and(|t| t.is_file())
                && entry.path().extension() == Some(std::ffi::OsStr::new(SWIFT_EXTENSION))
            {
                out.push(entry.into_path());
            }
        }
        out.sort();
        out
    }
}
