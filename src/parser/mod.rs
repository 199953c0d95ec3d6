//! Lexical import extraction for Swift sources.
//!
//! Only the leading import block is scanned: blank lines and comment lines are skipped, and the
//! first line that is neither a comment nor an import declaration ends the scan. Imports written
//! further down a file are not seen.
use regex::Regex;

pub mod frameworks;

pub use frameworks::is_system_module;

#[derive(Debug)]
pub struct ImportPatterns {
    pub import_decl: Regex,
}

impl ImportPatterns {
    #[must_use]
    pub fn compile() -> Self {
        // attributes, optional access level, `import`, optional kind, dotted identifier, then a boundary
        // so a partially matched name is rejected instead of truncated
        let import_decl = Regex::new(
            r"^(?:@[A-Za-z_][A-Za-z0-9_]*(?:\([^)]*\))?\s+)*(?:(?:public|internal|private|fileprivate|open|package)\s+)?import\s+(?:(?P<kind>struct|class|enum|protocol)\s+)?(?P<module>[\p{XID_Start}_]\p{XID_Continue}*(?:\.[\p{XID_Start}_]\p{XID_Continue}*)*)(?:\s|;|//|$)",
        )
        .expect("import declaration regex compiles");
        Self { import_decl }
    }
}

impl Default for ImportPatterns {
    fn default() -> Self {
        Self::compile()
    }
}

/// What a single line of the header contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    Blank,
    Comment,
    Import(String),
    Code,
}

#[derive(Debug, Default)]
pub struct SwiftImportParser {
    patterns: ImportPatterns,
}

impl SwiftImportParser {
    #[must_use]
    pub fn new() -> Self {
        Self { patterns: ImportPatterns::compile() }
    }

    /// Raw module tokens of the leading import block, in file order. Duplicates are kept.
    #[must_use]
    pub fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut out = Vec::new();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for line in content.lines() {
            match self.classify_line(line) {
                HeaderLine::Blank | HeaderLine::Comment => {}
                HeaderLine::Import(module) => out.push(module),
                HeaderLine::Code => break,
            }
        }
        out
    }

    #[must_use]
    pub fn classify_line(&self, line: &str) -> HeaderLine {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return HeaderLine::Blank;
        }
        if is_comment(trimmed) {
            return HeaderLine::Comment;
        }
        let Some(cap) = self.patterns.import_decl.captures(trimmed) else {
            return HeaderLine::Code;
        };
        match cap.name("module").map(|m| m.as_str()) {
            Some(module) if module != "import" => HeaderLine::Import(module.to_string()),
            _ => HeaderLine::Code,
        }
    }
}

// Line comments, block comment openers/closers and doc-block continuation lines. A block comment
// is not tracked across lines; a continuation line that does not start with `*` ends the header.
fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}
