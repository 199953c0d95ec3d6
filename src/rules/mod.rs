//! Pattern rules.
//!
//! Two unrelated pattern kinds live here and are deliberately kept apart:
//!
//! - [`ModuleRule`]: a real regular expression with a capture group, used to derive a module
//!   name from a file path relative to the scan root.
//! - [`ExcludePattern`]: a shell-style wildcard (`*` and `?` only), matched against the whole
//!   relative path or the whole import token. Everything else in the pattern is literal.
use regex::Regex;

use crate::errors::ConfigError;

/// A capturing regular expression that yields a module name from a relative path.
#[derive(Debug, Clone)]
pub struct ModuleRule {
    source: String,
    regex: Regex,
}

impl ModuleRule {
    /// Compile a module rule.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidModuleRule` if the regex does not compile and
    /// `ConfigError::MissingCaptureGroup` if it has no capture group.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidModuleRule {
            pattern: pattern.to_string(),
            source,
        })?;
        // Group 0 is the whole match
        if regex.captures_len() < 2 {
            return Err(ConfigError::MissingCaptureGroup(pattern.to_string()));
        }
        Ok(Self { source: pattern.to_string(), regex })
    }

    /// First capture group of the first match, if any and non-empty.
    #[must_use]
    pub fn capture<'p>(&self, rel_path: &'p str) -> Option<&'p str> {
        let caps = self.regex.captures(rel_path)?;
        caps.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Wildcard pattern used to exclude files (by relative path) or imports (by module name).
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    source: String,
    regex: Regex,
}

impl ExcludePattern {
    /// Compile a wildcard pattern. `*` matches any run of characters (including `/`),
    /// `?` matches exactly one character. Matching is case-sensitive and whole-string.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidExcludePattern` if the translated pattern fails to compile
    /// (for example when it exceeds the regex size limit).
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&glob_to_regex(pattern)).map_err(|source| {
            ConfigError::InvalidExcludePattern { pattern: pattern.to_string(), source }
        })?;
        Ok(Self { source: pattern.to_string(), regex })
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 8);
    out.push_str("^(?s:");
    let mut buf = [0u8; 4];
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out.push_str(")$");
    out
}

/// Ordered module rules plus exclusion patterns for one run.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub module_rules: Vec<ModuleRule>,
    pub excludes: Vec<ExcludePattern>,
}

impl RuleSet {
    /// Compile all patterns, failing on the first bad one.
    ///
    /// # Errors
    /// Returns the `ConfigError` of the first pattern that fails to compile.
    pub fn new<S: AsRef<str>>(module_patterns: &[S], excludes: &[S]) -> Result<Self, ConfigError> {
        let module_rules =
            module_patterns.iter().map(|p| ModuleRule::new(p.as_ref())).collect::<Result<_, _>>()?;
        let excludes =
            excludes.iter().map(|p| ExcludePattern::new(p.as_ref())).collect::<Result<_, _>>()?;
        Ok(Self { module_rules, excludes })
    }

    /// True if the relative file path matches any exclude pattern.
    #[must_use]
    pub fn excludes_path(&self, rel_path: &str) -> bool {
        self.excludes.iter().any(|p| p.matches(rel_path))
    }

    /// True if the import token matches any exclude pattern.
    #[must_use]
    pub fn excludes_module(&self, module: &str) -> bool {
        self.excludes.iter().any(|p| p.matches(module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_rule_captures_first_group() {
        let rule = ModuleRule::new("/Sources/([^/]+)/").unwrap();
        assert_eq!(
            rule.capture("Authentication/Sources/AuthenticationUI/File.swift"),
            Some("AuthenticationUI")
        );
        assert_eq!(rule.capture("App/Camera/View.swift"), None);
    }

    #[test]
    fn module_rule_rejects_bad_regex_and_missing_group() {
        assert!(matches!(ModuleRule::new("(unclosed"), Err(ConfigError::InvalidModuleRule { .. })));
        assert!(matches!(ModuleRule::new("Sources/.*"), Err(ConfigError::MissingCaptureGroup(_))));
        assert!(matches!(
            ModuleRule::new("(?:Sources)/x"),
            Err(ConfigError::MissingCaptureGroup(_))
        ));
    }

    #[test]
    fn empty_capture_is_no_match() {
        let rule = ModuleRule::new("^Modules/([A-Za-z]*)/").unwrap();
        assert_eq!(rule.capture("Modules//x.swift"), None);
    }

    #[test]
    fn glob_star_and_question_mark() {
        let p = ExcludePattern::new("*Tests").unwrap();
        assert!(p.matches("FeatureTests"));
        assert!(p.matches("Tests"));
        assert!(!p.matches("FeatureTest"));
        assert!(!p.matches("FeatureTestsKit"));

        let q = ExcludePattern::new("Mod?").unwrap();
        assert!(q.matches("ModA"));
        assert!(!q.matches("Mod"));
        assert!(!q.matches("ModAB"));
    }

    #[test]
    fn glob_star_crosses_separators() {
        let p = ExcludePattern::new("Pods/*").unwrap();
        assert!(p.matches("Pods/Alamofire/Source/Session.swift"));
        assert!(!p.matches("App/Pods/x.swift"));
    }

    #[test]
    fn glob_treats_regex_metacharacters_literally() {
        let p = ExcludePattern::new("Core.Kit[1]+").unwrap();
        assert!(p.matches("Core.Kit[1]+"));
        assert!(!p.matches("CoreXKit1"));
        let dot = ExcludePattern::new("a.b").unwrap();
        assert!(!dot.matches("axb"));
    }

    #[test]
    fn glob_is_case_sensitive() {
        let p = ExcludePattern::new("*tests").unwrap();
        assert!(!p.matches("FeatureTests"));
    }

    #[test]
    fn rule_set_reports_first_bad_pattern() {
        let err = RuleSet::new(&["/Sources/([^/]+)/", "[bad"], &[]).unwrap_err();
        assert!(err.to_string().contains("[bad"));
        let ok = RuleSet::new(&["/Sources/([^/]+)/"], &["*Tests", "Pods/*"]).unwrap();
        assert!(ok.excludes_module("AppTests"));
        assert!(ok.excludes_path("Pods/Foo/Bar.swift"));
        assert!(!ok.excludes_module("App"));
    }
}
