use crate::graph::ModuleKind;
use crate::rules::RuleSet;

/// Outcome of filtering one import occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep(ModuleKind),
    /// Token matched an exclude pattern; tallied as a diagnostic.
    Excluded,
    SystemSuppressed,
    SelfImport,
}

/// Applies path exclusion, module exclusion, system suppression and self-import suppression.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    rules: &'a RuleSet,
    include_system: bool,
}

impl<'a> FilterEngine<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleSet, include_system: bool) -> Self {
        Self { rules, include_system }
    }

    /// True if the whole file is dropped before extraction.
    #[must_use]
    pub fn skip_file(&self, rel_path: &str) -> bool {
        self.rules.excludes_path(rel_path)
    }

    #[must_use]
    pub fn decide(&self, source_module: &str, token: &str) -> Decision {
        if self.rules.excludes_module(token) {
            return Decision::Excluded;
        }
        let kind = ModuleKind::classify(token);
        if kind == ModuleKind::System && !self.include_system {
            return Decision::SystemSuppressed;
        }
        if token == source_module {
            return Decision::SelfImport;
        }
        Decision::Keep(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_order() {
        let rules = RuleSet::new::<&str>(&[], &["*Tests", "UIKit"]).unwrap();
        let f = FilterEngine::new(&rules, true);
        // exclusion wins over system classification
        assert_eq!(f.decide("App", "UIKit"), Decision::Excluded);
        assert_eq!(f.decide("App", "AppTests"), Decision::Excluded);
        assert_eq!(f.decide("App", "Foundation"), Decision::Keep(ModuleKind::System));
        assert_eq!(f.decide("App", "App"), Decision::SelfImport);
        assert_eq!(f.decide("App", "Core"), Decision::Keep(ModuleKind::Custom));
    }

    #[test]
    fn system_suppressed_by_default() {
        let rules = RuleSet::default();
        let f = FilterEngine::new(&rules, false);
        assert_eq!(f.decide("App", "Foundation"), Decision::SystemSuppressed);
        assert_eq!(f.decide("Foundation", "Foundation"), Decision::SystemSuppressed);
    }

    #[test]
    fn path_exclusion_uses_whole_relative_path() {
        let rules = RuleSet::new::<&str>(&[], &["*/Tests/*", "Pods/*"]).unwrap();
        let f = FilterEngine::new(&rules, false);
        assert!(f.skip_file("Feature/Tests/FeatureTests.swift"));
        assert!(f.skip_file("Pods/Alamofire/Session.swift"));
        assert!(!f.skip_file("Feature/Sources/Feature/View.swift"));
    }
}
