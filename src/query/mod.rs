use crate::graph::{ModuleGraph, ModuleInfo};

/// Query trait implemented by all query types.
///
/// Given an immutable reference to a `ModuleGraph`, returns a result of type `R`.
pub trait Query<R> {
    fn run(&self, graph: &ModuleGraph) -> R;
}

/// Modules the given module imports directly, sorted.
pub struct DependenciesQuery {
    pub module: String,
}

impl DependenciesQuery {
    #[must_use]
    pub fn new(module: &str) -> Self {
        Self { module: module.to_string() }
    }
}

impl Query<Vec<String>> for DependenciesQuery {
    fn run(&self, graph: &ModuleGraph) -> Vec<String> {
        // edges are ordered by (from, to), so targets come out sorted
        graph.edges.iter().filter(|e| e.from == self.module).map(|e| e.to.clone()).collect()
    }
}

/// Modules that import the given module directly, sorted.
pub struct DependentsQuery {
    pub module: String,
}

impl DependentsQuery {
    #[must_use]
    pub fn new(module: &str) -> Self {
        Self { module: module.to_string() }
    }
}

impl Query<Vec<String>> for DependentsQuery {
    fn run(&self, graph: &ModuleGraph) -> Vec<String> {
        graph.edges.iter().filter(|e| e.to == self.module).map(|e| e.from.clone()).collect()
    }
}

/// Top-N modules by reference count.
pub struct TopModulesQuery {
    pub top: usize,
}

impl TopModulesQuery {
    #[must_use]
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl Query<Vec<(String, ModuleInfo)>> for TopModulesQuery {
    fn run(&self, graph: &ModuleGraph) -> Vec<(String, ModuleInfo)> {
        graph.top_modules(self.top).into_iter().map(|(n, i)| (n.to_string(), i)).collect()
    }
}
