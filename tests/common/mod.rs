#![allow(dead_code)]
use std::fs;
use std::path::Path;

/// Write `(relative path, contents)` pairs under `root`, creating directories.
pub fn write_tree(root: &Path, entries: &[(&str, &str)]) {
    for (rel, body) in entries {
        let p = root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, body).unwrap();
    }
}

/// A small multi-package Swift layout.
pub fn sample_project(root: &Path) {
    write_tree(
        root,
        &[
            (
                "App/Sources/App/AppDelegate.swift",
                "//\n//  AppDelegate.swift\n//\n\nimport UIKit\nimport Feature\nimport Core\n\n@main\nclass AppDelegate {}\n",
            ),
            ("App/Sources/App/Root.swift", "import SwiftUI\nimport Feature\n\nstruct Root {}\n"),
            ("Feature/Sources/Feature/View.swift", "@testable import Core\nimport Foundation\n\nstruct View {}\n"),
            ("Feature/Sources/Feature/Empty.swift", "// nothing here\n"),
            ("Feature/Tests/FeatureTests/ViewTests.swift", "import XCTest\nimport Feature\nimport FeatureTests\n"),
            ("Core/Sources/Core/Model.swift", "import Foundation\nimport Core\n\nstruct Model {}\nimport Late\n"),
        ],
    );
}
