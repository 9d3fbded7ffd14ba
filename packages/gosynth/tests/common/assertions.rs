//! Custom assertions for synthesized output

use std::fs;
use std::path::Path;

use gosynth::features::parsing::{GoParser, ParseFileUseCase};

/// Read a synthesized file, failing with its path when it is missing
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{} not written: {}", path.display(), e))
}

/// Assert every fragment occurs in `text`
pub fn assert_contains_all(text: &str, fragments: &[&str]) {
    for fragment in fragments {
        assert!(
            text.contains(fragment),
            "Expected {:?} in:\n{}",
            fragment,
            text
        );
    }
}

/// Assert a written file is syntactically valid Go
pub fn assert_parses(path: &Path) {
    let parser = ParseFileUseCase::new(GoParser::new());
    if let Err(e) = parser.execute_path(path) {
        panic!("{} does not parse: {}", path.display(), e);
    }
}

/// Number of top-level declarations of `kind` ("func", "type") in `text`
pub fn count_decls(text: &str, kind: &str) -> usize {
    let prefix = format!("{} ", kind);
    text.lines().filter(|line| line.starts_with(&prefix)).count()
}
