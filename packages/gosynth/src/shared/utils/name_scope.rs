//! Identifier allocation for generated scopes
//!
//! Tracks the names already bound inside one generated function (receiver,
//! parameters, temporaries) and hands out fresh ones on collision.

use std::collections::HashSet;

use crate::shared::constants::go::KEYWORDS;

/// Set of identifiers bound in the current generated scope
#[derive(Debug, Clone, Default)]
pub struct NameScope {
    taken: HashSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name without renaming it
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Bind `base`, or the first free `base1`, `base2`, ... when taken
    pub fn fresh(&mut self, base: &str) -> String {
        let base = if base.is_empty() || base == "_" {
            "arg"
        } else {
            base
        };
        let base = if KEYWORDS.contains(&base) {
            format!("{}_", base)
        } else {
            base.to_string()
        };

        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Forget every binding
    pub fn clear(&mut self) {
        self.taken.clear();
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
