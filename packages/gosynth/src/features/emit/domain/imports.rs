//! Import resolution for synthesized files
//!
//! An original import survives when its local name qualifies something in
//! the synthesized text; synthetic imports are always kept.

use std::collections::BTreeSet;

use crate::features::parsing::domain::ImportSpec;

/// Standard library paths have no dot in their first segment
pub fn is_std_import(path: &str) -> bool {
    path.split('/').next().map(|s| !s.contains('.')).unwrap_or(true)
}

/// Imports a synthesized file needs, sorted standard library first
pub fn resolve_imports(
    originals: &[ImportSpec],
    used: &BTreeSet<String>,
    synthetic: &[ImportSpec],
) -> Vec<ImportSpec> {
    let mut resolved: Vec<ImportSpec> = Vec::new();
    let kept = originals.iter().filter(|spec| {
        spec.local_name()
            .map(|name| used.contains(&name))
            .unwrap_or(false)
    });

    for spec in kept.chain(synthetic.iter()) {
        let duplicate = resolved
            .iter()
            .any(|r| r.path == spec.path && r.local_name() == spec.local_name());
        if !duplicate {
            resolved.push(ImportSpec::new(spec.alias.clone(), spec.path.clone()));
        }
    }

    resolved.sort_by(|a, b| {
        (!is_std_import(&a.path), &a.path, &a.alias).cmp(&(!is_std_import(&b.path), &b.path, &b.alias))
    });
    resolved
}

/// `import` declaration for `imports`, gofmt-grouped; empty when none
pub fn render_import_block(imports: &[ImportSpec]) -> String {
    match imports {
        [] => String::new(),
        [single] => format!("import {}\n", single.render()),
        _ => {
            let mut out = String::from("import (\n");
            let mut previous_std = None;
            for spec in imports {
                let std = is_std_import(&spec.path);
                if previous_std == Some(true) && !std {
                    out.push('\n');
                }
                previous_std = Some(std);
                out.push('\t');
                out.push_str(&spec.render());
                out.push('\n');
            }
            out.push_str(")\n");
            out
        }
    }
}
