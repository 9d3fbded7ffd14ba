//! Architecture Boundary Tests
//!
//! The synthesis engine is a local batch tool: no network stack, no async
//! runtime, no language bindings.

#![cfg(test)]

use std::path::Path;

#[test]
fn test_no_network_or_async_dependencies() {
    let cargo_toml = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let content = std::fs::read_to_string(cargo_toml).unwrap();

    let forbidden_deps = vec![
        "reqwest",   // HTTP client
        "hyper",     // HTTP primitives
        "tokio",     // Async runtime
        "async-std", // Async runtime
        "pyo3",      // Python bindings
    ];

    for dep in forbidden_deps {
        assert!(
            !content.contains(&format!("{} =", dep)),
            "Forbidden dependency {} in gosynth",
            dep
        );
    }
}

#[test]
fn test_domain_layers_do_not_spawn_processes() {
    let features = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/features");
    for entry in walkdir::WalkDir::new(&features)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().components().any(|c| c.as_os_str() == "domain"))
        .filter(|e| e.path().extension().map(|x| x == "rs").unwrap_or(false))
    {
        let content = std::fs::read_to_string(entry.path()).unwrap();
        assert!(
            !content.contains("std::process"),
            "{} spawns processes; keep that in infrastructure/",
            entry.path().display()
        );
    }
}
