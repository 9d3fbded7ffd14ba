//! Naming and classification through the public API

use gosynth::config::SynthConfig;
use gosynth::features::compiler::PackageInfo;
use gosynth::features::decorator::{classify_import_path, classify_package, PackageKind};
use gosynth::features::naming::{convert_to_unexported, derived_alias};
use gosynth::SynthError;

#[test]
fn test_convert_to_unexported() {
    for (input, expected) in [
        ("Name", "name"),
        ("name", "name"),
        ("ID", "id"),
        ("X", "x"),
        ("HTTPServer", "httpServer"),
        ("URLPath2", "urlPath2"),
        ("_private", "_private"),
    ] {
        assert_eq!(convert_to_unexported(input).unwrap(), expected, "{}", input);
    }
}

#[test]
fn test_unrecognized_identifier_is_programming_error() {
    for input in ["", "9Lives", "HTTP_Server"] {
        let err = convert_to_unexported(input).unwrap_err();
        assert!(matches!(err, SynthError::UnrecognizedIdentifier(_)), "{}", input);
        assert!(err.is_programming_error());
    }
}

#[test]
fn test_derived_alias() {
    assert_eq!(derived_alias("lookup"), "_lookup");
}

#[test]
fn test_classification() {
    let layers = SynthConfig::default().layer_names;
    assert_eq!(
        classify_import_path("example.com/shop/internal/handler", &layers),
        PackageKind::Layered
    );
    assert_eq!(
        classify_import_path("example.com/shop/repository/sql", &layers),
        PackageKind::Layered
    );
    assert_eq!(
        classify_import_path("example.com/shop/internal/handlers", &layers),
        PackageKind::Plain
    );

    let entry = PackageInfo::new("example.com/shop", "main", "/shop", "cmd/handler").with_entry(true);
    assert_eq!(classify_package(&entry, &layers), PackageKind::Entry);
}
