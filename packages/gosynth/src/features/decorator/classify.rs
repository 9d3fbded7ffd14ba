//! Package classification

use serde::Serialize;

use crate::features::compiler::PackageInfo;

/// Role a package plays for the decorator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Holds the executable entry point
    Entry,
    /// Import path names a decoratable layer
    Layered,
    Plain,
}

/// `Layered` iff some path segment equals a layer name
pub fn classify_import_path(path: &str, layers: &[String]) -> PackageKind {
    let layered = path
        .split('/')
        .any(|segment| layers.iter().any(|layer| layer == segment));
    if layered {
        PackageKind::Layered
    } else {
        PackageKind::Plain
    }
}

pub fn classify_package(info: &PackageInfo, layers: &[String]) -> PackageKind {
    if info.entry {
        PackageKind::Entry
    } else {
        classify_import_path(&info.import_path, layers)
    }
}
