//! Module and package discovery

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::errors::{Result, SynthError};
use crate::shared::constants::go::{MODULE_FILE, SOURCE_EXT};

/// Directory holding at least one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    pub dir: PathBuf,
    /// Slash-separated path below the root, empty for the root itself
    pub rel_path: String,
    /// Source files, sorted by name
    pub files: Vec<PathBuf>,
}

/// Module path of the tree rooted at `root`
///
/// Read from `go.mod`; without one the directory name stands in.
pub fn module_name(root: &Path) -> Result<String> {
    let manifest = root.join(MODULE_FILE);
    if manifest.is_file() {
        let content = fs::read_to_string(&manifest).map_err(|e| SynthError::io(&manifest, e))?;
        if let Some(module) = parse_module_directive(&content) {
            return Ok(module);
        }
        warn!(path = %manifest.display(), "No module directive found");
    } else {
        warn!(root = %root.display(), "No {} found, using directory name as module", MODULE_FILE);
    }

    let canonical = root.canonicalize().map_err(|e| SynthError::io(root, e))?;
    Ok(canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// `module example.com/app` → `example.com/app`
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

/// Every package directory below `root`, in sorted walk order
///
/// Hidden directories and `excluded` names are pruned along with their
/// subtrees. Directories without source files are skipped.
pub fn discover_packages(root: &Path, excluded: &[String]) -> Result<Vec<PackageDir>> {
    let mut packages = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            if !e.file_type().is_dir() {
                return false;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !excluded.iter().any(|x| x.as_str() == name.as_ref())
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let files = source_files(entry.path())?;
        if files.is_empty() {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| Path::new(""))
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        packages.push(PackageDir {
            dir: entry.path().to_path_buf(),
            rel_path,
            files,
        });
    }
    Ok(packages)
}

fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SynthError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SynthError::io(dir, e))?;
        let path = entry.path();
        let is_source = path.is_file()
            && path.extension().map(|ext| ext == SOURCE_EXT).unwrap_or(false);
        if is_source {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
