//! Per-package, per-file and per-declaration context handed to consumers

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::features::parsing::domain::{GoFile, Receiver};
use crate::shared::models::{LineIndex, Span};

/// One discovered package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Module path from `go.mod`
    pub module: String,
    /// Name from the package clause
    pub name: String,
    /// `module` or `module/rel_path`
    pub import_path: String,
    /// Module root the walk started from
    pub base_dir: PathBuf,
    /// Slash-separated path below `base_dir`, empty for the root package
    pub rel_path: String,
    /// Package `main` declaring `func main()`
    pub entry: bool,
}

impl PackageInfo {
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        rel_path: impl Into<String>,
    ) -> Self {
        let module = module.into();
        let rel_path = rel_path.into();
        let import_path = join_import_path(&module, &rel_path);
        Self {
            module,
            name: name.into(),
            import_path,
            base_dir: base_dir.into(),
            rel_path,
            entry: false,
        }
    }

    pub fn with_entry(mut self, entry: bool) -> Self {
        self.entry = entry;
        self
    }

    /// Directory holding the package sources
    pub fn dir(&self) -> PathBuf {
        if self.rel_path.is_empty() {
            self.base_dir.clone()
        } else {
            self.base_dir.join(&self.rel_path)
        }
    }

    /// Mirror of this package below `<base_dir>/<out_root>`
    pub fn output_dir(&self, out_root: &Path) -> PathBuf {
        let dir = self.base_dir.join(out_root);
        if self.rel_path.is_empty() {
            dir
        } else {
            dir.join(&self.rel_path)
        }
    }

    /// Path of an import below the module root, when module-local
    pub fn module_relative<'p>(&self, path: &'p str) -> Option<&'p str> {
        if path == self.module {
            return Some("");
        }
        path.strip_prefix(self.module.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }
}

/// Package clause names of every package in the module, by import path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModulePackages {
    names: BTreeMap<String, String>,
}

impl ModulePackages {
    pub fn from_packages<'p>(packages: impl IntoIterator<Item = &'p PackageInfo>) -> Self {
        Self {
            names: packages
                .into_iter()
                .map(|p| (p.import_path.clone(), p.name.clone()))
                .collect(),
        }
    }

    pub fn name_of(&self, import_path: &str) -> Option<&str> {
        self.names.get(import_path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn join_import_path(base: &str, rel: &str) -> String {
    match (base.is_empty(), rel.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => rel.to_string(),
        (false, false) => format!("{}/{}", base, rel),
    }
}

/// Context of one file visit
#[derive(Debug, Clone, Copy)]
pub struct FileInfo<'a> {
    pub package: &'a PackageInfo,
    pub file: &'a GoFile,
}

impl<'a> FileInfo<'a> {
    pub fn new(package: &'a PackageInfo, file: &'a GoFile) -> Self {
        Self { package, file }
    }

    pub fn file_name(&self) -> &'a str {
        &self.file.file_name
    }

    pub fn path(&self) -> &'a Path {
        &self.file.path
    }

    pub fn source(&self) -> &'a str {
        &self.file.source
    }

    /// Position-tracking table of the file
    pub fn lines(&self) -> &'a LineIndex {
        &self.file.line_index
    }

    pub fn span(&self, range: &Range<usize>) -> Span {
        self.file.span(range)
    }
}

/// Context of one type declaration
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo<'a> {
    pub file: FileInfo<'a>,
    pub name: &'a str,
    pub span: Span,
}

/// Context of one function or method declaration
#[derive(Debug, Clone, Copy)]
pub struct FuncInfo<'a> {
    pub file: FileInfo<'a>,
    pub name: &'a str,
    pub receiver: Option<&'a Receiver>,
    pub span: Span,
}

impl<'a> FuncInfo<'a> {
    /// Receiver base type name, for methods
    pub fn receiver_type(&self) -> Option<&'a str> {
        self.receiver.and_then(|r| r.ty.base_name())
    }
}
