//! Entry-package observer
//!
//! Copies each entry-package file under the decorate root with two kinds of
//! edits: every module-local layered import gains a sibling import of its
//! generated counterpart under the derived alias, and every `pkg.F(...)`
//! call through such an import is redirected to the alias.
//!
//! Unaliased imports are named after the imported package's clause, which
//! may differ from the directory name, so the observer reads the module's
//! package names before the entry package is visited.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SynthConfig;
use crate::errors::Result;
use crate::features::compiler::{Consumer, FileInfo, FuncInfo, ModulePackages, PackageInfo};
use crate::features::emit::Emitter;
use crate::features::naming::derived_alias;
use crate::features::parsing::domain::{FuncDecl, GoFile, ImportSpec};

use super::classify::{classify_import_path, PackageKind};
use super::edits::{apply_edits, line_indent, Edit};

/// Import whose call sites are redirected
#[derive(Debug, Clone)]
struct Rewired {
    spec: ImportSpec,
    alias: String,
    /// Call operands redirected to `alias`
    redirected: usize,
}

pub struct EntryObserver<'e> {
    config: &'e SynthConfig,
    emitter: &'e Emitter,
    package: Option<PackageInfo>,
    packages: ModulePackages,
    /// Local name → rewired import
    rewired: BTreeMap<String, Rewired>,
    edits: Vec<Edit>,
    written: Vec<PathBuf>,
}

impl<'e> EntryObserver<'e> {
    pub fn new(config: &'e SynthConfig, emitter: &'e Emitter) -> Self {
        Self {
            config,
            emitter,
            package: None,
            packages: ModulePackages::default(),
            rewired: BTreeMap::new(),
            edits: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Original text with every buffered edit applied
    ///
    /// An original import left without references once its calls are
    /// redirected becomes a blank import, which keeps its init side effects
    /// and compiles. References are counted on the parse tree, so comments,
    /// string literals and field selectors never keep an import alive.
    fn rewrite(&self, file: &GoFile) -> String {
        let mut edits = self.edits.clone();
        for (local, rewired) in &self.rewired {
            let remaining = file
                .qualifier_ref_count(local)
                .saturating_sub(rewired.redirected);
            if remaining == 0 {
                edits.push(Edit::replace(
                    rewired.spec.range.clone(),
                    format!("_ \"{}\"", rewired.spec.path),
                ));
            } else {
                debug!(import = %rewired.spec.path, remaining, "Original import still referenced");
            }
        }
        apply_edits(&file.source, &edits)
    }

    /// Name the import binds in the file
    fn local_name(&self, spec: &ImportSpec) -> Option<String> {
        if spec.alias.is_some() {
            return spec.local_name();
        }
        self.packages
            .name_of(&spec.path)
            .map(str::to_string)
            .or_else(|| spec.local_name())
    }
}

impl<'e> Consumer for EntryObserver<'e> {
    fn name(&self) -> &'static str {
        "decorator.entry"
    }

    fn module(&mut self, packages: &ModulePackages) {
        self.packages = packages.clone();
    }

    fn package(&mut self, info: &PackageInfo) -> bool {
        self.package = info.entry.then(|| info.clone());
        info.entry
    }

    fn file_pre(&mut self, info: &FileInfo<'_>) -> bool {
        self.rewired.clear();
        self.edits.clear();
        !(self.config.skip_test_files && info.file.is_test())
    }

    fn import(&mut self, info: &FileInfo<'_>, spec: &ImportSpec) {
        if spec.is_blank_or_dot() {
            return;
        }
        let Some(package) = self.package.as_ref() else {
            return;
        };
        let Some(rel) = package.module_relative(&spec.path) else {
            return;
        };
        if classify_import_path(&spec.path, &self.config.layer_names) != PackageKind::Layered {
            return;
        }
        let Some(local) = self.local_name(spec) else {
            return;
        };

        let alias = derived_alias(&local);
        let generated = [package.module.as_str(), self.config.decorate_dir.as_str(), rel]
            .iter()
            .filter(|segment| !segment.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join("/");
        let counterpart = ImportSpec::new(Some(alias.clone()), generated);

        let text = if spec.grouped {
            let indent = line_indent(info.source(), spec.range.start);
            format!("\n{}{}", indent, counterpart.render())
        } else {
            format!("\nimport {}", counterpart.render())
        };
        self.edits.push(Edit::insert(spec.range.end, text));
        debug!(import = %spec.path, alias = %alias, "Rewiring import");
        self.rewired.insert(
            local,
            Rewired {
                spec: spec.clone(),
                alias,
                redirected: 0,
            },
        );
    }

    fn func_decl(&mut self, _info: &FuncInfo<'_>, decl: &FuncDecl) {
        let Some(body) = decl.body.as_ref() else {
            return;
        };
        for call in &body.selector_calls {
            if let Some(rewired) = self.rewired.get_mut(&call.operand) {
                self.edits
                    .push(Edit::replace(call.operand_range.clone(), rewired.alias.clone()));
                rewired.redirected += 1;
            }
        }
    }

    fn file_post(&mut self, info: &FileInfo<'_>) -> Result<()> {
        let Some(package) = self.package.as_ref() else {
            return Ok(());
        };
        let source = self.rewrite(info.file);
        let target = package
            .output_dir(Path::new(&self.config.decorate_dir))
            .join(info.file_name());
        let written = self.emitter.emit(&target, &source)?;
        self.written.push(written);
        Ok(())
    }

    fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::compiler::visit_file;
    use crate::features::emit::NoopFormatter;
    use crate::features::parsing::{GoParser, Parser};
    use pretty_assertions::assert_eq;
    use std::fs;

    const MODULE: &str = "example.com/demo";

    /// Rewires one `cmd/app/main.go` against the given module packages
    fn rewire(source: &str, module_packages: &[(&str, &str)]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let config = SynthConfig::default();
        let emitter = Emitter::new(Box::new(NoopFormatter), dir.path().join("debug.log"));
        let entry = PackageInfo::new(MODULE, "main", dir.path(), "cmd/app").with_entry(true);
        let others: Vec<PackageInfo> = module_packages
            .iter()
            .map(|(rel, name)| PackageInfo::new(MODULE, *name, dir.path(), *rel))
            .collect();
        let file = GoParser::new()
            .parse(source, &entry.dir().join("main.go"))
            .unwrap();

        let mut observer = EntryObserver::new(&config, &emitter);
        observer.module(&ModulePackages::from_packages(others.iter().chain([&entry])));
        assert!(observer.package(&entry));
        assert!(visit_file(&mut observer, &FileInfo::new(&entry, &file)).unwrap());

        let target = entry
            .output_dir(Path::new(&config.decorate_dir))
            .join("main.go");
        fs::read_to_string(target).unwrap()
    }

    #[test]
    fn test_comments_strings_and_fields_do_not_keep_import() {
        let output = rewire(
            r#"package main

import "example.com/demo/internal/controller/svc"

type holder struct {
	svc int
}

// svc.NewController builds the controller
func main() {
	h := holder{}
	_ = h.svc
	_ = "svc.NewController"
	_ = svc.NewController()
}
"#,
            &[("internal/controller/svc", "svc")],
        );
        assert_eq!(
            output,
            r#"package main

import _ "example.com/demo/internal/controller/svc"
import _svc "example.com/demo/build/internal/controller/svc"

type holder struct {
	svc int
}

// svc.NewController builds the controller
func main() {
	h := holder{}
	_ = h.svc
	_ = "svc.NewController"
	_ = _svc.NewController()
}
"#
        );
    }

    #[test]
    fn test_import_still_referenced_keeps_its_name() {
        let output = rewire(
            r#"package main

import "example.com/demo/internal/controller/svc"

var defaults svc.Options

func main() {
	_ = svc.NewController(defaults)
}
"#,
            &[("internal/controller/svc", "svc")],
        );
        assert!(output.contains("import \"example.com/demo/internal/controller/svc\"\n"));
        assert!(output.contains("import _svc \"example.com/demo/build/internal/controller/svc\"\n"));
        assert!(output.contains("var defaults svc.Options\n"));
        assert!(output.contains("\t_ = _svc.NewController(defaults)\n"));
    }

    #[test]
    fn test_package_clause_name_differs_from_directory() {
        let output = rewire(
            r#"package main

import (
	"fmt"

	"example.com/demo/internal/controller"
)

func main() {
	fmt.Println(ctrl.New())
}
"#,
            &[("internal/controller", "ctrl")],
        );
        assert_eq!(
            output,
            r#"package main

import (
	"fmt"

	_ "example.com/demo/internal/controller"
	_ctrl "example.com/demo/build/internal/controller"
)

func main() {
	fmt.Println(_ctrl.New())
}
"#
        );
    }

    #[test]
    fn test_unknown_package_falls_back_to_path_name() {
        let output = rewire(
            "package main\n\nimport \"example.com/demo/gateway\"\n\nfunc main() {\n\tgateway.Open()\n}\n",
            &[],
        );
        assert!(output.contains("import _gateway \"example.com/demo/build/gateway\"\n"));
        assert!(output.contains("\t_gateway.Open()\n"));
    }

    #[test]
    fn test_plain_and_foreign_imports_are_left_alone() {
        let source = r#"package main

import (
	"example.com/demo/internal/lookup"
	"github.com/acme/handler"
	_ "example.com/demo/internal/handler"
)

func main() {
	lookup.Run()
	handler.Serve()
}
"#;
        assert_eq!(rewire(source, &[("internal/lookup", "lookup")]), source);
    }

    #[test]
    fn test_test_files_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(Box::new(NoopFormatter), dir.path().join("debug.log"));
        let entry = PackageInfo::new(MODULE, "main", dir.path(), "").with_entry(true);
        let file = GoParser::new()
            .parse("package main\n", &dir.path().join("main_test.go"))
            .unwrap();
        let info = FileInfo::new(&entry, &file);

        let skipping = SynthConfig::default();
        assert!(!EntryObserver::new(&skipping, &emitter).file_pre(&info));

        let including = SynthConfig::default().with_skip_test_files(false);
        assert!(EntryObserver::new(&including, &emitter).file_pre(&info));
    }
}
