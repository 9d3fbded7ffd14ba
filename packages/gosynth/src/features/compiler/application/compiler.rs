//! Compiler: single-pass, multiplexed traversal
//!
//! Every package directory is parsed up front, so consumers learn the
//! module's package names before dispatch and a syntax error anywhere stops
//! the run before anything is written. Then, per package: ask each consumer
//! whether it wants the package and visit files in name order. Within one file
//! every active consumer runs `file_pre` → declarations in source order →
//! `file_post` before the engine moves to the next file.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::errors::Result;
use crate::features::compiler::domain::{
    CompileOptions, CompileSummary, FileInfo, FuncInfo, ModulePackages, PackageInfo, TypeInfo,
};
use crate::features::compiler::infrastructure::{discover_packages, module_name, PackageDir};
use crate::features::compiler::ports::Consumer;
use crate::features::parsing::domain::{Decl, GoFile, TypeShape};
use crate::features::parsing::{GoParser, ParseFileUseCase};
use crate::shared::constants::classification::ENTRY_PACKAGE;

/// Traversal engine over registered consumers
pub struct Compiler<'c> {
    consumers: Vec<Box<dyn Consumer + 'c>>,
    parser: ParseFileUseCase<GoParser>,
}

impl<'c> Default for Compiler<'c> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Compiler<'c> {
    pub fn new() -> Self {
        Self {
            consumers: Vec::new(),
            parser: ParseFileUseCase::new(GoParser::new()),
        }
    }

    /// Register a consumer; dispatch follows registration order
    pub fn with_consumer(mut self, consumer: impl Consumer + 'c) -> Self {
        self.consumers.push(Box::new(consumer));
        self
    }

    pub fn consumers(&self) -> &[Box<dyn Consumer + 'c>] {
        &self.consumers
    }

    /// Walk `root` once, dispatching to every consumer
    ///
    /// Stops at the first parse error, before any dispatch, or at the first
    /// `file_post` error. Files written before that error stay on disk.
    pub fn compile(&mut self, root: &Path, options: &CompileOptions) -> Result<CompileSummary> {
        let module = module_name(root)?;
        let dirs = discover_packages(root, &options.excluded_dirs)?;
        info!(
            root = %root.display(),
            module = %module,
            candidates = dirs.len(),
            "Compiling"
        );

        let mut summary = CompileSummary {
            module: module.clone(),
            ..Default::default()
        };

        let start = Instant::now();
        let mut parsed = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            let files = dir
                .files
                .iter()
                .map(|path| self.parser.execute_path(path))
                .collect::<Result<Vec<GoFile>>>()?;
            let package = package_info(&module, root, dir, &files);
            parsed.push((package, files));
        }
        summary.parse_time = start.elapsed();

        let packages = ModulePackages::from_packages(parsed.iter().map(|(package, _)| package));
        debug!(packages = packages.len(), "Module parsed");
        for consumer in self.consumers.iter_mut() {
            consumer.module(&packages);
        }

        for (package, files) in &parsed {
            summary.packages += 1;
            debug!(
                package = %package.import_path,
                name = %package.name,
                entry = package.entry,
                files = files.len(),
                "Package"
            );

            let active: Vec<usize> = self
                .consumers
                .iter_mut()
                .enumerate()
                .filter_map(|(i, c)| c.package(package).then_some(i))
                .collect();
            if active.is_empty() {
                continue;
            }

            for file in files {
                if options.skip_test_files && file.is_test() {
                    continue;
                }
                let info = FileInfo::new(package, file);
                let mut dispatched = false;
                for &i in &active {
                    dispatched |= visit_file(self.consumers[i].as_mut(), &info)?;
                }
                if dispatched {
                    summary.files += 1;
                }
            }
        }

        summary.files_written = self
            .consumers
            .iter()
            .flat_map(|c| c.written().iter().cloned())
            .collect();
        info!(
            packages = summary.packages,
            files = summary.files,
            written = summary.files_written.len(),
            parse_ms = summary.parse_time.as_millis() as u64,
            "Compile finished"
        );
        Ok(summary)
    }
}

fn package_info(module: &str, root: &Path, dir: &PackageDir, files: &[GoFile]) -> PackageInfo {
    let name = files
        .iter()
        .find(|f| !f.is_test())
        .or_else(|| files.first())
        .map(|f| f.package_name.clone())
        .unwrap_or_default();
    let entry = name == ENTRY_PACKAGE
        && files.iter().filter(|f| !f.is_test()).any(GoFile::has_entry_func);
    PackageInfo::new(module, name, root, dir.rel_path.clone()).with_entry(entry)
}

/// `file_pre` → declarations in source order → `file_post` for one consumer;
/// `Ok(false)` when the consumer declined the file
pub(crate) fn visit_file(consumer: &mut dyn Consumer, info: &FileInfo<'_>) -> Result<bool> {
    if !consumer.file_pre(info) {
        return Ok(false);
    }
    debug!(consumer = consumer.name(), file = %info.path().display(), "Visiting");
    visit_declarations(consumer, info);
    consumer.file_post(info)?;
    Ok(true)
}

fn visit_declarations(consumer: &mut dyn Consumer, info: &FileInfo<'_>) {
    for decl in &info.file.decls {
        match decl {
            Decl::Import(specs) => {
                for spec in specs {
                    consumer.import(info, spec);
                }
            }
            Decl::Type(ty) => {
                let type_info = TypeInfo {
                    file: *info,
                    name: &ty.name,
                    span: info.span(&ty.range),
                };
                match &ty.shape {
                    TypeShape::Struct(shape) => consumer.structure(&type_info, ty, shape),
                    TypeShape::Interface(shape) => consumer.interface(&type_info, ty, shape),
                    TypeShape::Func(signature) => consumer.func_type(&type_info, ty, signature),
                    TypeShape::Other(_) => {}
                }
            }
            Decl::Func(func) => {
                let func_info = FuncInfo {
                    file: *info,
                    name: &func.name,
                    receiver: func.receiver.as_ref(),
                    span: info.span(&func.range),
                };
                consumer.func_decl(&func_info, func);
            }
        }
    }
}
