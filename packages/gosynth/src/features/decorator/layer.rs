//! Layer-package observer
//!
//! Buffers one file's declarations and synthesizes proxies at `file_post`,
//! so declaration order inside the file does not matter. Nothing carries
//! over between files: an interface, its implementing struct and its
//! constructors must share a file.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SynthConfig;
use crate::errors::Result;
use crate::features::compiler::{Consumer, FileInfo, FuncInfo, PackageInfo, TypeInfo};
use crate::features::emit::{render_go_file, resolve_imports, CodeWriter, Emitter};
use crate::features::naming::{derived_alias, is_exported};
use crate::features::parsing::domain::{
    FuncDecl, ImportSpec, InterfaceType, StructType, TypeDecl,
};

use super::classify::{classify_package, PackageKind};
use super::proxy::{ProxyConstructor, ProxyMethod, ProxyPlan};

pub struct LayerObserver<'e> {
    config: &'e SynthConfig,
    emitter: &'e Emitter,
    package: Option<PackageInfo>,
    imports: Vec<ImportSpec>,
    interfaces: Vec<(String, InterfaceType)>,
    structs: Vec<String>,
    funcs: Vec<FuncDecl>,
    written: Vec<PathBuf>,
}

impl<'e> LayerObserver<'e> {
    pub fn new(config: &'e SynthConfig, emitter: &'e Emitter) -> Self {
        Self {
            config,
            emitter,
            package: None,
            imports: Vec::new(),
            interfaces: Vec::new(),
            structs: Vec::new(),
            funcs: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Pair every decoratable interface of the buffered file with a struct
    fn plan_file(&self) -> Vec<ProxyPlan> {
        let mut plans = Vec::new();
        let mut taken: HashSet<&str> = HashSet::new();

        for (name, iface) in &self.interfaces {
            if let Some(method) = iface.methods.iter().find(|m| !is_exported(&m.name)) {
                debug!(interface = %name, method = %method.name, "Skipping interface with unexported method");
                continue;
            }
            let Some(structure) = self.implementing_struct(iface, &taken) else {
                debug!(interface = %name, "No unexported struct implements it, not decorated");
                continue;
            };
            taken.insert(structure);

            let methods = iface
                .methods
                .iter()
                .map(|spec| match self.method_of(structure, &spec.name) {
                    Some(func) => ProxyMethod {
                        name: spec.name.clone(),
                        receiver: func
                            .receiver
                            .as_ref()
                            .and_then(|r| r.name.clone())
                            .filter(|n| n != "_"),
                        signature: func.signature.clone(),
                    },
                    None => ProxyMethod {
                        name: spec.name.clone(),
                        receiver: None,
                        signature: spec.signature.clone(),
                    },
                })
                .collect();

            plans.push(ProxyPlan {
                interface: name.clone(),
                structure: structure.to_string(),
                methods,
                constructors: self.constructors_of(name),
            });
        }
        plans
    }

    /// Unexported struct implementing most of the interface's methods;
    /// the latest declared wins a tie and a struct with none never qualifies
    fn implementing_struct(&self, iface: &InterfaceType, taken: &HashSet<&str>) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for structure in self.structs.iter().map(String::as_str) {
            if taken.contains(structure) {
                continue;
            }
            let score = iface
                .methods
                .iter()
                .filter(|m| self.method_of(structure, &m.name).is_some())
                .count();
            if score == 0 {
                continue;
            }
            if best.map(|(_, s)| score >= s).unwrap_or(true) {
                best = Some((structure, score));
            }
        }
        best.map(|(name, _)| name)
    }

    fn method_of(&self, structure: &str, name: &str) -> Option<&FuncDecl> {
        self.funcs.iter().find(|f| {
            f.name == name && f.receiver_type() == Some(structure) && f.type_params.is_none()
        })
    }

    /// Exported functions returning `(I)` or `(I, error)`
    fn constructors_of(&self, interface: &str) -> Vec<ProxyConstructor> {
        self.funcs
            .iter()
            .filter(|f| f.receiver.is_none() && f.type_params.is_none() && is_exported(&f.name))
            .filter(|f| match f.signature.results.as_slice() {
                [only] => only.ty.is_local(interface),
                [first, second] => first.ty.is_local(interface) && second.ty.is_error(),
                _ => false,
            })
            .map(|f| ProxyConstructor {
                name: f.name.clone(),
                signature: f.signature.clone(),
            })
            .collect()
    }

    fn render(&self, package: &PackageInfo) -> Result<String> {
        let plans = self.plan_file();
        if plans.is_empty() {
            return Ok(render_go_file(&package.name, &[], ""));
        }

        let alias = derived_alias(&package.name);
        let mut body = CodeWriter::new();
        let mut used = BTreeSet::new();
        for (i, plan) in plans.iter().enumerate() {
            if i > 0 {
                body.blank();
            }
            plan.render(&alias, &mut body)?;
            plan.collect_qualifiers(&mut used);
        }

        let synthetic = [ImportSpec::new(Some(alias), package.import_path.clone())];
        let imports = resolve_imports(&self.imports, &used, &synthetic);
        Ok(render_go_file(&package.name, &imports, &body.finish()))
    }
}

impl<'e> Consumer for LayerObserver<'e> {
    fn name(&self) -> &'static str {
        "decorator.layer"
    }

    fn package(&mut self, info: &PackageInfo) -> bool {
        let layered = classify_package(info, &self.config.layer_names) == PackageKind::Layered;
        self.package = layered.then(|| info.clone());
        layered
    }

    /// Test files are never proxied: their declarations are invisible to
    /// the generated package, which imports the original
    fn file_pre(&mut self, info: &FileInfo<'_>) -> bool {
        self.imports.clear();
        self.interfaces.clear();
        self.structs.clear();
        self.funcs.clear();
        !info.file.is_test()
    }

    fn import(&mut self, _info: &FileInfo<'_>, spec: &ImportSpec) {
        self.imports.push(spec.clone());
    }

    fn structure(&mut self, info: &TypeInfo<'_>, decl: &TypeDecl, _shape: &StructType) {
        if is_exported(info.name) {
            return;
        }
        if decl.is_generic() {
            debug!(name = info.name, "Skipping generic struct");
            return;
        }
        self.structs.push(info.name.to_string());
    }

    fn interface(&mut self, info: &TypeInfo<'_>, decl: &TypeDecl, shape: &InterfaceType) {
        if !is_exported(info.name) {
            return;
        }
        if decl.is_generic() || !shape.embeds.is_empty() {
            debug!(name = info.name, line = info.span.start_line, "Skipping generic or embedding interface");
            return;
        }
        self.interfaces.push((info.name.to_string(), shape.clone()));
    }

    fn func_decl(&mut self, _info: &FuncInfo<'_>, decl: &FuncDecl) {
        self.funcs.push(decl.clone());
    }

    fn file_post(&mut self, info: &FileInfo<'_>) -> Result<()> {
        let Some(package) = self.package.as_ref() else {
            return Ok(());
        };
        let source = self.render(package)?;
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
