//! Builder synthesis
//!
//! For every exported struct `T` the generated factory package gets a
//! `TBuilder` with one `WithF` per exported field, and a convenience `T()`
//! returning a value filled with example data.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use crate::config::SynthConfig;
use crate::errors::Result;
use crate::features::compiler::{Consumer, FileInfo, PackageInfo, TypeInfo};
use crate::features::emit::{render_go_file, resolve_imports, CodeWriter, Emitter};
use crate::features::naming::{convert_to_unexported, derived_alias, is_exported};
use crate::features::parsing::domain::{ImportSpec, StructType, TypeDecl, TypeExpr};
use crate::features::value_synth::{SynthMode, ValueSynthesizer};
use crate::shared::constants::output::FACTORY_SUBDIR;
use crate::shared::NameScope;

use super::support::{exported_fields, factory_import, helper_target, local_types};

const RECEIVER: &str = "b";

pub struct BuilderObserver<'e> {
    config: &'e SynthConfig,
    emitter: &'e Emitter,
    package: Option<PackageInfo>,
    imports: Vec<ImportSpec>,
    synth: ValueSynthesizer,
    /// Exported structs of the current file, in declaration order
    structs: Vec<(String, Vec<(String, TypeExpr)>)>,
    written: Vec<PathBuf>,
}

impl<'e> BuilderObserver<'e> {
    pub fn new(config: &'e SynthConfig, emitter: &'e Emitter) -> Self {
        Self {
            config,
            emitter,
            package: None,
            imports: Vec::new(),
            synth: ValueSynthesizer::new(SynthMode::Example),
            structs: Vec::new(),
            written: Vec::new(),
        }
    }

    fn render(&mut self, package: &PackageInfo) -> Result<String> {
        let alias = derived_alias(&package.name);
        let mut body = CodeWriter::new();
        let mut used = BTreeSet::new();
        for (i, (name, fields)) in self.structs.iter().enumerate() {
            if i > 0 {
                body.blank();
            }
            for (_, ty) in fields {
                ty.collect_qualifiers(&mut used);
            }
            render_builder(&mut body, &alias, name, fields, &mut self.synth)?;
        }
        used.extend(self.synth.used_qualifiers().iter().cloned());

        let factory = &self.config.example_factory;
        let mut synthetic = vec![ImportSpec::new(Some(alias), package.import_path.clone())];
        for path in self.synth.required_imports() {
            if path == factory.import_path {
                synthetic.push(factory_import(factory));
            } else {
                synthetic.push(ImportSpec::new(None, path));
            }
        }
        let imports = resolve_imports(&self.imports, &used, &synthetic);
        Ok(render_go_file(&package.name, &imports, &body.finish()))
    }
}

/// Builder type, its methods and the example-filled convenience function
pub fn render_builder(
    w: &mut CodeWriter,
    alias: &str,
    name: &str,
    fields: &[(String, TypeExpr)],
    synth: &mut ValueSynthesizer,
) -> Result<()> {
    let builder = format!("{}Builder", name);
    let value_type = format!("{}.{}", alias, name);

    w.open(format!("type {} struct {{", builder))
        .line(format!("value {}", value_type))
        .close("}")
        .blank();

    w.open(format!("func Build{}() {} {{", name, builder))
        .line(format!("return {}{{value: {}{{}}}}", builder, value_type))
        .close("}");

    for (field, ty) in fields {
        let mut scope = NameScope::new();
        scope.reserve(RECEIVER);
        let param = scope.fresh(&convert_to_unexported(field)?);
        w.blank()
            .open(format!(
                "func ({} {}) With{}({} {}) {} {{",
                RECEIVER,
                builder,
                field,
                param,
                synth.render_type(ty),
                builder
            ))
            .line(format!("{}.value.{} = {}", RECEIVER, field, param))
            .line(format!("return {}", RECEIVER))
            .close("}");
    }

    w.blank()
        .open(format!("func ({} {}) Value() {} {{", RECEIVER, builder, value_type))
        .line(format!("return {}.value", RECEIVER))
        .close("}")
        .blank()
        .open(format!("func ({} {}) Pointer() *{} {{", RECEIVER, builder, value_type))
        .line(format!("return &{}.value", RECEIVER))
        .close("}")
        .blank();

    synth.reset_temps();
    let mut prep = Vec::new();
    let mut calls = Vec::with_capacity(fields.len());
    for (field, ty) in fields {
        let value = synth.synthesize(ty)?;
        prep.extend(value.prep);
        calls.push(format!("With{}({})", field, value.expr));
    }

    w.open(format!("func {}() {} {{", name, value_type)).lines(prep);
    if calls.is_empty() {
        w.line(format!("return Build{}().Value()", name));
    } else {
        w.line(format!("return Build{}().", name));
        for call in calls {
            w.line(format!("\t{}.", call));
        }
        w.line("\tValue()");
    }
    w.close("}");
    Ok(())
}

impl<'e> Consumer for BuilderObserver<'e> {
    fn name(&self) -> &'static str {
        "test_helpers.builder"
    }

    fn package(&mut self, info: &PackageInfo) -> bool {
        self.package = (!info.entry).then(|| info.clone());
        !info.entry
    }

    fn file_pre(&mut self, info: &FileInfo<'_>) -> bool {
        self.imports.clear();
        self.structs.clear();
        // Test-only declarations are invisible to the importing helper package
        if info.file.is_test() {
            return false;
        }

        self.synth = ValueSynthesizer::new(SynthMode::Example)
            .with_cardinality(self.config.example_cardinality)
            .with_factory(self.config.example_factory.clone())
            .with_qualifier(derived_alias(&info.package.name));
        for (name, kind) in local_types(info.file) {
            self.synth.declare(name, kind);
        }
        true
    }

    fn import(&mut self, _info: &FileInfo<'_>, spec: &ImportSpec) {
        self.imports.push(spec.clone());
    }

    fn structure(&mut self, info: &TypeInfo<'_>, decl: &TypeDecl, shape: &StructType) {
        if !is_exported(info.name) {
            return;
        }
        if decl.is_generic() {
            debug!(name = info.name, "Skipping generic struct");
            return;
        }
        self.structs
            .push((info.name.to_string(), exported_fields(shape)));
    }

    fn file_post(&mut self, info: &FileInfo<'_>) -> Result<()> {
        let Some(package) = self.package.clone() else {
            return Ok(());
        };
        if self.structs.is_empty() {
            return Ok(());
        }
        let source = self.render(&package)?;
        let target = helper_target(self.config, &package, FACTORY_SUBDIR, info.file_name());
        let written = self.emitter.emit(&target, &source)?;
        self.written.push(written);
        Ok(())
    }

    fn written(&self) -> &[PathBuf] {
        &self.written
    }
}
