//! Consumer port
//!
//! Every hook has a default, so an observer only implements the events it
//! cares about. A consumer lives for one whole traversal and must clear its
//! per-file buffers in `file_pre`.

use std::path::PathBuf;

use crate::errors::Result;
use crate::features::compiler::domain::{FileInfo, FuncInfo, ModulePackages, PackageInfo, TypeInfo};
use crate::features::parsing::domain::{
    FuncDecl, ImportSpec, InterfaceType, Signature, StructType, TypeDecl,
};

/// Stateful observer of the traversal
pub trait Consumer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Every package of the module was parsed; called once before any
    /// package is dispatched
    fn module(&mut self, _packages: &ModulePackages) {}

    /// A package directory was parsed; `false` skips its files for this consumer
    fn package(&mut self, _info: &PackageInfo) -> bool {
        true
    }

    /// A file is about to be visited; `false` skips it for this consumer
    fn file_pre(&mut self, _info: &FileInfo<'_>) -> bool {
        true
    }

    /// One import spec, grouped or not
    fn import(&mut self, _info: &FileInfo<'_>, _spec: &ImportSpec) {}

    fn structure(&mut self, _info: &TypeInfo<'_>, _decl: &TypeDecl, _shape: &StructType) {}

    fn interface(&mut self, _info: &TypeInfo<'_>, _decl: &TypeDecl, _shape: &InterfaceType) {}

    /// Function-shaped type declaration (`type H func(...)`)
    fn func_type(&mut self, _info: &TypeInfo<'_>, _decl: &TypeDecl, _signature: &Signature) {}

    fn func_decl(&mut self, _info: &FuncInfo<'_>, _decl: &FuncDecl) {}

    /// Every declaration of the file has been visited
    fn file_post(&mut self, _info: &FileInfo<'_>) -> Result<()> {
        Ok(())
    }

    /// Files written so far
    fn written(&self) -> &[PathBuf] {
        &[]
    }
}
