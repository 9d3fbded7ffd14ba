//! Parsing domain models

mod go_file;
mod type_expr;

pub use go_file::{
    package_name_from_path, Decl, Field, FuncBody, FuncDecl, GoFile, ImportSpec, InterfaceType,
    MethodSpec, Receiver, SelectorCall, StructType, TypeDecl, TypeShape,
};
pub use type_expr::{ChanDir, Param, Signature, TypeExpr};
