//! Type-name inference

use crate::errors::Result;
use crate::features::parsing::domain::{Signature, TypeExpr};
use crate::shared::constants::go::ALIAS_MARKER;
use crate::shared::NameScope;

use super::casing::convert_to_unexported;

/// Final simple identifier of a type expression
///
/// `*pkg.Request` → `Request`, `[]Item` → `Item`, `map[K]V` → `V`. Type
/// shapes without a name (function types, literals) yield `None`.
pub fn infer_name(ty: &TypeExpr) -> Option<&str> {
    match ty {
        TypeExpr::Named { name, .. } => Some(name.as_str()),
        TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => infer_name(inner),
        TypeExpr::Array { elem, .. } | TypeExpr::Chan { elem, .. } => infer_name(elem),
        TypeExpr::Map { value, .. } => infer_name(value),
        TypeExpr::Func(_) | TypeExpr::Interface(_) | TypeExpr::Struct(_) | TypeExpr::Other(_) => {
            None
        }
    }
}

/// Alias under which a generated counterpart of `name` is imported
pub fn derived_alias(name: &str) -> String {
    format!("{}{}", ALIAS_MARKER, name)
}

/// Usable, distinct parameter names for a signature
///
/// Named parameters keep their names; blank and anonymous ones are named
/// after their type. Every name is bound in `scope`.
pub fn parameter_names(signature: &Signature, scope: &mut NameScope) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(signature.params.len());
    for param in &signature.params {
        let base = match param.usable_name() {
            Some(name) => name.to_string(),
            None => match infer_name(&param.ty) {
                Some(type_name) => convert_to_unexported(type_name)?,
                None => String::new(),
            },
        };
        names.push(scope.fresh(&base));
    }
    Ok(names)
}
