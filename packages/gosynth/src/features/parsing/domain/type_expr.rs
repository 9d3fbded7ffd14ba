//! Type expressions and signatures
//!
//! An owned, closed model of Go type syntax. Synthesizers render these back
//! to source, optionally qualifying same-package names with an import alias.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::shared::constants::go::{PREDECLARED_TYPES, PRIMITIVE_TYPES};

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A Go type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name`, `pkg.Name`, or either with type arguments
    Named {
        package: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `len` is the raw length expression (`...` for implicit length)
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(Box<Signature>),
    /// Interface literal, kept as written
    Interface(String),
    /// Struct literal, kept as written
    Struct(String),
    /// Anything outside the model (constraint unions, negated types)
    Other(String),
}

impl TypeExpr {
    /// Unqualified, non-generic name
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            package: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Named {
            package: Some(package.into()),
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    /// Predeclared kind with a literal zero value (`string`, `int64`, `error`, ...)
    pub fn primitive_kind(&self) -> Option<&str> {
        match self {
            TypeExpr::Named {
                package: None,
                name,
                args,
            } if args.is_empty() && PRIMITIVE_TYPES.contains(&name.as_str()) => Some(name.as_str()),
            _ => None,
        }
    }

    /// True for an unqualified reference to `name`
    pub fn is_local(&self, name: &str) -> bool {
        matches!(self, TypeExpr::Named { package: None, name: n, .. } if n == name)
    }

    pub fn is_error(&self) -> bool {
        self.is_local("error")
    }

    /// Base type name of a receiver (`*service` → `service`, `List[T]` → `List`)
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named { name, .. } => Some(name.as_str()),
            TypeExpr::Pointer(inner) => inner.base_name(),
            _ => None,
        }
    }

    /// Qualify every same-package named type with `alias`
    pub fn qualify(&self, alias: &str) -> TypeExpr {
        match self {
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                let package = match package {
                    Some(p) => Some(p.clone()),
                    None if PREDECLARED_TYPES.contains(&name.as_str()) => None,
                    None => Some(alias.to_string()),
                };
                TypeExpr::Named {
                    package,
                    name: name.clone(),
                    args: args.iter().map(|a| a.qualify(alias)).collect(),
                }
            }
            TypeExpr::Pointer(inner) => TypeExpr::Pointer(Box::new(inner.qualify(alias))),
            TypeExpr::Slice(elem) => TypeExpr::Slice(Box::new(elem.qualify(alias))),
            TypeExpr::Array { len, elem } => TypeExpr::Array {
                len: len.clone(),
                elem: Box::new(elem.qualify(alias)),
            },
            TypeExpr::Map { key, value } => TypeExpr::Map {
                key: Box::new(key.qualify(alias)),
                value: Box::new(value.qualify(alias)),
            },
            TypeExpr::Chan { dir, elem } => TypeExpr::Chan {
                dir: *dir,
                elem: Box::new(elem.qualify(alias)),
            },
            TypeExpr::Func(sig) => TypeExpr::Func(Box::new(sig.qualify(alias))),
            TypeExpr::Interface(_) | TypeExpr::Struct(_) | TypeExpr::Other(_) => self.clone(),
        }
    }

    /// Collect every package qualifier referenced by this type
    pub fn collect_qualifiers(&self, out: &mut BTreeSet<String>) {
        match self {
            TypeExpr::Named { package, args, .. } => {
                if let Some(p) = package {
                    out.insert(p.clone());
                }
                for arg in args {
                    arg.collect_qualifiers(out);
                }
            }
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => inner.collect_qualifiers(out),
            TypeExpr::Array { elem, .. } | TypeExpr::Chan { elem, .. } => {
                elem.collect_qualifiers(out)
            }
            TypeExpr::Map { key, value } => {
                key.collect_qualifiers(out);
                value.collect_qualifiers(out);
            }
            TypeExpr::Func(sig) => sig.collect_qualifiers(out),
            TypeExpr::Interface(_) | TypeExpr::Struct(_) | TypeExpr::Other(_) => {}
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                if let Some(p) = package {
                    write!(f, "{}.", p)?;
                }
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_char('[')?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_char(']')?;
                }
                Ok(())
            }
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            TypeExpr::Func(sig) => write!(f, "func{}", sig.render_unnamed()),
            TypeExpr::Interface(raw) | TypeExpr::Struct(raw) | TypeExpr::Other(raw) => {
                f.write_str(raw)
            }
        }
    }
}

/// One parameter or result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

impl Param {
    pub fn new(name: Option<String>, ty: TypeExpr) -> Self {
        Self {
            name,
            ty,
            variadic: false,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self::new(None, ty)
    }

    /// Type as written in a parameter list (`...T` when variadic)
    pub fn type_text(&self) -> String {
        if self.variadic {
            format!("...{}", self.ty)
        } else {
            self.ty.to_string()
        }
    }

    /// Type a variadic parameter has inside the function body
    pub fn value_type(&self) -> TypeExpr {
        if self.variadic {
            TypeExpr::slice(self.ty.clone())
        } else {
            self.ty.clone()
        }
    }

    /// Named and not blank
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| *n != "_")
    }
}

/// Parameters and results of a function, method or function type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

impl Signature {
    pub fn new(params: Vec<Param>, results: Vec<Param>) -> Self {
        Self { params, results }
    }

    pub fn is_variadic(&self) -> bool {
        self.params.last().map(|p| p.variadic).unwrap_or(false)
    }

    pub fn qualify(&self, alias: &str) -> Signature {
        let requalify = |params: &[Param]| {
            params
                .iter()
                .map(|p| Param {
                    name: p.name.clone(),
                    ty: p.ty.qualify(alias),
                    variadic: p.variadic,
                })
                .collect()
        };
        Signature {
            params: requalify(&self.params),
            results: requalify(&self.results),
        }
    }

    pub fn collect_qualifiers(&self, out: &mut BTreeSet<String>) {
        for p in self.params.iter().chain(self.results.iter()) {
            p.ty.collect_qualifiers(out);
        }
    }

    /// `(T1, T2) R` form, as used inside a function type
    pub fn render_unnamed(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::type_text).collect();
        format!("({}){}", params.join(", "), self.render_results())
    }

    /// Parameter list with the given names, positionally
    pub fn render_params(&self, names: &[String]) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .zip(names)
            .map(|(p, n)| format!("{} {}", n, p.type_text()))
            .collect();
        format!("({})", params.join(", "))
    }

    /// Result list including its leading space, empty when there are none
    pub fn render_results(&self) -> String {
        let all_named = self.results.iter().all(|r| r.name.is_some());
        match self.results.as_slice() {
            [] => String::new(),
            [single] if single.name.is_none() => format!(" {}", single.ty),
            results => {
                let parts: Vec<String> = results
                    .iter()
                    .map(|r| match (&r.name, all_named) {
                        (Some(n), true) => format!("{} {}", n, r.ty),
                        _ => r.ty.to_string(),
                    })
                    .collect();
                format!(" ({})", parts.join(", "))
            }
        }
    }

    /// Result types only, dropping result names
    pub fn render_result_types(&self) -> String {
        match self.results.as_slice() {
            [] => String::new(),
            [single] => format!(" {}", single.ty),
            results => {
                let parts: Vec<String> = results.iter().map(|r| r.ty.to_string()).collect();
                format!(" ({})", parts.join(", "))
            }
        }
    }

    /// Call arguments forwarding `names`, spreading a trailing variadic
    pub fn forward_args(&self, names: &[String]) -> String {
        let mut args: Vec<String> = names.to_vec();
        if self.is_variadic() {
            if let Some(last) = args.last_mut() {
                last.push_str("...");
            }
        }
        args.join(", ")
    }
}
