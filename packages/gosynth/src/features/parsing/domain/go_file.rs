//! Parsed Go file (the object program)
//!
//! Owned lowering of one tree-sitter tree. Declarations are a closed sum
//! type so every consumer of the traversal matches them exhaustively.

use std::ops::Range;
use std::path::PathBuf;

use super::type_expr::{Signature, TypeExpr};
use crate::shared::constants::classification::ENTRY_FUNC;
use crate::shared::constants::go::TEST_SUFFIX;
use crate::shared::models::{LineIndex, Span};

/// One parsed source file
#[derive(Debug, Clone)]
pub struct GoFile {
    pub path: PathBuf,
    pub file_name: String,
    pub package_name: String,
    pub source: String,
    pub line_index: LineIndex,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
    /// Identifiers used as package qualifiers, one entry per occurrence:
    /// selector operands (`pkg.F`, `x.f`) and qualified type packages
    pub qualifier_refs: Vec<String>,
}

impl GoFile {
    pub fn is_test(&self) -> bool {
        self.file_name.ends_with(TEST_SUFFIX)
    }

    /// Every import spec of the file, across import declarations
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|decl| {
            let specs: &[ImportSpec] = match decl {
                Decl::Import(specs) => specs,
                _ => &[],
            };
            specs
        })
    }

    /// Declares a receiver-less `func main()`
    pub fn has_entry_func(&self) -> bool {
        self.decls.iter().any(|decl| {
            matches!(decl, Decl::Func(f) if f.receiver.is_none() && f.name == ENTRY_FUNC)
        })
    }

    pub fn span(&self, range: &Range<usize>) -> Span {
        self.line_index.span(range.start, range.end)
    }

    /// Occurrences of `name` in qualifier position
    pub fn qualifier_ref_count(&self, name: &str) -> usize {
        self.qualifier_refs.iter().filter(|r| *r == name).count()
    }
}

/// Top-level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    /// One `import` declaration, grouped or not
    Import(Vec<ImportSpec>),
    Type(TypeDecl),
    Func(FuncDecl),
}

/// `name "path"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit alias, including `_` and `.`
    pub alias: Option<String>,
    pub path: String,
    pub range: Range<usize>,
    /// Declared inside an `import ( ... )` group
    pub grouped: bool,
}

impl ImportSpec {
    pub fn new(alias: Option<String>, path: impl Into<String>) -> Self {
        Self {
            alias,
            path: path.into(),
            range: 0..0,
            grouped: true,
        }
    }

    /// Blank (`_`) or dot (`.`) import
    pub fn is_blank_or_dot(&self) -> bool {
        matches!(self.alias.as_deref(), Some("_") | Some("."))
    }

    /// Identifier the file uses to refer to this import
    pub fn local_name(&self) -> Option<String> {
        if self.is_blank_or_dot() {
            return None;
        }
        match &self.alias {
            Some(alias) => Some(alias.clone()),
            None => Some(package_name_from_path(&self.path)),
        }
    }

    /// Render as it appears inside an import group
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} \"{}\"", alias, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// Best guess of a package's name from its import path
///
/// Drops major-version segments (`/v2`), `.vN` suffixes (`yaml.v3`) and
/// `go-`/`-go` affixes, the way Go tooling guesses without loading the package.
pub fn package_name_from_path(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1 {
        if let Some(last) = segments.last() {
            let is_major = last.len() > 1
                && last.starts_with('v')
                && last[1..].chars().all(|c| c.is_ascii_digit());
            if is_major {
                segments.pop();
            }
        }
    }
    let mut name = segments.last().copied().unwrap_or(path);
    if let Some(dot) = name.find(".v") {
        if name[dot + 2..].chars().all(|c| c.is_ascii_digit()) {
            name = &name[..dot];
        }
    }
    let name = name.strip_prefix("go-").unwrap_or(name);
    let name = name.strip_suffix("-go").unwrap_or(name);
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// One `type` spec
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    /// Raw type parameter list, when generic
    pub type_params: Option<String>,
    /// `type A = B`
    pub alias: bool,
    pub shape: TypeShape,
    pub range: Range<usize>,
}

impl TypeDecl {
    pub fn is_generic(&self) -> bool {
        self.type_params.is_some()
    }
}

/// Declared shape of a type
#[derive(Debug, Clone)]
pub enum TypeShape {
    Struct(StructType),
    Interface(InterfaceType),
    Func(Signature),
    Other(TypeExpr),
}

#[derive(Debug, Clone, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
}

/// One struct field; `name` is `None` for embedded fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Option<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InterfaceType {
    pub methods: Vec<MethodSpec>,
    /// Embedded interfaces and type-set elements
    pub embeds: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub signature: Signature,
}

/// Function or method declaration
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub type_params: Option<String>,
    pub signature: Signature,
    pub body: Option<FuncBody>,
    pub range: Range<usize>,
}

impl FuncDecl {
    /// Base type name of the receiver, for methods
    pub fn receiver_type(&self) -> Option<&str> {
        self.receiver.as_ref().and_then(|r| r.ty.base_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

/// Function body, reduced to what the rewriters need
#[derive(Debug, Clone, Default)]
pub struct FuncBody {
    pub range: Range<usize>,
    /// `operand.Selector(...)` calls whose operand is a plain identifier
    pub selector_calls: Vec<SelectorCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorCall {
    pub operand: String,
    pub operand_range: Range<usize>,
    pub selector: String,
}
