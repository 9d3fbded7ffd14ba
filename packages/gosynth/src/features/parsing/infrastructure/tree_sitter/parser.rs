//! Tree-sitter Go parser
//!
//! This is where the tree-sitter dependency lives. The tree is lowered into
//! the owned `GoFile` model immediately so no node lifetime escapes.

use std::path::Path;

use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::errors::{Result, SynthError};
use crate::features::parsing::domain::{
    ChanDir, Decl, Field, FuncBody, FuncDecl, GoFile, ImportSpec, InterfaceType, MethodSpec,
    Param, Receiver, SelectorCall, Signature, StructType, TypeDecl, TypeExpr, TypeShape,
};
use crate::features::parsing::ports::Parser;
use crate::shared::constants::go::SOURCE_EXT;
use crate::shared::models::LineIndex;
use crate::shared::utils::tree_sitter::{
    children_by_field, extract_node_text, extract_node_text_owned, field_text,
    find_child_by_kind, find_descendants_by_kind, first_error_node, has_token, named_children,
    unquote,
};

/// Tree-sitter based Go parser
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_tree(&self, source: &str, path: &Path) -> Result<Tree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|e| SynthError::parse(path, 0, 0, format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| SynthError::parse(path, 0, 0, "Failed to parse source code"))?;

        if let Some(error) = first_error_node(&tree.root_node()) {
            let pos = error.start_position();
            let message = if error.is_missing() {
                format!("missing {}", error.kind())
            } else {
                let text = extract_node_text(&error, source);
                let snippet: String = text.chars().take(40).collect();
                format!("unexpected {:?}", snippet)
            };
            return Err(SynthError::parse(
                path,
                pos.row as u32 + 1,
                pos.column as u32,
                message,
            ));
        }
        Ok(tree)
    }
}

impl Parser for GoParser {
    fn parse(&self, source: &str, path: &Path) -> Result<GoFile> {
        let tree = self.parse_tree(source, path)?;
        Ok(Lowering { source }.lower_file(&tree, path))
    }

    fn validate(&self, source: &str, path: &Path) -> Result<()> {
        self.parse_tree(source, path).map(|_| ())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == SOURCE_EXT
    }

    fn language_name(&self) -> &'static str {
        "go"
    }
}

/// Tree → `GoFile` lowering over one source text
struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: &Node) -> String {
        extract_node_text_owned(node, self.source)
    }

    fn lower_file(&self, tree: &Tree, path: &Path) -> GoFile {
        let root = tree.root_node();
        let mut package_name = String::new();
        let mut decls = Vec::new();

        for child in named_children(&root) {
            match child.kind() {
                "package_clause" => {
                    if let Some(name) = find_child_by_kind(&child, "package_identifier") {
                        package_name = self.text(&name);
                    }
                }
                "import_declaration" => decls.push(Decl::Import(self.lower_imports(&child))),
                "type_declaration" => {
                    for spec in named_children(&child) {
                        if let Some(decl) = self.lower_type_spec(&spec) {
                            decls.push(Decl::Type(decl));
                        }
                    }
                }
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.lower_func(&child)))
                }
                _ => {}
            }
        }

        GoFile {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            package_name,
            source: self.source.to_string(),
            line_index: LineIndex::new(self.source),
            decls,
            qualifier_refs: self.qualifier_refs(&root),
        }
    }

    /// Identifier operands of selector expressions, then packages of
    /// qualified types; comments and literals never contribute
    fn qualifier_refs(&self, root: &Node) -> Vec<String> {
        let operands = find_descendants_by_kind(root, "selector_expression")
            .into_iter()
            .filter_map(|selector| selector.child_by_field_name("operand"))
            .filter(|operand| operand.kind() == "identifier");
        let packages = find_descendants_by_kind(root, "qualified_type")
            .into_iter()
            .filter_map(|qualified| qualified.child_by_field_name("package"));
        operands.chain(packages).map(|node| self.text(&node)).collect()
    }

    // ─── imports ───────────────────────────────────────────────────────────

    fn lower_imports(&self, decl: &Node) -> Vec<ImportSpec> {
        let mut specs = Vec::new();
        for child in named_children(decl) {
            match child.kind() {
                "import_spec" => specs.push(self.lower_import_spec(&child, false)),
                "import_spec_list" => {
                    for spec in named_children(&child) {
                        if spec.kind() == "import_spec" {
                            specs.push(self.lower_import_spec(&spec, true));
                        }
                    }
                }
                _ => {}
            }
        }
        specs
    }

    fn lower_import_spec(&self, node: &Node, grouped: bool) -> ImportSpec {
        let path = field_text(node, "path", self.source).unwrap_or_default();
        ImportSpec {
            alias: field_text(node, "name", self.source),
            path: unquote(&path).to_string(),
            range: node.byte_range(),
            grouped,
        }
    }

    // ─── types ─────────────────────────────────────────────────────────────

    fn lower_type_spec(&self, spec: &Node) -> Option<TypeDecl> {
        let alias = match spec.kind() {
            "type_spec" => false,
            "type_alias" => true,
            _ => return None,
        };
        let name = field_text(spec, "name", self.source)?;
        let type_node = spec.child_by_field_name("type")?;

        let shape = match type_node.kind() {
            "struct_type" => TypeShape::Struct(self.lower_struct(&type_node)),
            "interface_type" => TypeShape::Interface(self.lower_interface(&type_node)),
            "function_type" => TypeShape::Func(self.lower_signature(&type_node)),
            _ => TypeShape::Other(self.lower_type(&type_node)),
        };

        Some(TypeDecl {
            name,
            type_params: field_text(spec, "type_parameters", self.source),
            alias,
            shape,
            range: spec.byte_range(),
        })
    }

    fn lower_struct(&self, node: &Node) -> StructType {
        let mut fields = Vec::new();
        let Some(list) = find_child_by_kind(node, "field_declaration_list") else {
            return StructType { fields };
        };

        for decl in named_children(&list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let Some(type_node) = decl.child_by_field_name("type") else {
                continue;
            };
            let ty = self.lower_type(&type_node);
            let tag = field_text(&decl, "tag", self.source);
            let names = children_by_field(&decl, "name");

            if names.is_empty() {
                // Embedded: the `*` of `*T` is a sibling token, not part of the type
                let ty = if has_token(&decl, "*") {
                    TypeExpr::pointer(ty)
                } else {
                    ty
                };
                fields.push(Field {
                    name: None,
                    ty,
                    tag,
                });
            } else {
                for name in names {
                    fields.push(Field {
                        name: Some(self.text(&name)),
                        ty: ty.clone(),
                        tag: tag.clone(),
                    });
                }
            }
        }
        StructType { fields }
    }

    fn lower_interface(&self, node: &Node) -> InterfaceType {
        let mut iface = InterfaceType::default();
        self.collect_interface_elems(node, &mut iface);
        iface
    }

    fn collect_interface_elems(&self, node: &Node, iface: &mut InterfaceType) {
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    if let Some(name) = field_text(&elem, "name", self.source) {
                        iface.methods.push(MethodSpec {
                            name,
                            signature: self.lower_signature(&elem),
                        });
                    }
                }
                "method_spec_list" => self.collect_interface_elems(&elem, iface),
                "type_elem" | "constraint_elem" => {
                    let types = named_children(&elem);
                    match types.as_slice() {
                        [single] => iface.embeds.push(self.lower_type(single)),
                        _ => iface.embeds.push(TypeExpr::Other(self.text(&elem))),
                    }
                }
                _ => iface.embeds.push(self.lower_type(&elem)),
            }
        }
    }

    /// Lower a type expression node
    fn lower_type(&self, node: &Node) -> TypeExpr {
        match node.kind() {
            "type_identifier" | "identifier" | "field_identifier" => TypeExpr::named(self.text(node)),
            "qualified_type" => {
                let package = field_text(node, "package", self.source).unwrap_or_default();
                let name = field_text(node, "name", self.source).unwrap_or_default();
                TypeExpr::qualified(package, name)
            }
            "generic_type" => {
                let base = node
                    .child_by_field_name("type")
                    .map(|t| self.lower_type(&t))
                    .unwrap_or_else(|| TypeExpr::Other(self.text(node)));
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|list| {
                        named_children(&list)
                            .iter()
                            .map(|arg| self.lower_type_arg(arg))
                            .collect()
                    })
                    .unwrap_or_default();
                match base {
                    TypeExpr::Named { package, name, .. } => TypeExpr::Named {
                        package,
                        name,
                        args,
                    },
                    other => other,
                }
            }
            "pointer_type" => match named_children(node).first() {
                Some(inner) => TypeExpr::pointer(self.lower_type(inner)),
                None => TypeExpr::Other(self.text(node)),
            },
            "slice_type" => match node.child_by_field_name("element") {
                Some(elem) => TypeExpr::slice(self.lower_type(&elem)),
                None => TypeExpr::Other(self.text(node)),
            },
            "array_type" | "implicit_length_array_type" => {
                let len = field_text(node, "length", self.source).unwrap_or_else(|| "...".into());
                match node.child_by_field_name("element") {
                    Some(elem) => TypeExpr::Array {
                        len,
                        elem: Box::new(self.lower_type(&elem)),
                    },
                    None => TypeExpr::Other(self.text(node)),
                }
            }
            "map_type" => {
                match (
                    node.child_by_field_name("key"),
                    node.child_by_field_name("value"),
                ) {
                    (Some(key), Some(value)) => TypeExpr::Map {
                        key: Box::new(self.lower_type(&key)),
                        value: Box::new(self.lower_type(&value)),
                    },
                    _ => TypeExpr::Other(self.text(node)),
                }
            }
            "channel_type" => {
                let dir = match node.child(0).map(|c| c.kind()) {
                    Some("<-") => ChanDir::Recv,
                    _ if has_token(node, "<-") => ChanDir::Send,
                    _ => ChanDir::Both,
                };
                match node.child_by_field_name("value") {
                    Some(elem) => TypeExpr::Chan {
                        dir,
                        elem: Box::new(self.lower_type(&elem)),
                    },
                    None => TypeExpr::Other(self.text(node)),
                }
            }
            "function_type" => TypeExpr::Func(Box::new(self.lower_signature(node))),
            "interface_type" => TypeExpr::Interface(self.text(node)),
            "struct_type" => TypeExpr::Struct(self.text(node)),
            "parenthesized_type" => match named_children(node).first() {
                Some(inner) => self.lower_type(inner),
                None => TypeExpr::Other(self.text(node)),
            },
            _ => TypeExpr::Other(self.text(node)),
        }
    }

    fn lower_type_arg(&self, node: &Node) -> TypeExpr {
        if node.kind() == "type_elem" {
            if let [single] = named_children(node).as_slice() {
                return self.lower_type(single);
            }
            return TypeExpr::Other(self.text(node));
        }
        self.lower_type(node)
    }

    // ─── signatures ────────────────────────────────────────────────────────

    /// Parameters and result of a function-shaped node
    fn lower_signature(&self, node: &Node) -> Signature {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.lower_params(&list))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.lower_params(&result),
            Some(result) => vec![Param::unnamed(self.lower_type(&result))],
            None => Vec::new(),
        };
        Signature::new(params, results)
    }

    fn lower_params(&self, list: &Node) -> Vec<Param> {
        let mut params = Vec::new();
        for decl in named_children(list) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };
            let ty = match decl.child_by_field_name("type") {
                Some(t) => self.lower_type(&t),
                None => continue,
            };
            let names = children_by_field(&decl, "name");
            if names.is_empty() {
                params.push(Param {
                    name: None,
                    ty,
                    variadic,
                });
            } else {
                for name in names {
                    params.push(Param {
                        name: Some(self.text(&name)),
                        ty: ty.clone(),
                        variadic,
                    });
                }
            }
        }
        params
    }

    // ─── functions ─────────────────────────────────────────────────────────

    fn lower_func(&self, node: &Node) -> FuncDecl {
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|list| self.lower_params(&list).into_iter().next())
            .map(|param| Receiver {
                name: param.name,
                ty: param.ty,
            });

        FuncDecl {
            name: field_text(node, "name", self.source).unwrap_or_default(),
            receiver,
            type_params: field_text(node, "type_parameters", self.source),
            signature: self.lower_signature(node),
            body: node
                .child_by_field_name("body")
                .map(|body| self.lower_body(&body)),
            range: node.byte_range(),
        }
    }

    fn lower_body(&self, body: &Node) -> FuncBody {
        let selector_calls = find_descendants_by_kind(body, "call_expression")
            .iter()
            .filter_map(|call| {
                let function = call.child_by_field_name("function")?;
                if function.kind() != "selector_expression" {
                    return None;
                }
                let operand = function.child_by_field_name("operand")?;
                if operand.kind() != "identifier" {
                    return None;
                }
                Some(SelectorCall {
                    operand: self.text(&operand),
                    operand_range: operand.byte_range(),
                    selector: field_text(&function, "field", self.source).unwrap_or_default(),
                })
            })
            .collect();

        FuncBody {
            range: body.byte_range(),
            selector_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(source: &str) -> GoFile {
        GoParser::new()
            .parse(source, &PathBuf::from("service.go"))
            .unwrap()
    }

    fn type_decls(file: &GoFile) -> Vec<&TypeDecl> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Type(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn func_decls(file: &GoFile) -> Vec<&FuncDecl> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_package_and_imports() {
        let file = parse(
            r#"package lookup

import "context"

import (
	"fmt"
	repo "example.com/app/internal/repository/user"
	_ "embed"
)
"#,
        );
        assert_eq!(file.package_name, "lookup");
        assert_eq!(file.file_name, "service.go");

        let imports: Vec<&ImportSpec> = file.imports().collect();
        assert_eq!(imports.len(), 4);
        assert_eq!(imports[0].path, "context");
        assert!(!imports[0].grouped);
        assert_eq!(imports[2].alias.as_deref(), Some("repo"));
        assert!(imports[2].grouped);
        assert!(imports[3].is_blank_or_dot());
    }

    #[test]
    fn test_parse_struct_fields() {
        let file = parse(
            r#"package lookup

type Request struct {
	ID, Name string `json:"id"`
	Tags     []string
	*Base
	time.Time
	secret int
}
"#,
        );
        let decls = type_decls(&file);
        let TypeShape::Struct(st) = &decls[0].shape else {
            panic!("expected struct");
        };
        assert_eq!(st.fields.len(), 6);
        assert_eq!(st.fields[0].name.as_deref(), Some("ID"));
        assert_eq!(st.fields[1].name.as_deref(), Some("Name"));
        assert_eq!(st.fields[1].tag.as_deref(), Some("`json:\"id\"`"));
        assert_eq!(st.fields[2].ty.to_string(), "[]string");
        assert!(st.fields[3].name.is_none());
        assert_eq!(st.fields[3].ty.to_string(), "*Base");
        assert_eq!(st.fields[4].ty.to_string(), "time.Time");
        assert_eq!(st.fields[5].name.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_interface_methods() {
        let file = parse(
            r#"package lookup

type Service interface {
	Lookup(*Request) (*Response, error)
	Batch(ctx context.Context, ids ...string) map[string]*Response
	Close()
}
"#,
        );
        let decls = type_decls(&file);
        let TypeShape::Interface(iface) = &decls[0].shape else {
            panic!("expected interface");
        };
        assert_eq!(iface.methods.len(), 3);
        assert_eq!(
            iface.methods[0].signature.render_unnamed(),
            "(*Request) (*Response, error)"
        );

        let batch = &iface.methods[1].signature;
        assert_eq!(batch.params[0].name.as_deref(), Some("ctx"));
        assert!(batch.is_variadic());
        assert_eq!(batch.render_results(), " map[string]*Response");
        assert!(iface.methods[2].signature.results.is_empty());
    }

    #[test]
    fn test_parse_func_type_and_other_shapes() {
        let file = parse(
            r#"package lookup

type Handler func(ctx context.Context) error
type IDs []string
type Events <-chan Event
"#,
        );
        let decls = type_decls(&file);
        assert!(matches!(decls[0].shape, TypeShape::Func(_)));
        match &decls[1].shape {
            TypeShape::Other(ty) => assert_eq!(ty.to_string(), "[]string"),
            other => panic!("unexpected shape {:?}", other),
        }
        match &decls[2].shape {
            TypeShape::Other(ty) => assert_eq!(ty.to_string(), "<-chan Event"),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_parse_methods_and_calls() {
        let file = parse(
            r#"package main

func (s *service) Lookup(req *Request) (*Response, error) {
	return s.repo.Find(req.ID)
}

func main() {
	svc, err := lookup.NewService(user.NewRepository())
	if err != nil {
		log.Fatal(err)
	}
	_ = svc
}
"#,
        );
        let funcs = func_decls(&file);
        assert_eq!(funcs[0].receiver_type(), Some("service"));
        assert!(matches!(
            funcs[0].receiver.as_ref().unwrap().ty,
            TypeExpr::Pointer(_)
        ));
        assert_eq!(funcs[0].receiver.as_ref().unwrap().name.as_deref(), Some("s"));

        assert!(file.has_entry_func());
        let body = funcs[1].body.as_ref().unwrap();
        let operands: Vec<&str> = body
            .selector_calls
            .iter()
            .map(|c| c.operand.as_str())
            .collect();
        assert!(operands.contains(&"lookup"));
        assert!(operands.contains(&"user"));
        assert!(operands.contains(&"log"));

        let call = body
            .selector_calls
            .iter()
            .find(|c| c.operand == "lookup")
            .unwrap();
        assert_eq!(call.selector, "NewService");
        assert_eq!(&file.source[call.operand_range.clone()], "lookup");
    }

    #[test]
    fn test_qualifier_refs_ignore_comments_strings_and_fields() {
        let file = parse(
            r#"package main

import "example.com/app/svc"

// svc.New builds the service
var cfg svc.Config

func main() {
	h := holder{}
	_ = h.svc
	_ = "svc.New"
	_ = svc.New(cfg)
}
"#,
        );
        assert_eq!(file.qualifier_ref_count("svc"), 2);
        assert_eq!(file.qualifier_ref_count("h"), 1);
        assert_eq!(file.qualifier_ref_count("holder"), 0);
    }

    #[test]
    fn test_parse_generic_declarations() {
        let file = parse(
            r#"package lookup

type Page[T any] struct {
	Items []T
}

func Map[T, U any](in []T, f func(T) U) []U { return nil }
"#,
        );
        assert!(type_decls(&file)[0].is_generic());
        assert!(func_decls(&file)[0].type_params.is_some());
    }

    #[test]
    fn test_parse_error_reports_position() {
        let err = GoParser::new()
            .parse("package a\n\nfunc F( {\n", &PathBuf::from("bad.go"))
            .unwrap_err();
        match err {
            SynthError::Parse { path, line, .. } => {
                assert_eq!(path, PathBuf::from("bad.go"));
                assert!(line >= 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_validate() {
        let parser = GoParser::new();
        assert!(parser
            .validate("package a\n\nfunc F() {}\n", Path::new("ok.go"))
            .is_ok());
        assert!(parser.validate("package a\nfunc {", Path::new("bad.go")).is_err());
        assert!(parser.supports_extension("go"));
        assert!(!parser.supports_extension("rs"));
    }
}
