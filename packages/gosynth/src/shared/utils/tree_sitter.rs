//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter AST nodes, shared by the
//! Go lowering pass and the output validator.

use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
#[inline]
pub fn find_child_by_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// All named children, skipping comments
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// All children bound to a grammar field
pub fn children_by_field<'t>(node: &Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node.children_by_field_name(field, &mut cursor).collect();
    children
}

/// True when a direct, anonymous child token has the given text
pub fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Find all descendants by kind (pre-order)
pub fn find_descendants_by_kind<'t>(node: &Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut result = Vec::new();
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            result.push(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    result
}

/// First ERROR or MISSING node, in pre-order
pub fn first_error_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if !node.has_error() {
        return None;
    }
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                if child.has_error() || child.is_missing() {
                    stack.push(child);
                }
            }
        }
    }
    Some(*node)
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Extract text content from a node as owned String
#[inline]
pub fn extract_node_text_owned(node: &Node, source: &str) -> String {
    extract_node_text(node, source).to_string()
}

/// Text of a field child, if present
pub fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| extract_node_text_owned(&child, source))
}

/// Strip the quotes of an interpreted or raw string literal
pub fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Parser, Tree};

    fn parse_go(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::language()).unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_find_child_by_kind() {
        let source = "package lookup\n\nfunc F() {}\n";
        let tree = parse_go(source);
        let root = tree.root_node();

        let clause = find_child_by_kind(&root, "package_clause").unwrap();
        let name = find_child_by_kind(&clause, "package_identifier").unwrap();
        assert_eq!(extract_node_text(&name, source), "lookup");
    }

    #[test]
    fn test_find_descendants() {
        let source = "package a\n\nfunc F() { g(); h() }\n";
        let tree = parse_go(source);
        let calls = find_descendants_by_kind(&tree.root_node(), "call_expression");
        assert_eq!(calls.len(), 2);
        assert_eq!(extract_node_text(&calls[0], source), "g()");
    }

    #[test]
    fn test_first_error_node() {
        let good = parse_go("package a\n");
        assert!(first_error_node(&good.root_node()).is_none());

        let bad = parse_go("package a\n\nfunc F( {\n");
        assert!(first_error_node(&bad.root_node()).is_some());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"net/http\""), "net/http");
        assert_eq!(unquote("`raw`"), "raw");
        assert_eq!(unquote("bare"), "bare");
    }
}
