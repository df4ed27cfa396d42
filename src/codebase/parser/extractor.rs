use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use crate::types::{FuncDoc, TypeDoc, ValueDoc};
use crate::{AppError, Result};

use super::comments::{doc_comment, leading_comments, trailing_comment};
use super::go::{
    base_type_name, first_error_row, is_exported, node_text, result_type_names, signature_text,
    DeclKind, GoSupport,
};

/// Exported declarations of a single Go file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub package: String,
    pub package_doc: String,
    pub consts: Vec<ValueDoc>,
    pub vars: Vec<ValueDoc>,
    pub funcs: Vec<ParsedFunc>,
    pub methods: Vec<FuncDoc>,
    pub types: Vec<TypeDoc>,
}

#[derive(Debug)]
pub struct ParsedFunc {
    pub func: FuncDoc,
    /// Base types of the results, used to attach constructors.
    pub result_types: Vec<String>,
}

pub struct Extractor {
    parser: Parser,
    query: Query,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        let language = GoSupport::language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| AppError::Internal(format!("Error loading Go grammar: {}", e)))?;

        let query = Query::new(&language, GoSupport::DECLARATION_QUERY)
            .map_err(|e| AppError::Internal(format!("Invalid declaration query: {}", e)))?;

        Ok(Self { parser, query })
    }

    pub fn parse(&mut self, path: &Path, content: &str) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| AppError::Parse(format!("{}: parser produced no tree", path.display())))?;

        let root = tree.root_node();
        if let Some(row) = first_error_row(root) {
            return Err(AppError::Parse(format!(
                "{}:{}: syntax error",
                path.display(),
                row + 1
            )));
        }

        let mut file = ParsedFile::default();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, root, content.as_bytes());

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.query.capture_names()[capture.index as usize];
                let Some(kind) = GoSupport::map_decl_kind(capture_name) else {
                    continue;
                };

                match kind {
                    DeclKind::Package => {
                        if let Some(ident) = node.named_child(0) {
                            file.package = node_text(ident, content).to_string();
                        }
                        file.package_doc = doc_comment(node, content);
                    }
                    DeclKind::Const => file.consts.extend(extract_value(node, content, "const")),
                    DeclKind::Var => file.vars.extend(extract_value(node, content, "var")),
                    DeclKind::Function => file.funcs.extend(extract_function(node, content)),
                    DeclKind::Method => file.methods.extend(extract_method(node, content)),
                    DeclKind::Type => file.types.extend(extract_types(node, content)),
                }
            }
        }

        if file.package.is_empty() {
            return Err(AppError::Parse(format!(
                "{}: missing package clause",
                path.display()
            )));
        }

        tracing::trace!(
            path = %path.display(),
            package = %file.package,
            funcs = file.funcs.len(),
            types = file.types.len(),
            "Parsed Go file"
        );

        Ok(file)
    }
}

fn extract_value(node: Node, src: &str, keyword: &str) -> Option<ValueDoc> {
    let specs = value_specs(node);
    let mut names = Vec::new();
    let mut exported_specs = Vec::new();

    for spec in &specs {
        let mut cursor = spec.walk();
        let spec_names: Vec<String> = spec
            .children_by_field_name("name", &mut cursor)
            .map(|n| node_text(n, src).to_string())
            .filter(|n| is_exported(n))
            .collect();
        if !spec_names.is_empty() {
            exported_specs.push(grouped_spec_text(*spec, src));
            names.extend(spec_names);
        }
    }

    if names.is_empty() {
        return None;
    }

    let text = node_text(node, src);
    let grouped = text[keyword.len()..].trim_start().starts_with('(');
    let decl = if grouped {
        format!("{} (\n{}\n)", keyword, exported_specs.join("\n"))
    } else {
        text.to_string()
    };

    Some(ValueDoc {
        names,
        decl,
        doc: doc_comment(node, src),
    })
}

/// One spec of a grouped declaration, indented, with its own comments.
fn grouped_spec_text(spec: Node, src: &str) -> String {
    let mut lines: Vec<String> = leading_comments(spec, src)
        .into_iter()
        .map(|c| format!("\t{}", c))
        .collect();
    let mut line = format!("\t{}", node_text(spec, src));
    if let Some(comment) = trailing_comment(spec, src) {
        line.push(' ');
        line.push_str(comment);
    }
    lines.push(line);
    lines.join("\n")
}

/// Specs of a const/var declaration, looking through `var ( ... )` lists.
fn value_specs(node: Node) -> Vec<Node> {
    let mut specs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "const_spec" | "var_spec" => specs.push(child),
            "var_spec_list" => specs.extend(value_specs(child)),
            _ => {}
        }
    }
    specs
}

fn extract_function(node: Node, src: &str) -> Option<ParsedFunc> {
    let name = node_text(node.child_by_field_name("name")?, src);
    if !is_exported(name) {
        return None;
    }

    let result_types = node
        .child_by_field_name("result")
        .map(|r| result_type_names(r, src.as_bytes()))
        .unwrap_or_default();

    Some(ParsedFunc {
        func: FuncDoc {
            name: name.to_string(),
            decl: signature_text(node, src).to_string(),
            doc: doc_comment(node, src),
            recv: None,
        },
        result_types,
    })
}

fn extract_method(node: Node, src: &str) -> Option<FuncDoc> {
    let name = node_text(node.child_by_field_name("name")?, src);
    if !is_exported(name) {
        return None;
    }
    let recv = base_type_name(node.child_by_field_name("receiver")?, src.as_bytes())?;

    Some(FuncDoc {
        name: name.to_string(),
        decl: signature_text(node, src).to_string(),
        doc: doc_comment(node, src),
        recv: Some(recv),
    })
}

fn extract_types(node: Node, src: &str) -> Vec<TypeDoc> {
    let mut cursor = node.walk();
    let specs: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "type_spec" || c.kind() == "type_alias")
        .collect();

    let text = node_text(node, src);
    let grouped = text["type".len()..].trim_start().starts_with('(');
    let decl_doc = doc_comment(node, src);

    specs
        .iter()
        .filter_map(|spec| {
            let name = node_text(spec.child_by_field_name("name")?, src);
            if !is_exported(name) {
                return None;
            }

            let decl = if grouped {
                format!("type {}", node_text(*spec, src))
            } else {
                text.to_string()
            };

            let spec_doc = doc_comment(*spec, src);
            let doc = if !spec_doc.is_empty() {
                spec_doc
            } else if specs.len() == 1 {
                decl_doc.clone()
            } else {
                String::new()
            };

            Some(TypeDoc {
                name: name.to_string(),
                decl,
                doc,
                funcs: Vec::new(),
                methods: Vec::new(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(src: &str) -> ParsedFile {
        let mut extractor = Extractor::new().unwrap();
        extractor.parse(&PathBuf::from("x.go"), src).unwrap()
    }

    #[test]
    fn test_package_clause_and_doc() {
        let file = parse("// Package gfx renders.\npackage gfx\n");
        assert_eq!(file.package, "gfx");
        assert_eq!(file.package_doc, "Package gfx renders.\n");
    }

    #[test]
    fn test_detached_comment_is_not_doc() {
        let file = parse("// Copyright notice.\n\npackage gfx\n");
        assert_eq!(file.package_doc, "");
    }

    #[test]
    fn test_functions_and_methods() {
        let src = r#"package gfx

// NewMesh creates a mesh.
func NewMesh() *Mesh { return nil }

func helper() {}

// Draw draws the mesh.
func (m *Mesh) Draw(x int) error {
	return nil
}

type Mesh struct{}
"#;
        let file = parse(src);
        assert_eq!(file.funcs.len(), 1);
        let f = &file.funcs[0];
        assert_eq!(f.func.name, "NewMesh");
        assert_eq!(f.func.decl, "func NewMesh() *Mesh");
        assert_eq!(f.func.doc, "NewMesh creates a mesh.\n");
        assert_eq!(f.result_types, vec!["Mesh"]);

        assert_eq!(file.methods.len(), 1);
        let m = &file.methods[0];
        assert_eq!(m.name, "Draw");
        assert_eq!(m.recv.as_deref(), Some("Mesh"));
        assert_eq!(m.decl, "func (m *Mesh) Draw(x int) error");

        assert_eq!(file.types.len(), 1);
        assert_eq!(file.types[0].decl, "type Mesh struct{}");
    }

    #[test]
    fn test_grouped_values_keep_exported_specs() {
        let src = r#"package gfx

// Kinds of things.
const (
	KindA = iota
	kindHidden
	KindB
)

var Default = 3
"#;
        let file = parse(src);
        assert_eq!(file.consts.len(), 1);
        let c = &file.consts[0];
        assert_eq!(c.names, vec!["KindA", "KindB"]);
        assert_eq!(c.decl, "const (\n\tKindA = iota\n\tKindB\n)");
        assert_eq!(c.doc, "Kinds of things.\n");

        assert_eq!(file.vars.len(), 1);
        assert_eq!(file.vars[0].decl, "var Default = 3");
    }

    #[test]
    fn test_grouped_values_keep_spec_comments() {
        let src = r#"package gfx

var (
	// Red is red.
	Red = 1
	blue = 2
	Green = 3 // Green is green.
)
"#;
        let file = parse(src);
        let v = &file.vars[0];
        assert_eq!(v.names, vec!["Red", "Green"]);
        assert_eq!(
            v.decl,
            "var (\n\t// Red is red.\n\tRed = 1\n\tGreen = 3 // Green is green.\n)"
        );
    }

    #[test]
    fn test_grouped_types() {
        let src = r#"package gfx

type (
	// Color is RGBA.
	Color struct{ R, G, B, A float32 }

	hidden int
	Point [2]int
)
"#;
        let file = parse(src);
        let names: Vec<_> = file.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Color", "Point"]);
        assert_eq!(file.types[0].doc, "Color is RGBA.\n");
        assert_eq!(file.types[1].decl, "type Point [2]int");
        assert_eq!(file.types[1].doc, "");
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let mut extractor = Extractor::new().unwrap();
        let err = extractor
            .parse(&PathBuf::from("bad.go"), "package gfx\nfunc {{{\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert!(err.to_string().contains("bad.go"));
    }
}
