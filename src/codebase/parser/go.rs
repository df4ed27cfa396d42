use tree_sitter::Node;

/// Top-level declaration kinds captured by [`GoSupport::DECLARATION_QUERY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Package,
    Const,
    Var,
    Function,
    Method,
    Type,
}

pub struct GoSupport;

impl GoSupport {
    pub const DECLARATION_QUERY: &'static str = r#"
        (source_file (package_clause) @package)
        (source_file (const_declaration) @const)
        (source_file (var_declaration) @var)
        (source_file (function_declaration) @function)
        (source_file (method_declaration) @method)
        (source_file (type_declaration) @type)
    "#;

    pub fn language() -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    pub fn map_decl_kind(capture: &str) -> Option<DeclKind> {
        match capture {
            "package" => Some(DeclKind::Package),
            "const" => Some(DeclKind::Const),
            "var" => Some(DeclKind::Var),
            "function" => Some(DeclKind::Function),
            "method" => Some(DeclKind::Method),
            "type" => Some(DeclKind::Type),
            _ => None,
        }
    }
}

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Base type name of a type expression, receiver or result list.
///
/// `T`, `*T`, `T[K]` and `(t *T)` all resolve to `T`; qualified types from
/// other packages resolve to nothing.
pub fn base_type_name(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => node.utf8_text(src).ok().map(str::to_string),
        "pointer_type" => base_type_name(node.named_child(0)?, src),
        "generic_type" => base_type_name(node.child_by_field_name("type")?, src),
        "parenthesized_type" => base_type_name(node.named_child(0)?, src),
        "parameter_list" => {
            let mut cursor = node.walk();
            let first = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "parameter_declaration")?;
            base_type_name(first, src)
        }
        "parameter_declaration" => base_type_name(node.child_by_field_name("type")?, src),
        _ => None,
    }
}

/// Base type names of a function's results, one per result field.
///
/// `(*T, error)` gives `["T"]`; results without a local base type
/// contribute nothing.
pub fn result_type_names(result: Node, src: &[u8]) -> Vec<String> {
    if result.kind() != "parameter_list" {
        return base_type_name(result, src).into_iter().collect();
    }
    let mut cursor = result.walk();
    result
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "parameter_declaration")
        .filter_map(|c| base_type_name(c, src))
        .collect()
}

/// Declaration text of a function or method without its body.
pub fn signature_text<'a>(node: Node, src: &'a str) -> &'a str {
    let end = node
        .child_by_field_name("body")
        .map(|b| b.start_byte())
        .unwrap_or_else(|| node.end_byte());
    src[node.start_byte()..end].trim_end()
}

pub fn node_text<'a>(node: Node, src: &'a str) -> &'a str {
    &src[node.start_byte()..node.end_byte()]
}

/// Row of the first syntax error below `node`, zero based.
pub fn first_error_row(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_row)
}
