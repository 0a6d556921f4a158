//! Python module reading over tree-sitter.
//!
//! Binds the module namespace the way executing the module top to bottom
//! would: later statements rebind earlier names, and statements inside
//! top-level `if`/`try`/`with` blocks bind at module level too.

use tree_sitter::Node;

use super::module::{Binding, Definition, ParamKind, ParsedModule, RawParameter};
use super::traits::{
    ModuleParser, create_ts_parser, first_error_node, get_node_position, get_node_text,
    named_children, start_line,
};
use crate::types::{DocError, MemberKind, Result};

const CLASS_VAR_PREFIXES: &[&str] = &["ClassVar", "typing.ClassVar"];

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Result<Self> {
        // Validate that the language is available
        let _ = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;
        Ok(Self)
    }
}

impl ModuleParser for PythonParser {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedModule> {
        let mut parser =
            create_ts_parser(tree_sitter_python::LANGUAGE, "Python").map_err(|mut e| {
                if let DocError::Parse {
                    path: ref mut p, ..
                } = e
                {
                    *p = path.to_string();
                }
                e
            })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| DocError::parse(path, "Failed to parse Python file"))?;
        let root = tree.root_node();

        if let Some(err) = first_error_node(root) {
            let (line, _, column, _) = get_node_position(err);
            return Err(DocError::parse(
                path,
                format!("syntax error at line {}, column {}", line, column + 1),
            ));
        }

        let source = content.as_bytes();
        let mut module = ParsedModule::new(path);
        let statements = statements(root);

        module.docstring = statements.first().and_then(|s| docstring_of(*s, source));

        for statement in statements {
            bind_statement(statement, source, &mut module);
        }

        Ok(module)
    }
}

/// Named children that are statements (comments are extras).
fn statements(block: Node<'_>) -> Vec<Node<'_>> {
    named_children(block)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn bind_statement(node: Node<'_>, source: &[u8], module: &mut ParsedModule) {
    match node.kind() {
        "class_definition" | "function_definition" | "decorated_definition" => {
            if let Some(def) = extract_definition(node, source) {
                module.bind(def.name.clone(), Binding::Defined(def));
            }
        }
        "import_statement" => {
            for imported in named_children(node) {
                let (binding, target) = match imported.kind() {
                    "aliased_import" => {
                        let target = field_text(imported, "name", source).unwrap_or_default();
                        let alias = field_text(imported, "alias", source).unwrap_or_default();
                        (alias, target)
                    }
                    // `import a.b` binds `a`
                    "dotted_name" => {
                        let target = get_node_text(imported, source).to_string();
                        let head = target.split('.').next().unwrap_or_default().to_string();
                        (head, target)
                    }
                    _ => continue,
                };
                if !binding.is_empty() {
                    module.bind(binding, Binding::Imported { module: target });
                }
            }
        }
        "import_from_statement" => {
            let from = field_text(node, "module_name", source).unwrap_or_default();
            let mut cursor = node.walk();
            let names: Vec<Node<'_>> = node.children_by_field_name("name", &mut cursor).collect();
            for name in names {
                let binding = match name.kind() {
                    "aliased_import" => field_text(name, "alias", source),
                    _ => get_node_text(name, source)
                        .rsplit('.')
                        .next()
                        .map(str::to_string),
                };
                if let Some(binding) = binding.filter(|b| !b.is_empty()) {
                    module.bind(
                        binding,
                        Binding::Imported {
                            module: from.clone(),
                        },
                    );
                }
            }
        }
        "expression_statement" => {
            for child in named_children(node) {
                if child.kind() == "assignment" {
                    bind_assignment_targets(child, source, module);
                }
            }
        }
        "if_statement" | "try_statement" | "with_statement" => {
            for block in compound_blocks(node) {
                for statement in statements(block) {
                    bind_statement(statement, source, module);
                }
            }
        }
        _ => {}
    }
}

/// Bodies of a compound statement and its clauses, in source order.
fn compound_blocks(node: Node<'_>) -> Vec<Node<'_>> {
    let mut blocks = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "block" => blocks.push(child),
            "elif_clause" | "else_clause" | "except_clause" | "except_group_clause"
            | "finally_clause" => {
                blocks.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|n| n.kind() == "block"),
                );
            }
            _ => {}
        }
    }
    blocks
}

fn bind_assignment_targets(assignment: Node<'_>, source: &[u8], module: &mut ParsedModule) {
    let Some(left) = assignment.child_by_field_name("left") else {
        return;
    };
    let mut stack = vec![left];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" => module.bind(get_node_text(node, source), Binding::Assigned),
            "pattern_list" | "tuple_pattern" | "list_pattern" => {
                stack.extend(named_children(node));
            }
            _ => {}
        }
    }
    // Chained assignment: `a = b = value`
    if let Some(right) = assignment.child_by_field_name("right")
        && right.kind() == "assignment"
    {
        bind_assignment_targets(right, source, module);
    }
}

/// Build a definition from a (possibly decorated) class or function node.
fn extract_definition(node: Node<'_>, source: &[u8]) -> Option<Definition> {
    let (outer, inner, decorators) = if node.kind() == "decorated_definition" {
        let inner = node.child_by_field_name("definition")?;
        let decorators = named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "decorator")
            .map(|n| {
                get_node_text(n, source)
                    .trim_start_matches('@')
                    .trim()
                    .to_string()
            })
            .collect();
        (node, inner, decorators)
    } else {
        (node, node, Vec::new())
    };

    let name = field_text(inner, "name", source)?;
    let body = inner.child_by_field_name("body");
    let docstring = body
        .and_then(|b| statements(b).into_iter().next())
        .and_then(|first| docstring_of(first, source));

    let mut def = Definition {
        name,
        kind: MemberKind::Function,
        docstring,
        decorators,
        source_line: start_line(outer),
        source_code: get_node_text(outer, source).to_string(),
        parameters: None,
        return_type: None,
        fields: Vec::new(),
    };

    match inner.kind() {
        "function_definition" => {
            def.parameters = inner
                .child_by_field_name("parameters")
                .and_then(|p| extract_parameters(p, source));
            def.return_type = field_text(inner, "return_type", source);
        }
        "class_definition" => {
            def.kind = MemberKind::Class;
            if let Some(body) = body {
                def.parameters = find_init_parameters(body, source);
                def.fields = extract_class_fields(body, source);
            }
        }
        _ => return None,
    }

    Some(def)
}

/// Parameters of the last `__init__` defined directly in a class body.
fn find_init_parameters(body: Node<'_>, source: &[u8]) -> Option<Vec<RawParameter>> {
    let mut found = None;
    for statement in statements(body) {
        let func = match statement.kind() {
            "function_definition" => statement,
            "decorated_definition" => match statement.child_by_field_name("definition") {
                Some(inner) if inner.kind() == "function_definition" => inner,
                _ => continue,
            },
            _ => continue,
        };
        if field_text(func, "name", source).as_deref() == Some("__init__") {
            found = Some(
                func.child_by_field_name("parameters")
                    .and_then(|p| extract_parameters(p, source)),
            );
        }
    }
    found.flatten()
}

/// Annotated class-level assignments (`x: int = 0`), excluding `ClassVar`s.
fn extract_class_fields(body: Node<'_>, source: &[u8]) -> Vec<RawParameter> {
    let mut fields = Vec::new();
    for statement in statements(body) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        for assignment in named_children(statement) {
            if assignment.kind() != "assignment" {
                continue;
            }
            let (Some(left), Some(annotation)) = (
                assignment.child_by_field_name("left"),
                field_text(assignment, "type", source),
            ) else {
                continue;
            };
            if left.kind() != "identifier"
                || CLASS_VAR_PREFIXES
                    .iter()
                    .any(|p| annotation.starts_with(p))
            {
                continue;
            }
            fields.push(RawParameter {
                name: get_node_text(left, source).to_string(),
                kind: ParamKind::Regular,
                annotation: Some(annotation),
                default: field_text(assignment, "right", source),
            });
        }
    }
    fields
}

/// Read a `parameters` node. Returns `None` if any entry is unrecognized.
fn extract_parameters(params: Node<'_>, source: &[u8]) -> Option<Vec<RawParameter>> {
    if params.has_error() {
        return None;
    }

    let mut result = Vec::new();
    for param in named_children(params) {
        let raw = match param.kind() {
            "comment" => continue,
            "identifier" | "tuple_pattern" => {
                RawParameter::regular(get_node_text(param, source))
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => splat(param, source)?,
            "keyword_separator" => RawParameter::separator(ParamKind::KeywordSeparator),
            "positional_separator" => RawParameter::separator(ParamKind::PositionalSeparator),
            "typed_parameter" => {
                let target = named_children(param).into_iter().find(|c| {
                    matches!(
                        c.kind(),
                        "identifier" | "list_splat_pattern" | "dictionary_splat_pattern"
                    )
                })?;
                let mut raw = if target.kind() == "identifier" {
                    RawParameter::regular(get_node_text(target, source))
                } else {
                    splat(target, source)?
                };
                raw.annotation = field_text(param, "type", source);
                raw
            }
            "default_parameter" | "typed_default_parameter" => {
                let mut raw = RawParameter::regular(field_text(param, "name", source)?);
                raw.annotation = field_text(param, "type", source);
                raw.default = field_text(param, "value", source);
                raw
            }
            _ => return None,
        };
        result.push(raw);
    }
    Some(result)
}

fn splat(node: Node<'_>, source: &[u8]) -> Option<RawParameter> {
    let kind = match node.kind() {
        "list_splat_pattern" => ParamKind::VarPositional,
        "dictionary_splat_pattern" => ParamKind::VarKeyword,
        _ => return None,
    };
    let name = get_node_text(node, source).trim_start_matches('*').trim();
    Some(RawParameter {
        name: name.to_string(),
        kind,
        annotation: None,
        default: None,
    })
}

fn field_text(node: Node<'_>, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| get_node_text(n, source).to_string())
        .filter(|t| !t.is_empty())
}

/// Docstring value if the statement is a bare string expression.
fn docstring_of(statement: Node<'_>, source: &[u8]) -> Option<String> {
    if statement.kind() != "expression_statement" {
        return None;
    }
    let children = named_children(statement);
    let [expr] = children.as_slice() else {
        return None;
    };
    match expr.kind() {
        "string" => string_literal_value(get_node_text(*expr, source)),
        "concatenated_string" => {
            let parts: Option<Vec<String>> = named_children(*expr)
                .into_iter()
                .filter(|n| n.kind() == "string")
                .map(|n| string_literal_value(get_node_text(n, source)))
                .collect();
            parts.map(|p| p.concat())
        }
        _ => None,
    }
}

/// Value of a Python string literal. Bytes and f-strings are not docstrings.
pub(crate) fn string_literal_value(literal: &str) -> Option<String> {
    let quote_start = literal.find(['"', '\''])?;
    let prefix = literal[..quote_start].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }
    let body = &literal[quote_start..];

    let inner = ["\"\"\"", "'''", "\"", "'"].iter().find_map(|q| {
        body.strip_prefix(*q)
            .and_then(|rest| rest.strip_suffix(*q))
    })?;

    if prefix.contains('r') {
        Some(inner.to_string())
    } else {
        Some(unescape(inner))
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        let decoded = match escape {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'v' => Some('\u{0B}'),
            '\\' | '\'' | '"' => Some(escape),
            // Line continuation
            '\n' => continue,
            'x' => hex_escape(&mut chars, 2),
            'u' => hex_escape(&mut chars, 4),
            'U' => hex_escape(&mut chars, 8),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value)
            }
            'N' if chars.peek() == Some(&'{') => {
                let rest: String = chars.clone().take_while(|c| *c != '}').collect();
                match unicode_names2::character(&rest[1..]) {
                    Some(ch) => {
                        // Skip `{NAME}`
                        for _ in 0..=rest.chars().count() {
                            chars.next();
                        }
                        Some(ch)
                    }
                    None => None,
                }
            }
            _ => None,
        };
        match decoded {
            Some(ch) => out.push(ch),
            // Unknown or invalid escapes stay as written
            None => {
                out.push('\\');
                out.push(escape);
            }
        }
    }
    out
}

/// Consume exactly `digits` hex digits, leaving the input untouched if
/// fewer are present.
fn hex_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, digits: usize) -> Option<char> {
    let ahead: String = chars.clone().take(digits).collect();
    if ahead.len() != digits || !ahead.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let ch = u32::from_str_radix(&ahead, 16).ok().and_then(char::from_u32)?;
    for _ in 0..digits {
        chars.next();
    }
    Some(ch)
}
