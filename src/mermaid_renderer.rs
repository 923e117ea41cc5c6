use tracing::debug;

use crate::error::Error;
use crate::mermaid_ast::*;

/// Labels printed as-is inside brackets. Everything else is quoted so that
/// parentheses and spaces in payloads survive Mermaid's parser.
const BARE_LABELS: [&str; 11] = [
    "Program",
    ":",
    "AppExp",
    "ProcExp",
    "LitExp",
    "DefineExp",
    "IfExp",
    "LetExp",
    "LetrecExp",
    "LetRecExp",
    "SetExp",
];

pub fn render(graph: &Graph) -> Result<String, Error> {
    let body = match &graph.content {
        GraphContent::Atomic(decl) => render_decl(decl),
        GraphContent::Compound(edges) if edges.is_empty() => {
            return Err(Error::MalformedGraph(
                "compound graph has no edges".to_string(),
            ));
        }
        GraphContent::Compound(edges) => edges
            .iter()
            .map(render_edge)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    debug!(edges = graph.content.edges().len(), "rendered mermaid graph");
    Ok(format!("graph {}\n{body}", graph.direction.keyword()))
}

fn render_edge(edge: &Edge) -> String {
    let from = render_node(&edge.from);
    let to = render_node(&edge.to);
    match &edge.label {
        Some(label) => format!("{from} -->|{}| {to}", escape_edge_label(label)),
        None => format!("{from} --> {to}"),
    }
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Decl(decl) => render_decl(decl),
        Node::Ref(id) => id.clone(),
    }
}

fn render_decl(decl: &NodeDecl) -> String {
    if BARE_LABELS.contains(&decl.label.as_str()) {
        format!("{}[{}]", decl.id, decl.label)
    } else {
        format!("{}[\"{}\"]", decl.id, escape_label(&decl.label))
    }
}

/// Replaces characters that would end a quoted label or the edge line with
/// Mermaid entity codes.
fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("#quot;"),
            '\n' => escaped.push_str("#10;"),
            '\r' => escaped.push_str("#13;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn escape_edge_label(label: &str) -> String {
    escape_label(label).replace('|', "#124;")
}
