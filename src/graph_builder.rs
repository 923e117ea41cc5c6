use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::Error;
use crate::fresh_ids::{IdAllocator, fresh_ids};
use crate::mermaid_ast::*;
use crate::term::{Syntax, Term};

/// Label of the synthetic node standing in for an array-valued field.
pub const LIST_LABEL: &str = ":";

/// Id base for an array element that has neither a tag nor a field name.
const ANONYMOUS_HINT: &str = "list";

/// Builds the graph of a whole program: a `Program` root with a single
/// `exps` edge to a list node holding the top-level forms.
pub fn program_graph<T: Syntax>(
    program_tag: &str,
    exps: &[T],
    direction: Direction,
) -> Result<Graph, Error> {
    let ids = fresh_ids(&[program_tag, "exps"], &HashSet::new());
    let (root_id, exps_id) = (&ids[0], &ids[1]);

    let mut builder = GraphBuilder::new(ids.iter().cloned().collect());
    builder.edges.push(Edge::new(
        Node::decl(root_id.as_str(), program_tag),
        Node::decl(exps_id.as_str(), LIST_LABEL),
        Some("exps"),
    ));
    builder.expand(&Term::array(exps), exps_id)?;
    debug!(root = %root_id, edges = builder.edges.len(), "built program graph");

    Ok(Graph {
        direction,
        content: GraphContent::Compound(builder.edges),
    })
}

/// Builds the graph of a single expression. A compound result gets its root
/// redeclared with the expression's own tag.
pub fn expression_graph<T: Syntax>(exp: &T, direction: Direction) -> Result<Graph, Error> {
    let tag = exp.tag();
    let ids = fresh_ids(&[tag], &HashSet::new());
    let root_id = &ids[0];
    let forbidden: HashSet<String> = ids.iter().cloned().collect();

    let content = match build(&exp.to_term(), root_id, &forbidden)? {
        GraphContent::Compound(edges) => GraphContent::Compound(declare_root(edges, tag)?),
        atomic @ GraphContent::Atomic(_) => atomic,
    };
    debug!(root = %root_id, edges = content.edges().len(), "built expression graph");

    Ok(Graph { direction, content })
}

/// Converts one term, minting child ids that avoid everything in `forbidden`.
pub fn build(term: &Term, id: &str, forbidden: &HashSet<String>) -> Result<GraphContent, Error> {
    if let Some(decl) = atomic_node(term, id)? {
        return Ok(GraphContent::Atomic(decl));
    }
    let mut builder = GraphBuilder::new(forbidden.clone());
    builder.expand(term, id)?;
    Ok(GraphContent::Compound(builder.edges))
}

/// State of one top-level conversion: every id minted so far and the edges
/// emitted so far.
struct GraphBuilder {
    ids: IdAllocator,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    fn new(taken: HashSet<String>) -> Self {
        Self {
            ids: IdAllocator::new(taken),
            edges: Vec::new(),
        }
    }

    /// Walks the compound term rooted at `root_id` in preorder. Each node
    /// mints ids for all its children and emits one edge per child; the
    /// children's subtrees follow in field order.
    fn expand(&mut self, root: &Term, root_id: &str) -> Result<(), Error> {
        let mut pending: Vec<(&Term, String)> = vec![(root, root_id.to_string())];

        while let Some((term, id)) = pending.pop() {
            trace!(id = %id, tag = ?term.tag_hint(), "expanding term");
            let children = children_of(term, &id)?;

            let hints: Vec<&str> = children
                .iter()
                .map(|&(field, value)| value.tag_hint().or(field).unwrap_or(ANONYMOUS_HINT))
                .collect();
            let child_ids = self.ids.mint_all(&hints);

            let mut nested: Vec<(&Term, String)> = Vec::new();
            for (((field, value), child_id), hint) in children.into_iter().zip(child_ids).zip(hints) {
                let to = if value.is_array() {
                    let node = Node::decl(child_id.as_str(), LIST_LABEL);
                    nested.push((value, child_id));
                    node
                } else if let Some(decl) = atomic_node(value, &child_id)? {
                    Node::Decl(decl)
                } else {
                    let node = Node::decl(child_id.as_str(), hint);
                    nested.push((value, child_id));
                    node
                };
                self.edges.push(Edge::new(Node::reference(id.as_str()), to, field));
            }
            pending.extend(nested.into_iter().rev());
        }
        Ok(())
    }
}

/// The declaration of a leaf, literal or marker term; `None` for records and
/// arrays.
fn atomic_node(term: &Term, id: &str) -> Result<Option<NodeDecl>, Error> {
    match term {
        Term::Record { .. } | Term::Array(_) => Ok(None),
        Term::Leaf { tag, .. } if tag.is_empty() => Err(Error::UnrecognizedShape(format!(
            "untagged leaf at {id}"
        ))),
        Term::Leaf { tag, payload } => match payload.as_slice() {
            [value] => Ok(Some(NodeDecl::new(id, format!("{tag}({value})")))),
            _ => Err(Error::MalformedAtomic(format!(
                "{tag} carries {} payload values, expected 1",
                payload.len()
            ))),
        },
        Term::Literal(atom) => Ok(Some(NodeDecl::new(id, format!("{}({atom})", atom.kind())))),
        Term::Empty { tag } if tag.is_empty() => Err(Error::UnrecognizedShape(format!(
            "untagged marker at {id}"
        ))),
        Term::Empty { tag } => Ok(Some(NodeDecl::new(id, tag.as_str()))),
    }
}

/// Ordered `(field, value)` pairs of a record or array; array elements have
/// no field name.
fn children_of<'t>(term: &'t Term, id: &str) -> Result<Vec<(Option<&'t str>, &'t Term)>, Error> {
    match term {
        Term::Record { tag, fields } if tag.is_empty() || fields.is_empty() => {
            Err(Error::UnrecognizedShape(format!(
                "record `{tag}` at {id} has no fields"
            )))
        }
        Term::Record { fields, .. } => Ok(fields
            .iter()
            .map(|(name, value)| (Some(name.as_str()), value))
            .collect()),
        Term::Array(items) => Ok(items.iter().map(|item| (None, item)).collect()),
        _ => Err(Error::UnrecognizedShape(format!(
            "{id} is neither a record nor an array"
        ))),
    }
}

fn declare_root(mut edges: Vec<Edge>, label: &str) -> Result<Vec<Edge>, Error> {
    let first = edges
        .first_mut()
        .ok_or_else(|| Error::MalformedGraph("expression graph has no root edge".to_string()))?;
    let root_id = first.from.id().to_string();
    first.from = Node::decl(root_id, label);
    Ok(edges)
}
