#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    TopDown,
    LeftRight,
}

impl Direction {
    /// The keyword Mermaid expects after `graph`.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::TopDown => "TD",
            Direction::LeftRight => "LR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub direction: Direction,
    pub content: GraphContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphContent {
    /// The whole tree collapsed into a single declared node.
    Atomic(NodeDecl),
    Compound(Vec<Edge>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Decl(NodeDecl),
    /// A bare occurrence of an id declared elsewhere in the same graph.
    Ref(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: Node,
    pub to: Node,
    pub label: Option<String>,
}

impl NodeDecl {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl Node {
    pub fn decl(id: impl Into<String>, label: impl Into<String>) -> Self {
        Node::Decl(NodeDecl::new(id, label))
    }

    pub fn reference(id: impl Into<String>) -> Self {
        Node::Ref(id.into())
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Decl(decl) => &decl.id,
            Node::Ref(id) => id,
        }
    }
}

impl Edge {
    pub fn new(from: Node, to: Node, label: Option<&str>) -> Self {
        Self {
            from,
            to,
            label: label.map(str::to_string),
        }
    }
}

impl GraphContent {
    /// Edges of a compound graph; an atomic graph contributes none.
    pub fn edges(&self) -> &[Edge] {
        match self {
            GraphContent::Atomic(_) => &[],
            GraphContent::Compound(edges) => edges,
        }
    }

}
