use std::fmt;

/// Every way an L4 to Mermaid conversion can fail.
///
/// Conversion is all-or-nothing: the first failure aborts the whole call and
/// is returned unchanged by every caller above it.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A term matched none of the shapes the graph builder understands.
    UnrecognizedShape(String),
    /// A leaf term carried something other than exactly one payload value.
    MalformedAtomic(String),
    /// The renderer was handed a graph without a root edge.
    MalformedGraph(String),
    /// The source text could not be read as an L4 program or expression.
    ParseFailure(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnrecognizedShape(msg) => write!(f, "unrecognized shape: {msg}"),
            Error::MalformedAtomic(msg) => write!(f, "malformed atomic term: {msg}"),
            Error::MalformedGraph(msg) => write!(f, "malformed graph: {msg}"),
            Error::ParseFailure(msg) => write!(f, "parse failure: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
