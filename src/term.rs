//! Shape-only view of an AST, the input of the graph builder.
//!
//! Concrete syntax trees implement [`Syntax`] by listing their fields in
//! order; the builder never looks at the concrete types.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Number(f64),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A tagged form with named, ordered fields.
    Record {
        tag: String,
        fields: Vec<(String, Term)>,
    },
    Array(Vec<Term>),
    /// A tagged form carrying a single primitive payload, e.g. `VarRef(x)`.
    Leaf { tag: String, payload: Vec<Atom> },
    Literal(Atom),
    /// A payload-free marker form such as the empty list.
    Empty { tag: String },
}

pub trait Syntax {
    fn tag(&self) -> &'static str;

    fn to_term(&self) -> Term;
}

impl Atom {
    /// The kind name used both as a label prefix and as an id base.
    pub fn kind(&self) -> &'static str {
        match self {
            Atom::Number(_) => "number",
            Atom::Str(_) => "string",
            Atom::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(n) => f.write_str(&format_number(*n)),
            Atom::Str(s) => f.write_str(s),
            Atom::Bool(true) => f.write_str("#t"),
            Atom::Bool(false) => f.write_str("#f"),
        }
    }
}

/// JavaScript-style number spelling: no negative zero,
/// exponent form outside `[1e-6, 1e21)`, signed exponents.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let scientific = format!("{n:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

impl Term {
    pub fn record(tag: &str, fields: Vec<(&str, Term)>) -> Self {
        Term::Record {
            tag: tag.to_string(),
            fields: fields
                .into_iter()
                .map(|(name, term)| (name.to_string(), term))
                .collect(),
        }
    }

    pub fn leaf(tag: &str, payload: Atom) -> Self {
        Term::Leaf {
            tag: tag.to_string(),
            payload: vec![payload],
        }
    }

    pub fn empty(tag: &str) -> Self {
        Term::Empty {
            tag: tag.to_string(),
        }
    }

    pub fn array<T: Syntax>(items: &[T]) -> Self {
        Term::Array(items.iter().map(|item| item.to_term()).collect())
    }

    /// The term's own tag, when it has one. Arrays have none.
    pub fn tag_hint(&self) -> Option<&str> {
        match self {
            Term::Record { tag, .. } | Term::Leaf { tag, .. } | Term::Empty { tag } => {
                Some(tag.as_str())
            }
            Term::Literal(atom) => Some(atom.kind()),
            Term::Array(_) => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Term::Array(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn atoms_render_scheme_style() {
        assert_eq!(Atom::Number(5.0).to_string(), "5");
        assert_eq!(Atom::Number(2.5).to_string(), "2.5");
        assert_eq!(Atom::Number(-3.0).to_string(), "-3");
        assert_eq!(Atom::Bool(true).to_string(), "#t");
        assert_eq!(Atom::Bool(false).to_string(), "#f");
        assert_eq!(Atom::Str("hi".to_string()).to_string(), "hi");
    }

    #[test]
    fn numbers_switch_to_exponent_form_at_the_edges() {
        let shown = |n: f64| Atom::Number(n).to_string();
        assert_eq!(shown(-0.0), "0");
        assert_eq!(shown(1e21), "1e+21");
        assert_eq!(shown(1_000_000_000_000_000_000_000.0), "1e+21");
        assert_eq!(shown(2.5e22), "2.5e+22");
        assert_eq!(shown(123_456_789_012_345_680_000.0), "123456789012345680000");
        assert_eq!(shown(0.000001), "0.000001");
        assert_eq!(shown(1.5e-7), "1.5e-7");
        assert_eq!(shown(-4e-10), "-4e-10");
        assert_eq!(shown(f64::INFINITY), "Infinity");
    }

    #[test]
    fn tag_hints() {
        assert_eq!(Term::leaf("VarRef", Atom::Str("x".into())).tag_hint(), Some("VarRef"));
        assert_eq!(Term::Literal(Atom::Bool(true)).tag_hint(), Some("boolean"));
        assert_eq!(Term::empty("EmptySExp").tag_hint(), Some("EmptySExp"));
        assert_eq!(Term::Array(vec![]).tag_hint(), None);
    }
}
