pub mod error;
pub mod fresh_ids;
pub mod graph_builder;
pub mod l4_ast;
pub mod l4_parser;
pub mod mermaid_ast;
pub mod mermaid_renderer;
pub mod sexp;
pub mod term;

pub use error::Error;
pub use mermaid_ast::Direction;

use l4_ast::Parsed;
use mermaid_ast::Graph;
use term::Syntax;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Options {
    pub direction: Direction,
}

/// Converts L4 source, either `(L4 <exp>+)` or a single expression, into
/// Mermaid flowchart text.
pub fn l4_to_mermaid(source: &str) -> Result<String, Error> {
    l4_to_mermaid_with_options(source, &Options::default())
}

pub fn l4_to_mermaid_with_options(source: &str, options: &Options) -> Result<String, Error> {
    let sexp = sexp::parse_sexp(source)?;
    let parsed = l4_parser::parse_l4(&sexp)?;
    let graph = map_l4_to_mermaid(&parsed, options.direction)?;
    mermaid_renderer::render(&graph)
}

pub fn map_l4_to_mermaid(parsed: &Parsed, direction: Direction) -> Result<Graph, Error> {
    match parsed {
        Parsed::Program(program) => {
            graph_builder::program_graph(program.tag(), &program.exps, direction)
        }
        Parsed::Exp(exp) => graph_builder::expression_graph(exp, direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn convert_single_expression() {
        let output = l4_to_mermaid("(+ 1 2)").unwrap();
        assert!(output.starts_with("graph TD\nAppExp_1[AppExp]"), "got: {output}");
    }

    #[test]
    fn convert_with_left_right_direction() {
        let options = Options {
            direction: Direction::LeftRight,
        };
        let output = l4_to_mermaid_with_options("(L4 1)", &options).unwrap();
        assert!(output.starts_with("graph LR\n"), "got: {output}");
    }

    #[test]
    fn parse_errors_are_forwarded() {
        let err = l4_to_mermaid("(+ 1").unwrap_err();
        assert!(matches!(err, Error::ParseFailure(_)), "got: {err}");
    }

    #[test]
    fn single_token_is_rejected() {
        let err = l4_to_mermaid("x").unwrap_err();
        assert_eq!(err, Error::ParseFailure("Program cannot be a single token".to_string()));
    }
}
