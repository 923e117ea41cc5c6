use std::fmt;

use winnow::ascii::{multispace1, till_line_ending};
use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::error::Error;

/// Deepest list nesting accepted. A `'` prefix counts as one level, since it
/// reads as `(quote ...)`.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Symbol(String),
    /// A double-quoted literal, escapes already resolved.
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sexp {
    Atom(Token),
    List(Vec<Sexp>),
    /// `(a b . c)`: at least one head item plus an explicit tail.
    DottedList(Vec<Sexp>, Box<Sexp>),
}

impl Sexp {
    pub fn symbol(name: &str) -> Self {
        Sexp::Atom(Token::Symbol(name.to_string()))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Sexp::Atom(Token::Symbol(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(Token::Symbol(name)) => f.write_str(name),
            Sexp::Atom(Token::Str(text)) => write!(f, "{text:?}"),
            Sexp::List(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                f.write_str(")")
            }
            Sexp::DottedList(items, tail) => {
                f.write_str("(")?;
                write_items(f, items)?;
                write!(f, " . {tail})")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Sexp]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Reads exactly one datum, surrounded by optional whitespace and comments.
pub fn parse_sexp(input: &str) -> Result<Sexp, Error> {
    let mut input = input;
    trivia(&mut input).map_err(|_| syntax_error(input))?;
    if input.is_empty() {
        return Err(Error::ParseFailure("Unexpected empty program".to_string()));
    }
    check_nesting(input)?;
    let sexp = datum(&mut input).map_err(|_| syntax_error(input))?;
    trivia(&mut input).map_err(|_| syntax_error(input))?;
    if !input.is_empty() {
        return Err(syntax_error(input));
    }
    Ok(sexp)
}

/// Scans the raw text for list depth before the recursive reader runs.
/// Strings and comments are skipped; unbalanced input is left for the reader
/// to report.
fn check_nesting(input: &str) -> Result<(), Error> {
    let too_deep = || Error::ParseFailure(format!("nesting too deep: more than {MAX_NESTING} levels"));
    let mut open: Vec<usize> = Vec::new();
    let mut depth = 0;
    let mut quotes = 0;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                let cost = 1 + quotes;
                depth += cost;
                open.push(cost);
                quotes = 0;
                if depth > MAX_NESTING {
                    return Err(too_deep());
                }
            }
            ')' => {
                depth -= open.pop().unwrap_or(0);
                quotes = 0;
            }
            '\'' => {
                quotes += 1;
                if depth + quotes > MAX_NESTING {
                    return Err(too_deep());
                }
            }
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => {
                            chars.next();
                        }
                        _ => {}
                    }
                }
                quotes = 0;
            }
            ';' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {}
            _ => quotes = 0,
        }
    }
    Ok(())
}

fn syntax_error(rest: &str) -> Error {
    let context = rest.lines().next().unwrap_or("").trim();
    if context.is_empty() {
        return Error::ParseFailure("syntax error: unexpected end of input".to_string());
    }
    let context_display: String = if context.chars().count() > 40 {
        format!("{}...", context.chars().take(40).collect::<String>())
    } else {
        context.to_string()
    };
    Error::ParseFailure(format!("syntax error: unexpected `{context_display}`"))
}

fn trivia(input: &mut &str) -> winnow::Result<()> {
    repeat(0.., alt((multispace1.void(), comment))).parse_next(input)
}

fn comment(input: &mut &str) -> winnow::Result<()> {
    (';', till_line_ending).void().parse_next(input)
}

fn datum(input: &mut &str) -> winnow::Result<Sexp> {
    alt((
        quoted,
        list,
        string.map(|text| Sexp::Atom(Token::Str(text))),
        symbol.map(|name: &str| Sexp::symbol(name)),
    ))
    .parse_next(input)
}

fn quoted(input: &mut &str) -> winnow::Result<Sexp> {
    let inner = preceded('\'', preceded(trivia, datum)).parse_next(input)?;
    Ok(Sexp::List(vec![Sexp::symbol("quote"), inner]))
}

fn list(input: &mut &str) -> winnow::Result<Sexp> {
    '('.parse_next(input)?;
    let mut items: Vec<Sexp> = Vec::new();
    loop {
        trivia.parse_next(input)?;
        if opt(')').parse_next(input)?.is_some() {
            return Ok(Sexp::List(items));
        }
        if !items.is_empty() && at_dot(input) {
            '.'.parse_next(input)?;
            trivia.parse_next(input)?;
            let tail = datum.parse_next(input)?;
            trivia.parse_next(input)?;
            ')'.parse_next(input)?;
            return Ok(Sexp::DottedList(items, Box::new(tail)));
        }
        items.push(datum.parse_next(input)?);
    }
}

/// A lone `.` separating the tail of a dotted pair, as opposed to a symbol
/// or number that merely starts with a dot.
fn at_dot(input: &str) -> bool {
    let mut chars = input.chars();
    chars.next() == Some('.')
        && chars
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '(' || c == ')')
}

fn string(input: &mut &str) -> winnow::Result<String> {
    '"'.parse_next(input)?;
    let mut text = String::new();
    loop {
        let c: char = any.parse_next(input)?;
        match c {
            '"' => return Ok(text),
            '\\' => {
                let escaped: char = any.parse_next(input)?;
                text.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            other => text.push(other),
        }
    }
}

fn symbol<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| !c.is_whitespace() && !"()'\";".contains(c)).parse_next(input)
}
