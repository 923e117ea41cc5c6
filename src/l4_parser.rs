use crate::error::Error;
use crate::l4_ast::*;
use crate::sexp::{Sexp, Token};

const PRIMITIVE_OPS: [&str; 22] = [
    "+", "-", "*", "/", ">", "<", "=", "not", "and", "or", "eq?", "string=?", "cons", "car",
    "cdr", "list", "pair?", "list?", "number?", "boolean?", "symbol?", "string?",
];

const RESERVED_WORDS: [&str; 8] = ["L4", "define", "if", "lambda", "let", "letrec", "set!", "quote"];

/// Splits a datum into a whole program, `(L4 <exp>+)`, or a lone expression.
pub fn parse_l4(sexp: &Sexp) -> Result<Parsed, Error> {
    match sexp {
        Sexp::List(items) if items.is_empty() => Err(failure("Unexpected empty program")),
        Sexp::Atom(_) => Err(failure("Program cannot be a single token")),
        Sexp::List(items) if items[0].as_symbol() == Some("L4") => {
            parse_l4_program(sexp).map(Parsed::Program)
        }
        _ => parse_l4_exp(sexp).map(Parsed::Exp),
    }
}

pub fn parse_l4_program(sexp: &Sexp) -> Result<Program, Error> {
    match sexp {
        Sexp::List(items) if items.first().and_then(Sexp::as_symbol) == Some("L4") => {
            if items.len() < 2 {
                return Err(failure("Exps cannot be empty"));
            }
            let exps = items[1..]
                .iter()
                .map(parse_l4_exp)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Program { exps })
        }
        _ => Err(failure(format!("Program must be of the form (L4 <exp>+): {sexp}"))),
    }
}

pub fn parse_l4_exp(sexp: &Sexp) -> Result<Exp, Error> {
    match sexp {
        Sexp::List(items) if items.first().and_then(Sexp::as_symbol) == Some("define") => {
            parse_define(items).map(Exp::Define)
        }
        _ => parse_l4_cexp(sexp).map(Exp::CExp),
    }
}

pub fn parse_l4_cexp(sexp: &Sexp) -> Result<CExp, Error> {
    match sexp {
        Sexp::Atom(Token::Str(text)) => Ok(CExp::Str(text.clone())),
        Sexp::Atom(Token::Symbol(name)) => parse_atomic(name),
        Sexp::List(items) if items.is_empty() => Err(failure("CExp cannot be an empty list")),
        Sexp::List(items) => parse_compound(items),
        Sexp::DottedList(..) => Err(failure(format!("Unexpected dotted list: {sexp}"))),
    }
}

fn parse_define(items: &[Sexp]) -> Result<DefineExp, Error> {
    match items {
        [_, var, val] => Ok(DefineExp {
            var: parse_var_decl(var)?,
            val: parse_l4_cexp(val)?,
        }),
        _ => Err(failure(format!(
            "define expects a variable and a value: {}",
            Sexp::List(items.to_vec())
        ))),
    }
}

fn parse_atomic(name: &str) -> Result<CExp, Error> {
    if let Some(n) = parse_number(name) {
        return Ok(CExp::Num(n));
    }
    match name {
        "#t" => Ok(CExp::Bool(true)),
        "#f" => Ok(CExp::Bool(false)),
        _ if PRIMITIVE_OPS.contains(&name) => Ok(CExp::PrimOp(name.to_string())),
        _ => Ok(CExp::VarRef(VarRef::new(checked_identifier(name)?))),
    }
}

fn parse_compound(items: &[Sexp]) -> Result<CExp, Error> {
    let whole = || Sexp::List(items.to_vec());
    match items[0].as_symbol() {
        Some("if") => match items {
            [_, test, then] => Ok(CExp::If(IfExp {
                test: Box::new(parse_l4_cexp(test)?),
                then: Box::new(parse_l4_cexp(then)?),
                alt: None,
            })),
            [_, test, then, alt] => Ok(CExp::If(IfExp {
                test: Box::new(parse_l4_cexp(test)?),
                then: Box::new(parse_l4_cexp(then)?),
                alt: Some(Box::new(parse_l4_cexp(alt)?)),
            })),
            _ => Err(failure(format!("Bad if expression: {}", whole()))),
        },
        Some("lambda") => match items {
            [_, Sexp::List(params), body @ ..] if !body.is_empty() => Ok(CExp::Proc(ProcExp {
                args: params.iter().map(parse_var_decl).collect::<Result<_, _>>()?,
                body: parse_body(body)?,
            })),
            _ => Err(failure(format!("Bad lambda expression: {}", whole()))),
        },
        Some(keyword @ ("let" | "letrec")) => match items {
            [_, Sexp::List(bindings), body @ ..] if !body.is_empty() => {
                let bindings = bindings
                    .iter()
                    .map(parse_binding)
                    .collect::<Result<Vec<_>, _>>()?;
                let body = parse_body(body)?;
                Ok(if keyword == "let" {
                    CExp::Let(LetExp { bindings, body })
                } else {
                    CExp::Letrec(LetrecExp { bindings, body })
                })
            }
            _ => Err(failure(format!("Bad {keyword} expression: {}", whole()))),
        },
        Some("set!") => match items {
            [_, var, val] => Ok(CExp::Set(SetExp {
                var: VarRef::new(checked_identifier(symbol_of(var)?)?),
                val: Box::new(parse_l4_cexp(val)?),
            })),
            _ => Err(failure(format!("Bad set! expression: {}", whole()))),
        },
        Some("quote") => match items {
            [_, datum] => Ok(CExp::Lit(LitExp {
                val: parse_sexp_value(datum),
            })),
            _ => Err(failure(format!("Bad quote expression: {}", whole()))),
        },
        Some("define") => Err(failure(format!(
            "define is only allowed at top level: {}",
            whole()
        ))),
        Some("L4") => Err(failure("L4 can only open a program")),
        _ => Ok(CExp::App(AppExp {
            rator: Box::new(parse_l4_cexp(&items[0])?),
            rands: parse_body(&items[1..])?,
        })),
    }
}

fn parse_body(items: &[Sexp]) -> Result<Vec<CExp>, Error> {
    items.iter().map(parse_l4_cexp).collect()
}

fn parse_binding(sexp: &Sexp) -> Result<Binding, Error> {
    match sexp {
        Sexp::List(pair) if pair.len() == 2 => Ok(Binding {
            var: parse_var_decl(&pair[0])?,
            val: parse_l4_cexp(&pair[1])?,
        }),
        _ => Err(failure(format!("Bad binding: {sexp}"))),
    }
}

fn parse_var_decl(sexp: &Sexp) -> Result<VarDecl, Error> {
    Ok(VarDecl::new(checked_identifier(symbol_of(sexp)?)?))
}

fn symbol_of(sexp: &Sexp) -> Result<&str, Error> {
    sexp.as_symbol()
        .ok_or_else(|| failure(format!("Expected a variable name, got {sexp}")))
}

fn checked_identifier(name: &str) -> Result<&str, Error> {
    let first_is_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if RESERVED_WORDS.contains(&name) || PRIMITIVE_OPS.contains(&name) || first_is_digit {
        Err(failure(format!("Invalid variable name: {name}")))
    } else {
        Ok(name)
    }
}

/// Quoted datum to a value. Lists become cons chains ending in the empty
/// list, or in the explicit tail of a dotted list.
pub fn parse_sexp_value(sexp: &Sexp) -> SExpValue {
    match sexp {
        Sexp::Atom(Token::Str(text)) => SExpValue::Str(text.clone()),
        Sexp::Atom(Token::Symbol(name)) => match (parse_number(name), name.as_str()) {
            (Some(n), _) => SExpValue::Number(n),
            (None, "#t") => SExpValue::Bool(true),
            (None, "#f") => SExpValue::Bool(false),
            (None, _) => SExpValue::Symbol(name.clone()),
        },
        Sexp::List(items) => cons_chain(items, SExpValue::Empty),
        Sexp::DottedList(items, tail) => cons_chain(items, parse_sexp_value(tail)),
    }
}

fn cons_chain(items: &[Sexp], tail: SExpValue) -> SExpValue {
    items.iter().rev().fold(tail, |rest, item| {
        SExpValue::Compound(Box::new(parse_sexp_value(item)), Box::new(rest))
    })
}

fn parse_number(token: &str) -> Option<f64> {
    let numeric_chars = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    if numeric_chars && has_digit {
        token.parse().ok()
    } else {
        None
    }
}

fn failure(msg: impl Into<String>) -> Error {
    Error::ParseFailure(msg.into())
}
