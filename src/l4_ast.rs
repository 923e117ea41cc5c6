//! Abstract syntax of L4, a small Scheme dialect.
//!
//! Every form lists its fields in a fixed order through [`Syntax::to_term`];
//! that order is the order edges appear in the rendered diagram.

use crate::term::{Atom, Syntax, Term};

#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Program(Program),
    Exp(Exp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub exps: Vec<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Exp {
    Define(DefineExp),
    CExp(CExp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefineExp {
    pub var: VarDecl,
    pub val: CExp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CExp {
    Num(f64),
    Bool(bool),
    Str(String),
    PrimOp(String),
    VarRef(VarRef),
    App(AppExp),
    If(IfExp),
    Proc(ProcExp),
    Let(LetExp),
    Letrec(LetrecExp),
    Set(SetExp),
    Lit(LitExp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub var: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppExp {
    pub rator: Box<CExp>,
    pub rands: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub test: Box<CExp>,
    pub then: Box<CExp>,
    /// Absent for a one-armed `(if test then)`.
    pub alt: Option<Box<CExp>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcExp {
    pub args: Vec<VarDecl>,
    pub body: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub var: VarDecl,
    pub val: CExp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetExp {
    pub bindings: Vec<Binding>,
    pub body: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetrecExp {
    pub bindings: Vec<Binding>,
    pub body: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetExp {
    pub var: VarRef,
    pub val: Box<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LitExp {
    pub val: SExpValue,
}

/// Quoted data.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpValue {
    Number(f64),
    Bool(bool),
    Str(String),
    Symbol(String),
    Empty,
    Compound(Box<SExpValue>, Box<SExpValue>),
}

impl VarDecl {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl VarRef {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl Syntax for Program {
    fn tag(&self) -> &'static str {
        "Program"
    }

    fn to_term(&self) -> Term {
        Term::record(self.tag(), vec![("exps", Term::array(&self.exps))])
    }
}

impl Syntax for Exp {
    fn tag(&self) -> &'static str {
        match self {
            Exp::Define(def) => def.tag(),
            Exp::CExp(exp) => exp.tag(),
        }
    }

    fn to_term(&self) -> Term {
        match self {
            Exp::Define(def) => def.to_term(),
            Exp::CExp(exp) => exp.to_term(),
        }
    }
}

impl Syntax for DefineExp {
    fn tag(&self) -> &'static str {
        "DefineExp"
    }

    fn to_term(&self) -> Term {
        Term::record(
            self.tag(),
            vec![("var", self.var.to_term()), ("val", self.val.to_term())],
        )
    }
}

impl Syntax for CExp {
    fn tag(&self) -> &'static str {
        match self {
            CExp::Num(_) => "NumExp",
            CExp::Bool(_) => "BoolExp",
            CExp::Str(_) => "StrExp",
            CExp::PrimOp(_) => "PrimOp",
            CExp::VarRef(var) => var.tag(),
            CExp::App(_) => "AppExp",
            CExp::If(_) => "IfExp",
            CExp::Proc(_) => "ProcExp",
            CExp::Let(_) => "LetExp",
            CExp::Letrec(_) => "LetrecExp",
            CExp::Set(_) => "SetExp",
            CExp::Lit(_) => "LitExp",
        }
    }

    fn to_term(&self) -> Term {
        let tag = self.tag();
        match self {
            CExp::Num(n) => Term::leaf(tag, Atom::Number(*n)),
            CExp::Bool(b) => Term::leaf(tag, Atom::Bool(*b)),
            CExp::Str(s) => Term::leaf(tag, Atom::Str(s.clone())),
            CExp::PrimOp(op) => Term::leaf(tag, Atom::Str(op.clone())),
            CExp::VarRef(var) => var.to_term(),
            CExp::App(app) => Term::record(
                tag,
                vec![
                    ("rator", app.rator.to_term()),
                    ("rands", Term::array(&app.rands)),
                ],
            ),
            CExp::If(exp) => {
                let mut fields = vec![("test", exp.test.to_term()), ("then", exp.then.to_term())];
                if let Some(alt) = &exp.alt {
                    fields.push(("alt", alt.to_term()));
                }
                Term::record(tag, fields)
            }
            CExp::Proc(proc) => Term::record(
                tag,
                vec![
                    ("args", Term::array(&proc.args)),
                    ("body", Term::array(&proc.body)),
                ],
            ),
            CExp::Let(exp) => Term::record(
                tag,
                vec![
                    ("bindings", Term::array(&exp.bindings)),
                    ("body", Term::array(&exp.body)),
                ],
            ),
            CExp::Letrec(exp) => Term::record(
                tag,
                vec![
                    ("bindings", Term::array(&exp.bindings)),
                    ("body", Term::array(&exp.body)),
                ],
            ),
            CExp::Set(exp) => Term::record(
                tag,
                vec![("var", exp.var.to_term()), ("val", exp.val.to_term())],
            ),
            CExp::Lit(exp) => Term::record(tag, vec![("val", exp.val.to_term())]),
        }
    }
}

impl Syntax for VarDecl {
    fn tag(&self) -> &'static str {
        "VarDecl"
    }

    fn to_term(&self) -> Term {
        Term::leaf(self.tag(), Atom::Str(self.var.clone()))
    }
}

impl Syntax for VarRef {
    fn tag(&self) -> &'static str {
        "VarRef"
    }

    fn to_term(&self) -> Term {
        Term::leaf(self.tag(), Atom::Str(self.var.clone()))
    }
}

impl Syntax for Binding {
    fn tag(&self) -> &'static str {
        "Binding"
    }

    fn to_term(&self) -> Term {
        Term::record(
            self.tag(),
            vec![("var", self.var.to_term()), ("val", self.val.to_term())],
        )
    }
}

impl Syntax for SExpValue {
    fn tag(&self) -> &'static str {
        match self {
            SExpValue::Number(_) => "number",
            SExpValue::Bool(_) => "boolean",
            SExpValue::Str(_) => "string",
            SExpValue::Symbol(_) => "SymbolSExp",
            SExpValue::Empty => "EmptySExp",
            SExpValue::Compound(..) => "CompoundSExp",
        }
    }

    fn to_term(&self) -> Term {
        let tag = self.tag();
        match self {
            SExpValue::Number(n) => Term::Literal(Atom::Number(*n)),
            SExpValue::Bool(b) => Term::Literal(Atom::Bool(*b)),
            SExpValue::Str(s) => Term::Literal(Atom::Str(s.clone())),
            SExpValue::Symbol(name) => Term::leaf(tag, Atom::Str(name.clone())),
            SExpValue::Empty => Term::empty(tag),
            SExpValue::Compound(..) => {
                // Walk the `val2` spine in a loop; quoted lists can be long.
                let mut heads = Vec::new();
                let mut rest = self;
                while let SExpValue::Compound(val1, val2) = rest {
                    heads.push(val1);
                    rest = val2;
                }
                heads.into_iter().rev().fold(rest.to_term(), |tail, head| {
                    Term::record(tag, vec![("val1", head.to_term()), ("val2", tail)])
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn if_without_alt_has_two_fields() {
        let exp = CExp::If(IfExp {
            test: Box::new(CExp::Bool(true)),
            then: Box::new(CExp::Num(1.0)),
            alt: None,
        });
        match exp.to_term() {
            Term::Record { tag, fields } => {
                assert_eq!(tag, "IfExp");
                let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
                assert_eq!(names, vec!["test", "then"]);
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn quoted_list_is_a_cons_chain() {
        let value = SExpValue::Compound(Box::new(SExpValue::Number(1.0)), Box::new(SExpValue::Empty));
        assert_eq!(
            value.to_term(),
            Term::record(
                "CompoundSExp",
                vec![
                    ("val1", Term::Literal(Atom::Number(1.0))),
                    ("val2", Term::empty("EmptySExp")),
                ]
            )
        );
    }

    #[test]
    fn leaves_carry_one_payload() {
        assert_eq!(
            CExp::VarRef(VarRef::new("x")).to_term(),
            Term::leaf("VarRef", Atom::Str("x".to_string()))
        );
        assert_eq!(CExp::Bool(false).to_term(), Term::leaf("BoolExp", Atom::Bool(false)));
    }

    #[test]
    fn program_tag() {
        let program = Program { exps: vec![] };
        assert_eq!(program.tag(), "Program");
    }

    #[test]
    fn long_quoted_list_keeps_cons_order() {
        let value = (0..3).rev().fold(SExpValue::Empty, |tail, i| {
            SExpValue::Compound(Box::new(SExpValue::Number(f64::from(i))), Box::new(tail))
        });
        let mut term = value.to_term();
        for expected in 0..3 {
            match term {
                Term::Record { tag, mut fields } => {
                    assert_eq!(tag, "CompoundSExp");
                    let (_, tail) = fields.pop().unwrap();
                    assert_eq!(fields, vec![("val1".to_string(), Term::Literal(Atom::Number(f64::from(expected))))]);
                    term = tail;
                }
                other => panic!("expected record, got {other:?}"),
            }
        }
        assert_eq!(term, Term::empty("EmptySExp"));
    }
}
