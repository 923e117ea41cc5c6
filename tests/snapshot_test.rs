use pretty_assertions::assert_eq;

#[test]
fn snapshot_application() {
    let output = l4mermaid::l4_to_mermaid("(+ 1 2)").unwrap();
    let expected = "\
graph TD
AppExp_1[AppExp] -->|rator| PrimOp_1[\"PrimOp(+)\"]
AppExp_1 -->|rands| Rands_1[:]
Rands_1 --> NumExp_1[\"NumExp(1)\"]
Rands_1 --> NumExp_2[\"NumExp(2)\"]";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_program_with_quoted_list() {
    let output = l4mermaid::l4_to_mermaid("(L4 (define my-list '(1 2)))").unwrap();
    let expected = "\
graph TD
Program_1[Program] -->|exps| Exps_1[:]
Exps_1 --> DefineExp_1[DefineExp]
DefineExp_1 -->|var| VarDecl_1[\"VarDecl(my-list)\"]
DefineExp_1 -->|val| LitExp_1[LitExp]
LitExp_1 -->|val| CompoundSExp_1[\"CompoundSExp\"]
CompoundSExp_1 -->|val1| number_1[\"number(1)\"]
CompoundSExp_1 -->|val2| CompoundSExp_2[\"CompoundSExp\"]
CompoundSExp_2 -->|val1| number_2[\"number(2)\"]
CompoundSExp_2 -->|val2| EmptySExp_1[\"EmptySExp\"]";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_lambda() {
    let output = l4mermaid::l4_to_mermaid("(lambda (x) (* x x))").unwrap();
    let expected = "\
graph TD
ProcExp_1[ProcExp] -->|args| Args_1[:]
ProcExp_1 -->|body| Body_1[:]
Args_1 --> VarDecl_1[\"VarDecl(x)\"]
Body_1 --> AppExp_1[AppExp]
AppExp_1 -->|rator| PrimOp_1[\"PrimOp(*)\"]
AppExp_1 -->|rands| Rands_1[:]
Rands_1 --> VarRef_1[\"VarRef(x)\"]
Rands_1 --> VarRef_2[\"VarRef(x)\"]";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_let_with_binding() {
    let output = l4mermaid::l4_to_mermaid("(let ((a #t)) a)").unwrap();
    let expected = "\
graph TD
LetExp_1[LetExp] -->|bindings| Bindings_1[:]
LetExp_1 -->|body| Body_1[:]
Bindings_1 --> Binding_1[\"Binding\"]
Binding_1 -->|var| VarDecl_1[\"VarDecl(a)\"]
Binding_1 -->|val| BoolExp_1[\"BoolExp(#t)\"]
Body_1 --> VarRef_1[\"VarRef(a)\"]";
    assert_eq!(output, expected);
}

#[test]
fn snapshot_left_right() {
    let options = l4mermaid::Options {
        direction: l4mermaid::Direction::LeftRight,
    };
    let output = l4mermaid::l4_to_mermaid_with_options("(L4 #f)", &options).unwrap();
    let expected = "\
graph LR
Program_1[Program] -->|exps| Exps_1[:]
Exps_1 --> BoolExp_1[\"BoolExp(#f)\"]";
    assert_eq!(output, expected);
}
