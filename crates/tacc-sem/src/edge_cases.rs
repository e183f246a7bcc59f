//! End-to-end semantic analysis tests: source text through `tacc_lex`
//! and `tacc_par`, then `analyze`, asserting on the resulting
//! diagnostics.

use tacc_util::{Kind, SemanticKind};

use crate::analyze;

fn semantic_kinds(source: &str) -> Vec<SemanticKind> {
    let (tokens, lex_diags) = tacc_lex::lex(source);
    assert!(!lex_diags.has_errors(), "unexpected lexical errors in {source:?}");
    let (mut program, parse_diags) = tacc_par::parse(tokens);
    assert!(!parse_diags.has_errors(), "unexpected syntax errors in {source:?}");
    let (_table, diags) = analyze(&mut program);
    diags
        .iter()
        .filter_map(|d| match d.kind {
            Kind::Semantic(sub) => Some(sub),
            _ => None,
        })
        .collect()
}

#[test]
fn well_typed_program_has_no_diagnostics() {
    let kinds = semantic_kinds("int x; x = 1; print x;");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn redeclaration_in_same_scope_is_reported() {
    let kinds = semantic_kinds("int x; int x;");
    assert_eq!(kinds, vec![SemanticKind::Redeclaration]);
}

#[test]
fn shadowing_in_nested_scope_is_allowed() {
    let kinds = semantic_kinds("int x; { float x; x = 1.0; }");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn assigning_to_undeclared_variable_is_reported() {
    let kinds = semantic_kinds("x = 1;");
    assert_eq!(kinds, vec![SemanticKind::Undeclared]);
}

#[test]
fn use_before_init_is_reported_on_first_read() {
    let kinds = semantic_kinds("int x; print x;");
    assert_eq!(kinds, vec![SemanticKind::UseBeforeInit]);
}

#[test]
fn narrowing_float_into_int_declaration_is_reported() {
    let kinds = semantic_kinds("int x; x = 1.5;");
    assert_eq!(kinds, vec![SemanticKind::Narrowing]);
}

#[test]
fn widening_int_into_float_declaration_is_allowed() {
    let kinds = semantic_kinds("float x; x = 1;");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn int_and_char_are_mutually_assignable_through_statements() {
    let kinds = semantic_kinds("int x; char c; c = 'a'; x = c; c = x;");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn non_integral_if_condition_is_reported() {
    let kinds = semantic_kinds("float f; f = 1.0; if (f) { print f; }");
    assert_eq!(kinds, vec![SemanticKind::NonIntegralCondition]);
}

#[test]
fn non_integral_while_condition_is_reported() {
    let kinds = semantic_kinds("while (1.0) { print 1; }");
    assert_eq!(kinds, vec![SemanticKind::NonIntegralCondition]);
}

#[test]
fn return_outside_function_is_reported() {
    let kinds = semantic_kinds("return;");
    assert_eq!(kinds, vec![SemanticKind::ReturnOutsideFunc]);
}

#[test]
fn function_missing_return_on_every_path_is_reported() {
    let source = r#"
        func int f(int n) {
            if (n) {
                return 1;
            }
        }
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::TypeMismatch), "{kinds:?}");
}

#[test]
fn function_returning_on_every_branch_of_if_else_is_accepted() {
    let source = r#"
        func int f(int n) {
            if (n) {
                return 1;
            } else {
                return 0;
            }
        }
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn function_returning_only_inside_a_loop_is_rejected() {
    let source = r#"
        func int f(int n) {
            while (n) {
                return 1;
            }
        }
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::TypeMismatch), "{kinds:?}");
}

#[test]
fn call_with_wrong_arity_is_reported() {
    let source = r#"
        func int f(int n) {
            return n;
        }
        int x;
        x = f(1, 2);
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::Arity), "{kinds:?}");
}

#[test]
fn call_with_narrowing_argument_is_reported() {
    let source = r#"
        func int f(int n) {
            return n;
        }
        float y;
        y = 1.5;
        int x;
        x = f(y);
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::Narrowing), "{kinds:?}");
}

#[test]
fn recursive_call_sees_its_own_global_declaration() {
    let source = r#"
        func int factorial(int n) {
            if (n <= 1) {
                return 1;
            } else {
                return n * factorial(n - 1);
            }
        }
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn nested_function_declaration_is_rejected() {
    let source = r#"
        func int outer(int n) {
            func int inner(int m) {
                return m;
            }
            return n;
        }
    "#;
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::TypeMismatch), "{kinds:?}");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop_and_pre_initialized() {
    let kinds = semantic_kinds("loop from i = 1 to 10 { print i; }");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn for_loop_variable_does_not_leak_past_the_loop() {
    let kinds = semantic_kinds("loop from i = 1 to 10 { print i; } print i;");
    assert_eq!(kinds, vec![SemanticKind::Undeclared]);
}

#[test]
fn input_into_undeclared_variable_is_reported() {
    let kinds = semantic_kinds("input n;");
    assert_eq!(kinds, vec![SemanticKind::Undeclared]);
}

#[test]
fn input_initializes_the_target_variable() {
    let kinds = semantic_kinds("int n; input n; print n;");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn relational_operator_on_mismatched_numeric_types_is_allowed() {
    let kinds = semantic_kinds("int x; float y; x = 1; y = 2.0; if (x < y) { print x; }");
    assert!(kinds.is_empty(), "{kinds:?}");
}

#[test]
fn logical_and_on_float_operand_is_reported() {
    let kinds = semantic_kinds("float f; f = 1.0; if (f && 1) { print f; }");
    assert!(kinds.contains(&SemanticKind::TypeMismatch), "{kinds:?}");
}

#[test]
fn modulo_on_float_operand_is_reported() {
    let source = "float f; f = 1.0; int x; x = 1 % f;";
    let kinds = semantic_kinds(source);
    assert!(kinds.contains(&SemanticKind::TypeMismatch), "{kinds:?}");
}

#[test]
fn unary_negation_preserves_operand_type() {
    let (tokens, _) = tacc_lex::lex("float f; f = -1.5;");
    let (mut program, _) = tacc_par::parse(tokens);
    let (_table, diags) = analyze(&mut program);
    assert!(!diags.has_errors());
}
