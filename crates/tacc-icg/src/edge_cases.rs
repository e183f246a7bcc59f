//! End-to-end lowering tests: source text through the full front end,
//! then through this crate's lowering, asserting on the resulting TAC.

use std::collections::HashSet;

use crate::{lower, Instr, Operand};

fn lower_source(source: &str) -> Vec<Instr> {
    let (tokens, lex_diags) = tacc_lex::lex(source);
    assert!(!lex_diags.has_errors(), "unexpected lexical errors in {source:?}");
    let (mut program, parse_diags) = tacc_par::parse(tokens);
    assert!(!parse_diags.has_errors(), "unexpected syntax errors in {source:?}");
    let (_table, sem_diags) = tacc_sem::analyze(&mut program);
    assert!(!sem_diags.has_errors(), "unexpected semantic errors in {source:?}: {:?}", sem_diags.iter().collect::<Vec<_>>());
    let (instrs, icg_diags) = lower(&program);
    assert!(icg_diags.is_empty(), "unexpected ICG diagnostics: {:?}", icg_diags.iter().collect::<Vec<_>>());
    instrs
}

/// Every jump target has a matching `LABEL` - the TAC label closure
/// property from the testable-properties list.
fn assert_label_closure(instrs: &[Instr]) {
    let labels: HashSet<&str> = instrs
        .iter()
        .filter_map(|i| match i {
            Instr::Label { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    for instr in instrs {
        let target = match instr {
            Instr::Goto { label } | Instr::IfFalse { label, .. } | Instr::IfTrue { label, .. } => Some(label.as_str()),
            _ => None,
        };
        if let Some(target) = target {
            assert!(labels.contains(target), "jump to undefined label {target} in {instrs:?}");
        }
    }
}

#[test]
fn simple_declaration_and_assignment_lowers_to_alloc_then_copy() {
    let instrs = lower_source("int x; x = 5;");
    assert_eq!(
        instrs,
        vec![
            Instr::Alloc { name: "x".into(), ty: tacc_par::Type::Int },
            Instr::Copy { dst: "x".into(), src: Operand::IntLit(5) },
        ]
    );
}

#[test]
fn arithmetic_expression_allocates_one_temp_per_binary_op() {
    let instrs = lower_source("int x; x = 5 + 3;");
    assert_label_closure(&instrs);
    let binary_count = instrs.iter().filter(|i| matches!(i, Instr::Binary { .. })).count();
    assert_eq!(binary_count, 1);
}

#[test]
fn if_elif_else_chain_has_one_false_branch_per_clause_and_a_shared_end_label() {
    let source = "int s; s = 85; if (s >= 90) { print 1; } elif (s >= 80) { print 2; } else { print 0; }";
    let instrs = lower_source(source);
    assert_label_closure(&instrs);
    let if_false_count = instrs.iter().filter(|i| matches!(i, Instr::IfFalse { .. })).count();
    assert_eq!(if_false_count, 2, "one IF_FALSE per tested clause");
    let label_count = instrs.iter().filter(|i| matches!(i, Instr::Label { .. })).count();
    assert_eq!(label_count, 3, "one label per clause-skip target plus the shared end label");
}

#[test]
fn while_loop_tests_before_every_iteration() {
    let instrs = lower_source("int i; i = 0; while (i) { i = i; }");
    assert_label_closure(&instrs);
    let gotos = instrs.iter().filter(|i| matches!(i, Instr::Goto { .. })).count();
    assert_eq!(gotos, 1, "the loop-back edge");
}

#[test]
fn counted_loop_increments_by_one_when_no_step_is_given() {
    let instrs = lower_source("loop from i = 1 to 10 { print i; }");
    assert_label_closure(&instrs);
    let has_default_increment = instrs.iter().any(|i| {
        matches!(
            i,
            Instr::Binary { dst, op: tacc_par::BinOp::Add, rhs: Operand::IntLit(1), .. } if dst == "i"
        )
    });
    assert!(has_default_increment, "{instrs:?}");
}

#[test]
fn counted_loop_variable_is_allocated_storage() {
    let instrs = lower_source("loop from i = 1 to 10 { print i; }");
    assert!(
        instrs.iter().any(|i| matches!(i, Instr::Alloc { name, ty: tacc_par::Type::Int } if name == "i")),
        "loop variable needs an ALLOC so tacc-gen gives it a .data entry: {instrs:?}"
    );
}

#[test]
fn counted_loop_with_explicit_step_uses_it() {
    let instrs = lower_source("loop from i = 0 to 10 step 2 { print i; }");
    let has_step_increment = instrs.iter().any(|i| {
        matches!(
            i,
            Instr::Binary { dst, op: tacc_par::BinOp::Add, rhs: Operand::IntLit(2), .. } if dst == "i"
        )
    });
    assert!(has_step_increment, "{instrs:?}");
}

#[test]
fn function_declaration_emits_a_label_and_ends_with_a_return() {
    let source = r#"
        func int factorial(int n) {
            if (n <= 1) {
                return 1;
            } else {
                return n * factorial(n - 1);
            }
        }
    "#;
    let instrs = lower_source(source);
    assert_label_closure(&instrs);
    assert_eq!(instrs.first(), Some(&Instr::Label { name: "factorial".into() }));
    let ret_count = instrs.iter().filter(|i| matches!(i, Instr::Ret { .. })).count();
    assert_eq!(ret_count, 2, "one RET per returning branch");
}

#[test]
fn call_used_in_an_expression_allocates_a_result_temporary() {
    let source = r#"
        func int id(int n) {
            return n;
        }
        int x;
        x = id(1);
    "#;
    let instrs = lower_source(source);
    let call = instrs.iter().find(|i| matches!(i, Instr::Call { .. })).unwrap();
    match call {
        Instr::Call { n_args, result, .. } => {
            assert_eq!(*n_args, 1);
            assert!(result.is_some());
        }
        _ => unreachable!(),
    }
}

#[test]
fn bare_call_statement_discards_its_result() {
    let source = r#"
        func int id(int n) {
            return n;
        }
        id(1);
    "#;
    let instrs = lower_source(source);
    let call = instrs.iter().find(|i| matches!(i, Instr::Call { .. })).unwrap();
    match call {
        Instr::Call { result, .. } => assert!(result.is_none()),
        _ => unreachable!(),
    }
}

#[test]
fn logical_and_short_circuits_via_control_flow_not_eager_evaluation() {
    let source = "int a; int b; a = 1; b = 0; if (a && b) { print 1; }";
    let instrs = lower_source(source);
    assert_label_closure(&instrs);
    // The lowering of `&&` itself must branch rather than always
    // evaluating both sides eagerly into one binary instruction.
    let and_as_binary_op = instrs.iter().any(|i| matches!(i, Instr::Binary { op: tacc_par::BinOp::And, .. }));
    assert!(!and_as_binary_op, "&& must not lower to a single eager binary op");
    let if_true_or_false_for_short_circuit = instrs.iter().filter(|i| matches!(i, Instr::IfFalse { .. })).count();
    assert!(if_true_or_false_for_short_circuit >= 2, "{instrs:?}");
}

#[test]
fn logical_or_short_circuits_via_if_true() {
    let source = "int a; int b; a = 1; b = 0; if (a || b) { print 1; }";
    let instrs = lower_source(source);
    assert_label_closure(&instrs);
    assert!(instrs.iter().any(|i| matches!(i, Instr::IfTrue { .. })));
}

#[test]
fn print_and_input_lower_directly() {
    let instrs = lower_source("int x; input x; print x;");
    assert!(instrs.contains(&Instr::Input { name: "x".into() }));
    assert!(instrs.contains(&Instr::Print { operand: Operand::Name("x".into()) }));
}

#[test]
fn temporaries_are_unique_within_a_compilation() {
    let instrs = lower_source("int x; x = (1 + 2) * (3 + 4);");
    let mut temps = Vec::new();
    for instr in &instrs {
        if let Instr::Binary { dst, .. } = instr {
            temps.push(dst.clone());
        }
    }
    let unique: HashSet<_> = temps.iter().collect();
    assert_eq!(unique.len(), temps.len(), "{temps:?}");
}

#[test]
fn rendered_listing_matches_the_spec_text_shapes() {
    let instrs = lower_source("int x; x = 5 + 3; print x;");
    let text = crate::render(&instrs);
    assert!(text.contains("ALLOC x int"));
    assert!(text.contains("PRINT x"));
}
