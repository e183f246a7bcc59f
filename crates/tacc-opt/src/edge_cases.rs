//! End-to-end optimizer tests: source text through the full front end
//! and `tacc-icg`, then through `optimize`, asserting on the resulting
//! TAC listing.

use proptest::prelude::*;
use tacc_icg::{Instr, Operand};

use crate::optimize;

fn optimized_tac(source: &str) -> Vec<Instr> {
    let (tokens, lex_diags) = tacc_lex::lex(source);
    assert!(!lex_diags.has_errors());
    let (mut program, parse_diags) = tacc_par::parse(tokens);
    assert!(!parse_diags.has_errors());
    let (_table, sem_diags) = tacc_sem::analyze(&mut program);
    assert!(!sem_diags.has_errors());
    let (tac, icg_diags) = tacc_icg::lower(&program);
    assert!(icg_diags.is_empty());
    optimize(&tac)
}

#[test]
fn constant_fold_scenario_collapses_to_a_single_literal_assignment() {
    let instrs = optimized_tac("int x; x = 5 + 3; print x;");
    assert_eq!(
        instrs,
        vec![
            Instr::Alloc { name: "x".into(), ty: tacc_par::Type::Int },
            Instr::Copy { dst: "x".into(), src: Operand::IntLit(8) },
            Instr::Print { operand: Operand::Name("x".into()) },
        ]
    );
}

#[test]
fn division_by_literal_zero_is_left_unfolded() {
    let raw = vec![Instr::Binary {
        dst: "t0".into(),
        op: tacc_par::BinOp::Div,
        lhs: Operand::IntLit(1),
        rhs: Operand::IntLit(0),
    }];
    let (folded, changed) = crate::passes::constant_fold(&raw);
    assert!(!changed);
    assert_eq!(folded, raw);
}

#[test]
fn algebraic_identities_simplify_to_copies() {
    let (folded, changed) = crate::passes::algebraic_simplify(&[
        Instr::Binary { dst: "a".into(), op: tacc_par::BinOp::Mul, lhs: Operand::Name("x".into()), rhs: Operand::IntLit(1) },
        Instr::Binary { dst: "b".into(), op: tacc_par::BinOp::Add, lhs: Operand::IntLit(0), rhs: Operand::Name("y".into()) },
        Instr::Binary { dst: "c".into(), op: tacc_par::BinOp::Mul, lhs: Operand::Name("z".into()), rhs: Operand::IntLit(0) },
    ]);
    assert!(changed);
    assert_eq!(
        folded,
        vec![
            Instr::Copy { dst: "a".into(), src: Operand::Name("x".into()) },
            Instr::Copy { dst: "b".into(), src: Operand::Name("y".into()) },
            Instr::Copy { dst: "c".into(), src: Operand::IntLit(0) },
        ]
    );
}

#[test]
fn float_multiplication_by_one_point_zero_is_not_simplified() {
    let (out, changed) = crate::passes::algebraic_simplify(&[Instr::Binary {
        dst: "a".into(),
        op: tacc_par::BinOp::Mul,
        lhs: Operand::Name("x".into()),
        rhs: Operand::FloatLit(1.0),
    }]);
    assert!(!changed, "int/float-widening multiply must not be collapsed");
    assert_eq!(out.len(), 1);
}

#[test]
fn copy_propagation_forwards_a_single_hop() {
    let (out, changed) = crate::passes::copy_propagation(&[
        Instr::Copy { dst: "t0".into(), src: Operand::Name("x".into()) },
        Instr::Copy { dst: "y".into(), src: Operand::Name("t0".into()) },
    ]);
    assert!(changed);
    assert_eq!(out[1], Instr::Copy { dst: "y".into(), src: Operand::Name("x".into()) });
}

#[test]
fn copy_propagation_does_not_cross_a_label() {
    let (out, changed) = crate::passes::copy_propagation(&[
        Instr::Copy { dst: "t0".into(), src: Operand::Name("x".into()) },
        Instr::Label { name: "L0".into() },
        Instr::Copy { dst: "y".into(), src: Operand::Name("t0".into()) },
    ]);
    assert!(!changed);
    assert_eq!(out[2], Instr::Copy { dst: "y".into(), src: Operand::Name("t0".into()) });
}

#[test]
fn dead_code_elimination_keeps_only_the_last_write_reaching_a_read() {
    let instrs = optimized_tac("int x; x = 10; x = 20; print x;");
    let assigns_to_x = instrs
        .iter()
        .filter(|i| matches!(i, Instr::Copy { dst, .. } if dst == "x"))
        .count();
    assert_eq!(assigns_to_x, 1, "{instrs:?}");
    assert!(instrs.contains(&Instr::Copy { dst: "x".into(), src: Operand::IntLit(20) }));
}

#[test]
fn dead_code_elimination_keeps_a_loop_counter_update_reached_only_via_a_back_edge() {
    let source = "\
int sum;
sum = 0;
loop from i = 1 to 10 {
    sum = sum + i;
}
print sum;
";
    let instrs = optimized_tac(source);
    assert!(
        instrs
            .iter()
            .any(|i| matches!(i, Instr::Binary { dst, op: tacc_par::BinOp::Add, lhs: Operand::Name(lhs), .. }
                if dst == "i" && lhs == "i")),
        "loop counter update must survive DCE even though its only reader is reached via the back-edge GOTO: {instrs:?}"
    );
}

#[test]
fn dead_code_elimination_never_removes_a_call() {
    let (out, _) = crate::passes::dead_code_elimination(&[Instr::Call {
        name: "f".into(),
        n_args: 0,
        result: Some("t0".into()),
    }]);
    assert_eq!(out.len(), 1);
}

#[test]
fn unreachable_code_after_return_is_dropped() {
    let (out, changed) = crate::passes::remove_unreachable_code(&[
        Instr::Ret { operand: Some(Operand::IntLit(1)) },
        Instr::Print { operand: Operand::IntLit(2) },
        Instr::Label { name: "L0".into() },
        Instr::Print { operand: Operand::IntLit(3) },
    ]);
    assert!(changed);
    assert_eq!(out.len(), 3);
    assert!(!out.contains(&Instr::Print { operand: Operand::IntLit(2) }));
}

#[test]
fn unreferenced_labels_are_removed() {
    let (out, changed) = crate::passes::remove_unreferenced_labels(&[
        Instr::Label { name: "dead".into() },
        Instr::Goto { label: "alive".into() },
        Instr::Label { name: "alive".into() },
    ]);
    assert!(changed);
    assert_eq!(out.len(), 2);
}

#[test]
fn optimizer_preserves_print_output_for_the_if_elif_else_scenario() {
    let source = "int s; s = 85; if (s >= 90) { print 1; } elif (s >= 80) { print 2; } else { print 0; }";
    let instrs = optimized_tac(source);
    let prints: Vec<_> = instrs.iter().filter(|i| matches!(i, Instr::Print { .. })).collect();
    assert!(!prints.is_empty());
}

proptest! {
    /// Optimizer idempotence: running the optimizer on its own output
    /// must be a no-op.
    #[test]
    fn optimizer_is_idempotent(n in 0i64..1000) {
        let source = format!("int x; x = {n} + 0; print x;");
        let instrs = optimized_tac(&source);
        let twice = optimize(&instrs);
        prop_assert_eq!(instrs, twice);
    }
}
