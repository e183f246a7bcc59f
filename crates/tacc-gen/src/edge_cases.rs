//! Edge case tests for tacc-gen.

use tacc_icg::{Instr, Operand};
use tacc_par::Type;

use crate::generate;

#[test]
fn empty_listing_produces_empty_assembly() {
    let asm = generate(&[]).unwrap();
    assert!(asm.data.is_empty());
    assert!(asm.text.is_empty());
}

#[test]
fn call_with_zero_declared_args_and_no_preceding_params_succeeds() {
    let instrs = vec![Instr::Call { name: "f".into(), n_args: 0, result: None }];
    assert!(generate(&instrs).is_ok());
}

#[test]
fn params_reset_after_each_call_do_not_leak_into_the_next() {
    let instrs = vec![
        Instr::Param { operand: Operand::IntLit(1) },
        Instr::Call { name: "f".into(), n_args: 1, result: None },
        // A second call with no preceding PARAM must not see the
        // first call's argument count.
        Instr::Call { name: "g".into(), n_args: 0, result: None },
    ];
    let asm = generate(&instrs).unwrap();
    assert_eq!(asm.text, vec!["PUSH 1", "CALL f", "CALL g"]);
}

#[test]
fn call_declaring_more_args_than_preceded_it_is_an_error() {
    let instrs = vec![Instr::Call { name: "f".into(), n_args: 1, result: None }];
    let err = generate(&instrs).unwrap_err();
    assert_eq!(
        err,
        crate::CodeGenError::ParamArityMismatch { function: "f".into(), expected: 1, found: 0 }
    );
}

#[test]
fn call_declaring_fewer_args_than_preceded_it_is_an_error() {
    let instrs = vec![
        Instr::Param { operand: Operand::IntLit(1) },
        Instr::Param { operand: Operand::IntLit(2) },
        Instr::Call { name: "f".into(), n_args: 1, result: None },
    ];
    let err = generate(&instrs).unwrap_err();
    assert_eq!(
        err,
        crate::CodeGenError::ParamArityMismatch { function: "f".into(), expected: 1, found: 2 }
    );
}

#[test]
fn float_and_char_literals_render_through_operand_display() {
    let instrs = vec![
        Instr::Copy { dst: "x".into(), src: Operand::FloatLit(1.5) },
        Instr::Copy { dst: "c".into(), src: Operand::CharLit('a') },
    ];
    let asm = generate(&instrs).unwrap();
    assert_eq!(asm.text, vec!["LOAD_IMM 1.5", "STORE x", "LOAD_IMM 'a'", "STORE c"]);
}

#[test]
fn negative_int_literal_is_still_an_immediate_not_a_name() {
    let instrs = vec![Instr::Copy { dst: "x".into(), src: Operand::IntLit(-5) }];
    let asm = generate(&instrs).unwrap();
    assert_eq!(asm.text, vec!["LOAD_IMM -5", "STORE x"]);
}

#[test]
fn consecutive_allocs_each_get_their_own_data_line_in_source_order() {
    let instrs = vec![
        Instr::Alloc { name: "a".into(), ty: Type::Int },
        Instr::Alloc { name: "b".into(), ty: Type::Char },
        Instr::Alloc { name: "c".into(), ty: Type::Float },
    ];
    let asm = generate(&instrs).unwrap();
    assert_eq!(asm.data, vec![
        "a: .space 4 ; int",
        "b: .space 1 ; char",
        "c: .space 4 ; float",
    ]);
}

#[test]
fn label_and_temp_names_sharing_a_digit_suffix_render_distinctly() {
    let instrs = vec![
        Instr::Label { name: "L0".into() },
        Instr::Copy { dst: "t0".into(), src: Operand::IntLit(1) },
    ];
    let asm = generate(&instrs).unwrap();
    assert_eq!(asm.text, vec!["L0:", "LOAD_IMM 1", "STORE t0"]);
}
