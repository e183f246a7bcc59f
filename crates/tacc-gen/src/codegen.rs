//! Walks an optimized TAC listing and emits pseudo-assembly: a `.data`
//! section built from `ALLOC` instructions and a `.text` section with
//! one pseudo-instruction sequence per TAC instruction, per the
//! stack-machine instruction mapping.

use tacc_icg::{Instr, Operand};
use tacc_par::{BinOp, Type, UnOp};

use crate::asm::Assembly;
use crate::error::{CodeGenError, Result};

fn size_of(ty: &Type) -> u32 {
    match ty {
        Type::Int | Type::Float => 4,
        Type::Char => 1,
    }
}

fn type_name(ty: &Type) -> &'static str {
    match ty {
        Type::Int => "int",
        Type::Float => "float",
        Type::Char => "char",
    }
}

fn bin_opcode(op: &BinOp) -> &'static str {
    match op {
        BinOp::Add => "ADD",
        BinOp::Sub => "SUB",
        BinOp::Mul => "MUL",
        BinOp::Div => "DIV",
        BinOp::Mod => "MOD",
        BinOp::Eq => "CMP_EQ",
        BinOp::Ne => "CMP_NE",
        BinOp::Lt => "CMP_LT",
        BinOp::Gt => "CMP_GT",
        BinOp::Le => "CMP_LE",
        BinOp::Ge => "CMP_GE",
        BinOp::And => "AND",
        BinOp::Or => "OR",
    }
}

fn un_opcode(op: &UnOp) -> &'static str {
    match op {
        UnOp::Neg => "NEG",
        UnOp::Not => "NOT",
    }
}

/// Emits the load sequence for an operand: an immediate load for a
/// literal, a memory load for a name.
fn load_operand(text: &mut Vec<String>, operand: &Operand) {
    match operand {
        Operand::Name(name) => text.push(format!("LOAD {name}")),
        literal => text.push(format!("LOAD_IMM {literal}")),
    }
}

/// Generates a pseudo-assembly listing from optimized TAC.
///
/// Tracks the count of `PARAM` instructions seen since the last `CALL`
/// (or the start of the listing) so a `CALL`'s declared argument count
/// can be checked against what actually preceded it; any other
/// mismatch would mean an earlier phase emitted inconsistent TAC.
pub fn generate(instrs: &[Instr]) -> Result<Assembly> {
    let mut asm = Assembly::new();
    let mut pending_params = 0usize;

    for instr in instrs {
        match instr {
            Instr::Alloc { name, ty } => {
                asm.data.push(format!("{name}: .space {} ; {}", size_of(ty), type_name(ty)));
            }
            Instr::Copy { dst, src } => {
                load_operand(&mut asm.text, src);
                asm.text.push(format!("STORE {dst}"));
            }
            Instr::Unary { dst, op, operand } => {
                load_operand(&mut asm.text, operand);
                asm.text.push(un_opcode(op).to_string());
                asm.text.push(format!("STORE {dst}"));
            }
            Instr::Binary { dst, op, lhs, rhs } => {
                load_operand(&mut asm.text, lhs);
                load_operand(&mut asm.text, rhs);
                asm.text.push(bin_opcode(op).to_string());
                asm.text.push(format!("STORE {dst}"));
            }
            Instr::Label { name } => {
                asm.text.push(format!("{name}:"));
            }
            Instr::Goto { label } => {
                asm.text.push(format!("JMP {label}"));
            }
            Instr::IfFalse { cond, label } => {
                load_operand(&mut asm.text, cond);
                asm.text.push(format!("JZ {label}"));
            }
            Instr::IfTrue { cond, label } => {
                load_operand(&mut asm.text, cond);
                asm.text.push(format!("JNZ {label}"));
            }
            Instr::Param { operand } => {
                asm.text.push(format!("PUSH {operand}"));
                pending_params += 1;
            }
            Instr::Call { name, n_args, result } => {
                if pending_params != *n_args {
                    return Err(CodeGenError::ParamArityMismatch {
                        function: name.clone(),
                        expected: *n_args,
                        found: pending_params,
                    });
                }
                pending_params = 0;
                asm.text.push(format!("CALL {name}"));
                if let Some(result) = result {
                    asm.text.push(format!("STORE {result}"));
                }
            }
            Instr::Ret { operand } => {
                if let Some(operand) = operand {
                    load_operand(&mut asm.text, operand);
                }
                asm.text.push("RET".to_string());
            }
            Instr::Print { operand } => {
                load_operand(&mut asm.text, operand);
                asm.text.push("PRINT".to_string());
            }
            Instr::Input { name } => {
                asm.text.push("INPUT".to_string());
                asm.text.push(format!("STORE {name}"));
            }
        }
    }

    Ok(asm)
}
