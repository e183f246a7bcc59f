//! The individual rewrite passes the optimizer runs to a fixed point.
//! Each pass is a pure function `Vec<Instr> -> (Vec<Instr>, bool)`; the
//! bool reports whether the pass changed anything, which drives the
//! fixpoint loop in `lib.rs`.

use std::collections::{HashMap, HashSet};

use tacc_icg::{Instr, Operand};
use tacc_par::BinOp;

fn as_f64(operand: &Operand) -> Option<f64> {
    match operand {
        Operand::IntLit(v) => Some(*v as f64),
        Operand::FloatLit(v) => Some(*v),
        _ => None,
    }
}

fn as_int_pair(lhs: &Operand, rhs: &Operand) -> Option<(i64, i64)> {
    match (lhs, rhs) {
        (Operand::IntLit(a), Operand::IntLit(b)) => Some((*a, *b)),
        _ => None,
    }
}

fn fold_binary(op: BinOp, lhs: &Operand, rhs: &Operand) -> Option<Operand> {
    if let Some((a, b)) = as_int_pair(lhs, rhs) {
        return match op {
            BinOp::Add => Some(Operand::IntLit(a.wrapping_add(b))),
            BinOp::Sub => Some(Operand::IntLit(a.wrapping_sub(b))),
            BinOp::Mul => Some(Operand::IntLit(a.wrapping_mul(b))),
            BinOp::Div if b == 0 => None,
            BinOp::Div => Some(Operand::IntLit(a.wrapping_div(b))),
            BinOp::Mod if b == 0 => None,
            BinOp::Mod => Some(Operand::IntLit(a.wrapping_rem(b))),
            BinOp::Eq => Some(Operand::IntLit((a == b) as i64)),
            BinOp::Ne => Some(Operand::IntLit((a != b) as i64)),
            BinOp::Lt => Some(Operand::IntLit((a < b) as i64)),
            BinOp::Gt => Some(Operand::IntLit((a > b) as i64)),
            BinOp::Le => Some(Operand::IntLit((a <= b) as i64)),
            BinOp::Ge => Some(Operand::IntLit((a >= b) as i64)),
            BinOp::And => Some(Operand::IntLit(((a != 0) && (b != 0)) as i64)),
            BinOp::Or => Some(Operand::IntLit(((a != 0) || (b != 0)) as i64)),
        };
    }
    let (a, b) = (as_f64(lhs)?, as_f64(rhs)?);
    match op {
        BinOp::Add => Some(Operand::FloatLit(a + b)),
        BinOp::Sub => Some(Operand::FloatLit(a - b)),
        BinOp::Mul => Some(Operand::FloatLit(a * b)),
        BinOp::Div if b == 0.0 => None,
        BinOp::Div => Some(Operand::FloatLit(a / b)),
        BinOp::Mod => None,
        BinOp::Eq => Some(Operand::IntLit((a == b) as i64)),
        BinOp::Ne => Some(Operand::IntLit((a != b) as i64)),
        BinOp::Lt => Some(Operand::IntLit((a < b) as i64)),
        BinOp::Gt => Some(Operand::IntLit((a > b) as i64)),
        BinOp::Le => Some(Operand::IntLit((a <= b) as i64)),
        BinOp::Ge => Some(Operand::IntLit((a >= b) as i64)),
        BinOp::And => Some(Operand::IntLit(((a != 0.0) && (b != 0.0)) as i64)),
        BinOp::Or => Some(Operand::IntLit(((a != 0.0) || (b != 0.0)) as i64)),
    }
}

fn fold_unary(op: tacc_par::UnOp, operand: &Operand) -> Option<Operand> {
    use tacc_par::UnOp;
    match operand {
        Operand::IntLit(v) => match op {
            UnOp::Neg => Some(Operand::IntLit(-v)),
            UnOp::Not => Some(Operand::IntLit(if *v == 0 { 1 } else { 0 })),
        },
        Operand::FloatLit(v) => match op {
            UnOp::Neg => Some(Operand::FloatLit(-v)),
            UnOp::Not => None,
        },
        _ => None,
    }
}

/// Replaces binary/unary instructions over all-literal operands with a
/// copy of the computed literal. Division and modulo by literal zero
/// are left untouched so the runtime can trap on them.
pub fn constant_fold(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(instrs.len());
    for instr in instrs {
        let folded = match instr {
            Instr::Binary { dst, op, lhs, rhs } => {
                fold_binary(*op, lhs, rhs).map(|value| Instr::Copy { dst: dst.clone(), src: value })
            }
            Instr::Unary { dst, op, operand } => {
                fold_unary(*op, operand).map(|value| Instr::Copy { dst: dst.clone(), src: value })
            }
            _ => None,
        };
        match folded {
            Some(instr) => {
                changed = true;
                out.push(instr);
            }
            None => out.push(instr.clone()),
        }
    }
    (out, changed)
}

fn is_int_literal(operand: &Operand, value: i64) -> bool {
    matches!(operand, Operand::IntLit(v) if *v == value)
}

/// Identity rewrites (`x*1`, `x+0`, `x*0`, …), restricted to an
/// integer-literal operand so a type-changing case like `x * 1.0`
/// (int widened to float) is never collapsed away.
pub fn algebraic_simplify(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(instrs.len());
    for instr in instrs {
        let simplified = match instr {
            Instr::Binary { dst, op: BinOp::Mul, lhs, rhs } if is_int_literal(rhs, 1) => Some((dst, lhs.clone())),
            Instr::Binary { dst, op: BinOp::Mul, lhs, rhs } if is_int_literal(lhs, 1) => Some((dst, rhs.clone())),
            Instr::Binary { dst, op: BinOp::Mul, rhs, .. } if is_int_literal(rhs, 0) => {
                Some((dst, Operand::IntLit(0)))
            }
            Instr::Binary { dst, op: BinOp::Mul, lhs, .. } if is_int_literal(lhs, 0) => {
                Some((dst, Operand::IntLit(0)))
            }
            Instr::Binary { dst, op: BinOp::Add, lhs, rhs } if is_int_literal(rhs, 0) => Some((dst, lhs.clone())),
            Instr::Binary { dst, op: BinOp::Add, lhs, rhs } if is_int_literal(lhs, 0) => Some((dst, rhs.clone())),
            Instr::Binary { dst, op: BinOp::Sub, lhs, rhs } if is_int_literal(rhs, 0) => Some((dst, lhs.clone())),
            Instr::Binary { dst, op: BinOp::Div, lhs, rhs } if is_int_literal(rhs, 1) => Some((dst, lhs.clone())),
            _ => None,
        };
        match simplified {
            Some((dst, src)) => {
                changed = true;
                out.push(Instr::Copy { dst: dst.clone(), src });
            }
            None => out.push(instr.clone()),
        }
    }
    (out, changed)
}

/// Whether `name` is an ICG-generated temporary (`t0`, `t1`, …) rather
/// than a source-level variable.
fn is_temp(name: &str) -> bool {
    name.strip_prefix('t').is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// `t = x; y = t` becomes `y = x`, for every later read of `t` up to
/// the point it is redefined or a label is crossed (a label may be a
/// merge point from another path, so propagation does not cross it).
/// Only temporaries are forwarded this way - propagating a
/// source-level variable's value into every later read would make its
/// own assignment look dead to `dead_code_elimination` even though the
/// variable itself is still observable (e.g. via a later `print`).
pub fn copy_propagation(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let mut changed = false;
    let mut available: HashMap<String, Operand> = HashMap::new();
    let mut out = Vec::with_capacity(instrs.len());

    let substitute = |operand: &Operand, available: &HashMap<String, Operand>| -> Operand {
        match operand {
            Operand::Name(name) => available.get(name).cloned().unwrap_or_else(|| operand.clone()),
            other => other.clone(),
        }
    };

    for instr in instrs {
        let rewritten = match instr {
            Instr::Copy { dst, src } => Instr::Copy { dst: dst.clone(), src: substitute(src, &available) },
            Instr::Unary { dst, op, operand } => {
                let operand = substitute(operand, &available);
                Instr::Unary { dst: dst.clone(), op: *op, operand }
            }
            Instr::Binary { dst, op, lhs, rhs } => {
                let lhs = substitute(lhs, &available);
                let rhs = substitute(rhs, &available);
                Instr::Binary { dst: dst.clone(), op: *op, lhs, rhs }
            }
            Instr::IfFalse { cond, label } => Instr::IfFalse { cond: substitute(cond, &available), label: label.clone() },
            Instr::IfTrue { cond, label } => Instr::IfTrue { cond: substitute(cond, &available), label: label.clone() },
            Instr::Param { operand } => Instr::Param { operand: substitute(operand, &available) },
            Instr::Ret { operand: Some(operand) } => Instr::Ret { operand: Some(substitute(operand, &available)) },
            Instr::Print { operand } => Instr::Print { operand: substitute(operand, &available) },
            other => other.clone(),
        };

        if &rewritten != instr {
            changed = true;
        }

        if let Some(name) = rewritten.defines() {
            available.remove(name);
            available.retain(|_, v| v != &Operand::Name(name.to_string()));
        }
        if matches!(rewritten, Instr::Label { .. }) {
            available.clear();
        }
        if let Instr::Copy { dst, src } = &rewritten {
            if is_temp(dst) {
                available.insert(dst.clone(), src.clone());
            }
        }

        out.push(rewritten);
    }
    (out, changed)
}

/// The instruction index(es) control can transfer to immediately after
/// executing `instrs[i]`: `GOTO` only its target, `IF_FALSE`/`IF_TRUE`
/// both the fall-through and the target, `RET` nothing, everything else
/// only the next instruction.
fn successors(instrs: &[Instr], label_index: &HashMap<&str, usize>, i: usize) -> Vec<usize> {
    match &instrs[i] {
        Instr::Goto { label } => label_index.get(label.as_str()).copied().into_iter().collect(),
        Instr::IfFalse { label, .. } | Instr::IfTrue { label, .. } => {
            let mut succ = Vec::new();
            if i + 1 < instrs.len() {
                succ.push(i + 1);
            }
            if let Some(&target) = label_index.get(label.as_str()) {
                succ.push(target);
            }
            succ
        }
        Instr::Ret { .. } => Vec::new(),
        _ if i + 1 < instrs.len() => vec![i + 1],
        _ => Vec::new(),
    }
}

/// Removes assignments (`Copy`/`Unary`/`Binary`) whose defined name is
/// never read along any control-flow path reachable from this point,
/// and whose instruction has no side effect. `Alloc`/`Call`/`Print`/
/// `Input`/`Ret` are always kept.
///
/// Liveness is a backward dataflow fixpoint over the listing's control-
/// flow graph (fall-through, `GOTO`, and both arms of `IF_FALSE`/
/// `IF_TRUE`), not a single linear backward scan: a loop body is only
/// reached via the back-edge its trailing `GOTO` forms, so a one-pass
/// scan processes the loop-counter update before that back-edge has had
/// a chance to mark the counter live from the next iteration's test and
/// body, and would delete it. The fixpoint is monotone (each round only
/// adds names to a `live_in`/`live_out` set, over the finite domain of
/// names in the listing) so it is guaranteed to converge.
pub fn dead_code_elimination(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let n = instrs.len();
    if n == 0 {
        return (Vec::new(), false);
    }

    let label_index: HashMap<&str, usize> = instrs
        .iter()
        .enumerate()
        .filter_map(|(i, instr)| match instr {
            Instr::Label { name } => Some((name.as_str(), i)),
            _ => None,
        })
        .collect();

    let mut live_in: Vec<HashSet<String>> = vec![HashSet::new(); n];
    let mut live_out: Vec<HashSet<String>> = vec![HashSet::new(); n];

    loop {
        let mut converged = true;
        for i in (0..n).rev() {
            let mut out = HashSet::new();
            for s in successors(instrs, &label_index, i) {
                out.extend(live_in[s].iter().cloned());
            }

            let mut new_in = out.clone();
            if let Some(name) = instrs[i].defines() {
                new_in.remove(name);
            }
            for used in instrs[i].uses() {
                if let Some(name) = used.name() {
                    new_in.insert(name.to_string());
                }
            }

            if out != live_out[i] {
                live_out[i] = out;
                converged = false;
            }
            if new_in != live_in[i] {
                live_in[i] = new_in;
                converged = false;
            }
        }
        if converged {
            break;
        }
    }

    let mut any_dropped = false;
    let mut kept: Vec<Instr> = Vec::with_capacity(n);
    for (i, instr) in instrs.iter().enumerate() {
        let should_keep = match instr.defines() {
            Some(name) if !instr.has_side_effect() => live_out[i].contains(name),
            _ => true,
        };
        if should_keep {
            kept.push(instr.clone());
        } else {
            any_dropped = true;
        }
    }

    (kept, any_dropped)
}

/// Drops instructions between an unconditional `GOTO`/`RET` and the
/// next `LABEL` - they can never execute.
pub fn remove_unreachable_code(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let mut out = Vec::with_capacity(instrs.len());
    let mut dead = false;
    let mut changed = false;
    for instr in instrs {
        if dead {
            if matches!(instr, Instr::Label { .. }) {
                dead = false;
            } else {
                changed = true;
                continue;
            }
        }
        let terminates = matches!(instr, Instr::Goto { .. } | Instr::Ret { .. });
        out.push(instr.clone());
        if terminates {
            dead = true;
        }
    }
    (out, changed)
}

/// Drops `LABEL` instructions with no `GOTO`/`IF_FALSE`/`IF_TRUE`
/// anywhere in the listing referring to them.
pub fn remove_unreferenced_labels(instrs: &[Instr]) -> (Vec<Instr>, bool) {
    let referenced: HashSet<&str> = instrs
        .iter()
        .filter_map(|i| match i {
            Instr::Goto { label } | Instr::IfFalse { label, .. } | Instr::IfTrue { label, .. } => {
                Some(label.as_str())
            }
            _ => None,
        })
        .collect();

    let mut changed = false;
    let out: Vec<Instr> = instrs
        .iter()
        .filter(|i| match i {
            Instr::Label { name } => {
                let keep = referenced.contains(name.as_str());
                if !keep {
                    changed = true;
                }
                keep
            }
            _ => true,
        })
        .cloned()
        .collect();
    (out, changed)
}
