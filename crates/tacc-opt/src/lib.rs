//! tacc-opt - the peephole optimizer for the tacc pipeline.
//!
//! Runs a fixed set of local rewrite passes over a TAC listing to a
//! fixpoint (or a capped iteration count, to guarantee termination):
//! constant folding, algebraic simplification, copy propagation, and
//! dead code elimination, followed by unreachable-code and
//! unreferenced-label cleanup. Every pass is pure and preserves
//! observable behavior for well-typed input.

pub mod passes;

use tacc_icg::Instr;

/// The fixpoint loop is capped at this many iterations; the rewrite
/// set is size-monotone (every rule shrinks instruction count, literal
/// count, or operator complexity), so in practice this cap is never
/// reached - it exists purely as a termination guarantee.
pub const MAX_ITERATIONS: usize = 16;

/// Runs every optimizer pass over `instrs` to a fixpoint.
pub fn optimize(instrs: &[Instr]) -> Vec<Instr> {
    let mut current = instrs.to_vec();
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;

        let (next, pass_changed) = passes::constant_fold(&current);
        current = next;
        changed |= pass_changed;

        let (next, pass_changed) = passes::algebraic_simplify(&current);
        current = next;
        changed |= pass_changed;

        let (next, pass_changed) = passes::copy_propagation(&current);
        current = next;
        changed |= pass_changed;

        let (next, pass_changed) = passes::dead_code_elimination(&current);
        current = next;
        changed |= pass_changed;

        let (next, pass_changed) = passes::remove_unreachable_code(&current);
        current = next;
        changed |= pass_changed;

        let (next, pass_changed) = passes::remove_unreferenced_labels(&current);
        current = next;
        changed |= pass_changed;

        if !changed {
            break;
        }
    }
    current
}

#[cfg(test)]
mod edge_cases;
