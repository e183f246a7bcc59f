//! tacc-drv - pipeline controller and minimal CLI driver for tacc.
//!
//! This crate threads a source string through the six translation
//! phases in order - lex, parse, analyze, lower to TAC, optimize,
//! generate assembly - stopping early whenever `Diagnostics` reports a
//! pipeline-gating error at a phase boundary. The [`compile`] function
//! is the single entry point every other crate in this workspace funnels
//! through; the `tacc` binary is a thin wrapper around it that reads one
//! file, prints the resulting artifacts, and maps outcomes onto the
//! three exit codes in the driver contract.
//!
//! Everything beyond that - multi-file compilation, `--emit-*` phase
//! selection, an interactive REPL, on-disk artifact persistence - is an
//! external driver's responsibility and out of scope here.

use tacc_gen::Assembly;
use tacc_icg::Instr;
use tacc_lex::Token;
use tacc_par::Program;
use tacc_sem::SymbolTable;
use tacc_util::{Diagnostic, Diagnostics, Kind};

/// Every artifact produced while compiling one source string, plus the
/// diagnostics accumulated along the way and whether the input was
/// accepted.
///
/// Phases after the first `LEXICAL`/`SYNTAX`/`SEMANTIC` error are
/// skipped entirely, so the later fields (`tac`, `optimized_tac`,
/// `assembly`) are `None` whenever `success` is `false` and the
/// failure happened before that phase ran.
#[derive(Debug)]
pub struct CompileOutcome {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub symbol_table: Option<SymbolTable>,
    pub tac: Option<Vec<Instr>>,
    pub optimized_tac: Option<Vec<Instr>>,
    pub assembly: Option<Assembly>,
    pub diagnostics: Diagnostics,
    pub success: bool,
}

/// Runs the full pipeline over `source`, stopping at the first phase
/// boundary where `Diagnostics::has_errors` is true.
///
/// When `verbose` is set, one line per phase transition is written to
/// stderr - debugging output, not part of the artifact contract.
pub fn compile(source: &str, verbose: bool) -> CompileOutcome {
    let mut diagnostics = Diagnostics::new();

    if verbose {
        eprintln!("tacc: lexing ({} bytes)", source.len());
    }
    let (tokens, lex_diags) = tacc_lex::lex(source);
    diagnostics.extend(lex_diags);
    if diagnostics.has_errors() {
        let success = !diagnostics.has_errors();
        return CompileOutcome {
            tokens,
            ast: Program::new(),
            symbol_table: None,
            tac: None,
            optimized_tac: None,
            assembly: None,
            diagnostics,
            success,
        };
    }

    if verbose {
        eprintln!("tacc: parsing ({} tokens)", tokens.len());
    }
    let (mut ast, parse_diags) = tacc_par::parse(tokens.clone());
    diagnostics.extend(parse_diags);
    if diagnostics.has_errors() {
        return CompileOutcome {
            tokens,
            ast,
            symbol_table: None,
            tac: None,
            optimized_tac: None,
            assembly: None,
            diagnostics,
            success: false,
        };
    }

    if verbose {
        eprintln!("tacc: semantic analysis ({} top-level statements)", ast.len());
    }
    let (symbol_table, sem_diags) = tacc_sem::analyze(&mut ast);
    diagnostics.extend(sem_diags);
    if diagnostics.has_errors() {
        return CompileOutcome {
            tokens,
            ast,
            symbol_table: Some(symbol_table),
            tac: None,
            optimized_tac: None,
            assembly: None,
            diagnostics,
            success: false,
        };
    }

    if verbose {
        eprintln!("tacc: lowering to three-address code");
    }
    let (tac, icg_diags) = tacc_icg::lower(&ast);
    diagnostics.extend(icg_diags);
    // ICG only ever records `INTERNAL` diagnostics (a compiler bug, not
    // a gating error), so this check cannot actually fire for a program
    // that reached this point - it exists so the contract ("later
    // phases are skipped after any gating error") holds unconditionally
    // rather than by the accident of no phase before codegen emitting one.
    if diagnostics.has_errors() {
        return CompileOutcome {
            tokens,
            ast,
            symbol_table: Some(symbol_table),
            tac: Some(tac),
            optimized_tac: None,
            assembly: None,
            diagnostics,
            success: false,
        };
    }

    if verbose {
        eprintln!("tacc: optimizing ({} instructions)", tac.len());
    }
    let optimized_tac = tacc_opt::optimize(&tac);

    if verbose {
        eprintln!("tacc: generating assembly ({} instructions)", optimized_tac.len());
    }
    let assembly = match tacc_gen::generate(&optimized_tac) {
        Ok(assembly) => Some(assembly),
        Err(err) => {
            diagnostics.push(Diagnostic::error(
                Kind::Internal,
                tacc_util::Line::UNKNOWN,
                format!("code generation failed: {err}"),
            ));
            None
        }
    };

    let success = !diagnostics.has_errors() && assembly.is_some();
    CompileOutcome {
        tokens,
        ast,
        symbol_table: Some(symbol_table),
        tac: Some(tac),
        optimized_tac: Some(optimized_tac),
        assembly,
        diagnostics,
        success,
    }
}

pub mod cli;
pub use cli::run;
