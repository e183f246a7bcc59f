//! The minimal command-line driver: read one source file, compile it,
//! print the resulting artifacts, and translate the outcome into one
//! of the three documented exit codes.
//!
//! ```text
//! tacc <path>              compile a file, print diagnostics and artifacts
//! tacc --verbose <path>    also print one line per phase transition
//! ```
//!
//! This intentionally does not grow into a full driver: no `--emit-*`
//! phase selection, no multi-file compilation, no REPL. Those are an
//! external driver's job (see the crate-level Non-goals).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use crate::{compile, CompileOutcome};

struct Args {
    path: PathBuf,
    verbose: bool,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut path = None;
    let mut verbose = false;
    for arg in raw.skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            other if path.is_none() => path = Some(PathBuf::from(other)),
            other => bail!("unexpected extra argument '{other}'"),
        }
    }
    let path = path.context("usage: tacc [--verbose] <path>")?;
    Ok(Args { path, verbose })
}

/// Runs the CLI driver against the process's own `argv`, returning the
/// exit code to report to the shell: `0` on success, `1` on a
/// compilation error, `2` on an I/O error.
pub fn run() -> ExitCode {
    match run_inner(std::env::args()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run_inner(raw_args: impl Iterator<Item = String>) -> Result<ExitCode> {
    let args = parse_args(raw_args)?;
    let source = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read '{}'", args.path.display()))?;

    let outcome = compile(&source, args.verbose);
    report(&outcome);

    Ok(if outcome.success { ExitCode::from(0) } else { ExitCode::from(1) })
}

/// Prints diagnostics to stderr and, on success, the three textual
/// artifacts (unoptimized TAC, optimized TAC, assembly) to stdout.
fn report(outcome: &CompileOutcome) {
    for diag in outcome.diagnostics.iter() {
        eprintln!("{diag}");
    }

    if !outcome.success {
        return;
    }

    if let Some(tac) = &outcome.tac {
        println!("; --- unoptimized TAC ---");
        println!("{}", tacc_icg::render(tac));
    }
    if let Some(optimized) = &outcome.optimized_tac {
        println!("; --- optimized TAC ---");
        println!("{}", tacc_icg::render(optimized));
    }
    if let Some(assembly) = &outcome.assembly {
        println!("; --- assembly ---");
        println!("{assembly}");
    }
}
