// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Vault-CLI: the `vault` command
//!
//! Loads a snapshot file, prints the system state, runs the safety check
//! with a trace and prints the verdict. `execute` is the whole program
//! with its output sinks passed in; `main` only wires it to the process.
//!
//! Exit codes
//! - `0`: a report was printed, whether the snapshot is safe or not.
//! - `1`: bad arguments, unreadable or malformed input, or a snapshot that
//!   fails validation.

pub mod args;
pub mod error;
pub mod report;

use crate::{
    args::{Cli, parse_args},
    error::CliError,
    report::{SystemState, Verdict},
};
use clap::error::ErrorKind;
use std::io::Write;
use vault_model::loading::SnapshotLoader;
use vault_safety::{
    checker::SafetyChecker,
    monitor::{log::LogMonitor, no_op::NoOperationMonitor},
};

/// Writes the usage text printed for missing or unexpected arguments.
pub fn write_usage<W: Write>(out: &mut W, program: &str) -> std::io::Result<()> {
    writeln!(out, "Usage: {} <input_file> [OPTIONS]", program)?;
    writeln!(out, "\nExamples:")?;
    writeln!(out, "  {} input/system_state1.txt", program)?;
    writeln!(out, "  {} input/system_state2.txt", program)?;
    writeln!(out, "\nAvailable input files:")?;
    writeln!(out, "  input/system_state1.txt - Textbook system state (safe)")?;
    writeln!(out, "  input/system_state2.txt - Alternative system state (unsafe)")?;
    writeln!(out, "\nRun '{} --help' for all options.", program)
}

/// Loads, checks and reports on the snapshot selected by `cli`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "Reading input from: {}", cli.input.display())?;

    let snapshot = SnapshotLoader::<i64>::new()
        .with_shape(cli.shape())
        .validate(!cli.allow_overclaim)
        .from_path(&cli.input)
        .map_err(|source| CliError::Load {
            path: cli.input.clone(),
            source,
        })?;

    writeln!(out, "Successfully read input file: {}", cli.input.display())?;
    write!(out, "{}", SystemState::new(&cli.input, &snapshot))?;
    writeln!(out, "\nChecking system safety...")?;

    let mut checker = SafetyChecker::preallocated(snapshot.num_processes(), snapshot.num_resources());
    let outcome = if cli.quiet {
        checker.check_with_monitor(&snapshot, NoOperationMonitor::new())
    } else {
        let mut monitor = LogMonitor::new(&mut *out).show_blocked(cli.verbose);
        let outcome = checker.check_with_monitor(&snapshot, &mut monitor);
        monitor.finish()?;
        outcome
    };

    write!(out, "{}", Verdict(outcome.verdict()))?;

    if cli.stats {
        write!(out, "\n{}", outcome.statistics())?;
    }

    out.flush()?;
    Ok(())
}

/// Runs the program for `args` and returns its exit code.
///
/// Argument problems print the usage text on `out`, with clap's diagnostic
/// on `err`; every other failure is reported on `err`.
pub fn execute<I, T, W, E>(args: I, out: &mut W, err: &mut E) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    W: Write,
    E: Write,
{
    let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vault".to_string());

    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(out, "{}", e.render());
            return 0;
        }
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = writeln!(out, "Error: Please provide an input file name.\n");
            }
            let _ = write_usage(out, &program);
            let _ = write!(err, "{}", e.render());
            return 1;
        }
    };

    match run(&cli, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = out.flush();
            let _ = writeln!(err, "Error: {}", e);
            if let Some(hint) = e.hint() {
                let _ = writeln!(err, "{}", hint);
            }
            1
        }
    }
}
