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

use clap::Parser;
use std::path::PathBuf;
use vault_model::shape::Shape;

/// Vault: Banker's algorithm safety checker
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "vault")]
#[command(version)]
#[command(
    about = "Reads a system snapshot and decides whether it is in a safe state (Banker's algorithm)"
)]
pub struct Cli {
    /// Snapshot file: the available vector, then the max and allocation matrices
    pub input: PathBuf,

    /// Number of processes in the snapshot
    #[arg(long, default_value_t = Shape::REFERENCE.num_processes())]
    pub processes: usize,

    /// Number of resource types in the snapshot
    #[arg(long, default_value_t = Shape::REFERENCE.num_resources())]
    pub resources: usize,

    /// Accept allocations above the maximum claim and negative entries
    #[arg(long)]
    pub allow_overclaim: bool,

    /// Omit the step-by-step trace of the algorithm
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also trace processes that have to wait, with the blocking resource
    #[arg(short, long)]
    pub verbose: bool,

    /// Print checker statistics after the verdict
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// Returns the snapshot shape selected on the command line.
    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.processes, self.resources)
    }
}

/// Parse CLI arguments from anything iterable (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = parse_args(["vault", "input/system_state1.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("input/system_state1.txt"));
        assert_eq!(cli.shape(), Shape::REFERENCE);
        assert!(!cli.allow_overclaim);
        assert!(!cli.quiet);
        assert!(!cli.verbose);
        assert!(!cli.stats);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse_args([
            "vault",
            "state.txt",
            "--processes",
            "3",
            "--resources",
            "2",
            "--allow-overclaim",
            "--quiet",
            "--stats",
        ])
        .unwrap();

        assert_eq!(cli.shape(), Shape::new(3, 2));
        assert!(cli.allow_overclaim);
        assert!(cli.quiet);
        assert!(cli.stats);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let err = parse_args(["vault"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_positional_is_an_error() {
        assert!(parse_args(["vault", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let err = parse_args(["vault", "a.txt", "-q", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
