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

//! Plain-text report sections.
//!
//! Each section is a `Display` type so the report can be written to any
//! sink. The trace of the algorithm itself is produced by
//! `vault_safety::monitor::log::LogMonitor` between `SystemState` and
//! `Verdict`.

use std::path::Path;
use vault_model::{
    display::{MatrixTable, ResourceVector},
    snapshot::Snapshot,
};
use vault_safety::result::SafetyVerdict;

const BANNER: &str = "******************************";

/// The input summary: file name, available vector and the three matrices.
pub struct SystemState<'a, T> {
    input: &'a Path,
    snapshot: &'a Snapshot<T>,
}

impl<'a, T> SystemState<'a, T> {
    #[inline]
    pub fn new(input: &'a Path, snapshot: &'a Snapshot<T>) -> Self {
        Self { input, snapshot }
    }
}

impl<T> std::fmt::Display for SystemState<'_, T>
where
    T: vault_model::num::SnapshotNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.snapshot.num_resources();

        writeln!(f, "\n=== Banker's Algorithm Implementation ===")?;
        writeln!(f, "Input File: {}\n", self.input.display())?;
        writeln!(f, "System State:")?;
        writeln!(
            f,
            "Available resources: {}",
            ResourceVector(self.snapshot.available())
        )?;
        writeln!(f, "\nMaximum Resource Matrix:")?;
        write!(f, "{}", MatrixTable::new(self.snapshot.claims(), r))?;
        writeln!(f, "\nAllocation Matrix:")?;
        write!(f, "{}", MatrixTable::new(self.snapshot.allocations(), r))?;
        writeln!(f, "\nNeed Matrix:")?;
        write!(f, "{}", MatrixTable::new(self.snapshot.needs(), r))
    }
}

/// The final verdict block.
pub struct Verdict<'a>(pub &'a SafetyVerdict);

impl std::fmt::Display for Verdict<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            SafetyVerdict::Safe(sequence) => {
                writeln!(f, "\n{}", BANNER)?;
                writeln!(f, "\nThe system is in a SAFE state.")?;
                writeln!(f, "\nSafe sequence: {}", sequence)?;
                writeln!(f, "\n{}\n", BANNER)
            }
            SafetyVerdict::Unsafe => {
                writeln!(f, "\nThe system is in an UNSAFE state (deadlock possible).")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_model::{index::ProcessIndex, sequence::SafeSequence};

    #[test]
    fn test_system_state_layout() {
        let snapshot =
            Snapshot::<i64>::from_rows(&[1, 0], &[[2, 1], [1, 1]], &[[1, 1], [0, 0]]).unwrap();
        let rendered = SystemState::new(Path::new("state.txt"), &snapshot).to_string();

        let expected = "\n=== Banker's Algorithm Implementation ===\n\
                        Input File: state.txt\n\
                        \n\
                        System State:\n\
                        Available resources: [1, 0]\n\
                        \n\
                        Maximum Resource Matrix:\n     A  B\n\
                        P0:  2  1\n\
                        P1:  1  1\n\
                        \n\
                        Allocation Matrix:\n     A  B\n\
                        P0:  1  1\n\
                        P1:  0  0\n\
                        \n\
                        Need Matrix:\n     A  B\n\
                        P0:  1  0\n\
                        P1:  1  1\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_safe_verdict() {
        let sequence: SafeSequence = [1, 0].into_iter().map(ProcessIndex::new).collect();
        let rendered = Verdict(&SafetyVerdict::Safe(sequence)).to_string();

        assert!(rendered.contains("\nThe system is in a SAFE state.\n"));
        assert!(rendered.contains("\nSafe sequence: P1 → P0\n"));
        assert_eq!(rendered.matches(BANNER).count(), 2);
    }

    #[test]
    fn test_unsafe_verdict() {
        assert_eq!(
            Verdict(&SafetyVerdict::Unsafe).to_string(),
            "\nThe system is in an UNSAFE state (deadlock possible).\n"
        );
    }
}
