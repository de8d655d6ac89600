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

//! Independent verification of a safe sequence.
//!
//! `verify_safe_sequence` replays a proposed completion order against a
//! snapshot without searching. It accepts any valid order, not just the one
//! the checker picks, which makes it useful for checking sequences that come
//! from elsewhere and for testing the checker itself.

use vault_model::{
    index::{ProcessIndex, ResourceIndex},
    num::SnapshotNumeric,
    sequence::SafeSequence,
    shape::resource_label,
    snapshot::Snapshot,
};

/// The first reason a sequence fails to prove that a snapshot is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceViolation {
    /// The sequence does not contain one entry per process.
    WrongLength { expected: usize, actual: usize },
    /// The sequence names a process outside the snapshot.
    UnknownProcess { step: usize, process: ProcessIndex },
    /// The sequence names a process a second time.
    Duplicate { step: usize, process: ProcessIndex },
    /// At `step`, the need of `process` for `resource` exceeds the work vector.
    NeedExceedsWork {
        step: usize,
        process: ProcessIndex,
        resource: ResourceIndex,
        need: String,
        work: String,
    },
}

impl std::fmt::Display for SequenceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => write!(
                f,
                "Sequence has {} entries, expected one per process ({})",
                actual, expected
            ),
            Self::UnknownProcess { step, process } => {
                write!(f, "Step {} names unknown process {}", step, process)
            }
            Self::Duplicate { step, process } => {
                write!(f, "Step {} names {} a second time", step, process)
            }
            Self::NeedExceedsWork {
                step,
                process,
                resource,
                need,
                work,
            } => write!(
                f,
                "Step {}: {} needs {} of {} but only {} are available",
                step,
                process,
                need,
                resource_label(*resource),
                work
            ),
        }
    }
}

impl std::error::Error for SequenceViolation {}

/// Replays `sequence` against `snapshot` and returns the final work vector.
///
/// Each process in turn must have `need <= work` for every resource; its
/// allocation is then released into `work`. For a valid sequence the
/// returned vector equals [`Snapshot::total_resources`].
///
/// # Examples
///
/// ```rust
/// # use vault_model::{index::ProcessIndex, sequence::SafeSequence, snapshot::Snapshot};
/// # use vault_safety::verify::verify_safe_sequence;
/// let snapshot = Snapshot::<i64>::from_rows(&[1], &[[2], [1]], &[[1], [0]]).unwrap();
///
/// let sequence: SafeSequence = [1, 0].into_iter().map(ProcessIndex::new).collect();
/// assert_eq!(verify_safe_sequence(&snapshot, &sequence).unwrap(), vec![2]);
/// ```
pub fn verify_safe_sequence<T>(
    snapshot: &Snapshot<T>,
    sequence: &SafeSequence,
) -> Result<Vec<T>, SequenceViolation>
where
    T: SnapshotNumeric,
{
    let num_processes = snapshot.num_processes();
    if sequence.len() != num_processes {
        return Err(SequenceViolation::WrongLength {
            expected: num_processes,
            actual: sequence.len(),
        });
    }

    let mut work = snapshot.available().to_vec();
    let mut finished = vec![false; num_processes];

    for (step, &process) in sequence.iter().enumerate() {
        if process.get() >= num_processes {
            return Err(SequenceViolation::UnknownProcess { step, process });
        }
        if finished[process.get()] {
            return Err(SequenceViolation::Duplicate { step, process });
        }

        let need = snapshot.need_row(process);
        if let Some(r) = need.iter().zip(&work).position(|(n, w)| n > w) {
            return Err(SequenceViolation::NeedExceedsWork {
                step,
                process,
                resource: ResourceIndex::new(r),
                need: need[r].to_string(),
                work: work[r].to_string(),
            });
        }

        finished[process.get()] = true;
        for (w, &held) in work.iter_mut().zip(snapshot.allocation_row(process)) {
            *w = w.saturating_add_val(held);
        }
    }

    Ok(work)
}
