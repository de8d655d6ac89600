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

//! The safety checker.
//!
//! Simulates the processes of a snapshot running to completion one at a
//! time. Starting from `work = available`, the checker repeatedly scans the
//! processes in ascending index order and selects the first unfinished one
//! whose entire remaining need fits into `work`. The selected process is
//! assumed to finish and release its allocation, which is added back to
//! `work`, and the scan restarts at index 0.
//!
//! The check stops once every process has finished (safe) or once a full
//! scan finds no eligible process (unsafe). A successful scan always
//! finishes one process, so at most `N` scans succeed and the loop is
//! bounded without any iteration cap.

use crate::{
    monitor::{no_op::NoOperationMonitor, safety_monitor::SafetyMonitor},
    result::{SafetyOutcome, SafetyVerdict},
    stats::SafetyStatistics,
};
use num_traits::{PrimInt, Signed};
use vault_model::{
    index::ProcessIndex, num::SnapshotNumeric, sequence::SafeSequence, snapshot::Snapshot,
};

/// Runs the safety check with a throwaway checker and returns only the verdict.
///
/// # Examples
///
/// ```rust
/// # use vault_model::snapshot::Snapshot;
/// # use vault_safety::checker::check_safety;
/// let snapshot = Snapshot::<i64>::from_rows(
///     &[1, 0],
///     &[[2, 1], [1, 1]],
///     &[[1, 1], [0, 0]],
/// )
/// .unwrap();
///
/// let verdict = check_safety(&snapshot);
/// assert!(verdict.is_unsafe());
/// ```
#[inline]
pub fn check_safety<T>(snapshot: &Snapshot<T>) -> SafetyVerdict
where
    T: SnapshotNumeric,
{
    SafetyChecker::new().check(snapshot).into_verdict()
}

/// The Banker's algorithm safety checker.
///
/// Holds the scratch state of a check (the work vector and the finished
/// flags) so it can be reused across snapshots without reallocating. The
/// scratch state is reset at the start of every check.
#[derive(Clone, Debug)]
pub struct SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    work: Vec<T>,
    finished: Vec<bool>,
}

impl<T> Default for SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new safety checker.
    #[inline]
    pub fn new() -> Self {
        Self {
            work: Vec::new(),
            finished: Vec::new(),
        }
    }

    /// Creates a new safety checker with scratch storage for the given
    /// number of processes and resource types.
    #[inline]
    pub fn preallocated(num_processes: usize, num_resources: usize) -> Self {
        Self {
            work: Vec::with_capacity(num_resources),
            finished: Vec::with_capacity(num_processes),
        }
    }

    /// Checks whether `snapshot` is in a safe state.
    #[inline]
    pub fn check(&mut self, snapshot: &Snapshot<T>) -> SafetyOutcome<T>
    where
        T: SnapshotNumeric,
    {
        self.check_with_monitor(snapshot, NoOperationMonitor::new())
    }

    /// Checks whether `snapshot` is in a safe state, reporting every step
    /// to `monitor`.
    pub fn check_with_monitor<S>(&mut self, snapshot: &Snapshot<T>, mut monitor: S) -> SafetyOutcome<T>
    where
        S: SafetyMonitor<T>,
        T: SnapshotNumeric,
    {
        let start_time = std::time::Instant::now();
        let num_processes = snapshot.num_processes();

        self.reset(snapshot);

        let mut statistics = SafetyStatistics::default();
        let mut order = Vec::with_capacity(num_processes);

        monitor.on_enter_check(snapshot, &self.work);

        while order.len() < num_processes {
            statistics.on_scan();
            monitor.on_scan_start(&self.work, &statistics);

            let Some(process) = self.find_eligible(snapshot, &mut monitor, &mut statistics) else {
                break;
            };

            self.finish_process(snapshot, process);
            order.push(process);

            statistics.on_process_finished();
            monitor.on_process_finished(process, &self.work, &statistics);
        }

        statistics.set_total_time(start_time.elapsed());

        let outcome = if order.len() == num_processes {
            SafetyOutcome::safe(SafeSequence::new(order), self.work.clone(), statistics)
        } else {
            SafetyOutcome::unsafe_state(self.work.clone(), statistics)
        };

        monitor.on_exit_check(outcome.verdict(), outcome.statistics());
        outcome
    }

    #[inline]
    fn reset(&mut self, snapshot: &Snapshot<T>)
    where
        T: SnapshotNumeric,
    {
        self.work.clear();
        self.work.extend_from_slice(snapshot.available());

        self.finished.clear();
        self.finished.resize(snapshot.num_processes(), false);
    }

    /// Returns the lowest-index unfinished process whose need fits into the
    /// current work vector.
    fn find_eligible<S>(
        &self,
        snapshot: &Snapshot<T>,
        monitor: &mut S,
        statistics: &mut SafetyStatistics,
    ) -> Option<ProcessIndex>
    where
        S: SafetyMonitor<T>,
        T: SnapshotNumeric,
    {
        for process in snapshot.shape().processes() {
            if self.finished[process.get()] {
                continue;
            }
            statistics.on_candidate_examined();

            let blocking = snapshot
                .need_row(process)
                .iter()
                .zip(&self.work)
                .position(|(need, work)| need > work);

            match blocking {
                None => return Some(process),
                Some(r) => {
                    statistics.on_candidate_blocked();
                    let resource = r.into();
                    monitor.on_process_blocked(
                        process,
                        resource,
                        snapshot.need(process, resource),
                        self.work[r],
                        statistics,
                    );
                }
            }
        }
        None
    }

    #[inline]
    fn finish_process(&mut self, snapshot: &Snapshot<T>, process: ProcessIndex)
    where
        T: SnapshotNumeric,
    {
        debug_assert!(
            !self.finished[process.get()],
            "called `SafetyChecker::finish_process` with already finished process {}",
            process
        );

        self.finished[process.get()] = true;
        for (work, &held) in self.work.iter_mut().zip(snapshot.allocation_row(process)) {
            *work = work.saturating_add_val(held);
        }
    }
}
