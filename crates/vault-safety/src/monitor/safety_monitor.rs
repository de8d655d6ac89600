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

use crate::{result::SafetyVerdict, stats::SafetyStatistics};
use vault_model::{
    index::{ProcessIndex, ResourceIndex},
    snapshot::Snapshot,
};

/// Trait for observing the steps of the safety check.
pub trait SafetyMonitor<T> {
    /// Called once before the first scan, with the initial work vector
    /// (a copy of the available vector).
    fn on_enter_check(&mut self, snapshot: &Snapshot<T>, work: &[T]);

    /// Called when a scan over the process list starts.
    fn on_scan_start(&mut self, _work: &[T], _statistics: &SafetyStatistics) {}

    /// Called when an unfinished process cannot run yet because its need for
    /// `resource` exceeds the work vector. Only the first such resource is reported.
    fn on_process_blocked(
        &mut self,
        _process: ProcessIndex,
        _resource: ResourceIndex,
        _need: T,
        _work: T,
        _statistics: &SafetyStatistics,
    ) {
    }

    /// Called after `process` was selected, marked finished and its
    /// allocation returned to `work`.
    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        work: &[T],
        statistics: &SafetyStatistics,
    );

    /// Called when the check is finished, with the verdict it reached.
    fn on_exit_check(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics);

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl<T, M> SafetyMonitor<T> for &mut M
where
    M: SafetyMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn on_enter_check(&mut self, snapshot: &Snapshot<T>, work: &[T]) {
        (**self).on_enter_check(snapshot, work)
    }

    #[inline(always)]
    fn on_scan_start(&mut self, work: &[T], statistics: &SafetyStatistics) {
        (**self).on_scan_start(work, statistics)
    }

    #[inline(always)]
    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        need: T,
        work: T,
        statistics: &SafetyStatistics,
    ) {
        (**self).on_process_blocked(process, resource, need, work, statistics)
    }

    #[inline(always)]
    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        work: &[T],
        statistics: &SafetyStatistics,
    ) {
        (**self).on_process_finished(process, work, statistics)
    }

    #[inline(always)]
    fn on_exit_check(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics) {
        (**self).on_exit_check(verdict, statistics)
    }

    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T> std::fmt::Debug for dyn SafetyMonitor<T> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SafetyMonitor<T> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}
