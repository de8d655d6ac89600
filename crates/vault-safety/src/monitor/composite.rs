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

//! Monitoring combinators for the safety check
//!
//! Provides `CompositeSafetyMonitor`, a fan-out monitor that forwards every
//! event to its children in insertion order. This lets a caller trace the
//! check and collect its own observations at the same time.

use crate::{monitor::safety_monitor::SafetyMonitor, result::SafetyVerdict, stats::SafetyStatistics};
use vault_model::{
    index::{ProcessIndex, ResourceIndex},
    snapshot::Snapshot,
};

/// A safety monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeSafetyMonitor<'a, T> {
    monitors: Vec<Box<dyn SafetyMonitor<T> + 'a>>,
}

impl<T> Default for CompositeSafetyMonitor<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeSafetyMonitor<'a, T> {
    /// Creates a new empty `CompositeSafetyMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeSafetyMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SafetyMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SafetyMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no child monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<T> SafetyMonitor<T> for CompositeSafetyMonitor<'_, T>
where
    T: Copy,
{
    fn on_enter_check(&mut self, snapshot: &Snapshot<T>, work: &[T]) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_check(snapshot, work);
        }
    }

    fn on_scan_start(&mut self, work: &[T], statistics: &SafetyStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_scan_start(work, statistics);
        }
    }

    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        need: T,
        work: T,
        statistics: &SafetyStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_process_blocked(process, resource, need, work, statistics);
        }
    }

    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        work: &[T],
        statistics: &SafetyStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_process_finished(process, work, statistics);
        }
    }

    fn on_exit_check(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_check(verdict, statistics);
        }
    }

    fn name(&self) -> &str {
        "CompositeSafetyMonitor"
    }
}

impl<T> std::fmt::Debug for CompositeSafetyMonitor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeSafetyMonitor")
            .field("monitors", &self.monitors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_model::sequence::SafeSequence;

    #[derive(Default)]
    struct Counting {
        entered: usize,
        finished: Vec<ProcessIndex>,
        exited: usize,
    }

    impl SafetyMonitor<i64> for Counting {
        fn on_enter_check(&mut self, _snapshot: &Snapshot<i64>, _work: &[i64]) {
            self.entered += 1;
        }

        fn on_process_finished(
            &mut self,
            process: ProcessIndex,
            _work: &[i64],
            _statistics: &SafetyStatistics,
        ) {
            self.finished.push(process);
        }

        fn on_exit_check(&mut self, _verdict: &SafetyVerdict, _statistics: &SafetyStatistics) {
            self.exited += 1;
        }

        fn name(&self) -> &str {
            "Counting"
        }
    }

    #[test]
    fn test_forwards_to_all_children_in_order() {
        let snapshot = Snapshot::<i64>::from_rows(&[1], &[[1]], &[[0]]).unwrap();
        let stats = SafetyStatistics::default();
        let mut first = Counting::default();
        let mut second = Counting::default();

        {
            let mut composite = CompositeSafetyMonitor::with_capacity(2);
            composite.add_monitor(&mut first);
            composite.add_monitor_boxed(Box::new(&mut second));
            assert_eq!(composite.len(), 2);
            assert!(!composite.is_empty());

            composite.on_enter_check(&snapshot, &[1]);
            composite.on_process_finished(ProcessIndex::new(0), &[1], &stats);
            composite.on_exit_check(
                &SafetyVerdict::Safe(SafeSequence::new(vec![ProcessIndex::new(0)])),
                &stats,
            );
        }

        for counting in [&first, &second] {
            assert_eq!(counting.entered, 1);
            assert_eq!(counting.finished, vec![ProcessIndex::new(0)]);
            assert_eq!(counting.exited, 1);
        }
    }

    #[test]
    fn test_debug_lists_child_names() {
        let mut composite = CompositeSafetyMonitor::<i64>::new();
        composite.add_monitor(Counting::default());
        assert_eq!(
            format!("{:?}", composite),
            "CompositeSafetyMonitor { monitors: [SafetyMonitor(Counting)] }"
        );
    }
}
