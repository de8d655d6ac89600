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

use crate::{monitor::safety_monitor::SafetyMonitor, result::SafetyVerdict, stats::SafetyStatistics};
use std::io::{self, Write};
use vault_model::{
    display::ResourceVector,
    index::{ProcessIndex, ResourceIndex},
    num::SnapshotNumeric,
    shape::resource_label,
    snapshot::Snapshot,
};

/// Writes a human-readable trace of the safety check:
///
/// ```raw
/// Safety Algorithm Execution:
/// Initial Work: [3, 3, 2]
/// P1 can be executed (Need <= Work)
/// Updated Work: [5, 3, 2]
/// ```
///
/// Callbacks cannot fail, so the first write error is kept and returned by
/// [`LogMonitor::finish`]; nothing more is written after it.
#[derive(Debug)]
pub struct LogMonitor<W> {
    writer: W,
    show_blocked: bool,
    num_processes: usize,
    finished: Vec<ProcessIndex>,
    error: Option<io::Error>,
}

impl<W> LogMonitor<W>
where
    W: Write,
{
    /// Creates a monitor that traces to `writer`.
    #[inline]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_blocked: false,
            num_processes: 0,
            finished: Vec::new(),
            error: None,
        }
    }

    /// Configures whether processes that have to wait are traced as well.
    #[inline]
    pub fn show_blocked(mut self, yes: bool) -> Self {
        self.show_blocked = yes;
        self
    }

    /// Returns a reference to the underlying writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the monitor, returning the writer or the first write error.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.writer),
        }
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_fmt(args) {
            self.error = Some(e);
        }
    }
}

impl<T, W> SafetyMonitor<T> for LogMonitor<W>
where
    T: SnapshotNumeric,
    W: Write,
{
    fn on_enter_check(&mut self, snapshot: &Snapshot<T>, work: &[T]) {
        self.num_processes = snapshot.num_processes();
        self.finished.clear();

        self.emit(format_args!("\nSafety Algorithm Execution:\n"));
        self.emit(format_args!("Initial Work: {}\n", ResourceVector(work)));
    }

    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        need: T,
        work: T,
        _statistics: &SafetyStatistics,
    ) {
        if self.show_blocked {
            let label = resource_label(resource);
            self.emit(format_args!(
                "{} must wait (Need[{}] = {} > Work[{}] = {})\n",
                process, label, need, label, work
            ));
        }
    }

    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        work: &[T],
        _statistics: &SafetyStatistics,
    ) {
        self.finished.push(process);
        self.emit(format_args!("{} can be executed (Need <= Work)\n", process));
        self.emit(format_args!("Updated Work: {}\n", ResourceVector(work)));
    }

    fn on_exit_check(&mut self, verdict: &SafetyVerdict, _statistics: &SafetyStatistics) {
        if verdict.is_safe() {
            return;
        }

        let unfinished: Vec<String> = ProcessIndex::range(self.num_processes)
            .filter(|p| !self.finished.contains(p))
            .map(|p| p.to_string())
            .collect();
        self.emit(format_args!(
            "No remaining process can be executed (unfinished: {})\n",
            unfinished.join(", ")
        ));
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}
