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

use std::time::Duration;
use vault_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// Statistics collected during one safety check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafetyStatistics {
    /// Scans over the process list that were started. A safe snapshot of
    /// `N` processes takes exactly `N` scans; an unsafe one ends with a scan
    /// that finds no eligible process.
    pub scans: u64,
    /// Unfinished processes whose need was compared against the work vector.
    pub candidates_examined: u64,
    /// Candidates rejected because some need exceeded the work vector.
    pub candidates_blocked: u64,
    /// Processes that were simulated to completion.
    pub processes_finished: u64,
    /// Total time spent in the check.
    pub time_total: Duration,
}

impl SafetyStatistics {
    #[inline]
    pub fn on_scan(&mut self) {
        self.scans = self.scans.saturating_add_val(1);
    }

    #[inline]
    pub fn on_candidate_examined(&mut self) {
        self.candidates_examined = self.candidates_examined.saturating_add_val(1);
    }

    #[inline]
    pub fn on_candidate_blocked(&mut self) {
        self.candidates_blocked = self.candidates_blocked.saturating_add_val(1);
    }

    #[inline]
    pub fn on_process_finished(&mut self) {
        self.processes_finished = self.processes_finished.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SafetyStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Safety Check Statistics:")?;
        writeln!(f, "  Scans:                {}", self.scans)?;
        writeln!(f, "  Candidates examined:  {}", self.candidates_examined)?;
        writeln!(f, "  Candidates blocked:   {}", self.candidates_blocked)?;
        writeln!(f, "  Processes finished:   {}", self.processes_finished)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SafetyStatistics::default();
        stats.on_scan();
        stats.on_scan();
        stats.on_candidate_examined();
        stats.on_candidate_blocked();
        stats.on_process_finished();

        assert_eq!(stats.scans, 2);
        assert_eq!(stats.candidates_examined, 1);
        assert_eq!(stats.candidates_blocked, 1);
        assert_eq!(stats.processes_finished, 1);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SafetyStatistics {
            scans: u64::MAX,
            ..SafetyStatistics::default()
        };
        stats.on_scan();
        assert_eq!(stats.scans, u64::MAX);
    }

    #[test]
    fn test_display_lists_all_counters() {
        let stats = SafetyStatistics {
            scans: 5,
            candidates_examined: 11,
            candidates_blocked: 6,
            processes_finished: 5,
            time_total: Duration::ZERO,
        };
        let rendered = stats.to_string();
        assert!(rendered.starts_with("Safety Check Statistics:\n"));
        assert!(rendered.contains("  Scans:                5\n"));
        assert!(rendered.contains("  Candidates examined:  11\n"));
        assert!(rendered.contains("  Processes finished:   5\n"));
    }
}
