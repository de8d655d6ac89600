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

use crate::stats::SafetyStatistics;
use vault_model::sequence::SafeSequence;

/// The verdict of a safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// Every process can finish; the sequence is the order in which the
    /// checker let them finish.
    Safe(SafeSequence),
    /// Some process can never obtain its remaining need. No partial
    /// sequence is meaningful in this case.
    Unsafe,
}

impl SafetyVerdict {
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe(_))
    }

    #[inline]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, SafetyVerdict::Unsafe)
    }

    /// Returns the safe sequence, if the snapshot is safe.
    #[inline]
    pub fn sequence(&self) -> Option<&SafeSequence> {
        match self {
            SafetyVerdict::Safe(sequence) => Some(sequence),
            SafetyVerdict::Unsafe => None,
        }
    }
}

impl std::fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyVerdict::Safe(sequence) => write!(f, "Safe({})", sequence),
            SafetyVerdict::Unsafe => write!(f, "Unsafe"),
        }
    }
}

/// Result of the checker after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyOutcome<T> {
    verdict: SafetyVerdict,
    work: Vec<T>,
    statistics: SafetyStatistics,
}

impl<T> SafetyOutcome<T> {
    #[inline]
    pub fn safe(sequence: SafeSequence, work: Vec<T>, statistics: SafetyStatistics) -> Self {
        Self {
            verdict: SafetyVerdict::Safe(sequence),
            work,
            statistics,
        }
    }

    #[inline]
    pub fn unsafe_state(work: Vec<T>, statistics: SafetyStatistics) -> Self {
        Self {
            verdict: SafetyVerdict::Unsafe,
            work,
            statistics,
        }
    }

    /// Returns the verdict.
    #[inline]
    pub fn verdict(&self) -> &SafetyVerdict {
        &self.verdict
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        self.verdict.is_safe()
    }

    /// Returns the safe sequence, if the snapshot is safe.
    #[inline]
    pub fn sequence(&self) -> Option<&SafeSequence> {
        self.verdict.sequence()
    }

    /// Returns the work vector at the moment the check stopped. For a safe
    /// snapshot this is the available vector plus every allocation.
    #[inline]
    pub fn final_work(&self) -> &[T] {
        &self.work
    }

    /// Returns the checker statistics.
    #[inline]
    pub fn statistics(&self) -> &SafetyStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the verdict.
    #[inline]
    pub fn into_verdict(self) -> SafetyVerdict {
        self.verdict
    }
}

impl<T> std::fmt::Display for SafetyOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SafetyOutcome({}, processes finished: {}, scans: {})",
            self.verdict, self.statistics.processes_finished, self.statistics.scans
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_model::index::ProcessIndex;

    fn seq(order: &[usize]) -> SafeSequence {
        order.iter().copied().map(ProcessIndex::new).collect()
    }

    #[test]
    fn test_safe_outcome_accessors() {
        let outcome = SafetyOutcome::safe(seq(&[1, 0]), vec![4i64, 2], SafetyStatistics::default());
        assert!(outcome.is_safe());
        assert_eq!(outcome.sequence(), Some(&seq(&[1, 0])));
        assert_eq!(outcome.final_work(), &[4, 2]);
        assert_eq!(outcome.into_verdict(), SafetyVerdict::Safe(seq(&[1, 0])));
    }

    #[test]
    fn test_unsafe_outcome_has_no_sequence() {
        let outcome = SafetyOutcome::unsafe_state(vec![0i64], SafetyStatistics::default());
        assert!(!outcome.is_safe());
        assert!(outcome.verdict().is_unsafe());
        assert_eq!(outcome.sequence(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SafetyVerdict::Unsafe.to_string(), "Unsafe");
        assert_eq!(
            SafetyVerdict::Safe(seq(&[2, 0, 1])).to_string(),
            "Safe(P2 → P0 → P1)"
        );

        let stats = SafetyStatistics {
            scans: 3,
            processes_finished: 3,
            ..SafetyStatistics::default()
        };
        let outcome = SafetyOutcome::safe(seq(&[2, 0, 1]), vec![1i64], stats);
        assert_eq!(
            outcome.to_string(),
            "SafetyOutcome(Safe(P2 → P0 → P1), processes finished: 3, scans: 3)"
        );
    }
}
