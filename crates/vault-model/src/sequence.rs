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

use crate::index::ProcessIndex;

/// A completion order proving that a snapshot is in a safe state.
///
/// Process `order[k]` is the `k`-th process to acquire its remaining need,
/// run to completion and release everything it holds. A sequence returned
/// by the safety checker contains every process exactly once; it is a valid
/// order, not necessarily the only one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SafeSequence {
    order: Vec<ProcessIndex>,
}

impl SafeSequence {
    /// Constructs a new `SafeSequence` from a completion order.
    #[inline]
    pub fn new(order: Vec<ProcessIndex>) -> Self {
        Self { order }
    }

    /// Returns the number of processes in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the completion order.
    #[inline]
    pub fn as_slice(&self) -> &[ProcessIndex] {
        &self.order
    }

    /// Returns an iterator over the processes in completion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessIndex> {
        self.order.iter()
    }

    /// Returns `true` if the sequence contains each of the processes
    /// `0..num_processes` exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vault_model::{index::ProcessIndex, sequence::SafeSequence};
    /// let seq: SafeSequence = [1, 0, 2].into_iter().map(ProcessIndex::new).collect();
    /// assert!(seq.is_permutation_of(3));
    /// assert!(!seq.is_permutation_of(4));
    /// ```
    pub fn is_permutation_of(&self, num_processes: usize) -> bool {
        if self.order.len() != num_processes {
            return false;
        }

        let mut seen = vec![false; num_processes];
        for process in &self.order {
            match seen.get_mut(process.get()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl From<Vec<ProcessIndex>> for SafeSequence {
    fn from(order: Vec<ProcessIndex>) -> Self {
        Self::new(order)
    }
}

impl FromIterator<ProcessIndex> for SafeSequence {
    fn from_iter<I: IntoIterator<Item = ProcessIndex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SafeSequence {
    type Item = &'a ProcessIndex;
    type IntoIter = std::slice::Iter<'a, ProcessIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Formats the sequence as an arrow-joined list of process labels,
/// e.g. `P1 → P3 → P4 → P0 → P2`.
impl std::fmt::Display for SafeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (step, process) in self.order.iter().enumerate() {
            if step > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{}", process)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(order: &[usize]) -> SafeSequence {
        order.iter().copied().map(ProcessIndex::new).collect()
    }

    #[test]
    fn test_basic_accessors() {
        let s = seq(&[1, 3, 4, 0, 2]);
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
        assert_eq!(s.as_slice()[0], ProcessIndex::new(1));
        assert_eq!(s.iter().count(), 5);
        assert_eq!((&s).into_iter().next(), Some(&ProcessIndex::new(1)));
    }

    #[test]
    fn test_display_joins_with_arrows() {
        assert_eq!(seq(&[1, 3, 4, 0, 2]).to_string(), "P1 → P3 → P4 → P0 → P2");
        assert_eq!(seq(&[0]).to_string(), "P0");
        assert_eq!(SafeSequence::default().to_string(), "");
    }

    #[test]
    fn test_is_permutation_of() {
        assert!(seq(&[2, 0, 1]).is_permutation_of(3));
        assert!(SafeSequence::default().is_permutation_of(0));
        assert!(!seq(&[0, 0, 1]).is_permutation_of(3));
        assert!(!seq(&[0, 1, 3]).is_permutation_of(3));
        assert!(!seq(&[0, 1]).is_permutation_of(3));
    }

    #[test]
    fn test_from_vec_keeps_order() {
        let order = vec![ProcessIndex::new(2), ProcessIndex::new(0)];
        let s = SafeSequence::from(order.clone());
        assert_eq!(s.as_slice(), order.as_slice());
    }
}
