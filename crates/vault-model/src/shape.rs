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

//! Dimensions of a snapshot.
//!
//! Every snapshot carries its `Shape` instead of relying on compile-time
//! array sizes. The safety check itself is dimension-agnostic; the shape
//! only decides how many integers the loader reads and how the flattened
//! matrices are indexed.

use crate::index::{ProcessIndex, ResourceIndex};

/// The `(processes × resources)` dimensions of a snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    num_processes: usize,
    num_resources: usize,
}

impl Shape {
    /// The classic textbook configuration: 5 processes competing for 3 resource types.
    pub const REFERENCE: Shape = Shape::new(5, 3);

    /// Creates a new shape.
    #[inline]
    pub const fn new(num_processes: usize, num_resources: usize) -> Self {
        Self {
            num_processes,
            num_resources,
        }
    }

    /// Returns the number of processes (matrix rows).
    #[inline]
    pub const fn num_processes(&self) -> usize {
        self.num_processes
    }

    /// Returns the number of resource types (vector length, matrix columns).
    #[inline]
    pub const fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Returns `true` if the shape has no processes or no resource types.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.num_processes == 0 || self.num_resources == 0
    }

    /// Returns the number of cells of one `processes × resources` matrix,
    /// or `None` if it does not fit into a `usize`.
    #[inline]
    pub const fn matrix_len(&self) -> Option<usize> {
        self.num_processes.checked_mul(self.num_resources)
    }

    /// Returns how many integers an input file of this shape must contain:
    /// the available vector followed by the claim and allocation matrices.
    /// Returns `None` if the count does not fit into a `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vault_model::shape::Shape;
    /// assert_eq!(Shape::REFERENCE.required_values(), Some(3 + 2 * 5 * 3));
    /// assert_eq!(Shape::new(usize::MAX, 2).required_values(), None);
    /// ```
    #[inline]
    pub const fn required_values(&self) -> Option<usize> {
        let Some(cells) = self.matrix_len() else {
            return None;
        };
        let Some(matrices) = cells.checked_mul(2) else {
            return None;
        };
        matrices.checked_add(self.num_resources)
    }

    /// Returns the position of the `(process, resource)` cell in a flattened
    /// row-major matrix of this shape.
    #[inline(always)]
    pub fn flatten(&self, process: ProcessIndex, resource: ResourceIndex) -> usize {
        debug_assert!(
            process.get() < self.num_processes,
            "called `Shape::flatten` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes,
            process.get()
        );
        debug_assert!(
            resource.get() < self.num_resources,
            "called `Shape::flatten` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources,
            resource.get()
        );

        process.get() * self.num_resources + resource.get()
    }

    /// Iterates all process indices in ascending order.
    #[inline]
    pub fn processes(&self) -> impl DoubleEndedIterator<Item = ProcessIndex> + ExactSizeIterator {
        ProcessIndex::range(self.num_processes)
    }

    /// Iterates all resource indices in ascending order.
    #[inline]
    pub fn resources(&self) -> impl DoubleEndedIterator<Item = ResourceIndex> + ExactSizeIterator {
        ResourceIndex::range(self.num_resources)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processes × {} resources",
            self.num_processes, self.num_resources
        )
    }
}

/// Returns the column label of a resource type in reports.
///
/// The first 26 resource types are labelled `A` to `Z`; beyond that the
/// typed index label (`R26`, `R27`, ...) is used.
///
/// # Examples
///
/// ```rust
/// # use vault_model::{index::ResourceIndex, shape::resource_label};
/// assert_eq!(resource_label(ResourceIndex::new(0)), "A");
/// assert_eq!(resource_label(ResourceIndex::new(2)), "C");
/// assert_eq!(resource_label(ResourceIndex::new(26)), "R26");
/// ```
pub fn resource_label(resource: ResourceIndex) -> String {
    match u8::try_from(resource.get()) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => resource.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let shape = Shape::default();
        assert_eq!(shape, Shape::REFERENCE);
        assert_eq!(shape.num_processes(), 5);
        assert_eq!(shape.num_resources(), 3);
        assert_eq!(shape.matrix_len(), Some(15));
        assert_eq!(shape.required_values(), Some(33));
        assert!(!shape.is_degenerate());
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(Shape::new(0, 3).is_degenerate());
        assert!(Shape::new(4, 0).is_degenerate());
        assert!(Shape::new(0, 0).is_degenerate());
    }

    #[test]
    fn test_sizes_overflowing_usize() {
        let shape = Shape::new(usize::MAX, 2);
        assert_eq!(shape.matrix_len(), None);
        assert_eq!(shape.required_values(), None);

        // One matrix fits, but two of them plus the available vector do not.
        let shape = Shape::new(usize::MAX / 2, 2);
        assert!(shape.matrix_len().is_some());
        assert_eq!(shape.required_values(), None);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let shape = Shape::new(4, 3);
        assert_eq!(shape.flatten(ProcessIndex::new(0), ResourceIndex::new(0)), 0);
        assert_eq!(shape.flatten(ProcessIndex::new(0), ResourceIndex::new(2)), 2);
        assert_eq!(shape.flatten(ProcessIndex::new(1), ResourceIndex::new(0)), 3);
        assert_eq!(shape.flatten(ProcessIndex::new(3), ResourceIndex::new(1)), 10);
    }

    #[test]
    fn test_index_iterators() {
        let shape = Shape::new(2, 3);
        let processes: Vec<String> = shape.processes().map(|p| p.to_string()).collect();
        assert_eq!(processes, vec!["P0", "P1"]);
        assert_eq!(shape.resources().len(), 3);
    }

    #[test]
    fn test_resource_labels() {
        let labels: Vec<String> = Shape::REFERENCE.resources().map(resource_label).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(resource_label(ResourceIndex::new(25)), "Z");
        assert_eq!(resource_label(ResourceIndex::new(300)), "R300");
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::REFERENCE.to_string(), "5 processes × 3 resources");
    }
}
