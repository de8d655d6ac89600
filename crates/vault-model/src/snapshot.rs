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

//! The system snapshot consumed by the safety check.
//!
//! A `Snapshot` is immutable once built. It stores the available vector and
//! the claim, allocation and derived need matrices, each matrix flattened
//! row-major with one row per process. Use `SnapshotBuilder` to assemble one
//! cell at a time (as the loader does), or `Snapshot::from_rows` when the
//! rows are already at hand.

use crate::{
    field::{InputField, Section},
    index::{ProcessIndex, ResourceIndex},
    num::SnapshotNumeric,
    shape::Shape,
};

/// The error type for snapshot construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A vector or matrix row did not match the shape of the snapshot.
    ShapeMismatch {
        section: Section,
        process: Option<ProcessIndex>,
        expected: usize,
        actual: usize,
    },
    /// `max - allocation` overflowed the element type.
    NeedOverflow {
        process: ProcessIndex,
        resource: ResourceIndex,
    },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                section,
                process: Some(process),
                expected,
                actual,
            } => write!(
                f,
                "{} row {} has {} values, expected {}",
                section, process, actual, expected
            ),
            Self::ShapeMismatch {
                section,
                process: None,
                expected,
                actual,
            } => write!(f, "{} has {} entries, expected {}", section, actual, expected),
            Self::NeedOverflow { process, resource } => write!(
                f,
                "Need of {} for {} overflows the element type",
                process, resource
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// A violation of the snapshot invariants found by [`Snapshot::validate`].
///
/// Values are carried pre-formatted so the error stays independent of the
/// element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A vector or matrix entry is negative.
    NegativeValue { field: InputField, value: String },
    /// A process holds more units of a resource than it may ever claim.
    ClaimExceeded {
        process: ProcessIndex,
        resource: ResourceIndex,
        allocation: String,
        claim: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeValue { field, value } => {
                write!(f, "Negative value {} in {}", value, field)
            }
            Self::ClaimExceeded {
                process,
                resource,
                allocation,
                claim,
            } => write!(
                f,
                "{} holds {} units of {} but its maximum claim is {}",
                process,
                allocation,
                crate::shape::resource_label(*resource),
                claim
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// The immutable system snapshot.
///
/// - `available[resource]`: units of each resource type not held by any process.
/// - `claims[process * R + resource]`: maximum units a process may ever hold.
/// - `allocations[process * R + resource]`: units a process currently holds.
/// - `needs[process * R + resource]`: `claims - allocations`, derived at build time.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    shape: Shape,
    available: Vec<T>,   // len = num_resources
    claims: Vec<T>,      // len = num_processes * num_resources
    allocations: Vec<T>, // len = num_processes * num_resources
    needs: Vec<T>,       // len = num_processes * num_resources
}

impl<T> Snapshot<T>
where
    T: SnapshotNumeric,
{
    /// Builds a snapshot from an available vector and per-process rows.
    ///
    /// The shape is taken from the input: one process per claim row and one
    /// resource type per entry of `available`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vault_model::{index::{ProcessIndex, ResourceIndex}, snapshot::Snapshot};
    /// let snapshot = Snapshot::<i64>::from_rows(
    ///     &[1, 0],
    ///     &[[2, 1], [1, 1]],
    ///     &[[1, 1], [0, 0]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(snapshot.num_processes(), 2);
    /// assert_eq!(snapshot.need_row(ProcessIndex::new(0)), &[1, 0]);
    /// assert_eq!(snapshot.need(ProcessIndex::new(1), ResourceIndex::new(1)), 1);
    /// ```
    pub fn from_rows<C, A>(
        available: &[T],
        claims: &[C],
        allocations: &[A],
    ) -> Result<Self, SnapshotError>
    where
        C: AsRef<[T]>,
        A: AsRef<[T]>,
    {
        let shape = Shape::new(claims.len(), available.len());

        if allocations.len() != claims.len() {
            return Err(SnapshotError::ShapeMismatch {
                section: Section::Allocation,
                process: None,
                expected: claims.len(),
                actual: allocations.len(),
            });
        }

        let mut builder = SnapshotBuilder::new(shape);
        builder.set_available_vector(available);

        for (process, (claim_row, allocation_row)) in
            shape.processes().zip(claims.iter().zip(allocations))
        {
            let claim_row = claim_row.as_ref();
            let allocation_row = allocation_row.as_ref();

            for (section, row) in [
                (Section::Claim, claim_row),
                (Section::Allocation, allocation_row),
            ] {
                if row.len() != shape.num_resources() {
                    return Err(SnapshotError::ShapeMismatch {
                        section,
                        process: Some(process),
                        expected: shape.num_resources(),
                        actual: row.len(),
                    });
                }
            }

            for resource in shape.resources() {
                builder.set_claim(process, resource, claim_row[resource.get()]);
                builder.set_allocation(process, resource, allocation_row[resource.get()]);
            }
        }

        builder.build()
    }

    /// Assembles a snapshot from flattened parts that already match `shape`,
    /// deriving `need = max - allocation` for every cell.
    pub(crate) fn from_parts(
        shape: Shape,
        available: Vec<T>,
        claims: Vec<T>,
        allocations: Vec<T>,
    ) -> Result<Self, SnapshotError> {
        debug_assert_eq!(available.len(), shape.num_resources());
        debug_assert_eq!(Some(claims.len()), shape.matrix_len());
        debug_assert_eq!(claims.len(), allocations.len());

        let width = shape.num_resources();
        let mut needs = Vec::with_capacity(claims.len());

        for (flat, (&claim, &allocation)) in claims.iter().zip(&allocations).enumerate() {
            let need = claim.checked_sub_val(allocation).ok_or_else(|| {
                SnapshotError::NeedOverflow {
                    process: ProcessIndex::new(flat / width),
                    resource: ResourceIndex::new(flat % width),
                }
            })?;
            needs.push(need);
        }

        Ok(Self {
            shape,
            available,
            claims,
            allocations,
            needs,
        })
    }

    /// Returns the shape of the snapshot.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the number of processes.
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.shape.num_processes()
    }

    /// Returns the number of resource types.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.shape.num_resources()
    }

    /// Returns the available resource vector.
    #[inline]
    pub fn available(&self) -> &[T] {
        &self.available
    }

    /// Returns the flattened claim matrix.
    #[inline]
    pub fn claims(&self) -> &[T] {
        &self.claims
    }

    /// Returns the flattened allocation matrix.
    #[inline]
    pub fn allocations(&self) -> &[T] {
        &self.allocations
    }

    /// Returns the flattened need matrix.
    #[inline]
    pub fn needs(&self) -> &[T] {
        &self.needs
    }

    /// Returns the maximum claim of `process` on `resource`.
    #[inline]
    pub fn claim(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.claims[self.shape.flatten(process, resource)]
    }

    /// Returns the units of `resource` currently held by `process`.
    #[inline]
    pub fn allocation(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.allocations[self.shape.flatten(process, resource)]
    }

    /// Returns the remaining need of `process` for `resource`.
    #[inline]
    pub fn need(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.needs[self.shape.flatten(process, resource)]
    }

    /// Returns the claim row of `process`.
    #[inline]
    pub fn claim_row(&self, process: ProcessIndex) -> &[T] {
        self.row(&self.claims, process)
    }

    /// Returns the allocation row of `process`.
    #[inline]
    pub fn allocation_row(&self, process: ProcessIndex) -> &[T] {
        self.row(&self.allocations, process)
    }

    /// Returns the need row of `process`.
    #[inline]
    pub fn need_row(&self, process: ProcessIndex) -> &[T] {
        self.row(&self.needs, process)
    }

    #[inline(always)]
    fn row<'s>(&self, matrix: &'s [T], process: ProcessIndex) -> &'s [T] {
        debug_assert!(
            process.get() < self.num_processes(),
            "called `Snapshot::row` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            process.get()
        );

        let width = self.num_resources();
        let start = process.get() * width;
        &matrix[start..start + width]
    }

    /// Returns the total units of each resource type in the system: the
    /// available vector plus everything currently allocated.
    ///
    /// This is the work vector a safety check ends with once every process
    /// has finished and released its allocation.
    pub fn total_resources(&self) -> Vec<T> {
        let mut total = self.available.clone();
        for process in self.shape.processes() {
            for (sum, &held) in total.iter_mut().zip(self.allocation_row(process)) {
                *sum = sum.saturating_add_val(held);
            }
        }
        total
    }

    /// Checks the snapshot invariants: every entry is non-negative and no
    /// process holds more than its maximum claim. Returns the first violation
    /// in input order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for resource in self.shape.resources() {
            let value = self.available[resource.get()];
            if value.is_negative() {
                return Err(ValidationError::NegativeValue {
                    field: InputField::Available { resource },
                    value: value.to_string(),
                });
            }
        }

        for process in self.shape.processes() {
            for resource in self.shape.resources() {
                let value = self.claim(process, resource);
                if value.is_negative() {
                    return Err(ValidationError::NegativeValue {
                        field: InputField::Claim { process, resource },
                        value: value.to_string(),
                    });
                }
            }
        }

        for process in self.shape.processes() {
            for resource in self.shape.resources() {
                let allocation = self.allocation(process, resource);
                if allocation.is_negative() {
                    return Err(ValidationError::NegativeValue {
                        field: InputField::Allocation { process, resource },
                        value: allocation.to_string(),
                    });
                }

                let claim = self.claim(process, resource);
                if allocation > claim {
                    return Err(ValidationError::ClaimExceeded {
                        process,
                        resource,
                        allocation: allocation.to_string(),
                        claim: claim.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl<T> std::fmt::Debug for Snapshot<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("shape", &self.shape)
            .field("available", &self.available)
            .field("claims", &self.claims)
            .field("allocations", &self.allocations)
            .field("needs", &self.needs)
            .finish()
    }
}

impl<T> std::fmt::Display for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Snapshot(num_processes: {}, num_resources: {})",
            self.shape.num_processes(),
            self.shape.num_resources()
        )
    }
}

/// Mutable builder for a [`Snapshot`].
///
/// All cells start at zero. `build` derives the need matrix.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder<T> {
    shape: Shape,
    available: Vec<T>,
    claims: Vec<T>,
    allocations: Vec<T>,
}

impl<T> SnapshotBuilder<T>
where
    T: SnapshotNumeric,
{
    /// Creates a new zero-filled builder for the given shape.
    ///
    /// # Panics
    ///
    /// Panics if a matrix of `shape` has more cells than fit into a `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vault_model::{shape::Shape, snapshot::SnapshotBuilder};
    /// let builder = SnapshotBuilder::<i64>::new(Shape::new(4, 2));
    /// let snapshot = builder.build().unwrap();
    /// assert_eq!(snapshot.num_processes(), 4);
    /// assert_eq!(snapshot.available(), &[0, 0]);
    /// ```
    pub fn new(shape: Shape) -> Self {
        let Some(cells) = shape.matrix_len() else {
            panic!(
                "called `SnapshotBuilder::new` with a shape whose matrices overflow `usize`: {}",
                shape
            );
        };

        Self {
            shape,
            available: vec![T::zero(); shape.num_resources()],
            claims: vec![T::zero(); cells],
            allocations: vec![T::zero(); cells],
        }
    }

    /// Returns the shape being built.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Sets `available[resource]`.
    #[inline]
    pub fn set_available(&mut self, resource: ResourceIndex, units: T) -> &mut Self {
        debug_assert!(
            resource.get() < self.shape.num_resources(),
            "called `SnapshotBuilder::set_available` with resource index out of bounds: the len is {} but the index is {}",
            self.shape.num_resources(),
            resource.get()
        );

        self.available[resource.get()] = units;
        self
    }

    /// Copies `units` into the available vector.
    ///
    /// # Panics
    ///
    /// Panics if `units.len()` differs from the number of resource types.
    #[inline]
    pub fn set_available_vector(&mut self, units: &[T]) -> &mut Self {
        assert_eq!(
            units.len(),
            self.shape.num_resources(),
            "called `SnapshotBuilder::set_available_vector` with {} values for {} resource types",
            units.len(),
            self.shape.num_resources()
        );

        self.available.copy_from_slice(units);
        self
    }

    /// Sets `max[process][resource]`.
    #[inline]
    pub fn set_claim(&mut self, process: ProcessIndex, resource: ResourceIndex, units: T) -> &mut Self {
        let index = self.shape.flatten(process, resource);
        self.claims[index] = units;
        self
    }

    /// Sets `allocation[process][resource]`.
    #[inline]
    pub fn set_allocation(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        units: T,
    ) -> &mut Self {
        let index = self.shape.flatten(process, resource);
        self.allocations[index] = units;
        self
    }

    /// Builds the `Snapshot`, deriving `need = max - allocation` for every cell.
    ///
    /// Negative need (allocation above the claim) is kept as is; use
    /// [`Snapshot::validate`] to reject such snapshots. Fails only if a
    /// difference overflows the element type.
    pub fn build(self) -> Result<Snapshot<T>, SnapshotError> {
        Snapshot::from_parts(self.shape, self.available, self.claims, self.allocations)
    }
}

impl<T> std::fmt::Display for SnapshotBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SnapshotBuilder(num_processes: {}, num_resources: {})",
            self.shape.num_processes(),
            self.shape.num_resources()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> ProcessIndex {
        ProcessIndex::new(i)
    }

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn textbook() -> Snapshot<i64> {
        Snapshot::from_rows(
            &[3, 3, 2],
            &[[7, 5, 3], [3, 2, 2], [9, 0, 2], [2, 2, 2], [4, 3, 3]],
            &[[0, 1, 0], [2, 0, 0], [3, 0, 2], [2, 1, 1], [0, 0, 2]],
        )
        .expect("textbook snapshot is well formed")
    }

    #[test]
    fn test_need_is_claim_minus_allocation() {
        let snapshot = textbook();
        assert_eq!(snapshot.need_row(p(0)), &[7, 4, 3]);
        assert_eq!(snapshot.need_row(p(1)), &[1, 2, 2]);
        assert_eq!(snapshot.need_row(p(2)), &[6, 0, 0]);
        assert_eq!(snapshot.need_row(p(3)), &[0, 1, 1]);
        assert_eq!(snapshot.need_row(p(4)), &[4, 3, 1]);
    }

    #[test]
    fn test_accessors_agree_with_rows() {
        let snapshot = textbook();
        assert_eq!(snapshot.shape(), Shape::REFERENCE);
        assert_eq!(snapshot.available(), &[3, 3, 2]);
        assert_eq!(snapshot.claim(p(2), r(0)), 9);
        assert_eq!(snapshot.allocation(p(2), r(2)), 2);
        assert_eq!(snapshot.need(p(4), r(1)), 3);
        assert_eq!(snapshot.claim_row(p(4)), &[4, 3, 3]);
        assert_eq!(snapshot.allocation_row(p(3)), &[2, 1, 1]);
        assert_eq!(snapshot.needs().len(), 15);
    }

    #[test]
    fn test_total_resources_sums_available_and_allocations() {
        assert_eq!(textbook().total_resources(), vec![10, 5, 7]);
    }

    #[test]
    fn test_validate_accepts_textbook() {
        assert_eq!(textbook().validate(), Ok(()));
    }

    #[test]
    fn test_negative_need_is_kept_but_rejected_by_validation() {
        let snapshot = Snapshot::<i64>::from_rows(&[1], &[[2], [1]], &[[1], [3]]).unwrap();
        assert_eq!(snapshot.need(p(1), r(0)), -2);

        match snapshot.validate() {
            Err(ValidationError::ClaimExceeded {
                process,
                resource,
                allocation,
                claim,
            }) => {
                assert_eq!(process, p(1));
                assert_eq!(resource, r(0));
                assert_eq!(allocation, "3");
                assert_eq!(claim, "1");
            }
            other => panic!("expected ClaimExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_first_negative_value() {
        let snapshot = Snapshot::<i64>::from_rows(&[1, -4], &[[1, 1]], &[[0, 0]]).unwrap();
        assert_eq!(
            snapshot.validate(),
            Err(ValidationError::NegativeValue {
                field: InputField::Available { resource: r(1) },
                value: "-4".to_owned(),
            })
        );

        let snapshot = Snapshot::<i64>::from_rows(&[1], &[[1], [-1]], &[[0], [-2]]).unwrap();
        assert_eq!(
            snapshot.validate(),
            Err(ValidationError::NegativeValue {
                field: InputField::Claim {
                    process: p(1),
                    resource: r(0)
                },
                value: "-1".to_owned(),
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Snapshot::<i64>::from_rows(&[1, 1], &[vec![1, 1], vec![1]], &[vec![0, 0], vec![0]])
            .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::ShapeMismatch {
                section: Section::Claim,
                process: Some(p(1)),
                expected: 2,
                actual: 1,
            }
        );
        assert_eq!(err.to_string(), "max matrix row P1 has 1 values, expected 2");

        let err = Snapshot::<i64>::from_rows(&[1], &[[1], [1]], &[[0]]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::ShapeMismatch {
                section: Section::Allocation,
                process: None,
                expected: 2,
                actual: 1,
            }
        ));
    }

    #[test]
    fn test_need_overflow_is_reported() {
        let mut builder = SnapshotBuilder::<i8>::new(Shape::new(1, 2));
        builder.set_claim(p(0), r(1), i8::MIN);
        builder.set_allocation(p(0), r(1), 1);

        assert_eq!(
            builder.build().unwrap_err(),
            SnapshotError::NeedOverflow {
                process: p(0),
                resource: r(1)
            }
        );
    }

    #[test]
    #[should_panic(expected = "called `SnapshotBuilder::set_available_vector` with 2 values")]
    fn test_set_available_vector_panics_on_length_mismatch() {
        let mut builder = SnapshotBuilder::<i64>::new(Shape::REFERENCE);
        builder.set_available_vector(&[1, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            textbook().to_string(),
            "Snapshot(num_processes: 5, num_resources: 3)"
        );
        let builder = SnapshotBuilder::<i64>::new(Shape::new(2, 4));
        assert_eq!(
            builder.to_string(),
            "SnapshotBuilder(num_processes: 2, num_resources: 4)"
        );
    }
}
