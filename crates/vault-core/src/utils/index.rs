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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` that keep the process and resource
//! index spaces of a snapshot apart. `TypedIndex<T>` carries a tag type
//! `T: TypedIndexTag` and compiles down to a transparent `usize`.
//!
//! The tag supplies two strings: `NAME`, used by `Debug` (`ProcessIndex(3)`),
//! and `PREFIX`, used by `Display` (`P3`), which is the label format of the
//! textual reports.
//!
//! ## Usage
//!
//! ```rust
//! use vault_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone)]
//! struct ProcessTag;
//! impl TypedIndexTag for ProcessTag {
//!     const NAME: &'static str = "ProcessIndex";
//!     const PREFIX: &'static str = "P";
//! }
//!
//! type ProcessIndex = TypedIndex<ProcessTag>;
//! let p = ProcessIndex::new(3);
//! assert_eq!(p.get(), 3);
//! assert_eq!(format!("{}", p), "P3");
//! assert_eq!(format!("{:?}", p), "ProcessIndex(3)");
//! ```

/// Names a family of typed indices for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    /// The name shown by `Debug`.
    const NAME: &'static str;
    /// The short label prefix shown by `Display`.
    const PREFIX: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns an iterator over the indices `0..count` in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vault_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone)]
    /// # struct Tag;
    /// # impl TypedIndexTag for Tag {
    /// #     const NAME: &'static str = "Index";
    /// #     const PREFIX: &'static str = "I";
    /// # }
    /// let indices: Vec<usize> = TypedIndex::<Tag>::range(3).map(|i| i.get()).collect();
    /// assert_eq!(indices, vec![0, 1, 2]);
    /// ```
    #[inline]
    pub fn range(count: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..count).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", T::PREFIX, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}
