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

//! # Snapshot Numeric Trait
//!
//! `SnapshotNumeric` collects the integer capabilities the snapshot and the
//! safety checker need from the element type: intrinsic traits (`PrimInt`,
//! `Signed`), parsing from text, formatting, and the by-value checked and
//! saturating arithmetic from `vault_core`.
//!
//! Signed types are required because the input format carries signed
//! integers, and a snapshot loaded without validation may legitimately hold
//! a negative need.

use num_traits::{PrimInt, Signed};
use std::str::FromStr;
use vault_core::num::ops::{checked_arithmetic, saturating_arithmetic};

/// A trait alias for the element types of a snapshot.
/// These are usually the signed integer types `i8`, `i16`, `i32`, `i64`, `i128` and `isize`.
pub trait SnapshotNumeric:
    PrimInt
    + Signed
    + FromStr
    + std::fmt::Debug
    + std::fmt::Display
    + checked_arithmetic::CheckedSubVal
    + saturating_arithmetic::SaturatingAddVal
{
}

impl<T> SnapshotNumeric for T where
    T: PrimInt
        + Signed
        + FromStr
        + std::fmt::Debug
        + std::fmt::Display
            + checked_arithmetic::CheckedSubVal
        + saturating_arithmetic::SaturatingAddVal
{
}
