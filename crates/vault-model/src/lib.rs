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

//! # Vault Model
//!
//! **The data model of a Banker's algorithm system snapshot.**
//!
//! A snapshot captures, for a fixed set of processes and resource types, the
//! units currently available, every process's maximum claim and every
//! process's current allocation. The remaining need of each process is
//! derived once, when the snapshot is built.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `ProcessIndex` and `ResourceIndex`.
//! * **`shape`**: The `(processes, resources)` dimensions carried with every snapshot.
//! * **`display`**: `ResourceVector` and `MatrixTable` text adaptors used by traces and reports.
//! * **`field`**: Identifies a single integer field of the input (vector or matrix cell).
//! * **`snapshot`**: The immutable `Snapshot` and its mutable `SnapshotBuilder`.
//! * **`sequence`**: `SafeSequence`, the completion order proving a safe state.
//! * **`loading`**: `SnapshotLoader`, which reads whitespace-separated integer files.
//! * **`num`**: The `SnapshotNumeric` bound collecting what the element type must support.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: A `ProcessIndex` cannot be used where a `ResourceIndex` is expected.
//! 2.  **Memory Layout**: Matrices are stored flattened row-major, one row per process.
//! 3.  **Fail-Fast**: Loading reports the exact field that could not be read, and the
//!     need matrix is derived with checked arithmetic.

pub mod display;
pub mod field;
pub mod index;
pub mod loading;
pub mod num;
pub mod sequence;
pub mod shape;
pub mod snapshot;
