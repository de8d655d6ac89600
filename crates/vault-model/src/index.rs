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

use vault_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for process indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProcessIndexTag;

impl TypedIndexTag for ProcessIndexTag {
    const NAME: &'static str = "ProcessIndex";
    const PREFIX: &'static str = "P";
}

/// A typed index for processes. Displays as `P{i}`.
pub type ProcessIndex = TypedIndex<ProcessIndexTag>;

/// A tag type for resource type indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResourceIndexTag;

impl TypedIndexTag for ResourceIndexTag {
    const NAME: &'static str = "ResourceIndex";
    const PREFIX: &'static str = "R";
}

/// A typed index for resource types. Displays as `R{j}`; see
/// [`resource_label`](crate::shape::resource_label) for the column labels used in reports.
pub type ResourceIndex = TypedIndex<ResourceIndexTag>;
