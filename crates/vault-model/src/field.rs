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

//! Identification of single input fields.
//!
//! Loading and validation errors point at the exact integer that caused
//! them: a cell of the available vector, or a cell of the claim (max) or
//! allocation matrix in a given process row.

use crate::{
    index::{ProcessIndex, ResourceIndex},
    shape::resource_label,
};

/// The vector or matrix a field belongs to, in input order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Section {
    /// The available resource vector.
    Available,
    /// The maximum claim matrix.
    Claim,
    /// The allocation matrix.
    Allocation,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Available => write!(f, "available resources"),
            Section::Claim => write!(f, "max matrix"),
            Section::Allocation => write!(f, "allocation matrix"),
        }
    }
}

/// A single integer field of a snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum InputField {
    /// `available[resource]`.
    Available { resource: ResourceIndex },
    /// `max[process][resource]`.
    Claim {
        process: ProcessIndex,
        resource: ResourceIndex,
    },
    /// `allocation[process][resource]`.
    Allocation {
        process: ProcessIndex,
        resource: ResourceIndex,
    },
}

impl InputField {
    /// Returns the section the field belongs to.
    #[inline]
    pub fn section(&self) -> Section {
        match self {
            InputField::Available { .. } => Section::Available,
            InputField::Claim { .. } => Section::Claim,
            InputField::Allocation { .. } => Section::Allocation,
        }
    }

    /// Returns the process row of a matrix field, or `None` for the available vector.
    #[inline]
    pub fn process(&self) -> Option<ProcessIndex> {
        match *self {
            InputField::Available { .. } => None,
            InputField::Claim { process, .. } | InputField::Allocation { process, .. } => {
                Some(process)
            }
        }
    }

    /// Returns the resource column of the field.
    #[inline]
    pub fn resource(&self) -> ResourceIndex {
        match *self {
            InputField::Available { resource }
            | InputField::Claim { resource, .. }
            | InputField::Allocation { resource, .. } => resource,
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.process() {
            Some(process) => write!(
                f,
                "{} at {} (resource {})",
                self.section(),
                process,
                resource_label(self.resource())
            ),
            None => write!(
                f,
                "{} (resource {})",
                self.section(),
                resource_label(self.resource())
            ),
        }
    }
}
