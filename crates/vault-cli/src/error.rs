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

use std::{io, path::PathBuf};
use vault_model::loading::SnapshotLoaderError;

/// Errors that end a `vault` run with exit code 1.
#[derive(Debug)]
pub enum CliError {
    /// The snapshot file could not be opened, read or parsed.
    Load {
        path: PathBuf,
        source: SnapshotLoaderError,
    },
    /// Writing the report failed.
    Io(io::Error),
}

impl CliError {
    /// A follow-up line printed after the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Load {
                source: SnapshotLoaderError::Open { .. },
                ..
            } => Some("Please make sure the file exists in the input/ directory"),
            Self::Load {
                source: SnapshotLoaderError::Validation(_),
                ..
            } => Some("Run with --allow-overclaim to check the snapshot anyway"),
            _ => None,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { source, .. } => write!(f, "{}", source),
            Self::Io(e) => write!(f, "Failed to write report: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => Some(source),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
