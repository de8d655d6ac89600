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

//! Snapshot loader for Banker's algorithm input files.
//!
//! This module turns whitespace-delimited integer streams into a `Snapshot`.
//! Values are read in a fixed order (available vector, then the claim
//! matrix row by row, then the allocation matrix row by row) and every read
//! is tagged with the `InputField` it fills, so a missing or unparsable
//! token is reported against the exact vector or matrix row it belongs to.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.
//! Tokens are separated by ASCII whitespace and nothing else: there is no
//! comment syntax, so a token such as `#` or `3#` is reported as unparsable
//! for the field it was read for. Tokens after the last required value are
//! not read.
//!
//! Storage grows with the tokens actually read, never with the configured
//! shape alone, so an oversized shape on a short file fails with a
//! missing-field error instead of exhausting memory.
//!
//! By default the loaded snapshot is validated (non-negative entries,
//! allocation not above the claim). With validation disabled, negative need
//! is passed through to the checker, where `need <= work` holds trivially.

use crate::{
    field::InputField,
    num::SnapshotNumeric,
    shape::Shape,
    snapshot::{Snapshot, SnapshotError, ValidationError},
};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

/// The error type for the snapshot loading process.
#[derive(Debug)]
pub enum SnapshotLoaderError {
    /// The input file could not be opened.
    Open { path: PathBuf, source: std::io::Error },
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// A required field is missing or is not an integer.
    Malformed(MalformedInputError),
    /// The configured shape has no processes or no resource types, or
    /// needs more values than fit into a `usize`.
    InvalidShape(Shape),
    /// The need matrix could not be derived.
    Snapshot(SnapshotError),
    /// The snapshot violates its invariants and validation is enabled.
    Validation(ValidationError),
}

/// Why a field could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The input ended before the field was read, after `read` of the
    /// `expected` integers.
    Missing { read: usize, expected: usize },
    /// The token could not be parsed into the element type.
    Unparsable(ParseTokenError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

impl Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// A required field is missing or unparsable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedInputError {
    /// The field that was being read.
    pub field: InputField,
    /// What went wrong.
    pub reason: MalformedReason,
}

impl Display for MalformedInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            MalformedReason::Missing { read, expected } => write!(
                f,
                "Invalid format in {}: unexpected end of input after {} of {} integers",
                self.field, read, expected
            ),
            MalformedReason::Unparsable(e) => {
                write!(f, "Invalid format in {}: {}", self.field, e)
            }
        }
    }
}

impl std::error::Error for MalformedInputError {}

impl Display for SnapshotLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open input file '{}': {}", path.display(), source)
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed(e) => write!(f, "{}", e),
            Self::InvalidShape(shape) if shape.is_degenerate() => write!(
                f,
                "Snapshot dimensions must be positive, got {}",
                shape
            ),
            Self::InvalidShape(shape) => write!(
                f,
                "Snapshot dimensions are too large, got {}",
                shape
            ),
            Self::Snapshot(e) => write!(f, "Snapshot error: {}", e),
            Self::Validation(e) => write!(f, "Invalid snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::Malformed(e) => Some(e),
            Self::InvalidShape(_) => None,
            Self::Snapshot(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SnapshotLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MalformedInputError> for SnapshotLoaderError {
    fn from(e: MalformedInputError) -> Self {
        Self::Malformed(e)
    }
}

impl From<SnapshotError> for SnapshotLoaderError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

impl From<ValidationError> for SnapshotLoaderError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// A configurable loader for snapshot files.
///
/// The format this parser expects is as follows (whitespace-separated tokens):
///
/// ```raw
/// a_1 ... a_|R|               (available units of each resource type)
/// m_1_1 ... m_1_|R|           (maximum claim of process 1)
/// ...
/// m_|N|_1 ... m_|N|_|R|       (maximum claim of process N)
/// h_1_1 ... h_1_|R|           (current allocation of process 1)
/// ...
/// h_|N|_1 ... h_|N|_|R|       (current allocation of process N)
/// ```
///
/// # Configuration
/// * `with_shape`: The `N × R` dimensions to read. Defaults to `Shape::REFERENCE` (5 × 3).
/// * `validate`: If true (the default), reject negative entries and allocations above the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLoader<T> {
    shape: Shape,
    validate: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for SnapshotLoader<T> {
    fn default() -> Self {
        Self {
            shape: Shape::REFERENCE,
            validate: true,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> SnapshotLoader<T>
where
    T: SnapshotNumeric,
{
    /// Creates a new `SnapshotLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dimensions of the snapshots to read.
    #[inline]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Configures whether loaded snapshots are validated.
    #[inline]
    pub fn validate(mut self, yes: bool) -> Self {
        self.validate = yes;
        self
    }

    /// Returns the configured shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns whether loaded snapshots are validated.
    #[inline]
    pub fn validates(&self) -> bool {
        self.validate
    }

    /// Loads a snapshot from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Snapshot<T>, SnapshotLoaderError> {
        let shape = self.shape;
        if shape.is_degenerate() {
            return Err(SnapshotLoaderError::InvalidShape(shape));
        }
        let Some(expected) = shape.required_values() else {
            return Err(SnapshotLoaderError::InvalidShape(shape));
        };

        let mut sc = Scanner::new(rdr, expected);

        // Available vector
        let mut available = Vec::with_capacity(shape.num_resources().min(PREALLOCATION_LIMIT));
        for resource in shape.resources() {
            available.push(sc.next(InputField::Available { resource })?);
        }

        // Claim matrix, row-major
        let cells = (expected - shape.num_resources()) / 2;
        let mut claims = Vec::with_capacity(cells.min(PREALLOCATION_LIMIT));
        for process in shape.processes() {
            for resource in shape.resources() {
                claims.push(sc.next(InputField::Claim { process, resource })?);
            }
        }

        // Allocation matrix, row-major
        let mut allocations = Vec::with_capacity(claims.len());
        for process in shape.processes() {
            for resource in shape.resources() {
                allocations.push(sc.next(InputField::Allocation { process, resource })?);
            }
        }

        let snapshot = Snapshot::from_parts(shape, available, claims, allocations)?;
        if self.validate {
            snapshot.validate()?;
        }

        Ok(snapshot)
    }

    /// Loads a snapshot from a file path.
    ///
    /// The file is closed before this returns, on success and on every error path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Snapshot<T>, SnapshotLoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SnapshotLoaderError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a snapshot from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Snapshot<T>, SnapshotLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a snapshot from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Snapshot<T>, SnapshotLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// Upper bound on the capacity reserved up front for any vector or matrix.
/// Larger snapshots grow as their values are read.
const PREALLOCATION_LIMIT: usize = 1 << 16;

/// Returns `true` for the bytes that separate tokens.
#[inline]
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// A helper to read whitespace-delimited tokens from a generic reader.
///
/// Works on raw bytes so that a line with invalid UTF-8 surfaces as an
/// unparsable token of the field being read rather than as an I/O error.
struct Scanner<R> {
    rdr: R,
    buf: Vec<u8>,
    pos: usize,
    read: usize,
    expected: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R, expected: usize) -> Self {
        Self {
            rdr,
            buf: Vec::new(),
            pos: 0,
            read: 0,
            expected,
        }
    }

    /// Refills the internal line buffer. Returns `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, SnapshotLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_until(b'\n', &mut self.buf)?;
        Ok(n > 0)
    }

    /// Returns the byte range of the next token in `buf`, or `None` once the
    /// input is exhausted.
    fn next_token(&mut self) -> Result<Option<(usize, usize)>, SnapshotLoaderError> {
        loop {
            while self.pos < self.buf.len() && is_separator(self.buf[self.pos]) {
                self.pos += 1;
            }

            if self.pos < self.buf.len() {
                let start = self.pos;
                while self.pos < self.buf.len() && !is_separator(self.buf[self.pos]) {
                    self.pos += 1;
                }
                return Ok(Some((start, self.pos)));
            }

            if !self.fill_line()? {
                return Ok(None);
            }
        }
    }

    /// Reads the next token as the value of `field`.
    fn next<T: SnapshotNumeric>(&mut self, field: InputField) -> Result<T, SnapshotLoaderError> {
        let Some((start, end)) = self.next_token()? else {
            return Err(MalformedInputError {
                field,
                reason: MalformedReason::Missing {
                    read: self.read,
                    expected: self.expected,
                },
            }
            .into());
        };

        let token = &self.buf[start..end];
        let value = std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<T>().ok());

        match value {
            Some(value) => {
                self.read += 1;
                Ok(value)
            }
            None => Err(MalformedInputError {
                field,
                reason: MalformedReason::Unparsable(ParseTokenError {
                    token: String::from_utf8_lossy(token).into_owned(),
                    type_name: std::any::type_name::<T>(),
                }),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ProcessIndex, ResourceIndex};
    use std::io::Write;

    const TEXTBOOK: &str = "
        3 3 2
        7 5 3
        3 2 2
        9 0 2
        2 2 2
        4 3 3
        0 1 0
        2 0 0
        3 0 2
        2 1 1
        0 0 2
    ";

    fn p(i: usize) -> ProcessIndex {
        ProcessIndex::new(i)
    }

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn malformed(res: Result<Snapshot<i64>, SnapshotLoaderError>) -> MalformedInputError {
        match res {
            Err(SnapshotLoaderError::Malformed(e)) => e,
            other => panic!("expected Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_loads_and_derives_need() {
        let snapshot: Snapshot<i64> = SnapshotLoader::new()
            .from_str(TEXTBOOK)
            .expect("Failed to load");

        assert_eq!(snapshot.shape(), Shape::REFERENCE);
        assert_eq!(snapshot.available(), &[3, 3, 2]);
        assert_eq!(snapshot.claim_row(p(2)), &[9, 0, 2]);
        assert_eq!(snapshot.allocation_row(p(4)), &[0, 0, 2]);
        assert_eq!(snapshot.need_row(p(0)), &[7, 4, 3]);
        assert_eq!(snapshot.need_row(p(4)), &[4, 3, 1]);
    }

    #[test]
    fn test_single_line_input() {
        let data = "3 3 2 7 5 3 3 2 2 9 0 2 2 2 2 4 3 3 0 1 0 2 0 0 3 0 2 2 1 1 0 0 2";
        let snapshot: Snapshot<i64> = SnapshotLoader::new().from_str(data).unwrap();
        assert_eq!(snapshot.need_row(p(3)), &[0, 1, 1]);
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let data = format!("{TEXTBOOK}\n 99 junk");
        assert!(SnapshotLoader::<i64>::new().from_str(&data).is_ok());
    }

    #[test]
    fn test_hash_is_not_a_comment() {
        let e = malformed(
            SnapshotLoader::new()
                .with_shape(Shape::new(1, 1))
                .from_str("1 # 2\n3 0"),
        );
        assert_eq!(
            e.field,
            InputField::Claim {
                process: p(0),
                resource: r(0)
            }
        );
        assert_eq!(
            e.reason,
            MalformedReason::Unparsable(ParseTokenError {
                token: "#".to_string(),
                type_name: "i64",
            })
        );
    }

    #[test]
    fn test_hash_glued_to_token_is_rejected() {
        let e = malformed(
            SnapshotLoader::new()
                .with_shape(Shape::new(2, 1))
                .from_str("1#available\n2 1\n0 0"),
        );
        assert_eq!(e.field, InputField::Available { resource: r(0) });
        assert!(matches!(
            e.reason,
            MalformedReason::Unparsable(ParseTokenError { ref token, .. }) if token == "1#available"
        ));
    }

    #[test]
    fn test_invalid_utf8_names_the_field() {
        let e = malformed(SnapshotLoader::new().from_reader(&b"3 \xff 2 7 5 3"[..]));
        assert_eq!(e.field, InputField::Available { resource: r(1) });
        match e.reason {
            MalformedReason::Unparsable(ParseTokenError { token, .. }) => {
                assert_eq!(token, "\u{FFFD}");
            }
            other => panic!("expected Unparsable, got {:?}", other),
        }
    }

    #[test]
    fn test_crlf_and_tabs_separate_tokens() {
        let data = "3\t3 2\r\n7 5 3 3 2 2 9 0 2 2 2 2 4 3 3\r\n0 1 0 2 0 0 3 0 2 2 1 1 0 0 2\r\n";
        let snapshot: Snapshot<i64> = SnapshotLoader::new().from_str(data).unwrap();
        assert_eq!(snapshot.available(), &[3, 3, 2]);
        assert_eq!(snapshot.allocation_row(p(4)), &[0, 0, 2]);
    }

    #[test]
    fn test_custom_shape() {
        let data = "1 0  2 1  1 1  3 0  1 0  0 1  2 0";
        let snapshot: Snapshot<i32> = SnapshotLoader::new()
            .with_shape(Shape::new(3, 2))
            .from_str(data)
            .unwrap();
        assert_eq!(snapshot.available(), &[1, 0]);
        assert_eq!(snapshot.claim_row(p(2)), &[3, 0]);
        assert_eq!(snapshot.need_row(p(0)), &[1, 1]);
        assert_eq!(snapshot.need_row(p(1)), &[1, 0]);
    }

    #[test]
    fn test_missing_available_value() {
        let e = malformed(SnapshotLoader::new().from_str("3 3"));
        assert_eq!(e.field, InputField::Available { resource: r(2) });
        assert_eq!(
            e.reason,
            MalformedReason::Missing {
                read: 2,
                expected: 33
            }
        );
        assert_eq!(
            e.to_string(),
            "Invalid format in available resources (resource C): unexpected end of input after 2 of 33 integers"
        );
    }

    #[test]
    fn test_empty_input_names_first_field() {
        let e = malformed(SnapshotLoader::new().from_str("   \n\t\n"));
        assert_eq!(e.field, InputField::Available { resource: r(0) });
    }

    #[test]
    fn test_truncated_allocation_matrix_names_first_missing_field() {
        // Drop the last allocation row entirely and one value of the row before.
        let data = "3 3 2  7 5 3 3 2 2 9 0 2 2 2 2 4 3 3  0 1 0 2 0 0 3 0 2 2 1";
        let e = malformed(SnapshotLoader::new().from_str(data));
        assert_eq!(
            e.field,
            InputField::Allocation {
                process: p(3),
                resource: r(2)
            }
        );
        assert_eq!(
            e.reason,
            MalformedReason::Missing {
                read: 31,
                expected: 33
            }
        );
    }

    #[test]
    fn test_unparsable_claim_token() {
        let data = "3 3 2  7 5 3  3 x 2";
        let e = malformed(SnapshotLoader::new().from_str(data));
        assert_eq!(
            e.field,
            InputField::Claim {
                process: p(1),
                resource: r(1)
            }
        );
        match e.reason {
            MalformedReason::Unparsable(ParseTokenError { token, type_name }) => {
                assert_eq!(token, "x");
                assert!(type_name.contains("i64"));
            }
            other => panic!("expected Unparsable, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_overclaim_by_default() {
        let data = "0 0  1 2  2 1";
        let loader = SnapshotLoader::<i64>::new().with_shape(Shape::new(1, 2));
        assert!(loader.validates());

        match loader.from_str(data) {
            Err(SnapshotLoaderError::Validation(ValidationError::ClaimExceeded {
                process,
                resource,
                ..
            })) => {
                assert_eq!(process, p(0));
                assert_eq!(resource, r(0));
            }
            other => panic!("expected ClaimExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let data = "0 0  1 2  2 1";
        let snapshot: Snapshot<i64> = SnapshotLoader::new()
            .with_shape(Shape::new(1, 2))
            .validate(false)
            .from_str(data)
            .unwrap();
        assert_eq!(snapshot.need_row(p(0)), &[-1, 1]);
    }

    #[test]
    fn test_invalid_shape() {
        let res = SnapshotLoader::<i64>::new()
            .with_shape(Shape::new(0, 3))
            .from_str("1 2 3");
        assert!(matches!(res, Err(SnapshotLoaderError::InvalidShape(_))));
    }

    #[test]
    fn test_overflowing_shape_is_rejected() {
        let shape = Shape::new(usize::MAX, 2);
        match SnapshotLoader::<i64>::new().with_shape(shape).from_str(TEXTBOOK) {
            Err(e @ SnapshotLoaderError::InvalidShape(_)) => {
                assert_eq!(
                    e.to_string(),
                    format!("Snapshot dimensions are too large, got {}", shape)
                );
            }
            other => panic!("expected InvalidShape, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_shape_on_short_input_reports_missing_field() {
        // Large enough that zero-filled matrices could not be allocated.
        let shape = Shape::new(1 << 40, 1);
        let e = malformed(SnapshotLoader::new().with_shape(shape).from_str("1 2 3"));
        assert_eq!(
            e.field,
            InputField::Claim {
                process: p(2),
                resource: r(0)
            }
        );
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEXTBOOK.as_bytes()).unwrap();

        let snapshot: Snapshot<i64> = SnapshotLoader::new().from_path(file.path()).unwrap();
        assert_eq!(snapshot.total_resources(), vec![10, 5, 7]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        match SnapshotLoader::<i64>::new().from_path(&path) {
            Err(SnapshotLoaderError::Open { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Open error, got {:?}", other),
        }
    }
}
