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

//! Text rendering of resource vectors and matrices.
//!
//! These adaptors only borrow the data; they are used by the safety trace
//! and by the command line report.

use crate::{
    index::{ProcessIndex, ResourceIndex},
    shape::resource_label,
};

/// Displays a resource vector as `[3, 3, 2]`.
#[derive(Clone, Copy, Debug)]
pub struct ResourceVector<'a, T>(pub &'a [T]);

impl<T> std::fmt::Display for ResourceVector<'_, T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Displays a flattened row-major matrix as a table with a header row of
/// resource labels and one `P{i}:` labelled row per process.
///
/// ```raw
///       A  B  C
/// P0:   7  5  3
/// P1:   3  2  2
/// ```
///
/// Columns are right-aligned to the widest label or value, at least two
/// characters wide.
#[derive(Clone, Copy, Debug)]
pub struct MatrixTable<'a, T> {
    cells: &'a [T],
    num_resources: usize,
}

impl<'a, T> MatrixTable<'a, T> {
    /// Creates a table over `cells`, which holds one row of `num_resources`
    /// values per process.
    ///
    /// # Panics
    ///
    /// Panics if `num_resources` is zero or does not divide `cells.len()`.
    pub fn new(cells: &'a [T], num_resources: usize) -> Self {
        assert!(
            num_resources > 0 && cells.len() % num_resources == 0,
            "called `MatrixTable::new` with {} cells that do not form rows of {} resources",
            cells.len(),
            num_resources
        );

        Self {
            cells,
            num_resources,
        }
    }

    /// Returns the number of process rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.cells.len() / self.num_resources
    }
}

impl<T> std::fmt::Display for MatrixTable<'_, T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = ResourceIndex::range(self.num_resources)
            .map(resource_label)
            .collect();
        let rows: Vec<String> = ProcessIndex::range(self.num_rows())
            .map(|p| format!("{}:", p))
            .collect();
        let values: Vec<String> = self.cells.iter().map(|v| v.to_string()).collect();

        let row_width = rows.iter().map(String::len).max().unwrap_or(0);
        let col_width = labels
            .iter()
            .chain(values.iter())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(2);

        let mut line = format!("{:<row_width$} ", "");
        for label in &labels {
            line.push_str(&format!("{:>col_width$} ", label));
        }
        writeln!(f, "{}", line.trim_end())?;

        for (row_label, row) in rows.iter().zip(values.chunks(self.num_resources)) {
            let mut line = format!("{:<row_width$} ", row_label);
            for value in row {
                line.push_str(&format!("{:>col_width$} ", value));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_vector() {
        assert_eq!(ResourceVector(&[3i64, 3, 2]).to_string(), "[3, 3, 2]");
        assert_eq!(ResourceVector(&[-1i32]).to_string(), "[-1]");
        assert_eq!(ResourceVector::<i64>(&[]).to_string(), "[]");
    }

    #[test]
    fn test_matrix_table_layout() {
        let cells = [7i64, 5, 3, 3, 2, 2];
        let table = MatrixTable::new(&cells, 3);
        assert_eq!(table.num_rows(), 2);

        let mut expected = String::new();
        expected.push_str("     A  B  C\n");
        expected.push_str("P0:  7  5  3\n");
        expected.push_str("P1:  3  2  2\n");
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_matrix_table_widens_for_large_values() {
        let cells = [100i64, -5];
        let rendered = MatrixTable::new(&cells, 1).to_string();

        let mut expected = String::new();
        expected.push_str("      A\n");
        expected.push_str("P0: 100\n");
        expected.push_str("P1:  -5\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_matrix_table_row_labels_align() {
        let cells: Vec<i64> = (0..11).collect();
        let rendered = MatrixTable::new(&cells, 1).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[1], "P0:   0");
        assert_eq!(lines[11], "P10: 10");
    }

    #[test]
    #[should_panic(expected = "called `MatrixTable::new` with 4 cells")]
    fn test_matrix_table_rejects_ragged_cells() {
        let _ = MatrixTable::new(&[1i64, 2, 3, 4], 3);
    }
}
