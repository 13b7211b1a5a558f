use crate::algebra::{FloatT, SparseFormatError, SparseMatrix};

/// Incremental constructor for a [`SparseMatrix`].
///
/// Entries must be supplied row by row, i.e. with non-decreasing row
/// indices.  Rows that receive no entries are kept as empty rows.
/// Row groups are opened with [`new_row_group`](SparseMatrixBuilder::new_row_group);
/// if no group is ever opened the built matrix has one row per group.
///
/// ```no_run
/// use quantmc::algebra::SparseMatrixBuilder;
///
/// let mut builder = SparseMatrixBuilder::<f64>::new();
/// builder.new_row_group(0).unwrap();
/// builder.add_next_value(0, 0, 0.5).unwrap();
/// builder.add_next_value(0, 1, 0.5).unwrap();
/// builder.add_next_value(1, 1, 1.0).unwrap();
/// builder.new_row_group(2).unwrap();
/// builder.add_next_value(2, 1, 1.0).unwrap();
/// let A = builder.build(None, None).unwrap();
/// assert_eq!(A.row_group_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SparseMatrixBuilder<T> {
    rowptr: Vec<usize>,
    colval: Vec<usize>,
    nzval: Vec<T>,
    row_group_indices: Vec<usize>,
    // index of the row currently being filled, if any
    current_row: Option<usize>,
    max_col: Option<usize>,
}

impl<T> SparseMatrixBuilder<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            rowptr: vec![0],
            colval: Vec::new(),
            nzval: Vec::new(),
            row_group_indices: Vec::new(),
            current_row: None,
            max_col: None,
        }
    }

    /// Preallocates space for `rows` rows and `entries` nonzeros
    pub fn with_capacity(rows: usize, entries: usize) -> Self {
        let mut builder = Self::new();
        builder.rowptr.reserve(rows);
        builder.colval.reserve(entries);
        builder.nzval.reserve(entries);
        builder
    }

    /// Number of rows opened so far
    fn rows_started(&self) -> usize {
        self.rowptr.len() - 1
    }

    // close all rows strictly before `row`
    fn advance_to(&mut self, row: usize) {
        let nnz = self.colval.len();
        while self.rows_started() < row {
            self.rowptr.push(nnz);
        }
    }

    /// Appends the entry `value` at position (`row`,`col`).
    ///
    /// Returns an error if `row` precedes the row of a previously
    /// added entry.
    pub fn add_next_value(&mut self, row: usize, col: usize, value: T) -> Result<(), SparseFormatError> {
        if let Some(last) = self.current_row {
            if row < last {
                return Err(SparseFormatError::BadRowOrdering { row, last });
            }
        }
        // rowptr[r+1] is written when row r is closed, so rows
        // up to and including `row - 1` are closed here
        self.advance_to(row);
        self.current_row = Some(row);
        self.colval.push(col);
        self.nzval.push(value);
        self.max_col = Some(self.max_col.map_or(col, |c| c.max(col)));
        Ok(())
    }

    /// Opens a new row group whose first row is `start_row`.
    ///
    /// Group starts must be strictly increasing and may not precede
    /// the row of the most recently added entry.
    pub fn new_row_group(&mut self, start_row: usize) -> Result<(), SparseFormatError> {
        if let Some(&prev) = self.row_group_indices.last() {
            if start_row <= prev {
                return Err(SparseFormatError::BadRowGroups);
            }
        }
        if let Some(last) = self.current_row {
            if start_row <= last {
                return Err(SparseFormatError::BadRowOrdering { row: start_row, last });
            }
        }
        self.row_group_indices.push(start_row);
        Ok(())
    }

    /// Finalizes the matrix.
    ///
    /// The row and column counts are inferred from the entries and
    /// declared row groups, and may be enlarged (never shrunk) with the
    /// optional overrides.  The result is checked with
    /// [`check_format`](SparseMatrix::check_format).
    pub fn build(
        mut self,
        row_count: Option<usize>,
        column_count: Option<usize>,
    ) -> Result<SparseMatrix<T>, SparseFormatError> {
        let used_rows = self.current_row.map_or(0, |r| r + 1);
        let group_rows = self.row_group_indices.last().map_or(0, |&g| g + 1);
        let m = used_rows.max(group_rows).max(row_count.unwrap_or(0));
        let n = self.max_col.map_or(0, |c| c + 1).max(column_count.unwrap_or(0));

        // close the final row and any trailing empty rows
        self.advance_to(m);

        let mut groups = if self.row_group_indices.is_empty() {
            (0..m).collect::<Vec<usize>>()
        } else {
            self.row_group_indices
        };
        groups.push(m);

        let nnz = self.colval.len();
        if self.rowptr[m] != nnz {
            return Err(SparseFormatError::BadRowptr);
        }

        let out = SparseMatrix {
            m,
            n,
            rowptr: self.rowptr,
            colval: self.colval,
            nzval: self.nzval,
            row_group_indices: groups,
        };
        out.check_format()?;
        Ok(out)
    }
}
