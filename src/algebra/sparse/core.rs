#![allow(non_snake_case)]

use crate::algebra::{FloatT, SparseFormatError};
use std::iter::zip;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Row-grouped sparse matrix in Compressed Sparse Row (CSR) format
///
/// Rows are partitioned into consecutive *row groups*.  For a model of
/// a Markov decision process, each group corresponds to one state and
/// each row within the group to one non-deterministic choice available
/// in that state.  A group containing a single row models a purely
/// stochastic state.
///
/// __Example usage__ : To construct a model with two states, the first
/// offering two choices and the second a single self loop
/// ```text
/// group 0 : row 0 = [0.5  0.5]
///           row 1 = [0.   1. ]
/// group 1 : row 2 = [0.   1. ]
/// ```
///
/// ```no_run
/// use quantmc::algebra::SparseMatrix;
///
/// let A : SparseMatrix<f64> = SparseMatrix::new(
///    3,                    // m
///    2,                    // n
///    vec![0, 2, 3, 4],     // rowptr
///    vec![0, 1, 1, 1],     // colval
///    vec![0.5, 0.5, 1., 1.], // nzval
///    vec![0, 2, 3],        // row_group_indices
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SparseMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer.
    ///
    /// This field should have length `m+1`. The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths
    /// of the `colval` and `nzval` fields.
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
    /// row group boundaries.  Group `g` is the row range
    /// `row_group_indices[g]..row_group_indices[g+1]`
    pub row_group_indices: Vec<usize>,
}

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// `SparseMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__ ensure that column
    /// indices are in bounds, that rows are free of duplicate columns
    /// or that row groups are strictly increasing.  Use
    /// [`check_format`](SparseMatrix::check_format) for that.
    ///
    pub fn new(
        m: usize,
        n: usize,
        rowptr: Vec<usize>,
        colval: Vec<usize>,
        nzval: Vec<T>,
        row_group_indices: Vec<usize>,
    ) -> Self {
        assert_eq!(colval.len(), nzval.len());
        assert_eq!(rowptr.len(), m + 1);
        assert_eq!(rowptr[m], colval.len());
        assert!(!row_group_indices.is_empty());
        assert_eq!(*row_group_indices.last().unwrap(), m);
        SparseMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
            row_group_indices,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements and
    /// trivial row grouping (one row per group)
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut rowptr = vec![0; m + 1];
        let colval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        rowptr[m] = nnz;

        SparseMatrix::new(m, n, rowptr, colval, nzval, (0usize..=m).collect())
    }

    /// Identity matrix of size `n` with trivial row grouping
    pub fn identity(n: usize) -> Self {
        let rowptr = (0usize..=n).collect();
        let colval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        SparseMatrix::new(n, n, rowptr, colval, nzval, (0usize..=n).collect())
    }

    /// number of rows (choices)
    pub fn row_count(&self) -> usize {
        self.m
    }

    /// number of columns (states)
    pub fn column_count(&self) -> usize {
        self.n
    }

    /// number of nonzeros
    pub fn nonzero_entry_count(&self) -> usize {
        self.rowptr[self.m]
    }

    /// number of row groups (states)
    pub fn row_group_count(&self) -> usize {
        self.row_group_indices.len() - 1
    }

    /// row group boundaries
    pub fn row_group_indices(&self) -> &[usize] {
        &self.row_group_indices
    }

    /// range of rows belonging to group `group`
    pub fn row_group(&self, group: usize) -> Range<usize> {
        self.row_group_indices[group]..self.row_group_indices[group + 1]
    }

    /// number of rows (choices) in group `group`
    pub fn row_group_size(&self, group: usize) -> usize {
        self.row_group_indices[group + 1] - self.row_group_indices[group]
    }

    /// True if every row group holds exactly one row
    pub fn has_trivial_row_grouping(&self) -> bool {
        self.row_group_count() == self.m
    }

    /// Iterator over the `(column, value)` entries of row `row`
    pub fn row(&self, row: usize) -> impl ExactSizeIterator<Item = (usize, T)> + '_ {
        let rng = self.rowptr[row]..self.rowptr[row + 1];
        zip(&self.colval[rng.clone()], &self.nzval[rng]).map(|(&c, &v)| (c, v))
    }

    /// Sum of the entries of every row
    pub fn row_sums(&self) -> Vec<T> {
        (0..self.m)
            .map(|r| self.nzval[self.rowptr[r]..self.rowptr[r + 1]].iter().fold(T::zero(), |acc, &v| acc + v))
            .collect()
    }

    /// True if every row is a (sub-)probability distribution, i.e. all
    /// entries are non-negative and every row sums to at most one
    /// (within `tol`).
    pub fn is_probabilistic(&self, tol: T) -> bool {
        self.nzval.iter().all(|&v| v >= -tol) && self.row_sums().iter().all(|&s| s <= T::one() + tol)
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.rowptr.is_empty()
            || (self.rowptr.len() - 1) != self.m
            || self.rowptr[self.m] != self.colval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr[0] != 0 || self.rowptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadRowptr);
        }

        //row groups : start at zero, strictly increasing, end at m
        let groups = &self.row_group_indices;
        if groups.is_empty()
            || groups[0] != 0
            || *groups.last().unwrap() != self.m
            || groups.windows(2).any(|g| g[0] >= g[1])
        {
            return Err(SparseFormatError::BadRowGroups);
        }

        //columns in bounds and unique within each row.  Columns
        //need not be sorted, so mark the last row that used each
        let mut last_seen = vec![usize::MAX; self.n];
        for row in 0..self.m {
            for &col in &self.colval[self.rowptr[row]..self.rowptr[row + 1]] {
                if col >= self.n {
                    return Err(SparseFormatError::BadColval { row, col });
                }
                if last_seen[col] == row {
                    return Err(SparseFormatError::DuplicateEntry { row, col });
                }
                last_seen[col] = row;
            }
        }

        Ok(())
    }

    /// Select one row from every row group.
    ///
    /// `choices[g]` is the offset of the selected row *within* group `g`.
    /// The result is a matrix with trivial row grouping whose row `g` is
    /// the selected row of group `g`, i.e. the transition matrix induced
    /// by a memoryless deterministic scheduler.
    ///
    /// # Panics
    /// Panics if `choices` does not have one entry per row group or an
    /// offset exceeds the size of its group.
    pub fn select_rows(&self, choices: &[usize]) -> Self {
        assert_eq!(choices.len(), self.row_group_count());

        let rows: Vec<usize> = zip(&self.row_group_indices, choices)
            .enumerate()
            .map(|(g, (&start, &c))| {
                assert!(c < self.row_group_size(g));
                start + c
            })
            .collect();

        let nnz = rows.iter().map(|&r| self.rowptr[r + 1] - self.rowptr[r]).sum();
        let mut out = SparseMatrix::spalloc(rows.len(), self.n, nnz);

        let mut ptr = 0;
        for (i, &r) in rows.iter().enumerate() {
            out.rowptr[i] = ptr;
            let rng = self.rowptr[r]..self.rowptr[r + 1];
            let len = rng.len();
            out.colval[ptr..ptr + len].copy_from_slice(&self.colval[rng.clone()]);
            out.nzval[ptr..ptr + len].copy_from_slice(&self.nzval[rng]);
            ptr += len;
        }
        out.rowptr[rows.len()] = ptr;
        out
    }

    /// Select one entry per row group from a vector indexed by rows.
    ///
    /// Companion of [`select_rows`](SparseMatrix::select_rows) for
    /// choice-indexed vectors such as rewards.
    pub fn select_row_values(&self, values: &[T], choices: &[usize]) -> Vec<T> {
        assert_eq!(values.len(), self.m);
        assert_eq!(choices.len(), self.row_group_count());
        zip(&self.row_group_indices, choices)
            .map(|(&start, &c)| values[start + c])
            .collect()
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.m && col < self.n);
        self.row(row).find(|&(c, _)| c == col).map(|(_, v)| v)
    }
}

#[test]
fn test_sparse_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅ ]
    //[1.0  5.0    ⋅ ]
    //[ ⋅    ⋅   6.0 ]
    // with rows 0,1 forming group 0

    let A = SparseMatrix::new(
        3,                         // m
        3,                         // n
        vec![0, 1, 3, 4],          // rowptr
        vec![1, 1, 0, 2],          // colval (unsorted in row 1)
        vec![4., 5., 1., 6.],      // nzval
        vec![0, 2, 3],             // row groups
    );

    assert!(A.check_format().is_ok());
    assert_eq!(A.get_entry((0, 1)).unwrap(), 4.);
    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((1, 1)).unwrap(), 5.);
    assert_eq!(A.get_entry((2, 2)).unwrap(), 6.);
    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((2, 1)).is_none());

    assert_eq!(A.row_group_count(), 2);
    assert_eq!(A.row_group_size(0), 2);
    assert_eq!(A.row_group(1), 2..3);
    assert!(!A.has_trivial_row_grouping());
}
