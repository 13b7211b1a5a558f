use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix assembly operations.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Row pointer values are decreasing or do not match the entry count
    #[error("Bad row pointer values")]
    BadRowptr,
    /// Column value exceeds the matrix column dimension
    #[error("Column value {col} in row {row} exceeds the matrix column dimension")]
    BadColval { row: usize, col: usize },
    /// The same column appears twice within one row
    #[error("Duplicate column {col} in row {row}")]
    DuplicateEntry { row: usize, col: usize },
    /// Row group indices are not strictly increasing from 0 to the row count
    #[error("Bad row group indices")]
    BadRowGroups,
    /// Entries were added out of row order during incremental construction
    #[error("Entry for row {row} added after row {last}")]
    BadRowOrdering { row: usize, last: usize },
}
