use crate::algebra::*;
use crate::solver::OptimizationDirection;
use std::iter::zip;

impl<T: FloatT> MatrixVectorMultiply for SparseMatrix<T> {
    type T = T;

    /// Computes `result[r] = Σ A[r,c]*x[c]` for every row `r`.
    ///
    /// # Panics
    /// Panics if `x` is shorter than the column count or `result` is
    /// shorter than the row count.
    fn multiply_with_vector(&self, x: &[T], result: &mut [T]) {
        assert!(x.len() >= self.n);
        assert!(result.len() >= self.m);

        for (r, out) in result.iter_mut().take(self.m).enumerate() {
            let rng = self.rowptr[r]..self.rowptr[r + 1];
            *out = zip(&self.colval[rng.clone()], &self.nzval[rng])
                .fold(T::zero(), |acc, (&c, &v)| acc + v * x[c]);
        }
    }
}

/// Collapses every row group of `source` to a single value.
///
/// For group `g`, `target[g]` receives the minimum or maximum (as given
/// by `direction`) of `source[row_group_indices[g]..row_group_indices[g+1]]`.
/// If `choices` is provided, `choices[g]` receives the offset within the
/// group of the first row attaining the optimum.
///
/// # Panics
/// Panics if the vector lengths do not agree with the row grouping.
pub fn reduce_row_groups<T: FloatT>(
    direction: OptimizationDirection,
    source: &[T],
    row_group_indices: &[usize],
    target: &mut [T],
    mut choices: Option<&mut [usize]>,
) {
    let ngroups = row_group_indices.len() - 1;
    assert!(target.len() >= ngroups);
    assert!(source.len() >= row_group_indices[ngroups]);
    if let Some(ref ch) = choices {
        assert!(ch.len() >= ngroups);
    }

    for (g, (out, bounds)) in zip(target.iter_mut(), row_group_indices.windows(2)).enumerate() {
        let values = &source[bounds[0]..bounds[1]];
        let mut best = values[0];
        let mut best_idx = 0;
        for (i, &v) in values.iter().enumerate().skip(1) {
            if direction.improves(v, best) {
                best = v;
                best_idx = i;
            }
        }
        *out = best;
        if let Some(ref mut ch) = choices {
            ch[g] = best_idx;
        }
    }
}

/// Tests whether `x` and `y` agree up to `precision` in every coordinate.
///
/// With `relative` set, coordinate `i` is compared by `|x[i]-y[i]|/|y[i]|`,
/// falling back to `|x[i]| <= precision` when `y[i]` is zero.  Otherwise
/// the absolute difference `|x[i]-y[i]|` is used.
pub fn equal_modulo_precision<T: FloatT>(x: &[T], y: &[T], precision: T, relative: bool) -> bool {
    assert_eq!(x.len(), y.len());
    zip(x, y).all(|(&a, &b)| {
        if relative {
            if b == T::zero() {
                T::abs(a) <= precision
            } else {
                T::abs((a - b) / b) <= precision
            }
        } else {
            T::abs(a - b) <= precision
        }
    })
}

/// Largest coordinatewise difference between `x` and `y` under the given
/// comparison mode.  Used for progress reporting only.
pub fn max_difference<T: FloatT>(x: &[T], y: &[T], relative: bool) -> T {
    zip(x, y).fold(T::zero(), |acc, (&a, &b)| {
        let d = if relative && b != T::zero() {
            T::abs((a - b) / b)
        } else {
            T::abs(a - b)
        };
        T::max(acc, d)
    })
}

/// `y += b` elementwise
pub fn add_vectors<T: FloatT>(y: &mut [T], b: &[T]) {
    assert!(y.len() >= b.len());
    zip(y, b).for_each(|(y, &b)| *y += b);
}
