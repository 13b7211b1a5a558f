// Small dense helpers on lists of coordinate vectors.

use crate::algebra::*;

/// `a - b`
pub(crate) fn sub<T: FloatT>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().zip(b).map(|(&a, &b)| a - b).collect()
}

/// Unit coordinate vector `e_i` in `dim` dimensions
pub(crate) fn unit_vector<T: FloatT>(dim: usize, i: usize) -> Vec<T> {
    let mut e = vec![T::zero(); dim];
    e[i] = T::one();
    e
}

// removes the components of `v` along the orthonormal `basis`
fn residual<T: FloatT>(v: &[T], basis: &[Vec<T>]) -> Vec<T> {
    let mut r = v.to_vec();
    for b in basis {
        let c = r.dot(b);
        r.axpby(-c, b, T::one());
    }
    r
}

/// Extends the orthonormal `basis` by the normalized residual of `v`,
/// returning false if that residual is below `tol`.
pub(crate) fn extend_basis<T: FloatT>(basis: &mut Vec<Vec<T>>, v: &[T], tol: T) -> bool {
    // reorthogonalize once for numerical stability
    let mut r = residual(v, basis);
    r = residual(&r, basis);
    if r.normalize() <= tol {
        return false;
    }
    basis.push(r);
    true
}

/// Orthonormal basis of the span of `vectors`
pub(crate) fn orthonormal_basis<T: FloatT>(vectors: &[Vec<T>], tol: T) -> Vec<Vec<T>> {
    let mut basis = Vec::new();
    for v in vectors {
        extend_basis(&mut basis, v, tol);
    }
    basis
}

/// Orthonormal basis of the complement of the span of the orthonormal
/// `basis` in `dim` dimensions.
pub(crate) fn complement_basis<T: FloatT>(basis: &[Vec<T>], dim: usize) -> Vec<Vec<T>> {
    let mut all = basis.to_vec();
    let mut out = Vec::new();
    while all.len() < dim {
        // unit vector furthest from the current span
        let best = (0..dim)
            .map(|i| residual(&unit_vector(dim, i), &all))
            .max_by(|a, b| a.norm().partial_cmp(&b.norm()).unwrap_or(std::cmp::Ordering::Equal));
        let Some(mut r) = best else { break };
        r.normalize();
        all.push(r.clone());
        out.push(r);
    }
    out
}

/// Unit normal of the hyperplane through the origin spanned by the
/// `dim - 1` vectors in `vectors`, or `None` if they are dependent.
pub(crate) fn normal_vector<T: FloatT>(vectors: &[Vec<T>], dim: usize, tol: T) -> Option<Vec<T>> {
    debug_assert_eq!(vectors.len() + 1, dim);
    let basis = orthonormal_basis(vectors, tol);
    if basis.len() != vectors.len() {
        return None;
    }
    complement_basis(&basis, dim).into_iter().next()
}

/// Coordinate-wise mean of a non-empty point list
pub(crate) fn centroid<T: FloatT>(points: &[Vec<T>]) -> Vec<T> {
    let mut c = vec![T::zero(); points[0].len()];
    for p in points {
        add_vectors(&mut c, p);
    }
    let n: T = points.len().as_T();
    c.scale(n.recip());
    c
}
