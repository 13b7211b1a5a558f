use super::linalg::*;
use super::Halfspace;
use crate::algebra::*;
use itertools::Itertools;

/// Orthonormal coordinate system of the affine hull of a point set
#[derive(Debug, Clone)]
pub(crate) struct AffineFrame<T> {
    pub origin: Vec<T>,
    pub basis: Vec<Vec<T>>,
}

impl<T> AffineFrame<T>
where
    T: FloatT,
{
    /// # Panics
    /// Panics if `points` is empty.
    pub fn new(points: &[Vec<T>], tol: T) -> Self {
        let origin = points[0].clone();
        let dim = origin.len();
        let mut basis = Vec::new();
        for p in &points[1..] {
            if basis.len() == dim {
                break;
            }
            extend_basis(&mut basis, &sub(p, &origin), tol);
        }
        Self { origin, basis }
    }

    /// Dimension of the affine hull
    pub fn rank(&self) -> usize {
        self.basis.len()
    }

    /// Coordinates of `p` in the frame
    pub fn project(&self, p: &[T]) -> Vec<T> {
        let d = sub(p, &self.origin);
        self.basis.iter().map(|b| b.dot(&d)).collect()
    }

    /// Maps a halfspace in frame coordinates back to ambient space
    pub fn lift_halfspace(&self, h: &Halfspace<T>) -> Halfspace<T> {
        let mut normal = vec![T::zero(); self.origin.len()];
        for (b, &c) in self.basis.iter().zip(&h.normal) {
            normal.axpby(c, b, T::one());
        }
        let offset = h.offset + normal.dot(&self.origin);
        Halfspace::new(normal, offset)
    }

    /// Pairs of opposing halfspaces pinning ambient points to the affine hull
    pub fn equality_halfspaces(&self) -> Vec<Halfspace<T>> {
        complement_basis(&self.basis, self.origin.len())
            .into_iter()
            .flat_map(|u| {
                let offset = u.dot(&self.origin);
                let h = Halfspace::new(u, offset);
                let inv = h.invert();
                [h, inv]
            })
            .collect()
    }
}

/// Removes points within `tol` (max norm) of an earlier point
pub(crate) fn dedup_points<T: FloatT>(points: Vec<Vec<T>>, tol: T) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = Vec::with_capacity(points.len());
    for p in points {
        if !out.iter().any(|q| q.norm_inf_diff(&p) <= tol) {
            out.push(p);
        }
    }
    out
}

/// Facets of the hull of a point set spanning its whole space, by
/// testing the hyperplane through every affinely independent subset
/// of `r` points.  Normals have unit length.
pub(crate) fn facets_full_dimensional<T: FloatT>(points: &[Vec<T>], tol: T) -> Vec<Halfspace<T>> {
    let r = points[0].len();
    let mut facets: Vec<Halfspace<T>> = Vec::new();

    for combo in (0..points.len()).combinations(r) {
        let base = &points[combo[0]];
        let spans: Vec<Vec<T>> = combo[1..].iter().map(|&i| sub(&points[i], base)).collect();
        let Some(normal) = normal_vector(&spans, r, tol) else {
            continue;
        };
        let offset = normal.dot(base);
        let h = Halfspace::new(normal, offset);

        let (mut above, mut below) = (false, false);
        for p in points {
            let s = h.violation(p);
            above |= s > tol;
            below |= s < -tol;
            if above && below {
                break;
            }
        }
        if above && below {
            continue;
        }
        let h = if above { h.invert() } else { h };
        if !facets.iter().any(|f| f.approx_eq(&h, tol)) {
            facets.push(h);
        }
    }
    facets
}

#[derive(Debug, Clone)]
pub(crate) struct Hull<T> {
    pub halfspaces: Vec<Halfspace<T>>,
    pub vertices: Vec<Vec<T>>,
}

/// H- and V-representation of the convex hull of `points` in `dim`
/// dimensions.  Lower dimensional hulls are described by their facets
/// within the affine hull plus equality constraints.
pub(crate) fn convex_hull<T: FloatT>(dim: usize, points: Vec<Vec<T>>, tol: T) -> Hull<T> {
    let points = dedup_points(points, tol);
    if points.is_empty() {
        return Hull {
            halfspaces: Vec::new(),
            vertices: Vec::new(),
        };
    }
    debug_assert!(points.iter().all(|p| p.len() == dim));

    let frame = AffineFrame::new(&points, tol);
    let r = frame.rank();

    if r == 0 {
        return Hull {
            halfspaces: frame.equality_halfspaces(),
            vertices: points,
        };
    }

    let projected: Vec<Vec<T>> = points.iter().map(|p| frame.project(p)).collect();
    let facets = facets_full_dimensional(&projected, tol);

    // a point is a vertex if its active facet normals span the frame
    let vertices = points
        .iter()
        .zip(&projected)
        .filter(|(_, z)| {
            let active: Vec<Vec<T>> = facets
                .iter()
                .filter(|f| f.on_boundary(z, tol))
                .map(|f| f.normal.clone())
                .collect();
            orthonormal_basis(&active, tol).len() == r
        })
        .map(|(p, _)| p.clone())
        .collect();

    let mut halfspaces: Vec<Halfspace<T>> = facets
        .iter()
        .map(|f| frame.lift_halfspace(f))
        .collect();
    halfspaces.extend(frame.equality_halfspaces());

    Hull {
        halfspaces,
        vertices,
    }
}

/// Volume of the convex hull of `points` in their own ambient space.
/// Zero if the hull is lower dimensional.
pub(crate) fn volume<T: FloatT>(points: &[Vec<T>], tol: T) -> T {
    if points.is_empty() {
        return T::zero();
    }
    let k = points[0].len();
    if k == 0 {
        return T::one();
    }
    let points = dedup_points(points.to_vec(), tol);
    if AffineFrame::new(&points, tol).rank() < k {
        return T::zero();
    }
    if k == 1 {
        let values: Vec<T> = points.iter().map(|p| p[0]).collect();
        return values.maximum() - values.minimum();
    }

    // pyramids over every facet with a common interior apex
    let apex = centroid(&points);
    let mut total = T::zero();
    for facet in facets_full_dimensional(&points, tol) {
        let height = facet.offset - facet.normal.dot(&apex);
        let face: Vec<Vec<T>> = points
            .iter()
            .filter(|p| facet.on_boundary(p, tol))
            .cloned()
            .collect();
        let frame = AffineFrame::new(&face, tol);
        if frame.rank() + 1 < k {
            continue;
        }
        let projected: Vec<Vec<T>> = face.iter().map(|p| frame.project(p)).collect();
        total += height * volume(&projected, tol);
    }
    let k: T = k.as_T();
    total / k
}
