use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The closed halfspace `{ y : normal·y <= offset }`

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Halfspace<T> {
    pub normal: Vec<T>,
    pub offset: T,
}

impl<T> Halfspace<T>
where
    T: FloatT,
{
    pub fn new(normal: Vec<T>, offset: T) -> Self {
        Self { normal, offset }
    }

    pub fn dimension(&self) -> usize {
        self.normal.len()
    }

    /// `normal·y - offset`.  Positive values lie outside.
    pub fn violation(&self, y: &[T]) -> T {
        self.normal.dot(y) - self.offset
    }

    pub fn contains(&self, y: &[T], tol: T) -> bool {
        self.violation(y) <= tol
    }

    /// True if `y` lies on the bounding hyperplane
    pub fn on_boundary(&self, y: &[T], tol: T) -> bool {
        T::abs(self.violation(y)) <= tol
    }

    /// Euclidean distance of `y` to the bounding hyperplane, signed
    /// positive outside
    pub fn signed_distance(&self, y: &[T]) -> T {
        self.violation(y) / self.normal.norm()
    }

    /// Same halfspace with a unit normal.  A zero normal is left as is.
    pub fn normalized(mut self) -> Self {
        let norm = self.normal.normalize();
        if norm > T::zero() {
            self.offset /= norm;
        }
        self
    }

    /// The complementary (closed) halfspace `normal·y >= offset`
    pub fn invert(&self) -> Self {
        let mut normal = self.normal.clone();
        normal.negate();
        Self::new(normal, -self.offset)
    }

    /// True if both halfspaces have unit normals and offsets agreeing to `tol`
    pub(crate) fn approx_eq(&self, other: &Self, tol: T) -> bool {
        self.normal.norm_inf_diff(&other.normal) <= tol && T::abs(self.offset - other.offset) <= tol
    }
}

#[test]
fn test_halfspace() {
    let h = Halfspace::new(vec![3.0, 4.0], 10.0);
    assert!(h.contains(&[0.0, 0.0], 0.0));
    assert!(h.on_boundary(&[2.0, 1.0], 1e-12));
    assert!(!h.contains(&[2.0, 2.0], 1e-12));
    assert_eq!(h.signed_distance(&[2.0, 2.0]), 0.8);

    let n = h.clone().normalized();
    assert!(n.normal.norm_inf_diff(&[0.6, 0.8]) < 1e-15);
    assert_eq!(n.offset, 2.0);

    let inv = h.invert();
    assert!(inv.contains(&[2.0, 2.0], 0.0));
    assert!(!inv.contains(&[0.0, 0.0], 0.0));
}
