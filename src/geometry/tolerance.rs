use crate::algebra::{AsFloatT, FloatT};
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicU64, Ordering};

const _TOLERANCE_DEFAULT: f64 = 1e-9;

// f64 stored through its bit pattern
#[derive(Debug)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }
    fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.0.load(order))
    }
    fn store(&self, v: f64, order: Ordering) {
        self.0.store(v.to_bits(), order)
    }
}

lazy_static! {
    static ref TOLERANCE: AtomicF64 = AtomicF64::new(_TOLERANCE_DEFAULT);
}

/// Revert the geometric tolerance to its default value.
pub fn default_tolerance() {
    TOLERANCE.store(_TOLERANCE_DEFAULT, Ordering::Relaxed);
}

/// Set the absolute tolerance used by all polytope operations when
/// deciding whether a point lies on, inside or outside a halfspace.
pub fn set_tolerance(v: f64) {
    assert!(v >= 0.0, "geometric tolerance must be non-negative");
    TOLERANCE.store(v, Ordering::Relaxed);
}

/// Current geometric tolerance.
pub fn get_tolerance<T: FloatT>() -> T {
    TOLERANCE.load(Ordering::Relaxed).as_T()
}
