#![allow(non_snake_case)]
use crate::geometry::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_box_representation() {
    let P = Polytope::from_box(&[0.0, -1.0], &[2.0, 1.0]);
    assert_eq!(P.dimension(), 2);
    assert_eq!(P.vertices().len(), 4);
    assert_eq!(P.halfspaces().len(), 4);
    assert!(close(P.measure(), 4.0));
    assert!(P.contains(&[1.0, 0.0]));
    assert!(P.contains(&[2.0, 1.0]));
    assert!(!P.contains(&[2.5, 0.0]));
    assert_eq!(P.support(&[1.0, 1.0]), Some(3.0));
    assert_eq!(P.maximizer(&[1.0, 1.0]), Some(vec![2.0, 1.0]));

    let E = Polytope::from_box(&[1.0, 0.0], &[0.0, 1.0]);
    assert!(E.is_empty());
    assert!(!E.contains(&[0.5, 0.5]));
    assert_eq!(E.support(&[1.0, 0.0]), None);
    assert_eq!(E.measure(), 0.0);
}

#[test]
fn test_degenerate_box() {
    // a segment embedded in 3d
    let P = Polytope::from_box(&[0.0, 0.0, 1.0], &[1.0, 0.0, 1.0]);
    assert_eq!(P.vertices().len(), 2);
    assert_eq!(P.affine_dimension(), Some(1));
    assert_eq!(P.measure(), 0.0);
    assert!(P.contains(&[0.5, 0.0, 1.0]));
    assert!(!P.contains(&[0.5, 0.1, 1.0]));
}

#[test]
fn test_intersect_halfspace() {
    let P = Polytope::from_box(&[0.0, 0.0], &[1.0, 1.0]);

    // cut off the upper right corner
    let Q = P.intersect_halfspace(&Halfspace::new(vec![1.0, 1.0], 1.5));
    assert_eq!(Q.vertices().len(), 5);
    assert!(close(Q.measure(), 0.875));
    assert!(!Q.contains(&[1.0, 1.0]));
    assert!(Q.contains(&[1.0, 0.5]));
    assert!(close(Q.support(&[1.0, 1.0]).unwrap(), 1.5));

    // a redundant halfspace changes nothing
    let R = Q.intersect_halfspace(&Halfspace::new(vec![1.0, 0.0], 5.0));
    assert_eq!(R.vertices().len(), 5);
    assert!(close(R.measure(), 0.875));

    // touching in a single vertex
    let S = P.intersect_halfspace(&Halfspace::new(vec![1.0, 1.0], 0.0));
    assert_eq!(S.vertices(), &[vec![0.0, 0.0]]);
    assert_eq!(S.measure(), 0.0);

    let N = P.intersect_halfspace(&Halfspace::new(vec![1.0, 1.0], -1.0));
    assert!(N.is_empty());
}

#[test]
fn test_intersection_measure_is_monotone() {
    let mut P = Polytope::from_box(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
    let mut last = P.measure();
    assert!(close(last, 1.0));

    let cuts = [
        (vec![1.0, 1.0, 1.0], 2.5),
        (vec![1.0, 0.0, 2.0], 2.0),
        (vec![0.0, 3.0, 1.0], 3.0),
    ];
    for (normal, offset) in cuts {
        P = P.intersect_halfspace(&Halfspace::new(normal, offset));
        let m = P.measure();
        assert!(m <= last + 1e-12);
        last = m;
    }
    // the first cut alone removes a corner simplex of volume 1/48
    let Q = Polytope::from_box(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0])
        .intersect_halfspace(&Halfspace::new(vec![1.0, 1.0, 1.0], 2.5));
    assert!(close(Q.measure(), 1.0 - 1.0 / 48.0));
}

#[test]
fn test_convex_union_points() {
    let P = Polytope::from_points(2, &[vec![0.0, 0.0]]);
    assert_eq!(P.measure(), 0.0);
    assert!(P.contains(&[0.0, 0.0]));

    let P = P.convex_union_points(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert!(close(P.measure(), 0.5));
    assert!(P.contains(&[0.25, 0.25]));
    assert!(!P.contains(&[0.75, 0.75]));

    let P = P.convex_union_points(&[vec![1.0, 1.0], vec![0.5, 0.5]]);
    assert_eq!(P.vertices().len(), 4);
    assert!(close(P.measure(), 1.0));
}

#[test]
fn test_tolerance_setting() {
    assert_eq!(get_tolerance::<f64>(), 1e-9);
    set_tolerance(1e-6);
    assert_eq!(get_tolerance::<f64>(), 1e-6);
    default_tolerance();
    assert_eq!(get_tolerance::<f64>(), 1e-9);
}
