use crate::algebra::*;

#[test]
fn test_copy_from() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![0.; 4];
    y.copy_from(&x);
    assert_eq!(x, y);
}

#[test]
fn test_scalarop() {
    let mut x = vec![3., 0., 2., 1.];
    x.scalarop(|x| -2. * x);
    assert_eq!(x, vec![-6., 0., -4., -2.]);
}

#[test]
fn test_set_scale_negate() {
    let mut x = [3., 0., 2., 1.];
    x.scale(3.);
    assert_eq!(x, [9., 0., 6., 3.]);
    x.negate();
    assert_eq!(x, [-9., 0., -6., -3.]);
    x.set(1.5);
    assert_eq!(x, [1.5; 4]);
}

#[test]
fn test_op_chaining() {
    let mut x = vec![1., 2., 3.];
    x.scale(2.).negate();
    assert_eq!(x, vec![-2., -4., -6.]);
}

#[test]
fn test_normalize() {
    let mut x = vec![3., 4.];
    let n = x.normalize();
    assert_eq!(n, 5.);
    assert!(x.norm_inf_diff(&[0.6, 0.8]) < 1e-15);

    let mut z = vec![0., 0.];
    assert_eq!(z.normalize(), 0.);
    assert_eq!(z, vec![0., 0.]);
}

#[test]
fn test_dot() {
    let x = vec![1., 2., 3., 4.];
    let y = vec![4., 5., 6., 7.];
    assert_eq!(x.dot(&y), 60.);
}

#[test]
fn test_sum_long() {
    let maxlen = 128 * 7 + 1; //awkward length to test base case
    let x: Vec<f64> = (1..=maxlen).map(|x| x as f64).collect();

    for i in 0..=x.len() {
        let z = &x[0..i];
        let sum1 = z.iter().fold(0.0, |acc, &z| acc + z);
        let sum2 = z.sum();
        assert_eq!(sum1, sum2);
    }
}

#[test]
fn test_dist() {
    let x = vec![1., 2., 3.];
    let y = vec![1., 0., 3.];
    assert_eq!(x.dist(&y), 2.);
}

#[test]
fn test_norms() {
    let x = vec![-3., 4., 0.];
    assert_eq!(x.sumsq(), 25.);
    assert_eq!(x.norm(), 5.);
    assert_eq!(x.norm_inf(), 4.);
    assert!([1., f64::NAN].norm_inf().is_nan());
}

#[test]
fn test_minimum_maximum() {
    let x = vec![3., -1., 7., 2.];
    assert_eq!(x.minimum(), -1.);
    assert_eq!(x.maximum(), 7.);
}

#[test]
fn test_is_finite() {
    assert!([1., 2.].is_finite());
    assert!(![1., f64::INFINITY].is_finite());
}

#[test]
fn test_axpby() {
    let x = vec![1., 2., 3.];
    let mut y = vec![4., 5., 6.];
    y.axpby(2., &x, 3.);
    assert_eq!(y, vec![14., 19., 24.]);
}

#[test]
fn test_add_vectors() {
    let mut y = vec![1., 2., 3.];
    add_vectors(&mut y, &[0.5, 0.5, 0.5]);
    assert_eq!(y, vec![1.5, 2.5, 3.5]);
}
