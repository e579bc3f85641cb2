use blockface_geom::{Aabb, FrontFace, Vec3};
use proptest::prelude::*;

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e3f32..1.0e3
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

#[test]
fn axis_constants_are_orthonormal() {
    assert!(approx_eq(Vec3::X.length(), 1.0, 1e-6));
    assert!(approx_eq(Vec3::X.dot(Vec3::Y), 0.0, 1e-6));
    assert!(vec3_approx_eq(Vec3::X.cross(Vec3::Y), Vec3::Z, 1e-6));
    assert!(vec3_approx_eq(Vec3::Y.cross(Vec3::Z), Vec3::X, 1e-6));
    assert!(vec3_approx_eq(Vec3::Z.cross(Vec3::X), Vec3::Y, 1e-6));
}

#[test]
fn from_slice_reads_three_floats() {
    let buf = [9.0, 1.0, 2.0, 3.0, 7.0];
    assert_eq!(Vec3::from_slice(&buf[1..]), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(Vec3::new(1.0, 2.0, 3.0).to_array(), [1.0, 2.0, 3.0]);
}

#[test]
fn aabb_union_and_size() {
    let a = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    let b = Aabb::new(Vec3::new(2.0, -1.0, 0.5), Vec3::new(3.0, 0.0, 4.0));
    let u = a.union(b);
    assert_eq!(u.min, Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(u.max, Vec3::new(3.0, 1.0, 4.0));
    assert!(vec3_approx_eq(u.size(), Vec3::new(3.0, 2.0, 4.0), 1e-6));
    assert!(u.contains(Vec3::new(2.5, -0.5, 3.0)));
    assert!(!u.contains(Vec3::new(3.5, 0.0, 0.0)));
}

#[test]
fn triangle_normal_flips_with_convention() {
    let a = Vec3::new(0.0, 1.0, 0.0);
    let b = Vec3::new(0.0, 1.0, 1.0);
    let c = Vec3::new(1.0, 1.0, 0.0);
    let ccw = FrontFace::CounterClockwise.triangle_normal(a, b, c);
    let cw = FrontFace::Clockwise.triangle_normal(a, b, c);
    assert!(ccw.dot(Vec3::Y) > 0.0);
    assert!(cw.dot(Vec3::Y) < 0.0);
}

proptest! {
    // Cross product is orthogonal to both inputs
    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * b.length() * (a.length() + b.length()) + 1.0;
        prop_assert!(a.dot(c).abs() <= 1e-4 * scale);
        prop_assert!(b.dot(c).abs() <= 1e-4 * scale);
    }

    // Swapping two triangle vertices flips the normal
    #[test]
    fn triangle_normal_antisymmetric(a in arb_vec3(), b in arb_vec3(), c in arb_vec3()) {
        let n1 = FrontFace::CounterClockwise.triangle_normal(a, b, c);
        let n2 = FrontFace::CounterClockwise.triangle_normal(a, c, b);
        let tol = 1e-2 * (n1.length() + 1.0);
        prop_assert!(vec3_approx_eq(n1, -n2, tol));
    }
}
