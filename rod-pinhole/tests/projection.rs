use approx::assert_relative_eq;
use proptest::prelude::*;
use rod_core::nalgebra::{Matrix3x4, Point2, Point3};
use rod_core::{Projection, Segment};
use rod_pinhole::{project, ProjectionMatrix};

const EPSILON_APPROX: f64 = 1e-9;

/// The second camera sits at `(5, 0, 5)` looking down the negative X axis.
#[rustfmt::skip]
fn side_camera() -> ProjectionMatrix {
    ProjectionMatrix::new(Matrix3x4::new(
        0.0, 0.0, 1.0, -5.0,
        0.0, 1.0, 0.0, 0.0,
        -1.0, 0.0, 0.0, 5.0,
    ))
}

#[test]
fn side_camera_sees_depth_as_horizontal() {
    let camera = side_camera();
    // (x, y, z) -> (z - 5, y, 5 - x)
    let image = camera.project(Point3::new(1.0, 2.0, 4.0)).unwrap();
    assert_relative_eq!(image, Point2::new(-0.25, 0.5), epsilon = EPSILON_APPROX);
}

#[test]
fn zero_depth_has_no_image() {
    assert!(side_camera().project(Point3::new(5.0, 1.0, 1.0)).is_none());
    let segment = Segment::new(Point3::new(0.0, 0.0, 4.0), Point3::new(0.0, 1.0, 0.0));
    assert!(ProjectionMatrix::identity()
        .project_segment(segment)
        .is_none());
}

#[test]
fn reference_projects_like_owned() {
    let camera = side_camera();
    let point = Point3::new(0.5, -0.5, 3.0);
    assert_eq!((&camera).project(point), camera.project(point));
}

#[test]
fn invariant_to_positive_scaling() {
    proptest!(|(
        x in -10.0..10.0f64,
        y in -10.0..10.0f64,
        z in 0.1..20.0f64,
        factor in 0.01..100.0f64
    )| {
        for camera in [ProjectionMatrix::identity(), side_camera()] {
            let point = Point3::new(x, y, z);
            let scaled = camera.scaled(factor);
            match (project(point, &camera), project(point, &scaled)) {
                (Some(a), Some(b)) => {
                    prop_assert!((a - b).norm() <= 1e-9 * (1.0 + a.coords.norm()));
                }
                (None, None) => {}
                _ => prop_assert!(false, "scaling changed whether {} is visible", point),
            }
        }
    });
}

#[test]
fn doubling_the_matrix() {
    let camera = side_camera();
    let point = Point3::new(-1.0, 0.25, 2.5);
    assert_relative_eq!(
        project(point, &camera).unwrap(),
        project(point, &camera.scaled(2.0)).unwrap(),
        epsilon = EPSILON_APPROX
    );
}
