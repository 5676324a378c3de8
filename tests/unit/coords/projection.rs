use super::*;

#[test]
fn extent_is_anchored_at_origin() {
    let e = Extent::from_image(6623.0, 9362.0);
    assert_eq!(e.to_array(), [0.0, 0.0, 6623.0, 9362.0]);
    assert_eq!(e.width(), 6623.0);
    assert_eq!(e.height(), 9362.0);
    assert_eq!(e.center(), Point::new(3311.5, 4681.0));
}

#[test]
fn normalize_flips_vertically() {
    let proj = PixelProjection::new(Extent::from_image(6623.0, 9362.0));
    assert_eq!(
        proj.normalize(RoutePoint::new(4268.0, 8215.0)),
        Point::new(4268.0, 9362.0 - 8215.0)
    );
}

#[test]
fn normalize_does_not_range_check() {
    let proj = PixelProjection::new(Extent::from_image(100.0, 50.0));
    assert_eq!(
        proj.normalize(RoutePoint::new(-10.0, 80.0)),
        Point::new(-10.0, -30.0)
    );
}

#[test]
fn flip_applied_twice_is_identity() {
    for &(x, y) in &[(0.0, 0.0), (10.0, 10.0), (4268.0, 8215.0), (-3.5, 12000.25)] {
        let p = Point::new(x, y);
        assert_eq!(flip_y(flip_y(p, 9362.0), 9362.0), p);
    }

    let proj = PixelProjection::new(Extent::from_image(640.0, 480.0));
    let original = RoutePoint::new(12.0, 400.0);
    assert_eq!(proj.denormalize(proj.normalize(original)), original);
}

#[test]
fn projection_codes_are_unique_per_instance() {
    let a = PixelProjection::new(Extent::from_image(10.0, 10.0));
    let b = PixelProjection::new(Extent::from_image(10.0, 10.0));
    assert_ne!(a.code(), b.code());
    assert!(a.code().starts_with("static-image-10x10-"));
    assert_eq!(a.units(), Units::Pixels);
}

#[test]
fn normalize_path_preserves_order() {
    let proj = PixelProjection::new(Extent::from_image(100.0, 100.0));
    let pts = proj.normalize_path(&[RoutePoint::new(1.0, 2.0), RoutePoint::new(3.0, 4.0)]);
    assert_eq!(pts, vec![Point::new(1.0, 98.0), Point::new(3.0, 96.0)]);
}
