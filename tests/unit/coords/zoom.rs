use super::*;

#[test]
fn min_zoom_fits_large_image_into_small_container() {
    let z = min_zoom(Size::new(662.3, 1000.0), 6623.0, 9362.0);
    assert!((z - (0.1f64).log2()).abs() < 1e-12);
}

#[test]
fn min_zoom_never_exceeds_zero() {
    assert_eq!(min_zoom(Size::new(4000.0, 4000.0), 100.0, 100.0), 0.0);
    for &(cw, ch) in &[(1.0, 1.0), (320.0, 240.0), (1920.0, 1080.0), (0.0, 0.0), (1e6, 3.0)] {
        for &(iw, ih) in &[(1.0, 1.0), (6623.0, 9362.0), (50.0, 5000.0)] {
            let z = min_zoom(Size::new(cw, ch), iw, ih);
            assert!(z <= 0.0, "min_zoom({cw},{ch},{iw},{ih}) = {z}");
            let range = ZoomRange::from_min(z);
            assert_eq!(range.max, z + 8.0);
        }
    }
}

#[test]
fn zero_sized_container_falls_back_to_image_size() {
    assert_eq!(min_zoom(Size::ZERO, 6623.0, 9362.0), 0.0);
    let z = min_zoom(Size::new(0.0, 936.2), 6623.0, 9362.0);
    assert!((z - (0.1f64).log2()).abs() < 1e-12);
}

#[test]
fn degenerate_ratio_degrades_to_zero() {
    assert_eq!(min_zoom(Size::new(100.0, 100.0), 0.0, 0.0), 0.0);
    assert_eq!(min_zoom(Size::new(f64::NAN, f64::NAN), f64::NAN, 10.0), 0.0);
    assert_eq!(min_zoom(Size::new(100.0, 100.0), f64::INFINITY, 10.0), 0.0);
}

#[test]
fn resolution_and_zoom_are_inverse() {
    for z in [-3.5, -1.0, 0.0, 2.0, 7.25] {
        let r = resolution_for_zoom(z);
        assert!((zoom_for_resolution(r) - z).abs() < 1e-12);
    }
    assert_eq!(resolution_for_zoom(0.0), 1.0);
    assert_eq!(resolution_for_zoom(-1.0), 2.0);
}

#[test]
fn range_clamps_resolution() {
    let range = ZoomRange::from_min(-2.0);
    assert_eq!(range.max_resolution(), 4.0);
    assert_eq!(range.min_resolution(), 1.0 / 64.0);
    assert_eq!(range.clamp_resolution(100.0), 4.0);
    assert_eq!(range.clamp_resolution(0.0), 1.0 / 64.0);
    assert_eq!(range.clamp(10.0), 6.0);
}
