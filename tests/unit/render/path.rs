use kurbo::Point;

use super::*;
use crate::coords::projection::Extent;
use crate::render::feature::FeatureKind;

fn renderer(indicator: Indicator) -> PathRenderer {
    PathRenderer::new(
        PixelProjection::new(Extent::from_image(1000.0, 1000.0)),
        indicator,
    )
}

fn straight(length: f64) -> RouteLine {
    RouteLine::new(vec![Point::new(0.0, 0.0), Point::new(length, 0.0)])
}

#[test]
fn arrow_count_is_floor_of_length_over_spacing() {
    for &(length, spacing) in &[(100.0, 30.0), (100.0, 7.0), (250.0, 60.0), (10.0, 3.3)] {
        let arrows = place_arrows(&straight(length), spacing);
        assert_eq!(
            arrows.len(),
            (length / spacing).floor() as usize,
            "length {length} spacing {spacing}"
        );
    }
}

#[test]
fn spacing_longer_than_line_places_single_midpoint_arrow() {
    let arrows = place_arrows(&straight(100.0), 150.0);
    assert_eq!(arrows.len(), 1);
    assert_eq!(arrows[0].position(), Some(Point::new(50.0, 0.0)));

    // spacing equal to the length has no interior sample either
    assert_eq!(place_arrows(&straight(100.0), 100.0).len(), 1);
}

#[test]
fn degenerate_inputs_place_no_arrows() {
    assert!(place_arrows(&straight(100.0), 0.0).is_empty());
    assert!(place_arrows(&straight(100.0), -5.0).is_empty());
    assert!(place_arrows(&straight(100.0), f64::NAN).is_empty());
    assert!(place_arrows(&straight(0.0), 10.0).is_empty());
    assert!(place_arrows(&RouteLine::default(), 10.0).is_empty());
}

#[test]
fn arrows_sit_on_the_line_with_heading() {
    let arrows = place_arrows(&straight(100.0), 30.0);
    for (i, arrow) in arrows.iter().enumerate() {
        let RenderedFeature::Arrow { at, rotation } = *arrow else {
            panic!("expected arrow");
        };
        assert!((at.x - 30.0 * (i as f64 + 1.0)).abs() < 1e-9);
        assert_eq!(at.y, 0.0);
        assert!(rotation.abs() < 1e-9);
    }
}

#[test]
fn draw_builds_route_start_end_and_arrows() {
    let r = renderer(Indicator::Arrows { spacing: 40.0 });
    let mut source = FeatureSource::new();
    let path = [
        RoutePoint::new(0.0, 1000.0),
        RoutePoint::new(100.0, 1000.0),
    ];
    let line = r.draw(&path, &mut source).unwrap();
    assert_eq!(line.points(), &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    assert_eq!(source.count(FeatureKind::Route), 1);
    assert_eq!(source.count(FeatureKind::Start), 1);
    assert_eq!(source.count(FeatureKind::End), 1);
    assert_eq!(source.count(FeatureKind::Arrow), 2);
    assert_eq!(source.count(FeatureKind::Owner), 0);
}

#[test]
fn draw_in_marker_mode_places_owner_at_start() {
    let r = renderer(Indicator::MovingMarker);
    let mut source = FeatureSource::new();
    r.draw(
        &[RoutePoint::new(5.0, 5.0), RoutePoint::new(50.0, 5.0)],
        &mut source,
    )
    .unwrap();
    assert_eq!(source.count(FeatureKind::Arrow), 0);
    let owner = source
        .features()
        .iter()
        .find(|f| f.kind() == FeatureKind::Owner)
        .unwrap();
    assert_eq!(owner.position(), Some(Point::new(5.0, 995.0)));
}

#[test]
fn single_point_path_places_coincident_start_and_end() {
    let r = renderer(Indicator::Arrows { spacing: 40.0 });
    let mut source = FeatureSource::new();
    let line = r.draw(&[RoutePoint::new(10.0, 10.0)], &mut source).unwrap();
    assert_eq!(line.length(), 0.0);
    assert_eq!(source.len(), 3);
    assert_eq!(source.features()[1].position(), Some(Point::new(10.0, 990.0)));
    assert_eq!(source.features()[2].position(), Some(Point::new(10.0, 990.0)));
}

#[test]
fn empty_path_clears_previous_features() {
    let r = renderer(Indicator::Arrows { spacing: 40.0 });
    let mut source = FeatureSource::new();
    r.draw(
        &[RoutePoint::new(0.0, 0.0), RoutePoint::new(100.0, 0.0)],
        &mut source,
    );
    assert!(!source.is_empty());
    assert!(r.draw(&[], &mut source).is_none());
    assert!(source.is_empty());
}

#[test]
fn redraw_replaces_instead_of_accumulating() {
    let r = renderer(Indicator::Arrows { spacing: 40.0 });
    let mut source = FeatureSource::new();
    let path = [RoutePoint::new(0.0, 0.0), RoutePoint::new(100.0, 0.0)];
    r.draw(&path, &mut source);
    let first = source.features().to_vec();
    r.draw(&path, &mut source);
    assert_eq!(source.features(), first.as_slice());
}

#[test]
fn tiny_spacing_is_widened_to_cover_the_whole_line() {
    let length = 20_000.5;
    let arrows = place_arrows(&straight(length), 1.0);
    assert!(!arrows.is_empty());
    assert!(arrows.len() <= MAX_ARROWS);

    let widened = length / MAX_ARROWS as f64;
    let last = arrows.last().and_then(|a| a.position()).unwrap();
    assert!(
        last.x > length - 2.0 * widened,
        "last arrow at {} leaves the end of the line bare",
        last.x
    );
    let first = arrows[0].position().unwrap();
    assert!((first.x - widened).abs() < 1e-6);
}

#[test]
fn spacing_within_the_limit_is_not_widened() {
    let arrows = place_arrows(&straight(1_000.5), 1.0);
    assert_eq!(arrows.len(), 1_000);
    let last = arrows.last().and_then(|a| a.position()).unwrap();
    assert!((last.x - 1_000.0).abs() < 1e-6);
}
