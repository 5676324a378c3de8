use super::*;

fn sample() -> ViewportConfig {
    ViewportConfig::new("floor.jpg", 6623, 9362, Rgba8::rgb(0x7f, 0xb8, 0x0e), 5.0)
}

#[test]
fn defaults_match_documented_values() {
    let cfg = sample();
    assert_eq!(cfg.padding, Padding::uniform(40.0));
    assert_eq!(cfg.icons.start, "/static/start.png");
    assert_eq!(cfg.icons.end, "/static/end.png");
    assert_eq!(cfg.icons.arrow, "/static/arrow.png");
    assert_eq!(cfg.icons.owner, "/static/owner.png");
    assert_eq!(cfg.icon_scale, 1.5);
    assert!((cfg.arrow_scale() - 1.8).abs() < 1e-12);
    assert!((cfg.arrow_scale_factor() - 1.2).abs() < 1e-12);
    assert_eq!(cfg.arrow_spacing(), Some(9362.0 / 12.0));
    assert_eq!(cfg.owner_duration_ms(), None);
    cfg.validate().unwrap();
}

#[test]
fn moving_marker_duration_is_floored() {
    let cfg = sample().with_indicator(PathIndicatorMode::MovingMarker { duration_ms: 250.0 });
    assert_eq!(cfg.owner_duration_ms(), Some(1000.0));
    assert_eq!(cfg.arrow_spacing(), None);

    let cfg = sample().with_indicator(PathIndicatorMode::moving_marker());
    assert_eq!(cfg.owner_duration_ms(), Some(6000.0));
}

#[test]
fn zero_icon_scale_keeps_unit_arrow_factor() {
    let cfg = sample().with_icon_scale(0.0).with_arrow_scale(2.0);
    assert_eq!(cfg.arrow_scale_factor(), 1.0);
}

#[test]
fn explicit_non_positive_spacing_passes_through() {
    let cfg = sample().with_indicator(PathIndicatorMode::StaticArrows { spacing: Some(0.0) });
    assert_eq!(cfg.arrow_spacing(), Some(0.0));
    cfg.validate().unwrap();
}

#[test]
fn validation_rejects_bad_values() {
    assert!(
        ViewportConfig::new("x", 0, 10, Rgba8::rgb(0, 0, 0), 1.0)
            .validate()
            .is_err()
    );
    assert!(
        ViewportConfig::new("x", 10, 10, Rgba8::rgb(0, 0, 0), -1.0)
            .validate()
            .is_err()
    );
    assert!(sample().with_icon_scale(f64::NAN).validate().is_err());
    assert!(sample().with_arrow_scale(-2.0).validate().is_err());
    assert!(
        sample()
            .with_padding(Padding::uniform(f64::INFINITY))
            .validate()
            .is_err()
    );
    assert!(
        sample()
            .with_indicator(PathIndicatorMode::MovingMarker {
                duration_ms: f64::NAN
            })
            .validate()
            .is_err()
    );
}

#[test]
fn deserializes_with_defaults() {
    let cfg: ViewportConfig = serde_json::from_str(
        r##"{
            "image_url": "floor.jpg",
            "image_width": 640,
            "image_height": 480,
            "stroke_color": "#7fb80e",
            "stroke_width": 5,
            "indicator": { "mode": "moving_marker" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.padding, Padding::uniform(40.0));
    assert_eq!(cfg.icons, IconSet::default());
    assert_eq!(cfg.owner_duration_ms(), Some(6000.0));

    let cfg: ViewportConfig = serde_json::from_str(
        r##"{
            "image_url": "floor.jpg",
            "image_width": 640,
            "image_height": 480,
            "stroke_color": [0, 0, 0],
            "stroke_width": 2,
            "padding": [1, 2, 3, 4],
            "icons": { "arrow": "/assets/a.png" },
            "indicator": { "mode": "static_arrows", "spacing": 25 }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.padding, Padding::from([1.0, 2.0, 3.0, 4.0]));
    assert_eq!(cfg.icons.arrow, "/assets/a.png");
    assert_eq!(cfg.icons.start, "/static/start.png");
    assert_eq!(cfg.arrow_spacing(), Some(25.0));
}
