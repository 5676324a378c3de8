use super::*;
use crate::viewport::config::ViewportConfig;

fn sample_source() -> FeatureSource {
    let mut source = FeatureSource::new();
    source.add(RenderedFeature::Route {
        line: RouteLine::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
    });
    source.add(RenderedFeature::Start {
        at: Point::new(0.0, 0.0),
    });
    source.add(RenderedFeature::End {
        at: Point::new(10.0, 0.0),
    });
    source.add(RenderedFeature::Owner {
        at: Point::new(0.0, 0.0),
    });
    source
}

#[test]
fn kinds_and_positions() {
    let source = sample_source();
    let kinds: Vec<_> = source.features().iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            FeatureKind::Route,
            FeatureKind::Start,
            FeatureKind::End,
            FeatureKind::Owner
        ]
    );
    assert_eq!(source.features()[0].position(), None);
    assert_eq!(source.features()[2].position(), Some(Point::new(10.0, 0.0)));
    assert_eq!(FeatureKind::Arrow.as_str(), "arrow");
}

#[test]
fn move_owner_updates_in_place() {
    let mut source = sample_source();
    assert!(source.move_owner(Point::new(5.0, 0.0)));
    assert_eq!(
        source.features()[3].position(),
        Some(Point::new(5.0, 0.0))
    );

    source.clear();
    assert!(source.is_empty());
    assert!(!source.move_owner(Point::new(1.0, 1.0)));
}

#[test]
fn layer_resolves_styles_per_feature() {
    let source = sample_source();
    let styles = StyleResolver::new(&ViewportConfig::new(
        "x",
        10,
        10,
        crate::foundation::core::Rgba8::rgb(0, 0, 0),
        3.0,
    ));
    let layer = VectorLayer::new(&source, &styles);
    let styled: Vec<_> = layer.styled(1.0).collect();
    assert_eq!(styled.len(), 4);
    assert!(matches!(styled[0].1, Style::Stroke(_)));
    assert!(styled[1..].iter().all(|(_, s)| matches!(s, Style::Icon(_))));
}

#[test]
fn features_serialize_with_type_tag() {
    let json = serde_json::to_value(RenderedFeature::Arrow {
        at: Point::new(1.0, 2.0),
        rotation: 0.25,
    })
    .unwrap();
    assert_eq!(json["type"], "arrow");
    assert_eq!(json["rotation"], 0.25);
}
