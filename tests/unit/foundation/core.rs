use super::*;

#[test]
fn size_emptiness_requires_both_dimensions() {
    assert!(Size::ZERO.is_empty());
    assert!(Size::new(10.0, 0.0).is_empty());
    assert!(Size::new(f64::NAN, 10.0).is_empty());
    assert!(!Size::new(1.0, 1.0).is_empty());
}

#[test]
fn padding_array_order_is_top_right_bottom_left() {
    let p = Padding::from([1.0, 2.0, 3.0, 4.0]);
    assert_eq!(p.top, 1.0);
    assert_eq!(p.right, 2.0);
    assert_eq!(p.bottom, 3.0);
    assert_eq!(p.left, 4.0);
    assert_eq!(p.horizontal(), 6.0);
    assert_eq!(p.vertical(), 4.0);
    assert_eq!(<[f64; 4]>::from(p), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn padding_defaults_to_forty_and_parses_from_json_array() {
    assert_eq!(Padding::default(), Padding::uniform(40.0));
    let p: Padding = serde_json::from_str("[5, 6, 7, 8]").unwrap();
    assert_eq!(p, Padding::from([5.0, 6.0, 7.0, 8.0]));
}
