use super::*;

const BARE: &str = r##"{
    "fetchVehiclePathResult": 0,
    "penColor": "#7fb80e",
    "penInt": 5,
    "fetchVehicledPathResPathMapInfoList": [
        {
            "mapFileNameLayout": "https://example.invalid/map.jpg",
            "spacePoint": "1578, 1167",
            "spaceCode": "B1-A081",
            "imgWidth": "6623",
            "imgHeight": 9362,
            "pathLinePoints": ["4268, 8215", " 4193 ,8121 "]
        }
    ]
}"##;

#[test]
fn parses_bare_response() {
    let resp = VehiclePathResponse::from_json(BARE).unwrap();
    assert_eq!(resp.pen_color, Rgba8::rgb(0x7f, 0xb8, 0x0e));
    assert_eq!(resp.pen_int, 5.0);

    let route = resp.route(0).unwrap();
    assert_eq!(route.image_width, 6623);
    assert_eq!(route.image_height, 9362);
    assert_eq!(
        route.path,
        vec![RoutePoint::new(4268.0, 8215.0), RoutePoint::new(4193.0, 8121.0)]
    );
    let target = route.target.unwrap();
    assert_eq!(target.code.as_deref(), Some("B1-A081"));
    assert_eq!(target.point, RoutePoint::new(1578.0, 1167.0));
}

#[test]
fn unwraps_envelope() {
    let json = format!(r#"{{"code": 200, "message": "success", "data": {BARE}}}"#);
    let resp = VehiclePathResponse::from_json(&json).unwrap();
    assert_eq!(resp.maps.len(), 1);
}

#[test]
fn failed_envelope_is_payload_error() {
    let json = format!(r#"{{"code": 500, "message": "boom", "data": {BARE}}}"#);
    let err = VehiclePathResponse::from_json(&json).unwrap_err();
    assert!(matches!(err, RouteViewError::Payload(ref m) if m.contains("boom")));
}

#[test]
fn nonzero_result_is_payload_error() {
    let json = BARE.replace("\"fetchVehiclePathResult\": 0", "\"fetchVehiclePathResult\": 3");
    assert!(matches!(
        VehiclePathResponse::from_json(&json),
        Err(RouteViewError::Payload(_))
    ));
}

#[test]
fn invalid_json_is_serde_error() {
    assert!(matches!(
        VehiclePathResponse::from_json("{"),
        Err(RouteViewError::Serde(_))
    ));
}

#[test]
fn malformed_points_are_rejected() {
    assert!(parse_point("12").is_err());
    assert!(parse_point("a, 3").is_err());
    assert!(parse_point("1, inf").is_err());
    assert_eq!(parse_point("-1.5,2").unwrap(), RoutePoint::new(-1.5, 2.0));

    let json = BARE.replace("\"4268, 8215\"", "\"4268; 8215\"");
    let resp = VehiclePathResponse::from_json(&json).unwrap();
    assert!(matches!(resp.route(0), Err(RouteViewError::Payload(_))));
}

#[test]
fn dimensions_must_be_positive_integers() {
    let json = BARE.replace("\"6623\"", "\"0\"");
    let resp = VehiclePathResponse::from_json(&json).unwrap();
    assert!(resp.route(0).is_err());

    let json = BARE.replace("\"6623\"", "\"66.5\"");
    let resp = VehiclePathResponse::from_json(&json).unwrap();
    assert!(resp.route(0).is_err());
}

#[test]
fn out_of_range_map_index() {
    let resp = VehiclePathResponse::from_json(BARE).unwrap();
    assert!(resp.route(1).is_err());
    assert_eq!(resp.routes().unwrap().len(), 1);
}

#[test]
fn route_builds_viewport_config() {
    let route = VehiclePathResponse::from_json(BARE).unwrap().route(0).unwrap();
    let config = route.viewport_config(PathIndicatorMode::moving_marker());
    assert_eq!(config.image_url, "https://example.invalid/map.jpg");
    assert_eq!(config.stroke_width, 5.0);
    assert_eq!(config.owner_duration_ms(), Some(6000.0));
    config.validate().unwrap();
}
