//! Vehicle-path response format produced by the parking backend.
//!
//! Coordinates and dimensions arrive as strings (`"4268, 8215"`, `"6623"`); the response may be
//! wrapped in a `{code, message, data}` envelope.

use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::core::{RoutePoint, Rgba8};
use crate::foundation::error::{RouteViewError, RouteViewResult};
use crate::viewport::config::{PathIndicatorMode, ViewportConfig};

/// Envelope code reporting success.
pub const ENVELOPE_SUCCESS: i64 = 200;
/// `fetchVehiclePathResult` value reporting success.
pub const RESULT_SUCCESS: i64 = 0;

#[derive(Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: String,
    data: VehiclePathResponse,
}

/// Path lookup result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePathResponse {
    /// Backend result code; zero on success.
    #[serde(rename = "fetchVehiclePathResult")]
    pub result: i64,
    /// Whether the route crosses a linked area.
    #[serde(default)]
    pub is_have_couple_area: bool,
    /// Route stroke color.
    pub pen_color: Rgba8,
    /// Route stroke width in pixels.
    #[serde(deserialize_with = "number_or_string")]
    pub pen_int: f64,
    /// One entry per floor-plan map the route crosses.
    #[serde(rename = "fetchVehicledPathResPathMapInfoList", default)]
    pub maps: Vec<PathMapInfo>,
}

/// Route segment drawn over one floor-plan image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMapInfo {
    /// Position in the map sequence.
    #[serde(default)]
    pub map_index: u32,
    /// Backend map id.
    #[serde(default)]
    pub map_id: i64,
    /// Display name.
    #[serde(default)]
    pub map_name: String,
    /// Public image location.
    pub map_file_name_layout: String,
    /// Image location inside the operator network.
    #[serde(default)]
    pub map_file_name_intranet: Option<String>,
    /// Parking space position as `"x, y"`.
    #[serde(default)]
    pub space_point: Option<String>,
    /// Parking space label.
    #[serde(default)]
    pub space_code: Option<String>,
    /// Image width in pixels.
    #[serde(deserialize_with = "number_or_string")]
    pub img_width: f64,
    /// Image height in pixels.
    #[serde(deserialize_with = "number_or_string")]
    pub img_height: f64,
    /// Path vertices as `"x, y"` strings in traversal order.
    #[serde(default)]
    pub path_line_points: Vec<String>,
}

/// Parking space the route leads to.
#[derive(Clone, Debug, PartialEq)]
pub struct ParkingTarget {
    /// Space label.
    pub code: Option<String>,
    /// Space position in data space.
    pub point: RoutePoint,
}

/// One map's route, ready to feed a viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleRoute {
    /// Backdrop image location.
    pub image_url: String,
    /// Backdrop width in pixels.
    pub image_width: u32,
    /// Backdrop height in pixels.
    pub image_height: u32,
    /// Route stroke color.
    pub stroke_color: Rgba8,
    /// Route stroke width.
    pub stroke_width: f64,
    /// Path in data space.
    pub path: Vec<RoutePoint>,
    /// Destination space, when reported.
    pub target: Option<ParkingTarget>,
}

impl VehicleRoute {
    /// Viewport configuration for this route with default padding, icons and scales.
    pub fn viewport_config(&self, indicator: PathIndicatorMode) -> ViewportConfig {
        ViewportConfig::new(
            self.image_url.clone(),
            self.image_width,
            self.image_height,
            self.stroke_color,
            self.stroke_width,
        )
        .with_indicator(indicator)
    }
}

impl VehiclePathResponse {
    /// Parse a response body, with or without the envelope.
    pub fn from_json(json: &str) -> RouteViewResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let is_envelope = value.get("code").is_some() && value.get("data").is_some();
        let body = if is_envelope {
            let envelope: Envelope = serde_json::from_value(value)?;
            if envelope.code != ENVELOPE_SUCCESS {
                return Err(RouteViewError::payload(format!(
                    "request failed with code {}: {}",
                    envelope.code, envelope.message
                )));
            }
            envelope.data
        } else {
            serde_json::from_value::<Self>(value)?
        };

        if body.result != RESULT_SUCCESS {
            return Err(RouteViewError::payload(format!(
                "path lookup failed with result {}",
                body.result
            )));
        }
        Ok(body)
    }

    /// Route drawn over map `index`.
    pub fn route(&self, index: usize) -> RouteViewResult<VehicleRoute> {
        let map = self.maps.get(index).ok_or_else(|| {
            RouteViewError::payload(format!(
                "map index {index} out of range ({} maps)",
                self.maps.len()
            ))
        })?;

        let path = map
            .path_line_points
            .iter()
            .map(|p| parse_point(p))
            .collect::<RouteViewResult<Vec<_>>>()?;
        let target = match map.space_point.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(ParkingTarget {
                code: map.space_code.clone(),
                point: parse_point(raw)?,
            }),
            _ => None,
        };

        Ok(VehicleRoute {
            image_url: map.map_file_name_layout.clone(),
            image_width: pixel_dimension("imgWidth", map.img_width)?,
            image_height: pixel_dimension("imgHeight", map.img_height)?,
            stroke_color: self.pen_color,
            stroke_width: self.pen_int,
            path,
            target,
        })
    }

    /// Routes for every map in order.
    pub fn routes(&self) -> RouteViewResult<Vec<VehicleRoute>> {
        (0..self.maps.len()).map(|i| self.route(i)).collect()
    }
}

/// Parse an `"x, y"` coordinate pair.
pub fn parse_point(raw: &str) -> RouteViewResult<RoutePoint> {
    let malformed = || RouteViewError::payload(format!("malformed point '{raw}'"));
    let (x, y) = raw.split_once(',').ok_or_else(malformed)?;
    let x: f64 = x.trim().parse().map_err(|_| malformed())?;
    let y: f64 = y.trim().parse().map_err(|_| malformed())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(malformed());
    }
    Ok(RoutePoint::new(x, y))
}

fn pixel_dimension(field: &str, value: f64) -> RouteViewResult<u32> {
    if value.fract() != 0.0 || !(value >= 1.0 && value <= f64::from(u32::MAX)) {
        return Err(RouteViewError::payload(format!(
            "{field} must be a positive integer, got {value}"
        )));
    }
    Ok(value as u32)
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{s}'"))),
    }
}

#[cfg(test)]
#[path = "../tests/unit/payload.rs"]
mod tests;
