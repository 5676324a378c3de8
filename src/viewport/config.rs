//! Viewport configuration and its documented defaults.

use serde::{Deserialize, Serialize};

use crate::coords::projection::Extent;
use crate::foundation::core::{Padding, Rgba8};
use crate::foundation::error::{RouteViewError, RouteViewResult};

/// Default start marker asset.
pub const DEFAULT_START_ICON: &str = "/static/start.png";
/// Default end marker asset.
pub const DEFAULT_END_ICON: &str = "/static/end.png";
/// Default direction arrow asset.
pub const DEFAULT_ARROW_ICON: &str = "/static/arrow.png";
/// Default moving marker asset.
pub const DEFAULT_OWNER_ICON: &str = "/static/owner.png";

/// Default base icon scale.
pub const DEFAULT_ICON_SCALE: f64 = 1.5;
/// Default arrow scale relative to the icon scale.
pub const ARROW_SCALE_RATIO: f64 = 1.2;
/// Fixed moving-marker scale relative to the icon scale.
pub const OWNER_SCALE_RATIO: f64 = 1.1;
/// Default arrow spacing is `max(width, height) / ARROW_SPACING_DIVISOR`.
pub const ARROW_SPACING_DIVISOR: f64 = 12.0;
/// Default duration of one moving-marker pass.
pub const DEFAULT_OWNER_DURATION_MS: f64 = 6000.0;
/// Lower bound applied to the moving-marker pass duration.
pub const MIN_OWNER_DURATION_MS: f64 = 1000.0;

fn default_icon_scale() -> f64 {
    DEFAULT_ICON_SCALE
}

fn default_owner_duration_ms() -> f64 {
    DEFAULT_OWNER_DURATION_MS
}

/// Icon sources for each marker kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    /// Start marker.
    pub start: String,
    /// End marker.
    pub end: String,
    /// Direction arrow (points along +x at zero rotation).
    pub arrow: String,
    /// Moving marker.
    pub owner: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_ICON.to_owned(),
            end: DEFAULT_END_ICON.to_owned(),
            arrow: DEFAULT_ARROW_ICON.to_owned(),
            owner: DEFAULT_OWNER_ICON.to_owned(),
        }
    }
}

/// How the traversal direction is indicated along the route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PathIndicatorMode {
    /// Directional arrows at fixed arc-length intervals.
    StaticArrows {
        /// Arc length between arrows; `None` picks `max(width, height) / 12`.
        #[serde(default)]
        spacing: Option<f64>,
    },
    /// A single marker looping along the route.
    MovingMarker {
        /// Duration of one pass; floored at [`MIN_OWNER_DURATION_MS`].
        #[serde(default = "default_owner_duration_ms")]
        duration_ms: f64,
    },
}

impl PathIndicatorMode {
    /// Moving marker with the default pass duration.
    pub fn moving_marker() -> Self {
        Self::MovingMarker {
            duration_ms: DEFAULT_OWNER_DURATION_MS,
        }
    }
}

impl Default for PathIndicatorMode {
    fn default() -> Self {
        Self::StaticArrows { spacing: None }
    }
}

/// Immutable viewport configuration supplied once at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Backdrop image location, resolved by the rendering surface.
    pub image_url: String,
    /// Backdrop width in pixels; defines the extent.
    pub image_width: u32,
    /// Backdrop height in pixels; defines the extent.
    pub image_height: u32,
    /// Route stroke color.
    pub stroke_color: Rgba8,
    /// Route stroke width in screen pixels.
    pub stroke_width: f64,
    /// Padding used when fitting the extent.
    #[serde(default)]
    pub padding: Padding,
    /// Marker icon sources.
    #[serde(default)]
    pub icons: IconSet,
    /// Base icon scale.
    #[serde(default = "default_icon_scale")]
    pub icon_scale: f64,
    /// Arrow scale; `None` means `icon_scale * 1.2`.
    #[serde(default)]
    pub arrow_scale: Option<f64>,
    /// Direction indicator.
    #[serde(default)]
    pub indicator: PathIndicatorMode,
}

impl ViewportConfig {
    /// Configuration with default padding, icons, scales and static arrows.
    pub fn new(
        image_url: impl Into<String>,
        image_width: u32,
        image_height: u32,
        stroke_color: Rgba8,
        stroke_width: f64,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            image_width,
            image_height,
            stroke_color,
            stroke_width,
            padding: Padding::default(),
            icons: IconSet::default(),
            icon_scale: DEFAULT_ICON_SCALE,
            arrow_scale: None,
            indicator: PathIndicatorMode::default(),
        }
    }

    /// Override the fit padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Override the icon sources.
    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    /// Override the base icon scale.
    pub fn with_icon_scale(mut self, scale: f64) -> Self {
        self.icon_scale = scale;
        self
    }

    /// Override the arrow scale.
    pub fn with_arrow_scale(mut self, scale: f64) -> Self {
        self.arrow_scale = Some(scale);
        self
    }

    /// Override the direction indicator.
    pub fn with_indicator(mut self, indicator: PathIndicatorMode) -> Self {
        self.indicator = indicator;
        self
    }

    /// Check that the configuration describes a drawable viewport.
    pub fn validate(&self) -> RouteViewResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RouteViewError::validation(
                "image dimensions must be positive",
            ));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(RouteViewError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if !(self.icon_scale.is_finite() && self.icon_scale >= 0.0) {
            return Err(RouteViewError::validation(
                "icon_scale must be finite and >= 0",
            ));
        }
        if let Some(scale) = self.arrow_scale
            && !(scale.is_finite() && scale >= 0.0)
        {
            return Err(RouteViewError::validation(
                "arrow_scale must be finite and >= 0",
            ));
        }
        let padding: [f64; 4] = self.padding.into();
        if padding.iter().any(|p| !p.is_finite()) {
            return Err(RouteViewError::validation("padding must be finite"));
        }
        match self.indicator {
            PathIndicatorMode::StaticArrows {
                spacing: Some(spacing),
            } if !spacing.is_finite() => Err(RouteViewError::validation(
                "arrow spacing must be finite",
            )),
            PathIndicatorMode::MovingMarker { duration_ms } if !duration_ms.is_finite() => Err(
                RouteViewError::validation("moving marker duration must be finite"),
            ),
            _ => Ok(()),
        }
    }

    /// Backdrop extent `[0, 0, width, height]`.
    pub fn extent(&self) -> Extent {
        Extent::from_image(f64::from(self.image_width), f64::from(self.image_height))
    }

    /// Effective arrow scale.
    pub fn arrow_scale(&self) -> f64 {
        self.arrow_scale
            .unwrap_or(self.icon_scale * ARROW_SCALE_RATIO)
    }

    /// Factor applied to the resolution-dependent scale for arrows.
    pub fn arrow_scale_factor(&self) -> f64 {
        if self.icon_scale == 0.0 {
            1.0
        } else {
            self.arrow_scale() / self.icon_scale
        }
    }

    /// Effective arrow spacing, or `None` in moving-marker mode.
    ///
    /// The value may be non-positive when configured so; no arrows are placed in that case.
    pub fn arrow_spacing(&self) -> Option<f64> {
        match self.indicator {
            PathIndicatorMode::StaticArrows { spacing } => Some(spacing.unwrap_or_else(|| {
                f64::from(self.image_width.max(self.image_height)) / ARROW_SPACING_DIVISOR
            })),
            PathIndicatorMode::MovingMarker { .. } => None,
        }
    }

    /// Effective pass duration, or `None` in static-arrow mode.
    pub fn owner_duration_ms(&self) -> Option<f64> {
        match self.indicator {
            PathIndicatorMode::MovingMarker { duration_ms } => {
                Some(duration_ms.max(MIN_OWNER_DURATION_MS))
            }
            PathIndicatorMode::StaticArrows { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/config.rs"]
mod tests;
