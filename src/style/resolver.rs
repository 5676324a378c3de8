//! Maps a feature and the current resolution to a concrete visual style.
//!
//! Start, end and arrow icons shrink as resolution grows (zooming out) and grow when zooming
//! in, within `[0.5, 2] x icon_scale`. The moving marker keeps a fixed scale.

use std::sync::Arc;

use kurbo::{Cap, Join};

use crate::foundation::core::Rgba8;
use crate::render::feature::RenderedFeature;
use crate::viewport::config::{OWNER_SCALE_RATIO, ViewportConfig};

/// Resolution below which icon scale stops growing.
pub const MIN_SCALE_RESOLUTION: f64 = 0.5;
/// Lower bound of the arrow scale.
pub const MIN_ARROW_SCALE: f64 = 0.1;
/// Icon anchor as a fraction of the icon size: the center.
pub const ICON_ANCHOR: [f64; 2] = [0.5, 0.5];

/// Stroke-only line style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Width in screen pixels.
    pub width: f64,
    /// Line cap.
    pub cap: Cap,
    /// Line join.
    pub join: Join,
}

/// Icon style for point features.
#[derive(Clone, Debug, PartialEq)]
pub struct IconStyle {
    /// Icon source.
    pub src: Arc<str>,
    /// Anchor as a fraction of the icon size.
    pub anchor: [f64; 2],
    /// Multiplier on the icon's natural size.
    pub scale: f64,
    /// Clockwise rotation in radians.
    pub rotation: f64,
    /// Whether the rotation is relative to the view rather than the screen.
    pub rotate_with_view: bool,
}

/// Resolved style of one feature.
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    /// Draw the geometry as a stroked line.
    Stroke(StrokeStyle),
    /// Draw an icon at the point geometry.
    Icon(IconStyle),
}

impl Style {
    /// Icon part, if this is an icon style.
    pub fn as_icon(&self) -> Option<&IconStyle> {
        match self {
            Self::Icon(icon) => Some(icon),
            Self::Stroke(_) => None,
        }
    }

    /// Stroke part, if this is a stroke style.
    pub fn as_stroke(&self) -> Option<&StrokeStyle> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            Self::Icon(_) => None,
        }
    }
}

/// Style lookup built once from the viewport configuration.
#[derive(Clone, Debug)]
pub struct StyleResolver {
    route: StrokeStyle,
    start_icon: Arc<str>,
    end_icon: Arc<str>,
    arrow_icon: Arc<str>,
    owner_icon: Arc<str>,
    icon_scale: f64,
    arrow_scale_factor: f64,
}

impl StyleResolver {
    /// Build the resolver for `config`.
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            route: StrokeStyle {
                color: config.stroke_color,
                width: config.stroke_width,
                cap: Cap::Round,
                join: Join::Round,
            },
            start_icon: Arc::from(config.icons.start.as_str()),
            end_icon: Arc::from(config.icons.end.as_str()),
            arrow_icon: Arc::from(config.icons.arrow.as_str()),
            owner_icon: Arc::from(config.icons.owner.as_str()),
            icon_scale: config.icon_scale,
            arrow_scale_factor: config.arrow_scale_factor(),
        }
    }

    /// Base icon scale.
    pub fn icon_scale(&self) -> f64 {
        self.icon_scale
    }

    /// Resolution-dependent icon scale:
    /// `clamp(icon_scale / max(resolution, 0.5), icon_scale * 0.5, icon_scale * 2)`.
    pub fn scale_for_resolution(&self, resolution: f64) -> f64 {
        let base = self.icon_scale;
        let s = base / resolution.max(MIN_SCALE_RESOLUTION);
        s.max(base * 0.5).min(base * 2.0)
    }

    /// Scale of the moving marker; independent of resolution.
    pub fn owner_scale(&self) -> f64 {
        self.icon_scale * OWNER_SCALE_RATIO
    }

    /// Resolve the style of `feature` at `resolution`.
    pub fn resolve(&self, feature: &RenderedFeature, resolution: f64) -> Style {
        match *feature {
            RenderedFeature::Route { .. } => Style::Stroke(self.route),
            RenderedFeature::Start { .. } => {
                self.icon(&self.start_icon, self.scale_for_resolution(resolution), 0.0)
            }
            RenderedFeature::End { .. } => {
                self.icon(&self.end_icon, self.scale_for_resolution(resolution), 0.0)
            }
            RenderedFeature::Arrow { rotation, .. } => {
                let scale = (self.scale_for_resolution(resolution) * self.arrow_scale_factor)
                    .max(MIN_ARROW_SCALE);
                Style::Icon(IconStyle {
                    rotate_with_view: true,
                    ..self.icon_style(&self.arrow_icon, scale, rotation)
                })
            }
            RenderedFeature::Owner { .. } => self.icon(&self.owner_icon, self.owner_scale(), 0.0),
        }
    }

    fn icon(&self, src: &Arc<str>, scale: f64, rotation: f64) -> Style {
        Style::Icon(self.icon_style(src, scale, rotation))
    }

    fn icon_style(&self, src: &Arc<str>, scale: f64, rotation: f64) -> IconStyle {
        IconStyle {
            src: Arc::clone(src),
            anchor: ICON_ANCHOR,
            scale,
            rotation,
            rotate_with_view: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolver.rs"]
mod tests;
