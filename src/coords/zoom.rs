//! Zoom levels and resolutions for a fit-to-container view.
//!
//! Zoom `z` corresponds to a resolution of `2^-z` data units per screen pixel, so zoom 0 shows the
//! image at its native pixel size and negative zooms shrink it.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Size;

/// Number of zoom levels available above the minimum.
pub const ZOOM_LEVELS: f64 = 8.0;

/// Allowed zoom interval `[min, min + 8]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    /// Lowest zoom: the whole image fits the container.
    pub min: f64,
    /// Highest zoom.
    pub max: f64,
}

impl ZoomRange {
    /// Range starting at `min` and spanning [`ZOOM_LEVELS`].
    pub fn from_min(min: f64) -> Self {
        Self {
            min,
            max: min + ZOOM_LEVELS,
        }
    }

    /// Clamp a zoom level into the range.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }

    /// Largest resolution reachable (fully zoomed out).
    pub fn max_resolution(&self) -> f64 {
        resolution_for_zoom(self.min)
    }

    /// Smallest resolution reachable (fully zoomed in).
    pub fn min_resolution(&self) -> f64 {
        resolution_for_zoom(self.max)
    }

    /// Clamp a resolution into the range.
    pub fn clamp_resolution(&self, resolution: f64) -> f64 {
        resolution.clamp(self.min_resolution(), self.max_resolution())
    }
}

/// Minimum zoom that fits an `image_width x image_height` image into `container`.
///
/// A container that has not been laid out yet (zero or `NaN` size) falls back to the image's own
/// dimensions. A ratio that is zero or not a number degrades to zoom 0. Never positive: images
/// smaller than the container are shown at native size rather than enlarged.
pub fn min_zoom(container: Size, image_width: f64, image_height: f64) -> f64 {
    let container_width = if container.width > 0.0 {
        container.width
    } else {
        image_width
    };
    let container_height = if container.height > 0.0 {
        container.height
    } else {
        image_height
    };

    let width_ratio = container_width / image_width;
    let height_ratio = container_height / image_height;
    if width_ratio.is_nan() || height_ratio.is_nan() {
        return 0.0;
    }
    let ratio = width_ratio.min(height_ratio);
    if ratio <= 0.0 || ratio.is_nan() {
        return 0.0;
    }
    ratio.log2().min(0.0)
}

/// Resolution (data units per screen pixel) at `zoom`.
#[inline]
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    (-zoom).exp2()
}

/// Zoom level showing `resolution` data units per screen pixel.
#[inline]
pub fn zoom_for_resolution(resolution: f64) -> f64 {
    -resolution.log2()
}

#[cfg(test)]
#[path = "../../tests/unit/coords/zoom.rs"]
mod tests;
