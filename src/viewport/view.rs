//! Center/resolution view model shared by the bundled surfaces.

use crate::coords::projection::Extent;
use crate::coords::zoom::{ZoomRange, resolution_for_zoom, zoom_for_resolution};
use crate::foundation::core::{Affine, Padding, Point, Size};
use crate::foundation::math::is_positive_finite;
use crate::viewport::surface::ViewSettings;

/// View state: rendering-space center, resolution and screen size.
///
/// Rendering space is y-up for the screen mapping, so larger `y` is drawn higher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    center: Point,
    resolution: f64,
    zoom_range: ZoomRange,
    size: Size,
}

impl View {
    /// View from attach-time settings.
    pub fn new(settings: &ViewSettings, size: Size) -> Self {
        let zoom_range = settings.zoom_range;
        Self {
            center: settings.center,
            resolution: resolution_for_zoom(zoom_range.clamp(settings.zoom)),
            zoom_range,
            size,
        }
    }

    /// Rendering-space center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Rendering units per screen pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Zoom level matching the resolution.
    pub fn zoom(&self) -> f64 {
        zoom_for_resolution(self.resolution)
    }

    /// Allowed zoom range.
    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Screen size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Move the center.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Record a new screen size; center and resolution are kept.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Zoom to `zoom`, clamped into the range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.resolution = resolution_for_zoom(self.zoom_range.clamp(zoom));
    }

    /// Set the resolution, clamped into the range.
    pub fn set_resolution(&mut self, resolution: f64) {
        self.resolution = self.zoom_range.clamp_resolution(resolution);
    }

    /// Center `extent` and pick the resolution that fits it inside the padded screen.
    ///
    /// Padding larger than the screen is ignored. Returns `false` without changes when the
    /// screen has no size.
    pub fn fit(&mut self, extent: Extent, padding: Padding) -> bool {
        if self.size.is_empty() {
            return false;
        }
        let padded = Size::new(
            self.size.width - padding.horizontal(),
            self.size.height - padding.vertical(),
        );
        let (avail, padding) = if padded.is_empty() {
            (self.size, Padding::uniform(0.0))
        } else {
            (padded, padding)
        };
        let resolution = (extent.width() / avail.width).max(extent.height() / avail.height);
        if is_positive_finite(resolution) {
            self.set_resolution(resolution);
        }
        // asymmetric padding moves the fitted extent off the screen center
        let c = extent.center();
        self.center = Point::new(
            c.x + (padding.right - padding.left) / 2.0 * self.resolution,
            c.y + (padding.top - padding.bottom) / 2.0 * self.resolution,
        );
        true
    }

    /// Rendering-space to screen-pixel transform.
    pub fn transform(&self) -> Affine {
        let k = 1.0 / self.resolution;
        Affine::new([
            k,
            0.0,
            0.0,
            -k,
            self.size.width / 2.0 - self.center.x * k,
            self.size.height / 2.0 + self.center.y * k,
        ])
    }

    /// Screen position of a rendering-space point.
    pub fn to_screen(&self, p: Point) -> Point {
        self.transform() * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/view.rs"]
mod tests;
