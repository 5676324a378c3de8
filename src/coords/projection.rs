//! Flat pixel projection over a single backdrop image.
//!
//! Data space has its origin at the bottom-left of the image; rendering space is the surface's
//! coordinate frame in which the backdrop occupies `[0, 0, W, H]` and the data origin lands on the
//! image's top-left corner as displayed. Moving between the two is a vertical flip about `H`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect, RoutePoint};

static NEXT_PROJECTION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Axis-aligned `[min_x, min_y, max_x, max_y]` rectangle covering the backdrop image.
///
/// Always anchored at the origin; fixed once built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    /// Extent `[0, 0, width, height]` for an image of the given pixel size.
    pub fn from_image(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        }
    }

    /// Minimum x (always 0).
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Minimum y (always 0).
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Maximum x (image width).
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Maximum y (image height).
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Extent width.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent height.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point in rendering space.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// `[min_x, min_y, max_x, max_y]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Same rectangle as a kurbo [`Rect`].
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Units declared by a projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// Source-image pixels.
    Pixels,
}

/// Non-geographic projection declaring pixel units over a fixed image extent.
///
/// Surfaces cache projections by [`PixelProjection::code`], so every instance gets a code that is
/// unique within the process even when two viewports share image dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelProjection {
    code: String,
    units: Units,
    extent: Extent,
}

impl PixelProjection {
    /// Create a projection covering `extent` with a fresh identity.
    pub fn new(extent: Extent) -> Self {
        let seq = NEXT_PROJECTION_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            code: format!(
                "static-image-{}x{}-{seq}",
                extent.width(),
                extent.height()
            ),
            units: Units::Pixels,
            extent,
        }
    }

    /// Identity code of this projection.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Declared units.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Projection extent.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Map a data-space point into rendering space: `(x, y) -> (x, H - y)`.
    ///
    /// Total: points outside the extent are mapped the same way and simply land off-canvas.
    pub fn normalize(&self, p: RoutePoint) -> Point {
        flip_y(Point::new(p.x, p.y), self.extent.max_y)
    }

    /// Inverse of [`PixelProjection::normalize`].
    pub fn denormalize(&self, p: Point) -> RoutePoint {
        let q = flip_y(p, self.extent.max_y);
        RoutePoint::new(q.x, q.y)
    }

    /// Normalize a whole path, preserving order.
    pub fn normalize_path(&self, points: &[RoutePoint]) -> Vec<Point> {
        points.iter().map(|&p| self.normalize(p)).collect()
    }
}

/// Vertical flip about `height`; applying it twice is the identity.
#[inline]
pub fn flip_y(p: Point, height: f64) -> Point {
    Point::new(p.x, height - p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/coords/projection.rs"]
mod tests;
