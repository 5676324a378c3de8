//! Arc-length parameterized polyline in rendering space.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{BezPath, Point};
use crate::foundation::math::clamp01;

/// Offset used to sample on either side of a fraction when estimating the heading.
pub const HEADING_DELTA: f64 = 1e-3;

/// Ordered polyline with cumulative segment lengths.
///
/// Fractions in `[0, 1]` address positions by arc length: 0 is the first vertex, 1 the last.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct RouteLine {
    points: Vec<Point>,
    // cumulative[i] = length from points[0] to points[i]
    cumulative: Vec<f64>,
}

impl RouteLine {
    /// Build a line through `points` in order.
    pub fn new(points: Vec<Point>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                acc += points[i - 1].distance(*p);
            }
            cumulative.push(acc);
        }
        Self { points, cumulative }
    }

    /// Vertices in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Return `true` when the line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First vertex.
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last vertex.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at `fraction` of the arc length; the fraction is clamped to `[0, 1]`.
    ///
    /// Zero-length lines return their first vertex, empty lines `None`.
    pub fn coordinate_at(&self, fraction: f64) -> Option<Point> {
        let first = self.first()?;
        let total = self.length();
        if self.points.len() == 1 || total <= 0.0 {
            return Some(first);
        }

        let fraction = clamp01(fraction);
        if fraction <= 0.0 {
            return Some(first);
        }
        if fraction >= 1.0 {
            return self.last();
        }

        let target = fraction * total;
        // first index whose cumulative length reaches the target
        let idx = self.cumulative.partition_point(|&len| len < target);
        if idx == 0 {
            return Some(first);
        }
        if idx >= self.points.len() {
            return self.last();
        }

        let (a, b) = (self.points[idx - 1], self.points[idx]);
        let seg = self.cumulative[idx] - self.cumulative[idx - 1];
        if seg <= 0.0 {
            return Some(b);
        }
        let t = (target - self.cumulative[idx - 1]) / seg;
        Some(a.lerp(b, t))
    }

    /// Screen heading at `fraction`, in radians, clockwise from the +x axis.
    ///
    /// Samples the line at `fraction ± HEADING_DELTA` (clamped to `[0, 1]`) and returns
    /// `atan2(-dy, dx)`: rendering space is y-up for the surface, so the negated y component
    /// turns the direction into a clockwise screen rotation.
    pub fn heading_at(&self, fraction: f64) -> f64 {
        let start = self.coordinate_at((fraction - HEADING_DELTA).max(0.0));
        let end = self.coordinate_at((fraction + HEADING_DELTA).min(1.0));
        match (start, end) {
            (Some(s), Some(e)) => {
                let d = e - s;
                (-d.y).atan2(d.x)
            }
            _ => 0.0,
        }
    }

    /// Open kurbo path through the vertices.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (i, &p) in self.points.iter().enumerate() {
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }
}

impl From<Vec<Point>> for RouteLine {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<RouteLine> for Vec<Point> {
    fn from(line: RouteLine) -> Self {
        line.points
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/line.rs"]
mod tests;
