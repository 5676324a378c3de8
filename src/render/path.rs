//! Converts a vehicle path into renderable features.

use crate::coords::projection::PixelProjection;
use crate::foundation::core::RoutePoint;
use crate::foundation::math::is_positive_finite;
use crate::geometry::line::RouteLine;
use crate::render::feature::{FeatureSource, RenderedFeature};

/// Fraction used for the single fallback arrow when no interval sample fits on the line.
pub const FALLBACK_ARROW_FRACTION: f64 = 0.5;
/// Upper bound on arrows per line. Smaller spacings are widened to `length / MAX_ARROWS`.
pub const MAX_ARROWS: usize = 10_000;

/// Direction indicator resolved from the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Indicator {
    /// Arrows every `spacing` units of arc length.
    Arrows {
        /// Arc length between arrows.
        spacing: f64,
    },
    /// One moving marker placed at the start; animated by the caller.
    MovingMarker,
}

/// Builds route, start/end and indicator features for a path.
#[derive(Clone, Debug)]
pub struct PathRenderer {
    projection: PixelProjection,
    indicator: Indicator,
}

impl PathRenderer {
    /// Renderer normalizing through `projection`.
    pub fn new(projection: PixelProjection, indicator: Indicator) -> Self {
        Self {
            projection,
            indicator,
        }
    }

    /// Configured indicator.
    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Replace the contents of `source` with the features for `path`.
    ///
    /// Returns the normalized route line, or `None` for an empty path (which leaves `source`
    /// empty).
    #[tracing::instrument(level = "debug", skip_all, fields(points = path.len()))]
    pub fn draw(&self, path: &[RoutePoint], source: &mut FeatureSource) -> Option<RouteLine> {
        source.clear();
        if path.is_empty() {
            return None;
        }

        let line = RouteLine::new(self.projection.normalize_path(path));
        let (first, last) = (line.first()?, line.last()?);

        source.add(RenderedFeature::Route { line: line.clone() });
        source.add(RenderedFeature::Start { at: first });
        source.add(RenderedFeature::End { at: last });

        match self.indicator {
            Indicator::Arrows { spacing } => {
                let arrows = place_arrows(&line, spacing);
                tracing::debug!(
                    length = line.length(),
                    spacing,
                    arrows = arrows.len(),
                    "placed direction arrows"
                );
                source.extend(arrows);
            }
            Indicator::MovingMarker => {
                source.add(RenderedFeature::Owner { at: first });
            }
        }

        Some(line)
    }
}

/// Arrows at arc lengths `spacing, 2 * spacing, ... < length`, each rotated to the local heading.
///
/// A zero-length line or a non-positive spacing yields no arrows. When the spacing does not fit
/// inside the line at all, a single arrow is placed at the midpoint. A spacing so small that more
/// than [`MAX_ARROWS`] would be placed is widened, so the arrows still span the whole line.
pub fn place_arrows(line: &RouteLine, spacing: f64) -> Vec<RenderedFeature> {
    let total = line.length();
    if !is_positive_finite(spacing) || !(total > 0.0) {
        return Vec::new();
    }
    let spacing = spacing.max(total / MAX_ARROWS as f64);

    let mut arrows = Vec::new();
    let mut step = 1u32;
    loop {
        let dist = f64::from(step) * spacing;
        if dist >= total {
            break;
        }
        arrows.extend(arrow_at(line, dist / total));
        step += 1;
    }

    if arrows.is_empty() {
        arrows.extend(arrow_at(line, FALLBACK_ARROW_FRACTION));
    }
    arrows
}

fn arrow_at(line: &RouteLine, fraction: f64) -> Option<RenderedFeature> {
    let at = line.coordinate_at(fraction)?;
    Some(RenderedFeature::Arrow {
        at,
        rotation: line.heading_at(fraction),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
