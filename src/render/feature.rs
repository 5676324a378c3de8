use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::geometry::line::RouteLine;
use crate::style::resolver::{Style, StyleResolver};

/// Semantic tag of a rendered primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// The route polyline.
    Route,
    /// First path point.
    Start,
    /// Last path point.
    End,
    /// Direction arrow.
    Arrow,
    /// Moving marker.
    Owner,
}

impl FeatureKind {
    /// Lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Start => "start",
            Self::End => "end",
            Self::Arrow => "arrow",
            Self::Owner => "owner",
        }
    }
}

/// A renderable primitive in rendering space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderedFeature {
    /// The full route line.
    Route {
        /// Normalized polyline.
        line: RouteLine,
    },
    /// Start marker.
    Start {
        /// Marker position.
        at: Point,
    },
    /// End marker.
    End {
        /// Marker position.
        at: Point,
    },
    /// Direction arrow.
    Arrow {
        /// Arrow position.
        at: Point,
        /// Clockwise screen heading in radians.
        rotation: f64,
    },
    /// Moving marker.
    Owner {
        /// Current marker position.
        at: Point,
    },
}

impl RenderedFeature {
    /// Semantic tag.
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Route { .. } => FeatureKind::Route,
            Self::Start { .. } => FeatureKind::Start,
            Self::End { .. } => FeatureKind::End,
            Self::Arrow { .. } => FeatureKind::Arrow,
            Self::Owner { .. } => FeatureKind::Owner,
        }
    }

    /// Point geometry, `None` for the route line.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Route { .. } => None,
            Self::Start { at } | Self::End { at } | Self::Owner { at } => Some(at),
            Self::Arrow { at, .. } => Some(at),
        }
    }
}

/// Feature collection owned by the renderer.
///
/// Rebuilt wholesale on every path update; the only in-place mutation is moving the owner marker.
#[derive(Clone, Debug, Default)]
pub struct FeatureSource {
    features: Vec<RenderedFeature>,
}

impl FeatureSource {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every feature.
    pub fn clear(&mut self) {
        self.features.clear();
    }

    /// Append a feature.
    pub fn add(&mut self, feature: RenderedFeature) {
        self.features.push(feature);
    }

    /// Features in insertion order.
    pub fn features(&self) -> &[RenderedFeature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Return `true` when nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Count features of one kind.
    pub fn count(&self, kind: FeatureKind) -> usize {
        self.features.iter().filter(|f| f.kind() == kind).count()
    }

    /// Move the owner marker; returns `false` when there is none.
    pub fn move_owner(&mut self, to: Point) -> bool {
        for feature in &mut self.features {
            if let RenderedFeature::Owner { at } = feature {
                *at = to;
                return true;
            }
        }
        false
    }
}

impl Extend<RenderedFeature> for FeatureSource {
    fn extend<I: IntoIterator<Item = RenderedFeature>>(&mut self, iter: I) {
        self.features.extend(iter);
    }
}

/// Features paired with the resolver that styles them, handed to surfaces for drawing.
///
/// Styles are resolved lazily at the surface's current resolution, so a surface can restyle after
/// zooming without asking the viewport to rebuild anything.
#[derive(Clone, Copy)]
pub struct VectorLayer<'a> {
    source: &'a FeatureSource,
    styles: &'a StyleResolver,
}

impl<'a> VectorLayer<'a> {
    /// Pair a feature collection with its style resolver.
    pub fn new(source: &'a FeatureSource, styles: &'a StyleResolver) -> Self {
        Self { source, styles }
    }

    /// Features in draw order.
    pub fn features(&self) -> &'a [RenderedFeature] {
        self.source.features()
    }

    /// Style resolver for this layer.
    pub fn styles(&self) -> &'a StyleResolver {
        self.styles
    }

    /// Features with styles resolved at `resolution`.
    pub fn styled(&self, resolution: f64) -> impl Iterator<Item = (&'a RenderedFeature, Style)> + 'a {
        let styles = self.styles;
        self.source
            .features()
            .iter()
            .map(move |f| (f, styles.resolve(f, resolution)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/feature.rs"]
mod tests;
