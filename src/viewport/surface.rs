//! The rendering-surface contract a viewport draws through.

use crate::coords::projection::{Extent, PixelProjection};
use crate::coords::zoom::ZoomRange;
use crate::foundation::core::{Padding, Point, Size};
use crate::foundation::error::RouteViewResult;
use crate::render::feature::VectorLayer;

/// Initial view handed to a surface when it is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    /// Projection of rendering space.
    pub projection: PixelProjection,
    /// Initial center.
    pub center: Point,
    /// Initial zoom.
    pub zoom: f64,
    /// Allowed zoom range.
    pub zoom_range: ZoomRange,
}

/// Static backdrop image covering the extent.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    /// Image location; surfaces resolve and load it themselves.
    pub url: String,
    /// Extent covered by the image.
    pub extent: Extent,
    /// Identity of the projection the image is placed in.
    pub projection_code: String,
}

/// Rendering surface contract.
///
/// A surface is bound to a host container. It owns the view (center and resolution), draws the
/// backdrop below the vector layer and reports backdrop load completion back to the viewport
/// through [`crate::ViewportEvent`]s delivered by the host.
pub trait MapSurface {
    /// Size currently reported by the host container; may be zero before layout.
    fn container_size(&self) -> Size;

    /// Bind to the container with an initial view and backdrop.
    fn attach(&mut self, view: &ViewSettings, backdrop: &Backdrop) -> RouteViewResult<()>;

    /// Viewport size as of the last attach, fit or [`MapSurface::update_size`]; `None` while
    /// detached.
    fn viewport_size(&self) -> Option<Size>;

    /// Fit `extent` into the viewport leaving `padding` screen pixels around it.
    fn fit_extent(&mut self, extent: Extent, padding: Padding);

    /// Re-measure the container.
    fn update_size(&mut self);

    /// Current resolution in rendering units per screen pixel.
    fn resolution(&self) -> f64;

    /// Draw `layer` above the backdrop.
    fn render(&mut self, layer: &VectorLayer<'_>);

    /// Release the container binding.
    fn detach(&mut self);
}
