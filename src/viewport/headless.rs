//! Recording surface for tests and inspection.

use serde::Serialize;

use crate::coords::projection::Extent;
use crate::coords::zoom::ZoomRange;
use crate::foundation::core::{Padding, Size};
use crate::foundation::error::{RouteViewError, RouteViewResult};
use crate::render::feature::{RenderedFeature, VectorLayer};
use crate::style::resolver::Style;
use crate::viewport::surface::{Backdrop, MapSurface, ViewSettings};
use crate::viewport::view::View;

/// One call made on a [`HeadlessSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    /// Bound to the container.
    Attach {
        /// Projection identity.
        projection_code: String,
        /// Initial zoom.
        zoom: f64,
        /// Allowed zoom range.
        zoom_range: ZoomRange,
        /// Backdrop image location.
        backdrop_url: String,
    },
    /// Extent fitted.
    Fit {
        /// Fitted extent.
        extent: Extent,
        /// Padding used.
        padding: Padding,
        /// Resolution after the fit.
        resolution: f64,
    },
    /// Container re-measured.
    UpdateSize(Size),
    /// Layer drawn.
    Render {
        /// Number of features drawn.
        features: usize,
    },
    /// Container binding released.
    Detach,
}

/// Snapshot of one rendered layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedFrame {
    /// Resolution the styles were resolved at.
    pub resolution: f64,
    /// Features in draw order.
    pub features: Vec<RenderedFeature>,
    /// Style of each feature.
    #[serde(skip)]
    pub styles: Vec<Style>,
}

/// Surface that draws nothing and records what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    container: Size,
    view: Option<View>,
    calls: Vec<SurfaceCall>,
    frames: Vec<RenderedFrame>,
}

impl HeadlessSurface {
    /// Surface whose container currently measures `container`.
    pub fn new(container: Size) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    /// Change what the container reports, as a host layout pass would.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
    }

    /// Zoom to `resolution`, as user interaction would.
    pub fn set_resolution(&mut self, resolution: f64) {
        if let Some(view) = self.view.as_mut() {
            view.set_resolution(resolution);
        }
    }

    /// Current view, `None` while detached.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Whether the surface is bound to its container.
    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    /// Calls in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Every rendered layer in order.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Most recent rendered layer.
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }

    /// Number of fits performed.
    pub fn fit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Fit { .. }))
            .count()
    }
}

impl MapSurface for HeadlessSurface {
    fn container_size(&self) -> Size {
        self.container
    }

    fn attach(&mut self, view: &ViewSettings, backdrop: &Backdrop) -> RouteViewResult<()> {
        if self.view.is_some() {
            return Err(RouteViewError::surface("surface is already attached"));
        }
        self.view = Some(View::new(view, self.container));
        self.calls.push(SurfaceCall::Attach {
            projection_code: view.projection.code().to_owned(),
            zoom: view.zoom,
            zoom_range: view.zoom_range,
            backdrop_url: backdrop.url.clone(),
        });
        Ok(())
    }

    fn viewport_size(&self) -> Option<Size> {
        self.view.map(|v| v.size())
    }

    fn fit_extent(&mut self, extent: Extent, padding: Padding) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.set_size(self.container);
        if view.fit(extent, padding) {
            self.calls.push(SurfaceCall::Fit {
                extent,
                padding,
                resolution: view.resolution(),
            });
        }
    }

    fn update_size(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.set_size(self.container);
            self.calls.push(SurfaceCall::UpdateSize(self.container));
        }
    }

    fn resolution(&self) -> f64 {
        self.view.map_or(1.0, |v| v.resolution())
    }

    fn render(&mut self, layer: &VectorLayer<'_>) {
        if self.view.is_none() {
            return;
        }
        let resolution = self.resolution();
        let (features, styles): (Vec<_>, Vec<_>) = layer
            .styled(resolution)
            .map(|(f, s)| (f.clone(), s))
            .unzip();
        self.frames.push(RenderedFrame {
            resolution,
            features,
            styles,
        });
        self.calls.push(SurfaceCall::Render {
            features: layer.features().len(),
        });
    }

    fn detach(&mut self) {
        if self.view.take().is_some() {
            self.calls.push(SurfaceCall::Detach);
        }
    }
}
