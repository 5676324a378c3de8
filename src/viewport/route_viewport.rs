//! The `RouteViewport` component: configuration, render state and host event handling.

use std::fmt;

use crate::animation::clock::{Clock, SystemClock};
use crate::animation::driver::AnimationDriver;
use crate::coords::projection::PixelProjection;
use crate::coords::zoom::{ZoomRange, min_zoom};
use crate::foundation::core::RoutePoint;
use crate::foundation::error::RouteViewResult;
use crate::geometry::line::RouteLine;
use crate::render::feature::{FeatureSource, VectorLayer};
use crate::render::path::{Indicator, PathRenderer};
use crate::style::resolver::StyleResolver;
use crate::viewport::config::ViewportConfig;
use crate::viewport::frame::{FrameQueue, FrameTask};
use crate::viewport::surface::{Backdrop, MapSurface, ViewSettings};

/// Notification fired once the backdrop settled and the initial path was drawn.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// Host notifications delivered to [`RouteViewport::handle_event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The backdrop image finished loading.
    BackdropLoaded,
    /// The backdrop image failed to load.
    BackdropFailed,
    /// The container was resized.
    Resize,
    /// The view was zoomed or panned by the surface.
    ViewChanged,
    /// The host's next animation frame.
    AnimationFrame,
}

/// Load state of the backdrop image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropStatus {
    /// No load notification yet; path updates are buffered.
    Pending,
    /// Loaded.
    Loaded,
    /// Failed; the path is drawn without a backdrop.
    Failed,
}

impl BackdropStatus {
    /// Whether path rendering is unblocked.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Mutable state owned by a viewport.
#[derive(Debug)]
struct RenderState {
    features: FeatureSource,
    pending_path: Vec<RoutePoint>,
    line: Option<RouteLine>,
    backdrop: BackdropStatus,
    animation: Option<AnimationDriver>,
    frames: FrameQueue,
    destroyed: bool,
}

/// Builder for [`RouteViewport`].
pub struct RouteViewportBuilder<S: MapSurface> {
    config: ViewportConfig,
    surface: S,
    path: Vec<RoutePoint>,
    clock: Option<Box<dyn Clock>>,
    on_ready: Option<ReadyCallback>,
}

impl<S: MapSurface> RouteViewportBuilder<S> {
    /// Initial path, drawn once the backdrop settles.
    pub fn path(mut self, path: impl Into<Vec<RoutePoint>>) -> Self {
        self.path = path.into();
        self
    }

    /// Time source for the moving marker; defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Ready notification.
    pub fn on_ready(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// Validate the configuration, attach the surface and fit the extent.
    pub fn build(self) -> RouteViewResult<RouteViewport<S>> {
        let Self {
            config,
            mut surface,
            path,
            clock,
            on_ready,
        } = self;
        config.validate()?;

        let extent = config.extent();
        let projection = PixelProjection::new(extent);
        let min = min_zoom(surface.container_size(), extent.width(), extent.height());
        let zoom_range = ZoomRange::from_min(min);

        let indicator = match config.arrow_spacing() {
            Some(spacing) => Indicator::Arrows { spacing },
            None => Indicator::MovingMarker,
        };
        let animation = config.owner_duration_ms().map(AnimationDriver::new);

        surface.attach(
            &ViewSettings {
                projection: projection.clone(),
                center: extent.center(),
                zoom: min,
                zoom_range,
            },
            &Backdrop {
                url: config.image_url.clone(),
                extent,
                projection_code: projection.code().to_owned(),
            },
        )?;
        tracing::debug!(
            projection = projection.code(),
            min_zoom = min,
            max_zoom = zoom_range.max,
            "viewport attached"
        );

        let mut viewport = RouteViewport {
            styles: StyleResolver::new(&config),
            renderer: PathRenderer::new(projection.clone(), indicator),
            projection,
            zoom_range,
            config,
            surface,
            clock: clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            on_ready,
            state: RenderState {
                features: FeatureSource::new(),
                pending_path: path,
                line: None,
                backdrop: BackdropStatus::Pending,
                animation,
                frames: FrameQueue::new(),
                destroyed: false,
            },
        };
        viewport.fit_to_extent();
        Ok(viewport)
    }
}

/// Route display over a static backdrop image.
///
/// Path updates are buffered until the backdrop reports load or failure; after that they render
/// synchronously. The host forwards resize, frame and load notifications through
/// [`RouteViewport::handle_event`]. Dropping the viewport destroys it.
pub struct RouteViewport<S: MapSurface> {
    config: ViewportConfig,
    projection: PixelProjection,
    zoom_range: ZoomRange,
    styles: StyleResolver,
    renderer: PathRenderer,
    surface: S,
    clock: Box<dyn Clock>,
    on_ready: Option<ReadyCallback>,
    state: RenderState,
}

impl<S: MapSurface> RouteViewport<S> {
    /// Start building a viewport over `surface`.
    pub fn builder(config: ViewportConfig, surface: S) -> RouteViewportBuilder<S> {
        RouteViewportBuilder {
            config,
            surface,
            path: Vec::new(),
            clock: None,
            on_ready: None,
        }
    }

    /// Replace the displayed path.
    ///
    /// Before the backdrop settles only the latest path is kept. Ignored after [`Self::destroy`].
    pub fn update_path(&mut self, path: impl Into<Vec<RoutePoint>>) {
        if self.state.destroyed {
            tracing::debug!("path update after destroy ignored");
            return;
        }
        self.state.pending_path = path.into();
        if self.state.backdrop.is_settled() {
            self.draw();
        }
    }

    /// Tear down: cancel pending frames and animation, detach the surface and drop all features.
    ///
    /// Safe to call repeatedly; every later call and event is a no-op.
    pub fn destroy(&mut self) {
        if self.state.destroyed {
            return;
        }
        self.state.destroyed = true;
        self.state.frames.clear();
        if let Some(driver) = self.state.animation.as_mut() {
            driver.cancel();
        }
        self.surface.detach();
        self.state.features.clear();
        self.state.pending_path.clear();
        self.state.line = None;
        self.on_ready = None;
        tracing::debug!("viewport destroyed");
    }

    /// Process a host notification.
    pub fn handle_event(&mut self, event: ViewportEvent) {
        if self.state.destroyed {
            tracing::trace!(?event, "event after destroy ignored");
            return;
        }
        match event {
            ViewportEvent::BackdropLoaded => self.backdrop_settled(BackdropStatus::Loaded),
            ViewportEvent::BackdropFailed => self.backdrop_settled(BackdropStatus::Failed),
            ViewportEvent::Resize => {
                self.surface.update_size();
                self.render();
            }
            ViewportEvent::ViewChanged => self.render(),
            ViewportEvent::AnimationFrame => self.run_frame(),
        }
    }

    /// Rendered features.
    pub fn features(&self) -> &FeatureSource {
        &self.state.features
    }

    /// Current normalized route line.
    pub fn route_line(&self) -> Option<&RouteLine> {
        self.state.line.as_ref()
    }

    /// Rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable rendering surface, for host-side interaction such as zooming.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Backdrop load state.
    pub fn backdrop(&self) -> BackdropStatus {
        self.state.backdrop
    }

    /// Allowed zoom range computed at construction.
    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Projection of rendering space.
    pub fn projection(&self) -> &PixelProjection {
        &self.projection
    }

    /// Configuration.
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Style resolver.
    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    /// Whether [`Self::destroy`] ran.
    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed
    }

    /// Whether the host should deliver an [`ViewportEvent::AnimationFrame`].
    pub fn wants_frame(&self) -> bool {
        !self.state.frames.is_empty()
    }

    /// Pass fraction of the moving marker at the last frame.
    pub fn animation_fraction(&self) -> Option<f64> {
        self.state.animation.as_ref().and_then(|a| a.fraction())
    }

    fn fit_to_extent(&mut self) {
        match self.surface.viewport_size() {
            Some(size) if !size.is_empty() => {
                self.surface
                    .fit_extent(self.projection.extent(), self.config.padding);
                self.render();
            }
            _ => {
                tracing::debug!("viewport has no size yet; retrying fit next frame");
                self.state.frames.request(FrameTask::Fit);
            }
        }
    }

    fn backdrop_settled(&mut self, status: BackdropStatus) {
        if self.state.backdrop.is_settled() {
            tracing::debug!(?status, "backdrop already settled; notification ignored");
            return;
        }
        self.state.backdrop = status;
        if status == BackdropStatus::Failed {
            tracing::warn!(url = %self.config.image_url, "backdrop image failed to load");
        }
        if !self.state.pending_path.is_empty() {
            self.draw();
        }
        if let Some(on_ready) = self.on_ready.take() {
            on_ready();
        }
    }

    fn draw(&mut self) {
        let line = self
            .renderer
            .draw(&self.state.pending_path, &mut self.state.features);
        if let Some(driver) = self.state.animation.as_mut() {
            if let Some(stale) = driver.cancel() {
                self.state.frames.cancel(FrameTask::Animate(stale));
            }
            if let Some(line) = line.clone()
                && let Some(handle) = driver.restart(line, self.clock.now_ms())
            {
                self.state.frames.request(FrameTask::Animate(handle));
            }
        }
        self.state.line = line;
        self.render();
    }

    fn run_frame(&mut self) {
        let mut dirty = false;
        for task in self.state.frames.take() {
            match task {
                FrameTask::Fit => {
                    self.surface.update_size();
                    self.fit_to_extent();
                }
                FrameTask::Animate(handle) => {
                    let now = self.clock.now_ms();
                    let Some(driver) = self.state.animation.as_mut() else {
                        continue;
                    };
                    let Some(out) = driver.tick(handle, now) else {
                        continue;
                    };
                    if out.wrapped {
                        tracing::debug!(passes = driver.passes(), "marker pass complete");
                    }
                    self.state.features.move_owner(out.position);
                    self.state.frames.request(FrameTask::Animate(out.next));
                    dirty = true;
                }
            }
        }
        if dirty {
            self.render();
        }
    }

    fn render(&mut self) {
        self.surface
            .render(&VectorLayer::new(&self.state.features, &self.styles));
    }
}

impl<S: MapSurface> Drop for RouteViewport<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: MapSurface> fmt::Debug for RouteViewport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteViewport")
            .field("projection", &self.projection.code())
            .field("zoom_range", &self.zoom_range)
            .field("backdrop", &self.state.backdrop)
            .field("features", &self.state.features.len())
            .field("destroyed", &self.state.destroyed)
            .finish()
    }
}
