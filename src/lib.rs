//! Routeview renders a vehicle's route over a static floor-plan image.
//!
//! A [`RouteViewport`] owns the coordinate system of one backdrop image, fits it into a host
//! container through a [`MapSurface`], draws the route with start/end markers and either static
//! direction arrows or a looping moving marker, and re-renders on path updates and host events.
//!
//! - Build a [`ViewportConfig`] (or derive one from a [`VehiclePathResponse`])
//! - Create a viewport with [`RouteViewport::builder`]
//! - Forward [`ViewportEvent`]s from the host; call [`RouteViewport::update_path`] as data changes
//!
//! Two surfaces ship with the crate: [`HeadlessSurface`] records what it is asked to draw and
//! [`CpuSurface`] rasterizes frames with `vello_cpu`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod coords;
mod foundation;
mod geometry;
mod payload;
mod raster;
mod render;
mod style;
mod viewport;

pub use crate::foundation::core::{
    Affine, BezPath, Padding, Point, Rect, Rgba8, RoutePoint, Size, Vec2,
};
pub use crate::foundation::error::{RouteViewError, RouteViewResult};

pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::driver::{AnimationDriver, TickHandle, TickOutcome, pass_fraction};
pub use crate::coords::projection::{Extent, PixelProjection, Units, flip_y};
pub use crate::coords::zoom::{
    ZOOM_LEVELS, ZoomRange, min_zoom, resolution_for_zoom, zoom_for_resolution,
};
pub use crate::geometry::line::{HEADING_DELTA, RouteLine};
pub use crate::payload::{
    ENVELOPE_SUCCESS, ParkingTarget, PathMapInfo, RESULT_SUCCESS, VehiclePathResponse,
    VehicleRoute, parse_point,
};
pub use crate::raster::cpu::{CpuSurface, FrameRGBA, ICON_BASE_PX};
pub use crate::raster::decode::{PreparedImage, decode_image, load_image};
pub use crate::render::feature::{FeatureKind, FeatureSource, RenderedFeature, VectorLayer};
pub use crate::render::path::{
    FALLBACK_ARROW_FRACTION, Indicator, MAX_ARROWS, PathRenderer, place_arrows,
};
pub use crate::style::resolver::{
    ICON_ANCHOR, IconStyle, MIN_ARROW_SCALE, MIN_SCALE_RESOLUTION, StrokeStyle, Style,
    StyleResolver,
};
pub use crate::viewport::config::{
    ARROW_SCALE_RATIO, ARROW_SPACING_DIVISOR, DEFAULT_ARROW_ICON, DEFAULT_END_ICON,
    DEFAULT_ICON_SCALE, DEFAULT_OWNER_DURATION_MS, DEFAULT_OWNER_ICON, DEFAULT_START_ICON,
    IconSet, MIN_OWNER_DURATION_MS, OWNER_SCALE_RATIO, PathIndicatorMode, ViewportConfig,
};
pub use crate::viewport::frame::{FrameQueue, FrameTask};
pub use crate::viewport::headless::{HeadlessSurface, RenderedFrame, SurfaceCall};
pub use crate::viewport::route_viewport::{
    BackdropStatus, ReadyCallback, RouteViewport, RouteViewportBuilder, ViewportEvent,
};
pub use crate::viewport::surface::{Backdrop, MapSurface, ViewSettings};
pub use crate::viewport::view::View;
