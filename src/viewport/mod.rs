//! Viewport configuration, the rendering-surface seam and the `RouteViewport` lifecycle.

pub(crate) mod config;
pub(crate) mod frame;
pub(crate) mod headless;
pub(crate) mod route_viewport;
pub(crate) mod surface;
pub(crate) mod view;
