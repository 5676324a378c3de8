//! `vello_cpu` rasterizer implementing [`MapSurface`].

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{Circle, PathEl, Shape, Stroke, StrokeOpts};

use crate::coords::projection::Extent;
use crate::foundation::core::{Affine, BezPath, Padding, Point, Rgba8, Size};
use crate::foundation::error::{RouteViewError, RouteViewResult};
use crate::render::feature::{FeatureKind, RenderedFeature, VectorLayer};
use crate::raster::decode::PreparedImage;
use crate::style::resolver::{IconStyle, Style};
use crate::viewport::surface::{Backdrop, MapSurface, ViewSettings};
use crate::viewport::view::View;

/// Screen size in pixels of a built-in marker glyph at scale 1.
pub const ICON_BASE_PX: f64 = 16.0;

const STROKE_TOLERANCE: f64 = 0.1;
const START_GLYPH: Rgba8 = Rgba8::rgb(0x2e, 0xa0, 0x43);
const END_GLYPH: Rgba8 = Rgba8::rgb(0xd9, 0x30, 0x25);
const OWNER_GLYPH: Rgba8 = Rgba8::rgb(0x1e, 0x6f, 0xd9);
const ARROW_GLYPH: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);

/// A rendered frame in RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

struct Attached {
    view: View,
    extent: Extent,
}

/// CPU rendering surface of a fixed pixel size.
///
/// Backdrop and icon images are supplied by the host; icons without an image are drawn as
/// built-in vector glyphs. [`CpuSurface::snapshot`] rasterizes the last rendered layer.
pub struct CpuSurface {
    width: u16,
    height: u16,
    clear: Rgba8,
    attached: Option<Attached>,
    backdrop: Option<vello_cpu::Image>,
    icons: HashMap<String, vello_cpu::Image>,
    scene: Vec<(FeatureKind, RenderedFeature, Style)>,
}

impl CpuSurface {
    /// Surface of `width x height` pixels with a transparent background.
    pub fn new(width: u32, height: u32) -> RouteViewResult<Self> {
        let (width, height) = surface_dims(width, height)?;
        Ok(Self {
            width,
            height,
            clear: Rgba8::rgba(0, 0, 0, 0),
            attached: None,
            backdrop: None,
            icons: HashMap::new(),
            scene: Vec::new(),
        })
    }

    /// Background color painted below the backdrop.
    pub fn with_clear_color(mut self, color: Rgba8) -> Self {
        self.clear = color;
        self
    }

    /// Resize the target; takes effect on the next [`MapSurface::update_size`].
    pub fn set_container_size(&mut self, width: u32, height: u32) -> RouteViewResult<()> {
        let (width, height) = surface_dims(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Use `image` as the backdrop, stretched over the extent.
    pub fn set_backdrop_image(&mut self, image: &PreparedImage) -> RouteViewResult<()> {
        self.backdrop = Some(image_paint(image)?);
        Ok(())
    }

    /// Draw icons whose source is `src` with `image` instead of the built-in glyph.
    pub fn set_icon_image(&mut self, src: &str, image: &PreparedImage) -> RouteViewResult<()> {
        self.icons.insert(src.to_owned(), image_paint(image)?);
        Ok(())
    }

    /// Zoom to `resolution`, as user interaction would.
    pub fn set_resolution(&mut self, resolution: f64) {
        if let Some(a) = self.attached.as_mut() {
            a.view.set_resolution(resolution);
        }
    }

    /// Current view, `None` while detached.
    pub fn view(&self) -> Option<&View> {
        self.attached.as_ref().map(|a| &a.view)
    }

    /// Rasterize the backdrop and the last rendered layer.
    #[tracing::instrument(level = "debug", skip(self), fields(width = self.width, height = self.height))]
    pub fn snapshot(&self) -> RouteViewResult<FrameRGBA> {
        if self.width == 0 || self.height == 0 {
            return Err(RouteViewError::surface("surface has no size"));
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        clear_pixmap(&mut pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if self.clear.a > 0 {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(cpu_color(self.clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }

        if let Some(attached) = &self.attached {
            let to_screen = attached.view.transform();
            if let Some(backdrop) = &self.backdrop {
                draw_backdrop(&mut ctx, backdrop, to_screen, attached.extent);
            }
            for (kind, feature, style) in &self.scene {
                match (feature, style) {
                    (RenderedFeature::Route { line }, Style::Stroke(stroke)) => {
                        let screen_path = to_screen * line.to_bez_path();
                        let outline = kurbo::stroke(
                            screen_path.iter(),
                            &Stroke::new(stroke.width)
                                .with_caps(stroke.cap)
                                .with_join(stroke.join),
                            &StrokeOpts::default(),
                            STROKE_TOLERANCE,
                        );
                        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                        ctx.set_paint(cpu_color(stroke.color));
                        ctx.fill_path(&bezpath_to_cpu(&outline));
                    }
                    (_, Style::Icon(icon)) => {
                        if let Some(at) = feature.position() {
                            self.draw_icon(&mut ctx, *kind, icon, to_screen * at);
                        }
                    }
                    (_, Style::Stroke(_)) => {
                        tracing::debug!(kind = kind.as_str(), "stroke style on point feature skipped");
                    }
                }
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_icon(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        kind: FeatureKind,
        icon: &IconStyle,
        at: Point,
    ) {
        let placement = Affine::translate(at.to_vec2())
            * Affine::rotate(icon.rotation)
            * Affine::scale(icon.scale);

        if let Some(paint) = self.icons.get(&*icon.src)
            && let Some((w, h)) = image_paint_size(paint)
        {
            let anchor = Affine::translate((-icon.anchor[0] * w, -icon.anchor[1] * h));
            ctx.set_transform(affine_to_cpu(placement * anchor));
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            return;
        }

        let (glyph, color) = glyph_for(kind);
        ctx.set_transform(affine_to_cpu(placement));
        ctx.set_paint(cpu_color(color));
        ctx.fill_path(&bezpath_to_cpu(&glyph));
    }
}

impl MapSurface for CpuSurface {
    fn container_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn attach(&mut self, view: &ViewSettings, backdrop: &Backdrop) -> RouteViewResult<()> {
        if self.attached.is_some() {
            return Err(RouteViewError::surface("surface is already attached"));
        }
        tracing::debug!(url = %backdrop.url, projection = %backdrop.projection_code, "cpu surface attached");
        self.attached = Some(Attached {
            view: View::new(view, self.container_size()),
            extent: backdrop.extent,
        });
        Ok(())
    }

    fn viewport_size(&self) -> Option<Size> {
        self.attached.as_ref().map(|a| a.view.size())
    }

    fn fit_extent(&mut self, extent: Extent, padding: Padding) {
        let size = self.container_size();
        if let Some(a) = self.attached.as_mut() {
            a.view.set_size(size);
            a.view.fit(extent, padding);
        }
    }

    fn update_size(&mut self) {
        let size = self.container_size();
        if let Some(a) = self.attached.as_mut() {
            a.view.set_size(size);
        }
    }

    fn resolution(&self) -> f64 {
        self.attached.as_ref().map_or(1.0, |a| a.view.resolution())
    }

    fn render(&mut self, layer: &VectorLayer<'_>) {
        let resolution = self.resolution();
        self.scene = layer
            .styled(resolution)
            .map(|(f, s)| (f.kind(), f.clone(), s))
            .collect();
    }

    fn detach(&mut self) {
        self.attached = None;
        self.scene.clear();
    }
}

fn surface_dims(width: u32, height: u32) -> RouteViewResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RouteViewError::surface("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RouteViewError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

fn draw_backdrop(
    ctx: &mut vello_cpu::RenderContext,
    image: &vello_cpu::Image,
    to_screen: Affine,
    extent: Extent,
) {
    let Some((w, h)) = image_paint_size(image) else {
        return;
    };
    // image rows run top-down while rendering space is y-up
    let image_to_extent = Affine::new([
        extent.width() / w,
        0.0,
        0.0,
        -extent.height() / h,
        extent.min_x(),
        extent.max_y(),
    ]);
    ctx.set_transform(affine_to_cpu(to_screen * image_to_extent));
    ctx.set_paint(image.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
}

fn glyph_for(kind: FeatureKind) -> (BezPath, Rgba8) {
    let r = ICON_BASE_PX / 2.0;
    match kind {
        FeatureKind::Arrow => {
            let mut path = BezPath::new();
            path.move_to((r, 0.0));
            path.line_to((-0.8 * r, -0.7 * r));
            path.line_to((-0.4 * r, 0.0));
            path.line_to((-0.8 * r, 0.7 * r));
            path.close_path();
            (path, ARROW_GLYPH)
        }
        FeatureKind::Start => (Circle::new(Point::ORIGIN, r).to_path(0.05), START_GLYPH),
        FeatureKind::End => (Circle::new(Point::ORIGIN, r).to_path(0.05), END_GLYPH),
        FeatureKind::Owner | FeatureKind::Route => {
            (Circle::new(Point::ORIGIN, r).to_path(0.05), OWNER_GLYPH)
        }
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(image: &PreparedImage) -> RouteViewResult<vello_cpu::Image> {
    let (w, h) = surface_dims(image.width, image.height)?;
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba8_premul.len() != expected {
        return Err(RouteViewError::decode("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(expected / 4);
    for px in image.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn image_paint_size(image: &vello_cpu::Image) -> Option<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Some((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => None,
    }
}
