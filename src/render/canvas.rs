use std::{path::Path, sync::Arc};

use crate::{
    assets::decode::{PreparedImage, unpremultiply_rgba8_in_place},
    assets::fonts::FontFace,
    foundation::core::{Affine, CanvasSize, Rgb},
    foundation::error::{PresentationError, PresentationResult},
    render::text::{TextExtents, TextLayoutEngine, fill_line_glyphs},
};

/// Owned raster surface for one slide.
///
/// Drawing is recorded into a `vello_cpu` render context and rasterized on readback, so
/// [`Canvas::to_rgba8`] and [`Canvas::export_png`] can be called any number of times without
/// changing the content. Dimensions never change after creation.
pub struct Canvas {
    size: CanvasSize,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    color: Rgb,
    font_size: f64,
    text: Option<TextLayoutEngine>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("font_size", &self.font_size)
            .field("font", &self.font_face().map(FontFace::family))
            .finish()
    }
}

impl Canvas {
    /// Font size of a fresh canvas, before any text call sets one.
    pub const DEFAULT_FONT_SIZE: f64 = 40.0;

    /// Create a blank canvas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> PresentationResult<Self> {
        Self::with_size(CanvasSize { width, height })
    }

    /// Create a blank canvas of the given size.
    ///
    /// Fails with [`PresentationError::SurfaceCreation`] if the rasterizer cannot address it.
    pub fn with_size(size: CanvasSize) -> PresentationResult<Self> {
        let (width, height) = size.to_u16()?;
        Ok(Self {
            size,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            color: Rgb::BLACK,
            font_size: Self::DEFAULT_FONT_SIZE,
            text: None,
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Current paint color for text.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Font size used by the most recent text call.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Select the face used by text operations.
    pub fn set_font_face(&mut self, face: &FontFace) -> PresentationResult<()> {
        let same = self.text.as_ref().is_some_and(|t| {
            Arc::ptr_eq(t.face().data(), face.data()) && t.face().index() == face.index()
        });
        if !same {
            self.text = Some(TextLayoutEngine::new(face.clone())?);
        }
        Ok(())
    }

    pub fn font_face(&self) -> Option<&FontFace> {
        self.text.as_ref().map(TextLayoutEngine::face)
    }

    /// Use an already-built engine for text, replacing any current one.
    pub(crate) fn install_text_engine(&mut self, engine: TextLayoutEngine) {
        self.text = Some(engine);
    }

    pub(crate) fn take_text_engine(&mut self) -> Option<TextLayoutEngine> {
        self.text.take()
    }

    /// Paint every pixel `color`, discarding everything drawn so far.
    pub fn fill(&mut self, color: Rgb) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let [r, g, b, a] = color.to_rgba8();
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Draw `text` with the left end of its baseline at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, size: f64, x: f64, y: f64) -> PresentationResult<()> {
        let engine = self
            .text
            .as_mut()
            .ok_or_else(|| PresentationError::font_load("no font face selected on canvas"))?;
        let line = engine.layout_line(text, size, self.color)?;
        self.font_size = size;
        fill_line_glyphs(&mut self.ctx, engine.cpu_font(), &line, x, y);
        Ok(())
    }

    /// Ink box of `text` at `size`, relative to its baseline-left origin.
    pub fn text_extents(&mut self, text: &str, size: f64) -> PresentationResult<TextExtents> {
        let engine = self
            .text
            .as_mut()
            .ok_or_else(|| PresentationError::font_load("no font face selected on canvas"))?;
        engine.extents(text, size)
    }

    /// Draw `text` so the center of its ink box lands on `(cx, cy)`.
    pub fn draw_centered_text(
        &mut self,
        text: &str,
        size: f64,
        cx: f64,
        cy: f64,
    ) -> PresentationResult<()> {
        let extents = self.text_extents(text, size)?;
        let (x, y) = extents.centered_origin(cx, cy);
        self.draw_text(text, size, x, y)
    }

    /// Blit `image` through `transform` (image pixel space to canvas space).
    pub fn draw_image(&mut self, image: &PreparedImage, transform: Affine) -> PresentationResult<()> {
        let pixmap = prepared_image_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    /// Stretch `image` to exactly fill the box inset by `margin` of each axis on every side.
    ///
    /// The x and y scale factors are independent: the source aspect ratio is not preserved.
    pub fn draw_image_fit(&mut self, image: &PreparedImage, margin: f64) -> PresentationResult<()> {
        let transform = fit_transform(self.size, image.width, image.height, margin)?;
        self.draw_image(image, transform)
    }

    /// Rasterize the current content as straight-alpha RGBA8, row-major.
    pub fn to_rgba8(&mut self) -> Vec<u8> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        data
    }

    /// Write the current content as a PNG file.
    ///
    /// The canvas is left as it was; exporting twice writes identical files.
    pub fn export_png(&mut self, path: &Path) -> PresentationResult<()> {
        let data = self.to_rgba8();
        image::save_buffer_with_format(
            path,
            &data,
            self.size.width,
            self.size.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| PresentationError::export_io(format!("write png '{}': {e}", path.display())))
    }
}

/// Translate/scale mapping an `image_w` x `image_h` image onto the margin-inset box of `canvas`.
pub(crate) fn fit_transform(
    canvas: CanvasSize,
    image_w: u32,
    image_h: u32,
    margin: f64,
) -> PresentationResult<Affine> {
    if !margin.is_finite() || !(0.0..0.5).contains(&margin) {
        return Err(PresentationError::validation(format!(
            "image margin {margin} must be in [0, 0.5)"
        )));
    }
    if image_w == 0 || image_h == 0 {
        return Err(PresentationError::validation("image must have non-zero area"));
    }

    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let target_w = w * (1.0 - 2.0 * margin);
    let target_h = h * (1.0 - 2.0 * margin);

    Ok(Affine::translate((w * margin, h * margin))
        * Affine::scale_non_uniform(
            target_w / f64::from(image_w),
            target_h / f64::from(image_h),
        ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Wrap decoded pixels as a paint source. Sizes are checked by [`crate::decode_image`]; this only
/// rejects hand-built values whose byte length disagrees with their dimensions.
fn prepared_image_pixmap(image: &PreparedImage) -> PresentationResult<vello_cpu::Pixmap> {
    let (Ok(w), Ok(h)) = (u16::try_from(image.width), u16::try_from(image.height)) else {
        return Err(PresentationError::validation("image dimensions exceed u16"));
    };
    if image.rgba8_premul.len() != usize::from(w) * usize::from(h) * 4 {
        return Err(PresentationError::validation(
            "prepared image byte length mismatch",
        ));
    }

    let pixels: Vec<_> = image
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    let translucent = pixels.iter().any(|px| px.a != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, translucent,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
