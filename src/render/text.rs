use std::borrow::Cow;

use crate::{
    assets::fonts::{FontFace, register_face},
    foundation::core::Rgb,
    foundation::error::{PresentationError, PresentationResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgb> for TextBrushRgba8 {
    fn from(c: Rgb) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        Self { r, g, b, a }
    }
}

/// Bounding box of the painted pixels of a string, relative to its origin.
///
/// The origin is the left end of the baseline, so `y_bearing` is negative for text that sits
/// above the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtents {
    /// Horizontal offset from the origin to the left edge of the ink.
    pub x_bearing: f64,
    /// Vertical offset from the origin to the top edge of the ink.
    pub y_bearing: f64,
    /// Ink width.
    pub width: f64,
    /// Ink height.
    pub height: f64,
}

impl TextExtents {
    /// Origin that puts the center of this box on `(cx, cy)`.
    pub fn centered_origin(&self, cx: f64, cy: f64) -> (f64, f64) {
        (
            cx - self.width / 2.0 - self.x_bearing,
            cy - self.height / 2.0 - self.y_bearing,
        )
    }
}

/// A shaped single-line string.
pub(crate) struct TextLine {
    layout: parley::Layout<TextBrushRgba8>,
}

impl TextLine {
    pub fn advance(&self) -> f64 {
        f64::from(self.layout.width())
    }

    pub fn baseline(&self) -> f64 {
        self.layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0)
    }

    pub fn ascent(&self) -> f64 {
        self.layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().ascent))
            .unwrap_or(0.0)
    }

    pub fn descent(&self) -> f64 {
        self.layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().descent))
            .unwrap_or(0.0)
    }

    /// Logical line box, used when the string paints nothing.
    fn logical_extents(&self) -> TextExtents {
        TextExtents {
            x_bearing: 0.0,
            y_bearing: -self.ascent(),
            width: self.advance(),
            height: self.ascent() + self.descent(),
        }
    }
}

/// Shapes single lines of text with one font face.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    face: FontFace,
    family: String,
    cpu_font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("face", &self.face)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Build an engine with `face` registered as its only font.
    pub fn new(face: FontFace) -> PresentationResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_face(&mut font_ctx, face.data(), face.index())?;
        let cpu_font = face.to_cpu_font();
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            face,
            family,
            cpu_font,
        })
    }

    /// The face every layout is shaped with.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Measure the ink box of `text` at `size_px`.
    pub fn extents(&mut self, text: &str, size_px: f64) -> PresentationResult<TextExtents> {
        let line = self.layout_line(text, size_px, Rgb::BLACK)?;
        Ok(self.measure_ink(&line).unwrap_or_else(|| line.logical_extents()))
    }

    pub(crate) fn cpu_font(&self) -> &vello_cpu::peniko::FontData {
        &self.cpu_font
    }

    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f64,
        color: Rgb,
    ) -> PresentationResult<TextLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PresentationError::validation(
                "font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(TextLine { layout })
    }

    /// Rasterize `line` on a scratch surface and scan for covered pixels.
    ///
    /// Returns `None` when nothing is painted or the scratch surface would not fit `u16`.
    fn measure_ink(&self, line: &TextLine) -> Option<TextExtents> {
        // Glyph outlines may overhang the logical box on any side.
        let pad = (line.ascent() + line.descent()).ceil() + 2.0;
        let w = (line.advance() + 2.0 * pad).ceil();
        let h = (f64::from(line.layout.height()) + 2.0 * pad).ceil();
        if w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
            tracing::debug!(
                width = w,
                height = h,
                "ink scratch surface exceeds u16, using logical text box"
            );
            return None;
        }
        let (w, h) = (w as u16, h as u16);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        fill_line_glyphs(&mut ctx, &self.cpu_font, line, pad, pad + line.baseline());
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (i, px) in pixmap.data_as_u8_slice().chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let (x, y) = (i % usize::from(w), i / usize::from(w));
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }

        let (x0, y0, x1, y1) = bounds?;
        Some(TextExtents {
            x_bearing: x0 as f64 - pad,
            y_bearing: y0 as f64 - pad - line.baseline(),
            width: (x1 - x0 + 1) as f64,
            height: (y1 - y0 + 1) as f64,
        })
    }
}

/// Paint every glyph of `line` with its baseline-left origin at `(x, y)`.
pub(crate) fn fill_line_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    line: &TextLine,
    x: f64,
    y: f64,
) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        x,
        y - line.baseline(),
    )));

    for layout_line in line.layout.lines() {
        for item in layout_line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let mut pen_x = run.offset();
            let baseline = run.baseline();
            let glyphs = run.glyphs().map(|g| {
                let glyph = vello_cpu::Glyph {
                    id: g.id,
                    x: pen_x + g.x,
                    y: baseline - g.y,
                };
                pen_x += g.advance;
                glyph
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
