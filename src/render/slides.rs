//! One renderer per slide variant.
//!
//! Every renderer expects a fresh canvas and paints the complete frame. Sizes and offsets are
//! reference pixels for a 1920x1080 canvas and are not scaled to the canvas.

use std::path::Path;

use crate::{
    assets::decode::load_image,
    deck::model::SlideSpec,
    foundation::core::Rgb,
    foundation::error::PresentationResult,
    render::canvas::Canvas,
};

/// Heading size for title and bullet slides.
pub const TITLE_FONT_SIZE: f64 = 200.0;
/// Bullet line size.
pub const BULLET_FONT_SIZE: f64 = 100.0;
/// Baseline-left anchor of the bullet slide heading.
pub const BULLET_TITLE_ORIGIN: (f64, f64) = (100.0, 300.0);
/// Left edge of every bullet line.
pub const BULLET_X: f64 = 200.0;
/// Cursor position before the first bullet.
pub const BULLET_START_Y: f64 = 400.0;
/// Cursor advance before each bullet.
pub const BULLET_STEP_Y: f64 = 150.0;
/// Fraction of each axis left empty on every side of an image slide.
pub const IMAGE_MARGIN: f64 = 0.1;

/// Bullet slide background. The blue channel is out of range and clamps to the title background.
const BULLET_BACKGROUND: Rgb = Rgb::new(1.0, 0.9, 1.9);

/// Paint a single heading centered on the canvas.
pub fn render_title(canvas: &mut Canvas, text: &str) -> PresentationResult<()> {
    let (cx, cy) = canvas.size().center();
    canvas.fill(Rgb::BACKGROUND);
    canvas.set_color(Rgb::NAVY);
    canvas.draw_centered_text(text, TITLE_FONT_SIZE, cx, cy)
}

/// Paint a left-anchored heading followed by one line per item, top to bottom.
///
/// Items past the bottom edge are clipped by the rasterizer.
pub fn render_bullets(canvas: &mut Canvas, title: &str, items: &[String]) -> PresentationResult<()> {
    canvas.fill(BULLET_BACKGROUND);
    canvas.set_color(Rgb::NAVY);
    let (x, y) = BULLET_TITLE_ORIGIN;
    canvas.draw_text(title, TITLE_FONT_SIZE, x, y)?;

    for (item, y) in items.iter().zip(bullet_baselines(items.len())) {
        canvas.draw_text(item, BULLET_FONT_SIZE, BULLET_X, y)?;
    }
    Ok(())
}

/// Paint the image at `path` stretched into the margin box.
///
/// The image is loaded before anything is drawn, so a load failure leaves the canvas untouched.
pub fn render_image(canvas: &mut Canvas, path: &Path) -> PresentationResult<()> {
    let image = load_image(path)?;
    canvas.fill(Rgb::BACKGROUND);
    canvas.draw_image_fit(&image, IMAGE_MARGIN)
}

/// Dispatch to the renderer for `slide`'s variant.
pub fn render_slide(canvas: &mut Canvas, slide: &SlideSpec) -> PresentationResult<()> {
    match slide {
        SlideSpec::Title { text } => render_title(canvas, text),
        SlideSpec::Bullets { title, items } => render_bullets(canvas, title, items),
        SlideSpec::Image { path } => render_image(canvas, path),
    }
}

/// Baselines of `count` bullet lines.
pub fn bullet_baselines(count: usize) -> impl Iterator<Item = f64> {
    (1..=count).map(|i| BULLET_START_Y + BULLET_STEP_Y * i as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/render/slides.rs"]
mod tests;
