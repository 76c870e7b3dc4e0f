//! Presentation renders a linear slide deck to a sequence of numbered PNG frames.
//!
//! A [`Deck`] is an ordered list of [`SlideSpec`] values (title, bulleted list, full-bleed image)
//! plus the output directory and canvas size for one export run. Rendering is staged:
//!
//! 1. **Create**: a blank [`Canvas`] of the configured size per slide
//! 2. **Paint**: the renderer matching the slide variant ([`render_slide`])
//! 3. **Export**: the canvas is written losslessly to `<output>/<NNN>.png`
//!
//! Layout constants (font sizes, offsets, margins) are fixed reference-pixel values tuned for a
//! 1920x1080 canvas. They are not rescaled when a different canvas size is configured.
//!
//! Output numbering always advances once per attempted slide. A slide that fails to render or
//! export leaves a gap in the file sequence rather than shifting later slides down.
#![forbid(unsafe_code)]

mod assets;
mod deck;
mod foundation;
mod render;

pub use assets::decode::{PreparedImage, decode_image, load_image};
pub use assets::fonts::FontFace;
pub use deck::export::{
    Deck, DeckSettings, RenderReport, SlideOutcome, SlideStatus, ensure_output_dir, output_path,
};
pub use deck::model::{DeckFile, SlideKind, SlideSpec, demo_deck_slides};
pub use foundation::core::{Affine, CanvasSize, OutputIndex, Rgb};
pub use foundation::error::{PresentationError, PresentationResult};
pub use render::canvas::Canvas;
pub use render::slides::{
    BULLET_FONT_SIZE, BULLET_START_Y, BULLET_STEP_Y, BULLET_TITLE_ORIGIN, BULLET_X, IMAGE_MARGIN,
    TITLE_FONT_SIZE, bullet_baselines, render_bullets, render_image, render_slide, render_title,
};
pub use render::text::{TextExtents, TextLayoutEngine};
