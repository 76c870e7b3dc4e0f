use std::path::{Path, PathBuf};

use crate::{
    assets::fonts::FontFace,
    deck::model::{DeckFile, SlideKind, SlideSpec},
    foundation::core::{CanvasSize, OutputIndex},
    foundation::error::{PresentationError, PresentationResult},
    render::canvas::Canvas,
    render::slides::render_slide,
    render::text::TextLayoutEngine,
};

/// Per-run configuration of a [`Deck`].
#[derive(Clone, Debug)]
pub struct DeckSettings {
    /// Size of every slide canvas.
    pub canvas: CanvasSize,
    /// Directory receiving `NNN.png` files.
    pub output_dir: PathBuf,
    /// Face used for all slide text. Text slides are skipped when unset.
    pub font: Option<FontFace>,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::REFERENCE,
            output_dir: PathBuf::from("output"),
            font: None,
        }
    }
}

/// What happened to one attempted slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideStatus {
    /// The slide was rendered and written to this file.
    Written(PathBuf),
    /// The slide produced no file. Its index is still consumed.
    Skipped {
        /// Display form of the error that stopped the slide.
        reason: String,
    },
}

/// Outcome of one slide in deck order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Output index assigned to the slide.
    pub index: OutputIndex,
    /// Slide variant.
    pub kind: SlideKind,
    /// Written file or skip reason.
    pub status: SlideStatus,
}

/// Result of [`Deck::render`]: one outcome per attempted slide, in deck order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Outcomes in deck order.
    pub outcomes: Vec<SlideOutcome>,
}

impl RenderReport {
    /// Files written, in deck order.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            SlideStatus::Written(path) => Some(path.as_path()),
            SlideStatus::Skipped { .. } => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.written_count()
    }
}

/// Ordered slides plus the output counter for one export run.
#[derive(Clone, Debug)]
pub struct Deck {
    settings: DeckSettings,
    slides: Vec<SlideSpec>,
    next_index: OutputIndex,
}

impl Deck {
    /// Empty deck; the counter starts at 0.
    pub fn new(settings: DeckSettings) -> Self {
        Self::with_slides(settings, Vec::new())
    }

    pub fn with_slides(settings: DeckSettings, slides: Vec<SlideSpec>) -> Self {
        Self {
            settings,
            slides,
            next_index: OutputIndex::default(),
        }
    }

    /// Load slides from a JSON deck description.
    pub fn from_json_path(path: &Path, settings: DeckSettings) -> PresentationResult<Self> {
        let file = DeckFile::from_path(path)?;
        Ok(Self::with_slides(settings, file.slides))
    }

    /// Append a slide; insertion order is output order.
    pub fn push(&mut self, slide: SlideSpec) -> &mut Self {
        self.slides.push(slide);
        self
    }

    pub fn slides(&self) -> &[SlideSpec] {
        &self.slides
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    /// Index the next attempted slide will be written under.
    ///
    /// After a render this is the number of slides attempted by that run.
    pub fn next_index(&self) -> OutputIndex {
        self.next_index
    }

    /// Render and export every slide in order.
    ///
    /// Each slide gets a fresh canvas and is written to `<output_dir>/<NNN>.png` before the next
    /// one starts. The counter advances once per attempted slide whether or not a file was
    /// written, so a failed slide leaves a gap in the numbering.
    ///
    /// Image, font and export failures skip the slide and are logged. A canvas that cannot be
    /// created aborts the run with [`PresentationError::SurfaceCreation`].
    ///
    /// Every call is a separate export run: numbering restarts at `000`, overwriting files from
    /// an earlier run in the same directory.
    #[tracing::instrument(
        skip(self),
        fields(
            slides = self.slides.len(),
            output = %self.settings.output_dir.display(),
            width = self.settings.canvas.width,
            height = self.settings.canvas.height,
        )
    )]
    pub fn render(&mut self) -> PresentationResult<RenderReport> {
        self.next_index = OutputIndex::default();
        self.settings.canvas.to_u16()?;

        let mut text = self.settings.font.as_ref().and_then(|face| {
            TextLayoutEngine::new(face.clone())
                .inspect_err(|e| tracing::error!(error = %e, "font face could not be registered"))
                .ok()
        });

        let mut report = RenderReport::default();
        for slide in &self.slides {
            let index = self.next_index;
            let result = render_one(&self.settings, slide, index, &mut text);
            self.next_index = index.successor();

            let status = match result {
                Ok(path) => {
                    tracing::info!(%index, kind = %slide.kind(), path = %path.display(), "wrote slide");
                    SlideStatus::Written(path)
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::error!(%index, kind = %slide.kind(), error = %e, "skipped slide");
                    SlideStatus::Skipped {
                        reason: e.to_string(),
                    }
                }
            };
            report.outcomes.push(SlideOutcome {
                index,
                kind: slide.kind(),
                status,
            });
        }

        Ok(report)
    }
}

/// Render and export one slide. `text` is lent to the canvas and handed back afterwards, even
/// when the slide fails.
fn render_one(
    settings: &DeckSettings,
    slide: &SlideSpec,
    index: OutputIndex,
    text: &mut Option<TextLayoutEngine>,
) -> PresentationResult<PathBuf> {
    let mut canvas = Canvas::with_size(settings.canvas)?;
    if slide.kind() != SlideKind::Image {
        let engine = text
            .take()
            .ok_or_else(|| PresentationError::font_load("no usable font face configured for text"))?;
        canvas.install_text_engine(engine);
    }

    let path = output_path(&settings.output_dir, index);
    let result = render_slide(&mut canvas, slide).and_then(|()| canvas.export_png(&path));
    if let Some(engine) = canvas.take_text_engine() {
        *text = Some(engine);
    }
    result.map(|()| path)
}

/// `<dir>/<NNN>.png` for `index`.
pub fn output_path(dir: &Path, index: OutputIndex) -> PathBuf {
    dir.join(index.file_name())
}

/// Create `dir` (and missing parents) if it does not exist.
///
/// New directories are owner-only (`0700`) on Unix.
pub fn ensure_output_dir(dir: &Path) -> PresentationResult<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(0o700);
    }
    builder.create(dir).map_err(|e| {
        PresentationError::directory_creation(format!("create '{}': {e}", dir.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/deck/export.rs"]
mod tests;
