use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{PresentationError, PresentationResult};

/// One slide of a deck. Exactly one layout is active per value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum SlideSpec {
    /// A single heading centered on the slide.
    Title {
        /// Heading text.
        text: String,
    },
    /// A heading followed by bullet lines in the given order.
    Bullets {
        /// Heading text.
        title: String,
        /// Bullet lines, top to bottom. May be empty.
        #[serde(default)]
        items: Vec<String>,
    },
    /// A raster image stretched into the slide with a margin.
    Image {
        /// Source image file.
        path: PathBuf,
    },
}

impl SlideSpec {
    /// Build a [`SlideSpec::Title`].
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title { text: text.into() }
    }

    /// Build a [`SlideSpec::Bullets`].
    pub fn bullets<I, S>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Bullets {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a [`SlideSpec::Image`].
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::Image { path: path.into() }
    }

    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Bullets { .. } => SlideKind::Bullets,
            Self::Image { .. } => SlideKind::Image,
        }
    }
}

/// Variant tag of a [`SlideSpec`], for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    /// [`SlideSpec::Title`].
    Title,
    /// [`SlideSpec::Bullets`].
    Bullets,
    /// [`SlideSpec::Image`].
    Image,
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Bullets => "bullets",
            Self::Image => "image",
        })
    }
}

/// On-disk deck description: `{ "slides": [ ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckFile {
    /// Slides in render order.
    pub slides: Vec<SlideSpec>,
}

impl DeckFile {
    /// Parse a deck description from JSON.
    pub fn from_reader(r: impl Read) -> PresentationResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PresentationError::serde(format!("parse deck json: {e}")))
    }

    /// Read and parse a deck description file.
    pub fn from_path(path: &Path) -> PresentationResult<Self> {
        let f = File::open(path).with_context(|| format!("open deck '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }
}

/// The built-in demo deck.
pub fn demo_deck_slides() -> Vec<SlideSpec> {
    vec![
        SlideSpec::title("Hello, World!"),
        SlideSpec::bullets("Fizz", ["• foo", "• bar", "• baz"]),
        SlideSpec::image("image.png"),
        SlideSpec::title("Goodbye, World!"),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/deck/model.rs"]
mod tests;
