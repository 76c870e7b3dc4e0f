/// Convenience result type used across the crate.
pub type PresentationResult<T> = Result<T, PresentationError>;

/// Error taxonomy for deck rendering and export.
///
/// Only [`PresentationError::SurfaceCreation`] aborts a deck render. The per-slide kinds
/// ([`ImageLoad`](PresentationError::ImageLoad), [`FontLoad`](PresentationError::FontLoad),
/// [`ExportIo`](PresentationError::ExportIo)) are reported and the slide is skipped.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    /// The raster surface for a canvas could not be allocated.
    #[error("surface creation error: {0}")]
    SurfaceCreation(String),

    /// A source image for an image slide is missing or could not be decoded.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// No usable font face could be resolved or registered.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// A rendered canvas could not be written to disk.
    #[error("export io error: {0}")]
    ExportIo(String),

    /// The output directory could not be created.
    #[error("directory creation error: {0}")]
    DirectoryCreation(String),

    /// Invalid caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when deserializing a deck description.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PresentationError {
    /// Build a [`PresentationError::SurfaceCreation`] value.
    pub fn surface_creation(msg: impl Into<String>) -> Self {
        Self::SurfaceCreation(msg.into())
    }

    /// Build a [`PresentationError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`PresentationError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`PresentationError::ExportIo`] value.
    pub fn export_io(msg: impl Into<String>) -> Self {
        Self::ExportIo(msg.into())
    }

    /// Build a [`PresentationError::DirectoryCreation`] value.
    pub fn directory_creation(msg: impl Into<String>) -> Self {
        Self::DirectoryCreation(msg.into())
    }

    /// Build a [`PresentationError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PresentationError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error aborts the whole deck rather than a single slide.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SurfaceCreation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
