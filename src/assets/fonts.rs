use std::{path::Path, sync::Arc};

use crate::foundation::error::{PresentationError, PresentationResult};

/// Family names tried, in order, when the platform has no configured sans-serif default.
const SANS_FALLBACK_FAMILIES: &[&str] = &[
    "Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

/// Font bytes plus the face index and family name resolved from them.
#[derive(Clone)]
pub struct FontFace {
    family: String,
    data: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    /// Register raw font bytes (TTF/OTF/TTC) and resolve the family of face `index`.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> PresentationResult<Self> {
        let family = family_name_for(&data, index)?;
        Ok(Self {
            family,
            data: Arc::new(data),
            index,
        })
    }

    /// Load the first face of a font file.
    pub fn from_path(path: &Path) -> PresentationResult<Self> {
        let data = std::fs::read(path).map_err(|e| {
            PresentationError::font_load(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(data, 0)
            .map_err(|e| PresentationError::font_load(format!("'{}': {e}", path.display())))
    }

    /// Resolve the system sans-serif face through fontdb.
    ///
    /// Falls back through common sans family names and finally to any installed face.
    pub fn system_sans() -> PresentationResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system font database");

        let mut families = vec![usvg::fontdb::Family::SansSerif];
        families.extend(
            SANS_FALLBACK_FAMILIES
                .iter()
                .copied()
                .map(usvg::fontdb::Family::Name),
        );

        let id = families
            .iter()
            .find_map(|family| {
                db.query(&usvg::fontdb::Query {
                    families: std::slice::from_ref(family),
                    weight: usvg::fontdb::Weight::NORMAL,
                    stretch: usvg::fontdb::Stretch::Normal,
                    style: usvg::fontdb::Style::Normal,
                })
            })
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| PresentationError::font_load("no system fonts installed"))?;

        let (data, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| PresentationError::font_load("system font face data unavailable"))?;

        let face = Self::from_bytes(data, index)?;
        tracing::debug!(family = %face.family, index, "resolved system sans-serif face");
        Ok(face)
    }

    /// Family name as reported by the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font bytes.
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }

    /// Face index within a font collection (0 for single-face files).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn to_cpu_font(&self) -> vello_cpu::peniko::FontData {
        let bytes = self.data.as_ref().clone();
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), self.index)
    }
}

/// Register `data` with parley and return the family name of face `index`.
pub(crate) fn register_face(
    font_ctx: &mut parley::FontContext,
    data: &[u8],
    index: u32,
) -> PresentationResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(data.to_vec()), None);
    let family_id = families
        .iter()
        .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
        .or_else(|| families.first())
        .map(|(id, _)| *id)
        .ok_or_else(|| PresentationError::font_load("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| PresentationError::font_load("registered font family has no name"))
}

fn family_name_for(data: &[u8], index: u32) -> PresentationResult<String> {
    let mut font_ctx = parley::FontContext::default();
    register_face(&mut font_ctx, data, index)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
