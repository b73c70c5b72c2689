//! A private font database with text measurement.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdb::ID as FontFaceId;
use nvs_core::logging::targets;

use super::font::{Font, FontWeight, TextMetrics};

/// Error type for font loading operations.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    /// The font file could not be read.
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but contains no usable font faces.
    #[error("no font faces found in {path}")]
    NoFaces { path: PathBuf },
    /// In-memory font data contains no usable font faces.
    #[error("font data contains no usable faces")]
    InvalidData,
}

/// Information about a registered font face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFaceInfo {
    /// The identifier of this face inside its registry.
    pub id: FontFaceId,
    /// The family names this face belongs to.
    pub families: Vec<String>,
    /// The weight of this face.
    pub weight: FontWeight,
    /// Whether the face is italic or oblique.
    pub italic: bool,
    /// The PostScript name of this face.
    pub post_script_name: String,
}

impl FontFaceInfo {
    fn from_fontdb(face: &fontdb::FaceInfo) -> Self {
        Self {
            id: face.id,
            families: face.families.iter().map(|(name, _)| name.clone()).collect(),
            weight: FontWeight(face.weight.0),
            italic: face.style != fontdb::Style::Normal,
            post_script_name: face.post_script_name.clone(),
        }
    }
}

/// A process-local font registry.
///
/// Unlike a system font database, a registry starts empty. Registering the
/// same file twice is a no-op that returns the faces from the first call.
pub struct FontRegistry {
    db: fontdb::Database,
    files: HashMap<PathBuf, Vec<FontFaceInfo>>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            files: HashMap::new(),
        }
    }

    /// Register every face in a font file.
    pub fn register_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<FontFaceInfo>, FontLoadError> {
        let path = path.as_ref();
        if let Some(faces) = self.files.get(path) {
            tracing::debug!(target: targets::RENDER_FONT, path = %path.display(), "font file already registered");
            return Ok(faces.clone());
        }

        let before = self.face_ids();
        self.db
            .load_font_file(path)
            .map_err(|source| FontLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let added = self.faces_since(&before);
        if added.is_empty() {
            return Err(FontLoadError::NoFaces {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(
            target: targets::RENDER_FONT,
            path = %path.display(),
            families = ?added.iter().flat_map(|f| f.families.iter()).collect::<Vec<_>>(),
            "registered font file"
        );
        self.files.insert(path.to_path_buf(), added.clone());
        Ok(added)
    }

    /// Register every face in an in-memory font (TTF, OTF, TTC or OTC).
    pub fn register_data(&mut self, data: Vec<u8>) -> Result<Vec<FontFaceInfo>, FontLoadError> {
        let before = self.face_ids();
        self.db.load_font_data(data);

        let added = self.faces_since(&before);
        if added.is_empty() {
            return Err(FontLoadError::InvalidData);
        }
        tracing::info!(target: targets::RENDER_FONT, faces = added.len(), "registered font data");
        Ok(added)
    }

    fn face_ids(&self) -> Vec<FontFaceId> {
        self.db.faces().map(|face| face.id).collect()
    }

    fn faces_since(&self, before: &[FontFaceId]) -> Vec<FontFaceInfo> {
        self.db
            .faces()
            .filter(|face| !before.contains(&face.id))
            .map(FontFaceInfo::from_fontdb)
            .collect()
    }

    /// Get the number of registered font faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Check if a font family exists in the registry (ASCII case-insensitive).
    pub fn has_family(&self, family: &str) -> bool {
        self.db.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    /// Get all unique font family names in the registry.
    pub fn family_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Find the registered face that best matches `font`.
    pub fn query(&self, font: &Font) -> Option<FontFaceId> {
        let families = [fontdb::Family::Name(font.family())];
        self.db.query(&fontdb::Query {
            families: &families,
            weight: fontdb::Weight(font.weight().0),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }

    /// Measure a single line of text.
    ///
    /// Returns `None` when no registered face matches the font's family.
    /// Characters without a glyph are measured with the face's `.notdef`
    /// advance.
    pub fn measure_text(&self, text: &str, font: &Font) -> Option<TextMetrics> {
        let id = self.query(font)?;
        self.db
            .with_face_data(id, |data, face_index| {
                let face = ttf_parser::Face::parse(data, face_index).ok()?;
                let units_per_em = face.units_per_em();
                if units_per_em == 0 {
                    return None;
                }
                let scale = font.size() / units_per_em as f32;
                let notdef = face
                    .glyph_hor_advance(ttf_parser::GlyphId(0))
                    .unwrap_or(0);

                let advance: u32 = text
                    .chars()
                    .map(|c| {
                        face.glyph_index(c)
                            .and_then(|glyph| face.glyph_hor_advance(glyph))
                            .unwrap_or(notdef) as u32
                    })
                    .sum();

                let ascent = face.ascender() as f32 * scale;
                let descent = -(face.descender() as f32) * scale;
                Some(TextMetrics {
                    width: advance as f32 * scale,
                    height: ascent + descent,
                    ascent,
                    descent,
                })
            })
            .flatten()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("face_count", &self.face_count())
            .field("files", &self.files.len())
            .finish()
    }
}
