use std::{collections::HashMap, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{error::FontError, font_face::FontFace};

/// Where a face is loaded from.
///
/// A style names exactly one source per role. There is no retry or
/// fallback chain: a source that cannot be loaded is an error at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// A font file on disk. Collections load their first face.
    File { path: PathBuf },
    /// A face from the installed system fonts, matched by `fontdb`.
    ///
    /// `families` accepts concrete names plus the generic `serif`,
    /// `sans-serif` and `monospace`.
    System {
        families: Vec<String>,
        #[serde(default)]
        bold: bool,
    },
}

impl Default for FontSource {
    fn default() -> Self {
        Self::sans_serif(false)
    }
}

impl FontSource {
    pub fn sans_serif(bold: bool) -> Self {
        Self::System {
            families: vec!["sans-serif".into()],
            bold,
        }
    }
}

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache of loaded
/// font instances (`fontdue`). Faces are parsed lazily the first time they are requested.
pub struct FontStorage {
    font_db: fontdb::Database,
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
    system_fonts_loaded: bool,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            system_fonts_loaded: false,
        }
    }
}

/// Loading fonts into fontdb.
impl FontStorage {
    /// Loads a font from binary data and returns the ids of its faces.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) -> Vec<fontdb::ID> {
        let data: Vec<u8> = data.into();
        self.font_db
            .load_font_source(fontdb::Source::Binary(Arc::new(data)))
            .to_vec()
    }

    /// Loads a font from a file path and returns the ids of its faces.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<Vec<fontdb::ID>, FontError> {
        let data = std::fs::read(&path).map_err(|source| FontError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(self.load_font_binary(data))
    }

    /// Loads all fonts from a directory, recursively.
    ///
    /// Faces found here are matched by [`FontSource::System`] families just
    /// like installed fonts.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        let before = self.font_db.len();
        self.font_db.load_fonts_dir(&dir);
        log::debug!(
            "loaded {} font faces from {}",
            self.font_db.len() - before,
            dir.display()
        );
    }

    /// Loads the system fonts once; later calls are no-ops.
    pub fn load_system_fonts(&mut self) {
        if self.system_fonts_loaded {
            return;
        }
        self.font_db.load_system_fonts();
        self.system_fonts_loaded = true;
        log::debug!("loaded {} system font faces", self.font_db.len());
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of known faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Get `Font`
impl FontStorage {
    /// Retrieves a parsed font by ID, parsing it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Result<Arc<fontdue::Font>, FontError> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self
                    .font_db
                    .with_face_data(id, |data, index| {
                        fontdue::Font::from_bytes(
                            data,
                            fontdue::FontSettings {
                                collection_index: index,
                                scale: 40.0,
                                load_substitutions: true,
                            },
                        )
                    })
                    .ok_or_else(|| FontError::NotFound(format!("face {id:?}")))?;

                match font_result {
                    Ok(font) => Ok(Arc::clone(entry.insert(Arc::new(font)))),
                    Err(reason) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, reason);
                        Err(FontError::Parse {
                            name: format!("face {id:?}"),
                            reason: reason.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Returns face info for an ID.
    pub fn face(&self, id: fontdb::ID) -> Option<&fontdb::FaceInfo> {
        self.font_db.face(id)
    }

    /// Returns an iterator over all known faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Loads the face named by `source` at `size` pixels.
    pub fn load_face(&mut self, source: &FontSource, size: f32) -> Result<FontFace, FontError> {
        let id = match source {
            FontSource::File { path } => self
                .load_font_file(path.clone())?
                .first()
                .copied()
                .ok_or_else(|| FontError::Parse {
                    name: path.display().to_string(),
                    reason: "file contains no font faces".into(),
                })?,
            FontSource::System { families, bold } => self.query_system(families, *bold)?,
        };

        let font = self.font(id)?;
        let name = self
            .face(id)
            .map(|face| face.post_script_name.clone())
            .unwrap_or_else(|| format!("face {id:?}"));

        log::debug!("using font face {name} at {size}px for {source:?}");
        Ok(FontFace::new(name, font, size))
    }

    fn query_system(&mut self, families: &[String], bold: bool) -> Result<fontdb::ID, FontError> {
        self.load_system_fonts();

        let family_list: Vec<fontdb::Family<'_>> = families
            .iter()
            .map(|family| match family.as_str() {
                "serif" => fontdb::Family::Serif,
                "sans-serif" => fontdb::Family::SansSerif,
                "monospace" => fontdb::Family::Monospace,
                "cursive" => fontdb::Family::Cursive,
                "fantasy" => fontdb::Family::Fantasy,
                name => fontdb::Family::Name(name),
            })
            .collect();

        let query = fontdb::Query {
            families: &family_list,
            weight: if bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        self.font_db
            .query(&query)
            .ok_or_else(|| FontError::NotFound(format!("{families:?} (bold: {bold})")))
    }
}
