use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{SlipError, SlipResult};

/// Families tried, in order, when no font file is given.
pub const PREFERRED_FAMILIES: [&str; 4] = ["Inter", "Noto Sans", "DejaVu Sans", "Arial"];

/// Raw font data used for both shaping and rasterizing card text.
#[derive(Clone)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> SlipResult<Self> {
        if bytes.is_empty() {
            return Err(SlipError::validation("font data is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    pub fn from_file(path: &Path) -> SlipResult<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }
}

/// Pick a bold sans-serif face. Fonts found in `extra_dirs` win over system fonts.
pub fn find_system_font(extra_dirs: &[PathBuf]) -> Option<FontFace> {
    let mut local = usvg::fontdb::Database::new();
    for dir in extra_dirs {
        load_fonts_from_dir(&mut local, dir);
    }
    if let Some(face) = pick_face(&local) {
        return Some(face);
    }

    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    pick_face(&db)
}

fn pick_face(db: &usvg::fontdb::Database) -> Option<FontFace> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .map(|name| usvg::fontdb::Family::Name(*name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::BOLD,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    tracing::debug!(family = %family, index, "resolved font");

    Some(FontFace {
        bytes: Arc::new(bytes),
        index,
    })
}

/// An explicit font file wins; otherwise fall back to the system lookup.
pub fn resolve_font(explicit: Option<&Path>, extra_dirs: &[PathBuf]) -> SlipResult<FontFace> {
    match explicit {
        Some(path) => FontFace::from_file(path),
        None => find_system_font(extra_dirs).ok_or_else(|| {
            SlipError::validation("no usable font found; pass a font file explicitly")
        }),
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
