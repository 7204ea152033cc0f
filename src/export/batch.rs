use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    assets::decode::TemplateImage,
    export::encode::{downsample, encode_jpeg, to_rgb8},
    foundation::error::{SlipError, SlipResult},
    layout::spec::TemplateLayout,
    render::card::CardRenderer,
    schedule::record::JoinedEntry,
};

/// Encoded cards keyed by file name.
pub type Artifacts = BTreeMap<String, Vec<u8>>;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Maximum output width; wider cards are scaled down, narrower ones are left alone.
    pub target_width: Option<u32>,
    /// JPEG quality factor in `0..=1`.
    pub quality: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            target_width: Some(1280),
            quality: 0.9,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> SlipResult<()> {
        if !self.quality.is_finite() || self.quality <= 0.0 || self.quality > 1.0 {
            return Err(SlipError::validation(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        if self.target_width == Some(0) {
            return Err(SlipError::validation("target width must be > 0"));
        }
        Ok(())
    }
}

/// Keep Latin and Russian letters, spaces, `-` and `_`; then trim and turn space runs into `_`.
pub fn sanitize_name(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| {
            c.is_ascii_alphabetic()
                || ('А'..='я').contains(c)
                || matches!(c, 'Ё' | 'ё' | '_' | '-' | ' ')
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// `{date}_{person}.jpg`
pub fn artifact_name(entry: &JoinedEntry) -> String {
    format!("{}_{}.jpg", entry.date, sanitize_name(&entry.person))
}

/// Renders and encodes a batch of entries, one card at a time.
pub struct BatchExporter<'a> {
    renderer: &'a mut CardRenderer,
    layout: &'a TemplateLayout,
}

impl<'a> BatchExporter<'a> {
    pub fn new(renderer: &'a mut CardRenderer, layout: &'a TemplateLayout) -> Self {
        Self { renderer, layout }
    }

    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    pub fn export(
        &mut self,
        entries: &[JoinedEntry],
        template: &TemplateImage,
        settings: &ExportSettings,
    ) -> SlipResult<Artifacts> {
        settings.validate()?;
        let resolved = self.layout.resolve(template.canvas());

        let mut out = Artifacts::new();
        for entry in entries {
            let frame = self.renderer.render(entry, template, &resolved)?;
            let rgb = downsample(to_rgb8(&frame)?, settings.target_width);
            let bytes = encode_jpeg(&rgb, settings.quality)?;

            let name = artifact_name(entry);
            if out.insert(name.clone(), bytes).is_some() {
                tracing::warn!(name = %name, "duplicate card name; keeping the later entry");
            }
        }

        tracing::info!(cards = out.len(), "exported cards");
        Ok(out)
    }
}

/// Write every artifact into `dir`, creating it if needed.
pub fn write_artifacts(dir: &Path, artifacts: &Artifacts) -> SlipResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    for (name, bytes) in artifacts {
        let path = dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
