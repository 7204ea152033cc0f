use std::path::Path;

use anyhow::Context;

use crate::{
    export::batch::ExportSettings,
    foundation::error::{SlipError, SlipResult},
    layout::spec::TemplateLayout,
    schedule::{
        date::DateShift,
        join::{DEFAULT_ALLOWED_KINDS, RecordJoiner},
    },
};

/// Everything a run can be configured with. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: TemplateLayout,
    pub date_shift: DateShift,
    pub allowed_kinds: Vec<String>,
    pub export: ExportSettings,
    /// Identifier in the bundle name `S{id}_{date}`.
    pub bundle_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: TemplateLayout::default(),
            date_shift: DateShift::default(),
            allowed_kinds: DEFAULT_ALLOWED_KINDS.iter().map(|s| s.to_string()).collect(),
            export: ExportSettings::default(),
            bundle_id: "89".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> SlipResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SlipError::config(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> SlipResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> SlipResult<()> {
        self.layout.validate()?;
        self.date_shift.validate()?;
        self.export.validate()?;
        if self.allowed_kinds.iter().all(|k| k.trim().is_empty()) {
            return Err(SlipError::validation("allowed_kinds must name at least one kind"));
        }
        if self.bundle_id.trim().is_empty() {
            return Err(SlipError::validation("bundle_id must be non-empty"));
        }
        Ok(())
    }

    pub fn joiner(&self) -> RecordJoiner {
        RecordJoiner::new(self.allowed_kinds.iter().cloned(), self.date_shift.clone())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
