use chrono::NaiveDate;

use crate::{
    assets::decode::TemplateImage,
    config::AppConfig,
    export::batch::{Artifacts, BatchExporter, ExportSettings},
    foundation::error::{SlipError, SlipResult},
    render::card::{CardFrame, CardRenderer},
    schedule::{
        date::format_date,
        filter::{DateRange, date_bounds},
        join::RecordJoiner,
        record::{JoinedEntry, RawRecord},
    },
};

/// Owns the state of one parse/generate session.
///
/// Loading rows starts a new parse cycle: joined entries, filter and artifacts are replaced.
/// Each generation clears the artifacts before rendering.
pub struct Pipeline {
    config: AppConfig,
    joiner: RecordJoiner,
    template: Option<TemplateImage>,
    joined: Vec<JoinedEntry>,
    range: DateRange,
    filtered: Vec<JoinedEntry>,
    artifacts: Artifacts,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> SlipResult<Self> {
        config.validate()?;
        let joiner = config.joiner();
        Ok(Self {
            config,
            joiner,
            template: None,
            joined: Vec::new(),
            range: DateRange::unbounded(),
            filtered: Vec::new(),
            artifacts: Artifacts::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_template(&mut self, template: TemplateImage) {
        self.template = Some(template);
        self.artifacts.clear();
    }

    /// Join `rows` and select the full date span of the result.
    pub fn load(&mut self, rows: &[RawRecord]) -> &[JoinedEntry] {
        self.artifacts.clear();
        self.joined = self.joiner.join(rows);
        let range = date_bounds(&self.joined).unwrap_or_default();
        tracing::info!(
            rows = rows.len(),
            entries = self.joined.len(),
            from = ?range.from,
            to = ?range.to,
            "loaded schedule"
        );
        self.set_range(range)
    }

    pub fn joined(&self) -> &[JoinedEntry] {
        &self.joined
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn set_range(&mut self, range: DateRange) -> &[JoinedEntry] {
        self.range = range;
        self.filtered = range.apply(&self.joined);
        &self.filtered
    }

    pub fn filtered(&self) -> &[JoinedEntry] {
        &self.filtered
    }

    /// Render every filtered entry; replaces the previous artifacts.
    pub fn generate(
        &mut self,
        renderer: &mut CardRenderer,
        settings: &ExportSettings,
    ) -> SlipResult<&Artifacts> {
        self.artifacts.clear();
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| SlipError::template("no template loaded"))?;
        if self.filtered.is_empty() {
            return Err(SlipError::validation("no entries in the selected date range"));
        }

        let mut exporter = BatchExporter::new(renderer, &self.config.layout);
        self.artifacts = exporter.export(&self.filtered, template, settings)?;
        Ok(&self.artifacts)
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Render the filtered entry at `index` at full template resolution.
    pub fn preview(&self, renderer: &mut CardRenderer, index: usize) -> SlipResult<CardFrame> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| SlipError::template("no template loaded"))?;
        let entry = self.filtered.get(index).ok_or_else(|| {
            SlipError::validation(format!(
                "entry index {index} out of range ({} entries)",
                self.filtered.len()
            ))
        })?;
        let layout = self.config.layout.resolve(template.canvas());
        renderer.render(entry, template, &layout)
    }

    /// `S{id}_{YYYY-MM-DD}`
    pub fn bundle_name(&self, today: NaiveDate) -> String {
        format!("S{}_{}", self.config.bundle_id, format_date(today))
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
