//! Slipmaker renders assignment slips from a CSV schedule onto a fixed-layout template image.
//!
//! # Pipeline overview
//!
//! 1. **Read**: CSV rows become [`RawRecord`]s ([`read_records`]).
//! 2. **Join**: main and assistant rows for the same date and kind merge into one
//!    [`JoinedEntry`], with the date shifted by the configured week offset ([`RecordJoiner`]).
//! 3. **Filter**: entries inside an inclusive [`DateRange`], ordered by date then by person.
//! 4. **Render**: each entry is drawn onto the template at positions scaled from the
//!    1240x1754 reference layout ([`CardRenderer`]).
//! 5. **Export**: frames are downscaled and JPEG-encoded into named artifacts ([`BatchExporter`]).
//!
//! [`Pipeline`] ties the steps together and owns the per-session state.
//!
//! Renderers output premultiplied RGBA8. No `unsafe` is used in this crate.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod export;
pub mod foundation;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod schedule;

pub use assets::decode::{TemplateImage, decode_template, load_template};
pub use assets::fonts::{FontFace, find_system_font, resolve_font};
pub use config::AppConfig;
pub use export::batch::{
    Artifacts, BatchExporter, ExportSettings, artifact_name, sanitize_name, write_artifacts,
};
pub use export::encode::{encode_jpeg, encode_png, jpeg_quality};
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{SlipError, SlipResult};
pub use layout::resolve::{ResolvedCheckbox, ResolvedField, ResolvedLayout};
pub use layout::spec::{Align, CheckboxKey, CheckboxSpec, FieldKey, FieldSpec, TemplateLayout};
pub use pipeline::Pipeline;
pub use render::card::{CardFrame, CardRenderer};
pub use render::text::{TextEngine, wrap_words};
pub use schedule::date::{DateShift, format_date, format_human, parse_date, start_of_week};
pub use schedule::filter::{DateRange, date_bounds};
pub use schedule::join::RecordJoiner;
pub use schedule::record::{JoinedEntry, RawRecord, read_records, read_records_path};
