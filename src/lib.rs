//! Investor report PDF engine
//!
//! Lays out an investability business-plan report (cover, table of
//! contents, scoring, narrative sections, action plan and the premium
//! analysis sections) and serializes it with pdf-writer.
//!
//! ```no_run
//! use investor_report_pdf::{assemble, ReportConfig, ReportModel};
//!
//! let model = ReportModel::from_json_str(r#"{"score": 72}"#)?;
//! let report = assemble(&model, &ReportConfig::default())?;
//! std::fs::write(&report.filename, &report.bytes)?;
//! # Ok::<(), investor_report_pdf::ReportError>(())
//! ```

pub mod assembler;
pub mod canvas;
pub mod config;
pub mod context;
pub mod error;
pub mod flow;
mod font_metrics;
pub mod font_registry;
pub mod image_registry;
pub mod labels;
pub mod model;
pub mod page;
pub mod pagination;
pub mod plan;
pub mod renderer;
pub mod scoring;
pub mod sections;
pub mod style;
pub mod text_encoding;
pub mod text_layout;
pub mod types;

pub use assembler::{assemble, layout_report, render_pdf, LaidOutReport, RenderedReport};
pub use config::{Locale, ReportConfig};
pub use error::{ReportError, ReportResult};
pub use model::ReportModel;
pub use pagination::TocEntry;
pub use plan::Section;
