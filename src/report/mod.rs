//! Output surfaces: terminal rendering, charts, the Markdown dashboard
//! report, and JSON export/import.

pub mod charts;
pub mod export;
pub mod generator;
pub mod render;

pub use export::{read_import, write_export, DEFAULT_EXPORT_FILE};
pub use generator::{write_report, ReportMetadata};
pub use render::{render_dashboard, render_response, render_response_list};
