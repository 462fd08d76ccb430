//! Browser automation module for headless PDF export.
//!
//! This module drives a Chromium instance over the Chrome DevTools Protocol
//! and turns one rendered page into one PDF file.
//!
//! # Module Structure
//!
//! - [`engine`] - Backend-neutral browser, page and launch traits
//! - [`chromium`] - The chromiumoxide-backed engine
//! - [`exporter`] - The sequential export pipeline
//!
//! # Example
//!
//! ```no_run
//! use webprint_lib::{ChromiumEngine, ExportOptions, ExportRequest, PdfExporter};
//! use webprint_lib::source::parse_source;
//!
//! # async fn example() -> webprint_lib::Result<()> {
//! let source = parse_source("https://example.com", None)?;
//! let exporter = PdfExporter::new(ChromiumEngine, ExportOptions::default());
//! let report = exporter.export(&ExportRequest::new(source)).await?;
//! println!("Wrote {} bytes to {:?}", report.bytes_written, report.output_path);
//! # Ok(())
//! # }
//! ```

mod chromium;
mod engine;
mod exporter;

// Re-export public types from the submodules
pub use chromium::ChromiumEngine;
pub use engine::{
    BrowserEngine, BrowserHandle, BrowserOptions, NetworkIdlePolicy, PageHandle, PdfPrintOptions,
    DEFAULT_IDLE_WINDOW, DEFAULT_MAX_INFLIGHT_REQUESTS, DEFAULT_NAVIGATION_TIMEOUT,
};
pub use exporter::{CleanupOutcome, ExportOptions, ExportReport, PdfExporter};
