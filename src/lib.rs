//! Webprint Library
//!
//! A library for exporting rendered web pages to PDF through a headless
//! Chromium instance. One export launches one browser, renders one page,
//! optionally strips a cleanup element and writes one A4 PDF.
//!
//! # Module Overview
//!
//! - [`browser`] - Headless browser engine and the export pipeline
//! - [`source`] - Source parsing (URLs and local HTML files)
//! - [`request`] - Export request configuration
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//! - [`progress`] - Progress reporting callbacks
//!
//! # Example
//!
//! ```no_run
//! use webprint_lib::{ChromiumEngine, ExportOptions, ExportRequest, PdfExporter};
//! use webprint_lib::source::parse_source;
//!
//! # async fn example() -> webprint_lib::Result<()> {
//! let source = parse_source("https://example.com", None)?;
//! let request = ExportRequest::new(source);
//!
//! let exporter = PdfExporter::new(ChromiumEngine, ExportOptions::default());
//! let report = exporter.export(&request).await?;
//! println!("Wrote {} bytes to {:?}", report.bytes_written, report.output_path);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod request;
pub mod source;

// Browser module re-exports
pub use browser::{
    BrowserEngine, BrowserHandle, BrowserOptions, ChromiumEngine, CleanupOutcome, ExportOptions,
    ExportReport, NetworkIdlePolicy, PageHandle, PdfExporter, PdfPrintOptions, DEFAULT_IDLE_WINDOW,
    DEFAULT_MAX_INFLIGHT_REQUESTS, DEFAULT_NAVIGATION_TIMEOUT,
};
pub use config::{Config, DEFAULT_CLEANUP_SELECTOR, DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE};
pub use error::{ErrorCategory, ErrorPayload, Result, WebprintError};
pub use output::{
    CleanupSummary, ErrorOutput, ExportOutput, SourceDescriptor, WebprintOutput,
    WEBPRINT_OUTPUT_VERSION,
};
pub use progress::{stderr_progress, ProgressCallback};
pub use request::{ExportRequest, PageFormat};
pub use source::{parse_source, ParsedSource, SourceKind};
