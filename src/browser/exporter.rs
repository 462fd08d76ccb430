//! The export pipeline: launch a browser, render the page, strip the
//! cleanup element, print to PDF and tear everything down again.
//!
//! Stages run strictly in sequence and every failure is fatal. Teardown
//! still runs on all exit paths; its own failures are reported through the
//! progress callback instead of masking the pipeline result.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::engine::{BrowserEngine, BrowserHandle, BrowserOptions, PageHandle, PdfPrintOptions};
use crate::error::{Result, WebprintError};
use crate::progress::ProgressCallback;
use crate::request::ExportRequest;

/// What the cleanup stage did to the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CleanupOutcome {
    /// Whether a node matched the selector and was removed.
    pub matched: bool,
    /// Nodes still matching the selector after removal.
    #[serde(default)]
    pub remaining: u32,
}

/// Outcome of a finished export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub cleanup: CleanupOutcome,
    pub elapsed: Duration,
}

#[derive(Clone, Default)]
pub struct ExportOptions {
    pub browser: BrowserOptions,
    pub progress: Option<ProgressCallback>,
}

/// Runs one export per call against whatever engine backs it.
pub struct PdfExporter<E: BrowserEngine> {
    engine: E,
    options: ExportOptions,
}

impl<E: BrowserEngine> PdfExporter<E> {
    pub fn new(engine: E, options: ExportOptions) -> Self {
        Self { engine, options }
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<ExportReport> {
        request.validate()?;
        let url = request.source.navigation_url()?;
        let started = Instant::now();

        self.log_progress("Launching headless browser\u{2026}");
        let mut browser = self.engine.launch(&self.options.browser).await?;

        let outcome = self
            .run_pipeline(browser.as_mut(), request, url.as_str())
            .await;

        self.log_progress("Closing browser\u{2026}");
        if let Err(err) = browser.close().await {
            self.log_progress(&err.to_string());
        }

        let (cleanup, bytes_written) = outcome?;
        Ok(ExportReport {
            output_path: request.output_path.clone(),
            bytes_written,
            cleanup,
            elapsed: started.elapsed(),
        })
    }

    async fn run_pipeline(
        &self,
        browser: &mut dyn BrowserHandle,
        request: &ExportRequest,
        url: &str,
    ) -> Result<(CleanupOutcome, u64)> {
        let mut page = browser.new_page().await?;
        let result = self.run_on_page(page.as_ref(), request, url).await;
        if let Err(err) = page.close().await {
            self.log_progress(&err.to_string());
        }
        result
    }

    async fn run_on_page(
        &self,
        page: &dyn PageHandle,
        request: &ExportRequest,
        url: &str,
    ) -> Result<(CleanupOutcome, u64)> {
        self.log_progress(&format!("Navigating to {url}\u{2026}"));
        page.navigate(url).await?;

        self.log_progress(&format!(
            "Applying cleanup selector {}\u{2026}",
            request.cleanup_selector
        ));
        let cleanup = self
            .remove_first_match(page, &request.cleanup_selector)
            .await?;

        self.log_progress("Printing to PDF\u{2026}");
        let pdf = page
            .print_to_pdf(&PdfPrintOptions {
                format: request.page_format,
                print_background: request.print_background,
            })
            .await?;
        if pdf.is_empty() {
            return Err(WebprintError::Export(
                "Browser returned an empty document".to_string(),
            ));
        }

        fs::write(&request.output_path, &pdf).map_err(|err| {
            WebprintError::Export(format!(
                "Failed to write PDF to {}: {}",
                request.output_path.display(),
                err
            ))
        })?;

        Ok((cleanup, pdf.len() as u64))
    }

    async fn remove_first_match(
        &self,
        page: &dyn PageHandle,
        selector: &str,
    ) -> Result<CleanupOutcome> {
        let value = page.evaluate(&cleanup_script(selector)).await?;
        serde_json::from_value(value)
            .map_err(|e| WebprintError::Evaluation(format!("Unexpected cleanup result: {e}")))
    }

    fn log_progress(&self, message: &str) {
        if let Some(callback) = &self.options.progress {
            callback(message);
        }
    }
}

/// Builds the script that removes the first node matching `selector`. The
/// selector is embedded as a JSON string literal so quoting cannot break
/// out of the script.
fn cleanup_script(selector: &str) -> String {
    let literal = serde_json::Value::String(selector.to_string()).to_string();
    format!(
        r#"() => {{
    const selector = {literal};
    const el = document.querySelector(selector);
    const matched = el !== null;
    if (el) el.remove();
    return {{ matched, remaining: document.querySelectorAll(selector).length }};
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cleanup_script_embeds_selector_as_json_literal() {
        let script = cleanup_script(".download-pdf");
        assert!(script.contains("const selector = \".download-pdf\";"));
        assert!(script.contains("querySelectorAll(selector)"));
    }

    #[test]
    fn cleanup_script_survives_quotes_in_selector() {
        let script = cleanup_script("a[title=\"x\"]");
        assert!(script.contains("\"a[title=\\\"x\\\"]\""));
    }

    #[test]
    fn cleanup_outcome_defaults_remaining_to_zero() {
        let outcome: CleanupOutcome =
            serde_json::from_value(json!({ "matched": false })).expect("parse outcome");
        assert!(!outcome.matched);
        assert_eq!(outcome.remaining, 0);
    }
}
