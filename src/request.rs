use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{DEFAULT_CLEANUP_SELECTOR, DEFAULT_OUTPUT_PATH};
use crate::error::{Result, WebprintError};
use crate::source::ParsedSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
}

impl PageFormat {
    /// Paper size in inches, width then height.
    pub fn paper_size(&self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (8.27, 11.7),
        }
    }
}

/// Everything a single export needs. One request maps to one browser
/// session, one page and one written PDF.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub source: ParsedSource,
    pub output_path: PathBuf,
    pub page_format: PageFormat,
    pub print_background: bool,
    pub cleanup_selector: String,
}

impl ExportRequest {
    pub fn new(source: ParsedSource) -> Self {
        Self {
            source,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            page_format: PageFormat::default(),
            print_background: true,
            cleanup_selector: DEFAULT_CLEANUP_SELECTOR.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cleanup_selector.trim().is_empty() {
            return Err(WebprintError::Config(
                "Cleanup selector must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
