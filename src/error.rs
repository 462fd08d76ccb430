use crate::source::SourceParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum WebprintError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page evaluation failed: {0}")]
    Evaluation(String),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Browser teardown failed: {0}")]
    Teardown(String),

    #[error("Invalid source: {0}")]
    Source(#[from] SourceParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WebprintError {
    pub fn launch(message: impl Into<String>) -> Self {
        WebprintError::Launch(message.into())
    }

    pub fn navigation(message: impl Into<String>) -> Self {
        WebprintError::Navigation(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            WebprintError::Launch(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("could not auto detect")
                    || lower.contains("executable")
                    || lower.contains("chrome")
                {
                    ErrorPayload::new(
                        ErrorCategory::Launch,
                        msg.to_string(),
                        "Install Chrome/Chromium or point --chrome at an existing browser binary.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Launch,
                        msg.to_string(),
                        "Check that the browser binary is runnable; rerun with --verbose for details.",
                    )
                }
            }
            WebprintError::Navigation(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("network idle") || lower.contains("timed out") {
                    ErrorPayload::new(
                        ErrorCategory::Navigation,
                        msg.to_string(),
                        "Increase --nav-timeout or ensure the page settles without long-polling requests.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Navigation,
                        msg.to_string(),
                        "Verify the source URL is reachable from this machine.",
                    )
                }
            }
            WebprintError::Evaluation(msg) => ErrorPayload::new(
                ErrorCategory::Evaluation,
                msg.to_string(),
                "Check the --cleanup-selector syntax; it must be a valid CSS selector.",
            ),
            WebprintError::Export(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("write") || lower.contains("directory") {
                    ErrorPayload::new(
                        ErrorCategory::Export,
                        msg.to_string(),
                        "Ensure the output directory exists and is writable; parent directories are not created.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Export,
                        msg.to_string(),
                        "Rerun with --verbose to see which print stage failed.",
                    )
                }
            }
            WebprintError::Teardown(msg) => ErrorPayload::new(
                ErrorCategory::Launch,
                msg.to_string(),
                "Kill any stray Chromium processes left behind.",
            ),
            WebprintError::Source(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Pass a URL (https://...) or an existing .html file; use --source-type to override detection.",
            ),
            WebprintError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://example.com).",
            ),
            WebprintError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            WebprintError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON/serialization inputs; run with --verbose for details.",
            ),
            WebprintError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("cleanup selector") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Provide a non-empty CSS selector via --cleanup-selector or the config file.",
                    )
                } else if lower.contains("navigation timeout") || lower.contains("idle window") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Timeouts must be positive durations (e.g., --nav-timeout 30).",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file; rerun with --verbose to see the effective config.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WebprintError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Launch,
    Navigation,
    Evaluation,
    Export,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
