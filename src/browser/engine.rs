//! Backend-neutral browser interface.
//!
//! The exporter drives a browser only through these traits; the Chromium
//! implementation lives in `chromium` and scripted stand-ins back the
//! pipeline tests.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::request::PageFormat;

/// Default timeout for page navigation, network idle included.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default continuous quiet interval required before a page counts as settled.
pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_millis(500);

/// Default number of in-flight requests tolerated while waiting for idle.
pub const DEFAULT_MAX_INFLIGHT_REQUESTS: usize = 2;

/// Configuration options for browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Explicit browser binary; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    /// Whether to run in headless mode.
    pub headless: bool,
    /// Whether to pass --no-sandbox to the browser.
    pub disable_sandbox: bool,
    /// Timeout for page navigation.
    pub navigation_timeout: Duration,
    /// How network quiescence is decided after navigation.
    pub network_idle: NetworkIdlePolicy,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            headless: true,
            disable_sandbox: true,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            network_idle: NetworkIdlePolicy::default(),
        }
    }
}

/// A page is considered settled once at most `max_inflight` requests stay
/// open for a continuous `idle_window`.
#[derive(Debug, Clone, Copy)]
pub struct NetworkIdlePolicy {
    pub max_inflight: usize,
    pub idle_window: Duration,
}

impl Default for NetworkIdlePolicy {
    fn default() -> Self {
        Self {
            max_inflight: DEFAULT_MAX_INFLIGHT_REQUESTS,
            idle_window: DEFAULT_IDLE_WINDOW,
        }
    }
}

/// Print settings handed to the backend when producing the PDF.
#[derive(Debug, Clone, Copy)]
pub struct PdfPrintOptions {
    pub format: PageFormat,
    pub print_background: bool,
}

/// Launches browser processes.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    async fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn BrowserHandle>>;
}

/// A running browser. Closing it must tear down the underlying process.
#[async_trait]
pub trait BrowserHandle: Send {
    async fn new_page(&mut self) -> Result<Box<dyn PageHandle>>;
    async fn close(&mut self) -> Result<()>;
}

/// A single open page inside a running browser.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigates and suspends until the page reaches network idle.
    async fn navigate(&self, url: &str) -> Result<()>;
    /// Runs a script in the page and returns its JSON value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;
    async fn print_to_pdf(&self, options: &PdfPrintOptions) -> Result<Vec<u8>>;
    async fn close(&mut self) -> Result<()>;
}
