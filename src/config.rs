use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::browser::{
    BrowserOptions, NetworkIdlePolicy, DEFAULT_IDLE_WINDOW, DEFAULT_MAX_INFLIGHT_REQUESTS,
    DEFAULT_NAVIGATION_TIMEOUT,
};
use crate::request::PageFormat;

pub const DEFAULT_SOURCE: &str = "https://andreacacioppo.github.io/";
pub const DEFAULT_OUTPUT_PATH: &str = "curriculum/download.pdf";
pub const DEFAULT_CLEANUP_SELECTOR: &str = ".download-pdf";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: String,
    pub output: PathBuf,
    pub page_format: PageFormat,
    pub print_background: bool,
    pub cleanup_selector: String,
    pub browser: BrowserSection,
    pub timeouts: Timeouts,
    pub network_idle: NetworkIdleSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSection {
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    pub disable_sandbox: bool,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            headless: true,
            disable_sandbox: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub navigation: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkIdleSection {
    pub max_inflight: usize,
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

impl Default for NetworkIdleSection {
    fn default() -> Self {
        Self {
            max_inflight: DEFAULT_MAX_INFLIGHT_REQUESTS,
            window: DEFAULT_IDLE_WINDOW,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            page_format: PageFormat::default(),
            print_background: true,
            cleanup_selector: DEFAULT_CLEANUP_SELECTOR.to_string(),
            browser: BrowserSection::default(),
            timeouts: Timeouts::default(),
            network_idle: NetworkIdleSection::default(),
        }
    }
}

impl Config {
    /// Loads from an explicit TOML file, or returns defaults when no path is
    /// given. Parse failures surface as `InvalidData` IO errors.
    pub fn load(path: Option<&Path>) -> std::io::Result<Config> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)?;
                toml::from_str(&text)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }
            None => Ok(Config::default()),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cleanup_selector.trim().is_empty() {
            return Err("Cleanup selector must not be empty".to_string());
        }
        if self.timeouts.navigation.is_zero() {
            return Err("Navigation timeout must be greater than zero".to_string());
        }
        if self.network_idle.window.is_zero() {
            return Err("Idle window must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            chrome_executable: self.browser.chrome_executable.clone(),
            headless: self.browser.headless,
            disable_sandbox: self.browser.disable_sandbox,
            navigation_timeout: self.timeouts.navigation,
            network_idle: NetworkIdlePolicy {
                max_inflight: self.network_idle.max_inflight,
                idle_window: self.network_idle.window,
            },
        }
    }
}
