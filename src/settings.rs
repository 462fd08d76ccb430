use std::path::{Path, PathBuf};
use std::time::Duration;

use webprint_lib::browser::{BrowserOptions, NetworkIdlePolicy};
use webprint_lib::request::PageFormat;
use webprint_lib::{Config, WebprintError};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct ExportFlagSources {
    pub source: bool,
    pub output: bool,
    pub page_format: bool,
    pub cleanup_selector: bool,
    pub nav_timeout: bool,
}

impl ExportFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            source: flag_present(args, "--source"),
            output: flag_present(args, "--output"),
            page_format: flag_present(args, "--page-format"),
            cleanup_selector: flag_present(args, "--cleanup-selector"),
            nav_timeout: flag_present(args, "--nav-timeout"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone)]
pub struct ResolvedExportSettings {
    pub source: String,
    pub output: PathBuf,
    pub page_format: PageFormat,
    pub print_background: bool,
    pub cleanup_selector: String,
    pub chrome_executable: Option<PathBuf>,
    pub nav_timeout: Duration,
    pub headless: bool,
    pub disable_sandbox: bool,
    pub network_idle: NetworkIdlePolicy,
}

impl ResolvedExportSettings {
    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            chrome_executable: self.chrome_executable.clone(),
            headless: self.headless,
            disable_sandbox: self.disable_sandbox,
            navigation_timeout: self.nav_timeout,
            network_idle: self.network_idle,
        }
    }
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
#[allow(clippy::too_many_arguments)]
pub fn resolve_export_settings(
    cli_source: String,
    cli_output: PathBuf,
    cli_page_format: PageFormat,
    cli_print_background: Option<bool>,
    cli_cleanup_selector: String,
    cli_chrome: Option<PathBuf>,
    cli_nav_timeout: u64,
    config: &Config,
    flags: &ExportFlagSources,
) -> ResolvedExportSettings {
    ResolvedExportSettings {
        source: if flags.source {
            cli_source
        } else {
            config.source.clone()
        },
        output: if flags.output {
            cli_output
        } else {
            config.output.clone()
        },
        page_format: if flags.page_format {
            cli_page_format
        } else {
            config.page_format
        },
        print_background: cli_print_background.unwrap_or(config.print_background),
        cleanup_selector: if flags.cleanup_selector {
            cli_cleanup_selector
        } else {
            config.cleanup_selector.clone()
        },
        chrome_executable: cli_chrome.or_else(|| config.browser.chrome_executable.clone()),
        nav_timeout: if flags.nav_timeout {
            Duration::from_secs(cli_nav_timeout)
        } else {
            config.timeouts.navigation
        },
        headless: config.browser.headless,
        disable_sandbox: config.browser.disable_sandbox,
        network_idle: NetworkIdlePolicy {
            max_inflight: config.network_idle.max_inflight,
            idle_window: config.network_idle.window,
        },
    }
}

/// Load config from a TOML file or return defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, WebprintError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());
        WebprintError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        WebprintError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    settings: &ResolvedExportSettings,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: source={}, output={}, page-format={:?}, print-background={}, cleanup-selector={}, nav-timeout={}s, idle-window={}ms, max-inflight={}, headless={}, sandbox-disabled={}",
        settings.source,
        settings.output.display(),
        settings.page_format,
        settings.print_background,
        settings.cleanup_selector,
        settings.nav_timeout.as_secs(),
        settings.network_idle.idle_window.as_millis(),
        settings.network_idle.max_inflight,
        settings.headless,
        settings.disable_sandbox
    )
}
