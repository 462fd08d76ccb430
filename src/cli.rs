use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use webprint_lib::{DEFAULT_CLEANUP_SELECTOR, DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE};

#[derive(Parser)]
#[command(name = "webprint")]
#[command(
    version,
    about = "Webprint - Export a rendered web page to PDF via headless Chromium",
    long_about = "Webprint\n\nRenders a page in headless Chromium, removes the first element matching the cleanup selector and prints the result to an A4 PDF.\n\nOne invocation is one export: launch, navigate until network idle, clean up, print, tear down. Every failure is fatal; nothing is retried."
)]
pub struct Cli {
    #[arg(
        long,
        default_value = DEFAULT_SOURCE,
        help = "Page to render (URL or local HTML file)"
    )]
    pub source: String,

    #[arg(long, value_enum, help = "Override type detection for the source")]
    pub source_type: Option<SourceType>,

    #[arg(
        long,
        default_value = DEFAULT_OUTPUT_PATH,
        help = "PDF output path (the parent directory must already exist)"
    )]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "a4", help = "Paper format")]
    pub page_format: PageFormatArg,

    #[arg(
        long,
        value_name = "BOOL",
        help = "Print background graphics (true/false)"
    )]
    pub print_background: Option<bool>,

    #[arg(
        long,
        default_value = DEFAULT_CLEANUP_SELECTOR,
        help = "CSS selector whose first match is removed before printing"
    )]
    pub cleanup_selector: String,

    #[arg(
        long,
        value_name = "PATH",
        help = "Chrome/Chromium executable (auto-detected if omitted)"
    )]
    pub chrome: Option<PathBuf>,

    #[arg(
        long,
        default_value = "30",
        help = "Navigation timeout (seconds), network idle included"
    )]
    pub nav_timeout: u64,

    #[arg(long, value_enum, default_value = "json", help = "Output format")]
    pub format: OutputFormat,

    #[arg(long, help = "Write the JSON report to this file (stdout if omitted)")]
    pub report: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for source/output/selector/timeouts; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceType {
    Url,
    File,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum PageFormatArg {
    #[default]
    A4,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, OutputFormat, PageFormatArg, SourceType};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn export_uses_defaults() {
        let cli = Cli::parse_from(["webprint"]);

        assert_eq!(cli.source, "https://andreacacioppo.github.io/");
        assert!(cli.source_type.is_none());
        assert_eq!(cli.output, Path::new("curriculum/download.pdf"));
        assert!(matches!(cli.page_format, PageFormatArg::A4));
        assert!(cli.print_background.is_none());
        assert_eq!(cli.cleanup_selector, ".download-pdf");
        assert!(cli.chrome.is_none());
        assert_eq!(cli.nav_timeout, 30);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.report.is_none());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn export_respects_overrides() {
        let cli = Cli::parse_from([
            "webprint",
            "--source",
            "page.html",
            "--source-type",
            "file",
            "--output",
            "out/export.pdf",
            "--print-background",
            "false",
            "--cleanup-selector",
            "#banner",
            "--chrome",
            "/usr/bin/chromium",
            "--nav-timeout",
            "45",
            "--format",
            "pretty",
            "--report",
            "report.json",
            "--config",
            "webprint.toml",
        ]);

        assert_eq!(cli.source, "page.html");
        assert!(matches!(cli.source_type, Some(SourceType::File)));
        assert_eq!(cli.output, Path::new("out/export.pdf"));
        assert_eq!(cli.print_background, Some(false));
        assert_eq!(cli.cleanup_selector, "#banner");
        assert_eq!(cli.chrome.as_deref(), Some(Path::new("/usr/bin/chromium")));
        assert_eq!(cli.nav_timeout, 45);
        assert!(matches!(cli.format, OutputFormat::Pretty));
        assert_eq!(cli.report.as_deref(), Some(Path::new("report.json")));
        assert_eq!(cli.config.as_deref(), Some(Path::new("webprint.toml")));
    }

    #[test]
    fn verbose_flag_is_recognized() {
        let cli = Cli::parse_from(["webprint", "--verbose"]);
        assert!(cli.verbose);
    }
}
