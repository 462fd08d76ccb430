use std::path::PathBuf;
use std::process::ExitCode;

use webprint_lib::output::WEBPRINT_OUTPUT_VERSION;
use webprint_lib::request::PageFormat;
use webprint_lib::source::SourceKind;
use webprint_lib::{
    parse_source, stderr_progress, ChromiumEngine, CleanupSummary, ExportOptions, ExportOutput,
    ExportRequest, PdfExporter, ProgressCallback, SourceDescriptor, WebprintError, WebprintOutput,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_export_settings, ExportFlagSources,
};

/// Run the export command.
#[allow(clippy::too_many_arguments)]
pub async fn run_export(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    source: String,
    source_type: Option<crate::cli::SourceType>,
    output: PathBuf,
    page_format: crate::cli::PageFormatArg,
    print_background: Option<bool>,
    cleanup_selector: String,
    chrome: Option<PathBuf>,
    nav_timeout: u64,
    format: OutputFormat,
    report: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, report.clone()),
    };
    let flag_sources = ExportFlagSources::from_args(raw_args);
    let resolved = resolve_export_settings(
        source,
        output,
        page_format_from_cli(page_format),
        print_background,
        cleanup_selector,
        chrome,
        nav_timeout,
        &config,
        &flag_sources,
    );

    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&resolved, config_path.as_deref())
        );
        eprintln!("Parsing source\u{2026}");
    }

    let parsed = match parse_source(&resolved.source, source_type.map(source_kind_from_cli)) {
        Ok(src) => src,
        Err(err) => return render_error(err.into(), format, report.clone()),
    };

    let request = ExportRequest {
        source: parsed,
        output_path: resolved.output.clone(),
        page_format: resolved.page_format,
        print_background: resolved.print_background,
        cleanup_selector: resolved.cleanup_selector.clone(),
    };

    let progress: Option<ProgressCallback> = if verbose {
        Some(stderr_progress())
    } else {
        None
    };
    let exporter = PdfExporter::new(
        ChromiumEngine,
        ExportOptions {
            browser: resolved.browser_options(),
            progress,
        },
    );

    let exported = match exporter.export(&request).await {
        Ok(result) => result,
        Err(err) => return render_error(err, format, report.clone()),
    };

    let body = WebprintOutput::Export(ExportOutput {
        version: WEBPRINT_OUTPUT_VERSION.to_string(),
        source: SourceDescriptor {
            kind: request.source.kind,
            value: request.source.value.clone(),
        },
        output_path: exported.output_path.clone(),
        page_format: request.page_format,
        print_background: request.print_background,
        bytes_written: exported.bytes_written,
        cleanup: CleanupSummary {
            selector: request.cleanup_selector.clone(),
            matched: exported.cleanup.matched,
            remaining: exported.cleanup.remaining,
        },
        elapsed_ms: exported.elapsed.as_millis() as u64,
    });

    if let Err(err) = write_output(&body, format, report.clone()) {
        return render_error(WebprintError::Config(err.to_string()), format, report);
    }

    ExitCode::SUCCESS
}

fn source_kind_from_cli(st: crate::cli::SourceType) -> SourceKind {
    match st {
        crate::cli::SourceType::Url => SourceKind::Url,
        crate::cli::SourceType::File => SourceKind::File,
    }
}

fn page_format_from_cli(pf: crate::cli::PageFormatArg) -> PageFormat {
    match pf {
        crate::cli::PageFormatArg::A4 => PageFormat::A4,
    }
}
