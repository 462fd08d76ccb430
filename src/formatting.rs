use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use webprint_lib::output::WEBPRINT_OUTPUT_VERSION;
use webprint_lib::{ErrorOutput, WebprintError, WebprintOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &WebprintOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the process exit code.
pub fn render_error(err: WebprintError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = WebprintOutput::Error(ErrorOutput {
        version: WEBPRINT_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Every failure is fatal and shares the same non-zero exit code.
    ExitCode::from(1)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &WebprintOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &WebprintOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &WebprintOutput, colorize: bool) -> String {
    match body {
        WebprintOutput::Export(out) => {
            let mut buf = String::new();
            let status = color("OK", "32", colorize);
            writeln!(
                buf,
                "{} Exported {} -> {}",
                status,
                out.source.value,
                out.output_path.display()
            )
            .ok();
            writeln!(
                buf,
                "Size: {} bytes, format {:?}, background {}",
                out.bytes_written, out.page_format, out.print_background
            )
            .ok();
            if out.cleanup.matched {
                writeln!(
                    buf,
                    "Cleanup: removed first match for {} ({} remaining)",
                    out.cleanup.selector, out.cleanup.remaining
                )
                .ok();
            } else {
                writeln!(buf, "Cleanup: no match for {}", out.cleanup.selector).ok();
            }
            writeln!(buf, "Elapsed: {} ms", out.elapsed_ms).ok();
            buf
        }
        WebprintOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use webprint_lib::output::{CleanupSummary, ExportOutput, SourceDescriptor};
    use webprint_lib::request::PageFormat;
    use webprint_lib::source::SourceKind;

    fn export_body(matched: bool) -> WebprintOutput {
        WebprintOutput::Export(ExportOutput {
            version: WEBPRINT_OUTPUT_VERSION.to_string(),
            source: SourceDescriptor {
                kind: SourceKind::Url,
                value: "https://example.com/".to_string(),
            },
            output_path: PathBuf::from("curriculum/download.pdf"),
            page_format: PageFormat::A4,
            print_background: true,
            bytes_written: 4096,
            cleanup: CleanupSummary {
                selector: ".download-pdf".to_string(),
                matched,
                remaining: 0,
            },
            elapsed_ms: 1200,
        })
    }

    #[test]
    fn render_error_always_returns_nonzero_exit_code() {
        let code = render_error(
            WebprintError::Config("boom".to_string()),
            OutputFormat::Json,
            None,
        );
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn format_pretty_includes_export_summary() {
        let pretty = format_pretty(&export_body(true), false);
        assert!(pretty.contains("OK Exported https://example.com/ -> curriculum/download.pdf"));
        assert!(pretty.contains("4096 bytes"));
        assert!(pretty.contains("removed first match for .download-pdf"));
        assert!(pretty.contains("Elapsed: 1200 ms"));
    }

    #[test]
    fn format_pretty_reports_cleanup_no_match() {
        let pretty = format_pretty(&export_body(false), false);
        assert!(pretty.contains("Cleanup: no match for .download-pdf"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = WebprintOutput::Error(ErrorOutput {
            version: WEBPRINT_OUTPUT_VERSION.to_string(),
            message: Some("bad input".to_string()),
            error: webprint_lib::ErrorPayload {
                category: webprint_lib::ErrorCategory::Config,
                message: "bad input".to_string(),
                remediation: Some("check flags".to_string()),
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
