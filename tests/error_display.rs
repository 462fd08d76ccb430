use webprint_lib::{parse_source, WebprintError};

#[test]
fn config_error_display_includes_message() {
    let err = WebprintError::Config("missing selector".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing selector");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: WebprintError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn launch_helper_uses_message() {
    let err = WebprintError::launch("no usable browser binary");

    assert_eq!(
        format!("{}", err),
        "Browser launch failed: no usable browser binary"
    );
}

#[test]
fn navigation_helper_uses_message() {
    let err = WebprintError::navigation("net::ERR_CONNECTION_REFUSED");

    assert_eq!(
        format!("{}", err),
        "Navigation failed: net::ERR_CONNECTION_REFUSED"
    );
}

#[test]
fn teardown_error_display_includes_message() {
    let err = WebprintError::Teardown("browser already gone".to_string());

    assert_eq!(
        format!("{}", err),
        "Browser teardown failed: browser already gone"
    );
}

#[test]
fn source_errors_display_with_invalid_source_prefix() {
    let parse_err = parse_source("definitely-missing.html", None)
        .expect_err("missing file should not parse");
    let err: WebprintError = parse_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("Invalid source: "));
    assert!(rendered.contains("not found"));
}
