use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Url,
    File,
}

#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub kind: SourceKind,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum SourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Unsupported URL scheme '{scheme}' in '{value}'. Hint: only http, https and file URLs can be rendered.")]
    UnsupportedScheme { scheme: String, value: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported page extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
}

const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

pub fn parse_source(
    value: &str,
    override_type: Option<SourceKind>,
) -> Result<ParsedSource, SourceParseError> {
    if let Some(kind) = override_type {
        return Ok(ParsedSource {
            kind,
            value: value.to_string(),
        });
    }

    if value.contains("://") {
        parse_url_source(value)
    } else {
        parse_file_source(value)
    }
}

impl ParsedSource {
    /// Turns the source into the URL the browser navigates to. Local files
    /// are canonicalized so the resulting file:// URL is absolute.
    pub fn navigation_url(&self) -> Result<Url, SourceParseError> {
        match self.kind {
            SourceKind::Url => Url::parse(&self.value).map_err(|e| SourceParseError::InvalidUrl {
                value: self.value.clone(),
                message: e.to_string(),
            }),
            SourceKind::File => {
                let canonical =
                    fs::canonicalize(&self.value).map_err(|_| SourceParseError::FileNotFound {
                        path: self.value.clone(),
                    })?;
                Url::from_file_path(&canonical).map_err(|_| SourceParseError::InvalidUrl {
                    value: self.value.clone(),
                    message: "path cannot be expressed as a file URL".to_string(),
                })
            }
        }
    }
}

fn parse_url_source(value: &str) -> Result<ParsedSource, SourceParseError> {
    let url = Url::parse(value).map_err(|e| SourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" | "file" => Ok(ParsedSource {
            kind: SourceKind::Url,
            value: value.to_string(),
        }),
        scheme => Err(SourceParseError::UnsupportedScheme {
            scheme: scheme.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_file_source(value: &str) -> Result<ParsedSource, SourceParseError> {
    let path = Path::new(value);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !HTML_EXTENSIONS.contains(&extension.as_str()) {
        if extension.is_empty() {
            return Err(SourceParseError::UnsupportedExtension {
                extension: "no extension".to_string(),
                supported: HTML_EXTENSIONS.join(", "),
            });
        }

        return Err(SourceParseError::UnsupportedExtension {
            extension,
            supported: HTML_EXTENSIONS.join(", "),
        });
    }

    if !path.exists() {
        return Err(SourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    let metadata = fs::metadata(path).map_err(|_| SourceParseError::FileNotFound {
        path: path.to_string_lossy().into_owned(),
    })?;
    if !metadata.is_file() {
        return Err(SourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(ParsedSource {
        kind: SourceKind::File,
        value: value.to_string(),
    })
}
