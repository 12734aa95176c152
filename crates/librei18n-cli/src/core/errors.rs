//! CLI error types using miette for Rust-style diagnostics.
//!
//! Library errors are converted here into diagnostics carrying codes, source
//! snippets where a file is involved, and a suggestion for the fix.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use librei18n::{CatalogError, RenderError};
use librei18n_sc_parser::error::ScParserError;
use librei18n_toml::I18nConfigError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error when the i18n.toml configuration file is not found.
#[derive(Debug, Diagnostic, Error)]
#[error("i18n.toml configuration file not found at {expected_path}")]
#[diagnostic(
    code(librei18n::config::not_found),
    help(
        "Create an i18n.toml file in your project root with the following content:\n\n  \
          fallback_language = \"en\"\n  \
          assets_dir = \"i18n\"\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when i18n.toml exists but cannot be used.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid i18n.toml configuration")]
#[diagnostic(code(librei18n::config::invalid))]
pub struct ConfigError {
    #[source]
    pub source: I18nConfigError,

    #[help]
    pub help: Option<String>,
}

/// Error when the assets directory doesn't exist.
#[derive(Debug, Diagnostic, Error)]
#[error("assets directory not found: {path}")]
#[diagnostic(
    code(librei18n::config::assets_not_found),
    help("Create the assets directory or update assets_dir in i18n.toml")
)]
pub struct AssetsNotFoundError {
    /// The path that was expected.
    pub path: PathBuf,
}

/// Error when the fallback language has no catalog.
#[derive(Debug, Diagnostic, Error)]
#[error("fallback catalog not found: {path}")]
#[diagnostic(
    code(librei18n::config::fallback_not_found),
    help("Create a catalog for '{language}' in your assets folder")
)]
pub struct FallbackCatalogNotFoundError {
    /// The fallback language.
    pub language: String,
    /// Where its catalog was expected.
    pub path: PathBuf,
}

/// Error when a specified locale doesn't exist.
#[derive(Debug, Diagnostic, Error)]
#[error("locale '{locale}' not found")]
#[diagnostic(
    code(librei18n::config::locale_not_found),
    help("Available locales: {available}")
)]
pub struct LocaleNotFoundError {
    /// The locale that was specified but not found.
    pub locale: String,
    /// Comma-separated list of available locales.
    pub available: String,
}

/// Error when a catalog path has no supported extension.
#[derive(Debug, Diagnostic, Error)]
#[error("unsupported catalog format: {path}")]
#[diagnostic(
    code(librei18n::catalog::unsupported_format),
    help("Catalog files must end in .yaml, .yml, .json or .toml")
)]
pub struct UnsupportedFormatError {
    pub path: PathBuf,
}

/// Error when a catalog file does not parse.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse {format} catalog {path}")]
#[diagnostic(code(librei18n::catalog::parse))]
pub struct CatalogParseError {
    pub path: PathBuf,

    pub format: String,

    /// The underlying parser message.
    #[help]
    pub help: String,
}

/// Error when a catalog cannot be written in the requested format.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to serialize {format} catalog {path}")]
#[diagnostic(code(librei18n::catalog::serialize))]
pub struct CatalogSerializeError {
    pub path: PathBuf,

    pub format: String,

    #[help]
    pub help: String,
}

/// Error when a Rust source file given to `extract` is not valid Rust.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse Rust source {path}")]
#[diagnostic(code(librei18n::extract::syntax))]
pub struct SourceSyntaxError {
    /// The source content of the Rust file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("syntax error here")]
    pub span: SourceSpan,

    pub path: PathBuf,

    /// The parser message.
    #[help]
    pub help: String,
}

/// A key the fallback catalog has and a locale lacks.
#[derive(Debug, Diagnostic, Error)]
#[error("missing translation key '{key}' in locale '{locale}'")]
#[diagnostic(code(librei18n::check::missing_key), severity(Error))]
pub struct MissingKeyError {
    /// The key that is missing.
    pub key: String,

    /// The locale where the key is missing.
    pub locale: String,

    /// Help text.
    #[help]
    pub help: String,
}

/// A key a locale has that the fallback catalog does not.
#[derive(Debug, Diagnostic, Error)]
#[error("unused translation key '{key}' in locale '{locale}'")]
#[diagnostic(code(librei18n::check::unused_key), severity(Warning))]
pub struct UnusedKeyWarning {
    /// The source content of the locale catalog.
    #[source_code]
    pub src: NamedSource<String>,

    /// Where the key is defined, when it can be found.
    #[label("not defined by the fallback catalog")]
    pub span: Option<SourceSpan>,

    pub key: String,

    pub locale: String,

    #[help]
    pub help: String,
}

/// A key a template references that the fallback catalog does not define.
#[derive(Debug, Diagnostic, Error)]
#[error("template references undefined key '{key}'")]
#[diagnostic(code(librei18n::check::undefined_template_key), severity(Error))]
pub struct UndefinedTemplateKeyError {
    /// The template text.
    #[source_code]
    pub src: NamedSource<String>,

    #[label("used here")]
    pub span: Option<SourceSpan>,

    pub key: String,

    #[help]
    pub help: String,
}

/// Aggregated validation report containing multiple issues.
#[derive(Debug, Diagnostic, Error)]
#[error("validation found {error_count} error(s) and {warning_count} warning(s)")]
#[diagnostic(code(librei18n::check::report))]
pub struct ValidationReport {
    /// Number of errors found.
    pub error_count: usize,

    /// Number of warnings found.
    pub warning_count: usize,

    /// Related diagnostics.
    #[related]
    pub issues: Vec<ValidationIssue>,
}

/// A validation issue (either error or warning).
#[derive(Debug, Diagnostic, Error)]
pub enum ValidationIssue {
    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingKey(#[from] MissingKeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnusedKey(#[from] UnusedKeyWarning),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UndefinedTemplateKey(#[from] UndefinedTemplateKeyError),
}

impl ValidationIssue {
    /// Get a sort key for deterministic ordering of issues.
    ///
    /// Template errors come first, then missing keys, then unused keys; each
    /// group is ordered by locale (or template) and key.
    pub fn sort_key(&self) -> String {
        match self {
            ValidationIssue::UndefinedTemplateKey(e) => {
                format!("1:{}:{}", e.src.name(), e.key)
            },
            ValidationIssue::MissingKey(e) => {
                format!("2:{}:{}", e.locale, e.key)
            },
            ValidationIssue::UnusedKey(e) => {
                format!("3:{}:{}", e.locale, e.key)
            },
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ValidationIssue::UnusedKey(_))
    }
}

/// Error when formatting fails for a catalog file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to format {path}")]
#[diagnostic(code(librei18n::fmt::failed))]
pub struct FormatError {
    /// The path to the file.
    pub path: PathBuf,

    /// The underlying error.
    #[help]
    pub help: String,
}

/// Report for format command results.
#[derive(Debug, Diagnostic, Error)]
#[error("formatted {formatted_count} file(s), {error_count} error(s)")]
#[diagnostic(code(librei18n::fmt::report))]
pub struct FormatReport {
    /// Number of files formatted.
    pub formatted_count: usize,

    /// Number of errors.
    pub error_count: usize,

    /// Related format errors.
    #[related]
    pub errors: Vec<FormatError>,
}

/// Error when `render` names a key the catalog lacks.
#[derive(Debug, Diagnostic, Error)]
#[error("message '{key}' not found in {catalog}")]
#[diagnostic(
    code(librei18n::render::not_found),
    help("Run `librei18n keys` or inspect the catalog for the available ids")
)]
pub struct MessageNotFoundError {
    pub key: String,
    pub catalog: PathBuf,
}

/// Error when a message template fails to parse or execute.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to render message")]
#[diagnostic(code(librei18n::render::failed))]
pub struct RenderFailedError {
    #[source]
    pub source: RenderError,

    #[help]
    pub help: Option<String>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    AssetsNotFound(#[from] AssetsNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FallbackNotFound(#[from] FallbackCatalogNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleNotFound(#[from] LocaleNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogParse(#[from] CatalogParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogSerialize(#[from] CatalogSerializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SourceSyntax(#[from] SourceSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MessageNotFound(#[from] MessageNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderFailedError),

    #[error("IO error: {0}")]
    #[diagnostic(code(librei18n::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(librei18n::other))]
    Other(String),
}

impl CliError {
    /// Wraps a catalog error for the file at `path`.
    pub fn catalog(path: &Path, error: CatalogError) -> Self {
        let path = path.to_path_buf();
        match error {
            CatalogError::UnsupportedFormat(_) => UnsupportedFormatError { path }.into(),
            CatalogError::Parse { format, message } => CatalogParseError {
                path,
                format: format.to_string(),
                help: message,
            }
            .into(),
            CatalogError::Serialize { format, message } => CatalogSerializeError {
                path,
                format: format.to_string(),
                help: message,
            }
            .into(),
            CatalogError::Io(e) => CliError::Io(e),
        }
    }
}

impl From<I18nConfigError> for CliError {
    fn from(error: I18nConfigError) -> Self {
        let help = match &error {
            I18nConfigError::NotFound(path) => {
                return ConfigNotFoundError {
                    expected_path: path.clone(),
                }
                .into();
            },
            I18nConfigError::AssetsNotFound(path) => {
                return AssetsNotFoundError { path: path.clone() }.into();
            },
            I18nConfigError::InvalidLanguageIdentifier { .. }
            | I18nConfigError::InvalidFallbackLanguageIdentifier { .. } => {
                Some("Use a valid BCP 47 language tag (e.g., 'en', 'en-US', 'zh-Hans')".to_string())
            },
            I18nConfigError::UnsupportedFormat { .. } => {
                Some("Set format to one of: yaml, yml, json, toml".to_string())
            },
            _ => None,
        };
        ConfigError {
            source: error,
            help,
        }
        .into()
    }
}

impl From<ScParserError> for CliError {
    fn from(error: ScParserError) -> Self {
        match error {
            ScParserError::Syn {
                path,
                line,
                column,
                source,
            } => match fs_err::read_to_string(&path) {
                Ok(content) => {
                    let span = span_from_line_col(&content, line, column, 1);
                    SourceSyntaxError {
                        src: NamedSource::new(path.display().to_string(), content),
                        span,
                        path,
                        help: source.to_string(),
                    }
                    .into()
                },
                Err(e) => CliError::Io(e),
            },
            other => CliError::Other(other.to_string()),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(error: RenderError) -> Self {
        let help = match &error {
            RenderError::Syntax { .. } => {
                Some("Actions must look like {{.Field}} or {{.Field.Nested}}".to_string())
            },
            RenderError::Execution { field, .. } => {
                Some(format!("Pass a value with --set {field}=VALUE"))
            },
        };
        RenderFailedError {
            source: error,
            help,
        }
        .into()
    }
}

/// Calculate SourceSpan from a one-based line and character column.
///
/// `col` and `len` count characters; the span is in bytes.
pub fn span_from_line_col(source: &str, line: usize, col: usize, len: usize) -> SourceSpan {
    let mut line_start = 0;
    for (i, line_content) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let mut chars = line_content
                .char_indices()
                .map(|(idx, _)| idx)
                .chain(std::iter::once(line_content.len()))
                .skip(col.saturating_sub(1));
            let start = chars.next().unwrap_or(line_content.len());
            let end = chars
                .nth(len.saturating_sub(1))
                .unwrap_or(line_content.len())
                .max(start);
            return SourceSpan::new((line_start + start).into(), end - start);
        }
        line_start += line_content.len();
    }
    SourceSpan::new(source.len().into(), 0)
}

/// Find where `key` is defined in a YAML, JSON or TOML catalog.
///
/// Matches the key at the start of a line, quoted or bare, followed by `:` or
/// `=`, or as a TOML table header.
pub fn find_key_span(source: &str, key: &str) -> Option<SourceSpan> {
    let quoted = serde_json::to_string(key).ok()?;
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        for candidate in [quoted.as_str(), key] {
            if let Some(rest) = trimmed.strip_prefix(candidate) {
                let rest = rest.trim_start();
                if rest.starts_with(':') || rest.starts_with('=') {
                    return Some(SourceSpan::new(
                        (line_start + indent).into(),
                        candidate.len(),
                    ));
                }
            }

            if let Some(header) = trimmed.strip_prefix('[')
                && let Some(rest) = header.strip_prefix(candidate)
                && rest.trim_end() == "]"
            {
                return Some(SourceSpan::new(
                    (line_start + indent + 1).into(),
                    candidate.len(),
                ));
            }
        }

        line_start += line.len();
    }

    None
}

/// Find the first `"key"` string in template text.
pub fn find_template_key_span(source: &str, key: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{key}\"");
    source
        .find(&quoted)
        .map(|offset| SourceSpan::new((offset + 1).into(), key.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_key_span_yaml() {
        let source = "\"farewell\": \"Bye\"\n\"greeting\": \"Hello\"\n";
        let span = find_key_span(source, "greeting").unwrap();
        assert_eq!(span.offset(), 18);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_find_key_span_json_indented() {
        let source = "{\n  \"greeting\": \"Hello\"\n}\n";
        let span = find_key_span(source, "greeting").unwrap();
        assert_eq!(span.offset(), 4);
    }

    #[test]
    fn test_find_key_span_toml() {
        let source = "farewell = \"Bye\"\n\n[PersonCats]\none = \"cat\"\n";
        assert_eq!(find_key_span(source, "farewell").unwrap().offset(), 0);

        let span = find_key_span(source, "PersonCats").unwrap();
        assert_eq!(span.offset(), 19);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_find_key_span_ignores_values() {
        let source = "\"a\": \"greeting\"\n";
        assert!(find_key_span(source, "greeting").is_none());
    }

    #[test]
    fn test_find_template_key_span() {
        let source = "<p>{{t \"greeting\"}}</p>";
        let span = find_template_key_span(source, "greeting").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 8);
    }

    #[test]
    fn test_span_from_line_col() {
        let source = r#"line1
line2
line3"#;
        let span = span_from_line_col(source, 2, 1, 5);
        assert_eq!(span.offset(), 6); // "line1\n" = 6 chars
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_span_from_line_col_counts_characters() {
        let source = "fn a() {}\nlet é = \"ü\"; ;\n";
        let span = span_from_line_col(source, 2, 14, 1);
        let start = span.offset();
        assert_eq!(&source[start..start + span.len()], ";");

        let span = span_from_line_col(source, 2, 10, 1);
        let start = span.offset();
        assert_eq!(&source[start..start + span.len()], "ü");
    }
}
