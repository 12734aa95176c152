//! Conversion between catalog files and [`Catalog`].
//!
//! [`load`] and [`save`] work on bytes only. [`load_path`] and [`save_path`]
//! add the file boundary: the format comes from the extension, and output is
//! fully serialized before a temporary sibling file is persisted over the
//! destination.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use std::io::Write as _;
use std::path::Path;
use strum::Display;

/// A supported catalog file format.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Resolves a file-extension-like hint, ignoring case.
    ///
    /// Accepts a bare extension (`yaml`, `.YML`) or a whole file name, in
    /// which case the text after the last `.` is used.
    pub fn from_hint(hint: &str) -> Result<Self, CatalogError> {
        let extension = hint.rsplit_once('.').map_or(hint, |(_, ext)| ext);

        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            _ => Err(CatalogError::UnsupportedFormat(hint.to_string())),
        }
    }

    /// Resolves the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_hint(extension)
    }

    /// The canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        }
    }
}

/// Parses `bytes` as a catalog in `format`.
pub fn load(bytes: &[u8], format: Format) -> Result<Catalog, CatalogError> {
    let parse_error = |message: String| CatalogError::Parse { format, message };

    let catalog: Catalog = match format {
        Format::Yaml if bytes.iter().all(u8::is_ascii_whitespace) => Catalog::new(),
        Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| parse_error(e.to_string()))?,
        Format::Json => serde_json::from_slice(bytes).map_err(|e| parse_error(e.to_string()))?,
        Format::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|e| parse_error(e.to_string()))?;
            toml::from_str(text).map_err(|e| parse_error(e.to_string()))?
        },
    };

    tracing::debug!(%format, entries = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Serializes `catalog` in ascending key order.
///
/// YAML output stringifies every value and double-quotes it, so translations
/// like `no` or `true` cannot be re-read as booleans. JSON and TOML keep
/// value types.
pub fn save(catalog: &Catalog, format: Format) -> Result<Vec<u8>, CatalogError> {
    let serialize_error = |message: String| CatalogError::Serialize { format, message };

    let text = match format {
        Format::Yaml => to_quoted_yaml(catalog),
        Format::Json => {
            let mut text =
                serde_json::to_string_pretty(catalog).map_err(|e| serialize_error(e.to_string()))?;
            text.push('\n');
            text
        },
        Format::Toml => toml::to_string(catalog).map_err(|e| serialize_error(e.to_string()))?,
    };

    tracing::debug!(%format, entries = catalog.len(), bytes = text.len(), "Serialized catalog");
    Ok(text.into_bytes())
}

/// Reads a catalog file, choosing the format from its extension.
pub fn load_path(path: &Path) -> Result<Catalog, CatalogError> {
    let format = Format::from_path(path)?;
    let bytes = fs_err::read(path)?;
    load(&bytes, format)
}

/// Writes a catalog file, choosing the format from its extension.
///
/// The destination is only replaced once serialization has succeeded.
pub fn save_path(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let format = Format::from_path(path)?;
    let bytes = save(catalog, format)?;
    persist_atomically(path, &bytes)?;
    tracing::debug!(path = %path.display(), "Wrote catalog");
    Ok(())
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<(), CatalogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    if let Some(permissions) = destination_permissions(path)? {
        staged.as_file().set_permissions(permissions)?;
    }
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Permissions the persisted file should carry: the existing file's, or
/// `0644` for a new file on unix.
fn destination_permissions(path: &Path) -> std::io::Result<Option<std::fs::Permissions>> {
    match fs_err::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt as _;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

fn to_quoted_yaml(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "{}\n".to_string();
    }

    let mut out = String::new();
    for (key, value) in catalog {
        out.push_str(&double_quoted(key));
        out.push_str(": ");
        out.push_str(&double_quoted(&value.to_plain_string()));
        out.push('\n');
    }
    out
}

/// Writes `text` as a YAML double-quoted scalar.
///
/// Line separators (NEL, U+2028, U+2029) and anything outside the YAML
/// printable set are escaped, otherwise a reader folds them into spaces.
fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if is_yaml_printable(c) => out.push(c),
            c if (c as u32) <= 0xff => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push_str(&format!("\\u{:04X}", c as u32)),
        }
    }
    out.push('"');
    out
}

fn is_yaml_printable(c: char) -> bool {
    matches!(
        c,
        '\u{20}'..='\u{7e}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}'
    ) && c != '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PluralVariants, Value};
    use rstest::rstest;

    #[rstest]
    #[case("yaml", Format::Yaml)]
    #[case(".YML", Format::Yaml)]
    #[case("Json", Format::Json)]
    #[case(".toml", Format::Toml)]
    #[case("locales/fr.TOML", Format::Toml)]
    fn test_from_hint(#[case] hint: &str, #[case] expected: Format) {
        assert_eq!(Format::from_hint(hint).unwrap(), expected);
    }

    #[rstest]
    #[case("xml")]
    #[case(".po")]
    #[case("")]
    fn test_from_hint_unsupported(#[case] hint: &str) {
        assert!(matches!(
            Format::from_hint(hint),
            Err(CatalogError::UnsupportedFormat(h)) if h == hint
        ));
    }

    #[test]
    fn test_from_path_without_extension() {
        assert!(matches!(
            Format::from_path(Path::new("i18n/en")),
            Err(CatalogError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_empty_yaml() {
        let catalog = load(b"  \n", Format::Yaml).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_invalid_json_keeps_diagnostic() {
        let err = load(b"{\"a\": ", Format::Json).unwrap_err();
        match err {
            CatalogError::Parse { format, message } => {
                assert_eq!(format, Format::Json);
                assert!(message.contains("EOF"), "unexpected diagnostic: {message}");
            },
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_null_values() {
        assert!(matches!(
            load(b"greeting: ~\n", Format::Yaml),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_yaml_quotes_everything() {
        let catalog: Catalog = [
            ("b", Value::from("no")),
            ("a", Value::from(true)),
            ("c", Value::from(7)),
        ]
        .into_iter()
        .collect();

        let text = String::from_utf8(save(&catalog, Format::Yaml).unwrap()).unwrap();

        insta::assert_snapshot!(text, @r#"
        "a": "true"
        "b": "no"
        "c": "7"
        "#);
    }

    #[test]
    fn test_save_yaml_escapes_line_separators() {
        let catalog: Catalog = [("a\u{2028}b", Value::from("x\u{85}y\u{2029}z\u{7f}"))]
            .into_iter()
            .collect();

        let text = String::from_utf8(save(&catalog, Format::Yaml).unwrap()).unwrap();

        assert_eq!(text, "\"a\\Lb\": \"x\\Ny\\Pz\\x7F\"\n");
    }

    #[test]
    fn test_save_yaml_empty() {
        let bytes = save(&Catalog::new(), Format::Yaml).unwrap();
        assert_eq!(bytes, b"{}\n");
        assert!(load(&bytes, Format::Yaml).unwrap().is_empty());
    }

    #[test]
    fn test_save_json_keeps_types() {
        let catalog: Catalog = [("count", Value::from(3)), ("flag", Value::from(false))]
            .into_iter()
            .collect();

        let text = String::from_utf8(save(&catalog, Format::Json).unwrap()).unwrap();

        assert_eq!(text, "{\n  \"count\": 3,\n  \"flag\": false\n}\n");
    }

    #[test]
    fn test_save_toml_writes_variant_tables() {
        let catalog: Catalog = [(
            "Hello",
            Value::from(PluralVariants {
                description: None,
                one: None,
                other: Some("Hi there".to_string()),
            }),
        )]
        .into_iter()
        .collect();

        let text = String::from_utf8(save(&catalog, Format::Toml).unwrap()).unwrap();

        assert!(text.contains("[Hello]"), "{text}");
        assert!(text.contains("other = \"Hi there\""), "{text}");
        assert!(!text.contains("one"), "{text}");
        assert_eq!(load(text.as_bytes(), Format::Toml).unwrap(), catalog);
    }
}
