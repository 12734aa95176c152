#![doc = include_str!("../README.md")]

use fs_err as fs;
use librei18n::{CatalogError, Format};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "i18n.toml";

#[derive(Debug, Error)]
pub enum I18nConfigError {
    /// Configuration file not found.
    #[error("i18n.toml configuration file not found at '{0}'")]
    NotFound(PathBuf),
    /// Failed to read the configuration file or list the assets directory.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] io::Error),
    /// The assets directory is missing or is not a directory.
    #[error("Assets directory '{0}' does not exist or is not a directory")]
    AssetsNotFound(PathBuf),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Encountered an invalid language identifier while reading assets directory.
    #[error("Invalid language identifier '{name}' found in assets directory")]
    InvalidLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// Encountered a language identifier that uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
    /// Encountered an invalid fallback language identifier.
    #[error("Invalid fallback language identifier '{name}'")]
    InvalidFallbackLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// The `format` field names no supported catalog format.
    #[error("Unsupported catalog format '{name}' in i18n.toml")]
    UnsupportedFormat {
        name: String,
        #[source]
        source: CatalogError,
    },
}

/// The configuration for a librei18n project.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct I18nConfig {
    /// The fallback language identifier (e.g., "en-US").
    ///
    /// Its catalog is the base every other locale is checked against.
    pub fallback_language: String,
    /// Path to the assets directory containing catalogs.
    /// Expected structure: {assets_dir}/{locale}.{format}
    pub assets_dir: PathBuf,
    /// Catalog file extension. Defaults to `yaml`.
    ///
    /// ```toml
    /// format = "json"
    /// ```
    #[serde(default)]
    pub format: Option<String>,
    /// Text inserted for keys that `fill` adds to a locale.
    ///
    /// When absent, the fallback language's own text is copied.
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl I18nConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, I18nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(I18nConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;

        let config: I18nConfig = toml::from_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            fallback = %config.fallback_language,
            "Loaded i18n configuration"
        );
        Ok(config)
    }

    /// Reads `i18n.toml` from a project directory.
    pub fn from_dir(dir: &Path) -> Result<Self, I18nConfigError> {
        Self::read_from_path(dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the assets directory from a base directory.
    pub fn assets_dir_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.assets_dir)
    }

    /// Returns the configured fallback language as a `LanguageIdentifier`.
    pub fn fallback_language_identifier(&self) -> Result<LanguageIdentifier, I18nConfigError> {
        let lang = self
            .fallback_language
            .parse::<LanguageIdentifier>()
            .map_err(
                |source| I18nConfigError::InvalidFallbackLanguageIdentifier {
                    name: self.fallback_language.clone(),
                    source,
                },
            )?;

        ensure_supported_language_identifier(&lang, &self.fallback_language)?;

        Ok(lang)
    }

    /// The catalog extension as written in the configuration, lowercased and
    /// without a leading dot.
    pub fn catalog_extension(&self) -> Result<String, I18nConfigError> {
        let Some(raw) = self.format.as_deref() else {
            return Ok(Format::Yaml.extension().to_string());
        };

        let extension = raw.trim_start_matches('.').to_ascii_lowercase();
        Format::from_hint(&extension).map_err(|source| I18nConfigError::UnsupportedFormat {
            name: raw.to_string(),
            source,
        })?;
        Ok(extension)
    }

    /// The catalog format every locale file uses.
    pub fn catalog_format(&self) -> Result<Format, I18nConfigError> {
        let extension = self.catalog_extension()?;
        Format::from_hint(&extension).map_err(|source| I18nConfigError::UnsupportedFormat {
            name: extension,
            source,
        })
    }

    /// The configured placeholder, or an empty string.
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or_default()
    }

    /// Path of the catalog file for `locale`.
    pub fn catalog_path(&self, base_dir: &Path, locale: &str) -> Result<PathBuf, I18nConfigError> {
        let extension = self.catalog_extension()?;
        Ok(self
            .assets_dir_from_base(base_dir)
            .join(format!("{locale}.{extension}")))
    }

    /// Path of the fallback language's catalog file.
    pub fn fallback_catalog_path(&self, base_dir: &Path) -> Result<PathBuf, I18nConfigError> {
        self.catalog_path(base_dir, &self.fallback_language)
    }

    /// Returns the locales that have a catalog under the assets directory.
    ///
    /// Only files with the configured extension count. Each file stem must
    /// be a language identifier in canonical form, so that the identifier
    /// maps back to the same file name.
    pub fn available_locales_from_base(
        &self,
        base_dir: &Path,
    ) -> Result<Vec<LanguageIdentifier>, I18nConfigError> {
        let extension = self.catalog_extension()?;
        let assets_path = self.assets_dir_from_base(base_dir);
        let entries = fs::read_dir(&assets_path)?;

        let mut languages: Vec<(String, LanguageIdentifier)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_catalog_entry(&entry, &extension).transpose())
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|lang| (lang.to_string(), lang))
            .collect();

        languages.sort_by(|a, b| a.0.cmp(&b.0));
        languages.dedup_by(|a, b| a.0 == b.0);

        tracing::debug!(
            assets = %assets_path.display(),
            count = languages.len(),
            "Discovered locale catalogs"
        );
        Ok(languages.into_iter().map(|(_, lang)| lang).collect())
    }

    /// Validates the assets directory, returning its path.
    pub fn validate_assets_dir(&self, base_dir: &Path) -> Result<PathBuf, I18nConfigError> {
        let assets_path = self.assets_dir_from_base(base_dir);

        if !assets_path.is_dir() {
            return Err(I18nConfigError::AssetsNotFound(assets_path));
        }

        Ok(assets_path)
    }
}

/// Parse a directory entry as a locale catalog.
///
/// Returns `Ok(None)` if the entry is not a file with `extension`.
fn parse_catalog_entry(
    entry: &fs::DirEntry,
    extension: &str,
) -> Result<Option<LanguageIdentifier>, I18nConfigError> {
    if !entry.file_type()?.is_file() {
        return Ok(None);
    }

    let path = entry.path();
    let matches_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if !matches_extension {
        return Ok(None);
    }

    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return Err(I18nConfigError::ReadError(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Assets directory contains a non UTF-8 entry: {:?}", path),
        )));
    };

    let lang = stem.parse::<LanguageIdentifier>().map_err(|source| {
        I18nConfigError::InvalidLanguageIdentifier {
            name: stem.to_string(),
            source,
        }
    })?;

    ensure_supported_language_identifier(&lang, stem)?;

    let canonical = lang.to_string();
    if canonical != stem {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: stem.to_string(),
            reason: format!("catalog files must use the canonical form '{canonical}'"),
        });
    }

    Ok(Some(lang))
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), I18nConfigError> {
    if lang.variants().next().is_some() {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(())
}
