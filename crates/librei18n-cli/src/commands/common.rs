use crate::core::{CliError, FallbackCatalogNotFoundError, LocaleNotFoundError};
use crate::utils::ui;
use clap::Args;
use librei18n::{Catalog, Format};
use librei18n_toml::I18nConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Path to the directory holding i18n.toml (defaults to current directory).
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// A project directory with its validated `i18n.toml`.
#[derive(Debug, Clone)]
pub struct Project {
    /// The user-supplied (or default) root path.
    pub root: PathBuf,
    pub config: I18nConfig,
}

impl Project {
    /// Reads and validates the configuration under `args.path`.
    pub fn load(args: ProjectArgs) -> Result<Self, CliError> {
        let root = args.path.unwrap_or_else(|| PathBuf::from("."));
        let config = I18nConfig::from_dir(&root)?;
        config.fallback_language_identifier()?;
        config.catalog_format()?;
        config.validate_assets_dir(&root)?;

        tracing::debug!(root = %root.display(), "Loaded project");
        Ok(Self { root, config })
    }

    pub fn fallback(&self) -> &str {
        &self.config.fallback_language
    }

    pub fn catalog_path(&self, locale: &str) -> Result<PathBuf, CliError> {
        Ok(self.config.catalog_path(&self.root, locale)?)
    }

    /// Loads the fallback catalog, which must exist.
    pub fn load_fallback(&self) -> Result<(PathBuf, Catalog), CliError> {
        let path = self.config.fallback_catalog_path(&self.root)?;
        if !path.is_file() {
            return Err(FallbackCatalogNotFoundError {
                language: self.fallback().to_string(),
                path,
            }
            .into());
        }
        let catalog = load_catalog(&path)?;
        Ok((path, catalog))
    }

    /// Every locale with a catalog, fallback included, sorted.
    pub fn locales(&self) -> Result<Vec<String>, CliError> {
        Ok(self
            .config
            .available_locales_from_base(&self.root)?
            .into_iter()
            .map(|lang| lang.to_string())
            .collect())
    }

    /// Resolves the locales a command should work on.
    ///
    /// An empty request selects every locale. Requested locales must have a
    /// catalog. The fallback language is never part of the result.
    pub fn select_locales(&self, requested: &[String]) -> Result<Vec<String>, CliError> {
        let available = self.locales()?;

        let selected: Vec<String> = if requested.is_empty() {
            available
        } else {
            for locale in requested {
                if !available.contains(locale) {
                    ui::print_locale_not_found(locale, &available);
                    return Err(LocaleNotFoundError {
                        locale: locale.clone(),
                        available: available.join(", "),
                    }
                    .into());
                }
            }
            let mut requested = requested.to_vec();
            requested.sort();
            requested.dedup();
            requested
        };

        Ok(selected
            .into_iter()
            .filter(|locale| locale != self.fallback())
            .collect())
    }
}

/// Reads a catalog file, returning its text alongside the parsed catalog.
pub fn read_catalog(path: &Path) -> Result<(String, Catalog), CliError> {
    let format = Format::from_path(path).map_err(|e| CliError::catalog(path, e))?;
    let content = fs_err::read_to_string(path)?;
    let catalog =
        librei18n::load(content.as_bytes(), format).map_err(|e| CliError::catalog(path, e))?;
    Ok((content, catalog))
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    librei18n::load_path(path).map_err(|e| CliError::catalog(path, e))
}

pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<(), CliError> {
    librei18n::save_path(catalog, path).map_err(|e| CliError::catalog(path, e))
}

/// Serializes `catalog` the way [`save_catalog`] would write it to `path`.
pub fn render_catalog(catalog: &Catalog, path: &Path) -> Result<String, CliError> {
    let format = Format::from_path(path).map_err(|e| CliError::catalog(path, e))?;
    let bytes = librei18n::save(catalog, format).map_err(|e| CliError::catalog(path, e))?;
    String::from_utf8(bytes).map_err(|e| CliError::Other(e.to_string()))
}
