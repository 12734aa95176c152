//! Check command for validating locale catalogs against the fallback catalog.
//!
//! - Keys the fallback has and a locale lacks are errors.
//! - Keys a locale has and the fallback lacks are warnings.
//! - Keys referenced by `--template` files must exist in the fallback.

use crate::commands::{Project, ProjectArgs, read_catalog};
use crate::core::{
    CliError, MissingKeyError, UndefinedTemplateKeyError, UnusedKeyWarning, ValidationIssue,
    ValidationReport, find_key_span, find_template_key_span,
};
use crate::utils::ui;
use clap::Parser;
use librei18n::Catalog;
use miette::NamedSource;
use std::path::{Path, PathBuf};

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Locale(s) to check (can be specified multiple times). Defaults to all.
    #[arg(short, long)]
    pub locale: Vec<String>,

    /// Template file(s) whose keys must exist in the fallback catalog.
    #[arg(short, long)]
    pub template: Vec<PathBuf>,
}

/// Run the check command.
///
/// Warnings alone are reported but do not fail the command.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let project = Project::load(args.project)?;

    ui::print_check_header();

    let (fallback_path, base) = project.load_fallback()?;
    let locales = project.select_locales(&args.locale)?;

    if locales.is_empty() && args.template.is_empty() {
        ui::print_no_other_locales(project.fallback());
    }

    let mut all_issues: Vec<ValidationIssue> = Vec::new();

    for locale in &locales {
        let path = project.catalog_path(locale)?;
        ui::print_checking(locale, &path);
        all_issues.extend(check_locale(&base, project.fallback(), locale, &path)?);
    }

    for template in &args.template {
        ui::print_checking_template(template);
        all_issues.extend(check_template(&base, &fallback_path, template)?);
    }

    // Sort issues for deterministic output
    all_issues.sort_by_cached_key(|issue| issue.sort_key());

    let error_count = all_issues.iter().filter(|i| i.is_error()).count();
    let warning_count = all_issues.len() - error_count;

    if all_issues.is_empty() {
        ui::print_check_success();
        return Ok(());
    }

    let report = ValidationReport {
        error_count,
        warning_count,
        issues: all_issues,
    };

    if error_count == 0 {
        eprintln!("{:?}", miette::Report::new(report));
        Ok(())
    } else {
        Err(CliError::Validation(report))
    }
}

fn check_locale(
    base: &Catalog,
    fallback: &str,
    locale: &str,
    path: &Path,
) -> Result<Vec<ValidationIssue>, CliError> {
    let (content, catalog) = read_catalog(path)?;
    let diff = librei18n::diff(base, &catalog);
    tracing::debug!(
        locale,
        missing = diff.missing.len(),
        unused = diff.unused.len(),
        "Compared catalog with fallback"
    );

    let mut issues = Vec::new();

    for key in &diff.missing {
        issues.push(
            MissingKeyError {
                key: key.clone(),
                locale: locale.to_string(),
                help: format!(
                    "Add '{key}' to {} or run `librei18n fill -l {locale}`",
                    path.display()
                ),
            }
            .into(),
        );
    }

    for key in &diff.unused {
        issues.push(
            UnusedKeyWarning {
                src: NamedSource::new(path.display().to_string(), content.clone()),
                span: find_key_span(&content, key),
                key: key.clone(),
                locale: locale.to_string(),
                help: format!("Remove it, or add it to the '{fallback}' catalog"),
            }
            .into(),
        );
    }

    Ok(issues)
}

fn check_template(
    base: &Catalog,
    fallback_path: &Path,
    template: &Path,
) -> Result<Vec<ValidationIssue>, CliError> {
    let content = fs_err::read_to_string(template)?;
    let keys = librei18n::scan_template_keys(&content);

    Ok(keys
        .into_iter()
        .filter(|key| !base.contains_key(key))
        .map(|key| {
            UndefinedTemplateKeyError {
                src: NamedSource::new(template.display().to_string(), content.clone()),
                span: find_template_key_span(&content, &key),
                help: format!("Add '{key}' to {}", fallback_path.display()),
                key,
            }
            .into()
        })
        .collect())
}
