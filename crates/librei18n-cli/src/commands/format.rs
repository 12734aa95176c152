//! Format command for rewriting catalogs in canonical form.
//!
//! Keys are sorted A-Z. YAML values are stringified and double-quoted; JSON
//! and TOML keep their value types.

use crate::commands::DryRunDiff;
use crate::core::{CliError, FormatError, FormatReport};
use crate::utils::ui;
use clap::Parser;
use librei18n::Format;
use std::path::{Path, PathBuf};

/// Arguments for the format command.
#[derive(Debug, Parser)]
pub struct FormatArgs {
    /// Catalog files to format.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Dry run - show what would be formatted without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Result of formatting a single file.
#[derive(Debug)]
pub struct FormatResult {
    /// Path to the file.
    pub path: PathBuf,
    /// Whether the file was (or would be) changed.
    pub changed: bool,
    /// Pending change, in dry-run mode only.
    pub diff: Option<DryRunDiff>,
    /// Error if formatting failed.
    pub error: Option<String>,
}

impl FormatResult {
    fn failed(path: &Path, error: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            changed: false,
            diff: None,
            error: Some(error.to_string()),
        }
    }
}

/// Run the format command.
pub fn run_format(args: FormatArgs) -> Result<(), CliError> {
    ui::print_format_header();

    let mut total_formatted = 0;
    let mut total_unchanged = 0;
    let mut errors: Vec<FormatError> = Vec::new();

    let pb = ui::create_progress_bar(args.files.len() as u64, "Formatting catalogs...");

    for path in &args.files {
        pb.set_message(format!("Formatting {}", path.display()));
        let result = format_catalog_file(path, args.dry_run);

        if let Some(error) = result.error {
            errors.push(FormatError {
                path: result.path,
                help: error,
            });
        } else if result.changed {
            total_formatted += 1;
            pb.suspend(|| {
                if args.dry_run {
                    ui::print_would_format(&result.path);
                    if let Some(diff) = &result.diff {
                        diff.print();
                    }
                } else {
                    ui::print_formatted(&result.path);
                }
            });
        } else {
            total_unchanged += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if errors.is_empty() {
        if args.dry_run && total_formatted > 0 {
            ui::print_format_dry_run_summary(total_formatted);
        } else {
            ui::print_format_summary(total_formatted, total_unchanged);
        }
        Ok(())
    } else {
        Err(CliError::Format(FormatReport {
            formatted_count: total_formatted,
            error_count: errors.len(),
            errors,
        }))
    }
}

/// Format a single catalog file.
fn format_catalog_file(path: &Path, check_only: bool) -> FormatResult {
    let format = match Format::from_path(path) {
        Ok(format) => format,
        Err(e) => return FormatResult::failed(path, e),
    };

    let content = match fs_err::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return FormatResult::failed(path, e),
    };

    let catalog = match librei18n::load(content.as_bytes(), format) {
        Ok(catalog) => catalog,
        Err(e) => return FormatResult::failed(path, e),
    };

    let formatted = match librei18n::save(&catalog, format).map(String::from_utf8) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return FormatResult::failed(path, e),
        Err(e) => return FormatResult::failed(path, e),
    };

    let diff = DryRunDiff::new(content, formatted);
    let changed = !diff.is_empty();

    if changed
        && !check_only
        && let Err(e) = librei18n::save_path(&catalog, path)
    {
        return FormatResult::failed(path, e);
    }

    FormatResult {
        path: path.to_path_buf(),
        changed,
        diff: (changed && check_only).then_some(diff),
        error: None,
    }
}
