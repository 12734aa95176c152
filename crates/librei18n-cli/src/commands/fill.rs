//! Fill command for adding keys the fallback catalog has to other locales.
//!
//! Existing translations are never changed. New keys get the placeholder
//! text, or a copy of the fallback text when the placeholder is empty.

use crate::commands::{
    DryRunDiff, Project, ProjectArgs, load_catalog, render_catalog, save_catalog,
};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;

/// Arguments for the fill command.
#[derive(Debug, Parser)]
pub struct FillArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Specific locale(s) to fill (can be specified multiple times).
    #[arg(short, long)]
    pub locale: Vec<String>,

    /// Fill all locales (excluding the fallback language).
    #[arg(long)]
    pub all: bool,

    /// Text for added keys (overrides i18n.toml). Empty copies the fallback text.
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Dry run - show what would be filled without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the fill command.
pub fn run_fill(args: FillArgs) -> Result<(), CliError> {
    let project = Project::load(args.project)?;

    ui::print_fill_header();

    let locales = if args.all {
        project.select_locales(&[])?
    } else if args.locale.is_empty() {
        ui::print_no_locales_specified();
        return Ok(());
    } else {
        project.select_locales(&args.locale)?
    };

    let placeholder = args
        .placeholder
        .as_deref()
        .unwrap_or_else(|| project.config.placeholder());
    let (_, base) = project.load_fallback()?;

    let mut total_keys_added = 0;
    let mut total_locales_affected = 0;

    let pb = ui::create_progress_bar(locales.len() as u64, "Filling locales...");

    for locale in &locales {
        pb.set_message(format!("Filling {locale}"));

        let path = project.catalog_path(locale)?;
        let target = load_catalog(&path)?;
        let filled = librei18n::auto_fill(&base, &target, placeholder);

        let added_keys: Vec<&str> = base.keys().filter(|k| !target.contains_key(k)).collect();
        if added_keys.is_empty() {
            pb.inc(1);
            continue;
        }

        total_locales_affected += 1;
        total_keys_added += added_keys.len();

        if args.dry_run {
            let diff = DryRunDiff::new(
                render_catalog(&target, &path)?,
                render_catalog(&filled, &path)?,
            );
            pb.suspend(|| {
                ui::print_would_add_keys(added_keys.len(), locale);
                diff.print();
            });
        } else {
            save_catalog(&filled, &path)?;
            pb.suspend(|| {
                ui::print_added_keys(added_keys.len(), locale);
                for key in &added_keys {
                    ui::print_filled_key(key);
                }
            });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if total_keys_added == 0 {
        ui::print_all_in_sync();
    } else if args.dry_run {
        ui::print_fill_dry_run_summary(total_keys_added, total_locales_affected);
    } else {
        ui::print_fill_summary(total_keys_added, total_locales_affected);
    }
    Ok(())
}
