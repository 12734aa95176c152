//! Extract command: Rust sources to a catalog of message records.

use crate::commands::save_catalog;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use librei18n::{Catalog, Format};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Rust file or directory to scan.
    #[arg(long)]
    pub src: PathBuf,

    /// Catalog to write; its extension selects the format.
    #[arg(long)]
    pub out: PathBuf,
}

/// Run the extract command.
pub fn run_extract(args: ExtractArgs) -> Result<(), CliError> {
    // Reject the output path before doing any work.
    Format::from_path(&args.out).map_err(|e| CliError::catalog(&args.out, e))?;

    let spinner = ui::create_spinner("Scanning Rust sources...");
    let messages = librei18n_sc_parser::parse_path(&args.src);
    spinner.finish_and_clear();
    let messages = messages?;

    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for message in &messages {
        *occurrences.entry(message.id.as_str()).or_default() += 1;
    }
    for (id, count) in occurrences.iter().filter(|(_, count)| **count > 1) {
        ui::print_duplicate_id(id, *count);
    }

    let catalog = Catalog::from_messages(&messages);
    save_catalog(&catalog, &args.out)?;

    ui::print_extracted(messages.len(), catalog.len(), &args.out);
    Ok(())
}
