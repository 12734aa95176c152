use crate::commands::{load_catalog, save_catalog};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    /// Catalog providing keys the destination lacks.
    #[arg(long)]
    pub src: PathBuf,

    /// Catalog whose existing values are kept.
    #[arg(long)]
    pub dst: PathBuf,

    /// Where to write the result (defaults to --dst).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Run the merge command.
///
/// Keys present in both catalogs keep the destination's value.
pub fn run_merge(args: MergeArgs) -> Result<(), CliError> {
    let src = load_catalog(&args.src)?;
    let dst = load_catalog(&args.dst)?;

    let merged = librei18n::merge(&src, &dst);

    let out = args.out.unwrap_or(args.dst);
    save_catalog(&merged, &out)?;

    ui::print_merged(merged.len() - dst.len(), &out);
    Ok(())
}
