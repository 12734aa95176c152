use crate::core::CliError;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Arguments for the keys command.
#[derive(Debug, Parser)]
pub struct KeysArgs {
    /// Template files to scan.
    #[arg(required = true)]
    pub templates: Vec<PathBuf>,
}

/// Prints the sorted, de-duplicated keys referenced by the templates, one per
/// line and without styling so the output can be piped.
pub fn run_keys(args: KeysArgs) -> Result<(), CliError> {
    let mut keys = BTreeSet::new();

    for path in &args.templates {
        let text = fs_err::read_to_string(path)?;
        let found = librei18n::scan_template_keys(&text);
        tracing::debug!(template = %path.display(), keys = found.len(), "Scanned template");
        keys.extend(found);
    }

    for key in &keys {
        println!("{key}");
    }
    Ok(())
}
