// CLI output formatting with consistent styling using indicatif and colored.
// Results go to stdout through println!; diagnostics and logs go to stderr.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "LIBREI18N_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Installs the stderr log subscriber.
///
/// The filter comes from `LIBREI18N_LOG` and defaults to `warn`; `verbose`
/// forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!is_e2e())
        .without_time()
        .try_init();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

// extract / merge

pub fn print_extracted(count: usize, unique: usize, out: &Path) {
    println!(
        "{} {} message(s) ({} unique) to {}",
        "Extracted".green(),
        count,
        unique,
        out.display()
    );
}

pub fn print_duplicate_id(id: &str, occurrences: usize) {
    println!(
        "{} {} ({} occurrences, last one kept)",
        "Duplicate id".yellow(),
        id.bold(),
        occurrences
    );
}

pub fn print_merged(added: usize, out: &Path) {
    println!(
        "{} {} key(s) into {}",
        "Merged".green(),
        added,
        out.display()
    );
}

// check

pub fn print_check_header() {
    println!("{}", "librei18n catalog check".dimmed());
}

pub fn print_checking(locale: &str, path: &Path) {
    println!(
        "{} {} ({})",
        "Checking".dimmed(),
        locale.green(),
        path.display()
    );
}

pub fn print_checking_template(path: &Path) {
    println!("{} {}", "Scanning template".dimmed(), path.display());
}

pub fn print_check_success() {
    println!("{}", "No issues found!".green());
}

pub fn print_no_other_locales(fallback: &str) {
    println!(
        "{} {}",
        "No locales besides the fallback".yellow(),
        fallback.cyan()
    );
}

// fill

pub fn print_fill_header() {
    println!("{}", "librei18n fill".dimmed());
}

pub fn print_would_add_keys(count: usize, locale: &str) {
    println!(
        "{} {} key(s) to {}",
        "Would add".yellow(),
        count,
        locale.cyan()
    );
}

pub fn print_added_keys(count: usize, locale: &str) {
    println!("{} {} key(s) to {}", "Added".green(), count, locale.cyan());
}

pub fn print_filled_key(key: &str) {
    println!("  {} {}", "->".dimmed(), key);
}

pub fn print_all_in_sync() {
    println!("{}", "All locales are in sync!".green());
}

pub fn print_fill_dry_run_summary(keys: usize, locales: usize) {
    println!(
        "{} {} key(s) across {} locale(s)",
        "Would fill".yellow(),
        keys,
        locales
    );
}

pub fn print_fill_summary(keys: usize, locales: usize) {
    println!(
        "{} {} key(s) filled in {} locale(s)",
        "Done:".green(),
        keys,
        locales
    );
}

pub fn print_no_locales_specified() {
    println!(
        "{}",
        "No locales specified. Use --locale <LOCALE> or --all".yellow()
    );
}

pub fn print_locale_not_found(locale: &str, available: &[String]) {
    let available_str = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };
    eprintln!(
        "{} '{}'. Available locales: {}",
        "Locale not found:".red(),
        locale.white().bold(),
        available_str.cyan()
    );
}

// fmt

pub fn print_format_header() {
    println!("{}", "librei18n formatter".dimmed());
}

pub fn print_would_format(path: &Path) {
    println!("{} {}", "Would format:".yellow(), path.display());
}

pub fn print_formatted(path: &Path) {
    println!("{} {}", "Formatted:".green(), path.display());
}

pub fn print_format_dry_run_summary(count: usize) {
    println!(
        "{} {} file(s) would be formatted",
        "Dry run:".yellow(),
        count
    );
}

pub fn print_format_summary(formatted: usize, unchanged: usize) {
    println!(
        "{} {} formatted, {} unchanged",
        "Done:".green(),
        formatted,
        unchanged
    );
}

pub fn print_diff(old: &str, new: &str) {
    // Colors are already suppressed in e2e mode by `colored::control::set_override(false)`.
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{} {}", sign, change);
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
                if change.missing_newline() {
                    println!();
                }
            }
        }
    }
}
