use clap::{Parser, Subcommand};
use librei18n_cli::commands::{
    CheckArgs, ExtractArgs, FillArgs, FormatArgs, KeysArgs, MergeArgs, RenderArgs, run_check,
    run_extract, run_fill, run_format, run_keys, run_merge, run_render,
};
use librei18n_cli::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "librei18n")]
#[command(about = "Extract, reconcile and render translation catalogs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs (overrides LIBREI18N_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Deterministic output for end-to-end tests.
    #[arg(long, global = true, hide = true)]
    e2e: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract Message literals from Rust sources into a catalog
    Extract(ExtractArgs),

    /// Copy keys missing from a destination catalog out of a source catalog
    Merge(MergeArgs),

    /// Check locale catalogs for missing and unused keys
    Check(CheckArgs),

    /// Fill keys missing from locale catalogs
    Fill(FillArgs),

    /// List translation keys referenced by templates
    Keys(KeysArgs),

    /// Rewrite catalogs in canonical sorted form
    Fmt(FormatArgs),

    /// Render one message from a catalog
    Render(RenderArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    let e2e = cli.e2e;
    ui::set_e2e_mode(e2e);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!e2e)
                .unicode(!e2e)
                .context_lines(2)
                .tab_width(4)
                .color(!e2e)
                .build(),
        )
    }))
    .ok();

    ui::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Merge(args) => run_merge(args),
        Commands::Check(args) => run_check(args),
        Commands::Fill(args) => run_fill(args),
        Commands::Keys(args) => run_keys(args),
        Commands::Fmt(args) => run_format(args),
        Commands::Render(args) => run_render(args),
    };

    result.map_err(miette::Report::new)
}
