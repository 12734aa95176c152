//! CLI command implementations.

mod check;
mod common;
mod dry_run;
mod extract;
mod fill;
mod format;
mod keys;
mod merge;
mod render;

pub use check::{CheckArgs, run_check};
pub use common::{
    Project, ProjectArgs, load_catalog, read_catalog, render_catalog, save_catalog,
};
pub use dry_run::DryRunDiff;
pub use extract::{ExtractArgs, run_extract};
pub use fill::{FillArgs, run_fill};
pub use format::{FormatArgs, run_format};
pub use keys::{KeysArgs, run_keys};
pub use merge::{MergeArgs, run_merge};
pub use render::{RenderArgs, run_render};
