#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod error;
pub mod format;
mod message;
pub mod reconcile;
pub mod render;
pub mod template_keys;

pub use catalog::{Catalog, Number, PluralVariants, Value};
pub use error::{CatalogError, RenderError};
pub use format::{Format, load, load_path, save, save_path};
pub use message::Message;
pub use reconcile::{CatalogDiff, auto_fill, diff, merge};
pub use render::{LocalizeConfig, Template, TemplateData, localize, render};
pub use template_keys::scan_template_keys;
