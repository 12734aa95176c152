use crate::commands::load_catalog;
use crate::core::{CliError, MessageNotFoundError};
use clap::Parser;
use librei18n::{LocalizeConfig, TemplateData};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Catalog holding the message.
    pub catalog: PathBuf,

    /// Message id.
    pub key: String,

    /// Plural count; exactly 1 selects the `one` form.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub count: i64,

    /// Template data as NAME=VALUE. VALUE is read as JSON when it parses,
    /// otherwise as a string.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub data: Vec<(String, JsonValue)>,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let message = catalog
        .message(&args.key)
        .ok_or_else(|| MessageNotFoundError {
            key: args.key.clone(),
            catalog: args.catalog.clone(),
        })?;

    let template_data: TemplateData = args.data.into_iter().collect();
    let config = LocalizeConfig::builder()
        .message(&message)
        .template_data(template_data)
        .plural_count(args.count)
        .build();

    let text = librei18n::localize(&config)?;
    println!("{text}");
    Ok(())
}

fn parse_assignment(raw: &str) -> Result<(String, JsonValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.into()));
    Ok((name.to_string(), value))
}
