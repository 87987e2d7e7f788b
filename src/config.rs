//! Configuration file support for ddg-vis.
//!
//! Provides YAML-based configuration through `ddg-vis.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line arguments.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::{KeyErrorPolicy, OutputFormat};
use crate::ddg::services::OperationSelector;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "ddg-vis.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub on_malformed_key: Option<String>,
    pub default_hops: Option<u32>,
    pub show: Option<Vec<String>>,
    pub hide: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings after command-line arguments have been laid over the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedSettings {
    pub format: OutputFormat,
    pub key_error_policy: KeyErrorPolicy,
    pub hops: Option<u32>,
    pub show: Vec<OperationSelector>,
    pub hide: Vec<OperationSelector>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub key_error_policy: Option<KeyErrorPolicy>,
    pub hops: Option<u32>,
    pub show: Vec<OperationSelector>,
    pub hide: Vec<OperationSelector>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Merge CLI values over the config file.
///
/// Scalars from the command line win. Selector lists from the command line
/// replace the configured list when they are non-empty.
pub fn merge(config: Option<&ConfigFile>, cli: CliOverrides) -> Result<ResolvedSettings> {
    let (format, policy, hops, show, hide) = match config {
        Some(config) => (
            parse_format(config)?,
            parse_policy(config)?,
            config.default_hops,
            parse_selectors("show", config.show.as_deref())?,
            parse_selectors("hide", config.hide.as_deref())?,
        ),
        None => Default::default(),
    };

    Ok(ResolvedSettings {
        format: cli.format.or(format).unwrap_or_default(),
        key_error_policy: cli.key_error_policy.or(policy).unwrap_or_default(),
        hops: cli.hops.or(hops),
        show: if cli.show.is_empty() { show } else { cli.show },
        hide: if cli.hide.is_empty() { hide } else { cli.hide },
    })
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    parse_format(config)?;
    parse_policy(config)?;
    parse_selectors("show", config.show.as_deref())?;
    parse_selectors("hide", config.hide.as_deref())?;
    Ok(())
}

fn parse_format(config: &ConfigFile) -> Result<Option<OutputFormat>> {
    match config.format.as_deref() {
        None => Ok(None),
        Some(value) => match value.parse::<OutputFormat>() {
            Ok(format) => Ok(Some(format)),
            Err(e) => bail!(
                "Invalid config: format: {}\n\n💡 Hint: Use one of json, markdown or dot.",
                e
            ),
        },
    }
}

fn parse_policy(config: &ConfigFile) -> Result<Option<KeyErrorPolicy>> {
    match config.on_malformed_key.as_deref() {
        None => Ok(None),
        Some(value) => match value.parse::<KeyErrorPolicy>() {
            Ok(policy) => Ok(Some(policy)),
            Err(e) => bail!(
                "Invalid config: on_malformed_key: {}\n\n💡 Hint: Use one of default, empty or strict.",
                e
            ),
        },
    }
}

fn parse_selectors(field: &str, values: Option<&[String]>) -> Result<Vec<OperationSelector>> {
    let mut selectors = Vec::new();
    for (i, value) in values.unwrap_or_default().iter().enumerate() {
        let selector = value.parse::<OperationSelector>().with_context(|| {
            format!(
                "Invalid config: {}[{}] is not a valid selector.\n\n💡 Hint: Use \"service\" or \"service::operation\".",
                field, i
            )
        })?;
        selectors.push(selector);
    }
    Ok(selectors)
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
