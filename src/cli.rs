use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::{KeyErrorPolicy, OutputFormat};
use crate::ddg::services::OperationSelector;

/// Resolve deep dependency graph visibility keys into service/operation graphs
#[derive(Parser, Debug)]
#[command(name = "ddg-vis")]
#[command(version)]
#[command(
    about = "Resolve deep dependency graph visibility keys into service/operation graphs",
    long_about = None
)]
pub struct Args {
    /// Path to the materialized DDG payload (JSON array of paths)
    #[arg(short, long, value_name = "FILE")]
    pub payload: PathBuf,

    /// Focal service (defaults to `service=` from --query)
    #[arg(short, long)]
    pub service: Option<String>,

    /// Focal operation; omit to match any operation of the focal service
    #[arg(short = 'O', long)]
    pub operation: Option<String>,

    /// Navigation state as a URL query string, e.g. "service=api&visibilityKey=H"
    #[arg(short, long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Visibility key to resolve, overriding the one in --query
    #[arg(short = 'k', long, value_name = "KEY")]
    pub visibility_key: Option<String>,

    /// Hop radius of the default view when no key is present
    #[arg(long, value_name = "N")]
    pub hops: Option<u32>,

    /// Make operations visible: "service" or "service::operation"
    /// Can be specified multiple times: --show db --show "cache::get"
    #[arg(long, value_name = "SELECTOR")]
    pub show: Vec<OperationSelector>,

    /// Hide operations: "service" or "service::operation"
    #[arg(long, value_name = "SELECTOR")]
    pub hide: Vec<OperationSelector>,

    /// Output format: json, markdown or dot [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to do with a malformed visibility key: default, empty or strict [default: default]
    #[arg(long, value_name = "POLICY")]
    pub on_malformed_key: Option<KeyErrorPolicy>,

    /// Path to a ddg-vis.config.yml file (defaults to the one next to the payload)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
