use clap::{Parser, Subcommand};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/produk_ujk";

/// Manage the product catalog from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "catalog_form", version)]
pub struct Config {
    /// Base URL of the product collection resource
    #[arg(long, env = "CATALOG_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Mailbox size for each actor
    #[arg(long, env = "CATALOG_CHANNEL_BUFFER", default_value_t = 32)]
    pub buffer_size: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the product table once and exit
    List,
}
