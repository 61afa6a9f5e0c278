//! CLI for the Carebridge site content client.

mod commands;

use std::sync::Arc;

use anyhow::Result;
use cbweb_core::api::{ContentClient, MAIN_NAVIGATION};
use cbweb_core::cache::ContentCache;
use cbweb_core::config;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use commands::{
    run_completions, run_nav, run_normalize_url, run_page, run_parse_list, run_submit, LeadArgs,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cbweb")]
#[command(about = "Fetch and normalize Carebridge site content", long_about = None)]
pub struct Cli {
    /// Content API base URL (overrides `api_base_url` from config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Routed pages that can be mounted from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Home,
    About,
    Contact,
    Device,
    News,
    ProductDetails,
}

/// Lead forms that can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormTarget {
    Contact,
    About,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Mount a page and print its view model as JSON.
    Page {
        /// Page to load.
        #[arg(value_enum)]
        page: PageKind,
    },

    /// Print the items of a navigation menu.
    Nav {
        /// Menu key.
        #[arg(default_value = MAIN_NAVIGATION)]
        menu_key: String,
    },

    /// Validate and submit a lead form.
    Submit {
        /// Which form to post.
        #[arg(value_enum)]
        form: FormTarget,

        #[command(flatten)]
        lead: LeadArgs,
    },

    /// Clean an asset URL the way page mappers do.
    NormalizeUrl {
        /// Raw URL (or a JSON string/array).
        raw: String,
    },

    /// Recover a delimiter-corrupted list.
    ParseList {
        /// Raw list (a JSON array or string, or plain text).
        raw: String,
        /// Treat the list as an image gallery (normalize, dedupe, pad).
        #[arg(long)]
        gallery: bool,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let mut cfg = config::load_or_init()?;
        if let Some(url) = cli.api_url {
            cfg.api_base_url = url;
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let client = ContentClient::from_config(&cfg, Arc::new(ContentCache::new()));

        match cli.command {
            CliCommand::Page { page } => run_page(&client, page).await?,
            CliCommand::Nav { menu_key } => run_nav(&client, &menu_key).await?,
            CliCommand::Submit { form, lead } => run_submit(&client, form, lead).await?,
            CliCommand::NormalizeUrl { raw } => run_normalize_url(client.urls(), &raw),
            CliCommand::ParseList { raw, gallery } => {
                run_parse_list(&client, &raw, gallery)?;
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
