//! CLI for the mgen meme generator.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mgen_core::config::{self, MgenConfig};
use mgen_core::selection::SelectionController;
use std::path::PathBuf;

use commands::{run_download, run_session, run_templates, run_url};

/// Top-level CLI for mgen.
#[derive(Debug, Parser)]
#[command(name = "mgen")]
#[command(about = "mgen: build meme image URLs from a template catalog and download them", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/mgen/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Template and text inputs shared by `url` and `download`.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Template id from the catalog, or a full image URL. Empty string = no template.
    /// Defaults to the configured initial template.
    #[arg(long, short = 't')]
    pub template: Option<String>,

    /// Top line of text.
    #[arg(long, default_value = "")]
    pub top: String,

    /// Bottom line of text.
    #[arg(long, default_value = "")]
    pub bottom: String,
}

impl SelectionArgs {
    /// Feeds the inputs to `controller` in picker order: template, top, bottom.
    pub fn apply(&self, controller: &mut SelectionController) {
        if let Some(template) = &self.template {
            controller.set_selected_template(template.as_str());
        }
        controller.set_top_text(self.top.as_str());
        controller.set_bottom_text(self.bottom.as_str());
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the templates in the remote catalog.
    Templates,

    /// Print the image URL for a template and two lines of text.
    Url {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Skip the catalog fetch; template ids are used as given.
        #[arg(long)]
        offline: bool,
    },

    /// Download the image for a template and two lines of text.
    Download {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Directory to save into (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Replace an existing file instead of picking a numbered name.
        #[arg(long)]
        overwrite: bool,
        /// Skip the catalog fetch; template ids are used as given.
        #[arg(long)]
        offline: bool,
    },

    /// Interactive session: edit template and text line by line, download on demand.
    Session {
        /// Directory to save downloads into (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Replace an existing file instead of picking a numbered name.
        #[arg(long)]
        overwrite: bool,
        /// Skip the catalog fetch; template ids are used as given.
        #[arg(long)]
        offline: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<MgenConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

fn download_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => Ok(std::env::current_dir()?),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Templates => run_templates(&cfg).await?,
            CliCommand::Url { selection, offline } => run_url(&cfg, &selection, offline).await?,
            CliCommand::Download {
                selection,
                dir,
                overwrite,
                offline,
            } => {
                let dir = download_dir(dir)?;
                run_download(&cfg, &selection, &dir, overwrite, offline).await?;
            }
            CliCommand::Session {
                dir,
                overwrite,
                offline,
            } => {
                let dir = download_dir(dir)?;
                run_session(&cfg, &dir, overwrite, offline).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
