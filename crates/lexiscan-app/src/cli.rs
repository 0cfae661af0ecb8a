use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lexiscan_config::{Config, OutputFormat, SubmissionPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "lexiscan",
    version,
    about = "Send a photo of a page to the underlined-word service and show the definitions"
)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Upload timeout in seconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// text, html or json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// What to do with a submission while another is in flight: reject or latest
    #[arg(long, global = true)]
    pub policy: Option<SubmissionPolicy>,

    /// Write results to this file instead of stdout
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit one image and print the result
    Submit {
        /// Image to analyse
        file: Option<PathBuf>,
    },
    /// Read image paths from stdin, one submission per line
    Watch,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::new(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Flags win over file and environment values
    pub fn apply(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.service.base_url = server.clone();
        }
        if let Some(timeout) = self.timeout {
            config.service.timeout_seconds = timeout;
        }
        if let Some(format) = self.format {
            config.ui.format = format;
        }
        if let Some(policy) = self.policy {
            config.submission.policy = policy;
        }
        if let Some(output) = &self.output {
            config.ui.output = Some(output.clone());
        }
        if self.no_color {
            config.ui.color = false;
        }
    }
}
