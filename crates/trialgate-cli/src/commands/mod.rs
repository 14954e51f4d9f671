//! CLI command definitions and dispatch.

pub mod annotate;
pub mod config;
pub mod evaluate;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use trialgate_core::config::AppConfig;

use crate::output::OutputFormat;

/// TrialGate: trial product promo code enforcement
#[derive(Debug, Parser)]
#[command(name = "trialgate-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Environment overlay to apply
    #[arg(short, long, env = "TRIALGATE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration management
    Config(config::ConfigArgs),
    /// Run the eligibility rule for a cart
    Evaluate(evaluate::EvaluateArgs),
    /// Print the admin head fragment for a page
    Annotate(annotate::AnnotateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Config(args) => config::execute(args, self).await,
            Commands::Evaluate(args) => evaluate::execute(args, self).await,
            Commands::Annotate(args) => annotate::execute(args, self).await,
        }
    }

    /// Load configuration from the selected directory and environment.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        AppConfig::load(&self.config_dir, &self.env).with_context(|| {
            format!(
                "Failed to load configuration from '{}' (env: {})",
                self.config_dir.display(),
                self.env
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "trialgate-cli",
            "--env",
            "production",
            "evaluate",
            "--pid",
            "7",
            "--pid",
            "50",
            "--client-id",
            "3",
            "--promo",
            "X",
        ])
        .unwrap();

        assert_eq!(cli.env, "production");
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.pid, vec![7, 50]);
                assert_eq!(args.client_id, Some(3));
                assert_eq!(args.promo.as_deref(), Some("X"));
                assert!(args.history.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_requires_pid() {
        assert!(Cli::try_parse_from(["trialgate-cli", "evaluate"]).is_err());
    }
}
