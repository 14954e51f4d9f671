//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use trialgate_core::config::AppConfig;
use trialgate_database::connection::mask_password;

use super::Cli;
use crate::output::{self, OutputFormat, SettingRow};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load and validate the configuration, then print the effective trial settings
    Check,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommand::Check => {
            let config = cli.load_config()?;
            output::print_success(&format!(
                "Configuration in '{}' is valid (env: {})",
                cli.config_dir.display(),
                cli.env
            ));

            if !config.trial_promo.enabled {
                output::print_warning("trial_promo.enabled is false; no hooks will be registered");
            }

            let rows = effective_settings(&config);
            match cli.format {
                OutputFormat::Table => output::print_list(&rows, cli.format),
                OutputFormat::Json => output::print_json(&config.trial_promo),
            }
        }
    }

    Ok(())
}

/// Settings worth showing an operator, with secrets masked.
fn effective_settings(config: &AppConfig) -> Vec<SettingRow> {
    let trial = &config.trial_promo;
    vec![
        SettingRow::new("server", config.server.bind_address()),
        SettingRow::new("database.url", mask_password(&config.database.url)),
        SettingRow::new("database.hosting_table", &config.database.hosting_table),
        SettingRow::new("trial_promo.enabled", trial.enabled),
        SettingRow::new("trial_promo.product_id", trial.product_id),
        SettingRow::new("trial_promo.failure_policy", format!("{:?}", trial.failure_policy)),
        SettingRow::new("trial_promo.prompt_removal", format!("{:?}", trial.prompt_removal)),
        SettingRow::new("messages.promo_required", &trial.messages.promo_required),
        SettingRow::new("messages.trial_reused", &trial.messages.trial_reused),
        SettingRow::new("messages.lookup_unavailable", &trial.messages.lookup_unavailable),
        SettingRow::new("annotator.page", &trial.annotator.page),
        SettingRow::new("annotator.badge_label", &trial.annotator.badge_label),
        SettingRow::new("annotator.highlight_color", &trial.annotator.highlight_color),
        SettingRow::new(
            "annotator.extra_product_ids",
            format!("{:?}", trial.annotator.extra_product_ids),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_settings_mask_password() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[database]
url = "mysql://whmcs:hunter2@db:3306/whmcs"

[trial_promo]
product_id = 7
"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path(), "test").unwrap();
        let rows = effective_settings(&config);

        let url = rows.iter().find(|r| r.key == "database.url").unwrap();
        assert!(!url.value.contains("hunter2"));
        let product = rows.iter().find(|r| r.key == "trial_promo.product_id").unwrap();
        assert_eq!(product.value, "7");
    }
}
