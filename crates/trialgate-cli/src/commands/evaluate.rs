//! Run the eligibility rule from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use plugin_trial_promo::{EligibilityResult, TrialEligibilityChecker};
use trialgate_core::config::{AppConfig, FailurePolicy};
use trialgate_core::traits::HostingHistory;
use trialgate_core::types::id::{ClientId, ProductId};
use trialgate_database::{DatabasePool, HostingRepository, MemoryHostingHistory};
use trialgate_entity::cart::CartSnapshot;
use trialgate_entity::checkout::CheckoutContext;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for the evaluate command
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Product id of a cart line (repeat for several lines)
    #[arg(long, required = true)]
    pub pid: Vec<i64>,

    /// Logged-in client id
    #[arg(long)]
    pub client_id: Option<i64>,

    /// Email entered at checkout
    #[arg(long)]
    pub email: Option<String>,

    /// Applied promo code
    #[arg(long)]
    pub promo: Option<String>,

    /// JSON file of hosting records to use instead of the database
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Printable evaluation outcome.
#[derive(Debug, Serialize)]
struct Verdict {
    result: EligibilityResult,
    message: Option<String>,
}

/// Execute the evaluate command
pub async fn execute(args: &EvaluateArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let verdict = evaluate(args, &config).await?;

    match cli.format {
        OutputFormat::Json => output::print_json(&verdict),
        OutputFormat::Table => match &verdict.message {
            None => output::print_success("Accept"),
            Some(message) => println!("Reject: {message}"),
        },
    }

    Ok(())
}

/// Run the checker for the cart and shopper described by `args`.
async fn evaluate(args: &EvaluateArgs, config: &AppConfig) -> anyhow::Result<Verdict> {
    let history = open_history(args, config).await?;
    let checker = TrialEligibilityChecker::new(Arc::new(config.trial_promo.clone()), history);

    let cart = CartSnapshot::from_product_ids(args.pid.iter().copied().map(ProductId::new));
    let ctx = CheckoutContext {
        account_id: args.client_id.map(ClientId::new),
        email: args.email.clone(),
        promo_code: args.promo.clone(),
    };

    let decision = match checker.evaluate(&cart, &ctx).await {
        Ok(decision) => decision,
        Err(e) => {
            let outcome = match config.trial_promo.failure_policy {
                FailurePolicy::Closed => "checkout would be blocked",
                FailurePolicy::Open => "checkout would be allowed",
            };
            output::print_warning(&format!("History lookup failed; {outcome}"));
            return Err(e).context("Eligibility could not be determined");
        }
    };

    Ok(Verdict {
        result: decision,
        message: match decision {
            EligibilityResult::Accept => None,
            EligibilityResult::Reject(reason) => Some(checker.message_for(reason).to_string()),
        },
    })
}

async fn open_history(
    args: &EvaluateArgs,
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn HostingHistory>> {
    if let Some(path) = &args.history {
        debug!(path = %path.display(), "Using hosting history fixture");
        let store = MemoryHostingHistory::from_json_file(path)
            .await
            .with_context(|| format!("Failed to read history fixture '{}'", path.display()))?;
        return Ok(Arc::new(store));
    }

    debug!(table = %config.database.hosting_table, "Using hosting platform database");
    let pool = DatabasePool::connect(&config.database).await?;
    let repository = HostingRepository::new(pool.into_pool(), &config.database.hosting_table)?;
    Ok(Arc::new(repository))
}
