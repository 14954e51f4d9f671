//! Admin annotation preview.

use clap::Args;

use plugin_trial_promo::AdminListAnnotator;

use super::Cli;
use crate::output;

/// Arguments for the annotate command
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Admin page name, e.g. `configproducts`
    #[arg(short, long)]
    pub page: String,
}

/// Print the fragment the annotator would inject for a page
pub async fn execute(args: &AnnotateArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let annotator = AdminListAnnotator::new(&config.trial_promo);

    match annotator.render(&args.page) {
        Some(fragment) => println!("{fragment}"),
        None => output::print_warning(&format!("No output for page '{}'", args.page)),
    }

    Ok(())
}
