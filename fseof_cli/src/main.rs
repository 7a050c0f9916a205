//! Command line interface for the FSEOF over-expression target scan

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fseof_core::flux_analysis::fseof::{Fseof, FseofOptions};
use fseof_core::io::table;
use fseof_core::metabolic_model::model::Model;

#[derive(Parser, Debug)]
#[command(
    name = "fseof",
    version,
    about = "Identify genetic targets for over-expression that increase the flux to a reaction of interest"
)]
struct Cli {
    /// Path to the metabolic model to scan (COBRA JSON)
    model: PathBuf,
    /// Id of the biomass (growth) reaction of the model
    biomass_id: String,
    /// Id of the reaction to optimize by genetic engineering; over-expression
    /// targets are identified for this reaction
    reaction_id: String,
    /// Number of steps for the scan; decrease this when flux variability is used
    #[arg(long, default_value_t = 30)]
    steps: usize,
    /// Observe flux variability ranges instead of single optima (significantly slower)
    #[arg(long)]
    use_fva: bool,
    /// Pin the growth rate to a fraction of its theoretic maximum during the
    /// scan; can improve accuracy but may make the scan infeasible
    #[arg(long)]
    constrain_biomass: bool,
    /// Fraction of optimal growth enforced when --constrain-biomass is set
    #[arg(long, default_value_t = 0.95)]
    biomass_cutoff: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let model = Model::read_json(&cli.model)?;
    info!(
        reactions = model.reactions.len(),
        metabolites = model.metabolites.len(),
        "loaded model"
    );
    let fseof = Fseof::new(model, &cli.biomass_id, &cli.reaction_id)?;
    let options = FseofOptions {
        steps: cli.steps,
        use_fva: cli.use_fva,
        constrain_biomass: cli.constrain_biomass,
        max_flux_cutoff: cli.biomass_cutoff,
    };
    let targets = fseof.find_targets(&options)?;
    let path = table::default_output_path(&cli.reaction_id);
    table::write_targets(&path, &targets, cli.use_fva)?;
    info!(
        path = %path.display(),
        targets = targets.len(),
        "wrote amplification targets"
    );
    Ok(())
}
