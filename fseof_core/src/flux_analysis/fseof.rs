//! Flux Scanning based on Enforced Objective Flux
//!
//! Progressively raises the minimum allowed flux through a target reaction,
//! re-solves the model at every level, and reports the reactions whose flux
//! trends upward in lock-step with the enforced flux as candidate
//! amplification targets.

use thiserror::Error;
use tracing::info;

use crate::flux_analysis::classify::{correlation_label, rank_targets, reaction_class};
use crate::flux_analysis::regression;
use crate::flux_analysis::strategy::{FbaStrategy, FvaStrategy, ScanStrategy};
use crate::flux_analysis::targets::{AmplificationTarget, ScanTrace};
use crate::metabolic_model::model::{Model, ModelError};
use crate::optimize::constraint::FluxConstraint;
use crate::optimize::problem::{FluxProblem, SolverError};

/// Options controlling a scan
#[derive(Debug, Clone)]
pub struct FseofOptions {
    /// Number of interpolation steps, the scan performs `steps - 1` iterations
    pub steps: usize,
    /// Observe flux ranges (variability) instead of single optima
    pub use_fva: bool,
    /// Pin the growth rate to a fraction of its optimum for the whole scan
    pub constrain_biomass: bool,
    /// Fraction of optimal growth enforced when `constrain_biomass` is set
    pub max_flux_cutoff: f64,
}

impl Default for FseofOptions {
    fn default() -> Self {
        FseofOptions {
            steps: 30,
            use_fva: false,
            constrain_biomass: false,
            max_flux_cutoff: 0.95,
        }
    }
}

/// The FSEOF analysis over a loaded model
///
/// Construction fixes the two scalar reference points every enforced bound is
/// interpolated between: the target reaction's flux at the growth optimum and
/// its own theoretical maximum.
#[derive(Debug)]
pub struct Fseof {
    model: Model,
    biomass_id: String,
    product_id: String,
    /// Objective value when optimizing growth
    pub optimal_growth: f64,
    /// Target reaction flux in the growth optimum solution
    pub initial_product_flux: f64,
    /// Objective value when optimizing the target reaction directly
    pub max_product_flux: f64,
}

impl Fseof {
    /// Compute the reference fluxes for a model
    ///
    /// Optimizes growth once to fix `optimal_growth` and `initial_product_flux`,
    /// then optimizes the target reaction to fix `max_product_flux`. The model
    /// objective is switched to the target temporarily and always left set to
    /// the biomass reaction afterwards.
    ///
    /// # Errors
    /// Unknown reaction ids and reference solves that fail are fatal, the scan
    /// cannot run without valid reference points.
    pub fn new(mut model: Model, biomass_id: &str, product_id: &str) -> Result<Self, FseofError> {
        if !model.reactions.contains_key(product_id) {
            return Err(FseofError::UnknownReaction(product_id.to_string()));
        }
        model.set_objective(biomass_id)?;
        let oracle = FluxProblem::from_model(&model);

        let growth_solution = oracle
            .optimize(&model.objective)
            .map_err(FseofError::Reference)?;
        let optimal_growth = growth_solution.objective_value;
        let initial_product_flux = growth_solution.fluxes[product_id];

        model.set_objective(product_id)?;
        let product_solution = oracle
            .optimize(&model.objective)
            .map_err(FseofError::Reference)?;
        let max_product_flux = product_solution.objective_value;
        model.set_objective(biomass_id)?;

        info!(
            optimal_growth,
            initial_product_flux, max_product_flux, "computed reference fluxes"
        );

        Ok(Fseof {
            model,
            biomass_id: biomass_id.to_string(),
            product_id: product_id.to_string(),
            optimal_growth,
            initial_product_flux,
            max_product_flux,
        })
    }

    /// Find over-expression targets for the target reaction
    ///
    /// Runs the enforcement scan, extracts per reaction flux trends, and in
    /// range mode classifies them, returning the ranked target collection.
    pub fn find_targets(
        &self,
        options: &FseofOptions,
    ) -> Result<Vec<AmplificationTarget>, FseofError> {
        let mut oracle = FluxProblem::from_model(&self.model);
        let trace = self.run_scan(&mut oracle, options)?;
        let mut targets = self.extract_targets(&trace, options.use_fva);
        rank_targets(&mut targets, options.use_fva);
        Ok(targets)
    }

    /// The enforcement scan loop
    ///
    /// Each iteration appends one lower bound constraint on the target
    /// reaction's flux to the oracle and records one column of observations.
    /// Constraints accumulate across iterations, each step tightens the
    /// feasible region monotonically. The interpolation deliberately stops one
    /// step short of `max_product_flux`, enforcing the full theoretical
    /// maximum is frequently infeasible.
    fn run_scan(
        &self,
        oracle: &mut FluxProblem,
        options: &FseofOptions,
    ) -> Result<ScanTrace, FseofError> {
        if options.steps < 2 {
            return Err(FseofError::InvalidSteps(options.steps));
        }
        if !(options.max_flux_cutoff > 0.0 && options.max_flux_cutoff <= 1.0) {
            return Err(FseofError::InvalidCutoff(options.max_flux_cutoff));
        }

        if options.constrain_biomass {
            oracle.add_constraint(FluxConstraint::lower_bounded(
                "biomass_minimum",
                &self.biomass_id,
                options.max_flux_cutoff * self.optimal_growth,
            ))?;
        }

        let mut strategy: Box<dyn ScanStrategy> = if options.use_fva {
            Box::new(FvaStrategy)
        } else {
            Box::new(FbaStrategy::new(self.model.objective.clone()))
        };

        let total = options.steps - 1;
        let mut trace = ScanTrace::new();
        for i in 0..total {
            let enforced_flux = self.initial_product_flux
                + (i as f64 / options.steps as f64)
                    * (self.max_product_flux - self.initial_product_flux);
            oracle.add_constraint(FluxConstraint::lower_bounded(
                &format!("enforced_product_{}", i),
                &self.product_id,
                enforced_flux,
            ))?;
            trace.enforced.push(enforced_flux);
            info!(step = i + 1, total, enforced_flux, "scanning enforced flux level");
            strategy
                .observe(oracle, &mut trace)
                .map_err(|error| match error {
                    SolverError::Infeasible => FseofError::InfeasibleStep {
                        step: i + 1,
                        total,
                        enforced_flux,
                    },
                    other => FseofError::Solver(other),
                })?;
        }
        Ok(trace)
    }

    /// Fit one trend per reaction and assemble the annotated target records
    fn extract_targets(&self, trace: &ScanTrace, use_fva: bool) -> Vec<AmplificationTarget> {
        let mut targets = Vec::with_capacity(trace.flux.len());
        for (reaction_id, series) in &trace.flux {
            let q_slope = regression::slope(&trace.enforced, series);
            let l_sol = if use_fva {
                trace
                    .capacity
                    .get(reaction_id)
                    .and_then(|capacity| regression::slope(&trace.enforced, capacity))
            } else {
                None
            };
            let mut target = AmplificationTarget::new(reaction_id.clone(), q_slope, l_sol);
            if use_fva {
                // A failed fit carries no trend information, label it neutral
                let q_label = q_slope.map(correlation_label).unwrap_or(0);
                let l_label = l_sol.map(correlation_label).unwrap_or(0);
                target.q_slope_classifier = Some(q_label);
                target.l_sol_classifier = Some(l_label);
                target.reaction_class = Some(reaction_class(q_label, l_label));
            }
            if let Some(reaction) = self.model.get_reaction(reaction_id) {
                target.reaction_string =
                    Some(reaction.build_reaction_string(&self.model.metabolites, true));
                target.compartments = reaction.compartments(&self.model.metabolites);
            }
            targets.push(target);
        }
        targets
    }

    /// The model, with the biomass objective restored
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Id of the target reaction being scanned
    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

/// Errors reported by the FSEOF analysis
#[derive(Error, Debug)]
pub enum FseofError {
    #[error("Reaction {0} is not present in the model")]
    UnknownReaction(String),
    #[error("Computing reference fluxes failed: {0}")]
    Reference(#[source] SolverError),
    #[error("Scan infeasible at step {step} of {total} (enforced target flux {enforced_flux})")]
    InfeasibleStep {
        step: usize,
        total: usize,
        enforced_flux: f64,
    },
    #[error("Number of steps must be at least 2, got {0}")]
    InvalidSteps(usize),
    #[error("Biomass cutoff must be in (0, 1], got {0}")]
    InvalidCutoff(f64),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}
