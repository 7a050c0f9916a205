//! Flux observation strategies for the scan loop
//!
//! The scan's outer loop is identical in both modes, only the oracle query and
//! what gets recorded differ. The strategy is picked once at scan start.

use indexmap::IndexMap;

use crate::flux_analysis::targets::ScanTrace;
use crate::optimize::problem::{FluxProblem, SolverError};

/// A way of observing the flux distribution at one enforced flux level
pub trait ScanStrategy {
    /// Query the oracle under its current constraint state and append one
    /// column of observations to the trace
    fn observe(&mut self, oracle: &FluxProblem, trace: &mut ScanTrace)
        -> Result<(), SolverError>;
}

/// Point mode: a single optimum per step with the standing growth objective
pub struct FbaStrategy {
    objective: IndexMap<String, f64>,
}

impl FbaStrategy {
    pub fn new(objective: IndexMap<String, f64>) -> Self {
        FbaStrategy { objective }
    }
}

impl ScanStrategy for FbaStrategy {
    fn observe(
        &mut self,
        oracle: &FluxProblem,
        trace: &mut ScanTrace,
    ) -> Result<(), SolverError> {
        let solution = oracle.optimize(&self.objective)?;
        for (reaction_id, flux) in &solution.fluxes {
            trace.push_flux(reaction_id, *flux);
        }
        Ok(())
    }
}

/// Range mode: a flux variability computation per step, recording the range
/// midpoint as the flux observation and the range width as the capacity
pub struct FvaStrategy;

impl ScanStrategy for FvaStrategy {
    fn observe(
        &mut self,
        oracle: &FluxProblem,
        trace: &mut ScanTrace,
    ) -> Result<(), SolverError> {
        let ranges = oracle.variability()?;
        for (reaction_id, range) in &ranges {
            trace.push_flux(reaction_id, range.midpoint());
            trace.push_capacity(reaction_id, range.width());
        }
        Ok(())
    }
}
