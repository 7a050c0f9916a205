//! Provides the flux problem, the linear programming oracle behind the flux analysis
//!
//! The [`FluxProblem`] snapshots a model's structure (one variable per reaction
//! bounded by its original flux bounds, one mass balance equality per metabolite)
//! and layers an owned, append-only list of extra [`FluxConstraint`]s on top.
//! Every query builds a fresh LP and hands it to the `microlp` simplex solver,
//! so the original reaction bounds are never overwritten.

use indexmap::IndexMap;
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use thiserror::Error;

use crate::metabolic_model::model::Model;
use crate::optimize::constraint::FluxConstraint;

/// Bounds snapshot for a single reaction column of the problem
#[derive(Debug, Clone)]
struct ReactionColumn {
    id: String,
    lower_bound: f64,
    upper_bound: f64,
}

/// A steady state flux optimization problem over a metabolic model
#[derive(Debug, Clone)]
pub struct FluxProblem {
    /// One column per reaction, in model order
    columns: Vec<ReactionColumn>,
    /// Map of reaction id to column index
    index: IndexMap<String, usize>,
    /// Mass balance rows, one per metabolite, as (column, coefficient) terms
    mass_balance: Vec<Vec<(usize, f64)>>,
    /// Extra constraints layered on top of the reaction bounds, append-only
    constraints: Vec<FluxConstraint>,
}

impl FluxProblem {
    /// Build a flux problem from a model's reactions and stoichiometry
    pub fn from_model(model: &Model) -> Self {
        let mut columns = Vec::with_capacity(model.reactions.len());
        let mut index = IndexMap::with_capacity(model.reactions.len());
        let mut rows: IndexMap<&str, Vec<(usize, f64)>> =
            IndexMap::with_capacity(model.metabolites.len());
        for (column, (id, reaction)) in model.reactions.iter().enumerate() {
            columns.push(ReactionColumn {
                id: id.clone(),
                lower_bound: reaction.lower_bound,
                upper_bound: reaction.upper_bound,
            });
            index.insert(id.clone(), column);
            for (met_id, coefficient) in &reaction.metabolites {
                rows.entry(met_id.as_str())
                    .or_default()
                    .push((column, *coefficient));
            }
        }
        FluxProblem {
            columns,
            index,
            mass_balance: rows.into_values().collect(),
            constraints: Vec::new(),
        }
    }

    /// Append a constraint to the active constraint set
    ///
    /// Constraints accumulate for the lifetime of the problem, there is no way
    /// to remove or relax one
    ///
    /// # Errors
    /// Returns [`SolverError::UnknownReaction`] if the constraint references a
    /// reaction that is not part of the problem
    pub fn add_constraint(&mut self, constraint: FluxConstraint) -> Result<(), SolverError> {
        for (reaction_id, _) in &constraint.terms {
            if !self.index.contains_key(reaction_id) {
                return Err(SolverError::UnknownReaction(reaction_id.clone()));
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Number of extra constraints currently active
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Maximize a linear objective over reaction fluxes
    ///
    /// # Parameters
    /// - `objective`: Map of reaction id to objective coefficient
    ///
    /// # Errors
    /// [`SolverError::Infeasible`] and [`SolverError::Unbounded`] are reported
    /// as distinct statuses, no flux values are available in either case
    pub fn optimize(
        &self,
        objective: &IndexMap<String, f64>,
    ) -> Result<FluxSolution, SolverError> {
        for reaction_id in objective.keys() {
            if !self.index.contains_key(reaction_id) {
                return Err(SolverError::UnknownReaction(reaction_id.clone()));
            }
        }
        let (problem, variables) = self.build(OptimizationDirection::Maximize, |column| {
            objective.get(&column.id).copied().unwrap_or(0.0)
        });
        let solution = Self::solve(problem)?;
        let mut fluxes = IndexMap::with_capacity(self.columns.len());
        for (column, variable) in self.columns.iter().zip(&variables) {
            fluxes.insert(column.id.clone(), *solution.var_value(*variable));
        }
        Ok(FluxSolution {
            objective_value: solution.objective(),
            fluxes,
        })
    }

    /// Compute, for every reaction, the minimum and maximum flux consistent
    /// with the bounds, mass balance, and accumulated constraints
    pub fn variability(&self) -> Result<IndexMap<String, FluxRange>, SolverError> {
        let mut ranges = IndexMap::with_capacity(self.columns.len());
        for target in 0..self.columns.len() {
            let minimum = self.optimize_single(target, OptimizationDirection::Minimize)?;
            let maximum = self.optimize_single(target, OptimizationDirection::Maximize)?;
            ranges.insert(
                self.columns[target].id.clone(),
                FluxRange { minimum, maximum },
            );
        }
        Ok(ranges)
    }

    /// Optimize the flux through a single reaction column
    fn optimize_single(
        &self,
        target: usize,
        direction: OptimizationDirection,
    ) -> Result<f64, SolverError> {
        let (problem, _) = self.build(direction, |column| {
            if column.id == self.columns[target].id {
                1.0
            } else {
                0.0
            }
        });
        Ok(Self::solve(problem)?.objective())
    }

    /// Assemble a fresh LP from the snapshot and the active constraint set
    fn build<F>(
        &self,
        direction: OptimizationDirection,
        objective_coefficient: F,
    ) -> (Problem, Vec<Variable>)
    where
        F: Fn(&ReactionColumn) -> f64,
    {
        let mut problem = Problem::new(direction);
        let variables: Vec<Variable> = self
            .columns
            .iter()
            .map(|column| {
                problem.add_var(
                    objective_coefficient(column),
                    (column.lower_bound, column.upper_bound),
                )
            })
            .collect();
        // Steady state: production and consumption balance for every metabolite
        for row in &self.mass_balance {
            let mut expression = LinearExpr::empty();
            for (column, coefficient) in row {
                expression.add(variables[*column], *coefficient);
            }
            problem.add_constraint(expression, ComparisonOp::Eq, 0.0);
        }
        for constraint in &self.constraints {
            let mut expression = LinearExpr::empty();
            for (reaction_id, coefficient) in &constraint.terms {
                expression.add(variables[self.index[reaction_id.as_str()]], *coefficient);
            }
            problem.add_constraint(expression, ComparisonOp::Ge, constraint.lower_bound);
        }
        (problem, variables)
    }

    /// Run the solver, mapping its failure statuses onto [`SolverError`]
    fn solve(problem: Problem) -> Result<microlp::Solution, SolverError> {
        match problem.solve() {
            Ok(solution) => Ok(solution),
            Err(microlp::Error::Infeasible) => Err(SolverError::Infeasible),
            Err(microlp::Error::Unbounded) => Err(SolverError::Unbounded),
            Err(other) => Err(SolverError::Backend(other.to_string())),
        }
    }
}

/// Solution of a successful flux optimization
#[derive(Debug, Clone)]
pub struct FluxSolution {
    /// Optimized value of the objective
    pub objective_value: f64,
    /// Flux through every reaction at the optimum, keyed by reaction id
    pub fluxes: IndexMap<String, f64>,
}

/// Flux range of a single reaction from a variability computation
#[derive(Debug, Clone, Copy)]
pub struct FluxRange {
    /// Minimum flux consistent with the current constraints
    pub minimum: f64,
    /// Maximum flux consistent with the current constraints
    pub maximum: f64,
}

impl FluxRange {
    /// Center of the flux range
    pub fn midpoint(&self) -> f64 {
        (self.maximum + self.minimum) / 2.0
    }

    /// Width of the flux range, the reaction's flux capacity
    pub fn width(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Errors reported by the flux problem
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// The constraint set admits no flux distribution
    #[error("The problem is infeasible, the constraints admit no flux distribution")]
    Infeasible,
    /// The objective can grow without bound
    #[error("The problem is unbounded, the objective can grow without bound")]
    Unbounded,
    /// A query referenced a reaction id that is not part of the problem
    #[error("Reaction {0} is not part of the flux problem")]
    UnknownReaction(String),
    /// The backing solver failed for a reason other than problem status
    #[error("The LP solver failed: {0}")]
    Backend(String),
}
