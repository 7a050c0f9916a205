//! Provides struct for representing a constraint added on top of a flux problem
use std::fmt::{Display, Formatter};

/// A lower bounded linear constraint over reaction fluxes
///
/// Constraints are owned values held by the [`FluxProblem`](crate::optimize::problem::FluxProblem)
/// in an append-only list, they supplement the original reaction bounds and are
/// never merged into them
#[derive(Debug, Clone)]
pub struct FluxConstraint {
    /// Used to identify the constraint, e.g. in infeasibility reports
    pub id: String,
    /// Linear terms which are added together, as (reaction id, coefficient) pairs
    pub terms: Vec<(String, f64)>,
    /// The lowest value the sum of the terms can take
    pub lower_bound: f64,
}

impl FluxConstraint {
    /// Create a new constraint over a weighted sum of reaction fluxes
    pub fn new(id: &str, terms: Vec<(String, f64)>, lower_bound: f64) -> Self {
        FluxConstraint {
            id: id.to_string(),
            terms,
            lower_bound,
        }
    }

    /// Create a constraint enforcing a minimum flux through a single reaction
    ///
    /// # Examples
    /// ```rust
    /// use fseof_core::optimize::constraint::FluxConstraint;
    /// // Require the product reaction to carry at least 2.5 flux units
    /// let constraint = FluxConstraint::lower_bounded("enforced_0", "EX_product", 2.5);
    /// assert_eq!(format!("{}", constraint), "2.5 <= 1*EX_product");
    /// ```
    pub fn lower_bounded(id: &str, reaction_id: &str, lower_bound: f64) -> Self {
        FluxConstraint {
            id: id.to_string(),
            terms: vec![(reaction_id.to_string(), 1.0)],
            lower_bound,
        }
    }

    /// Convert the terms into a String representation
    fn terms_to_string(&self) -> String {
        self.terms
            .iter()
            .map(|(reaction, coefficient)| format!("{}*{}", coefficient, reaction))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl Display for FluxConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <= {}", self.lower_bound, self.terms_to_string())
    }
}
