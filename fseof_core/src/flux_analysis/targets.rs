//! Scan trace accumulation and the amplification target output record

use indexmap::IndexMap;

/// Flux observations accumulated across scan iterations
///
/// The enforced flux sequence is the shared independent variable of every
/// per reaction regression. Each reaction row gains one value per iteration,
/// so all rows have the same length as `enforced` once the scan completes.
#[derive(Debug, Clone, Default)]
pub struct ScanTrace {
    /// Enforced target flux at each iteration, strictly increasing unless the
    /// product flux range is degenerate
    pub enforced: Vec<f64>,
    /// Per reaction flux (point mode) or flux midpoint (range mode) series
    pub flux: IndexMap<String, Vec<f64>>,
    /// Per reaction flux range width series, only filled in range mode
    pub capacity: IndexMap<String, Vec<f64>>,
}

impl ScanTrace {
    pub fn new() -> Self {
        ScanTrace::default()
    }

    /// Record one flux observation for a reaction
    pub fn push_flux(&mut self, reaction_id: &str, value: f64) {
        self.flux
            .entry(reaction_id.to_string())
            .or_default()
            .push(value);
    }

    /// Record one flux capacity observation for a reaction
    pub fn push_capacity(&mut self, reaction_id: &str, value: f64) {
        self.capacity
            .entry(reaction_id.to_string())
            .or_default()
            .push(value);
    }

    /// Number of completed scan iterations
    pub fn len(&self) -> usize {
        self.enforced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enforced.is_empty()
    }
}

/// One candidate over-expression target, the per reaction output record
///
/// Created by the trend extraction step, enriched with classification and
/// reaction annotation, then immutable once the collection is ranked
#[derive(Debug, Clone)]
pub struct AmplificationTarget {
    /// Reaction id
    pub reaction: String,
    /// Slope of the reaction's flux against the enforced target flux,
    /// `None` when the fit failed for this reaction
    pub q_slope: Option<f64>,
    /// Slope of the reaction's flux capacity against the enforced target
    /// flux, only present in range mode
    pub l_sol: Option<f64>,
    /// Correlation label for `q_slope` (range mode only)
    pub q_slope_classifier: Option<i8>,
    /// Correlation label for `l_sol` (range mode only)
    pub l_sol_classifier: Option<i8>,
    /// Ordinal reaction class 1-9 (range mode only)
    pub reaction_class: Option<u8>,
    /// Human readable reaction formula
    pub reaction_string: Option<String>,
    /// Compartments touched by the reaction
    pub compartments: Vec<String>,
}

impl AmplificationTarget {
    pub fn new(reaction: String, q_slope: Option<f64>, l_sol: Option<f64>) -> Self {
        AmplificationTarget {
            reaction,
            q_slope,
            l_sol,
            q_slope_classifier: None,
            l_sol_classifier: None,
            reaction_class: None,
            reaction_string: None,
            compartments: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_class(reaction: &str, class: u8) -> Self {
        let mut target = AmplificationTarget::new(reaction.to_string(), None, None);
        target.reaction_class = Some(class);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_rows_track_iterations() {
        let mut trace = ScanTrace::new();
        assert!(trace.is_empty());
        for step in 0..3 {
            trace.enforced.push(step as f64);
            trace.push_flux("r1", step as f64 * 2.0);
            trace.push_capacity("r1", 1.0);
        }
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.flux["r1"].len(), trace.enforced.len());
        assert_eq!(trace.capacity["r1"].len(), trace.enforced.len());
    }
}
