//! This module provides a struct for representing reactions
use crate::configuration::CONFIGURATION;
use crate::metabolic_model::metabolite::Metabolite;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Maps metabolite id to stoichiometric coefficient, negative coefficients
    /// are consumed by the reaction, positive coefficients are produced
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Gene reaction rule carried through from the model file
    ///
    /// ### Note
    /// The rule is kept as an annotation string only, it is never evaluated
    /// by the flux analysis layer
    #[builder(default = "None")]
    pub gene_reaction_rule: Option<String>,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Reaction {
    /// Whether the reaction can carry flux in the reverse direction
    pub fn reversible(&self) -> bool {
        self.lower_bound < 0f64
    }

    /// Build a human readable string describing the reaction, e.g.
    /// `atp_c + f6p_c --> adp_c + fdp_c + h_c`
    ///
    /// # Parameters
    /// - `metabolites`: The model's metabolite map, used to resolve names
    /// - `use_metabolite_names`: Render metabolite names instead of ids where available
    pub fn build_reaction_string(
        &self,
        metabolites: &IndexMap<String, Metabolite>,
        use_metabolite_names: bool,
    ) -> String {
        let tolerance = CONFIGURATION.read().unwrap().tolerance;
        let mut reactants: Vec<String> = Vec::new();
        let mut products: Vec<String> = Vec::new();
        for (met_id, coefficient) in &self.metabolites {
            let name = if use_metabolite_names {
                metabolites
                    .get(met_id)
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_else(|| met_id.clone())
            } else {
                met_id.clone()
            };
            let magnitude = coefficient.abs();
            let term = if (magnitude - 1.0).abs() < tolerance {
                name
            } else {
                format!("{} {}", magnitude, name)
            };
            if *coefficient < 0.0 {
                reactants.push(term);
            } else {
                products.push(term);
            }
        }
        let arrow = if self.reversible() {
            "<=>"
        } else if self.upper_bound <= 0f64 {
            "<--"
        } else {
            "-->"
        };
        format!("{} {} {}", reactants.join(" + "), arrow, products.join(" + "))
            .trim()
            .to_string()
    }

    /// Collect the compartments touched by the reaction's metabolites
    ///
    /// Returns the sorted, deduplicated compartment short names
    pub fn compartments(&self, metabolites: &IndexMap<String, Metabolite>) -> Vec<String> {
        let mut compartments: Vec<String> = self
            .metabolites
            .keys()
            .filter_map(|met_id| metabolites.get(met_id))
            .filter_map(|m| m.compartment.clone())
            .collect();
        compartments.sort();
        compartments.dedup();
        compartments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;

    fn setup_metabolites() -> IndexMap<String, Metabolite> {
        let mut metabolites = IndexMap::new();
        for (id, name, compartment) in [
            ("glc__D_e", Some("D-Glucose"), "e"),
            ("g6p_c", Some("Glucose-6-phosphate"), "c"),
            ("atp_c", None, "c"),
        ] {
            metabolites.insert(
                id.to_string(),
                MetaboliteBuilder::default()
                    .id(id.to_string())
                    .name(name.map(|n| n.to_string()))
                    .compartment(Some(compartment.to_string()))
                    .build()
                    .unwrap(),
            );
        }
        metabolites
    }

    #[test]
    fn reaction_string_irreversible() {
        let metabolites = setup_metabolites();
        let reaction = ReactionBuilder::default()
            .id("HEX1".to_string())
            .metabolites(IndexMap::from([
                ("glc__D_e".to_string(), -1.0),
                ("atp_c".to_string(), -2.0),
                ("g6p_c".to_string(), 1.0),
            ]))
            .lower_bound(0.0)
            .upper_bound(1000.0)
            .build()
            .unwrap();
        assert_eq!(
            reaction.build_reaction_string(&metabolites, false),
            "glc__D_e + 2 atp_c --> g6p_c"
        );
        assert_eq!(
            reaction.build_reaction_string(&metabolites, true),
            "D-Glucose + 2 atp_c --> Glucose-6-phosphate"
        );
    }

    #[test]
    fn reaction_string_reversible() {
        let metabolites = setup_metabolites();
        let reaction = ReactionBuilder::default()
            .id("PGI".to_string())
            .metabolites(IndexMap::from([
                ("glc__D_e".to_string(), -1.0),
                ("g6p_c".to_string(), 1.0),
            ]))
            .build()
            .unwrap();
        // Default bounds come from the configuration, which is reversible
        assert!(reaction.reversible());
        assert_eq!(
            reaction.build_reaction_string(&metabolites, false),
            "glc__D_e <=> g6p_c"
        );
    }

    #[test]
    fn compartments() {
        let metabolites = setup_metabolites();
        let reaction = ReactionBuilder::default()
            .id("HEX1".to_string())
            .metabolites(IndexMap::from([
                ("g6p_c".to_string(), 1.0),
                ("glc__D_e".to_string(), -1.0),
            ]))
            .build()
            .unwrap();
        assert_eq!(reaction.compartments(&metabolites), vec!["c", "e"]);
    }
}
