//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;
use thiserror::Error;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            objective: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use fseof_core::metabolic_model::model::Model;
    /// use fseof_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Get a reaction by id
    pub fn get_reaction(&self, reaction_id: &str) -> Option<&Reaction> {
        self.reactions.get(reaction_id)
    }

    /// Replace the model objective with a single reaction objective
    ///
    /// # Errors
    /// Returns [`ModelError::ReactionNotFound`] if the reaction is not in the model
    pub fn set_objective(&mut self, reaction_id: &str) -> Result<(), ModelError> {
        if !self.reactions.contains_key(reaction_id) {
            return Err(ModelError::ReactionNotFound(reaction_id.to_string()));
        }
        self.objective.clear();
        self.objective.insert(reaction_id.to_string(), 1.0);
        Ok(())
    }
}

#[derive(Clone, Debug, Error)]
pub enum ModelError {
    #[error("Reaction {0} is not present in the model")]
    ReactionNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        for id in ["biomass", "product"] {
            model.add_reaction(
                ReactionBuilder::default()
                    .id(id.to_string())
                    .build()
                    .unwrap(),
            );
        }
        model
    }

    #[test]
    fn set_objective() {
        let mut model = setup_model();
        model.set_objective("biomass").unwrap();
        assert_eq!(model.objective.len(), 1);
        assert!((model.objective["biomass"] - 1.0).abs() < 1e-12);

        // Switching replaces, never accumulates
        model.set_objective("product").unwrap();
        assert_eq!(model.objective.len(), 1);
        assert!(model.objective.get("biomass").is_none());
    }

    #[test]
    fn set_objective_unknown_reaction() {
        let mut model = setup_model();
        match model.set_objective("missing") {
            Err(ModelError::ReactionNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Unknown reaction not caught"),
        }
    }
}
