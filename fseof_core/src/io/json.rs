//! Module providing JSON IO for metabolic Models
//!
//! Reads the COBRA JSON interchange format. Fields this analysis does not use
//! (gene lists, structured annotations beyond strings) are tolerated and
//! ignored or flattened to strings.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    objective_coefficient: Option<f64>,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        /* Notes and annotations are unstructured in practice, they are kept
        as JSON strings rather than unpacked further */
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(|v| v.to_string()),
        }
    }
}

impl Model {
    /// Read a model from a COBRA JSON file
    ///
    /// A reaction's `objective_coefficient` populates the model objective, so
    /// a freshly loaded model optimizes whatever the file declares (normally
    /// the biomass reaction).
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_model = match serde_json::from_str::<JsonModel>(&model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut reactions: IndexMap<String, Reaction> = IndexMap::new();
        let mut metabolites: IndexMap<String, Metabolite> = IndexMap::new();
        let mut objective: IndexMap<String, f64> = IndexMap::new();
        json_model.metabolites.into_iter().for_each(|m| {
            metabolites.insert(m.id.clone(), Metabolite::from(m));
        });
        /* Iterate through the reactions, collecting objective coefficients
        along the way */
        for rxn in json_model.reactions {
            let gene_reaction_rule = if rxn.gene_reaction_rule.is_empty() {
                None
            } else {
                Some(rxn.gene_reaction_rule)
            };
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .gene_reaction_rule(gene_reaction_rule)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(|v| v.to_string()))
                .build()?;
            reactions.insert(rxn.id.clone(), new_reaction);
            if let Some(coef) = rxn.objective_coefficient {
                if coef != 0.0 {
                    objective.insert(rxn.id, coef);
                }
            }
        }
        Ok(Model {
            reactions,
            metabolites,
            objective,
            id: json_model.id,
            compartments: json_model.compartments,
            version: json_model.version,
        })
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
}

// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;

    const MODEL_DATA: &str = r#"{
"id":"toy_model",
"version":"1",
"compartments":{"c":"cytosol","e":"extracellular space"},
"genes":[{"id":"b0001","name":"geneA"}],
"metabolites":[
{"id":"glc__D_e","name":"D-Glucose","compartment":"e","charge":0,"formula":"C6H12O6"},
{"id":"g6p_c","name":"Glucose-6-phosphate","compartment":"c","charge":-2}
],
"reactions":[
{
"id":"HEX1",
"name":"Hexokinase",
"metabolites":{"glc__D_e":-1.0,"g6p_c":1.0},
"lower_bound":0.0,
"upper_bound":1000.0,
"gene_reaction_rule":"b0001",
"subsystem":"Glycolysis/Gluconeogenesis"
},
{
"id":"BIOMASS",
"metabolites":{"g6p_c":-1.0},
"lower_bound":0.0,
"upper_bound":1000.0,
"objective_coefficient":1.0
}
]
}"#;

    #[test]
    fn json_metabolite() {
        let data = r#"{
"id":"glc__D_e",
"name":"D-Glucose",
"compartment":"e",
"charge":0,
"formula":"C6H12O6",
"notes":{"original_bigg_ids":["glc_D_e"]},
"annotation":{"bigg.metabolite":["glc__D"]}
}"#;
        let met: JsonMetabolite = serde_json::from_str(data).unwrap();
        assert_eq!(met.id, "glc__D_e");
        assert_eq!(met.name.unwrap(), "D-Glucose");
        assert_eq!(met.compartment.unwrap(), "e");
        assert_eq!(met.charge.unwrap(), 0);
        assert_eq!(met.formula.unwrap(), "C6H12O6");
    }

    #[test]
    fn json_reaction() {
        let data = r#"{
"id":"PFK",
"name":"Phosphofructokinase",
"metabolites":{"adp_c":1.0,"atp_c":-1.0,"f6p_c":-1.0,"fdp_c":1.0,"h_c":1.0},
"lower_bound":0.0,
"upper_bound":1000.0,
"gene_reaction_rule":"b3916 or b1723",
"subsystem":"Glycolysis/Gluconeogenesis"
}"#;
        let reaction: JsonReaction = serde_json::from_str(data).unwrap();
        assert_eq!(reaction.id, "PFK");
        assert_eq!(reaction.name.unwrap(), "Phosphofructokinase");
        assert!((reaction.metabolites["atp_c"] + 1.0).abs() < 1e-25);
        assert!((reaction.lower_bound - 0.0).abs() < 1e-25);
        assert!((reaction.upper_bound - 1000.0).abs() < 1e-25);
        assert_eq!(reaction.gene_reaction_rule, "b3916 or b1723");
        assert_eq!(reaction.subsystem.unwrap(), "Glycolysis/Gluconeogenesis");
    }

    #[test]
    fn json_model_conversion() {
        let json_model: JsonModel = serde_json::from_str(MODEL_DATA).unwrap();
        let model = Model::from_json(json_model).unwrap();

        assert_eq!(model.id.clone().unwrap(), "toy_model");
        assert_eq!(model.version.clone().unwrap(), "1");
        let compartments = model.compartments.clone().unwrap();
        assert_eq!(compartments["c"], "cytosol");
        assert_eq!(compartments["e"], "extracellular space");

        let (_, met) = model.metabolites.first().unwrap();
        assert_eq!(met.id, "glc__D_e");
        assert_eq!(met.name.clone().unwrap(), "D-Glucose");
        assert_eq!(met.compartment.clone().unwrap(), "e");

        let hex1 = model.get_reaction("HEX1").unwrap();
        assert_eq!(hex1.name.clone().unwrap(), "Hexokinase");
        assert!((hex1.metabolites["glc__D_e"] + 1.0).abs() < 1e-25);
        assert_eq!(hex1.gene_reaction_rule.clone().unwrap(), "b0001");
        assert!(!hex1.reversible());

        // Objective comes from the objective_coefficient fields
        assert_eq!(model.objective.len(), 1);
        assert!((model.objective["BIOMASS"] - 1.0).abs() < 1e-25);
    }

    #[test]
    fn read_json_missing_file() {
        match Model::read_json("/nonexistent/model.json") {
            Err(JsonError::UnableToRead(_)) => {}
            _ => panic!("Missing file not reported as a read error"),
        }
    }

    #[test]
    fn read_json_malformed_file() {
        let path = std::env::temp_dir().join("fseof_malformed_model.json");
        fs::write(&path, "{not valid json").unwrap();
        match Model::read_json(&path) {
            Err(JsonError::UnableToParse(_)) => {}
            _ => panic!("Malformed file not reported as a parse error"),
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn read_json_round_trip_through_disk() {
        let path = std::env::temp_dir().join("fseof_toy_model.json");
        fs::write(&path, MODEL_DATA).unwrap();
        let model = Model::read_json(&path).unwrap();
        assert_eq!(model.reactions.len(), 2);
        assert_eq!(model.metabolites.len(), 2);
        fs::remove_file(&path).ok();
    }
}
