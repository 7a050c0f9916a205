//! Core implementation of FSEOF (Flux Scanning based on Enforced Objective Flux),
//! an algorithm for finding gene over-expression targets that increase flux
//! through a chosen reaction of a constraint based metabolic model.

pub mod configuration;
pub mod flux_analysis;
pub mod io;
pub mod metabolic_model;
pub mod optimize;
