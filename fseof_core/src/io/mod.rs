//! Module for reading Models and writing analysis results
pub mod json;
pub mod table;
