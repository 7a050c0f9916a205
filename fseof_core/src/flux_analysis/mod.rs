//! Module providing the FSEOF flux scanning analysis

pub mod classify;
pub mod fseof;
pub mod regression;
pub mod strategy;
pub mod targets;
