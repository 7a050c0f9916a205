//! Module providing the linear programming oracle used by the flux analysis

pub mod constraint;
pub mod problem;
