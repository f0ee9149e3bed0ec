//! Command implementations

pub mod drone;
pub mod load;
