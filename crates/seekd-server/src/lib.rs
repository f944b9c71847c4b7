//! Seekd server - configuration loading, cluster bootstrap, and the
//! operator-facing command surface.

pub mod bootstrap;
pub mod cli;
pub mod model;
pub mod startup;
