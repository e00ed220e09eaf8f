extern crate bit_set;
extern crate fnv;
extern crate integeriser;
extern crate log;
extern crate search;
extern crate serde;
extern crate thiserror;

pub mod acceptance;
pub mod automaton;
pub mod config;
pub mod degeneralization;
pub mod emptiness;
pub mod scc;

pub use crate::acceptance::{AcceptanceError, OmegaAcceptance};
pub use crate::automaton::{Automaton, AutomatonBuilder, AutomatonError, Edge, ValuationSet};
pub use crate::config::DegeneralizationConfig;
pub use crate::degeneralization::DegeneralizationError;

#[cfg(test)]
mod tests;
