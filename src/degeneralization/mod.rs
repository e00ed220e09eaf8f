//! Translations of generalized acceptance conditions into their plain
//! counterparts.

use thiserror::Error;

use crate::automaton::AutomatonError;

pub mod buchi;
pub mod rabin;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DegeneralizationError {
    #[error("cannot degeneralize {0} acceptance")]
    UnsupportedAcceptance(String),
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}
