//! Acceptance conditions of omega-automata.
//!
//! All conditions are expressed over integer acceptance marks carried by
//! edges. `OmegaAcceptance` is the closed set of supported kinds; every
//! operation over "some acceptance" matches on it exhaustively.

use bit_set::BitSet;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

mod expression;
mod generalized_rabin;
mod parity;
mod rabin;

pub use self::expression::{AcceptanceExpression, Clause};
pub use self::generalized_rabin::{
    GeneralizedRabinAcceptance, GeneralizedRabinBuilder, GeneralizedRabinPair, PairId,
    PairPartition,
};
pub use self::parity::{ParityAcceptance, ParityKind};
pub use self::rabin::{RabinAcceptance, RabinAcceptanceBuilder, RabinPair};

use crate::automaton::Edge;

/// Malformed acceptance input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AcceptanceError {
    #[error("acceptance mark {index} is used more than once")]
    DuplicateIndex { index: usize },
    #[error("acceptance mark {index} is not used by any pair")]
    MissingIndex { index: usize },
    #[error("Inf position {position} is out of range for a pair with {count} Inf marks")]
    InfiniteIndexOutOfRange { position: usize, count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OmegaAcceptance {
    /// Every run is accepting.
    All,
    /// No run is accepting.
    None,
    /// `Inf(0)`
    Buchi,
    /// `Fin(0)`
    CoBuchi,
    /// `Inf(0) & … & Inf(sets - 1)`
    GeneralizedBuchi { sets: usize },
    Rabin(RabinAcceptance),
    GeneralizedRabin(GeneralizedRabinAcceptance),
    Parity(ParityAcceptance),
}

impl OmegaAcceptance {
    /// Number of acceptance marks used by the condition.
    pub fn acceptance_sets(&self) -> usize {
        match *self {
            OmegaAcceptance::All | OmegaAcceptance::None => 0,
            OmegaAcceptance::Buchi | OmegaAcceptance::CoBuchi => 1,
            OmegaAcceptance::GeneralizedBuchi { sets } => sets,
            OmegaAcceptance::Rabin(ref rabin) => rabin.acceptance_sets(),
            OmegaAcceptance::GeneralizedRabin(ref rabin) => rabin.acceptance_sets(),
            OmegaAcceptance::Parity(ref parity) => parity.colours,
        }
    }

    /// The name used by the automaton interchange format.
    pub fn name(&self) -> &'static str {
        match *self {
            OmegaAcceptance::All => "all",
            OmegaAcceptance::None => "none",
            OmegaAcceptance::Buchi => "Buchi",
            OmegaAcceptance::CoBuchi => "co-Buchi",
            OmegaAcceptance::GeneralizedBuchi { .. } => "generalized-Buchi",
            OmegaAcceptance::Rabin(_) => "Rabin",
            OmegaAcceptance::GeneralizedRabin(_) => "generalized-Rabin",
            OmegaAcceptance::Parity(_) => "parity",
        }
    }

    pub fn expression(&self) -> AcceptanceExpression {
        match *self {
            OmegaAcceptance::All => AcceptanceExpression::True,
            OmegaAcceptance::None => AcceptanceExpression::False,
            OmegaAcceptance::Buchi => AcceptanceExpression::Inf(0),
            OmegaAcceptance::CoBuchi => AcceptanceExpression::Fin(0),
            OmegaAcceptance::GeneralizedBuchi { sets } => {
                AcceptanceExpression::and((0..sets).map(AcceptanceExpression::Inf))
            }
            OmegaAcceptance::Rabin(ref rabin) => rabin.expression(),
            OmegaAcceptance::GeneralizedRabin(ref rabin) => rabin.expression(),
            OmegaAcceptance::Parity(ref parity) => parity.expression(),
        }
    }

    /// Decides acceptance of a run visiting exactly the marks in
    /// `infinitely_often` infinitely often.
    pub fn is_accepting(&self, infinitely_often: &BitSet) -> bool {
        self.expression().evaluate(infinitely_often)
    }

    pub fn is_well_formed_edge<S>(&self, edge: &Edge<S>) -> bool {
        edge.largest_colour()
            .map_or(true, |colour| colour < self.acceptance_sets())
    }

    /// Views the condition as generalized Rabin acceptance, if it has that
    /// shape. Marks keep their meaning; conditions without marks that accept
    /// everything become a single `Fin(0)` pair, which holds on every
    /// automaton whose edges carry no marks.
    pub fn to_generalized_rabin(&self) -> Option<GeneralizedRabinAcceptance> {
        let mut builder = GeneralizedRabinAcceptance::builder();
        match *self {
            OmegaAcceptance::All | OmegaAcceptance::GeneralizedBuchi { sets: 0 } => {
                builder.add_pair(true, 0);
            }
            OmegaAcceptance::None => (),
            OmegaAcceptance::Buchi => {
                builder.add_pair(false, 1);
            }
            OmegaAcceptance::CoBuchi => {
                builder.add_pair(true, 0);
            }
            OmegaAcceptance::GeneralizedBuchi { sets } => {
                builder.add_pair(false, sets);
            }
            OmegaAcceptance::Rabin(ref rabin) => return Some(rabin.to_generalized()),
            OmegaAcceptance::GeneralizedRabin(ref rabin) => return Some(rabin.clone()),
            OmegaAcceptance::Parity(_) => return None,
        }
        Some(builder.build())
    }
}

impl Display for OmegaAcceptance {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            OmegaAcceptance::GeneralizedBuchi { sets } => write!(f, "generalized-Buchi {}", sets),
            OmegaAcceptance::Rabin(ref rabin) => write!(f, "{}", rabin),
            OmegaAcceptance::GeneralizedRabin(ref rabin) => write!(f, "{}", rabin),
            OmegaAcceptance::Parity(ref parity) => write!(f, "{}", parity),
            ref other => write!(f, "{}", other.name()),
        }
    }
}
