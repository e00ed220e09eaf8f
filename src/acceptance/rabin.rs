use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::generalized_rabin::GeneralizedRabinAcceptance;
use super::AcceptanceExpression;

/// A plain Rabin pair occupying the adjacent marks `2i` (`Fin`) and `2i + 1`
/// (`Inf`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RabinPair {
    fin: usize,
}

impl RabinPair {
    pub fn fin_index(&self) -> usize {
        self.fin
    }

    pub fn inf_index(&self) -> usize {
        self.fin + 1
    }

    /// Position of the pair within its condition.
    pub fn number(&self) -> usize {
        self.fin / 2
    }

    pub fn expression(&self) -> AcceptanceExpression {
        AcceptanceExpression::and(vec![
            AcceptanceExpression::Fin(self.fin_index()),
            AcceptanceExpression::Inf(self.inf_index()),
        ])
    }
}

impl Display for RabinPair {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}:{}|{})", self.number(), self.fin_index(), self.inf_index())
    }
}

/// Plain Rabin acceptance with contiguously packed pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RabinAcceptance {
    pairs: Vec<RabinPair>,
}

impl RabinAcceptance {
    pub fn builder() -> RabinAcceptanceBuilder {
        RabinAcceptanceBuilder::default()
    }

    /// A condition with `count` pairs.
    pub fn of(count: usize) -> Self {
        let mut builder = RabinAcceptance::builder();
        for _ in 0..count {
            builder.add();
        }
        builder.build()
    }

    pub fn pairs(&self) -> &[RabinPair] {
        &self.pairs
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn acceptance_sets(&self) -> usize {
        2 * self.pairs.len()
    }

    /// `(Fin(0) & Inf(1)) | (Fin(2) & Inf(3)) | …`
    pub fn expression(&self) -> AcceptanceExpression {
        AcceptanceExpression::or(self.pairs.iter().map(RabinPair::expression))
    }

    /// The same condition viewed as generalized Rabin acceptance with one
    /// `Inf` mark per pair.
    pub fn to_generalized(&self) -> GeneralizedRabinAcceptance {
        let mut builder = GeneralizedRabinAcceptance::builder();
        for _ in &self.pairs {
            builder.add_pair(true, 1);
        }
        builder.build()
    }
}

impl Display for RabinAcceptance {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Rabin:")?;
        for pair in &self.pairs {
            write!(f, " {}", pair)?;
        }
        Ok(())
    }
}

/// Hands out `RabinPair`s in order. A builder is the only writer of its index
/// counter and is consumed once the condition is complete.
#[derive(Debug, Default)]
pub struct RabinAcceptanceBuilder {
    pairs: Vec<RabinPair>,
}

impl RabinAcceptanceBuilder {
    pub fn add(&mut self) -> RabinPair {
        let pair = RabinPair {
            fin: 2 * self.pairs.len(),
        };
        self.pairs.push(pair);
        pair
    }

    pub fn build(self) -> RabinAcceptance {
        RabinAcceptance { pairs: self.pairs }
    }
}
