use bit_set::BitSet;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::{AcceptanceError, AcceptanceExpression};

/// Stable handle of a pair inside its `GeneralizedRabinAcceptance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(usize);

impl PairId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One optional `Fin` mark together with a conjunction of `Inf` marks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneralizedRabinPair {
    id: PairId,
    finite: Option<usize>,
    infinite: Vec<usize>,
}

impl GeneralizedRabinPair {
    pub fn id(&self) -> PairId {
        self.id
    }

    pub fn has_finite(&self) -> bool {
        self.finite.is_some()
    }

    pub fn has_infinite(&self) -> bool {
        !self.infinite.is_empty()
    }

    /// A pair with neither a `Fin` nor an `Inf` mark; it never contributes to
    /// acceptance.
    pub fn is_vacuous(&self) -> bool {
        !self.has_finite() && !self.has_infinite()
    }

    pub fn finite_index(&self) -> Option<usize> {
        self.finite
    }

    pub fn infinite_index_count(&self) -> usize {
        self.infinite.len()
    }

    pub fn infinite_index(&self, position: usize) -> Result<usize, AcceptanceError> {
        self.infinite
            .get(position)
            .cloned()
            .ok_or(AcceptanceError::InfiniteIndexOutOfRange {
                position,
                count: self.infinite.len(),
            })
    }

    pub fn infinite_indices(&self) -> &[usize] {
        &self.infinite
    }

    pub fn contains(&self, index: usize) -> bool {
        self.finite == Some(index) || self.infinite.contains(&index)
    }

    /// Checks whether `colours` contains the `Fin` mark of this pair.
    pub fn in_finite(&self, colours: &BitSet) -> bool {
        self.finite.map_or(false, |index| colours.contains(index))
    }

    /// `Fin(f) & Inf(i1) & … & Inf(ik)`.
    pub fn expression(&self) -> AcceptanceExpression {
        AcceptanceExpression::and(
            self.finite
                .iter()
                .map(|&index| AcceptanceExpression::Fin(index))
                .chain(self.infinite.iter().map(|&index| AcceptanceExpression::Inf(index))),
        )
    }
}

impl Display for GeneralizedRabinPair {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}:", self.id.0)?;
        match self.finite {
            Some(index) => write!(f, "{}", index)?,
            None => write!(f, "#")?,
        }
        for index in &self.infinite {
            write!(f, "|{}", index)?;
        }
        write!(f, ")")
    }
}

/// The pairs of a condition split by the role they play during
/// degeneralization.
#[derive(Clone, Debug)]
pub struct PairPartition<'a> {
    /// Pairs with at least one `Inf` mark.
    pub tracked: Vec<&'a GeneralizedRabinPair>,
    /// Pairs with a `Fin` mark and no `Inf` marks.
    pub fin_only: Vec<&'a GeneralizedRabinPair>,
}

/// Generalized Rabin acceptance: some pair has its `Fin` mark finitely often
/// and every one of its `Inf` marks infinitely often.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneralizedRabinAcceptance {
    pairs: Vec<GeneralizedRabinPair>,
    sets: usize,
}

impl GeneralizedRabinAcceptance {
    pub fn builder() -> GeneralizedRabinBuilder {
        GeneralizedRabinBuilder::new()
    }

    /// Creates a condition from explicit `(Fin, [Inf])` pairs. Every mark in
    /// `0..n` must be used by exactly one pair.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AcceptanceError>
    where
        I: IntoIterator<Item = (Option<usize>, Vec<usize>)>,
    {
        let mut seen = BitSet::new();
        let mut collected = Vec::new();

        for (position, (finite, infinite)) in pairs.into_iter().enumerate() {
            for &index in finite.iter().chain(infinite.iter()) {
                if !seen.insert(index) {
                    return Err(AcceptanceError::DuplicateIndex { index });
                }
            }
            collected.push(GeneralizedRabinPair {
                id: PairId(position),
                finite,
                infinite,
            });
        }

        let sets = seen.iter().last().map_or(0, |largest| largest + 1);
        if let Some(index) = (0..sets).find(|&index| !seen.contains(index)) {
            return Err(AcceptanceError::MissingIndex { index });
        }

        Ok(GeneralizedRabinAcceptance {
            pairs: collected,
            sets,
        })
    }

    pub fn pairs(&self) -> &[GeneralizedRabinPair] {
        &self.pairs
    }

    pub fn pair(&self, id: PairId) -> Option<&GeneralizedRabinPair> {
        self.pairs.get(id.0)
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn acceptance_sets(&self) -> usize {
        self.sets
    }

    /// Splits the pairs into tracked and `Fin`-only pairs, dropping vacuous
    /// pairs.
    pub fn partition(&self) -> PairPartition<'_> {
        let mut partition = PairPartition {
            tracked: Vec::new(),
            fin_only: Vec::new(),
        };

        for pair in &self.pairs {
            if pair.has_infinite() {
                partition.tracked.push(pair);
            } else if pair.has_finite() {
                partition.fin_only.push(pair);
            }
        }

        partition
    }

    /// Disjunction over the non-vacuous pairs.
    pub fn expression(&self) -> AcceptanceExpression {
        AcceptanceExpression::or(
            self.pairs
                .iter()
                .filter(|pair| !pair.is_vacuous())
                .map(GeneralizedRabinPair::expression),
        )
    }
}

impl Display for GeneralizedRabinAcceptance {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "generalized-Rabin:")?;
        for pair in &self.pairs {
            write!(f, " {}", pair)?;
        }
        Ok(())
    }
}

/// Allocates the marks of a `GeneralizedRabinAcceptance` contiguously.
#[derive(Debug, Default)]
pub struct GeneralizedRabinBuilder {
    pairs: Vec<GeneralizedRabinPair>,
    next: usize,
}

impl GeneralizedRabinBuilder {
    pub fn new() -> Self {
        GeneralizedRabinBuilder::default()
    }

    /// Adds a pair with an optional `Fin` mark and `infinite` `Inf` marks, the
    /// `Fin` mark (if any) being allocated first.
    pub fn add_pair(&mut self, finite: bool, infinite: usize) -> PairId {
        let id = PairId(self.pairs.len());
        let finite = if finite { Some(self.allocate()) } else { None };
        let infinite = (0..infinite).map(|_| self.allocate()).collect();

        self.pairs.push(GeneralizedRabinPair {
            id,
            finite,
            infinite,
        });
        id
    }

    fn allocate(&mut self) -> usize {
        self.next += 1;
        self.next - 1
    }

    pub fn build(self) -> GeneralizedRabinAcceptance {
        GeneralizedRabinAcceptance {
            pairs: self.pairs,
            sets: self.next,
        }
    }
}
