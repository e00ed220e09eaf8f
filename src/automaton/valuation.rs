use bit_set::BitSet;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

/// A set of valuations of the atomic propositions. A valuation is encoded as
/// the integer whose bit `i` is set iff proposition `i` holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValuationSet {
    valuations: BitSet,
}

impl ValuationSet {
    pub fn empty() -> Self {
        ValuationSet::default()
    }

    /// Every valuation of `propositions` atomic propositions.
    pub fn universe(propositions: usize) -> Self {
        (0..1 << propositions).collect()
    }

    pub fn of<I>(valuations: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        valuations.into_iter().collect()
    }

    pub fn contains(&self, valuation: usize) -> bool {
        self.valuations.contains(valuation)
    }

    pub fn union_with(&mut self, other: &ValuationSet) {
        self.valuations.union_with(&other.valuations);
    }

    pub fn is_empty(&self) -> bool {
        self.valuations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.valuations.len()
    }

    pub fn largest(&self) -> Option<usize> {
        self.valuations.iter().last()
    }
}

impl FromIterator<usize> for ValuationSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        ValuationSet {
            valuations: iter.into_iter().collect(),
        }
    }
}

impl Display for ValuationSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (position, valuation) in self.valuations.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", valuation)?;
        }
        write!(f, "]")
    }
}
