use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::AcceptanceExpression;

/// Which extremal colour decides and which parity wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParityKind {
    MinEven,
    MinOdd,
    MaxEven,
    MaxOdd,
}

impl ParityKind {
    fn is_max(self) -> bool {
        match self {
            ParityKind::MaxEven | ParityKind::MaxOdd => true,
            ParityKind::MinEven | ParityKind::MinOdd => false,
        }
    }

    fn is_even(self) -> bool {
        match self {
            ParityKind::MinEven | ParityKind::MaxEven => true,
            ParityKind::MinOdd | ParityKind::MaxOdd => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParityAcceptance {
    pub colours: usize,
    pub kind: ParityKind,
}

impl ParityAcceptance {
    pub fn new(colours: usize, kind: ParityKind) -> Self {
        ParityAcceptance { colours, kind }
    }

    pub fn is_accepting_colour(&self, colour: usize) -> bool {
        (colour % 2 == 0) == self.kind.is_even()
    }

    /// The nested chain of the interchange format, e.g. `Inf(0) | (Fin(1) &
    /// Inf(2))` for `min even 3`.
    pub fn expression(&self) -> AcceptanceExpression {
        if self.colours == 0 {
            return if self.kind.is_even() {
                AcceptanceExpression::True
            } else {
                AcceptanceExpression::False
            };
        }

        // colours in the order of decreasing priority
        let order: Vec<usize> = if self.kind.is_max() {
            (0..self.colours).rev().collect()
        } else {
            (0..self.colours).collect()
        };

        let mut chain = None;
        for &colour in order.iter().rev() {
            chain = Some(match chain {
                None if self.is_accepting_colour(colour) => AcceptanceExpression::Inf(colour),
                None => AcceptanceExpression::Fin(colour),
                Some(rest) if self.is_accepting_colour(colour) => {
                    AcceptanceExpression::or(vec![AcceptanceExpression::Inf(colour), rest])
                }
                Some(rest) => {
                    AcceptanceExpression::and(vec![AcceptanceExpression::Fin(colour), rest])
                }
            });
        }
        chain.unwrap_or(AcceptanceExpression::False)
    }
}

impl Display for ParityAcceptance {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "parity {} {} {}",
            if self.kind.is_max() { "max" } else { "min" },
            if self.kind.is_even() { "even" } else { "odd" },
            self.colours
        )
    }
}
