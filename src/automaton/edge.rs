use bit_set::BitSet;
use std::fmt::{self, Display, Formatter};

/// A successor together with the acceptance marks (colours) carried by the
/// transition leading to it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<S> {
    successor: S,
    colours: BitSet,
}

impl<S> Edge<S> {
    pub fn new(successor: S, colours: BitSet) -> Self {
        Edge { successor, colours }
    }

    /// An edge without acceptance marks.
    pub fn uncoloured(successor: S) -> Self {
        Edge::new(successor, BitSet::new())
    }

    pub fn of<I>(successor: S, colours: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Edge::new(successor, colours.into_iter().collect())
    }

    pub fn successor(&self) -> &S {
        &self.successor
    }

    pub fn colours(&self) -> &BitSet {
        &self.colours
    }

    pub fn in_set(&self, colour: usize) -> bool {
        self.colours.contains(colour)
    }

    pub fn largest_colour(&self) -> Option<usize> {
        self.colours.iter().last()
    }

    pub fn map<T, F>(self, f: F) -> Edge<T>
    where
        F: FnOnce(S) -> T,
    {
        Edge {
            successor: f(self.successor),
            colours: self.colours,
        }
    }

    pub fn with_successor<T>(&self, successor: T) -> Edge<T> {
        Edge {
            successor,
            colours: self.colours.clone(),
        }
    }
}

impl<S: Display> Display for Edge<S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.successor)?;
        if !self.colours.is_empty() {
            write!(f, " {{")?;
            for (position, colour) in self.colours.iter().enumerate() {
                if position > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", colour)?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}
