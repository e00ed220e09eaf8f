use std::fmt::{self, Display, Formatter};

/// A state of a local product: the handle of an original state together with
/// the awaited `Inf` position of every pair tracked in its component.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ProductState {
    pub state: usize,
    pub awaited: Box<[usize]>,
}

impl ProductState {
    pub fn new(state: usize, awaited: Box<[usize]>) -> Self {
        ProductState { state, awaited }
    }

    /// A state without counters, as used for transient components.
    pub fn plain(state: usize) -> Self {
        ProductState::new(state, Box::new([]))
    }
}

/// A state of a degeneralized automaton: an original state and the
/// round-robin counters of the pairs tracked in its component.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DegeneralizedState<S> {
    pub state: S,
    pub awaited: Vec<usize>,
}

impl<S> DegeneralizedState<S> {
    pub fn new(state: S, awaited: Vec<usize>) -> Self {
        DegeneralizedState { state, awaited }
    }

    pub fn plain(state: S) -> Self {
        DegeneralizedState::new(state, Vec::new())
    }
}

impl<S: Display> Display for DegeneralizedState<S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.awaited.is_empty() {
            write!(f, "{{{}}}", self.state)
        } else {
            write!(f, "{{{}|{:?}}}", self.state, self.awaited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(DegeneralizedState::plain("q").to_string(), "{q}");
        assert_eq!(DegeneralizedState::new(3, vec![0, 1]).to_string(), "{3|[0, 1]}");
    }

    #[test]
    fn product_states_order_by_state_then_counters() {
        let mut states = vec![
            ProductState::new(1, vec![0].into_boxed_slice()),
            ProductState::new(0, vec![1].into_boxed_slice()),
            ProductState::new(0, vec![0].into_boxed_slice()),
        ];
        states.sort();
        assert_eq!(states[0], ProductState::new(0, vec![0].into_boxed_slice()));
        assert_eq!(states[2].state, 1);
        assert!(ProductState::plain(0) < ProductState::new(0, vec![0].into_boxed_slice()));
    }
}
