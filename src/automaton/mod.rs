use integeriser::{HashIntegeriser, Integeriser};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;
use thiserror::Error;

use search::Search;

use crate::acceptance::OmegaAcceptance;

mod builder;
mod edge;
mod valuation;

pub use self::builder::AutomatonBuilder;
pub use self::edge::Edge;
pub use self::valuation::ValuationSet;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("edge of state {state} carries colour {colour}, but the acceptance condition has {sets} sets")]
    MalformedEdge {
        state: String,
        colour: usize,
        sets: usize,
    },
    #[error("edge of state {state} is labelled with valuation {valuation}, which is out of range for {propositions} propositions")]
    ValuationOutOfRange {
        state: String,
        valuation: usize,
        propositions: usize,
    },
}

/// An immutable, edge-labelled omega-automaton with transition-based
/// acceptance. States are stored in an arena and addressed by `usize` handles
/// in the order they were added.
#[derive(Clone, Debug)]
pub struct Automaton<S: Eq + Hash> {
    states: HashIntegeriser<S>,
    initial: BTreeSet<usize>,
    edges: Vec<BTreeMap<Edge<usize>, ValuationSet>>,
    acceptance: OmegaAcceptance,
    propositions: usize,
}

impl<S> Automaton<S>
where
    S: Clone + Debug + Eq + Hash,
{
    pub fn builder(acceptance: OmegaAcceptance, propositions: usize) -> AutomatonBuilder<S> {
        AutomatonBuilder::new(acceptance, propositions)
    }

    pub fn size(&self) -> usize {
        self.states.size()
    }

    pub fn acceptance(&self) -> &OmegaAcceptance {
        &self.acceptance
    }

    pub fn propositions(&self) -> usize {
        self.propositions
    }

    /// All states in the order of their handles.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        (0..self.size()).filter_map(move |index| self.states.find_value(index))
    }

    pub fn initial_states(&self) -> impl Iterator<Item = &S> {
        self.initial
            .iter()
            .filter_map(move |&index| self.states.find_value(index))
    }

    pub fn edges(&self, state: &S) -> Vec<(ValuationSet, Edge<S>)> {
        self.state_index(state).map_or_else(Vec::new, |index| {
            self.edges_at(index)
                .filter_map(|(edge, valuations)| {
                    self.states
                        .find_value(*edge.successor())
                        .map(|successor| (valuations.clone(), edge.with_successor(successor.clone())))
                })
                .collect()
        })
    }

    /// The edges of `state` whose label contains `valuation`.
    pub fn edges_for(&self, state: &S, valuation: usize) -> Vec<Edge<S>> {
        self.edges(state)
            .into_iter()
            .filter(|(valuations, _)| valuations.contains(valuation))
            .map(|(_, edge)| edge)
            .collect()
    }

    pub fn successors(&self, state: &S) -> Vec<S> {
        self.state_index(state).map_or_else(Vec::new, |index| {
            self.successor_indices(index)
                .into_iter()
                .filter_map(|successor| self.states.find_value(successor).cloned())
                .collect()
        })
    }

    pub fn state_index(&self, state: &S) -> Option<usize> {
        self.states.find_key(state)
    }

    pub fn state(&self, index: usize) -> Option<&S> {
        self.states.find_value(index)
    }

    pub fn initial_indices(&self) -> &BTreeSet<usize> {
        &self.initial
    }

    pub fn edges_at(&self, index: usize) -> impl Iterator<Item = (&Edge<usize>, &ValuationSet)> {
        self.edges.get(index).into_iter().flat_map(|edges| edges.iter())
    }

    pub fn successor_indices(&self, index: usize) -> BTreeSet<usize> {
        self.edges_at(index)
            .map(|(edge, _)| *edge.successor())
            .collect()
    }

    /// Handles of all states reachable from the initial states, in the order
    /// of a depth-first exploration.
    pub fn reachable_indices(&self) -> Vec<usize> {
        Search::dfs(
            self.initial.iter().cloned(),
            move |&index: &usize| self.successor_indices(index),
        )
        .uniques()
        .collect()
    }

    /// Relabels every state with `f`, which has to be injective on the states
    /// of this automaton.
    pub fn map_states<T, F>(&self, mut f: F) -> Automaton<T>
    where
        T: Clone + Debug + Eq + Hash,
        F: FnMut(&S) -> T,
    {
        let mut states = HashIntegeriser::new();
        for state in self.states() {
            states.integerise(f(state));
        }
        assert_eq!(
            states.size(),
            self.size(),
            "state relabelling has to be injective"
        );

        Automaton {
            states,
            initial: self.initial.clone(),
            edges: self.edges.clone(),
            acceptance: self.acceptance.clone(),
            propositions: self.propositions,
        }
    }

    /// Restricts the automaton to the states reachable from its initial
    /// states.
    pub fn trim(&self) -> Automaton<S> {
        let reachable = self.reachable_indices();
        if reachable.len() == self.size() {
            return self.clone();
        }

        let mut sorted = reachable;
        sorted.sort();

        let mut builder = AutomatonBuilder::new(self.acceptance.clone(), self.propositions);
        for &index in &sorted {
            if let Some(state) = self.state(index) {
                builder.add_state(state.clone());
            }
        }
        for &index in &self.initial {
            if let Some(state) = self.state(index) {
                builder.add_initial_state(state.clone());
            }
        }
        for &index in &sorted {
            if let Some(source) = self.state(index) {
                for (valuations, edge) in self.edges(source) {
                    builder.add_edge(source.clone(), valuations, edge);
                }
            }
        }

        Automaton::from_validated(builder)
    }

    fn from_validated(builder: AutomatonBuilder<S>) -> Automaton<S> {
        match builder.build() {
            Ok(automaton) => automaton,
            Err(error) => panic!("edges of a valid automaton became malformed: {}", error),
        }
    }
}

impl<S> Display for Automaton<S>
where
    S: Clone + Debug + Display + Eq + Hash,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "States: {}", self.size())?;
        write!(f, "Start:")?;
        for state in self.initial_states() {
            write!(f, " {}", state)?;
        }
        writeln!(f)?;
        writeln!(f, "Acceptance: {}", self.acceptance)?;
        for (index, state) in self.states().enumerate() {
            writeln!(f, "State: {}", state)?;
            for (edge, valuations) in self.edges_at(index) {
                match self.state(*edge.successor()) {
                    Some(successor) => writeln!(f, "  {} {}", valuations, edge.with_successor(successor))?,
                    None => writeln!(f, "  {} {:?}", valuations, edge)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptance::GeneralizedRabinAcceptance;

    fn two_states() -> Automaton<&'static str> {
        let mut builder = Automaton::builder(OmegaAcceptance::Buchi, 1);
        builder.add_initial_state("p");
        builder.add_edge("p", ValuationSet::of(vec![0]), Edge::uncoloured("q"));
        builder.add_edge("p", ValuationSet::of(vec![1]), Edge::uncoloured("q"));
        builder.add_edge("q", ValuationSet::universe(1), Edge::of("q", vec![0]));
        builder.add_edge("r", ValuationSet::universe(1), Edge::uncoloured("p"));
        builder.build().unwrap()
    }

    #[test]
    fn parallel_edges_are_merged() {
        let automaton = two_states();
        assert_eq!(automaton.size(), 3);
        assert_eq!(
            automaton.edges(&"p"),
            vec![(ValuationSet::universe(1), Edge::uncoloured("q"))]
        );
        assert_eq!(automaton.edges_for(&"q", 1), vec![Edge::of("q", vec![0])]);
        assert_eq!(automaton.successors(&"r"), vec!["p"]);
        assert!(automaton.edges(&"x").is_empty());
    }

    #[test]
    fn build_rejects_out_of_range_colours() {
        let mut builder = Automaton::builder(OmegaAcceptance::Buchi, 0);
        builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![1]));
        match builder.build() {
            Err(AutomatonError::MalformedEdge { colour, sets, .. }) => {
                assert_eq!((colour, sets), (1, 1));
            }
            other => panic!("unexpected result {:?}", other.map(|a| a.size())),
        }
    }

    #[test]
    fn build_rejects_out_of_range_valuations() {
        let acceptance = OmegaAcceptance::GeneralizedRabin(
            GeneralizedRabinAcceptance::from_pairs(vec![(None, vec![0])]).unwrap(),
        );
        let mut builder = Automaton::builder(acceptance, 1);
        builder.add_edge(0, ValuationSet::of(vec![2]), Edge::of(0, vec![0]));
        assert!(match builder.build() {
            Err(AutomatonError::ValuationOutOfRange { valuation: 2, propositions: 1, .. }) => true,
            _ => false,
        });
    }

    #[test]
    fn trim_drops_unreachable_states() {
        let trimmed = two_states().trim();
        assert_eq!(trimmed.size(), 2);
        assert!(trimmed.state_index(&"r").is_none());
        assert_eq!(trimmed.initial_states().collect::<Vec<_>>(), vec![&"p"]);
        assert_eq!(trimmed.edges(&"q"), vec![(ValuationSet::universe(1), Edge::of("q", vec![0]))]);
    }

    #[test]
    fn map_states_keeps_structure() {
        let mapped = two_states().map_states(|state| state.to_uppercase());
        assert_eq!(mapped.size(), 3);
        assert_eq!(mapped.successors(&"P".to_string()), vec!["Q".to_string()]);
        assert_eq!(mapped.initial_states().collect::<Vec<_>>(), vec!["P"]);
    }
}
