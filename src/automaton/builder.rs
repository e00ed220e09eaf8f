use integeriser::{HashIntegeriser, Integeriser};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use super::{Automaton, AutomatonError, Edge, ValuationSet};
use crate::acceptance::OmegaAcceptance;

/// Collects states and edges of an automaton. States are integerised on
/// insertion; `build` validates everything and hands the arena over to an
/// immutable `Automaton`.
pub struct AutomatonBuilder<S: Eq + Hash> {
    states: HashIntegeriser<S>,
    initial: BTreeSet<usize>,
    edges: Vec<BTreeMap<Edge<usize>, ValuationSet>>,
    acceptance: OmegaAcceptance,
    propositions: usize,
}

impl<S> AutomatonBuilder<S>
where
    S: Clone + Debug + Eq + Hash,
{
    pub fn new(acceptance: OmegaAcceptance, propositions: usize) -> Self {
        AutomatonBuilder {
            states: HashIntegeriser::new(),
            initial: BTreeSet::new(),
            edges: Vec::new(),
            acceptance,
            propositions,
        }
    }

    pub fn add_state(&mut self, state: S) -> usize {
        let index = self.states.integerise(state);
        while self.edges.len() <= index {
            self.edges.push(BTreeMap::new());
        }
        index
    }

    pub fn add_initial_state(&mut self, state: S) -> usize {
        let index = self.add_state(state);
        self.initial.insert(index);
        index
    }

    /// Adds an edge from `source`. Edges with equal successor and colours are
    /// merged by uniting their labels; an empty label adds the states only.
    pub fn add_edge(&mut self, source: S, valuations: ValuationSet, edge: Edge<S>) {
        let source = self.add_state(source);
        let successor = self.add_state(edge.successor().clone());
        if valuations.is_empty() {
            return;
        }

        self.edges[source]
            .entry(edge.with_successor(successor))
            .or_insert_with(ValuationSet::empty)
            .union_with(&valuations);
    }

    pub fn build(self) -> Result<Automaton<S>, AutomatonError> {
        let sets = self.acceptance.acceptance_sets();
        let domain = 1usize << self.propositions;

        for (source, edges) in self.edges.iter().enumerate() {
            for (edge, valuations) in edges {
                if !self.acceptance.is_well_formed_edge(edge) {
                    return Err(AutomatonError::MalformedEdge {
                        state: self.describe(source),
                        colour: edge.largest_colour().unwrap_or(0),
                        sets,
                    });
                }
                if let Some(valuation) = valuations.largest().filter(|&v| v >= domain) {
                    return Err(AutomatonError::ValuationOutOfRange {
                        state: self.describe(source),
                        valuation,
                        propositions: self.propositions,
                    });
                }
            }
        }

        Ok(Automaton {
            states: self.states,
            initial: self.initial,
            edges: self.edges,
            acceptance: self.acceptance,
            propositions: self.propositions,
        })
    }

    fn describe(&self, index: usize) -> String {
        self.states
            .find_value(index)
            .map_or_else(|| index.to_string(), |state| format!("{:?}", state))
    }
}
