//! Degeneralization of generalized Büchi automata into Büchi automata.
//!
//! Every state is annotated with the index of the acceptance set it waits
//! for. An edge is accepting when it completes a round through all sets.

use bit_set::BitSet;
use log::debug;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use search::Search;

use super::DegeneralizationError;
use crate::acceptance::OmegaAcceptance;
use crate::automaton::{Automaton, AutomatonBuilder, Edge};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexedState<S> {
    pub state: S,
    pub index: usize,
}

impl<S> IndexedState<S> {
    pub fn new(state: S, index: usize) -> Self {
        IndexedState { state, index }
    }
}

impl<S: Display> Display for IndexedState<S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{{{}|{}}}", self.state, self.index)
    }
}

/// The awaited index after an edge with `colours` and whether the edge is
/// accepting.
fn transform(colours: &BitSet, current: usize, sets: usize) -> (usize, bool) {
    let mut next = current;
    while next < sets && colours.contains(next) {
        next += 1;
    }
    if next < sets {
        return (next, false);
    }

    next = 0;
    while next < current && colours.contains(next) {
        next += 1;
    }
    (if next < sets { next } else { 0 }, true)
}

/// Translates a Büchi, generalized Büchi or `All` automaton into a Büchi
/// automaton. Only states reachable from the initial states are built.
pub fn degeneralize<S>(
    automaton: &Automaton<S>,
) -> Result<Automaton<IndexedState<S>>, DegeneralizationError>
where
    S: Clone + Debug + Eq + Hash + Ord,
{
    let sets = match *automaton.acceptance() {
        OmegaAcceptance::All => 0,
        OmegaAcceptance::Buchi => 1,
        OmegaAcceptance::GeneralizedBuchi { sets } => sets,
        ref other => {
            return Err(DegeneralizationError::UnsupportedAcceptance(
                other.name().to_string(),
            ))
        }
    };

    debug!(
        target: "buchi-degeneralization",
        "De-generalising automaton with {} state(s) and {} set(s).",
        automaton.size(),
        sets
    );

    let mut builder = AutomatonBuilder::new(OmegaAcceptance::Buchi, automaton.propositions());
    let initials: Vec<(usize, usize)> = automaton
        .initial_indices()
        .iter()
        .map(|&state| (state, 0))
        .collect();
    for &(state, index) in &initials {
        if let Some(original) = automaton.state(state) {
            builder.add_initial_state(IndexedState::new(original.clone(), index));
        }
    }

    let mut edges = Vec::new();
    let explored = Search::dfs(initials, |&(state, index): &(usize, usize)| {
        let mut successors = Vec::new();
        for (edge, valuations) in automaton.edges_at(state) {
            let (next, accepting) = transform(edge.colours(), index, sets);
            let target = (*edge.successor(), next);
            edges.push(((state, index), valuations.clone(), target, accepting));
            successors.push(target);
        }
        successors
    })
    .uniques()
    .count();

    let resolve = |(state, index): (usize, usize)| {
        automaton
            .state(state)
            .map(|original| IndexedState::new(original.clone(), index))
    };
    for (source, valuations, target, accepting) in edges {
        if let (Some(source), Some(target)) = (resolve(source), resolve(target)) {
            let edge = if accepting {
                Edge::of(target, vec![0])
            } else {
                Edge::uncoloured(target)
            };
            builder.add_edge(source, valuations, edge);
        }
    }

    let result = builder.build()?;
    debug!(
        target: "buchi-degeneralization",
        "Explored {} state(s).",
        explored
    );
    Ok(result)
}
