//! The breakpoint product of a single non-transient component.
//!
//! Every tracked pair carries the position of the `Inf` mark it awaits next.
//! Positions advance round-robin over the pair's `Inf` marks; crossing the
//! last position emits the plain `Inf` mark of the pair, and a `Fin` mark
//! resets the position to 0.

use bit_set::BitSet;
use integeriser::{HashIntegeriser, Integeriser};
use log::trace;
use std::fmt::Debug;
use std::hash::Hash;

use search::{Frontier, Search};

use super::state::ProductState;
use crate::acceptance::{GeneralizedRabinPair, RabinPair};
use crate::automaton::{Automaton, Edge, ValuationSet};
use crate::config::ExplorationOrder;

/// The marks occurring on edges that stay inside `component`.
pub(crate) fn component_marks<S>(automaton: &Automaton<S>, component: &[usize]) -> BitSet
where
    S: Clone + Debug + Eq + Hash,
{
    let mut marks = BitSet::new();
    for &state in component {
        for (edge, _) in automaton.edges_at(state) {
            if component.binary_search(edge.successor()).is_ok() {
                marks.union_with(edge.colours());
            }
        }
    }
    marks
}

/// The generalized pairs that matter in one component, each with the plain
/// pair replacing it.
pub(crate) struct LocalPairs<'a> {
    tracked: Vec<(&'a GeneralizedRabinPair, RabinPair)>,
    fin_only: Vec<(&'a GeneralizedRabinPair, RabinPair)>,
}

impl<'a> LocalPairs<'a> {
    /// Keeps the tracked pairs all of whose `Inf` marks occur in `marks`.
    /// `Fin`-only pairs are relevant everywhere.
    pub fn new(
        tracked: &[(&'a GeneralizedRabinPair, RabinPair)],
        fin_only: &[(&'a GeneralizedRabinPair, RabinPair)],
        marks: &BitSet,
    ) -> Self {
        LocalPairs {
            tracked: tracked
                .iter()
                .filter(|(pair, _)| pair.infinite_indices().iter().all(|&i| marks.contains(i)))
                .cloned()
                .collect(),
            fin_only: fin_only.to_vec(),
        }
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Counters of the successor and plain marks of an edge with `colours`
    /// leaving a product state with counters `awaited`.
    pub fn step(&self, awaited: &[usize], colours: &BitSet) -> (Box<[usize]>, BitSet) {
        assert_eq!(awaited.len(), self.tracked.len());
        let mut successor = Vec::with_capacity(awaited.len());
        let mut marks = BitSet::new();

        for (&current, &(pair, rabin)) in awaited.iter().zip(&self.tracked) {
            let infinite = pair.infinite_indices();
            assert!(
                current < infinite.len(),
                "awaited position {} of pair {} out of bounds",
                current,
                pair
            );

            if pair.in_finite(colours) {
                marks.insert(rabin.fin_index());
                successor.push(0);
                continue;
            }

            let (next, breakpoint) = advance(infinite, current, colours);
            if breakpoint {
                marks.insert(rabin.inf_index());
            }
            successor.push(next);
        }

        for &(pair, rabin) in &self.fin_only {
            if pair.in_finite(colours) {
                marks.insert(rabin.fin_index());
            } else {
                marks.insert(rabin.inf_index());
            }
        }

        (successor.into_boxed_slice(), marks)
    }
}

/// Scans the `Inf` marks from position `current` on with wraparound. Returns
/// the first position missing from `colours` (0 if none is missing) and
/// whether the last position was passed.
fn advance(infinite: &[usize], current: usize, colours: &BitSet) -> (usize, bool) {
    let last = infinite.len() - 1;
    let mut breakpoint = false;
    for position in (current..infinite.len()).chain(0..current) {
        if !colours.contains(infinite[position]) {
            return (position, breakpoint);
        }
        breakpoint |= position == last;
    }
    (0, true)
}

/// The explored part of the product of a component with the counters of its
/// tracked pairs. Product states are addressed by local handles.
pub(crate) struct LocalProduct {
    states: HashIntegeriser<ProductState>,
    edges: Vec<Vec<(ValuationSet, Edge<usize>)>>,
    /// edges into other components, by original successor
    leaving: Vec<Vec<(usize, ValuationSet)>>,
}

impl LocalProduct {
    pub fn new() -> Self {
        LocalProduct {
            states: HashIntegeriser::new(),
            edges: Vec::new(),
            leaving: Vec::new(),
        }
    }

    /// Explores the product from the first state of `component` with all
    /// counters at 0.
    pub fn explore<S>(
        automaton: &Automaton<S>,
        component: &[usize],
        pairs: &LocalPairs,
        order: ExplorationOrder,
    ) -> Self
    where
        S: Clone + Debug + Eq + Hash,
    {
        let mut product = LocalProduct::new();

        let initial = ProductState::new(
            component[0],
            vec![0; pairs.tracked_count()].into_boxed_slice(),
        );
        let frontier = match order {
            ExplorationOrder::DepthFirst => Frontier::stack(vec![initial]),
            ExplorationOrder::BreadthFirst => Frontier::queue(vec![initial]),
        };

        let explored = Search::with_agenda(frontier, |state: &ProductState| {
            product.expand(automaton, component, pairs, state)
        })
        .uniques()
        .count();

        trace!(
            target: "rabin-degeneralization",
            "Explored {} product state(s) over {} state(s) tracking {} pair(s).",
            explored,
            component.len(),
            pairs.tracked_count()
        );
        product
    }

    fn expand<S>(
        &mut self,
        automaton: &Automaton<S>,
        component: &[usize],
        pairs: &LocalPairs,
        state: &ProductState,
    ) -> Vec<ProductState>
    where
        S: Clone + Debug + Eq + Hash,
    {
        let source = self.index(state.clone());
        let mut successors = Vec::new();

        for (edge, valuations) in automaton.edges_at(state.state) {
            let target = *edge.successor();
            if component.binary_search(&target).is_err() {
                self.leaving[source].push((target, valuations.clone()));
                continue;
            }

            let (awaited, marks) = pairs.step(&state.awaited, edge.colours());
            let successor = ProductState::new(target, awaited);
            let id = self.index(successor.clone());
            self.edges[source].push((valuations.clone(), Edge::new(id, marks)));
            successors.push(successor);
        }

        successors
    }

    fn index(&mut self, state: ProductState) -> usize {
        let id = self.states.integerise(state);
        while self.edges.len() <= id {
            self.edges.push(Vec::new());
            self.leaving.push(Vec::new());
        }
        id
    }

    pub fn size(&self) -> usize {
        self.states.size()
    }

    pub fn state(&self, id: usize) -> Option<&ProductState> {
        self.states.find_value(id)
    }

    pub fn edges(&self, id: usize) -> &[(ValuationSet, Edge<usize>)] {
        &self.edges[id]
    }

    pub fn leaving(&self, id: usize) -> &[(usize, ValuationSet)] {
        &self.leaving[id]
    }

    pub fn successors(&self, id: usize) -> Vec<usize> {
        self.edges[id]
            .iter()
            .map(|(_, edge)| *edge.successor())
            .collect()
    }
}
