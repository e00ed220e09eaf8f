//! Degeneralization of generalized Rabin automata into Rabin automata.
//!
//! The automaton is processed one strongly connected component at a time,
//! leaves first. A transient component is copied without counters or marks.
//! Any other component is unfolded into a breakpoint product with one
//! round-robin counter per generalized pair that can accept inside it, and a
//! bottom component of that product supplies the canonical copy of every
//! original state. Edges between components are collected on the way and
//! attached to the canonical copies once all components are done.

use log::{debug, trace};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

mod breakpoint;
mod canonical;
mod state;

use self::breakpoint::{component_marks, LocalPairs, LocalProduct};
use self::state::ProductState;
pub use self::state::DegeneralizedState;

use super::DegeneralizationError;
use crate::acceptance::{OmegaAcceptance, RabinAcceptance};
use crate::automaton::{Automaton, AutomatonBuilder, Edge, ValuationSet};
use crate::config::DegeneralizationConfig;
use crate::scc;

/// The result of a degeneralization together with the canonical copy of the
/// original states.
#[derive(Clone, Debug)]
pub struct Degeneralized<S: Eq + Hash> {
    pub automaton: Automaton<DegeneralizedState<S>>,
    /// Maps every original state whose canonical copy is a state of
    /// `automaton`. After trimming these are exactly the states reachable
    /// from the initial states; otherwise every original state is mapped.
    pub correspondence: BTreeMap<S, DegeneralizedState<S>>,
}

impl<S> Degeneralized<S>
where
    S: Eq + Hash + Ord,
{
    pub fn image(&self, state: &S) -> Option<&DegeneralizedState<S>> {
        self.correspondence.get(state)
    }
}

/// Degeneralizes `automaton` with the default configuration.
pub fn degeneralize<S>(automaton: &Automaton<S>) -> Result<Degeneralized<S>, DegeneralizationError>
where
    S: Clone + Debug + Eq + Hash + Ord,
{
    RabinDegeneralization::default().run(automaton)
}

#[derive(Clone, Debug, Default)]
pub struct RabinDegeneralization {
    config: DegeneralizationConfig,
}

impl RabinDegeneralization {
    pub fn new(config: DegeneralizationConfig) -> Self {
        RabinDegeneralization { config }
    }

    pub fn config(&self) -> &DegeneralizationConfig {
        &self.config
    }

    /// Translates an automaton whose acceptance condition can be viewed as
    /// generalized Rabin acceptance into an equivalent Rabin automaton. Input
    /// that already is a Rabin automaton is only relabelled.
    pub fn run<S>(&self, automaton: &Automaton<S>) -> Result<Degeneralized<S>, DegeneralizationError>
    where
        S: Clone + Debug + Eq + Hash + Ord,
    {
        let generalized = match *automaton.acceptance() {
            OmegaAcceptance::Rabin(_) => return Ok(relabel(automaton)),
            ref other => other.to_generalized_rabin().ok_or_else(|| {
                DegeneralizationError::UnsupportedAcceptance(other.name().to_string())
            })?,
        };

        debug!(
            target: "rabin-degeneralization",
            "De-generalising automaton with {} state(s) and {} pair(s).",
            automaton.size(),
            generalized.pair_count()
        );

        // one plain pair per generalized pair that is not vacuous
        let partition = generalized.partition();
        let mut plain = RabinAcceptance::builder();
        let tracked: Vec<_> = partition
            .tracked
            .iter()
            .map(|&pair| (pair, plain.add()))
            .collect();
        let fin_only: Vec<_> = partition
            .fin_only
            .iter()
            .map(|&pair| (pair, plain.add()))
            .collect();
        let acceptance = plain.build();

        let successors = |state: usize| automaton.successor_indices(state);
        let components = scc::compute_sccs(0..automaton.size(), successors);
        let mut stitcher = Stitcher::new(automaton.size());

        for component in &components {
            if scc::is_transient(component, successors) {
                stitcher.add_transient(automaton, component[0]);
                continue;
            }

            let marks = component_marks(automaton, component);
            let pairs = LocalPairs::new(&tracked, &fin_only, &marks);
            let product =
                LocalProduct::explore(automaton, component, &pairs, self.config.exploration);
            let bottom = canonical::bottom_component(&product, self.config.bottom_scc);

            trace!(
                target: "rabin-degeneralization",
                "Component of {} state(s) tracks {} pair(s), keeping {} product state(s).",
                component.len(),
                pairs.tracked_count(),
                bottom.len()
            );
            stitcher.add_component(&product, &bottom);
        }

        let result = stitcher.finish(automaton, acceptance, self.config.trim)?;
        debug!(
            target: "rabin-degeneralization",
            "Degeneralized automaton has {} state(s) and {} pair(s).",
            result.automaton.size(),
            tracked.len() + fin_only.len()
        );
        Ok(result)
    }
}

fn relabel<S>(automaton: &Automaton<S>) -> Degeneralized<S>
where
    S: Clone + Debug + Eq + Hash + Ord,
{
    debug!(
        target: "rabin-degeneralization",
        "Automaton with {} state(s) already has Rabin acceptance.",
        automaton.size()
    );

    Degeneralized {
        automaton: automaton.map_states(|state| DegeneralizedState::plain(state.clone())),
        correspondence: automaton
            .states()
            .map(|state| (state.clone(), DegeneralizedState::plain(state.clone())))
            .collect(),
    }
}

/// Collects the canonical states, the edges inside components and the edges
/// between components until every component has been processed.
struct Stitcher {
    canonical: Vec<Option<ProductState>>,
    states: Vec<ProductState>,
    edges: Vec<(ProductState, ValuationSet, Edge<ProductState>)>,
    /// edges between components by source and original successor
    transient: BTreeMap<(ProductState, usize), ValuationSet>,
}

impl Stitcher {
    fn new(size: usize) -> Self {
        Stitcher {
            canonical: vec![None; size],
            states: Vec::new(),
            edges: Vec::new(),
            transient: BTreeMap::new(),
        }
    }

    fn register(&mut self, state: &ProductState) {
        let slot = &mut self.canonical[state.state];
        assert!(
            slot.is_none(),
            "state {} is mapped by two components",
            state.state
        );
        *slot = Some(state.clone());
    }

    fn add_leaving(&mut self, source: &ProductState, target: usize, valuations: &ValuationSet) {
        self.transient
            .entry((source.clone(), target))
            .or_insert_with(ValuationSet::empty)
            .union_with(valuations);
    }

    fn add_transient<S>(&mut self, automaton: &Automaton<S>, state: usize)
    where
        S: Clone + Debug + Eq + Hash,
    {
        let product_state = ProductState::plain(state);
        self.register(&product_state);
        for (edge, valuations) in automaton.edges_at(state) {
            self.add_leaving(&product_state, *edge.successor(), valuations);
        }
        self.states.push(product_state);
    }

    fn add_component(&mut self, product: &LocalProduct, bottom: &[usize]) {
        // the smallest kept product state of every original state is its image
        let mut images = BTreeMap::new();
        for state in bottom.iter().filter_map(|&id| product.state(id)) {
            let image = images.entry(state.state).or_insert(state);
            if state < *image {
                *image = state;
            }
        }
        for image in images.values() {
            self.register(image);
        }

        for &id in bottom {
            let source = match product.state(id) {
                Some(source) => source,
                None => continue,
            };
            for (valuations, edge) in product.edges(id) {
                if let Some(target) = product.state(*edge.successor()) {
                    self.edges.push((
                        source.clone(),
                        valuations.clone(),
                        edge.with_successor(target.clone()),
                    ));
                }
            }
            for (target, valuations) in product.leaving(id) {
                self.add_leaving(source, *target, valuations);
            }
            self.states.push(source.clone());
        }
    }

    fn finish<S>(
        self,
        automaton: &Automaton<S>,
        acceptance: RabinAcceptance,
        trim: bool,
    ) -> Result<Degeneralized<S>, DegeneralizationError>
    where
        S: Clone + Debug + Eq + Hash + Ord,
    {
        let Stitcher {
            canonical,
            states,
            edges,
            transient,
        } = self;

        let canonical: Vec<ProductState> = canonical
            .into_iter()
            .enumerate()
            .map(|(state, image)| match image {
                Some(image) => image,
                None => panic!("state {} has no canonical image", state),
            })
            .collect();

        let originals: Vec<S> = automaton.states().cloned().collect();
        let resolve = |state: &ProductState| {
            DegeneralizedState::new(originals[state.state].clone(), state.awaited.to_vec())
        };

        let mut builder =
            AutomatonBuilder::new(OmegaAcceptance::Rabin(acceptance), automaton.propositions());
        for &initial in automaton.initial_indices() {
            builder.add_initial_state(resolve(&canonical[initial]));
        }
        for state in &states {
            builder.add_state(resolve(state));
        }
        for (source, valuations, edge) in edges {
            builder.add_edge(resolve(&source), valuations, edge.map(|target| resolve(&target)));
        }

        trace!(
            target: "rabin-degeneralization",
            "Stitching {} edge(s) between components.",
            transient.len()
        );
        for ((source, target), valuations) in transient {
            builder.add_edge(
                resolve(&source),
                valuations,
                Edge::uncoloured(resolve(&canonical[target])),
            );
        }

        let mut result = builder.build()?;
        if trim {
            result = result.trim();
        }

        let correspondence = originals
            .iter()
            .cloned()
            .zip(canonical.iter().map(|image| resolve(image)))
            .filter(|(_, image)| result.state_index(image).is_some())
            .collect();

        Ok(Degeneralized {
            automaton: result,
            correspondence,
        })
    }
}
