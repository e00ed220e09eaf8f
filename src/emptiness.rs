//! Language emptiness of omega-automata with arbitrary acceptance.
//!
//! The acceptance condition is brought into disjunctive normal form. A clause
//! `Fin(F) & Inf(I)` is satisfiable iff some reachable component of the
//! automaton without the edges marked in `F` has a cycle and covers all marks
//! of `I` with its internal edges.

use bit_set::BitSet;
use log::{debug, trace};
use std::fmt::Debug;
use std::hash::Hash;

use crate::acceptance::Clause;
use crate::automaton::Automaton;
use crate::scc;

/// Checks whether no run of `automaton` from an initial state is accepting.
pub fn is_empty<S>(automaton: &Automaton<S>) -> bool
where
    S: Clone + Debug + Eq + Hash,
{
    let clauses = automaton.acceptance().expression().clauses();
    let reachable = automaton.reachable_indices();

    debug!(
        target: "emptiness",
        "Checking {} clause(s) over {} reachable state(s).",
        clauses.len(),
        reachable.len()
    );

    !clauses
        .iter()
        .any(|clause| has_accepting_component(automaton, &reachable, clause))
}

fn has_accepting_component<S>(automaton: &Automaton<S>, reachable: &[usize], clause: &Clause) -> bool
where
    S: Clone + Debug + Eq + Hash,
{
    let allowed = |colours: &BitSet| colours.is_disjoint(&clause.fin);
    let successors = |state: usize| {
        automaton
            .edges_at(state)
            .filter(|(edge, _)| allowed(edge.colours()))
            .map(|(edge, _)| *edge.successor())
            .collect::<Vec<_>>()
    };

    let components = scc::compute_sccs(reachable.iter().cloned(), successors);
    let accepting = components.iter().find(|component| {
        if scc::is_transient(component, successors) {
            return false;
        }

        let mut marks = BitSet::new();
        for &state in component.iter() {
            for (edge, _) in automaton.edges_at(state) {
                if allowed(edge.colours()) && component.binary_search(edge.successor()).is_ok() {
                    marks.union_with(edge.colours());
                }
            }
        }
        clause.inf.is_subset(&marks)
    });

    if let Some(component) = accepting {
        trace!(
            target: "emptiness",
            "Component of {} state(s) satisfies a clause.",
            component.len()
        );
    }
    accepting.is_some()
}
