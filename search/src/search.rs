//! Lazy exploration of a graph given by initial nodes and a successor
//! function.

use std::collections::{BTreeSet, VecDeque};

use crate::agenda::Agenda;

/// An `Iterator` over the nodes of a graph. Every node that is returned has
/// had its successors pushed onto the agenda.
pub struct Search<A, F> {
    agenda: A,
    successors: F,
}

impl<A, F> Search<A, F> {
    pub fn with_agenda(agenda: A, successors: F) -> Self {
        Search { agenda, successors }
    }

    /// Returns every node at most once, comparing nodes by `Ord`. A node whose
    /// successors were expanded is never expanded again, so the exploration
    /// terminates on finite graphs with cycles.
    pub fn uniques(self) -> Uniques<A, F>
    where
        A: Agenda,
        A::Item: Ord,
    {
        Uniques {
            search: self,
            visited: BTreeSet::new(),
        }
    }
}

impl<I, F> Search<Vec<I>, F> {
    /// Depth-first order.
    pub fn dfs<II: IntoIterator<Item = I>>(initials: II, successors: F) -> Self {
        Search::with_agenda(initials.into_iter().collect(), successors)
    }
}

impl<I, F> Search<VecDeque<I>, F> {
    /// Breadth-first order.
    pub fn bfs<II: IntoIterator<Item = I>>(initials: II, successors: F) -> Self {
        Search::with_agenda(initials.into_iter().collect(), successors)
    }
}

impl<A, F, II> Iterator for Search<A, F>
where
    A: Agenda,
    F: FnMut(&A::Item) -> II,
    II: IntoIterator<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        let node = self.agenda.pop()?;
        self.agenda.extend((self.successors)(&node));
        Some(node)
    }
}

/// A `Search` that skips nodes it has already returned.
pub struct Uniques<A: Agenda, F> {
    search: Search<A, F>,
    visited: BTreeSet<A::Item>,
}

impl<A: Agenda, F> Uniques<A, F> {
    /// The nodes returned so far.
    pub fn visited(&self) -> &BTreeSet<A::Item> {
        &self.visited
    }
}

impl<A, F, II> Iterator for Uniques<A, F>
where
    A: Agenda,
    A::Item: Clone + Ord,
    F: FnMut(&A::Item) -> II,
    II: IntoIterator<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        let Uniques {
            ref mut search,
            ref mut visited,
        } = *self;

        // a node may be pushed several times before it is expanded
        while let Some(node) = search.agenda.pop() {
            if visited.insert(node.clone()) {
                let fresh = (search.successors)(&node)
                    .into_iter()
                    .filter(|successor| !visited.contains(successor));
                search.agenda.extend(fresh);
                return Some(node);
            }
        }
        None
    }
}
