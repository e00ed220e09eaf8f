//! Strongly connected components of implicitly given graphs.
//!
//! Components are computed with an iterative version of Tarjan's algorithm and
//! are returned in reverse topological order: a component is listed before
//! every component that can reach it.

use fnv::FnvHashMap;
use log::{debug, trace};
use std::cmp::min;
use std::hash::Hash;
use std::vec;

struct Frame<N> {
    id: usize,
    successors: vec::IntoIter<N>,
}

/// Computes the components reachable from `roots`. The members of every
/// component are sorted.
pub fn compute_sccs<N, R, F, I>(roots: R, mut successors: F) -> Vec<Vec<N>>
where
    N: Copy + Eq + Hash + Ord,
    R: IntoIterator<Item = N>,
    F: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
{
    // nodes are numbered in discovery order, which is also their Tarjan index
    let mut ids: FnvHashMap<N, usize> = FnvHashMap::default();
    let mut nodes: Vec<N> = Vec::new();
    let mut lowlink: Vec<usize> = Vec::new();
    let mut on_stack: Vec<bool> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut call_stack: Vec<Frame<N>> = Vec::new();
    let mut components = Vec::new();

    let mut visit = |node: N,
                     ids: &mut FnvHashMap<N, usize>,
                     nodes: &mut Vec<N>,
                     lowlink: &mut Vec<usize>,
                     on_stack: &mut Vec<bool>,
                     stack: &mut Vec<usize>,
                     call_stack: &mut Vec<Frame<N>>| {
        let id = nodes.len();
        ids.insert(node, id);
        nodes.push(node);
        lowlink.push(id);
        on_stack.push(true);
        stack.push(id);
        call_stack.push(Frame {
            id,
            successors: successors(node).into_iter().collect::<Vec<_>>().into_iter(),
        });
    };

    for root in roots {
        if ids.contains_key(&root) {
            continue;
        }
        visit(
            root,
            &mut ids,
            &mut nodes,
            &mut lowlink,
            &mut on_stack,
            &mut stack,
            &mut call_stack,
        );

        while let Some(frame) = call_stack.last_mut() {
            let id = frame.id;
            match frame.successors.next() {
                Some(successor) => match ids.get(&successor) {
                    Some(&successor_id) => {
                        if on_stack[successor_id] {
                            lowlink[id] = min(lowlink[id], successor_id);
                        }
                    }
                    None => visit(
                        successor,
                        &mut ids,
                        &mut nodes,
                        &mut lowlink,
                        &mut on_stack,
                        &mut stack,
                        &mut call_stack,
                    ),
                },
                None => {
                    call_stack.pop();
                    if lowlink[id] == id {
                        let mut component = Vec::new();
                        while let Some(member) = stack.pop() {
                            on_stack[member] = false;
                            component.push(nodes[member]);
                            if member == id {
                                break;
                            }
                        }
                        component.sort();
                        trace!(target: "scc", "Component #{} with {} node(s).", components.len(), component.len());
                        components.push(component);
                    }
                    if let Some(parent) = call_stack.last() {
                        lowlink[parent.id] = min(lowlink[parent.id], lowlink[id]);
                    }
                }
            }
        }
    }

    debug!(
        target: "scc",
        "Found {} component(s) over {} node(s).",
        components.len(),
        nodes.len()
    );
    components
}

/// A component is transient iff it consists of a single node without a
/// self-loop. No infinite run can visit it infinitely often.
pub fn is_transient<N, F, I>(component: &[N], mut successors: F) -> bool
where
    N: Copy + Eq,
    F: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
{
    match *component {
        [node] => !successors(node).into_iter().any(|successor| successor == node),
        _ => false,
    }
}

/// A component is bottom iff no edge leaves it. `component` must be sorted.
pub fn is_bottom<N, F, I>(component: &[N], mut successors: F) -> bool
where
    N: Copy + Ord,
    F: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
{
    component.iter().all(|&node| {
        successors(node)
            .into_iter()
            .all(|successor| component.binary_search(&successor).is_ok())
    })
}

/// The components of a graph together with the component index of every
/// node.
#[derive(Clone, Debug)]
pub struct SccDecomposition<N: Eq + Hash> {
    components: Vec<Vec<N>>,
    component_of: FnvHashMap<N, usize>,
}

impl<N> SccDecomposition<N>
where
    N: Copy + Eq + Hash + Ord,
{
    pub fn new<R, F, I>(roots: R, successors: F) -> Self
    where
        R: IntoIterator<Item = N>,
        F: FnMut(N) -> I,
        I: IntoIterator<Item = N>,
    {
        let components = compute_sccs(roots, successors);
        let mut component_of = FnvHashMap::default();
        for (index, component) in components.iter().enumerate() {
            for &node in component {
                component_of.insert(node, index);
            }
        }
        SccDecomposition {
            components,
            component_of,
        }
    }

    /// Components in reverse topological order.
    pub fn components(&self) -> &[Vec<N>] {
        &self.components
    }

    pub fn component_of(&self, node: &N) -> Option<usize> {
        self.component_of.get(node).cloned()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Indices of the components without outgoing edges.
    pub fn bottom_components<F, I>(&self, mut successors: F) -> Vec<usize>
    where
        F: FnMut(N) -> I,
        I: IntoIterator<Item = N>,
    {
        (0..self.components.len())
            .filter(|&index| is_bottom(&self.components[index], &mut successors))
            .collect()
    }
}
