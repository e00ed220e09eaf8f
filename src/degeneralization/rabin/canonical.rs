use log::trace;

use super::breakpoint::LocalProduct;
use crate::config::BottomSccChoice;
use crate::scc;

/// Picks the bottom component of an explored local product whose states
/// become the canonical copies of the original component. Returns sorted
/// local handles.
pub(crate) fn bottom_component(product: &LocalProduct, choice: BottomSccChoice) -> Vec<usize> {
    let successors = |id: usize| product.successors(id);
    let decomposition = scc::SccDecomposition::new(0..product.size(), successors);
    let mut bottoms = decomposition
        .bottom_components(successors)
        .into_iter()
        .map(|index| &decomposition.components()[index]);

    let chosen = match choice {
        BottomSccChoice::FirstFound => bottoms.next(),
        BottomSccChoice::SmallestState => bottoms.min_by(|left, right| {
            let smallest = |component: &&Vec<usize>| {
                component.iter().filter_map(|&id| product.state(id)).min()
            };
            smallest(left).cmp(&smallest(right))
        }),
    };

    match chosen {
        Some(component) => {
            trace!(
                target: "rabin-degeneralization",
                "Kept a bottom component with {} of {} product state(s).",
                component.len(),
                product.size()
            );
            component.clone()
        }
        None => panic!("local product without a bottom component"),
    }
}
