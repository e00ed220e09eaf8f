use serde::{Deserialize, Serialize};

/// The agenda used while exploring the product of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplorationOrder {
    DepthFirst,
    BreadthFirst,
}

impl Default for ExplorationOrder {
    fn default() -> Self {
        ExplorationOrder::DepthFirst
    }
}

/// Which bottom component of a local product is kept when there are several.
/// Every choice yields an automaton with the same language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BottomSccChoice {
    /// The component containing the smallest product state, ordering states
    /// by their original state and then by their counters.
    SmallestState,
    /// The first bottom component found by the decomposition.
    FirstFound,
}

impl Default for BottomSccChoice {
    fn default() -> Self {
        BottomSccChoice::SmallestState
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DegeneralizationConfig {
    pub exploration: ExplorationOrder,
    pub bottom_scc: BottomSccChoice,
    /// Restrict the result to states reachable from the initial states.
    pub trim: bool,
}

impl Default for DegeneralizationConfig {
    fn default() -> Self {
        DegeneralizationConfig {
            exploration: ExplorationOrder::default(),
            bottom_scc: BottomSccChoice::default(),
            trim: true,
        }
    }
}
