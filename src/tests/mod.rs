use crate::acceptance::*;
use crate::automaton::*;
use crate::config::*;
use crate::degeneralization::rabin::{degeneralize, DegeneralizedState, RabinDegeneralization};
use crate::degeneralization::DegeneralizationError;
use crate::emptiness::is_empty;

fn generalized(pairs: Vec<(Option<usize>, Vec<usize>)>) -> OmegaAcceptance {
    OmegaAcceptance::GeneralizedRabin(GeneralizedRabinAcceptance::from_pairs(pairs).unwrap())
}

fn plain_pairs(automaton: &Automaton<DegeneralizedState<usize>>) -> Vec<RabinPair> {
    match *automaton.acceptance() {
        OmegaAcceptance::Rabin(ref rabin) => rabin.pairs().to_vec(),
        ref other => panic!("expected Rabin acceptance, got {}", other),
    }
}

/// Follows the edges labelled with `valuations` from the only initial state
/// and collects the colours seen on the way.
fn walk(
    automaton: &Automaton<DegeneralizedState<usize>>,
    valuations: &[usize],
) -> Vec<Vec<usize>> {
    let mut state = automaton.initial_states().next().unwrap().clone();
    let mut seen = Vec::new();
    for &valuation in valuations {
        let edges = automaton.edges_for(&state, valuation);
        assert_eq!(edges.len(), 1);
        seen.push(edges[0].colours().iter().collect());
        state = edges[0].successor().clone();
    }
    seen
}

#[test]
fn test_single_inf_loop_is_accepting() {
    let mut builder = Automaton::builder(generalized(vec![(None, vec![0])]), 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![0]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    let state = DegeneralizedState::new(0, vec![0]);
    assert_eq!(result.automaton.size(), 1);
    assert_eq!(
        result.automaton.edges(&state),
        vec![(ValuationSet::universe(0), Edge::of(state.clone(), vec![1]))]
    );
    assert_eq!(plain_pairs(&result.automaton).len(), 1);
    assert!(!is_empty(&result.automaton));
}

#[test]
fn test_round_robin_over_two_inf_marks() {
    // a = valuation 0 carries Inf(0), b = valuation 1 carries Inf(1)
    let mut builder = Automaton::builder(generalized(vec![(None, vec![0, 1])]), 1);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::of(vec![0]), Edge::of(0, vec![0]));
    builder.add_edge(0, ValuationSet::of(vec![1]), Edge::of(0, vec![1]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    assert_eq!(result.automaton.size(), 2);
    let none: Vec<usize> = Vec::new();
    assert_eq!(
        walk(&result.automaton, &[0, 1, 0, 1, 0, 1]),
        vec![none.clone(), vec![1], none.clone(), vec![1], none.clone(), vec![1]]
    );
    // b before a does not complete a round
    assert_eq!(
        walk(&result.automaton, &[1, 1, 0, 0, 1]),
        vec![none.clone(), none.clone(), none.clone(), none, vec![1]]
    );
}

#[test]
fn test_fin_resets_counter() {
    // a = Inf(1), b = Inf(2), f = Fin(0)
    let mut builder = Automaton::builder(generalized(vec![(Some(0), vec![1, 2])]), 2);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::of(vec![0]), Edge::of(0, vec![1]));
    builder.add_edge(0, ValuationSet::of(vec![1]), Edge::of(0, vec![2]));
    builder.add_edge(0, ValuationSet::of(vec![2]), Edge::of(0, vec![0]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    let none: Vec<usize> = Vec::new();
    assert_eq!(
        walk(&result.automaton, &[0, 2, 1, 0, 1]),
        vec![none.clone(), vec![0], none.clone(), none, vec![1]]
    );
    assert_eq!(result.image(&0), Some(&DegeneralizedState::new(0, vec![0])));
}

#[test]
fn test_transient_states_carry_no_marks() {
    let mut builder = Automaton::builder(generalized(vec![(None, vec![0])]), 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(1, vec![0]));
    builder.add_edge(1, ValuationSet::universe(0), Edge::of(1, vec![0]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    assert_eq!(
        result.automaton.edges(&DegeneralizedState::plain(0)),
        vec![(
            ValuationSet::universe(0),
            Edge::uncoloured(DegeneralizedState::new(1, vec![0]))
        )]
    );
    assert_eq!(result.image(&0), Some(&DegeneralizedState::plain(0)));
    assert_eq!(
        result.automaton.initial_states().collect::<Vec<_>>(),
        vec![&DegeneralizedState::plain(0)]
    );
}

#[test]
fn test_single_inf_pairs_keep_structure() {
    let acceptance = generalized(vec![(Some(0), vec![1]), (Some(2), vec![3])]);
    let mut builder = Automaton::builder(acceptance, 1);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(1), Edge::of(1, vec![1]));
    builder.add_edge(1, ValuationSet::of(vec![0]), Edge::of(2, vec![0, 3]));
    builder.add_edge(1, ValuationSet::of(vec![1]), Edge::of(1, vec![2]));
    builder.add_edge(2, ValuationSet::of(vec![0]), Edge::uncoloured(0));
    builder.add_edge(2, ValuationSet::of(vec![1]), Edge::of(2, vec![3]));
    let input = builder.build().unwrap();
    let result = degeneralize(&input).unwrap();

    assert_eq!(result.automaton.size(), input.size());
    assert_eq!(plain_pairs(&result.automaton).len(), 2);
    for state in input.states() {
        let image = result.image(state).unwrap();
        assert_eq!(image.awaited, vec![0, 0]);
        let mut expected: Vec<_> = input
            .edges(state)
            .into_iter()
            .map(|(valuations, edge)| {
                let successor = result.image(edge.successor()).unwrap().clone();
                (valuations, edge.with_successor(successor))
            })
            .collect();
        let mut actual = result.automaton.edges(image);
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_rabin_input_is_relabelled() {
    let mut builder = Automaton::builder(OmegaAcceptance::Rabin(RabinAcceptance::of(1)), 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![0, 1]));
    let input = builder.build().unwrap();
    let result = degeneralize(&input).unwrap();

    assert_eq!(result.automaton.acceptance(), input.acceptance());
    assert_eq!(
        result.automaton.edges(&DegeneralizedState::plain(0)),
        vec![(
            ValuationSet::universe(0),
            Edge::of(DegeneralizedState::plain(0), vec![0, 1])
        )]
    );
}

#[test]
fn test_vacuous_pairs_are_dropped() {
    let acceptance = generalized(vec![(None, vec![]), (None, vec![0]), (None, vec![])]);
    let mut builder = Automaton::builder(acceptance, 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![0]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    assert_eq!(plain_pairs(&result.automaton).len(), 1);
    assert_eq!(result.automaton.acceptance().acceptance_sets(), 2);
}

#[test]
fn test_output_pairs_are_packed() {
    let acceptance = generalized(vec![
        (Some(0), vec![1, 2]),
        (Some(3), vec![]),
        (None, vec![4]),
    ]);
    let mut builder = Automaton::builder(acceptance, 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![1, 2, 4]));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    let pairs = plain_pairs(&result.automaton);
    assert_eq!(pairs.len(), 3);
    for (i, pair) in pairs.iter().enumerate() {
        assert_eq!((pair.fin_index(), pair.inf_index()), (2 * i, 2 * i + 1));
    }
}

#[test]
fn test_pairs_spread_over_components_are_not_tracked() {
    // Inf(0) only in {0}, Inf(1) only in {1}
    let mut builder = Automaton::builder(generalized(vec![(None, vec![0, 1])]), 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::of(0, vec![0]));
    builder.add_edge(0, ValuationSet::universe(0), Edge::uncoloured(1));
    builder.add_edge(1, ValuationSet::universe(0), Edge::of(1, vec![1]));
    let input = builder.build().unwrap();
    let result = degeneralize(&input).unwrap();

    assert!(is_empty(&input));
    assert!(is_empty(&result.automaton));
    for state in result.automaton.states() {
        assert!(state.awaited.is_empty());
        for (_, edge) in result.automaton.edges(state) {
            assert!(edge.colours().is_empty());
        }
    }
}

#[test]
fn test_correspondence_is_total() {
    let mut builder = Automaton::builder(generalized(vec![(None, vec![0, 1])]), 1);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::of(vec![0]), Edge::of(1, vec![0]));
    builder.add_edge(0, ValuationSet::of(vec![1]), Edge::uncoloured(2));
    builder.add_edge(1, ValuationSet::universe(1), Edge::of(0, vec![1]));
    builder.add_edge(2, ValuationSet::universe(1), Edge::uncoloured(2));
    builder.add_edge(3, ValuationSet::universe(1), Edge::uncoloured(0));
    let input = builder.build().unwrap();

    let trimmed = degeneralize(&input).unwrap();
    assert_eq!(trimmed.correspondence.len(), 3);
    for state in input.states().filter(|&&state| state != 3) {
        let image = trimmed.image(state).unwrap();
        assert!(trimmed.automaton.state_index(image).is_some());
    }
    assert_eq!(trimmed.image(&3), None);

    let config = DegeneralizationConfig {
        trim: false,
        ..DegeneralizationConfig::default()
    };
    let untrimmed = RabinDegeneralization::new(config).run(&input).unwrap();
    assert_eq!(untrimmed.correspondence.len(), input.size());
    for (state, image) in &trimmed.correspondence {
        assert_eq!(untrimmed.image(state), Some(image));
    }
    for image in untrimmed.correspondence.values() {
        assert!(untrimmed.automaton.state_index(image).is_some());
    }
}

#[test]
fn test_exploration_settings_agree_on_language() {
    let mut builder = Automaton::builder(generalized(vec![(Some(0), vec![1, 2])]), 2);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::of(vec![0]), Edge::of(1, vec![1]));
    builder.add_edge(0, ValuationSet::of(vec![1, 2]), Edge::of(0, vec![2]));
    builder.add_edge(1, ValuationSet::of(vec![0]), Edge::of(0, vec![0, 2]));
    builder.add_edge(1, ValuationSet::of(vec![1, 3]), Edge::of(1, vec![2]));
    let input = builder.build().unwrap();

    let settings = vec![
        (ExplorationOrder::DepthFirst, BottomSccChoice::SmallestState),
        (ExplorationOrder::BreadthFirst, BottomSccChoice::SmallestState),
        (ExplorationOrder::DepthFirst, BottomSccChoice::FirstFound),
        (ExplorationOrder::BreadthFirst, BottomSccChoice::FirstFound),
    ];
    for (exploration, bottom_scc) in settings {
        let config = DegeneralizationConfig {
            exploration,
            bottom_scc,
            trim: true,
        };
        let result = RabinDegeneralization::new(config).run(&input).unwrap();
        assert_eq!(is_empty(&result.automaton), is_empty(&input));
        assert_eq!(result.correspondence.len(), 2);
    }
}

#[test]
fn test_co_buchi_becomes_fin_only_pair() {
    let mut builder = Automaton::builder(OmegaAcceptance::CoBuchi, 1);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::of(vec![0]), Edge::of(0, vec![0]));
    builder.add_edge(0, ValuationSet::of(vec![1]), Edge::uncoloured(0));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    let state = DegeneralizedState::new(0, Vec::new());
    assert_eq!(
        result.automaton.edges_for(&state, 0),
        vec![Edge::of(state.clone(), vec![0])]
    );
    assert_eq!(
        result.automaton.edges_for(&state, 1),
        vec![Edge::of(state.clone(), vec![1])]
    );
    assert!(!is_empty(&result.automaton));
}

#[test]
fn test_all_acceptance_accepts_every_cycle() {
    let mut builder = Automaton::builder(OmegaAcceptance::All, 0);
    builder.add_initial_state(0);
    builder.add_edge(0, ValuationSet::universe(0), Edge::uncoloured(0));
    let result = degeneralize(&builder.build().unwrap()).unwrap();

    assert_eq!(plain_pairs(&result.automaton).len(), 1);
    assert!(!is_empty(&result.automaton));
}

#[test]
fn test_parity_is_unsupported() {
    let acceptance = OmegaAcceptance::Parity(ParityAcceptance::new(3, ParityKind::MinEven));
    let automaton = Automaton::<usize>::builder(acceptance, 0).build().unwrap();
    assert_eq!(
        degeneralize(&automaton).unwrap_err(),
        DegeneralizationError::UnsupportedAcceptance("parity".to_string())
    );
}

#[test]
fn test_omega_acceptance_views() {
    let buchi = OmegaAcceptance::GeneralizedBuchi { sets: 2 };
    assert_eq!(buchi.expression().to_string(), "Inf(0) & Inf(1)");
    assert_eq!(buchi.to_generalized_rabin().unwrap().expression(), buchi.expression());
    assert_eq!(buchi.to_string(), "generalized-Buchi 2");

    let inf_both: bit_set::BitSet = vec![0, 1].into_iter().collect();
    assert!(buchi.is_accepting(&inf_both));
    assert!(!OmegaAcceptance::CoBuchi.is_accepting(&inf_both));
    assert!(OmegaAcceptance::CoBuchi.is_well_formed_edge(&Edge::of(0, vec![0])));
    assert!(!OmegaAcceptance::CoBuchi.is_well_formed_edge(&Edge::of(0, vec![1])));

    assert_eq!(
        OmegaAcceptance::Rabin(RabinAcceptance::of(1))
            .to_generalized_rabin()
            .unwrap()
            .expression(),
        RabinAcceptance::of(1).expression()
    );
    assert!(OmegaAcceptance::None.to_generalized_rabin().unwrap().pairs().is_empty());
    assert_eq!(
        OmegaAcceptance::All.to_generalized_rabin().unwrap().expression(),
        AcceptanceExpression::Fin(0)
    );
    assert!(OmegaAcceptance::Parity(ParityAcceptance::new(2, ParityKind::MaxOdd))
        .to_generalized_rabin()
        .is_none());
}
