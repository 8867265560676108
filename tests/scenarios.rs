//! End-to-end scenarios exercising minimization, equivalence, and
//! isomorphism together on hand-built automata.

use indexmap::IndexMap;
use valmari_dfa::isomorphic;
use valmari_dfa::{Dfa, StateId};

fn dfa_from_pairs(
    states: &[StateId],
    finals: &[StateId],
    sigma: &[char],
    start: StateId,
    edges: &[(StateId, char, StateId)],
) -> Dfa<char> {
    let mut delta: IndexMap<StateId, IndexMap<char, StateId>> = IndexMap::new();
    for &(q, a, r) in edges {
        delta.entry(q).or_default().insert(a, r);
    }
    Dfa::new(
        states.iter().copied(),
        finals.iter().copied(),
        sigma.iter().copied(),
        start,
        delta,
    )
}

/// "Contains an even number of a's and ends right after the last a was
/// seen an even number of times" style automaton with several
/// dead-looking branches, used to exercise unreachable/unproductive
/// pruning together with refinement.
fn branching_automaton() -> Dfa<char> {
    dfa_from_pairs(
        &[0, 1, 2, 3, 4, 5],
        &[3, 4],
        &['a', 'b'],
        0,
        &[
            (0, 'a', 1),
            (0, 'b', 2),
            (1, 'a', 3),
            (1, 'b', 5),
            (2, 'a', 4),
            (2, 'b', 5),
            (3, 'a', 5),
            (3, 'b', 5),
            (4, 'a', 5),
            (4, 'b', 5),
            (5, 'a', 5),
            (5, 'b', 5),
        ],
    )
}

#[test]
fn minimized_form_is_equivalent_to_the_original() {
    let dfa = branching_automaton();
    let min = dfa.minimize_valmari();
    let (eq, witness) = dfa.equivalent_hopcroft_karp(&min);
    assert!(eq, "minimization changed the recognized language");
    assert!(witness.is_none());
}

#[test]
fn two_independently_minimized_equivalent_dfas_are_isomorphic() {
    // Two DFAs for "the string ends in 'a'", built with different
    // redundant state counts.
    let sparse = dfa_from_pairs(
        &[0, 1],
        &[1],
        &['a', 'b'],
        0,
        &[(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 0)],
    );
    let padded = dfa_from_pairs(
        &[0, 1, 2, 3],
        &[1, 3],
        &['a', 'b'],
        0,
        &[
            (0, 'a', 1),
            (0, 'b', 2),
            (1, 'a', 3),
            (1, 'b', 2),
            (2, 'a', 1),
            (2, 'b', 2),
            (3, 'a', 3),
            (3, 'b', 2),
        ],
    );

    let min_sparse = sparse.minimize_valmari();
    let min_padded = padded.minimize_valmari();

    assert!(min_sparse.equivalent_hopcroft_karp(&min_padded).0);
    assert!(
        isomorphic(&min_sparse, &min_padded).is_some(),
        "two minimal DFAs of the same language must be isomorphic"
    );
}

#[test]
fn product_intersection_matches_manual_computation() {
    // L1 = strings over {a,b} containing an 'a'; L2 = strings containing
    // a 'b'. Their intersection is "contains both a and b".
    let has_a = dfa_from_pairs(&[0, 1], &[1], &['a', 'b'], 0, &[(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 1)]);
    let has_b = dfa_from_pairs(&[0, 1], &[1], &['a', 'b'], 0, &[(0, 'b', 1), (0, 'a', 0), (1, 'a', 1), (1, 'b', 1)]);

    let intersection = has_a.product(&has_b, |x, y| x && y);
    let expected = dfa_from_pairs(
        &[0, 1, 2, 3],
        &[3],
        &['a', 'b'],
        0,
        &[
            (0, 'a', 1),
            (0, 'b', 2),
            (1, 'a', 1),
            (1, 'b', 3),
            (2, 'a', 3),
            (2, 'b', 2),
            (3, 'a', 3),
            (3, 'b', 3),
        ],
    );

    assert!(intersection.equivalent_hopcroft_karp(&expected).0);
}

#[test]
fn unreachable_and_unproductive_states_vanish_after_minimization() {
    let dfa = dfa_from_pairs(
        &[0, 1, 2, 3, 4],
        &[1],
        &['a'],
        0,
        &[
            (0, 'a', 1),
            (1, 'a', 1),
            // 2 is unreachable from 0.
            (2, 'a', 3),
            // 3 can never reach a final state.
            (3, 'a', 3),
            // 4 is an isolated unreachable sink.
            (4, 'a', 4),
        ],
    );
    let min = dfa.minimize_valmari();
    assert_eq!(min.states.len(), 2);
    assert_eq!(min.finals.len(), 1);
}
