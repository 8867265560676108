use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::dfa::{Dfa, StateId};

/// A bijection between the reachable states of two automata, established
/// by [`isomorphic`]. Both directions are kept in sync so callers can
/// translate a state id from either side without re-deriving the map.
#[derive(Debug, Clone, Default)]
pub struct BidirectionalMap {
    forward: HashMap<StateId, StateId>,
    backward: HashMap<StateId, StateId>,
}

impl BidirectionalMap {
    fn insert(&mut self, a: StateId, b: StateId) {
        self.forward.insert(a, b);
        self.backward.insert(b, a);
    }

    /// The state of the right-hand automaton paired with `a`, if any.
    pub fn get(&self, a: StateId) -> Option<StateId> {
        self.forward.get(&a).copied()
    }

    /// The state of the left-hand automaton paired with `b`, if any.
    pub fn get_inverse(&self, b: StateId) -> Option<StateId> {
        self.backward.get(&b).copied()
    }

    /// Number of state pairs in the mapping.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the mapping has no pairs at all.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<Sym> Dfa<Sym>
where
    Sym: Copy + Eq + Hash + Ord,
{
    /// Checks whether the reachable parts of `self` and `other` are
    /// isomorphic as labeled graphs: there is a bijection between their
    /// reachable states matching start to start, final to final, and
    /// transition to transition under every symbol. Returns the
    /// witnessing bijection on success.
    ///
    /// Isomorphism is strictly stronger than language equivalence (see
    /// [`Dfa::equivalent_hopcroft_karp`](crate::dfa::Dfa) via the
    /// [`crate::equivalence`] module): two minimal DFAs for the same
    /// language are always isomorphic, but two equivalent non-minimal
    /// DFAs need not be.
    pub fn isomorphic(&self, other: &Dfa<Sym>) -> Option<BidirectionalMap> {
        isomorphic(self, other)
    }
}

/// Free-function form of [`Dfa::isomorphic`], usable without importing
/// the trait bound at every call site.
///
/// Checks the start pair's final-status agreement up front (rather than
/// discovering the mismatch mid-traversal after partial bookkeeping has
/// already been built), then explores paired BFS over reachable states,
/// failing as soon as a structural mismatch appears: a symbol defined on
/// one side but not the other, a transition that would require mapping
/// a state to two different partners, or a reached pair disagreeing on
/// finality.
pub fn isomorphic<Sym>(a: &Dfa<Sym>, b: &Dfa<Sym>) -> Option<BidirectionalMap>
where
    Sym: Copy + Eq + Hash + Ord,
{
    if a.finals.contains(&a.start) != b.finals.contains(&b.start) {
        return None;
    }

    let mut map = BidirectionalMap::default();
    map.insert(a.start, b.start);

    let mut queue = VecDeque::new();
    queue.push_back((a.start, b.start));

    while let Some((qa, qb)) = queue.pop_front() {
        let row_a = a.delta.get(&qa);
        let row_b = b.delta.get(&qb);

        let symbols_a = row_a.map(|r| r.len()).unwrap_or(0);
        let symbols_b = row_b.map(|r| r.len()).unwrap_or(0);
        if symbols_a != symbols_b {
            return None;
        }

        if let Some(row_a) = row_a {
            for (&symbol, &ra) in row_a {
                let Some(&rb) = row_b.and_then(|row| row.get(&symbol)) else {
                    return None;
                };

                match (map.get(ra), map.get_inverse(rb)) {
                    (Some(mapped_b), Some(mapped_a)) => {
                        if mapped_b != rb || mapped_a != ra {
                            return None;
                        }
                    }
                    (None, None) => {
                        if a.finals.contains(&ra) != b.finals.contains(&rb) {
                            return None;
                        }
                        map.insert(ra, rb);
                        queue.push_back((ra, rb));
                    }
                    _ => return None,
                }
            }
        }
    }

    Some(map)
}
