use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::errors::{ConsistencyError, Error};

/// Identifier type for automaton states.
pub type StateId = u32;

/// Deterministic finite automaton over a partial transition function.
///
/// `(Q, Σ, δ, q₀, F)` where `Q` is a nonempty set of state ids, `Σ` is a
/// set of opaque symbols, `δ: Q × Σ ⇀ Q` is partial, `q₀ ∈ Q` is the start
/// state, and `F ⊆ Q` is the set of accepting states. Values of this type
/// are never mutated after construction; no method checks `Q`/`F`/`δ` for
/// mutual consistency (see [`Dfa::check_consistency`] for an opt-in
/// diagnostic).
///
/// `Sym` models an opaque hashable alphabet symbol rather than a fixed
/// `char` alphabet, per the source's "symbols must be hashable objects".
#[derive(Debug, Clone)]
pub struct Dfa<Sym> {
    /// All state identifiers.
    pub states: IndexSet<StateId>,
    /// Accepting state identifiers (subset of `states`).
    pub finals: IndexSet<StateId>,
    /// Alphabet symbols.
    pub sigma: IndexSet<Sym>,
    /// Start state identifier (member of `states`).
    pub start: StateId,
    /// Partial transition function: `delta[q][a] == r` iff there is a
    /// transition from `q` to `r` on `a`.
    pub delta: IndexMap<StateId, IndexMap<Sym, StateId>>,
}

impl<Sym> Dfa<Sym>
where
    Sym: Copy + Eq + Hash + Ord,
{
    /// Builds a DFA from its five components. No validation is performed;
    /// callers are responsible for consistency (or may call
    /// [`check_consistency`](Self::check_consistency) afterwards).
    pub fn new(
        states: impl IntoIterator<Item = StateId>,
        finals: impl IntoIterator<Item = StateId>,
        sigma: impl IntoIterator<Item = Sym>,
        start: StateId,
        delta: IndexMap<StateId, IndexMap<Sym, StateId>>,
    ) -> Self {
        Self {
            states: states.into_iter().collect(),
            finals: finals.into_iter().collect(),
            sigma: sigma.into_iter().collect(),
            start,
            delta,
        }
    }

    /// Checks that the start state, every final state, and every
    /// transition endpoint belong to `states`. Returns the first
    /// inconsistency found, in that order; not called anywhere else in
    /// this crate (construction performs no validation by design).
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        if !self.states.contains(&self.start) {
            return Err(ConsistencyError::UnknownStart(self.start));
        }
        for &f in &self.finals {
            if !self.states.contains(&f) {
                return Err(ConsistencyError::UnknownFinal(f));
            }
        }
        for (q, a, r) in self.iterate() {
            if !self.states.contains(&q) {
                return Err(ConsistencyError::UnknownSource(q));
            }
            let _ = a;
            if !self.states.contains(&r) {
                return Err(ConsistencyError::UnknownTarget(r));
            }
        }
        Ok(())
    }

    /// Yields every transition as a `(q, a, r)` triple, in a fixed order
    /// (insertion order of `delta`'s outer and inner maps).
    pub fn iterate(&self) -> impl Iterator<Item = (StateId, Sym, StateId)> + '_ {
        self.delta
            .iter()
            .flat_map(|(&q, row)| row.iter().map(move |(&a, &r)| (q, a, r)))
    }

    /// The set of states reachable in exactly one step from some state in
    /// `states` consuming some symbol in `symbols`.
    ///
    /// Fixes a transcription bug in the source (`a in self.deltq[a]`,
    /// nonsensical self-indexing); the correct semantics are
    /// `{δ[q][a] : q ∈ states, a ∈ symbols, q ∈ dom(δ), a ∈ dom(δ[q])}`.
    pub fn transition(
        &self,
        states: impl IntoIterator<Item = StateId>,
        symbols: impl IntoIterator<Item = Sym>,
    ) -> HashSet<StateId> {
        let states: Vec<StateId> = states.into_iter().collect();
        let symbols: Vec<Sym> = symbols.into_iter().collect();

        let mut out = HashSet::new();
        for &q in &states {
            let Some(row) = self.delta.get(&q) else {
                continue;
            };
            for &a in &symbols {
                if let Some(&r) = row.get(&a) {
                    out.insert(r);
                }
            }
        }
        out
    }

    /// The set of states reachable from some state in `states` via
    /// repeated transitions on symbols in `symbols`.
    pub fn reachable(
        &self,
        states: impl IntoIterator<Item = StateId>,
        symbols: impl IntoIterator<Item = Sym>,
    ) -> HashSet<StateId> {
        let symbols: Vec<Sym> = symbols.into_iter().collect();
        let mut reached = HashSet::new();
        let mut worklist: Vec<StateId> = states.into_iter().collect();

        while let Some(state) = worklist.pop() {
            if reached.insert(state) {
                let targets = self.transition([state], symbols.iter().copied());
                worklist.extend(targets.into_iter().filter(|t| !reached.contains(t)));
            }
        }

        reached
    }

    /// The set of states that can reach some state in `states` via
    /// repeated transitions on symbols in `symbols`.
    ///
    /// Fixes a source bug where the inverse relation (`inverse[r][a] =
    /// q`) overwrote entries when multiple states transition into `r` on
    /// the same symbol; the inverse relation is many-to-many and
    /// backward traversal unions the sets of predecessors.
    pub fn productive(
        &self,
        states: impl IntoIterator<Item = StateId>,
        symbols: impl IntoIterator<Item = Sym>,
    ) -> HashSet<StateId> {
        let symbols: HashSet<Sym> = symbols.into_iter().collect();

        let mut inverse: HashMap<StateId, HashMap<Sym, Vec<StateId>>> = HashMap::new();
        for (q, a, r) in self.iterate() {
            inverse.entry(r).or_default().entry(a).or_default().push(q);
        }

        let mut reached = HashSet::new();
        let mut worklist: Vec<StateId> = states.into_iter().collect();

        while let Some(state) = worklist.pop() {
            if reached.insert(state) {
                if let Some(preds_by_symbol) = inverse.get(&state) {
                    for &a in &symbols {
                        if let Some(preds) = preds_by_symbol.get(&a) {
                            for &q in preds {
                                if !reached.contains(&q) {
                                    worklist.push(q);
                                }
                            }
                        }
                    }
                }
            }
        }

        reached
    }

    /// Left unimplemented, as in the source this crate is modeled on.
    /// Returns a distinguished error rather than panicking or silently
    /// no-op'ing, so callers can match on the missing operation instead
    /// of mistaking it for success.
    pub fn validate(&self) -> Result<(), Error> {
        Err(Error::NotImplemented("validate"))
    }

    /// Left unimplemented, as in the source this crate is modeled on.
    /// See [`validate`](Self::validate) for why this is an error rather
    /// than a no-op.
    pub fn complete(&self, _symbols: impl IntoIterator<Item = Sym>) -> Result<Dfa<Sym>, Error> {
        Err(Error::NotImplemented("complete"))
    }

    /// Generalized synchronous product of `self` and `other`, with
    /// respect to a boolean combiner `f`. A product state `(q, r)` is
    /// accepting iff `f(q ∈ self.finals, r ∈ other.finals)`. Undefined
    /// transitions on either side are modeled by a single additional
    /// sink pair `(None, None)`, so the result is complete over
    /// `self.sigma ∪ other.sigma`.
    ///
    /// Fixes two source bugs: `worklist.add` (not a `Vec` operation,
    /// presumably intended as `push`), and a missing discovery guard —
    /// here a product pair's index is inserted into `states` in the same
    /// step it is first discovered, before ever being queued, so no pair
    /// is indexed twice regardless of traversal order.
    pub fn product<F>(&self, other: &Dfa<Sym>, f: F) -> Dfa<Sym>
    where
        F: Fn(bool, bool) -> bool,
    {
        let sigma: IndexSet<Sym> = self.sigma.iter().chain(other.sigma.iter()).copied().collect();

        let mut states: IndexMap<(Option<StateId>, Option<StateId>), StateId> = IndexMap::new();
        let start_pair = (Some(self.start), Some(other.start));
        let mut next_id: StateId = 0;
        states.insert(start_pair, next_id);
        next_id += 1;

        let mut worklist = VecDeque::new();
        worklist.push_back(start_pair);

        let mut delta: IndexMap<StateId, IndexMap<Sym, StateId>> = IndexMap::new();

        while let Some((q1, r1)) = worklist.pop_front() {
            let source = states[&(q1, r1)];
            for &symbol in &sigma {
                let q2 = q1.and_then(|q| self.delta.get(&q)).and_then(|row| row.get(&symbol)).copied();
                let r2 = r1.and_then(|r| other.delta.get(&r)).and_then(|row| row.get(&symbol)).copied();

                let target = match states.get(&(q2, r2)) {
                    Some(&id) => id,
                    None => {
                        let id = next_id;
                        next_id += 1;
                        states.insert((q2, r2), id);
                        worklist.push_back((q2, r2));
                        id
                    }
                };

                delta.entry(source).or_default().insert(symbol, target);
            }
        }

        let finals = states
            .iter()
            .filter(|((q1, r1), _)| {
                let in_self = q1.is_some_and(|q| self.finals.contains(&q));
                let in_other = r1.is_some_and(|r| other.finals.contains(&r));
                f(in_self, in_other)
            })
            .map(|(_, &id)| id)
            .collect::<Vec<_>>();

        Dfa::new(
            states.values().copied(),
            finals,
            sigma,
            0,
            delta,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dfa_a_or_b() -> Dfa<char> {
        // 0 --a--> 1 (accepting), 0 --b--> 2 (accepting)
        let mut delta = IndexMap::new();
        let mut row0 = IndexMap::new();
        row0.insert('a', 1);
        row0.insert('b', 2);
        delta.insert(0, row0);
        Dfa::new([0, 1, 2], [1, 2], ['a', 'b'], 0, delta)
    }

    #[test]
    fn iterate_yields_every_transition() {
        let dfa = dfa_a_or_b();
        let mut triples: Vec<_> = dfa.iterate().collect();
        triples.sort();
        assert_eq!(triples, vec![(0, 'a', 1), (0, 'b', 2)]);
    }

    #[test]
    fn transition_follows_intended_semantics() {
        let dfa = dfa_a_or_b();
        let out = dfa.transition([0], ['a']);
        assert_eq!(out, HashSet::from([1]));

        let out = dfa.transition([0], ['a', 'b']);
        assert_eq!(out, HashSet::from([1, 2]));

        // no transitions defined from state 1
        let out = dfa.transition([1], ['a', 'b']);
        assert!(out.is_empty());
    }

    #[test]
    fn reachable_computes_forward_closure() {
        let dfa = dfa_a_or_b();
        let out = dfa.reachable([0], ['a', 'b']);
        assert_eq!(out, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn productive_unions_multiple_predecessors() {
        // 0 --a--> 2, 1 --a--> 2: both 0 and 1 are productive toward {2}.
        let mut delta = IndexMap::new();
        let mut row0 = IndexMap::new();
        row0.insert('a', 2);
        delta.insert(0, row0);
        let mut row1 = IndexMap::new();
        row1.insert('a', 2);
        delta.insert(1, row1);
        let dfa = Dfa::new([0, 1, 2], [2], ['a'], 0, delta);

        let out = dfa.productive([2], ['a']);
        assert_eq!(out, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn validate_and_complete_report_not_implemented() {
        let dfa = dfa_a_or_b();
        assert_eq!(dfa.validate(), Err(Error::NotImplemented("validate")));
        assert!(matches!(
            dfa.complete(['a', 'b']),
            Err(Error::NotImplemented("complete"))
        ));
    }

    #[test]
    fn check_consistency_detects_unknown_start() {
        let mut delta: IndexMap<StateId, IndexMap<char, StateId>> = IndexMap::new();
        delta.insert(0, IndexMap::new());
        let dfa = Dfa::new([0], [], ['a'], 9, delta);
        assert_eq!(
            dfa.check_consistency(),
            Err(ConsistencyError::UnknownStart(9))
        );
    }

    #[test]
    fn product_is_complete_over_union_alphabet() {
        let a_star = {
            let mut delta = IndexMap::new();
            let mut row0 = IndexMap::new();
            row0.insert('a', 0);
            delta.insert(0, row0);
            Dfa::new([0], [0], ['a'], 0, delta)
        };
        let b_star = {
            let mut delta = IndexMap::new();
            let mut row0 = IndexMap::new();
            row0.insert('b', 0);
            delta.insert(0, row0);
            Dfa::new([0], [0], ['b'], 0, delta)
        };

        let prod = a_star.product(&b_star, |x, y| x && y);
        assert_eq!(prod.sigma.len(), 2);
        for &state in &prod.states {
            for &symbol in &prod.sigma {
                assert!(prod.delta[&state].contains_key(&symbol));
            }
        }
    }
}
