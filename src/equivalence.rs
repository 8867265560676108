use std::collections::VecDeque;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::dfa::{Dfa, StateId};
use crate::disjoint::DisjointSet;

impl<Sym> Dfa<Sym>
where
    Sym: Copy + Eq + Hash + Ord,
{
    /// Decides language equivalence of `self` and `other` via the
    /// Hopcroft-Karp near-linear algorithm, returning a witness string
    /// (a shortest symbol sequence distinguishing the two languages) when
    /// they disagree.
    ///
    /// Partiality is modeled with a dummy sink per automaton: `d_self =
    /// 1 + max(self.states)`, `d_other = 1 + max(other.states)`. Every
    /// transition undefined on one side lands on that side's dummy
    /// rather than aborting the comparison — a dummy is nonaccepting and
    /// every transition out of it stays in it, so two partial DFAs
    /// compare equal exactly when they accept the same language, matching
    /// total DFAs completed with an implicit dead state. States of
    /// `self` (and its dummy) and `other` (and its dummy) are embedded
    /// disjointly into a single [`DisjointSet`] by offsetting `other`'s
    /// ids by `1 + d_self`, wide enough that no real or dummy id from
    /// either side collides. Iterates over `self.sigma ∪ other.sigma` —
    /// iterating only one side's alphabet cannot distinguish automata
    /// that use disjoint alphabets to encode the same language.
    pub fn equivalent_hopcroft_karp(&self, other: &Dfa<Sym>) -> (bool, Option<Vec<Sym>>) {
        let dummy_self = self.states.iter().copied().max().unwrap_or(0) as i64 + 1;
        let dummy_other = other.states.iter().copied().max().unwrap_or(0) as i64 + 1;
        let offset = dummy_self + 1;

        let key_self = |q: i64| -> i64 { q };
        let key_other = |r: i64| -> i64 { r + offset };

        let is_final_self = |q: i64| -> bool { q != dummy_self && self.finals.contains(&(q as StateId)) };
        let is_final_other = |r: i64| -> bool { r != dummy_other && other.finals.contains(&(r as StateId)) };

        let step_self = |q: i64, a: Sym| -> i64 {
            if q == dummy_self {
                return dummy_self;
            }
            self.delta
                .get(&(q as StateId))
                .and_then(|row| row.get(&a))
                .map(|&next| next as i64)
                .unwrap_or(dummy_self)
        };
        let step_other = |r: i64, a: Sym| -> i64 {
            if r == dummy_other {
                return dummy_other;
            }
            other
                .delta
                .get(&(r as StateId))
                .and_then(|row| row.get(&a))
                .map(|&next| next as i64)
                .unwrap_or(dummy_other)
        };

        let symbols: IndexSet<Sym> = self.sigma.iter().chain(other.sigma.iter()).copied().collect();

        let mut ds = DisjointSet::new();
        let mut queue: VecDeque<(Vec<Sym>, i64, i64)> = VecDeque::new();
        queue.push_back((Vec::new(), self.start as i64, other.start as i64));

        while let Some((word, q, r)) = queue.pop_front() {
            if ds.find(key_self(q)) == ds.find(key_other(r)) {
                continue;
            }

            if is_final_self(q) != is_final_other(r) {
                return (false, Some(word));
            }

            for &a in &symbols {
                let mut next_word = word.clone();
                next_word.push(a);
                queue.push_back((next_word, step_self(q, a), step_other(r, a)));
            }

            ds.union(key_self(q), key_other(r));
        }

        (true, None)
    }
}
