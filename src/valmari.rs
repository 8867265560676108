use crate::dfa::{Dfa, StateId};
use crate::partition::Partition;
use std::hash::Hash;

/// Parallel transition arrays plus a counting-sort adjacency index, used
/// exclusively by [`crate::minimize`].
///
/// There is a transition from `tails[i]` to `heads[i]` on `labels[i]` for
/// every `i`. `make_adjacent` builds a counting-sort index over either
/// tails (outgoing adjacency) or heads (incoming adjacency); `reach` and
/// `remove_unreachable` use that index to prune states not reachable (or
/// not productive) from a seed set, operating directly on a caller-owned
/// `blocks` partition that must hold exactly one class with no marks.
///
/// `tails`/`heads` hold *dense* indices into `dfa.states` (its insertion
/// order via `IndexSet::get_index_of`), not the raw `StateId`s a `Dfa`
/// exposes — a `blocks` partition is built over the contiguous range
/// `[0, num_states)`, so every array this struct indexes with a state
/// must use that same dense space, regardless of what ids the caller's
/// states happen to carry.
pub struct ValmariState {
    pub tails: Vec<StateId>,
    pub heads: Vec<StateId>,
    pub labels: Vec<usize>,
    pub adjacent: Vec<usize>,
    pub offset: Vec<usize>,
    pub num_states: usize,
    pub num_trans: usize,
    pub num_finals: usize,
    pub num_reached: usize,
}

impl ValmariState {
    /// Materializes transition arrays from `dfa`'s transitions, in
    /// `dfa.iterate()` order. `labels` holds indices into `symbols` rather
    /// than the symbols themselves, so this struct stays generic-free.
    /// `tails`/`heads` are translated from `dfa`'s own `StateId`s to dense
    /// indices via `dfa.states.get_index_of`, so this works for any
    /// non-contiguous, non-zero-based state id set, not just `0..n`.
    pub fn new<Sym>(dfa: &Dfa<Sym>, symbols: &[Sym]) -> Self
    where
        Sym: Copy + Eq + Hash + Ord,
    {
        let num_states = dfa.states.len();
        let num_finals = dfa.finals.len();

        let mut tails = Vec::new();
        let mut heads = Vec::new();
        let mut labels = Vec::new();

        for (q, a, r) in dfa.iterate() {
            let label = symbols
                .iter()
                .position(|&s| s == a)
                .expect("symbol must appear in the supplied alphabet");
            let tail = dfa
                .states
                .get_index_of(&q)
                .expect("transition source must belong to the state set");
            let head = dfa
                .states
                .get_index_of(&r)
                .expect("transition target must belong to the state set");
            tails.push(tail as StateId);
            heads.push(head as StateId);
            labels.push(label);
        }

        let num_trans = tails.len();

        Self {
            tails,
            heads,
            labels,
            adjacent: vec![0; num_trans],
            offset: vec![0; num_states + 1],
            num_states,
            num_trans,
            num_finals,
            num_reached: 0,
        }
    }

    /// Rebuilds the counting-sort adjacency index. `forwards = true` sorts
    /// by `tails` (outgoing adjacency); `forwards = false` sorts by
    /// `heads` (incoming adjacency).
    pub fn make_adjacent(&mut self, forwards: bool) {
        let keys: &[StateId] = if forwards { &self.tails } else { &self.heads };

        for slot in self.offset.iter_mut().take(self.num_states + 1) {
            *slot = 0;
        }

        for i in 0..self.num_trans {
            self.offset[keys[i] as usize] += 1;
        }

        for i in 0..self.num_states {
            self.offset[i + 1] += self.offset[i];
        }

        for i in (0..self.num_trans).rev() {
            let k = keys[i] as usize;
            self.offset[k] -= 1;
            self.adjacent[self.offset[k]] = i;
        }
    }

    /// Marks `state` reached in `blocks` by swapping it into position
    /// `num_reached` of `blocks.elements`. Idempotent if already reached.
    /// Requires `blocks` to hold a single class with no marks.
    pub fn reach(&mut self, blocks: &mut Partition, state: StateId) {
        let state = state as usize;
        let index = blocks.location[state];

        if index < self.num_reached {
            return;
        }

        let unreached = blocks.elements[self.num_reached];
        blocks.elements[index] = unreached;
        blocks.location[unreached] = index;
        blocks.elements[self.num_reached] = state;
        blocks.location[state] = self.num_reached;

        self.num_reached += 1;
    }

    /// Removes states unreachable (or, with `forwards = false`,
    /// unproductive) from the states already marked reached via
    /// [`reach`](Self::reach), then compacts the transition arrays to
    /// drop transitions whose tail (in the traversal's orientation) was
    /// removed. Updates `num_trans` and `blocks.past[0]`; resets
    /// `num_reached` to 0. Requires `blocks` to hold a single class with
    /// no marks.
    pub fn remove_unreachable(&mut self, blocks: &mut Partition, forwards: bool) {
        self.make_adjacent(forwards);

        let mut cursor = 0;
        while cursor < self.num_reached {
            let state = blocks.elements[cursor];
            for j in self.offset[state]..self.offset[state + 1] {
                let head = if forwards {
                    self.heads[self.adjacent[j]]
                } else {
                    self.tails[self.adjacent[j]]
                };
                self.reach(blocks, head);
            }
            cursor += 1;
        }

        let mut num_trans = 0;
        for i in 0..self.num_trans {
            let tail = if forwards { self.tails[i] } else { self.heads[i] };
            if blocks.location[tail as usize] < self.num_reached {
                self.heads[num_trans] = self.heads[i];
                self.tails[num_trans] = self.tails[i];
                self.labels[num_trans] = self.labels[i];
                num_trans += 1;
            }
        }

        self.num_trans = num_trans;
        blocks.past[0] = self.num_reached;
        self.num_reached = 0;
    }

    /// Transition indices entering (if the last `make_adjacent` call used
    /// `forwards = false`) or leaving (otherwise) `state`.
    pub fn adjacent_of(&self, state: StateId) -> &[usize] {
        let state = state as usize;
        &self.adjacent[self.offset[state]..self.offset[state + 1]]
    }
}
