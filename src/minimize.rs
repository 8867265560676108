use std::hash::Hash;

use indexmap::IndexMap;

use crate::dfa::{Dfa, StateId};
use crate::partition::Partition;
use crate::valmari::ValmariState;

impl<Sym> Dfa<Sym>
where
    Sym: Copy + Eq + Hash + Ord,
{
    /// Constructs the minimal partial DFA equivalent (up to isomorphism)
    /// to `self`, using Valmari's partition-refinement algorithm.
    ///
    /// Runs in `O(n + m log m)` time and `O(n + m)` additional space,
    /// where `n` is the number of states and `m` the number of
    /// transitions. Unreachable and unproductive states are pruned
    /// before refinement, so the result is partial-minimal; its alphabet
    /// may be a proper subset of `self.sigma` if some symbols lead
    /// nowhere useful.
    pub fn minimize_valmari(&self) -> Dfa<Sym> {
        Minimizer::new(self).run()
    }
}

struct Minimizer<'a, Sym> {
    dfa: &'a Dfa<Sym>,
    symbols: Vec<Sym>,
    vstate: ValmariState,
    blocks: Partition,
}

impl<'a, Sym> Minimizer<'a, Sym>
where
    Sym: Copy + Eq + Hash + Ord,
{
    fn new(dfa: &'a Dfa<Sym>) -> Self {
        let symbols: Vec<Sym> = dfa.sigma.iter().copied().collect();
        let vstate = ValmariState::new(dfa, &symbols);
        let blocks = Partition::singleton(vstate.num_states);
        Self {
            dfa,
            symbols,
            vstate,
            blocks,
        }
    }

    fn run(mut self) -> Dfa<Sym> {
        let start_index = self
            .dfa
            .states
            .get_index_of(&self.dfa.start)
            .expect("start state must belong to the state set");

        self.vstate.reach(&mut self.blocks, start_index as StateId);
        self.vstate.remove_unreachable(&mut self.blocks, true);

        for &f in &self.dfa.finals {
            let Some(idx) = self.dfa.states.get_index_of(&f) else {
                continue;
            };
            if self.blocks.location[idx] < self.blocks.past[0] {
                self.vstate.reach(&mut self.blocks, idx as StateId);
            }
        }

        self.vstate.num_finals = self.vstate.num_reached;
        self.vstate.remove_unreachable(&mut self.blocks, false);

        self.blocks.marked[0] = self.vstate.num_finals;
        if self.vstate.num_finals > 0 && self.vstate.num_finals < self.blocks.past[0] {
            self.blocks.touched[self.blocks.num_touched] = 0;
            self.blocks.num_touched += 1;
            self.blocks.split();
        }

        let mut cords = Partition::by_key(self.vstate.num_trans, |i: usize| self.vstate.labels[i]);

        let mut cord_cursor = 0usize;
        let mut block_cursor = 1usize;

        self.vstate.make_adjacent(false);

        while cord_cursor < cords.size {
            for i in cords.first[cord_cursor]..cords.past[cord_cursor] {
                let tail = self.vstate.tails[cords.elements[i]];
                self.blocks.mark(tail as usize);
            }
            self.blocks.split();
            cord_cursor += 1;

            while block_cursor < self.blocks.size {
                for i in self.blocks.first[block_cursor]..self.blocks.past[block_cursor] {
                    let state = self.blocks.elements[i] as StateId;
                    for &j in self.vstate.adjacent_of(state) {
                        cords.mark(j);
                    }
                }
                cords.split();
                block_cursor += 1;
            }
        }

        self.build_result()
    }

    fn build_result(self) -> Dfa<Sym> {
        let mut delta: IndexMap<StateId, IndexMap<Sym, StateId>> = IndexMap::new();
        let mut sigma_used = std::collections::BTreeSet::new();

        for i in 0..self.vstate.num_trans {
            let tail = self.vstate.tails[i] as usize;
            let source = self.blocks.setof[tail];
            if self.blocks.location[tail] == self.blocks.first[source] {
                let label = self.symbols[self.vstate.labels[i]];
                let head = self.vstate.heads[i] as usize;
                let target = self.blocks.setof[head] as StateId;
                delta.entry(source as StateId).or_default().insert(label, target);
                sigma_used.insert(label);
            }
        }

        let states = 0..self.blocks.size as StateId;
        let finals = (0..self.blocks.size)
            .filter(|&c| self.blocks.first[c] < self.vstate.num_finals)
            .map(|c| c as StateId);
        let start_index = self
            .dfa
            .states
            .get_index_of(&self.dfa.start)
            .expect("start state must belong to the state set");
        let start = self.blocks.setof[start_index] as StateId;

        Dfa::new(states, finals, sigma_used, start, delta)
    }
}
