//! Deterministic finite automata over a partial transition function,
//! with Valmari partition-refinement minimization, Hopcroft-Karp
//! language equivalence (with witness), and reachable-subautomaton
//! isomorphism.
//!
//! The central type is [`Dfa`]; its minimization, equivalence, and
//! isomorphism operations live in their own modules but are exposed as
//! inherent methods on `Dfa` (via `impl` blocks in those modules) so
//! callers only need `use valmari_dfa::Dfa;`.
//!
//! ```
//! use valmari_dfa::Dfa;
//! use indexmap::IndexMap;
//!
//! let mut delta = IndexMap::new();
//! let mut row0 = IndexMap::new();
//! row0.insert('a', 1u32);
//! delta.insert(0u32, row0);
//! let mut row1 = IndexMap::new();
//! row1.insert('a', 1u32);
//! delta.insert(1u32, row1);
//!
//! let dfa = Dfa::new([0, 1, 2], [1], ['a'], 0, delta);
//! let min = dfa.minimize_valmari();
//! assert_eq!(min.states.len(), 2);
//! assert!(min.equivalent_hopcroft_karp(&dfa).0);
//! ```

pub mod dfa;
pub mod disjoint;
pub mod equivalence;
pub mod errors;
pub mod isomorphism;
pub mod minimize;
pub mod partition;
pub mod valmari;

pub use dfa::{Dfa, StateId};
pub use disjoint::DisjointSet;
pub use errors::{ConsistencyError, Error};
pub use isomorphism::{isomorphic, BidirectionalMap};
pub use partition::Partition;
