use std::collections::HashMap;

/// Union-find over opaque `i64` keys, with path compression and
/// union-by-rank.
///
/// Elements are created lazily: [`find`](DisjointSet::find) and
/// [`union`](DisjointSet::union) call [`make_set`](DisjointSet::make_set)
/// on any key they have not seen before. Element keys are `i64` rather
/// than `StateId` (`u32`) because [`crate::equivalence`] embeds two
/// automata's state ids disjointly into one instance via an additive
/// offset, which can exceed `u32::MAX` for adversarial inputs.
#[derive(Debug, Default, Clone)]
pub struct DisjointSet {
    parent: HashMap<i64, i64>,
    rank: HashMap<i64, u32>,
    num_elems: usize,
    num_equiv: usize,
}

impl DisjointSet {
    /// Creates an empty disjoint-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements that have been created so far.
    pub fn len(&self) -> usize {
        self.num_elems
    }

    /// Whether the disjoint-set has no elements.
    pub fn is_empty(&self) -> bool {
        self.num_elems == 0
    }

    /// Number of equivalence classes currently in the partition.
    pub fn num_classes(&self) -> usize {
        self.num_equiv
    }

    /// Creates the singleton set `{x}` if `x` is unknown; a no-op otherwise.
    pub fn make_set(&mut self, x: i64) {
        if self.parent.contains_key(&x) {
            return;
        }
        self.parent.insert(x, x);
        self.rank.insert(x, 0);
        self.num_elems += 1;
        self.num_equiv += 1;
    }

    /// Returns the representative of the equivalence class containing `x`,
    /// creating `x` first if necessary. Uses iterative two-pass path
    /// compression: one pass to find the root, a second to repoint every
    /// node on the path directly to it.
    pub fn find(&mut self, x: i64) -> i64 {
        self.make_set(x);

        let mut root = x;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }

        let mut cur = x;
        while self.parent[&cur] != root {
            let next = self.parent[&cur];
            self.parent.insert(cur, root);
            cur = next;
        }

        root
    }

    /// Merges the equivalence classes containing `x` and `y`, attaching the
    /// lower-rank root under the higher-rank one (ties broken by attaching
    /// `y`'s root under `x`'s root and bumping its rank). Returns the
    /// surviving root. Returns the shared root without modifying the
    /// partition if `x` and `y` are already in the same class.
    pub fn union(&mut self, x: i64, y: i64) -> i64 {
        let mut xroot = self.find(x);
        let mut yroot = self.find(y);

        if xroot == yroot {
            return xroot;
        }

        if self.rank[&xroot] < self.rank[&yroot] {
            std::mem::swap(&mut xroot, &mut yroot);
        }

        self.parent.insert(yroot, xroot);
        self.num_equiv -= 1;

        if self.rank[&xroot] == self.rank[&yroot] {
            *self.rank.get_mut(&xroot).unwrap() += 1;
        }

        xroot
    }

    /// Returns a mapping from class representative to the full equivalence
    /// class. Compresses every path as a side effect (each element is
    /// looked up via [`find`](DisjointSet::find)).
    pub fn partition(&mut self) -> HashMap<i64, Vec<i64>> {
        let elements: Vec<i64> = self.parent.keys().copied().collect();
        let mut out: HashMap<i64, Vec<i64>> = HashMap::new();
        for element in elements {
            let root = self.find(element);
            out.entry(root).or_default().push(element);
        }
        out
    }
}
