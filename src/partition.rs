/// Index-array partition refinement over the integer range `[0, count)`.
///
/// Elements of the same class are stored contiguously in `elements`; four
/// parallel arrays (`elements`, `location`, `setof`, plus `first`/`past`
/// ranges) give O(1) class membership queries and O(smaller-half) splits.
/// Marking and splitting are the only mutators after construction.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Number of equivalence classes.
    pub size: usize,
    /// Permutation of `[0, count)`; elements of a class are contiguous.
    pub elements: Vec<usize>,
    /// `location[e]` is the index of `e` in `elements`.
    pub location: Vec<usize>,
    /// `setof[e]` is the class id containing `e`.
    pub setof: Vec<usize>,
    /// `first[c]` is the start index of class `c` in `elements`.
    pub first: Vec<usize>,
    /// `past[c]` is one past the end index of class `c` in `elements`.
    pub past: Vec<usize>,
    /// Count of currently marked elements in each class; marked elements
    /// occupy `elements[first[c] .. first[c] + marked[c])`.
    pub marked: Vec<usize>,
    /// Classes with at least one marked element, valid up to
    /// `num_touched`.
    pub touched: Vec<usize>,
    /// Number of valid entries in `touched`.
    pub num_touched: usize,
}

impl Partition {
    /// Builds a partition over `[0, count)` with a single class spanning
    /// every element.
    pub fn singleton(count: usize) -> Self {
        let elements: Vec<usize> = (0..count).collect();
        let location: Vec<usize> = (0..count).collect();
        let first = vec![0; count];
        let mut past = vec![0; count];
        let setof = vec![0; count];
        let marked = vec![0; count + 1];
        let touched = vec![0; count + 1];

        let size = usize::from(count > 0);
        if size > 0 {
            past[0] = count;
        }
        Self {
            size,
            elements,
            location,
            setof,
            first,
            past,
            marked,
            touched,
            num_touched: 0,
        }
    }

    /// Builds a partition over `[0, count)`, grouping elements into one
    /// class per distinct `key(e)` value, classes ordered by that key.
    pub fn by_key<F, K>(count: usize, key: F) -> Self
    where
        F: Fn(usize) -> K,
        K: Ord,
    {
        let mut elements: Vec<usize> = (0..count).collect();
        let mut location: Vec<usize> = (0..count).collect();
        let mut first = vec![0; count];
        let mut past = vec![0; count];
        let mut setof = vec![0; count];
        let marked = vec![0; count + 1];
        let touched = vec![0; count + 1];

        if count == 0 {
            return Self {
                size: 0,
                elements,
                location,
                setof,
                first,
                past,
                marked,
                touched,
                num_touched: 0,
            };
        }

        elements.sort_by_key(|&e| key(e));

        let mut size = 0usize;
        let mut current = key(elements[0]);
        for i in 0..count {
            let element = elements[i];
            let this_key = key(element);
            if this_key != current {
                current = this_key;
                past[size] = i;
                size += 1;
                first[size] = i;
            }
            setof[element] = size;
            location[element] = i;
        }
        past[size] = count;
        size += 1;

        Self {
            size,
            elements,
            location,
            setof,
            first,
            past,
            marked,
            touched,
            num_touched: 0,
        }
    }

    /// Marks `element` for splitting. A no-op if already marked.
    pub fn mark(&mut self, element: usize) {
        let equiv = self.setof[element];
        let index = self.location[element];
        let unmarked = self.first[equiv] + self.marked[equiv];

        if index < unmarked {
            return;
        }

        let other = self.elements[unmarked];
        self.elements[index] = other;
        self.location[other] = index;
        self.elements[unmarked] = element;
        self.location[element] = unmarked;

        if self.marked[equiv] == 0 {
            self.touched[self.num_touched] = equiv;
            self.num_touched += 1;
        }
        self.marked[equiv] += 1;
    }

    /// Splits every touched class into its marked and unmarked halves,
    /// reassigning the smaller half a fresh class id so total work across
    /// a refinement sequence stays `O(n log n)`. Drains `touched`.
    pub fn split(&mut self) {
        while self.num_touched > 0 {
            self.num_touched -= 1;
            let equiv = self.touched[self.num_touched];
            let unmarked = self.first[equiv] + self.marked[equiv];

            if unmarked == self.past[equiv] {
                self.marked[equiv] = 0;
                continue;
            }

            let new_class = self.size;
            if self.marked[equiv] <= self.past[equiv] - unmarked {
                self.first[new_class] = self.first[equiv];
                self.past[new_class] = unmarked;
                self.first[equiv] = unmarked;
            } else {
                self.past[new_class] = self.past[equiv];
                self.first[new_class] = unmarked;
                self.past[equiv] = unmarked;
            }

            for i in self.first[new_class]..self.past[new_class] {
                self.setof[self.elements[i]] = new_class;
            }

            self.marked[equiv] = 0;
            self.marked[new_class] = 0;
            self.size += 1;
        }
    }

    /// The elements of class `equiv`.
    pub fn partition(&self, equiv: usize) -> &[usize] {
        &self.elements[self.first[equiv]..self.past[equiv]]
    }

    /// An iterator over the elements of every class, in class-id order.
    pub fn partitions(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.size).map(move |c| self.partition(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_partition_with_no_key() {
        let p = Partition::singleton(5);
        assert_eq!(p.size, 1);
        assert_eq!(p.partition(0), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_partition() {
        let p = Partition::singleton(0);
        assert_eq!(p.size, 0);
    }

    #[test]
    fn keyed_partition_groups_by_key() {
        let p = Partition::by_key(6, |e: usize| e % 2);
        assert_eq!(p.size, 2);
        let mut evens: Vec<usize> = p.partition(0).to_vec();
        let mut odds: Vec<usize> = p.partition(1).to_vec();
        evens.sort_unstable();
        odds.sort_unstable();
        assert_eq!(evens, vec![0, 2, 4]);
        assert_eq!(odds, vec![1, 3, 5]);
    }

    #[test]
    fn mark_is_idempotent() {
        let mut p = Partition::singleton(4);
        p.mark(2);
        p.mark(2);
        assert_eq!(p.marked[0], 1);
    }

    #[test]
    fn split_separates_marked_from_unmarked() {
        let mut p = Partition::singleton(4);
        p.mark(0);
        p.mark(1);
        p.split();
        assert_eq!(p.size, 2);

        let class0 = p.setof[0];
        let class1 = p.setof[1];
        assert_eq!(class0, class1);

        let class2 = p.setof[2];
        let class3 = p.setof[3];
        assert_eq!(class2, class3);
        assert_ne!(class0, class2);
    }

    #[test]
    fn split_all_marked_is_a_no_op() {
        let mut p = Partition::singleton(3);
        p.mark(0);
        p.mark(1);
        p.mark(2);
        p.split();
        assert_eq!(p.size, 1);
    }

    #[test]
    fn split_with_no_marks_is_a_no_op() {
        let mut p = Partition::singleton(3);
        p.split();
        assert_eq!(p.size, 1);
    }

    #[test]
    fn invariants_hold_after_multiple_splits() {
        let mut p = Partition::singleton(8);
        p.mark(0);
        p.mark(1);
        p.mark(2);
        p.split();

        // mark one element from the larger surviving class to force another split
        let target = if p.setof[3] == p.setof[0] { 3 } else { 4 };
        p.mark(target);
        p.split();

        for c in 0..p.size {
            for &e in p.partition(c) {
                assert_eq!(p.setof[e], c);
                assert_eq!(p.elements[p.location[e]], e);
            }
        }
    }
}
