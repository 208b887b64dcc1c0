//! A d-ary min-heap for frontier entries.
//!
//! The heap lives in a flat array traversed in a non-linear way. With arity
//! `A` these are the indices we assign to each node (`A = 2` shown),
//!
//! ```text
//!                           0
//!              1                         2
//!       3            4            5             6
//!   7      8      9     10    11     12     13     14
//! 15 16  17 18  19 20  21 22 23 24  25
//! ```
//!
//! The last level will often be incomplete. From any index you can go,
//!   - Up:          `(i-1)/A`
//!   - First child: `(A*i) + 1`
//!   - Last child:  `A*(i+1)`
//!
//! There is no decrease-key: re-ranking is done by pushing again and letting
//! stale entries surface later.

const HEAP_ARITY: usize = 4usize;

/// The parent node
///
/// ```
/// use maze_search::rank_heap::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(6), 2);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) children
///
/// ```
/// use maze_search::rank_heap::index_first_children;
/// assert_eq!(index_first_children::<2>(0), 1);
/// assert_eq!(index_first_children::<2>(3), 7);
/// assert_eq!(index_first_children::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    index_first_children::<HEAP_ARITY>(i)
}

#[derive(Clone)]
pub struct RankHeap<T: Ord> {
    nodes: Vec<T>,
}

impl<T: Ord> RankHeap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, t: T) {
        self.nodes.push(t);
        self.sift_up(self.nodes.len() - 1);
        self.verify_heap();
    }

    /// Removes the smallest entry.
    pub fn pop(&mut self) -> Option<T> {
        match self.nodes.len() {
            0 | 1 => self.nodes.pop(),
            _ => {
                let top = self.nodes.swap_remove(0);
                self.sift_down(0);
                self.verify_heap();
                Some(top)
            }
        }
    }

    /// Raises a node
    /// Returns it's new index
    fn sift_up(&mut self, mut pos: usize) -> usize {
        debug_assert!(pos < self.nodes.len());

        while pos > 0 {
            let parent = up(pos);
            if self.nodes[parent] <= self.nodes[pos] {
                break;
            }
            self.nodes.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.nodes.len();

        loop {
            let first = down_left(pos);
            if first >= len {
                break;
            }
            let child = first + self.best_child(first, len);

            if self.nodes[pos] <= self.nodes[child] {
                break;
            }
            self.nodes.swap(pos, child);
            pos = child;
        }
        pos
    }

    /// Offset of the smallest sibling starting at `first`, the left-most on ties.
    #[inline(always)]
    fn best_child(&self, first: usize, len: usize) -> usize {
        let siblings = &self.nodes[first..len.min(first + HEAP_ARITY)];
        let mut best = 0;
        for (i, node) in siblings.iter().enumerate().skip(1) {
            if *node < siblings[best] {
                best = i;
            }
        }
        best
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_heap(&self) {
        for i in 1..self.nodes.len() {
            let p = up(i);
            debug_assert!(
                self.nodes[p] <= self.nodes[i],
                "Node[{p}] !<= child[{i}] in heap of len={}",
                self.nodes.len(),
            );
        }
    }
}

impl<T: Ord> Default for RankHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> std::fmt::Debug for RankHeap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "RankHeap{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_order() {
        let mut heap = RankHeap::new();
        for x in [5u32, 3, 9, 1, 7, 1, 0, 12, 4, 4, 8, 2, 6] {
            heap.push(x);
        }
        assert_eq!(heap.peek(), Some(&0));

        let mut popped = vec![];
        while let Some(x) = heap.pop() {
            popped.push(x);
        }
        assert_eq!(popped, vec![0, 1, 1, 2, 3, 4, 4, 5, 6, 7, 8, 9, 12]);
        assert!(heap.is_empty());
    }

    #[test]
    fn interleaved_push_pop() {
        let mut heap = RankHeap::with_capacity(8);
        heap.push((2, 'b'));
        heap.push((1, 'a'));
        assert_eq!(heap.pop(), Some((1, 'a')));
        heap.push((0, 'z'));
        heap.push((3, 'c'));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), Some((0, 'z')));
        assert_eq!(heap.pop(), Some((2, 'b')));
        assert_eq!(heap.pop(), Some((3, 'c')));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn matches_sorting() {
        // Deterministic pseudo-random sequence
        let mut x = 17u64;
        let mut values = vec![];
        for _ in 0..500 {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            values.push((x >> 40) % 97);
        }

        let mut heap = RankHeap::new();
        for v in &values {
            heap.push(*v);
        }
        values.sort();

        let popped: Vec<u64> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(popped, values);
    }

    #[test]
    fn clear_empties() {
        let mut heap = RankHeap::new();
        heap.push(1);
        heap.clear();
        assert_eq!(heap.pop(), None);
        assert_eq!(format!("{heap:?}"), "RankHeap{(0 nodes)}");
    }
}
