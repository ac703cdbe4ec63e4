//! Disjoint clique_id → component_id bookkeeping for one percolation level.

use crate::cliques::CliqueId;

/// A component identifier within one [`PartitionStore`] level. Distinct
/// from [`CliqueId`]: components are created and emptied throughout a
/// level's lifetime while clique ids are permanent.
pub type ComponentId = usize;

/// A disjoint-set-like mapping from clique ids to component ids, for one
/// percolation level.
///
/// Membership of each component is an intrusive circular doubly linked
/// list threaded through `next`/`prev`, so `move_node` and `members`
/// iteration are O(1) and O(size) respectively with no extra allocation.
/// Components that become empty are pushed onto a reuse stack so
/// `create_empty_component` is O(1) amortized instead of growing the
/// component space without bound.
#[derive(Debug)]
pub struct PartitionStore {
    component_of: Vec<ComponentId>,
    next: Vec<CliqueId>,
    prev: Vec<CliqueId>,
    head: Vec<Option<CliqueId>>,
    empty_components: Vec<ComponentId>,
}

impl PartitionStore {
    /// Initialize a store for `num_cliques` cliques, each starting in its
    /// own singleton component (`component_id == clique_id`).
    #[must_use]
    pub fn new(num_cliques: usize) -> Self {
        let next: Vec<CliqueId> = (0..num_cliques).collect();
        let prev = next.clone();
        let head = (0..num_cliques).map(Some).collect();
        Self {
            component_of: (0..num_cliques).collect(),
            next,
            prev,
            head,
            empty_components: Vec::new(),
        }
    }

    /// Move every clique into a single shared component, `0`. Used to
    /// seed the first percolation level, where all cliques of size
    /// `>= k_min` start out co-located.
    pub fn collapse_all_into_component_zero(&mut self) {
        let num_cliques = self.component_of.len();
        for c in 0..num_cliques {
            let from = self.component_of[c];
            if from != 0 {
                self.move_node(c, 0, from);
            }
        }
    }

    /// The component currently holding clique `c`.
    #[must_use]
    pub fn component_of(&self, c: CliqueId) -> ComponentId {
        self.component_of[c]
    }

    /// Allocate a fresh, empty component id, reusing one freed by a
    /// previous `move_node` if available.
    pub fn create_empty_component(&mut self) -> ComponentId {
        if let Some(cid) = self.empty_components.pop() {
            debug_assert!(self.head[cid].is_none());
            cid
        } else {
            let cid = self.head.len();
            self.head.push(None);
            cid
        }
    }

    /// Move clique `c` from `from_cid` into `new_cid`.
    ///
    /// # Panics
    /// Panics if `c` is not currently in `from_cid`, or if
    /// `new_cid == from_cid`.
    pub fn move_node(&mut self, c: CliqueId, new_cid: ComponentId, from_cid: ComponentId) {
        assert_eq!(
            self.component_of[c], from_cid,
            "clique {c} is not in component {from_cid}"
        );
        assert_ne!(new_cid, from_cid, "cannot move a clique into its own component");

        self.unlink(c, from_cid);
        self.link(c, new_cid);
        self.component_of[c] = new_cid;
    }

    fn unlink(&mut self, c: CliqueId, cid: ComponentId) {
        if self.next[c] == c {
            self.head[cid] = None;
            self.empty_components.push(cid);
        } else {
            let (p, n) = (self.prev[c], self.next[c]);
            self.next[p] = n;
            self.prev[n] = p;
            if self.head[cid] == Some(c) {
                self.head[cid] = Some(n);
            }
        }
        self.next[c] = c;
        self.prev[c] = c;
    }

    fn link(&mut self, c: CliqueId, cid: ComponentId) {
        match self.head[cid] {
            None => {
                self.head[cid] = Some(c);
            }
            Some(h) => {
                let tail = self.prev[h];
                self.next[tail] = c;
                self.prev[c] = tail;
                self.next[c] = h;
                self.prev[h] = c;
            }
        }
    }

    /// Iterate over the clique ids currently in component `cid`, in
    /// unspecified but stable (under non-mutation) order.
    pub fn members(&self, cid: ComponentId) -> Members<'_> {
        Members {
            store: self,
            start: self.head[cid],
            current: self.head[cid],
            finished: false,
        }
    }

    /// The number of cliques tracked by this store (fixed at
    /// construction).
    #[must_use]
    pub fn num_cliques(&self) -> usize {
        self.component_of.len()
    }
}

/// Iterator over the members of one component, returned by
/// [`PartitionStore::members`].
#[derive(Debug)]
pub struct Members<'a> {
    store: &'a PartitionStore,
    start: Option<CliqueId>,
    current: Option<CliqueId>,
    finished: bool,
}

impl Iterator for Members<'_> {
    type Item = CliqueId;

    fn next(&mut self) -> Option<CliqueId> {
        if self.finished {
            return None;
        }
        let c = self.current?;
        let next = self.store.next[c];
        if Some(next) == self.start {
            self.finished = true;
        } else {
            self.current = Some(next);
        }
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_each_clique_in_its_own_component() {
        let store = PartitionStore::new(3);
        assert_eq!(store.component_of(0), 0);
        assert_eq!(store.component_of(1), 1);
        assert_eq!(store.members(0).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn collapse_all_into_component_zero_merges_everything() {
        let mut store = PartitionStore::new(4);
        store.collapse_all_into_component_zero();
        let mut members: Vec<_> = store.members(0).collect();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2, 3]);
        for c in 0..4 {
            assert_eq!(store.component_of(c), 0);
        }
    }

    #[test]
    fn move_node_relocates_a_single_clique() {
        let mut store = PartitionStore::new(3);
        store.collapse_all_into_component_zero();
        let target = store.create_empty_component();
        store.move_node(1, target, 0);
        assert_eq!(store.component_of(1), target);
        let mut remaining: Vec<_> = store.members(0).collect();
        remaining.sort_unstable();
        assert_eq!(remaining, vec![0, 2]);
        assert_eq!(store.members(target).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn emptied_component_is_reused() {
        let mut store = PartitionStore::new(2);
        let target = store.create_empty_component();
        store.move_node(0, target, 0);
        store.move_node(1, target, 1);
        // both original singleton components 0 and 1 are now empty
        let reused_a = store.create_empty_component();
        let reused_b = store.create_empty_component();
        assert_ne!(reused_a, reused_b);
        assert!(reused_a == 0 || reused_a == 1);
        assert!(reused_b == 0 || reused_b == 1);
    }

    #[test]
    fn sum_of_member_counts_equals_num_cliques() {
        let mut store = PartitionStore::new(5);
        store.collapse_all_into_component_zero();
        let a = store.create_empty_component();
        store.move_node(2, a, 0);
        store.move_node(4, a, 0);
        let total: usize = [0, a]
            .iter()
            .map(|&cid| store.members(cid).count())
            .sum();
        assert_eq!(total, 5);
    }

    #[test]
    #[should_panic(expected = "is not in component")]
    fn move_node_rejects_wrong_from_component() {
        let mut store = PartitionStore::new(2);
        store.move_node(0, 1, 1);
    }
}
