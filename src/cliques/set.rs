//! An immutable collection of maximal cliques, indexed by a permanent id.

use crate::error::Error;
use crate::graph::{Graph, NodeId};

use super::enumerator::enumerate_cliques;

/// A permanent index into a [`CliqueSet`]. Never reused or renumbered
/// after construction, even as cliques are later assigned to components.
pub type CliqueId = usize;

/// The maximal cliques of a graph, each of size at least the threshold
/// the set was built with.
///
/// Built once via [`CliqueSet::discover`] and never mutated afterwards;
/// the percolation engine only ever reads from it by [`CliqueId`].
#[derive(Debug)]
pub struct CliqueSet {
    cliques: Vec<Vec<NodeId>>,
}

impl CliqueSet {
    /// Enumerate every maximal clique of `graph` with at least `min_size`
    /// nodes.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `min_size < 3`.
    /// - [`Error::NoCliquesAboveThreshold`] if none are found.
    /// - [`Error::TooManyCliques`] if more are found than fit in a
    ///   32-bit signed clique id.
    pub fn discover(graph: &Graph, min_size: usize) -> Result<Self, Error> {
        let mut cliques = Vec::new();
        enumerate_cliques(graph, min_size, |clique| {
            let mut clique = clique.to_vec();
            clique.sort_unstable();
            cliques.push(clique);
        })?;

        if cliques.is_empty() {
            return Err(Error::NoCliquesAboveThreshold { k_min: min_size });
        }
        if cliques.len() > i32::MAX as usize {
            return Err(Error::TooManyCliques {
                count: cliques.len(),
            });
        }

        Ok(Self { cliques })
    }

    /// The number of cliques in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cliques.len()
    }

    /// Whether the set holds no cliques.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cliques.is_empty()
    }

    /// The members of clique `id`, sorted ascending.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn members(&self, id: CliqueId) -> &[NodeId] {
        &self.cliques[id]
    }

    /// The size of clique `id`.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn size(&self, id: CliqueId) -> usize {
        self.cliques[id].len()
    }

    /// The largest clique size present in the set.
    ///
    /// # Panics
    /// Panics if the set is empty (it never is, once constructed via
    /// [`CliqueSet::discover`]).
    #[must_use]
    pub fn max_clique_size(&self) -> usize {
        self.cliques
            .iter()
            .map(Vec::len)
            .max()
            .expect("CliqueSet is never empty")
    }

    /// Iterate over `(id, members)` for every clique with at least `k`
    /// members.
    pub fn of_size_at_least(&self, k: usize) -> impl Iterator<Item = (CliqueId, &[NodeId])> {
        self.cliques
            .iter()
            .enumerate()
            .filter(move |(_, members)| members.len() >= k)
            .map(|(id, members)| (id, members.as_slice()))
    }
}
