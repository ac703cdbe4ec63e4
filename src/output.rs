//! Writes discovered communities out to `<dir>/commK` files.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use crate::cliques::CliqueSet;
use crate::error::Error;
use crate::loader::NodeNames;
use crate::percolation::LevelCommunities;

/// Writes one `commK` file per percolation level into an output
/// directory, creating the directory if necessary.
#[derive(Debug)]
pub struct OutputWriter<'a> {
    output_dir: &'a Path,
}

impl<'a> OutputWriter<'a> {
    /// Target `output_dir` for every `commK` file this writer produces.
    #[must_use]
    pub fn new(output_dir: &'a Path) -> Self {
        Self { output_dir }
    }

    /// Write `<output_dir>/comm<level.k>`, one line per community, each
    /// line holding the space-separated original names of every node
    /// that appears in any member clique. The output directory is
    /// created (recursively) if it does not already exist, and the file
    /// is overwritten if present.
    ///
    /// # Errors
    /// Propagates any I/O failure creating the directory or file.
    pub fn write_level(
        &self,
        level: &LevelCommunities,
        cliques: &CliqueSet,
        names: &NodeNames,
    ) -> Result<(), Error> {
        std::fs::create_dir_all(self.output_dir)?;
        let path = self.output_dir.join(format!("comm{}", level.k));
        let mut file = File::create(path)?;

        for community in &level.communities {
            let mut node_ids = BTreeSet::new();
            for &clique_id in community {
                node_ids.extend(cliques.members(clique_id).iter().copied());
            }
            let line = node_ids
                .iter()
                .map(|&id| names.resolve(id))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(file, "{line}")?;
        }

        Ok(())
    }
}
