//! Region registry service
//!
//! Reads platform lists, applies them to caller-owned region trees,
//! answers region queries and writes snapshots.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{self, Association, ParsedInput, RegionTree};
use crate::infrastructure::traits::FileSystem;

/// Service for building and querying region trees.
pub struct RegionService {
    fs: Arc<dyn FileSystem>,
}

impl RegionService {
    /// Create a new region service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read a platform list and parse it into associations.
    ///
    /// The file is read in one awaited operation; parsing afterwards is
    /// synchronous. Read failures are fatal, malformed lines are returned as
    /// warnings alongside the associations that did parse.
    #[instrument(level = "debug", skip(self))]
    pub async fn read_associations(&self, source: &Path) -> ApplicationResult<ParsedInput> {
        let content = tokio::fs::read_to_string(source)
            .await
            .with_path_context("read platform list", source)?;

        let parsed = domain::parse_associations(&content);
        for warning in &parsed.warnings {
            warn!("{}: {}", source.display(), warning);
        }
        debug!(
            associations = parsed.associations.len(),
            warnings = parsed.warnings.len(),
            "parsed platform list"
        );
        Ok(parsed)
    }

    /// Register `platform_name` for the region at `path`.
    ///
    /// When `snapshot_path` is given and non-empty, the whole tree is written
    /// there after the mutation, replacing any previous file. A failed write is
    /// returned as an error; the mutation itself stays applied.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn add_sub_tree(
        &self,
        path: &str,
        platform_name: &str,
        tree: &mut RegionTree,
        snapshot_path: Option<&Path>,
    ) -> ApplicationResult<()> {
        domain::add_sub_tree(tree, path, platform_name);

        if let Some(target) = snapshot_path.filter(|p| !p.as_os_str().is_empty()) {
            self.write_snapshot(tree, target)?;
        }
        Ok(())
    }

    /// Apply associations in order. Never writes a snapshot.
    pub fn create_tree<I>(&self, associations: I, tree: &mut RegionTree)
    where
        I: IntoIterator<Item = Association>,
    {
        domain::create_tree(associations, tree);
    }

    /// Platforms registered for `region`; empty when the region is unknown.
    pub fn find_platform_names(&self, region: &str, tree: &RegionTree) -> BTreeSet<String> {
        domain::find_platform_names(region, tree)
    }

    /// Overwrite `target` with the current tree state.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn write_snapshot(&self, tree: &RegionTree, target: &Path) -> ApplicationResult<()> {
        let text = domain::snapshot::render(tree)?;
        self.fs
            .ensure_parent(target)
            .with_path_context("create snapshot directory", target)?;
        self.fs
            .write(target, &text)
            .with_path_context("write snapshot", target)?;
        debug!(nodes = tree.len(), "snapshot written");
        Ok(())
    }
}
