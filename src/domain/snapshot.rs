//! Deterministic textual dump of a region tree.
//!
//! Nodes are emitted in creation order as TOML array-of-tables:
//!
//! ```toml
//! root = "world"
//!
//! [[node]]
//! region = "world"
//! platforms = []
//!
//! [[node]]
//! region = "ru"
//! parent = "world"
//! platforms = ["VKontakte", "Yandex.Direct"]
//! ```

use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::region_tree::RegionTree;

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<&'a str>,
    #[serde(rename = "node")]
    nodes: Vec<SnapshotNode<'a>>,
}

#[derive(Debug, Serialize)]
struct SnapshotNode<'a> {
    region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    platforms: Vec<&'a str>,
}

/// Serialize the full tree state.
pub fn render(tree: &RegionTree) -> DomainResult<String> {
    let nodes = tree
        .nodes()
        .map(|(_, node)| SnapshotNode {
            region: &node.region,
            parent: node
                .parent
                .and_then(|p| tree.get_node(p))
                .map(|p| p.region.as_str()),
            platforms: node.platform_names.iter().map(String::as_str).collect(),
        })
        .collect();

    let root = tree
        .root()
        .and_then(|idx| tree.get_node(idx))
        .map(|node| node.region.as_str());

    toml::to_string(&Snapshot { root, nodes }).map_err(|e| DomainError::SnapshotEncode {
        message: e.to_string(),
    })
}
