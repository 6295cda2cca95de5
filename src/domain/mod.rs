//! Domain layer: region registry and association parsing
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod association;
pub mod builder;
pub mod error;
pub mod query;
pub mod region_tree;
pub mod snapshot;

pub use association::{normalize_region, parse_associations, Association, ParseWarning, ParsedInput};
pub use builder::{add_sub_tree, create_tree};
pub use error::{DomainError, DomainResult};
pub use query::find_platform_names;
pub use region_tree::{RegionNode, RegionTree, DEFAULT_ROOT_LABEL};
