//! Region-indexed registry of advertising platforms.
//!
//! Platform lists of the form `VKontakte:/ru,/ua,/by,/kz` are parsed into
//! (platform, region) associations, applied to a caller-owned
//! [`RegionTree`](domain::RegionTree) and queried by region.
//!
//! ```
//! use adareas::domain::{add_sub_tree, find_platform_names, RegionTree};
//!
//! let mut tree = RegionTree::new();
//! add_sub_tree(&mut tree, "/ru", "Yandex.Direct");
//! add_sub_tree(&mut tree, "/ru", "VKontakte");
//!
//! let names = find_platform_names("ru", &tree);
//! assert!(names.contains("VKontakte"));
//! assert!(find_platform_names("xx", &tree).is_empty());
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
