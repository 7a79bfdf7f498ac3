//! Domain layer: the option model and construction errors.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`notification`]: Signals raised on the backing control
//! - [`option`]: Option items, nodes and enriched option data
//! - [`tree`]: The option tree arena with traversal and lookup
//!
//! # Examples
//!
//! ```
//! use selectree::domain::{OptionItem, OptionTree, SourceEntry};
//!
//! let tree = OptionTree::parse(&[OptionItem::new("a", "A").into()], true);
//! assert_eq!(tree.all_values(), vec!["a"]);
//! ```

pub mod error;
pub mod notification;
pub mod option;
pub mod tree;

pub use error::{Result, SelectreeError};
pub use notification::{Notification, NotificationKind, SelectionValue};
pub use option::{NodeId, OptionData, OptionItem, OptionNode, SourceEntry, GROUP_VALUE_PREFIX};
pub use tree::OptionTree;
