//! Selection engine over an [`OptionTree`](crate::domain::OptionTree).
//!
//! Two contracts share the tree:
//!
//! - [`single`]: exclusive selection with optional deselect-on-reclick
//! - [`multi`]: independent or cascading selection with tri-state groups
//!
//! Both are disabled-safe: no operation ever flips a disabled node to
//! selected. Unknown ids and values are silent no-ops.
//!
//! # Example
//!
//! ```
//! use selectree::domain::{OptionItem, OptionTree, SourceEntry};
//! use selectree::selection::multi;
//!
//! let mut tree = OptionTree::parse(&[SourceEntry::group("Fruits", vec![
//!     OptionItem::new("apple", "Apple"),
//!     OptionItem::new("banana", "Banana"),
//! ])], true);
//!
//! let fruits = tree.find_group("Fruits").unwrap();
//! multi::toggle(&mut tree, fruits, true);
//! assert_eq!(tree.selected_values(), vec!["apple", "banana"]);
//! ```

pub mod multi;
pub mod single;
