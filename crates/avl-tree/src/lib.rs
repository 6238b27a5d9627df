//! Arena-based AVL tree.
//!
//! Nodes live in a `Vec`; every link is an `Option<u32>` index into it. The
//! crate is layered:
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`], [`KvNode`] and [`BalancedNode`] traits |
//! [`util`] | Unbalanced BST base: `find`, `first`/`last`, `next`/`prev`, `swap`, `relocate` |
//! [`avl`] | Rotations, rebalancing insert/remove, `node_swap`, [`AvlMap`] |
//! [`equal_paths`](mod@equal_paths) | Equal leaf-depth check for any binary tree |
//!
//! ```
//! use avl_tree::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for k in [1, 2, 3] {
//!     map.insert(k, k * 10);
//! }
//! assert_eq!(map.get(&2), Some(&20));
//! assert_eq!(map.height(), 2);
//! assert_eq!(map.remove(&2), Some(20));
//! assert!(map.assert_valid().is_ok());
//! ```

pub mod avl;
pub mod equal_paths;
pub mod error;
pub mod tree_node;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode};
pub use equal_paths::equal_paths;
pub use error::TreeError;
pub use tree_node::TreeNode;
pub use types::{BalancedNode, KvNode, Node};
