//! AVL balancing layer: rotations, insert/remove rebalancing and the
//! [`AvlMap`] built on them.

pub mod map;
pub mod types;
pub mod util;

pub use map::{AvlMap, Iter};
pub use types::AvlNode;
pub use util::{
    assert_avl_tree, insert, insert_left, insert_right, node_swap, remove, rotate_left,
    rotate_right,
};
