//! Node trait definitions.
//!
//! Nodes live in a caller-owned arena (`Vec<N>`); every link is an
//! `Option<u32>` index into that arena. Child links own the subtree, the
//! parent link is only a back-reference used when walking upward.

/// Parent / left / right links.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value access for nodes stored in ordered trees.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V) -> V;
}

/// Nodes that carry an AVL balance factor.
///
/// The factor is `height(right) - height(left)`.
pub trait BalancedNode: Node {
    fn bf(&self) -> i8;
    fn set_bf(&mut self, bf: i8);
}
