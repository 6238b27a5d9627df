//! Leaf-depth check for general binary trees.

use crate::types::Node;

fn leaves_at<N: Node>(
    arena: &[N],
    node: Option<u32>,
    depth: usize,
    leaf_depth: &mut Option<usize>,
) -> bool {
    let Some(i) = node else {
        return true;
    };
    let n = &arena[i as usize];
    if n.l().is_none() && n.r().is_none() {
        return *leaf_depth.get_or_insert(depth) == depth;
    }
    leaves_at(arena, n.l(), depth + 1, leaf_depth) && leaves_at(arena, n.r(), depth + 1, leaf_depth)
}

/// Whether every root-to-leaf path has the same length.
///
/// A node with a single child is not a leaf; only the missing side is
/// ignored. Empty trees trivially qualify.
pub fn equal_paths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    let mut leaf_depth = None;
    leaves_at(arena, root, 0, &mut leaf_depth)
}
