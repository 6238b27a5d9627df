//! Plain binary-search-tree functions over an arena.
//!
//! These are the unbalanced base the AVL layer builds on: ordered descent,
//! in-order neighbours, structural swap and link maintenance. Nothing here
//! touches balance factors.

pub mod swap;

use std::cmp::Ordering;

use crate::types::{KvNode, Node};

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points whichever child slot of `parent` holds `old` at `new`.
///
/// With no parent, `old` was the root and `new` becomes the root.
/// Returns the root.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    root: u32,
    parent: Option<u32>,
    old: u32,
    new: u32,
) -> u32 {
    let Some(p) = parent else {
        return new;
    };
    if get_l(arena, p) == Some(old) {
        set_l(arena, p, Some(new));
    } else {
        set_r(arena, p, Some(new));
    }
    root
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    while let Some(p) = get_p(arena, curr) {
        if get_l(arena, p) == Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    while let Some(p) = get_p(arena, curr) {
        if get_r(arena, p) == Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + size(arena, get_l(arena, i)) + size(arena, get_r(arena, i))
    })
}

/// Height counted in nodes; an empty tree has height 0.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

fn balanced_height<N: Node>(arena: &[N], root: Option<u32>) -> Option<usize> {
    let Some(i) = root else {
        return Some(0);
    };
    let lh = balanced_height(arena, get_l(arena, i))?;
    let rh = balanced_height(arena, get_r(arena, i))?;
    (lh.abs_diff(rh) <= 1).then(|| 1 + lh.max(rh))
}

/// Whether every node's subtrees differ in height by at most one.
///
/// Heights are recomputed from the links; stored balance factors are not
/// consulted, so this works on plain trees as well.
pub fn is_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    balanced_height(arena, root).is_some()
}

/// Finds a node by key.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, arena[i as usize].key()) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Attaches leaf `node` as the left child of `parent`, whose left slot must be empty.
pub fn insert_left<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    set_l(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Attaches leaf `node` as the right child of `parent`, whose right slot must be empty.
pub fn insert_right<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    set_r(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Unbalanced BST insert of an already allocated, detached `node`.
///
/// Keys comparing equal descend to the right. Returns the new root.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, node: u32, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut curr) = root else {
        return Some(node);
    };

    loop {
        let less = comparator(arena[node as usize].key(), arena[curr as usize].key()).is_lt();
        let child = if less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(c) => curr = c,
            None => {
                if less {
                    insert_left(arena, node, curr);
                } else {
                    insert_right(arena, node, curr);
                }
                return root;
            }
        }
    }
}

/// Repoints every link that references slot `from` at slot `to`.
///
/// Call while the node still sits at `from`, right before it is moved
/// (`swap_remove` compaction). Its own links are left untouched.
/// Returns the new root.
pub fn relocate<N: Node>(arena: &mut [N], root: Option<u32>, from: u32, to: u32) -> Option<u32> {
    let p = get_p(arena, from);
    let l = get_l(arena, from);
    let r = get_r(arena, from);

    if let Some(l) = l {
        set_p(arena, l, Some(to));
    }
    if let Some(r) = r {
        set_p(arena, r, Some(to));
    }
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(from) {
                set_l(arena, p, Some(to));
            } else {
                set_r(arena, p, Some(to));
            }
            root
        }
        None if root == Some(from) => Some(to),
        None => root,
    }
}
