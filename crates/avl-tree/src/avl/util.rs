use std::cmp::Ordering;

use tracing::trace;

use crate::types::{BalancedNode, KvNode};
use crate::util::{self as bst, first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r};

#[inline]
fn bf<N: BalancedNode>(arena: &[N], i: u32) -> i8 {
    arena[i as usize].bf()
}

#[inline]
fn set_bf<N: BalancedNode>(arena: &mut [N], i: u32, v: i8) {
    arena[i as usize].set_bf(v);
}

/// Promotes the right child of `x` into `x`'s position.
///
/// `x` becomes the left child of the promoted node and receives its former
/// left subtree. Balance factors of both nodes are recomputed for any
/// pre-rotation state. Returns the tree root, which changes when `x` was the
/// root. A node without a right child is left as is.
pub fn rotate_left<N: BalancedNode>(arena: &mut [N], root: u32, x: u32) -> u32 {
    let Some(y) = get_r(arena, x) else {
        return root;
    };
    trace!(node = x, pivot = y, "rotate left");

    let p = get_p(arena, x);
    let yl = get_l(arena, y);

    set_r(arena, x, yl);
    if let Some(yl) = yl {
        set_p(arena, yl, Some(x));
    }
    set_p(arena, y, p);
    let root = replace_child(arena, root, p, x, y);
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));

    let xbf = bf(arena, x) - 1 - bf(arena, y).max(0);
    let ybf = bf(arena, y) - 1 + xbf.min(0);
    set_bf(arena, x, xbf);
    set_bf(arena, y, ybf);
    root
}

/// Mirror of [`rotate_left`]: promotes the left child of `x`.
pub fn rotate_right<N: BalancedNode>(arena: &mut [N], root: u32, x: u32) -> u32 {
    let Some(y) = get_l(arena, x) else {
        return root;
    };
    trace!(node = x, pivot = y, "rotate right");

    let p = get_p(arena, x);
    let yr = get_r(arena, y);

    set_l(arena, x, yr);
    if let Some(yr) = yr {
        set_p(arena, yr, Some(x));
    }
    set_p(arena, y, p);
    let root = replace_child(arena, root, p, x, y);
    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));

    let xbf = bf(arena, x) + 1 - bf(arena, y).min(0);
    let ybf = bf(arena, y) + 1 + xbf.max(0);
    set_bf(arena, x, xbf);
    set_bf(arena, y, ybf);
    root
}

/// Walks up from a freshly grown `child`, fixing balance factors.
///
/// Stops at the first ancestor whose balance returns to 0 or right after the
/// single (or double) rotation that an ancestor at ±2 requires.
fn rebalance_after_insert<N: BalancedNode>(arena: &mut [N], mut root: u32, mut child: u32) -> u32 {
    while let Some(p) = get_p(arena, child) {
        let pbf = if get_l(arena, p) == Some(child) {
            bf(arena, p) - 1
        } else {
            bf(arena, p) + 1
        };
        set_bf(arena, p, pbf);

        match pbf {
            0 => break,
            -1 | 1 => child = p,
            -2 => {
                if bf(arena, child) > 0 {
                    root = rotate_left(arena, root, child);
                }
                root = rotate_right(arena, root, p);
                break;
            }
            _ => {
                if bf(arena, child) < 0 {
                    root = rotate_right(arena, root, child);
                }
                root = rotate_left(arena, root, p);
                break;
            }
        }
    }
    root
}

/// Links leaf `n` as the left child of `p` and rebalances. Returns the root.
pub fn insert_left<N: BalancedNode>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32 {
    set_bf(arena, n, 0);
    bst::insert_left(arena, n, p);
    rebalance_after_insert(arena, root, n)
}

/// Links leaf `n` as the right child of `p` and rebalances. Returns the root.
pub fn insert_right<N: BalancedNode>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32 {
    set_bf(arena, n, 0);
    bst::insert_right(arena, n, p);
    rebalance_after_insert(arena, root, n)
}

/// Inserts the detached node `n` at its ordered position and rebalances.
///
/// The key of `n` must not already be present; [`super::AvlMap::insert`]
/// handles the update-in-place case before allocating. Returns the new root.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> Option<u32>
where
    N: BalancedNode + KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        set_bf(arena, n, 0);
        return Some(n);
    };

    let mut curr = root;
    loop {
        let less = comparator(arena[n as usize].key(), arena[curr as usize].key()).is_lt();
        let child = if less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(c) => curr = c,
            None if less => return Some(insert_left(arena, root, n, curr)),
            None => return Some(insert_right(arena, root, n, curr)),
        }
    }
}

/// Exchanges the tree positions of `a` and `b`, balance factors included.
///
/// The balance factor describes the position, not the entry, so it travels
/// with the position. Returns the new root.
pub fn node_swap<N: BalancedNode>(arena: &mut [N], root: u32, a: u32, b: u32) -> u32 {
    let root = bst::swap(arena, root, a, b);
    let abf = bf(arena, a);
    let bbf = bf(arena, b);
    set_bf(arena, a, bbf);
    set_bf(arena, b, abf);
    root
}

/// Unlinks node `n` from the tree and rebalances.
///
/// A node with two children first trades places with its in-order
/// predecessor, so the node actually spliced out has at most one child. On
/// return `n` is fully detached (no links, balance 0) and can be reclaimed by
/// the caller. Returns the new root, `None` once the tree is empty.
pub fn remove<N: BalancedNode>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let mut root = root?;

    if let (Some(l), Some(_)) = (get_l(arena, n), get_r(arena, n)) {
        let mut pred = l;
        while let Some(r) = get_r(arena, pred) {
            pred = r;
        }
        trace!(node = n, predecessor = pred, "swap with in-order predecessor");
        root = node_swap(arena, root, n, pred);
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    let Some(p) = p else {
        return child;
    };

    let diff = if get_l(arena, p) == Some(n) {
        set_l(arena, p, child);
        1
    } else {
        set_r(arena, p, child);
        -1
    };
    Some(rebalance_after_remove(arena, root, p, diff))
}

/// Walks up from `node`, whose `diff` side just lost one level of height.
///
/// A balance of ±1 means the subtree kept its height and ends the walk. A
/// balance of 0 means it shrank, so the walk goes on. At ±2 the subtree is
/// rotated; the walk goes on only if the new subtree root ends at balance 0.
fn rebalance_after_remove<N: BalancedNode>(
    arena: &mut [N],
    mut root: u32,
    node: u32,
    mut diff: i8,
) -> u32 {
    let mut node = Some(node);
    while let Some(x) = node {
        let xbf = bf(arena, x) + diff;
        set_bf(arena, x, xbf);

        let top = match xbf {
            -1 | 1 => break,
            0 => x,
            2 => {
                let Some(r) = get_r(arena, x) else {
                    break;
                };
                if bf(arena, r) < 0 {
                    root = rotate_right(arena, root, r);
                }
                root = rotate_left(arena, root, x);
                match get_p(arena, x) {
                    Some(top) if bf(arena, top) == 0 => top,
                    _ => break,
                }
            }
            // -2
            _ => {
                let Some(l) = get_l(arena, x) else {
                    break;
                };
                if bf(arena, l) > 0 {
                    root = rotate_left(arena, root, l);
                }
                root = rotate_right(arena, root, x);
                match get_p(arena, x) {
                    Some(top) if bf(arena, top) == 0 => top,
                    _ => break,
                }
            }
        };

        node = get_p(arena, top);
        if let Some(p) = node {
            diff = if get_l(arena, p) == Some(top) { 1 } else { -1 };
        }
    }
    root
}

fn check_subtree<N: BalancedNode>(arena: &[N], node: u32) -> Result<i32, String> {
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let lh = match l {
        Some(l) => {
            if get_p(arena, l) != Some(node) {
                return Err(format!("Broken parent link on left child of node {node}"));
            }
            check_subtree(arena, l)?
        }
        None => 0,
    };
    let rh = match r {
        Some(r) => {
            if get_p(arena, r) != Some(node) {
                return Err(format!("Broken parent link on right child of node {node}"));
            }
            check_subtree(arena, r)?
        }
        None => 0,
    };

    let expected_bf = rh - lh;
    let actual_bf = i32::from(bf(arena, node));
    if actual_bf != expected_bf {
        return Err(format!(
            "Balance factor mismatch at node {node}: expected {expected_bf}, got {actual_bf}"
        ));
    }
    if !(-1..=1).contains(&actual_bf) {
        return Err(format!("AVL balance violated at node {node}: {actual_bf}"));
    }

    Ok(1 + lh.max(rh))
}

/// Checks links, exact balance factors, the AVL bound and strict key order.
pub fn assert_avl_tree<K, V, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), String>
where
    N: BalancedNode + KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }
    check_subtree(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) != Ordering::Less {
                return Err(format!("Node order violated between nodes {prev} and {i}"));
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
