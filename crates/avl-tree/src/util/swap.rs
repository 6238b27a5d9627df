use crate::types::Node;

use super::{get_l, get_p, get_r, replace_child, set_l, set_p, set_r};

#[inline]
fn adopt<N: Node>(arena: &mut [N], child: Option<u32>, parent: u32) {
    if let Some(c) = child {
        set_p(arena, c, Some(parent));
    }
}

/// Swaps the tree positions of nodes `x` and `y`.
///
/// Every link into either node, and the nodes' own parent/left/right links,
/// are exchanged; keys and values stay with their nodes. Handles the case
/// where one node is the parent of the other and the case where both share a
/// parent. Returns the new root.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    // When adjacent, `a` is the parent of `b`.
    let (a, b) = if get_p(arena, x) == Some(y) {
        (y, x)
    } else {
        (x, y)
    };

    let ap = get_p(arena, a);
    let al = get_l(arena, a);
    let ar = get_r(arena, a);
    let bp = get_p(arena, b);
    let bl = get_l(arena, b);
    let br = get_r(arena, b);
    let adjacent = bp == Some(a);

    let mut root = root;
    match (ap, bp) {
        (Some(p), Some(q)) if p == q => {
            let pl = get_l(arena, p);
            let pr = get_r(arena, p);
            set_l(arena, p, pr);
            set_r(arena, p, pl);
        }
        _ => {
            root = replace_child(arena, root, ap, a, b);
            if !adjacent {
                root = replace_child(arena, root, bp, b, a);
            }
        }
    }

    if adjacent {
        if al == Some(b) {
            set_l(arena, b, Some(a));
            set_r(arena, b, ar);
            adopt(arena, ar, b);
        } else {
            set_r(arena, b, Some(a));
            set_l(arena, b, al);
            adopt(arena, al, b);
        }
        set_p(arena, a, Some(b));
    } else {
        set_l(arena, b, al);
        set_r(arena, b, ar);
        adopt(arena, al, b);
        adopt(arena, ar, b);
        set_p(arena, a, bp);
    }
    set_p(arena, b, ap);

    set_l(arena, a, bl);
    set_r(arena, a, br);
    adopt(arena, bl, a);
    adopt(arena, br, a);

    root
}
