use avl_tree::avl::{assert_avl_tree, insert, node_swap, remove, rotate_left, rotate_right};
use avl_tree::{AvlMap, AvlNode, Node};

fn arena_of(keys: &[i32]) -> Vec<AvlNode<i32, ()>> {
    keys.iter().map(|&k| AvlNode::new(k, ())).collect()
}

fn link(arena: &mut [AvlNode<i32, ()>], parent: u32, l: Option<u32>, r: Option<u32>) {
    arena[parent as usize].l = l;
    arena[parent as usize].r = r;
    for c in [l, r].into_iter().flatten() {
        arena[c as usize].p = Some(parent);
    }
}

fn key_at<V>(map: &AvlMap<i32, V>, idx: Option<u32>) -> Option<i32> {
    idx.map(|i| map.arena()[i as usize].k)
}

fn node<V>(map: &AvlMap<i32, V>, key: i32) -> &AvlNode<i32, V> {
    map.arena()
        .iter()
        .find(|n| n.k == key)
        .expect("key must be stored")
}

#[test]
fn rotate_left_at_root_matrix() {
    // 1 -> 2 -> 3 chain leaning right.
    let mut arena = arena_of(&[1, 2, 3]);
    link(&mut arena, 0, None, Some(1));
    link(&mut arena, 1, None, Some(2));
    arena[0].bf = 2;
    arena[1].bf = 1;

    let root = rotate_left(&mut arena, 0, 0);
    assert_eq!(root, 1);
    assert_eq!(arena[1].p, None);
    assert_eq!(arena[1].l, Some(0));
    assert_eq!(arena[1].r, Some(2));
    assert_eq!(arena[0].p, Some(1));
    assert_eq!(arena[0].r, None);
    assert_eq!([arena[0].bf, arena[1].bf, arena[2].bf], [0, 0, 0]);
}

#[test]
fn rotate_left_even_pivot_matrix() {
    // 2 with right child 4(3, 5): pivot balance 0 before rotation.
    let mut arena = arena_of(&[2, 4, 3, 5]);
    link(&mut arena, 0, None, Some(1));
    link(&mut arena, 1, Some(2), Some(3));
    arena[0].bf = 2;
    arena[1].bf = 0;

    let root = rotate_left(&mut arena, 0, 0);
    assert_eq!(root, 1);
    assert_eq!(arena[0].r, Some(2));
    assert_eq!(arena[2].p, Some(0));
    assert_eq!(arena[0].bf, 1);
    assert_eq!(arena[1].bf, -1);
}

#[test]
fn rotate_right_at_root_matrix() {
    let mut arena = arena_of(&[3, 2, 1]);
    link(&mut arena, 0, Some(1), None);
    link(&mut arena, 1, Some(2), None);
    arena[0].bf = -2;
    arena[1].bf = -1;

    let root = rotate_right(&mut arena, 0, 0);
    assert_eq!(root, 1);
    assert_eq!(arena[1].l, Some(2));
    assert_eq!(arena[1].r, Some(0));
    assert_eq!(arena[0].p, Some(1));
    assert_eq!([arena[0].bf, arena[1].bf, arena[2].bf], [0, 0, 0]);
}

#[test]
fn rotate_below_root_relinks_grandparent_matrix() {
    // 10(1 -> 2 -> 3, 11)
    let mut arena = arena_of(&[10, 1, 2, 3, 11]);
    link(&mut arena, 0, Some(1), Some(4));
    link(&mut arena, 1, None, Some(2));
    link(&mut arena, 2, None, Some(3));
    arena[1].bf = 2;
    arena[2].bf = 1;

    let root = rotate_left(&mut arena, 0, 1);
    assert_eq!(root, 0);
    assert_eq!(arena[0].l, Some(2));
    assert_eq!(arena[2].p, Some(0));
    assert_eq!(arena[2].l, Some(1));
    assert_eq!(arena[1].p(), Some(2));
}

#[test]
fn rotate_without_pivot_is_noop_matrix() {
    let mut arena = arena_of(&[1]);
    assert_eq!(rotate_left(&mut arena, 0, 0), 0);
    assert_eq!(rotate_right(&mut arena, 0, 0), 0);
    assert_eq!(arena[0].l, None);
    assert_eq!(arena[0].r, None);
}

#[test]
fn insert_ascending_single_rotation_matrix() {
    let mut map = AvlMap::new();
    map.insert(1, ());
    map.insert(2, ());
    assert_eq!(key_at(&map, map.root_index()), Some(1));
    map.insert(3, ());

    let root = map.root_index();
    assert_eq!(key_at(&map, root), Some(2));
    assert_eq!(key_at(&map, node(&map, 2).l), Some(1));
    assert_eq!(key_at(&map, node(&map, 2).r), Some(3));
    for k in 1..=3 {
        assert_eq!(node(&map, k).bf, 0);
    }
    map.assert_valid().unwrap();
}

#[test]
fn insert_zigzag_double_rotation_matrix() {
    let mut map = AvlMap::new();
    for k in [3, 1, 2] {
        map.insert(k, ());
    }

    assert_eq!(key_at(&map, map.root_index()), Some(2));
    assert_eq!(key_at(&map, node(&map, 2).l), Some(1));
    assert_eq!(key_at(&map, node(&map, 2).r), Some(3));
    for k in 1..=3 {
        assert_eq!(node(&map, k).bf, 0);
    }

    let mut mirrored = AvlMap::new();
    for k in [1, 3, 2] {
        mirrored.insert(k, ());
    }
    assert_eq!(key_at(&mirrored, mirrored.root_index()), Some(2));
    mirrored.assert_valid().unwrap();
}

#[test]
fn insert_stops_when_balance_returns_to_zero_matrix() {
    let mut map = AvlMap::new();
    for k in [2, 1, 3, 4] {
        map.insert(k, ());
    }
    assert_eq!(node(&map, 2).bf, 1);
    assert_eq!(node(&map, 3).bf, 1);

    // Growing the short side evens out the root; 3 keeps its lean.
    map.insert(0, ());
    assert_eq!(node(&map, 1).bf, -1);
    assert_eq!(node(&map, 2).bf, 0);
    assert_eq!(node(&map, 3).bf, 1);

    // A rotation at 3 restores the subtree height, so the root is untouched.
    map.insert(5, ());
    assert_eq!(key_at(&map, map.root_index()), Some(2));
    assert_eq!(key_at(&map, node(&map, 2).r), Some(4));
    assert_eq!(node(&map, 2).bf, 0);
    for k in [3, 4, 5] {
        assert_eq!(node(&map, k).bf, 0);
    }
    map.assert_valid().unwrap();
}

#[test]
fn remove_root_of_complete_tree_matrix() {
    let mut map = AvlMap::new();
    for k in [4, 2, 6, 1, 3, 5, 7] {
        map.insert(k, k * 10);
    }
    assert_eq!(map.height(), 3);

    assert_eq!(map.remove(&4), Some(40));
    assert_eq!(map.height(), 3);
    // The in-order predecessor took the root position.
    assert_eq!(key_at(&map, map.root_index()), Some(3));
    assert_eq!(node(&map, 2).bf, -1);
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 5, 6, 7]
    );
    map.assert_valid().unwrap();
}

#[test]
fn remove_rotation_stops_when_pivot_was_even_matrix() {
    // 2(1, 4(3, 5)): removing 1 rotates at 2 around an even pivot; height
    // of the subtree is unchanged so no further propagation.
    let mut map = AvlMap::new();
    for k in [2, 1, 4, 3, 5] {
        map.insert(k, ());
    }
    assert_eq!(node(&map, 2).bf, 1);
    assert_eq!(node(&map, 4).bf, 0);

    map.remove(&1);
    assert_eq!(key_at(&map, map.root_index()), Some(4));
    assert_eq!(node(&map, 4).bf, -1);
    assert_eq!(node(&map, 2).bf, 1);
    assert_eq!(key_at(&map, node(&map, 2).r), Some(3));
    assert_eq!(map.height(), 3);
    map.assert_valid().unwrap();
}

#[test]
fn remove_rotation_continues_when_subtree_shrinks_matrix() {
    // 5(2(1, 3(_, 4)), 7(6, 8(_, 9))): removing 1 rotates the left subtree
    // down to height 2, so the root must learn it is now right-heavy.
    let mut map = AvlMap::new();
    for k in [5, 2, 7, 1, 3, 6, 8, 4, 9] {
        map.insert(k, ());
    }
    assert_eq!(node(&map, 5).bf, 0);
    assert_eq!(node(&map, 2).bf, 1);
    assert_eq!(node(&map, 3).bf, 1);

    map.remove(&1);
    assert_eq!(key_at(&map, map.root_index()), Some(5));
    assert_eq!(key_at(&map, node(&map, 5).l), Some(3));
    assert_eq!(node(&map, 3).bf, 0);
    assert_eq!(node(&map, 5).bf, 1);
    map.assert_valid().unwrap();
}

#[test]
fn remove_double_rotation_matrix() {
    // 2(1, 4(3, _)): removing 1 needs a right-left double rotation.
    let mut map = AvlMap::new();
    for k in [2, 1, 4, 3] {
        map.insert(k, ());
    }
    assert_eq!(node(&map, 4).bf, -1);

    map.remove(&1);
    assert_eq!(key_at(&map, map.root_index()), Some(3));
    assert_eq!(key_at(&map, node(&map, 3).l), Some(2));
    assert_eq!(key_at(&map, node(&map, 3).r), Some(4));
    for k in 2..=4 {
        assert_eq!(node(&map, k).bf, 0);
    }
    map.assert_valid().unwrap();
}

#[test]
fn remove_stops_when_balance_becomes_one_matrix() {
    // Removing a leaf under an even node leaves that node leaning; its
    // height is unchanged so ancestors keep their balance.
    let mut map = AvlMap::new();
    for k in [4, 2, 6, 1, 3, 5, 7] {
        map.insert(k, ());
    }
    map.remove(&7);
    assert_eq!(node(&map, 6).bf, -1);
    assert_eq!(node(&map, 4).bf, 0);
    map.assert_valid().unwrap();
}

#[test]
fn remove_cascades_through_even_nodes_matrix() {
    let mut map = AvlMap::new();
    for k in [4, 2, 6, 1, 3, 5, 7] {
        map.insert(k, ());
    }
    map.remove(&7);
    map.remove(&5);
    // 6 became a leaf: its height dropped and the root now leans left.
    assert_eq!(node(&map, 6).bf, 0);
    assert_eq!(node(&map, 4).bf, -1);
    map.assert_valid().unwrap();
}

#[test]
fn raw_arena_insert_remove_matrix() {
    let keys = [8, 3, 10, 1, 6, 14, 4, 7, 13];
    let mut arena = arena_of(&keys);
    let mut root = None;
    for i in 0..keys.len() as u32 {
        root = insert::<i32, (), _, _>(&mut arena, root, i, &i32::cmp);
        assert_avl_tree::<i32, (), _, _>(&arena, root, &i32::cmp).unwrap();
    }

    // 3 has two children; its predecessor 1 takes its place.
    let three = 1;
    root = remove(&mut arena, root, three);
    assert_eq!(arena[three as usize].p, None);
    assert_eq!(arena[three as usize].l, None);
    assert_eq!(arena[three as usize].r, None);
    assert_avl_tree::<i32, (), _, _>(&arena, root, &i32::cmp).unwrap();

    for i in (0..keys.len() as u32).filter(|&i| i != three) {
        root = remove(&mut arena, root, i);
        assert_avl_tree::<i32, (), _, _>(&arena, root, &i32::cmp).unwrap();
    }
    assert_eq!(root, None);
}

#[test]
fn node_swap_exchanges_balance_matrix() {
    // 2(1, 3(_, 4))
    let mut arena = arena_of(&[2, 1, 3, 4]);
    link(&mut arena, 0, Some(1), Some(2));
    link(&mut arena, 2, None, Some(3));
    arena[0].bf = 1;
    arena[2].bf = 1;

    let root = node_swap(&mut arena, 0, 0, 1);
    assert_eq!(root, 1);
    assert_eq!(arena[1].bf, 1);
    assert_eq!(arena[0].bf, 0);
    assert_eq!(arena[1].l, Some(0));
    assert_eq!(arena[0].p, Some(1));
}

#[test]
fn assert_avl_tree_reports_corruption_matrix() {
    let mut arena = arena_of(&[2, 1, 3]);
    link(&mut arena, 0, Some(1), Some(2));
    assert!(assert_avl_tree::<i32, (), _, _>(&arena, Some(0), &i32::cmp).is_ok());

    arena[0].bf = 1;
    let err = assert_avl_tree::<i32, (), _, _>(&arena, Some(0), &i32::cmp).unwrap_err();
    assert!(err.contains("Balance factor mismatch"), "{err}");

    arena[0].bf = 0;
    arena[2].k = 0;
    let err = assert_avl_tree::<i32, (), _, _>(&arena, Some(0), &i32::cmp).unwrap_err();
    assert!(err.contains("order"), "{err}");

    arena[2].k = 3;
    arena[2].p = None;
    let err = assert_avl_tree::<i32, (), _, _>(&arena, Some(0), &i32::cmp).unwrap_err();
    assert!(err.contains("parent link"), "{err}");
}
