use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::TreeError;
use crate::types::{KvNode, Node};
use crate::util::{self as bst, first, last, next};

use super::types::AvlNode;
use super::util;

/// Ordered map backed by an arena-allocated AVL tree.
///
/// Keys are unique. Inserting an existing key overwrites its value in place
/// without touching the tree shape. Nodes are stored densely: removing an
/// entry moves the last arena slot into the freed one, so the arena never
/// holds dead nodes.
pub struct AvlMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K: Ord, V> AvlMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Height in nodes; 0 for an empty map.
    pub fn height(&self) -> usize {
        bst::height(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[AvlNode<K, V>] {
        &self.arena
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn find(&self, key: &K) -> Option<u32> {
        bst::find::<K, V, _, _>(&self.arena, self.root, key, &self.comparator)
    }

    fn alloc(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        (self.arena.len() - 1) as u32
    }

    /// Takes the detached node at `idx` out of the arena.
    fn release(&mut self, idx: u32) -> AvlNode<K, V> {
        let last = (self.arena.len() - 1) as u32;
        if idx != last {
            self.root = bst::relocate(&mut self.arena, self.root, last, idx);
        }
        self.arena.swap_remove(idx as usize)
    }

    /// Inserts `key` with `value`, returning the previous value if the key
    /// was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            self.root = Some(self.alloc(key, value));
            return None;
        };

        let mut curr = root;
        loop {
            let ord = (self.comparator)(&key, self.arena[curr as usize].key());
            let child = match ord {
                Ordering::Equal => return Some(self.arena[curr as usize].set_value(value)),
                Ordering::Less => self.arena[curr as usize].l(),
                Ordering::Greater => self.arena[curr as usize].r(),
            };
            if let Some(c) = child {
                curr = c;
                continue;
            }

            let idx = self.alloc(key, value);
            let root = if ord.is_lt() {
                util::insert_left(&mut self.arena, root, idx, curr)
            } else {
                util::insert_right(&mut self.arena, root, idx, curr)
            };
            self.root = Some(root);
            return None;
        }
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let idx = self.find(key)?;
        self.root = util::remove(&mut self.arena, self.root, idx);
        Some(self.release(idx).into_entry())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    /// Like [`get`](Self::get), but reports a missing key as an error.
    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, TreeError> {
        self.get_mut(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        first(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        last(&self.arena, self.root).map(|i| self.entry(i))
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        let node = &self.arena[idx as usize];
        (node.key(), node.value())
    }

    /// In-order iterator over entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            curr: first(&self.arena, self.root),
            remaining: self.arena.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Recomputes subtree heights and checks the AVL bound at every node.
    pub fn is_balanced(&self) -> bool {
        bst::is_balanced(&self.arena, self.root)
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        util::assert_avl_tree::<K, V, _, _>(&self.arena, self.root, &self.comparator)?;
        let reachable = bst::size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(format!(
                "Arena holds {} nodes but {reachable} are reachable",
                self.arena.len()
            ));
        }
        Ok(())
    }
}

/// In-order iterator returned by [`AvlMap::iter`].
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.curr?;
        self.curr = next(self.arena, idx);
        self.remaining -= 1;
        let node = &self.arena[idx as usize];
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C> fmt::Debug for AvlMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
