//! An append-only ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An ordered set of keys kept height-balanced on every insert.
///
/// Keys can only be added. Inserting a key that is already present leaves
/// the tree untouched.
///
/// ```
/// use city_planner::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert("Mall");
/// tree.insert("Airport");
/// tree.insert("Park");
/// assert!(!tree.insert("Mall"));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["Airport", "Mall", "Park"]);
/// ```
pub struct AvlTree<K> {
    root: Link<K>,
    num_nodes: usize,
    marker: PhantomData<Box<Node<K>>>,
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    parent: Link<K>,
    height: usize,
}

type NodePtr<K> = NonNull<Node<K>>;
type Link<K> = Option<NodePtr<K>>;
type LinkPtr<K> = NonNull<Link<K>>;

/// An in-order iterator over the keys of an [`AvlTree`].
pub struct Iter<'a, K> {
    next: Link<K>,
    remaining: usize,
    marker: PhantomData<&'a Node<K>>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
            marker: PhantomData,
        }
    }

    /// Returns a reference to the key in the tree that is equal to the given one.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key)
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.key)
    }

    /// Returns true if the tree contains the key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a key into the tree and restores the AVL condition.
    /// Returns false, leaving the tree unchanged, if the key was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let Some((parent, mut link_ptr)) = self.find_insert_pos(&key) else {
            return false;
        };
        let node_ptr = Node::create(parent, key);
        unsafe {
            *link_ptr.as_mut() = Some(node_ptr);
        }
        self.num_nodes += 1;
        self.rebalance_after_insert(parent, node_ptr);
        true
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_ptr) = self.root {
                assert!(root_ptr.as_ref().parent.is_none());
            }

            let mut num_nodes = 0;
            self.walk(
                |node_ptr| {
                    let mut left_height = 0;
                    let mut right_height = 0;

                    if let Some(left_ptr) = node_ptr.as_ref().left {
                        assert!(left_ptr.as_ref().parent == Some(node_ptr));
                        assert!(left_ptr.as_ref().key < node_ptr.as_ref().key);
                        left_height = left_ptr.as_ref().height;
                    }

                    if let Some(right_ptr) = node_ptr.as_ref().right {
                        assert!(right_ptr.as_ref().parent == Some(node_ptr));
                        assert!(right_ptr.as_ref().key > node_ptr.as_ref().key);
                        right_height = right_ptr.as_ref().height;
                    }

                    assert_eq!(
                        node_ptr.as_ref().height,
                        1 + cmp::max(left_height, right_height)
                    );

                    // AVL condition
                    assert!(left_height <= right_height + 1);
                    assert!(right_height <= left_height + 1);

                    num_nodes += 1;
                },
                |_| {},
            );

            assert_eq!(num_nodes, self.num_nodes);
            assert_eq!(self.iter().count(), self.num_nodes);
        }
    }

    fn find<Q>(&self, key: &Q) -> Link<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match key.cmp(node_ptr.as_ref().key.borrow()) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    // Returns the parent of the new node and the empty link it will occupy,
    // or None if the key is already present.
    fn find_insert_pos(&mut self, key: &K) -> Option<(Link<K>, LinkPtr<K>)> {
        let mut parent: Link<K> = None;
        let mut link_ptr: LinkPtr<K> = NonNull::from(&mut self.root);
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                link_ptr = match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => return None,
                    Ordering::Less => NonNull::from(&mut node_ptr.as_mut().left),
                    Ordering::Greater => NonNull::from(&mut node_ptr.as_mut().right),
                };
                parent = Some(node_ptr);
            }
        }
        Some((parent, link_ptr))
    }

    // Walks from the parent of the inserted node up to the root, fixing heights.
    // A single (possibly double) rotation restores the subtree to its height
    // before the insert, so the walk stops after the first one.
    fn rebalance_after_insert(&mut self, start_from: Link<K>, inserted: NodePtr<K>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            if self.rebalance_node(node_ptr, inserted) {
                break;
            }
            current = parent;
        }
    }

    /// Rotates at the given node if its balance factor left [-1, 1] after inserting
    /// `inserted` below it, otherwise just recomputes its height.
    /// The rotation case is picked by comparing the inserted key with the key of
    /// the heavy child. Returns whether a rotation happened.
    fn rebalance_node(&mut self, node_ptr: NodePtr<K>, inserted: NodePtr<K>) -> bool {
        unsafe {
            let balance = Self::balance_factor(node_ptr);
            debug_assert!((-2..=2).contains(&balance));
            if balance > 1 {
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    // Left-right case
                    if inserted.as_ref().key > left_ptr.as_ref().key {
                        self.rotate_left(left_ptr);
                    }
                    self.rotate_right(node_ptr);
                    return true;
                }
            } else if balance < -1 {
                if let Some(right_ptr) = node_ptr.as_ref().right {
                    // Right-left case
                    if inserted.as_ref().key < right_ptr.as_ref().key {
                        self.rotate_right(right_ptr);
                    }
                    self.rotate_left(node_ptr);
                    return true;
                }
            }
            Self::adjust_height(node_ptr);
            false
        }
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<K>) {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().right else {
                return;
            };
            let inner = pivot_ptr.as_ref().left;
            node_ptr.as_mut().right = inner;
            if let Some(mut inner_ptr) = inner {
                inner_ptr.as_mut().parent = Some(node_ptr);
            }

            let parent = node_ptr.as_ref().parent;
            pivot_ptr.as_mut().parent = parent;
            self.replace_child(parent, node_ptr, pivot_ptr);

            pivot_ptr.as_mut().left = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::adjust_height(node_ptr);
            Self::adjust_height(pivot_ptr);
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<K>) {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().left else {
                return;
            };
            let inner = pivot_ptr.as_ref().right;
            node_ptr.as_mut().left = inner;
            if let Some(mut inner_ptr) = inner {
                inner_ptr.as_mut().parent = Some(node_ptr);
            }

            let parent = node_ptr.as_ref().parent;
            pivot_ptr.as_mut().parent = parent;
            self.replace_child(parent, node_ptr, pivot_ptr);

            pivot_ptr.as_mut().right = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::adjust_height(node_ptr);
            Self::adjust_height(pivot_ptr);
        }
    }
}

impl<K> AvlTree<K> {
    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree. An empty tree has height 0, a single node height 1.
    pub fn height(&self) -> usize {
        Self::height_of(self.root)
    }

    /// Removes all keys, deallocating all memory.
    pub fn clear(&mut self) {
        self.walk(|_| {}, |node_ptr| unsafe { Node::destroy(node_ptr) });
        self.root = None;
        self.num_nodes = 0;
    }

    /// Gets an iterator over the keys in ascending order.
    /// The iterator is lazy; calling `iter` again starts over from the smallest key.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            next: self.root.map(leftmost),
            remaining: self.num_nodes,
            marker: PhantomData,
        }
    }

    fn height_of(link: Link<K>) -> usize {
        match link {
            None => 0,
            Some(node_ptr) => unsafe { node_ptr.as_ref().height },
        }
    }

    fn balance_factor(node_ptr: NodePtr<K>) -> isize {
        unsafe {
            Self::height_of(node_ptr.as_ref().left) as isize
                - Self::height_of(node_ptr.as_ref().right) as isize
        }
    }

    fn adjust_height(mut node_ptr: NodePtr<K>) {
        unsafe {
            node_ptr.as_mut().height = 1 + cmp::max(
                Self::height_of(node_ptr.as_ref().left),
                Self::height_of(node_ptr.as_ref().right),
            );
        }
    }

    // Points the link that referred to `old` (a child slot of `parent`, or the
    // root) at `new`.
    unsafe fn replace_child(&mut self, parent: Link<K>, old: NodePtr<K>, new: NodePtr<K>) {
        match parent {
            None => self.root = Some(new),
            Some(mut parent_ptr) => {
                if parent_ptr.as_ref().left == Some(old) {
                    parent_ptr.as_mut().left = Some(new);
                } else {
                    parent_ptr.as_mut().right = Some(new);
                }
            }
        }
    }

    // Depth-first walk without recursion or an explicit stack.
    fn walk<Pre, Post>(&self, mut preorder: Pre, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<K>),
        Post: FnMut(NodePtr<K>),
    {
        let Some(mut node_ptr) = self.root else {
            return;
        };
        let mut dir = Direction::FromParent;
        loop {
            match dir {
                Direction::FromParent => {
                    preorder(node_ptr);
                    match unsafe { node_ptr.as_ref().left } {
                        Some(left_ptr) => node_ptr = left_ptr,
                        None => dir = Direction::FromLeft,
                    }
                }
                Direction::FromLeft => match unsafe { node_ptr.as_ref().right } {
                    Some(right_ptr) => {
                        node_ptr = right_ptr;
                        dir = Direction::FromParent;
                    }
                    None => dir = Direction::FromRight,
                },
                Direction::FromRight => {
                    // Postorder is used for node deletion,
                    // so the node pointer must not be touched after the call.
                    let parent = unsafe { node_ptr.as_ref().parent };
                    match parent {
                        Some(parent_ptr) => {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        }
                        None => {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

fn leftmost<K>(mut node_ptr: NodePtr<K>) -> NodePtr<K> {
    while let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
        node_ptr = left_ptr;
    }
    node_ptr
}

fn successor<K>(node_ptr: NodePtr<K>) -> Link<K> {
    unsafe {
        if let Some(right_ptr) = node_ptr.as_ref().right {
            return Some(leftmost(right_ptr));
        }
        let mut child_ptr = node_ptr;
        let mut parent = child_ptr.as_ref().parent;
        while let Some(parent_ptr) = parent {
            if parent_ptr.as_ref().left == Some(child_ptr) {
                break;
            }
            child_ptr = parent_ptr;
            parent = parent_ptr.as_ref().parent;
        }
        parent
    }
}

impl<K> Node<K> {
    fn create(parent: Link<K>, key: K) -> NodePtr<K> {
        let boxed = Box::new(Node {
            key,
            parent,
            left: None,
            right: None,
            height: 1,
        });
        NonNull::from(Box::leak(boxed))
    }

    unsafe fn destroy(node_ptr: NodePtr<K>) {
        drop(Box::from_raw(node_ptr.as_ptr()));
    }
}

impl<K> Drop for AvlTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

// The tree exclusively owns its nodes; the raw links never alias another tree.
unsafe impl<K: Send> Send for AvlTree<K> {}
unsafe impl<K: Sync> Sync for AvlTree<K> {}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node_ptr = self.next?;
        self.next = successor(node_ptr);
        self.remaining -= 1;
        Some(&unsafe { &*node_ptr.as_ptr() }.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

unsafe impl<K: Sync> Send for Iter<'_, K> {}
unsafe impl<K: Sync> Sync for Iter<'_, K> {}
