use crate::key::Key;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::prefix::Prefix;

/// A tree node: either a leaf carrying a complete key and its value, or an
/// inner node carrying a compressed prefix and a child map in one of the four
/// capacity classes. Values are never disguised as node pointers; the enum is
/// the whole story.
pub enum Node<V> {
    Leaf(Leaf<V>),
    Inner(InnerNode<V>),
}

/// A leaf stores the full original key so a lookup can verify its match
/// against the one source of truth, regardless of how much prefix checking
/// happened on the way down.
pub struct Leaf<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
}

/// An inner node: the byte run shared by every key underneath it, plus a
/// child map keyed by the byte that follows that run.
pub struct InnerNode<V> {
    pub(crate) prefix: Prefix,
    pub(crate) children: ChildMap<V>,
}

pub(crate) enum ChildMap<V> {
    Node4(KeyedMapping<Node<V>, 4>),
    Node16(KeyedMapping<Node<V>, 16>),
    Node48(IndexedMapping<Node<V>, 48>),
    Node256(DirectMapping<Node<V>>),
}

impl<V> Leaf<V> {
    pub(crate) fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V> InnerNode<V> {
    /// New inner nodes always start in the smallest class.
    pub(crate) fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            children: ChildMap::Node4(KeyedMapping::new()),
        }
    }

    /// The compressed byte run skipped over by this node.
    pub fn prefix(&self) -> &[u8] {
        self.prefix.as_slice()
    }

    pub fn num_children(&self) -> usize {
        match &self.children {
            ChildMap::Node4(m) => m.num_children(),
            ChildMap::Node16(m) => m.num_children(),
            ChildMap::Node48(m) => m.num_children(),
            ChildMap::Node256(m) => m.num_children(),
        }
    }

    /// Capacity of the current class: 4, 16, 48 or 256.
    pub fn capacity(&self) -> usize {
        match &self.children {
            ChildMap::Node4(m) => m.width(),
            ChildMap::Node16(m) => m.width(),
            ChildMap::Node48(m) => m.width(),
            ChildMap::Node256(m) => m.width(),
        }
    }

    pub(crate) fn class_name(&self) -> &'static str {
        match &self.children {
            ChildMap::Node4(_) => "Node4",
            ChildMap::Node16(_) => "Node16",
            ChildMap::Node48(_) => "Node48",
            ChildMap::Node256(_) => "Node256",
        }
    }

    /// The child keyed by `key`, if any.
    pub fn child(&self, key: u8) -> Option<&Node<V>> {
        match &self.children {
            ChildMap::Node4(m) => m.seek_child(key),
            ChildMap::Node16(m) => m.seek_child(key),
            ChildMap::Node48(m) => m.seek_child(key),
            ChildMap::Node256(m) => m.seek_child(key),
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match &mut self.children {
            ChildMap::Node4(m) => m.seek_child_mut(key),
            ChildMap::Node16(m) => m.seek_child_mut(key),
            ChildMap::Node48(m) => m.seek_child_mut(key),
            ChildMap::Node256(m) => m.seek_child_mut(key),
        }
    }

    /// Attach `node` under `key`, upgrading the class first if the current
    /// one is at capacity. The caller guarantees `key` is not already mapped.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<V>) {
        if self.is_full() {
            self.grow();
        }

        match &mut self.children {
            ChildMap::Node4(m) => m.add_child(key, node),
            ChildMap::Node16(m) => m.add_child(key, node),
            ChildMap::Node48(m) => m.add_child(key, node),
            ChildMap::Node256(m) => m.add_child(key, node),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.num_children() >= self.capacity()
    }

    /// Swap the child map for the next class up, carrying every (byte, child)
    /// pair over unchanged. A pure representation change; the prefix and the
    /// subtrees are untouched.
    fn grow(&mut self) {
        match &mut self.children {
            ChildMap::Node4(m) => {
                self.children = ChildMap::Node16(KeyedMapping::from_resized(m));
            }
            ChildMap::Node16(m) => {
                self.children = ChildMap::Node48(IndexedMapping::from_keyed(m));
            }
            ChildMap::Node48(m) => {
                self.children = ChildMap::Node256(DirectMapping::from_indexed(m));
            }
            ChildMap::Node256(_) => {
                unreachable!("a node256 spans the whole byte domain and cannot fill")
            }
        }
    }

    /// Children in key-byte order for the 48/256 classes, insertion order for
    /// the keyed classes.
    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Node<V>)> + '_> {
        match &self.children {
            ChildMap::Node4(m) => Box::new(m.iter()),
            ChildMap::Node16(m) => Box::new(m.iter()),
            ChildMap::Node48(m) => Box::new(m.iter()),
            ChildMap::Node256(m) => Box::new(m.iter()),
        }
    }
}

impl<V> Node<V> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_inner(&self) -> bool {
        !self.is_leaf()
    }

    /// The stored value, for leaves.
    pub fn value(&self) -> Option<&V> {
        let Node::Leaf(leaf) = self else {
            return None;
        };
        Some(&leaf.value)
    }

    pub fn num_children(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Inner(inner) => inner.num_children(),
        }
    }

    /// Capacity of the node's class; a leaf is always "full" at 0.
    pub fn capacity(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Inner(inner) => inner.capacity(),
        }
    }
}
