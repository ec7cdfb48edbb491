use crate::mapping::NodeMapping;
use crate::utils::u8_keys::find_key_position;

/// Maps a key byte to a node through parallel arrays of keys and children,
/// filled in insertion order. Backs the 4- and 16-wide node classes.
///
/// Since nothing is ever removed, the first `num_children` slots are exactly
/// the live ones; key bytes past that point are stale and are masked out of
/// every search by the occupancy count.
pub(crate) struct KeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[Option<N>; WIDTH]>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> KeyedMapping<N, WIDTH> {
    pub(crate) fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: Box::new(std::array::from_fn(|_| None)),
            num_children: 0,
        }
    }

    /// Upgrade from a narrower keyed mapping, preserving every (byte, child)
    /// pair and its slot order. The old mapping is left empty.
    pub(crate) fn from_resized<const OLD_WIDTH: usize>(
        old: &mut KeyedMapping<N, OLD_WIDTH>,
    ) -> Self {
        debug_assert!(WIDTH > OLD_WIDTH);
        let mut new = Self::new();
        for i in 0..old.num_children as usize {
            new.keys[i] = old.keys[i];
            new.children[i] = old.children[i].take();
        }
        new.num_children = old.num_children;
        old.num_children = 0;
        new
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize)
            .filter_map(move |i| self.children[i].as_ref().map(|child| (self.keys[i], child)))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for KeyedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let idx = self.num_children as usize;
        debug_assert!(idx < WIDTH, "add_child: no space left");
        debug_assert!(self.seek_child(key).is_none(), "duplicate child byte");
        self.keys[idx] = key;
        self.children[idx] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = find_key_position::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = find_key_position::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_mut()
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline(always)]
    fn width(&self) -> usize {
        WIDTH
    }
}
