use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::key::{Key, INVALID_VALUE};
use crate::node::Node;
use crate::tree::ArtIndex;

/// Walk the whole tree and assert the structural invariants hold:
/// every leaf's key starts with the bytes consumed on the way to it, inner
/// nodes hold between 2 children and their class capacity, and prefixes are
/// maximal (a shorter run would have been compressed away).
fn validate_tree(index: &ArtIndex) {
    if let Some(root) = index.root() {
        validate_node(root, &mut Vec::new());
    }
}

fn validate_node(node: &Node<u64>, path: &mut Vec<u8>) {
    match node {
        Node::Leaf(leaf) => {
            assert_ne!(*leaf.value(), INVALID_VALUE, "reserved value stored in a leaf");
            assert!(
                leaf.key().as_slice().starts_with(path),
                "leaf key {:?} does not lie under its path {:02x?}",
                leaf.key(),
                path
            );
        }
        Node::Inner(inner) => {
            assert!(
                inner.num_children() >= 2,
                "inner node with fewer than two children should not exist without deletes"
            );
            assert!(
                inner.num_children() <= inner.capacity(),
                "occupancy {} exceeds class capacity {}",
                inner.num_children(),
                inner.capacity()
            );

            path.extend_from_slice(inner.prefix());
            let mut seen = std::collections::BTreeSet::new();
            for byte in 0..=255u8 {
                if let Some(child) = inner.child(byte) {
                    assert!(seen.insert(byte));
                    path.push(byte);
                    validate_node(child, path);
                    path.pop();
                }
            }
            assert_eq!(seen.len(), inner.num_children(), "child count disagrees with map");
            path.truncate(path.len() - inner.prefix().len());
        }
    }
}

/// Fixed-width byte keys of a common length, so no key is a strict prefix of
/// another (the key type's contract).
fn fixed_width_keys(len: usize, count: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), len), 1..=count)
}

proptest! {
    #[test]
    fn u64_keys_match_btreemap(entries in prop::collection::vec((any::<u64>(), 1u64..), 1..500)) {
        let mut index = ArtIndex::new();
        let mut model = BTreeMap::new();

        for (k, v) in &entries {
            prop_assert!(index.insert(&Key::from(*k), *v));
            model.insert(*k, *v);
        }

        for (k, v) in &model {
            prop_assert_eq!(index.lookup(&Key::from(*k)), *v);
        }

        validate_tree(&index);
    }

    #[test]
    fn absent_keys_return_the_sentinel(
        present in prop::collection::btree_set(any::<u64>(), 1..200),
        probes in prop::collection::vec(any::<u64>(), 100),
    ) {
        let mut index = ArtIndex::new();
        for k in &present {
            index.insert(&Key::from(*k), k.wrapping_add(1).max(1));
        }
        for probe in probes {
            if !present.contains(&probe) {
                prop_assert_eq!(index.lookup(&Key::from(probe)), INVALID_VALUE);
            }
        }
    }

    #[test]
    fn byte_keys_with_shared_prefixes(keys in fixed_width_keys(8, 300)) {
        let mut index = ArtIndex::new();
        let mut model = BTreeMap::new();

        for (i, k) in keys.iter().enumerate() {
            let value = i as u64 + 1;
            prop_assert!(index.insert(&Key::from_slice(k), value));
            model.insert(k.clone(), value);
        }

        for (k, v) in &model {
            prop_assert_eq!(index.lookup(&Key::from_slice(k)), *v);
        }

        validate_tree(&index);
    }

    #[test]
    fn insertion_order_does_not_matter(
        keys in prop::collection::btree_set(any::<u64>(), 2..300),
        seed in any::<u64>(),
    ) {
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let keys: Vec<u64> = keys.iter().copied().collect();

        let mut forward = ArtIndex::new();
        for k in &keys {
            forward.insert(&Key::from(*k), k.wrapping_add(1).max(1));
        }

        let mut shuffled_keys = keys.clone();
        shuffled_keys.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));
        let mut shuffled = ArtIndex::new();
        for k in &shuffled_keys {
            shuffled.insert(&Key::from(*k), k.wrapping_add(1).max(1));
        }

        for k in &keys {
            prop_assert_eq!(
                forward.lookup(&Key::from(*k)),
                shuffled.lookup(&Key::from(*k))
            );
        }

        validate_tree(&forward);
        validate_tree(&shuffled);
    }
}
