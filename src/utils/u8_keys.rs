//! Byte-parallel search over the key arrays of the keyed node classes.
//!
//! The 16-wide node's find-child compares the search byte against all 16
//! stored key bytes in a single 128-bit equality compare and takes the lowest
//! matching slot. Slots at or past the current occupancy are masked out of the
//! comparison result; the mask is always derived from the occupancy count, so
//! stale key bytes left over in unused slots can never produce a match.

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    debug_assert!(keys.len() == 16 && num_children <= 16);
    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        let occupied = (1u32 << num_children) - 1;
        _mm_movemask_epi8(results) as u32 & occupied
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_find_key_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;

    debug_assert!(keys.len() == 16 && num_children <= 16);
    let matches = unsafe {
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vceqq_u8(key_vec, node_keys_vec);

        // NEON has no movemask; narrowing each 16-bit pair by 4 bits packs the
        // per-lane compare results into a 64-bit field of 4-bit groups.
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        vget_lane_u64::<0>(vreinterpret_u64_u8(res))
    };
    // 4 bits per slot, occupancy mask first.
    let occupied = if num_children == 16 {
        u64::MAX
    } else {
        (1u64 << (4 * num_children)) - 1
    };
    let matches = matches & occupied;
    if matches != 0 {
        return Some((matches.trailing_zeros() >> 2) as usize);
    }
    None
}

/// Find the slot holding `key` among the first `num_children` entries of
/// `keys`. Entries are in insertion order; at most one live slot can match.
#[allow(unreachable_code)]
pub(crate) fn find_key_position<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> Option<usize> {
    // SIMD form for the 16-wide class.
    if WIDTH == 16 {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_find_key_16(key, keys, num_children);
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key_16(key, keys, num_children);
        }
    }

    // Width 4, or no SIMD support: a linear scan of the occupied slots.
    (0..num_children).find(|&i| keys[i] == key)
}
