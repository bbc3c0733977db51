// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use crate::NodeKey;

/// Whether the bit at an offset from the most significant bit is set. Does NOT perform range checking
#[inline]
pub(crate) fn get_bit(data: &[u8], position: usize) -> bool {
    data[position / 8] & (1 << (8 - 1 - (position % 8))) != 0
}

/// Given two node keys, this function returns the number of bits that are common to both keys, starting from the most
/// significant bit. For example, key 0110 and 0101 share a prefix of 2 bits.
#[inline]
pub(crate) fn count_common_prefix(a: &NodeKey, b: &NodeKey) -> usize {
    let a = a.as_slice();
    let b = b.as_slice();
    let n = a.len();
    let mut offset = 0;
    while offset < n && a[offset] == b[offset] {
        offset += 1;
    }
    if offset == n {
        return offset * 8;
    }
    let mut i = 0;
    while get_bit(&a[offset..=offset], i) == get_bit(&b[offset..=offset], i) {
        i += 1;
    }
    offset * 8 + i
}

/// Whether two keys land on the same leaf position of a tree of the given depth, i.e. share their first `depth` bits.
#[inline]
pub(crate) fn shares_position(a: &NodeKey, b: &NodeKey, depth: u32) -> bool {
    count_common_prefix(a, b) >= depth as usize
}

pub const fn bit_to_dir(bit: bool) -> TraverseDirection {
    match bit {
        false => TraverseDirection::Left,
        true => TraverseDirection::Right,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseDirection {
    Left,
    Right,
}

/// The child a key descends into from the node at `height` in a tree of the given depth. The root sits at height
/// `depth` and branches on the most significant bit.
#[inline]
pub(crate) fn traverse_direction(key: &NodeKey, depth: u32, height: u32) -> TraverseDirection {
    bit_to_dir(get_bit(key.as_slice(), (depth - height) as usize))
}
