// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt::{Debug, Display, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tari_utilities::hex::to_hex;
use thiserror::Error;

use crate::serde_support;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected {expected} bytes for a hash, found {actual}")]
pub struct InvalidHashLength {
    pub expected: usize,
    pub actual: usize,
}

macro_rules! hash_type {
    ($name: ident) => {
        /// A wrapper around a 32-byte array
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_slice(&self) -> &[u8] {
                &self.0
            }

            pub fn as_slice_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }

            pub const fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                to_hex(self.0.as_slice())
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8; 32]> for $name {
            fn from(bytes: &[u8; 32]) -> Self {
                Self(*bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = InvalidHashLength;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; 32]>::try_from(bytes).map(Self).map_err(|_| InvalidHashLength {
                    expected: 32,
                    actual: bytes.len(),
                })
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                serde_support::hash::serialize(&self.0, ser)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                serde_support::hash::deserialize(de).map(Self)
            }
        }
    };
}

hash_type!(NodeHash);
hash_type!(ValueHash);
hash_type!(NodeKey);

/// The height of the smallest complete binary tree that holds `leaf_count` leaves, i.e. `ceil(log2(leaf_count))`.
/// This is also the number of siblings in an accumulator proof.
pub fn tree_height(leaf_count: u64) -> usize {
    if leaf_count <= 1 {
        return 0;
    }
    (u64::BITS - (leaf_count - 1).leading_zeros()) as usize
}
