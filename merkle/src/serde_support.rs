// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

/// Serde support for fixed-size 32-byte hashes. Human-readable formats (e.g. JSON) get a lowercase hex string, binary
/// formats (e.g. bincode) get the raw bytes.
pub mod hash {
    use std::fmt;

    use serde::{
        de::{self, SeqAccess, Visitor},
        Deserializer,
        Serializer,
    };
    use tari_utilities::hex;

    pub fn serialize<S>(hash: &[u8; 32], ser: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        if ser.is_human_readable() {
            ser.serialize_str(&hex::to_hex(hash.as_slice()))
        } else {
            ser.serialize_bytes(hash)
        }
    }

    pub fn deserialize<'de, D>(de: D) -> Result<[u8; 32], D::Error>
    where D: Deserializer<'de> {
        struct HashVisitor;

        impl<'de> Visitor<'de> for HashVisitor {
            type Value = [u8; 32];

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 32-byte hash")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where E: de::Error {
                let bytes = hex::from_hex(v).map_err(de::Error::custom)?;
                self.visit_bytes(&bytes)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where E: de::Error {
                <[u8; 32]>::try_from(v).map_err(|_| de::Error::invalid_length(v.len(), &self))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where A: SeqAccess<'de> {
                let mut result = [0u8; 32];
                for (i, byte) in result.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(33, &self));
                }
                Ok(result)
            }
        }

        if de.is_human_readable() {
            de.deserialize_str(HashVisitor)
        } else {
            de.deserialize_bytes(HashVisitor)
        }
    }
}
