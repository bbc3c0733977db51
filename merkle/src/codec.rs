// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use borsh::{BorshDeserialize, BorshSerialize};
use log::debug;
use thiserror::Error;

const LOG_TARGET: &str = "authtree::merkle::codec";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofCodecError {
    #[error("Malformed proof: {0}")]
    MalformedProof(String),
}

/// The canonical byte encoding of a proof.
///
/// Proofs are encoded with borsh: a little-endian `u32` sibling count, the siblings in order, then any trailing
/// fields. Decoding rejects truncated input, trailing bytes, unknown enum tags and a sibling count other than the one
/// the caller expects, so a proof can never be silently reinterpreted for a tree of another shape.
pub trait ProofCodec: BorshSerialize + BorshDeserialize {
    /// The number of siblings carried by the proof
    fn sibling_count(&self) -> usize;

    fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("Writing borsh into a Vec cannot fail")
    }

    fn from_bytes(bytes: &[u8], expected_siblings: usize) -> Result<Self, ProofCodecError> {
        let proof = Self::try_from_slice(bytes).map_err(|e| {
            debug!(target: LOG_TARGET, "Could not decode a proof from {} bytes: {}", bytes.len(), e);
            ProofCodecError::MalformedProof(e.to_string())
        })?;
        if proof.sibling_count() != expected_siblings {
            return Err(ProofCodecError::MalformedProof(format!(
                "expected {} siblings, found {}",
                expected_siblings,
                proof.sibling_count()
            )));
        }
        Ok(proof)
    }
}
