// consensus/src/kernel.rs

//! Proof-of-stake kernel check.
//!
//! A coinstake's kernel input must satisfy
//!
//! ```text
//! hash(modifier ‖ source.time ‖ prevout.hash ‖ prevout.n ‖ time_tx) / amount <= target
//! ```
//!
//! so the chance of a passing timestamp is proportional to the amount
//! staked. Only values an attacker cannot mass-produce go into the hash; a
//! block or transaction hash would turn staking back into a work search.

use crate::{target::CompactTarget, ConsensusError, ConsensusResult};
use blockchain_core::{Amount, BlockIndexEntry, OutPoint, StakeModifier, StakeSource, TxTime};
use blockchain_crypto::{Hash, HashWriter, HASH_SIZE};
use num_bigint::BigUint;
use std::fmt;

/// Hash of a stake kernel
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProofOfStakeHash(Hash);

impl ProofOfStakeHash {
    pub fn as_hash(&self) -> &Hash {
        &self.0
    }

    pub fn into_hash(self) -> Hash {
        self.0
    }

    /// The hash as an unsigned integer (stored bytes least significant first)
    pub fn to_value(&self) -> BigUint {
        BigUint::from_bytes_le(self.0.as_bytes())
    }

    /// Inverse of [`to_value`](Self::to_value); `None` above 256 bits
    pub fn from_value(value: &BigUint) -> Option<Self> {
        let bytes = value.to_bytes_le();
        if bytes.len() > HASH_SIZE {
            return None;
        }
        let mut out = [0u8; HASH_SIZE];
        out[..bytes.len()].copy_from_slice(&bytes);
        Some(Self(Hash::new(out)))
    }
}

impl From<Hash> for ProofOfStakeHash {
    fn from(hash: Hash) -> Self {
        Self(hash)
    }
}

impl fmt::Debug for ProofOfStakeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProofOfStakeHash({})", self.0)
    }
}

impl fmt::Display for ProofOfStakeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn kernel_writer(
    stake_modifier: &StakeModifier,
    source_time: TxTime,
    prevout: &OutPoint,
    time_tx: TxTime,
) -> HashWriter {
    HashWriter::new()
        .write(stake_modifier)
        .write(&source_time)
        .write(&prevout.hash)
        .write(&prevout.n)
        .write(&time_tx)
}

/// Hash the kernel of a candidate stake
pub fn stake_kernel_hash(
    stake_modifier: &StakeModifier,
    source_time: TxTime,
    prevout: &OutPoint,
    time_tx: TxTime,
) -> ProofOfStakeHash {
    ProofOfStakeHash(kernel_writer(stake_modifier, source_time, prevout, time_tx).finish())
}

/// Weighted comparison: `hash / amount <= target`, in exact integer
/// arithmetic. A zero amount never meets any target.
pub fn hash_meets_target(hash: &ProofOfStakeHash, amount: &Amount, target: &BigUint) -> bool {
    if amount.is_zero() {
        return false;
    }
    hash.to_value() / amount.inner() <= *target
}

/// Run the kernel check, reporting why it failed
pub(crate) fn evaluate_kernel(
    prev: &BlockIndexEntry,
    bits: CompactTarget,
    source: &StakeSource,
    prevout: &OutPoint,
    time_tx: TxTime,
) -> ConsensusResult<ProofOfStakeHash> {
    if source.amount.is_zero() {
        return Err(ConsensusError::ZeroStake(*prevout));
    }

    let target = bits.to_target()?;

    let hash = stake_kernel_hash(&prev.stake_modifier, source.time, prevout, time_tx);
    if !hash_meets_target(&hash, &source.amount, &target) {
        return Err(ConsensusError::TargetNotMet {
            hash: hash.into_hash(),
            bits,
        });
    }

    tracing::trace!(
        "Kernel {} for {} at time {} meets target {}",
        hash,
        prevout,
        time_tx,
        bits
    );

    Ok(hash)
}

/// Check whether a stake source meets the target at `time_tx`.
///
/// Never fails: a zero-value source, a malformed compact target and a missed
/// target all yield `false`.
pub fn check_stake_kernel_hash(
    prev: &BlockIndexEntry,
    bits: CompactTarget,
    source: &StakeSource,
    prevout: &OutPoint,
    time_tx: TxTime,
) -> bool {
    match evaluate_kernel(prev, bits, source, prevout, time_tx) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("Stake kernel rejected: {}", e);
            false
        }
    }
}
