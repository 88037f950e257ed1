// consensus/src/lib.rs

//! Proof-of-Stake kernel consensus
//!
//! This crate decides whether a stake source may mint the next block:
//! - Stake modifiers chained block to block from a zero genesis value
//! - Coinstake timestamp rules per protocol version
//! - Kernel hash weighted by stake amount against the compact target
//!
//! The checks are pure functions of finalized chain data and may run
//! concurrently without locking.

pub mod kernel;
pub mod modifier;
pub mod params;
pub mod target;
pub mod timestamp;
pub mod validation;

pub use kernel::{check_stake_kernel_hash, hash_meets_target, stake_kernel_hash, ProofOfStakeHash};
pub use modifier::{compute_stake_modifier, Predecessor};
pub use params::{ConsensusParams, Network, ParamsProvider, ProtocolVersion, StakeTimestampRule};
pub use target::{CompactTarget, CompactTargetError};
pub use timestamp::{check_coinstake_timestamp, check_stake_block_timestamp};
pub use validation::{check_kernel, check_proof_of_stake, connect_block, CoinStake};

use blockchain_core::{BlockchainError, OutPoint, Timestamp};
use blockchain_crypto::Hash;

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;

/// Misbehavior score for a peer that relayed a consensus-invalid block
pub const PROTOCOL_VIOLATION_SCORE: u32 = 100;

/// Errors that can occur during consensus operations
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("Coinstake timestamp violation: block time {block_time}, transaction time {tx_time}")]
    InvalidTimestamp {
        block_time: Timestamp,
        tx_time: Timestamp,
    },

    #[error("Stake source {0} has zero value")]
    ZeroStake(OutPoint),

    #[error("Invalid compact target: {0}")]
    InvalidTarget(#[from] CompactTargetError),

    #[error("Kernel hash {hash} does not meet target {bits}")]
    TargetNotMet { hash: Hash, bits: CompactTarget },

    #[error("Previous block not found: {0}")]
    PrevBlockNotFound(Hash),

    #[error("Stake source not found: {0}")]
    CoinNotFound(OutPoint),

    #[error("Blockchain error: {0}")]
    BlockchainError(#[from] BlockchainError),
}

impl ConsensusError {
    /// Whether the failure proves the block invalid, as opposed to this node
    /// lacking the data to judge it
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            ConsensusError::InvalidTimestamp { .. }
                | ConsensusError::ZeroStake(_)
                | ConsensusError::InvalidTarget(_)
                | ConsensusError::TargetNotMet { .. }
        )
    }

    /// Score to charge the peer that relayed the failing block
    pub fn misbehavior_score(&self) -> u32 {
        if self.is_protocol_violation() {
            PROTOCOL_VIOLATION_SCORE
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misbehavior_classification() {
        let violation = ConsensusError::TargetNotMet {
            hash: Hash::zero(),
            bits: CompactTarget::new(0x1d00_ffff),
        };
        assert!(violation.is_protocol_violation());
        assert_eq!(violation.misbehavior_score(), PROTOCOL_VIOLATION_SCORE);

        let stale = ConsensusError::CoinNotFound(OutPoint::new(Hash::zero(), 0));
        assert!(!stale.is_protocol_violation());
        assert_eq!(stale.misbehavior_score(), 0);

        let malformed = ConsensusError::from(CompactTargetError::Negative(0x0492_3456));
        assert_eq!(malformed.misbehavior_score(), PROTOCOL_VIOLATION_SCORE);
    }

    #[test]
    fn test_error_messages() {
        let err = ConsensusError::InvalidTimestamp {
            block_time: 100,
            tx_time: 101,
        };
        assert_eq!(
            err.to_string(),
            "Coinstake timestamp violation: block time 100, transaction time 101"
        );
    }
}
