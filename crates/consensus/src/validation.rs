// consensus/src/validation.rs

//! Proof-of-stake checks wired to the chain index and unspent-output set.

use crate::{
    kernel::{check_stake_kernel_hash, evaluate_kernel, ProofOfStakeHash},
    modifier::{compute_stake_modifier, Predecessor},
    params::ParamsProvider,
    target::CompactTarget,
    timestamp::check_coinstake_timestamp,
    ConsensusError, ConsensusResult,
};
use blockchain_core::{
    BlockIndexEntry, ChainIndex, CoinsView, MemoryChainIndex, OutPoint, Timestamp, TxTime,
};
use blockchain_crypto::Hash;
use serde::{Deserialize, Serialize};

/// The kernel input of a coinstake transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinStake {
    /// Coinstake transaction time
    pub time: TxTime,
    /// Output spent by the first input
    pub prevout: OutPoint,
}

/// Compute the stake modifier for a new block and record it in the index.
///
/// `kernel` is the block's proof hash for proof-of-stake blocks and its block
/// hash otherwise. The parent must already be indexed.
pub fn connect_block<'a>(
    index: &'a mut MemoryChainIndex,
    prev_hash: Option<&Hash>,
    hash: Hash,
    time: TxTime,
    kernel: &Hash,
) -> ConsensusResult<&'a BlockIndexEntry> {
    let entry = {
        let predecessor = match prev_hash {
            None => Predecessor::Genesis,
            Some(prev_hash) => Predecessor::Block(
                index
                    .get(prev_hash)
                    .ok_or(ConsensusError::PrevBlockNotFound(*prev_hash))?,
            ),
        };

        match predecessor {
            Predecessor::Genesis => BlockIndexEntry::genesis(hash, time),
            Predecessor::Block(parent) => {
                let stake_modifier = compute_stake_modifier(predecessor, kernel);
                BlockIndexEntry::child_of(parent, hash, time, stake_modifier)
            }
        }
    };

    tracing::debug!(
        "Connecting block {} at height {} with stake modifier {}",
        entry.hash,
        entry.height,
        entry.stake_modifier
    );

    Ok(index.insert(entry)?)
}

/// Look up the predecessor and stake source, then run the kernel check.
///
/// Used by the staking side to test a candidate `time_tx`.
pub fn check_kernel<C, V>(
    chain: &C,
    coins: &V,
    prev_hash: &Hash,
    bits: CompactTarget,
    time_tx: TxTime,
    prevout: &OutPoint,
) -> ConsensusResult<bool>
where
    C: ChainIndex + ?Sized,
    V: CoinsView + ?Sized,
{
    let prev = chain
        .entry(prev_hash)
        .ok_or(ConsensusError::PrevBlockNotFound(*prev_hash))?;
    let source = coins
        .stake_source(prevout)
        .ok_or(ConsensusError::CoinNotFound(*prevout))?;

    Ok(check_stake_kernel_hash(prev, bits, &source, prevout, time_tx))
}

/// Full proof-of-stake check for a block.
///
/// On success returns the proof hash, which is the kernel for the block's
/// own stake modifier.
pub fn check_proof_of_stake<C, V, P>(
    chain: &C,
    coins: &V,
    params: &P,
    prev_hash: &Hash,
    bits: CompactTarget,
    block_time: TxTime,
    coinstake: &CoinStake,
) -> ConsensusResult<ProofOfStakeHash>
where
    C: ChainIndex + ?Sized,
    V: CoinsView + ?Sized,
    P: ParamsProvider + ?Sized,
{
    let block_time = Timestamp::from(block_time);
    let tx_time = Timestamp::from(coinstake.time);
    if !check_coinstake_timestamp(params, block_time, tx_time) {
        return Err(ConsensusError::InvalidTimestamp {
            block_time,
            tx_time,
        });
    }

    let prev = chain
        .entry(prev_hash)
        .ok_or(ConsensusError::PrevBlockNotFound(*prev_hash))?;
    let source = coins
        .stake_source(&coinstake.prevout)
        .ok_or(ConsensusError::CoinNotFound(coinstake.prevout))?;

    evaluate_kernel(prev, bits, &source, &coinstake.prevout, coinstake.time).map_err(|e| {
        tracing::debug!("Proof-of-stake check failed on top of {}: {}", prev_hash, e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Network;
    use blockchain_core::{Amount, MemoryCoinsView, StakeSource};

    const EASY: CompactTarget = CompactTarget::new(0x2100_ffff);

    fn hash(byte: u8) -> Hash {
        Hash::new([byte; 32])
    }

    fn setup() -> (MemoryChainIndex, MemoryCoinsView, OutPoint) {
        let mut index = MemoryChainIndex::new();
        connect_block(&mut index, None, hash(0), 1_500_000_000, &hash(0)).unwrap();

        let mut coins = MemoryCoinsView::new();
        let prevout = OutPoint::new(hash(0xaa), 0);
        coins.add(prevout, StakeSource::new(Amount::from_coins(50), 1_499_999_000));
        (index, coins, prevout)
    }

    #[test]
    fn test_connect_genesis_has_zero_modifier() {
        let (index, _, _) = setup();
        let genesis = index.genesis().unwrap();
        assert!(genesis.stake_modifier.is_zero());
        assert_eq!(
            genesis.stake_modifier,
            compute_stake_modifier(Predecessor::Genesis, &hash(0))
        );
        assert_eq!(genesis.height, 0);
        assert!(genesis.is_genesis());
    }

    #[test]
    fn test_connect_chains_modifiers() {
        let (mut index, _, _) = setup();
        let first = connect_block(&mut index, Some(&hash(0)), hash(1), 1_500_000_016, &hash(0x10))
            .unwrap()
            .clone();
        let second = connect_block(&mut index, Some(&hash(1)), hash(2), 1_500_000_032, &hash(0x20))
            .unwrap()
            .clone();

        let genesis = index.genesis().unwrap();
        assert_eq!(
            first.stake_modifier,
            compute_stake_modifier(Predecessor::Block(genesis), &hash(0x10))
        );
        assert_eq!(
            second.stake_modifier,
            compute_stake_modifier(Predecessor::Block(&first), &hash(0x20))
        );
        assert_eq!(second.height, 2);
    }

    #[test]
    fn test_connect_unknown_parent() {
        let (mut index, _, _) = setup();
        let result = connect_block(&mut index, Some(&hash(9)), hash(10), 1_500_000_016, &hash(1));
        assert!(matches!(result, Err(ConsensusError::PrevBlockNotFound(h)) if h == hash(9)));
    }

    #[test]
    fn test_connect_duplicate() {
        let (mut index, _, _) = setup();
        let result = connect_block(&mut index, None, hash(0), 1_500_000_000, &hash(0));
        assert!(matches!(result, Err(ConsensusError::BlockchainError(_))));
    }

    #[test]
    fn test_check_kernel_lookups() {
        let (index, coins, prevout) = setup();

        assert!(check_kernel(&index, &coins, &hash(0), EASY, 1_500_000_016, &prevout).unwrap());
        assert!(!check_kernel(&index, &coins, &hash(0), CompactTarget::new(0), 1_500_000_016, &prevout).unwrap());

        let missing = OutPoint::new(hash(0xbb), 0);
        assert!(matches!(
            check_kernel(&index, &coins, &hash(0), EASY, 1_500_000_016, &missing),
            Err(ConsensusError::CoinNotFound(_))
        ));
        assert!(matches!(
            check_kernel(&index, &coins, &hash(7), EASY, 1_500_000_016, &prevout),
            Err(ConsensusError::PrevBlockNotFound(_))
        ));
    }

    #[test]
    fn test_proof_of_stake_rejects_bad_timestamp() {
        let (index, coins, prevout) = setup();
        let params = Network::Regtest.params();

        let misaligned = CoinStake { time: 1_500_000_017, prevout };
        let result = check_proof_of_stake(&index, &coins, &params, &hash(0), EASY, 1_500_000_017, &misaligned);
        assert!(matches!(result, Err(ConsensusError::InvalidTimestamp { .. })));

        let mismatched = CoinStake { time: 1_500_000_032, prevout };
        let result = check_proof_of_stake(&index, &coins, &params, &hash(0), EASY, 1_500_000_016, &mismatched);
        assert!(matches!(result, Err(ConsensusError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_proof_of_stake_returns_kernel_hash() {
        let (index, coins, prevout) = setup();
        let params = Network::Regtest.params();
        let coinstake = CoinStake { time: 1_500_000_016, prevout };

        let proof = check_proof_of_stake(&index, &coins, &params, &hash(0), EASY, 1_500_000_016, &coinstake)
            .unwrap();

        let genesis = index.genesis().unwrap();
        assert_eq!(
            proof,
            crate::kernel::stake_kernel_hash(&genesis.stake_modifier, 1_499_999_000, &prevout, 1_500_000_016)
        );
    }

    #[test]
    fn test_proof_of_stake_target_not_met() {
        let (index, coins, prevout) = setup();
        let params = Network::Regtest.params();
        let coinstake = CoinStake { time: 1_500_000_016, prevout };

        let result = check_proof_of_stake(
            &index,
            &coins,
            &params,
            &hash(0),
            CompactTarget::new(0x0100_0001),
            1_500_000_016,
            &coinstake,
        );
        assert!(matches!(result, Err(ConsensusError::TargetNotMet { .. })));
    }
}
