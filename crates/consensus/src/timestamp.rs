// consensus/src/timestamp.rs

use crate::params::{ParamsProvider, ProtocolVersion};
use blockchain_core::Timestamp;

/// Check whether a coinstake timestamp meets protocol.
///
/// The coinstake must carry the block's own time. Under protocol v2 that
/// time must also sit on a slot boundary, which bounds how many timestamps
/// a staker can try per slot.
pub fn check_coinstake_timestamp<P: ParamsProvider + ?Sized>(
    params: &P,
    block_time: Timestamp,
    tx_time: Timestamp,
) -> bool {
    if block_time != tx_time {
        tracing::debug!(
            "Coinstake time {} does not match block time {}",
            tx_time,
            block_time
        );
        return false;
    }

    let rule = params.stake_timestamp_rule(block_time);
    match rule.version {
        ProtocolVersion::V2 => {
            let aligned = (tx_time & Timestamp::from(rule.mask)) == 0;
            if !aligned {
                tracing::debug!(
                    "Coinstake time {} is not aligned to mask {:#x}",
                    tx_time,
                    rule.mask
                );
            }
            aligned
        }
        ProtocolVersion::Legacy => true,
    }
}

/// Header-only variant of [`check_coinstake_timestamp`], for when the
/// coinstake itself is not available
pub fn check_stake_block_timestamp<P: ParamsProvider + ?Sized>(
    params: &P,
    block_time: Timestamp,
) -> bool {
    check_coinstake_timestamp(params, block_time, block_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ConsensusParams, Network};
    use proptest::prelude::*;

    fn modern() -> ConsensusParams {
        ConsensusParams {
            protocol_v2_time: 0,
            protocol_v2_exempt_times: Vec::new(),
            stake_timestamp_mask: 0b11,
        }
    }

    fn legacy() -> ConsensusParams {
        ConsensusParams {
            protocol_v2_time: 1_000,
            protocol_v2_exempt_times: Vec::new(),
            stake_timestamp_mask: 0b11,
        }
    }

    #[test]
    fn test_modern_requires_alignment() {
        let params = modern();
        assert!(check_coinstake_timestamp(&params, 100, 100));
        assert!(!check_coinstake_timestamp(&params, 101, 101));
    }

    #[test]
    fn test_modern_requires_match() {
        assert!(!check_coinstake_timestamp(&modern(), 100, 101));
        assert!(!check_coinstake_timestamp(&modern(), 104, 100));
    }

    #[test]
    fn test_legacy_ignores_alignment() {
        let params = legacy();
        assert!(check_coinstake_timestamp(&params, 50, 50));
        assert!(check_coinstake_timestamp(&params, 51, 51));
        assert!(!check_coinstake_timestamp(&params, 50, 51));
    }

    #[test]
    fn test_rules_switch_after_boundary() {
        let params = legacy();
        assert!(check_stake_block_timestamp(&params, 999));
        assert!(check_stake_block_timestamp(&params, 1_000));
        assert!(!check_stake_block_timestamp(&params, 1_001));
        assert!(check_stake_block_timestamp(&params, 1_004));
    }

    #[test]
    fn test_mainnet_sixteen_second_slots() {
        let params = Network::Main.params();
        assert!(check_stake_block_timestamp(&params, 1_500_000_000));
        assert!(!check_stake_block_timestamp(&params, 1_500_000_008));
        // exempt block keeps legacy rules
        assert!(check_stake_block_timestamp(&params, 1_407_053_678));
    }

    proptest! {
        #[test]
        fn prop_legacy_is_plain_equality(a in 0i64..1_000, b in 0i64..1_000) {
            prop_assert_eq!(check_coinstake_timestamp(&legacy(), a, b), a == b);
        }

        #[test]
        fn prop_block_timestamp_matches_coinstake_check(t in any::<i64>()) {
            let params = modern();
            prop_assert_eq!(
                check_stake_block_timestamp(&params, t),
                check_coinstake_timestamp(&params, t, t)
            );
        }
    }
}
