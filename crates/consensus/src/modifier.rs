// consensus/src/modifier.rs

//! Stake modifier chaining.
//!
//! The stake modifier keeps an output's owner from computing future
//! proof-of-stake outcomes at the time the output confirms: the kernel has
//! to be hashed with a modifier that does not exist yet.

use blockchain_core::{BlockIndexEntry, StakeModifier};
use blockchain_crypto::{Hash, HashWriter};

/// Predecessor of the block whose modifier is being computed
#[derive(Debug, Clone, Copy)]
pub enum Predecessor<'a> {
    /// The new block is genesis
    Genesis,
    /// The new block extends this one
    Block(&'a BlockIndexEntry),
}

impl<'a> From<Option<&'a BlockIndexEntry>> for Predecessor<'a> {
    fn from(entry: Option<&'a BlockIndexEntry>) -> Self {
        match entry {
            Some(entry) => Predecessor::Block(entry),
            None => Predecessor::Genesis,
        }
    }
}

/// Compute the stake modifier for a new block.
///
/// Genesis gets the zero modifier. Otherwise the result is the network hash
/// of `kernel` followed by the predecessor's modifier.
pub fn compute_stake_modifier(prev: Predecessor<'_>, kernel: &Hash) -> StakeModifier {
    let prev = match prev {
        Predecessor::Genesis => return StakeModifier::zero(),
        Predecessor::Block(entry) => entry,
    };

    let modifier = HashWriter::new()
        .write(kernel)
        .write(&prev.stake_modifier)
        .finish();

    tracing::trace!(
        "Stake modifier {} on top of block {} (height {})",
        modifier,
        prev.hash,
        prev.height
    );

    StakeModifier::from_hash(modifier)
}
