// consensus/src/target.rs

//! Compact difficulty target codec.
//!
//! A compact target packs an unsigned threshold into 32 bits: the high byte
//! is the length of the value in bytes and the low 23 bits are its most
//! significant bytes. Bit 23 is a sign bit; a set sign bit on a non-zero
//! mantissa is never a valid target.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact target exponent position
const SIZE_SHIFT: u32 = 24;

/// Compact target sign bit
const SIGN_BIT: u32 = 0x0080_0000;

/// Compact target unsigned mantissa mask
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Largest byte length the exponent can hold
const MAX_SIZE: u32 = 0xff;

/// Errors decoding a compact target
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompactTargetError {
    #[error("negative compact target {0:#010x}")]
    Negative(u32),

    #[error("compact target {0:#010x} overflows 256 bits")]
    Overflow(u32),
}

/// A difficulty target in compact form
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTarget(u32);

impl CompactTarget {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Expand to the full-width target.
    ///
    /// A zero result is a valid, practically unreachable, target. Negative and
    /// overflowing encodings are errors.
    pub fn to_target(self) -> Result<BigUint, CompactTargetError> {
        let size = self.0 >> SIZE_SHIFT;
        let mut word = self.0 & MANTISSA_MASK;
        if size <= 3 {
            word >>= 8 * (3 - size);
        }

        if word != 0 && self.0 & SIGN_BIT != 0 {
            return Err(CompactTargetError::Negative(self.0));
        }
        if word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32))
        {
            return Err(CompactTargetError::Overflow(self.0));
        }

        let target = if size <= 3 {
            BigUint::from(word)
        } else {
            BigUint::from(word) << (8 * (size - 3)) as usize
        };
        Ok(target)
    }

    /// Encode a target, keeping its three most significant bytes.
    ///
    /// Targets too long for the exponent byte saturate to `0xff7fffff`,
    /// which decodes as an overflow.
    pub fn from_target(target: &BigUint) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            low_u32(target) << (8 * (3 - size))
        } else {
            low_u32(&(target >> (8 * (size - 3)) as usize))
        };

        // keep the mantissa positive
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        if size > u64::from(MAX_SIZE) {
            return Self(MAX_SIZE << SIZE_SHIFT | MANTISSA_MASK);
        }
        Self(compact | (size as u32) << SIZE_SHIFT)
    }
}

fn low_u32(value: &BigUint) -> u32 {
    value.iter_u32_digits().next().unwrap_or(0)
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
