//! Integer coders built on top of the bit-chance models in `chance.rs`.
//!
//! Every integer FLIF ever puts through the RAC — header fields, MANIAC
//! tree shape, pixel residuals — goes through one of these three shapes
//! (spec §4.3):
//!
//! - [`UniformSymbolCoder`]: fair-bit binary search, no adaptive state.
//!   Used where every value in range is a priori equally likely (e.g. the
//!   very first pixel of a plane, before any context exists).
//! - [`SimpleSymbolCoder`]: zero/sign/exponent/mantissa integer coder
//!   backed by `SimpleBitChance`, used for header and transform metadata.
//! - [`FinalPropertySymbolCoder`]: the same zero/sign/exponent/mantissa
//!   shape but backed by `MultiscaleBitChance`, used at MANIAC tree
//!   leaves to decode a pixel residual relative to its predicted guess.

use crate::chance::BitChance;
use crate::io::ByteSource;
use crate::rac::Rac;

/// Decodes a value uniformly distributed over `[lo, hi]` via fair-bit
/// binary search. Carries no state of its own.
pub struct UniformSymbolCoder;

impl UniformSymbolCoder {
    pub fn read_int<S: ByteSource>(rac: &mut Rac<'_, S>, lo: i32, hi: i32) -> i32 {
        rac.read_uniform_int(lo, hi)
    }
}

/// Zero/sign/exponent-unary/mantissa adaptive integer model.
///
/// `BITS` bounds how many distinct exponent and mantissa bit-chance
/// slots exist; positions beyond `BITS - 1` share the last slot, which
/// only matters for implausibly wide (32-bit-spanning) ranges.
#[derive(Clone)]
pub struct IntegerCoder<C: BitChance, const BITS: usize> {
    zero: C,
    sign: C,
    exp: [C; BITS],
    mant: [C; BITS],
}

impl<C: BitChance + Copy, const BITS: usize> IntegerCoder<C, BITS> {
    pub fn new() -> Self {
        Self {
            zero: C::new(),
            sign: C::new(),
            exp: [C::new(); BITS],
            mant: [C::new(); BITS],
        }
    }

    fn read_magnitude<S: ByteSource>(&mut self, rac: &mut Rac<'_, S>, bound: i32) -> i32 {
        debug_assert!(bound >= 1);
        let max_e = if bound <= 1 {
            0
        } else {
            (32 - (bound as u32).leading_zeros() - 1) as usize
        };
        let mut e = 0usize;
        while e < max_e && self.exp[e.min(BITS - 1)].read(rac) {
            e += 1;
        }
        let mut mantissa: i32 = 0;
        for bitpos in 0..e {
            if self.mant[bitpos.min(BITS - 1)].read(rac) {
                mantissa |= 1 << (e - 1 - bitpos);
            }
        }
        ((1i32 << e) + mantissa).clamp(1, bound)
    }

    /// Decodes a value in `[lo, hi]`. `lo == hi` short-circuits to the
    /// single possible value without touching the RAC at all.
    pub fn read_int<S: ByteSource>(&mut self, rac: &mut Rac<'_, S>, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi);
        if lo == hi {
            return lo;
        }
        if lo > 0 {
            return lo - 1 + self.read_magnitude(rac, hi - lo + 1);
        }
        if hi < 0 {
            return hi + 1 - self.read_magnitude(rac, hi - lo + 1);
        }
        if !self.zero.read(rac) {
            return 0;
        }
        let can_positive = hi > 0;
        let can_negative = lo < 0;
        let positive = if can_positive && can_negative {
            self.sign.read(rac)
        } else {
            can_positive
        };
        if positive {
            1 + self.read_magnitude(rac, hi)
        } else {
            -1 - self.read_magnitude(rac, -lo)
        }
    }
}

/// Header/transform-metadata integer coder (spec §4.3).
pub type SimpleSymbolCoder<const BITS: usize> =
    IntegerCoder<crate::chance::SimpleBitChance, BITS>;

/// Pixel-residual integer coder living at a MANIAC tree leaf (spec §4.3,
/// §4.4). Each leaf owns one of these, wired to the same
/// `MultiscaleBitChance` ensemble width used throughout the tree.
pub type FinalPropertySymbolCoder<const BITS: usize> =
    IntegerCoder<crate::chance::MultiscaleBitChance<6>, BITS>;
