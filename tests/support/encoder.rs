//! A minimal FLIF bitstream encoder, used only by integration tests to
//! build inputs the production decoder can round-trip. Mirrors
//! `src/rac.rs`, `src/chance.rs`, and `src/symbol.rs` in reverse: every
//! adaptive model here is a real `flif::chance::BitChance` driven the
//! same way `BitChance::read` drives it (query `p12()`, write that many
//! bits of probability, then `update()` with the bit actually sent), so
//! the byte stream this produces decodes identically through the
//! production RAC.

use flif::chance::{BitChance, MultiscaleBitChance, SimpleBitChance};

const FAIR_CHANCE: u16 = 1 << 11;

/// Carry-propagating range encoder, the write-side twin of `Rac`.
pub struct RacOut {
    low: u32,
    range: u32,
    out: Vec<u8>,
    cache: u8,
    carry_count: u64,
    started: bool,
}

impl RacOut {
    pub fn new() -> Self {
        Self {
            low: 0,
            range: 0x00FF_FFFF,
            out: Vec::new(),
            cache: 0xFF,
            carry_count: 0,
            started: false,
        }
    }

    fn shift_low(&mut self) {
        let byte = (self.low >> 24) as u8;
        let carry = self.low > 0x00FF_FFFF;
        if carry || byte != 0xFF {
            if self.started {
                self.out.push(self.cache.wrapping_add(carry as u8));
            }
            while self.carry_count > 0 {
                self.out.push(0xFFu8.wrapping_add(carry as u8));
                self.carry_count -= 1;
            }
            self.cache = byte;
            self.started = true;
        } else {
            self.carry_count += 1;
        }
        self.low = (self.low << 8) & 0x00FF_FFFF;
    }

    fn renormalize(&mut self) {
        while self.range < 0x0001_0000 {
            self.shift_low();
            self.range <<= 8;
        }
    }

    pub fn write_bit(&mut self, p12: u16, bit: bool) {
        let bound =
            (self.range >> 12) * p12 as u32 + (((self.range & 0xFFF) * p12 as u32) >> 12);
        if !bit {
            self.range = bound;
        } else {
            self.low += bound;
            self.range -= bound;
        }
        self.renormalize();
    }

    pub fn write_uniform_bit(&mut self, bit: bool) {
        self.write_bit(FAIR_CHANCE, bit);
    }

    pub fn write_uniform_int(&mut self, lo: i32, hi: i32, value: i32) {
        let mut lo = lo;
        let mut hi = hi;
        while lo != hi {
            let mid = lo + (hi - lo) / 2;
            if value > mid {
                self.write_uniform_bit(true);
                lo = mid + 1;
            } else {
                self.write_uniform_bit(false);
                hi = mid;
            }
        }
    }

    /// Flushes the remaining state. No leading bytes need to be prepended:
    /// `Rac::new`'s 3-byte initial pull lines up with the bytes this
    /// naturally emits first, the same way `src/rac.rs`'s own test-only
    /// encoder round-trips against it.
    pub fn finish(mut self) -> Vec<u8> {
        for _ in 0..4 {
            self.shift_low();
        }
        self.out
    }
}

fn write_bitchance<C: BitChance>(enc: &mut RacOut, chance: &mut C, bit: bool) {
    enc.write_bit(chance.p12(), bit);
    chance.update(bit);
}

/// Mirrors `IntegerCoder<C, BITS>` field-for-field, in write mode.
pub struct AdaptiveInt<C: BitChance, const BITS: usize> {
    zero: C,
    sign: C,
    exp: Vec<C>,
    mant: Vec<C>,
}

impl<C: BitChance, const BITS: usize> AdaptiveInt<C, BITS> {
    pub fn new() -> Self {
        Self {
            zero: C::new(),
            sign: C::new(),
            exp: (0..BITS).map(|_| C::new()).collect(),
            mant: (0..BITS).map(|_| C::new()).collect(),
        }
    }

    fn write_magnitude(&mut self, enc: &mut RacOut, bound: i32, magnitude: i32) {
        debug_assert!(bound >= 1 && magnitude >= 1 && magnitude <= bound);
        let max_e = if bound <= 1 {
            0
        } else {
            (32 - (bound as u32).leading_zeros() - 1) as usize
        };
        let e = (32 - (magnitude as u32).leading_zeros() - 1) as usize;
        let mantissa = magnitude - (1 << e);

        for pos in 0..e {
            write_bitchance(enc, &mut self.exp[pos.min(BITS - 1)], true);
        }
        if e < max_e {
            write_bitchance(enc, &mut self.exp[e.min(BITS - 1)], false);
        }
        for bitpos in 0..e {
            let bit = (mantissa >> (e - 1 - bitpos)) & 1 != 0;
            write_bitchance(enc, &mut self.mant[bitpos.min(BITS - 1)], bit);
        }
    }

    /// Writes `value` (which must be in `[lo, hi]`) exactly the way
    /// `IntegerCoder::read_int` would consume it.
    pub fn write_int(&mut self, enc: &mut RacOut, lo: i32, hi: i32, value: i32) {
        debug_assert!(lo <= hi && value >= lo && value <= hi);
        if lo == hi {
            return;
        }
        if lo > 0 {
            self.write_magnitude(enc, hi - lo + 1, value - lo + 1);
            return;
        }
        if hi < 0 {
            self.write_magnitude(enc, hi - lo + 1, hi + 1 - value);
            return;
        }
        if value == 0 {
            write_bitchance(enc, &mut self.zero, false);
            return;
        }
        write_bitchance(enc, &mut self.zero, true);
        let can_positive = hi > 0;
        let can_negative = lo < 0;
        let positive = value > 0;
        if can_positive && can_negative {
            write_bitchance(enc, &mut self.sign, positive);
        }
        if positive {
            self.write_magnitude(enc, hi, value - 1);
        } else {
            self.write_magnitude(enc, -lo, -value - 1);
        }
    }
}

pub type SimpleInt = AdaptiveInt<SimpleBitChance, 18>;
pub type FinalInt = AdaptiveInt<MultiscaleBitChance<6>, 18>;

/// Write-side counterpart of the `Palette` transform's `load`: one
/// `SimpleInt` per field, matching the read side's four independent
/// coders (size, Y, I, Q).
pub struct PaletteWriter {
    size: SimpleInt,
    y: SimpleInt,
    i: SimpleInt,
    q: SimpleInt,
}

impl PaletteWriter {
    pub fn new() -> Self {
        Self {
            size: SimpleInt::new(),
            y: SimpleInt::new(),
            i: SimpleInt::new(),
            q: SimpleInt::new(),
        }
    }

    /// `table` must already be in non-decreasing Y order when `sorted` is
    /// true, matching the conditional-minima bounds the read side applies.
    /// `ranges` gives each of the three source planes' `(min, max)`.
    pub fn write(
        &mut self,
        enc: &mut RacOut,
        ranges: [(i32, i32); 3],
        sorted: bool,
        table: &[(i32, i32, i32)],
    ) {
        self.size.write_int(enc, 1, 30_000, table.len() as i32);
        enc.write_uniform_bit(sorted);
        let mut min_y = ranges[0].0;
        let mut prev = (-1i32, -1i32, -1i32);
        for &(y, i, q) in table {
            let y_lo = if sorted { min_y } else { ranges[0].0 };
            self.y.write_int(enc, y_lo, ranges[0].1, y);
            let i_lo = if sorted && prev.0 == y { prev.1 } else { ranges[1].0 };
            self.i.write_int(enc, i_lo, ranges[1].1, i);
            self.q.write_int(enc, ranges[2].0, ranges[2].1, q);
            prev = (y, i, q);
            if sorted {
                min_y = y;
            }
        }
    }
}

/// Write-side counterpart of the `Frame-Combine` transform's `load`: a
/// single coder for `max_lookback`, bounded `[1, nb_frames - 1]`.
pub struct FrameCombineWriter {
    lookback: SimpleInt,
}

impl FrameCombineWriter {
    pub fn new() -> Self {
        Self {
            lookback: SimpleInt::new(),
        }
    }

    pub fn write(&mut self, enc: &mut RacOut, nb_frames: usize, max_lookback: i32) {
        let cap = (nb_frames.max(2) - 1) as i32;
        self.lookback.write_int(enc, 1, cap, max_lookback);
    }
}

/// Writes a MANIAC tree consisting of a single, unsplit leaf — the only
/// shape these tests need, since every test image here has at most a
/// handful of pixels and gains nothing from an actual split.
pub struct LeafOnlyTree {
    is_split: SimpleBitChance,
    leaf: FinalInt,
}

impl LeafOnlyTree {
    pub fn new() -> Self {
        Self {
            is_split: SimpleBitChance::new(),
            leaf: FinalInt::new(),
        }
    }

    pub fn write_header(&mut self, enc: &mut RacOut) {
        write_bitchance(enc, &mut self.is_split, false);
    }

    pub fn write_residual(&mut self, enc: &mut RacOut, lo: i32, hi: i32, value: i32) {
        self.leaf.write_int(enc, lo, hi, value);
    }
}
