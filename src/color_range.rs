//! Per-plane value bounds (spec §3, §4.6).
//!
//! Every transform in the stack wraps the `ColorRanges` of the transform
//! below it, narrowing or reinterpreting bounds as it goes: `Bounds` just
//! clamps, `Palette` collapses three color planes into one index plane
//! with a tiny range, `Palette-Channel` remaps each plane's distinct
//! values into a dense `0..count` range. The decode drivers only ever see
//! the outermost `ColorRanges`, so the pixel loop never needs to know
//! which transforms are active.

pub type ColorVal = i32;

/// Previously-decoded plane values at the current pixel, used by plane
/// dependent bounds (e.g. alpha's range can depend on RGB having already
/// settled at this pixel in some transform stacks).
pub type PrevPlanes = Vec<ColorVal>;

/// Bounds for every plane of an image, possibly dependent on
/// already-decoded plane values at the same pixel.
pub trait ColorRanges {
    fn num_planes(&self) -> usize;
    fn min(&self, p: usize) -> ColorVal;
    fn max(&self, p: usize) -> ColorVal;

    /// Bounds for plane `p`, given the values already decoded for planes
    /// `0..p` at this pixel. The default ignores `prev` and returns the
    /// plane's static bounds; transforms that need conditional bounds
    /// override this.
    fn minmax(&self, p: usize, prev: &PrevPlanes) -> (ColorVal, ColorVal) {
        let _ = prev;
        (self.min(p), self.max(p))
    }

    /// Whether every plane's bounds are independent of `prev` (true for
    /// the root ranges and `Bounds`, false once `Palette`/`PLC` are
    /// pushed on top). Lets the decode driver skip rebuilding `prev` for
    /// speed when it would not change anything.
    fn is_static(&self) -> bool {
        true
    }
}

/// Flat, non-conditional per-plane bounds. This is what the container
/// header builds directly from the per-plane bit depth fields, and what
/// `Bounds` (spec's transform of the same name) also reduces to.
#[derive(Clone, Debug)]
pub struct StaticColorRanges {
    bounds: Vec<(ColorVal, ColorVal)>,
}

impl StaticColorRanges {
    pub fn new(bounds: Vec<(ColorVal, ColorVal)>) -> Self {
        assert!(!bounds.is_empty());
        Self { bounds }
    }
}

impl ColorRanges for StaticColorRanges {
    fn num_planes(&self) -> usize {
        self.bounds.len()
    }

    fn min(&self, p: usize) -> ColorVal {
        self.bounds[p].0
    }

    fn max(&self, p: usize) -> ColorVal {
        self.bounds[p].1
    }
}
