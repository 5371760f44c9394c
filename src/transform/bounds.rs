//! `Bounds`: tightens each plane's declared range to the actual min/max
//! the encoder observed, grounded on `original_source/transform/bounds.hpp`.
//! Does not touch pixel values at all — only the `ColorRanges` metadata
//! narrows, which in turn shrinks every downstream integer coder's
//! exponent/mantissa width.

use crate::color_range::{ColorRanges, ColorVal, StaticColorRanges};
use crate::image::Image;
use crate::io::ByteSource;
use crate::rac::Rac;
use crate::symbol::{IntegerCoder, SimpleSymbolCoder};

use super::Transform;

pub struct Bounds {
    ranges: StaticColorRanges,
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            ranges: StaticColorRanges::new(vec![(0, 0)]),
        }
    }
}

impl<S: ByteSource> Transform<S> for Bounds {
    fn init(&mut self, ranges: &dyn ColorRanges) -> bool {
        let bounds: Vec<(ColorVal, ColorVal)> =
            (0..ranges.num_planes()).map(|p| (ranges.min(p), ranges.max(p))).collect();
        self.ranges = StaticColorRanges::new(bounds);
        true
    }

    fn load(&mut self, rac: &mut Rac<'_, S>, ranges: &dyn ColorRanges) {
        let mut coder: SimpleSymbolCoder<18> = IntegerCoder::new();
        let mut bounds = Vec::with_capacity(ranges.num_planes());
        for p in 0..ranges.num_planes() {
            let gmin = ranges.min(p);
            let gmax = ranges.max(p);
            let min = coder.read_int(rac, gmin, gmax);
            let max = coder.read_int(rac, min, gmax);
            bounds.push((min, max));
        }
        self.ranges = StaticColorRanges::new(bounds);
    }

    fn output_ranges(&self) -> &dyn ColorRanges {
        &self.ranges
    }

    fn inv_data(&self, _image: &mut Image) {
        // Pure range restriction; pixel values already live in-bounds.
    }
}
