//! `Palette-Channel` (PLC): per-plane remap of the distinct values a
//! plane actually uses into a dense `0..count` index range, grounded on
//! `original_source/transform/palette_C.hpp`. Unlike `Palette`, this
//! acts independently on every plane rather than grouping three planes
//! into one, and the encoded table is a strictly increasing sequence of
//! values rather than arbitrary triples, so each entry can be coded as
//! an offset from the previous one.

use crate::color_range::{ColorRanges, ColorVal, StaticColorRanges};
use crate::image::Image;
use crate::io::ByteSource;
use crate::rac::Rac;
use crate::symbol::{IntegerCoder, SimpleSymbolCoder};

use super::Transform;

pub struct PaletteChannel {
    tables: Vec<Vec<ColorVal>>,
    ranges: StaticColorRanges,
}

impl PaletteChannel {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            ranges: StaticColorRanges::new(vec![(0, 0)]),
        }
    }
}

impl<S: ByteSource> Transform<S> for PaletteChannel {
    fn init(&mut self, _ranges: &dyn ColorRanges) -> bool {
        true
    }

    fn load(&mut self, rac: &mut Rac<'_, S>, ranges: &dyn ColorRanges) {
        let mut coder: SimpleSymbolCoder<18> = IntegerCoder::new();
        self.tables.clear();
        let mut bounds = Vec::with_capacity(ranges.num_planes());
        for p in 0..ranges.num_planes() {
            let gmin = ranges.min(p);
            let gmax = ranges.max(p);
            let span = (gmax - gmin + 1).max(1);
            let count = coder.read_int(rac, 1, span) as usize;
            let mut values = Vec::with_capacity(count);
            let mut prev = gmin - 1;
            let mut remaining = count as i32 - 1;
            for _ in 0..count {
                let v = prev + 1 + coder.read_int(rac, 0, gmax - (prev + 1) - remaining);
                values.push(v);
                prev = v;
                remaining -= 1;
            }
            bounds.push((0, values.len() as i32 - 1));
            self.tables.push(values);
        }
        self.ranges = StaticColorRanges::new(bounds);
    }

    fn output_ranges(&self) -> &dyn ColorRanges {
        &self.ranges
    }

    fn inv_data(&self, image: &mut Image) {
        let (w, h) = (image.width, image.height);
        for frame in image.frames.iter_mut() {
            for (p, table) in self.tables.iter().enumerate() {
                if p >= frame.planes.len() || table.is_empty() {
                    continue;
                }
                for r in 0..h {
                    for c in 0..w {
                        let idx = frame.planes[p].get(r, c).clamp(0, table.len() as i32 - 1);
                        let v = table[idx as usize];
                        frame.planes[p].set(r, c, v);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_range::StaticColorRanges as Scr;
    use crate::image::Frame;
    use crate::io::SliceSource;

    #[test]
    fn inv_data_expands_dense_indices_back_to_sparse_values() {
        let parent = Scr::new(vec![(0, 100)]);
        let mut t = PaletteChannel::new();
        <PaletteChannel as Transform<SliceSource>>::init(&mut t, &parent);
        t.tables = vec![vec![5, 42, 99]];
        t.ranges = Scr::new(vec![(0, 2)]);

        let mut image = Image {
            width: 3,
            height: 1,
            frames: vec![Frame::new(3, 1, &[(0, 2)])],
            alpha_zero_special: false,
        };
        image.frames[0].set(0, 0, 0, 0);
        image.frames[0].set(0, 0, 1, 1);
        image.frames[0].set(0, 0, 2, 2);
        <PaletteChannel as Transform<SliceSource>>::inv_data(&t, &mut image);

        assert_eq!(image.frames[0].get(0, 0, 0), 5);
        assert_eq!(image.frames[0].get(0, 0, 1), 42);
        assert_eq!(image.frames[0].get(0, 0, 2), 99);
    }
}
