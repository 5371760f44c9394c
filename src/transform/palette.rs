//! `Palette`: collapses three color planes into a single index plane
//! plus a lookup table of the distinct (Y, I, Q) / (R, G, B) triples the
//! image actually uses, grounded on
//! `original_source/transform/palette.hpp`. Only applies to images with
//! at least three color planes; the table itself is small enough
//! (`MAX_PALETTE_SIZE`, spec §4.2) to read as a flat sequence of
//! per-plane-bounded integers.
//!
//! The index plane lives at plane 1, not plane 0: the output ranges keep
//! every plane the source had, with planes 0 and 2 pinned to a single
//! value (they only become real Y/Q data again once `inv_data` runs) and
//! any plane beyond 2 (alpha, a later transform's lookback plane, ...)
//! passed straight through untouched. This keeps the fixed plane-index
//! constants the rest of the decoder relies on valid on top of `Palette`.

use crate::color_range::{ColorRanges, ColorVal, StaticColorRanges};
use crate::constants::MAX_PALETTE_SIZE;
use crate::image::Image;
use crate::io::ByteSource;
use crate::rac::Rac;
use crate::symbol::{IntegerCoder, SimpleSymbolCoder};

use super::Transform;

pub struct Palette {
    table: Vec<(ColorVal, ColorVal, ColorVal)>,
    sorted: bool,
    ranges: StaticColorRanges,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            sorted: false,
            ranges: StaticColorRanges::new(vec![(0, 0)]),
        }
    }
}

impl<S: ByteSource> Transform<S> for Palette {
    fn init(&mut self, ranges: &dyn ColorRanges) -> bool {
        ranges.num_planes() >= 3
    }

    fn load(&mut self, rac: &mut Rac<'_, S>, ranges: &dyn ColorRanges) {
        let mut size_coder: SimpleSymbolCoder<18> = IntegerCoder::new();
        let size = size_coder.read_int(rac, 1, MAX_PALETTE_SIZE as i32) as usize;
        self.sorted = rac.read_uniform_bit();

        self.table.clear();
        self.table.reserve(size);

        // Sorted tables are coded with conditional minima: entries are
        // emitted in non-decreasing Y order, so each Y only has to clear
        // the previous entry's Y, and I only has to clear the previous
        // entry's I when Y did not change since the last entry.
        let mut coder_y: SimpleSymbolCoder<18> = IntegerCoder::new();
        let mut coder_i: SimpleSymbolCoder<18> = IntegerCoder::new();
        let mut coder_q: SimpleSymbolCoder<18> = IntegerCoder::new();
        let mut min_y = ranges.min(0);
        let mut prev = (-1i32, -1i32, -1i32);

        for _ in 0..size {
            let y = if self.sorted {
                coder_y.read_int(rac, min_y, ranges.max(0))
            } else {
                coder_y.read_int(rac, ranges.min(0), ranges.max(0))
            };
            let i_lo = if self.sorted && prev.0 == y { prev.1 } else { ranges.min(1) };
            let i = coder_i.read_int(rac, i_lo, ranges.max(1));
            let q = coder_q.read_int(rac, ranges.min(2), ranges.max(2));

            self.table.push((y, i, q));
            prev = (y, i, q);
            if self.sorted {
                min_y = y;
            }
        }

        let nplanes = ranges.num_planes();
        let mut bounds = vec![(0, 0); nplanes];
        bounds[1] = (0, size.max(1) as i32 - 1);
        for p in 3..nplanes {
            bounds[p] = (ranges.min(p), ranges.max(p));
        }
        self.ranges = StaticColorRanges::new(bounds);
    }

    fn output_ranges(&self) -> &dyn ColorRanges {
        &self.ranges
    }

    fn inv_data(&self, image: &mut Image) {
        let (w, h) = (image.width, image.height);
        for frame in image.frames.iter_mut() {
            for r in 0..h {
                for c in 0..w {
                    let idx = frame.planes[1].get(r, c).clamp(0, self.table.len() as i32 - 1);
                    let (y, i, q) = self.table[idx as usize];
                    frame.planes[0].set(r, c, y);
                    frame.planes[1].set(r, c, i);
                    frame.planes[2].set(r, c, q);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_range::StaticColorRanges as Scr;
    use crate::io::SliceSource;

    #[test]
    fn init_refuses_images_with_too_few_planes() {
        let parent = Scr::new(vec![(0, 255), (0, 255)]);
        let mut p = Palette::new();
        assert!(!<Palette as Transform<SliceSource>>::init(&mut p, &parent));
    }

    #[test]
    fn init_accepts_three_plane_images() {
        let parent = Scr::new(vec![(0, 255), (0, 255), (0, 255)]);
        let mut p = Palette::new();
        assert!(<Palette as Transform<SliceSource>>::init(&mut p, &parent));
    }

    #[test]
    fn inv_data_expands_index_plane_into_color_planes() {
        let parent = Scr::new(vec![(0, 255), (0, 255), (0, 255)]);
        let mut p = Palette::new();
        <Palette as Transform<SliceSource>>::init(&mut p, &parent);
        p.table = vec![(10, 20, 30), (40, 50, 60)];
        p.ranges = Scr::new(vec![(0, 0), (0, 1), (0, 0)]);

        let mut image = Image {
            width: 2,
            height: 1,
            frames: vec![crate::image::Frame::new(2, 1, &[(0, 0), (0, 1), (0, 0)])],
            alpha_zero_special: false,
        };
        image.frames[0].set(1, 0, 0, 1);
        image.frames[0].set(1, 0, 1, 0);
        <Palette as Transform<SliceSource>>::inv_data(&p, &mut image);

        assert_eq!(image.frames[0].planes.len(), 3);
        assert_eq!(image.frames[0].get(0, 0, 0), 40);
        assert_eq!(image.frames[0].get(1, 0, 0), 50);
        assert_eq!(image.frames[0].get(2, 0, 0), 60);
        assert_eq!(image.frames[0].get(0, 0, 1), 10);
    }

    #[test]
    fn output_ranges_preserve_plane_count_and_pass_alpha_through() {
        let parent = Scr::new(vec![(0, 255), (0, 255), (0, 255), (0, 255)]);
        let mut p = Palette::new();
        <Palette as Transform<SliceSource>>::init(&mut p, &parent);
        let mut src = SliceSource::new(&[]);
        let mut rac = Rac::new(&mut src);
        <Palette as Transform<SliceSource>>::load(&mut p, &mut rac, &parent);
        let out = <Palette as Transform<SliceSource>>::output_ranges(&p);
        assert_eq!(out.num_planes(), 4);
        assert_eq!(out.min(0), 0);
        assert_eq!(out.max(0), 0);
        assert_eq!(out.min(2), 0);
        assert_eq!(out.max(2), 0);
        assert_eq!(out.min(3), 0);
        assert_eq!(out.max(3), 255);
    }
}
