//! `Frame-Combine` (FRA): adds a per-pixel "lookback" channel so a
//! static region of an animation frame can be coded as "copy this pixel
//! from N frames ago" instead of re-predicting it, grounded on
//! `original_source/transform/framecombine.hpp`. The output ranges always
//! widen to the canonical 5 planes (Y/I/Q, alpha, lookback) regardless of
//! how many planes the source has, synthesizing a constant-0 alpha bound
//! when the source lacks one; `inv_data` consumes the lookback plane to
//! copy pixels across frames and then drops it, along with any alpha
//! plane that was synthesized rather than real, from the plane list.

use crate::color_range::{ColorRanges, StaticColorRanges};
use crate::image::Image;
use crate::io::ByteSource;
use crate::rac::Rac;
use crate::symbol::{IntegerCoder, SimpleSymbolCoder};

use super::Transform;

pub struct FrameCombine {
    max_lookback: i32,
    base_planes: usize,
    nb_frames: usize,
    ranges: StaticColorRanges,
}

impl FrameCombine {
    pub fn new() -> Self {
        Self {
            max_lookback: 0,
            base_planes: 0,
            nb_frames: 1,
            ranges: StaticColorRanges::new(vec![(0, 0)]),
        }
    }
}

impl<S: ByteSource> Transform<S> for FrameCombine {
    fn init(&mut self, ranges: &dyn ColorRanges) -> bool {
        self.base_planes = ranges.num_planes();
        true
    }

    fn set_frame_count(&mut self, nb_frames: usize) {
        self.nb_frames = nb_frames;
    }

    fn load(&mut self, rac: &mut Rac<'_, S>, ranges: &dyn ColorRanges) {
        let mut coder: SimpleSymbolCoder<18> = IntegerCoder::new();
        let lookback_cap = (self.nb_frames.max(2) - 1) as i32;
        self.max_lookback = coder.read_int(rac, 1, lookback_cap);
        self.base_planes = ranges.num_planes();

        // The canonical plane layout downstream always has 5 planes (Y/I/Q,
        // alpha, lookback); sources with fewer color planes get a
        // constant-0 alpha bound synthesized in.
        let mut bounds = vec![(0, 0); 5];
        for p in 0..3.min(ranges.num_planes()) {
            bounds[p] = (ranges.min(p), ranges.max(p));
        }
        bounds[3] = if ranges.num_planes() > 3 {
            (ranges.min(3), ranges.max(3))
        } else {
            (0, 0)
        };
        bounds[4] = (0, self.max_lookback);
        self.ranges = StaticColorRanges::new(bounds);
    }

    fn output_ranges(&self) -> &dyn ColorRanges {
        &self.ranges
    }

    fn inv_data(&self, image: &mut Image) {
        let (w, h) = (image.width, image.height);
        for idx in 0..image.frames.len() {
            for r in 0..h {
                for c in 0..w {
                    let lookback = image.frames[idx]
                        .planes
                        .last()
                        .map(|p| p.get(r, c))
                        .unwrap_or(0);
                    if lookback > 0 && (lookback as usize) <= idx {
                        let src_idx = idx - lookback as usize;
                        for p in 0..self.base_planes {
                            let v = image.frames[src_idx].planes[p].get(r, c);
                            image.frames[idx].planes[p].set(r, c, v);
                        }
                    }
                }
            }
            image.frames[idx].planes.truncate(self.base_planes.max(1));
        }
    }
}
