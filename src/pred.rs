//! Predictors and property vectors (spec §4.4).
//!
//! Two decode orders, two predictors: scanline decode guesses a pixel
//! from its already-decoded left/top/top-left neighbors via
//! median-of-gradient; interlaced decode guesses a not-yet-decoded
//! pixel by averaging the two already-known neighbors that straddle it
//! (top+bottom for the rows being filled, left+right for the columns).
//! Both also build a property vector — a handful of neighbor values plus
//! the guess itself — that the MANIAC tree at that plane uses to pick a
//! leaf.

use crate::color_range::{ColorRanges, ColorVal, PrevPlanes};
use crate::image::{Frame, Image};

/// Median of three values without sorting: sum minus the extremes.
pub fn median3(a: ColorVal, b: ColorVal, c: ColorVal) -> ColorVal {
    let lo = a.min(b).min(c);
    let hi = a.max(b).max(c);
    a + b + c - lo - hi
}

/// Which side (if either) the gradient guess got clamped to by the
/// median, used as a texture-direction feature in the property vector.
fn clamp_direction(gradient: ColorVal, left: ColorVal, top: ColorVal) -> ColorVal {
    if gradient < left.min(top) {
        -1
    } else if gradient > left.max(top) {
        1
    } else {
        0
    }
}

/// The scanline predictor: median of (left+top-topleft, left, top).
pub fn predict_scanline(left: ColorVal, top: ColorVal, topleft: ColorVal) -> ColorVal {
    median3(left + top - topleft, left, top)
}

fn left_of(frame: &Frame, p: usize, r: usize, c: usize, grey: ColorVal) -> ColorVal {
    if c > 0 {
        frame.get(p, r, c - 1)
    } else if r > 0 {
        frame.get(p, r - 1, c)
    } else {
        grey
    }
}

fn top_of(frame: &Frame, p: usize, r: usize, c: usize, left: ColorVal) -> ColorVal {
    if r > 0 {
        frame.get(p, r - 1, c)
    } else {
        left
    }
}

fn topleft_of(frame: &Frame, p: usize, r: usize, c: usize, top: ColorVal) -> ColorVal {
    if r > 0 && c > 0 {
        frame.get(p, r - 1, c - 1)
    } else {
        top
    }
}

fn top2_of(frame: &Frame, p: usize, r: usize, c: usize, top: ColorVal) -> ColorVal {
    if r > 1 {
        frame.get(p, r - 2, c)
    } else {
        top
    }
}

fn left2_of(frame: &Frame, p: usize, r: usize, c: usize, left: ColorVal) -> ColorVal {
    if c > 1 {
        frame.get(p, r, c - 2)
    } else {
        left
    }
}

fn topright_of(frame: &Frame, p: usize, r: usize, c: usize, width: usize, top: ColorVal) -> ColorVal {
    if r > 0 && c + 1 < width {
        frame.get(p, r - 1, c + 1)
    } else {
        top
    }
}

/// Number of entries `predict_and_calc_props_scanline` pushes, so a
/// caller can size a `property_ranges` table to match.
pub fn num_properties_scanline(p: usize, nump: usize) -> usize {
    let base = 6 + 2 + p;
    if nump > 3 && p == 3 {
        base + 1
    } else {
        base
    }
}

/// Computes the scanline predictor's guess, clamps it to `ranges`, and
/// appends that pixel's property vector (neighbors, guess, clamp
/// direction, already-decoded same-pixel plane values, and — for the
/// alpha plane of an image that has one — a zero/nonzero flag) to
/// `properties`.
#[allow(clippy::too_many_arguments)]
pub fn predict_and_calc_props_scanline(
    properties: &mut Vec<i32>,
    ranges: &dyn ColorRanges,
    frame: &Frame,
    width: usize,
    p: usize,
    r: usize,
    c: usize,
    prev_planes: &PrevPlanes,
    grey: ColorVal,
    is_lookback_plane: bool,
) -> (ColorVal, ColorVal, ColorVal) {
    properties.clear();
    let left = left_of(frame, p, r, c, grey);
    let top = top_of(frame, p, r, c, left);
    let topleft = topleft_of(frame, p, r, c, top);
    let top2 = top2_of(frame, p, r, c, top);
    let left2 = left2_of(frame, p, r, c, left);
    let topright = topright_of(frame, p, r, c, width, top);
    let guess = if is_lookback_plane {
        0
    } else {
        predict_scanline(left, top, topleft)
    };
    let direction = clamp_direction(left + top - topleft, left, top);

    properties.push(top);
    properties.push(left);
    properties.push(topleft);
    properties.push(top2);
    properties.push(left2);
    properties.push(topright);
    properties.push(guess);
    properties.push(direction);
    properties.extend_from_slice(prev_planes);
    if ranges.num_planes() > 3 && p == 3 {
        properties.push(if left == 0 { 1 } else { 0 });
    }

    let (min, max) = ranges.minmax(p, prev_planes);
    (guess.clamp(min, max), min, max)
}

fn left_z(frame: &Frame, p: usize, z: i32, r: usize, c: usize, grey: ColorVal) -> ColorVal {
    if c > 0 {
        frame.get_z(p, z, r, c - 1)
    } else if r > 0 {
        frame.get_z(p, z, r - 1, c)
    } else {
        grey
    }
}

fn top_z(frame: &Frame, p: usize, z: i32, r: usize, c: usize, left: ColorVal) -> ColorVal {
    if r > 0 {
        frame.get_z(p, z, r - 1, c)
    } else {
        left
    }
}

/// The interlaced predictor: average of the two known neighbors
/// straddling the pixel being filled (top/bottom on an even zoomlevel,
/// since those fill in odd rows; left/right on an odd zoomlevel, which
/// fill in odd columns). The Frame-Combine lookback plane always
/// predicts zero, since most pixels do not reference an earlier frame.
pub fn predict_interlaced(
    frame: &Frame,
    image: &Image,
    p: usize,
    z: i32,
    r: usize,
    c: usize,
    is_lookback_plane: bool,
) -> ColorVal {
    if is_lookback_plane {
        return 0;
    }
    if z % 2 == 0 {
        let rows = image.rows(z);
        let top = if r > 0 {
            frame.get_z(p, z, r - 1, c)
        } else {
            frame.get_z(p, z, (r + 1).min(rows - 1), c)
        };
        let bottom = if r + 1 < rows {
            frame.get_z(p, z, r + 1, c)
        } else {
            top
        };
        (top + bottom) / 2
    } else {
        let cols = image.cols(z);
        let left = if c > 0 {
            frame.get_z(p, z, r, c - 1)
        } else {
            frame.get_z(p, z, r, (c + 1).min(cols - 1))
        };
        let right = if c + 1 < cols {
            frame.get_z(p, z, r, c + 1)
        } else {
            left
        };
        (left + right) / 2
    }
}

pub fn num_properties_interlaced(p: usize, nump: usize) -> usize {
    let base = 6 + 2 + p + 1;
    if nump > 3 && p == 3 {
        base + 1
    } else {
        base
    }
}

/// Interlaced counterpart of `predict_and_calc_props_scanline`: same
/// shape of property vector, gathered at zoomlevel `z` via `get_z`
/// instead of full-resolution `get`, plus a `z % 2` direction feature
/// that the scanline pass has no equivalent of (it only ever has one
/// raster direction).
#[allow(clippy::too_many_arguments)]
pub fn predict_and_calc_props_interlaced(
    properties: &mut Vec<i32>,
    ranges: &dyn ColorRanges,
    frame: &Frame,
    image: &Image,
    p: usize,
    z: i32,
    r: usize,
    c: usize,
    prev_planes: &PrevPlanes,
    grey: ColorVal,
    is_lookback_plane: bool,
) -> (ColorVal, ColorVal, ColorVal) {
    properties.clear();
    let left = left_z(frame, p, z, r, c, grey);
    let top = top_z(frame, p, z, r, c, left);
    let topleft = if r > 0 && c > 0 {
        frame.get_z(p, z, r - 1, c - 1)
    } else {
        top
    };
    let top2 = if r > 1 {
        frame.get_z(p, z, r - 2, c)
    } else {
        top
    };
    let left2 = if c > 1 {
        frame.get_z(p, z, r, c - 2)
    } else {
        left
    };
    let cols = image.cols(z);
    let topright = if r > 0 && c + 1 < cols {
        frame.get_z(p, z, r - 1, c + 1)
    } else {
        top
    };
    let guess = predict_interlaced(frame, image, p, z, r, c, is_lookback_plane);
    let direction = (z % 2) as i32;

    properties.push(top);
    properties.push(left);
    properties.push(topleft);
    properties.push(top2);
    properties.push(left2);
    properties.push(topright);
    properties.push(guess);
    properties.push(direction);
    properties.extend_from_slice(prev_planes);
    if ranges.num_planes() > 3 && p == 3 {
        properties.push(if left == 0 { 1 } else { 0 });
    }

    let (min, max) = ranges.minmax(p, prev_planes);
    (guess.clamp(min, max), min, max)
}

/// Per-property `(min, max)` bounds matching the push order in
/// `predict_and_calc_props_scanline`, for sizing a `MANIAC` tree's split
/// thresholds to something the property vector can actually produce.
pub fn property_ranges_scanline(ranges: &dyn ColorRanges, p: usize) -> Vec<(i32, i32)> {
    let (lo, hi) = (ranges.min(p), ranges.max(p));
    let mut out = vec![(lo, hi); 6];
    out.push((lo, hi)); // guess
    out.push((-1, 1)); // clamp direction
    for q in 0..p {
        out.push((ranges.min(q), ranges.max(q)));
    }
    if ranges.num_planes() > 3 && p == 3 {
        out.push((0, 1));
    }
    out
}

/// Interlaced counterpart of `property_ranges_scanline`; the only
/// difference is the direction feature, which is `z % 2` (0 or 1) rather
/// than a three-way clamp direction.
pub fn property_ranges_interlaced(ranges: &dyn ColorRanges, p: usize) -> Vec<(i32, i32)> {
    let (lo, hi) = (ranges.min(p), ranges.max(p));
    let mut out = vec![(lo, hi); 6];
    out.push((lo, hi)); // guess
    out.push((0, 1)); // z % 2
    for q in 0..p {
        out.push((ranges.min(q), ranges.max(q)));
    }
    if ranges.num_planes() > 3 && p == 3 {
        out.push((0, 1));
    }
    out
}

/// Fixed plane visiting order: alpha first (cheapest to predict well and
/// gates `alpha_zero_special` for the color planes), then Y/I/Q or
/// R/G/B, then the Frame-Combine lookback plane last.
pub const PLANE_ORDERING: [usize; 5] = [3, 0, 1, 2, 4];

/// `PLANE_ORDERING` filtered down to the planes an image with `nump`
/// planes actually has.
pub fn plane_order(nump: usize) -> Vec<usize> {
    PLANE_ORDERING.iter().copied().filter(|&p| p < nump).collect()
}

/// Total number of `(plane, zoomlevel)` units to decode while walking
/// zoomlevels `[end_zl, begin_zl)` in decreasing order, visiting every
/// plane at each zoomlevel before moving to the next.
pub fn plane_zoomlevels(nump: usize, begin_zl: i32, end_zl: i32) -> i32 {
    plane_order(nump).len() as i32 * (begin_zl - end_zl)
}

/// Maps a linear index from `0..plane_zoomlevels(..)` to the `(plane,
/// zoomlevel)` pair the interlaced driver should process at that step.
pub fn plane_zoomlevel(nump: usize, begin_zl: i32, end_zl: i32, i: i32) -> (usize, i32) {
    let order = plane_order(nump);
    let n = order.len() as i32;
    let band = i / n;
    let within = (i % n) as usize;
    let z = begin_zl - 1 - band;
    let _ = end_zl;
    (order[within], z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median3_matches_sorted_middle_value() {
        assert_eq!(median3(1, 5, 3), 3);
        assert_eq!(median3(5, 1, 3), 3);
        assert_eq!(median3(-4, 10, 2), 2);
        assert_eq!(median3(7, 7, 7), 7);
    }

    #[test]
    fn predict_scanline_falls_back_to_left_top_clamp() {
        // gradient = left+top-topleft; when topleft matches one neighbor,
        // the gradient collapses to the other neighbor's value exactly.
        assert_eq!(predict_scanline(10, 20, 10), 20);
        assert_eq!(predict_scanline(10, 20, 20), 10);
    }

    #[test]
    fn plane_order_drops_missing_planes() {
        assert_eq!(plane_order(3), vec![0, 1, 2]);
        assert_eq!(plane_order(4), vec![3, 0, 1, 2]);
        assert_eq!(plane_order(5), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn plane_zoomlevel_enumerates_each_plane_at_each_z_descending() {
        let nump = 3;
        let total = plane_zoomlevels(nump, 3, 0);
        assert_eq!(total, 9);
        let mut seen = Vec::new();
        for i in 0..total {
            seen.push(plane_zoomlevel(nump, 3, 0, i));
        }
        assert_eq!(seen[0], (0, 2));
        assert_eq!(seen[3], (0, 1));
        assert_eq!(seen[6], (0, 0));
    }
}
