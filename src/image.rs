//! The decoded pixel buffer (spec §3 "Data Model").
//!
//! An `Image` is a sequence of `Frame`s, each holding one `Plane` per
//! color/alpha/lookback channel. Planes always store full resolution
//! pixels; interlaced addressing (`get_z`/`set_z`) computes the
//! full-resolution coordinate a given `(zoomlevel, row, col)` maps to
//! rather than keeping separate per-zoomlevel buffers, mirroring how the
//! reference decoder indexes a single backing array by shifted
//! coordinates.

use crate::color_range::ColorVal;

/// Row/column shift pair for zoomlevel `z`: full-resolution coordinates
/// are `(r << row_shift, c << col_shift)`. `z = 0` is full resolution;
/// each increment of `z` halves (ceiling) either the row or column count,
/// alternating, so coarser zoomlevels shift more.
pub fn zoom_shift(z: i32) -> (u32, u32) {
    (((z + 1) / 2) as u32, (z / 2) as u32)
}

#[derive(Clone, Debug)]
enum PlaneStorage {
    /// Every pixel has the same value; never materialized as a full
    /// buffer. Common for a fully-opaque alpha plane or a palette index
    /// plane that happens to collapse to one color.
    Constant(ColorVal),
    Pixels(Vec<ColorVal>),
}

#[derive(Clone, Debug)]
pub struct Plane {
    width: usize,
    height: usize,
    storage: PlaneStorage,
}

impl Plane {
    pub fn new_constant(width: usize, height: usize, value: ColorVal) -> Self {
        Self {
            width,
            height,
            storage: PlaneStorage::Constant(value),
        }
    }

    pub fn new_filled(width: usize, height: usize, value: ColorVal) -> Self {
        Self {
            width,
            height,
            storage: PlaneStorage::Pixels(vec![value; width * height]),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.storage, PlaneStorage::Constant(_))
    }

    pub fn get(&self, r: usize, c: usize) -> ColorVal {
        match &self.storage {
            PlaneStorage::Constant(v) => *v,
            PlaneStorage::Pixels(data) => data[r * self.width + c],
        }
    }

    pub fn set(&mut self, r: usize, c: usize, v: ColorVal) {
        match &mut self.storage {
            PlaneStorage::Constant(cv) if *cv == v => {}
            PlaneStorage::Constant(cv) => {
                let mut data = vec![*cv; self.width * self.height];
                data[r * self.width + c] = v;
                self.storage = PlaneStorage::Pixels(data);
            }
            PlaneStorage::Pixels(data) => data[r * self.width + c] = v,
        }
    }
}

/// One frame of (possibly animated) image data.
#[derive(Clone, Debug)]
pub struct Frame {
    pub planes: Vec<Plane>,
    /// Per-row active column band `[col_begin[r], col_end[r])`. Defaults
    /// to the full row width; only narrowed by a Frame-Shape-style
    /// transform, which this decoder does not implement, but the decode
    /// drivers still branch on these fields (spec §11), so they stay
    /// present rather than being assumed-full everywhere.
    pub col_begin: Vec<usize>,
    pub col_end: Vec<usize>,
    /// `Some(i)` if this frame is pixel-identical to an already-decoded
    /// earlier frame `i` (Frame-Combine's lookback case); `None` for a
    /// frame decoded from scratch.
    pub seen_before: Option<usize>,
    /// Display duration in milliseconds.
    pub delay: u32,
}

impl Frame {
    pub fn new(width: usize, height: usize, plane_bounds: &[(ColorVal, ColorVal)]) -> Self {
        let planes = plane_bounds
            .iter()
            .map(|&(lo, _hi)| Plane::new_filled(width, height, lo))
            .collect();
        Self {
            planes,
            col_begin: vec![0; height],
            col_end: vec![width; height],
            seen_before: None,
            delay: 0,
        }
    }

    pub fn get(&self, p: usize, r: usize, c: usize) -> ColorVal {
        self.planes[p].get(r, c)
    }

    pub fn set(&mut self, p: usize, r: usize, c: usize, v: ColorVal) {
        self.planes[p].set(r, c, v);
    }

    pub fn get_z(&self, p: usize, z: i32, r: usize, c: usize) -> ColorVal {
        let (rs, cs) = zoom_shift(z);
        self.planes[p].get(r << rs, c << cs)
    }

    pub fn set_z(&mut self, p: usize, z: i32, r: usize, c: usize, v: ColorVal) {
        let (rs, cs) = zoom_shift(z);
        self.planes[p].set(r << rs, c << cs, v);
    }
}

/// A decoded (possibly animated) FLIF image.
#[derive(Clone, Debug)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub frames: Vec<Frame>,
    /// Whether a fully-transparent pixel's color channels were forced to
    /// zero by the encoder and should be treated specially by
    /// predictors (spec §4.4, "alpha_zero_special").
    pub alpha_zero_special: bool,
}

impl Image {
    pub fn num_planes(&self) -> usize {
        self.frames.first().map(|f| f.planes.len()).unwrap_or(0)
    }

    pub fn rows(&self, z: i32) -> usize {
        let (rs, _) = zoom_shift(z);
        ((self.height - 1) >> rs) + 1
    }

    pub fn cols(&self, z: i32) -> usize {
        let (_, cs) = zoom_shift(z);
        ((self.width - 1) >> cs) + 1
    }

    /// Total number of zoomlevels, i.e. one past the coarsest level at
    /// which both dimensions have collapsed to a single pixel. The
    /// interlaced decode driver starts its "top-left pixel" special case
    /// at `z = zooms()` and then walks zoomlevels `zooms() - 1` down to
    /// `0`.
    pub fn zooms(&self) -> i32 {
        let mut z = 0;
        while self.rows(z) > 1 || self.cols(z) > 1 {
            z += 1;
        }
        z + 1
    }
}
