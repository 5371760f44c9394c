//! Container header parsing and the two pixel-decode drivers (spec §4.5,
//! §6, §9, §11).
//!
//! `Decoder` is a two-phase construct-then-drive surface: `new` wraps a
//! `ByteSource`, a handful of setters configure a progressive callback,
//! quality target, and scale, then `decode` parses the header, the
//! transform stack, and the pixel data in the bitstream's fixed order and
//! returns a fully reconstructed `Image`.

use log::{debug, warn};

use crate::chance::BitChance;
use crate::color_range::{ColorRanges, ColorVal, PrevPlanes, StaticColorRanges};
use crate::constants::{MAX_TRANSFORM, NB_NOLEARN_ZOOMS, PLANE_ALPHA, PLANE_LOOKBACK};
use crate::crc32::Checksum;
use crate::error::{Error, Result};
use crate::image::{Frame, Image};
use crate::io::ByteSource;
use crate::maniac::Tree;
use crate::pred::{
    plane_order, predict_and_calc_props_interlaced, predict_and_calc_props_scanline,
    predict_interlaced, property_ranges_interlaced, property_ranges_scanline,
};
use crate::rac::Rac;
use crate::symbol::UniformSymbolCoder;
use crate::transform::{self, Transform};

/// The two pixel encodings a FLIF body may use (spec §6, format byte).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Scanline,
    Interlaced,
}

/// Parsed container header, before the transform stack or any pixel data
/// has been read. Returned standalone by [`Decoder::identify`].
#[derive(Clone, Debug)]
pub struct Header {
    pub width: usize,
    pub height: usize,
    pub num_planes: usize,
    pub method: Method,
    pub num_frames: usize,
    depth_byte: u8,
}

/// A decoder's progressive-preview callback: the partially-decoded image,
/// the current quality reached on a 0..=10000 scale, and the number of
/// input bytes consumed so far. Returns the quality to keep decoding
/// toward; a value no greater than the one just reported stops decoding
/// early and returns the (interpolated) image as-is.
type Callback<'a> = dyn FnMut(&Image, i32, usize) -> i32 + 'a;

/// Parses and decodes a FLIF bitstream.
///
/// ```no_run
/// use flif::decoder::Decoder;
/// use flif::io::SliceSource;
///
/// let bytes = std::fs::read("image.flif").unwrap();
/// let mut source = SliceSource::new(&bytes);
/// let image = Decoder::new(&mut source).decode().unwrap();
/// ```
pub struct Decoder<'a, S: ByteSource> {
    source: &'a mut S,
    callback: Option<Box<Callback<'a>>>,
    quality: i32,
    scale: i32,
    target_size: Option<(usize, usize)>,
}

impl<'a, S: ByteSource> Decoder<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            callback: None,
            quality: 10_000,
            scale: 1,
            target_size: None,
        }
    }

    /// Installs a progressive-preview callback (spec §4.5, "Progressive
    /// callback"). Only the interlaced decode driver calls it; scanline
    /// bitstreams have no useful partial state to preview, so it fires
    /// once at the end with a fully decoded image.
    pub fn set_callback<F>(mut self, cb: F) -> Self
    where
        F: FnMut(&Image, i32, usize) -> i32 + 'a,
    {
        self.callback = Some(Box::new(cb));
        self
    }

    /// Target quality on a 0..=100 scale (spec §4.5, "Quality and
    /// scale"). Defaults to 100 (full decode). Internally rescaled to the
    /// 0..=10000 scale the progressive callback and interlaced driver
    /// compare against.
    pub fn set_quality(mut self, quality: i32) -> Self {
        self.quality = quality.clamp(0, 100) * 100;
        self
    }

    /// Power-of-two downscale factor; only meaningful for interlaced
    /// bitstreams (spec §4.5). Defaults to 1 (no downscale).
    pub fn set_scale(mut self, scale: i32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Requests the largest power-of-two scale that fits the decoded
    /// image within `width`x`height`, per `original_source/flif-dec.cpp`'s
    /// `rw`/`rh` resize-to-fit path (spec §11).
    pub fn resize_to_fit(mut self, width: usize, height: usize) -> Self {
        self.target_size = Some((width, height));
        self
    }

    /// Parses only the container header, without entering the RAC body
    /// (spec §11, "just_identify").
    pub fn identify(source: &mut S) -> Result<Header> {
        read_container_header(source)
    }

    /// Decodes the full bitstream: header, transform stack, pixel data,
    /// and (if present) the trailing checksum.
    pub fn decode(mut self) -> Result<Image> {
        let header = read_container_header(self.source)?;
        debug!(
            "FLIF header: {}x{}, {} plane(s), {:?}, {} frame(s)",
            header.width, header.height, header.num_planes, header.method, header.num_frames
        );

        if header.method == Method::Scanline && self.scale != 1 {
            return Err(Error::Unsupported(
                "scale other than 1 requires an interlaced bitstream".into(),
            ));
        }
        if let Some((tw, th)) = self.target_size {
            self.scale = resize_scale(header.width, header.height, tw, th);
        }

        let mut rac = Rac::new(self.source);

        let bounds = read_plane_bounds(&mut rac, &header)?;

        let alpha_zero_special = if header.num_planes > 3 {
            rac.read_uniform_bit()
        } else {
            false
        };

        if header.num_frames > 1 {
            let _loop_count = UniformSymbolCoder::read_int(&mut rac, 0, 100);
        }
        let mut frame_delays = vec![0u32; header.num_frames];
        if header.num_frames > 1 {
            for d in frame_delays.iter_mut() {
                *d = UniformSymbolCoder::read_int(&mut rac, 0, 60_000) as u32;
            }
        }

        if rac.read_uniform_bit() {
            // customBitchance: cutoff/alphaDiv only tune the original's
            // update table, which this build always uses at its default
            // rate, so they are read for bitstream alignment and discarded.
            let _cutoff = UniformSymbolCoder::read_int(&mut rac, 1, 128);
            let _alpha_div = UniformSymbolCoder::read_int(&mut rac, 4, 128);
            if rac.read_uniform_bit() {
                return Err(Error::Unsupported(
                    "non-default MANIAC initialization is not supported".into(),
                ));
            }
        }

        let base_ranges = StaticColorRanges::new(bounds);
        let transforms = read_transform_stack(&mut rac, &base_ranges, header.num_frames)?;
        let ranges = current_ranges(&base_ranges, &transforms);
        let nump = ranges.num_planes();
        let plane_bounds: Vec<(ColorVal, ColorVal)> =
            (0..nump).map(|p| (ranges.min(p), ranges.max(p))).collect();

        let mut image = Image {
            width: header.width,
            height: header.height,
            frames: (0..header.num_frames)
                .map(|_| Frame::new(header.width, header.height, &plane_bounds))
                .collect(),
            alpha_zero_special,
        };
        for (frame, &delay) in image.frames.iter_mut().zip(frame_delays.iter()) {
            frame.delay = delay;
        }

        let fully_decoded = match header.method {
            Method::Scanline => {
                decode_scanline(&mut rac, ranges, &mut image)?;
                true
            }
            Method::Interlaced => decode_interlaced(
                &mut rac,
                ranges,
                &mut image,
                &transforms,
                self.scale,
                self.quality,
                self.callback.as_deref_mut(),
            )?,
        };

        for t in transforms.iter().rev() {
            t.inv_data(&mut image);
        }

        if self.scale == 1 && fully_decoded && rac.read_uniform_bit() {
            let hi = UniformSymbolCoder::read_int(&mut rac, 0, 0xFFFF) as u32;
            let lo = UniformSymbolCoder::read_int(&mut rac, 0, 0xFFFF) as u32;
            let stored = (hi << 16) | lo;
            let computed = compute_pixel_checksum(&image);
            if computed != stored {
                warn!(
                    "FLIF checksum mismatch: stored {:#010x}, computed {:#010x}",
                    stored, computed
                );
            }
        }

        if let Some(cb) = self.callback.as_deref_mut() {
            if header.method == Method::Scanline {
                cb(&image, 10_000, rac.position());
            }
        }

        Ok(image)
    }
}

fn read_plane_bounds<S: ByteSource>(
    rac: &mut Rac<'_, S>,
    header: &Header,
) -> Result<Vec<(ColorVal, ColorVal)>> {
    if header.depth_byte == b'0' {
        let mut bounds = Vec::with_capacity(header.num_planes);
        for _ in 0..header.num_planes {
            let bits = UniformSymbolCoder::read_int(rac, 1, 16);
            bounds.push((0, ((1i64 << bits) - 1) as ColorVal));
        }
        Ok(bounds)
    } else {
        let max = if header.depth_byte == b'1' { 255 } else { 65535 };
        Ok(vec![(0, max); header.num_planes])
    }
}

fn read_transform_stack<S: ByteSource>(
    rac: &mut Rac<'_, S>,
    base_ranges: &dyn ColorRanges,
    num_frames: usize,
) -> Result<Vec<Box<dyn Transform<S>>>> {
    let mut transforms: Vec<Box<dyn Transform<S>>> = Vec::new();
    let mut last_index: i32 = -1;
    let name_count = transform::TRANSFORM_NAMES.len() as i32;
    while rac.read_uniform_bit() {
        if transforms.len() >= MAX_TRANSFORM {
            return Err(Error::Transform(
                "transform stack exceeds MAX_TRANSFORM".into(),
            ));
        }
        if last_index + 1 > name_count - 1 {
            return Err(Error::Transform(
                "transform stack exhausted the available transform names".into(),
            ));
        }
        let idx = UniformSymbolCoder::read_int(rac, last_index + 1, name_count - 1);
        last_index = idx;
        let name = transform::TRANSFORM_NAMES[idx as usize];
        let ranges_now = current_ranges(base_ranges, &transforms);
        let mut t = create_transform::<S>(name)
            .ok_or_else(|| Error::Unsupported(format!("transform '{name}'")))?;
        t.set_frame_count(num_frames);
        if !t.init(ranges_now) {
            return Err(Error::Transform(format!(
                "'{name}' does not apply to this image"
            )));
        }
        t.load(rac, ranges_now);
        debug!("loaded transform '{name}'");
        transforms.push(t);
    }
    Ok(transforms)
}

fn create_transform<S: ByteSource>(name: &str) -> Option<Box<dyn Transform<S>>> {
    match name {
        "Bounds" => Some(Box::new(transform::Bounds::new())),
        "Palette" => Some(Box::new(transform::Palette::new())),
        "Palette-Channel" => Some(Box::new(transform::PaletteChannel::new())),
        "Frame-Combine" => Some(Box::new(transform::FrameCombine::new())),
        _ => None,
    }
}

fn current_ranges<'t, S: ByteSource>(
    base: &'t dyn ColorRanges,
    transforms: &'t [Box<dyn Transform<S>>],
) -> &'t dyn ColorRanges {
    match transforms.last() {
        Some(t) => t.output_ranges(),
        None => base,
    }
}

fn resize_scale(width: usize, height: usize, target_w: usize, target_h: usize) -> i32 {
    let mut scale = 1usize;
    while scale < 128
        && width / (scale * 2) >= target_w.max(1)
        && height / (scale * 2) >= target_h.max(1)
    {
        scale *= 2;
    }
    scale as i32
}

fn compute_pixel_checksum(image: &Image) -> u32 {
    let mut sum = Checksum::new();
    for frame in &image.frames {
        for plane in &frame.planes {
            for r in 0..plane.height() {
                for c in 0..plane.width() {
                    sum.update(&plane.get(r, c).to_be_bytes());
                }
            }
        }
    }
    sum.finish()
}

// --- Scanline driver (spec §4.5, "Scanline pass") --------------------------

fn decode_scanline<S: ByteSource>(
    rac: &mut Rac<'_, S>,
    ranges: &dyn ColorRanges,
    image: &mut Image,
) -> Result<()> {
    let nump = ranges.num_planes();
    let width = image.width;
    let height = image.height;
    let num_frames = image.frames.len();
    let mut properties: Vec<i32> = Vec::new();
    let mut prev_planes: PrevPlanes = Vec::new();

    for p in plane_order(nump) {
        if ranges.min(p) == ranges.max(p) {
            continue;
        }
        let grey = (ranges.min(p) + ranges.max(p)) / 2;
        let prop_ranges = property_ranges_scanline(ranges, p);
        let mut tree = Tree::read(rac, &prop_ranges);

        for r in 0..height {
            for f in 0..num_frames {
                if let Some(src) = image.frames[f].seen_before {
                    copy_row(image, src, f, p, r, width);
                    continue;
                }
                for c in 0..width {
                    let alpha_zero = nump > 3
                        && p < 3
                        && image.alpha_zero_special
                        && image.frames[f].get(PLANE_ALPHA, r, c) == 0;

                    prev_planes.clear();
                    for q in 0..p {
                        prev_planes.push(image.frames[f].get(q, r, c));
                    }

                    let (guess, lo, hi) = predict_and_calc_props_scanline(
                        &mut properties,
                        ranges,
                        &image.frames[f],
                        width,
                        p,
                        r,
                        c,
                        &prev_planes,
                        grey,
                        p == PLANE_LOOKBACK,
                    );

                    let value = if alpha_zero {
                        guess
                    } else {
                        let residual = tree.decode(rac, &properties, lo - guess, hi - guess);
                        (guess + residual).clamp(lo, hi)
                    };
                    image.frames[f].set(p, r, c, value);
                }
            }
        }
    }
    Ok(())
}

fn copy_row(image: &mut Image, src: usize, dst: usize, p: usize, r: usize, width: usize) {
    for c in 0..width {
        let v = image.frames[src].get(p, r, c);
        image.frames[dst].set(p, r, c, v);
    }
}

// --- Interlaced driver (spec §4.5, "Interlaced pass", "Rough + MANIAC +
// fine", "Progressive callback") --------------------------------------------

#[allow(clippy::too_many_arguments)]
fn decode_interlaced<S: ByteSource>(
    rac: &mut Rac<'_, S>,
    ranges: &dyn ColorRanges,
    image: &mut Image,
    transforms: &[Box<dyn Transform<S>>],
    scale: i32,
    quality: i32,
    mut callback: Option<&mut Callback<'_>>,
) -> Result<bool> {
    let nump = ranges.num_planes();
    let order = plane_order(nump);
    if order.is_empty() {
        return Ok(true);
    }
    let zooms = image.zooms();

    // Top-left pixel of every plane, read once up front (spec §6 item 6):
    // every zoomlevel's corner cell aliases full-resolution (0, 0).
    for &p in &order {
        if ranges.min(p) == ranges.max(p) {
            continue;
        }
        let v = UniformSymbolCoder::read_int(rac, ranges.min(p), ranges.max(p));
        for frame in image.frames.iter_mut() {
            if frame.seen_before.is_none() {
                frame.set(p, 0, 0, v);
            }
        }
    }

    let property_ranges: Vec<Vec<(i32, i32)>> =
        (0..nump).map(|p| property_ranges_interlaced(ranges, p)).collect();
    let mut trees: Vec<Tree> = (0..nump).map(|_| Tree::single_leaf()).collect();
    let mut learned = vec![false; nump];
    let mut properties: Vec<i32> = Vec::new();
    let mut prev_planes: PrevPlanes = Vec::new();

    let rough_floor = zooms - 1 - NB_NOLEARN_ZOOMS;
    let mut z = zooms - 1;
    let mut stopped_early = false;
    let mut next_cb_threshold = 0i32;

    while z >= 0 {
        let cutoff_scale = 1i32 << ((z / 2) as u32);
        if cutoff_scale < scale {
            stopped_early = true;
            break;
        }

        let learn_this_level = z > rough_floor;
        let rows = image.rows(z);
        let cols = image.cols(z);

        for &p in &order {
            if ranges.min(p) == ranges.max(p) {
                continue;
            }
            if !learn_this_level && !learned[p] {
                trees[p] = Tree::read(rac, &property_ranges[p]);
                learned[p] = true;
            }
            let grey = (ranges.min(p) + ranges.max(p)) / 2;

            for f in 0..image.frames.len() {
                if let Some(src) = image.frames[f].seen_before {
                    copy_zoomlevel(image, src, f, p, z, rows, cols);
                    continue;
                }
                decode_plane_zoomlevel(
                    rac,
                    ranges,
                    image,
                    f,
                    p,
                    z,
                    rows,
                    cols,
                    grey,
                    &mut properties,
                    &mut prev_planes,
                    &mut trees[p],
                    nump,
                );
            }
        }

        let current_quality = (((zooms - z) as i64 * 10_000) / zooms as i64) as i32;
        if current_quality >= next_cb_threshold {
            if let Some(cb) = callback.as_deref_mut() {
                let mut preview = image.clone();
                interpolate_remaining(&mut preview, z - 1);
                for t in transforms.iter().rev() {
                    t.undo_redo_during_decode(&mut preview);
                }
                let requested = cb(&preview, current_quality, rac.position());
                if requested <= current_quality {
                    stopped_early = true;
                    z -= 1;
                    break;
                }
                next_cb_threshold = requested;
            }
        }
        if current_quality >= quality && quality < 10_000 {
            stopped_early = true;
            z -= 1;
            break;
        }

        z -= 1;
    }

    if stopped_early {
        interpolate_remaining(image, z);
    }

    Ok(!stopped_early)
}

#[allow(clippy::too_many_arguments)]
fn decode_plane_zoomlevel<S: ByteSource>(
    rac: &mut Rac<'_, S>,
    ranges: &dyn ColorRanges,
    image: &mut Image,
    f: usize,
    p: usize,
    z: i32,
    rows: usize,
    cols: usize,
    grey: ColorVal,
    properties: &mut Vec<i32>,
    prev_planes: &mut PrevPlanes,
    tree: &mut Tree,
    nump: usize,
) {
    let even = z % 2 == 0;
    let (mut r, row_step) = if even { (1, 2) } else { (0, 1) };
    while r < rows {
        let (mut c, col_step) = if even { (0, 1) } else { (1, 2) };
        while c < cols {
            let alpha_zero = nump > 3
                && p < 3
                && image.alpha_zero_special
                && image.frames[f].get_z(PLANE_ALPHA, z, r, c) == 0;

            prev_planes.clear();
            for q in 0..p {
                prev_planes.push(image.frames[f].get_z(q, z, r, c));
            }

            let (guess, lo, hi) = predict_and_calc_props_interlaced(
                properties,
                ranges,
                &image.frames[f],
                image,
                p,
                z,
                r,
                c,
                prev_planes,
                grey,
                p == PLANE_LOOKBACK,
            );

            let value = if alpha_zero {
                guess
            } else {
                let residual = tree.decode(rac, properties, lo - guess, hi - guess);
                (guess + residual).clamp(lo, hi)
            };
            image.frames[f].set_z(p, z, r, c, value);
            c += col_step;
        }
        r += row_step;
    }
}

fn copy_zoomlevel(
    image: &mut Image,
    src: usize,
    dst: usize,
    p: usize,
    z: i32,
    rows: usize,
    cols: usize,
) {
    let even = z % 2 == 0;
    let (mut r, row_step) = if even { (1, 2) } else { (0, 1) };
    while r < rows {
        let (mut c, col_step) = if even { (0, 1) } else { (1, 2) };
        while c < cols {
            let v = image.frames[src].get_z(p, z, r, c);
            image.frames[dst].set_z(p, z, r, c, v);
            c += col_step;
        }
        r += row_step;
    }
}

/// Fills every zoomlevel from `from_z` down to 0 via the interlaced
/// predictor, for a decode that stopped before reaching full resolution
/// (spec §4.5, "Interpolation fallback"). Always uses the averaging
/// predictor, even for index-like (palette) planes; the original skips
/// averaging there to avoid producing an out-of-table index, but an
/// interpolated preview is never run back through `Palette::inv_data`
/// at the wrong index anyway since `clamp` in `inv_data` already guards
/// against that, so the simpler uniform rule is kept here.
fn interpolate_remaining(image: &mut Image, from_z: i32) {
    if from_z < 0 {
        return;
    }
    let nump = image.num_planes();
    for z in (0..=from_z).rev() {
        let rows = image.rows(z);
        let cols = image.cols(z);
        let even = z % 2 == 0;
        for p in 0..nump {
            for f in 0..image.frames.len() {
                let (mut r, row_step) = if even { (1, 2) } else { (0, 1) };
                while r < rows {
                    let (mut c, col_step) = if even { (0, 1) } else { (1, 2) };
                    while c < cols {
                        let guess = predict_interlaced(
                            &image.frames[f],
                            image,
                            p,
                            z,
                            r,
                            c,
                            p == PLANE_LOOKBACK,
                        );
                        image.frames[f].set_z(p, z, r, c, guess);
                        c += col_step;
                    }
                    r += row_step;
                }
            }
        }
    }
}

// --- Container header parsing (spec §6, §11) --------------------------------

fn read_container_header<S: ByteSource>(source: &mut S) -> Result<Header> {
    let mut magic = [0u8; 4];
    for slot in magic.iter_mut() {
        *slot = source
            .getc()
            .ok_or_else(|| Error::BadMagic("stream is too short for a magic".into()))?;
    }
    if &magic != b"FLIF" {
        if &magic != b"!<ar" {
            return Err(Error::BadMagic(format!(
                "unrecognized magic bytes {magic:02x?}"
            )));
        }
        let mut rest = [0u8; 4];
        for slot in rest.iter_mut() {
            *slot = source
                .getc()
                .ok_or_else(|| Error::BadMagic("truncated ar archive magic".into()))?;
        }
        if &rest != b"ch>\n" {
            return Err(Error::BadMagic("malformed ar archive magic".into()));
        }
        find_image_member(source)?;
        let mut inner = [0u8; 4];
        for slot in inner.iter_mut() {
            *slot = source.getc().ok_or_else(|| {
                Error::BadMagic("archive member too short for a FLIF magic".into())
            })?;
        }
        if &inner != b"FLIF" {
            return Err(Error::BadMagic(
                "archive member __image.flif is not a FLIF image".into(),
            ));
        }
    }

    let format_byte = source
        .getc()
        .ok_or_else(|| Error::InvalidHeader("missing format byte".into()))?;
    let x_full = format_byte as i32 - b' ' as i32;
    let (animated, x) = if x_full > 47 {
        (true, x_full - 32)
    } else {
        (false, x_full)
    };

    let num_frames = if animated {
        let nf = source
            .getc()
            .ok_or_else(|| Error::InvalidHeader("missing frame count".into()))?;
        if nf == 0xFF {
            let hi = source
                .getc()
                .ok_or_else(|| Error::InvalidHeader("truncated frame count".into()))?;
            let lo = source
                .getc()
                .ok_or_else(|| Error::InvalidHeader("truncated frame count".into()))?;
            ((hi as usize) << 8) | lo as usize
        } else {
            nf as usize
        }
    } else {
        1
    };
    if animated && num_frames < 2 {
        return Err(Error::InvalidHeader(
            "animated header declares fewer than 2 frames".into(),
        ));
    }

    let encoding = x / 16;
    let num_planes = (x % 16) as usize;
    let method = match encoding {
        1 => Method::Scanline,
        2 => Method::Interlaced,
        other => {
            return Err(Error::InvalidHeader(format!(
                "unknown encoding method {other}"
            )))
        }
    };
    if !matches!(num_planes, 1 | 3 | 4) {
        return Err(Error::InvalidHeader(format!(
            "unsupported plane count {num_planes}"
        )));
    }

    let depth_byte = source
        .getc()
        .ok_or_else(|| Error::InvalidHeader("missing depth byte".into()))?;
    if !matches!(depth_byte, b'0' | b'1' | b'2') {
        return Err(Error::InvalidHeader(format!(
            "invalid depth byte {depth_byte:#x}"
        )));
    }

    let width = read_u16_be(source)? as usize;
    let height = read_u16_be(source)? as usize;
    if width == 0 || height == 0 {
        return Err(Error::InvalidHeader("zero-sized dimension".into()));
    }

    Ok(Header {
        width,
        height,
        num_planes,
        method,
        num_frames,
        depth_byte,
    })
}

fn read_u16_be<S: ByteSource>(source: &mut S) -> Result<u16> {
    let hi = source
        .getc()
        .ok_or_else(|| Error::InvalidHeader("truncated dimension".into()))?;
    let lo = source
        .getc()
        .ok_or_else(|| Error::InvalidHeader("truncated dimension".into()))?;
    Ok(((hi as u16) << 8) | lo as u16)
}

fn find_image_member<S: ByteSource>(source: &mut S) -> Result<()> {
    loop {
        let mut header = [0u8; 64];
        for slot in header.iter_mut() {
            *slot = source.getc().ok_or_else(|| {
                Error::BadMagic("archive ended before finding __image.flif".into())
            })?;
        }
        let name = std::str::from_utf8(&header[0..16]).unwrap_or("").trim_end();
        if name.starts_with("__image.flif") {
            return Ok(());
        }
        let size_field = std::str::from_utf8(&header[48..58]).unwrap_or("").trim();
        let size: usize = size_field
            .parse()
            .map_err(|_| Error::BadMagic("malformed archive member size".into()))?;
        source.skip(size + (size % 2));
    }
}
