//! Packed-RGBA8 row read-out (spec §6, "Row read-out"; §11 "Row readout
//! bit-depth normalization constants").
//!
//! The decode drivers never leave pixel planes in 8-bit range themselves
//! (a 16-bit image decodes to values up to 65535); this is the one place
//! that narrows a plane's bit depth down for display. The shift pair is
//! derived the same way `flif-interface_common.cpp`'s `read_row_RGBA8`
//! derives it: walk `rshift` up from the channel's declared maximum until
//! it fits in 8 bits, then walk `lshift` up until multiplying by
//! `(1<<lshift)-1` would fill the full 0..=255 range. A depth below 8
//! bits (`max < 255`) is the case `lshift` actually does work for; 8 and
//! 16-bit channels always settle on `lshift == 1`, a no-op multiply.
use crate::color_range::ColorVal;
use crate::image::Image;

fn normalization_shifts(mut max: ColorVal) -> (u32, u32) {
    let mut rshift = 0u32;
    while max > 255 {
        rshift += 1;
        max >>= 1;
    }
    let mut lshift = 1u32;
    while max * ((1 << lshift) - 1) < 255 {
        lshift += 1;
    }
    (rshift, lshift)
}

fn normalize(value: ColorVal, rshift: u32, lshift: u32) -> u8 {
    (((value >> rshift) * ((1 << lshift) - 1)) & 0xFF) as u8
}

impl Image {
    /// Packs row `r` of frame `f` as interleaved RGBA8, grayscale images
    /// broadcast to R=G=B and alpha padded to `0xFF` when the image has no
    /// alpha plane. `max` is plane 0's declared maximum value (what the
    /// original calls `image.max(0)`), used to derive the normalization
    /// shift pair for every channel.
    pub fn row_rgba8(&self, f: usize, r: usize, max: ColorVal) -> Vec<u8> {
        let frame = &self.frames[f];
        let nump = frame.planes.len();
        let width = self.width;
        let (rshift, lshift) = normalization_shifts(max);
        let mut out = Vec::with_capacity(width * 4);
        for c in 0..width {
            let (red, green, blue) = if nump >= 3 {
                (frame.get(0, r, c), frame.get(1, r, c), frame.get(2, r, c))
            } else {
                let y = frame.get(0, r, c);
                (y, y, y)
            };
            out.push(normalize(red, rshift, lshift));
            out.push(normalize(green, rshift, lshift));
            out.push(normalize(blue, rshift, lshift));
            if nump > 3 {
                out.push(normalize(frame.get(3, r, c), rshift, lshift));
            } else {
                out.push(0xFF);
            }
        }
        out
    }
}
