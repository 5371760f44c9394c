//! Reversible pixel-domain transforms (spec §4.2).
//!
//! The decoder reads a stack of transform names from the header, then
//! feeds each one's `init`/`load` the `ColorRanges` produced by the
//! transform below it, building up the `ColorRanges` the pixel decode
//! loop actually decodes against. Once decode finishes, `inv_data` is
//! applied in reverse stack order to turn decoded-domain pixels back
//! into the image's real color planes.
//!
//! Only the four transforms spec.md names are implemented
//! (`Bounds`, `Palette`, `Palette-Channel`, `Frame-Combine`); any other
//! name the bitstream requests is rejected with `Error::Unsupported`
//! rather than silently ignored, since skipping a transform the encoder
//! actually applied would decode to garbage.

mod bounds;
mod frame_combine;
mod palette;
mod palette_channel;

pub use bounds::Bounds;
pub use frame_combine::FrameCombine;
pub use palette::Palette;
pub use palette_channel::PaletteChannel;

use crate::color_range::ColorRanges;
use crate::image::Image;
use crate::io::ByteSource;
use crate::rac::Rac;

/// The fixed table of transform names this decoder recognizes, in the
/// order their name index is encoded (spec §6, "strictly increasing name
/// index"). The real format reserves a larger table for transforms this
/// decoder does not implement (spec's Non-goals exclude them); those
/// names simply are not in this table and are rejected.
pub const TRANSFORM_NAMES: [&str; 4] = ["Bounds", "Palette", "Palette-Channel", "Frame-Combine"];

pub fn name_index(name: &str) -> Option<usize> {
    TRANSFORM_NAMES.iter().position(|&n| n == name)
}

/// One entry in the decode-time transform stack.
pub trait Transform<S: ByteSource> {
    /// Attempts to set this transform up against the ranges produced by
    /// whatever is below it in the stack. Returns `false` if the
    /// transform does not apply to this image (e.g. `Palette` refusing
    /// an already-indexed image), in which case the caller should not
    /// call `load`.
    fn init(&mut self, ranges: &dyn ColorRanges) -> bool;

    /// Tells a transform how many frames the container header declared,
    /// before `load` runs. Only `Frame-Combine` cares (its lookback bound
    /// is `[1, nb_frames - 1]`); every other transform ignores it.
    fn set_frame_count(&mut self, _nb_frames: usize) {}

    /// Reads this transform's metadata (palette tables, bounds, lookback
    /// limit, ...) from the bitstream.
    fn load(&mut self, rac: &mut Rac<'_, S>, ranges: &dyn ColorRanges);

    /// The `ColorRanges` the pixel decode loop should use once this
    /// transform is on top of the stack.
    fn output_ranges(&self) -> &dyn ColorRanges;

    /// Reconstructs this transform's original pixel domain from the
    /// fully-decoded image below it.
    fn inv_data(&self, image: &mut Image);

    /// Partial reconstruction for a progressive-decode callback that
    /// fires before the full pass has completed (spec §4.5). Transforms
    /// whose inverse is well-defined on partially-decoded data (i.e. all
    /// of them here, since they operate pixel-by-pixel) can just reuse
    /// `inv_data`.
    fn undo_redo_during_decode(&self, image: &mut Image) {
        self.inv_data(image);
    }
}
