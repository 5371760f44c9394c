//! A decoder for the FLIF (Free Lossless Image Format) bitstream.
//!
//! Entry point: [`decoder::Decoder`]. Feed it anything implementing
//! [`io::ByteSource`] and call `decode()` for a fully reconstructed
//! [`image::Image`], or `Decoder::identify` for just the container header.

pub mod chance;
pub mod color_range;
pub mod constants;
pub mod crc32;
pub mod decoder;
pub mod error;
pub mod image;
pub mod io;
pub mod maniac;
pub mod output;
pub mod pred;
pub mod rac;
pub mod symbol;
pub mod transform;

pub use decoder::{Decoder, Header, Method};
pub use error::{Error, Result};
pub use image::Image;
