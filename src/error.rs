use thiserror::Error;

/// Decoding errors.
///
/// Every variant corresponds to one of the failure classes in the FLIF
/// bitstream error handling design: a bad container, an out-of-range
/// header field, a feature this build does not support, a malformed
/// transform stack, or a resource failure while reading a MANIAC tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte stream does not start with the `FLIF` magic, and is not a
    /// recognised `ar` archive wrapper containing one.
    #[error("not a FLIF file: {0}")]
    BadMagic(String),
    /// A header field (format byte, bit depth, dimensions, frame count)
    /// carries a value outside its legal range.
    #[error("invalid FLIF header: {0}")]
    InvalidHeader(String),
    /// The bitstream requests a feature this decoder does not implement.
    #[error("unsupported FLIF feature: {0}")]
    Unsupported(String),
    /// A transform name could not be resolved, or its `init`/`load`
    /// failed, or the transform stack violated the strictly-increasing
    /// ordering rule.
    #[error("transform error: {0}")]
    Transform(String),
    /// A MANIAC context tree could not be allocated or decoded.
    #[error("MANIAC tree error: {0}")]
    Tree(String),
    /// The pixel pass hit end-of-stream before completing and this build
    /// is not tolerant of broken files.
    #[error("unexpected end of stream while decoding pixel data")]
    UnexpectedEof,
}

/// A specialised `Result` type for decoding operations.
pub type Result<T> = ::std::result::Result<T, Error>;
