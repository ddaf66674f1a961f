use std::io;
use thiserror::Error;

/// Decoding and encoding errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer bytes than a header, the DIB header or the pixel rows need
    #[error("unexpected end of data")]
    Truncated,

    /// `BM` signature wrong (not `BM`)
    #[error("not a BMP")]
    NotABmp,

    /// DIB header smaller than `BITMAPINFOHEADER`
    #[error("DIB header size ({0}) is smaller than 40")]
    UnsupportedHeader(u32),

    /// Anything but `BI_RGB`
    #[error("compression method {0} not supported")]
    UnsupportedCompression(u32),

    /// Bit count other than 24 or 32
    #[error("only 24 and 32 bit BMPs are supported, found {0}")]
    UnsupportedBitDepth(u16),

    /// Plane count other than 1
    #[error("{0} planes, expected 1")]
    UnsupportedPlanes(u16),

    /// Width or height not positive (or not representable in the file)
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// width as found
        width: i64,
        /// height as found, sign resolved
        height: i64,
    },

    /// Pixel buffer does not match the geometry it claims
    #[error("image is structurally invalid")]
    InvalidImage,

    /// Reading or writing the underlying stream failed
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(value),
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
