//! # [BMP](https://en.wikipedia.org/wiki/BMP_file_format) is a image format for bitmap storage.
//!
//! this crate implements [encoding](encode) and [decoding](decode) of uncompressed 24 and 32 bit
//! BMPs, into an [`Image`] that always stores its rows top first, plus [line drawing](draw_line)
//! and a [text preview](preview).
//! ```
//! let mut img = plainbmp::checkerboard(8, 8, 4).unwrap();
//! plainbmp::draw_line(&mut img, 0, 0, 7, 7);
//! let bytes = plainbmp::encode(&img).unwrap();
//! assert_eq!(plainbmp::decode(&bytes).unwrap(), img);
//! ```
#![warn(missing_docs)]
pub mod layout;

mod decode;
mod draw;
mod encode;
mod error;
mod file;
mod image;
mod pattern;
pub mod preview;

pub use decode::{decode, decode_from};
pub use draw::draw_line;
pub use encode::{encode, encode_into, size as encoded_size};
pub use error::{Error, Result};
pub use file::{load, save};
pub use image::Image;
pub use pattern::checkerboard;

pub use Channels::*;
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
/// Pixel layouts. Channels are stored blue first, like the file does.
pub enum Channels {
    /// Blue, green, red
    Bgr = 3,
    /// BGR with alpha
    Bgra,
}

impl Channels {
    /// Bits per pixel ([`depth`](Channels::depth) [*](std::ops::Mul) [`8`](https://en.wikipedia.org/wiki/8)).
    #[must_use]
    pub const fn bpp(self) -> u16 {
        self.depth() as u16 * 8
    }

    /// Bytes per pixel.
    #[must_use]
    pub const fn depth(self) -> u8 {
        self as u8
    }

    /// From a BMP bit count.
    #[must_use]
    pub const fn from_bpp(bpp: u16) -> Option<Self> {
        match bpp {
            24 => Some(Bgr),
            32 => Some(Bgra),
            _ => None,
        }
    }
}

/// Order the rows were (or will be) stored in on disk.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RowOrder {
    /// First stored row is the bottom one (positive height). What most files use.
    #[default]
    BottomUp,
    /// First stored row is the top one (negative height).
    TopDown,
}

#[test]
fn encode_decode() {
    for (channels, order) in [
        (Bgr, RowOrder::BottomUp),
        (Bgr, RowOrder::TopDown),
        (Bgra, RowOrder::BottomUp),
        (Bgra, RowOrder::TopDown),
    ] {
        let mut img = Image::new(7, 5, channels, order).unwrap();
        img.pixels_mut()
            .iter_mut()
            .enumerate()
            .for_each(|(i, x)| *x = (i * 31 % 251) as u8);
        let v = encode(&img).unwrap();
        assert_eq!(v.len() as u32, encoded_size(channels, (7, 5)));
        let back = decode(&v).unwrap();
        assert_eq!(back, img);
        assert_eq!(encode(&back).unwrap(), v);
    }
}
