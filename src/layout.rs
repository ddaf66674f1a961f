//! Binary layout of the BMP header blocks.
//!
//! Both blocks are described once, as ordered `(field, type, offset)` lists,
//! and the same description drives [`read`](FileHeader::read) in the decoder
//! and [`write`](FileHeader::write) in the encoder.
use crate::{Channels, RowOrder};
use raad::le::*;
use std::io;

/// `"BM"`
pub const MAGIC: [u8; 2] = *b"BM";
/// `BI_RGB`, the only compression method understood.
pub const BI_RGB: u32 = 0;
/// Offset of the pixel data in files we write (no palette, 40 byte DIB header).
pub const PIXEL_OFFSET: u32 = (FileHeader::SIZE + InfoHeader::SIZE) as u32;

macro_rules! header {
    (
        $(#[$doc:meta])*
        $name:ident[$size:literal] {
            $($(#[$fdoc:meta])* $field:ident: $t:ty = $off:literal),+ $(,)?
        }
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            $($(#[$fdoc])* pub $field: $t,)+
        }

        impl $name {
            /// Size of the block in bytes.
            pub const SIZE: usize = $size;
            /// `(name, offset, width)` of every field, in file order.
            pub const FIELDS: &'static [(&'static str, usize, usize)] =
                &[$((stringify!($field), $off, std::mem::size_of::<$t>())),+];

            /// Reads the block from the front of `block`; anything past
            /// [`SIZE`](Self::SIZE) is left alone.
            pub fn read(block: &[u8]) -> io::Result<Self> {
                if block.len() < Self::SIZE {
                    return Err(io::ErrorKind::UnexpectedEof.into());
                }
                Ok(Self {
                    $($field: {
                        let mut at = &block[$off..];
                        at.r::<$t>()?
                    },)+
                })
            }

            /// Serializes the block. Bytes not covered by a field stay zero.
            pub fn write(&self) -> io::Result<[u8; $size]> {
                let mut out = [0; $size];
                $({
                    let mut at = &mut out[$off..];
                    at.w(self.$field)?;
                })+
                Ok(out)
            }
        }

        const _: () = {
            $(assert!($off + std::mem::size_of::<$t>() <= $size, "field out of bounds");)+
        };
    };
}

header! {
    /// `BITMAPFILEHEADER`
    FileHeader[14] {
        /// always [`MAGIC`]
        magic: [u8; 2] = 0,
        /// total file size. not trusted when reading.
        file_size: u32 = 2,
        /// two reserved `u16`s, written as zero
        reserved: u32 = 6,
        /// absolute offset of the first pixel row
        data_offset: u32 = 10,
    }
}

header! {
    /// `BITMAPINFOHEADER`, which is also the prefix of every later DIB header.
    InfoHeader[40] {
        /// size of the whole DIB header, this block included
        size: u32 = 0,
        /// width in pixels
        width: i32 = 4,
        /// height in pixels; negative for top-down files
        height: i32 = 8,
        /// color planes, always 1
        planes: u16 = 12,
        /// bits per pixel
        bit_count: u16 = 14,
        /// [`BI_RGB`] or one of the compressed methods
        compression: u32 = 16,
        /// padded pixel data size; may be 0 for `BI_RGB`
        image_size: u32 = 20,
        /// horizontal resolution
        x_pixels_per_metre: i32 = 24,
        /// vertical resolution
        y_pixels_per_metre: i32 = 28,
        /// palette entries
        colors_used: u32 = 32,
        /// "important" palette entries
        colors_important: u32 = 36,
    }
}

/// Bytes per file row, padding to the next 4 byte boundary included.
/// [`None`] on overflow.
pub fn row_stride(width: usize, channels: Channels) -> Option<usize> {
    width
        .checked_mul(channels.depth() as usize)?
        .checked_add(3)
        .map(|n| n / 4 * 4)
}

/// Maps a row index between file order and canonical (top first) order.
///
/// The mapping is its own inverse, so the decoder (file → canonical) and the
/// encoder (canonical → file) both go through here.
pub const fn canonical_row(row: usize, height: usize, order: RowOrder) -> usize {
    match order {
        RowOrder::TopDown => row,
        RowOrder::BottomUp => height - 1 - row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_tables_are_contiguous() {
        for fields in [FileHeader::FIELDS, InfoHeader::FIELDS] {
            let mut at = 0;
            for &(name, off, width) in fields {
                assert_eq!(off, at, "{name}");
                at += width;
            }
        }
        assert_eq!(
            FileHeader::FIELDS.iter().map(|x| x.2).sum::<usize>(),
            FileHeader::SIZE
        );
        assert_eq!(
            InfoHeader::FIELDS.iter().map(|x| x.2).sum::<usize>(),
            InfoHeader::SIZE
        );
        assert_eq!(PIXEL_OFFSET, 54);
    }

    #[test]
    fn info_header_bytes() {
        let hdr = InfoHeader {
            size: 40,
            width: 5,
            height: -3,
            planes: 1,
            bit_count: 24,
            image_size: 48,
            ..Default::default()
        };
        let bytes = hdr.write().unwrap();
        assert_eq!(&bytes[..4], &[40, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[5, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0xfd, 0xff, 0xff, 0xff]);
        assert_eq!(&bytes[12..16], &[1, 0, 24, 0]);
        assert_eq!(&bytes[20..24], &[48, 0, 0, 0]);
        assert!(bytes[24..].iter().all(|&b| b == 0));
        assert_eq!(InfoHeader::read(&bytes).unwrap(), hdr);
    }

    #[test]
    fn short_block() {
        let err = FileHeader::read(b"BM\0\0").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn stride() {
        assert_eq!(row_stride(4, Channels::Bgr), Some(12));
        assert_eq!(row_stride(5, Channels::Bgr), Some(16));
        assert_eq!(row_stride(1, Channels::Bgr), Some(4));
        assert_eq!(row_stride(3, Channels::Bgra), Some(12));
        assert_eq!(row_stride(usize::MAX, Channels::Bgr), None);
    }

    #[test]
    fn row_flip_is_an_involution() {
        for order in [RowOrder::TopDown, RowOrder::BottomUp] {
            for row in 0..7 {
                assert_eq!(canonical_row(canonical_row(row, 7, order), 7, order), row);
            }
        }
        assert_eq!(canonical_row(0, 7, RowOrder::BottomUp), 6);
        assert_eq!(canonical_row(0, 7, RowOrder::TopDown), 0);
    }
}
