use crate::layout::{canonical_row, row_stride, FileHeader, InfoHeader, BI_RGB, MAGIC};
use crate::{Channels, Error, Image, Result, RowOrder};
use raad::le::*;
use std::io::Read;

/// returns: pixel data offset
fn sig(data: &[u8]) -> Result<u32> {
    let hdr = FileHeader::read(data)?;
    if hdr.magic != MAGIC {
        return Err(Error::NotABmp);
    }
    Ok(hdr.data_offset)
}

/// Reads the DIB header, checking its size before anything else in it.
fn info(data: &[u8]) -> Result<InfoHeader> {
    let dib = data.get(FileHeader::SIZE..).unwrap_or_default();
    let size = (&mut &*dib).r::<u32>()?;
    if size < InfoHeader::SIZE as u32 {
        return Err(Error::UnsupportedHeader(size));
    }
    // newer headers (V4, V5, ..) only append fields; the first 40 bytes are the same
    let dib = dib.get(..size as usize).ok_or(Error::Truncated)?;
    Ok(InfoHeader::read(dib)?)
}

/// Decodes a [BMP](https://en.wikipedia.org/wiki/BMP_file_format).
///
/// Only uncompressed (`BI_RGB`) 24 and 32 bit images are understood. The returned [`Image`]
/// holds its rows top first whatever the file's row order was, and remembers that order.
pub fn decode(data: &[u8]) -> Result<Image> {
    let offset = sig(data)?;
    let hdr = info(data)?;

    if hdr.compression != BI_RGB {
        return Err(Error::UnsupportedCompression(hdr.compression));
    }
    let channels =
        Channels::from_bpp(hdr.bit_count).ok_or(Error::UnsupportedBitDepth(hdr.bit_count))?;
    if hdr.planes != 1 {
        return Err(Error::UnsupportedPlanes(hdr.planes));
    }

    let order = if hdr.height < 0 {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };
    let (w, h) = (i64::from(hdr.width), i64::from(hdr.height).abs());
    if w <= 0 || h <= 0 {
        return Err(Error::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    let (w, h) = (w as usize, h as usize);

    let stride = row_stride(w, channels).ok_or(Error::Truncated)?;
    let data = data.get(offset as usize..).ok_or(Error::Truncated)?;
    let data = stride
        .checked_mul(h)
        .and_then(|n| data.get(..n))
        .ok_or(Error::Truncated)?;

    let len = w * channels.depth() as usize;
    let mut out = vec![0; len * h];
    data.chunks_exact(stride)
        .enumerate()
        .for_each(|(row, px)| {
            let at = canonical_row(row, h, order) * len;
            out[at..at + len].copy_from_slice(&px[..len]);
        });

    Image::from_raw(w as u32, h as u32, channels, order, out)
}

/// Decodes a [BMP](https://en.wikipedia.org/wiki/BMP_file_format) from a reader.
/// The reader is consumed to its end first.
pub fn decode_from(r: &mut impl Read) -> Result<Image> {
    let mut data = vec![];
    r.read_to_end(&mut data).map_err(Error::Io)?;
    decode(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PIXEL_OFFSET;
    use raad::le::W;

    /// Hand built file with an arbitrary info header and rows already in file order.
    fn file(hdr: InfoHeader, extra_dib: usize, rows: &[&[u8]]) -> Vec<u8> {
        let dib = InfoHeader::SIZE + extra_dib;
        let mut out = vec![];
        out.w(FileHeader {
            magic: MAGIC,
            data_offset: (FileHeader::SIZE + dib) as u32,
            ..Default::default()
        }
        .write()
        .unwrap())
        .unwrap();
        out.w(InfoHeader {
            size: dib as u32,
            ..hdr
        }
        .write()
        .unwrap())
        .unwrap();
        out.resize(FileHeader::SIZE + dib, 0);
        rows.iter().for_each(|x| out.extend_from_slice(x));
        out
    }

    fn hdr(width: i32, height: i32, bit_count: u16) -> InfoHeader {
        InfoHeader {
            width,
            height,
            planes: 1,
            bit_count,
            ..Default::default()
        }
    }

    #[test]
    fn bottom_up_rows_are_flipped() {
        let f = file(
            hdr(1, 2, 24),
            0,
            &[&[1, 2, 3, 0], &[4, 5, 6, 0]],
        );
        let img = decode(&f).unwrap();
        assert_eq!(img.row_order(), RowOrder::BottomUp);
        assert_eq!(img.pixels(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn top_down_rows_are_kept() {
        let f = file(
            hdr(1, -2, 24),
            0,
            &[&[1, 2, 3, 0], &[4, 5, 6, 0]],
        );
        let img = decode(&f).unwrap();
        assert_eq!(img.row_order(), RowOrder::TopDown);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn alpha_is_kept() {
        let f = file(hdr(2, 1, 32), 0, &[&[1, 2, 3, 4, 5, 6, 7, 8]]);
        let img = decode(&f).unwrap();
        assert_eq!(img.channels(), Channels::Bgra);
        assert_eq!(img.pixel(1, 0), Some(&[5, 6, 7, 8][..]));
    }

    #[test]
    fn larger_dib_headers() {
        // BITMAPV4HEADER and BITMAPV5HEADER sizes
        for extra in [108 - 40, 124 - 40] {
            let f = file(hdr(1, 1, 24), extra, &[&[9, 8, 7, 0]]);
            assert_eq!(decode(&f).unwrap().pixels(), &[9, 8, 7]);
        }
    }

    #[test]
    fn offset_is_absolute() {
        let mut f = file(hdr(1, 1, 24), 0, &[]);
        f.extend_from_slice(&[0xaa; 6]);
        f.extend_from_slice(&[1, 2, 3, 0]);
        let mut at = &mut f[10..14];
        at.w(PIXEL_OFFSET + 6).unwrap();
        assert_eq!(decode(&f).unwrap().pixels(), &[1, 2, 3]);
    }

    #[test]
    fn rejections() {
        assert!(matches!(decode(b"BM"), Err(Error::Truncated)));
        assert!(matches!(decode(&[0; 13]), Err(Error::Truncated)));

        let ok = file(hdr(1, 1, 24), 0, &[&[0; 4]]);
        assert!(decode(&ok).is_ok());

        let mut f = ok.clone();
        f[0] = b'P';
        assert!(matches!(decode(&f), Err(Error::NotABmp)));

        // 14 byte file header and nothing else
        assert!(matches!(decode(&ok[..14]), Err(Error::Truncated)));
        // dib size says 40 but only 20 bytes follow
        assert!(matches!(decode(&ok[..34]), Err(Error::Truncated)));

        let f = file(hdr(1, 1, 24), 0, &[&[0; 4]]);
        let mut g = f.clone();
        g[14] = 12; // BITMAPCOREHEADER
        assert!(matches!(decode(&g), Err(Error::UnsupportedHeader(12))));

        let f = file(InfoHeader { compression: 1, ..hdr(1, 1, 24) }, 0, &[&[0; 4]]);
        assert!(matches!(decode(&f), Err(Error::UnsupportedCompression(1))));

        let f = file(hdr(1, 1, 8), 0, &[&[0; 4]]);
        assert!(matches!(decode(&f), Err(Error::UnsupportedBitDepth(8))));

        let f = file(InfoHeader { planes: 2, ..hdr(1, 1, 24) }, 0, &[&[0; 4]]);
        assert!(matches!(decode(&f), Err(Error::UnsupportedPlanes(2))));

        for (w, h) in [(0, 1), (-1, 1), (1, 0)] {
            let f = file(hdr(w, h, 24), 0, &[&[0; 4]]);
            assert!(matches!(decode(&f), Err(Error::InvalidDimensions { .. })), "{w}x{h}");
        }

        // one row short
        let f = file(hdr(1, 2, 24), 0, &[&[0; 4], &[0; 3]]);
        assert!(matches!(decode(&f), Err(Error::Truncated)));

        // offset past the end
        let mut f = file(hdr(1, 1, 24), 0, &[&[0; 4]]);
        f[10] = 0xff;
        assert!(matches!(decode(&f), Err(Error::Truncated)));

        // huge claimed size must fail before allocating
        let f = file(hdr(i32::MAX, i32::MIN, 32), 0, &[&[0; 4]]);
        assert!(matches!(decode(&f), Err(Error::Truncated)));
    }

    #[test]
    fn validation_order() {
        // compression is checked before bit depth, which is checked before planes
        let f = file(
            InfoHeader {
                compression: 2,
                planes: 3,
                ..hdr(1, 1, 4)
            },
            0,
            &[],
        );
        assert!(matches!(decode(&f), Err(Error::UnsupportedCompression(2))));
        let f = file(InfoHeader { planes: 3, ..hdr(0, 1, 4) }, 0, &[]);
        assert!(matches!(decode(&f), Err(Error::UnsupportedBitDepth(4))));
    }

    #[test]
    fn from_reader() {
        let f = file(hdr(1, 1, 24), 0, &[&[1, 2, 3, 0]]);
        let img = decode_from(&mut &f[..]).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3]);
    }
}
