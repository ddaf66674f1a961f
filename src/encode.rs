use std::io::Write;

use crate::layout::{
    canonical_row, row_stride, FileHeader, InfoHeader, BI_RGB, MAGIC, PIXEL_OFFSET,
};
use crate::{Channels, Error, Image, Result, RowOrder};
use raad::le::*;

/// Size of encoded bmp. Saturates at [`u32::MAX`] for images too large to encode.
pub fn size(channels: Channels, (width, height): (u32, u32)) -> u32 {
    PIXEL_OFFSET.saturating_add(dat_size(channels, (width, height)))
}

fn dat_size(channels: Channels, (width, height): (u32, u32)) -> u32 {
    row_stride(width as usize, channels)
        .and_then(|x| x.checked_mul(height as usize))
        .and_then(|x| u32::try_from(x).ok())
        .unwrap_or(u32::MAX)
}

/// Headers for `img`, checking that every size fits its field.
fn hdrs(img: &Image) -> Result<(FileHeader, InfoHeader)> {
    let (w, h) = img.dimensions();
    let len = (w as usize)
        .checked_mul(h as usize)
        .and_then(|x| x.checked_mul(img.channels().depth() as usize));
    if w == 0 || h == 0 || len != Some(img.pixels().len()) {
        return Err(Error::InvalidImage);
    }
    let width = i32::try_from(w).map_err(|_| Error::InvalidImage)?;
    let height = i32::try_from(h).map_err(|_| Error::InvalidImage)?;
    let image_size = row_stride(w as usize, img.channels())
        .and_then(|x| x.checked_mul(h as usize))
        .and_then(|x| u32::try_from(x).ok())
        .ok_or(Error::InvalidImage)?;
    let file_size = image_size
        .checked_add(PIXEL_OFFSET)
        .ok_or(Error::InvalidImage)?;

    Ok((
        FileHeader {
            magic: MAGIC,
            file_size,
            // "reserved"
            reserved: 0,
            data_offset: PIXEL_OFFSET,
        },
        InfoHeader {
            size: InfoHeader::SIZE as u32,
            width,
            height: match img.row_order() {
                RowOrder::TopDown => -height,
                RowOrder::BottomUp => height,
            },
            planes: 1,
            bit_count: img.channels().bpp(),
            compression: BI_RGB,
            image_size,
            // "pixels per metre", color count, important colors
            ..Default::default()
        },
    ))
}

/// Encode a [BMP](https://en.wikipedia.org/wiki/BMP_file_format) into `to`,
/// one row at a time.
///
/// Always writes a 40 byte `BITMAPINFOHEADER`, uncompressed, in the image's
/// [`row_order`](Image::row_order).
pub fn encode_into(img: &Image, to: &mut impl Write) -> Result<()> {
    let (file, info) = hdrs(img)?;
    to.w(file.write()?).map_err(Error::Io)?;
    to.w(info.write()?).map_err(Error::Io)?;

    let h = img.height() as usize;
    let len = img.row_len();
    let pad = &[0u8; 4][..(4 - len % 4) % 4];
    (0..h)
        .map(|row| canonical_row(row, h, img.row_order()))
        .try_for_each(|row| {
            to.w(&img.pixels()[row * len..][..len])?;
            to.w(pad)
        })
        .map_err(Error::Io)
}

/// Encode a [BMP](https://en.wikipedia.org/wiki/BMP_file_format).
pub fn encode(img: &Image) -> Result<Vec<u8>> {
    let (file, _) = hdrs(img)?;
    let mut out = Vec::with_capacity(file.file_size as usize);
    encode_into(img, &mut out)?;
    Ok(out)
}
