use crate::{Bgr, Error, Image, Result, RowOrder};

/// A black and white 24 bit checkerboard of `cell` sized squares, stored bottom-up.
///
/// Squares are counted from the bottom left corner (the first pixel in the file), which is
/// black. A `cell` of 0 is reported as [`Error::InvalidDimensions`] of `0x0`.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Result<Image> {
    if cell == 0 {
        return Err(Error::InvalidDimensions {
            width: cell.into(),
            height: cell.into(),
        });
    }
    let mut img = Image::new(width, height, Bgr, RowOrder::BottomUp)?;
    let len = img.row_len();
    img.pixels_mut()
        .chunks_exact_mut(len)
        .enumerate()
        .for_each(|(y, row)| {
            let up = (height - 1 - y as u32) / cell;
            row.chunks_exact_mut(3).enumerate().for_each(|(x, px)| {
                let black = (x as u32 / cell + up) % 2 == 0;
                px.fill(if black { 0 } else { 255 });
            });
        });
    Ok(img)
}
