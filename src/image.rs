use crate::{Channels, Error, Result, RowOrder};

/// A decoded bitmap.
///
/// Pixels live in one flat buffer, top row first, with no row padding and
/// channels in B, G, R, [A] order. The geometry and row order never change once
/// built, so `pixels().len() == width * height * depth` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    order: RowOrder,
    pixels: Vec<u8>,
}

/// `width * height * depth`, rejecting anything a BMP header can't describe.
fn buffer_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
    let bad = || Error::InvalidDimensions {
        width: width.into(),
        height: height.into(),
    };
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(bad());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels.depth() as usize))
        .ok_or_else(bad)
}

impl Image {
    /// A black (and for [`Bgra`](Channels::Bgra), fully transparent) image.
    pub fn new(width: u32, height: u32, channels: Channels, order: RowOrder) -> Result<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            order,
            pixels: vec![0; len],
        })
    }

    /// Adopts a canonical (top row first, unpadded) buffer.
    ///
    /// Fails with [`Error::InvalidImage`] if `pixels` is the wrong length.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        order: RowOrder,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if buffer_len(width, height, channels)? != pixels.len() {
            return Err(Error::InvalidImage);
        }
        Ok(Self {
            width,
            height,
            channels,
            order,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel layout.
    #[must_use]
    pub const fn channels(&self) -> Channels {
        self.channels
    }

    /// Row order used when this image is encoded.
    #[must_use]
    pub const fn row_order(&self) -> RowOrder {
        self.order
    }

    /// The canonical buffer.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The canonical buffer, mutably. Its length is fixed.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes in one unpadded row.
    #[must_use]
    pub const fn row_len(&self) -> usize {
        self.width as usize * self.channels.depth() as usize
    }

    /// Row `y`, top first.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let n = self.row_len();
        Some(&self.pixels[y as usize * n..][..n])
    }

    /// Iterator over rows, top first.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.row_len())
    }

    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| {
            (y as usize * self.width as usize + x as usize) * self.channels.depth() as usize
        })
    }

    /// Channel bytes (`[b, g, r]` or `[b, g, r, a]`) of the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let i = self.idx(x, y)?;
        Some(&self.pixels[i..i + self.channels.depth() as usize])
    }

    /// Mutable channel bytes of the pixel at `(x, y)`.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let i = self.idx(x, y)?;
        let d = self.channels.depth() as usize;
        Some(&mut self.pixels[i..i + d])
    }
}
