//! Text rendering of an [`Image`], one character per pixel.
use crate::Image;
use std::fmt;

/// How to draw a preview.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Character for dark pixels.
    pub dark: char,
    /// Character for everything else.
    pub light: char,
    /// A pixel is dark when red, green and blue are all at most this. Alpha is ignored.
    pub threshold: u8,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            dark: '#',
            light: ' ',
            threshold: 10,
        }
    }
}

/// Is this `[b, g, r, ..]` pixel dark?
///
/// # Panics
///
/// If `px` is shorter than 3 bytes.
#[must_use]
pub fn is_dark(px: &[u8], threshold: u8) -> bool {
    px[..3].iter().all(|&c| c <= threshold)
}

/// A [`Display`](fmt::Display)able preview, top row first, each row ending in a newline.
pub struct Preview<'a> {
    img: &'a Image,
    opts: PreviewOptions,
}

impl<'a> Preview<'a> {
    /// Preview `img` with `opts`.
    pub const fn new(img: &'a Image, opts: PreviewOptions) -> Self {
        Self { img, opts }
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.img.channels().depth() as usize;
        for row in self.img.rows() {
            for px in row.chunks_exact(d) {
                let c = if is_dark(px, self.opts.threshold) {
                    self.opts.dark
                } else {
                    self.opts.light
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders `img` to a string.
#[must_use]
pub fn render(img: &Image, opts: &PreviewOptions) -> String {
    Preview::new(img, *opts).to_string()
}
