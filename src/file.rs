use crate::{decode, encode_into, Error, Image, Result};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads and decodes the BMP at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(Error::Io)?;
    debug!("read {} bytes from {}", data.len(), path.display());
    let img = decode(&data)?;
    debug!(
        "{}: {}x{}, {} bit, {:?}",
        path.display(),
        img.width(),
        img.height(),
        img.channels().bpp(),
        img.row_order()
    );
    Ok(img)
}

/// Encodes `img` to `path`, replacing whatever is there.
pub fn save(img: &Image, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path).map_err(Error::Io)?);
    encode_into(img, &mut out)?;
    out.flush().map_err(Error::Io)?;
    debug!("wrote {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(())
}
