//! PNG output for the raster surface.

use metaballs_sim::Raster;
use std::path::Path;

use crate::error::CliError;

/// Writes a raster as a PNG image.
///
/// Returns `CliError::Io` if the dimensions overflow `u32` or the file
/// cannot be written.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), CliError> {
    let w = u32::try_from(raster.width())
        .map_err(|_| CliError::Io("raster width overflows u32".into()))?;
    let h = u32::try_from(raster.height())
        .map_err(|_| CliError::Io("raster height overflows u32".into()))?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| CliError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| CliError::Io(e.to_string()))
}
