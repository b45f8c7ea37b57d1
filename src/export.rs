use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use log::info;

use crate::error::{ExportError, ExportResult};
use crate::surface::RasterSurface;

/// File name the Save button writes to unless configured otherwise
pub const DEFAULT_EXPORT_NAME: &str = "my_drawing.png";

/// Encode the committed pixels as PNG.
///
/// Only the committed surface is accepted here; preview pixels never reach
/// an export.
pub fn encode_png(committed: &RasterSurface) -> ExportResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    committed.image().write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Encode and write the committed pixels to `path`
pub fn save_png(committed: &RasterSurface, path: &Path) -> ExportResult<()> {
    let bytes = encode_png(committed)?;
    std::fs::write(path, &bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Exported {}x{} drawing to {} ({} bytes)",
        committed.width(),
        committed.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}
