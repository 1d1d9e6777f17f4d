use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use rand::Rng;

/// Write `canvas` to `path`, creating parent directories as needed. The
/// encoder is picked from the extension.
pub fn save_canvas(canvas: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    canvas
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Saved {}x{} collage to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}

/// `collage_<n>.jpg` with a random suffix in 10000..=999999.
pub fn collage_file_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("collage_{}.jpg", rng.gen_range(10_000..=999_999))
}
