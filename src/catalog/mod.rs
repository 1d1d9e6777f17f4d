//! Raster source for the populator: every usable image under a directory,
//! grouped by aspect-ratio bucket. Only headers are read while scanning;
//! pixels are decoded on demand by [`load_raster`].

pub mod aspect;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use compact_str::CompactString;
use image::{ImageReader, RgbImage};
use jwalk::WalkDir;
use rand::Rng;
use rayon::prelude::*;

use crate::layout::Size;
pub use aspect::AspectBucket;

/// File extensions accepted by the scanner, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An image file known to decode to `width × height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// File name, for logs
    pub name: CompactString,
    pub width: u32,
    pub height: u32,
}

impl ImageEntry {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Images grouped by [`AspectBucket`]. Cloning is cheap enough to hand
/// each generated collage its own copy to draw from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: HashMap<AspectBucket, Vec<ImageEntry>>,
    unclassified: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively scan `dir` for supported images and classify them.
    pub fn scan(dir: &Path) -> Result<Self> {
        let started = std::time::Instant::now();
        let paths = list_images(dir)?;

        let entries: Vec<ImageEntry> = paths
            .par_iter()
            .filter_map(|path| match read_entry(path) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping {}: {:#}", path.display(), e);
                    None
                }
            })
            .collect();

        let catalog = Self::from_entries(entries);
        tracing::info!(
            "Catalog: {} usable images ({} unclassified) from {} files in {:?}",
            catalog.len(),
            catalog.unclassified(),
            paths.len(),
            started.elapsed()
        );
        for bucket in AspectBucket::ALL {
            tracing::debug!("  {:<10} {}", bucket.name(), catalog.count(bucket));
        }
        Ok(catalog)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ImageEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// File `entry` under its bucket. Returns the bucket, or `None` when the
    /// aspect ratio is out of every range and the entry is dropped.
    pub fn insert(&mut self, entry: ImageEntry) -> Option<AspectBucket> {
        match AspectBucket::classify(entry.size()) {
            Some(bucket) => {
                self.buckets.entry(bucket).or_default().push(entry);
                Some(bucket)
            }
            None => {
                tracing::debug!("Unclassified aspect ratio: {} ({}x{})", entry.name, entry.width, entry.height);
                self.unclassified += 1;
                None
            }
        }
    }

    /// Number of classified images still available.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, bucket: AspectBucket) -> usize {
        self.buckets.get(&bucket).map_or(0, Vec::len)
    }

    /// Images seen but rejected for an extreme aspect ratio.
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    /// Remove and return a uniformly chosen entry from `bucket`.
    pub fn take_random<R: Rng + ?Sized>(&mut self, bucket: AspectBucket, rng: &mut R) -> Option<ImageEntry> {
        let entries = self.buckets.get_mut(&bucket)?;
        if entries.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..entries.len());
        Some(entries.swap_remove(index))
    }
}

/// Every supported image file under `dir`, in sorted walk order.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Walk error under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if has_supported_extension(&path) {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

fn read_entry(path: &Path) -> Result<ImageEntry> {
    let (width, height) = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()?
        .into_dimensions()
        .with_context(|| format!("Failed to read image header of {}", path.display()))?;
    if width == 0 || height == 0 {
        bail!("{} has an empty {}x{} raster", path.display(), width, height);
    }

    let name = path
        .file_name()
        .map(|n| CompactString::from(n.to_string_lossy().as_ref()))
        .unwrap_or_default();
    Ok(ImageEntry {
        path: path.to_path_buf(),
        name,
        width,
        height,
    })
}

/// Decode `path` into an 8-bit RGB buffer.
pub fn load_raster(path: &Path) -> Result<RgbImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image.to_rgb8())
}
