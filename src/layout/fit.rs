//! Aspect-preserving resize arithmetic shared by every item kind.

use super::Size;

/// Which dimension drives a fit into a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    /// Resize to this width; height follows the aspect ratio.
    Width(u32),
    /// Resize to this height; width follows the aspect ratio.
    Height(u32),
}

/// Pick the resize that makes `current` as large as possible inside `max`
/// without changing its aspect ratio. Ties go to the width-driven resize.
pub fn fit_axis(current: Size, max: Size) -> FitAxis {
    if current.is_empty() {
        return FitAxis::Width(max.width);
    }
    let height_by_width = max.width as f64 / current.aspect_ratio();
    if height_by_width > max.height as f64 {
        // Driving by width would overflow the height limit.
        FitAxis::Height(max.height)
    } else {
        FitAxis::Width(max.width)
    }
}

/// Height that keeps the aspect ratio of `current` at the new `width`, floored.
pub fn scale_height(current: Size, width: u32) -> u32 {
    if current.width == 0 {
        return current.height;
    }
    let ratio = width as f64 / current.width as f64;
    (current.height as f64 * ratio).floor() as u32
}

/// Width that keeps the aspect ratio of `current` at the new `height`, floored.
pub fn scale_width(current: Size, height: u32) -> u32 {
    if current.height == 0 {
        return current.width;
    }
    let ratio = height as f64 / current.height as f64;
    (current.width as f64 * ratio).floor() as u32
}

/// Final size of `current` after an aspect-preserving fit into `max`.
pub fn fitted_size(current: Size, max: Size) -> Size {
    match fit_axis(current, max) {
        FitAxis::Width(width) => Size::new(width, scale_height(current, width)),
        FitAxis::Height(height) => Size::new(scale_width(current, height), height),
    }
}
