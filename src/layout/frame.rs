//! Single-item frame: padding and a background around one image.

use super::{Demand, Placement, Size};
use crate::error::LayoutError;
use crate::tree::style::ContainerStyle;

pub fn item_budget(style: &ContainerStyle, size: Size) -> Size {
    style.drawable(size)
}

/// The child sits centered in the padded interior.
pub fn coordinates(style: &ContainerStyle, size: Size, items: &[Size]) -> Vec<Placement> {
    let interior = style.drawable(size);
    items
        .iter()
        .take(1)
        .map(|&item| {
            let x = style.padding.left + interior.width.saturating_sub(item.width) / 2;
            let y = style.padding.top + interior.height.saturating_sub(item.height) / 2;
            Placement::at(x, y, item)
        })
        .collect()
}

pub fn minimum_size(style: &ContainerStyle, members: &[Demand]) -> Size {
    let content = members
        .first()
        .map(|m| m.minimum(style.min_content))
        .unwrap_or(style.min_content);
    Size::new(
        style.padding.horizontal() + content.width,
        style.padding.vertical() + content.height,
    )
}

pub fn check_fit(
    style: &ContainerStyle,
    size: Size,
    members: &[Demand],
    candidate: Demand,
) -> Result<(), LayoutError> {
    let mut all = members.to_vec();
    all.push(candidate);
    let needed = minimum_size(style, &all);
    if needed.fits_within(size) {
        Ok(())
    } else {
        Err(LayoutError::FitFailure {
            needed,
            available: size,
        })
    }
}
