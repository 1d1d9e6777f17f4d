//! Fixed rows × columns strategy.

use super::{Demand, Placement, Size};
use crate::error::LayoutError;
use crate::tree::style::ContainerStyle;

/// Size of one cell. Derived from the container size every time, so it
/// follows resizes without being stored.
pub fn cell_size(rows: u32, columns: u32, style: &ContainerStyle, size: Size) -> Size {
    let drawable = style.drawable(size);
    let gutter_w = style.gutters.vertical * columns.saturating_sub(1);
    let gutter_h = style.gutters.horizontal * rows.saturating_sub(1);
    Size::new(
        drawable.width.saturating_sub(gutter_w) / columns.max(1),
        drawable.height.saturating_sub(gutter_h) / rows.max(1),
    )
}

/// Row-major placement, each item centered in its cell.
pub fn coordinates(
    rows: u32,
    columns: u32,
    style: &ContainerStyle,
    size: Size,
    items: &[Size],
) -> Vec<Placement> {
    let cell = cell_size(rows, columns, style, size);
    let columns = columns.max(1) as usize;

    items
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            let row = (i / columns) as u32;
            let column = (i % columns) as u32;
            let cell_x = style.padding.left + column * (cell.width + style.gutters.vertical);
            let cell_y = style.padding.top + row * (cell.height + style.gutters.horizontal);

            let x = cell_x + cell.width.saturating_sub(item.width) / 2;
            let y = cell_y + cell.height.saturating_sub(item.height) / 2;
            Placement::at(x, y, item)
        })
        .collect()
}

/// Every cell must hold the largest member minimum (never less than the
/// minimum content size).
pub fn minimum_size(rows: u32, columns: u32, style: &ContainerStyle, members: &[Demand]) -> Size {
    let cell = members
        .iter()
        .map(|m| m.minimum(style.min_content))
        .fold(style.min_content, Size::max);

    Size::new(
        style.padding.horizontal()
            + style.gutters.vertical * columns.saturating_sub(1)
            + cell.width * columns,
        style.padding.vertical()
            + style.gutters.horizontal * rows.saturating_sub(1)
            + cell.height * rows,
    )
}

/// Cells have a fixed ceiling, so only the candidate needs checking: a leaf
/// at its current size, a nested container at its minimum.
pub fn check_fit(
    rows: u32,
    columns: u32,
    style: &ContainerStyle,
    size: Size,
    candidate: Demand,
) -> Result<(), LayoutError> {
    let cell = cell_size(rows, columns, style, size);
    let needed = candidate.required();
    if needed.fits_within(cell) {
        Ok(())
    } else {
        Err(LayoutError::FitFailure {
            needed,
            available: cell,
        })
    }
}
