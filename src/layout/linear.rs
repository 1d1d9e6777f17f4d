//! Horizontal and vertical strategies. A vertical container is the transpose
//! of a horizontal one, so both are written once against a main axis.

use super::{Demand, Placement, Size};
use crate::error::LayoutError;
use crate::tree::style::ContainerStyle;

/// Axis along which items are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right (horizontal container).
    X,
    /// Top to bottom (vertical container).
    Y,
}

impl Axis {
    /// Split a size into (main, cross) extents.
    fn split(self, size: Size) -> (u32, u32) {
        match self {
            Axis::X => (size.width, size.height),
            Axis::Y => (size.height, size.width),
        }
    }

    fn join(self, main: u32, cross: u32) -> Size {
        match self {
            Axis::X => Size::new(main, cross),
            Axis::Y => Size::new(cross, main),
        }
    }

    /// Gap between consecutive items. Vertical gutters separate items laid
    /// out horizontally, and vice versa.
    fn gutter(self, style: &ContainerStyle) -> u32 {
        match self {
            Axis::X => style.gutters.vertical,
            Axis::Y => style.gutters.horizontal,
        }
    }

    /// Leading padding as (main, cross).
    fn leading_padding(self, style: &ContainerStyle) -> (u32, u32) {
        match self {
            Axis::X => (style.padding.left, style.padding.top),
            Axis::Y => (style.padding.top, style.padding.left),
        }
    }

    /// Total padding as (main, cross).
    fn total_padding(self, style: &ContainerStyle) -> (u32, u32) {
        self.split(Size::new(style.padding.horizontal(), style.padding.vertical()))
    }
}

fn total_gutters(axis: Axis, style: &ContainerStyle, count: usize) -> u32 {
    axis.gutter(style) * (count.saturating_sub(1) as u32)
}

/// Equal share of the drawable main extent for each of the current `count`
/// items; the full drawable cross extent.
pub fn item_budget(axis: Axis, style: &ContainerStyle, size: Size, count: usize) -> Size {
    let (main, cross) = axis.split(style.drawable(size));
    if count == 0 {
        return axis.join(main, cross);
    }
    let share = main.saturating_sub(total_gutters(axis, style, count)) / count as u32;
    axis.join(share, cross)
}

pub fn coordinates(axis: Axis, style: &ContainerStyle, size: Size, items: &[Size]) -> Vec<Placement> {
    let (budget_main, budget_cross) = axis.split(item_budget(axis, style, size, items.len()));
    let (lead_main, lead_cross) = axis.leading_padding(style);
    let gutter = axis.gutter(style);

    let mut cursor = lead_main;
    items
        .iter()
        .map(|&item| {
            let (item_main, item_cross) = axis.split(item);
            // Center inside the item's band on both axes.
            let main0 = cursor + budget_main.saturating_sub(item_main) / 2;
            let cross0 = lead_cross + budget_cross.saturating_sub(item_cross) / 2;
            cursor += budget_main + gutter;

            let origin = axis.join(main0, cross0);
            Placement::at(origin.width, origin.height, item)
        })
        .collect()
}

/// Members sum along the main axis (plus gutters); the cross axis needs only
/// the largest member.
pub fn minimum_size(axis: Axis, style: &ContainerStyle, members: &[Demand]) -> Size {
    let (pad_main, pad_cross) = axis.total_padding(style);
    let mut main = pad_main + total_gutters(axis, style, members.len());
    let mut widest_cross = 0;
    for member in members {
        let (m_main, m_cross) = axis.split(member.minimum(style.min_content));
        main += m_main;
        widest_cross = widest_cross.max(m_cross);
    }
    axis.join(main, pad_cross + widest_cross)
}

pub fn check_fit(
    axis: Axis,
    style: &ContainerStyle,
    size: Size,
    members: &[Demand],
    candidate: Demand,
) -> Result<(), LayoutError> {
    let mut all = Vec::with_capacity(members.len() + 1);
    all.extend_from_slice(members);
    all.push(candidate);

    let needed = minimum_size(axis, style, &all);
    if needed.fits_within(size) {
        Ok(())
    } else {
        Err(LayoutError::FitFailure {
            needed,
            available: size,
        })
    }
}
