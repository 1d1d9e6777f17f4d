pub mod fit;
pub mod frame;
pub mod grid;
pub mod linear;

use std::fmt;

use crate::error::LayoutError;
use crate::tree::style::ContainerStyle;
use linear::Axis;

/// Integer pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// width / height. Callers guarantee a non-zero height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Whether `self` fits inside `bounds` on both axes.
    pub fn fits_within(self, bounds: Size) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where a child is painted inside its container: `[x0, x1) × [y0, y1)` in
/// container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Placement {
    pub fn at(x: u32, y: u32, size: Size) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + size.width,
            y1: y + size.height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// The space a member asks of its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    /// A leaf at its current pixel size.
    Leaf(Size),
    /// A nested container at its minimum layout size.
    Nested(Size),
}

impl Demand {
    /// Footprint when the container is free to shrink the member: leaves can
    /// go down to the container's minimum content size.
    pub fn minimum(self, min_content: Size) -> Size {
        match self {
            Demand::Leaf(_) => min_content,
            Demand::Nested(size) => size,
        }
    }

    /// Footprint against a fixed per-item ceiling.
    pub fn required(self) -> Size {
        match self {
            Demand::Leaf(size) | Demand::Nested(size) => size,
        }
    }
}

/// Container kinds the generator can choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Horizontal,
    Vertical,
    Grid,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 3] = [LayoutKind::Horizontal, LayoutKind::Vertical, LayoutKind::Grid];

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Vertical => "vertical",
            LayoutKind::Grid => "grid",
        }
    }
}

/// Sizing and placement strategy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Items left to right, equal widths.
    Horizontal,
    /// Items top to bottom, equal heights.
    Vertical,
    /// Fixed cells filled row-major.
    Grid { rows: u32, columns: u32 },
    /// A single item centered inside padding.
    Frame,
}

impl Layout {
    pub fn kind(self) -> Option<LayoutKind> {
        match self {
            Layout::Horizontal => Some(LayoutKind::Horizontal),
            Layout::Vertical => Some(LayoutKind::Vertical),
            Layout::Grid { .. } => Some(LayoutKind::Grid),
            Layout::Frame => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.name(),
            None => "frame",
        }
    }

    /// Largest box each of `count` items may occupy once padding and gutters
    /// are taken out.
    pub fn item_budget(self, style: &ContainerStyle, size: Size, count: usize) -> Size {
        match self {
            Layout::Horizontal => linear::item_budget(Axis::X, style, size, count),
            Layout::Vertical => linear::item_budget(Axis::Y, style, size, count),
            Layout::Grid { rows, columns } => grid::cell_size(rows, columns, style, size),
            Layout::Frame => frame::item_budget(style, size),
        }
    }

    /// Paint rectangles for items of the given sizes, in item order.
    pub fn coordinates(self, style: &ContainerStyle, size: Size, items: &[Size]) -> Vec<Placement> {
        match self {
            Layout::Horizontal => linear::coordinates(Axis::X, style, size, items),
            Layout::Vertical => linear::coordinates(Axis::Y, style, size, items),
            Layout::Grid { rows, columns } => grid::coordinates(rows, columns, style, size, items),
            Layout::Frame => frame::coordinates(style, size, items),
        }
    }

    /// Smallest size the container could shrink to while still holding
    /// `members`.
    pub fn minimum_size(self, style: &ContainerStyle, members: &[Demand]) -> Size {
        match self {
            Layout::Horizontal => linear::minimum_size(Axis::X, style, members),
            Layout::Vertical => linear::minimum_size(Axis::Y, style, members),
            Layout::Grid { rows, columns } => grid::minimum_size(rows, columns, style, members),
            Layout::Frame => frame::minimum_size(style, members),
        }
    }

    /// Whether `candidate` can join `members` in a container of `size`.
    /// Capacity is the caller's concern.
    pub fn check_fit(
        self,
        style: &ContainerStyle,
        size: Size,
        members: &[Demand],
        candidate: Demand,
    ) -> Result<(), LayoutError> {
        match self {
            Layout::Horizontal => linear::check_fit(Axis::X, style, size, members, candidate),
            Layout::Vertical => linear::check_fit(Axis::Y, style, size, members, candidate),
            Layout::Grid { rows, columns } => grid::check_fit(rows, columns, style, size, candidate),
            Layout::Frame => frame::check_fit(style, size, members, candidate),
        }
    }
}
