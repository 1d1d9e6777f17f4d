//! Validated constructors. Every node enters the tree through one of these,
//! already wired to its layout strategy.

use image::RgbImage;

use crate::error::LayoutError;
use crate::layout::{grid, Layout, Size};

use super::arena::{Container, ImageItem, ItemKind, ItemNode, ItemTree, NodeId};
use super::style::{ContainerStyle, Gutters};

impl ItemTree {
    /// Add a raster leaf.
    pub fn insert_image(&mut self, buffer: RgbImage) -> Result<NodeId, LayoutError> {
        let size = Size::new(buffer.width(), buffer.height());
        if size.is_empty() {
            return Err(LayoutError::invalid("image", format!("empty raster {size}")));
        }
        Ok(self.insert(ItemNode::new(size, ItemKind::Image(ImageItem::new(buffer)))))
    }

    /// Wrap an image in a frame. The frame is sized to the image plus padding;
    /// gutters are meaningless for a single item and forced to zero.
    pub fn insert_frame(&mut self, image: NodeId, style: ContainerStyle) -> Result<NodeId, LayoutError> {
        let node = self.get(image);
        if node.is_container() {
            return Err(LayoutError::invalid("frame", "a frame can only wrap an image"));
        }
        if node.is_attached() {
            return Err(LayoutError::invalid("frame", format!("{image:?} already has a container")));
        }
        let inner = node.size;
        let style = ContainerStyle {
            gutters: Gutters::NONE,
            ..style.normalized()
        };
        let size = Size::new(
            inner.width + style.padding.horizontal(),
            inner.height + style.padding.vertical(),
        );

        let frame = self.insert(ItemNode::new(
            size,
            ItemKind::Container(Container {
                layout: Layout::Frame,
                capacity: 1,
                style,
                items: vec![image],
            }),
        ));
        self.get_mut(image).attached = true;
        Ok(frame)
    }

    /// Row container holding up to `capacity` items.
    pub fn insert_horizontal(
        &mut self,
        size: Size,
        capacity: usize,
        style: ContainerStyle,
    ) -> Result<NodeId, LayoutError> {
        self.insert_container(Layout::Horizontal, size, capacity, style)
    }

    /// Column container holding up to `capacity` items.
    pub fn insert_vertical(
        &mut self,
        size: Size,
        capacity: usize,
        style: ContainerStyle,
    ) -> Result<NodeId, LayoutError> {
        self.insert_container(Layout::Vertical, size, capacity, style)
    }

    /// Grid container; capacity is `rows * columns`.
    pub fn insert_grid(
        &mut self,
        size: Size,
        rows: u32,
        columns: u32,
        style: ContainerStyle,
    ) -> Result<NodeId, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::invalid(
                "grid",
                format!("{rows} rows x {columns} columns has no cells"),
            ));
        }
        let layout = Layout::Grid { rows, columns };
        let cell = grid::cell_size(rows, columns, &style, size);
        if cell.is_empty() {
            return Err(LayoutError::invalid(
                "grid",
                format!("{size} leaves no room for {rows}x{columns} cells"),
            ));
        }
        self.insert_container(layout, size, (rows * columns) as usize, style)
    }

    fn insert_container(
        &mut self,
        layout: Layout,
        size: Size,
        capacity: usize,
        style: ContainerStyle,
    ) -> Result<NodeId, LayoutError> {
        if size.is_empty() {
            return Err(LayoutError::invalid("size", format!("{size} must be positive")));
        }
        if capacity == 0 {
            return Err(LayoutError::invalid("capacity", "must be at least 1"));
        }
        if style.drawable(size).is_empty() {
            return Err(LayoutError::invalid(
                "padding",
                format!("{:?} leaves no drawable area in {size}", style.padding),
            ));
        }

        Ok(self.insert(ItemNode::new(
            size,
            ItemKind::Container(Container {
                layout,
                capacity,
                style: style.normalized(),
                items: Vec::new(),
            }),
        )))
    }
}
