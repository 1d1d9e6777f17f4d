use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::LayoutError;
use crate::layout::{Layout, Size};

use super::style::ContainerStyle;

/// Handle to a slot in the item arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A raster leaf. The pristine source is kept so every resize resamples from
/// full quality rather than from the previous, already-resampled buffer.
#[derive(Debug, Clone)]
pub struct ImageItem {
    source: RgbImage,
    buffer: RgbImage,
}

impl ImageItem {
    pub fn new(buffer: RgbImage) -> Self {
        Self {
            source: buffer.clone(),
            buffer,
        }
    }

    /// Current pixels, at the item's current size.
    pub fn buffer(&self) -> &RgbImage {
        &self.buffer
    }

    pub fn source_size(&self) -> Size {
        Size::new(self.source.width(), self.source.height())
    }

    /// Reallocate the buffer at `size`. A no-op when the size is unchanged.
    pub(crate) fn resample(&mut self, size: Size) {
        if self.buffer.dimensions() == (size.width, size.height) {
            return;
        }
        self.buffer = if self.source.dimensions() == (size.width, size.height) {
            self.source.clone()
        } else {
            imageops::resize(&self.source, size.width, size.height, FilterType::Triangle)
        };
    }
}

/// A node that lays out and owns an ordered list of children.
#[derive(Debug, Clone)]
pub struct Container {
    pub layout: Layout,
    pub capacity: usize,
    pub style: ContainerStyle,
    /// Insertion order is paint order.
    pub items: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub enum ItemKind {
    Image(ImageItem),
    Container(Container),
}

/// A single node in the item tree. Children carry no link back to their
/// container, only a flag saying some container owns them. A node has at
/// most one owner; detach it before attaching it elsewhere.
#[derive(Debug, Clone)]
pub struct ItemNode {
    /// Current renderable size. For images this always matches the buffer.
    pub size: Size,
    pub kind: ItemKind,
    pub(crate) attached: bool,
}

impl ItemNode {
    pub(crate) fn new(size: Size, kind: ItemKind) -> Self {
        Self {
            size,
            kind,
            attached: false,
        }
    }

    /// Whether a container currently holds this node.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            ItemKind::Container(container) => Some(container),
            ItemKind::Image(_) => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.as_container().is_some()
    }
}

/// Arena of items addressed by [`NodeId`]. Freed slots are recycled.
#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    slots: Vec<Option<ItemNode>>,
    free: Vec<NodeId>,
}

impl ItemTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a detached node. Returns its handle.
    pub(crate) fn insert(&mut self, node: ItemNode) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            return id;
        }
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Some(node));
        id
    }

    /// Get a node by ID.
    ///
    /// # Panics
    /// If `id` was discarded or never issued by this tree.
    pub fn get(&self, id: NodeId) -> &ItemNode {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("stale item handle {id:?}"),
        }
    }

    /// Get a mutable node by ID. Same panics as [`ItemTree::get`].
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut ItemNode {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("stale item handle {id:?}"),
        }
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn size(&self, id: NodeId) -> Size {
        self.get(id).size
    }

    pub fn width(&self, id: NodeId) -> u32 {
        self.get(id).size.width
    }

    pub fn height(&self, id: NodeId) -> u32 {
        self.get(id).size.height
    }

    pub fn container(&self, id: NodeId) -> Result<&Container, LayoutError> {
        self.get(id)
            .as_container()
            .ok_or_else(|| LayoutError::invalid("container", format!("{id:?} is an image")))
    }

    pub(crate) fn container_mut(&mut self, id: NodeId) -> Result<&mut Container, LayoutError> {
        match &mut self.get_mut(id).kind {
            ItemKind::Container(container) => Ok(container),
            ItemKind::Image(_) => Err(LayoutError::invalid("container", format!("{id:?} is an image"))),
        }
    }

    /// Children in paint order; empty for images.
    pub fn items(&self, id: NodeId) -> &[NodeId] {
        match self.get(id).as_container() {
            Some(container) => &container.items,
            None => &[],
        }
    }

    /// Whether `target` is `root` or lies anywhere below it.
    pub fn subtree_contains(&self, root: NodeId, target: NodeId) -> bool {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            stack.extend_from_slice(self.items(id));
        }
        false
    }

    /// Free `id` and everything below it. The caller must have detached `id`
    /// from its container first; stale handles to the freed nodes panic.
    pub fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.slots.get_mut(current.index()).and_then(Option::take) else {
                continue;
            };
            if let ItemKind::Container(container) = node.kind {
                stack.extend(container.items);
            }
            self.free.push(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn leaf(w: u32, h: u32) -> ItemNode {
        ItemNode::new(
            Size::new(w, h),
            ItemKind::Image(ImageItem::new(RgbImage::from_pixel(w, h, Rgb([1, 2, 3])))),
        )
    }

    #[test]
    fn discarded_slots_are_reused() {
        let mut tree = ItemTree::new();
        let a = tree.insert(leaf(4, 4));
        let b = tree.insert(leaf(4, 4));
        assert_eq!(tree.len(), 2);

        tree.discard(a);
        assert!(!tree.contains(a));
        assert!(tree.contains(b));
        assert_eq!(tree.len(), 1);

        let c = tree.insert(leaf(2, 2));
        assert_eq!(c, a);
        assert_eq!(tree.size(c), Size::new(2, 2));
    }

    #[test]
    #[should_panic(expected = "stale item handle")]
    fn stale_handle_panics() {
        let mut tree = ItemTree::new();
        let a = tree.insert(leaf(1, 1));
        tree.discard(a);
        let _ = tree.get(a);
    }

    #[test]
    fn resample_is_noop_at_current_size() {
        let mut image = ImageItem::new(RgbImage::from_pixel(8, 4, Rgb([9, 9, 9])));
        let before = image.buffer().as_ptr();
        image.resample(Size::new(8, 4));
        assert_eq!(image.buffer().as_ptr(), before);

        image.resample(Size::new(4, 2));
        assert_eq!(image.buffer().dimensions(), (4, 2));
        assert_eq!(image.source_size(), Size::new(8, 4));
    }
}
