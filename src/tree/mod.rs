pub mod arena;
pub mod factory;
pub mod style;

use crate::error::LayoutError;
use crate::layout::fit::{self, FitAxis};
use crate::layout::{Demand, Layout, Placement, Size};

use self::arena::{ItemKind, ItemTree, NodeId};

// Container operations. All of them run to completion on `&mut ItemTree`,
// so a fit check followed by a commit is never interleaved with another writer.
impl ItemTree {
    /// Attach `item` as the last child of `container`.
    ///
    /// Fails with `CapacityExceeded` when full and `FitFailure` when the
    /// layout cannot accommodate it. On success every child, old and new, is
    /// re-fitted to the new per-item budget. On failure nothing changes.
    pub fn add_item(&mut self, container: NodeId, item: NodeId) -> Result<(), LayoutError> {
        self.check_fit(container, item)?;
        let sizes = self.snapshot(container);
        let item_sizes = self.snapshot(item);
        self.container_mut(container)?.items.push(item);
        self.get_mut(item).attached = true;

        if let Err(err) = self.resize_items(container) {
            self.container_mut(container)?.items.pop();
            self.get_mut(item).attached = false;
            self.restore(sizes);
            self.restore(item_sizes);
            return Err(err);
        }
        Ok(())
    }

    /// Detach the first occurrence of `item` from `container`. The item stays
    /// alive and can be attached elsewhere or discarded. A frame's image is
    /// fixed and cannot be removed.
    pub fn remove_item(&mut self, container: NodeId, item: NodeId) -> Result<(), LayoutError> {
        if matches!(self.container(container)?.layout, Layout::Frame) {
            return Err(LayoutError::invalid("frame", "a frame keeps the image it was built with"));
        }
        let sizes = self.snapshot(container);
        let items = &mut self.container_mut(container)?.items;
        let position = items
            .iter()
            .position(|&id| id == item)
            .ok_or(LayoutError::NotFound(item))?;
        items.remove(position);
        self.get_mut(item).attached = false;

        if let Err(err) = self.resize_items(container) {
            self.container_mut(container)?.items.insert(position, item);
            self.get_mut(item).attached = true;
            self.restore(sizes);
            return Err(err);
        }
        Ok(())
    }

    /// Whether [`ItemTree::add_item`] would accept `item` right now.
    /// Pure: the container is never touched.
    pub fn can_fit(&self, container: NodeId, item: NodeId) -> bool {
        self.check_fit(container, item).is_ok()
    }

    /// Like [`ItemTree::can_fit`] but says why not.
    pub fn check_fit(&self, container: NodeId, item: NodeId) -> Result<(), LayoutError> {
        if self.subtree_contains(item, container) {
            return Err(LayoutError::invalid("item", "a container cannot hold itself"));
        }
        let size = self.size(container);
        let c = self.container(container)?;
        if matches!(c.layout, Layout::Frame) {
            return Err(LayoutError::invalid("frame", "a frame keeps the image it was built with"));
        }
        if self.get(item).is_attached() {
            return Err(LayoutError::invalid("item", format!("{item:?} already has a container")));
        }
        if c.items.len() >= c.capacity {
            return Err(LayoutError::CapacityExceeded { capacity: c.capacity });
        }

        let members: Vec<Demand> = c.items.iter().map(|&id| self.demand(id)).collect();
        c.layout.check_fit(&c.style, size, &members, self.demand(item))
    }

    /// What `id` asks of a container that wants to hold it.
    pub fn demand(&self, id: NodeId) -> Demand {
        let node = self.get(id);
        match node.kind {
            ItemKind::Image(_) => Demand::Leaf(node.size),
            ItemKind::Container(_) => Demand::Nested(self.minimum_layout_size(id)),
        }
    }

    /// Smallest size `id` could shrink to while still holding its current
    /// children. Nested containers are asked recursively; an image reports
    /// its own size.
    pub fn minimum_layout_size(&self, id: NodeId) -> Size {
        let node = self.get(id);
        match &node.kind {
            ItemKind::Image(_) => node.size,
            ItemKind::Container(c) => {
                let members: Vec<Demand> = c.items.iter().map(|&child| self.demand(child)).collect();
                c.layout.minimum_size(&c.style, &members)
            }
        }
    }

    /// Area inside padding available to all children together.
    pub fn drawable_size(&self, id: NodeId) -> Size {
        let node = self.get(id);
        match &node.kind {
            ItemKind::Image(_) => node.size,
            ItemKind::Container(c) => c.style.drawable(node.size),
        }
    }

    /// Box each current child is fitted into.
    pub fn item_budget(&self, id: NodeId) -> Size {
        let node = self.get(id);
        match &node.kind {
            ItemKind::Image(_) => node.size,
            ItemKind::Container(c) => c.layout.item_budget(&c.style, node.size, c.items.len()),
        }
    }

    /// Paint rectangles of the children, aligned with [`ItemTree::items`].
    pub fn layout_coordinates(&self, id: NodeId) -> Vec<Placement> {
        let node = self.get(id);
        match &node.kind {
            ItemKind::Image(_) => Vec::new(),
            ItemKind::Container(c) => {
                let sizes: Vec<Size> = c.items.iter().map(|&child| self.size(child)).collect();
                c.layout.coordinates(&c.style, node.size, &sizes)
            }
        }
    }

    /// Resize to `width`, scaling the height by the same ratio.
    ///
    /// Fails with `Collapsed` when `id` or any container below it would be
    /// left without a drawable interior. The whole subtree keeps its sizes
    /// in that case.
    pub fn resize_by_width(&mut self, id: NodeId, width: u32) -> Result<(), LayoutError> {
        self.atomically(id, |tree| tree.scale_to_width(id, width))
    }

    /// Resize to `height`, scaling the width by the same ratio. Fails like
    /// [`ItemTree::resize_by_width`].
    pub fn resize_by_height(&mut self, id: NodeId, height: u32) -> Result<(), LayoutError> {
        self.atomically(id, |tree| tree.scale_to_height(id, height))
    }

    /// Largest aspect-preserving size that fits inside `max`.
    pub fn resize_to_fit(&mut self, id: NodeId, max: Size) -> Result<(), LayoutError> {
        self.atomically(id, |tree| tree.fit_within(id, max))
    }

    fn scale_to_width(&mut self, id: NodeId, width: u32) -> Result<(), LayoutError> {
        let current = self.size(id);
        if width == current.width {
            return Ok(());
        }
        self.resize_to(id, Size::new(width, fit::scale_height(current, width)))
    }

    fn scale_to_height(&mut self, id: NodeId, height: u32) -> Result<(), LayoutError> {
        let current = self.size(id);
        if height == current.height {
            return Ok(());
        }
        self.resize_to(id, Size::new(fit::scale_width(current, height), height))
    }

    fn fit_within(&mut self, id: NodeId, max: Size) -> Result<(), LayoutError> {
        match fit::fit_axis(self.size(id), max) {
            FitAxis::Width(width) => self.scale_to_width(id, width),
            FitAxis::Height(height) => self.scale_to_height(id, height),
        }
    }

    fn resize_to(&mut self, id: NodeId, target: Size) -> Result<(), LayoutError> {
        let node = self.get_mut(id);
        match &mut node.kind {
            ItemKind::Image(image) => {
                // A raster cannot have an empty side.
                let target = target.max(Size::new(1, 1));
                image.resample(target);
                node.size = target;
                Ok(())
            }
            ItemKind::Container(c) => {
                // Only commit once the interior is known to be usable.
                if c.style.drawable(target).is_empty() {
                    return Err(LayoutError::Collapsed {
                        width: target.width,
                        height: target.height,
                    });
                }
                node.size = target;
                self.resize_items(id)
            }
        }
    }

    /// Re-fit every child to the container's current per-item budget.
    /// Leaves a partial result behind on error; callers restore a snapshot.
    fn resize_items(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let budget = self.item_budget(id);
        let items = self.items(id).to_vec();
        for child in items {
            self.fit_within(child, budget)?;
        }
        Ok(())
    }

    /// Run `op` on the subtree under `id`, putting every size back if it fails.
    fn atomically<F>(&mut self, id: NodeId, op: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        let sizes = self.snapshot(id);
        let result = op(self);
        if result.is_err() {
            self.restore(sizes);
        }
        result
    }

    /// Sizes of `root` and everything below it.
    fn snapshot(&self, root: NodeId) -> Vec<(NodeId, Size)> {
        let mut sizes = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            sizes.push((id, self.size(id)));
            stack.extend_from_slice(self.items(id));
        }
        sizes
    }

    fn restore(&mut self, sizes: Vec<(NodeId, Size)>) {
        for (id, size) in sizes {
            let node = self.get_mut(id);
            if let ItemKind::Image(image) = &mut node.kind {
                // Resampling from the pristine source reproduces the old pixels.
                image.resample(size);
            }
            node.size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_item;
    use crate::tree::style::{ContainerStyle, Gutters, Padding};
    use image::{Rgb, RgbImage};

    fn image(tree: &mut ItemTree, w: u32, h: u32) -> NodeId {
        tree.insert_image(RgbImage::from_pixel(w, h, Rgb([200, 10, 10])))
            .unwrap()
    }

    fn plain() -> ContainerStyle {
        ContainerStyle::default()
    }

    #[test]
    fn two_squares_share_a_row() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(300, 100), 2, plain()).unwrap();
        let a = image(&mut tree, 100, 100);
        let b = image(&mut tree, 100, 100);
        tree.add_item(row, a).unwrap();
        tree.add_item(row, b).unwrap();

        assert_eq!(tree.item_budget(row), Size::new(150, 100));
        assert_eq!(tree.size(a), Size::new(100, 100));
        assert_eq!(tree.size(b), Size::new(100, 100));
        let coords = tree.layout_coordinates(row);
        assert_eq!(coords[0], Placement::at(25, 0, Size::new(100, 100)));
        assert_eq!(coords[1], Placement::at(175, 0, Size::new(100, 100)));
    }

    #[test]
    fn earlier_items_shrink_as_the_row_fills() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(300, 300), 3, plain()).unwrap();
        let first = image(&mut tree, 600, 600);
        tree.add_item(row, first).unwrap();
        assert_eq!(tree.size(first), Size::new(300, 300));

        let second = image(&mut tree, 600, 600);
        tree.add_item(row, second).unwrap();
        assert_eq!(tree.size(first), Size::new(150, 150));
        assert_eq!(tree.size(second), Size::new(150, 150));
    }

    #[test]
    fn full_grid_rejects_seventh_item_without_side_effects() {
        let mut tree = ItemTree::new();
        let style = ContainerStyle {
            gutters: Gutters::uniform(10),
            ..plain()
        };
        let grid = tree.insert_grid(Size::new(300, 200), 2, 3, style).unwrap();
        assert_eq!(tree.item_budget(grid), Size::new(93, 95));

        for _ in 0..6 {
            let item = image(&mut tree, 60, 60);
            tree.add_item(grid, item).unwrap();
        }
        let sizes_before: Vec<Size> = tree.items(grid).iter().map(|&i| tree.size(i)).collect();

        let seventh = image(&mut tree, 60, 60);
        assert!(!tree.can_fit(grid, seventh));
        assert_eq!(
            tree.add_item(grid, seventh),
            Err(LayoutError::CapacityExceeded { capacity: 6 })
        );

        let sizes_after: Vec<Size> = tree.items(grid).iter().map(|&i| tree.size(i)).collect();
        assert_eq!(tree.items(grid).len(), 6);
        assert_eq!(sizes_before, sizes_after);
        assert_eq!(tree.size(grid), Size::new(300, 200));
    }

    #[test]
    fn probing_never_changes_the_container() {
        let mut tree = ItemTree::new();
        let column = tree.insert_vertical(Size::new(100, 120), 3, plain()).unwrap();
        let a = image(&mut tree, 40, 40);
        tree.add_item(column, a).unwrap();
        let before = render_item(&tree, column);

        let fits = image(&mut tree, 10, 10);
        let too_many = image(&mut tree, 10, 10);
        for _ in 0..3 {
            assert!(tree.can_fit(column, fits));
        }
        tree.add_item(column, fits).unwrap();
        for _ in 0..3 {
            // Three leaves need 150 px of column height at minimum.
            assert!(!tree.can_fit(column, too_many));
        }
        assert_eq!(tree.items(column).len(), 2);

        tree.remove_item(column, fits).unwrap();
        assert_eq!(render_item(&tree, column), before);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(1000, 100), 2, plain()).unwrap();
        let items: Vec<NodeId> = (0..5).map(|_| image(&mut tree, 30, 30)).collect();
        for &item in &items {
            let full = tree.items(row).len() == 2;
            assert_eq!(tree.can_fit(row, item), !full);
            let _ = tree.add_item(row, item);
            assert!(tree.items(row).len() <= 2);
        }
        tree.remove_item(row, items[0]).unwrap();
        tree.add_item(row, items[4]).unwrap();
        assert_eq!(tree.items(row), &[items[1], items[4]]);
    }

    #[test]
    fn removing_unknown_item_is_not_found() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(200, 100), 2, plain()).unwrap();
        let stray = image(&mut tree, 10, 10);
        assert_eq!(tree.remove_item(row, stray), Err(LayoutError::NotFound(stray)));
    }

    #[test]
    fn container_cannot_hold_itself_or_an_ancestor() {
        let mut tree = ItemTree::new();
        let outer = tree.insert_horizontal(Size::new(400, 400), 2, plain()).unwrap();
        let inner = tree.insert_vertical(Size::new(200, 200), 2, plain()).unwrap();
        tree.add_item(outer, inner).unwrap();

        assert!(!tree.can_fit(outer, outer));
        assert!(matches!(
            tree.add_item(inner, outer),
            Err(LayoutError::Validation { .. })
        ));
        assert!(matches!(tree.add_item(outer, inner), Err(LayoutError::Validation { .. })));
    }

    #[test]
    fn frame_resize_halves_child() {
        let mut tree = ItemTree::new();
        let img = image(&mut tree, 200, 100);
        let frame = tree.insert_frame(img, plain()).unwrap();
        tree.resize_by_width(frame, 100).unwrap();
        assert_eq!(tree.size(frame), Size::new(100, 50));
        assert_eq!(tree.drawable_size(frame), Size::new(100, 50));
        assert_eq!(tree.size(img), Size::new(100, 50));
    }

    #[test]
    fn collapsing_frame_resize_is_rejected_and_keeps_state() {
        let mut tree = ItemTree::new();
        let img = image(&mut tree, 100, 100);
        let style = ContainerStyle {
            padding: Padding::uniform(20),
            ..plain()
        };
        let frame = tree.insert_frame(img, style).unwrap();
        assert_eq!(tree.size(frame), Size::new(140, 140));

        assert_eq!(
            tree.resize_by_width(frame, 40),
            Err(LayoutError::Collapsed {
                width: 40,
                height: 40
            })
        );
        assert_eq!(tree.size(frame), Size::new(140, 140));
        assert_eq!(tree.size(img), Size::new(100, 100));
    }

    #[test]
    fn nested_collapse_restores_the_whole_subtree() {
        let mut tree = ItemTree::new();
        let outer = tree.insert_horizontal(Size::new(400, 200), 2, plain()).unwrap();
        let a = image(&mut tree, 200, 200);
        tree.add_item(outer, a).unwrap();
        let padded = ContainerStyle {
            padding: Padding::uniform(20),
            ..plain()
        };
        let inner = tree.insert_vertical(Size::new(400, 200), 1, padded).unwrap();
        tree.add_item(outer, inner).unwrap();
        let img = image(&mut tree, 40, 40);
        tree.add_item(inner, img).unwrap();

        assert_eq!(tree.size(inner), Size::new(200, 100));
        assert_eq!(tree.size(img), Size::new(60, 60));
        let before = render_item(&tree, outer);

        // `a` is shrunk to 30x30 before `inner` runs out of room at 30x15.
        assert_eq!(
            tree.resize_by_width(outer, 60),
            Err(LayoutError::Collapsed {
                width: 30,
                height: 15
            })
        );
        assert_eq!(tree.size(outer), Size::new(400, 200));
        assert_eq!(tree.size(a), Size::new(200, 200));
        assert_eq!(tree.size(inner), Size::new(200, 100));
        assert_eq!(tree.size(img), Size::new(60, 60));
        assert_eq!(render_item(&tree, outer), before);
    }

    #[test]
    fn failed_add_puts_siblings_back() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(300, 300), 3, plain()).unwrap();
        let a = image(&mut tree, 100, 100);
        tree.add_item(row, a).unwrap();
        assert_eq!(tree.size(a), Size::new(300, 300));

        // A thin strip passes the minimum-size check but collapses once
        // fitted to its 150 px share of the row.
        let strip_style = ContainerStyle {
            padding: Padding::uniform(10),
            ..plain()
        };
        let strip = tree.insert_vertical(Size::new(300, 30), 1, strip_style).unwrap();
        assert!(tree.can_fit(row, strip));
        assert_eq!(
            tree.add_item(row, strip),
            Err(LayoutError::Collapsed {
                width: 150,
                height: 15
            })
        );

        assert_eq!(tree.items(row), &[a]);
        assert_eq!(tree.size(a), Size::new(300, 300));
        assert_eq!(tree.size(strip), Size::new(300, 30));
        assert!(!tree.get(strip).is_attached());
        assert!(tree.get(a).is_attached());
    }

    #[test]
    fn attached_item_cannot_join_a_second_container() {
        let mut tree = ItemTree::new();
        let first = tree.insert_horizontal(Size::new(200, 100), 2, plain()).unwrap();
        let second = tree.insert_horizontal(Size::new(200, 100), 2, plain()).unwrap();
        let img = image(&mut tree, 50, 50);
        tree.add_item(first, img).unwrap();

        assert!(!tree.can_fit(second, img));
        assert!(matches!(
            tree.add_item(second, img),
            Err(LayoutError::Validation { field: "item", .. })
        ));
        assert!(tree.items(second).is_empty());

        tree.remove_item(first, img).unwrap();
        assert!(!tree.get(img).is_attached());
        tree.add_item(second, img).unwrap();
        assert_eq!(tree.items(second), &[img]);
        assert!(tree.items(first).is_empty());
    }

    #[test]
    fn frame_keeps_its_image() {
        let mut tree = ItemTree::new();
        let img = image(&mut tree, 80, 60);
        let frame = tree.insert_frame(img, plain()).unwrap();
        let row = tree.insert_horizontal(Size::new(100, 100), 2, plain()).unwrap();

        assert!(matches!(
            tree.remove_item(frame, img),
            Err(LayoutError::Validation { field: "frame", .. })
        ));
        assert!(!tree.can_fit(frame, row));
        assert!(matches!(
            tree.add_item(frame, row),
            Err(LayoutError::Validation { field: "frame", .. })
        ));
        assert_eq!(tree.items(frame), &[img]);
        assert!(tree.get(img).is_attached());
        assert!(!tree.get(row).is_attached());
    }

    #[test]
    fn resizing_to_current_size_is_a_noop() {
        let mut tree = ItemTree::new();
        let img = image(&mut tree, 64, 48);
        let before = render_item(&tree, img);
        tree.resize_by_width(img, 64).unwrap();
        tree.resize_by_height(img, 48).unwrap();
        assert_eq!(tree.size(img), Size::new(64, 48));
        assert_eq!(render_item(&tree, img), before);
    }

    #[test]
    fn image_resizes_preserve_aspect_ratio() {
        let mut tree = ItemTree::new();
        let img = image(&mut tree, 640, 480);
        for width in [320, 100, 77, 1000, 30] {
            let before = tree.size(img);
            tree.resize_by_width(img, width).unwrap();
            let size = tree.size(img);
            assert_eq!(size.width, width);
            // Within one pixel of the exact height.
            let exact = width as f64 / before.aspect_ratio();
            assert!((size.height as f64 - exact).abs() <= 1.0, "{size}");
            assert_eq!(tree.get(img).size, size);
        }
        for height in [240, 31, 999] {
            let before = tree.size(img);
            tree.resize_by_height(img, height).unwrap();
            let size = tree.size(img);
            assert_eq!(size.height, height);
            let exact = height as f64 * before.aspect_ratio();
            assert!((size.width as f64 - exact).abs() <= 1.0, "{size}");
        }
    }

    #[test]
    fn container_resize_scales_and_refits_children() {
        let mut tree = ItemTree::new();
        let row = tree.insert_horizontal(Size::new(400, 200), 2, plain()).unwrap();
        let a = image(&mut tree, 200, 200);
        let b = image(&mut tree, 200, 200);
        tree.add_item(row, a).unwrap();
        tree.add_item(row, b).unwrap();

        tree.resize_by_height(row, 100).unwrap();
        assert_eq!(tree.size(row), Size::new(200, 100));
        assert_eq!(tree.size(a), Size::new(100, 100));
        assert_eq!(tree.size(b), Size::new(100, 100));
    }

    #[test]
    fn nested_container_reports_recursive_minimum() {
        let mut tree = ItemTree::new();
        let style = ContainerStyle {
            padding: Padding::uniform(10),
            gutters: Gutters::uniform(10),
            ..plain()
        };
        let outer = tree.insert_horizontal(Size::new(1000, 500), 3, style).unwrap();
        let inner = tree.insert_vertical(Size::new(400, 400), 3, style).unwrap();
        tree.add_item(outer, inner).unwrap();
        let a = image(&mut tree, 300, 300);
        let b = image(&mut tree, 300, 300);
        tree.add_item(inner, a).unwrap();
        tree.add_item(inner, b).unwrap();

        // inner: 20 padding + 10 gutter + 2 x 50 tall, 20 + 50 wide
        assert_eq!(tree.minimum_layout_size(inner), Size::new(70, 130));
        assert_eq!(tree.demand(inner), Demand::Nested(Size::new(70, 130)));
        // outer: 20 padding + inner minimum
        assert_eq!(tree.minimum_layout_size(outer), Size::new(90, 150));
    }
}
