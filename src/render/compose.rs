use image::imageops;
use image::RgbImage;
use rayon::prelude::*;

use crate::tree::arena::{ItemKind, ItemTree, NodeId};

/// CPU-rasterize `id` and everything below it into an RGB buffer of exactly
/// the item's size.
///
/// Containers start from a canvas filled with their background. Children
/// are rendered independently in parallel, then pasted at their layout
/// coordinates in item order, so later items paint over earlier ones.
/// Anything reaching past the canvas edge is clipped.
pub fn render_item(tree: &ItemTree, id: NodeId) -> RgbImage {
    let node = tree.get(id);
    match &node.kind {
        ItemKind::Image(image) => image.buffer().clone(),
        ItemKind::Container(container) => {
            let mut canvas =
                RgbImage::from_pixel(node.size.width, node.size.height, container.style.background);

            let placements = tree.layout_coordinates(id);
            let children: Vec<RgbImage> = container
                .items
                .par_iter()
                .map(|&child| render_item(tree, child))
                .collect();

            for (child, rect) in children.iter().zip(&placements) {
                imageops::replace(&mut canvas, child, rect.x0 as i64, rect.y0 as i64);
            }
            canvas
        }
    }
}

impl ItemTree {
    /// Rasterize the subtree rooted at `id`. See [`render_item`].
    pub fn render(&self, id: NodeId) -> RgbImage {
        render_item(self, id)
    }
}
