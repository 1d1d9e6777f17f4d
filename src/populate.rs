use rand::Rng;

use crate::catalog::{load_raster, Catalog};
use crate::generator::heuristics::Heuristics;
use crate::tree::arena::{ItemTree, NodeId};
use crate::tree::style::ContainerStyle;

/// Fill bottom-level containers with framed images drawn from `catalog`.
///
/// Each free slot walks the container kind's bucket preference order and
/// takes the first image whose frame fits. A slot no bucket can fill ends
/// that container. Images that fail to decode are skipped. Returns the
/// number of frames placed.
pub fn populate<R: Rng + ?Sized>(
    tree: &mut ItemTree,
    leaves: &[NodeId],
    catalog: &mut Catalog,
    heuristics: &Heuristics,
    frame_style: ContainerStyle,
    rng: &mut R,
) -> usize {
    let mut placed = 0;

    for &leaf in leaves {
        let Ok(container) = tree.container(leaf) else {
            continue;
        };
        let Some(kind) = container.layout.kind() else {
            continue;
        };
        let heuristic = heuristics.get(kind);
        let free = container.capacity.saturating_sub(container.items.len());

        for _ in 0..free {
            let mut filled = false;
            for &bucket in &heuristic.preference {
                let Some(entry) = catalog.take_random(bucket, &mut *rng) else {
                    continue;
                };
                let raster = match load_raster(&entry.path) {
                    Ok(raster) => raster,
                    Err(e) => {
                        tracing::warn!("No usable image in {}: {:#}", entry.name, e);
                        continue;
                    }
                };

                let Ok(image) = tree.insert_image(raster) else {
                    continue;
                };
                let frame = match tree.insert_frame(image, frame_style) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::debug!("Could not frame {}: {}", entry.name, e);
                        tree.discard(image);
                        continue;
                    }
                };
                match tree.add_item(leaf, frame) {
                    Ok(()) => {
                        tracing::trace!("Placed {} ({}) in {:?}", entry.name, bucket, leaf);
                        placed += 1;
                        filled = true;
                        break;
                    }
                    Err(e) => {
                        tracing::debug!("{} ({}) does not fit {:?}: {}", entry.name, bucket, leaf, e);
                        tree.discard(frame);
                    }
                }
            }
            if !filled {
                break;
            }
        }
    }

    placed
}
