//! Randomized recursive layout generation.
//!
//! Starting from a root row spanning the canvas, each step picks a container
//! kind the proposed box is big enough for, commits it, and splits its
//! drawable area into boxes for the next level. Anything that cannot go
//! deeper (no eligible kind, a candidate that does not fit, nesting used up)
//! becomes a bottom-level container for the populator to fill.

pub mod heuristics;
pub mod partition;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::LayoutError;
use crate::layout::{LayoutKind, Size};
use crate::tree::arena::{ItemTree, NodeId};
use heuristics::SlotShape;

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLayout {
    pub root: NodeId,
    /// Bottom-level containers in discovery order, without duplicates.
    pub leaves: Vec<NodeId>,
    /// Nesting depth drawn for this run.
    pub nesting: u32,
}

/// Build a random container tree inside `tree` according to `config`.
///
/// Only an invalid configuration or an unusable root is an error; every
/// failure below the root degrades to a bottom-level container.
pub fn generate_layout<R: Rng + ?Sized>(
    tree: &mut ItemTree,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GeneratedLayout, LayoutError> {
    config.validate()?;

    let nesting = rng.gen_range(1..=config.max_nesting);
    let capacity = rng.gen_range(config.root_capacity.clone());
    let root = tree.insert_horizontal(config.canvas, capacity, config.root_style)?;
    let root_drawable = tree.drawable_size(root);

    let mut generator = Generator {
        tree: &mut *tree,
        config,
        rng,
        root_drawable,
        leaves: Vec::new(),
    };
    generator.subtree(root, root_drawable, &[LayoutKind::Horizontal], nesting);
    let leaves = generator.leaves;

    tracing::debug!(
        "Generated layout: nesting {}, {} bottom-level containers, {} nodes",
        nesting,
        leaves.len(),
        tree.len()
    );
    Ok(GeneratedLayout { root, leaves, nesting })
}

struct Generator<'a, R: ?Sized> {
    tree: &'a mut ItemTree,
    config: &'a GeneratorConfig,
    rng: &'a mut R,
    root_drawable: Size,
    leaves: Vec<NodeId>,
}

impl<R: Rng + ?Sized> Generator<'_, R> {
    fn subtree(&mut self, parent: NodeId, proposed: Size, eligible: &[LayoutKind], nesting: u32) {
        let Some(&kind) = eligible.choose(&mut *self.rng) else {
            self.mark_leaf(parent);
            return;
        };

        let child = match self.candidate(kind, proposed) {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("No {} container at {}: {}", kind.name(), proposed, e);
                self.mark_leaf(parent);
                return;
            }
        };
        if let Err(e) = self.tree.add_item(parent, child) {
            tracing::debug!("{} container {} rejected by {:?}: {}", kind.name(), proposed, parent, e);
            self.tree.discard(child);
            self.mark_leaf(parent);
            return;
        }

        let remaining = nesting.saturating_sub(1);
        if remaining == 0 {
            self.mark_leaf(child);
            return;
        }

        let config = self.config;
        let count = self
            .rng
            .gen_range(config.heuristics.get(kind).child_containers.clone());
        if count == 0 {
            self.mark_leaf(child);
            return;
        }

        let boxes = partition::best_partition(
            self.tree.drawable_size(child),
            count,
            self.root_drawable,
            &config.heuristics,
            config.partition_trials,
            &config.jitter_percent,
            &mut *self.rng,
        );
        if boxes.is_empty() {
            self.mark_leaf(child);
            return;
        }
        for proposed in boxes {
            self.subtree(child, proposed.size, &proposed.eligible, remaining);
        }
    }

    /// A detached, empty container of `kind` sized to `proposed`.
    fn candidate(&mut self, kind: LayoutKind, proposed: Size) -> Result<NodeId, LayoutError> {
        let config = self.config;
        let style = config.child_style;
        match (kind, &config.heuristics.get(kind).slots) {
            (LayoutKind::Horizontal, SlotShape::Linear { capacity }) => {
                let capacity = self.rng.gen_range(capacity.clone());
                self.tree.insert_horizontal(proposed, capacity, style)
            }
            (LayoutKind::Vertical, SlotShape::Linear { capacity }) => {
                let capacity = self.rng.gen_range(capacity.clone());
                self.tree.insert_vertical(proposed, capacity, style)
            }
            (LayoutKind::Grid, SlotShape::Grid { rows, columns }) => {
                let rows = self.rng.gen_range(rows.clone());
                let columns = self.rng.gen_range(columns.clone());
                self.tree.insert_grid(proposed, rows, columns, style)
            }
            (kind, slots) => Err(LayoutError::invalid(
                "heuristic",
                format!("{} containers cannot use {:?} slots", kind.name(), slots),
            )),
        }
    }

    fn mark_leaf(&mut self, id: NodeId) {
        if !self.leaves.contains(&id) {
            self.leaves.push(id);
        }
    }
}
