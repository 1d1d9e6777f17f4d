use std::ops::RangeInclusive;

use crate::catalog::AspectBucket;
use crate::error::LayoutError;
use crate::layout::{LayoutKind, Size};

/// How many items a generated container of this kind holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotShape {
    /// Row or column capacity.
    Linear { capacity: RangeInclusive<usize> },
    Grid {
        rows: RangeInclusive<u32>,
        columns: RangeInclusive<u32>,
    },
}

/// Rules the generator and populator follow for one container kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutHeuristic {
    pub kind: LayoutKind,
    /// A proposed box must be at least this share of the root drawable width.
    pub min_width_fraction: f64,
    pub min_height_fraction: f64,
    /// How many nested containers to generate inside one of these.
    pub child_containers: RangeInclusive<usize>,
    pub slots: SlotShape,
    /// Aspect buckets to try, best first, when filling a slot with an image.
    pub preference: Vec<AspectBucket>,
}

impl LayoutHeuristic {
    pub fn horizontal() -> Self {
        Self {
            kind: LayoutKind::Horizontal,
            min_width_fraction: 0.25,
            min_height_fraction: 0.25,
            child_containers: 2..=3,
            slots: SlotShape::Linear { capacity: 1..=3 },
            preference: vec![
                AspectBucket::Portrait,
                AspectBucket::Square,
                AspectBucket::UltraWide,
                AspectBucket::Landscape,
                AspectBucket::UltraTall,
            ],
        }
    }

    pub fn vertical() -> Self {
        Self {
            kind: LayoutKind::Vertical,
            min_width_fraction: 0.25,
            min_height_fraction: 0.25,
            child_containers: 2..=3,
            slots: SlotShape::Linear { capacity: 1..=3 },
            preference: vec![
                AspectBucket::Landscape,
                AspectBucket::Square,
                AspectBucket::UltraTall,
                AspectBucket::Portrait,
                AspectBucket::UltraWide,
            ],
        }
    }

    pub fn grid() -> Self {
        Self {
            kind: LayoutKind::Grid,
            min_width_fraction: 0.3,
            min_height_fraction: 0.3,
            child_containers: 0..=0,
            slots: SlotShape::Grid {
                rows: 2..=3,
                columns: 2..=3,
            },
            preference: vec![AspectBucket::Square, AspectBucket::Landscape, AspectBucket::Portrait],
        }
    }

    /// Whether a box of `proposed` is big enough for this kind, measured
    /// against the root container's drawable area.
    pub fn is_eligible(&self, proposed: Size, root_drawable: Size) -> bool {
        proposed.width as f64 >= root_drawable.width as f64 * self.min_width_fraction
            && proposed.height as f64 >= root_drawable.height as f64 * self.min_height_fraction
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let fractions = [self.min_width_fraction, self.min_height_fraction];
        if fractions.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(LayoutError::invalid(
                "heuristic",
                format!("{} minimum fractions must be within 0..=1", self.kind.name()),
            ));
        }
        if self.child_containers.is_empty() {
            return Err(LayoutError::invalid(
                "heuristic",
                format!("{} child container range is empty", self.kind.name()),
            ));
        }
        let slots_ok = match &self.slots {
            SlotShape::Linear { capacity } => !capacity.is_empty() && *capacity.start() >= 1,
            SlotShape::Grid { rows, columns } => {
                !rows.is_empty() && !columns.is_empty() && *rows.start() >= 1 && *columns.start() >= 1
            }
        };
        if !slots_ok {
            return Err(LayoutError::invalid(
                "heuristic",
                format!("{} slot ranges must be non-empty and start at 1 or more", self.kind.name()),
            ));
        }
        Ok(())
    }
}

/// One heuristic per generated container kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Heuristics {
    pub horizontal: LayoutHeuristic,
    pub vertical: LayoutHeuristic,
    pub grid: LayoutHeuristic,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            horizontal: LayoutHeuristic::horizontal(),
            vertical: LayoutHeuristic::vertical(),
            grid: LayoutHeuristic::grid(),
        }
    }
}

impl Heuristics {
    pub fn get(&self, kind: LayoutKind) -> &LayoutHeuristic {
        match kind {
            LayoutKind::Horizontal => &self.horizontal,
            LayoutKind::Vertical => &self.vertical,
            LayoutKind::Grid => &self.grid,
        }
    }

    /// Kinds whose minimum fractions `proposed` satisfies, in
    /// [`LayoutKind::ALL`] order.
    pub fn eligible(&self, proposed: Size, root_drawable: Size) -> Vec<LayoutKind> {
        LayoutKind::ALL
            .into_iter()
            .filter(|&kind| self.get(kind).is_eligible(proposed, root_drawable))
            .collect()
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for kind in LayoutKind::ALL {
            let heuristic = self.get(kind);
            if heuristic.kind != kind {
                return Err(LayoutError::invalid(
                    "heuristic",
                    format!("{} slot holds a {} heuristic", kind.name(), heuristic.kind.name()),
                ));
            }
            let shape_matches = matches!(
                (kind, &heuristic.slots),
                (LayoutKind::Grid, SlotShape::Grid { .. })
                    | (LayoutKind::Horizontal | LayoutKind::Vertical, SlotShape::Linear { .. })
            );
            if !shape_matches {
                return Err(LayoutError::invalid(
                    "heuristic",
                    format!("{} containers cannot use {:?} slots", kind.name(), heuristic.slots),
                ));
            }
            heuristic.validate()?;
        }
        Ok(())
    }
}
