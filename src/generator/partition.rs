//! Random division of a drawable box into sub-boxes for nested containers.

use std::ops::RangeInclusive;

use rand::Rng;

use super::heuristics::Heuristics;
use crate::layout::{LayoutKind, Size};

/// A sub-box and the container kinds big enough to occupy it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedBox {
    pub size: Size,
    pub eligible: Vec<LayoutKind>,
}

/// Split `parent` into `count` boxes. Every box but the last takes the
/// average share scaled by a random percentage from `jitter`; the last box
/// takes whatever is left, so the boxes sum to `parent` on both axes unless
/// the jittered boxes overshoot, in which case the last one is clamped at zero.
pub fn jitter_partition<R: Rng + ?Sized>(
    parent: Size,
    count: usize,
    jitter: &RangeInclusive<u32>,
    rng: &mut R,
) -> Vec<Size> {
    if count == 0 {
        return Vec::new();
    }
    let share_w = parent.width / count as u32;
    let share_h = parent.height / count as u32;
    let scale = |share: u32, percent: u32| (share as u64 * percent as u64 / 100) as u32;

    let mut remaining = parent;
    let mut boxes = Vec::with_capacity(count);
    for _ in 1..count {
        let w = scale(share_w, rng.gen_range(jitter.clone()));
        let h = scale(share_h, rng.gen_range(jitter.clone()));
        remaining = Size::new(remaining.width.saturating_sub(w), remaining.height.saturating_sub(h));
        boxes.push(Size::new(w, h));
    }
    boxes.push(remaining);
    boxes
}

/// Parent extent left uncovered by `boxes`, counting width and height
/// shortfalls additively rather than as an area.
pub fn unused_space(parent: Size, boxes: &[ProposedBox]) -> i64 {
    let (sum_w, sum_h) = boxes
        .iter()
        .fold((0i64, 0i64), |(w, h), b| (w + b.size.width as i64, h + b.size.height as i64));
    (parent.width as i64 - sum_w) + (parent.height as i64 - sum_h)
}

/// Best of `trials` jittered partitions of `parent`: boxes too small for
/// every container kind are dropped, and the trial leaving the least unused
/// space wins. Ties keep the earliest trial. An empty result means nothing
/// eligible fit.
pub fn best_partition<R: Rng + ?Sized>(
    parent: Size,
    count: usize,
    root_drawable: Size,
    heuristics: &Heuristics,
    trials: usize,
    jitter: &RangeInclusive<u32>,
    rng: &mut R,
) -> Vec<ProposedBox> {
    let mut best = Vec::new();
    let mut lowest = root_drawable.width as i64 + root_drawable.height as i64;

    for _ in 0..trials {
        let candidate: Vec<ProposedBox> = jitter_partition(parent, count, jitter, rng)
            .into_iter()
            .filter_map(|size| {
                let eligible = heuristics.eligible(size, root_drawable);
                (!eligible.is_empty()).then_some(ProposedBox { size, eligible })
            })
            .collect();

        let unused = unused_space(parent, &candidate);
        if unused < lowest {
            lowest = unused;
            best = candidate;
        }
    }

    tracing::trace!("Partition of {} into {}: {} boxes, unused {}", parent, count, best.len(), lowest);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn partition_covers_parent_exactly() {
        let mut rng = StdRng::seed_from_u64(11);
        let parent = Size::new(1860, 1020);
        for count in 1..=3 {
            for _ in 0..20 {
                let boxes = jitter_partition(parent, count, &(80..=120), &mut rng);
                assert_eq!(boxes.len(), count);
                let w: u32 = boxes.iter().map(|b| b.width).sum();
                let h: u32 = boxes.iter().map(|b| b.height).sum();
                // With at most 3 boxes the jittered ones never overshoot.
                assert_eq!((w, h), (parent.width, parent.height));
            }
        }
    }

    #[test]
    fn jittered_boxes_stay_within_percent_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let boxes = jitter_partition(Size::new(1000, 600), 2, &(80..=120), &mut rng);
        assert!((400..=600).contains(&boxes[0].width));
        assert!((240..=360).contains(&boxes[0].height));
    }

    #[test]
    fn fixed_jitter_gives_even_split() {
        let mut rng = StdRng::seed_from_u64(0);
        let boxes = jitter_partition(Size::new(301, 100), 3, &(100..=100), &mut rng);
        assert_eq!(boxes, vec![Size::new(100, 33), Size::new(100, 33), Size::new(101, 34)]);
    }

    #[test]
    fn unused_space_adds_both_axes() {
        let boxes = [
            ProposedBox {
                size: Size::new(300, 200),
                eligible: vec![LayoutKind::Vertical],
            },
            ProposedBox {
                size: Size::new(500, 100),
                eligible: vec![LayoutKind::Vertical],
            },
        ];
        assert_eq!(unused_space(Size::new(1000, 400), &boxes), 200 + 100);
        assert_eq!(unused_space(Size::new(1000, 400), &[]), 1400);
    }

    #[test]
    fn best_partition_keeps_only_eligible_boxes() {
        let heuristics = Heuristics::default();
        let root = Size::new(1900, 1060);
        let mut rng = StdRng::seed_from_u64(42);
        for count in 2..=3 {
            let boxes = best_partition(root, count, root, &heuristics, 50, &(80..=120), &mut rng);
            assert!(boxes.len() <= count);
            for b in &boxes {
                assert!(!b.eligible.is_empty());
                assert_eq!(b.eligible, heuristics.eligible(b.size, root));
            }
        }
    }

    #[test]
    fn ties_keep_the_first_trial() {
        let heuristics = Heuristics::default();
        let root = Size::new(1900, 1060);
        let expected = jitter_partition(root, 2, &(80..=120), &mut StdRng::seed_from_u64(8));

        // Two eligible boxes always cover the parent, so every trial ties at zero.
        let mut rng = StdRng::seed_from_u64(8);
        let boxes = best_partition(root, 2, root, &heuristics, 50, &(80..=120), &mut rng);
        let sizes: Vec<Size> = boxes.iter().map(|b| b.size).collect();
        assert_eq!(sizes, expected);
        assert_eq!(unused_space(root, &boxes), 0);
    }

    #[test]
    fn fixed_jitter_result_does_not_depend_on_trial_count() {
        let heuristics = Heuristics::default();
        let root = Size::new(1900, 1060);
        let parent = Size::new(1500, 900);
        let run = |trials| {
            let mut rng = StdRng::seed_from_u64(3);
            best_partition(parent, 3, root, &heuristics, trials, &(100..=100), &mut rng)
        };

        let once = run(1);
        assert_eq!(run(50), once);
        let sizes: Vec<Size> = once.iter().map(|b| b.size).collect();
        assert_eq!(sizes, vec![Size::new(500, 300); 3]);
        // No trial at all never beats the starting value.
        assert!(run(0).is_empty());
    }

    #[test]
    fn too_small_parent_yields_nothing() {
        let heuristics = Heuristics::default();
        let root = Size::new(1900, 1060);
        let mut rng = StdRng::seed_from_u64(1);
        let boxes = best_partition(Size::new(400, 200), 2, root, &heuristics, 50, &(80..=120), &mut rng);
        assert!(boxes.is_empty());
    }
}
