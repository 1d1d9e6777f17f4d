use std::fmt;

use crate::layout::Size;

/// Named aspect-ratio ranges (width / height, inclusive on both ends).
/// Ratios outside every range are too extreme to lay out and are left
/// unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AspectBucket {
    Square,
    Landscape,
    Portrait,
    UltraWide,
    UltraTall,
}

impl AspectBucket {
    pub const ALL: [AspectBucket; 5] = [
        AspectBucket::Square,
        AspectBucket::Landscape,
        AspectBucket::Portrait,
        AspectBucket::UltraWide,
        AspectBucket::UltraTall,
    ];

    pub fn range(self) -> (f64, f64) {
        match self {
            AspectBucket::Square => (0.751, 1.250),
            AspectBucket::Landscape => (1.251, 1.800),
            AspectBucket::Portrait => (0.561, 0.750),
            AspectBucket::UltraWide => (1.801, 3.000),
            AspectBucket::UltraTall => (0.333, 0.560),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectBucket::Square => "square",
            AspectBucket::Landscape => "landscape",
            AspectBucket::Portrait => "portrait",
            AspectBucket::UltraWide => "ultra-wide",
            AspectBucket::UltraTall => "ultra-tall",
        }
    }

    pub fn classify_ratio(ratio: f64) -> Option<AspectBucket> {
        Self::ALL.into_iter().find(|bucket| {
            let (low, high) = bucket.range();
            ratio >= low && ratio <= high
        })
    }

    pub fn classify(size: Size) -> Option<AspectBucket> {
        if size.is_empty() {
            return None;
        }
        Self::classify_ratio(size.aspect_ratio())
    }
}

impl fmt::Display for AspectBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
