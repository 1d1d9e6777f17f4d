use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::LayoutError;
use crate::generator::heuristics::Heuristics;
use crate::layout::Size;
use crate::render::colors;
use crate::tree::style::{ContainerStyle, Gutters, Padding};

/// Output canvas presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Uhd4k,
    Qhd1440,
    #[default]
    Fhd1080,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Uhd4k, Resolution::Qhd1440, Resolution::Fhd1080];

    pub fn size(self) -> Size {
        match self {
            Resolution::Uhd4k => Size::new(3840, 2160),
            Resolution::Qhd1440 => Size::new(2560, 1440),
            Resolution::Fhd1080 => Size::new(1920, 1080),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resolution::Uhd4k => "4k",
            Resolution::Qhd1440 => "1440p",
            Resolution::Fhd1080 => "1080p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a preset name: `4k`, `1440p` or `1080p`.
impl FromStr for Resolution {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Resolution::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| {
                LayoutError::invalid(
                    "resolution",
                    format!("unknown preset '{s}' (expected 4k, 1440p or 1080p)"),
                )
            })
    }
}

/// Everything the layout generator and populator need to know.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub canvas: Size,
    /// Upper bound for the randomly chosen nesting depth.
    pub max_nesting: u32,
    /// Jittered partitions tried per split.
    pub partition_trials: usize,
    /// Percent of the average share each sub-box may take.
    pub jitter_percent: RangeInclusive<u32>,
    pub root_capacity: RangeInclusive<usize>,
    pub root_style: ContainerStyle,
    pub child_style: ContainerStyle,
    pub frame_style: ContainerStyle,
    pub heuristics: Heuristics,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas: Resolution::default().size(),
            max_nesting: 2,
            partition_trials: 50,
            jitter_percent: 80..=120,
            root_capacity: 1..=3,
            root_style: ContainerStyle::new(Padding::SMALL, colors::WHITE, Gutters::SMALL),
            child_style: ContainerStyle::new(Padding::MEDIUM, colors::WHITE, Gutters::MEDIUM),
            frame_style: ContainerStyle::new(Padding::NONE, colors::FRAME_GRAY, Gutters::NONE),
            heuristics: Heuristics::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.canvas = resolution.size();
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.canvas.is_empty() {
            return Err(LayoutError::invalid("canvas", format!("{} must be positive", self.canvas)));
        }
        if self.max_nesting == 0 {
            return Err(LayoutError::invalid("max_nesting", "must be at least 1"));
        }
        if self.partition_trials == 0 {
            return Err(LayoutError::invalid("partition_trials", "must be at least 1"));
        }
        if self.jitter_percent.is_empty() {
            return Err(LayoutError::invalid("jitter_percent", "range is empty"));
        }
        if self.root_capacity.is_empty() || *self.root_capacity.start() == 0 {
            return Err(LayoutError::invalid("root_capacity", "must be a non-empty range starting at 1 or more"));
        }
        self.heuristics.validate()
    }
}
