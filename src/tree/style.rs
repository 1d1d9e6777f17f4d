use std::str::FromStr;

use image::Rgb;

use crate::error::LayoutError;
use crate::layout::Size;

/// Below this, content is too small to be worth drawing.
pub const DEFAULT_MIN_CONTENT: Size = Size::new(50, 50);

/// Space between a container's edge and its drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const NONE: Padding = Padding::uniform(0);
    pub const SMALL: Padding = Padding::uniform(10);
    pub const MEDIUM: Padding = Padding::uniform(20);
    pub const LARGE: Padding = Padding::uniform(30);

    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// left + right
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Parses `top,right,bottom,left`.
impl FromStr for Padding {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [top, right, bottom, left] = parse_tuple::<4>("padding", s)?;
        Ok(Padding::new(top, right, bottom, left))
    }
}

/// Space between sibling items. Horizontal gutters separate items stacked
/// vertically; vertical gutters separate items side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gutters {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Gutters {
    pub const NONE: Gutters = Gutters::uniform(0);
    pub const SMALL: Gutters = Gutters::uniform(10);
    pub const MEDIUM: Gutters = Gutters::uniform(20);
    pub const LARGE: Gutters = Gutters::uniform(30);

    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value)
    }
}

/// Parses `horizontal,vertical`.
impl FromStr for Gutters {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [horizontal, vertical] = parse_tuple::<2>("gutters", s)?;
        Ok(Gutters::new(horizontal, vertical))
    }
}

/// Visual and sizing parameters shared by every container kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerStyle {
    pub padding: Padding,
    pub background: Rgb<u8>,
    pub gutters: Gutters,
    /// Smallest useful size for a leaf inside this container.
    pub min_content: Size,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            padding: Padding::NONE,
            background: Rgb([255, 255, 255]),
            gutters: Gutters::NONE,
            min_content: DEFAULT_MIN_CONTENT,
        }
    }
}

impl ContainerStyle {
    pub fn new(padding: Padding, background: Rgb<u8>, gutters: Gutters) -> Self {
        Self {
            padding,
            background,
            gutters,
            ..Self::default()
        }
    }

    pub fn with_min_content(mut self, min_content: Size) -> Self {
        self.min_content = min_content;
        self
    }

    /// Area left for children once padding is removed.
    pub fn drawable(&self, size: Size) -> Size {
        Size::new(
            size.width.saturating_sub(self.padding.horizontal()),
            size.height.saturating_sub(self.padding.vertical()),
        )
    }

    /// Minimum content never drops below the platform default.
    pub(crate) fn normalized(mut self) -> Self {
        self.min_content = self.min_content.max(DEFAULT_MIN_CONTENT);
        self
    }
}

/// Parse exactly `N` comma-separated non-negative integers.
pub(crate) fn parse_tuple<const N: usize>(field: &'static str, s: &str) -> Result<[u32; N], LayoutError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(LayoutError::invalid(
            field,
            format!("expected {N} comma-separated values, got {}", parts.len()),
        ));
    }

    let mut out = [0u32; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        let value: i64 = part
            .parse()
            .map_err(|_| LayoutError::invalid(field, format!("'{part}' is not an integer")))?;
        if value < 0 {
            return Err(LayoutError::invalid(field, format!("{value} is negative")));
        }
        *slot = u32::try_from(value)
            .map_err(|_| LayoutError::invalid(field, format!("{value} is too large")))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_parses_four_values() {
        assert_eq!("1, 2,3 ,4".parse::<Padding>().unwrap(), Padding::new(1, 2, 3, 4));
    }

    #[test]
    fn padding_rejects_wrong_arity_and_negatives() {
        assert!(matches!(
            "1,2,3".parse::<Padding>(),
            Err(LayoutError::Validation { field: "padding", .. })
        ));
        assert!("1,2,-3,4".parse::<Padding>().is_err());
        assert!("1,2,x,4".parse::<Padding>().is_err());
    }

    #[test]
    fn gutters_parse_two_values() {
        assert_eq!("10,20".parse::<Gutters>().unwrap(), Gutters::new(10, 20));
        assert!("10".parse::<Gutters>().is_err());
    }

    #[test]
    fn min_content_is_floored_at_default() {
        let style = ContainerStyle::default()
            .with_min_content(Size::new(10, 80))
            .normalized();
        assert_eq!(style.min_content, Size::new(50, 80));
    }

    #[test]
    fn drawable_saturates() {
        let style = ContainerStyle {
            padding: Padding::uniform(30),
            ..ContainerStyle::default()
        };
        assert_eq!(style.drawable(Size::new(100, 50)), Size::new(40, 0));
    }
}
