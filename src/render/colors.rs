use image::Rgb;

use crate::error::LayoutError;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// Mat color behind framed photos.
pub const FRAME_GRAY: Rgb<u8> = Rgb([235, 235, 235]);

const NAMED: [(&str, Rgb<u8>); 21] = [
    ("white", WHITE),
    ("black", BLACK),
    ("frame", FRAME_GRAY),
    ("red", Rgb([255, 0, 0])),
    ("orange", Rgb([255, 165, 0])),
    ("yellow", Rgb([255, 255, 0])),
    ("green", Rgb([0, 128, 0])),
    ("blue", Rgb([0, 0, 255])),
    ("purple", Rgb([128, 0, 128])),
    ("pink", Rgb([255, 192, 203])),
    ("brown", Rgb([165, 42, 42])),
    ("gray", Rgb([128, 128, 128])),
    ("maroon", Rgb([128, 0, 0])),
    ("olive", Rgb([128, 128, 0])),
    ("teal", Rgb([0, 128, 128])),
    ("navy", Rgb([0, 0, 128])),
    ("aqua", Rgb([0, 255, 255])),
    ("fuchsia", Rgb([255, 0, 255])),
    ("lime", Rgb([0, 255, 0])),
    ("silver", Rgb([192, 192, 192])),
    ("gold", Rgb([255, 215, 0])),
];

/// Look up a palette entry by (case-insensitive) name.
pub fn named(name: &str) -> Option<Rgb<u8>> {
    let name = name.trim().to_ascii_lowercase();
    NAMED.iter().find(|(n, _)| *n == name).map(|&(_, color)| color)
}

/// Accepts a palette name, or `r,g,b` with each channel in 0..=255.
pub fn parse_color(s: &str) -> Result<Rgb<u8>, LayoutError> {
    if let Some(color) = named(s) {
        return Ok(color);
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(LayoutError::invalid(
            "background",
            format!("'{s}' is neither a color name nor r,g,b"),
        ));
    }
    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        let value: i64 = part
            .parse()
            .map_err(|_| LayoutError::invalid("background", format!("'{part}' is not an integer")))?;
        *channel = u8::try_from(value)
            .map_err(|_| LayoutError::invalid("background", format!("{value} is outside 0..=255")))?;
    }
    Ok(Rgb(channels))
}
