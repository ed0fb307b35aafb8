use serde::{Deserialize, Serialize};

/// A colour, expressed in RGB, CMYK or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f64, g: f64, b: f64 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f64, m: f64, y: f64, k: f64 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f64 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f64, g: f64, b: f64) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f64, m: f64, y: f64, k: f64) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f64) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a `#rrggbb` or `#rgb` colour token. The leading `#` is optional.
    pub fn from_hex(token: &str) -> Option<Colour> {
        let hex = token.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Colour::new_rgb_bytes(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                Some(Colour::new_rgb_bytes(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => None,
        }
    }

    /// Convert to RGB components in the 0.0 to 1.0 range
    pub fn to_rgb(&self) -> (f64, f64, f64) {
        match *self {
            Colour::RGB { r, g, b } => (r, g, b),
            Colour::CMYK { c, m, y, k } => (
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            ),
            Colour::Grey { g } => (g, g, g),
        }
    }
}

/// Converts a colour into the three RGB components written in `/C` entries
pub trait ColorFormatter {
    fn rgb_components(&self, colour: &Colour) -> [f32; 3];
}

/// RGB components clamped to the 0.0 to 1.0 range
#[derive(Debug, Default, Copy, Clone)]
pub struct RgbComponents;

impl ColorFormatter for RgbComponents {
    fn rgb_components(&self, colour: &Colour) -> [f32; 3] {
        let (r, g, b) = colour.to_rgb();
        [r, g, b].map(|c| c.clamp(0.0, 1.0) as f32)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
}
