//! Colour tags used to match balls to pedestals and to scope signals

use serde::{Deserialize, Serialize};

/// Colour tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dye {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl Dye {
    pub const ALL: [Dye; 6] = [
        Dye::Red,
        Dye::Green,
        Dye::Blue,
        Dye::Yellow,
        Dye::Purple,
        Dye::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dye::Red => "Red",
            Dye::Green => "Green",
            Dye::Blue => "Blue",
            Dye::Yellow => "Yellow",
            Dye::Purple => "Purple",
            Dye::Orange => "Orange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Dye::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }

    /// Display colour (linear RGBA) for the render layer
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            Dye::Red => [0.9, 0.15, 0.15, 1.0],
            Dye::Green => [0.2, 0.8, 0.25, 1.0],
            Dye::Blue => [0.2, 0.4, 0.95, 1.0],
            Dye::Yellow => [0.95, 0.85, 0.1, 1.0],
            Dye::Purple => [0.6, 0.25, 0.85, 1.0],
            Dye::Orange => [1.0, 0.55, 0.1, 1.0],
        }
    }
}
