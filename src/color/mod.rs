mod gradient;
mod utils;

pub use gradient::{fill_gradient_fp, fill_gradient_three_fp, heat_color};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, fade_to_black_by, hsv2rgb, mirror_half, rgb_from_u32, scale_color};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Preset colors selectable with the digit commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Red,
    Green,
    Blue,
    White,
    Cyan,
    Magenta,
    Yellow,
    Orange,
    Pink,
    Purple,
}

impl NamedColor {
    /// Map a digit command (`1`..`9`, `0`) to its preset
    pub const fn from_digit(digit: char) -> Option<Self> {
        Some(match digit {
            '1' => Self::Red,
            '2' => Self::Green,
            '3' => Self::Blue,
            '4' => Self::White,
            '5' => Self::Cyan,
            '6' => Self::Magenta,
            '7' => Self::Yellow,
            '8' => Self::Orange,
            '9' => Self::Pink,
            '0' => Self::Purple,
            _ => return None,
        })
    }

    #[allow(clippy::unreadable_literal)]
    pub const fn rgb(self) -> Rgb {
        rgb_from_u32(match self {
            Self::Red => 0xFF0000,
            Self::Green => 0x00FF00,
            Self::Blue => 0x0000FF,
            Self::White => 0xFFFFFF,
            Self::Cyan => 0x00FFFF,
            Self::Magenta => 0xFF00FF,
            Self::Yellow => 0xFFFF00,
            Self::Orange => 0xFFA500,
            Self::Pink => 0xFFC0CB,
            Self::Purple => 0x800080,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::White => "White",
            Self::Cyan => "Cyan",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Pink => "Pink",
            Self::Purple => "Purple",
        }
    }
}
