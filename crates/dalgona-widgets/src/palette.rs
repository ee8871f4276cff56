//! Design-token colors.
//!
//! Ten hues with ten shades each, matching the web palette the design system
//! was drawn in. Every theme, status and variant color in this crate comes
//! from here; nothing else constructs `Color::Rgb` directly.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Gray,
    Red,
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
    Pink,
    Orange,
    Lime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
}

pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[rustfmt::skip]
const TABLE: [[u32; 10]; 10] = [
    // gray
    [0xf9fafb, 0xf3f4f6, 0xe5e7eb, 0xd1d5db, 0x9ca3af, 0x6b7280, 0x4b5563, 0x374151, 0x1f2937, 0x111827],
    // red
    [0xfef2f2, 0xfee2e2, 0xfecaca, 0xfca5a5, 0xf87171, 0xef4444, 0xdc2626, 0xb91c1c, 0x991b1b, 0x7f1d1d],
    // yellow
    [0xfefce8, 0xfef9c3, 0xfef08a, 0xfde047, 0xfacc15, 0xeab308, 0xca8a04, 0xa16207, 0x854d0e, 0x713f12],
    // green
    [0xf0fdf4, 0xdcfce7, 0xbbf7d0, 0x86efac, 0x4ade80, 0x22c55e, 0x16a34a, 0x15803d, 0x166534, 0x14532d],
    // blue
    [0xeff6ff, 0xdbeafe, 0xbfdbfe, 0x93c5fd, 0x60a5fa, 0x3b82f6, 0x2563eb, 0x1d4ed8, 0x1e40af, 0x1e3a8a],
    // indigo
    [0xeef2ff, 0xe0e7ff, 0xc7d2fe, 0xa5b4fc, 0x818cf8, 0x6366f1, 0x4f46e5, 0x4338ca, 0x3730a3, 0x312e81],
    // purple
    [0xfaf5ff, 0xf3e8ff, 0xe9d5ff, 0xd8b4fe, 0xc084fc, 0xa855f7, 0x9333ea, 0x7e22ce, 0x6b21a8, 0x581c87],
    // pink
    [0xfdf2f8, 0xfce7f3, 0xfbcfe8, 0xf9a8d4, 0xf472b6, 0xec4899, 0xdb2777, 0xbe185d, 0x9d174d, 0x831843],
    // orange
    [0xfff7ed, 0xffedd5, 0xfed7aa, 0xfdba74, 0xfb923c, 0xf97316, 0xea580c, 0xc2410c, 0x9a3412, 0x7c2d12],
    // lime
    [0xf7fee7, 0xecfccb, 0xd9f99d, 0xbef264, 0xa3e635, 0x84cc16, 0x65a30d, 0x4d7c0f, 0x3f6212, 0x365314],
];

impl Hue {
    pub const ALL: [Hue; 10] = [
        Hue::Gray,
        Hue::Red,
        Hue::Yellow,
        Hue::Green,
        Hue::Blue,
        Hue::Indigo,
        Hue::Purple,
        Hue::Pink,
        Hue::Orange,
        Hue::Lime,
    ];

    pub const fn shade(self, shade: Shade) -> Color {
        rgb(TABLE[self as usize][shade as usize])
    }
}

/// Shorthand for `hue.shade(shade)`.
pub const fn tone(hue: Hue, shade: Shade) -> Color {
    hue.shade(shade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens() {
        assert_eq!(Hue::Blue.shade(Shade::S500), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(Hue::Gray.shade(Shade::S200), Color::Rgb(0xe5, 0xe7, 0xeb));
        assert_eq!(tone(Hue::Red, Shade::S600), Color::Rgb(0xdc, 0x26, 0x26));
    }

    #[test]
    fn shades_darken_monotonically() {
        let luma = |c: Color| match c {
            Color::Rgb(r, g, b) => r as u32 * 299 + g as u32 * 587 + b as u32 * 114,
            _ => 0,
        };
        for hue in Hue::ALL {
            assert!(luma(hue.shade(Shade::S50)) > luma(hue.shade(Shade::S500)));
            assert!(luma(hue.shade(Shade::S500)) > luma(hue.shade(Shade::S900)));
        }
    }
}
