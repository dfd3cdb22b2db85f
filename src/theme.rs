//! Static styling tables used by the preview renderer.
//!
//! Each palette resolves to concrete sRGB values.  The keys (`corporate`,
//! `serif`, `large`, ...) are what the command line accepts.

use std::fmt;
use std::str::FromStr;

use image::Rgb;

/// An sRGB colour.
pub type Color = Rgb<u8>;

const fn hex(value: u32) -> Color {
    Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

pub const WHITE: Color = hex(0xffffff);
pub const GRAY_500: Color = hex(0x6b7280);
pub const GRAY_600: Color = hex(0x4b5563);
pub const GRAY_700: Color = hex(0x374151);
pub const GRAY_800: Color = hex(0x1f2937);
pub const GRAY_900: Color = hex(0x111827);

/// Concrete colours of a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColors {
    /// Section headings.
    pub primary: Color,
    /// Company, institution, issuer and link labels.
    pub secondary: Color,
    pub badge_fill: Color,
    pub badge_border: Color,
    pub badge_text: Color,
    /// Header gradient, top-left corner.
    pub header_from: Color,
    /// Header gradient, bottom-right corner.
    pub header_to: Color,
    /// Bar drawn left of each section heading.
    pub section_bar: Color,
}

/// Colour palettes offered for the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Palette {
    #[default]
    Corporate,
    Executive,
    Modern,
    Professional,
    Creative,
    Elegant,
}

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::Corporate,
        Palette::Executive,
        Palette::Modern,
        Palette::Professional,
        Palette::Creative,
        Palette::Elegant,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Executive => "executive",
            Self::Modern => "modern",
            Self::Professional => "professional",
            Self::Creative => "creative",
            Self::Elegant => "elegant",
        }
    }

    /// Human-readable palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Corporate => "Corporate Blue",
            Self::Executive => "Executive Gray",
            Self::Modern => "Modern Teal",
            Self::Professional => "Professional Navy",
            Self::Creative => "Creative Purple",
            Self::Elegant => "Elegant Green",
        }
    }

    pub fn colors(self) -> PaletteColors {
        match self {
            Self::Corporate => PaletteColors {
                primary: hex(0x1e40af),
                secondary: hex(0x2563eb),
                badge_fill: hex(0xdbeafe),
                badge_border: hex(0xbfdbfe),
                badge_text: hex(0x1e40af),
                header_from: hex(0x2563eb),
                header_to: hex(0x1e40af),
                section_bar: hex(0x3b82f6),
            },
            Self::Executive => PaletteColors {
                primary: GRAY_900,
                secondary: GRAY_700,
                badge_fill: hex(0xf3f4f6),
                badge_border: hex(0xe5e7eb),
                badge_text: GRAY_800,
                header_from: GRAY_700,
                header_to: GRAY_900,
                section_bar: GRAY_500,
            },
            Self::Modern => PaletteColors {
                primary: hex(0x115e59),
                secondary: hex(0x0d9488),
                badge_fill: hex(0xccfbf1),
                badge_border: hex(0x99f6e4),
                badge_text: hex(0x115e59),
                header_from: hex(0x0d9488),
                header_to: hex(0x115e59),
                section_bar: hex(0x14b8a6),
            },
            Self::Professional => PaletteColors {
                primary: hex(0x0f172a),
                secondary: hex(0x334155),
                badge_fill: hex(0xf1f5f9),
                badge_border: hex(0xe2e8f0),
                badge_text: hex(0x1e293b),
                header_from: hex(0x334155),
                header_to: hex(0x0f172a),
                section_bar: hex(0x64748b),
            },
            Self::Creative => PaletteColors {
                primary: hex(0x6b21a8),
                secondary: hex(0x9333ea),
                badge_fill: hex(0xf3e8ff),
                badge_border: hex(0xe9d5ff),
                badge_text: hex(0x6b21a8),
                header_from: hex(0x9333ea),
                header_to: hex(0x6b21a8),
                section_bar: hex(0xa855f7),
            },
            Self::Elegant => PaletteColors {
                primary: hex(0x065f46),
                secondary: hex(0x059669),
                badge_fill: hex(0xd1fae5),
                badge_border: hex(0xa7f3d0),
                badge_text: hex(0x065f46),
                header_from: hex(0x059669),
                header_to: hex(0x065f46),
                section_bar: hex(0x10b981),
            },
        }
    }
}

/// Typeface families offered for the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontChoice {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontChoice {
    pub const ALL: [FontChoice; 3] = [FontChoice::Sans, FontChoice::Serif, FontChoice::Mono];

    pub fn key(self) -> &'static str {
        match self {
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
        }
    }

    /// Family name the choice stands for.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sans => "Inter",
            Self::Serif => "Times New Roman",
            Self::Mono => "JetBrains Mono",
        }
    }
}

/// Base text sizes offered for the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn key(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Body text size in CSS pixels.
    pub fn base_px(self) -> f32 {
        match self {
            Self::Small => 14.0,
            Self::Medium => 16.0,
            Self::Large => 18.0,
        }
    }
}

/// Complete styling selection for a preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Theme {
    pub palette: Palette,
    pub font: FontChoice,
    pub size: FontSize,
}

impl Theme {
    pub fn new(palette: Palette, font: FontChoice, size: FontSize) -> Self {
        Self {
            palette,
            font,
            size,
        }
    }
}

/// Error returned when parsing an unknown theme key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseThemeError {
    kind: &'static str,
    input: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.input)
    }
}

impl std::error::Error for ParseThemeError {}

macro_rules! keyed_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ParseThemeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|value| value.key() == needle)
                    .ok_or_else(|| ParseThemeError {
                        kind: $kind,
                        input: s.to_owned(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

keyed_enum!(Palette, "palette");
keyed_enum!(FontChoice, "font");
keyed_enum!(FontSize, "font size");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for palette in Palette::ALL {
            assert_eq!(palette.key().parse::<Palette>(), Ok(palette));
        }
        assert_eq!("Serif".parse::<FontChoice>(), Ok(FontChoice::Serif));
        assert_eq!(" large ".parse::<FontSize>(), Ok(FontSize::Large));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = "neon".parse::<Palette>().unwrap_err();
        assert_eq!(err.to_string(), "unknown palette 'neon'");
    }

    #[test]
    fn hex_colors_decode_channels() {
        assert_eq!(Palette::Corporate.colors().primary, Rgb([0x1e, 0x40, 0xaf]));
        assert_eq!(WHITE, Rgb([255, 255, 255]));
    }

    #[test]
    fn default_theme_matches_initial_selection() {
        let theme = Theme::default();
        assert_eq!(theme.palette, Palette::Corporate);
        assert_eq!(theme.font, FontChoice::Sans);
        assert_eq!(theme.size.base_px(), 16.0);
    }
}
