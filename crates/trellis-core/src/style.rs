#![forbid(unsafe_code)]

//! Colors and cell styles.
//!
//! A [`Style`] is a foreground, a background, and an attribute set - the
//! full extent of styling this runtime knows about. Conversion to crossterm
//! types happens here so the backend types stay at the boundary.

use bitflags::bitflags;
use crossterm::style as cts;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default for the channel (foreground or background).
    #[default]
    Reset,
    /// ANSI color 0.
    Black,
    /// ANSI color 1.
    Red,
    /// ANSI color 2.
    Green,
    /// ANSI color 3.
    Yellow,
    /// ANSI color 4.
    Blue,
    /// ANSI color 5.
    Magenta,
    /// ANSI color 6.
    Cyan,
    /// ANSI color 7.
    White,
    /// ANSI color 8 (bright black).
    BrightBlack,
    /// ANSI color 9.
    BrightRed,
    /// ANSI color 10.
    BrightGreen,
    /// ANSI color 11.
    BrightYellow,
    /// ANSI color 12.
    BrightBlue,
    /// ANSI color 13.
    BrightMagenta,
    /// ANSI color 14.
    BrightCyan,
    /// ANSI color 15.
    BrightWhite,
    /// 256-palette index.
    Indexed(u8),
    /// 24-bit RGB.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color specification as used by inline style markup.
    ///
    /// Accepts `-` (reset), the sixteen ANSI color names (`red`,
    /// `bright-red`, ...; `gray`/`grey` alias bright black), and `#rrggbb`
    /// hex triplets. Returns `None` for anything else.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        if spec == "-" {
            return Some(Self::Reset);
        }
        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        match spec {
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            "gray" | "grey" | "bright-black" => Some(Self::BrightBlack),
            "bright-red" => Some(Self::BrightRed),
            "bright-green" => Some(Self::BrightGreen),
            "bright-yellow" => Some(Self::BrightYellow),
            "bright-blue" => Some(Self::BrightBlue),
            "bright-magenta" => Some(Self::BrightMagenta),
            "bright-cyan" => Some(Self::BrightCyan),
            "bright-white" => Some(Self::BrightWhite),
            _ => None,
        }
    }

    /// Convert to the crossterm color type.
    #[must_use]
    pub const fn to_crossterm(self) -> cts::Color {
        match self {
            Self::Reset => cts::Color::Reset,
            Self::Black => cts::Color::Black,
            Self::Red => cts::Color::DarkRed,
            Self::Green => cts::Color::DarkGreen,
            Self::Yellow => cts::Color::DarkYellow,
            Self::Blue => cts::Color::DarkBlue,
            Self::Magenta => cts::Color::DarkMagenta,
            Self::Cyan => cts::Color::DarkCyan,
            Self::White => cts::Color::Grey,
            Self::BrightBlack => cts::Color::DarkGrey,
            Self::BrightRed => cts::Color::Red,
            Self::BrightGreen => cts::Color::Green,
            Self::BrightYellow => cts::Color::Yellow,
            Self::BrightBlue => cts::Color::Blue,
            Self::BrightMagenta => cts::Color::Magenta,
            Self::BrightCyan => cts::Color::Cyan,
            Self::BrightWhite => cts::Color::White,
            Self::Indexed(n) => cts::Color::AnsiValue(n),
            Self::Rgb(r, g, b) => cts::Color::Rgb { r, g, b },
        }
    }
}

bitflags! {
    /// Text attributes applied alongside colors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u8 {
        /// No attributes.
        const NONE          = 0b0000_0000;
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic.
        const ITALIC        = 0b0000_0100;
        /// Underline.
        const UNDERLINE     = 0b0000_1000;
        /// Reverse video.
        const REVERSE       = 0b0001_0000;
        /// Strikethrough.
        const STRIKETHROUGH = 0b0010_0000;
    }
}

impl Default for AttrFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// A cell style: foreground, background, attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attribute set.
    pub attrs: AttrFlags,
}

impl Style {
    /// The default style (both channels reset, no attributes).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: AttrFlags::NONE,
        }
    }

    /// Set the foreground.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Set the background.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Add bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.attrs = self.attrs.union(AttrFlags::BOLD);
        self
    }

    /// Add dim.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.attrs = self.attrs.union(AttrFlags::DIM);
        self
    }

    /// Add underline.
    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.attrs = self.attrs.union(AttrFlags::UNDERLINE);
        self
    }

    /// Add reverse video.
    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.attrs = self.attrs.union(AttrFlags::REVERSE);
        self
    }

    /// Overlay `other` on this style: non-reset channels and all attributes
    /// of `other` win.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: if matches!(other.fg, Color::Reset) {
                self.fg
            } else {
                other.fg
            },
            bg: if matches!(other.bg, Color::Reset) {
                self.bg
            } else {
                other.bg
            },
            attrs: self.attrs | other.attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_colors() {
        assert_eq!(Color::parse("red"), Some(Color::Red));
        assert_eq!(Color::parse("bright-cyan"), Some(Color::BrightCyan));
        assert_eq!(Color::parse("grey"), Some(Color::BrightBlack));
        assert_eq!(Color::parse("-"), Some(Color::Reset));
        assert_eq!(Color::parse("chartreuse"), None);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Color::parse("#FFFFFF"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Color::parse("#fff"), None);
        assert_eq!(Color::parse("#gggggg"), None);
    }

    #[test]
    fn builder_composes() {
        let style = Style::new().fg(Color::Red).bg(Color::Black).bold();
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Black);
        assert!(style.attrs.contains(AttrFlags::BOLD));
        assert!(!style.attrs.contains(AttrFlags::DIM));
    }

    #[test]
    fn patch_keeps_reset_channels() {
        let base = Style::new().fg(Color::Red).bg(Color::Blue);
        let overlay = Style::new().fg(Color::Green);
        let patched = base.patch(overlay);
        assert_eq!(patched.fg, Color::Green);
        assert_eq!(patched.bg, Color::Blue);
    }

    #[test]
    fn crossterm_mapping_distinguishes_intensity() {
        assert_eq!(Color::Red.to_crossterm(), cts::Color::DarkRed);
        assert_eq!(Color::BrightRed.to_crossterm(), cts::Color::Red);
        assert_eq!(
            Color::Rgb(1, 2, 3).to_crossterm(),
            cts::Color::Rgb { r: 1, g: 2, b: 3 }
        );
        assert_eq!(Color::Indexed(42).to_crossterm(), cts::Color::AnsiValue(42));
    }
}
