use std::fmt;

use colored::{ColoredString, Colorize};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Text color, either one of the sixteen legacy colors or an arbitrary RGB value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Rgb(RGBColor),
}

impl Color {
    /// Parses a color name (`red`, `dark_gray`, `grey`) or a `#rrggbb` hex value.
    pub fn parse(input: &str) -> Option<Self> {
        if let Some(hex) = input.strip_prefix('#') {
            return RGBColor::from_hex(hex).map(Self::Rgb);
        }
        NamedColor::from_name(input).map(Self::Named)
    }

    pub fn rgb(&self) -> RGBColor {
        match self {
            Self::Named(named) => named.rgb(),
            Self::Rgb(rgb) => *rgb,
        }
    }

    /// The closest legacy color, exact for named colors.
    pub fn to_named(&self) -> NamedColor {
        match self {
            Self::Named(named) => *named,
            Self::Rgb(rgb) => rgb.nearest_named(),
        }
    }

    pub fn console_color(&self, text: &str) -> ColoredString {
        match self {
            Self::Named(color) => text.color(color.console_color()),
            Self::Rgb(color) => text.truecolor(color.red, color.green, color.blue),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(named.name()),
            Self::Rgb(rgb) => write!(f, "{rgb}"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid color `{raw}`")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RGBColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses six hex digits without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::new(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }

    /// Finds the legacy color with the smallest weighted RGB distance.
    pub fn nearest_named(&self) -> NamedColor {
        let mut best = NamedColor::White;
        let mut best_distance = u32::MAX;
        for named in NamedColor::ALL {
            let distance = self.distance(&named.rgb());
            if distance < best_distance {
                best = named;
                best_distance = distance;
            }
        }
        best
    }

    // Weights follow perceived luminance of each channel.
    fn distance(&self, other: &Self) -> u32 {
        let dr = i32::from(self.red) - i32::from(other.red);
        let dg = i32::from(self.green) - i32::from(other.green);
        let db = i32::from(self.blue) - i32::from(other.blue);
        (3 * dr * dr + 4 * dg * dg + 2 * db * db) as u32
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// The sixteen colors that have a legacy format code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }

    /// Accepts the canonical name and the `grey` spelling, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase().replace("grey", "gray");
        Self::ALL.into_iter().find(|color| color.name() == name)
    }

    /// The character following the section sign in the legacy format.
    pub const fn code(&self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|color| color.code() == code)
    }

    pub const fn rgb(&self) -> RGBColor {
        match self {
            Self::Black => RGBColor::new(0x00, 0x00, 0x00),
            Self::DarkBlue => RGBColor::new(0x00, 0x00, 0xAA),
            Self::DarkGreen => RGBColor::new(0x00, 0xAA, 0x00),
            Self::DarkAqua => RGBColor::new(0x00, 0xAA, 0xAA),
            Self::DarkRed => RGBColor::new(0xAA, 0x00, 0x00),
            Self::DarkPurple => RGBColor::new(0xAA, 0x00, 0xAA),
            Self::Gold => RGBColor::new(0xFF, 0xAA, 0x00),
            Self::Gray => RGBColor::new(0xAA, 0xAA, 0xAA),
            Self::DarkGray => RGBColor::new(0x55, 0x55, 0x55),
            Self::Blue => RGBColor::new(0x55, 0x55, 0xFF),
            Self::Green => RGBColor::new(0x55, 0xFF, 0x55),
            Self::Aqua => RGBColor::new(0x55, 0xFF, 0xFF),
            Self::Red => RGBColor::new(0xFF, 0x55, 0x55),
            Self::LightPurple => RGBColor::new(0xFF, 0x55, 0xFF),
            Self::Yellow => RGBColor::new(0xFF, 0xFF, 0x55),
            Self::White => RGBColor::new(0xFF, 0xFF, 0xFF),
        }
    }

    fn console_color(&self) -> colored::Color {
        match self {
            Self::Black => colored::Color::Black,
            Self::DarkBlue => colored::Color::Blue,
            Self::DarkGreen => colored::Color::Green,
            Self::DarkAqua => colored::Color::Cyan,
            Self::DarkRed => colored::Color::Red,
            Self::DarkPurple => colored::Color::Magenta,
            Self::Gold => colored::Color::Yellow,
            Self::Gray => colored::Color::White,
            Self::DarkGray => colored::Color::BrightBlack,
            Self::Blue => colored::Color::BrightBlue,
            Self::Green => colored::Color::BrightGreen,
            Self::Aqua => colored::Color::BrightCyan,
            Self::Red => colored::Color::BrightRed,
            Self::LightPurple => colored::Color::BrightMagenta,
            Self::Yellow => colored::Color::BrightYellow,
            Self::White => colored::Color::BrightWhite,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Color, NamedColor, RGBColor};

    #[test]
    fn parse_names_and_hex() {
        assert_eq!(Color::parse("red"), Some(Color::Named(NamedColor::Red)));
        assert_eq!(
            Color::parse("DARK_GREY"),
            Some(Color::Named(NamedColor::DarkGray))
        );
        assert_eq!(
            Color::parse("#ff8000"),
            Some(Color::Rgb(RGBColor::new(0xFF, 0x80, 0x00)))
        );
        assert_eq!(Color::parse("#ff80"), None);
        assert_eq!(Color::parse("rainbow"), None);
    }

    #[test]
    fn nearest_named_color() {
        assert_eq!(RGBColor::new(0xFE, 0x50, 0x50).nearest_named(), NamedColor::Red);
        assert_eq!(RGBColor::new(0x01, 0x01, 0x01).nearest_named(), NamedColor::Black);
        assert_eq!(NamedColor::Gold.rgb().nearest_named(), NamedColor::Gold);
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::Rgb(RGBColor::new(1, 2, 3))).unwrap();
        assert_eq!(json, "\"#010203\"");
        let named: Color = serde_json::from_str("\"light_purple\"").unwrap();
        assert_eq!(named, Color::Named(NamedColor::LightPurple));
    }
}
