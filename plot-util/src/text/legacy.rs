//! The legacy string format: a marker character (normally the section sign)
//! followed by a single code character, e.g. `§c§lHello`.

use std::str::Chars;

use super::{
    color::{Color, NamedColor, RGBColor},
    style::{Decoration, Style},
    TextComponent,
};
use crate::LEGACY_SECTION_CHAR;

/// Every code character understood by [`translate_alternate_color_codes`].
const ALL_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Renders components into legacy strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacySerializer {
    marker: char,
    hex_colors: bool,
}

impl Default for LegacySerializer {
    fn default() -> Self {
        Self::section()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Format {
    color: Option<Color>,
    decorations: Vec<Decoration>,
}

impl LegacySerializer {
    /// Section sign marker, hex colors downsampled to the nearest named color.
    pub const fn section() -> Self {
        Self {
            marker: LEGACY_SECTION_CHAR,
            hex_colors: false,
        }
    }

    /// Emit RGB colors as `§x§r§r§g§g§b§b` instead of downsampling them.
    pub const fn hex_colors(mut self, hex_colors: bool) -> Self {
        self.hex_colors = hex_colors;
        self
    }

    fn format_of(&self, style: &Style) -> Format {
        let color = style.color.map(|color| match color {
            Color::Rgb(_) if !self.hex_colors => Color::Named(color.to_named()),
            color => color,
        });
        Format {
            color,
            decorations: style.active_decorations().collect(),
        }
    }

    fn push_code(&self, out: &mut String, code: char) {
        out.push(self.marker);
        out.push(code);
    }

    fn push_color(&self, out: &mut String, color: &Color) {
        match color {
            Color::Named(named) => self.push_code(out, named.code()),
            Color::Rgb(rgb) => {
                self.push_code(out, 'x');
                for digit in rgb.to_string().chars().skip(1) {
                    self.push_code(out, digit);
                }
            }
        }
    }

    fn push_full(&self, out: &mut String, format: &Format) {
        if let Some(color) = &format.color {
            self.push_color(out, color);
        }
        for decoration in &format.decorations {
            self.push_code(out, decoration.code());
        }
    }

    pub fn serialize(&self, component: &TextComponent) -> String {
        let mut out = String::new();
        let mut current = Format::default();

        for (text, style) in component.runs() {
            let target = self.format_of(&style);
            if target != current {
                let dropped = current
                    .decorations
                    .iter()
                    .any(|decoration| !target.decorations.contains(decoration));
                if target.color.is_some() && target.color != current.color {
                    // A color code clears every decoration on the client.
                    self.push_full(&mut out, &target);
                } else if dropped || target.color != current.color {
                    self.push_code(&mut out, 'r');
                    self.push_full(&mut out, &target);
                } else {
                    for decoration in &target.decorations {
                        if !current.decorations.contains(decoration) {
                            self.push_code(&mut out, decoration.code());
                        }
                    }
                }
                current = target;
            }
            out.push_str(text);
        }
        out
    }

    /// Splits a legacy string back into styled runs. Unknown codes are kept as
    /// literal text.
    pub fn deserialize(&self, input: &str) -> TextComponent {
        let mut root = TextComponent::empty();
        let mut style = Style::default();
        let mut buffer = String::new();
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            if c != self.marker {
                buffer.push(c);
                continue;
            }
            let mut lookahead = chars.clone();
            let Some(code) = lookahead.next() else {
                buffer.push(c);
                continue;
            };

            let next_style = if code.eq_ignore_ascii_case(&'x') {
                self.read_hex(&mut lookahead).map(|rgb| Style {
                    color: Some(Color::Rgb(rgb)),
                    ..Style::default()
                })
            } else if let Some(named) = NamedColor::from_code(code) {
                Some(Style {
                    color: Some(Color::Named(named)),
                    ..Style::default()
                })
            } else if let Some(decoration) = Decoration::from_code(code) {
                let mut decorated = style.clone();
                decorated.set_decoration(decoration, Some(true));
                Some(decorated)
            } else if code.eq_ignore_ascii_case(&'r') {
                Some(Style::default())
            } else {
                None
            };

            match next_style {
                Some(next_style) => {
                    if !buffer.is_empty() {
                        root = root
                            .add_child(TextComponent::styled(std::mem::take(&mut buffer), style));
                    }
                    style = next_style;
                    chars = lookahead;
                }
                None => buffer.push(c),
            }
        }
        if !buffer.is_empty() {
            root = root.add_child(TextComponent::styled(buffer, style));
        }
        root
    }

    fn read_hex(&self, chars: &mut Chars<'_>) -> Option<RGBColor> {
        let mut hex = String::with_capacity(6);
        for _ in 0..6 {
            if chars.next()? != self.marker {
                return None;
            }
            hex.push(chars.next()?);
        }
        RGBColor::from_hex(&hex)
    }
}

/// Replaces `alternate` followed by a known code with the section sign and the
/// lower-cased code, e.g. `&6Plot` becomes `§6Plot`.
pub fn translate_alternate_color_codes(alternate: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&code) if c == alternate && ALL_CODES.contains(code) => {
                out.push(LEGACY_SECTION_CHAR);
                out.push(code.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Renders a legacy string with ANSI escapes for terminal output.
pub fn to_console(legacy: &str) -> String {
    LegacySerializer::section()
        .deserialize(legacy)
        .to_pretty_console()
}
