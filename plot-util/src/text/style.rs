use serde::{Deserialize, Serialize};

use super::color::Color;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Changes the color to render the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Whether to render the content in bold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Whether to render the content in italic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Whether to render the content in underlined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    /// Whether to render the content in strikethrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// Whether to render the content in obfuscated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
}

impl Style {
    pub fn decoration(&self, decoration: Decoration) -> Option<bool> {
        match decoration {
            Decoration::Obfuscated => self.obfuscated,
            Decoration::Bold => self.bold,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::Underlined => self.underlined,
            Decoration::Italic => self.italic,
        }
    }

    pub fn set_decoration(&mut self, decoration: Decoration, state: Option<bool>) {
        let field = match decoration {
            Decoration::Obfuscated => &mut self.obfuscated,
            Decoration::Bold => &mut self.bold,
            Decoration::Strikethrough => &mut self.strikethrough,
            Decoration::Underlined => &mut self.underlined,
            Decoration::Italic => &mut self.italic,
        };
        *field = state;
    }

    /// Fills every unset field from `parent`, the way children inherit style.
    pub fn inherit(&self, parent: &Self) -> Self {
        Self {
            color: self.color.or(parent.color),
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underlined: self.underlined.or(parent.underlined),
            strikethrough: self.strikethrough.or(parent.strikethrough),
            obfuscated: self.obfuscated.or(parent.obfuscated),
        }
    }

    /// Decorations that are explicitly enabled, in legacy code order.
    pub fn active_decorations(&self) -> impl Iterator<Item = Decoration> + '_ {
        Decoration::ALL
            .into_iter()
            .filter(move |decoration| self.decoration(*decoration) == Some(true))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Obfuscated,
    Bold,
    Strikethrough,
    Underlined,
    Italic,
}

impl Decoration {
    pub const ALL: [Self; 5] = [
        Self::Obfuscated,
        Self::Bold,
        Self::Strikethrough,
        Self::Underlined,
        Self::Italic,
    ];

    pub const fn code(&self) -> char {
        match self {
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underlined => 'n',
            Self::Italic => 'o',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|decoration| decoration.code() == code)
    }

    /// Resolves a markup tag name, including the short aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bold" | "b" => Some(Self::Bold),
            "italic" | "i" | "em" => Some(Self::Italic),
            "underlined" | "u" => Some(Self::Underlined),
            "strikethrough" | "st" => Some(Self::Strikethrough),
            "obfuscated" | "obf" => Some(Self::Obfuscated),
            _ => None,
        }
    }
}
